//! Registry connection settings, resolved from the environment.

use anyhow::{Context, Result, bail};

const URL_VAR: &str = "GODATA_URL";
const TOKEN_VAR: &str = "GODATA_TOKEN";
const USERNAME_VAR: &str = "GODATA_USERNAME";
const PASSWORD_VAR: &str = "GODATA_PASSWORD";

#[derive(Debug, Clone)]
pub struct RegistrySettings {
    pub base_url: String,
    /// Pre-shared client token; used directly when no credentials are set,
    /// or as the bootstrap token on the login endpoint otherwise.
    pub token: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

fn optional(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|value| !value.is_empty())
}

impl RegistrySettings {
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var(URL_VAR)
            .ok()
            .filter(|value| !value.is_empty())
            .with_context(|| format!("{URL_VAR} is not set"))?;
        Ok(Self {
            base_url,
            token: optional(TOKEN_VAR),
            username: optional(USERNAME_VAR),
            password: optional(PASSWORD_VAR),
        })
    }

    /// Obtains the access token: logs in when credentials are present,
    /// otherwise falls back to the pre-shared token.
    pub fn access_token(&self) -> Result<String> {
        if let (Some(username), Some(password)) = (&self.username, &self.password) {
            let token = godata_client::login(
                &self.base_url,
                self.token.as_deref(),
                username,
                password,
            )?;
            return Ok(token);
        }
        if let Some(token) = &self.token {
            return Ok(token.clone());
        }
        bail!("set {TOKEN_VAR}, or {USERNAME_VAR} and {PASSWORD_VAR}, to authenticate");
    }
}
