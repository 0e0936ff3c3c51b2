//! Login flow: exchanges user credentials for an access token.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::info;

use crate::error::{ApiError, Result};

const LOGIN_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, Deserialize)]
struct LoginResponse {
    /// Go.Data returns the session token as the login record's id.
    id: Option<String>,
}

/// Logs in with email and password, returning the access token for all
/// subsequent calls. `bootstrap_token` is the pre-shared client token some
/// deployments require on the login endpoint itself.
pub fn login(
    base_url: &str,
    bootstrap_token: Option<&str>,
    username: &str,
    password: &str,
) -> Result<String> {
    let http = Client::builder().timeout(LOGIN_TIMEOUT).build()?;
    let url = format!("{}/api/users/login", base_url.trim_end_matches('/'));

    let mut request = http
        .post(&url)
        .form(&[("email", username), ("password", password)]);
    if let Some(token) = bootstrap_token {
        request = request.query(&[("access_token", token)]);
    }

    let response = request.send()?;
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::LoginFailed(format!("status {}", status.as_u16())));
    }

    let body: LoginResponse = response.json()?;
    match body.id {
        Some(token) => {
            info!("authenticated against the registry");
            Ok(token)
        }
        None => Err(ApiError::LoginFailed(
            "login response carried no token".to_string(),
        )),
    }
}
