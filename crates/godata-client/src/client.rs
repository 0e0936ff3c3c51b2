//! Blocking HTTP client for the Go.Data outbreak registry.
//!
//! Each call is one synchronous round trip authenticated by an
//! `access_token` query parameter. The client is shared read-only across
//! upload workers; `reqwest::blocking::Client` keeps its own connection
//! pool behind an `Arc`.

use std::time::Duration;

use reqwest::Method;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use godata_model::{GoDataCase, LocationNode};

use crate::error::{ApiError, Result};

/// Per-request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// A named disease-investigation context in the registry.
#[derive(Debug, Clone, Deserialize)]
pub struct Outbreak {
    pub id: String,
    pub name: String,
}

/// Slim view of a case already stored remotely, enough to address updates.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExistingCase {
    pub id: String,
    #[serde(default)]
    pub visual_id: Option<String>,
}

/// Response to a case create/update.
#[derive(Debug, Clone, Deserialize)]
pub struct CaseResponse {
    pub id: Option<String>,
}

pub struct GodataClient {
    base_url: String,
    token: String,
    http: Client,
}

impl GodataClient {
    pub fn new(base_url: &str, token: impl Into<String>) -> Result<Self> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
            http,
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&GoDataCase>,
    ) -> Result<T> {
        let url = self.url(endpoint);
        debug!(%method, %url, "registry request");

        let mut request = self
            .http
            .request(method, &url)
            .query(&[("access_token", self.token.as_str())]);
        if let Some(case) = body {
            request = request.json(case);
        }

        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_else(|_| "unknown error".to_string());
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json()?)
    }

    pub fn list_outbreaks(&self) -> Result<Vec<Outbreak>> {
        self.request(Method::GET, "/api/outbreaks", None)
    }

    /// Resolves an outbreak by exact name; a missing name is fatal.
    pub fn outbreak_id_by_name(&self, name: &str) -> Result<String> {
        let outbreaks = self.list_outbreaks()?;
        outbreaks
            .into_iter()
            .find(|outbreak| outbreak.name == name)
            .map(|outbreak| outbreak.id)
            .ok_or_else(|| ApiError::OutbreakNotFound(name.to_string()))
    }

    pub fn list_cases(&self, outbreak_id: &str) -> Result<Vec<ExistingCase>> {
        self.request(Method::GET, &format!("/api/outbreaks/{outbreak_id}/cases"), None)
    }

    /// Full country → state → (region) → municipality forest, fetched once
    /// per process lifetime.
    pub fn hierarchical_locations(&self) -> Result<Vec<LocationNode>> {
        self.request(Method::GET, "/api/locations/hierarchical", None)
    }

    pub fn create_case(&self, outbreak_id: &str, case: &GoDataCase) -> Result<CaseResponse> {
        self.request(
            Method::POST,
            &format!("/api/outbreaks/{outbreak_id}/cases"),
            Some(case),
        )
    }

    pub fn update_case(
        &self,
        outbreak_id: &str,
        case_id: &str,
        case: &GoDataCase,
    ) -> Result<CaseResponse> {
        self.request(
            Method::PUT,
            &format!("/api/outbreaks/{outbreak_id}/cases/{case_id}"),
            Some(case),
        )
    }
}
