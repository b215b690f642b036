//! HTTP client for the component exchange
//!
//! Every endpoint is resolved against the configured base URL, so catalogs
//! mounted under a path prefix (`https://host/api`) work unchanged.

use crate::error::{Error, Result};
use crate::types::{
    ComponentMetadata, ComponentSummary, Credentials, DependencyReport, SearchResults,
    TokenResponse,
};
use ojet_core::{OjetSettings, Project};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Client for the component exchange REST API
#[derive(Debug, Clone)]
pub struct ExchangeClient {
    base_url: Url,
    http: Client,
}

impl ExchangeClient {
    /// Create a client for `base_url` with a request timeout
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| Error::InvalidExchangeUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidExchangeUrl {
                url: base_url.to_string(),
                reason: "URL cannot be used as a base".to_string(),
            });
        }

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("ojet/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { base_url, http })
    }

    /// Build a client from the project's `exchange-url`, falling back to user settings.
    ///
    /// Returns `Ok(None)` when neither source configures a URL.
    pub fn from_config(project: &Project, settings: &OjetSettings) -> Result<Option<Self>> {
        let url = project
            .config()
            .exchange_url
            .as_deref()
            .or(settings.exchange.url.as_deref());

        match url {
            Some(url) => {
                let timeout = Duration::from_secs(settings.exchange.http_timeout_secs);
                Ok(Some(Self::new(url, timeout)?))
            }
            None => Ok(None),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// `GET /components/{name}[/versions/{version}]`
    pub async fn component_metadata(
        &self,
        name: &str,
        version: Option<&str>,
    ) -> Result<ComponentMetadata> {
        let url = match version {
            Some(version) => self.endpoint(&["components", name, "versions", version]),
            None => self.endpoint(&["components", name]),
        };
        debug!("Fetching component metadata from {}", url);
        let response = self.http.get(url.clone()).send().await?;
        read_json(&url, response).await
    }

    /// Download a component bundle fully into memory
    pub async fn download_archive(&self, code_url: &str) -> Result<Vec<u8>> {
        let url = match Url::parse(code_url) {
            Ok(url) => url,
            Err(_) => self
                .base_url
                .join(code_url)
                .map_err(|e| Error::malformed(code_url, e.to_string()))?,
        };
        debug!("Downloading component archive from {}", url);
        let response = check_status(&url, self.http.get(url.clone()).send().await?).await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// `GET /components/{name}/versions/{version}/compositeDependencies`
    pub async fn dependencies(&self, name: &str, version: &str) -> Result<DependencyReport> {
        let url = self.endpoint(&[
            "components",
            name,
            "versions",
            version,
            "compositeDependencies",
        ]);
        debug!("Fetching dependencies from {}", url);
        let response = self.http.get(url.clone()).send().await?;
        read_json(&url, response).await
    }

    /// `GET /components?q=<keyword>`
    pub async fn search(&self, keyword: &str) -> Result<Vec<ComponentSummary>> {
        let mut url = self.endpoint(&["components"]);
        url.query_pairs_mut().append_pair("q", keyword);
        debug!("Searching exchange: {}", url);
        let response = self.http.get(url.clone()).send().await?;
        let results: SearchResults = read_json(&url, response).await?;
        Ok(results.items)
    }

    /// Exchange credentials for a bearer token
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<String> {
        let url = self.endpoint(&["auth", "token"]);
        debug!("Authenticating {} against {}", credentials.username, url);
        let response = self
            .http
            .post(url.clone())
            .json(credentials)
            .send()
            .await?;
        let token: TokenResponse = read_json(&url, response).await?;
        Ok(token.access_token)
    }

    /// Upload a zipped component as a multipart `file` field
    pub async fn publish(&self, token: &str, file_name: &str, bytes: Vec<u8>) -> Result<()> {
        let mut url = self.endpoint(&["components"]);
        url.query_pairs_mut().append_pair("access", "PUBLIC");

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str("application/zip")?;
        let form = reqwest::multipart::Form::new().part("file", part);

        debug!("Publishing {} to {}", file_name, url);
        let response = self
            .http
            .post(url.clone())
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?;
        check_status(&url, response).await?;
        Ok(())
    }

    /// `PUT /components/{name}/labels/{label}` pointing the label at `version`
    pub async fn label(&self, token: &str, name: &str, version: &str, label: &str) -> Result<()> {
        let url = self.endpoint(&["components", name, "labels", label]);
        debug!("Labelling {}@{} as {} via {}", name, version, label, url);
        let response = self
            .http
            .put(url.clone())
            .bearer_auth(token)
            .json(&serde_json::json!({ "version": version }))
            .send()
            .await?;
        check_status(&url, response).await?;
        Ok(())
    }
}

async fn check_status(url: &Url, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(Error::Status {
        url: url.to_string(),
        status: status.as_u16(),
        body,
    })
}

async fn read_json<T: DeserializeOwned>(url: &Url, response: Response) -> Result<T> {
    let response = check_status(url, response).await?;
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| Error::malformed(url.as_str(), e.to_string()))
}
