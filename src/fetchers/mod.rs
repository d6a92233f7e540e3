// Fetcher module.
// Defines the trait, shared plumbing and registry for job-listing providers.

pub mod jsearch;
pub mod linkedin;
pub mod upwork;

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::RequestBuilder;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::models::listing::{JobListing, SearchParams, SourceApi, truncate_snippet};

pub use jsearch::JSearch;
pub use linkedin::LinkedInPost;
pub use upwork::UpworkJobs;

/// Trait that all job fetchers must implement.
/// Each fetcher queries one provider and maps its response into
/// `JobListing`s in the provider's native order.
#[async_trait]
pub trait JobFetcher: Send + Sync {
    fn source(&self) -> SourceApi;

    async fn fetch(&self, params: &SearchParams) -> Result<Vec<JobListing>, FetchError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("provider returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Where and how to reach one RapidAPI-hosted provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderEndpoint {
    host: String,
    api_key: String,
    base_url: String,
}

impl ProviderEndpoint {
    pub fn new(host: impl Into<String>, api_key: impl Into<String>) -> Self {
        let host = host.into();
        Self {
            base_url: format!("https://{host}"),
            host,
            api_key: api_key.into(),
        }
    }

    /// Send requests somewhere other than `https://{host}`.
    #[cfg(test)]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    #[cfg(test)]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[cfg(test)]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("X-RapidAPI-Key", &self.api_key)
            .header("X-RapidAPI-Host", &self.host)
    }
}

/// Build the fetchers for every configured provider, in registration order.
pub fn configured_fetchers(
    config: &Config,
    client: &reqwest::Client,
) -> Vec<Arc<dyn JobFetcher>> {
    let mut fetchers: Vec<Arc<dyn JobFetcher>> = Vec::new();

    match config.jsearch() {
        Some(endpoint) => fetchers.push(Arc::new(JSearch::new(client.clone(), endpoint))),
        None => tracing::warn!("JSearch API not configured. Skipping."),
    }
    match config.upwork_jobs() {
        Some(endpoint) => fetchers.push(Arc::new(UpworkJobs::new(client.clone(), endpoint))),
        None => tracing::warn!("Upwork Jobs API not configured. Skipping."),
    }
    match config.linkedin_post() {
        Some(endpoint) => fetchers.push(Arc::new(LinkedInPost::new(client.clone(), endpoint))),
        None => tracing::warn!("LinkedIn Jobs Search (POST) API not configured. Skipping."),
    }

    fetchers
}

/// Send an authorized request and decode a JSON body.
/// Non-success statuses carry the provider's `message` field when it has one.
async fn send_json<T: DeserializeOwned>(
    endpoint: &ProviderEndpoint,
    request: RequestBuilder,
) -> Result<T, FetchError> {
    let resp = endpoint.authorize(request).send().await?;

    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ProviderError>(&body)
            .ok()
            .and_then(|e| e.message)
            .unwrap_or(body);
        return Err(FetchError::Status {
            status: status.as_u16(),
            message,
        });
    }

    let bytes = resp.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    message: Option<String>,
}

/// Provider ids come as strings from some APIs and numbers from others.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum NativeId {
    Text(String),
    Number(serde_json::Number),
}

impl NativeId {
    pub(crate) fn into_string(self) -> String {
        match self {
            NativeId::Text(s) => s,
            NativeId::Number(n) => n.to_string(),
        }
    }
}

/// Treat empty and whitespace-only strings as absent.
pub(crate) fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Snippet for a description unless it is the provider's placeholder.
pub(crate) fn synthesize_snippet(description: &str, placeholder: &str) -> Option<String> {
    if description == placeholder || description.trim().is_empty() {
        None
    } else {
        Some(truncate_snippet(description))
    }
}
