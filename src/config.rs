use std::time::Duration;

use clap::Parser;

use crate::fetchers::ProviderEndpoint;
use crate::generation::GeminiSettings;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash-latest";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Parser, Debug, Clone)]
#[command(name = "jobscout", about = "Job search aggregator and application assistant")]
pub struct Config {
    /// Listen address
    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:8080")]
    pub listen_addr: String,

    /// RapidAPI key shared by every job-listing provider
    #[arg(long, env = "RAPIDAPI_KEY", hide_env_values = true)]
    pub rapidapi_key: Option<String>,

    /// JSearch provider host
    #[arg(long, env = "RAPIDAPI_JSEARCH_HOST")]
    pub jsearch_host: Option<String>,

    /// Upwork Jobs provider host
    #[arg(long, env = "RAPIDAPI_UPWORK_JOBS_P_HOST")]
    pub upwork_jobs_host: Option<String>,

    /// LinkedIn jobs search (POST) provider host
    #[arg(long, env = "RAPIDAPI_LINKEDINPOST_HOST")]
    pub linkedin_post_host: Option<String>,

    /// Gemini API key; generation endpoints are disabled without it
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: Option<String>,

    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_GEMINI_MODEL)]
    pub gemini_model: String,

    #[arg(long, env = "GEMINI_BASE_URL", default_value = DEFAULT_GEMINI_BASE_URL)]
    pub gemini_base_url: String,

    /// Timeout in seconds for every outbound HTTP request
    #[arg(long, env = "HTTP_TIMEOUT_SECS", default_value = "30")]
    pub http_timeout_secs: u64,

    /// Log output format
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value = "text")]
    pub log_format: LogFormat,
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl Config {
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn jsearch(&self) -> Option<ProviderEndpoint> {
        self.endpoint(self.jsearch_host.as_deref())
    }

    pub fn upwork_jobs(&self) -> Option<ProviderEndpoint> {
        self.endpoint(self.upwork_jobs_host.as_deref())
    }

    pub fn linkedin_post(&self) -> Option<ProviderEndpoint> {
        self.endpoint(self.linkedin_post_host.as_deref())
    }

    /// Gemini settings, or `None` when no API key is set.
    pub fn gemini(&self) -> Option<GeminiSettings> {
        let api_key = non_blank(self.gemini_api_key.as_deref())?;
        Some(GeminiSettings {
            api_key: api_key.to_string(),
            model: self.gemini_model.clone(),
            base_url: self.gemini_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// A provider is active only when both the shared key and its host are set.
    fn endpoint(&self, host: Option<&str>) -> Option<ProviderEndpoint> {
        let key = non_blank(self.rapidapi_key.as_deref())?;
        let host = non_blank(host)?;
        Some(ProviderEndpoint::new(host, key))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
