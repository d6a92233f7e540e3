use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Maximum snippet length in characters before the ellipsis.
pub const SNIPPET_CHARS: usize = 150;

pub const NOT_AVAILABLE: &str = "N/A";

/// Provider a listing came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceApi {
    #[serde(rename = "JSearch")]
    JSearch,
    #[serde(rename = "UpworkJobsP")]
    UpworkJobsP,
    #[serde(rename = "LinkedInPostSearch")]
    LinkedInPostSearch,
}

impl SourceApi {
    /// Prefix for listing ids, keeps ids unique across providers.
    pub fn id_prefix(self) -> &'static str {
        match self {
            SourceApi::JSearch => "jsearch",
            SourceApi::UpworkJobsP => "upwork-jobs-p",
            SourceApi::LinkedInPostSearch => "linkedinpost",
        }
    }

    pub fn listing_id(self, native_id: Option<String>) -> String {
        let id = native_id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        format!("{}-{id}", self.id_prefix())
    }
}

impl std::fmt::Display for SourceApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SourceApi::JSearch => "JSearch",
            SourceApi::UpworkJobsP => "UpworkJobsP",
            SourceApi::LinkedInPostSearch => "LinkedInPostSearch",
        };
        f.write_str(name)
    }
}

/// A job posting normalized from any provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListing {
    pub id: String,
    pub source_api: SourceApi,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_posted: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
}

/// Body of `POST /api/search-jobs`.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub keywords: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub skills: Option<String>,
    #[serde(default)]
    pub page: Option<PageParam>,
}

/// The search form posts the page as a string, API clients as a number.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PageParam {
    Number(i64),
    Text(String),
}

/// Validated search input shared by every fetcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    pub keywords: String,
    pub location: String,
    pub skills: Option<String>,
    pub page: u32,
}

#[cfg(test)]
impl SearchParams {
    pub fn new(keywords: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            keywords: keywords.into(),
            location: location.into(),
            skills: None,
            page: 1,
        }
    }

    pub fn with_skills(mut self, skills: impl Into<String>) -> Self {
        self.skills = Some(skills.into());
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }
}

impl SearchParams {
    /// `"{keywords} {skills}"`, trimmed; skills may be absent.
    pub fn keywords_and_skills(&self) -> String {
        format!(
            "{} {}",
            self.keywords,
            self.skills.as_deref().unwrap_or_default()
        )
        .trim()
        .to_string()
    }
}

impl TryFrom<SearchRequest> for SearchParams {
    type Error = AppError;

    fn try_from(req: SearchRequest) -> Result<Self, Self::Error> {
        let keywords = req.keywords.map(|k| k.trim().to_string()).unwrap_or_default();
        let location = req.location.map(|l| l.trim().to_string()).unwrap_or_default();
        if keywords.is_empty() || location.is_empty() {
            return Err(AppError::BadRequest(
                "Keywords and Location are required.".to_string(),
            ));
        }

        let skills = req
            .skills
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let page = match req.page {
            None => 1,
            Some(PageParam::Number(n)) => positive_page(n)?,
            Some(PageParam::Text(s)) if s.trim().is_empty() => 1,
            Some(PageParam::Text(s)) => {
                let n = s
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| AppError::BadRequest(format!("Invalid page: {s}")))?;
                positive_page(n)?
            }
        };

        Ok(SearchParams {
            keywords,
            location,
            skills,
            page,
        })
    }
}

fn positive_page(n: i64) -> Result<u32, AppError> {
    u32::try_from(n)
        .ok()
        .filter(|p| *p >= 1)
        .ok_or_else(|| AppError::BadRequest(format!("Page must be a positive integer, got {n}")))
}

/// First [`SNIPPET_CHARS`] characters of `text`, with `...` when cut.
pub fn truncate_snippet(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(SNIPPET_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Replace HTML tags with spaces and collapse whitespace.
/// A `<` without a closing `>` is kept as text.
pub fn strip_html(html: &str) -> String {
    let text = HTML_TAG.replace_all(html, " ");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
