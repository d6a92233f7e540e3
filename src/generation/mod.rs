//! Prompt-driven generation: cover letters, interview questions and résumé
//! keyword extraction.
//!
//! Every adapter builds a fixed prompt, calls a [`TextGenerator`] with the
//! adapter's sampling and safety settings, and returns the trimmed output.

pub mod client;
pub mod prompts;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use client::{GeminiClient, GeminiSettings};

use crate::models::generation::{JobDetails, ResumeKeywords};

/// Location used when a résumé does not name one.
pub const DEFAULT_LOCATION: &str = "India";

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("Content generation blocked: {0}")]
    Blocked(String),

    #[error("Content generation issue: {0}")]
    Incomplete(String),

    #[error("Failed to generate: no content in Gemini response.")]
    Empty,

    #[error("Failed to parse keyword data from AI response: {0}")]
    MalformedJson(#[source] serde_json::Error),

    #[error("Gemini API error (status {status}): {message}")]
    Backend { status: u16, message: String },

    #[error("Gemini request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// A backend that turns a single user prompt into text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        settings: &GenerationSettings,
    ) -> Result<String, GenerationError>;
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    pub max_output_tokens: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HarmCategory {
    #[serde(rename = "HARM_CATEGORY_HARASSMENT")]
    Harassment,
    #[serde(rename = "HARM_CATEGORY_HATE_SPEECH")]
    HateSpeech,
    #[serde(rename = "HARM_CATEGORY_SEXUALLY_EXPLICIT")]
    SexuallyExplicit,
    #[serde(rename = "HARM_CATEGORY_DANGEROUS_CONTENT")]
    DangerousContent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HarmBlockThreshold {
    BlockMediumAndAbove,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct SafetySetting {
    pub category: HarmCategory,
    pub threshold: HarmBlockThreshold,
}

impl SafetySetting {
    const fn medium(category: HarmCategory) -> Self {
        Self {
            category,
            threshold: HarmBlockThreshold::BlockMediumAndAbove,
        }
    }
}

/// Sampling and safety settings for one adapter.
#[derive(Debug, Clone)]
pub struct GenerationSettings {
    pub config: GenerationConfig,
    pub safety: &'static [SafetySetting],
}

const BASIC_SAFETY: &[SafetySetting] = &[
    SafetySetting::medium(HarmCategory::Harassment),
    SafetySetting::medium(HarmCategory::HateSpeech),
];

pub const COVER_LETTER: GenerationSettings = GenerationSettings {
    config: GenerationConfig {
        temperature: 0.7,
        top_k: Some(1),
        top_p: Some(1.0),
        max_output_tokens: 1024,
    },
    safety: &[
        SafetySetting::medium(HarmCategory::Harassment),
        SafetySetting::medium(HarmCategory::HateSpeech),
        SafetySetting::medium(HarmCategory::SexuallyExplicit),
        SafetySetting::medium(HarmCategory::DangerousContent),
    ],
};

pub const INTERVIEW_QUESTIONS: GenerationSettings = GenerationSettings {
    config: GenerationConfig {
        temperature: 0.6,
        top_k: None,
        top_p: None,
        max_output_tokens: 800,
    },
    safety: BASIC_SAFETY,
};

/// Low temperature keeps the structured output stable.
pub const RESUME_KEYWORDS: GenerationSettings = GenerationSettings {
    config: GenerationConfig {
        temperature: 0.1,
        top_k: None,
        top_p: None,
        max_output_tokens: 300,
    },
    safety: BASIC_SAFETY,
};

pub async fn cover_letter(
    generator: &dyn TextGenerator,
    job: &JobDetails,
    resume_text: &str,
) -> Result<String, GenerationError> {
    let prompt = prompts::cover_letter(job, resume_text);
    generator.generate(&prompt, &COVER_LETTER).await
}

pub async fn interview_questions(
    generator: &dyn TextGenerator,
    job: &JobDetails,
    resume_text: &str,
) -> Result<String, GenerationError> {
    let prompt = prompts::interview_questions(job, resume_text);
    generator.generate(&prompt, &INTERVIEW_QUESTIONS).await
}

pub async fn resume_keywords(
    generator: &dyn TextGenerator,
    resume_text: &str,
) -> Result<ResumeKeywords, GenerationError> {
    let prompt = prompts::resume_keywords(resume_text);
    let raw = generator.generate(&prompt, &RESUME_KEYWORDS).await?;
    parse_resume_keywords(&raw)
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawKeywords {
    job_title_keywords: Option<String>,
    skills: Option<String>,
    location: Option<String>,
}

/// Parse the keyword JSON, tolerating a surrounding code fence.
pub fn parse_resume_keywords(raw: &str) -> Result<ResumeKeywords, GenerationError> {
    let json = strip_code_fences(raw);
    let parsed: RawKeywords = serde_json::from_str(json).map_err(|e| {
        tracing::error!(error = %e, raw_output = %json, "Failed to parse keyword JSON");
        GenerationError::MalformedJson(e)
    })?;

    Ok(ResumeKeywords {
        job_title_keywords: parsed.job_title_keywords.unwrap_or_default(),
        skills: parsed.skills.unwrap_or_default(),
        location: parsed
            .location
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
    })
}

/// Strip a leading ```` ```json ```` (or bare ```` ``` ````) and a trailing
/// ```` ``` ```` from model output.
pub fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    let text = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
        .unwrap_or(text);
    text.strip_suffix("```").unwrap_or(text).trim()
}
