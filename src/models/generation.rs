use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Job context the generation prompts are built from.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobDetails {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub description: String,
}

/// Body shared by the cover letter and interview question endpoints.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobApplicationRequest {
    #[serde(default)]
    pub job_details: Option<JobDetails>,
    #[serde(default)]
    pub resume_text: String,
}

impl JobApplicationRequest {
    /// Split into job details and résumé text, rejecting blank fields.
    pub fn validate(self) -> Result<(JobDetails, String), AppError> {
        let missing = || {
            AppError::BadRequest(
                "Missing required fields: jobDetails (title, company, description) and resumeText."
                    .to_string(),
            )
        };
        let job = self.job_details.ok_or_else(missing)?;
        if [&job.title, &job.company, &job.description, &self.resume_text]
            .iter()
            .any(|field| field.trim().is_empty())
        {
            return Err(missing());
        }
        Ok((job, self.resume_text))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeRequest {
    #[serde(default)]
    pub resume_text: String,
}

impl ResumeRequest {
    pub fn validate(self) -> Result<String, AppError> {
        if self.resume_text.trim().is_empty() {
            return Err(AppError::BadRequest(
                "Missing required field: resumeText.".to_string(),
            ));
        }
        Ok(self.resume_text)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetterResponse {
    pub cover_letter: String,
}

#[derive(Debug, Serialize)]
pub struct InterviewQuestionsResponse {
    pub questions: String,
}

/// Search form prefill extracted from a résumé.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeKeywords {
    pub job_title_keywords: String,
    pub skills: String,
    pub location: String,
}
