use axum::Json;
use axum::extract::State;

use crate::error::AppError;
use crate::routes::api::AppJson;
use crate::generation;
use crate::models::generation::{
    CoverLetterResponse, InterviewQuestionsResponse, JobApplicationRequest, ResumeKeywords,
    ResumeRequest,
};
use crate::state::AppState;

/// POST /api/generate-cover-letter
pub async fn cover_letter(
    State(state): State<AppState>,
    AppJson(input): AppJson<JobApplicationRequest>,
) -> Result<Json<CoverLetterResponse>, AppError> {
    let generator = state.generator()?;
    let (job, resume_text) = input.validate()?;

    let cover_letter = generation::cover_letter(generator, &job, &resume_text).await?;
    tracing::info!(company = %job.company, "Generated cover letter");
    Ok(Json(CoverLetterResponse { cover_letter }))
}

/// POST /api/generate-interview-questions
pub async fn interview_questions(
    State(state): State<AppState>,
    AppJson(input): AppJson<JobApplicationRequest>,
) -> Result<Json<InterviewQuestionsResponse>, AppError> {
    let generator = state.generator()?;
    let (job, resume_text) = input.validate()?;

    let questions = generation::interview_questions(generator, &job, &resume_text).await?;
    tracing::info!(company = %job.company, "Generated interview questions");
    Ok(Json(InterviewQuestionsResponse { questions }))
}

/// POST /api/extract-resume-keywords
pub async fn resume_keywords(
    State(state): State<AppState>,
    AppJson(input): AppJson<ResumeRequest>,
) -> Result<Json<ResumeKeywords>, AppError> {
    let generator = state.generator()?;
    let resume_text = input.validate()?;

    let keywords = generation::resume_keywords(generator, &resume_text).await?;
    tracing::info!(
        titles = %keywords.job_title_keywords,
        location = %keywords.location,
        "Extracted resume keywords"
    );
    Ok(Json(keywords))
}
