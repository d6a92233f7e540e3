pub mod generate;
pub mod search;

use axum::Router;
use axum::extract::FromRequest;
use axum::routing::post;

use crate::error::AppError;
use crate::state::AppState;

/// `Json` whose rejections are reported as `{message}` bodies.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/search-jobs", post(search::search))
        .route("/generate-cover-letter", post(generate::cover_letter))
        .route(
            "/generate-interview-questions",
            post(generate::interview_questions),
        )
        .route("/extract-resume-keywords", post(generate::resume_keywords))
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(state);

    Router::new().nest("/api", api)
}
