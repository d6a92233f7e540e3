use axum::Json;
use axum::extract::State;

use crate::error::AppError;
use crate::routes::api::AppJson;
use crate::models::listing::{JobListing, SearchParams, SearchRequest};
use crate::state::AppState;

/// POST /api/search-jobs
///
/// Query every configured provider and return the de-duplicated listings.
/// Provider failures only shrink the result; an empty list is a success.
pub async fn search(
    State(state): State<AppState>,
    AppJson(input): AppJson<SearchRequest>,
) -> Result<Json<Vec<JobListing>>, AppError> {
    let params = SearchParams::try_from(input)?;
    let listings = state.aggregator.search(&params).await;
    Ok(Json(listings))
}
