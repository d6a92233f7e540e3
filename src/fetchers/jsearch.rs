use async_trait::async_trait;
use serde::Deserialize;

use crate::fetchers::{
    FetchError, JobFetcher, NativeId, ProviderEndpoint, present, send_json, synthesize_snippet,
};
use crate::models::listing::{JobListing, NOT_AVAILABLE, SearchParams, SourceApi};

const NO_DESCRIPTION: &str = "No description available.";

/// JSearch (`GET /search`).
pub struct JSearch {
    client: reqwest::Client,
    endpoint: ProviderEndpoint,
}

impl JSearch {
    pub fn new(client: reqwest::Client, endpoint: ProviderEndpoint) -> Self {
        Self { client, endpoint }
    }
}

#[async_trait]
impl JobFetcher for JSearch {
    fn source(&self) -> SourceApi {
        SourceApi::JSearch
    }

    async fn fetch(&self, params: &SearchParams) -> Result<Vec<JobListing>, FetchError> {
        let page = params.page.to_string();
        let request = self.client.get(self.endpoint.url("/search")).query(&[
            ("query", build_query(params).as_str()),
            ("page", page.as_str()),
            ("num_pages", "1"),
        ]);

        let resp: SearchResponse = send_json(&self.endpoint, request).await?;
        Ok(resp
            .data
            .unwrap_or_default()
            .into_iter()
            .map(into_listing)
            .collect())
    }
}

/// `"{keywords} {skills} in {location}"`.
fn build_query(params: &SearchParams) -> String {
    format!(
        "{} {} in {}",
        params.keywords,
        params.skills.as_deref().unwrap_or_default(),
        params.location
    )
    .trim()
    .to_string()
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Option<Vec<RawJob>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawJob {
    job_id: Option<NativeId>,
    job_title: Option<String>,
    employer_name: Option<String>,
    employer_website: Option<String>,
    job_city: Option<String>,
    job_state: Option<String>,
    job_country: Option<String>,
    job_description: Option<String>,
    job_highlights: Option<Highlights>,
    job_apply_link: Option<String>,
    job_posted_at_datetime_utc: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Highlights {
    #[serde(rename = "Snippets")]
    snippets: Option<Vec<String>>,
    description: Option<String>,
}

fn into_listing(job: RawJob) -> JobListing {
    let description = present(job.job_description).unwrap_or_else(|| NO_DESCRIPTION.to_string());

    let highlighted = job.job_highlights.and_then(|h| {
        present(h.snippets.and_then(|s| s.into_iter().next())).or_else(|| present(h.description))
    });
    let snippet = highlighted.or_else(|| synthesize_snippet(&description, NO_DESCRIPTION));

    let location = present(job.job_city)
        .or_else(|| present(job.job_state))
        .or_else(|| present(job.job_country))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    JobListing {
        id: SourceApi::JSearch.listing_id(job.job_id.map(NativeId::into_string)),
        source_api: SourceApi::JSearch,
        title: present(job.job_title).unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        company: present(job.employer_name).unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        location,
        description,
        snippet,
        url: present(job.job_apply_link).or_else(|| present(job.employer_website)),
        date_posted: present(job.job_posted_at_datetime_utc),
        salary: None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use axum::Json;
    use axum::Router;
    use axum::extract::Query;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::get;
    use serde_json::json;

    use super::*;
    use crate::testing::{Captured, serve};

    #[test]
    fn query_joins_keywords_skills_and_location() {
        let params = SearchParams::new("rust developer", "Berlin");
        assert_eq!(build_query(&params), "rust developer  in Berlin");
        let params = params.with_skills("tokio");
        assert_eq!(build_query(&params), "rust developer tokio in Berlin");
    }

    #[test]
    fn maps_fields_and_placeholders() {
        let raw: RawJob = serde_json::from_value(json!({
            "job_id": "abc123",
            "job_title": "Backend Engineer",
            "employer_name": "Acme",
            "job_city": null,
            "job_state": "NY",
            "job_description": "x".repeat(200),
            "employer_website": "https://acme.example",
            "job_posted_at_datetime_utc": "2024-05-01T00:00:00.000Z"
        }))
        .unwrap();
        let listing = into_listing(raw);

        assert_eq!(listing.id, "jsearch-abc123");
        assert_eq!(listing.source_api, SourceApi::JSearch);
        assert_eq!(listing.location, "NY");
        assert_eq!(listing.url.as_deref(), Some("https://acme.example"));
        assert_eq!(listing.snippet.as_deref(), Some(format!("{}...", "x".repeat(150)).as_str()));
        assert_eq!(listing.date_posted.as_deref(), Some("2024-05-01T00:00:00.000Z"));

        let bare = into_listing(RawJob::default());
        assert_eq!(bare.title, NOT_AVAILABLE);
        assert_eq!(bare.company, NOT_AVAILABLE);
        assert_eq!(bare.location, NOT_AVAILABLE);
        assert_eq!(bare.description, NO_DESCRIPTION);
        assert_eq!(bare.snippet, None);
        assert!(bare.id.starts_with("jsearch-"));
    }

    #[test]
    fn prefers_highlight_snippet() {
        let raw: RawJob = serde_json::from_value(json!({
            "job_description": "Long description",
            "job_highlights": { "Snippets": ["Highlighted"] }
        }))
        .unwrap();
        assert_eq!(into_listing(raw).snippet.as_deref(), Some("Highlighted"));
    }

    #[tokio::test]
    async fn fetches_from_provider() {
        let seen: Captured<(HashMap<String, String>, HeaderMap)> = Captured::default();
        let recorder = seen.clone();
        let app = Router::new().route(
            "/search",
            get(
                move |Query(query): Query<HashMap<String, String>>, headers: HeaderMap| async move {
                    recorder.push((query, headers));
                    Json(json!({
                        "status": "OK",
                        "data": [
                            { "job_id": "1", "job_title": "Engineer", "employer_name": "Acme", "job_city": "NYC" },
                            { "job_id": "2", "job_title": "Designer", "employer_name": "Globex", "job_country": "US" }
                        ]
                    }))
                },
            ),
        );
        let base = serve(app).await;

        let fetcher = JSearch::new(
            reqwest::Client::new(),
            ProviderEndpoint::new("jsearch.p.rapidapi.com", "secret").with_base_url(base),
        );
        let params = SearchParams::new("engineer", "NYC").with_page(3);
        let listings = fetcher.fetch(&params).await.unwrap();

        let ids: Vec<_> = listings.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, ["jsearch-1", "jsearch-2"]);
        assert_eq!(listings[1].location, "US");

        let (query, headers) = seen.all().remove(0);
        assert_eq!(query["query"], "engineer  in NYC");
        assert_eq!(query["page"], "3");
        assert_eq!(query["num_pages"], "1");
        assert_eq!(headers["x-rapidapi-key"], "secret");
        assert_eq!(headers["x-rapidapi-host"], "jsearch.p.rapidapi.com");
    }

    #[tokio::test]
    async fn missing_data_is_empty() {
        let app = Router::new().route("/search", get(|| async { Json(json!({ "status": "OK" })) }));
        let base = serve(app).await;

        let fetcher = JSearch::new(
            reqwest::Client::new(),
            ProviderEndpoint::new("jsearch", "k").with_base_url(base),
        );
        let listings = fetcher.fetch(&SearchParams::new("a", "b")).await.unwrap();
        assert!(listings.is_empty());
    }

    #[tokio::test]
    async fn error_status_carries_provider_message() {
        let app = Router::new().route(
            "/search",
            get(|| async {
                (
                    StatusCode::FORBIDDEN,
                    Json(json!({ "message": "You are not subscribed to this API." })),
                )
            }),
        );
        let base = serve(app).await;

        let fetcher = JSearch::new(
            reqwest::Client::new(),
            ProviderEndpoint::new("jsearch", "k").with_base_url(base),
        );
        let err = fetcher.fetch(&SearchParams::new("a", "b")).await.unwrap_err();
        match err {
            FetchError::Status { status, message } => {
                assert_eq!(status, 403);
                assert_eq!(message, "You are not subscribed to this API.");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
