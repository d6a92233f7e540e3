use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::fetchers::{FetchError, JobFetcher, NativeId, ProviderEndpoint, present, send_json};
use crate::models::listing::{
    JobListing, NOT_AVAILABLE, SearchParams, SourceApi, strip_html, truncate_snippet,
};

const NO_DESCRIPTION: &str = "No description provided.";

/// LinkedIn jobs search (`POST /`).
pub struct LinkedInPost {
    client: reqwest::Client,
    endpoint: ProviderEndpoint,
}

impl LinkedInPost {
    pub fn new(client: reqwest::Client, endpoint: ProviderEndpoint) -> Self {
        Self { client, endpoint }
    }
}

#[derive(Debug, Serialize)]
struct SearchBody {
    search_terms: String,
    location: String,
    page: String,
}

#[async_trait]
impl JobFetcher for LinkedInPost {
    fn source(&self) -> SourceApi {
        SourceApi::LinkedInPostSearch
    }

    async fn fetch(&self, params: &SearchParams) -> Result<Vec<JobListing>, FetchError> {
        let body = SearchBody {
            search_terms: params.keywords_and_skills(),
            location: params.location.clone(),
            page: params.page.to_string(),
        };
        let request = self.client.post(self.endpoint.url("/")).json(&body);

        let body: serde_json::Value = send_json(&self.endpoint, request).await?;
        // Results are a bare array; any other body means no results.
        let jobs: Vec<RawJob> = if body.is_array() {
            serde_json::from_value(body)?
        } else {
            tracing::warn!(%body, "LinkedIn search returned a non-array body");
            Vec::new()
        };
        Ok(jobs.into_iter().map(into_listing).collect())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawJob {
    linkedin_job_id: Option<NativeId>,
    job_id: Option<NativeId>,
    job_title: Option<String>,
    company_name: Option<String>,
    job_location: Option<String>,
    job_description: Option<String>,
    linkedin_job_url: Option<String>,
    job_url: Option<String>,
    posted_date: Option<String>,
    job_posted_date: Option<String>,
}

fn into_listing(job: RawJob) -> JobListing {
    let description = present(job.job_description);
    let snippet = description
        .as_deref()
        .map(strip_html)
        .filter(|text| !text.is_empty())
        .map(|text| truncate_snippet(&text));

    let native_id = job.linkedin_job_id.or(job.job_id).map(NativeId::into_string);

    JobListing {
        id: SourceApi::LinkedInPostSearch.listing_id(native_id),
        source_api: SourceApi::LinkedInPostSearch,
        title: present(job.job_title).unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        company: present(job.company_name).unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        location: present(job.job_location).unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        description: description.unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        snippet,
        url: present(job.linkedin_job_url).or_else(|| present(job.job_url)),
        date_posted: present(job.posted_date).or_else(|| present(job.job_posted_date)),
        salary: None,
    }
}
