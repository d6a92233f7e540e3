use async_trait::async_trait;
use serde::Deserialize;

use crate::fetchers::{
    FetchError, JobFetcher, NativeId, ProviderEndpoint, present, send_json, synthesize_snippet,
};
use crate::models::listing::{JobListing, NOT_AVAILABLE, SearchParams, SourceApi};

const NO_DESCRIPTION: &str = "No description available.";
const DEFAULT_COMPANY: &str = "Freelance Client";
const DEFAULT_LOCATION: &str = "Remote";

/// Upwork Jobs (`GET /jobs`).
///
/// The request parameters and response fields below are a best guess at the
/// provider's contract and have not been verified against live responses.
/// Upwork gigs are mostly remote, so location is not sent.
pub struct UpworkJobs {
    client: reqwest::Client,
    endpoint: ProviderEndpoint,
}

impl UpworkJobs {
    pub fn new(client: reqwest::Client, endpoint: ProviderEndpoint) -> Self {
        Self { client, endpoint }
    }
}

#[async_trait]
impl JobFetcher for UpworkJobs {
    fn source(&self) -> SourceApi {
        SourceApi::UpworkJobsP
    }

    async fn fetch(&self, params: &SearchParams) -> Result<Vec<JobListing>, FetchError> {
        let mut query = Vec::with_capacity(2);
        let terms = params.keywords_and_skills();
        if !terms.is_empty() {
            query.push(("query", terms));
        }
        query.push(("page", params.page.to_string()));

        let request = self.client.get(self.endpoint.url("/jobs")).query(&query);
        let resp: JobsResponse = send_json(&self.endpoint, request).await?;
        Ok(resp.into_jobs().into_iter().map(into_listing).collect())
    }
}

/// The jobs array arrives bare or under `jobs` / `results`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JobsResponse {
    Bare(Vec<RawJob>),
    Wrapped {
        #[serde(default)]
        jobs: Option<Vec<RawJob>>,
        #[serde(default)]
        results: Option<Vec<RawJob>>,
    },
}

impl JobsResponse {
    fn into_jobs(self) -> Vec<RawJob> {
        match self {
            JobsResponse::Bare(jobs) => jobs,
            JobsResponse::Wrapped { jobs, results } => jobs.or(results).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawJob {
    id: Option<NativeId>,
    uid: Option<NativeId>,
    title: Option<String>,
    client: Option<RawClient>,
    company_name: Option<String>,
    location: Option<String>,
    description: Option<String>,
    snippet: Option<String>,
    url: Option<String>,
    link: Option<String>,
    date_created: Option<String>,
    posted_time: Option<String>,
    date_posted: Option<String>,
    budget: Option<Budget>,
    rate: Option<Rate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawClient {
    name: Option<String>,
    location: Option<ClientLocation>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ClientLocation {
    country: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Budget {
    amount: Option<Amount>,
    currency: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Rate {
    amount: Option<Amount>,
    period: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Amount {
    Number(serde_json::Number),
    Text(String),
}

impl Amount {
    /// Zero and blank amounts mean "not listed".
    fn listed(self) -> Option<String> {
        match self {
            Amount::Number(n) if n.as_f64() == Some(0.0) => None,
            Amount::Number(n) => Some(n.to_string()),
            Amount::Text(s) => present(Some(s)),
        }
    }
}

fn salary(budget: Option<Budget>, rate: Option<Rate>) -> Option<String> {
    if let Some(budget) = budget
        && let Some(amount) = budget.amount.and_then(Amount::listed)
    {
        let currency = budget.currency.unwrap_or_default();
        return Some(format!("{amount} {currency}").trim_end().to_string());
    }

    let rate = rate?;
    let amount = rate.amount.and_then(Amount::listed)?;
    let period = present(rate.period).unwrap_or_else(|| "hr".to_string());
    Some(format!("{amount}/{period}"))
}

fn into_listing(job: RawJob) -> JobListing {
    let description = present(job.description)
        .or_else(|| present(job.snippet.clone()))
        .unwrap_or_else(|| NO_DESCRIPTION.to_string());
    let snippet = present(job.snippet).or_else(|| synthesize_snippet(&description, NO_DESCRIPTION));

    let (client_name, client_country) = match job.client {
        Some(client) => (client.name, client.location.and_then(|l| l.country)),
        None => (None, None),
    };

    let native_id = job.id.or(job.uid).map(NativeId::into_string);

    JobListing {
        id: SourceApi::UpworkJobsP.listing_id(native_id),
        source_api: SourceApi::UpworkJobsP,
        title: present(job.title).unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        company: present(client_name)
            .or_else(|| present(job.company_name))
            .unwrap_or_else(|| DEFAULT_COMPANY.to_string()),
        location: present(client_country)
            .or_else(|| present(job.location))
            .unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
        description,
        snippet,
        url: present(job.url).or_else(|| present(job.link)),
        date_posted: present(job.date_created)
            .or_else(|| present(job.posted_time))
            .or_else(|| present(job.date_posted)),
        salary: salary(job.budget, job.rate),
    }
}
