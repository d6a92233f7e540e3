use std::sync::Arc;

use futures::future::join_all;

use crate::dedupe::dedupe;
use crate::fetchers::JobFetcher;
use crate::models::listing::{JobListing, SearchParams};

/// Fans a search out to every registered fetcher.
pub struct Aggregator {
    fetchers: Vec<Arc<dyn JobFetcher>>,
}

impl Aggregator {
    pub fn new(fetchers: Vec<Arc<dyn JobFetcher>>) -> Self {
        Self { fetchers }
    }

    /// Run every fetcher concurrently and wait for all of them.
    /// Failed fetchers are logged and contribute nothing; successful
    /// results are concatenated in registration order.
    pub async fn collect(&self, params: &SearchParams) -> Vec<JobListing> {
        let outcomes = join_all(self.fetchers.iter().map(|f| f.fetch(params))).await;

        let mut all = Vec::new();
        for (fetcher, outcome) in self.fetchers.iter().zip(outcomes) {
            match outcome {
                Ok(listings) => {
                    tracing::debug!(
                        source = %fetcher.source(),
                        count = listings.len(),
                        "Fetcher completed"
                    );
                    all.extend(listings);
                }
                Err(e) => {
                    tracing::error!(source = %fetcher.source(), error = %e, "Fetcher failed");
                }
            }
        }
        all
    }

    /// Collect from every provider, then drop cross-provider duplicates.
    pub async fn search(&self, params: &SearchParams) -> Vec<JobListing> {
        if self.fetchers.is_empty() {
            tracing::warn!("No job search APIs are configured. Returning empty results.");
            return Vec::new();
        }

        let fetched = self.collect(params).await;
        let fetched_count = fetched.len();
        let unique = dedupe(fetched);
        tracing::info!(
            keywords = %params.keywords,
            location = %params.location,
            page = params.page,
            fetched = fetched_count,
            unique = unique.len(),
            "Job search completed"
        );
        unique
    }
}
