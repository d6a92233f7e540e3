//! Collapse near-duplicate listings returned by different providers.
//!
//! Two listings are the same job when their normalized title, company and
//! leading location segment match. The match is approximate: slight
//! wording differences between providers are not merged, and distinct jobs
//! that normalize identically are.

use std::collections::HashSet;

use crate::models::listing::JobListing;

const KEY_SEPARATOR: char = '\u{1f}';

/// Lowercase, trim and collapse runs of whitespace to one space.
fn normalize(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text before the first comma, restricted to ASCII letters, digits and spaces.
fn normalize_location(location: &str) -> String {
    let lowered = location.to_lowercase();
    let head = lowered.split(',').next().unwrap_or_default();
    let kept: String = head
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace())
        .collect();
    normalize(&kept)
}

pub fn dedup_key(listing: &JobListing) -> String {
    format!(
        "{}{KEY_SEPARATOR}{}{KEY_SEPARATOR}{}",
        normalize(&listing.title),
        normalize(&listing.company),
        normalize_location(&listing.location)
    )
}

/// Keep the first listing for each key, preserving input order.
pub fn dedupe(listings: Vec<JobListing>) -> Vec<JobListing> {
    let mut seen = HashSet::with_capacity(listings.len());
    listings
        .into_iter()
        .filter(|listing| seen.insert(dedup_key(listing)))
        .collect()
}
