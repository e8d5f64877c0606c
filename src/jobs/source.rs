//! Boundary to the external job search service

use crate::error::Result;
use crate::jobs::models::JobPosting;
use std::future::Future;

/// Fetches one page of postings for a query.
///
/// Implementations report HTTP 403 and 429 as
/// [`ScreenerError::SourceUnavailable`](crate::error::ScreenerError::SourceUnavailable)
/// so callers can fall back to sample data. Any other failure is fatal.
pub trait JobSource: Send + Sync {
    fn fetch_page(
        &self,
        query: &str,
        page: u32,
        location: Option<&str>,
    ) -> impl Future<Output = Result<Vec<JobPosting>>> + Send;
}
