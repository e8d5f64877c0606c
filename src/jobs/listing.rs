//! Filtering and pagination of scored postings

use crate::jobs::models::ScoredJob;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFilter {
    pub min_score: u8,
    /// Employment type such as `FULLTIME`, compared case-insensitively
    pub job_type: Option<String>,
}

impl JobFilter {
    pub fn matches(&self, job: &ScoredJob) -> bool {
        if job.match_score < self.min_score {
            return false;
        }
        match self.job_type.as_deref().map(str::trim) {
            Some(wanted) if !wanted.is_empty() => job.job.job_type.to_uppercase() == wanted.to_uppercase(),
            _ => true,
        }
    }

    pub fn apply(&self, jobs: Vec<ScoredJob>) -> Vec<ScoredJob> {
        jobs.into_iter().filter(|job| self.matches(job)).collect()
    }
}

/// One page of results. Page numbers are 1-based.
#[derive(Debug, Clone, Serialize)]
pub struct Page<'a> {
    pub number: usize,
    pub num_pages: usize,
    pub total: usize,
    pub items: &'a [ScoredJob],
}

impl Page<'_> {
    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }
}

/// Slice out page `page` of `page_size` items.
///
/// Out-of-range requests are clamped: page 0 becomes the first page and
/// anything past the end becomes the last. An empty list has a single
/// empty page.
pub fn paginate(jobs: &[ScoredJob], page: usize, page_size: usize) -> Page<'_> {
    let page_size = page_size.max(1);
    let num_pages = jobs.len().div_ceil(page_size).max(1);
    let number = page.clamp(1, num_pages);

    let start = (number - 1) * page_size;
    let end = (start + page_size).min(jobs.len());

    Page {
        number,
        num_pages,
        total: jobs.len(),
        items: &jobs[start..end],
    }
}
