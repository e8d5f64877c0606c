//! Job posting retrieval, matching and ranking

pub mod models;
pub mod matcher;
pub mod source;
pub mod sample;
pub mod client;
pub mod cache;
pub mod recommender;
pub mod listing;

pub use cache::CachedJobSource;
pub use client::JSearchClient;
pub use listing::{paginate, JobFilter, Page};
pub use matcher::{JobMatch, JobMatcher};
pub use models::{JobPosting, ScoredJob};
pub use recommender::{build_query, FallbackLimits, JobRecommendationEngine};
pub use source::JobSource;
