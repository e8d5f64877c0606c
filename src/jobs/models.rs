//! Job posting records

use serde::{Deserialize, Serialize};

/// A posting as delivered by the job source. Treated as opaque data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    #[serde(rename = "job_id")]
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub salary: String,
    pub job_type: String,
    pub description: String,
    pub apply_link: String,
    pub posted_date: String,
}

/// A posting with its relevance to a candidate's skills
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredJob {
    #[serde(flatten)]
    pub job: JobPosting,
    pub match_score: u8,
    pub matching_skills: Vec<String>,
}
