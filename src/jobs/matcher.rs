//! Skill-overlap scoring of job postings

use crate::jobs::models::{JobPosting, ScoredJob};
use crate::processing::Skill;

const MAX_MATCH_SCORE: u32 = 100;
const TEXT_MATCH_POINTS: u32 = 10;
const TITLE_MATCH_POINTS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobMatch {
    pub score: u8,
    /// Lowercased names of the skills found in the posting
    pub matching_skills: Vec<String>,
}

/// Case-insensitive substring matching of skill names against posting text
#[derive(Debug, Clone, Copy, Default)]
pub struct JobMatcher;

impl JobMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Score one posting.
    ///
    /// A skill earns 10 points if it appears anywhere in the description,
    /// title or company name, and 5 more if it appears in the title.
    /// The total is capped at 100.
    pub fn score(&self, job: &JobPosting, skills: &[Skill]) -> JobMatch {
        let haystack = format!("{} {} {}", job.description, job.title, job.company).to_lowercase();
        let title = job.title.to_lowercase();

        let mut score = 0u32;
        let mut matching_skills = Vec::new();

        for skill in skills {
            let name = skill.name.trim().to_lowercase();
            if name.is_empty() {
                continue;
            }

            if haystack.contains(&name) {
                score += TEXT_MATCH_POINTS;
                matching_skills.push(name.clone());
            }
            if title.contains(&name) {
                score += TITLE_MATCH_POINTS;
            }
        }

        JobMatch {
            score: score.min(MAX_MATCH_SCORE) as u8,
            matching_skills,
        }
    }

    /// Score every posting, preserving input order
    pub fn score_all(&self, jobs: Vec<JobPosting>, skills: &[Skill]) -> Vec<ScoredJob> {
        jobs.into_iter()
            .map(|job| {
                let result = self.score(&job, skills);
                ScoredJob {
                    job,
                    match_score: result.score,
                    matching_skills: result.matching_skills,
                }
            })
            .collect()
    }
}
