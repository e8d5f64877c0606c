//! Job recommendations and keyword search over a [`JobSource`]

use crate::config::RecommendationConfig;
use crate::error::{Result, ScreenerError};
use crate::jobs::matcher::JobMatcher;
use crate::jobs::models::{JobPosting, ScoredJob};
use crate::jobs::sample::sample_jobs;
use crate::jobs::source::JobSource;
use crate::processing::Skill;
use log::{error, info, warn};

const MAX_QUERY_SKILLS: usize = 5;
const DEFAULT_QUERY: &str = "developer";

/// How many sample postings to serve when the source refuses service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackLimits {
    /// HTTP 403
    pub forbidden: usize,
    /// HTTP 429
    pub rate_limited: usize,
}

impl Default for FallbackLimits {
    fn default() -> Self {
        Self {
            forbidden: 10,
            rate_limited: 5,
        }
    }
}

impl FallbackLimits {
    fn for_status(&self, status: u16) -> usize {
        if status == 429 {
            self.rate_limited
        } else {
            self.forbidden
        }
    }
}

/// Search query from the first five skills, e.g. `python OR django`
pub fn build_query(skills: &[Skill]) -> String {
    let names: Vec<String> = skills
        .iter()
        .map(|skill| skill.name.trim().to_lowercase())
        .filter(|name| !name.is_empty())
        .take(MAX_QUERY_SKILLS)
        .collect();

    if names.is_empty() {
        DEFAULT_QUERY.to_string()
    } else {
        names.join(" OR ")
    }
}

pub struct JobRecommendationEngine<S> {
    source: S,
    matcher: JobMatcher,
    fallback: FallbackLimits,
    keyword_search_pages: u32,
}

impl<S: JobSource> JobRecommendationEngine<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            matcher: JobMatcher::new(),
            fallback: FallbackLimits::default(),
            keyword_search_pages: 2,
        }
    }

    pub fn from_config(source: S, config: &RecommendationConfig) -> Self {
        Self {
            fallback: FallbackLimits {
                forbidden: config.forbidden_fallback_limit,
                rate_limited: config.rate_limited_fallback_limit,
            },
            keyword_search_pages: config.keyword_search_pages,
            ..Self::new(source)
        }
    }

    pub fn with_fallback_limits(mut self, fallback: FallbackLimits) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch pages `1..=pages` in order and concatenate them.
    ///
    /// A 403 or 429 on any page abandons the remaining pages and returns
    /// sample postings instead of what was collected so far. Other source
    /// errors propagate.
    pub async fn fetch_postings(&self, query: &str, pages: u32, location: Option<&str>) -> Result<Vec<JobPosting>> {
        let mut postings = Vec::new();

        for page in 1..=pages {
            match self.source.fetch_page(query, page, location).await {
                Ok(jobs) => postings.extend(jobs),
                Err(ScreenerError::SourceUnavailable { status, message }) => {
                    warn!(
                        "Job source unavailable ({}): {}. Using sample job data",
                        status, message
                    );
                    return Ok(sample_jobs(self.fallback.for_status(status)));
                }
                Err(e) => {
                    error!("Job search failed on page {}: {}", page, e);
                    return Err(e);
                }
            }
        }

        info!("Fetched {} postings for '{}'", postings.len(), query);
        Ok(postings)
    }

    /// Postings matching the candidate's skills, best match first.
    ///
    /// Postings with no overlap are dropped. Equal scores keep source order.
    pub async fn recommend(&self, skills: &[Skill], location: Option<&str>, pages: u32) -> Result<Vec<ScoredJob>> {
        let query = build_query(skills);
        let postings = self.fetch_postings(&query, pages, location).await?;

        let mut scored: Vec<ScoredJob> = self
            .matcher
            .score_all(postings, skills)
            .into_iter()
            .filter(|job| job.match_score > 0)
            .collect();
        scored.sort_by(|a, b| b.match_score.cmp(&a.match_score));

        info!("{} of the fetched postings match the candidate's skills", scored.len());
        Ok(scored)
    }

    /// Free-text search. Results keep source order and are scored against
    /// `skills` when given; nothing is filtered out.
    pub async fn search_by_keyword(
        &self,
        keyword: &str,
        skills: &[Skill],
        location: Option<&str>,
    ) -> Result<Vec<ScoredJob>> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(ScreenerError::InvalidInput(
                "Search keyword must not be empty".to_string(),
            ));
        }

        let postings = self
            .fetch_postings(keyword, self.keyword_search_pages, location)
            .await?;
        Ok(self.matcher.score_all(postings, skills))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::{Proficiency, SkillCategory};
    use std::sync::Mutex;

    /// Replays one canned response per page and records the requests
    struct ScriptedSource {
        pages: Mutex<Vec<Result<Vec<JobPosting>>>>,
        requests: Mutex<Vec<(String, u32)>>,
    }

    impl ScriptedSource {
        fn new(pages: Vec<Result<Vec<JobPosting>>>) -> Self {
            Self {
                pages: Mutex::new(pages.into_iter().rev().collect()),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<(String, u32)> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl JobSource for ScriptedSource {
        async fn fetch_page(&self, query: &str, page: u32, _location: Option<&str>) -> Result<Vec<JobPosting>> {
            self.requests.lock().unwrap().push((query.to_string(), page));
            self.pages.lock().unwrap().pop().unwrap_or_else(|| Ok(Vec::new()))
        }
    }

    fn skill(name: &str) -> Skill {
        Skill::new(name, SkillCategory::Programming, Proficiency::Beginner)
    }

    fn posting(id: &str, title: &str, description: &str) -> JobPosting {
        JobPosting {
            id: id.to_string(),
            title: title.to_string(),
            company: "Acme".to_string(),
            location: "Remote".to_string(),
            salary: "Salary not disclosed".to_string(),
            job_type: "FULLTIME".to_string(),
            description: description.to_string(),
            apply_link: String::new(),
            posted_date: String::new(),
        }
    }

    fn unavailable(status: u16) -> Result<Vec<JobPosting>> {
        Err(ScreenerError::SourceUnavailable {
            status,
            message: "blocked".to_string(),
        })
    }

    #[test]
    fn test_build_query() {
        let skills: Vec<Skill> = ["PYTHON", "DJANGO", "SQL", "DOCKER", "AWS", "REACT"]
            .iter()
            .map(|n| skill(n))
            .collect();
        assert_eq!(build_query(&skills), "python OR django OR sql OR docker OR aws");
        assert_eq!(build_query(&[]), "developer");
    }

    #[tokio::test]
    async fn test_recommend_ranks_and_drops_non_matches() {
        let source = ScriptedSource::new(vec![
            Ok(vec![
                posting("a", "Chef", "Cooking"),
                posting("b", "Engineer", "python services"),
            ]),
            Ok(vec![posting("c", "Python Developer", "python and django")]),
        ]);
        let engine = JobRecommendationEngine::new(source);
        let skills = [skill("PYTHON"), skill("DJANGO")];

        let jobs = engine.recommend(&skills, None, 2).await.unwrap();
        let ids: Vec<&str> = jobs.iter().map(|j| j.job.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b"]);
        assert_eq!(jobs[0].match_score, 25);
        assert_eq!(jobs[1].match_score, 10);

        let requests = engine.source().requests();
        assert_eq!(requests, vec![("python OR django".to_string(), 1), ("python OR django".to_string(), 2)]);
    }

    #[tokio::test]
    async fn test_equal_scores_keep_source_order() {
        let source = ScriptedSource::new(vec![Ok(vec![
            posting("first", "Engineer", "rust"),
            posting("second", "Engineer", "rust"),
        ])]);
        let engine = JobRecommendationEngine::new(source);

        let jobs = engine.recommend(&[skill("RUST")], None, 1).await.unwrap();
        assert_eq!(jobs[0].job.id, "first");
        assert_eq!(jobs[1].job.id, "second");
    }

    #[tokio::test]
    async fn test_forbidden_falls_back_to_samples() {
        let source = ScriptedSource::new(vec![unavailable(403)]);
        let engine = JobRecommendationEngine::new(source);
        let skills = [skill("PYTHON"), skill("REACT"), skill("DOCKER")];

        let jobs = engine.recommend(&skills, None, 2).await.unwrap();
        assert_eq!(jobs.len(), 5);
        assert!(jobs.iter().all(|j| j.job.id.starts_with("mock_")));
        // Fallback stops further paging
        assert_eq!(engine.source().requests().len(), 1);
    }

    #[tokio::test]
    async fn test_rate_limit_discards_collected_pages() {
        let source = ScriptedSource::new(vec![
            Ok(vec![posting("live", "Engineer", "python")]),
            unavailable(429),
        ]);
        let engine = JobRecommendationEngine::new(source).with_fallback_limits(FallbackLimits {
            forbidden: 10,
            rate_limited: 2,
        });

        let postings = engine.fetch_postings("python", 3, None).await.unwrap();
        let ids: Vec<&str> = postings.iter().map(|j| j.id.as_str()).collect();
        assert_eq!(ids, vec!["mock_001", "mock_002"]);
    }

    #[tokio::test]
    async fn test_other_errors_propagate() {
        let source = ScriptedSource::new(vec![Err(ScreenerError::Source {
            status: 500,
            message: "boom".to_string(),
        })]);
        let engine = JobRecommendationEngine::new(source);

        let result = engine.recommend(&[skill("PYTHON")], None, 2).await;
        assert!(matches!(result, Err(ScreenerError::Source { status: 500, .. })));
    }

    #[tokio::test]
    async fn test_keyword_search_keeps_everything() {
        let source = ScriptedSource::new(vec![Ok(vec![
            posting("a", "Chef", "Cooking"),
            posting("b", "Rust Engineer", "rust"),
        ])]);
        let engine = JobRecommendationEngine::new(source);

        let jobs = engine.search_by_keyword("engineer", &[skill("RUST")], None).await.unwrap();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].job.id, "a");
        assert_eq!(jobs[0].match_score, 0);
        assert_eq!(jobs[1].match_score, 15);

        let requests = engine.source().requests();
        assert_eq!(requests.len(), 2);
        assert!(requests.iter().all(|(query, _)| query == "engineer"));
    }

    #[tokio::test]
    async fn test_keyword_search_rejects_blank_keyword() {
        let engine = JobRecommendationEngine::new(ScriptedSource::new(Vec::new()));
        let result = engine.search_by_keyword("   ", &[], None).await;
        assert!(matches!(result, Err(ScreenerError::InvalidInput(_))));
        assert!(engine.source().requests().is_empty());
    }
}
