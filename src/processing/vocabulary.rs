//! Fixed skill vocabulary and occurrence counting

use crate::error::{Result, ScreenerError};
use crate::processing::resume::{Proficiency, Skill, SkillCategory};
use aho_corasick::AhoCorasick;

/// Known skill terms grouped by category. Categories are disjoint.
pub const SKILL_VOCABULARY: &[(SkillCategory, &[&str])] = &[
    (
        SkillCategory::Programming,
        &["python", "java", "javascript", "typescript", "c++", "c#", "php", "ruby", "go", "rust", "kotlin"],
    ),
    (
        SkillCategory::Web,
        &["react", "angular", "vue", "html", "css", "express", "django", "flask", "spring", "asp.net"],
    ),
    (
        SkillCategory::Database,
        &["sql", "mysql", "postgresql", "mongodb", "redis", "elasticsearch", "cassandra", "oracle"],
    ),
    (
        SkillCategory::Cloud,
        &["aws", "azure", "gcp", "docker", "kubernetes", "terraform"],
    ),
    (
        SkillCategory::Data,
        &["pandas", "numpy", "tensorflow", "pytorch", "scikit-learn", "matplotlib", "tableau"],
    ),
    (
        SkillCategory::Devops,
        &["jenkins", "gitlab", "github", "ci/cd", "devops", "linux"],
    ),
    (
        SkillCategory::Soft,
        &["communication", "leadership", "teamwork", "problem-solving", "critical thinking"],
    ),
];

/// Substring matcher over the whole vocabulary.
///
/// A term is found when it occurs anywhere in the lowercased text, including
/// inside longer words ("sql" inside "postgresql").
pub struct SkillVocabulary {
    matcher: AhoCorasick,
    terms: Vec<(SkillCategory, &'static str)>,
}

impl SkillVocabulary {
    pub fn new() -> Result<Self> {
        let terms: Vec<(SkillCategory, &'static str)> = SKILL_VOCABULARY
            .iter()
            .flat_map(|(category, terms)| terms.iter().map(move |term| (*category, *term)))
            .collect();

        // Standard match semantics so overlapping terms are all reported
        let matcher = AhoCorasick::new(terms.iter().map(|(_, term)| *term))
            .map_err(|e| ScreenerError::Processing(format!("Failed to build skill matcher: {}", e)))?;

        Ok(Self { matcher, terms })
    }

    /// Occurrence count of every vocabulary term, indexed like the vocabulary
    pub fn count_occurrences(&self, lower_text: &str) -> Vec<usize> {
        let mut counts = vec![0; self.terms.len()];
        for mat in self.matcher.find_overlapping_iter(lower_text) {
            counts[mat.pattern().as_usize()] += 1;
        }
        counts
    }

    /// Skills present in the text, in vocabulary order, unique by uppercased name
    pub fn find_skills(&self, lower_text: &str) -> Vec<Skill> {
        let counts = self.count_occurrences(lower_text);
        let mut skills: Vec<Skill> = Vec::new();

        for ((category, term), count) in self.terms.iter().zip(counts) {
            if count == 0 {
                continue;
            }

            let skill = Skill::new(term.to_uppercase(), *category, Proficiency::from_occurrences(count));
            // Last write wins on a name collision
            match skills.iter_mut().find(|existing| existing.name == skill.name) {
                Some(existing) => *existing = skill,
                None => skills.push(skill),
            }
        }

        skills
    }

    pub fn term_count(&self) -> usize {
        self.terms.len()
    }
}
