//! Named-entity tagging boundary and a rule-based default tagger

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityLabel {
    Person,
    Organization,
}

/// A tagged span. `start`/`end` are byte offsets into the tagged text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    pub label: EntityLabel,
    pub start: usize,
    pub end: usize,
}

/// Tags person and organization spans in free text.
///
/// Any pretrained model binding can sit behind this trait. Implementations
/// return entities ordered by `start`.
pub trait EntityTagger: Send + Sync {
    fn tag(&self, text: &str) -> Vec<Entity>;
}

/// Capitalization and suffix heuristics, good enough for résumé headers and
/// employer lines without shipping a model.
pub struct HeuristicTagger {
    person_line: Regex,
    organization_suffix: Regex,
    organization_after_at: Regex,
    non_name_words: HashSet<&'static str>,
}

impl Default for HeuristicTagger {
    fn default() -> Self {
        Self::new()
    }
}

impl HeuristicTagger {
    pub fn new() -> Self {
        // A whole line of two to four capitalized words
        let person_line = Regex::new(
            r"(?m)^[ \t]*([A-Z][A-Za-z'\-]+(?:[ \t]+[A-Z][A-Za-z'\-]*\.?){1,3})[ \t]*\r?$",
        )
        .expect("Invalid person regex");

        let organization_suffix = Regex::new(
            r"\b(?:[A-Z][A-Za-z0-9&\-]*[ \t]+){1,3}(?:Inc|LLC|Ltd|Limited|Corp|Corporation|Technologies|Solutions|Systems|Labs|Group|Software|Consulting|Bank|Pvt)\b\.?",
        )
        .expect("Invalid organization regex");

        let organization_after_at = Regex::new(
            r"\bat[ \t]+([A-Z][A-Za-z0-9&\-]+(?:[ \t]+[A-Z][A-Za-z0-9&\-]+){0,2})",
        )
        .expect("Invalid employer regex");

        let non_name_words = [
            "resume", "curriculum", "vitae", "cv", "profile", "summary", "objective",
            "experience", "work", "employment", "professional", "education", "skills",
            "technical", "projects", "certifications", "contact", "references", "languages",
            "interests", "achievements", "awards", "engineer", "developer", "manager",
            "analyst", "designer", "consultant", "intern", "senior", "junior", "lead",
            "software", "university", "college", "institute", "school", "bachelor", "master",
        ]
        .into_iter()
        .collect();

        Self {
            person_line,
            organization_suffix,
            organization_after_at,
            non_name_words,
        }
    }

    fn is_person_candidate(&self, candidate: &str) -> bool {
        if self.organization_suffix.is_match(candidate) {
            return false;
        }
        !candidate.split_whitespace().any(|word| {
            let word = word.trim_matches(|c: char| !c.is_alphabetic()).to_lowercase();
            self.non_name_words.contains(word.as_str())
        })
    }
}

impl EntityTagger for HeuristicTagger {
    fn tag(&self, text: &str) -> Vec<Entity> {
        let mut entities = Vec::new();

        for caps in self.person_line.captures_iter(text) {
            if let Some(m) = caps.get(1) {
                if self.is_person_candidate(m.as_str()) {
                    entities.push(Entity {
                        text: m.as_str().to_string(),
                        label: EntityLabel::Person,
                        start: m.start(),
                        end: m.end(),
                    });
                }
            }
        }

        for m in self.organization_suffix.find_iter(text) {
            entities.push(Entity {
                text: m.as_str().trim().to_string(),
                label: EntityLabel::Organization,
                start: m.start(),
                end: m.end(),
            });
        }

        for caps in self.organization_after_at.captures_iter(text) {
            if let Some(m) = caps.get(1) {
                entities.push(Entity {
                    text: m.as_str().to_string(),
                    label: EntityLabel::Organization,
                    start: m.start(),
                    end: m.end(),
                });
            }
        }

        entities.sort_by_key(|e| (e.start, std::cmp::Reverse(e.end)));

        // Drop spans nested inside an earlier, longer span
        let mut tagged: Vec<Entity> = Vec::with_capacity(entities.len());
        for entity in entities {
            match tagged.last() {
                Some(previous) if entity.start < previous.end => continue,
                _ => tagged.push(entity),
            }
        }
        tagged
    }
}
