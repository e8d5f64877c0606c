//! Heuristic extraction of structured résumé fields from plain text.
//!
//! Every extractor degrades to `None` or an empty collection when nothing
//! matches; none of them can fail.

use crate::error::Result;
use crate::processing::entities::{Entity, EntityLabel};
use crate::processing::keywords::KeywordAnalyzer;
use crate::processing::resume::{
    CertificationEntry, EducationEntry, ExperienceEntry, KeywordInsight, ProjectEntry, Skill,
    NOT_EXTRACTED,
};
use crate::processing::vocabulary::SkillVocabulary;
use log::debug;
use regex::Regex;

const MAX_NAME_LINE_CHARS: usize = 100;
const EXPERIENCE_MARKERS: [&str; 3] = ["experience", "employment", "worked"];
const EXPERIENCE_WINDOW_CHARS: usize = 1000;
const MAX_COMPANIES: usize = 5;
const MAX_FRAGMENTS: usize = 3;
const MAX_PROJECT_NAME_CHARS: usize = 100;

const EDUCATION_KEYWORDS: [&str; 10] = [
    "degree", "bachelor", "master", "phd", "b.tech", "m.tech", "bsc", "msc", "university", "college",
];
const CERTIFICATION_KEYWORDS: [&str; 9] = [
    "certification", "certified", "aws", "azure", "gcp", "cisco", "comptia", "pmp", "prince2",
];
const PROJECT_KEYWORDS: [&str; 5] = ["project", "built", "developed", "created", "implemented"];

const DEFAULT_FIELD_OF_STUDY: &str = "Computer Science";
const DEFAULT_DESIGNATION: &str = "Professional Role";

/// All fields the heuristics recover from one document
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedFields {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub skills: Vec<Skill>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub certifications: Vec<CertificationEntry>,
    pub projects: Vec<ProjectEntry>,
    pub keyword_insights: Vec<KeywordInsight>,
}

pub struct FieldExtractor {
    vocabulary: SkillVocabulary,
    keywords: KeywordAnalyzer,
    email_regex: Regex,
    phone_regex: Regex,
    education_patterns: Vec<(&'static str, Regex)>,
    project_patterns: Vec<(&'static str, Regex)>,
}

impl FieldExtractor {
    pub fn new() -> Result<Self> {
        let email_regex = Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}")
            .expect("Invalid email regex");

        let phone_regex = Regex::new(
            r"(?:\+?[0-9]{1,3}[-.\s]?)?\(?([0-9]{3})\)?[-.\s]?([0-9]{3})[-.\s]?([0-9]{4})",
        )
        .expect("Invalid phone regex");

        Ok(Self {
            vocabulary: SkillVocabulary::new()?,
            keywords: KeywordAnalyzer::new(),
            email_regex,
            phone_regex,
            education_patterns: Self::sentence_patterns(&EDUCATION_KEYWORDS),
            project_patterns: Self::sentence_patterns(&PROJECT_KEYWORDS),
        })
    }

    /// Matches from the keyword up to and including the next period
    fn sentence_patterns(keywords: &[&'static str]) -> Vec<(&'static str, Regex)> {
        keywords
            .iter()
            .map(|keyword| {
                let pattern = format!(r"{}[^.]*\.", regex::escape(keyword));
                (*keyword, Regex::new(&pattern).expect("Invalid sentence regex"))
            })
            .collect()
    }

    /// Run every extractor. `entities` must come from tagging `text`.
    pub fn extract(&self, text: &str, entities: &[Entity]) -> ExtractedFields {
        let lower = text.to_lowercase();

        ExtractedFields {
            full_name: self.extract_name(text, entities),
            email: self.extract_email(text),
            phone: self.extract_phone(text),
            skills: self.extract_skills(&lower),
            experience: self.extract_experience(&lower, entities),
            education: self.extract_education(&lower),
            certifications: self.extract_certifications(&lower),
            projects: self.extract_projects(&lower),
            keyword_insights: self.extract_keyword_insights(text),
        }
    }

    /// First PERSON entity, else a plausible first line, title-cased
    pub fn extract_name(&self, text: &str, entities: &[Entity]) -> Option<String> {
        if let Some(person) = entities.iter().find(|e| e.label == EntityLabel::Person) {
            return Some(title_case(&person.text));
        }

        let first_line = text.split('\n').next().unwrap_or_default().trim();
        let plausible = first_line.chars().count() < MAX_NAME_LINE_CHARS
            && first_line.chars().any(char::is_alphabetic)
            && !first_line.contains('@');

        plausible.then(|| title_case(first_line))
    }

    pub fn extract_email(&self, text: &str) -> Option<String> {
        self.email_regex.find(text).map(|m| m.as_str().to_string())
    }

    /// Formatted as `+{area}-{exchange}-{line}`
    pub fn extract_phone(&self, text: &str) -> Option<String> {
        self.phone_regex
            .captures(text)
            .map(|caps| format!("+{}-{}-{}", &caps[1], &caps[2], &caps[3]))
    }

    pub fn extract_skills(&self, lower: &str) -> Vec<Skill> {
        self.vocabulary.find_skills(lower)
    }

    /// Organizations from the whole document, gated on an experience section
    pub fn extract_experience(&self, lower: &str, entities: &[Entity]) -> Vec<ExperienceEntry> {
        let Some(window) = experience_window(lower) else {
            return Vec::new();
        };
        debug!("Experience section window: {} characters", window.chars().count());

        let mut companies: Vec<&str> = Vec::new();
        for entity in entities.iter().filter(|e| e.label == EntityLabel::Organization) {
            if companies.len() == MAX_COMPANIES {
                break;
            }
            if !companies.contains(&entity.text.as_str()) {
                companies.push(&entity.text);
            }
        }

        companies
            .into_iter()
            .map(|company| ExperienceEntry {
                company: company.to_string(),
                designation: DEFAULT_DESIGNATION.to_string(),
                duration: NOT_EXTRACTED.to_string(),
            })
            .collect()
    }

    /// Entries for the first education keyword present; later keywords are ignored
    pub fn extract_education(&self, lower: &str) -> Vec<EducationEntry> {
        let Some((keyword, fragments)) = first_keyword_fragments(&self.education_patterns, lower) else {
            return Vec::new();
        };

        fragments
            .iter()
            .map(|_| EducationEntry {
                degree: keyword.to_uppercase(),
                field: DEFAULT_FIELD_OF_STUDY.to_string(),
                institution: NOT_EXTRACTED.to_string(),
                year: NOT_EXTRACTED.to_string(),
            })
            .collect()
    }

    pub fn extract_certifications(&self, lower: &str) -> Vec<CertificationEntry> {
        CERTIFICATION_KEYWORDS
            .iter()
            .filter(|keyword| lower.contains(*keyword))
            .map(|keyword| CertificationEntry {
                name: keyword.to_uppercase(),
                issuer: NOT_EXTRACTED.to_string(),
                year: NOT_EXTRACTED.to_string(),
            })
            .collect()
    }

    pub fn extract_projects(&self, lower: &str) -> Vec<ProjectEntry> {
        let Some((_, fragments)) = first_keyword_fragments(&self.project_patterns, lower) else {
            return Vec::new();
        };

        fragments
            .into_iter()
            .map(|fragment| ProjectEntry {
                name: fragment.chars().take(MAX_PROJECT_NAME_CHARS).collect(),
                description: fragment.to_string(),
                technologies: Vec::new(),
            })
            .collect()
    }

    pub fn extract_keyword_insights(&self, text: &str) -> Vec<KeywordInsight> {
        self.keywords.insights(text)
    }
}

/// Up to 1000 characters after the earliest experience marker
fn experience_window(lower: &str) -> Option<&str> {
    let (start, marker) = EXPERIENCE_MARKERS
        .iter()
        .filter_map(|marker| lower.find(marker).map(|index| (index, *marker)))
        .min_by_key(|(index, _)| *index)?;

    let rest = &lower[start + marker.len()..];
    let end = rest
        .char_indices()
        .nth(EXPERIENCE_WINDOW_CHARS)
        .map(|(index, _)| index)
        .unwrap_or(rest.len());
    Some(&rest[..end])
}

/// Sentence fragments for the first keyword that occurs in the text.
///
/// The keyword counts as matched even when it yields no fragment, which
/// still stops the search.
fn first_keyword_fragments<'t>(
    patterns: &[(&'static str, Regex)],
    lower: &'t str,
) -> Option<(&'static str, Vec<&'t str>)> {
    let (keyword, pattern) = patterns.iter().find(|(keyword, _)| lower.contains(keyword))?;
    let fragments = pattern
        .find_iter(lower)
        .take(MAX_FRAGMENTS)
        .map(|m| m.as_str().trim())
        .collect();
    Some((*keyword, fragments))
}

/// Uppercase the first letter of every alphabetic run, lowercase the rest
pub fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut previous_is_letter = false;

    for c in text.chars() {
        if c.is_alphabetic() {
            if previous_is_letter {
                result.extend(c.to_lowercase());
            } else {
                result.extend(c.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            result.push(c);
            previous_is_letter = false;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::entities::{EntityTagger, HeuristicTagger};
    use crate::processing::resume::Proficiency;

    fn extractor() -> FieldExtractor {
        FieldExtractor::new().unwrap()
    }

    fn org(text: &str, start: usize) -> Entity {
        Entity {
            text: text.to_string(),
            label: EntityLabel::Organization,
            start,
            end: start + text.len(),
        }
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("jane SMITH"), "Jane Smith");
        assert_eq!(title_case("mary-kate o'neil"), "Mary-Kate O'Neil");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_name_prefers_person_entity() {
        let text = "CURRICULUM VITAE\nJane Smith\n";
        let entities = HeuristicTagger::new().tag(text);
        assert_eq!(extractor().extract_name(text, &entities).as_deref(), Some("Jane Smith"));
    }

    #[test]
    fn test_name_falls_back_to_first_line() {
        let text = "alex kumar - backend\nsome other text";
        assert_eq!(
            extractor().extract_name(text, &[]).as_deref(),
            Some("Alex Kumar - Backend")
        );
    }

    #[test]
    fn test_name_rejects_long_or_contact_first_line() {
        let long_line = "a".repeat(150);
        assert_eq!(extractor().extract_name(&long_line, &[]), None);
        assert_eq!(extractor().extract_name("john.doe@example.com", &[]), None);
        assert_eq!(extractor().extract_name("", &[]), None);
        assert_eq!(extractor().extract_name("+1 555 123 4567", &[]), None);
    }

    #[test]
    fn test_email_extraction() {
        let extractor = extractor();
        assert_eq!(
            extractor.extract_email("Contact: john.doe@example.com, alt a@b.io").as_deref(),
            Some("john.doe@example.com")
        );
        assert_eq!(extractor.extract_email("no address here"), None);
    }

    #[test]
    fn test_phone_formats() {
        let extractor = extractor();
        assert_eq!(extractor.extract_phone("call (555) 123-4567").as_deref(), Some("+555-123-4567"));
        assert_eq!(extractor.extract_phone("tel +1 555.123.4567").as_deref(), Some("+555-123-4567"));
        assert_eq!(extractor.extract_phone("5551234567").as_deref(), Some("+555-123-4567"));
        assert_eq!(extractor.extract_phone("2019 - 2021"), None);
    }

    #[test]
    fn test_skill_proficiency_scenario() {
        let text = "python python python python python python django django";
        let skills = extractor().extract_skills(text);

        let python = skills.iter().find(|s| s.name == "PYTHON").unwrap();
        let django = skills.iter().find(|s| s.name == "DJANGO").unwrap();
        assert_eq!(python.proficiency, Proficiency::Advanced);
        assert_eq!(django.proficiency, Proficiency::Beginner);
    }

    #[test]
    fn test_experience_requires_marker_and_organizations() {
        let extractor = extractor();
        let entities = vec![org("Acme Corp", 0), org("Globex", 20), org("Acme Corp", 40)];

        let experience = extractor.extract_experience("worked at acme corp and globex", &entities);
        assert_eq!(experience.len(), 2);
        assert_eq!(experience[0].company, "Acme Corp");
        assert_eq!(experience[0].designation, "Professional Role");
        assert_eq!(experience[0].duration, "Not extracted");

        assert!(extractor.extract_experience("acme corp and globex", &entities).is_empty());
        assert!(extractor.extract_experience("professional experience", &[]).is_empty());
    }

    #[test]
    fn test_experience_caps_companies() {
        let entities: Vec<Entity> = (0..8).map(|i| org(&format!("Company{}", i), i * 10)).collect();
        let experience = extractor().extract_experience("employment history", &entities);
        assert_eq!(experience.len(), 5);
    }

    #[test]
    fn test_experience_window_is_bounded() {
        let text = format!("experience{}", "x".repeat(2000));
        assert_eq!(experience_window(&text).unwrap().len(), 1000);
        assert_eq!(experience_window("none here"), None);
    }

    #[test]
    fn test_education_stops_at_first_matching_keyword() {
        let text = "bachelor of engineering. bachelor of arts. university of pune. \
                    bachelor of science. bachelor of law.";
        let education = extractor().extract_education(text);

        assert_eq!(education.len(), 3);
        assert!(education.iter().all(|e| e.degree == "BACHELOR"));
        assert_eq!(education[0].field, "Computer Science");
        assert_eq!(education[0].institution, "Not extracted");
    }

    #[test]
    fn test_education_keyword_without_sentence_yields_nothing() {
        assert!(extractor().extract_education("master of science").is_empty());
        assert!(extractor().extract_education("no schooling listed.").is_empty());
    }

    #[test]
    fn test_certifications_collect_every_keyword() {
        let certifications = extractor().extract_certifications("aws certified, pmp and azure");
        let names: Vec<&str> = certifications.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["CERTIFIED", "AWS", "AZURE", "PMP"]);
        assert!(extractor().extract_certifications("nothing relevant").is_empty());
    }

    #[test]
    fn test_projects_from_sentences() {
        let long_sentence = format!("built {}.", "y".repeat(150));
        let text = format!("developed a parser. {} built a cli.", long_sentence);
        let projects = extractor().extract_projects(&text);

        // "built" comes before "developed" in keyword order
        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].description, long_sentence);
        assert_eq!(projects[0].name.chars().count(), 100);
        assert_eq!(projects[1].name, "built a cli.");
        assert!(projects[1].technologies.is_empty());
    }

    #[test]
    fn test_email_only_text() {
        let text = "john.doe@example.com";
        let fields = extractor().extract(text, &HeuristicTagger::new().tag(text));

        assert_eq!(fields.email.as_deref(), Some("john.doe@example.com"));
        assert_eq!(fields.full_name, None);
        assert_eq!(fields.phone, None);
        assert!(fields.skills.is_empty());
        assert!(fields.experience.is_empty());
        assert!(fields.education.is_empty());
        assert!(fields.certifications.is_empty());
        assert!(fields.projects.is_empty());
    }
}
