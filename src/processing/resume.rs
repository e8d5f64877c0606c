//! Structured résumé data produced by the parsing pipeline

use crate::input::FileType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel used at the serialization boundary for "not determined"
pub const NOT_FOUND: &str = "Not Found";

/// Placeholder for sub-fields the heuristics do not attempt to extract
pub const NOT_EXTRACTED: &str = "Not extracted";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillCategory {
    Programming,
    Web,
    Database,
    Cloud,
    Data,
    Devops,
    Soft,
}

impl fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SkillCategory::Programming => "programming",
            SkillCategory::Web => "web",
            SkillCategory::Database => "database",
            SkillCategory::Cloud => "cloud",
            SkillCategory::Data => "data",
            SkillCategory::Devops => "devops",
            SkillCategory::Soft => "soft",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Proficiency {
    Beginner,
    Intermediate,
    Advanced,
}

impl Proficiency {
    /// Estimate proficiency from how often a skill term occurs in the text
    pub fn from_occurrences(count: usize) -> Self {
        match count {
            c if c >= 5 => Proficiency::Advanced,
            c if c >= 3 => Proficiency::Intermediate,
            _ => Proficiency::Beginner,
        }
    }
}

impl fmt::Display for Proficiency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub category: SkillCategory,
    pub proficiency: Proficiency,
}

impl Skill {
    pub fn new(name: impl Into<String>, category: SkillCategory, proficiency: Proficiency) -> Self {
        Self {
            name: name.into(),
            category,
            proficiency,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub company: String,
    pub designation: String,
    pub duration: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    pub field: String,
    pub institution: String,
    pub year: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificationEntry {
    pub name: String,
    pub issuer: String,
    pub year: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordInsight {
    pub keyword: String,
    pub frequency: usize,
}

/// Result of one parse invocation. Owned entirely by the caller.
///
/// Undetected name/email/phone are `None` and undetected experience or
/// education are empty vectors. Serialization renders them with the
/// `"Not Found"` sentinels downstream consumers expect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedResume {
    #[serde(with = "sentinel::text")]
    pub full_name: Option<String>,
    #[serde(with = "sentinel::text")]
    pub email: Option<String>,
    #[serde(with = "sentinel::text")]
    pub phone: Option<String>,
    pub skills: Vec<Skill>,
    #[serde(with = "sentinel::entries")]
    pub experience: Vec<ExperienceEntry>,
    #[serde(with = "sentinel::entries")]
    pub education: Vec<EducationEntry>,
    pub certifications: Vec<CertificationEntry>,
    pub projects: Vec<ProjectEntry>,
    pub file_type: FileType,
    pub resume_score: u8,
    pub keyword_insights: Vec<KeywordInsight>,
    #[serde(default)]
    pub raw_text: String,
}

impl ParsedResume {
    /// Lowercase skill names, in extraction order
    pub fn skill_names(&self) -> Vec<String> {
        self.skills.iter().map(|s| s.name.to_lowercase()).collect()
    }
}

/// Entries that have a reserved "nothing detected" form on the wire
pub trait SentinelEntry: Sized {
    fn sentinel() -> Self;
    fn is_sentinel(&self) -> bool;
}

impl SentinelEntry for ExperienceEntry {
    fn sentinel() -> Self {
        Self {
            company: NOT_FOUND.to_string(),
            designation: String::new(),
            duration: String::new(),
        }
    }

    fn is_sentinel(&self) -> bool {
        self.company == NOT_FOUND
    }
}

impl SentinelEntry for EducationEntry {
    fn sentinel() -> Self {
        Self {
            degree: NOT_FOUND.to_string(),
            field: String::new(),
            institution: String::new(),
            year: String::new(),
        }
    }

    fn is_sentinel(&self) -> bool {
        self.degree == NOT_FOUND
    }
}

mod sentinel {
    pub mod text {
        use super::super::NOT_FOUND;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(value.as_deref().unwrap_or(NOT_FOUND))
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
            let value = String::deserialize(deserializer)?;
            Ok(if value == NOT_FOUND { None } else { Some(value) })
        }
    }

    pub mod entries {
        use super::super::SentinelEntry;
        use serde::{Deserialize, Deserializer, Serialize, Serializer};

        #[allow(clippy::ptr_arg)]
        pub fn serialize<S, T>(value: &Vec<T>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
            T: Serialize + SentinelEntry,
        {
            if value.is_empty() {
                [T::sentinel()].serialize(serializer)
            } else {
                value.serialize(serializer)
            }
        }

        pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
        where
            D: Deserializer<'de>,
            T: Deserialize<'de> + SentinelEntry,
        {
            let entries = Vec::<T>::deserialize(deserializer)?;
            Ok(entries.into_iter().filter(|e| !e.is_sentinel()).collect())
        }
    }
}
