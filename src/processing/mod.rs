//! Résumé parsing and scoring module

pub mod resume;
pub mod vocabulary;
pub mod entities;
pub mod keywords;
pub mod field_extractor;
pub mod scorer;
pub mod pipeline;

pub use entities::{Entity, EntityLabel, EntityTagger, HeuristicTagger};
pub use pipeline::ResumeParser;
pub use resume::{ParsedResume, Proficiency, Skill, SkillCategory};
pub use scorer::{ResumeScorer, ScoreBreakdown};
