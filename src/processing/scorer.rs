//! Résumé completeness score (0-100)

use crate::processing::resume::ParsedResume;
use serde::{Deserialize, Serialize};

const MAX_SCORE: u32 = 100;

/// Points earned per signal, before the overall cap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub name: u8,
    pub email: u8,
    pub phone: u8,
    pub skills: u8,
    pub experience: u8,
    pub education: u8,
    pub certifications: u8,
    pub projects: u8,
}

impl ScoreBreakdown {
    pub fn total(&self) -> u8 {
        let sum: u32 = [
            self.name,
            self.email,
            self.phone,
            self.skills,
            self.experience,
            self.education,
            self.certifications,
            self.projects,
        ]
        .iter()
        .map(|points| u32::from(*points))
        .sum();
        sum.min(MAX_SCORE) as u8
    }
}

/// Pure, deterministic scoring over the extracted fields
#[derive(Debug, Clone, Copy, Default)]
pub struct ResumeScorer;

impl ResumeScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, resume: &ParsedResume) -> u8 {
        self.breakdown(resume).total()
    }

    pub fn breakdown(&self, resume: &ParsedResume) -> ScoreBreakdown {
        ScoreBreakdown {
            name: present(&resume.full_name, 10),
            email: present(&resume.email, 10),
            phone: present(&resume.phone, 10),
            skills: capped(resume.skills.len(), 2, 20),
            experience: if resume.experience.is_empty() { 0 } else { 20 },
            education: if resume.education.is_empty() { 0 } else { 15 },
            certifications: capped(resume.certifications.len(), 3, 10),
            projects: capped(resume.projects.len(), 1, 5),
        }
    }
}

fn present(field: &Option<String>, points: u8) -> u8 {
    if field.is_some() {
        points
    } else {
        0
    }
}

fn capped(count: usize, per_item: usize, cap: u8) -> u8 {
    count.saturating_mul(per_item).min(usize::from(cap)) as u8
}
