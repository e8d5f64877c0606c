//! Résumé parsing pipeline: text extraction, field extraction, scoring

use crate::error::{Result, ScreenerError};
use crate::input::{DocumentTextExtractor, FileType, RawDocument};
use crate::processing::entities::{EntityTagger, HeuristicTagger};
use crate::processing::field_extractor::FieldExtractor;
use crate::processing::resume::ParsedResume;
use crate::processing::scorer::ResumeScorer;
use log::{debug, info, warn};

const DEFAULT_PREVIEW_CHARS: usize = 1000;

pub struct ResumeParser {
    text_extractor: DocumentTextExtractor,
    tagger: Box<dyn EntityTagger>,
    fields: FieldExtractor,
    scorer: ResumeScorer,
    preview_chars: usize,
}

impl ResumeParser {
    /// Parser backed by the rule-based entity tagger
    pub fn new() -> Result<Self> {
        Self::with_tagger(Box::new(HeuristicTagger::new()))
    }

    pub fn with_tagger(tagger: Box<dyn EntityTagger>) -> Result<Self> {
        Ok(Self {
            text_extractor: DocumentTextExtractor::new(),
            tagger,
            fields: FieldExtractor::new()?,
            scorer: ResumeScorer::new(),
            preview_chars: DEFAULT_PREVIEW_CHARS,
        })
    }

    pub fn with_preview_chars(mut self, preview_chars: usize) -> Self {
        self.preview_chars = preview_chars;
        self
    }

    /// Parse an uploaded document.
    ///
    /// Unsupported formats are rejected before extraction. `Ok(None)` means
    /// the document yielded no text and could not be parsed.
    pub fn parse(&self, document: &RawDocument) -> Result<Option<ParsedResume>> {
        if !document.file_type.is_supported() {
            return Err(ScreenerError::UnsupportedFormat(
                "Only PDF and DOCX files are allowed".to_string(),
            ));
        }

        let text = self.text_extractor.extract(document)?;
        if text.is_empty() {
            warn!("No text extracted from {} document, cannot parse", document.file_type);
            return Ok(None);
        }

        Ok(Some(self.parse_text(&text, document.file_type)))
    }

    /// Build and score a `ParsedResume` from already-extracted text
    pub fn parse_text(&self, text: &str, file_type: FileType) -> ParsedResume {
        let entities = self.tagger.tag(text);
        debug!("Tagged {} entities", entities.len());

        let fields = self.fields.extract(text, &entities);

        let mut resume = ParsedResume {
            full_name: fields.full_name,
            email: fields.email,
            phone: fields.phone,
            skills: fields.skills,
            experience: fields.experience,
            education: fields.education,
            certifications: fields.certifications,
            projects: fields.projects,
            file_type,
            resume_score: 0,
            keyword_insights: fields.keyword_insights,
            raw_text: text.chars().take(self.preview_chars).collect(),
        };
        resume.resume_score = self.scorer.score(&resume);

        info!(
            "Parsed resume: {} skills, {} experience entries, score {}",
            resume.skills.len(),
            resume.experience.len(),
            resume.resume_score
        );
        resume
    }
}
