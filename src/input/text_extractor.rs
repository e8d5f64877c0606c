//! Text extraction from uploaded document bytes

use crate::error::{Result, ScreenerError};
use docx_rs::{DocumentChild, InsertChild, ParagraphChild, Run, RunChild};
use log::debug;

pub trait TextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String>;
}

/// Concatenates the text of every page in page order, with no separator
pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let document = lopdf::Document::load_mem(bytes).map_err(|e| {
            ScreenerError::DocumentExtraction(format!("Failed to load PDF: {}", e))
        })?;

        let mut text = String::new();
        for page_number in document.get_pages().keys() {
            let page_text = document.extract_text(&[*page_number]).map_err(|e| {
                ScreenerError::DocumentExtraction(format!(
                    "Failed to extract text from PDF page {}: {}",
                    page_number, e
                ))
            })?;
            text.push_str(&page_text);
        }

        debug!("Extracted {} characters from PDF", text.len());
        Ok(text)
    }
}

/// Joins the text of every top-level paragraph with newlines
pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let docx = docx_rs::read_docx(bytes).map_err(|e| {
            ScreenerError::DocumentExtraction(format!("Failed to read DOCX: {:?}", e))
        })?;

        let paragraphs: Vec<String> = docx
            .document
            .children
            .iter()
            .filter_map(|child| match child {
                DocumentChild::Paragraph(paragraph) => Some(paragraph_text(&paragraph.children)),
                _ => None,
            })
            .collect();

        debug!("Extracted {} paragraphs from DOCX", paragraphs.len());
        Ok(paragraphs.join("\n"))
    }
}

fn paragraph_text(children: &[ParagraphChild]) -> String {
    let mut text = String::new();
    push_paragraph_text(children, &mut text);
    text
}

/// Hyperlinks and tracked insertions hold their own runs
fn push_paragraph_text(children: &[ParagraphChild], text: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => push_run_text(run, text),
            ParagraphChild::Hyperlink(link) => push_paragraph_text(&link.children, text),
            ParagraphChild::Insert(insert) => {
                for insert_child in &insert.children {
                    if let InsertChild::Run(run) = insert_child {
                        push_run_text(run, text);
                    }
                }
            }
            _ => {}
        }
    }
}

fn push_run_text(run: &Run, text: &mut String) {
    for run_child in &run.children {
        match run_child {
            RunChild::Text(t) => text.push_str(&t.text),
            RunChild::Tab(_) | RunChild::PTab(_) => text.push('\t'),
            RunChild::Break(_) | RunChild::CarriageReturn(_) => text.push('\n'),
            _ => {}
        }
    }
}
