//! Routes uploaded documents to the right text extractor

use crate::error::{Result, ScreenerError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{DocxExtractor, PdfExtractor, TextExtractor};
use log::{info, warn};
use std::path::Path;
use tokio::fs;

/// Uploaded document bytes plus the extension the uploader declared
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub bytes: Vec<u8>,
    pub file_type: FileType,
}

impl RawDocument {
    pub fn new(bytes: Vec<u8>, extension: &str) -> Self {
        Self {
            bytes,
            file_type: FileType::from_extension(extension),
        }
    }
}

/// Read an upload from disk, enforcing the size limit and extension check
pub async fn read_document(path: &Path, max_bytes: u64) -> Result<RawDocument> {
    let file_type = FileType::from_path(path);
    if !file_type.is_supported() {
        return Err(ScreenerError::UnsupportedFormat(format!(
            "Only PDF and DOCX files are allowed: {}",
            path.display()
        )));
    }

    let metadata = fs::metadata(path).await.map_err(|e| {
        ScreenerError::InvalidInput(format!("Cannot read {}: {}", path.display(), e))
    })?;
    if metadata.len() > max_bytes {
        return Err(ScreenerError::FileTooLarge {
            size: metadata.len(),
            limit: max_bytes,
        });
    }

    let bytes = fs::read(path).await?;
    Ok(RawDocument { bytes, file_type })
}

/// Converts a PDF or DOCX upload to plain text.
///
/// Unsupported formats fail fast. Read or parse failures of a supported
/// format are logged and degrade to empty text.
#[derive(Debug, Default)]
pub struct DocumentTextExtractor;

impl DocumentTextExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, document: &RawDocument) -> Result<String> {
        let result = match document.file_type {
            FileType::Pdf => {
                info!("Extracting text from PDF ({} bytes)", document.bytes.len());
                PdfExtractor.extract(&document.bytes)
            }
            FileType::Docx => {
                info!("Extracting text from DOCX ({} bytes)", document.bytes.len());
                DocxExtractor.extract(&document.bytes)
            }
            FileType::Unknown => {
                return Err(ScreenerError::UnsupportedFormat(
                    "Only PDF and DOCX files are allowed".to_string(),
                ));
            }
        };

        match result {
            Ok(text) => Ok(text),
            Err(e) => {
                warn!("Text extraction failed, treating document as empty: {}", e);
                Ok(String::new())
            }
        }
    }
}
