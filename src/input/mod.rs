//! Input processing module
//! Handles file type detection, upload validation and text extraction

pub mod file_detector;
pub mod text_extractor;
pub mod manager;

pub use file_detector::FileType;
pub use manager::{read_document, DocumentTextExtractor, RawDocument};
