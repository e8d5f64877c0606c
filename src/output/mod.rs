//! Output formatting for parsed résumés and job listings

pub mod formatter;

pub use formatter::{formatter_for, save_output_to_file, ConsoleFormatter, JsonFormatter, MarkdownFormatter, OutputFormatter};
