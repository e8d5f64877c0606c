//! CLI interface for the resume screener

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "resume-screener")]
#[command(about = "Parse and score resumes, then match them against job postings")]
#[command(long_about = "Extract structured fields from PDF and DOCX resumes, score their completeness, and rank live job postings by skill overlap")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a resume and show its extracted fields and score
    Parse {
        /// Path to resume file (PDF, DOCX)
        file: PathBuf,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Include keyword insights and a text preview
        #[arg(short, long)]
        detailed: bool,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Recommend jobs that match the skills found in a resume
    Recommend {
        /// Path to resume file (PDF, DOCX)
        resume: PathBuf,

        /// Restrict postings to a location
        #[arg(short, long)]
        location: Option<String>,

        /// Number of result pages to fetch from the job source
        #[arg(long)]
        pages: Option<u32>,

        /// Minimum match score (0-100)
        #[arg(long, default_value_t = 0)]
        min_score: u8,

        /// Employment type, e.g. FULLTIME or CONTRACTOR
        #[arg(long)]
        job_type: Option<String>,

        /// Result page to display
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Search postings by keyword
    Search {
        /// Search keyword, e.g. "data engineer"
        keyword: String,

        /// Score results against this resume's skills
        #[arg(short, long)]
        resume: Option<PathBuf>,

        /// Restrict postings to a location
        #[arg(short, long)]
        location: Option<String>,

        /// Minimum match score (0-100)
        #[arg(long, default_value_t = 0)]
        min_score: u8,

        /// Employment type, e.g. FULLTIME or CONTRACTOR
        #[arg(long)]
        job_type: Option<String>,

        /// Result page to display
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown", format)),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("JSON"), Ok(OutputFormat::Json));
        assert_eq!(parse_output_format("md"), Ok(OutputFormat::Markdown));
        assert!(parse_output_format("html").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        let allowed = ["pdf", "docx"];
        assert!(validate_file_extension(Path::new("cv.PDF"), &allowed).is_ok());
        assert!(validate_file_extension(Path::new("cv.docx"), &allowed).is_ok());
        assert!(validate_file_extension(Path::new("cv.txt"), &allowed).is_err());
        assert!(validate_file_extension(Path::new("cv"), &allowed).is_err());
    }

    #[test]
    fn test_cli_parses_recommend() {
        let cli = Cli::try_parse_from([
            "resume-screener",
            "recommend",
            "cv.pdf",
            "--min-score",
            "20",
            "--job-type",
            "FULLTIME",
            "--page",
            "2",
        ])
        .unwrap();

        match cli.command {
            Commands::Recommend { resume, min_score, job_type, page, pages, .. } => {
                assert_eq!(resume, PathBuf::from("cv.pdf"));
                assert_eq!(min_score, 20);
                assert_eq!(job_type.as_deref(), Some("FULLTIME"));
                assert_eq!(page, 2);
                assert_eq!(pages, None);
            }
            _ => panic!("expected recommend command"),
        }
    }
}
