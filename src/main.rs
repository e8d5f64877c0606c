//! Resume screener: resume parsing, scoring and job matching

use clap::Parser;
use log::{error, info, warn};
use resume_screener::cli::{self, Cli, Commands, ConfigAction};
use resume_screener::config::Config;
use resume_screener::error::{Result, ScreenerError};
use resume_screener::input::read_document;
use resume_screener::jobs::{
    paginate, CachedJobSource, JSearchClient, JobFilter, JobRecommendationEngine, JobSource, ScoredJob,
};
use resume_screener::output::{formatter_for, save_output_to_file};
use resume_screener::processing::{ParsedResume, ResumeParser, ResumeScorer, Skill};
use std::path::Path;
use std::process;

const RESUME_EXTENSIONS: [&str; 2] = ["pdf", "docx"];

/// What to ask the job source for
enum JobRequest<'a> {
    Recommend {
        skills: &'a [Skill],
        location: Option<&'a str>,
        pages: u32,
    },
    Search {
        keyword: &'a str,
        skills: &'a [Skill],
        location: Option<&'a str>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Parse { file, output, detailed, save } => {
            let format = output_format(output.as_deref(), &config)?;
            let resume = parse_resume(&file, &config).await?;
            let breakdown = ResumeScorer::new().breakdown(&resume);

            let mut output_config = config.output.clone();
            output_config.detailed |= detailed;
            let rendered = formatter_for(format, &output_config).format_resume(&resume, &breakdown)?;

            match save {
                Some(path) => {
                    save_output_to_file(&rendered, &path)?;
                    println!("Saved analysis to {}", path.display());
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Recommend { resume, location, pages, min_score, job_type, page, output } => {
            let format = output_format(output.as_deref(), &config)?;
            let parsed = parse_resume(&resume, &config).await?;
            info!("Recommending jobs for {} extracted skills", parsed.skills.len());

            let request = JobRequest::Recommend {
                skills: &parsed.skills,
                location: location.as_deref(),
                pages: pages.unwrap_or(config.recommendations.default_pages),
            };
            let jobs = find_jobs(&config, &request).await?;
            print_jobs(jobs, JobFilter { min_score, job_type }, page, format, &config)?;
        }

        Commands::Search { keyword, resume, location, min_score, job_type, page, output } => {
            let format = output_format(output.as_deref(), &config)?;
            let parsed = match &resume {
                Some(path) => Some(parse_resume(path, &config).await?),
                None => None,
            };
            let skills = parsed.as_ref().map(|r| r.skills.as_slice()).unwrap_or(&[]);

            let request = JobRequest::Search {
                keyword: &keyword,
                skills,
                location: location.as_deref(),
            };
            let jobs = find_jobs(&config, &request).await?;
            print_jobs(jobs, JobFilter { min_score, job_type }, page, format, &config)?;
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                let mut shown = config.clone();
                if shown.job_search.api_key.is_some() {
                    shown.job_search.api_key = Some("********".to_string());
                }
                let content = toml::to_string_pretty(&shown)
                    .map_err(|e| ScreenerError::Configuration(e.to_string()))?;
                println!("{}", content);
                let key_state = if config.resolve_api_key().is_some() { "configured" } else { "not configured" };
                println!("# Job search API key: {}", key_state);
            }

            Some(ConfigAction::Reset) => {
                Config::default().save()?;
                println!("Configuration reset to defaults at {}", Config::config_path().display());
            }

            Some(ConfigAction::Path) => {
                println!("{}", Config::config_path().display());
            }
        },
    }

    Ok(())
}

fn output_format(requested: Option<&str>, config: &Config) -> Result<resume_screener::config::OutputFormat> {
    match requested {
        Some(format) => cli::parse_output_format(format).map_err(ScreenerError::InvalidInput),
        None => Ok(config.output.format),
    }
}

async fn parse_resume(path: &Path, config: &Config) -> Result<ParsedResume> {
    cli::validate_file_extension(path, &RESUME_EXTENSIONS)
        .map_err(|e| ScreenerError::InvalidInput(format!("Resume file: {}", e)))?;

    let document = read_document(path, config.parsing.max_upload_bytes).await?;
    let parser = ResumeParser::new()?.with_preview_chars(config.parsing.raw_text_preview_chars);

    parser.parse(&document)?.ok_or_else(|| {
        ScreenerError::Processing(format!(
            "Could not extract text from {}. The file may be scanned or corrupt",
            path.display()
        ))
    })
}

/// Run a job request against the configured source.
///
/// Without an API key there is nothing to query, so the result is empty.
async fn find_jobs(config: &Config, request: &JobRequest<'_>) -> Result<Vec<ScoredJob>> {
    let Some(api_key) = config.resolve_api_key() else {
        warn!("Job search API key is not configured; set JSEARCH_API_KEY to enable job matching");
        return Ok(Vec::new());
    };

    let client = JSearchClient::new(&config.job_search, api_key)?;

    if config.job_search.enable_cache {
        let ttl = config.cache_ttl()?;
        let cached = CachedJobSource::with_store(client, ttl, &config.cache_path());
        let engine = JobRecommendationEngine::from_config(cached, &config.recommendations);

        let jobs = execute(&engine, request).await;
        if let Err(e) = engine.source().persist() {
            warn!("Failed to save job cache: {}", e);
        }
        jobs
    } else {
        let engine = JobRecommendationEngine::from_config(client, &config.recommendations);
        execute(&engine, request).await
    }
}

async fn execute<S: JobSource>(engine: &JobRecommendationEngine<S>, request: &JobRequest<'_>) -> Result<Vec<ScoredJob>> {
    match request {
        JobRequest::Recommend { skills, location, pages } => engine.recommend(skills, *location, *pages).await,
        JobRequest::Search { keyword, skills, location } => {
            engine.search_by_keyword(keyword, skills, *location).await
        }
    }
}

fn print_jobs(
    jobs: Vec<ScoredJob>,
    filter: JobFilter,
    page: usize,
    format: resume_screener::config::OutputFormat,
    config: &Config,
) -> Result<()> {
    let jobs = filter.apply(jobs);
    let page = paginate(&jobs, page, config.recommendations.page_size);
    let rendered = formatter_for(format, &config.output).format_jobs(&page)?;
    println!("{}", rendered);
    Ok(())
}
