//! Console, JSON and Markdown formatters

use crate::config::{OutputConfig, OutputFormat};
use crate::error::Result;
use crate::jobs::{Page, ScoredJob};
use crate::processing::resume::NOT_FOUND;
use crate::processing::{ParsedResume, ScoreBreakdown};
use colored::{Color, Colorize};
use serde::Serialize;
use std::path::Path;

const DESCRIPTION_PREVIEW_CHARS: usize = 200;

/// Renders parse results and job pages in one output format
pub trait OutputFormatter {
    fn format_resume(&self, resume: &ParsedResume, breakdown: &ScoreBreakdown) -> Result<String>;
    fn format_jobs(&self, page: &Page<'_>) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Terminal output with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// Structured output for scripting
pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    detailed: bool,
}

#[derive(Serialize)]
struct ResumeReport<'a> {
    #[serde(flatten)]
    resume: &'a ParsedResume,
    score_breakdown: &'a ScoreBreakdown,
}

/// Pick the formatter for `format` using the output settings
pub fn formatter_for(format: OutputFormat, config: &OutputConfig) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Console => Box::new(ConsoleFormatter::new(config.color_output, config.detailed)),
        OutputFormat::Json => Box::new(JsonFormatter::new(true)),
        OutputFormat::Markdown => Box::new(MarkdownFormatter::new(config.detailed)),
    }
}

pub fn save_output_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}

fn or_not_found(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(NOT_FOUND)
}

fn preview(text: &str, max_chars: usize) -> String {
    let flattened = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flattened.chars().count() > max_chars {
        format!("{}...", flattened.chars().take(max_chars).collect::<String>())
    } else {
        flattened
    }
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };
        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, score: u8) -> String {
        let (badge, color) = match score {
            80..=100 => ("STRONG", Color::Green),
            60..=79 => ("GOOD", Color::Yellow),
            40..=59 => ("FAIR", Color::BrightYellow),
            _ => ("WEAK", Color::Red),
        };

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_match_score(&self, score: u8) -> String {
        let color = match score {
            50..=100 => Color::Green,
            20..=49 => Color::Yellow,
            _ => Color::White,
        };
        self.colorize(&format!("{:>3}%", score), color)
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_resume(&self, resume: &ParsedResume, breakdown: &ScoreBreakdown) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("RESUME ANALYSIS", 1));
        output.push_str(&format!(
            "Resume Score: {}/100 {}\n",
            resume.resume_score,
            self.format_score_badge(resume.resume_score)
        ));
        output.push_str(&format!("File type: {}\n", resume.file_type));

        output.push_str(&self.format_header("Contact", 2));
        output.push_str(&format!("Name:  {}\n", or_not_found(&resume.full_name)));
        output.push_str(&format!("Email: {}\n", or_not_found(&resume.email)));
        output.push_str(&format!("Phone: {}\n", or_not_found(&resume.phone)));

        output.push_str(&self.format_header(&format!("Skills ({})", resume.skills.len()), 2));
        if resume.skills.is_empty() {
            output.push_str(&format!("{}\n", NOT_FOUND));
        }
        for skill in &resume.skills {
            output.push_str(&format!(
                "• {} ({}, {})\n",
                self.colorize(&skill.name, Color::Cyan),
                skill.category,
                skill.proficiency
            ));
        }

        output.push_str(&self.format_header("Experience", 2));
        if resume.experience.is_empty() {
            output.push_str(&format!("{}\n", NOT_FOUND));
        }
        for entry in &resume.experience {
            output.push_str(&format!("• {} - {} ({})\n", entry.company, entry.designation, entry.duration));
        }

        output.push_str(&self.format_header("Education", 2));
        if resume.education.is_empty() {
            output.push_str(&format!("{}\n", NOT_FOUND));
        }
        for entry in &resume.education {
            output.push_str(&format!("• {}: {}\n", entry.degree, entry.field));
        }

        if !resume.certifications.is_empty() {
            output.push_str(&self.format_header("Certifications", 2));
            for cert in &resume.certifications {
                output.push_str(&format!("• {}\n", cert.name));
            }
        }

        if !resume.projects.is_empty() {
            output.push_str(&self.format_header("Projects", 2));
            for project in &resume.projects {
                output.push_str(&format!("• {}\n", preview(&project.description, DESCRIPTION_PREVIEW_CHARS)));
            }
        }

        output.push_str(&self.format_header("Score Breakdown", 3));
        let rows = [
            ("Name", breakdown.name, 10),
            ("Email", breakdown.email, 10),
            ("Phone", breakdown.phone, 10),
            ("Skills", breakdown.skills, 20),
            ("Experience", breakdown.experience, 20),
            ("Education", breakdown.education, 15),
            ("Certifications", breakdown.certifications, 10),
            ("Projects", breakdown.projects, 5),
        ];
        for (label, points, max) in rows {
            output.push_str(&format!("{:<15} {:>2}/{}\n", label, points, max));
        }

        if self.detailed {
            if !resume.keyword_insights.is_empty() {
                output.push_str(&self.format_header("Top Keywords", 3));
                for insight in &resume.keyword_insights {
                    output.push_str(&format!("{:<20} {}\n", insight.keyword, insight.frequency));
                }
            }

            if !resume.raw_text.is_empty() {
                output.push_str(&self.format_header("Text Preview", 3));
                output.push_str(&resume.raw_text);
                output.push('\n');
            }
        }

        Ok(output)
    }

    fn format_jobs(&self, page: &Page<'_>) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("JOB MATCHES", 1));
        if page.items.is_empty() {
            output.push_str("No matching jobs found\n");
            return Ok(output);
        }

        output.push_str(&format!(
            "Page {} of {} ({} jobs)\n",
            page.number, page.num_pages, page.total
        ));

        for job in page.items {
            output.push_str(&self.format_job(job));
        }

        if page.has_next() {
            output.push_str(&self.colorize(
                &format!("\nMore results: --page {}\n", page.number + 1),
                Color::BrightBlack,
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl ConsoleFormatter {
    fn format_job(&self, scored: &ScoredJob) -> String {
        let job = &scored.job;
        let mut output = format!(
            "\n{} {} @ {}\n",
            self.format_match_score(scored.match_score),
            self.colorize(&job.title, Color::Cyan),
            job.company
        );
        output.push_str(&format!("     {} | {} | {}\n", job.location, job.job_type, job.salary));

        if !scored.matching_skills.is_empty() {
            output.push_str(&format!(
                "     Matching skills: {}\n",
                self.colorize(&scored.matching_skills.join(", "), Color::Green)
            ));
        }
        if !job.apply_link.is_empty() {
            output.push_str(&format!("     Apply: {}\n", job.apply_link));
        }
        if self.detailed && !job.description.is_empty() {
            output.push_str(&format!("     {}\n", preview(&job.description, DESCRIPTION_PREVIEW_CHARS)));
        }
        output
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn render<T: Serialize>(&self, value: &T) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_resume(&self, resume: &ParsedResume, breakdown: &ScoreBreakdown) -> Result<String> {
        self.render(&ResumeReport {
            resume,
            score_breakdown: breakdown,
        })
    }

    fn format_jobs(&self, page: &Page<'_>) -> Result<String> {
        self.render(page)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(detailed: bool) -> Self {
        Self { detailed }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_resume(&self, resume: &ParsedResume, breakdown: &ScoreBreakdown) -> Result<String> {
        let mut output = String::new();

        output.push_str("# Resume Analysis\n\n");
        output.push_str(&format!("**Resume Score:** {}/100\n\n", resume.resume_score));

        output.push_str("## Contact\n\n");
        output.push_str(&format!("- **Name:** {}\n", or_not_found(&resume.full_name)));
        output.push_str(&format!("- **Email:** {}\n", or_not_found(&resume.email)));
        output.push_str(&format!("- **Phone:** {}\n\n", or_not_found(&resume.phone)));

        output.push_str("## Skills\n\n");
        if resume.skills.is_empty() {
            output.push_str(&format!("_{}_\n\n", NOT_FOUND));
        } else {
            output.push_str("| Skill | Category | Proficiency |\n|-------|----------|-------------|\n");
            for skill in &resume.skills {
                output.push_str(&format!("| {} | {} | {} |\n", skill.name, skill.category, skill.proficiency));
            }
            output.push('\n');
        }

        output.push_str("## Experience\n\n");
        if resume.experience.is_empty() {
            output.push_str(&format!("_{}_\n\n", NOT_FOUND));
        } else {
            for entry in &resume.experience {
                output.push_str(&format!("- {} ({})\n", entry.company, entry.designation));
            }
            output.push('\n');
        }

        output.push_str("## Education\n\n");
        if resume.education.is_empty() {
            output.push_str(&format!("_{}_\n\n", NOT_FOUND));
        } else {
            for entry in &resume.education {
                output.push_str(&format!("- **{}:** {}\n", entry.degree, entry.field));
            }
            output.push('\n');
        }

        if !resume.certifications.is_empty() {
            output.push_str("## Certifications\n\n");
            for cert in &resume.certifications {
                output.push_str(&format!("- {}\n", cert.name));
            }
            output.push('\n');
        }

        if !resume.projects.is_empty() {
            output.push_str("## Projects\n\n");
            for project in &resume.projects {
                output.push_str(&format!("- {}\n", preview(&project.description, DESCRIPTION_PREVIEW_CHARS)));
            }
            output.push('\n');
        }

        output.push_str("## Score Breakdown\n\n| Signal | Points |\n|--------|--------|\n");
        output.push_str(&format!("| Name | {} |\n", breakdown.name));
        output.push_str(&format!("| Email | {} |\n", breakdown.email));
        output.push_str(&format!("| Phone | {} |\n", breakdown.phone));
        output.push_str(&format!("| Skills | {} |\n", breakdown.skills));
        output.push_str(&format!("| Experience | {} |\n", breakdown.experience));
        output.push_str(&format!("| Education | {} |\n", breakdown.education));
        output.push_str(&format!("| Certifications | {} |\n", breakdown.certifications));
        output.push_str(&format!("| Projects | {} |\n", breakdown.projects));

        if self.detailed && !resume.keyword_insights.is_empty() {
            output.push_str("\n## Top Keywords\n\n");
            for insight in &resume.keyword_insights {
                output.push_str(&format!("- `{}` ({})\n", insight.keyword, insight.frequency));
            }
        }

        Ok(output)
    }

    fn format_jobs(&self, page: &Page<'_>) -> Result<String> {
        let mut output = String::from("# Job Matches\n\n");

        if page.items.is_empty() {
            output.push_str("_No matching jobs found_\n");
            return Ok(output);
        }

        output.push_str(&format!(
            "Page {} of {} ({} jobs)\n\n",
            page.number, page.num_pages, page.total
        ));

        for scored in page.items {
            let job = &scored.job;
            if job.apply_link.is_empty() {
                output.push_str(&format!("## {} @ {}\n\n", job.title, job.company));
            } else {
                output.push_str(&format!("## [{}]({}) @ {}\n\n", job.title, job.apply_link, job.company));
            }
            output.push_str(&format!("- **Match:** {}%\n", scored.match_score));
            output.push_str(&format!("- **Location:** {}\n", job.location));
            output.push_str(&format!("- **Type:** {}\n", job.job_type));
            output.push_str(&format!("- **Salary:** {}\n", job.salary));
            if !scored.matching_skills.is_empty() {
                output.push_str(&format!("- **Matching skills:** {}\n", scored.matching_skills.join(", ")));
            }
            if self.detailed && !job.description.is_empty() {
                output.push_str(&format!("\n> {}\n", preview(&job.description, DESCRIPTION_PREVIEW_CHARS)));
            }
            output.push('\n');
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::FileType;
    use crate::jobs::{paginate, JobPosting};
    use crate::processing::{Proficiency, ResumeScorer, Skill, SkillCategory};

    fn resume() -> ParsedResume {
        ParsedResume {
            full_name: None,
            email: Some("jane@example.com".to_string()),
            phone: None,
            skills: vec![Skill::new("PYTHON", SkillCategory::Programming, Proficiency::Advanced)],
            experience: Vec::new(),
            education: Vec::new(),
            certifications: Vec::new(),
            projects: Vec::new(),
            file_type: FileType::Pdf,
            resume_score: 12,
            keyword_insights: Vec::new(),
            raw_text: "jane@example.com python".to_string(),
        }
    }

    fn jobs() -> Vec<ScoredJob> {
        vec![ScoredJob {
            job: JobPosting {
                id: "mock_001".to_string(),
                title: "Senior Python Developer".to_string(),
                company: "Tech Innovations Inc".to_string(),
                location: "Bangalore, India".to_string(),
                salary: "INR 1,200,000 - 1,600,000".to_string(),
                job_type: "FULLTIME".to_string(),
                description: "Python, Django".to_string(),
                apply_link: "#".to_string(),
                posted_date: String::new(),
            },
            match_score: 15,
            matching_skills: vec!["python".to_string()],
        }]
    }

    #[test]
    fn test_console_resume_shows_sentinels() {
        let resume = resume();
        let breakdown = ResumeScorer::new().breakdown(&resume);
        let output = ConsoleFormatter::new(false, false)
            .format_resume(&resume, &breakdown)
            .unwrap();

        assert!(output.contains("Resume Score: 12/100"));
        assert!(output.contains("Name:  Not Found"));
        assert!(output.contains("Email: jane@example.com"));
        assert!(output.contains("PYTHON (programming, Advanced)"));
        assert!(!output.contains("Text Preview"));
    }

    #[test]
    fn test_json_resume_includes_breakdown() {
        let resume = resume();
        let breakdown = ResumeScorer::new().breakdown(&resume);
        let output = JsonFormatter::new(false).format_resume(&resume, &breakdown).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["full_name"], "Not Found");
        assert_eq!(value["experience"][0]["company"], "Not Found");
        assert_eq!(value["score_breakdown"]["email"], 10);
        assert_eq!(value["resume_score"], 12);
    }

    #[test]
    fn test_job_page_formats() {
        let jobs = jobs();
        let page = paginate(&jobs, 1, 10);

        let console = ConsoleFormatter::new(false, true).format_jobs(&page).unwrap();
        assert!(console.contains("Senior Python Developer @ Tech Innovations Inc"));
        assert!(console.contains("Matching skills: python"));
        assert!(console.contains("Page 1 of 1"));

        let markdown = MarkdownFormatter::new(false).format_jobs(&page).unwrap();
        assert!(markdown.contains("## [Senior Python Developer](#) @ Tech Innovations Inc"));
        assert!(markdown.contains("- **Match:** 15%"));

        let json = JsonFormatter::new(true).format_jobs(&page).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["items"][0]["job_id"], "mock_001");
        assert_eq!(value["items"][0]["match_score"], 15);
        assert_eq!(value["total"], 1);
    }

    #[test]
    fn test_empty_job_page() {
        let page = paginate(&[], 1, 10);
        let output = ConsoleFormatter::new(false, false).format_jobs(&page).unwrap();
        assert!(output.contains("No matching jobs found"));
    }

    #[test]
    fn test_formatter_for_selects_format() {
        let config = crate::config::Config::default().output;
        assert_eq!(formatter_for(OutputFormat::Json, &config).supports_format(), OutputFormat::Json);
        assert_eq!(
            formatter_for(OutputFormat::Markdown, &config).supports_format(),
            OutputFormat::Markdown
        );
    }
}
