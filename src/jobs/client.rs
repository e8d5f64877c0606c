//! JSearch (RapidAPI) job source

use crate::config::JobSearchConfig;
use crate::error::{Result, ScreenerError};
use crate::jobs::models::JobPosting;
use crate::jobs::source::JobSource;
use log::{debug, warn};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const NOT_AVAILABLE: &str = "N/A";
const SALARY_NOT_DISCLOSED: &str = "Salary not disclosed";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<RawJob>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawJob {
    job_id: Option<String>,
    job_title: Option<String>,
    employer_name: Option<String>,
    job_location: Option<String>,
    job_employment_type: Option<String>,
    job_description: Option<String>,
    job_apply_link: Option<String>,
    job_posted_at_datetime_utc: Option<String>,
    job_min_salary: Option<f64>,
    job_max_salary: Option<f64>,
    job_salary_currency: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl From<RawJob> for JobPosting {
    fn from(raw: RawJob) -> Self {
        let salary = format_salary(
            raw.job_min_salary,
            raw.job_max_salary,
            raw.job_salary_currency.as_deref(),
        );
        JobPosting {
            id: raw.job_id.unwrap_or_default(),
            title: or_not_available(raw.job_title),
            company: or_not_available(raw.employer_name),
            location: or_not_available(raw.job_location),
            salary,
            job_type: or_not_available(raw.job_employment_type),
            description: raw.job_description.unwrap_or_default(),
            apply_link: raw.job_apply_link.unwrap_or_default(),
            posted_date: raw.job_posted_at_datetime_utc.unwrap_or_default(),
        }
    }
}

fn or_not_available(value: Option<String>) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Human readable salary range, e.g. `INR 1,200,000 - 1,600,000`
pub fn format_salary(min: Option<f64>, max: Option<f64>, currency: Option<&str>) -> String {
    let currency = currency.filter(|c| !c.trim().is_empty()).unwrap_or("INR");
    match (min, max) {
        (Some(min), Some(max)) => format!(
            "{} {} - {}",
            currency,
            format_amount(min),
            format_amount(max)
        ),
        (Some(amount), None) | (None, Some(amount)) => {
            format!("{} {}", currency, format_amount(amount))
        }
        (None, None) => SALARY_NOT_DISCLOSED.to_string(),
    }
}

/// Whole amounts drop the fraction; others keep two decimals
fn format_amount(amount: f64) -> String {
    let rounded = (amount * 100.0).round() / 100.0;
    let whole = rounded.trunc().abs() as u64;
    let cents = ((rounded.abs() - whole as f64) * 100.0).round() as u64;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded < 0.0 { "-" } else { "" };
    if cents == 0 {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{:02}", sign, grouped, cents)
    }
}

/// Map a raw search response to postings or a typed error
pub fn parse_search_response(status: u16, body: &str) -> Result<Vec<JobPosting>> {
    match status {
        200 => {
            let response: SearchResponse = serde_json::from_str(body)
                .map_err(|e| ScreenerError::MalformedResponse(e.to_string()))?;
            Ok(response.data.into_iter().map(JobPosting::from).collect())
        }
        403 | 429 => Err(ScreenerError::SourceUnavailable {
            status,
            message: error_message(body).unwrap_or_else(|| {
                if status == 403 {
                    "API access forbidden".to_string()
                } else {
                    "API rate limit exceeded".to_string()
                }
            }),
        }),
        _ => Err(ScreenerError::Source {
            status,
            message: error_message(body).unwrap_or_else(|| body.trim().to_string()),
        }),
    }
}

fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
}

/// HTTP client for the JSearch search endpoint
#[derive(Clone)]
pub struct JSearchClient {
    client: Client,
    config: JobSearchConfig,
    api_key: String,
}

impl JSearchClient {
    pub fn new(config: &JobSearchConfig, api_key: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            config: config.clone(),
            api_key,
        })
    }

    fn query_params(&self, query: &str, page: u32, location: Option<&str>) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("query", query.to_string()),
            ("page", page.to_string()),
            ("num_pages", "1".to_string()),
            ("date_posted", self.config.date_posted.clone()),
            ("country", self.config.country.clone()),
        ];
        if let Some(location) = location.filter(|l| !l.trim().is_empty()) {
            params.push(("location", location.to_string()));
        }
        params
    }
}

impl JobSource for JSearchClient {
    async fn fetch_page(&self, query: &str, page: u32, location: Option<&str>) -> Result<Vec<JobPosting>> {
        // Pace consecutive page requests
        if page > 1 && self.config.page_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.config.page_delay_ms)).await;
        }

        debug!("Fetching job page {} for query '{}'", page, query);
        let response = self
            .client
            .get(&self.config.base_url)
            .header("X-RapidAPI-Key", &self.api_key)
            .header("X-RapidAPI-Host", &self.config.api_host)
            .query(&self.query_params(query, page, location))
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        let result = parse_search_response(status, &body);
        if let Err(e) = &result {
            warn!("Job search page {} failed: {}", page, e);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    const SAMPLE_BODY: &str = r#"{
        "status": "OK",
        "data": [
            {
                "job_id": "abc123",
                "job_title": "Backend Engineer",
                "employer_name": "Globex",
                "job_location": "Chennai, India",
                "job_employment_type": "FULLTIME",
                "job_description": "Rust and Postgres",
                "job_apply_link": "https://jobs.example.com/abc123",
                "job_posted_at_datetime_utc": "2025-11-20T10:00:00.000Z",
                "job_min_salary": 1200000,
                "job_max_salary": 1600000,
                "job_salary_currency": "INR"
            },
            {
                "job_title": "Intern"
            }
        ]
    }"#;

    #[test]
    fn test_parse_success_maps_fields() {
        let jobs = parse_search_response(200, SAMPLE_BODY).unwrap();
        assert_eq!(jobs.len(), 2);

        let first = &jobs[0];
        assert_eq!(first.id, "abc123");
        assert_eq!(first.company, "Globex");
        assert_eq!(first.salary, "INR 1,200,000 - 1,600,000");
        assert_eq!(first.apply_link, "https://jobs.example.com/abc123");

        let second = &jobs[1];
        assert_eq!(second.title, "Intern");
        assert_eq!(second.company, "N/A");
        assert_eq!(second.location, "N/A");
        assert_eq!(second.salary, "Salary not disclosed");
        assert_eq!(second.job_type, "N/A");
        assert_eq!(second.id, "");
        assert_eq!(second.apply_link, "");
        assert_eq!(second.description, "");
    }

    #[test]
    fn test_missing_data_is_empty() {
        assert!(parse_search_response(200, r#"{"status": "OK"}"#).unwrap().is_empty());
    }

    #[test]
    fn test_status_mapping() {
        let forbidden = parse_search_response(403, r#"{"message": "You are not subscribed"}"#);
        match forbidden {
            Err(ScreenerError::SourceUnavailable { status, message }) => {
                assert_eq!(status, 403);
                assert_eq!(message, "You are not subscribed");
            }
            other => panic!("unexpected result: {:?}", other),
        }

        let limited = parse_search_response(429, "");
        assert!(limited.unwrap_err().is_source_unavailable());

        let server = parse_search_response(500, "upstream down");
        assert!(matches!(
            server,
            Err(ScreenerError::Source { status: 500, ref message }) if message == "upstream down"
        ));
    }

    #[test]
    fn test_malformed_body() {
        assert!(matches!(
            parse_search_response(200, "<html>"),
            Err(ScreenerError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_salary_formatting() {
        assert_eq!(format_salary(Some(900000.0), Some(1300000.0), Some("INR")), "INR 900,000 - 1,300,000");
        assert_eq!(format_salary(Some(55000.5), None, Some("USD")), "USD 55,000.50");
        assert_eq!(format_salary(None, Some(999.0), None), "INR 999");
        assert_eq!(format_salary(None, None, Some("USD")), "Salary not disclosed");
    }

    #[test]
    fn test_query_params_include_location() {
        let client = JSearchClient::new(&Config::default().job_search, "key".to_string()).unwrap();
        let params = client.query_params("rust OR python", 2, Some("Bangalore"));

        assert!(params.contains(&("page", "2".to_string())));
        assert!(params.contains(&("location", "Bangalore".to_string())));
        assert!(client
            .query_params("rust", 1, None)
            .iter()
            .all(|(name, _)| *name != "location"));
    }
}
