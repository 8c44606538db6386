//! Job posting pages → relevance-filtered plain text.
//!
//! Job boards routinely reject non-browser clients, so a fetch walks an ordered list of
//! request strategies and keeps the first page that loads.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::{Client, StatusCode, Url};
use scraper::Html;
use thiserror::Error;
use tracing::{debug, info, warn};

const DESKTOP_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const MOBILE_USER_AGENT: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) \
    AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1";
const BROWSER_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "noscript"];
const RELEVANCE_KEYWORDS: &[&str] = &[
    "responsibilities",
    "requirements",
    "qualifications",
    "experience",
    "skills",
    "job description",
];
/// Character budget when no sentence mentions a relevance keyword.
pub const UNFILTERED_CHAR_LIMIT: usize = 2000;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid job URL: {0}")]
    InvalidUrl(String),

    #[error("Job page not found (404)")]
    NotFound,

    #[error("Access to the job page was denied (403)")]
    Forbidden,

    #[error("Job page did not respond in time")]
    Timeout,

    #[error("Could not connect to the job site: {0}")]
    Connection(String),

    #[error("Job site answered with status {0}")]
    Status(u16),

    #[error("No job content could be extracted from the page")]
    NoContent,
}

impl FetchError {
    fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_builder() {
            FetchError::InvalidUrl(err.to_string())
        } else {
            FetchError::Connection(err.to_string())
        }
    }
}

/// How a single attempt presents itself to the job site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStrategy {
    DesktopBrowser,
    MobileBrowser,
    Bare,
}

impl FetchStrategy {
    pub const ORDERED: [FetchStrategy; 3] = [
        FetchStrategy::DesktopBrowser,
        FetchStrategy::MobileBrowser,
        FetchStrategy::Bare,
    ];

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let user_agent = match self {
            FetchStrategy::DesktopBrowser => DESKTOP_USER_AGENT,
            FetchStrategy::MobileBrowser => MOBILE_USER_AGENT,
            FetchStrategy::Bare => return headers,
        };
        headers.insert(USER_AGENT, HeaderValue::from_static(user_agent));
        headers.insert(ACCEPT, HeaderValue::from_static(BROWSER_ACCEPT));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        headers
    }
}

#[derive(Clone)]
pub struct JobPageFetcher {
    client: Client,
    strategies: Vec<FetchStrategy>,
}

impl JobPageFetcher {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            strategies: FetchStrategy::ORDERED.to_vec(),
        })
    }

    /// Fetches the page and reduces it to job-relevant text.
    pub async fn fetch_job_text(&self, url: &str) -> Result<String, FetchError> {
        let url = parse_job_url(url)?;
        let html = self.fetch_html(&url).await?;
        let text = html_to_job_text(&html);
        if text.is_empty() {
            return Err(FetchError::NoContent);
        }
        info!("Extracted {} chars of job text from {}", text.len(), url);
        Ok(text)
    }

    /// Tries each strategy in order; the last failure is returned when all fail.
    async fn fetch_html(&self, url: &Url) -> Result<String, FetchError> {
        let mut last_error = FetchError::NoContent;
        for strategy in &self.strategies {
            match self.attempt(*strategy, url).await {
                Ok(html) => {
                    debug!("Fetched {url} with {strategy:?} strategy");
                    return Ok(html);
                }
                Err(e) => {
                    warn!("Fetch of {url} with {strategy:?} strategy failed: {e}");
                    last_error = e;
                }
            }
        }
        Err(last_error)
    }

    async fn attempt(&self, strategy: FetchStrategy, url: &Url) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .headers(strategy.headers())
            .send()
            .await
            .map_err(FetchError::from_transport)?;

        check_status(response.status())?;
        response.text().await.map_err(FetchError::from_transport)
    }
}

pub fn parse_job_url(raw: &str) -> Result<Url, FetchError> {
    let url = Url::parse(raw.trim()).map_err(|e| FetchError::InvalidUrl(format!("{raw}: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(FetchError::InvalidUrl(format!("unsupported scheme {other}"))),
    }
}

pub fn check_status(status: StatusCode) -> Result<(), FetchError> {
    match status {
        s if s.is_success() => Ok(()),
        StatusCode::NOT_FOUND => Err(FetchError::NotFound),
        StatusCode::FORBIDDEN => Err(FetchError::Forbidden),
        s => Err(FetchError::Status(s.as_u16())),
    }
}

/// Visible page text with whitespace collapsed, narrowed to sentences that look like
/// job content. Falls back to the leading characters when nothing matches.
pub fn html_to_job_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let visible: Vec<&str> = document
        .root_element()
        .descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let hidden = node.ancestors().any(|a| {
                a.value()
                    .as_element()
                    .is_some_and(|e| SKIPPED_ELEMENTS.contains(&e.name()))
            });
            (!hidden).then_some(&**text)
        })
        .collect();

    let text = visible.join(" ").split_whitespace().collect::<Vec<_>>().join(" ");

    let relevant: Vec<&str> = text
        .split(['.', '!', '?'])
        .map(str::trim)
        .filter(|sentence| {
            let lowered = sentence.to_lowercase();
            RELEVANCE_KEYWORDS.iter().any(|k| lowered.contains(k))
        })
        .collect();

    if relevant.is_empty() {
        text.chars().take(UNFILTERED_CHAR_LIMIT).collect()
    } else {
        relevant.join(". ")
    }
}
