//! Web page fetching and readable-text extraction.
//!
//! Uses reqwest for fetching and the [`crate::extract`] cascade for the text.
//! Fetching sits behind the [`Fetcher`] trait so extraction can run against
//! canned responses.

use crate::config::{ExtractConfig, FetchConfig};
use crate::dom::Element;
use crate::extract::{ExtractionError, Extractor};
use crate::input::{normalize_url, ValidationError};
use async_trait::async_trait;
use encoding_rs::{Encoding, UTF_8};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};
use url::Url;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("network error while fetching the URL: {0}")]
    Network(#[from] reqwest::Error),
    #[error("failed to fetch page: HTTP {0}")]
    Status(u16),
    #[error("URL did not return HTML content")]
    NotHtml,
}

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(
        "no readable article text found ({length} characters extracted); \
         the page might be JavaScript-driven or behind a paywall"
    )]
    NoReadableContent { length: usize },
}

impl From<ExtractionError> for ScraperError {
    fn from(err: ExtractionError) -> Self {
        match err {
            ExtractionError::NoReadableContent { length } => Self::NoReadableContent { length },
        }
    }
}

/// A fetched HTTP response, after redirects
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub url: Url,
    pub status: u16,
    pub content_type: Option<String>,
    /// Body decoded with the declared charset
    pub body_text: String,
    pub body: Vec<u8>,
}

impl FetchedPage {
    /// Build a page from raw body bytes, decoding them per the content type
    pub fn new(url: Url, status: u16, content_type: Option<String>, body: Vec<u8>) -> Self {
        let body_text = decode_body(&body, content_type.as_deref());
        Self {
            url,
            status,
            content_type,
            body_text,
            body,
        }
    }

    /// Whether the response declares or looks like HTML
    pub fn is_html(&self) -> bool {
        let declared = self
            .content_type
            .as_deref()
            .is_some_and(|ct| ct.to_lowercase().contains("html"));
        declared || self.body_text.to_lowercase().contains("<html")
    }
}

/// Decode `body` with the `charset` parameter of `content_type`.
///
/// Unknown or missing charsets fall back to UTF-8, invalid sequences replaced.
pub fn decode_body(body: &[u8], content_type: Option<&str>) -> String {
    let encoding = content_type
        .and_then(charset)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(UTF_8);
    let (text, _, _) = encoding.decode(body);
    text.into_owned()
}

fn charset(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        name.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches('"'))
    })
}

/// Retrieves a page over the network
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError>;
}

/// reqwest-backed [`Fetcher`]
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    accept: String,
}

impl HttpFetcher {
    /// Create a configured HTTP client for scraping
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            accept: config.accept.clone(),
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .header(ACCEPT, self.accept.as_str())
            .send()
            .await
            .inspect_err(|e| warn!(%url, error = %e, "network error fetching URL"))?;

        let url = response.url().clone();
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await?.to_vec();

        Ok(FetchedPage::new(url, status, content_type, body))
    }
}

/// Extracted content from a webpage
#[derive(Debug, Clone)]
pub struct WebContent {
    /// The resolved URL
    pub url: String,
    /// Page title
    pub title: Option<String>,
    /// Main text content
    pub text: String,
}

/// Fetch `url` and extract its readable article text
pub async fn extract_readable_text(
    fetcher: &dyn Fetcher,
    url: &str,
    config: &ExtractConfig,
) -> Result<WebContent, ScraperError> {
    let url = normalize_url(url)?;
    let page = fetcher.fetch(&url).await?;
    if page.status != 200 {
        return Err(FetchError::Status(page.status).into());
    }

    if !page.is_html() {
        return Err(FetchError::NotHtml.into());
    }
    let html = page.body_text.as_str();

    let domain = page.url.host_str().map(str::to_lowercase);
    let extractor = Extractor::standard(config);
    let text = extractor.extract(html, Some(page.url.as_str()), domain.as_deref())?;
    let title = extract_title(&crate::dom::parse_document(html));
    info!(url = %page.url, len = text.chars().count(), "extracted page text");

    Ok(WebContent {
        url: page.url.to_string(),
        title,
        text,
    })
}

/// Extract the page title from <title> or <h1>
pub fn extract_title(document: &Element) -> Option<String> {
    ["title", "h1"].iter().find_map(|tag| {
        let title = document.find(|e| e.is(tag))?.text(" ");
        (!title.is_empty()).then_some(title)
    })
}
