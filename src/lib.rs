//! # Summix
//!
//! Turns a web page or pasted text into a short extractive summary, then
//! answers simple questions about that summary.
//!
//! ## Pipeline
//!
//! - **Extraction**: raw HTML to clean article text through a cascade of
//!   strategies (Readability, site-specific rules, generic heuristics)
//! - **Summarisation**: sentences ranked by mean word frequency, kept in document order
//! - **Chat**: questions classified into a handful of intents and answered from the summary
//!
//! Language resources live in an [`NlpContext`] built once and shared read-only.

pub mod chat;
pub mod config;
pub mod dom;
pub mod extract;
pub mod input;
pub mod intent;
pub mod nlp;
pub mod scraper;
pub mod summary;

pub use chat::{chat_with_summary, ChatResponder};
pub use config::Config;
pub use extract::{Extractor, ExtractionError};
pub use input::ValidationError;
pub use intent::{classify, Intent};
pub use nlp::NlpContext;
pub use scraper::{
    extract_readable_text, FetchError, Fetcher, HttpFetcher, ScraperError, WebContent,
};
pub use summary::{summarize, summarize_text, Ratio, Summary, SummaryStats};
