//! Readable-text extraction from raw HTML.
//!
//! Extraction is a cascade of [`ExtractionStrategy`] implementations tried in
//! order; the first one producing enough text wins:
//!
//! 1. [`ReadabilityStrategy`] (with the `readability` feature): main-content isolation
//! 2. [`SiteStrategy`]: known containers of well-structured sites such as Wikipedia
//! 3. [`HeuristicStrategy`]: noise stripping, then article / paragraphs / longest block
//!
//! Whatever wins is tidied by [`tidy`] before it is returned.

pub mod heuristic;
#[cfg(feature = "readability")]
pub mod readability;
pub mod site;

use crate::config::ExtractConfig;
use crate::dom::{self, Element};
use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;
use tracing::{debug, info};

pub use heuristic::HeuristicStrategy;
#[cfg(feature = "readability")]
pub use readability::ReadabilityStrategy;
pub use site::{SiteRule, SiteStrategy};

/// Shortest text accepted as an article
pub const MIN_TEXT_LENGTH: usize = 50;

lazy_static! {
    static ref EXCESS_NEWLINES: Regex = Regex::new(r"\n{3,}").expect("valid newline pattern");
    static ref EXCESS_SPACES: Regex = Regex::new(r"[ \t]{2,}").expect("valid whitespace pattern");
}

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error(
        "no readable article text found ({length} characters extracted); \
         the page might be JavaScript-driven or behind a paywall"
    )]
    NoReadableContent { length: usize },
}

/// One parsed HTML page handed to each strategy
#[derive(Debug)]
pub struct Page<'a> {
    /// Raw HTML source
    pub html: &'a str,
    /// Resolved URL, when known
    pub url: Option<&'a str>,
    /// Lowercase host of the resolved URL
    pub domain: Option<&'a str>,
    /// Parsed document tree
    pub tree: Element,
}

impl<'a> Page<'a> {
    pub fn parse(html: &'a str, url: Option<&'a str>, domain: Option<&'a str>) -> Self {
        Self {
            html,
            url,
            domain,
            tree: dom::parse_document(html),
        }
    }
}

/// One way of pulling article text out of a page.
pub trait ExtractionStrategy: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Candidate text, or `None` when the strategy does not apply
    fn try_extract(&self, page: &Page<'_>) -> Option<String>;
}

/// Ordered strategy cascade.
pub struct Extractor {
    strategies: Vec<Box<dyn ExtractionStrategy>>,
    min_length: usize,
}

impl Extractor {
    /// An extractor with no strategies
    pub fn new(min_length: usize) -> Self {
        Self {
            strategies: Vec::new(),
            min_length,
        }
    }

    /// The standard cascade: readability (when enabled), site rules, heuristics
    pub fn standard(config: &ExtractConfig) -> Self {
        let mut extractor = Self::new(config.min_text_length);
        #[cfg(feature = "readability")]
        if config.readability {
            extractor = extractor.with_strategy(ReadabilityStrategy::default());
        }
        extractor
            .with_strategy(SiteStrategy::default())
            .with_strategy(HeuristicStrategy::default())
    }

    pub fn with_strategy(mut self, strategy: impl ExtractionStrategy + 'static) -> Self {
        self.strategies.push(Box::new(strategy));
        self
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }

    /// Strategy names in the order they are tried
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Run the cascade over `html`.
    pub fn extract(
        &self,
        html: &str,
        url: Option<&str>,
        domain: Option<&str>,
    ) -> Result<String, ExtractionError> {
        let page = Page::parse(html, url, domain);
        let mut length = 0;

        for strategy in &self.strategies {
            let Some(text) = strategy.try_extract(&page) else {
                debug!(strategy = strategy.name(), "strategy did not apply");
                continue;
            };
            let text = tidy(&text);
            length = text.chars().count();
            if length >= self.min_length {
                info!(strategy = strategy.name(), len = length, "extracted readable text");
                return Ok(text);
            }
            debug!(strategy = strategy.name(), len = length, "text below minimum length");
        }

        info!(len = length, "no strategy produced enough text");
        Err(ExtractionError::NoReadableContent { length })
    }
}

/// Collapse runs of 3+ newlines to two and runs of spaces/tabs to one, then trim.
pub fn tidy(text: &str) -> String {
    let text = EXCESS_SPACES.replace_all(text, " ");
    let text = EXCESS_NEWLINES.replace_all(&text, "\n\n");
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(&'static str, Option<&'static str>);

    impl ExtractionStrategy for Fixed {
        fn name(&self) -> &'static str {
            self.0
        }

        fn try_extract(&self, _page: &Page<'_>) -> Option<String> {
            self.1.map(str::to_string)
        }
    }

    const LONG: &str = "This sentence is comfortably longer than the fifty character minimum.";

    #[test]
    fn test_tidy() {
        assert_eq!(tidy("  a\n\n\n\nb   c\t\td  "), "a\n\nb c d");
        assert_eq!(tidy("a\n\nb"), "a\n\nb");
    }

    #[test]
    fn test_first_sufficient_strategy_wins() {
        let extractor = Extractor::new(MIN_TEXT_LENGTH)
            .with_strategy(Fixed("none", None))
            .with_strategy(Fixed("short", Some("too short")))
            .with_strategy(Fixed("long", Some(LONG)))
            .with_strategy(Fixed("later", Some("never reached, never reached, never reached, never")));
        assert_eq!(extractor.extract("<p></p>", None, None).unwrap(), LONG);
    }

    #[test]
    fn test_all_strategies_fail() {
        let extractor = Extractor::new(MIN_TEXT_LENGTH).with_strategy(Fixed("short", Some("tiny")));
        let err = extractor.extract("<p></p>", None, None).unwrap_err();
        assert!(matches!(err, ExtractionError::NoReadableContent { length: 4 }));
    }

    #[test]
    fn test_standard_cascade_order() {
        let extractor = Extractor::standard(&ExtractConfig::default());
        #[cfg(feature = "readability")]
        assert_eq!(extractor.strategy_names(), vec!["readability", "site", "heuristic"]);
        #[cfg(not(feature = "readability"))]
        assert_eq!(extractor.strategy_names(), vec!["site", "heuristic"]);
    }

    #[test]
    fn test_readability_disabled_by_config() {
        let config = ExtractConfig {
            readability: false,
            ..ExtractConfig::default()
        };
        let extractor = Extractor::standard(&config);
        assert_eq!(extractor.strategy_names(), vec!["site", "heuristic"]);
        assert_eq!(extractor.min_length(), MIN_TEXT_LENGTH);
    }

    #[test]
    fn test_standard_nav_and_footer_only_fails() {
        let html = "<html><body><nav>Home | About</nav><footer>Copyright</footer></body></html>";
        let extractor = Extractor::standard(&ExtractConfig::default());
        assert!(extractor.extract(html, None, None).is_err());
    }
}
