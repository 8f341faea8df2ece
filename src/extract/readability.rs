//! Main-content isolation with Readability (via dom_smoothie).

use super::{ExtractionStrategy, Page};
use crate::dom;
use dom_smoothie::{Config, Readability};
use tracing::debug;

/// Runs Readability and flattens the article HTML it keeps.
#[derive(Debug, Clone)]
pub struct ReadabilityStrategy {
    max_elements: usize,
}

impl Default for ReadabilityStrategy {
    fn default() -> Self {
        Self { max_elements: 9000 }
    }
}

impl ExtractionStrategy for ReadabilityStrategy {
    fn name(&self) -> &'static str {
        "readability"
    }

    fn try_extract(&self, page: &Page<'_>) -> Option<String> {
        let cfg = Config {
            max_elements_to_parse: self.max_elements,
            ..Default::default()
        };

        let mut readability = match Readability::new(page.html, page.url, Some(cfg)) {
            Ok(readability) => readability,
            Err(e) => {
                debug!(error = ?e, "readability could not load the page");
                return None;
            }
        };
        let article = match readability.parse() {
            Ok(article) => article,
            Err(e) => {
                debug!(error = ?e, "readability found no article");
                return None;
            }
        };

        let tree = dom::parse_document(&article.content);
        Some(tree.text("\n\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_article_body() {
        let paragraph = "The committee published its findings on Tuesday, after months of \
                         hearings, interviews, and review of thousands of documents.";
        let html = format!(
            "<html><head><title>Report</title></head><body>\
             <nav><a href='/'>Home</a></nav>\
             <article><p>{paragraph}</p><p>{paragraph}</p><p>{paragraph}</p>\
             <p>{paragraph}</p><p>{paragraph}</p><p>{paragraph}</p></article>\
             <footer>Copyright</footer></body></html>"
        );
        let page = Page::parse(&html, Some("https://news.example.com/report"), None);
        let text = ReadabilityStrategy::default().try_extract(&page).unwrap();
        assert!(text.contains("The committee published its findings"));
    }
}
