//! Extraction for sites with a known, stable page structure.

use super::{ExtractionStrategy, Page};
use crate::dom::Element;

/// Paragraphs shorter than this are treated as captions or boilerplate
pub const MIN_PARAGRAPH_LENGTH: usize = 40;

const HEADINGS: [&str; 3] = ["h2", "h3", "h4"];

/// Where a site keeps its main content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    /// `<tag id="...">`
    Id(&'static str, &'static str),
    /// `<tag class="... name ...">`
    Class(&'static str, &'static str),
}

impl Container {
    fn matches(&self, element: &Element) -> bool {
        match *self {
            Container::Id(tag, id) => element.is(tag) && element.attr("id") == Some(id),
            Container::Class(tag, class) => element.is(tag) && element.has_class(class),
        }
    }
}

/// A domain fragment and the containers to try, in order
#[derive(Debug, Clone)]
pub struct SiteRule {
    pub domain: &'static str,
    pub containers: Vec<Container>,
}

impl SiteRule {
    pub fn wikipedia() -> Self {
        Self {
            domain: "wikipedia.org",
            containers: vec![
                Container::Id("div", "mw-content-text"),
                Container::Class("div", "mw-parser-output"),
            ],
        }
    }

    fn applies_to(&self, domain: &str) -> bool {
        domain.contains(self.domain)
    }
}

/// Collects top-level paragraphs and headings of a site's content container.
#[derive(Debug, Clone)]
pub struct SiteStrategy {
    rules: Vec<SiteRule>,
}

impl Default for SiteStrategy {
    fn default() -> Self {
        Self::new(vec![SiteRule::wikipedia()])
    }
}

impl SiteStrategy {
    pub fn new(rules: Vec<SiteRule>) -> Self {
        Self { rules }
    }
}

impl ExtractionStrategy for SiteStrategy {
    fn name(&self) -> &'static str {
        "site"
    }

    fn try_extract(&self, page: &Page<'_>) -> Option<String> {
        let domain = page.domain?;
        let rule = self.rules.iter().find(|rule| rule.applies_to(domain))?;
        let content = rule
            .containers
            .iter()
            .find_map(|container| page.tree.find(|e| container.matches(e)))?;
        Some(container_text(content))
    }
}

/// Text of the direct `<p>` and heading children of `content`.
///
/// Headings become section breaks. When no direct children qualify, every
/// nested paragraph is scanned instead.
pub fn container_text(content: &Element) -> String {
    let mut blocks = Vec::new();

    for child in content.child_elements() {
        if child.is("p") {
            let text = child.text(" ");
            if text.chars().count() >= MIN_PARAGRAPH_LENGTH {
                blocks.push(text);
            }
        } else if HEADINGS.contains(&child.tag.as_str()) {
            blocks.push(format!("\n\n{}\n\n", child.text(" ")));
        }
    }

    if blocks.is_empty() {
        blocks = content
            .find_all(|e| e.is("p"))
            .into_iter()
            .map(|p| p.text(" "))
            .filter(|text| text.chars().count() >= MIN_PARAGRAPH_LENGTH)
            .collect();
    }

    blocks.join("\n\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::tidy;

    const PARA_A: &str = "Rust is a general-purpose programming language emphasizing performance.";
    const PARA_B: &str = "It enforces memory safety without a garbage collector at runtime.";

    fn extract(html: &str, domain: Option<&str>) -> Option<String> {
        SiteStrategy::default().try_extract(&Page::parse(html, None, domain))
    }

    #[test]
    fn test_top_level_paragraphs_and_headings() {
        let html = format!(
            r#"<div class="mw-parser-output"><p>{PARA_A}</p><p>Short caption.</p>
            <h2>History</h2><table><tr><td><p>{PARA_B} nested in a table</p></td></tr></table>
            <p>{PARA_B}</p></div>"#
        );
        let text = extract(&html, Some("en.wikipedia.org")).unwrap();
        assert_eq!(tidy(&text), format!("{PARA_A}\n\nHistory\n\n{PARA_B}"));
    }

    #[test]
    fn test_falls_back_to_nested_paragraphs() {
        let html = format!(
            r#"<div id="mw-content-text"><div class="mw-parser-output"><p>{PARA_A}</p><p>tiny</p></div></div>"#
        );
        let text = extract(&html, Some("en.wikipedia.org")).unwrap();
        assert_eq!(text, PARA_A);
    }

    #[test]
    fn test_other_domains_are_skipped() {
        let html = format!(r#"<div class="mw-parser-output"><p>{PARA_A}</p></div>"#);
        assert!(extract(&html, Some("example.com")).is_none());
        assert!(extract(&html, None).is_none());
    }

    #[test]
    fn test_missing_container() {
        let html = format!("<article><p>{PARA_A}</p></article>");
        assert!(extract(&html, Some("de.wikipedia.org")).is_none());
    }
}
