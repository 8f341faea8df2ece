//! Generic fallback extraction for arbitrary pages.
//!
//! Noise is stripped first (non-content tags, page chrome, and anything whose
//! `role`, `id` or `class` mentions a noise keyword). Then, in order:
//! the first `<article>`, every long enough paragraph outside noisy
//! ancestors, or the single longest text block on the page.

use super::site::MIN_PARAGRAPH_LENGTH;
use super::{ExtractionStrategy, Page};
use crate::dom::{Element, Node};

/// Tags that never hold article text
pub const NON_CONTENT_TAGS: &[&str] = &[
    "script", "style", "noscript", "iframe", "svg", "picture", "figure", "button", "input", "form",
];

/// Page chrome around the article
pub const CHROME_TAGS: &[&str] = &["nav", "header", "footer", "aside"];

/// Case-insensitive substrings marking navigation, ads and other boilerplate
pub const NOISE_KEYWORDS: &[&str] = &[
    "nav", "menu", "header", "footer", "sidebar", "advert", "ads", "cookie", "modal", "popup",
    "subscribe", "promo", "related", "breadcrumb", "share", "comment", "toolbar", "infobox",
];

/// Shortest block the last-resort scan will return
pub const MIN_BLOCK_LENGTH: usize = 200;

/// Whether an attribute value mentions any noise keyword
pub fn is_noisy(value: &str) -> bool {
    let value = value.to_lowercase();
    NOISE_KEYWORDS.iter().any(|keyword| value.contains(keyword))
}

fn has_noisy_id_or_class(element: &Element) -> bool {
    ["id", "class"]
        .iter()
        .any(|name| element.attr(name).is_some_and(is_noisy))
}

/// Whether `element` should be removed before looking for content
pub fn is_noise(element: &Element) -> bool {
    let tag = element.tag.as_str();
    NON_CONTENT_TAGS.contains(&tag)
        || CHROME_TAGS.contains(&tag)
        || element.attr("role").is_some_and(is_noisy)
        || has_noisy_id_or_class(element)
}

/// Remove every noise element and its subtree.
pub fn strip_noise(root: &mut Element) {
    root.retain(&|element: &Element| !is_noise(element));
}

/// Flattened text of the first `<article>`
pub fn article_text(root: &Element) -> Option<String> {
    root.find(|e| e.is("article"))
        .map(|article| article.text("\n\n"))
}

/// Paragraphs of at least `min_length` characters with no noisy ancestor.
pub fn paragraphs(root: &Element, min_length: usize) -> Vec<String> {
    let mut out = Vec::new();
    collect_paragraphs(root, false, min_length, &mut out);
    out
}

fn collect_paragraphs(
    element: &Element,
    noisy_ancestor: bool,
    min_length: usize,
    out: &mut Vec<String>,
) {
    for child in &element.children {
        let Node::Element(child) = child else {
            continue;
        };
        if child.is("p") && !noisy_ancestor {
            let text = child.text(" ");
            if text.chars().count() >= min_length {
                out.push(text);
            }
        }
        let noisy = noisy_ancestor || has_noisy_id_or_class(child);
        collect_paragraphs(child, noisy, min_length, out);
    }
}

/// The longest flattened text of any single element, if over `min_length`.
///
/// Nested candidates are not deduplicated: a wrapper and its only child
/// compete on raw length alone.
pub fn longest_block(root: &Element, min_length: usize) -> Option<String> {
    root.descendants()
        .into_iter()
        .map(|element| {
            let text = element.text(" ");
            (text.chars().count(), text)
        })
        .filter(|(length, _)| *length > min_length)
        .max()
        .map(|(_, text)| text)
}

#[derive(Debug, Clone)]
pub struct HeuristicStrategy {
    min_paragraph_length: usize,
    min_block_length: usize,
}

impl Default for HeuristicStrategy {
    fn default() -> Self {
        Self {
            min_paragraph_length: MIN_PARAGRAPH_LENGTH,
            min_block_length: MIN_BLOCK_LENGTH,
        }
    }
}

impl ExtractionStrategy for HeuristicStrategy {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    fn try_extract(&self, page: &Page<'_>) -> Option<String> {
        let mut tree = page.tree.clone();
        strip_noise(&mut tree);

        if let Some(text) = article_text(&tree) {
            return Some(text);
        }

        let paragraphs = paragraphs(&tree, self.min_paragraph_length);
        if !paragraphs.is_empty() {
            return Some(paragraphs.join("\n\n"));
        }

        longest_block(&tree, self.min_block_length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_document;

    const PARA: &str = "Octopuses have three hearts and blue blood, which helps them survive.";

    fn run(html: &str) -> Option<String> {
        HeuristicStrategy::default().try_extract(&Page::parse(html, None, None))
    }

    #[test]
    fn test_noise_keywords_match_substrings_case_insensitively() {
        assert!(is_noisy("Main-Navigation"));
        assert!(is_noisy("cookieBanner"));
        assert!(is_noisy("site-footer"));
        assert!(!is_noisy("content body"));
    }

    #[test]
    fn test_is_noise() {
        assert!(is_noise(&Element::new("script")));
        assert!(is_noise(&Element::new("aside")));
        assert!(is_noise(&Element::new("div").with_attr("role", "navigation")));
        assert!(is_noise(&Element::new("div").with_attr("class", "Related-Posts")));
        assert!(is_noise(&Element::new("section").with_attr("id", "comments")));
        assert!(!is_noise(&Element::new("div").with_attr("class", "story")));
    }

    #[test]
    fn test_prefers_article() {
        let html = format!(
            r#"<body><div class="sidebar"><p>{PARA}</p></div>
            <article><h1>Title</h1><p>Body text</p><script>var x = 1;</script></article></body>"#
        );
        assert_eq!(run(&html).unwrap(), "Title\n\nBody text");
    }

    #[test]
    fn test_collects_paragraphs_outside_noise() {
        let html = format!(
            r#"<body><div class="content"><p>{PARA}</p><p>Too short.</p></div>
            <div id="cookie-banner"><p>{PARA} Accept cookies?</p></div>
            <div class="post"><p>{PARA}</p></div></body>"#
        );
        assert_eq!(run(&html).unwrap(), format!("{PARA}\n\n{PARA}"));
    }

    #[test]
    fn test_paragraph_scan_skips_noisy_ancestors() {
        let root = Element::new("div")
            .with_child(Element::new("div").with_attr("class", "promo-box").with_child(
                Element::new("section").with_child(Element::new("p").with_text(PARA)),
            ))
            .with_child(Element::new("p").with_text(PARA));
        assert_eq!(paragraphs(&root, MIN_PARAGRAPH_LENGTH), vec![PARA.to_string()]);
    }

    #[test]
    fn test_longest_block_fallback() {
        let long = "word ".repeat(60);
        let html = format!("<body><div><span>{long}</span></div><div>short</div></body>");
        // the outermost wrapper holds the most text, so it wins
        assert_eq!(run(&html).unwrap(), format!("{} short", long.trim()));
    }

    #[test]
    fn test_longest_block_requires_minimum() {
        let root = parse_document("<body><div>short text only</div></body>");
        assert!(longest_block(&root, MIN_BLOCK_LENGTH).is_none());
    }

    #[test]
    fn test_nav_and_footer_only_yields_nothing() {
        let html = "<html><body><nav><a href='/'>Home</a><a href='/a'>About</a></nav>\
                    <footer>Copyright 2024 Example Corp</footer></body></html>";
        assert!(run(html).is_none());
    }
}
