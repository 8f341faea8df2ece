//! A small owned DOM tree.
//!
//! The extraction heuristics work on this tree rather than on a parser's own
//! node types, so they can be exercised with hand-built documents in tests.
//! [`parse_document`] builds one from HTML with the `scraper` parser.

use scraper::{ElementRef, Html};

/// Tag name of the synthetic node holding the whole document
pub const DOCUMENT_TAG: &str = "#document";

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Lowercase tag name
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_lowercase(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.push((name.to_lowercase(), value.to_string()));
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.children.push(Node::Text(text.to_string()));
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Whether the whitespace-separated `class` attribute holds `class`
    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    pub fn is(&self, tag: &str) -> bool {
        self.tag == tag
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|child| match child {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// All descendant elements in document order, `self` excluded
    pub fn descendants(&self) -> Vec<&Element> {
        let mut out = Vec::new();
        self.collect_descendants(&mut out);
        out
    }

    fn collect_descendants<'a>(&'a self, out: &mut Vec<&'a Element>) {
        for child in self.child_elements() {
            out.push(child);
            child.collect_descendants(out);
        }
    }

    /// First descendant matching `pred`, in document order
    pub fn find(&self, pred: impl Fn(&Element) -> bool) -> Option<&Element> {
        self.descendants().into_iter().find(|element| pred(element))
    }

    /// All descendants matching `pred`, in document order
    pub fn find_all(&self, pred: impl Fn(&Element) -> bool) -> Vec<&Element> {
        self.descendants()
            .into_iter()
            .filter(|element| pred(element))
            .collect()
    }

    /// Drop every descendant element (with its subtree) for which `keep` is false.
    pub fn retain(&mut self, keep: &impl Fn(&Element) -> bool) {
        self.children.retain(|child| match child {
            Node::Element(element) => keep(element),
            Node::Text(_) => true,
        });
        for child in &mut self.children {
            if let Node::Element(element) = child {
                element.retain(keep);
            }
        }
    }

    /// Flattened text: every text node trimmed, empty ones dropped, joined by `separator`.
    pub fn text(&self, separator: &str) -> String {
        let mut parts = Vec::new();
        self.collect_text(&mut parts);
        parts.join(separator)
    }

    fn collect_text<'a>(&'a self, parts: &mut Vec<&'a str>) {
        for child in &self.children {
            match child {
                Node::Text(text) => {
                    let trimmed = text.trim();
                    if !trimmed.is_empty() {
                        parts.push(trimmed);
                    }
                }
                Node::Element(element) => element.collect_text(parts),
            }
        }
    }
}

/// Parse an HTML document into an owned tree rooted at a [`DOCUMENT_TAG`] node.
pub fn parse_document(html: &str) -> Element {
    let document = Html::parse_document(html);
    Element::new(DOCUMENT_TAG).with_child(convert(document.root_element()))
}

fn convert(element_ref: ElementRef<'_>) -> Element {
    let value = element_ref.value();
    let mut element = Element::new(value.name());
    element.attrs = value
        .attrs()
        .map(|(name, value)| (name.to_lowercase(), value.to_string()))
        .collect();

    for child in element_ref.children() {
        match child.value() {
            scraper::Node::Text(text) => {
                let text: &str = text;
                element.children.push(Node::Text(text.to_string()));
            }
            scraper::Node::Element(_) => {
                if let Some(child_ref) = ElementRef::wrap(child) {
                    element.children.push(Node::Element(convert(child_ref)));
                }
            }
            _ => {}
        }
    }
    element
}
