//! Question intent classification by token patterns.
//!
//! Each intent owns a list of patterns; a pattern matches when all of its
//! tokens occur somewhere in the question. Intents are tried in priority
//! order, so an earlier intent wins on ambiguous questions.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::fmt;

lazy_static! {
    static ref PUNCTUATION: Regex = Regex::new(r"[^\w\s]").expect("valid punctuation pattern");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    WhatAbout,
    KeyPoints,
    MakeShorter,
    Explain,
    SummaryLength,
    General,
}

/// Intents with patterns, highest priority first
const PATTERNS: &[(Intent, &[&[&str]])] = &[
    (
        Intent::WhatAbout,
        &[&["what", "about"], &["what", "is", "about"], &["tell", "me", "about"]],
    ),
    (
        Intent::KeyPoints,
        &[
            &["key", "point"],
            &["main", "point"],
            &["important", "point"],
            &["key", "idea"],
            &["what", "are", "key"],
        ],
    ),
    (
        Intent::MakeShorter,
        &[&["shorter"], &["shorten"], &["condense"], &["brief"]],
    ),
    (
        Intent::Explain,
        &[&["explain"], &["elaborate"], &["describe"], &["clarify"]],
    ),
    (
        Intent::SummaryLength,
        &[
            &["how", "long"],
            &["length"],
            &["word", "count"],
            &["character", "count"],
            &["stats"],
        ],
    ),
];

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::WhatAbout => "what_about",
            Intent::KeyPoints => "key_points",
            Intent::MakeShorter => "make_shorter",
            Intent::Explain => "explain",
            Intent::SummaryLength => "summary_length",
            Intent::General => "general",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lowercase, trim and drop punctuation
pub fn normalize_question(question: &str) -> String {
    PUNCTUATION
        .replace_all(question.to_lowercase().trim(), "")
        .into_owned()
}

/// Map a free-text question to an [`Intent`]; unmatched input is `General`.
pub fn classify(question: &str) -> Intent {
    let normalized = normalize_question(question);
    let tokens: Vec<&str> = normalized.split_whitespace().collect();

    PATTERNS
        .iter()
        .find(|(_, patterns)| {
            patterns
                .iter()
                .any(|pattern| pattern.iter().all(|token| tokens.contains(token)))
        })
        .map_or(Intent::General, |(intent, _)| *intent)
}
