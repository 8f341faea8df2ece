//! Frequency-based extractive summarisation.
//!
//! Sentences are scored by the mean normalised frequency of their words; the
//! best `max(1, floor(n * ratio))` are kept and emitted in document order.

use crate::nlp::{is_alphanumeric, words, NlpContext};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_RATIO: f64 = 0.3;
pub const MIN_RATIO: f64 = 0.1;
pub const MAX_RATIO: f64 = 0.9;

/// Compression ratio, always within `[MIN_RATIO, MAX_RATIO]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Ratio(f64);

impl Ratio {
    /// Clamp `value` into range; NaN falls back to the default
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::default();
        }
        Self(value.clamp(MIN_RATIO, MAX_RATIO))
    }

    /// Parse user input; anything non-numeric gives the default
    pub fn parse(input: &str) -> Self {
        input
            .trim()
            .parse::<f64>()
            .map(Self::new)
            .unwrap_or_default()
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Number of sentences to keep out of `total`, at least one
    pub fn select_count(self, total: usize) -> usize {
        ((total as f64 * self.0).floor() as usize).max(1)
    }
}

impl Default for Ratio {
    fn default() -> Self {
        Self(DEFAULT_RATIO)
    }
}

impl From<f64> for Ratio {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl FromStr for Ratio {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Selected sentences, in their original document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub sentences: Vec<String>,
}

impl Summary {
    pub fn new(sentences: Vec<String>) -> Self {
        Self { sentences }
    }

    /// Sentences joined with single spaces
    pub fn text(&self) -> String {
        self.sentences.join(" ")
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

/// Word -> frequency relative to the most frequent word (which scores 1.0).
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    scores: HashMap<String, f64>,
}

impl FrequencyTable {
    /// Count the non-stopword alphanumeric words of `text` and normalise.
    pub fn build(ctx: &NlpContext, text: &str) -> Self {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for word in ctx.content_words(text) {
            *counts.entry(word).or_insert(0) += 1;
        }

        let max = counts.values().copied().max().unwrap_or(0);
        let scores = counts
            .into_iter()
            .map(|(word, count)| (word, count as f64 / max as f64))
            .collect();
        Self { scores }
    }

    pub fn get(&self, word: &str) -> Option<f64> {
        self.scores.get(word).copied()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Mean score over the alphanumeric words of `sentence`.
    ///
    /// `None` when the sentence has no alphanumeric word at all.
    pub fn sentence_score(&self, sentence: &str) -> Option<f64> {
        let mut total = 0.0;
        let mut count = 0usize;
        for word in words(&sentence.to_lowercase()) {
            if is_alphanumeric(&word) {
                count += 1;
                total += self.get(&word).unwrap_or(0.0);
            }
        }
        (count > 0).then(|| total / count as f64)
    }
}

/// Summarise `text`, keeping roughly `ratio` of its sentences.
///
/// Empty or whitespace-only input gives an empty summary; a single sentence
/// comes back unchanged.
pub fn summarize(ctx: &NlpContext, text: &str, ratio: Ratio) -> Summary {
    let text = collapse_whitespace(text);
    if text.is_empty() {
        return Summary::default();
    }

    let sentences = ctx.sentences(&text);
    if sentences.len() <= 1 {
        return Summary::new(vec![text]);
    }

    let table = FrequencyTable::build(ctx, &text);
    if table.is_empty() {
        let n = ((sentences.len() as f64 * ratio.value()).ceil() as usize).max(1);
        return Summary::new(sentences.into_iter().take(n).collect());
    }

    let select = ratio.select_count(sentences.len());
    let mut scored: Vec<(usize, f64)> = sentences
        .iter()
        .enumerate()
        .filter_map(|(index, sentence)| table.sentence_score(sentence).map(|score| (index, score)))
        .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));

    let mut chosen: Vec<usize> = scored.into_iter().take(select).map(|(index, _)| index).collect();
    if chosen.is_empty() {
        chosen = (0..select.min(sentences.len())).collect();
    }
    chosen.sort_unstable();

    let mut sentences: Vec<Option<String>> = sentences.into_iter().map(Some).collect();
    Summary::new(
        chosen
            .into_iter()
            .filter_map(|index| sentences[index].take())
            .collect(),
    )
}

/// [`summarize`] flattened to a string
pub fn summarize_text(ctx: &NlpContext, text: &str, ratio: Ratio) -> String {
    summarize(ctx, text, ratio).text()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Size comparison between a source text and its summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SummaryStats {
    pub original_words: usize,
    pub original_chars: usize,
    pub original_chars_no_spaces: usize,
    pub summary_words: usize,
    pub summary_chars: usize,
    /// Percentage of characters removed, one decimal place
    pub compression_ratio: f64,
}

impl SummaryStats {
    pub fn new(original: &str, summary: &str) -> Self {
        let original_chars = original.chars().count();
        let summary_chars = summary.chars().count();
        let compression_ratio = if original_chars > 0 && summary_chars > 0 {
            let removed = (1.0 - summary_chars as f64 / original_chars as f64) * 100.0;
            (removed * 10.0).round() / 10.0
        } else {
            0.0
        };

        Self {
            original_words: original.split_whitespace().count(),
            original_chars,
            original_chars_no_spaces: original.chars().filter(|&c| c != ' ').count(),
            summary_words: summary.split_whitespace().count(),
            summary_chars,
            compression_ratio,
        }
    }
}
