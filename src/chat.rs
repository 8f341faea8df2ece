//! Templated answers to questions about a summary.
//!
//! The responder never fails: missing input and internal problems turn into
//! fixed, human-readable replies.

use crate::intent::{classify, Intent};
use crate::nlp::{is_alphanumeric, words, NlpContext};
use crate::summary::{summarize, Ratio};
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, warn};

pub const NO_SUMMARY_REPLY: &str =
    "I don't have a summary to discuss yet. Please generate a summary first!";
pub const NO_QUESTION_REPLY: &str = "Please ask a question about the summary!";
pub const ERROR_REPLY: &str =
    "I encountered an error processing your question. Please try rephrasing it.";
pub const NO_ANSWER_REPLY: &str = "I didn't find a direct answer in the summary. Try: \
     'What is this about?', 'Give key points', 'Make it shorter', or 'How long is this summary?'";

const MAX_KEY_POINTS: usize = 5;
const MAX_RELEVANT: usize = 3;
const SHORTER_RATIO: f64 = 0.5;

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("summary has no sentences")]
    NoSentences,
}

/// The `top_n` most frequent non-stopword words longer than two characters.
///
/// Ties keep first-occurrence order.
pub fn extract_keywords(ctx: &NlpContext, text: &str, top_n: usize) -> Vec<String> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for word in words(&text.to_lowercase()) {
        if !is_alphanumeric(&word)
            || word.chars().count() <= 2
            || ctx.stopwords().is_stopword(&word)
        {
            continue;
        }
        match index.get(&word) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(word.clone(), counts.len());
                counts.push((word, 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.into_iter().take(top_n).map(|(word, _)| word).collect()
}

/// Up to `max_points` sentences ranked by how many top keywords they contain.
///
/// Falls back to the leading sentences when no sentence holds a keyword.
pub fn key_points(ctx: &NlpContext, summary: &str, max_points: usize) -> Vec<String> {
    let sentences = ctx.sentences(summary);
    let keywords = extract_keywords(ctx, summary, 10);

    let mut scored: Vec<(&String, usize)> = sentences
        .iter()
        .map(|sentence| {
            let lower = sentence.to_lowercase();
            let score = keywords.iter().filter(|k| lower.contains(k.as_str())).count();
            (sentence, score)
        })
        .collect();
    scored.sort_by(|a, b| b.1.cmp(&a.1));

    let points: Vec<String> = scored
        .into_iter()
        .take(max_points)
        .filter(|(_, score)| *score > 0)
        .map(|(sentence, _)| sentence.clone())
        .collect();
    if points.is_empty() {
        return sentences.into_iter().take(max_points).collect();
    }
    points
}

/// Answers questions about a summary.
#[derive(Debug, Clone, Copy)]
pub struct ChatResponder<'a> {
    ctx: &'a NlpContext,
}

impl<'a> ChatResponder<'a> {
    pub fn new(ctx: &'a NlpContext) -> Self {
        Self { ctx }
    }

    /// Answer `question` about `summary`. Always returns a readable reply.
    pub fn respond(&self, question: &str, summary: &str) -> String {
        if summary.trim().is_empty() {
            return NO_SUMMARY_REPLY.to_string();
        }
        if question.trim().is_empty() {
            return NO_QUESTION_REPLY.to_string();
        }

        let intent = classify(question);
        debug!(%intent, "classified question");
        match self.answer(intent, question, summary) {
            Ok(answer) => answer,
            Err(e) => {
                warn!(error = %e, %intent, "failed to answer question");
                ERROR_REPLY.to_string()
            }
        }
    }

    fn answer(&self, intent: Intent, question: &str, summary: &str) -> Result<String, ChatError> {
        match intent {
            Intent::WhatAbout => self.what_about(summary),
            Intent::KeyPoints => self.key_points(summary),
            Intent::MakeShorter => Ok(self.make_shorter(summary)),
            Intent::Explain => self.explain(summary),
            Intent::SummaryLength => self.stats(summary),
            Intent::General => Ok(self.relevant_sentences(question, summary)),
        }
    }

    fn sentences(&self, summary: &str) -> Result<Vec<String>, ChatError> {
        let sentences = self.ctx.sentences(summary);
        if sentences.is_empty() {
            return Err(ChatError::NoSentences);
        }
        Ok(sentences)
    }

    fn what_about(&self, summary: &str) -> Result<String, ChatError> {
        let keywords = extract_keywords(self.ctx, summary, 5);
        let sentences = self.sentences(summary)?;
        Ok(format!(
            "This summary is about: {}. For example: {}",
            keywords.join(", "),
            sentences[0]
        ))
    }

    fn key_points(&self, summary: &str) -> Result<String, ChatError> {
        let points = key_points(self.ctx, summary, MAX_KEY_POINTS);
        if points.is_empty() {
            return Err(ChatError::NoSentences);
        }

        let mut out = String::from("🔑 Key Points:");
        for (i, point) in points.iter().enumerate() {
            out.push_str(&format!("\n{}. {}", i + 1, point));
        }
        Ok(out)
    }

    fn make_shorter(&self, summary: &str) -> String {
        let shorter = summarize(self.ctx, summary, Ratio::new(SHORTER_RATIO));
        let text = if shorter.is_empty() {
            summary.to_string()
        } else {
            shorter.text()
        };
        format!("📝 Shorter version:\n\n{text}")
    }

    fn explain(&self, summary: &str) -> Result<String, ChatError> {
        let sentences = self.sentences(summary)?;
        let mut explanation = format!(
            "This summary contains {} sentence(s), approximately {} words ({} characters).",
            sentences.len(),
            summary.split_whitespace().count(),
            summary.chars().count()
        );

        let keywords = extract_keywords(self.ctx, summary, 5);
        if !keywords.is_empty() {
            explanation.push_str(&format!(" Key topics: {}.", keywords.join(", ")));
        }
        Ok(format!("💡 Explanation:\n\n{explanation}"))
    }

    fn stats(&self, summary: &str) -> Result<String, ChatError> {
        let sentences = self.sentences(summary)?;
        let paragraphs = summary.split("\n\n").filter(|p| !p.trim().is_empty()).count();
        Ok(format!(
            "📊 Summary Statistics:\n\n\
             • Words: {}\n\
             • Characters: {}\n\
             • Characters (no spaces): {}\n\
             • Sentences: {}\n\
             • Paragraphs: {}",
            group_thousands(summary.split_whitespace().count()),
            group_thousands(summary.chars().count()),
            group_thousands(summary.chars().filter(|&c| c != ' ').count()),
            sentences.len(),
            paragraphs
        ))
    }

    fn relevant_sentences(&self, question: &str, summary: &str) -> String {
        let query = self.ctx.content_words(question);
        let relevant: Vec<String> = self
            .ctx
            .sentences(summary)
            .into_iter()
            .filter(|sentence| {
                let lower = sentence.to_lowercase();
                query.iter().any(|word| lower.contains(word.as_str()))
            })
            .take(MAX_RELEVANT)
            .collect();

        if relevant.is_empty() {
            return NO_ANSWER_REPLY.to_string();
        }
        format!(
            "Based on your question, here are relevant sentences:\n\n{}",
            relevant.join(" ")
        )
    }
}

/// Answer `question` about `summary` with a fresh responder
pub fn chat_with_summary(ctx: &NlpContext, question: &str, summary: &str) -> String {
    ChatResponder::new(ctx).respond(question, summary)
}

/// `1234567` -> `1,234,567`
fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
