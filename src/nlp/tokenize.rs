//! Sentence and word tokenization
//!
//! A rule-based splitter: a sentence ends at `.`, `!` or `?` (plus any closing
//! quotes or brackets) followed by whitespace, unless the period closes a known
//! abbreviation, an initial, or a dotted form like `U.S.`.
//!
//! A single capital letter counts as an initial (`J. Doe`) unless the next word
//! is a capitalised function word, as in `plan B. It worked`.

use super::stopwords::StopwordFilter;
use std::collections::HashSet;

const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "inc", "ltd", "corp", "jan", "feb",
    "mar", "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec", "mt", "ft", "gen",
    "col", "lt", "sgt", "hon", "gov", "sen", "rep", "approx", "dept", "fig",
];

const TERMINALS: [char; 3] = ['.', '!', '?'];

const CLOSERS: [char; 7] = ['"', '\'', ')', ']', '}', '\u{201d}', '\u{2019}'];

const CONTRACTIONS: [&str; 7] = ["n't", "'s", "'re", "'ll", "'ve", "'m", "'d"];

/// Splits running text into sentences.
#[derive(Debug, Clone)]
pub struct SentenceSplitter {
    abbreviations: HashSet<String>,
    /// Function words that start a new sentence after an initial-like letter
    starters: StopwordFilter,
}

impl Default for SentenceSplitter {
    fn default() -> Self {
        Self::english()
    }
}

impl SentenceSplitter {
    pub fn english() -> Self {
        Self {
            abbreviations: ABBREVIATIONS.iter().map(|a| a.to_string()).collect(),
            starters: StopwordFilter::english(),
        }
    }

    /// Split `text` into trimmed, non-empty sentences in document order.
    pub fn split(&self, text: &str) -> Vec<String> {
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let mut sentences = Vec::new();
        let mut start = 0;
        let mut i = 0;

        while i < chars.len() {
            let ch = chars[i].1;
            if !TERMINALS.contains(&ch) {
                i += 1;
                continue;
            }

            let mut j = i + 1;
            while j < chars.len()
                && (TERMINALS.contains(&chars[j].1) || CLOSERS.contains(&chars[j].1))
            {
                j += 1;
            }

            let at_boundary = j == chars.len() || chars[j].1.is_whitespace();
            let lone_period = ch == '.' && j == i + 1;
            let end = chars.get(j).map_or(text.len(), |&(offset, _)| offset);
            let before = &text[start..chars[i].0];
            if at_boundary && !(lone_period && self.is_abbreviation(before, &text[end..])) {
                push_trimmed(&mut sentences, &text[start..end]);
                start = end;
            }
            i = j;
        }

        push_trimmed(&mut sentences, &text[start..]);
        sentences
    }

    /// Whether the word right before a period is an abbreviation
    fn is_abbreviation(&self, before: &str, after: &str) -> bool {
        let word = before
            .rsplit(char::is_whitespace)
            .next()
            .unwrap_or("")
            .trim_start_matches(|c: char| !c.is_alphanumeric());
        if word.is_empty() {
            return false;
        }

        let lower = word.to_lowercase();
        if self.abbreviations.contains(&lower) {
            return true;
        }

        let mut letters = word.chars();
        let initial = matches!(
            (letters.next(), letters.next()),
            (Some(c), None) if c.is_uppercase()
        ) && !self.opens_sentence(after);
        let dotted = lower.contains('.')
            && lower.split('.').all(|part| {
                !part.is_empty() && part.chars().count() <= 2 && part.chars().all(char::is_alphabetic)
            });
        initial || dotted
    }

    /// Whether the text after a period starts with a capitalised function word
    fn opens_sentence(&self, after: &str) -> bool {
        let next = after
            .split_whitespace()
            .next()
            .unwrap_or("")
            .trim_matches(|c: char| !c.is_alphanumeric());
        next.chars().next().is_some_and(char::is_uppercase) && self.starters.is_stopword(next)
    }
}

fn push_trimmed(sentences: &mut Vec<String>, span: &str) {
    let trimmed = span.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
}

/// Split text into word and punctuation tokens.
///
/// Leading and trailing punctuation become their own tokens, and common English
/// contractions are split off (`don't` -> `do`, `n't`). Case is preserved.
pub fn words(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for chunk in text.split_whitespace() {
        split_chunk(chunk, &mut tokens);
    }
    tokens
}

fn split_chunk(chunk: &str, tokens: &mut Vec<String>) {
    let Some(first) = chunk.find(char::is_alphanumeric) else {
        tokens.extend(chunk.chars().map(String::from));
        return;
    };
    let last = chunk
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_alphanumeric())
        .map_or(chunk.len(), |(offset, c)| offset + c.len_utf8());

    tokens.extend(chunk[..first].chars().map(String::from));
    push_core(&chunk[first..last], tokens);
    tokens.extend(chunk[last..].chars().map(String::from));
}

fn push_core(core: &str, tokens: &mut Vec<String>) {
    let lower = core.to_ascii_lowercase();
    for suffix in CONTRACTIONS {
        if lower.ends_with(suffix) && core.len() > suffix.len() {
            let cut = core.len() - suffix.len();
            if core.is_char_boundary(cut) {
                tokens.push(core[..cut].to_string());
                tokens.push(core[cut..].to_string());
                return;
            }
        }
    }
    tokens.push(core.to_string());
}

/// True for a non-empty token made only of letters and digits.
pub fn is_alphanumeric(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_alphanumeric)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_simple_sentences() {
        let splitter = SentenceSplitter::english();
        let sentences = splitter.split("Cats are mammals. Dogs are mammals too! Are both pets?");
        assert_eq!(
            sentences,
            vec!["Cats are mammals.", "Dogs are mammals too!", "Are both pets?"]
        );
    }

    #[test]
    fn test_split_keeps_abbreviations_and_initials() {
        let splitter = SentenceSplitter::english();
        let sentences =
            splitter.split("Dr. Smith met J. Doe in the U.S. last year. They talked for hours.");
        assert_eq!(sentences.len(), 2);
        assert!(sentences[0].starts_with("Dr. Smith"));
    }

    #[test]
    fn test_split_after_single_letter_word() {
        let splitter = SentenceSplitter::english();
        assert_eq!(
            splitter.split("We chose plan B. It worked."),
            vec!["We chose plan B.", "It worked."]
        );
        assert_eq!(
            splitter.split("Pick option a. Then wait."),
            vec!["Pick option a.", "Then wait."]
        );
        assert_eq!(splitter.split("Ask J. Doe today. He knows.").len(), 2);
    }

    #[test]
    fn test_split_closing_quotes() {
        let splitter = SentenceSplitter::english();
        let sentences = splitter.split("He said \"stop.\" Then he left.");
        assert_eq!(sentences, vec!["He said \"stop.\"", "Then he left."]);
    }

    #[test]
    fn test_split_decimal_and_trailing_text() {
        let splitter = SentenceSplitter::english();
        let sentences = splitter.split("Pi is about 3.14. No terminal punctuation here");
        assert_eq!(
            sentences,
            vec!["Pi is about 3.14.", "No terminal punctuation here"]
        );
    }

    #[test]
    fn test_split_empty() {
        assert!(SentenceSplitter::english().split("   ").is_empty());
    }

    #[test]
    fn test_words_punctuation_and_contractions() {
        let tokens = words("\"Don't stop,\" she said (quietly).");
        assert_eq!(
            tokens,
            vec!["\"", "Do", "n't", "stop", ",", "\"", "she", "said", "(", "quietly", ")", "."]
        );
    }

    #[test]
    fn test_words_keeps_inner_punctuation() {
        let tokens = words("a well-known fact");
        assert_eq!(tokens, vec!["a", "well-known", "fact"]);
        assert!(!is_alphanumeric("well-known"));
        assert!(is_alphanumeric("fact"));
        assert!(is_alphanumeric("2024"));
        assert!(!is_alphanumeric(""));
    }
}
