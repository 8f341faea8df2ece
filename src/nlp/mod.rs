//! Shared language resources: sentence splitting, word tokenization and the
//! English stopword set.
//!
//! Everything here is built once at startup into an [`NlpContext`] and only read
//! afterwards, so a single context can be shared by every request.

pub mod stopwords;
pub mod tokenize;

pub use stopwords::StopwordFilter;
pub use tokenize::{is_alphanumeric, words, SentenceSplitter};

/// Read-only tokenizer and stopword resources passed into every call.
#[derive(Debug, Clone, Default)]
pub struct NlpContext {
    splitter: SentenceSplitter,
    stopwords: StopwordFilter,
}

impl NlpContext {
    /// English sentence rules and stopwords
    pub fn english() -> Self {
        Self {
            splitter: SentenceSplitter::english(),
            stopwords: StopwordFilter::english(),
        }
    }

    pub fn stopwords(&self) -> &StopwordFilter {
        &self.stopwords
    }

    pub fn sentences(&self, text: &str) -> Vec<String> {
        self.splitter.split(text)
    }

    /// Lowercased alphanumeric tokens that are not stopwords
    pub fn content_words(&self, text: &str) -> Vec<String> {
        words(&text.to_lowercase())
            .into_iter()
            .filter(|w| is_alphanumeric(w) && !self.stopwords.is_stopword(w))
            .collect()
    }
}
