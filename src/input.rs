//! Validation of caller-supplied URLs and text.

use thiserror::Error;
use url::Url;

/// Longest text accepted for summarisation
pub const MAX_TEXT_LENGTH: usize = 200_000;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid URL '{0}'; please include a valid http(s) URL")]
    InvalidUrl(String),
    #[error("please provide either a link (URL) or text to summarise")]
    EmptyInput,
    #[error("text too short; enter at least {min} characters")]
    TextTooShort { min: usize },
    #[error("text too long; at most {max} characters are allowed")]
    TextTooLong { max: usize },
}

/// Parse a user-typed URL, assuming `http://` when no scheme is given.
///
/// Only `http` and `https` URLs with a host are accepted.
pub fn normalize_url(candidate: &str) -> Result<Url, ValidationError> {
    let candidate = candidate.trim();
    if candidate.is_empty() {
        return Err(ValidationError::EmptyInput);
    }

    let with_scheme = if candidate.contains("://") {
        candidate.to_string()
    } else {
        format!("http://{candidate}")
    };

    let url = Url::parse(&with_scheme)
        .map_err(|_| ValidationError::InvalidUrl(candidate.to_string()))?;
    let has_host = url.host_str().is_some_and(|host| !host.is_empty());
    if !matches!(url.scheme(), "http" | "https") || !has_host {
        return Err(ValidationError::InvalidUrl(candidate.to_string()));
    }
    Ok(url)
}

/// Check that `text` is non-empty and within `[min, max]` characters.
pub fn validate_text(text: &str, min: usize, max: usize) -> Result<&str, ValidationError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ValidationError::EmptyInput);
    }
    let length = text.chars().count();
    if length < min {
        return Err(ValidationError::TextTooShort { min });
    }
    if length > max {
        return Err(ValidationError::TextTooLong { max });
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_url_adds_scheme() {
        let url = normalize_url("  en.wikipedia.org/wiki/Rust ").unwrap();
        assert_eq!(url.as_str(), "http://en.wikipedia.org/wiki/Rust");
    }

    #[test]
    fn test_normalize_url_keeps_https() {
        let url = normalize_url("https://example.com/a?b=c").unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_str(), Some("example.com"));
    }

    #[test]
    fn test_normalize_url_rejects() {
        assert_eq!(normalize_url(""), Err(ValidationError::EmptyInput));
        assert!(matches!(
            normalize_url("ftp://example.com/file"),
            Err(ValidationError::InvalidUrl(_))
        ));
        assert!(matches!(
            normalize_url("http://"),
            Err(ValidationError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_validate_text_bounds() {
        assert_eq!(validate_text("   ", 5, 10), Err(ValidationError::EmptyInput));
        assert_eq!(validate_text("abc", 5, 10), Err(ValidationError::TextTooShort { min: 5 }));
        assert_eq!(
            validate_text("abcdefghijkl", 5, 10),
            Err(ValidationError::TextTooLong { max: 10 })
        );
        assert_eq!(validate_text("  abcdef  ", 5, 10), Ok("abcdef"));
    }
}
