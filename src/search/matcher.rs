// src/search/matcher.rs
// =============================================================================
// This module tests file content against the caller's regular expression.
//
// The pattern is compiled once per search and then shared by every file
// check. Matching is unanchored: any substring match counts.
//
// Rust concepts:
// - regex::Regex: Compiled once, cheap to use many times, safe to share
//   between tasks because it is Sync
// =============================================================================

use regex::Regex;
use thiserror::Error;

/// The pattern does not compile.
#[derive(Debug, Error)]
#[error("invalid pattern '{pattern}': {source}")]
pub struct PatternError {
    pattern: String,
    #[source]
    source: regex::Error,
}

/// A compiled search pattern.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    regex: Regex,
}

impl PatternMatcher {
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        let regex = Regex::new(pattern).map_err(|source| PatternError {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self { regex })
    }

    /// True when `content` contains at least one match.
    pub fn is_match(&self, content: &str) -> bool {
        self.regex.is_match(content)
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

/// One-off check of `content` against `pattern`.
pub fn matches(pattern: &str, content: &str) -> Result<bool, PatternError> {
    Ok(PatternMatcher::new(pattern)?.is_match(content))
}
