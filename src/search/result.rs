// src/search/result.rs
// =============================================================================
// The request a caller sends and the result they get back.
//
// The `status` field is the only way failures are reported: the HTTP layer
// always answers 200 with one of these bodies.
//
// Request bodies are read leniently: each field is looked up on its own, so
// a wrongly typed pattern still leaves the username in place.
// =============================================================================

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /api/v1/search`.
///
/// Both fields are optional at this level so a missing one can be reported
/// with its own status instead of a deserialization error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub pattern: Option<String>,
}

impl SearchRequest {
    pub fn new(username: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            pattern: Some(pattern.into()),
        }
    }

    /// Reads a request from a raw body, one field at a time.
    ///
    /// A field that is absent or not a string counts as missing; a body that
    /// is not a JSON object yields a request with no fields.
    pub fn from_json_body(body: &[u8]) -> Self {
        let value: Value = serde_json::from_slice(body).unwrap_or(Value::Null);
        let field = |name: &str| value.get(name).and_then(Value::as_str).map(str::to_string);

        Self {
            username: field("username"),
            pattern: field("pattern"),
        }
    }
}

/// Outcome of one search, serialized as snake_case strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    /// Search completed; `matches` may be empty
    Success,
    /// The request carried no (or an empty) username
    UserNotSpecified,
    /// The request carried no pattern
    PatternNotSpecified,
    /// The pattern is not a valid regular expression
    InvalidPattern,
    /// GitHub says the account does not exist
    UserNotFound,
    /// GitHub could not be reached
    GithubConnectionError,
    /// GitHub answered the listing with some other failure
    GithubApiError,
    /// The search ran past its deadline
    Timeout,
}

/// Response of one search.
///
/// `username`, `pattern` and `matches` are only present on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub status: SearchStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matches: Option<Vec<String>>,
}

impl SearchResult {
    pub fn success(username: String, pattern: String, matches: Vec<String>) -> Self {
        Self {
            status: SearchStatus::Success,
            username: Some(username),
            pattern: Some(pattern),
            matches: Some(matches),
        }
    }

    pub fn failure(status: SearchStatus) -> Self {
        Self {
            status,
            username: None,
            pattern: None,
            matches: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == SearchStatus::Success
    }
}
