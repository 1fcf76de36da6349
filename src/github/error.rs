// src/github/error.rs
// =============================================================================
// Errors produced while talking to the gist API.
//
// Listing errors are classified up front (connection / not found / other)
// because each one becomes a different search status. Fetch errors are only
// ever logged, so they just carry enough text to explain what went wrong.
// =============================================================================

use thiserror::Error;

/// Failure to list a user's gists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    /// DNS failure, refused connection, timeout or a broken response stream
    #[error("could not reach the gist API: {0}")]
    ConnectionFailed(String),

    /// The API says the account does not exist
    #[error("GitHub user '{0}' was not found")]
    UserNotFound(String),

    /// Any other non-success answer from the API
    #[error("gist API answered HTTP {status}: {message}")]
    Upstream { status: u16, message: String },
}

/// Failure to download the raw content of one gist file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("request for {url} failed: {reason}")]
    Transport { url: String, reason: String },

    #[error("{url} answered HTTP {status}")]
    Status { url: String, status: u16 },
}

/// Failure to construct a [`GithubClient`](super::GithubClient).
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid API base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}
