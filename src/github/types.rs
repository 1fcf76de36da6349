// src/github/types.rs
// =============================================================================
// Data shapes returned by the GitHub gist API.
//
// Only the fields the search needs are kept. Everything else the API sends
// (description, owner, language, size, ...) is ignored by serde.
//
// Rust concepts:
// - serde derive: Turns JSON objects into structs without hand-written parsing
// - BTreeMap: A sorted map, so files of a gist are always walked in name order
// - #[serde(untagged)]: Lets one response type be "an array OR an object"
// =============================================================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One public gist as listed by `GET /users/{username}/gists`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GistDescriptor {
    /// Upstream-assigned id, unique per account
    pub id: String,
    /// Browser URL of the gist (e.g. "https://gist.github.com/abc123")
    pub html_url: String,
    /// Files of the gist keyed by filename
    #[serde(default)]
    pub files: BTreeMap<String, FileDescriptor>,
}

/// One file inside a gist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDescriptor {
    /// URL serving the literal file content
    pub raw_url: String,
}

// The listing endpoint answers with either the gist array or an error object
// such as {"message": "Not Found", "documentation_url": "..."}
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ListResponse {
    Gists(Vec<GistDescriptor>),
    Error { message: String },
}
