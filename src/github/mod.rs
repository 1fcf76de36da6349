// src/github/mod.rs
// =============================================================================
// This module handles everything the search needs from GitHub.
//
// Currently implements:
// - Listing a user's public gists (optionally across several pages)
// - Fetching the raw content of a single gist file
// - Classifying upstream failures (connection / not found / other)
//
// Rust concepts:
// - Modules: Organizing related functionality
// - Public API: What other parts of the app can use
// =============================================================================

mod client;
mod error;
mod types;

// Re-export the public API so callers can write `github::GithubClient`
pub use client::{GistApi, GithubClient, ListOptions, DEFAULT_API_BASE, DEFAULT_PER_PAGE};
pub use error::{ClientError, FetchError, ListError};
pub use types::{FileDescriptor, GistDescriptor};
