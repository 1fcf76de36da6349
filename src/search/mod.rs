// src/search/mod.rs
// =============================================================================
// This module contains the gist search pipeline.
//
// Submodules:
// - aggregator: Validates the request, lists gists, fans out file checks
// - matcher: Compiles the pattern and tests file content against it
// - gist_url: Builds the per-user URL reported for a matching gist
// - result: The request and result types (and the status taxonomy)
// =============================================================================

mod aggregator;
mod gist_url;
mod matcher;
mod result;

pub use aggregator::{SearchAggregator, SearchOptions, DEFAULT_CONCURRENCY, DEFAULT_DEADLINE};
pub use gist_url::match_url;
pub use matcher::{matches, PatternError, PatternMatcher};
pub use result::{SearchRequest, SearchResult, SearchStatus};
