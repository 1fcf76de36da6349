// src/lib.rs
// =============================================================================
// gist-search: search a GitHub user's public gists with a regular expression.
//
// Layout:
// - github: Client for the gist API (list gists, fetch raw files)
// - search: The search pipeline (validation, fan-out, matching, results)
// - server: axum router exposing /ping and /api/v1/search
// - logging: tracing subscriber setup
// =============================================================================

pub mod github;
pub mod logging;
pub mod search;
pub mod server;

#[cfg(test)]
mod testing;
