// src/search/aggregator.rs
// =============================================================================
// This module runs one gist search from request to result.
//
// How it works:
// 1. Validate the request (username, pattern, pattern compiles)
// 2. List the user's gists once
// 3. Fetch + match every file of every gist, a bounded number at a time
// 4. Collect the gists with at least one matching file, in listing order
//
// Failure policy:
// - Bad input and listing failures end the search before any file is fetched
// - A file that cannot be fetched simply does not match
// - The whole pipeline runs under an optional deadline
//
// Rust concepts:
// - Streams + buffer_unordered: Run up to N file checks at once
// - CancellationToken: Stop the remaining fetches of a gist once it matched
// - tokio::time::timeout: Give up on a search that takes too long
// =============================================================================

use futures::future::{BoxFuture, FutureExt};
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use super::gist_url::match_url;
use super::matcher::PatternMatcher;
use super::result::{SearchRequest, SearchResult, SearchStatus};
use crate::github::{GistApi, GistDescriptor, ListError};

/// Upstream requests in flight at once for one search.
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Time allowed for one whole search.
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(30);

/// Tuning for the fan-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// Maximum concurrent file fetches (values below 1 are treated as 1)
    pub concurrency: usize,
    /// Deadline for the whole search; `None` waits forever
    pub deadline: Option<Duration>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            deadline: Some(DEFAULT_DEADLINE),
        }
    }
}

// What happened to one file check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileOutcome {
    /// The file of gist #index matched
    Matched(usize),
    NoMatch,
    /// The fetch failed; treated as no match
    Failed,
    /// The gist had already matched, so the file was not needed
    Skipped,
}

/// Searches a user's gists through an injected [`GistApi`].
#[derive(Clone)]
pub struct SearchAggregator {
    api: Arc<dyn GistApi>,
    options: SearchOptions,
}

impl SearchAggregator {
    pub fn new(api: Arc<dyn GistApi>, options: SearchOptions) -> Self {
        Self { api, options }
    }

    /// Runs one search. Never fails: every problem becomes a status.
    pub async fn search(&self, request: SearchRequest) -> SearchResult {
        let (username, pattern) = match validate(request) {
            Ok(fields) => fields,
            Err(status) => {
                info!(?status, "rejected search request");
                return SearchResult::failure(status);
            }
        };

        // Compile once, before any network traffic
        let matcher = match PatternMatcher::new(&pattern) {
            Ok(matcher) => matcher,
            Err(e) => {
                info!(error = %e, "rejected search with invalid pattern");
                return SearchResult::failure(SearchStatus::InvalidPattern);
            }
        };

        let pipeline = self.run(&username, &matcher);
        let outcome = match self.options.deadline {
            Some(deadline) => match tokio::time::timeout(deadline, pipeline).await {
                Ok(outcome) => outcome,
                Err(_) => {
                    // Dropping the pipeline future cancels every fetch still in flight
                    warn!(%username, ?deadline, "search ran past its deadline");
                    Err(SearchStatus::Timeout)
                }
            },
            None => pipeline.await,
        };

        match outcome {
            Ok(matches) => {
                info!(%username, matches = matches.len(), "search finished");
                SearchResult::success(username, pattern, matches)
            }
            Err(status) => SearchResult::failure(status),
        }
    }

    #[instrument(skip(self, matcher), fields(pattern = matcher.as_str()))]
    async fn run(&self, username: &str, matcher: &PatternMatcher) -> Result<Vec<String>, SearchStatus> {
        let gists = self
            .api
            .list_gists(username)
            .await
            .map_err(|e| status_for_list_error(&e))?;

        debug!(gists = gists.len(), "listed gists");

        let matched = self.scan(&gists, matcher).await;

        let matches = gists
            .iter()
            .zip(matched)
            .filter(|(_, matched)| *matched)
            .filter_map(|(gist, _)| {
                let url = match_url(&gist.html_url, username);
                if url.is_none() {
                    warn!(gist = %gist.id, html_url = %gist.html_url, "matched gist has no usable URL");
                }
                url
            })
            .collect();

        Ok(matches)
    }

    // Checks every file of every gist; returns one "matched" flag per gist
    async fn scan(&self, gists: &[GistDescriptor], matcher: &PatternMatcher) -> Vec<bool> {
        // One token per gist: cancelling it stops that gist's remaining files only
        let tokens: Vec<CancellationToken> = gists.iter().map(|_| CancellationToken::new()).collect();

        // Boxed up front so the stream holds one concrete, Send future type
        let mut checks: Vec<BoxFuture<'_, FileOutcome>> = Vec::new();
        for (index, gist) in gists.iter().enumerate() {
            for file in gist.files.values() {
                checks.push(
                    self.check_file(index, &file.raw_url, tokens[index].clone(), matcher)
                        .boxed(),
                );
            }
        }

        let mut outcomes = stream::iter(checks).buffer_unordered(self.options.concurrency.max(1));

        // This loop is the only owner of the result table
        let mut matched = vec![false; gists.len()];
        while let Some(outcome) = outcomes.next().await {
            if let FileOutcome::Matched(index) = outcome {
                matched[index] = true;
            }
        }

        matched
    }

    async fn check_file(
        &self,
        gist: usize,
        raw_url: &str,
        token: CancellationToken,
        matcher: &PatternMatcher,
    ) -> FileOutcome {
        if token.is_cancelled() {
            return FileOutcome::Skipped;
        }

        // Race the download against another file of the same gist matching first
        let fetched = tokio::select! {
            _ = token.cancelled() => None,
            fetched = self.api.fetch_raw(raw_url) => Some(fetched),
        };

        match fetched {
            None => FileOutcome::Skipped,
            Some(Ok(content)) => {
                if matcher.is_match(&content) {
                    token.cancel();
                    FileOutcome::Matched(gist)
                } else {
                    FileOutcome::NoMatch
                }
            }
            Some(Err(e)) => {
                warn!(error = %e, "skipping gist file that could not be fetched");
                FileOutcome::Failed
            }
        }
    }
}

// Splits a request into (username, pattern) or the status explaining what is missing
fn validate(request: SearchRequest) -> Result<(String, String), SearchStatus> {
    let username = request
        .username
        .filter(|username| !username.is_empty())
        .ok_or(SearchStatus::UserNotSpecified)?;
    let pattern = request.pattern.ok_or(SearchStatus::PatternNotSpecified)?;
    Ok((username, pattern))
}

fn status_for_list_error(error: &ListError) -> SearchStatus {
    match error {
        ListError::ConnectionFailed(_) => {
            warn!(error = %error, "could not list gists");
            SearchStatus::GithubConnectionError
        }
        ListError::UserNotFound(_) => {
            info!(error = %error, "could not list gists");
            SearchStatus::UserNotFound
        }
        ListError::Upstream { .. } => {
            warn!(error = %error, "could not list gists");
            SearchStatus::GithubApiError
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does buffer_unordered(n) do here?
//    - stream::iter turns the list of file checks into a stream of futures
//    - At most n of them are polled at the same time
//    - Results come back in completion order, not listing order, which is
//      why each outcome carries the index of its gist
//
// 2. What is a CancellationToken?
//    - A flag that can be awaited: token.cancelled() completes once someone
//      calls token.cancel()
//    - Clones share the same flag, so every file of a gist gets a clone
//
// 3. What does tokio::select! do?
//    - Polls several futures and keeps the first one that finishes
//    - The losing future is dropped, and dropping a reqwest future aborts
//      the request
//
// 4. Why does search() return SearchResult instead of Result?
//    - Every failure already has a status value, so there is nothing left
//      for a caller to handle
// -----------------------------------------------------------------------------
