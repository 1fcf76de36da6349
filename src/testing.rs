// src/testing.rs
// =============================================================================
// In-memory GistApi used by the search and server tests.
//
// The fake serves a scripted listing and scripted file contents, can delay
// either of them, and records every call so tests can assert on what the
// search actually fetched.
// =============================================================================

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::github::{FetchError, FileDescriptor, GistApi, GistDescriptor, ListError};

struct FakeFile {
    content: Result<String, FetchError>,
    delay: Option<Duration>,
}

pub(crate) struct FakeGistApi {
    listing: Result<Vec<GistDescriptor>, ListError>,
    list_delay: Option<Duration>,
    files: HashMap<String, FakeFile>,
    list_calls: AtomicUsize,
    fetched: Mutex<Vec<String>>,
}

impl FakeGistApi {
    pub(crate) fn with_gists(gists: Vec<GistDescriptor>) -> Self {
        Self::new(Ok(gists))
    }

    pub(crate) fn failing(error: ListError) -> Self {
        Self::new(Err(error))
    }

    fn new(listing: Result<Vec<GistDescriptor>, ListError>) -> Self {
        Self {
            listing,
            list_delay: None,
            files: HashMap::new(),
            list_calls: AtomicUsize::new(0),
            fetched: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn file(mut self, raw_url: &str, content: &str) -> Self {
        self.files.insert(
            raw_url.to_string(),
            FakeFile {
                content: Ok(content.to_string()),
                delay: None,
            },
        );
        self
    }

    pub(crate) fn slow_file(mut self, raw_url: &str, content: &str, delay: Duration) -> Self {
        self.files.insert(
            raw_url.to_string(),
            FakeFile {
                content: Ok(content.to_string()),
                delay: Some(delay),
            },
        );
        self
    }

    pub(crate) fn broken_file(mut self, raw_url: &str, status: u16) -> Self {
        self.files.insert(
            raw_url.to_string(),
            FakeFile {
                content: Err(FetchError::Status {
                    url: raw_url.to_string(),
                    status,
                }),
                delay: None,
            },
        );
        self
    }

    pub(crate) fn slow_listing(mut self, delay: Duration) -> Self {
        self.list_delay = Some(delay);
        self
    }

    pub(crate) fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }
}

#[async_trait]
impl GistApi for FakeGistApi {
    async fn list_gists(&self, _username: &str) -> Result<Vec<GistDescriptor>, ListError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.list_delay {
            tokio::time::sleep(delay).await;
        }
        self.listing.clone()
    }

    async fn fetch_raw(&self, raw_url: &str) -> Result<String, FetchError> {
        self.fetched.lock().unwrap().push(raw_url.to_string());

        match self.files.get(raw_url) {
            Some(file) => {
                if let Some(delay) = file.delay {
                    tokio::time::sleep(delay).await;
                }
                file.content.clone()
            }
            None => Err(FetchError::Status {
                url: raw_url.to_string(),
                status: 404,
            }),
        }
    }
}

/// A gist at `https://gist.github.com/{id}` with the given (filename, raw_url) pairs.
pub(crate) fn gist(id: &str, files: &[(&str, &str)]) -> GistDescriptor {
    GistDescriptor {
        id: id.to_string(),
        html_url: format!("https://gist.github.com/{}", id),
        files: files
            .iter()
            .map(|(name, raw_url)| {
                (
                    name.to_string(),
                    FileDescriptor {
                        raw_url: raw_url.to_string(),
                    },
                )
            })
            .collect::<BTreeMap<_, _>>(),
    }
}
