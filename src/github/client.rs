// src/github/client.rs
// =============================================================================
// This module talks to the GitHub gist API over HTTP.
//
// Two operations are all the search needs:
// - list_gists: GET {api_base}/users/{username}/gists
// - fetch_raw:  GET the raw_url of one gist file
//
// Both live behind the `GistApi` trait so the search pipeline can be handed
// an in-memory fake in tests instead of a real network client.
//
// Rust concepts:
// - Traits + async_trait: An "interface" with async methods usable as dyn
// - Url: For building the listing URL safely (usernames are percent-encoded)
// - Result: Every network call returns a typed error instead of panicking
// =============================================================================

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::error::{ClientError, FetchError, ListError};
use super::types::{GistDescriptor, ListResponse};

/// Public GitHub API root.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Page size GitHub uses when `per_page` is not given.
pub const DEFAULT_PER_PAGE: u32 = 30;

// GitHub rejects API requests that carry no User-Agent
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

const GITHUB_JSON: &str = "application/vnd.github+json";

// The only upstream error message that gets first-class treatment
const NOT_FOUND_MESSAGE: &str = "Not Found";

/// Upstream access needed by the search: list a user's gists, fetch a file.
#[async_trait]
pub trait GistApi: Send + Sync {
    /// Resolves `username` into the gists the API lists for it.
    async fn list_gists(&self, username: &str) -> Result<Vec<GistDescriptor>, ListError>;

    /// Downloads the text behind one file's `raw_url`.
    async fn fetch_raw(&self, raw_url: &str) -> Result<String, FetchError>;
}

/// How much of a user's gist listing to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListOptions {
    /// Gists requested per page (GitHub caps this at 100)
    pub per_page: u32,
    /// Pages read at most; 1 means only the first page is considered
    pub max_pages: u32,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            per_page: DEFAULT_PER_PAGE,
            max_pages: 1,
        }
    }
}

/// [`GistApi`] implementation backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct GithubClient {
    http: Client,
    api_base: Url,
    list: ListOptions,
}

impl GithubClient {
    /// Builds a client rooted at `api_base`.
    ///
    /// `timeout` bounds every single upstream request (listing pages and raw
    /// file downloads alike).
    pub fn new(api_base: &str, timeout: Duration, list: ListOptions) -> Result<Self, ClientError> {
        let api_base = Url::parse(api_base).map_err(|e| ClientError::InvalidBaseUrl {
            url: api_base.to_string(),
            reason: e.to_string(),
        })?;

        if api_base.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl {
                url: api_base.to_string(),
                reason: "URL cannot carry a path".to_string(),
            });
        }

        // One client for every request so connections are pooled
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            api_base,
            list: ListOptions {
                per_page: list.per_page.max(1),
                max_pages: list.max_pages.max(1),
            },
        })
    }

    // Builds {api_base}/users/{username}/gists?per_page=N&page=P
    fn gists_url(&self, username: &str, page: u32) -> Url {
        let mut url = self.api_base.clone();

        // cannot_be_a_base() was ruled out in new(), so this always succeeds
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push("users")
                .push(username)
                .push("gists");
        }

        url.query_pairs_mut()
            .append_pair("per_page", &self.list.per_page.to_string())
            .append_pair("page", &page.to_string());

        url
    }

    // Fetches and classifies one page of the listing
    async fn list_page(&self, username: &str, page: u32) -> Result<Vec<GistDescriptor>, ListError> {
        let url = self.gists_url(username, page);
        debug!(%url, "listing gists");

        let response = self
            .http
            .get(url)
            .header(ACCEPT, GITHUB_JSON)
            .send()
            .await
            .map_err(|e| ListError::ConnectionFailed(e.to_string()))?;

        let status = response.status().as_u16();

        // A body cut off mid-stream is a transport problem too
        let body = response
            .text()
            .await
            .map_err(|e| ListError::ConnectionFailed(e.to_string()))?;

        classify_listing(username, status, &body)
    }
}

#[async_trait]
impl GistApi for GithubClient {
    async fn list_gists(&self, username: &str) -> Result<Vec<GistDescriptor>, ListError> {
        let mut gists = Vec::new();

        for page in 1..=self.list.max_pages {
            let batch = self.list_page(username, page).await?;

            // A short page is the last one
            let last_page = batch.len() < self.list.per_page as usize;
            gists.extend(batch);

            if last_page {
                break;
            }
        }

        Ok(gists)
    }

    async fn fetch_raw(&self, raw_url: &str) -> Result<String, FetchError> {
        debug!(url = raw_url, "fetching raw gist file");

        let transport = |e: reqwest::Error| FetchError::Transport {
            url: raw_url.to_string(),
            reason: e.to_string(),
        };

        let response = self.http.get(raw_url).send().await.map_err(transport)?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                url: raw_url.to_string(),
                status: response.status().as_u16(),
            });
        }

        response.text().await.map_err(transport)
    }
}

// Maps an HTTP status and body from the listing endpoint onto gists or a
// ListError
fn classify_listing(username: &str, status: u16, body: &str) -> Result<Vec<GistDescriptor>, ListError> {
    let success = (200..300).contains(&status);

    match serde_json::from_str::<ListResponse>(body) {
        Ok(ListResponse::Error { message }) if message == NOT_FOUND_MESSAGE => {
            Err(ListError::UserNotFound(username.to_string()))
        }
        _ if status == 404 => Err(ListError::UserNotFound(username.to_string())),
        Ok(ListResponse::Gists(gists)) if success => Ok(gists),
        Ok(ListResponse::Gists(_)) => Err(ListError::Upstream {
            status,
            message: "gist listing returned with an error status".to_string(),
        }),
        Ok(ListResponse::Error { message }) => Err(ListError::Upstream { status, message }),
        Err(e) => Err(ListError::Upstream {
            status,
            message: format!("unreadable gist listing: {}", e),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::{Path, Query};
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;
    use std::collections::HashMap;

    fn client(api_base: &str, list: ListOptions) -> GithubClient {
        GithubClient::new(api_base, Duration::from_secs(5), list).unwrap()
    }

    // A stand-in for api.github.com served from 127.0.0.1:<random port>
    //
    // - "octocat" has 5 gists, served honoring per_page/page
    // - "broken" makes the API answer 500
    // - everyone else is "Not Found"
    // - /raw/hello serves a file, /raw/missing answers 404
    async fn fake_upstream() -> String {
        async fn gists(Path(user): Path<String>, Query(query): Query<HashMap<String, String>>) -> Response {
            let per_page: usize = query.get("per_page").and_then(|v| v.parse().ok()).unwrap_or(30);
            let page: usize = query.get("page").and_then(|v| v.parse().ok()).unwrap_or(1);

            match user.as_str() {
                "octocat" => {
                    let all: Vec<_> = (1..=5)
                        .map(|n| {
                            json!({
                                "id": format!("g{}", n),
                                "html_url": format!("https://gist.github.com/g{}", n),
                                "files": {}
                            })
                        })
                        .collect();
                    let page_items: Vec<_> = all.into_iter().skip((page - 1) * per_page).take(per_page).collect();
                    Json(page_items).into_response()
                }
                "broken" => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"message": "Server Error"})),
                )
                    .into_response(),
                _ => (StatusCode::NOT_FOUND, Json(json!({"message": "Not Found"}))).into_response(),
            }
        }

        let app = Router::new()
            .route("/users/:user/gists", get(gists))
            .route("/raw/hello", get(|| async { "fn main() { println!(\"hello\"); }" }))
            .route("/raw/missing", get(|| async { StatusCode::NOT_FOUND }));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}", addr)
    }

    #[test]
    fn test_gists_url() {
        let c = client("https://api.github.com", ListOptions::default());
        assert_eq!(
            c.gists_url("octocat", 1).as_str(),
            "https://api.github.com/users/octocat/gists?per_page=30&page=1"
        );
    }

    #[test]
    fn test_gists_url_keeps_base_path_and_encodes_username() {
        let c = client("https://ghe.example.com/api/v3/", ListOptions { per_page: 100, max_pages: 3 });
        assert_eq!(
            c.gists_url("a/b c", 2).as_str(),
            "https://ghe.example.com/api/v3/users/a%2Fb%20c/gists?per_page=100&page=2"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let result = GithubClient::new("not a url", Duration::from_secs(1), ListOptions::default());
        assert!(matches!(result, Err(ClientError::InvalidBaseUrl { .. })));

        let result = GithubClient::new("mailto:someone@example.com", Duration::from_secs(1), ListOptions::default());
        assert!(matches!(result, Err(ClientError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn test_classify_not_found_message() {
        let result = classify_listing("ghost", 404, r#"{"message": "Not Found"}"#);
        assert_eq!(result, Err(ListError::UserNotFound("ghost".to_string())));

        // The message wins even if the status is odd
        let result = classify_listing("ghost", 200, r#"{"message": "Not Found"}"#);
        assert_eq!(result, Err(ListError::UserNotFound("ghost".to_string())));
    }

    #[test]
    fn test_classify_other_upstream_failures() {
        let result = classify_listing("octocat", 403, r#"{"message": "API rate limit exceeded"}"#);
        assert_eq!(
            result,
            Err(ListError::Upstream {
                status: 403,
                message: "API rate limit exceeded".to_string()
            })
        );

        let result = classify_listing("octocat", 502, "<html>Bad gateway</html>");
        assert!(matches!(result, Err(ListError::Upstream { status: 502, .. })));

        let result = classify_listing("octocat", 200, "{ not json");
        assert!(matches!(result, Err(ListError::Upstream { status: 200, .. })));
    }

    #[test]
    fn test_classify_success() {
        let body = r#"[{"id": "abc", "html_url": "https://gist.github.com/abc", "files": {}}]"#;
        let gists = classify_listing("octocat", 200, body).unwrap();
        assert_eq!(gists.len(), 1);
        assert_eq!(gists[0].id, "abc");

        assert_eq!(classify_listing("octocat", 200, "[]").unwrap(), Vec::new());
    }

    #[tokio::test]
    async fn test_connection_refused_is_connection_failed() {
        // Nothing listens on port 1
        let c = client("http://127.0.0.1:1", ListOptions::default());
        let result = c.list_gists("octocat").await;
        assert!(matches!(result, Err(ListError::ConnectionFailed(_))));

        let result = c.fetch_raw("http://127.0.0.1:1/raw/file.txt").await;
        assert!(matches!(result, Err(FetchError::Transport { .. })));
    }

    #[tokio::test]
    async fn test_list_reads_only_first_page_by_default() {
        let base = fake_upstream().await;
        let c = client(&base, ListOptions { per_page: 2, max_pages: 1 });

        let gists = c.list_gists("octocat").await.unwrap();
        let ids: Vec<_> = gists.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["g1", "g2"]);
    }

    #[tokio::test]
    async fn test_list_follows_pages_until_short_page() {
        let base = fake_upstream().await;

        let c = client(&base, ListOptions { per_page: 2, max_pages: 10 });
        let gists = c.list_gists("octocat").await.unwrap();
        let ids: Vec<_> = gists.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["g1", "g2", "g3", "g4", "g5"]);

        let c = client(&base, ListOptions { per_page: 2, max_pages: 2 });
        assert_eq!(c.list_gists("octocat").await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_list_unknown_and_failing_users() {
        let base = fake_upstream().await;
        let c = client(&base, ListOptions::default());

        let result = c.list_gists("nobody").await;
        assert_eq!(result, Err(ListError::UserNotFound("nobody".to_string())));

        let result = c.list_gists("broken").await;
        assert!(matches!(result, Err(ListError::Upstream { status: 500, .. })));
    }

    #[tokio::test]
    async fn test_fetch_raw() {
        let base = fake_upstream().await;
        let c = client(&base, ListOptions::default());

        let content = c.fetch_raw(&format!("{}/raw/hello", base)).await.unwrap();
        assert!(content.contains("println!"));

        let result = c.fetch_raw(&format!("{}/raw/missing", base)).await;
        assert!(matches!(result, Err(FetchError::Status { status: 404, .. })));
    }
}
