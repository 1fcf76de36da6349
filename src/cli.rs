// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Two subcommands:
// - serve: run the HTTP API (/ping and /api/v1/search)
// - search: run one search from the terminal and print the JSON result
//
// Every tuning flag can also come from an environment variable, which is
// handy when the server runs in a container.
//
// Rust concepts:
// - Derive macros: clap generates the parser from these structs
// - #[command(flatten)]: Share one group of flags between subcommands
// =============================================================================

use clap::{Args, Parser, Subcommand};
use std::net::IpAddr;
use std::time::Duration;

use gist_search::github::{ListOptions, DEFAULT_API_BASE};
use gist_search::search::SearchOptions;

#[derive(Parser, Debug)]
#[command(
    name = "gist-search",
    version,
    about = "Search a GitHub user's public gists with a regular expression",
    long_about = "gist-search lists a user's public gists, downloads every file and reports \
                  the gists whose content matches a regular expression. Run it as an HTTP \
                  service with `serve` or once from the terminal with `search`."
)]
pub struct Cli {
    /// Log level or filter directives (RUST_LOG takes precedence)
    #[arg(long, global = true, default_value = "info", env = "GIST_SEARCH_LOG_LEVEL")]
    pub log_level: String,

    /// Emit logs as JSON lines
    #[arg(long, global = true, env = "GIST_SEARCH_JSON_LOGS")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API
    ///
    /// Example: gist-search serve --port 9876
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "0.0.0.0", env = "GIST_SEARCH_HOST")]
        host: IpAddr,

        /// Port to listen on
        #[arg(long, default_value_t = 9876, env = "GIST_SEARCH_PORT")]
        port: u16,

        #[command(flatten)]
        search: SearchArgs,
    },

    /// Search one user's gists and print the result as JSON
    ///
    /// Example: gist-search search octocat 'def\s+initialize'
    /// Exit code: 0 = search succeeded, 1 = search reported a failure status
    Search {
        /// GitHub username whose public gists are searched
        username: String,

        /// Regular expression looked for in every gist file
        pattern: String,

        /// Pretty-print the JSON result
        #[arg(long)]
        pretty: bool,

        #[command(flatten)]
        search: SearchArgs,
    },
}

/// Flags shared by `serve` and `search`.
#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Root of the GitHub API
    #[arg(long, default_value = DEFAULT_API_BASE, env = "GIST_SEARCH_API_BASE")]
    pub api_base: String,

    /// Maximum number of gist files fetched at the same time
    #[arg(
        long,
        default_value_t = 8,
        value_parser = clap::value_parser!(u32).range(1..),
        env = "GIST_SEARCH_CONCURRENCY"
    )]
    pub concurrency: u32,

    /// Seconds one search may take before it reports `timeout` (0 = no limit)
    #[arg(long, default_value_t = 30, env = "GIST_SEARCH_DEADLINE_SECS")]
    pub deadline_secs: u64,

    /// Seconds a single upstream request may take
    #[arg(
        long,
        default_value_t = 10,
        value_parser = clap::value_parser!(u64).range(1..),
        env = "GIST_SEARCH_HTTP_TIMEOUT_SECS"
    )]
    pub http_timeout_secs: u64,

    /// Gists requested per listing page
    #[arg(
        long,
        default_value_t = 30,
        value_parser = clap::value_parser!(u32).range(1..=100),
        env = "GIST_SEARCH_PER_PAGE"
    )]
    pub per_page: u32,

    /// Listing pages read at most (1 = only the first page)
    #[arg(
        long,
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(1..),
        env = "GIST_SEARCH_MAX_PAGES"
    )]
    pub max_pages: u32,
}

impl SearchArgs {
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            concurrency: self.concurrency as usize,
            deadline: match self.deadline_secs {
                0 => None,
                secs => Some(Duration::from_secs(secs)),
            },
        }
    }

    pub fn list_options(&self) -> ListOptions {
        ListOptions {
            per_page: self.per_page,
            max_pages: self.max_pages,
        }
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}
