// src/main.rs
// =============================================================================
// This is the entry point of the gist-search binary.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging
// 3. Build the GitHub client and the search aggregator
// 4. Either serve the HTTP API or run a single search
// 5. Exit with proper code (0 = ok, 1 = search reported a failure, 2 = error)
// =============================================================================

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, SearchArgs};
use std::net::SocketAddr;
use std::sync::Arc;

use gist_search::github::GithubClient;
use gist_search::logging;
use gist_search::search::{SearchAggregator, SearchRequest};
use gist_search::server::{self, AppState};

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    logging::init(&cli.log_level, cli.json_logs)?;

    match cli.command {
        Commands::Serve { host, port, search } => {
            let aggregator = build_aggregator(&search)?;
            server::serve(SocketAddr::new(host, port), AppState::new(aggregator)).await?;
            Ok(0)
        }
        Commands::Search {
            username,
            pattern,
            pretty,
            search,
        } => handle_search(username, pattern, pretty, &search).await,
    }
}

// Wires the reqwest-backed client into a search aggregator
fn build_aggregator(args: &SearchArgs) -> Result<SearchAggregator> {
    let client = GithubClient::new(&args.api_base, args.http_timeout(), args.list_options())
        .context("could not set up the GitHub client")?;

    Ok(SearchAggregator::new(Arc::new(client), args.search_options()))
}

// Handles the 'search' subcommand
async fn handle_search(username: String, pattern: String, pretty: bool, args: &SearchArgs) -> Result<i32> {
    let aggregator = build_aggregator(args)?;
    let result = aggregator.search(SearchRequest::new(username, pattern)).await;

    let output = if pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    println!("{}", output);

    Ok(if result.is_success() { 0 } else { 1 })
}
