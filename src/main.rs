mod cli;
mod client;
mod config;
mod controller;
mod error;
mod model;
mod output;
mod transform;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;

use crate::cli::{Cli, Commands};
use crate::client::SearchClient;
use crate::config::AppConfig;
use crate::controller::{PendingSearch, PipelineState, StateController};
use crate::error::SearchError;
use crate::model::{Product, SortKey};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug {
        "minne_cli=debug"
    } else {
        "minne_cli=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    let config = AppConfig::load(cli.base_url, cli.timeout, cli.debug);

    ctrlc::set_handler(|| {
        eprintln!("\nInterrupted.");
        std::process::exit(130);
    })
    .context("Failed to set Ctrl+C handler")?;

    match cli.command {
        Commands::Search {
            keyword,
            sort,
            json,
        } => {
            cmd_search(&config, &keyword, sort.into(), json).await?;
        }
        Commands::Shell => {
            cmd_shell(&config).await?;
        }
    }

    Ok(())
}

async fn cmd_search(config: &AppConfig, keyword: &str, sort: SortKey, json: bool) -> Result<()> {
    let client = SearchClient::new(config)?;
    let mut controller = StateController::new(sort);

    let Some(pending) = controller.submit(keyword) else {
        anyhow::bail!("{}", SearchError::EmptyKeyword);
    };

    let outcome = client.search(&pending.keyword).await;
    controller.complete_fetch(&pending, outcome);

    if let PipelineState::Failed(err) = controller.state() {
        anyhow::bail!("{}", err);
    }

    let view = controller
        .view()
        .context("No result view after a successful fetch")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", output::format_result_view(&view));
    }

    Ok(())
}

/// Interactive session: stdin stays live while a fetch is in flight, so the
/// user can re-sort, clear, or fire a replacement search without waiting.
async fn cmd_shell(config: &AppConfig) -> Result<()> {
    let client = SearchClient::new(config)?;
    let mut controller = StateController::new(SortKey::ByPrice);

    println!("minne-cli shell — type a keyword to search.");
    println!("Commands: :sort price | :sort favorites | :clear | :quit");

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    type Fetch = (PendingSearch, JoinHandle<Result<Vec<Product>, SearchError>>);
    let mut in_flight: Option<Fetch> = None;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let input = line.trim().to_string();
                match input.as_str() {
                    ":quit" | ":q" => break,
                    ":clear" => {
                        controller.edit_keyword();
                        if let Some((_, handle)) = in_flight.take() {
                            handle.abort();
                        }
                        render(&controller);
                    }
                    ":sort price" => {
                        controller.set_sort_key(SortKey::ByPrice);
                        render(&controller);
                    }
                    ":sort favorites" => {
                        controller.set_sort_key(SortKey::ByFavoriteCount);
                        render(&controller);
                    }
                    "" => {}
                    keyword => {
                        match controller.submit(keyword) {
                            Some(pending) => {
                                let task_client = client.clone();
                                let task_keyword = pending.keyword.clone();
                                let handle = tokio::spawn(async move {
                                    task_client.search(&task_keyword).await
                                });
                                println!("Searching \"{}\"...", pending.keyword);
                                // Cancel-and-replace: a newer submit supersedes
                                // any fetch still in flight.
                                if let Some((_, old)) = in_flight.replace((pending, handle)) {
                                    old.abort();
                                }
                            }
                            None => render(&controller),
                        }
                    }
                }
            }
            outcome = async { (&mut in_flight.as_mut().unwrap().1).await }, if in_flight.is_some() => {
                let (pending, _) = in_flight.take().unwrap();
                let outcome = match outcome {
                    Ok(result) => result,
                    Err(join_err) => Err(SearchError::Network(join_err.to_string())),
                };
                controller.complete_fetch(&pending, outcome);
                render(&controller);
            }
        }
    }

    Ok(())
}

/// Print the state banner, then the retained listings (kept visible even
/// when the latest fetch failed).
fn render(controller: &StateController) {
    match controller.state() {
        PipelineState::Loading => println!("Loading..."),
        PipelineState::Failed(err) => println!("Error: {}", err),
        PipelineState::Idle | PipelineState::Success => {}
    }
    if let Some(view) = controller.view() {
        print!("{}", output::format_result_view(&view));
    }
}
