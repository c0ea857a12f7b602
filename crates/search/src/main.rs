use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use marquee_core::ErrorEnvelope;
use marquee_core::error::ErrorBody;
use marquee_search::{SearchConfig, SearchError, SearchEvent, Searcher};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Search the site and print what comes back as JSON.
#[derive(Parser, Debug)]
#[command(name = "marquee", version)]
struct Cli {
    /// Search terms or a title id such as tt1127180.
    #[arg(required = true)]
    query: Vec<String>,

    /// Skip downloading thumbnail images.
    #[arg(long)]
    no_thumbnail: bool,

    /// Site root to search instead of the configured one.
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr so stdout stays valid JSON.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let query = cli.query.join(" ");
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let envelope = match e.downcast_ref::<SearchError>() {
                Some(search_error) => ErrorEnvelope::from_error(search_error)
                    .with_details(serde_json::json!({ "query": query })),
                None => ErrorEnvelope {
                    error: ErrorBody {
                        code: "internal".to_string(),
                        message: format!("{e:#}"),
                        details: serde_json::json!({}),
                    },
                },
            };
            match serde_json::to_string_pretty(&envelope) {
                Ok(json) => println!("{json}"),
                Err(_) => eprintln!("error: {e:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = SearchConfig::from_env();
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url.trim_end_matches('/').to_string();
    }
    if cli.no_thumbnail {
        config.fetch_thumbnails = false;
    }
    info!(base_url = %config.base_url, thumbnails = config.fetch_thumbnails, "starting search");

    let mut searcher = Searcher::new(config)?;
    searcher.add_observer(|event: &SearchEvent| -> anyhow::Result<()> {
        debug!(event = event.name(), url = event.url(), "search progress");
        Ok(())
    });

    let query = cli.query.join(" ");
    let Some(results) = searcher.search_query(&query).await? else {
        println!("null");
        return Ok(());
    };

    let json = serde_json::to_string_pretty(&results).context("failed to serialize results")?;
    println!("{json}");
    Ok(())
}
