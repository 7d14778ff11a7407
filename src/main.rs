use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use navpreload::config::Config;
use navpreload::logging::init_tracing;
use navpreload::ui::{App, LinkId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Click {
    /// Plain link to `/`
    Home,
    /// "Fetch Once" link, memoized data
    Once,
    /// "Refetch Every Time" link, fresh data per click
    Refresh,
    Back,
    Forward,
}

#[derive(Debug, Parser)]
#[command(name = "navpreload", version, about = "Preload route data before navigating")]
struct Cli {
    /// Config file (default: ~/.config/navpreload/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the simulated fetch latency
    #[arg(long)]
    latency_ms: Option<u64>,

    /// Delay between consecutive clicks
    #[arg(long, default_value_t = 0)]
    gap_ms: u64,

    /// Print the final frame as JSON
    #[arg(long)]
    json: bool,

    /// Clicks to perform, in order
    #[arg(value_enum, required = true)]
    clicks: Vec<Click>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load configuration")?;
    if let Some(latency_ms) = cli.latency_ms {
        config.loader.latency_ms = latency_ms;
    }
    config.validate()?;

    init_tracing(&config.logging);

    let app = App::from_config(&config.loader);
    let mut pending = Vec::new();

    for (i, click) in cli.clicks.iter().enumerate() {
        if i > 0 && cli.gap_ms > 0 {
            tokio::time::sleep(Duration::from_millis(cli.gap_ms)).await;
        }
        tracing::debug!(click = ?click, "Click");
        let clicked = match click {
            Click::Home => Ok(app.click(LinkId::Home)),
            Click::Once => Ok(app.click(LinkId::FetchOnce)),
            Click::Refresh => Ok(app.click(LinkId::RefetchEveryTime)),
            Click::Back => app.back().map(|_| None),
            Click::Forward => app.forward().map(|_| None),
        };
        match clicked {
            Ok(Some(handle)) => pending.push(handle),
            Ok(None) => {}
            Err(err) => tracing::warn!(click = ?click, error = %err, "Navigation ignored"),
        }
    }

    for handle in pending {
        match handle.await? {
            Ok(outcome) => tracing::debug!(
                token = outcome.token(),
                committed = outcome.is_committed(),
                "Transition settled"
            ),
            Err(err) => tracing::warn!(error = %err, "Transition failed"),
        }
    }

    let frame = app.settle().await.context("Failed to load route data")?;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&frame)?);
    } else {
        print!("{}", frame);
    }
    Ok(())
}
