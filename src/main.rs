// src/main.rs
use anyhow::Result;
use clap::Parser;
use navscraper::{fetch, parse_nav_file};
use reqwest::Client;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "navscraper")]
#[command(about = "Download the daily AMFI NAV report and print per-sub-type fund counts")]
struct Args {
    /// Parse a saved NAVAll.txt instead of downloading
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Print the full hierarchy as JSON instead of the summary
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let args = Args::parse();

    // ─── 2) obtain the raw report ────────────────────────────────────
    let raw = match &args.file {
        Some(path) => fetch::read_nav_file(path).await?,
        None => fetch::fetch_nav_all(&Client::new()).await?,
    };

    // ─── 3) parse off the async runtime ──────────────────────────────
    let hierarchy = tokio::task::spawn_blocking(move || parse_nav_file(&raw)).await??;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&hierarchy)?);
        return Ok(());
    }

    // ─── 4) per-sub-type counts and grand total ──────────────────────
    let mut total = 0usize;
    for (scheme_type, sub_types) in hierarchy.scheme_types() {
        for (sub_type, houses) in sub_types {
            let count: usize = houses.values().map(Vec::len).sum();
            total += count;
            info!("{scheme_type} {sub_type} {count}");
        }
    }
    info!("total funds: {total}");

    Ok(())
}
