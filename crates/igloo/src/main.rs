use anyhow::Result;
use clap::Parser;
use igloo::{render, run_query, Cli, Command};
use igloo_cache::ConnectionCache;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const LOG_TARGETS: [&str; 4] = [
    "igloo",
    "igloo_common",
    "igloo_cache",
    "igloo_connector_supabase",
];

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = LOG_TARGETS
        .iter()
        .map(|target| format!("{target}={}", cli.log_level))
        .collect::<Vec<_>>()
        .join(",");
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Command::Query(args) => {
            let cache = ConnectionCache::new();
            let batch = run_query(&cache, &args).await?;
            println!("{}", render(&batch)?);
        }
    }

    Ok(())
}
