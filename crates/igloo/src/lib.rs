//! Library side of the `igloo` binary: argument parsing and the query command.

use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;
use clap::{Args, Parser, Subcommand};
use igloo_cache::ConnectionCache;
use igloo_common::ConnectionOptions;
use igloo_connector_supabase::{SupabaseConnection, API_KEY, PROJECT_URL};
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Select columns from a table and print them
    Query(QueryArgs),
}

#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    /// Name of the connection section in the settings file
    #[arg(short = 'n', long)]
    pub connection: String,

    #[arg(short, long)]
    pub table: String,

    /// `*` or a comma separated column list
    #[arg(long, default_value = "*")]
    pub columns: String,

    /// Settings file (defaults to $IGLOO_CONFIG_PATH, then igloo.toml)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Overrides `project_url` from the settings
    #[arg(long)]
    pub project_url: Option<String>,

    /// Overrides `api_key` from the settings
    #[arg(long)]
    pub api_key: Option<String>,
}

impl QueryArgs {
    /// Settings-file and environment options, with command line flags on top.
    pub fn resolve_options(&self) -> igloo_common::Result<ConnectionOptions> {
        let mut overrides = ConnectionOptions::new();
        if let Some(project_url) = &self.project_url {
            overrides.insert(PROJECT_URL, project_url);
        }
        if let Some(api_key) = &self.api_key {
            overrides.insert(API_KEY, api_key);
        }
        let settings = ConnectionOptions::from_settings(&self.connection, self.config.as_deref())?;
        Ok(settings.merge(overrides))
    }
}

/// Opens (or reuses) the named connection and runs the query.
///
/// Settings failures surface as [`igloo_common::Error`] and connector
/// failures as [`igloo_connector_supabase::SupabaseError`]; both can be
/// recovered with `downcast_ref`.
pub async fn run_query(
    cache: &ConnectionCache<SupabaseConnection>,
    args: &QueryArgs,
) -> anyhow::Result<RecordBatch> {
    let options = args.resolve_options()?;
    let connection = cache.get_or_open(&args.connection, &options).await?;
    info!(
        connection = %args.connection,
        table = %args.table,
        columns = %args.columns,
        "running query"
    );
    Ok(connection.query(&args.table, &args.columns).await?)
}

/// Formats `batch` as a text table followed by a row count.
pub fn render(batch: &RecordBatch) -> Result<String, ArrowError> {
    let table = pretty_format_batches(std::slice::from_ref(batch))?;
    Ok(format!("{}\n({} rows)", table, batch.num_rows()))
}
