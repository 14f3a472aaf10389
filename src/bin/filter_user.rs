//! Filter the whole product pool for one user and write
//! `result_<user_id>.jsonl` and `result_<user_id>.json`.

use anyhow::Context;
use clap::Parser;
use product_filter::config::Settings;
use product_filter::core::{FilterError, Orchestrator};
use product_filter::services::{JsonFileStore, ResultWriter, StoreError};
use product_filter::{build_decision_client, logging};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "filter-user", about = "Run the product filter for a single user")]
struct Args {
    /// User to filter for
    #[arg(long)]
    user_id: String,

    /// Users file (defaults to data.users_path)
    #[arg(long)]
    users: Option<PathBuf>,

    /// Products file (defaults to data.products_path)
    #[arg(long)]
    products: Option<PathBuf>,

    /// Directory receiving the result files (defaults to data.output_dir)
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Configuration file to use instead of config/default + config/local
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("error: {:#}", e);
            match e.downcast_ref::<FilterError>() {
                Some(FilterError::Store(StoreError::NotFound(_))) => ExitCode::from(2),
                _ => ExitCode::FAILURE,
            }
        }
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let settings = match &args.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    }
    .context("loading configuration")?;

    logging::init_tracing(&settings.logging);

    let users = args
        .users
        .unwrap_or_else(|| PathBuf::from(&settings.data.users_path));
    let products = args
        .products
        .unwrap_or_else(|| PathBuf::from(&settings.data.products_path));
    let out_dir = args
        .out_dir
        .unwrap_or_else(|| PathBuf::from(&settings.data.output_dir));

    tracing::info!("Users file: {}", users.display());
    tracing::info!("Products file: {}", products.display());

    let client = build_decision_client(&settings.llm)?;
    let orchestrator = Orchestrator::new(Arc::new(client));
    let store = JsonFileStore::new(users, products);
    let writer = ResultWriter::new(out_dir);

    let report = orchestrator
        .run_for_user(&args.user_id, &store, &writer)
        .await?;

    tracing::info!(
        "Done: {} records for {}",
        report.records.len(),
        args.user_id
    );

    Ok(())
}
