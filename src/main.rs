//! college-cost server binary.
//!
//! Run with:
//!   RUST_LOG=info college-cost --dataset college_costs.csv --bind 0.0.0.0:3000
//!
//! Try:
//!   curl 'http://localhost:3000/lookup?college=Test%20U'
//!   curl 'http://localhost:3000/lookup?college=Test%20U&room_and_board=false'
//!   curl http://localhost:3000/readyz

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use college_cost::config::{Config, LogFormat};
use college_cost::{CollegeDirectory, Server, app};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    init_tracing(config.log_format);

    info!(dataset = %config.dataset.display(), "loading college directory");
    let dataset = config.dataset.clone();
    let directory = tokio::task::spawn_blocking(move || CollegeDirectory::load(dataset))
        .await
        .context("dataset loader panicked")?
        .context("loading college directory")?;

    Server::bind(config.bind)
        .serve(app::router(Arc::new(directory)))
        .await
        .with_context(|| format!("serving on {}", config.bind))
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);
    match format {
        LogFormat::Pretty => builder.compact().init(),
        LogFormat::Json => builder.json().init(),
    }
}
