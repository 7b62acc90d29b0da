//! Entry point for the Hours Engine binary.
//!
//! Running this binary starts an HTTP server exposing the totals and
//! worked-time calculators plus read access to the stored timesheets.
//! See [`hours_engine::config::Config`] for the `HOURS_*` settings;
//! log verbosity follows `RUST_LOG`.

use hours_engine::{api, config::Config};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hours_engine=info")),
        )
        .init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "invalid configuration");
            std::process::exit(1);
        }
    };
    if let Err(err) = api::serve(&config).await {
        error!(error = ?err, "error running server");
        std::process::exit(1);
    }
}
