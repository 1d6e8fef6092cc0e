//! Tripsplit command-line report.
//!
//! Loads a trip snapshot, validates every expense, and prints the balances
//! and the transfers that settle them.
//!
//! Usage: tripsplit [trip.json]

mod report;
mod snapshot;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tripsplit_shared::config::LogConfig;
use tripsplit_shared::{AppConfig, AppError, AppResult};

fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Tracing starts before config errors are reported
    let config = AppConfig::load().map_err(AppError::from);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter(&config).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match config.map_err(anyhow::Error::from).and_then(|config| run(&config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            eprintln!("error: {err:#}");
            let code = err
                .downcast_ref::<AppError>()
                .map_or(1, AppError::exit_code);
            ExitCode::from(code)
        }
    }
}

/// Filter directive from configuration, or the built-in default when the
/// configuration failed to load.
fn log_filter(config: &AppResult<AppConfig>) -> String {
    config.as_ref().map_or_else(
        |_| LogConfig::default().filter,
        |config| config.log.filter.clone(),
    )
}

fn run(config: &AppConfig) -> anyhow::Result<()> {
    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| config.input.path.clone())
        .ok_or_else(|| {
            AppError::Input("no trip file given (pass a path or set TRIPSPLIT__INPUT__PATH)".into())
        })?;

    let snapshot = snapshot::load(&path)
        .with_context(|| format!("Failed to load trip from {}", path.display()))?;
    let (trip, rejected) = snapshot.into_trip(&config.ledger.default_currency)?;
    info!(
        trip = %trip.name,
        participants = trip.participants().len(),
        expenses = trip.expenses().len(),
        skipped = rejected.len(),
        "Trip loaded"
    );

    print!(
        "{}",
        report::render(&trip, &rejected, config.ledger.recent_expenses_limit)
    );
    Ok(())
}
