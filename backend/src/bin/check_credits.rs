//! Evaluate the credits admission rule against a JSON snapshot.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use reservations::domain::ports::{FixtureCreditsFeatureFlag, MessageFormatter};
use reservations::outbound::config::{CreditsSettings, OrthoCreditsFeatureFlag};
use reservations::outbound::localization::ResourceStrings;
use reservations::snapshot::CreditsSnapshot;
use tokio::runtime::Builder;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

/// Exit status when a lookup fails and no verdict is reached.
const NO_VERDICT: u8 = 2;

/// `check-credits` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "check-credits",
    about = "Check whether a reservation snapshot passes credits admission",
    version
)]
struct CliArgs {
    /// Path to a JSON snapshot of user balances and one reservation.
    #[arg(long = "snapshot", value_name = "path")]
    snapshot: PathBuf,
    /// Enforce credit checks regardless of `CREDITS_ENABLED`.
    #[arg(long = "enforce")]
    enforce: bool,
}

fn main() -> io::Result<ExitCode> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .json()
        .try_init()
    {
        eprintln!("tracing init failed: {e}");
    }

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<ExitCode> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let snapshot = CreditsSnapshot::from_path(&args.snapshot).map_err(io::Error::other)?;
    let formatter = load_formatter()?;

    let evaluated = if args.enforce {
        snapshot
            .evaluate(Arc::new(FixtureCreditsFeatureFlag::enabled()), formatter)
            .await
    } else {
        snapshot
            .evaluate(Arc::new(OrthoCreditsFeatureFlag), formatter)
            .await
    };
    let outcome = match evaluated {
        Ok(outcome) => outcome,
        Err(error) => {
            warn!(code = ?error.code(), %error, "credits check reached no verdict");
            let body = serde_json::to_string(&error).map_err(io::Error::other)?;
            println!("{body}");
            return Ok(ExitCode::from(NO_VERDICT));
        }
    };

    info!(
        series_id = %snapshot.series().series_id(),
        valid = outcome.is_valid,
        "credits check finished"
    );

    if outcome.is_valid {
        println!("valid");
        return Ok(ExitCode::SUCCESS);
    }
    for error in &outcome.errors {
        println!("{error}");
    }
    Ok(ExitCode::FAILURE)
}

fn load_formatter() -> io::Result<Arc<dyn MessageFormatter>> {
    let settings = match CreditsSettings::load_ambient() {
        Ok(settings) => settings,
        Err(error) => {
            warn!(%error, "credits settings unavailable; using built-in messages");
            return Ok(Arc::new(ResourceStrings::en_gb()));
        }
    };
    let Some(path) = settings.catalogue_path else {
        return Ok(Arc::new(ResourceStrings::en_gb()));
    };
    let strings = ResourceStrings::from_path(&path).map_err(io::Error::other)?;
    info!(locale = strings.locale(), path = %path.display(), "loaded message catalogue");
    Ok(Arc::new(strings))
}
