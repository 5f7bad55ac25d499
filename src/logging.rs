//! Per-run logging
//!
//! Each run owns its logging sink: a console layer plus a file layer writing
//! `logs/experiment.log` inside the run directory. The sink is installed as
//! a scoped default and torn down when the returned guard drops, so two runs
//! in one process never share handlers.

use std::fs::File;
use std::sync::Mutex;

use tracing::subscriber::DefaultGuard;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

use crate::experiment::OutputLayout;
use crate::Result;

/// Keeps the per-run sink installed; dropping it restores the previous one.
pub struct RunLogGuard {
    _default: DefaultGuard,
}

/// Install the per-run logging sink for the given output layout.
///
/// Honors `RUST_LOG`, defaulting to `info`. The file layer records targets
/// and timestamps; the console layer stays terse.
///
/// # Errors
///
/// Returns an error if the log file cannot be created.
pub fn init_run_logging(layout: &OutputLayout) -> Result<RunLogGuard> {
    let file = File::create(layout.log_path())?;
    let subscriber = tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .with(fmt::layer().with_target(false).without_time());

    Ok(RunLogGuard {
        _default: tracing::subscriber::set_default(subscriber),
    })
}
