//! Simulation binary for the Tessera board simulation.
//!
//! Wires the action engine and periodic driver together: loads
//! configuration, starts the driver, logs each tick's outcome and
//! snapshot, and shuts down cleanly on the tick limit, a driver failure,
//! or Ctrl-C.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `tessera-config.yaml`
//! 3. Build the driver with a logging tick callback
//! 4. Start the periodic driver
//! 5. Wait for the run to end (tick limit, failure, or Ctrl-C)
//! 6. Demonstrate the direct tap interaction on the stopped board
//! 7. Log the end reason and the final board snapshot

mod error;

use std::path::Path;

use tessera_core::config::SimulationConfig;
use tessera_core::driver::{Driver, EndReason, TickCallback};
use tessera_core::engine::StepOutcome;
use tessera_types::BoardSnapshot;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::AppError;

/// Tick callback that logs each step outcome and board size.
struct LoggingCallback;

impl TickCallback for LoggingCallback {
    fn on_tick(&mut self, outcome: &StepOutcome, snapshot: &BoardSnapshot) {
        info!(
            tick = snapshot.tick,
            cells = snapshot.cells.len(),
            outcome = ?outcome,
            "tick completed"
        );
    }
}

/// Application entry point for the simulation binary.
///
/// # Errors
///
/// Returns an error if configuration loading or validation fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration first so the logging filter can honor it.
    let config = load_config()?;
    config.validate().map_err(AppError::from)?;

    // 2. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!("tessera-engine starting");
    info!(
        growth_threshold = config.board.growth_threshold,
        value_draw_max = config.board.value_draw_max,
        red_multiplier = config.board.red_multiplier,
        tick_interval_ms = config.driver.tick_interval_ms,
        max_ticks = config.driver.max_ticks,
        "Configuration loaded"
    );

    // 3. Build the driver.
    let driver = Driver::with_callback(&config, Box::new(LoggingCallback));

    // 4. Start the periodic driver.
    let started = driver.start();
    info!(started, "Periodic driver start requested");

    // 5. Wait for the run to end. An unlimited run (max_ticks = 0) ends
    //    only on Ctrl-C; a bounded one also ends at the tick limit or on
    //    an engine failure.
    tokio::select! {
        () = driver.wait_until_stopped() => {}
        result = tokio::signal::ctrl_c() => {
            if let Err(err) = result {
                warn!(error = %err, "failed to listen for Ctrl-C");
            }
            info!("Ctrl-C received, stopping driver");
            let _ = driver.stop();
            driver.wait_until_stopped().await;
        }
    }

    // 6. Log the end reason and the final snapshot.
    let end_reason = driver.end_reason().await;
    match end_reason {
        Some(EndReason::Failed { ref message }) => {
            warn!(message = %message, "Run ended on engine failure");
        }
        Some(ref reason) => {
            info!(reason = ?reason, "Run ended");
        }
        None => warn!("Run ended without a recorded reason"),
    }

    // With the driver stopped, taps are accepted again; demonstrate the
    // direct absorb interaction on the second cell when one exists.
    if driver.snapshot().await.cells.len() > 1 {
        match driver.tap(1).await {
            Ok(outcome) => info!(index = 1, outcome = ?outcome, "tap applied"),
            Err(err) => warn!(error = %err, "tap rejected"),
        }
    }

    let snapshot = driver.snapshot().await;
    info!(
        tick = snapshot.tick,
        cells = snapshot.cells.len(),
        elapsed_seconds = driver.elapsed_seconds(),
        "Final board state"
    );
    for (index, view) in snapshot.cells.iter().enumerate() {
        info!(
            index,
            value = view.value,
            color = ?view.color,
            is_last = view.is_last,
            "cell"
        );
    }

    Ok(())
}

/// Load configuration from `tessera-config.yaml`, falling back to
/// defaults when the file does not exist.
fn load_config() -> Result<SimulationConfig, AppError> {
    let config_path = Path::new("tessera-config.yaml");
    if config_path.exists() {
        let config = SimulationConfig::from_file(config_path)?;
        Ok(config)
    } else {
        Ok(SimulationConfig::default())
    }
}
