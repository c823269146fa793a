//! The periodic driver: a tokio task applying one engine step per tick.
//!
//! The driver owns the shared simulation state (board + tick counter) and
//! serializes every mutation through one async mutex: the tick task and the
//! direct tap interaction never overlap, even on a multi-threaded runtime.
//!
//! # Control semantics
//!
//! - `start` and `stop` are idempotent; each returns whether it had effect.
//! - On any engine error the tick task records [`EndReason::Failed`] and
//!   exits before mutating further (fail-stop, never fail-continue). The
//!   recorded reason carries the error description for a user-facing alert.
//! - A `max_ticks` bound (0 = unlimited) stops a run with
//!   [`EndReason::TickLimitReached`].
//! - Taps are ignored while the driver is running and applied only while it
//!   is stopped.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};
use tessera_board::{Board, BoardError};
use tessera_types::BoardSnapshot;
use tokio::sync::{Mutex, Notify};
use tracing::{error, info};

use crate::config::SimulationConfig;
use crate::engine::{ActionEngine, StepOutcome};

/// Reason why a driver run ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// An explicit stop request ended the run.
    Stopped,
    /// The configured tick limit was reached.
    TickLimitReached,
    /// The action engine failed; the driver stopped itself before any
    /// further mutation.
    Failed {
        /// Description of the engine failure, for user-facing display.
        message: String,
    },
}

/// Outcome of a tap request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// The absorb operation was applied at the tapped index.
    Applied,
    /// The tap was ignored because the periodic driver is running.
    IgnoredWhileRunning,
}

/// Callback invoked after each successful tick.
///
/// Implementations can use this to forward snapshots to a presentation
/// layer, log progress, collect metrics, etc.
pub trait TickCallback: Send {
    /// Called after a tick completes successfully.
    fn on_tick(&mut self, outcome: &StepOutcome, snapshot: &BoardSnapshot);
}

/// A no-op tick callback for headless runs and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpCallback;

impl TickCallback for NoOpCallback {
    fn on_tick(&mut self, _outcome: &StepOutcome, _snapshot: &BoardSnapshot) {}
}

/// The mutable simulation state guarded by the driver's mutex.
#[derive(Debug)]
struct SharedState {
    /// The board being mutated.
    board: Board,
    /// Number of ticks executed since construction.
    tick: u64,
}

/// State shared between the [`Driver`] handle and its tick task.
struct DriverShared {
    /// Board and tick counter; every mutation goes through this mutex.
    state: Mutex<SharedState>,
    /// The action engine (immutable once built).
    engine: ActionEngine,
    /// Callback invoked after each successful tick.
    callback: Mutex<Box<dyn TickCallback>>,
    /// Whether a tick task is currently running.
    running: AtomicBool,
    /// Whether a stop has been requested for the current run.
    stop_requested: AtomicBool,
    /// Wakes the tick task out of its interval sleep on stop.
    stop_notify: Notify,
    /// Wakes waiters when the tick task exits.
    stopped_notify: Notify,
    /// Reason the most recent run ended, if any run has ended.
    end_reason: Mutex<Option<EndReason>>,
    /// Real-time milliseconds between ticks.
    tick_interval_ms: u64,
    /// Maximum number of ticks to run (0 = unlimited).
    max_ticks: u64,
}

/// Handle to the periodic driver.
///
/// Construct once per screen lifetime; `start`/`stop` may be called any
/// number of times. The board starts empty and survives across runs.
pub struct Driver {
    /// State shared with the tick task.
    shared: Arc<DriverShared>,
    /// Wall-clock time the driver was constructed.
    started_at: DateTime<Utc>,
}

impl Driver {
    /// Create a driver with a no-op tick callback.
    pub fn new(config: &SimulationConfig) -> Self {
        Self::with_callback(config, Box::new(NoOpCallback))
    }

    /// Create a driver that invokes `callback` after each successful tick.
    pub fn with_callback(config: &SimulationConfig, callback: Box<dyn TickCallback>) -> Self {
        Self {
            shared: Arc::new(DriverShared {
                state: Mutex::new(SharedState {
                    board: Board::new(),
                    tick: 0,
                }),
                engine: ActionEngine::new(config),
                callback: Mutex::new(callback),
                running: AtomicBool::new(false),
                stop_requested: AtomicBool::new(false),
                stop_notify: Notify::new(),
                stopped_notify: Notify::new(),
                end_reason: Mutex::new(None),
                tick_interval_ms: config.driver.tick_interval_ms,
                max_ticks: config.driver.max_ticks,
            }),
            started_at: Utc::now(),
        }
    }

    /// Start the periodic tick task.
    ///
    /// Idempotent: returns `false` and does nothing if a task is already
    /// running.
    pub fn start(&self) -> bool {
        if self.shared.running.swap(true, Ordering::AcqRel) {
            return false;
        }
        self.shared.stop_requested.store(false, Ordering::Release);
        let shared = Arc::clone(&self.shared);
        tokio::spawn(run_tick_task(shared));
        true
    }

    /// Request the current run to stop.
    ///
    /// Idempotent: returns `false` and does nothing if no task is running.
    /// The task exits promptly, without executing another tick.
    pub fn stop(&self) -> bool {
        if !self.shared.running.load(Ordering::Acquire) {
            return false;
        }
        self.shared.stop_requested.store(true, Ordering::Release);
        self.shared.stop_notify.notify_one();
        true
    }

    /// Whether a tick task is currently running.
    pub fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::Acquire)
    }

    /// Wait until no tick task is running.
    ///
    /// Returns immediately if the driver is stopped.
    pub async fn wait_until_stopped(&self) {
        while self.shared.running.load(Ordering::Acquire) {
            self.shared.stopped_notify.notified().await;
        }
    }

    /// Apply the direct absorb interaction at `index`.
    ///
    /// Ignored while the periodic driver is running; otherwise forwards to
    /// the board through the same mutex that serializes tick mutations.
    /// Index 0 is a defined no-op.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::IndexOutOfBounds`] if `index` is nonzero and
    /// past the end of the board.
    pub async fn tap(&self, index: usize) -> Result<TapOutcome, BoardError> {
        if self.is_running() {
            return Ok(TapOutcome::IgnoredWhileRunning);
        }
        let mut state = self.shared.state.lock().await;
        state.board.absorb_previous(index)?;
        Ok(TapOutcome::Applied)
    }

    /// Take an ordered snapshot of the board for rendering.
    pub async fn snapshot(&self) -> BoardSnapshot {
        let state = self.shared.state.lock().await;
        state.board.snapshot(state.tick)
    }

    /// The reason the most recent run ended, if any run has ended.
    pub async fn end_reason(&self) -> Option<EndReason> {
        self.shared.end_reason.lock().await.clone()
    }

    /// Wall-clock time the driver was constructed.
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Whole seconds elapsed since the driver was constructed.
    pub fn elapsed_seconds(&self) -> u64 {
        let delta = Utc::now().signed_duration_since(self.started_at);
        u64::try_from(delta.num_seconds()).unwrap_or(0)
    }
}

/// The tick task: sleep one interval, apply one engine step, repeat.
async fn run_tick_task(shared: Arc<DriverShared>) {
    shared.end_reason.lock().await.take();
    info!(
        interval_ms = shared.tick_interval_ms,
        max_ticks = shared.max_ticks,
        "periodic driver started"
    );

    let interval = Duration::from_millis(shared.tick_interval_ms);
    let mut rng = SmallRng::from_os_rng();

    let reason = loop {
        let mut interval_elapsed = false;
        tokio::select! {
            () = shared.stop_notify.notified() => {}
            () = tokio::time::sleep(interval) => {
                interval_elapsed = true;
            }
        }
        if shared.stop_requested.swap(false, Ordering::AcqRel) {
            break EndReason::Stopped;
        }
        if !interval_elapsed {
            // Woken without a pending stop request (e.g. a stale permit
            // from a previous run); resume sleeping.
            continue;
        }

        let mut state = shared.state.lock().await;
        match shared.engine.step(&mut state.board, &mut rng) {
            Ok(outcome) => {
                state.tick = state.tick.saturating_add(1);
                let snapshot = state.board.snapshot(state.tick);
                drop(state);

                shared.callback.lock().await.on_tick(&outcome, &snapshot);

                if shared.max_ticks > 0 && snapshot.tick >= shared.max_ticks {
                    break EndReason::TickLimitReached;
                }
            }
            Err(err) => {
                drop(state);
                error!(error = %err, "engine step failed, stopping driver");
                break EndReason::Failed {
                    message: err.to_string(),
                };
            }
        }
    };

    info!(reason = ?reason, "periodic driver stopped");
    shared.end_reason.lock().await.replace(reason);
    shared.running.store(false, Ordering::Release);
    shared.stopped_notify.notify_one();
}
