use std::{fs, path::PathBuf, time::Duration};

use monitor_core::{LedIntent, Mode, STARTUP_WINDOW_SECS, TICK_INTERVAL_SECS};

use crate::actions::Actions;

/// Well-known path of the deferred factory-reset marker. Presence means
/// "perform a factory reset on the next boot"; no content is read.
pub const DEFAULT_MARKER_PATH: &str = "/opt/monitors/fc-set";

/// Outcome of the start-up sequencing: how long until the first tick and
/// which mode the monitor starts in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StartupPlan {
    pub initial_tick_delay: Duration,
    pub mode: Mode,
}

/// The persisted-flag gate. Owns the durable marker and nothing else.
#[derive(Debug)]
pub struct ResetMarker {
    path: PathBuf,
    consumed: bool,
}

impl ResetMarker {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            consumed: false,
        }
    }

    /// Persists the marker for the next boot. Best effort: a failure here
    /// means the deferred reset is lost, which the operator can retry, so
    /// it is logged and not propagated.
    pub fn set(&self) {
        if let Some(parent) = self.path.parent() {
            if let Err(error) = fs::create_dir_all(parent) {
                tracing::warn!("failed to create marker directory: {error}");
            }
        }

        match fs::File::create(&self.path) {
            Ok(_) => tracing::info!("factory reset scheduled for next boot"),
            Err(error) => tracing::warn!("failed to persist factory reset marker: {error}"),
        }
    }

    /// Consumes the marker at most once per process. Returns whether a
    /// deferred reset was pending.
    ///
    /// A failed unlink is tolerated: we proceed as if consumed and the
    /// reset re-triggers on the next boot, which the idempotent helper
    /// absorbs. The `consumed` latch keeps a repeated call on the same boot
    /// from resetting twice even in that case.
    fn consume(&mut self) -> bool {
        if self.consumed || !self.path.exists() {
            return false;
        }

        self.consumed = true;
        if let Err(error) = fs::remove_file(&self.path) {
            tracing::warn!(
                "failed to delete factory reset marker, reset will re-trigger next boot: {error}"
            );
        }

        true
    }

    /// Start-up sequencing: either consume a pending deferred reset and go
    /// straight to `InUse`, or open the 10-second window where a short
    /// press factory-resets the board.
    pub fn resolve_startup(&mut self, actions: &impl Actions) -> StartupPlan {
        if self.consume() {
            tracing::info!("factory reset marker present, performing factory reset");
            actions.factory_reset(true);
            actions.set_led(LedIntent::FlashGreen);

            StartupPlan {
                initial_tick_delay: Duration::from_secs(TICK_INTERVAL_SECS),
                mode: Mode::InUse,
            }
        } else {
            tracing::info!("start-up mode, press the push-button for a factory reset");
            actions.set_led(LedIntent::Red);

            StartupPlan {
                initial_tick_delay: Duration::from_secs(STARTUP_WINDOW_SECS),
                mode: Mode::Startup,
            }
        }
    }
}
