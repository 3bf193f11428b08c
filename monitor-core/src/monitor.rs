use core::time::Duration;

use thiserror::Error as ThisError;

use crate::{Band, Effect, Effects, LedIntent, Mode, Timestamp};

/// The push-button state machine: mode controller, press window and
/// decision table in one place.
///
/// This is the single owner of the process-wide `Mode` and press state.
/// The daemon routes button edges and tick firings through it from one
/// poll loop, so every mutation is linearized without further locking.
#[derive(Clone, Copy, Debug)]
pub struct PushButtonMonitor {
    mode: Mode,
    press: Option<Timestamp>,
}

impl PushButtonMonitor {
    /// The persisted-flag gate decides the starting mode: `Startup` opens
    /// the immediate-reset window, `InUse` skips it when a deferred reset
    /// was just consumed.
    #[must_use]
    pub const fn with_mode(mode: Mode) -> Self {
        Self { mode, press: None }
    }

    #[inline]
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[inline]
    #[must_use]
    pub fn press_in_progress(&self) -> bool {
        self.press.is_some()
    }

    /// Duration the button has been held so far, `None` when no press is
    /// in progress.
    #[must_use]
    pub fn current_elapsed(&self, now: Timestamp) -> Option<Duration> {
        self.press.map(|start| now.elapsed_since(start))
    }

    /// Records a down edge. A repeated down edge without an intervening up
    /// edge overwrites the window rather than queueing a second press.
    pub fn press_began(&mut self, now: Timestamp) {
        self.press = Some(now);
    }

    /// Handles an up edge: picks the terminal action for the measured hold
    /// duration and returns to the heartbeat LED.
    ///
    /// The press window is cleared on every call, including the error
    /// paths.
    ///
    /// # Errors
    ///
    /// [`ReleaseError::NoPressInProgress`] when no down edge was observed,
    /// [`ReleaseError::ZeroElapsed`] when the measured duration is zero.
    /// Neither produces a terminal action.
    pub fn press_ended(&mut self, now: Timestamp) -> Result<Effects, ReleaseError> {
        let start = self.press.take().ok_or(ReleaseError::NoPressInProgress)?;
        let elapsed = now.elapsed_since(start);

        if elapsed.is_zero() {
            return Err(ReleaseError::ZeroElapsed);
        }

        let mut effects = Effects::new();

        match Band::from_elapsed(elapsed) {
            Band::Short if self.mode == Mode::Startup => {
                self.mode = Mode::InUse;
                effects.push(Effect::FactoryReset { perform: true }).ok();
            }
            Band::Short => {
                effects.push(Effect::Reboot).ok();
            }
            // Mode is not consulted at 5s and above.
            Band::ScheduleReset => {
                effects.push(Effect::ScheduleFactoryReset).ok();
            }
            Band::PowerDown => {
                effects.push(Effect::PowerDown).ok();
            }
            Band::Cancel => {}
        }

        effects.push(Effect::Led(LedIntent::FlashGreen)).ok();
        Ok(effects)
    }

    /// Handles a periodic tick firing.
    ///
    /// The first firing in `Startup` performs the one-time transition to
    /// `InUse`: heartbeat LED plus the factory-reset helper's validate-only
    /// initialization call. Subsequent firings are mode no-ops. Every firing
    /// re-emits the held-band LED intent while a press is in progress.
    pub fn tick(&mut self, now: Timestamp) -> Effects {
        let mut effects = Effects::new();

        if self.mode == Mode::Startup {
            self.mode = Mode::InUse;
            effects.push(Effect::Led(LedIntent::FlashGreen)).ok();
            effects.push(Effect::FactoryReset { perform: false }).ok();
        }

        if let Some(elapsed) = self.current_elapsed(now) {
            if let Some(intent) = Band::from_elapsed(elapsed).held_intent() {
                effects.push(Effect::Led(intent)).ok();
            }
        }

        effects
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ThisError)]
pub enum ReleaseError {
    #[error("button released with no press in progress")]
    NoPressInProgress,
    #[error("zero elapsed duration at release")]
    ZeroElapsed,
}
