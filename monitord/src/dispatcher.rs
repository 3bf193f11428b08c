use std::path::PathBuf;

use monitor_core::Effect;

use crate::{actions::Actions, reset_marker::ResetMarker, wake_period};

/// Applies the effects emitted by the state machine to the outside world:
/// LED actuator, power commands, factory-reset helper and the persisted
/// marker.
#[derive(Debug)]
pub struct Dispatcher<A> {
    actions: A,
    marker: ResetMarker,
    wake_period_path: PathBuf,
}

impl<A> Dispatcher<A>
where
    A: Actions,
{
    pub fn new(actions: A, marker: ResetMarker, wake_period_path: impl Into<PathBuf>) -> Self {
        Self {
            actions,
            marker,
            wake_period_path: wake_period_path.into(),
        }
    }

    pub fn apply(&mut self, effects: &[Effect]) {
        for effect in effects {
            self.apply_one(*effect);
        }
    }

    fn apply_one(&mut self, effect: Effect) {
        match effect {
            Effect::Led(intent) => self.actions.set_led(intent),
            Effect::Reboot => {
                tracing::info!("short push-button press, rebooting");
                self.actions.reboot();
            }
            Effect::PowerDown => self.power_down(),
            Effect::ScheduleFactoryReset => {
                tracing::info!("long push-button press (5+s), factory reset on next boot");
                self.marker.set();
            }
            Effect::FactoryReset { perform } => self.actions.factory_reset(perform),
        }
    }

    /// The power-down band only shuts the board down when a wake period is
    /// configured; without one the board would never come back, so it
    /// reboots instead.
    fn power_down(&self) {
        match wake_period::read_wake_period(&self.wake_period_path) {
            Some(secs) => {
                tracing::info!("long push-button press (10+s), shutting down (wake in {secs}s)");
                self.actions.shutdown_now();
            }
            None => {
                tracing::info!("long push-button press (10+s), no wake period, rebooting");
                self.actions.reboot();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        fs,
        path::PathBuf,
        sync::atomic::{AtomicUsize, Ordering},
    };

    use monitor_core::{Effect, LedIntent};

    use super::Dispatcher;
    use crate::{
        actions::{ActionCall, RecordingActions},
        reset_marker::ResetMarker,
    };

    static UNIQUE: AtomicUsize = AtomicUsize::new(0);

    fn temp_path(prefix: &str) -> PathBuf {
        let n = UNIQUE.fetch_add(1, Ordering::Relaxed);
        std::env::temp_dir().join(format!("{prefix}-{}-{n}", std::process::id()))
    }

    fn dispatcher(wake_period: Option<&str>) -> (Dispatcher<RecordingActions>, PathBuf) {
        let marker_path = temp_path("monitord-dispatch-marker");
        let wake_path = temp_path("monitord-dispatch-wake");
        if let Some(contents) = wake_period {
            fs::write(&wake_path, contents).unwrap();
        }

        let dispatcher = Dispatcher::new(
            RecordingActions::default(),
            ResetMarker::new(&marker_path),
            wake_path,
        );
        (dispatcher, marker_path)
    }

    fn calls(dispatcher: &Dispatcher<RecordingActions>) -> Vec<ActionCall> {
        dispatcher.actions.take_calls()
    }

    #[test]
    fn test_reboot_and_heartbeat() {
        let (mut dispatcher, _) = dispatcher(None);

        dispatcher.apply(&[Effect::Reboot, Effect::Led(LedIntent::FlashGreen)]);

        assert_eq!(
            calls(&dispatcher),
            [ActionCall::Reboot, ActionCall::Led(LedIntent::FlashGreen)]
        );
    }

    #[test]
    fn test_power_down_with_wake_period_shuts_down() {
        let (mut dispatcher, _) = dispatcher(Some("120"));

        dispatcher.apply(&[Effect::PowerDown]);

        assert_eq!(calls(&dispatcher), [ActionCall::Shutdown]);
    }

    #[test]
    fn test_power_down_without_wake_period_reboots() {
        let (mut dispatcher, _) = dispatcher(None);

        dispatcher.apply(&[Effect::PowerDown]);

        assert_eq!(calls(&dispatcher), [ActionCall::Reboot]);
    }

    #[test]
    fn test_schedule_factory_reset_persists_the_marker() {
        let (mut dispatcher, marker_path) = dispatcher(None);

        dispatcher.apply(&[Effect::ScheduleFactoryReset, Effect::Led(LedIntent::FlashGreen)]);

        assert!(marker_path.exists());
        assert_eq!(
            calls(&dispatcher),
            [ActionCall::Led(LedIntent::FlashGreen)]
        );
        fs::remove_file(marker_path).unwrap();
    }

    #[test]
    fn test_factory_reset_passes_the_perform_flag_through() {
        let (mut dispatcher, _) = dispatcher(None);

        dispatcher.apply(&[Effect::FactoryReset { perform: false }]);
        dispatcher.apply(&[Effect::FactoryReset { perform: true }]);

        assert_eq!(
            calls(&dispatcher),
            [
                ActionCall::FactoryReset(false),
                ActionCall::FactoryReset(true)
            ]
        );
    }
}
