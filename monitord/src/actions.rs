use std::process::Command;

use monitor_core::LedIntent;

/// Seam between the decision logic and the host: every external action the
/// monitor can trigger. All implementations are fire-and-forget with at most
/// one invocation per decision point and no rollback.
pub trait Actions {
    fn set_led(&self, intent: LedIntent);
    fn reboot(&self);
    fn shutdown_now(&self);
    /// Invoke the factory-reset helper. `false` is the helper's
    /// validate-only initialization call, `true` executes the reset.
    fn factory_reset(&self, perform: bool);
    /// Disable the system controller's hardware push-button reset so the
    /// monitor owns the button.
    fn disable_hardware_reset(&self);
}

const LED_HELPER: &str = "/usr/local/bin/set_led.sh";
const FACTORY_RESET_HELPER: &str = "/usr/local/bin/check-factory-reset.sh";

/// Builds the helper's flag argument fresh on every call; nothing is
/// appended to shared state, so repeated invocations cannot accumulate
/// flags.
fn factory_reset_arg(perform: bool) -> &'static str {
    if perform { "1" } else { "0" }
}

/// Production [`Actions`] shelling out to the board's helper commands.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemActions;

impl SystemActions {
    fn run(program: &str, args: &[&str]) {
        match Command::new(program).args(args).status() {
            Ok(status) if status.success() => {}
            Ok(status) => tracing::warn!("{program} exited with {status}"),
            Err(error) => tracing::warn!("failed to run {program}: {error}"),
        }
    }
}

impl Actions for SystemActions {
    fn set_led(&self, intent: LedIntent) {
        Self::run(LED_HELPER, &[&u8::from(intent).to_string()]);
    }

    fn reboot(&self) {
        Self::run("reboot", &[]);
    }

    fn shutdown_now(&self) {
        Self::run("shutdown", &["-h", "now"]);
    }

    fn factory_reset(&self, perform: bool) {
        Self::run(FACTORY_RESET_HELPER, &[factory_reset_arg(perform)]);
    }

    fn disable_hardware_reset(&self) {
        Self::run("i2cset", &["-f", "-y", "0", "0x20", "0", "0"]);
    }
}

/// Test double recording every action invocation in order.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingActions {
    pub calls: std::cell::RefCell<Vec<ActionCall>>,
}

#[cfg(test)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ActionCall {
    Led(LedIntent),
    Reboot,
    Shutdown,
    FactoryReset(bool),
    DisableHardwareReset,
}

#[cfg(test)]
impl RecordingActions {
    fn record(&self, call: ActionCall) {
        self.calls.borrow_mut().push(call);
    }

    pub fn take_calls(&self) -> Vec<ActionCall> {
        self.calls.take()
    }
}

#[cfg(test)]
impl Actions for RecordingActions {
    fn set_led(&self, intent: LedIntent) {
        self.record(ActionCall::Led(intent));
    }

    fn reboot(&self) {
        self.record(ActionCall::Reboot);
    }

    fn shutdown_now(&self) {
        self.record(ActionCall::Shutdown);
    }

    fn factory_reset(&self, perform: bool) {
        self.record(ActionCall::FactoryReset(perform));
    }

    fn disable_hardware_reset(&self) {
        self.record(ActionCall::DisableHardwareReset);
    }
}

#[cfg(test)]
mod tests {
    use super::factory_reset_arg;

    #[test]
    fn test_factory_reset_arg_is_fresh_per_call() {
        // Guards against the flag accumulating across calls.
        assert_eq!(factory_reset_arg(false), "0");
        assert_eq!(factory_reset_arg(true), "1");
        assert_eq!(factory_reset_arg(true), "1");
        assert_eq!(factory_reset_arg(false), "0");
    }
}
