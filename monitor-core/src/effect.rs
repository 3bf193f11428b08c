use crate::LedIntent;

/// One-shot external actions requested by the state machine.
///
/// Each decision point emits at most one terminal action; applying them is
/// the daemon's job and is fire-and-forget with no rollback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Drive the LED actuator.
    Led(LedIntent),
    /// Reboot the host.
    Reboot,
    /// Power the host down. The daemon consults the wake-period source and
    /// downgrades this to a reboot when no wake period is configured.
    PowerDown,
    /// Persist the deferred factory-reset marker for the next boot.
    ScheduleFactoryReset,
    /// Invoke the factory-reset helper. `perform` false is the helper's
    /// validate-only initialization call, true executes the reset.
    FactoryReset { perform: bool },
}

/// Effect list for a single decision point. Capacity covers the largest
/// emission, the first tick firing with a button already held.
pub type Effects = heapless::Vec<Effect, 4>;
