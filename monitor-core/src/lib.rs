#![no_std]

mod band;
mod effect;
mod led_intent;
mod mode;
mod monitor;
mod timestamp;

pub use band::Band;
pub use effect::{Effect, Effects};
pub use led_intent::LedIntent;
pub use mode::Mode;
pub use monitor::{PushButtonMonitor, ReleaseError};
pub use timestamp::Timestamp;

/// Length of the start-up window during which a short press triggers an
/// immediate factory reset. Also the initial tick delay when no factory
/// reset is pending.
pub const STARTUP_WINDOW_SECS: u64 = 10;

/// Interval between periodic tick firings once the first tick has expired.
pub const TICK_INTERVAL_SECS: u64 = 2;
