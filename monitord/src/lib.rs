mod actions;
mod button_device;
mod clock;
mod dispatcher;
mod event_loop;
mod reset_marker;
pub mod telemetry;
mod ticker;
mod wake_period;

pub use actions::{Actions, SystemActions};
pub use anyhow::Result as AnyResult;
pub use button_device::{ButtonDevice, ButtonEdge};
pub use dispatcher::Dispatcher;
pub use event_loop::EventLoop;
pub use reset_marker::{DEFAULT_MARKER_PATH, ResetMarker, StartupPlan};
pub use ticker::Ticker;
pub use wake_period::DEFAULT_WAKE_PERIOD_PATH;
