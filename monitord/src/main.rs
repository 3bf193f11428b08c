use std::{path::PathBuf, time::Duration};

use anyhow::Context;
use clap::Parser;
use monitor_core::{PushButtonMonitor, TICK_INTERVAL_SECS};
use monitord::{
    Actions, AnyResult, ButtonDevice, DEFAULT_MARKER_PATH, DEFAULT_WAKE_PERIOD_PATH, Dispatcher,
    EventLoop, ResetMarker, SystemActions, Ticker, telemetry,
};

/// Monitors the board's push-button and maps hold duration to a reboot, a
/// deferred factory reset, a shutdown or a cancelled press.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Input device delivering the push-button events, e.g. /dev/input/event0.
    device: PathBuf,
}

fn main() -> AnyResult<()> {
    let args = Args::parse();
    telemetry::init();

    tracing::info!("starting push-button monitor on {}", args.device.display());

    let actions = SystemActions;
    actions.disable_hardware_reset();

    let mut marker = ResetMarker::new(DEFAULT_MARKER_PATH);
    let plan = marker.resolve_startup(&actions);

    let device = ButtonDevice::open(&args.device)?;
    let ticker = Ticker::new(
        plan.initial_tick_delay,
        Duration::from_secs(TICK_INTERVAL_SECS),
    )
    .context("setting up the periodic tick")?;

    let monitor = PushButtonMonitor::with_mode(plan.mode);
    let dispatcher = Dispatcher::new(actions, marker, DEFAULT_WAKE_PERIOD_PATH);

    EventLoop::new(device, ticker, monitor, dispatcher).run()
}
