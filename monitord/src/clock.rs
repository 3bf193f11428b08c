use anyhow::Context;
use monitor_core::Timestamp;
use nix::time::{ClockId, clock_gettime};

use crate::AnyResult;

/// Current monotonic instant, the clock every press duration is measured
/// against.
///
/// # Errors
///
/// Fails only when the monotonic clock itself is unreadable, which leaves
/// nothing sensible to measure with; the caller treats it as fatal.
pub fn now() -> AnyResult<Timestamp> {
    let spec = clock_gettime(ClockId::CLOCK_MONOTONIC).context("reading monotonic clock")?;

    Ok(Timestamp::new(
        spec.tv_sec().try_into().unwrap_or_default(),
        spec.tv_nsec().try_into().unwrap_or_default(),
    ))
}
