use std::{
    os::fd::{AsFd, AsRawFd, BorrowedFd},
    time::Duration,
};

use anyhow::Context;
use nix::{
    errno::Errno,
    sys::{
        time::TimeSpec,
        timerfd::{ClockId, Expiration, TimerFd, TimerFlags, TimerSetTimeFlags},
    },
    unistd,
};

use crate::AnyResult;

/// The periodic tick source: one firing after the gate-chosen initial
/// delay, then one every fixed interval until process exit.
///
/// Implemented as a timerfd polled alongside the button device, so tick
/// firings are serialized with button edges instead of preempting the loop
/// from a signal handler.
#[derive(Debug)]
pub struct Ticker {
    inner: TimerFd,
}

impl Ticker {
    /// # Errors
    ///
    /// Fails when the timer cannot be created or armed. Fatal: without the
    /// tick there is no start-up transition and no held-press feedback.
    pub fn new(initial: Duration, interval: Duration) -> AnyResult<Self> {
        let inner = TimerFd::new(
            ClockId::CLOCK_MONOTONIC,
            TimerFlags::TFD_NONBLOCK | TimerFlags::TFD_CLOEXEC,
        )
        .context("creating tick timer")?;

        inner
            .set(
                Expiration::IntervalDelayed(
                    TimeSpec::from_duration(initial),
                    TimeSpec::from_duration(interval),
                ),
                TimerSetTimeFlags::empty(),
            )
            .context("arming tick timer")?;

        Ok(Self { inner })
    }

    #[must_use]
    pub fn as_fd(&self) -> BorrowedFd<'_> {
        self.inner.as_fd()
    }

    /// Clears the expiration counter after poll readiness. Coalesced
    /// firings collapse into one tick, which is fine: only the first firing
    /// carries mode-transition significance and the LED re-evaluation is
    /// best effort.
    pub fn drain(&self) {
        let mut buf = [0_u8; 8];

        loop {
            match unistd::read(self.inner.as_fd().as_raw_fd(), &mut buf) {
                Ok(_) => {}
                Err(Errno::EAGAIN) => break,
                Err(Errno::EINTR) => {}
                Err(errno) => {
                    tracing::warn!("tick timer read error: {errno}");
                    break;
                }
            }
        }
    }
}
