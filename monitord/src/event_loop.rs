use anyhow::Context;
use monitor_core::PushButtonMonitor;
use nix::{
    errno::Errno,
    poll::{PollFd, PollFlags, PollTimeout, poll},
};

use crate::{
    AnyResult,
    actions::Actions,
    button_device::{ButtonDevice, ButtonEdge},
    clock,
    dispatcher::Dispatcher,
    ticker::Ticker,
};

/// Ceiling on a single wait for the next button edge or tick. Bounds how
/// stale the monitor state can get between iterations.
const WAIT_CEILING_MS: u16 = 3_000;

/// The main control loop: waits on the button device and the tick source
/// with a bounded ceiling and feeds both into the state machine.
///
/// Everything runs on this one thread, so the monitor's mode and press
/// window have exactly one writer at any instant.
#[derive(Debug)]
pub struct EventLoop<A> {
    device: ButtonDevice,
    ticker: Ticker,
    monitor: PushButtonMonitor,
    dispatcher: Dispatcher<A>,
}

impl<A> EventLoop<A>
where
    A: Actions,
{
    pub fn new(
        device: ButtonDevice,
        ticker: Ticker,
        monitor: PushButtonMonitor,
        dispatcher: Dispatcher<A>,
    ) -> Self {
        Self {
            device,
            ticker,
            monitor,
            dispatcher,
        }
    }

    /// Runs until an external signal terminates the process or a power
    /// action ends the host.
    ///
    /// # Errors
    ///
    /// Only unrecoverable poll or clock failures escape; transient I/O is
    /// logged and the loop continues.
    pub fn run(mut self) -> AnyResult<()> {
        let mut edges = Vec::with_capacity(16);

        loop {
            let (tick_ready, button_ready) = self.wait()?;

            // Tick first: the start-up transition is ordered before any
            // held-press re-evaluation this iteration may trigger.
            if tick_ready {
                self.ticker.drain();
                let effects = self.monitor.tick(clock::now()?);
                self.dispatcher.apply(&effects);
            }

            if button_ready {
                edges.clear();
                self.device.read_edges(&mut edges);

                for edge in &edges {
                    self.handle_edge(*edge)?;
                }
            }
        }
    }

    fn handle_edge(&mut self, edge: ButtonEdge) -> AnyResult<()> {
        let now = clock::now()?;

        match edge {
            ButtonEdge::Down => self.monitor.press_began(now),
            ButtonEdge::Up => match self.monitor.press_ended(now) {
                Ok(effects) => self.dispatcher.apply(&effects),
                Err(error) => tracing::warn!("discarding button release: {error}"),
            },
        }

        Ok(())
    }

    fn wait(&self) -> AnyResult<(bool, bool)> {
        loop {
            let mut fds = [
                PollFd::new(self.ticker.as_fd(), PollFlags::POLLIN),
                PollFd::new(self.device.as_fd(), PollFlags::POLLIN),
            ];

            match poll(&mut fds, PollTimeout::from(WAIT_CEILING_MS)) {
                Ok(0) => return Ok((false, false)),
                Ok(_) => return Ok((readable(&fds[0]), readable(&fds[1]))),
                Err(Errno::EINTR) => tracing::debug!("wait interrupted"),
                Err(errno) => return Err(errno).context("waiting for button edge or tick"),
            }
        }
    }
}

fn readable(fd: &PollFd<'_>) -> bool {
    fd.revents()
        .is_some_and(|revents| revents.intersects(PollFlags::POLLIN | PollFlags::POLLHUP))
}
