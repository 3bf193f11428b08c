use std::{
    fs::{File, OpenOptions},
    io::{ErrorKind, Read},
    mem,
    os::fd::{AsFd, BorrowedFd},
    os::unix::fs::OpenOptionsExt,
    path::Path,
};

use anyhow::Context;

use crate::AnyResult;

const EV_KEY: u16 = 0x01;
/// Key code of the push-button line on the system controller.
const BUTTON_CODE: u16 = 256;

const EVENT_SIZE: usize = mem::size_of::<libc::input_event>();
/// Largest batch the kernel hands out per read.
const READ_BATCH: usize = 64;

/// A discrete edge of the one physical button line. The kernel guarantees
/// the down edge is delivered before the matching up edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonEdge {
    Down,
    Up,
}

/// The button-edge stream: an evdev input node opened non-blocking so the
/// poll ceiling in the event loop is the only place the daemon waits.
#[derive(Debug)]
pub struct ButtonDevice {
    file: File,
}

impl ButtonDevice {
    /// # Errors
    ///
    /// Fails when the device node cannot be opened; a fatal setup error.
    pub fn open(path: &Path) -> AnyResult<Self> {
        let file = OpenOptions::new()
            .read(true)
            .custom_flags(libc::O_NONBLOCK)
            .open(path)
            .with_context(|| format!("opening input device {}", path.display()))?;

        Ok(Self { file })
    }

    #[must_use]
    pub fn as_fd(&self) -> BorrowedFd<'_> {
        self.file.as_fd()
    }

    /// Drains everything currently readable into `edges`.
    ///
    /// Transient read errors are logged and end the batch; the next poll
    /// iteration retries implicitly.
    pub fn read_edges(&mut self, edges: &mut Vec<ButtonEdge>) {
        let mut buf = [0_u8; EVENT_SIZE * READ_BATCH];

        loop {
            match self.file.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => parse_edges(&buf[..n], edges),
                Err(error) if error.kind() == ErrorKind::WouldBlock => break,
                Err(error) if error.kind() == ErrorKind::Interrupted => {
                    tracing::debug!("input read interrupted");
                    break;
                }
                Err(error) => {
                    tracing::warn!("input read error: {error}");
                    break;
                }
            }
        }
    }
}

fn parse_edges(buf: &[u8], edges: &mut Vec<ButtonEdge>) {
    if buf.len() % EVENT_SIZE != 0 {
        tracing::warn!("short input read of {} bytes", buf.len());
    }

    for chunk in buf.chunks_exact(EVENT_SIZE) {
        // SAFETY: the chunk is exactly one input_event in size and the
        // struct is plain old data, so an unaligned read is sound.
        let event = unsafe { chunk.as_ptr().cast::<libc::input_event>().read_unaligned() };

        if event.type_ != EV_KEY || event.code != BUTTON_CODE {
            continue;
        }

        match event.value {
            1 => edges.push(ButtonEdge::Down),
            0 => edges.push(ButtonEdge::Up),
            // Key auto-repeat; hold duration is measured from the edges.
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use std::mem;

    use super::{BUTTON_CODE, ButtonEdge, EV_KEY, EVENT_SIZE, parse_edges};

    fn raw_event(type_: u16, code: u16, value: i32) -> Vec<u8> {
        let event = libc::input_event {
            time: libc::timeval {
                tv_sec: 0,
                tv_usec: 0,
            },
            type_,
            code,
            value,
        };

        // SAFETY: input_event is plain old data; its bytes are always valid.
        unsafe {
            std::slice::from_raw_parts(
                std::ptr::from_ref(&event).cast::<u8>(),
                mem::size_of::<libc::input_event>(),
            )
        }
        .to_vec()
    }

    #[test]
    fn test_parse_press_and_release() {
        let mut buf = raw_event(EV_KEY, BUTTON_CODE, 1);
        buf.extend(raw_event(EV_KEY, BUTTON_CODE, 0));

        let mut edges = Vec::new();
        parse_edges(&buf, &mut edges);

        assert_eq!(edges, [ButtonEdge::Down, ButtonEdge::Up]);
    }

    #[test]
    fn test_parse_skips_foreign_events() {
        let mut buf = raw_event(0x00, 0, 0); // EV_SYN
        buf.extend(raw_event(EV_KEY, 30, 1)); // another key
        buf.extend(raw_event(EV_KEY, BUTTON_CODE, 2)); // auto-repeat
        buf.extend(raw_event(EV_KEY, BUTTON_CODE, 1));

        let mut edges = Vec::new();
        parse_edges(&buf, &mut edges);

        assert_eq!(edges, [ButtonEdge::Down]);
    }

    #[test]
    fn test_parse_ignores_trailing_partial_event() {
        let mut buf = raw_event(EV_KEY, BUTTON_CODE, 1);
        buf.truncate(EVENT_SIZE - 1);

        let mut edges = Vec::new();
        parse_edges(&buf, &mut edges);

        assert!(edges.is_empty());
    }
}
