use core::time::Duration;

/// A monotonic instant, seconds plus a sub-second nanosecond part.
///
/// The daemon fills these from `clock_gettime(CLOCK_MONOTONIC)`; the tests
/// construct them directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timestamp {
    secs: u64,
    nanos: u32,
}

const NANOS_PER_SEC: u32 = 1_000_000_000;

impl Timestamp {
    #[must_use]
    pub const fn new(secs: u64, nanos: u32) -> Self {
        Self { secs, nanos }
    }

    /// Duration elapsed between `start` and `self`.
    ///
    /// When the stop nanosecond part is smaller than the start one, a whole
    /// second is borrowed and a full second of nanoseconds added, so the
    /// fractional part never underflows. A stop instant before `start`
    /// yields a zero duration.
    #[must_use]
    pub fn elapsed_since(&self, start: Timestamp) -> Duration {
        if self.secs < start.secs || (self.secs == start.secs && self.nanos < start.nanos) {
            return Duration::ZERO;
        }

        let (secs, nanos) = if self.nanos < start.nanos {
            (
                self.secs - start.secs - 1,
                self.nanos + NANOS_PER_SEC - start.nanos,
            )
        } else {
            (self.secs - start.secs, self.nanos - start.nanos)
        };

        Duration::new(secs, nanos)
    }
}

#[cfg(test)]
mod tests {
    use core::time::Duration;

    use super::Timestamp;

    #[test]
    fn test_elapsed_whole_seconds() {
        let start = Timestamp::new(100, 0);
        let stop = Timestamp::new(103, 0);
        assert_eq!(stop.elapsed_since(start), Duration::from_secs(3));
    }

    #[test]
    fn test_elapsed_subsecond_borrow() {
        // Stop fraction smaller than start fraction forces the borrow path.
        let start = Timestamp::new(100, 500_000_000);
        let stop = Timestamp::new(101, 200_000_000);
        assert_eq!(stop.elapsed_since(start), Duration::from_millis(700));
    }

    #[test]
    fn test_elapsed_no_borrow() {
        let start = Timestamp::new(100, 200_000_000);
        let stop = Timestamp::new(101, 500_000_000);
        assert_eq!(stop.elapsed_since(start), Duration::from_millis(1300));
    }

    #[test]
    fn test_elapsed_identical_instants() {
        let instant = Timestamp::new(42, 42);
        assert_eq!(instant.elapsed_since(instant), Duration::ZERO);
    }

    #[test]
    fn test_elapsed_clamps_backwards_time() {
        let start = Timestamp::new(100, 0);
        let stop = Timestamp::new(99, 999_999_999);
        assert_eq!(stop.elapsed_since(start), Duration::ZERO);
    }
}
