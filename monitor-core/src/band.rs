use core::time::Duration;

use crate::LedIntent;

/// The four hold-duration ranges driving the decision table.
///
/// Classification happens on elapsed seconds truncated to an integer, so
/// 4.999s is still `Short` while exactly 5.000s is `ScheduleReset`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Band {
    /// Below 5s: quick operator intent, reboot (or the start-up reset).
    Short,
    /// 5-10s: deliberate intent, factory reset deferred to the next boot.
    ScheduleReset,
    /// 10-15s: graceful power-down.
    PowerDown,
    /// 15s and beyond: escape hatch from a misjudged long press.
    Cancel,
}

impl Band {
    #[must_use]
    pub fn from_elapsed(elapsed: Duration) -> Self {
        match elapsed.as_secs() {
            0..=4 => Band::Short,
            5..=9 => Band::ScheduleReset,
            10..=14 => Band::PowerDown,
            _ => Band::Cancel,
        }
    }

    /// LED intent shown while the button is still held within this band.
    ///
    /// Short holds get no feedback; the press is presumed accidental or a
    /// plain reboot and needs no warning.
    #[must_use]
    pub fn held_intent(self) -> Option<LedIntent> {
        match self {
            Band::Short => None,
            Band::ScheduleReset => Some(LedIntent::Red),
            Band::PowerDown => Some(LedIntent::FlashRed),
            Band::Cancel => Some(LedIntent::FlashGreen),
        }
    }
}

#[cfg(test)]
mod tests {
    use core::time::Duration;

    use super::Band;
    use crate::LedIntent;

    fn band_at_millis(ms: u64) -> Band {
        Band::from_elapsed(Duration::from_millis(ms))
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(band_at_millis(0), Band::Short);
        assert_eq!(band_at_millis(4_999), Band::Short);
        assert_eq!(band_at_millis(5_000), Band::ScheduleReset);
        assert_eq!(band_at_millis(9_999), Band::ScheduleReset);
        assert_eq!(band_at_millis(10_000), Band::PowerDown);
        assert_eq!(band_at_millis(14_999), Band::PowerDown);
        assert_eq!(band_at_millis(15_000), Band::Cancel);
        assert_eq!(band_at_millis(3_600_000), Band::Cancel);
    }

    #[test]
    fn test_held_intents() {
        assert_eq!(Band::Short.held_intent(), None);
        assert_eq!(Band::ScheduleReset.held_intent(), Some(LedIntent::Red));
        assert_eq!(Band::PowerDown.held_intent(), Some(LedIntent::FlashRed));
        assert_eq!(Band::Cancel.held_intent(), Some(LedIntent::FlashGreen));
    }
}
