use thiserror::Error as ThisError;

/// Operator feedback states the LED helper understands.
///
/// The discriminants are the wire values passed to the helper script,
/// so the enum doubles as the LED protocol definition.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(test, derive(strum::EnumIter))]
pub enum LedIntent {
    Off = 0,
    Green,
    /// Solid red. Start-up reset window, or release-for-deferred-reset.
    Red,
    /// The heartbeat.
    FlashGreen,
    /// Release-for-shutdown warning.
    FlashRed,
}

impl From<LedIntent> for u8 {
    fn from(value: LedIntent) -> Self {
        value as Self
    }
}

impl TryFrom<u8> for LedIntent {
    type Error = LedIntentConvError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(LedIntent::Off),
            1 => Ok(LedIntent::Green),
            2 => Ok(LedIntent::Red),
            3 => Ok(LedIntent::FlashGreen),
            4 => Ok(LedIntent::FlashRed),
            _ => Err(LedIntentConvError),
        }
    }
}

#[derive(Clone, Copy, Debug, ThisError)]
#[cfg_attr(test, derive(PartialEq))]
#[error("integer to LED intent conversion failed")]
pub struct LedIntentConvError;

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::LedIntent;

    #[test]
    fn test_led_intent_conversion() {
        for intent in LedIntent::iter() {
            assert_eq!((intent as u8).try_into(), Ok(intent));
        }
    }

    #[test]
    fn test_led_intent_conversion_out_of_range() {
        assert!(LedIntent::try_from(5).is_err());
    }
}
