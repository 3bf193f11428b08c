use std::{fs, path::Path};

/// Well-known path of the optional wake-period value, in seconds.
pub const DEFAULT_WAKE_PERIOD_PATH: &str = "/opt/wakeup";

/// Reads the wake period at shutdown-decision time. A missing file, an
/// unparsable value or an explicit zero all mean "no wake period": the
/// power-down band then reboots immediately instead of shutting down.
pub fn read_wake_period(path: &Path) -> Option<u64> {
    let contents = fs::read_to_string(path).ok()?;

    match contents.trim().parse::<u64>() {
        Ok(0) => None,
        Ok(secs) => Some(secs),
        Err(error) => {
            tracing::warn!("unparsable wake period in {}: {error}", path.display());
            None
        }
    }
}
