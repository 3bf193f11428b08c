/// Lifecycle phase of the monitor itself, distinct from the board's power
/// state. Transitions `Startup` -> `InUse` exactly once per process, either
/// on the first tick firing or on a qualifying start-up release. Never
/// transitions back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Startup,
    InUse,
}
