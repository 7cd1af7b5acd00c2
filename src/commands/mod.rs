pub mod parse;
pub mod status;
pub mod validate;

/// How a command finished when it did not hit a fatal error.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CommandOutcome {
    Completed,
    /// The run finished but its pass criteria were not met.
    GateFailed,
}
