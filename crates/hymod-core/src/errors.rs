/// Error type for the hymod core.
///
/// All failures propagate synchronously to the caller; there are no
/// retries inside the core.
use thiserror::Error;

use crate::TimeStep;

#[derive(Error, Debug)]
pub enum ModelError {
    /// Caller or upstream-forcing bug: out-of-range storage, negative
    /// precipitation, NaN or negative reservoir levels.
    #[error("precondition violated: {0}")]
    Precondition(String),

    /// No state has been recorded for the requested predecessor step.
    /// Recoverable by seeding an explicit initial state.
    #[error("no recorded state for time step {0}")]
    NoPriorState(TimeStep),

    /// An entry already exists for this step and replay mode is off.
    #[error("entry already recorded for time step {0}")]
    DuplicateEntry(TimeStep),

    /// `add_time` was called with a horizon that extends nothing.
    #[error("invalid time horizon extension: {0} steps")]
    InvalidHorizon(usize),
}

/// Convenience alias for `Result<T, ModelError>`.
pub type ModelResult<T> = Result<T, ModelError>;
