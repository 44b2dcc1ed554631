use thiserror::Error;

/// Rejections raised by the scoring engine.
///
/// Every variant is recoverable: state is left untouched and the operator can
/// re-submit a corrected input. Nothing here aborts the process.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScoringError {
    /// Delivery or decision submitted when the match is not in progress, or
    /// while an earlier decision is still unresolved.
    #[error("Invalid match state: {0}")]
    InvalidMatchState(String),

    /// Player selection that violates the rules (duplicate openers,
    /// out-of-range index, already-out or already-batting replacement).
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    /// Dismissal detail that cannot be recorded as given.
    #[error("Invalid dismissal: {0}")]
    InvalidDismissal(String),
}

pub type Result<T> = std::result::Result<T, ScoringError>;
