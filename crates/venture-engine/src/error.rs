//! Engine error types.

use venture_core::enums::ErrorKind;
use venture_core::errors::CoreError;
use venture_judge::JudgeError;

/// Why a turn could not be applied. Every variant leaves the session
/// untouched; the orchestrator turns it into an `OutputAction::Error`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The input cannot be evaluated at all (blank text). Weak answers are
    /// not errors; they come back as a clarification.
    #[error("answer rejected: {0}")]
    ValidationRejected(String),

    /// The judge could not answer and no fallback exists for this step.
    #[error("judge unavailable: {0}")]
    JudgeUnavailable(#[from] JudgeError),

    /// The request is valid but comes too early.
    #[error("precondition failed: {0}")]
    PreconditionFailed(String),

    /// The scoring document could not be parsed.
    #[error("malformed judge output: {0}")]
    MalformedJudgeOutput(String),

    /// The input is not valid in the current phase.
    #[error("invalid transition: {0}")]
    InvalidTransition(String),

    /// A selection named an entity that is not among the candidates.
    #[error("unknown comparison candidate: {0}")]
    UnknownCandidate(String),
}

impl EngineError {
    /// Serializable kind carried to the transport.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::ValidationRejected(_) => ErrorKind::ValidationRejected,
            Self::JudgeUnavailable(_) => ErrorKind::JudgeUnavailable,
            Self::PreconditionFailed(_) => ErrorKind::PreconditionFailed,
            Self::MalformedJudgeOutput(_) => ErrorKind::MalformedJudgeOutput,
            Self::InvalidTransition(_) => ErrorKind::InvalidTransition,
            Self::UnknownCandidate(_) => ErrorKind::UnknownCandidate,
        }
    }
}

impl From<CoreError> for EngineError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidTransition { .. }
            | CoreError::NotFound { .. }
            | CoreError::Validation(_) => Self::InvalidTransition(err.to_string()),
        }
    }
}
