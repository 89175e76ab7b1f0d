//! Error types for study-core.

use crate::types::CardId;
use thiserror::Error;

/// Result type alias using StudyError.
pub type Result<T> = std::result::Result<T, StudyError>;

/// Errors raised when a caller breaks a session contract.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StudyError {
    #[error("card {id} is not part of this session")]
    UnknownCard { id: CardId },

    #[error("session is already complete")]
    SessionComplete,

    #[error("no answer has been submitted for the current card")]
    NothingSubmitted,

    #[error("an answer was already submitted for the current card")]
    AlreadySubmitted,
}
