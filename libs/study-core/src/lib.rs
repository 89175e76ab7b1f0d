//! Core study-session algorithms shared by the UniBrain study modes.
//!
//! Provides:
//! - Mastery scheduler for learn mode (weighted random card selection
//!   driven by a 0-100 per-card mastery model)
//! - Fuzzy answer grader for write mode (normalization plus Levenshtein
//!   similarity and substring containment)
//! - Write-mode session driver (ordered pass over a deck with
//!   learner-overridable verdicts)
//! - Shared types (Flashcard, CardState, SessionStats, etc.)
//!
//! The crate is pure and synchronous: no I/O, no wall clock (timestamps are
//! passed in by the caller) and no global randomness (selection takes an
//! injected [`rand::Rng`]). Session state lives in memory for one study
//! session and is discarded on reset.

pub mod error;
pub mod learn;
pub mod matching;
pub mod types;
pub mod write;

pub use error::{Result, StudyError};
pub use learn::{LearnSession, LearnSummary};
pub use matching::{
    grade, grade_with_threshold, levenshtein_distance, normalize_answer, similarity, GradeResult,
    SIMILARITY_THRESHOLD,
};
pub use types::{CardId, CardState, Flashcard, MasteryModel, SessionStats};
pub use write::{WriteResult, WriteSession, WriteSummary};
