//! Core types for study sessions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A question/answer pair supplied by the caller.
///
/// Cards are immutable for the lifetime of a session; per-card progress
/// lives in [`CardState`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub question: String,
    pub answer: String,
}

impl Flashcard {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// Stable identifier for a card within one session.
///
/// Assigned from deck order at session start. Two cards with identical text
/// still get distinct ids, so progress is tracked per entry, not per value.
pub type CardId = usize;

/// Per-card learning state for a mastery session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardState {
    pub card_id: CardId,
    /// Mastery score, always within 0..=100.
    pub mastery: u8,
    pub times_correct: u32,
    pub times_incorrect: u32,
    /// When the card was last presented; `None` until first shown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<DateTime<Utc>>,
}

impl CardState {
    pub(crate) fn new(card_id: CardId) -> Self {
        Self {
            card_id,
            mastery: 0,
            times_correct: 0,
            times_incorrect: 0,
            last_seen: None,
        }
    }

    /// Whether the card has reached full mastery.
    pub fn is_mastered(&self) -> bool {
        self.mastery >= 100
    }
}

/// Aggregate counters for one session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionStats {
    /// Number of responses given.
    pub cards_studied: u32,
    pub correct_count: u32,
    /// Consecutive correct responses; resets to zero on a miss.
    pub current_streak: u32,
}

impl SessionStats {
    pub(crate) fn record(&mut self, correct: bool) {
        self.cards_studied += 1;
        if correct {
            self.correct_count += 1;
            self.current_streak += 1;
        } else {
            self.current_streak = 0;
        }
    }

    /// Percentage of correct responses, rounded. Zero before any response.
    pub fn accuracy_percent(&self) -> u32 {
        if self.cards_studied == 0 {
            return 0;
        }
        (self.correct_count as f64 / self.cards_studied as f64 * 100.0).round() as u32
    }
}

/// Mastery model with configurable parameters.
///
/// The default tuning is asymmetric: a correct response gains more than a
/// miss costs, so four correct answers take a fresh card to full mastery
/// while a single miss on a mastered card drops it to 85, not back to zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MasteryModel {
    /// Added to mastery on a correct response.
    pub correct_gain: u8,
    /// Subtracted from mastery on an incorrect response.
    pub incorrect_penalty: u8,
    /// Upper bound of the uniform jitter added to selection weights.
    pub selection_jitter: f64,
    /// Average mastery required (with every card seen) to finish a session.
    pub completion_average: f64,
}

impl Default for MasteryModel {
    fn default() -> Self {
        Self {
            correct_gain: 25,
            incorrect_penalty: 15,
            selection_jitter: 20.0,
            completion_average: 80.0,
        }
    }
}
