//! Write-mode session driver: typed recall over a deck in order.
//!
//! Cards are presented front to back. Each typed answer is graded by the
//! [`matching`](crate::matching) module, and the verdict stays open to a
//! manual override until the session moves on to the next card.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, StudyError};
use crate::matching::{grade, GradeResult};
use crate::types::{CardId, Flashcard};

/// Graded outcome for one card in a write session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriteResult {
    pub card_id: CardId,
    /// The answer as typed, before normalization.
    pub user_answer: String,
    pub grade: GradeResult,
}

/// Score summary for a write session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriteSummary {
    pub correct_count: usize,
    pub total: usize,
    pub accuracy_percent: u32,
}

/// One pass over a deck in order, grading a typed answer per card.
#[derive(Debug, Clone)]
pub struct WriteSession {
    deck: Vec<Flashcard>,
    current: CardId,
    results: Vec<WriteResult>,
    complete: bool,
}

impl WriteSession {
    /// Start a session over the deck. An empty deck starts complete.
    pub fn new(deck: Vec<Flashcard>) -> Self {
        let complete = deck.is_empty();
        debug!(cards = deck.len(), "write session started");
        Self {
            deck,
            current: 0,
            results: Vec::new(),
            complete,
        }
    }

    /// The card awaiting an answer, or `None` once the session is complete.
    pub fn current_card(&self) -> Option<(CardId, &Flashcard)> {
        if self.complete {
            return None;
        }
        self.deck.get(self.current).map(|card| (self.current, card))
    }

    /// Whether the current card already has a graded answer recorded.
    pub fn awaiting_advance(&self) -> bool {
        self.results.len() > self.current
    }

    /// Grade a typed answer for the current card and record the result.
    ///
    /// The verdict stays open to [`override_last`](WriteSession::override_last)
    /// until [`advance`](WriteSession::advance) moves on.
    pub fn submit(&mut self, answer: &str) -> Result<&WriteResult> {
        if self.complete {
            return Err(StudyError::SessionComplete);
        }
        if self.awaiting_advance() {
            return Err(StudyError::AlreadySubmitted);
        }

        let card = &self.deck[self.current];
        let graded = grade(answer, &card.answer);
        debug!(
            card = self.current,
            correct = graded.is_correct,
            "typed answer graded"
        );
        self.results.push(WriteResult {
            card_id: self.current,
            user_answer: answer.to_string(),
            grade: graded,
        });

        Ok(&self.results[self.current])
    }

    /// Move on after a graded answer. Returns the next card id, or `None`
    /// when the last card has been answered and the session is complete.
    pub fn advance(&mut self) -> Result<Option<CardId>> {
        if self.complete {
            return Err(StudyError::SessionComplete);
        }
        if !self.awaiting_advance() {
            return Err(StudyError::NothingSubmitted);
        }

        if self.current + 1 < self.deck.len() {
            self.current += 1;
            Ok(Some(self.current))
        } else {
            self.complete = true;
            debug!(total = self.results.len(), "write session complete");
            Ok(None)
        }
    }

    /// Flip the most recent verdict to correct without re-grading.
    /// Idempotent.
    pub fn override_last(&mut self) -> Result<()> {
        match self.results.last_mut() {
            Some(result) => {
                result.grade.mark_correct();
                Ok(())
            }
            None => Err(StudyError::NothingSubmitted),
        }
    }

    pub fn results(&self) -> &[WriteResult] {
        &self.results
    }

    pub fn deck(&self) -> &[Flashcard] {
        &self.deck
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Score so far; covers the whole deck once the session is complete.
    pub fn summary(&self) -> WriteSummary {
        let correct_count = self.results.iter().filter(|r| r.grade.is_correct).count();
        let total = self.results.len();
        let accuracy_percent = if total == 0 {
            0
        } else {
            (correct_count as f64 / total as f64 * 100.0).round() as u32
        };
        WriteSummary {
            correct_count,
            total,
            accuracy_percent,
        }
    }

    /// Start over from the first card with all results discarded.
    pub fn reset(&mut self) {
        self.current = 0;
        self.results.clear();
        self.complete = self.deck.is_empty();
        debug!("write session reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn deck() -> Vec<Flashcard> {
        vec![
            Flashcard::new("capital of France", "Paris"),
            Flashcard::new("largest planet", "Jupiter"),
        ]
    }

    #[test]
    fn empty_deck_starts_complete() {
        let session = WriteSession::new(vec![]);
        assert!(session.is_complete());
        assert!(session.current_card().is_none());
    }

    #[test]
    fn full_session_flow() {
        let mut session = WriteSession::new(deck());
        assert_eq!(session.current_card().unwrap().0, 0);

        let result = session.submit("paris").unwrap();
        assert!(result.grade.is_correct);
        assert_eq!(session.advance().unwrap(), Some(1));

        let result = session.submit("Saturn").unwrap();
        assert!(!result.grade.is_correct);
        assert_eq!(session.advance().unwrap(), None);

        assert!(session.is_complete());
        let summary = session.summary();
        assert_eq!(summary.correct_count, 1);
        assert_eq!(summary.total, 2);
        assert_eq!(summary.accuracy_percent, 50);
    }

    #[test]
    fn override_last_flips_verdict_and_is_idempotent() {
        let mut session = WriteSession::new(deck());
        session.submit("Lyon").unwrap();
        assert!(!session.results()[0].grade.is_correct);

        session.override_last().unwrap();
        assert!(session.results()[0].grade.is_correct);
        session.override_last().unwrap();
        assert!(session.results()[0].grade.is_correct);

        assert_eq!(session.summary().correct_count, 1);
    }

    #[test]
    fn double_submit_is_an_error() {
        let mut session = WriteSession::new(deck());
        session.submit("Paris").unwrap();
        assert_eq!(session.submit("Paris").unwrap_err(), StudyError::AlreadySubmitted);
    }

    #[test]
    fn advance_without_submit_is_an_error() {
        let mut session = WriteSession::new(deck());
        assert_eq!(session.advance().unwrap_err(), StudyError::NothingSubmitted);
    }

    #[test]
    fn submit_after_completion_is_an_error() {
        let mut session = WriteSession::new(vec![Flashcard::new("q", "a")]);
        session.submit("a").unwrap();
        session.advance().unwrap();
        assert_eq!(session.submit("a").unwrap_err(), StudyError::SessionComplete);
    }

    #[test]
    fn override_before_any_submit_is_an_error() {
        let mut session = WriteSession::new(deck());
        assert_eq!(session.override_last().unwrap_err(), StudyError::NothingSubmitted);
    }

    #[test]
    fn reset_discards_results_and_restarts() {
        let mut session = WriteSession::new(deck());
        session.submit("Paris").unwrap();
        session.advance().unwrap();
        session.reset();

        assert!(!session.is_complete());
        assert!(session.results().is_empty());
        assert_eq!(session.current_card().unwrap().0, 0);
        assert_eq!(session.summary().total, 0);
    }

    #[test]
    fn results_keep_the_answer_as_typed() {
        let mut session = WriteSession::new(deck());
        session.submit("  it's Paris! ").unwrap();
        assert_eq!(session.results()[0].user_answer, "  it's Paris! ");
        assert_eq!(session.results()[0].grade.normalized_user, "its paris");
    }
}
