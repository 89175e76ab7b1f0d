//! Adaptive mastery scheduler for learn-mode sessions.
//!
//! Every card carries a 0-100 mastery score. Card selection is weighted
//! random favoring low mastery, and a session finishes once every card has
//! been seen at least once and average mastery clears the completion
//! threshold.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, StudyError};
use crate::types::{CardId, CardState, Flashcard, MasteryModel, SessionStats};

/// End-of-session aggregates for the completion screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearnSummary {
    /// Average mastery across the deck, rounded to a whole percent.
    pub average_mastery: u32,
    pub cards_studied: u32,
    pub accuracy_percent: u32,
    /// Final per-card mastery, in deck order.
    pub card_mastery: Vec<u8>,
}

/// One learn-mode study session over a fixed deck.
///
/// The session owns one [`CardState`] per card, keyed by [`CardId`] assigned
/// from deck order at start. State lives only for the session; there is no
/// persistence and [`reset`](LearnSession::reset) discards everything.
#[derive(Debug, Clone)]
pub struct LearnSession {
    deck: Vec<Flashcard>,
    states: Vec<CardState>,
    stats: SessionStats,
    model: MasteryModel,
    complete: bool,
}

impl LearnSession {
    /// Start a session with the default mastery model.
    ///
    /// An empty deck yields a session that is already complete: there is
    /// nothing to study, which is a terminal state rather than an error.
    pub fn new(deck: Vec<Flashcard>) -> Self {
        Self::with_model(deck, MasteryModel::default())
    }

    /// Start a session with custom model parameters.
    pub fn with_model(deck: Vec<Flashcard>, model: MasteryModel) -> Self {
        let states: Vec<CardState> = (0..deck.len()).map(CardState::new).collect();
        let complete = deck.is_empty();
        debug!(cards = deck.len(), "learn session started");
        Self {
            deck,
            states,
            stats: SessionStats::default(),
            model,
            complete,
        }
    }

    /// Pick the next card to present.
    ///
    /// Each card below full mastery gets a weight of `(100 - mastery)` plus
    /// uniform jitter, and the heaviest card wins. The jitter keeps cards
    /// tied on mastery from repeating in a fixed order and lets
    /// recently-correct cards resurface at low probability.
    ///
    /// Returns `None` once the session is complete or no unmastered card
    /// remains. Selection never mutates state; the caller presents the card
    /// and reports back through [`record_response`](LearnSession::record_response).
    pub fn select_next<R: Rng>(&self, rng: &mut R) -> Option<CardId> {
        if self.complete {
            return None;
        }

        let mut best: Option<(CardId, f64)> = None;
        for state in self.states.iter().filter(|s| !s.is_mastered()) {
            let jitter = if self.model.selection_jitter > 0.0 {
                rng.gen_range(0.0..self.model.selection_jitter)
            } else {
                0.0
            };
            let weight = f64::from(100 - state.mastery) + jitter;
            match best {
                Some((_, top)) if weight <= top => {}
                _ => best = Some((state.card_id, weight)),
            }
        }

        best.map(|(id, _)| id)
    }

    /// Record the learner's self-graded response for a presented card.
    ///
    /// A correct response raises mastery by the model's gain, a miss lowers
    /// it by the penalty, clamped to 0..=100 either way. `now` stamps the
    /// card's `last_seen`; the session never reads the wall clock itself.
    ///
    /// Returns whether the session is now complete: every card seen at
    /// least once and average mastery at or above the completion average.
    /// The rule is deliberately deck-wide, so individual cards may finish
    /// below the threshold when the rest of the deck pulls the mean up.
    pub fn record_response(
        &mut self,
        id: CardId,
        knew_it: bool,
        now: DateTime<Utc>,
    ) -> Result<bool> {
        let gain = self.model.correct_gain;
        let penalty = self.model.incorrect_penalty;
        let state = self
            .states
            .get_mut(id)
            .ok_or(StudyError::UnknownCard { id })?;

        if knew_it {
            state.mastery = state.mastery.saturating_add(gain).min(100);
            state.times_correct += 1;
        } else {
            state.mastery = state.mastery.saturating_sub(penalty);
            state.times_incorrect += 1;
        }
        state.last_seen = Some(now);
        self.stats.record(knew_it);

        let all_seen = self.states.iter().all(|s| s.last_seen.is_some());
        if all_seen && self.average_mastery() >= self.model.completion_average {
            self.complete = true;
            debug!(
                cards_studied = self.stats.cards_studied,
                average = self.average_mastery(),
                "learn session complete"
            );
        }

        Ok(self.complete)
    }

    /// Discard all progress and start over on the same deck.
    pub fn reset(&mut self) {
        for state in &mut self.states {
            *state = CardState::new(state.card_id);
        }
        self.stats = SessionStats::default();
        self.complete = self.deck.is_empty();
        debug!("learn session reset");
    }

    /// Arithmetic mean of all card mastery scores. Zero for an empty deck.
    pub fn average_mastery(&self) -> f64 {
        if self.states.is_empty() {
            return 0.0;
        }
        let total: u32 = self.states.iter().map(|s| u32::from(s.mastery)).sum();
        f64::from(total) / self.states.len() as f64
    }

    pub fn card(&self, id: CardId) -> Option<&Flashcard> {
        self.deck.get(id)
    }

    pub fn state(&self, id: CardId) -> Option<&CardState> {
        self.states.get(id)
    }

    pub fn states(&self) -> &[CardState] {
        &self.states
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn is_empty(&self) -> bool {
        self.deck.is_empty()
    }

    /// Aggregates for the end-of-session view.
    pub fn summary(&self) -> LearnSummary {
        LearnSummary {
            average_mastery: self.average_mastery().round() as u32,
            cards_studied: self.stats.cards_studied,
            accuracy_percent: self.stats.accuracy_percent(),
            card_mastery: self.states.iter().map(|s| s.mastery).collect(),
        }
    }
}
