#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Score accounting for Fuse Grid sessions.
//!
//! The board reports a score delta with every resolved move; this system
//! folds those deltas into a running total, tracks the best total seen, and
//! persists new bests through an injected [`HighScoreStore`]. The core owns
//! no persistence format; stores decide where and how bests live.

use fuse_grid_core::{Event, Score};
use thiserror::Error;

/// Error surfaced when a high score store cannot load or save.
#[derive(Debug, Error)]
#[error("high score store failed: {reason}")]
pub struct HighScoreError {
    reason: String,
}

impl HighScoreError {
    /// Creates a store error carrying the provided reason.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Persistence seam for the best score across sessions.
pub trait HighScoreStore {
    /// Loads the stored best score, defaulting to zero when none exists.
    fn load(&mut self) -> Result<Score, HighScoreError>;

    /// Persists a new best score.
    fn save(&mut self, score: Score) -> Result<(), HighScoreError>;
}

/// Pure system that folds move resolutions into score totals.
#[derive(Debug, Default)]
pub struct Scoring {
    total: Score,
    best: Score,
    game_over: bool,
}

impl Scoring {
    /// Creates a scoring system with zeroed totals.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scoring system seeded with the store's persisted best.
    pub fn with_stored_best(store: &mut dyn HighScoreStore) -> Result<Self, HighScoreError> {
        Ok(Self {
            total: Score::ZERO,
            best: store.load()?,
            game_over: false,
        })
    }

    /// Running total for the current session.
    #[must_use]
    pub const fn total(&self) -> Score {
        self.total
    }

    /// Best total observed, including the stored best if one was loaded.
    #[must_use]
    pub const fn best(&self) -> Score {
        self.best
    }

    /// Whether the board announced the end of the current game.
    #[must_use]
    pub const fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Replaces the running total when a captured game is restored.
    ///
    /// The best is left untouched; a restored total below the best must not
    /// erase it.
    pub fn resume_total(&mut self, total: Score) {
        self.total = total;
        self.game_over = false;
    }

    /// Consumes board events, updating totals and persisting new bests.
    ///
    /// The best is written through the store only when the running total
    /// beats it, so an unbeaten best is never rewritten.
    pub fn handle(
        &mut self,
        events: &[Event],
        store: &mut dyn HighScoreStore,
    ) -> Result<(), HighScoreError> {
        for event in events {
            match event {
                Event::GameStarted { .. } => {
                    self.total = Score::ZERO;
                    self.game_over = false;
                }
                Event::MoveResolved { score_delta, .. } => {
                    self.total = self.total.saturating_add(*score_delta);
                    if self.total > self.best {
                        self.best = self.total;
                        store.save(self.best)?;
                    }
                }
                Event::GameEnded => {
                    self.game_over = true;
                }
                _ => {}
            }
        }
        Ok(())
    }
}
