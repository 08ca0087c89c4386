//! A day's play across all five levels

use super::{Attempt, GameError, LevelState};
use crate::core::{Guess, Level};
use crate::generator::{Challenge, date_string, generate};
use chrono::NaiveDate;
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Per-level states for one calendar day, with challenges generated on demand
#[derive(Debug, Clone)]
pub struct Session {
    date: NaiveDate,
    states: BTreeMap<Level, LevelState>,
    challenges: FxHashMap<Level, Challenge>,
}

fn fresh_states() -> BTreeMap<Level, LevelState> {
    Level::ALL
        .into_iter()
        .map(|level| (level, LevelState::default()))
        .collect()
}

impl Session {
    #[must_use]
    pub fn new(date: NaiveDate) -> Self {
        Self::with_states(date, BTreeMap::new())
    }

    /// Restore saved states; levels missing from `states` start fresh
    #[must_use]
    pub fn with_states(date: NaiveDate, mut states: BTreeMap<Level, LevelState>) -> Self {
        for level in Level::ALL {
            states.entry(level).or_default();
        }
        Self {
            date,
            states,
            challenges: FxHashMap::default(),
        }
    }

    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    #[must_use]
    pub const fn states(&self) -> &BTreeMap<Level, LevelState> {
        &self.states
    }

    /// State for `level`; every level is populated on construction
    #[must_use]
    pub fn state(&self, level: Level) -> &LevelState {
        &self.states[&level]
    }

    /// Today's challenge for `level`, generated on first use
    pub fn challenge(&mut self, level: Level) -> &Challenge {
        let date = self.date;
        self.challenges
            .entry(level)
            .or_insert_with(|| generate(level, date))
    }

    /// Record a guess for `level`
    ///
    /// # Errors
    /// Returns `GameError::Finished` when that level's round is already over.
    pub fn submit(&mut self, level: Level, guess: Guess) -> Result<Attempt, GameError> {
        let date = self.date;
        let challenge = self
            .challenges
            .entry(level)
            .or_insert_with(|| generate(level, date));
        let state = self.states.entry(level).or_default();
        let attempt = *state.submit(guess, challenge)?;

        debug!(
            target: "funcle::session",
            level = level.name(),
            guess = %attempt.guess,
            evaluation = %attempt.evaluation,
            status = %state.status(),
            "guess submitted"
        );
        Ok(attempt)
    }

    /// First level, in difficulty order, that is not yet completed
    #[must_use]
    pub fn next_incomplete_level(&self) -> Option<Level> {
        Level::ALL
            .into_iter()
            .find(|level| !self.state(*level).completed)
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.next_incomplete_level().is_none()
    }

    /// Reset to fresh states if `today` is a different calendar day
    ///
    /// Returns true when a reset happened.
    pub fn rolled_over(&mut self, today: NaiveDate) -> bool {
        if today == self.date {
            return false;
        }
        info!(
            target: "funcle::session",
            from = %date_string(self.date),
            to = %date_string(today),
            "new day, resetting level states"
        );
        self.date = today;
        self.states = fresh_states();
        self.challenges.clear();
        true
    }
}
