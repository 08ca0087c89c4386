//! One level's round: attempts, status and the terminal transitions

use super::{GameError, MAX_ATTEMPTS};
use crate::core::{Evaluation, Guess};
use crate::generator::Challenge;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A submitted guess and its feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attempt {
    pub guess: Guess,
    pub evaluation: Evaluation,
}

impl Attempt {
    #[must_use]
    pub fn new(guess: Guess, challenge: &Challenge) -> Self {
        Self {
            guess,
            evaluation: Evaluation::calculate(&guess, &challenge.coefficients),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    InProgress,
    Won,
    Lost,
}

impl Status {
    #[must_use]
    pub const fn is_finished(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::InProgress => "in progress",
            Self::Won => "won",
            Self::Lost => "lost",
        })
    }
}

/// Persisted progress for one level on one day
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelState {
    pub completed: bool,
    pub won: Option<bool>,
    #[serde(default)]
    pub attempts: Vec<Attempt>,
    /// Unix milliseconds of the last change
    #[serde(default)]
    pub timestamp: i64,
}

impl LevelState {
    #[must_use]
    pub fn status(&self) -> Status {
        match (self.completed, self.won) {
            (false, _) => Status::InProgress,
            (true, Some(true)) => Status::Won,
            (true, _) => Status::Lost,
        }
    }

    #[must_use]
    pub fn attempts_left(&self) -> usize {
        MAX_ATTEMPTS.saturating_sub(self.attempts.len())
    }

    /// Rederive `completed` and `won` from the recorded attempts
    ///
    /// Attempts after a win or past `MAX_ATTEMPTS` are dropped. Returns
    /// whether anything changed.
    pub fn repair(&mut self) -> bool {
        let before = (self.completed, self.won, self.attempts.len());

        if let Some(win) = self.attempts.iter().position(|a| a.evaluation.is_win()) {
            self.attempts.truncate(win + 1);
            self.completed = true;
            self.won = Some(true);
        } else if self.attempts.len() >= MAX_ATTEMPTS {
            self.attempts.truncate(MAX_ATTEMPTS);
            self.completed = true;
            self.won = Some(false);
        } else {
            self.completed = false;
            self.won = None;
        }

        before != (self.completed, self.won, self.attempts.len())
    }

    /// Evaluate `guess` against `challenge` and record it
    ///
    /// # Errors
    /// Returns `GameError::Finished` once the round is won or lost; the
    /// state is left untouched.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use funcle::core::{Guess, Level};
    /// use funcle::game::{LevelState, Status};
    /// use funcle::generator::generate;
    ///
    /// let challenge = generate(Level::Noob, NaiveDate::from_ymd_opt(2025, 3, 14).unwrap());
    /// let mut state = LevelState::default();
    ///
    /// let answer = Guess::new(*challenge.coefficients.digits()).unwrap();
    /// state.submit(answer, &challenge).unwrap();
    ///
    /// assert_eq!(state.status(), Status::Won);
    /// assert!(state.submit(answer, &challenge).is_err());
    /// ```
    pub fn submit(&mut self, guess: Guess, challenge: &Challenge) -> Result<&Attempt, GameError> {
        let status = self.status();
        if status.is_finished() || self.attempts.len() >= MAX_ATTEMPTS {
            return Err(GameError::Finished(status));
        }

        let attempt = Attempt::new(guess, challenge);
        self.attempts.push(attempt);

        if attempt.evaluation.is_win() {
            self.completed = true;
            self.won = Some(true);
        } else if self.attempts.len() >= MAX_ATTEMPTS {
            self.completed = true;
            self.won = Some(false);
        }
        self.timestamp = Utc::now().timestamp_millis();

        Ok(&self.attempts[self.attempts.len() - 1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Feedback, Level};
    use crate::generator::generate;
    use chrono::NaiveDate;

    fn challenge() -> Challenge {
        generate(Level::Medium, NaiveDate::from_ymd_opt(2025, 7, 4).unwrap())
    }

    fn answer(challenge: &Challenge) -> Guess {
        Guess::new(*challenge.coefficients.digits()).unwrap()
    }

    /// A guess sharing no digit with the answer where one exists
    fn miss(challenge: &Challenge) -> Guess {
        let digits = challenge.coefficients.digits();
        let unused = (0..=9u8).find(|d| !digits.contains(d)).unwrap();
        Guess::new([unused; 5]).unwrap()
    }

    #[test]
    fn fresh_state_is_in_progress() {
        let state = LevelState::default();
        assert_eq!(state.status(), Status::InProgress);
        assert_eq!(state.attempts_left(), MAX_ATTEMPTS);
    }

    #[test]
    fn winning_guess_completes_round() {
        let challenge = challenge();
        let mut state = LevelState::default();

        let attempt = *state.submit(answer(&challenge), &challenge).unwrap();
        assert!(attempt.evaluation.is_win());
        assert!(state.completed);
        assert_eq!(state.won, Some(true));
        assert_eq!(state.status(), Status::Won);
        assert!(state.timestamp > 0);
    }

    #[test]
    fn sixth_miss_loses() {
        let challenge = challenge();
        let mut state = LevelState::default();
        let guess = miss(&challenge);

        for attempt in 1..MAX_ATTEMPTS {
            state.submit(guess, &challenge).unwrap();
            assert_eq!(state.status(), Status::InProgress, "after {attempt}");
        }
        let last = *state.submit(guess, &challenge).unwrap();
        assert_eq!(last.evaluation.tags(), &[Feedback::Absent; 5]);
        assert_eq!(state.status(), Status::Lost);
        assert_eq!(state.won, Some(false));
        assert_eq!(state.attempts_left(), 0);
    }

    #[test]
    fn win_on_last_attempt_counts() {
        let challenge = challenge();
        let mut state = LevelState::default();
        for _ in 1..MAX_ATTEMPTS {
            state.submit(miss(&challenge), &challenge).unwrap();
        }
        state.submit(answer(&challenge), &challenge).unwrap();
        assert_eq!(state.status(), Status::Won);
    }

    #[test]
    fn finished_round_rejects_guesses() {
        let challenge = challenge();
        let mut state = LevelState::default();
        state.submit(answer(&challenge), &challenge).unwrap();
        let before = state.clone();

        assert_eq!(
            state.submit(miss(&challenge), &challenge),
            Err(GameError::Finished(Status::Won))
        );
        assert_eq!(state, before);
    }

    #[test]
    fn serializes_with_lowercase_tags() {
        let challenge = challenge();
        let mut state = LevelState::default();
        state.submit(miss(&challenge), &challenge).unwrap();

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["completed"], false);
        assert_eq!(json["won"], serde_json::Value::Null);
        assert_eq!(json["attempts"][0]["evaluation"][0], "absent");

        let back: LevelState = serde_json::from_value(json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn repair_closes_exhausted_round() {
        let challenge = challenge();
        let attempt = Attempt::new(miss(&challenge), &challenge);
        let mut state = LevelState {
            attempts: vec![attempt; MAX_ATTEMPTS + 2],
            ..LevelState::default()
        };

        assert!(state.repair());
        assert_eq!(state.status(), Status::Lost);
        assert_eq!(state.attempts.len(), MAX_ATTEMPTS);
        assert!(!state.repair());
    }

    #[test]
    fn repair_trims_after_win() {
        let challenge = challenge();
        let missed = Attempt::new(miss(&challenge), &challenge);
        let hit = Attempt::new(answer(&challenge), &challenge);
        let mut state = LevelState {
            completed: false,
            won: Some(false),
            attempts: vec![missed, hit, missed],
            timestamp: 0,
        };

        assert!(state.repair());
        assert_eq!(state.status(), Status::Won);
        assert_eq!(state.attempts.len(), 2);
    }

    #[test]
    fn repair_reopens_unfinished_round() {
        let challenge = challenge();
        let mut state = LevelState {
            completed: true,
            won: Some(false),
            attempts: vec![Attempt::new(miss(&challenge), &challenge)],
            timestamp: 0,
        };

        assert!(state.repair());
        assert_eq!(state.status(), Status::InProgress);
        assert!(state.submit(miss(&challenge), &challenge).is_ok());
    }

    #[test]
    fn missing_fields_default() {
        let state: LevelState =
            serde_json::from_str(r#"{"completed": false, "won": false}"#).unwrap();
        assert!(state.attempts.is_empty());
        assert_eq!(state.status(), Status::InProgress);
    }
}
