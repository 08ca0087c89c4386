//! Daily challenge listing and one-off guess checks

use crate::core::{Guess, GuessError, Level};
use crate::game::Attempt;
use crate::generator::{Challenge, generate, generate_all};
use chrono::NaiveDate;

/// Challenges for `date`, either one level or all five in order
#[must_use]
pub fn daily_challenges(date: NaiveDate, level: Option<Level>) -> Vec<Challenge> {
    match level {
        Some(level) => vec![generate(level, date)],
        None => generate_all(date).into(),
    }
}

/// Result of scoring a single guess outside any saved session
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub challenge: Challenge,
    pub attempt: Attempt,
}

/// Score `guess` against the day's challenge without touching saved state
///
/// # Errors
/// Returns `GuessError` if `guess` is not five digits.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use funcle::commands::check_guess;
/// use funcle::core::Level;
///
/// let date = NaiveDate::from_ymd_opt(2025, 2, 14).unwrap();
/// let result = check_guess(Level::Noob, date, "1 2 3 4 5").unwrap();
/// assert_eq!(result.attempt.guess.digits(), &[1, 2, 3, 4, 5]);
///
/// assert!(check_guess(Level::Noob, date, "12").is_err());
/// ```
pub fn check_guess(level: Level, date: NaiveDate, guess: &str) -> Result<CheckResult, GuessError> {
    let guess: Guess = guess.parse()?;
    let challenge = generate(level, date);
    let attempt = Attempt::new(guess, &challenge);
    Ok(CheckResult { challenge, attempt })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 1).unwrap()
    }

    #[test]
    fn all_levels_in_order() {
        let challenges = daily_challenges(date(), None);
        let levels: Vec<Level> = challenges.iter().map(|c| c.level).collect();
        assert_eq!(levels, Level::ALL.to_vec());
    }

    #[test]
    fn single_level() {
        let challenges = daily_challenges(date(), Some(Level::Pro));
        assert_eq!(challenges, vec![generate(Level::Pro, date())]);
    }

    #[test]
    fn check_with_answer_wins() {
        let answer = generate(Level::Nerd, date()).coefficients.to_string();
        let result = check_guess(Level::Nerd, date(), &answer).unwrap();
        assert!(result.attempt.evaluation.is_win());
    }

    #[test]
    fn check_rejects_bad_digits() {
        assert!(matches!(
            check_guess(Level::Noob, date(), "1234a"),
            Err(GuessError::NotADigit(_))
        ));
    }
}
