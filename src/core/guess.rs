//! Player guesses
//!
//! A guess is five digits in 0..=9, one per coefficient position.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A validated five-digit guess
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[u8; 5]", into = "[u8; 5]")]
pub struct Guess([u8; 5]);

/// Error type for rejected guesses
///
/// Rejection happens before any evaluation, so no game state changes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuessError {
    #[error("guess must have exactly 5 digits, got {0}")]
    WrongLength(usize),
    #[error("digit {value} at position {position} is outside 0-9")]
    DigitOutOfRange { position: usize, value: u32 },
    #[error("'{0}' is not a digit")]
    NotADigit(String),
}

impl Guess {
    /// Create a guess from raw values
    ///
    /// # Errors
    /// Returns `GuessError::DigitOutOfRange` if any value exceeds 9.
    ///
    /// # Examples
    /// ```
    /// use funcle::core::Guess;
    ///
    /// let guess = Guess::new([3, 1, 4, 1, 5]).unwrap();
    /// assert_eq!(guess.digits(), &[3, 1, 4, 1, 5]);
    ///
    /// assert!(Guess::new([3, 1, 4, 1, 10]).is_err());
    /// ```
    pub fn new(digits: [u8; 5]) -> Result<Self, GuessError> {
        if let Some((position, &value)) = digits.iter().enumerate().find(|(_, d)| **d > 9) {
            return Err(GuessError::DigitOutOfRange {
                position,
                value: u32::from(value),
            });
        }
        Ok(Self(digits))
    }

    #[inline]
    #[must_use]
    pub const fn digits(&self) -> &[u8; 5] {
        &self.0
    }

    /// # Panics
    /// Panics if position >= 5
    #[inline]
    #[must_use]
    pub const fn digit_at(&self, position: usize) -> u8 {
        self.0[position]
    }
}

impl TryFrom<[u8; 5]> for Guess {
    type Error = GuessError;

    fn try_from(digits: [u8; 5]) -> Result<Self, Self::Error> {
        Self::new(digits)
    }
}

impl From<Guess> for [u8; 5] {
    fn from(guess: Guess) -> Self {
        guess.0
    }
}

impl FromStr for Guess {
    type Err = GuessError;

    /// Parse `"31415"`, `"3 1 4 1 5"` or `"3,1,4,1,5"`
    ///
    /// With separators each token is read as a number, so `"3,1,4,1,12"`
    /// reports the out-of-range value instead of a length error.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let separated = s.contains(|c: char| c == ',' || c.is_whitespace());

        let values: Vec<u32> = if separated {
            s.split(|c: char| c == ',' || c.is_whitespace())
                .filter(|token| !token.is_empty())
                .map(|token| {
                    token
                        .parse::<u32>()
                        .map_err(|_| GuessError::NotADigit(token.to_string()))
                })
                .collect::<Result<_, _>>()?
        } else {
            s.chars()
                .map(|c| c.to_digit(10).ok_or_else(|| GuessError::NotADigit(c.to_string())))
                .collect::<Result<_, _>>()?
        };

        if values.len() != 5 {
            return Err(GuessError::WrongLength(values.len()));
        }

        let mut digits = [0u8; 5];
        for (position, (slot, &value)) in digits.iter_mut().zip(&values).enumerate() {
            *slot = u8::try_from(value)
                .ok()
                .filter(|d| *d <= 9)
                .ok_or(GuessError::DigitOutOfRange { position, value })?;
        }

        Ok(Self(digits))
    }
}

impl fmt::Display for Guess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for digit in &self.0 {
            write!(f, "{digit}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guess_creation_valid() {
        let guess = Guess::new([0, 9, 5, 5, 1]).unwrap();
        assert_eq!(guess.digits(), &[0, 9, 5, 5, 1]);
        assert_eq!(guess.digit_at(1), 9);
    }

    #[test]
    fn guess_creation_out_of_range() {
        assert_eq!(
            Guess::new([1, 2, 10, 4, 5]),
            Err(GuessError::DigitOutOfRange {
                position: 2,
                value: 10
            })
        );
    }

    #[test]
    fn parse_compact() {
        let guess: Guess = "31415".parse().unwrap();
        assert_eq!(guess.digits(), &[3, 1, 4, 1, 5]);
    }

    #[test]
    fn parse_separated() {
        let spaced: Guess = "3 1 4 1 5".parse().unwrap();
        let commas: Guess = "3,1,4,1,5".parse().unwrap();
        let mixed: Guess = " 3, 1, 4, 1, 5 ".parse().unwrap();
        assert_eq!(spaced, commas);
        assert_eq!(spaced, mixed);
    }

    #[test]
    fn parse_wrong_length() {
        assert_eq!("3141".parse::<Guess>(), Err(GuessError::WrongLength(4)));
        assert_eq!("314159".parse::<Guess>(), Err(GuessError::WrongLength(6)));
        assert_eq!("".parse::<Guess>(), Err(GuessError::WrongLength(0)));
    }

    #[test]
    fn parse_out_of_range_token() {
        assert_eq!(
            "3,1,4,1,12".parse::<Guess>(),
            Err(GuessError::DigitOutOfRange {
                position: 4,
                value: 12
            })
        );
    }

    #[test]
    fn parse_non_digit() {
        assert!(matches!(
            "31a15".parse::<Guess>(),
            Err(GuessError::NotADigit(_))
        ));
        assert!(matches!(
            "3 1 -4 1 5".parse::<Guess>(),
            Err(GuessError::NotADigit(_))
        ));
    }

    #[test]
    fn display_is_compact() {
        let guess = Guess::new([0, 0, 7, 1, 2]).unwrap();
        assert_eq!(guess.to_string(), "00712");
    }

    #[test]
    fn serde_rejects_out_of_range() {
        assert!(serde_json::from_str::<Guess>("[1,2,3,4,5]").is_ok());
        assert!(serde_json::from_str::<Guess>("[1,2,3,4,11]").is_err());
    }
}
