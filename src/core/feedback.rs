//! Per-digit feedback for a guess against the hidden coefficients
//!
//! Each position receives one of three tags:
//! - Correct: same digit in the same position
//! - Present: digit occurs elsewhere and has not been claimed yet
//! - Absent: digit is not available in the remaining pool
//!
//! Duplicate digits follow Wordle rules: a tag never claims more occurrences
//! of a digit than the target holds.

use super::{Coefficients, Guess};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Feedback tag for a single position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feedback {
    Correct,
    Present,
    Absent,
}

impl Feedback {
    /// Colored-square glyph used by the share text
    #[must_use]
    pub const fn emoji(self) -> char {
        match self {
            Self::Correct => '🟩',
            Self::Present => '🟨',
            Self::Absent => '⬜',
        }
    }

    /// Lowercase tag name, matching the serialized form
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Correct => "correct",
            Self::Present => "present",
            Self::Absent => "absent",
        }
    }

    const fn from_char(ch: char) -> Option<Self> {
        match ch {
            'G' | 'g' | '🟩' => Some(Self::Correct),
            'Y' | 'y' | '🟨' => Some(Self::Present),
            '-' | '_' | '⬜' => Some(Self::Absent),
            _ => None,
        }
    }
}

/// Feedback for a whole guess, one tag per coefficient position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Evaluation([Feedback; 5]);

impl Evaluation {
    /// All positions correct
    pub const PERFECT: Self = Self([Feedback::Correct; 5]);

    /// Score `guess` against `target`
    ///
    /// # Algorithm
    /// 1. First pass: mark exact matches and remove them from the pool
    /// 2. Second pass: for every unmarked position, claim one remaining
    ///    occurrence of the digit if any is left, else mark it absent
    ///
    /// The first pass completes before any second-pass lookup, so an exact
    /// match always wins over a multiset match for the same digit.
    ///
    /// # Examples
    /// ```
    /// use funcle::core::{Coefficients, Evaluation, Feedback, Guess};
    ///
    /// let guess = Guess::new([3, 4, 5, 6, 7]).unwrap();
    /// let target = Coefficients::from_digits([7, 6, 5, 4, 3]);
    /// let evaluation = Evaluation::calculate(&guess, &target);
    ///
    /// assert_eq!(evaluation.tags()[2], Feedback::Correct);
    /// assert_eq!(evaluation.count_present(), 4);
    /// ```
    #[must_use]
    pub fn calculate(guess: &Guess, target: &Coefficients) -> Self {
        let mut result = [None; 5];
        let mut available = target.digit_counts();

        // First pass: exact position matches
        for (i, slot) in result.iter_mut().enumerate() {
            let digit = guess.digit_at(i);
            if digit == target.digit_at(i) {
                *slot = Some(Feedback::Correct);
                if let Some(count) = available.get_mut(&digit) {
                    *count = count.saturating_sub(1);
                }
            }
        }

        // Second pass: digits present elsewhere in the remaining pool
        for (i, slot) in result.iter_mut().enumerate() {
            if slot.is_some() {
                continue;
            }
            let digit = guess.digit_at(i);
            *slot = match available.get_mut(&digit) {
                Some(count) if *count > 0 => {
                    *count -= 1;
                    Some(Feedback::Present)
                }
                _ => Some(Feedback::Absent),
            };
        }

        Self(result.map(|tag| tag.unwrap_or(Feedback::Absent)))
    }

    #[must_use]
    pub const fn from_tags(tags: [Feedback; 5]) -> Self {
        Self(tags)
    }

    #[inline]
    #[must_use]
    pub const fn tags(&self) -> &[Feedback; 5] {
        &self.0
    }

    /// True when every position is correct
    #[must_use]
    pub fn is_win(&self) -> bool {
        *self == Self::PERFECT
    }

    #[must_use]
    pub fn count_correct(&self) -> usize {
        self.0.iter().filter(|&&t| t == Feedback::Correct).count()
    }

    #[must_use]
    pub fn count_present(&self) -> usize {
        self.0.iter().filter(|&&t| t == Feedback::Present).count()
    }

    /// Render as colored squares, e.g. "🟩🟨⬜🟩🟨"
    #[must_use]
    pub fn to_emoji(&self) -> String {
        self.0.iter().map(|t| t.emoji()).collect()
    }

    /// Parse from "GY-GY" or "🟩🟨⬜🟩🟨"
    ///
    /// # Examples
    /// ```
    /// use funcle::core::Evaluation;
    ///
    /// let a = Evaluation::parse("GY-GY").unwrap();
    /// let b = Evaluation::parse("🟩🟨⬜🟩🟨").unwrap();
    /// assert_eq!(a, b);
    /// ```
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let tags: Vec<Feedback> = s
            .chars()
            .map(Feedback::from_char)
            .collect::<Option<_>>()?;
        let tags: [Feedback; 5] = tags.try_into().ok()?;
        Some(Self(tags))
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_emoji())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::Feedback::{Absent, Correct, Present};

    fn eval(guess: [u8; 5], target: [u8; 5]) -> Evaluation {
        Evaluation::calculate(
            &Guess::new(guess).unwrap(),
            &Coefficients::from_digits(target),
        )
    }

    #[test]
    fn all_same_digit_is_perfect() {
        let e = eval([3, 3, 3, 3, 3], [3, 3, 3, 3, 3]);
        assert_eq!(e, Evaluation::PERFECT);
        assert!(e.is_win());
        assert_eq!(e.count_correct(), 5);
    }

    #[test]
    fn reversed_digits_are_present_except_middle() {
        let e = eval([3, 4, 5, 6, 7], [7, 6, 5, 4, 3]);
        assert_eq!(e.tags(), &[Present, Present, Correct, Present, Present]);
    }

    #[test]
    fn duplicates_respect_target_multiplicity() {
        // Pool after the exact matches at 0 and 2: {2, 1, 1}
        let e = eval([1, 1, 2, 2, 2], [1, 2, 2, 1, 1]);
        assert_eq!(e.tags(), &[Correct, Present, Correct, Present, Absent]);
    }

    #[test]
    fn missing_digit_is_absent() {
        let e = eval([9, 1, 2, 3, 4], [1, 2, 3, 4, 5]);
        assert_eq!(e.tags()[0], Absent);
        assert_eq!(e.count_correct(), 0);
        assert_eq!(e.count_present(), 4);
    }

    #[test]
    fn exact_match_takes_priority_over_earlier_present() {
        // The single 5 belongs to position 4, so position 0 gets nothing
        let e = eval([5, 0, 0, 0, 5], [1, 2, 3, 4, 5]);
        assert_eq!(e.tags(), &[Absent, Absent, Absent, Absent, Correct]);
    }

    #[test]
    fn tags_never_exceed_multiplicity() {
        let targets = [[1, 2, 2, 1, 1], [7, 6, 5, 4, 3], [0, 0, 0, 9, 9], [4, 4, 4, 4, 1]];
        for target in targets {
            for seed in 0..2000u32 {
                let mut digits = [0u8; 5];
                let mut n = seed.wrapping_mul(2_654_435_761);
                for d in &mut digits {
                    *d = (n % 10) as u8;
                    n /= 10;
                }
                let e = eval(digits, target);
                for value in 0..=9u8 {
                    let claimed = (0..5)
                        .filter(|&i| digits[i] == value && e.tags()[i] != Absent)
                        .count();
                    let held = target.iter().filter(|&&t| t == value).count();
                    assert!(claimed <= held, "{digits:?} vs {target:?}");
                }
            }
        }
    }

    #[test]
    fn evaluation_is_idempotent() {
        let guess = Guess::new([1, 1, 2, 2, 2]).unwrap();
        let target = Coefficients::from_digits([1, 2, 2, 1, 1]);
        assert_eq!(
            Evaluation::calculate(&guess, &target),
            Evaluation::calculate(&guess, &target)
        );
    }

    #[test]
    fn emoji_rendering() {
        let e = Evaluation::from_tags([Correct, Present, Absent, Correct, Present]);
        assert_eq!(e.to_emoji(), "🟩🟨⬜🟩🟨");
        assert_eq!(e.to_string(), "🟩🟨⬜🟩🟨");
    }

    #[test]
    fn parse_invalid() {
        assert!(Evaluation::parse("GYG").is_none());
        assert!(Evaluation::parse("GYGGYG").is_none());
        assert!(Evaluation::parse("GXGGY").is_none());
        assert!(Evaluation::parse("").is_none());
    }

    #[test]
    fn serde_uses_tag_names() {
        let e = Evaluation::from_tags([Correct, Present, Absent, Absent, Absent]);
        let json = serde_json::to_string(&e).unwrap();
        assert_eq!(json, r#"["correct","present","absent","absent","absent"]"#);
    }
}
