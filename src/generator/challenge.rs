//! Deterministic daily challenge generation
//!
//! A challenge is a pure function of the calendar day and the level. Every
//! player who asks for the same (date, level) gets the same formula.

use super::seed::{date_string, draw, string_to_seed};
use crate::core::{Coefficients, Level, LevelError, coprime_pairs};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Sign joining two formula terms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sign {
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "-")]
    Minus,
}

impl Sign {
    /// Strictly above one half is a plus
    #[must_use]
    pub fn from_draw(r: f64) -> Self {
        if r > 0.5 { Self::Plus } else { Self::Minus }
    }

    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Plus => '+',
            Self::Minus => '-',
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// One level's puzzle for one calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    pub level: Level,
    /// Calendar day as `YYYY-MM-DD`
    pub date: String,
    pub seed: u32,
    /// Indices into `level.templates()` for the two terms
    pub template_indices: [usize; 2],
    /// Signs drawn at k=5..7; the formula uses the first two
    pub signs: [Sign; 3],
    /// Formula with placeholder names, shown to the player
    pub display_formula: String,
    /// Same formula with the hidden digits substituted
    pub formula: String,
    pub coefficients: Coefficients,
}

impl Challenge {
    /// The two templates used by this challenge
    #[must_use]
    pub fn templates(&self) -> [&'static str; 2] {
        let templates = self.level.templates();
        self.template_indices.map(|i| templates[i])
    }
}

/// Pick an index with `floor(r * len)`
fn pick(r: f64, len: usize) -> usize {
    ((r * len as f64).floor() as usize).min(len - 1)
}

fn compose(
    [first, second]: [&str; 2],
    [a, b, c, d, e]: [&str; 5],
    [sign1, sign2, _]: [Sign; 3],
) -> String {
    format!("({a}/{b}) * ({first}) {sign1} ({c}/{d}) * ({second}) {sign2} {e}")
}

/// Generate the challenge for `level` on `date`
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use funcle::core::Level;
/// use funcle::generator::generate;
///
/// let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
/// let challenge = generate(Level::Medium, date);
///
/// assert_eq!(challenge.date, "2025-06-01");
/// assert!(challenge.display_formula.starts_with("(A/B) * ("));
/// assert_eq!(challenge, generate(Level::Medium, date));
/// ```
#[must_use]
pub fn generate(level: Level, date: NaiveDate) -> Challenge {
    let date = date_string(date);
    let seed = string_to_seed(&format!("{date}{}", level.name()));
    let r = |k: u32| draw(seed, k);

    let templates = level.templates();
    let first = pick(r(0), templates.len());
    let mut second = pick(r(1), templates.len());
    if first == second && templates.len() > 1 {
        second = (second + 1) % templates.len();
    }

    let pairs = coprime_pairs();
    let ab = pairs[pick(r(2), pairs.len())];
    let cd = pairs[pick(r(3), pairs.len())];
    let e = (r(4) * 10.0).floor() as u8;
    let signs = [5, 6, 7].map(|k| Sign::from_draw(r(k)));

    let coefficients = Coefficients::from_parts(ab, cd, e.min(9));
    let chosen = [templates[first], templates[second]];
    let display_formula = compose(chosen, ["A", "B", "C", "D", "E"], signs);
    let digits = coefficients.digits().map(|d| d.to_string());
    let formula = compose(chosen, digits.each_ref().map(String::as_str), signs);

    debug!(
        target: "funcle::generator",
        %date, level = level.name(), seed, first, second,
        "generated challenge"
    );

    Challenge {
        level,
        date,
        seed,
        template_indices: [first, second],
        signs,
        display_formula,
        formula,
        coefficients,
    }
}

/// Generate a challenge from a level name
///
/// # Errors
/// Returns `LevelError::InvalidLevel` for names outside the five levels.
pub fn generate_named(level: &str, date: NaiveDate) -> Result<Challenge, LevelError> {
    Ok(generate(level.parse()?, date))
}

/// Generate every level's challenge for `date`, in level order
#[must_use]
pub fn generate_all(date: NaiveDate) -> [Challenge; 5] {
    Level::ALL.map(|level| generate(level, date))
}
