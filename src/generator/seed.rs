//! Seed derivation for the daily challenge
//!
//! These three functions fix which puzzle appears on which day. Changing any
//! of them, including the float formula, changes every published puzzle.

use chrono::{NaiveDate, Utc};

/// Calendar-day string `YYYY-MM-DD`, the only entropy shared by all players
#[must_use]
pub fn date_string(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Today's calendar date in UTC
#[must_use]
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

/// Rolling polynomial hash (`acc * 31 + code`) with 32-bit signed overflow
///
/// Characters are hashed by UTF-16 code unit and the final value is the
/// absolute value of the signed accumulator, so `i32::MIN` maps to 2^31.
///
/// # Examples
/// ```
/// use funcle::generator::string_to_seed;
///
/// assert_eq!(string_to_seed(""), 0);
/// assert_eq!(string_to_seed("a"), 97);
/// assert_eq!(string_to_seed("ab"), 97 * 31 + 98);
/// ```
#[must_use]
pub fn string_to_seed(s: &str) -> u32 {
    let hash = s.encode_utf16().fold(0i32, |acc, unit| {
        acc.wrapping_shl(5)
            .wrapping_sub(acc)
            .wrapping_add(i32::from(unit))
    });
    hash.unsigned_abs()
}

/// `frac(sin(seed) * 10000)`, a reproducible draw in [0, 1)
#[must_use]
pub fn seeded_random(seed: f64) -> f64 {
    let x = seed.sin() * 10000.0;
    x - x.floor()
}

/// The k-th draw for an integer seed
#[must_use]
pub fn draw(seed: u32, k: u32) -> f64 {
    seeded_random(f64::from(seed) + f64::from(k))
}
