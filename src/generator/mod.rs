//! Daily challenge generator
//!
//! Maps (calendar date, level) to a formula and its five hidden digits.

mod challenge;
mod seed;

pub use challenge::{Challenge, Sign, generate, generate_all, generate_named};
pub use seed::{date_string, draw, seeded_random, string_to_seed, today_utc};
