//! Core domain types for Funcle
//!
//! Levels, the fraction-pair table, coefficient tuples, guesses and feedback.
//! Everything here is pure and free of I/O.

mod coefficients;
mod feedback;
mod guess;
mod level;

pub use coefficients::{COPRIME_PAIR_COUNT, Coefficients, CoprimePair, coprime_pairs};
pub use feedback::{Evaluation, Feedback};
pub use guess::{Guess, GuessError};
pub use level::{Level, LevelError};
