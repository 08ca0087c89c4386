//! Funcle
//!
//! A daily function-guessing puzzle. Each calendar day and difficulty level
//! deterministically yields a hidden formula with five digit coefficients;
//! players guess the digits and get Wordle-style feedback.
//!
//! # Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use funcle::core::{Evaluation, Guess, Level};
//! use funcle::generator::generate;
//!
//! let date = NaiveDate::from_ymd_opt(2025, 10, 18).unwrap();
//! let challenge = generate(Level::Medium, date);
//! println!("f(x) = {}", challenge.display_formula);
//!
//! let guess = Guess::new([3, 1, 4, 1, 5]).unwrap();
//! let evaluation = Evaluation::calculate(&guess, &challenge.coefficients);
//! println!("{evaluation}");
//! ```

// Core domain types
pub mod core;

// Deterministic daily challenges
pub mod generator;

// Formula parsing and evaluation
pub mod expr;

// Rounds, sessions and saved progress
pub mod game;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;
