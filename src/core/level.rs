//! Difficulty levels and their template vocabularies
//!
//! Each level owns a fixed, ordered list of expression skeletons in the free
//! variable `x`. The order matters: the generator indexes into it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One of the five difficulty tiers, ordered from easiest to hardest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Noob,
    Amateur,
    Medium,
    Pro,
    Nerd,
}

/// Error for level names outside the fixed five
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LevelError {
    #[error("unknown level: {0}")]
    InvalidLevel(String),
}

const NOOB: &[&str] = &["x^2", "x"];

const AMATEUR: &[&str] = &[
    "abs(x)",
    "1 / (1 + abs(x))",
    "sqrt(abs(x))",
    "x^3 / (1 + x^2)",
];

const MEDIUM: &[&str] = &[
    "sin(x)",
    "cos(x)",
    "tanh(x)",
    "atan(x)",
    "x * exp(-x^2/10)",
    "sin(x) * exp(-abs(x)/5)",
];

const PRO: &[&str] = &[
    "x / (1 + x^2)",
    "(1 - exp(-abs(x)))",
    "log(1 + abs(x)) / log(11)",
    "x * sin(x) / (1 + x^2/4)",
    "sech(x/2)",
];

const NERD: &[&str] = &[
    "sin(pi * x) / (pi * x)",
    "erf(x)",
    "gamma(1 + abs(x)/10) / gamma(2)",
    "lgamma(1 + abs(x)) / lgamma(11)",
    "(2 * atan(x) / pi)",
];

impl Level {
    /// All levels in difficulty order
    pub const ALL: [Self; 5] = [Self::Noob, Self::Amateur, Self::Medium, Self::Pro, Self::Nerd];

    /// Lowercase identifier, also the string mixed into the daily seed
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Noob => "noob",
            Self::Amateur => "amateur",
            Self::Medium => "medium",
            Self::Pro => "pro",
            Self::Nerd => "nerd",
        }
    }

    /// Capitalized name for headings and share text
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Noob => "Noob",
            Self::Amateur => "Amateur",
            Self::Medium => "Medium",
            Self::Pro => "Pro",
            Self::Nerd => "Nerd",
        }
    }

    /// Ordered template list for this level
    #[must_use]
    pub const fn templates(self) -> &'static [&'static str] {
        match self {
            Self::Noob => NOOB,
            Self::Amateur => AMATEUR,
            Self::Medium => MEDIUM,
            Self::Pro => PRO,
            Self::Nerd => NERD,
        }
    }

    /// Position of this level in [`Level::ALL`]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Level {
    type Err = LevelError;

    /// Parse a level name
    ///
    /// # Examples
    /// ```
    /// use funcle::core::Level;
    ///
    /// assert_eq!("nerd".parse::<Level>().unwrap(), Level::Nerd);
    /// assert!("expert".parse::<Level>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.name() == s)
            .ok_or_else(|| LevelError::InvalidLevel(s.to_string()))
    }
}
