//! Formatting utilities for terminal output and sharing

use crate::core::Level;
use crate::game::{Attempt, MAX_ATTEMPTS};
use chrono::{DateTime, TimeDelta, Utc};
use std::fmt::Write;
use std::time::Duration;

/// Result summary in the shareable emoji-grid format
///
/// The timer line reads 0 when no solve time is known.
///
/// # Examples
/// ```
/// use funcle::core::Level;
/// use funcle::output::formatters::share_text;
///
/// let text = share_text(Level::Pro, &[], None);
/// assert!(text.starts_with("🔢 Funcle Pro 0/6\n\n"));
/// assert!(text.contains("⏱️ Solved in 0s"));
/// ```
#[must_use]
pub fn share_text(level: Level, attempts: &[Attempt], solved_in: Option<Duration>) -> String {
    let mut text = format!(
        "🔢 Funcle {} {}/{MAX_ATTEMPTS}\n\n",
        level.title(),
        attempts.len()
    );
    for attempt in attempts {
        text.push_str(&attempt.evaluation.to_emoji());
        text.push('\n');
    }

    let secs = solved_in.map_or(0, |d| d.as_secs_f64().round() as u64);
    let _ = write!(text, "\n⏱️ Solved in {secs}s");
    text.push_str("\n🧮 Mathematical puzzle solving game");
    text.push_str("\n#Funcle #MathPuzzle #DailyChallenge");
    text
}

/// Time left until the next UTC midnight, when the puzzles change
#[must_use]
pub fn time_until_next_puzzle(now: DateTime<Utc>) -> TimeDelta {
    now.date_naive()
        .succ_opt()
        .and_then(|tomorrow| tomorrow.and_hms_opt(0, 0, 0))
        .map_or(TimeDelta::zero(), |midnight| midnight.and_utc() - now)
}

/// Countdown line shown after finishing a level
#[must_use]
pub fn format_countdown(remaining: TimeDelta) -> String {
    if remaining <= TimeDelta::zero() {
        return "New puzzle available!".to_string();
    }
    let secs = remaining.num_seconds();
    format!(
        "Next puzzle in: {}h {}m {}s",
        secs / 3600,
        (secs % 3600) / 60,
        secs % 60
    )
}

/// One board row: spaced digits then the feedback squares
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use funcle::core::{Guess, Level};
/// use funcle::game::Attempt;
/// use funcle::generator::generate;
/// use funcle::output::formatters::attempt_row;
///
/// let challenge = generate(Level::Noob, NaiveDate::from_ymd_opt(2025, 5, 5).unwrap());
/// let attempt = Attempt::new(Guess::new([3, 1, 4, 1, 5]).unwrap(), &challenge);
/// assert!(attempt_row(&attempt).starts_with("3 1 4 1 5  "));
/// ```
#[must_use]
pub fn attempt_row(attempt: &Attempt) -> String {
    let digits: Vec<String> = attempt.guess.digits().iter().map(u8::to_string).collect();
    format!("{}  {}", digits.join(" "), attempt.evaluation.to_emoji())
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    let filled = if max > 0.0 {
        ((value / max) * width as f64) as usize
    } else {
        0
    };
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
