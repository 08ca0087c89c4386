//! Practice on a random past day's puzzles
//!
//! Only the date is random; the puzzle for that date is the same one players
//! saw then. Practice progress is never saved.

use super::simple::{SimpleOptions, run_simple};
use crate::core::Level;
use crate::game::Session;
use chrono::{Days, NaiveDate};
use rand::Rng;
use std::io;
use tracing::info;

/// How far back practice dates may go
pub const PRACTICE_WINDOW_DAYS: u64 = 365;

/// Pick a day between one and `PRACTICE_WINDOW_DAYS` days before `today`
#[must_use]
pub fn random_past_date<R: Rng>(rng: &mut R, today: NaiveDate) -> NaiveDate {
    let back = rng.random_range(1..=PRACTICE_WINDOW_DAYS);
    today.checked_sub_days(Days::new(back)).unwrap_or(today)
}

/// Fresh, unsaved session for a random day in the window before `today`
#[must_use]
pub fn practice_session<R: Rng>(rng: &mut R, today: NaiveDate) -> Session {
    Session::new(random_past_date(rng, today))
}

/// Play a random past day in simple mode without touching saved progress
///
/// # Errors
///
/// Returns an error if reading input or writing output fails.
pub fn run_practice(today: NaiveDate, level: Option<Level>) -> io::Result<()> {
    let mut session = practice_session(&mut rand::rng(), today);
    let date = session.date();
    info!(target: "funcle::practice", %date, "practice puzzle selected");
    println!("🎲 Practice puzzle from {date} (progress is not saved)");

    run_simple(
        &mut session,
        None,
        SimpleOptions {
            start: level,
            follow_clock: false,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn dates_fall_inside_window() {
        let today = NaiveDate::from_ymd_opt(2025, 10, 18).unwrap();
        let earliest = today - chrono::Duration::days(365);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..500 {
            let date = random_past_date(&mut rng, today);
            assert!(date < today);
            assert!(date >= earliest);
        }
    }

    #[test]
    fn same_seed_same_date() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let a = random_past_date(&mut StdRng::seed_from_u64(42), today);
        let b = random_past_date(&mut StdRng::seed_from_u64(42), today);
        assert_eq!(a, b);
    }

    #[test]
    fn session_follows_requested_day() {
        let puzzle_day = NaiveDate::from_ymd_opt(2021, 3, 1).unwrap();
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..50 {
            let session = practice_session(&mut rng, puzzle_day);
            assert!(session.date() < puzzle_day);
            assert!(session.date() >= puzzle_day - chrono::Duration::days(365));
            assert!(session.states().values().all(|s| s.attempts.is_empty()));
        }
    }
}
