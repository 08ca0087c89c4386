//! Simple interactive CLI mode
//!
//! Line-based game without the TUI: type five digits to guess, a level name
//! to switch, `next`, `share` or `quit`.

use crate::core::{Guess, Level};
use crate::game::{MAX_ATTEMPTS, Session, Status, Store};
use crate::generator::today_utc;
use crate::output::formatters::{attempt_row, format_countdown, share_text, time_until_next_puzzle};
use chrono::Utc;
use colored::Colorize;
use rustc_hash::FxHashMap;
use std::io::{self, BufRead, Write};
use std::time::{Duration, Instant};
use tracing::warn;

/// How a simple-mode game is run
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleOptions {
    /// Level to open first; defaults to the first incomplete one
    pub start: Option<Level>,
    /// Reset to fresh puzzles when the UTC day changes mid-game
    pub follow_clock: bool,
}

/// Run the simple interactive CLI mode on stdin/stdout
///
/// Progress is written to `store` after every guess when one is given.
///
/// # Errors
///
/// Returns an error if reading input or writing output fails.
pub fn run_simple(session: &mut Session, store: Option<&Store>, options: SimpleOptions) -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    play(session, store, options, stdin.lock(), stdout.lock())
}

struct Timers {
    started: FxHashMap<Level, Instant>,
    solved_in: FxHashMap<Level, Duration>,
}

impl Timers {
    fn start(&mut self, level: Level) {
        self.started.entry(level).or_insert_with(Instant::now);
    }

    fn stop(&mut self, level: Level) -> Option<Duration> {
        let elapsed = self.started.get(&level)?.elapsed();
        self.solved_in.insert(level, elapsed);
        Some(elapsed)
    }
}

fn show_level<W: Write>(out: &mut W, session: &mut Session, level: Level) -> io::Result<()> {
    let formula = session.challenge(level).display_formula.clone();
    let state = session.state(level);

    writeln!(out, "{}", "─".repeat(60).cyan())?;
    writeln!(
        out,
        "{} {}  ({}/{MAX_ATTEMPTS} used)",
        "Level:".bright_cyan().bold(),
        level.title().bright_yellow().bold(),
        state.attempts.len()
    )?;
    writeln!(out, "{}", "─".repeat(60).cyan())?;
    writeln!(out, "\n  f(x) = {formula}\n")?;
    for (i, attempt) in state.attempts.iter().enumerate() {
        writeln!(out, "  {}. {}", i + 1, attempt_row(attempt))?;
    }
    match state.status() {
        Status::Won => writeln!(out, "\n  {}", "✅ Already solved".green())?,
        Status::Lost => writeln!(out, "\n  {}", "❌ Out of attempts".red())?,
        Status::InProgress => {}
    }
    writeln!(out)
}

fn print_help<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "Enter five digits for A B C D E (e.g. 31415 or 3 1 4 1 5).")?;
    writeln!(out, "  A-D are 1-9, E is 0-9")?;
    writeln!(out, "  🟩 right digit, right place")?;
    writeln!(out, "  🟨 digit appears elsewhere")?;
    writeln!(out, "  ⬜ digit not in the answer")?;
    writeln!(out, "Commands: <level name>, 'next', 'share', 'help', 'quit'\n")
}

fn save(session: &Session, store: Option<&Store>) {
    if let Some(store) = store {
        if let Err(error) = store.save(session) {
            warn!(target: "funcle::simple", %error, "could not save progress");
        }
    }
}

/// Drive a game from `input`, writing everything to `out`
#[allow(clippy::too_many_lines)] // Interactive game loop requires detailed handling
pub fn play<R: BufRead, W: Write>(
    session: &mut Session,
    store: Option<&Store>,
    options: SimpleOptions,
    input: R,
    mut out: W,
) -> io::Result<()> {
    writeln!(out, "\n╔══════════════════════════════════════════════════════════════╗")?;
    writeln!(out, "║                 Funcle - Guess the Function                  ║")?;
    writeln!(out, "╚══════════════════════════════════════════════════════════════╝\n")?;
    print_help(&mut out)?;

    let mut level = options
        .start
        .or_else(|| session.next_incomplete_level())
        .unwrap_or(Level::Noob);
    let mut timers = Timers {
        started: FxHashMap::default(),
        solved_in: FxHashMap::default(),
    };
    timers.start(level);
    show_level(&mut out, session, level)?;

    let mut lines = input.lines();
    loop {
        write!(out, "{} guess> ", level.name())?;
        out.flush()?;

        let Some(line) = lines.next() else {
            writeln!(out)?;
            break;
        };
        let command = line?.trim().to_lowercase();

        if options.follow_clock && session.rolled_over(today_utc()) {
            writeln!(out, "\n🌅 New day! Fresh puzzles loaded.\n")?;
            if !command.is_empty() {
                writeln!(out, "'{command}' was not submitted. Enter it again for the new puzzle.\n")?;
            }
            level = Level::Noob;
            timers.started.clear();
            timers.solved_in.clear();
            timers.start(level);
            show_level(&mut out, session, level)?;
            save(session, store);
            continue;
        }

        match command.as_str() {
            "" => continue,
            "quit" | "q" | "exit" => {
                writeln!(out, "\n👋 Thanks for playing!\n")?;
                break;
            }
            "help" | "h" | "?" => {
                print_help(&mut out)?;
                continue;
            }
            "share" | "s" => {
                let state = session.state(level);
                if state.status().is_finished() {
                    let solved_in = timers.solved_in.get(&level).copied();
                    writeln!(out, "\n{}\n", share_text(level, &state.attempts, solved_in))?;
                } else {
                    writeln!(out, "Finish this level first.\n")?;
                }
                continue;
            }
            "next" | "n" => {
                if let Some(next) = session.next_incomplete_level() {
                    level = next;
                    timers.start(level);
                    show_level(&mut out, session, level)?;
                } else {
                    writeln!(out, "{}\n", "All Levels Complete! 🎉".bright_green().bold())?;
                }
                continue;
            }
            _ => {}
        }

        if let Ok(target) = command.parse::<Level>() {
            level = target;
            timers.start(level);
            show_level(&mut out, session, level)?;
            continue;
        }

        let guess = match command.parse::<Guess>() {
            Ok(guess) => guess,
            Err(error) => {
                writeln!(out, "❌ {error}\n")?;
                continue;
            }
        };

        let attempt = match session.submit(level, guess) {
            Ok(attempt) => attempt,
            Err(error) => {
                writeln!(out, "❌ {error}. Type 'next' for another level.\n")?;
                continue;
            }
        };
        save(session, store);

        let used = session.state(level).attempts.len();
        writeln!(out, "  {}. {}", used, attempt_row(&attempt))?;

        match session.state(level).status() {
            Status::InProgress => {
                writeln!(out, "  {} attempts left\n", MAX_ATTEMPTS - used)?;
            }
            Status::Won => {
                let solved_in = timers.stop(level);
                writeln!(out, "\n{}", "═".repeat(60).bright_cyan())?;
                writeln!(
                    out,
                    "{}",
                    "    🎉  F U N C T I O N   F O U N D !  🎉".bright_green().bold()
                )?;
                writeln!(out, "{}", "═".repeat(60).bright_cyan())?;
                let formula = session.challenge(level).formula.clone();
                writeln!(out, "\n  f(x) = {formula}")?;
                writeln!(
                    out,
                    "\n{}\n",
                    share_text(level, &session.state(level).attempts, solved_in)
                )?;
            }
            Status::Lost => {
                timers.stop(level);
                let answer = session.challenge(level).coefficients;
                writeln!(out, "\n{} The answer was {answer}\n", "❌ Out of attempts.".red().bold())?;
            }
        }

        if session.state(level).status().is_finished() {
            match session.next_incomplete_level() {
                Some(next) => writeln!(out, "Type 'next' to try {} Level.\n", next.title())?,
                None => {
                    writeln!(out, "{}", "All Levels Complete! 🎉".bright_green().bold())?;
                    writeln!(out, "{}\n", format_countdown(time_until_next_puzzle(Utc::now())))?;
                }
            }
        }
    }

    Ok(())
}
