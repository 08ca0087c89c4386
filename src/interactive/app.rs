//! TUI application state and logic

use crate::core::{Guess, Level};
use crate::expr::Curve;
use crate::game::{MAX_ATTEMPTS, Session, Status, Store};
use crate::generator::today_utc;
use crate::output::formatters::{format_countdown, share_text, time_until_next_puzzle};
use anyhow::Result;
use chrono::Utc;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use rustc_hash::FxHashMap;
use std::io;
use std::time::{Duration, Instant};
use tracing::warn;

/// How often the countdown and day rollover are refreshed
const TICK: Duration = Duration::from_millis(500);

/// Application state
pub struct App {
    pub session: Session,
    store: Option<Store>,
    pub level: Level,
    /// Formula shown to the player for the current level
    pub display_formula: String,
    /// Sampled curve for the current level
    pub plot: Vec<(f64, f64)>,
    pub plot_is_fallback: bool,
    pub y_bounds: [f64; 2],
    pub show_plot: bool,
    pub input_buffer: String,
    pub messages: Vec<Message>,
    pub should_quit: bool,
    follow_clock: bool,
    started: FxHashMap<Level, Instant>,
    solved_in: FxHashMap<Level, Duration>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Guessing,
    Finished,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

#[derive(Debug, Clone)]
pub enum MessageStyle {
    Info,
    Success,
    Error,
}

/// Vertical plot bounds with 10% padding, or [-1, 1] when nothing is drawable
fn y_bounds(points: &[(f64, f64)]) -> [f64; 2] {
    let (min, max) = points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(_, y)| {
            (lo.min(y), hi.max(y))
        });
    if !min.is_finite() || !max.is_finite() {
        return [-1.0, 1.0];
    }
    let pad = ((max - min) * 0.1).max(0.5);
    [min - pad, max + pad]
}

impl App {
    /// Open on `start`, or the first level not yet finished today
    #[must_use]
    pub fn new(session: Session, store: Option<Store>, start: Option<Level>, follow_clock: bool) -> Self {
        let level = start
            .or_else(|| session.next_incomplete_level())
            .unwrap_or(Level::Noob);

        let mut app = Self {
            session,
            store,
            level,
            display_formula: String::new(),
            plot: Vec::new(),
            plot_is_fallback: false,
            y_bounds: [-1.0, 1.0],
            show_plot: true,
            input_buffer: String::new(),
            messages: vec![Message {
                text: "Guess the five hidden digits A B C D E. Enter submits.".to_string(),
                style: MessageStyle::Info,
            }],
            should_quit: false,
            follow_clock,
            started: FxHashMap::default(),
            solved_in: FxHashMap::default(),
        };
        app.select_level(level);
        app
    }

    #[must_use]
    pub fn input_mode(&self) -> InputMode {
        if self.status().is_finished() {
            InputMode::Finished
        } else {
            InputMode::Guessing
        }
    }

    #[must_use]
    pub fn status(&self) -> Status {
        self.session.state(self.level).status()
    }

    pub fn select_level(&mut self, level: Level) {
        self.level = level;
        self.input_buffer.clear();

        let challenge = self.session.challenge(level);
        self.display_formula.clone_from(&challenge.display_formula);
        let curve = Curve::for_challenge(challenge);
        self.plot = curve.plot();
        self.plot_is_fallback = curve.is_fallback();
        self.y_bounds = y_bounds(&self.plot);

        if !self.status().is_finished() {
            self.started.entry(level).or_insert_with(Instant::now);
        }
    }

    /// Move one tab left or right, wrapping around
    pub fn cycle_level(&mut self, forward: bool) {
        let count = Level::ALL.len();
        let index = self.level.index();
        let next = if forward {
            (index + 1) % count
        } else {
            (index + count - 1) % count
        };
        self.select_level(Level::ALL[next]);
    }

    pub fn go_to_next_level(&mut self) {
        if let Some(next) = self.session.next_incomplete_level() {
            self.select_level(next);
            self.add_message(&format!("{} Level", next.title()), MessageStyle::Info);
        } else {
            self.add_message("All Levels Complete! 🎉", MessageStyle::Success);
        }
    }

    pub fn push_digit(&mut self, c: char) {
        if c.is_ascii_digit() && self.input_buffer.len() < 5 && !self.status().is_finished() {
            self.input_buffer.push(c);
        }
    }

    pub fn pop_digit(&mut self) {
        self.input_buffer.pop();
    }

    pub fn submit_guess(&mut self) {
        if self.input_buffer.len() != 5 {
            self.add_message("Enter all five digits first", MessageStyle::Error);
            return;
        }
        let guess = match self.input_buffer.parse::<Guess>() {
            Ok(guess) => guess,
            Err(error) => {
                self.add_message(&error.to_string(), MessageStyle::Error);
                return;
            }
        };

        match self.session.submit(self.level, guess) {
            Ok(_) => {
                self.input_buffer.clear();
                self.save();
                self.after_guess();
            }
            Err(error) => self.add_message(&error.to_string(), MessageStyle::Error),
        }
    }

    fn after_guess(&mut self) {
        let used = self.session.state(self.level).attempts.len();
        match self.status() {
            Status::InProgress => {
                self.add_message(
                    &format!("{} attempts left", MAX_ATTEMPTS - used),
                    MessageStyle::Info,
                );
            }
            Status::Won => {
                if let Some(start) = self.started.get(&self.level) {
                    self.solved_in.insert(self.level, start.elapsed());
                }
                let celebration = match used {
                    1 => "🎯 First try! Extraordinary!",
                    2 | 3 => "✨ Splendid! Function found!",
                    4 | 5 => "👏 Well played! Function found!",
                    _ => "😅 Phew! Got it on the last try!",
                };
                self.add_message(celebration, MessageStyle::Success);
                self.suggest_next();
            }
            Status::Lost => {
                let answer = self.session.challenge(self.level).coefficients;
                self.add_message(
                    &format!("Out of attempts. The answer was {answer}"),
                    MessageStyle::Error,
                );
                self.suggest_next();
            }
        }
    }

    fn suggest_next(&mut self) {
        match self.session.next_incomplete_level() {
            Some(next) => self.add_message(
                &format!("Press 'n' to try {} Level", next.title()),
                MessageStyle::Info,
            ),
            None => self.add_message("All Levels Complete! 🎉", MessageStyle::Success),
        }
    }

    /// Share text once the current level is over
    #[must_use]
    pub fn share_text(&self) -> Option<String> {
        let state = self.session.state(self.level);
        state.status().is_finished().then(|| {
            share_text(
                self.level,
                &state.attempts,
                self.solved_in.get(&self.level).copied(),
            )
        })
    }

    #[must_use]
    pub fn countdown(&self) -> String {
        format_countdown(time_until_next_puzzle(Utc::now()))
    }

    /// Periodic work: reset to fresh puzzles when the UTC day changes
    pub fn tick(&mut self) {
        if self.follow_clock && self.session.rolled_over(today_utc()) {
            self.started.clear();
            self.solved_in.clear();
            self.select_level(Level::Noob);
            self.save();
            self.add_message("🌅 New day! Fresh puzzles loaded.", MessageStyle::Success);
        }
    }

    fn save(&mut self) {
        let Some(store) = &self.store else {
            return;
        };
        if let Err(error) = store.save(&self.session) {
            warn!(target: "funcle::tui", %error, "could not save progress");
            self.add_message("Could not save progress", MessageStyle::Error);
        }
    }

    pub fn add_message(&mut self, text: &str, style: MessageStyle) {
        self.messages.push(Message {
            text: text.to_string(),
            style,
        });

        // Keep only last 5 messages
        if self.messages.len() > 5 {
            self.messages.remove(0);
        }
    }
}

/// Run the TUI application
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling.
pub fn run_tui(app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| super::rendering::ui(f, &app))?;

        if !event::poll(TICK)? {
            app.tick();
            continue;
        }

        if let Event::Key(key) = event::read()? {
            // Only process key press events (fixes Windows double-input bug)
            if key.kind != KeyEventKind::Press {
                continue;
            }

            match key.code {
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    app.should_quit = true;
                }
                KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
                KeyCode::Char('n') => app.go_to_next_level(),
                KeyCode::Char('g') => app.show_plot = !app.show_plot,
                KeyCode::Char(c) if c.is_ascii_digit() => app.push_digit(c),
                KeyCode::Backspace => app.pop_digit(),
                KeyCode::Enter => app.submit_guess(),
                KeyCode::Right | KeyCode::Tab => app.cycle_level(true),
                KeyCode::Left | KeyCode::BackTab => app.cycle_level(false),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn app() -> App {
        let date = NaiveDate::from_ymd_opt(2025, 8, 8).unwrap();
        App::new(Session::new(date), None, None, false)
    }

    fn type_digits(app: &mut App, digits: &[u8; 5]) {
        for d in digits {
            app.push_digit(char::from(b'0' + d));
        }
    }

    #[test]
    fn opens_on_first_incomplete_level_with_plot() {
        let app = app();
        assert_eq!(app.level, Level::Noob);
        assert!(!app.plot.is_empty());
        assert!(!app.plot_is_fallback);
        assert!(app.y_bounds[0] < app.y_bounds[1]);
        assert_eq!(app.input_mode(), InputMode::Guessing);
    }

    #[test]
    fn input_accepts_five_digits_only() {
        let mut app = app();
        for c in "12a345678".chars() {
            app.push_digit(c);
        }
        assert_eq!(app.input_buffer, "12345");
        app.pop_digit();
        assert_eq!(app.input_buffer, "1234");
    }

    #[test]
    fn short_guess_is_not_submitted() {
        let mut app = app();
        app.push_digit('1');
        app.submit_guess();
        assert!(app.session.state(Level::Noob).attempts.is_empty());
        assert_eq!(app.input_buffer, "1");
    }

    #[test]
    fn winning_shows_share_text_and_blocks_input() {
        let mut app = app();
        let answer = *app.session.challenge(Level::Noob).coefficients.digits();
        type_digits(&mut app, &answer);
        app.submit_guess();

        assert_eq!(app.input_mode(), InputMode::Finished);
        let share = app.share_text().unwrap();
        assert!(share.starts_with("🔢 Funcle Noob 1/6"));

        app.push_digit('1');
        assert!(app.input_buffer.is_empty());

        app.go_to_next_level();
        assert_eq!(app.level, Level::Amateur);
        assert!(app.share_text().is_none());
    }

    #[test]
    fn tabs_wrap_around() {
        let mut app = app();
        app.cycle_level(false);
        assert_eq!(app.level, Level::Nerd);
        app.cycle_level(true);
        assert_eq!(app.level, Level::Noob);
    }

    #[test]
    fn y_bounds_pad_and_default() {
        assert_eq!(y_bounds(&[]), [-1.0, 1.0]);
        let [lo, hi] = y_bounds(&[(0.0, 0.0), (1.0, 10.0)]);
        assert!((lo + 1.0).abs() < 1e-12);
        assert!((hi - 11.0).abs() < 1e-12);
    }

    #[test]
    fn message_log_is_bounded() {
        let mut app = app();
        for i in 0..10 {
            app.add_message(&i.to_string(), MessageStyle::Info);
        }
        assert_eq!(app.messages.len(), 5);
        assert_eq!(app.messages[0].text, "5");
    }
}
