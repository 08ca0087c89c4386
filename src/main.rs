//! Funcle - CLI
//!
//! Daily function-guessing puzzle with TUI and CLI modes.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use funcle::{
    commands::{
        AuditConfig, SimpleOptions, check_guess, daily_challenges, evaluate_formula, run_audit,
        run_practice, run_simple,
    },
    core::Level,
    game::Store,
    generator::today_utc,
    output::{print_audit_statistics, print_challenges, print_check_result, print_eval_result},
};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "funcle",
    about = "Daily function-guessing puzzle: find the five hidden digits of today's formula",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Puzzle day as YYYY-MM-DD (default: today, UTC)
    #[arg(long, global = true, env = "FUNCLE_DATE")]
    date: Option<NaiveDate>,

    /// Where daily progress is saved
    #[arg(long, global = true, env = "FUNCLE_STATE", default_value = "funcle-state.json")]
    state_file: PathBuf,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive TUI mode (default - plotted function and attempt board)
    Play {
        /// Level to open first
        #[arg(short, long)]
        level: Option<Level>,
    },

    /// Simple CLI mode (line-based game without TUI)
    Simple {
        /// Level to open first
        #[arg(short, long)]
        level: Option<Level>,
    },

    /// Print the day's challenges
    Daily {
        /// Only this level
        #[arg(short, long)]
        level: Option<Level>,

        /// Also show the hidden digits
        #[arg(short, long)]
        reveal: bool,
    },

    /// Score one guess against the day's challenge (nothing is saved)
    Check {
        /// noob, amateur, medium, pro or nerd
        level: Level,

        /// Five digits, e.g. 31415 or "3 1 4 1 5"
        guess: String,
    },

    /// Evaluate a formula at one or more points
    Eval {
        /// Formula in x, e.g. "(3/4) * (sin(x)) + 2"
        formula: String,

        /// Points to evaluate at
        #[arg(required = true, allow_negative_numbers = true)]
        xs: Vec<f64>,
    },

    /// Check generator invariants over a range of days
    Audit {
        /// Number of consecutive days
        #[arg(short = 'n', long, default_value = "365")]
        days: u64,

        /// First day (default: the puzzle day)
        #[arg(short, long)]
        from: Option<NaiveDate>,
    },

    /// Play a random puzzle from the year before the puzzle day (not saved)
    Practice {
        /// Level to open first
        #[arg(short, long)]
        level: Option<Level>,
    },
}

/// Logs go to stderr; `FUNCLE_LOG` overrides the `-v` level
fn init_tracing(verbose: u8, quiet_by_default: bool) {
    let default = match verbose {
        0 if quiet_by_default => "off",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env("FUNCLE_LOG").unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Default to Play mode if no command given
    let command = cli.command.unwrap_or(Commands::Play { level: None });

    // The TUI owns the screen, so stay silent there unless asked
    init_tracing(cli.verbose, matches!(command, Commands::Play { .. }));

    let follow_clock = cli.date.is_none();
    let date = cli.date.unwrap_or_else(today_utc);
    debug!(%date, state_file = %cli.state_file.display(), "starting");

    match command {
        Commands::Play { level } => run_play_command(date, cli.state_file, level, follow_clock),
        Commands::Simple { level } => {
            run_simple_command(date, cli.state_file, level, follow_clock)
        }
        Commands::Daily { level, reveal } => {
            print_challenges(&daily_challenges(date, level), reveal);
            Ok(())
        }
        Commands::Check { level, guess } => {
            let result = check_guess(level, date, &guess)
                .with_context(|| format!("invalid guess '{guess}'"))?;
            print_check_result(&result);
            Ok(())
        }
        Commands::Eval { formula, xs } => {
            let result = evaluate_formula(&formula, &xs)
                .with_context(|| format!("cannot evaluate '{formula}'"))?;
            print_eval_result(&result);
            Ok(())
        }
        Commands::Audit { days, from } => {
            run_audit_command(from.unwrap_or(date), days);
            Ok(())
        }
        Commands::Practice { level } => {
            run_practice(date, level).context("practice session failed")
        }
    }
}

fn run_play_command(
    date: NaiveDate,
    state_file: PathBuf,
    level: Option<Level>,
    follow_clock: bool,
) -> Result<()> {
    use funcle::interactive::{App, run_tui};

    let store = Store::new(state_file);
    let session = store.load(date);
    let app = App::new(session, Some(store), level, follow_clock);
    run_tui(app)
}

fn run_simple_command(
    date: NaiveDate,
    state_file: PathBuf,
    level: Option<Level>,
    follow_clock: bool,
) -> Result<()> {
    let store = Store::new(state_file);
    let mut session = store.load(date);
    run_simple(
        &mut session,
        Some(&store),
        SimpleOptions {
            start: level,
            follow_clock,
        },
    )
    .context("simple mode failed")
}

fn run_audit_command(from: NaiveDate, days: u64) {
    println!("\n{}", "═".repeat(70));
    println!(" Funcle Generator Audit ");
    println!("{}", "═".repeat(70));
    println!("\nRegenerating all levels for {days} days from {from}\n");

    let stats = run_audit(&AuditConfig {
        from,
        days,
        show_progress: true,
    });
    print_audit_statistics(&stats);
}
