//! Generator audit over a range of days
//!
//! Regenerates every level for consecutive days and checks the invariants
//! players rely on: coefficients in range, two distinct templates, the same
//! output on every run, and a formula the evaluator accepts. Also collects
//! digit, sign and template distributions.

use crate::core::{Level, coprime_pairs};
use crate::expr::parse;
use crate::generator::{Challenge, Sign, date_string, generate, generate_all};
use chrono::{Days, NaiveDate};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::info;

/// Which days to audit
#[derive(Debug, Clone, Copy)]
pub struct AuditConfig {
    pub from: NaiveDate,
    pub days: u64,
    pub show_progress: bool,
}

/// A broken invariant for one challenge
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Problem {
    OutOfBounds,
    UnknownPair,
    RepeatedTemplate,
    Nondeterministic,
    Unparseable(String),
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds => f.write_str("coefficient out of range"),
            Self::UnknownPair => f.write_str("fraction pair not in table"),
            Self::RepeatedTemplate => f.write_str("same template used twice"),
            Self::Nondeterministic => f.write_str("regeneration differs"),
            Self::Unparseable(error) => write!(f, "formula does not parse: {error}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditFailure {
    pub date: String,
    pub level: Level,
    pub problem: Problem,
}

/// Aggregated audit results
#[derive(Debug)]
pub struct AuditStatistics {
    pub from: NaiveDate,
    pub days: usize,
    pub challenges: usize,
    pub failures: Vec<AuditFailure>,
    /// Per position (A..E), how often each digit 0-9 occurred
    pub digit_distribution: [[usize; 10]; 5],
    pub plus_signs: usize,
    pub minus_signs: usize,
    /// Per level, how often each template index was drawn
    pub template_usage: FxHashMap<Level, Vec<usize>>,
    pub distinct_pairs: usize,
    pub total_time: Duration,
}

fn has_pair(numerator: u8, denominator: u8) -> bool {
    coprime_pairs()
        .iter()
        .any(|p| p.numerator == numerator && p.denominator == denominator)
}

/// Every invariant a single challenge breaks
fn inspect(challenge: &Challenge, date: NaiveDate) -> Vec<Problem> {
    let mut problems = Vec::new();
    let [a, b, c, d, _] = *challenge.coefficients.digits();

    if !challenge.coefficients.in_bounds() {
        problems.push(Problem::OutOfBounds);
    }
    if !has_pair(a, b) || !has_pair(c, d) {
        problems.push(Problem::UnknownPair);
    }
    let [first, second] = challenge.template_indices;
    if first == second && challenge.level.templates().len() > 1 {
        problems.push(Problem::RepeatedTemplate);
    }
    if generate(challenge.level, date) != *challenge {
        problems.push(Problem::Nondeterministic);
    }
    if let Err(error) = parse(&challenge.formula) {
        problems.push(Problem::Unparseable(error.to_string()));
    }
    problems
}

/// Audit `config.days` consecutive days starting at `config.from`
///
/// Days are checked in parallel; days past the end of the calendar are skipped.
#[allow(clippy::too_many_lines)] // Parallel scan plus aggregation
#[must_use]
pub fn run_audit(config: &AuditConfig) -> AuditStatistics {
    let pb = if config.show_progress {
        let pb = ProgressBar::new(config.days);
        pb.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} days ({percent}%) | {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓▒░"),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let start = Instant::now();

    let reports: Vec<(NaiveDate, [Challenge; 5], Vec<AuditFailure>)> = (0..config.days)
        .into_par_iter()
        .filter_map(|offset| {
            let date = config.from.checked_add_days(Days::new(offset))?;
            let challenges = generate_all(date);
            let failures = challenges
                .iter()
                .flat_map(|challenge| {
                    inspect(challenge, date)
                        .into_iter()
                        .map(|problem| AuditFailure {
                            date: challenge.date.clone(),
                            level: challenge.level,
                            problem,
                        })
                })
                .collect();
            pb.inc(1);
            Some((date, challenges, failures))
        })
        .collect();

    pb.finish_with_message("Complete!");

    let mut failures = Vec::new();
    let mut digit_distribution = [[0usize; 10]; 5];
    let mut plus_signs = 0;
    let mut minus_signs = 0;
    let mut template_usage: FxHashMap<Level, Vec<usize>> = Level::ALL
        .into_iter()
        .map(|level| (level, vec![0; level.templates().len()]))
        .collect();
    let mut pairs_seen: FxHashMap<(u8, u8), usize> = FxHashMap::default();

    for (_, challenges, day_failures) in &reports {
        failures.extend(day_failures.iter().cloned());
        for challenge in challenges {
            let digits = challenge.coefficients.digits();
            for (position, &digit) in digits.iter().enumerate() {
                if let Some(count) = digit_distribution[position].get_mut(usize::from(digit)) {
                    *count += 1;
                }
            }
            *pairs_seen.entry((digits[0], digits[1])).or_insert(0) += 1;
            *pairs_seen.entry((digits[2], digits[3])).or_insert(0) += 1;

            for sign in &challenge.signs[..2] {
                match sign {
                    Sign::Plus => plus_signs += 1,
                    Sign::Minus => minus_signs += 1,
                }
            }

            if let Some(usage) = template_usage.get_mut(&challenge.level) {
                for index in challenge.template_indices {
                    if let Some(count) = usage.get_mut(index) {
                        *count += 1;
                    }
                }
            }
        }
    }

    let total_time = start.elapsed();
    info!(
        target: "funcle::audit",
        from = %date_string(config.from),
        days = reports.len(),
        failures = failures.len(),
        "audit finished"
    );

    AuditStatistics {
        from: config.from,
        days: reports.len(),
        challenges: reports.len() * Level::ALL.len(),
        failures,
        digit_distribution,
        plus_signs,
        minus_signs,
        template_usage,
        distinct_pairs: pairs_seen.len(),
        total_time,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(days: u64) -> AuditConfig {
        AuditConfig {
            from: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            days,
            show_progress: false,
        }
    }

    #[test]
    fn clean_run_over_two_months() {
        let stats = run_audit(&config(60));
        assert_eq!(stats.days, 60);
        assert_eq!(stats.challenges, 300);
        assert!(stats.failures.is_empty(), "{:?}", stats.failures);
    }

    #[test]
    fn distributions_add_up() {
        let stats = run_audit(&config(20));
        for position in &stats.digit_distribution {
            assert_eq!(position.iter().sum::<usize>(), stats.challenges);
        }
        // A-D come from the pair table, never zero
        for position in &stats.digit_distribution[..4] {
            assert_eq!(position[0], 0);
        }
        assert_eq!(stats.plus_signs + stats.minus_signs, stats.challenges * 2);
        for level in Level::ALL {
            assert_eq!(stats.template_usage[&level].iter().sum::<usize>(), 40);
        }
        assert!(stats.distinct_pairs <= coprime_pairs().len());
    }

    #[test]
    fn inspect_flags_tampered_challenge() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
        let mut challenge = generate(Level::Amateur, date);
        challenge.formula = "(1/2) * (".into();
        challenge.template_indices = [1, 1];

        let problems = inspect(&challenge, date);
        assert!(problems.contains(&Problem::RepeatedTemplate));
        assert!(problems.contains(&Problem::Nondeterministic));
        assert!(problems.iter().any(|p| matches!(p, Problem::Unparseable(_))));
        assert!(!problems.contains(&Problem::OutOfBounds));
    }

    #[test]
    fn empty_range() {
        let stats = run_audit(&config(0));
        assert_eq!(stats.days, 0);
        assert!(stats.failures.is_empty());
    }
}
