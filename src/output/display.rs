//! Display functions for command results

use super::formatters::{attempt_row, create_progress_bar};
use crate::commands::{AuditStatistics, CheckResult, EvalResult};
use crate::core::Level;
use crate::generator::Challenge;
use colored::Colorize;

/// Print one day's challenges; hidden digits only when `reveal` is set
pub fn print_challenges(challenges: &[Challenge], reveal: bool) {
    if let Some(first) = challenges.first() {
        println!("\n{}", "═".repeat(70).cyan());
        println!(
            " {} {} ",
            "FUNCLE".bright_cyan().bold(),
            first.date.bright_yellow().bold()
        );
        println!("{}", "═".repeat(70).cyan());
    }

    for challenge in challenges {
        println!(
            "\n{} {}",
            "▶".cyan(),
            challenge.level.title().bright_yellow().bold()
        );
        println!("   f(x) = {}", challenge.display_formula);
        if reveal {
            println!("   f(x) = {}", challenge.formula.bright_white());
            println!(
                "   A, B, C, D, E = {}",
                challenge.coefficients.to_string().green()
            );
            println!("   seed {}", challenge.seed.to_string().bright_black());
        }
    }
    println!();
}

/// Print a single checked guess
pub fn print_check_result(result: &CheckResult) {
    println!(
        "\n{} {} ({})",
        "Checking".bright_cyan().bold(),
        result.challenge.level.title().bright_yellow().bold(),
        result.challenge.date
    );
    println!("   f(x) = {}", result.challenge.display_formula);
    println!("\n   {}", attempt_row(&result.attempt));

    let evaluation = result.attempt.evaluation;
    if evaluation.is_win() {
        println!("\n{}", "✅ That's the function!".green().bold());
    } else {
        println!(
            "\n   {} correct, {} present",
            evaluation.count_correct().to_string().green(),
            evaluation.count_present().to_string().yellow()
        );
    }
}

/// Print formula values, one line per point
pub fn print_eval_result(result: &EvalResult) {
    println!("\nf(x) = {}", result.formula.bright_white());
    for (x, value) in &result.points {
        match value {
            Ok(y) => println!("   f({x}) = {}", format!("{y}").bright_yellow()),
            Err(error) => println!("   f({x}) = {}", error.to_string().red()),
        }
    }
    println!();
}

/// Print audit statistics
#[allow(clippy::too_many_lines)] // Comprehensive output formatting
pub fn print_audit_statistics(stats: &AuditStatistics) {
    println!("\n{}", "═".repeat(70));
    println!(" Generator Audit ");
    println!("{}", "═".repeat(70));

    println!("\n📊 {}", "Coverage".bright_cyan().bold());
    println!("  Starting day:        {}", stats.from);
    println!("  Days checked:        {}", stats.days);
    println!("  Challenges checked:  {}", stats.challenges);
    println!(
        "  Total time:          {:.2}s",
        stats.total_time.as_secs_f64()
    );

    if stats.failures.is_empty() {
        println!(
            "  Invariants:          {}",
            "all hold ✓".green().bold()
        );
    } else {
        println!(
            "  Invariants:          {}",
            format!("{} violations", stats.failures.len()).red().bold()
        );
        for failure in stats.failures.iter().take(10) {
            println!(
                "    {} {}: {}",
                failure.date,
                failure.level.title().yellow(),
                failure.problem
            );
        }
    }

    println!("\n🔢 {}", "Digit Distribution".bright_cyan().bold());
    for (name, counts) in ["A", "B", "C", "D", "E"].iter().zip(&stats.digit_distribution) {
        let max = counts.iter().copied().max().unwrap_or(0) as f64;
        let cells: Vec<String> = counts
            .iter()
            .map(|&count| create_progress_bar(count as f64, max, 1))
            .collect();
        println!(
            "  {name}: {}  {}",
            cells.join("").green(),
            counts
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" ")
                .bright_black()
        );
    }
    println!("  (columns are digits 0-9)");

    println!("\n➕ {}", "Signs".bright_cyan().bold());
    let total_signs = (stats.plus_signs + stats.minus_signs).max(1) as f64;
    println!(
        "  +: {:5} ({:5.1}%)   -: {:5} ({:5.1}%)",
        stats.plus_signs,
        stats.plus_signs as f64 / total_signs * 100.0,
        stats.minus_signs,
        stats.minus_signs as f64 / total_signs * 100.0
    );
    println!("  Fraction pairs used: {} distinct", stats.distinct_pairs);

    println!("\n📈 {}", "Template Usage".bright_cyan().bold());
    for level in Level::ALL {
        let Some(usage) = stats.template_usage.get(&level) else {
            continue;
        };
        println!("  {}", level.title().bright_yellow());
        let max_count = usage.iter().copied().max().unwrap_or(0);
        for (template, &count) in level.templates().iter().zip(usage) {
            let bar_len = if max_count > 0 { count * 30 / max_count } else { 0 };
            let bar = format!(
                "{}{}",
                "█".repeat(bar_len).green(),
                "░".repeat(30_usize.saturating_sub(bar_len)).bright_black()
            );
            println!("    {bar} {count:5}  {template}");
        }
    }
    println!();
}
