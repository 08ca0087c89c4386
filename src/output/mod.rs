//! Terminal output formatting
//!
//! Display utilities for CLI results, share text and the next-puzzle countdown.

pub mod display;
pub mod formatters;

pub use display::{print_audit_statistics, print_challenges, print_check_result, print_eval_result};
pub use formatters::{attempt_row, format_countdown, share_text, time_until_next_puzzle};
