//! Command implementations

pub mod audit;
pub mod daily;
pub mod eval;
pub mod practice;
pub mod simple;

pub use audit::{AuditConfig, AuditFailure, AuditStatistics, Problem, run_audit};
pub use daily::{CheckResult, check_guess, daily_challenges};
pub use eval::{EvalResult, evaluate_formula};
pub use practice::{practice_session, random_past_date, run_practice};
pub use simple::{SimpleOptions, play, run_simple};
