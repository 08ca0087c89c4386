//! Evaluate arbitrary formulas from the command line

use crate::expr::{EvaluationError, parse};

/// Values of one formula at several points
#[derive(Debug, Clone)]
pub struct EvalResult {
    pub formula: String,
    pub points: Vec<(f64, Result<f64, EvaluationError>)>,
}

/// Parse `formula` once and evaluate it at each of `xs`
///
/// Singular points are reported per point rather than failing the whole run.
///
/// # Errors
/// Returns `EvaluationError::Parse` if the formula does not parse.
pub fn evaluate_formula(formula: &str, xs: &[f64]) -> Result<EvalResult, EvaluationError> {
    let expr = parse(formula)?;
    let points = xs.iter().map(|&x| (x, expr.eval(x))).collect();
    Ok(EvalResult {
        formula: formula.to_string(),
        points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluates_each_point() {
        let result = evaluate_formula("x^2 + 1", &[0.0, 2.0, -3.0]).unwrap();
        let values: Vec<f64> = result.points.iter().map(|(_, y)| *y.as_ref().unwrap()).collect();
        assert_eq!(values, vec![1.0, 5.0, 10.0]);
    }

    #[test]
    fn singular_point_is_reported_inline() {
        let result = evaluate_formula("1 / x", &[0.0, 4.0]).unwrap();
        assert_eq!(result.points[0].1, Err(EvaluationError::NonFinite { x: 0.0 }));
        assert_eq!(result.points[1].1, Ok(0.25));
    }

    #[test]
    fn parse_failure_is_an_error() {
        assert!(evaluate_formula("x +", &[1.0]).is_err());
    }
}
