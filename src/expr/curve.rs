//! Plottable curves for a challenge
//!
//! A curve evaluates the challenge formula; if the formula cannot be parsed
//! it degrades to a polynomial built from the coefficient digits so a plot
//! can still be drawn.

use super::{EvaluationError, Expr, parse};
use crate::core::Coefficients;
use crate::generator::Challenge;
use std::ops::RangeInclusive;
use tracing::warn;

/// Points with |y| at or above this are dropped from plots
pub const PLOT_LIMIT: f64 = 1000.0;

/// Default plotting window and resolution
pub const PLOT_RANGE: RangeInclusive<f64> = RangeInclusive::new(-10.0, 10.0);
pub const PLOT_STEP: f64 = 0.001;

/// `A·x⁴ + B·x³ + C·x² + D·x + E`
///
/// # Examples
/// ```
/// use funcle::core::Coefficients;
/// use funcle::expr::polynomial_fallback;
///
/// let c = Coefficients::from_digits([1, 0, 0, 0, 2]);
/// assert_eq!(polynomial_fallback(&c, 2.0), 18.0);
/// ```
#[must_use]
pub fn polynomial_fallback(coefficients: &Coefficients, x: f64) -> f64 {
    coefficients
        .digits()
        .iter()
        .fold(0.0, |acc, &c| acc * x + f64::from(c))
}

#[derive(Debug, Clone)]
enum Source {
    Formula(Expr),
    Polynomial(Coefficients),
}

/// A challenge's function, ready for sampling
#[derive(Debug, Clone)]
pub struct Curve {
    source: Source,
}

impl Curve {
    /// Compile the challenge formula, falling back to the polynomial
    #[must_use]
    pub fn for_challenge(challenge: &Challenge) -> Self {
        let source = match parse(&challenge.formula) {
            Ok(expr) => Source::Formula(expr),
            Err(error) => {
                warn!(
                    target: "funcle::expr",
                    level = challenge.level.name(),
                    %error,
                    "formula unavailable, plotting polynomial fallback"
                );
                Source::Polynomial(challenge.coefficients)
            }
        };
        Self { source }
    }

    /// Curve for the polynomial fallback only
    #[must_use]
    pub const fn polynomial(coefficients: Coefficients) -> Self {
        Self {
            source: Source::Polynomial(coefficients),
        }
    }

    /// True when the formula could not be used
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self.source, Source::Polynomial(_))
    }

    /// Value at `x`
    ///
    /// # Errors
    /// Returns `EvaluationError::NonFinite` at singular points.
    pub fn value(&self, x: f64) -> Result<f64, EvaluationError> {
        match &self.source {
            Source::Formula(expr) => expr.eval(x),
            Source::Polynomial(coefficients) => {
                let y = polynomial_fallback(coefficients, x);
                if y.is_finite() {
                    Ok(y)
                } else {
                    Err(EvaluationError::NonFinite { x })
                }
            }
        }
    }

    /// Sample evenly spaced points, skipping singular or off-scale values
    ///
    /// A non-positive `step` yields no points.
    #[must_use]
    pub fn sample(&self, range: RangeInclusive<f64>, step: f64) -> Vec<(f64, f64)> {
        let (start, end) = range.into_inner();
        if step <= 0.0 || end < start {
            return Vec::new();
        }

        // Tolerance keeps the end point when the division lands just below an integer
        let count = ((end - start) / step + 1e-9).floor() as usize;
        (0..=count)
            .map(|i| start + i as f64 * step)
            .filter_map(|x| match self.value(x) {
                Ok(y) if y.abs() < PLOT_LIMIT => Some((x, y)),
                _ => None,
            })
            .collect()
    }

    /// Sample over `PLOT_RANGE` at `PLOT_STEP`
    #[must_use]
    pub fn plot(&self) -> Vec<(f64, f64)> {
        self.sample(PLOT_RANGE, PLOT_STEP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Level;
    use crate::generator::generate;
    use chrono::NaiveDate;

    fn challenge(level: Level) -> Challenge {
        generate(level, NaiveDate::from_ymd_opt(2025, 8, 15).unwrap())
    }

    #[test]
    fn polynomial_uses_descending_powers() {
        let c = Coefficients::from_digits([1, 2, 3, 4, 5]);
        // 16 + 16 + 12 + 8 + 5
        assert_eq!(polynomial_fallback(&c, 2.0), 57.0);
        assert_eq!(polynomial_fallback(&c, 0.0), 5.0);
    }

    #[test]
    fn every_level_compiles_its_formula() {
        for level in Level::ALL {
            let curve = Curve::for_challenge(&challenge(level));
            assert!(!curve.is_fallback(), "{level}");
        }
    }

    #[test]
    fn broken_formula_falls_back() {
        let mut broken = challenge(Level::Medium);
        broken.formula = "(3/4) * (bogus(x))".into();
        let curve = Curve::for_challenge(&broken);
        assert!(curve.is_fallback());
        assert_eq!(
            curve.value(1.0).unwrap(),
            f64::from(broken.coefficients.digits().iter().map(|&d| u32::from(d)).sum::<u32>())
        );
    }

    #[test]
    fn sampling_skips_singularities() {
        let mut nerd = challenge(Level::Nerd);
        nerd.formula = "sin(pi * x) / (pi * x)".into();
        let curve = Curve::for_challenge(&nerd);
        let points = curve.sample(-1.0..=1.0, 0.5);
        let xs: Vec<f64> = points.iter().map(|(x, _)| *x).collect();
        assert_eq!(xs, vec![-1.0, -0.5, 0.5, 1.0]);
    }

    #[test]
    fn sampling_drops_off_scale_points() {
        let curve = Curve::polynomial(Coefficients::from_digits([9, 9, 9, 9, 9]));
        let points = curve.sample(-10.0..=10.0, 1.0);
        assert!(points.iter().all(|(_, y)| y.abs() < PLOT_LIMIT));
        assert!(points.len() < 21);
        assert!(!points.is_empty());
    }

    #[test]
    fn sampling_default_grid_size() {
        let curve = Curve::polynomial(Coefficients::from_digits([0, 0, 0, 1, 0]));
        assert_eq!(curve.sample(-10.0..=10.0, 0.5).len(), 41);
        assert!(curve.sample(-1.0..=1.0, 0.0).is_empty());
    }

    #[test]
    fn default_plot_covers_window() {
        let curve = Curve::polynomial(Coefficients::from_digits([0, 0, 0, 1, 0]));
        let points = curve.plot();
        assert_eq!(points.len(), 20_001);
        assert_eq!(points.first().map(|p| p.0), Some(-10.0));
        assert!((points[points.len() - 1].0 - 10.0).abs() < 1e-9);
    }
}
