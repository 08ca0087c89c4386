//! Formula evaluation
//!
//! Challenge formulas are parsed once into an [`Expr`] tree and evaluated
//! over a fixed vocabulary (abs, sin, cos, tan, atan, exp, log, sqrt, tanh,
//! sech, erf, gamma, lgamma, pi). Nothing here panics on bad input: parse
//! problems and non-finite results come back as [`EvaluationError`].

mod curve;
mod parser;
mod special;

pub use curve::{Curve, PLOT_LIMIT, PLOT_RANGE, PLOT_STEP, polynomial_fallback};
pub use parser::{BinaryOp, Expr, Function, MAX_DEPTH, parse};
pub use special::{erf, gamma, lgamma, sech};

use thiserror::Error;

/// Recoverable failure while parsing or evaluating a formula
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvaluationError {
    #[error("parse error at {position}: {message}")]
    Parse { position: usize, message: String },
    #[error("formula is not finite at x = {x}")]
    NonFinite { x: f64 },
}

impl Function {
    fn apply(self, v: f64) -> f64 {
        match self {
            Self::Abs => v.abs(),
            Self::Sin => v.sin(),
            Self::Cos => v.cos(),
            Self::Tan => v.tan(),
            Self::Atan => v.atan(),
            Self::Exp => v.exp(),
            Self::Log => v.ln(),
            Self::Sqrt => v.sqrt(),
            Self::Tanh => v.tanh(),
            Self::Sech => sech(v),
            Self::Erf => erf(v),
            Self::Gamma => gamma(v),
            Self::LogGamma => lgamma(v),
        }
    }
}

impl Expr {
    fn value(&self, x: f64) -> f64 {
        match self {
            Self::Number(n) => *n,
            Self::Var => x,
            Self::Neg(inner) => -inner.value(x),
            Self::Binary { op, lhs, rhs } => {
                let (a, b) = (lhs.value(x), rhs.value(x));
                match op {
                    BinaryOp::Add => a + b,
                    BinaryOp::Sub => a - b,
                    BinaryOp::Mul => a * b,
                    BinaryOp::Div => a / b,
                    BinaryOp::Pow => a.powf(b),
                }
            }
            Self::Call { function, arg } => function.apply(arg.value(x)),
        }
    }

    /// Evaluate at `x`
    ///
    /// # Errors
    /// Returns `EvaluationError::NonFinite` when the result is NaN or infinite,
    /// e.g. `sin(pi * x) / (pi * x)` at zero.
    pub fn eval(&self, x: f64) -> Result<f64, EvaluationError> {
        let y = self.value(x);
        if y.is_finite() {
            Ok(y)
        } else {
            Err(EvaluationError::NonFinite { x })
        }
    }
}

/// Parse and evaluate in one step
///
/// # Errors
/// Propagates parse errors and non-finite results.
pub fn evaluate(formula: &str, x: f64) -> Result<f64, EvaluationError> {
    parse(formula)?.eval(x)
}
