//! Tokenizer and recursive-descent parser for challenge formulas
//!
//! Grammar, loosest binding first:
//!
//! ```text
//! sum     := product (('+' | '-') product)*
//! product := unary (('*' | '/') unary)*
//! unary   := ('-' | '+') unary | power
//! power   := atom ('^' unary)?
//! atom    := number | 'x' | 'pi' | 'e' | function '(' sum ')' | '(' sum ')'
//! ```
//!
//! `^` is right associative and binds tighter than unary minus, so `-x^2`
//! is `-(x^2)` and `2^-1` is `0.5`.

use super::EvaluationError;
use std::f64::consts;

/// Deepest nesting of sums and unary operators a formula may use
pub const MAX_DEPTH: usize = 256;

/// Named functions available to formulas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Abs,
    Sin,
    Cos,
    Tan,
    Atan,
    Exp,
    Log,
    Sqrt,
    Tanh,
    Sech,
    Erf,
    Gamma,
    LogGamma,
}

impl Function {
    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "abs" => Self::Abs,
            "sin" => Self::Sin,
            "cos" => Self::Cos,
            "tan" => Self::Tan,
            "atan" => Self::Atan,
            "exp" => Self::Exp,
            "log" => Self::Log,
            "sqrt" => Self::Sqrt,
            "tanh" => Self::Tanh,
            "sech" => Self::Sech,
            "erf" => Self::Erf,
            "gamma" => Self::Gamma,
            "lgamma" => Self::LogGamma,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

/// Parsed formula over the single variable `x`
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Var,
    Neg(Box<Expr>),
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Call {
        function: Function,
        arg: Box<Expr>,
    },
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
}

fn tokenize(input: &str) -> Result<Vec<(usize, Token)>, EvaluationError> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(pos, ch)) = chars.peek() {
        if ch.is_whitespace() {
            chars.next();
            continue;
        }

        if ch.is_ascii_digit() || ch == '.' {
            let mut end = pos;
            while let Some(&(i, c)) = chars.peek() {
                if c.is_ascii_digit() || c == '.' {
                    end = i + c.len_utf8();
                    chars.next();
                } else {
                    break;
                }
            }
            let text = &input[pos..end];
            let value = text.parse::<f64>().map_err(|_| EvaluationError::Parse {
                position: pos,
                message: format!("invalid number '{text}'"),
            })?;
            tokens.push((pos, Token::Number(value)));
            continue;
        }

        if ch.is_ascii_alphabetic() || ch == '_' {
            let mut end = pos;
            while let Some(&(i, c)) = chars.peek() {
                if c.is_ascii_alphanumeric() || c == '_' {
                    end = i + c.len_utf8();
                    chars.next();
                } else {
                    break;
                }
            }
            tokens.push((pos, Token::Ident(input[pos..end].to_string())));
            continue;
        }

        let token = match ch {
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '^' => Token::Caret,
            '(' => Token::LParen,
            ')' => Token::RParen,
            other => {
                return Err(EvaluationError::Parse {
                    position: pos,
                    message: format!("unexpected character '{other}'"),
                });
            }
        };
        tokens.push((pos, token));
        chars.next();
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<(usize, Token)>,
    cursor: usize,
    end: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.cursor).map(|(_, t)| t)
    }

    fn position(&self) -> usize {
        self.tokens.get(self.cursor).map_or(self.end, |(p, _)| *p)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.cursor).map(|(_, t)| t.clone());
        self.cursor += 1;
        token
    }

    fn error(&self, message: impl Into<String>) -> EvaluationError {
        EvaluationError::Parse {
            position: self.position(),
            message: message.into(),
        }
    }

    fn expect(&mut self, expected: &Token, what: &str) -> Result<(), EvaluationError> {
        if self.peek() == Some(expected) {
            self.cursor += 1;
            Ok(())
        } else {
            Err(self.error(format!("expected {what}")))
        }
    }

    fn nested(
        &mut self,
        rule: fn(&mut Self) -> Result<Expr, EvaluationError>,
    ) -> Result<Expr, EvaluationError> {
        if self.depth >= MAX_DEPTH {
            return Err(self.error("formula nested too deeply"));
        }
        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }

    fn sum(&mut self) -> Result<Expr, EvaluationError> {
        self.nested(Self::terms)
    }

    fn terms(&mut self) -> Result<Expr, EvaluationError> {
        let mut lhs = self.product()?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinaryOp::Add,
                Some(Token::Minus) => BinaryOp::Sub,
                _ => return Ok(lhs),
            };
            self.cursor += 1;
            let rhs = self.product()?;
            lhs = binary(op, lhs, rhs);
        }
    }

    fn product(&mut self) -> Result<Expr, EvaluationError> {
        let mut lhs = self.unary()?;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => BinaryOp::Mul,
                Some(Token::Slash) => BinaryOp::Div,
                _ => return Ok(lhs),
            };
            self.cursor += 1;
            let rhs = self.unary()?;
            lhs = binary(op, lhs, rhs);
        }
    }

    fn unary(&mut self) -> Result<Expr, EvaluationError> {
        self.nested(Self::signed)
    }

    fn signed(&mut self) -> Result<Expr, EvaluationError> {
        match self.peek() {
            Some(Token::Minus) => {
                self.cursor += 1;
                Ok(Expr::Neg(Box::new(self.unary()?)))
            }
            Some(Token::Plus) => {
                self.cursor += 1;
                self.unary()
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Result<Expr, EvaluationError> {
        let base = self.atom()?;
        if self.peek() == Some(&Token::Caret) {
            self.cursor += 1;
            let exponent = self.unary()?;
            return Ok(binary(BinaryOp::Pow, base, exponent));
        }
        Ok(base)
    }

    fn atom(&mut self) -> Result<Expr, EvaluationError> {
        let start = self.position();
        match self.advance() {
            Some(Token::Number(value)) => Ok(Expr::Number(value)),
            Some(Token::LParen) => {
                let inner = self.sum()?;
                self.expect(&Token::RParen, "')'")?;
                Ok(inner)
            }
            Some(Token::Ident(name)) => match name.as_str() {
                "x" => Ok(Expr::Var),
                "pi" => Ok(Expr::Number(consts::PI)),
                "e" => Ok(Expr::Number(consts::E)),
                _ => {
                    let function = Function::from_name(&name).ok_or(EvaluationError::Parse {
                        position: start,
                        message: format!("unknown identifier '{name}'"),
                    })?;
                    self.expect(&Token::LParen, "'(' after function name")?;
                    let arg = self.sum()?;
                    self.expect(&Token::RParen, "')'")?;
                    Ok(Expr::Call {
                        function,
                        arg: Box::new(arg),
                    })
                }
            },
            Some(_) => Err(EvaluationError::Parse {
                position: start,
                message: "expected a number, variable or '('".into(),
            }),
            None => Err(self.error("unexpected end of formula")),
        }
    }
}

fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
    Expr::Binary {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    }
}

/// Parse a formula into an expression tree
///
/// # Errors
/// Returns `EvaluationError::Parse` with the byte offset of the first problem.
///
/// # Examples
/// ```
/// use funcle::expr::parse;
///
/// let expr = parse("(3/4) * (x^2) + 2").unwrap();
/// assert_eq!(expr.eval(2.0).unwrap(), 5.0);
///
/// assert!(parse("foo(x)").is_err());
/// ```
pub fn parse(input: &str) -> Result<Expr, EvaluationError> {
    let tokens = tokenize(input)?;
    let mut parser = Parser {
        tokens,
        cursor: 0,
        end: input.len(),
        depth: 0,
    };
    let expr = parser.sum()?;
    if parser.cursor < parser.tokens.len() {
        return Err(parser.error("unexpected trailing input"));
    }
    Ok(expr)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(input: &str, x: f64) -> f64 {
        parse(input).unwrap().eval(x).unwrap()
    }

    #[test]
    fn precedence_and_associativity() {
        assert_eq!(value("1 + 2 * 3", 0.0), 7.0);
        assert_eq!(value("(1 + 2) * 3", 0.0), 9.0);
        assert_eq!(value("8 / 4 / 2", 0.0), 1.0);
        assert_eq!(value("10 - 4 - 3", 0.0), 3.0);
        assert_eq!(value("2^3^2", 0.0), 512.0);
    }

    #[test]
    fn unary_minus_binds_looser_than_power() {
        assert_eq!(value("-x^2", 3.0), -9.0);
        assert_eq!(value("2^-1", 0.0), 0.5);
        assert_eq!(value("-x^2/10", 10.0), -10.0);
        assert_eq!(value("--x", 4.0), 4.0);
    }

    #[test]
    fn constants_and_variable() {
        assert_eq!(value("pi", 0.0), consts::PI);
        assert_eq!(value("x", 1.5), 1.5);
        assert!((value("e", 0.0) - consts::E).abs() < 1e-15);
    }

    #[test]
    fn parses_every_template() {
        for level in crate::core::Level::ALL {
            for template in level.templates() {
                assert!(parse(template).is_ok(), "{template}");
            }
        }
    }

    #[test]
    fn unknown_identifier_reports_position() {
        let err = parse("1 + foo(x)").unwrap_err();
        assert!(matches!(err, EvaluationError::Parse { position: 4, .. }));
    }

    #[test]
    fn malformed_inputs() {
        for input in ["", "(", "1 +", "sin x", "x)", "1 2", "3 # 4", "1..2"] {
            assert!(parse(input).is_err(), "{input}");
        }
    }

    #[test]
    fn deep_nesting_is_an_error() {
        let parens = format!("{}x{}", "(".repeat(100_000), ")".repeat(100_000));
        let err = parse(&parens).unwrap_err();
        assert!(matches!(err, EvaluationError::Parse { ref message, .. } if message.contains("nested")));

        assert!(parse(&format!("{}x", "-".repeat(100_000))).is_err());
        assert!(parse(&format!("x{}", "^x".repeat(100_000))).is_err());
        assert!(parse(&format!("{}x{}", "sin(".repeat(100_000), ")".repeat(100_000))).is_err());
    }

    #[test]
    fn moderate_nesting_still_parses() {
        let formula = format!("{}x{}", "(".repeat(100), ")".repeat(100));
        assert_eq!(value(&formula, 2.0), 2.0);
        assert_eq!(value(&format!("{}x", "-".repeat(100)), 3.0), 3.0);
    }

    #[test]
    fn decimal_numbers() {
        assert_eq!(value("0.25 * x", 4.0), 1.0);
        assert_eq!(value(".5", 0.0), 0.5);
    }
}
