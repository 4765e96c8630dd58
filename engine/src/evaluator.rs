//! FILENAME: engine/src/evaluator.rs
//! PURPOSE: Evaluates finished expression text to a formatted result.
//! CONTEXT: This is the pure half of the engine. It balances parentheses,
//! runs the parser, traverses the AST, and formats the numeric result.
//! It holds no state; callers pass a snapshot of the expression buffer.
//!
//! SUPPORTED FEATURES:
//! - Arithmetic: +, -, *, /, ^ (right-associative)
//! - Postfix percent: 10% = 0.1 (division by 100, not modulo)
//! - Functions: sin, cos, tan (degrees), ln, log (base 10), sqrt
//! - Constants: pi, e
//! - Auto-closing of unmatched '(' (never inserts missing '(')

use crate::error::EvalError;
use crate::number_format::{format_result, round_result};
use parser::{parse_with, BinaryOperator, Expression, MathFunction, ParseOptions, UnaryOperator};
use serde::{Deserialize, Serialize};

/// Policy switches for evaluation, mirrored into the parser.
/// Redefined here (rather than re-exporting the parser's options) so the
/// session stays serde-serializable with the rest of the engine types.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvalOptions {
    /// Treat adjacent operands ("2pi", "(1+2)3") as multiplication instead
    /// of rejecting them with a syntax error.
    pub implicit_multiplication: bool,
}

impl EvalOptions {
    fn to_parse_options(self) -> ParseOptions {
        ParseOptions {
            implicit_multiplication: self.implicit_multiplication,
        }
    }
}

/// Evaluates expression text and returns the formatted result string.
pub fn evaluate(text: &str) -> Result<String, EvalError> {
    evaluate_with(text, EvalOptions::default())
}

/// Evaluates expression text under explicit policy options.
pub fn evaluate_with(text: &str, options: EvalOptions) -> Result<String, EvalError> {
    let balanced = balance_parens(text)?;
    let expr = parse_with(&balanced, options.to_parse_options())?;
    let value = eval_expr(&expr)?;

    if !value.is_finite() {
        return Err(EvalError::Domain("result is out of range".to_string()));
    }

    Ok(format_result(round_result(value)))
}

/// Appends the deficit of ')' so an expression left open mid-entry still
/// evaluates. Excess ')' is a hard failure, never auto-corrected.
fn balance_parens(text: &str) -> Result<String, EvalError> {
    let opens = text.chars().filter(|&c| c == '(').count();
    let closes = text.chars().filter(|&c| c == ')').count();

    if closes > opens {
        return Err(EvalError::Syntax(
            "unmatched closing parenthesis".to_string(),
        ));
    }

    let mut balanced = text.to_string();
    for _ in 0..(opens - closes) {
        balanced.push(')');
    }
    Ok(balanced)
}

/// Evaluates an AST expression and returns the raw numeric result.
fn eval_expr(expr: &Expression) -> Result<f64, EvalError> {
    match expr {
        Expression::Literal(n) => Ok(*n),
        Expression::Constant(c) => Ok(c.value()),
        Expression::BinaryOp { left, op, right } => {
            let left_val = eval_expr(left)?;
            let right_val = eval_expr(right)?;
            eval_binary_op(left_val, *op, right_val)
        }
        Expression::UnaryOp { op, operand } => {
            let val = eval_expr(operand)?;
            match op {
                UnaryOperator::Negate => Ok(-val),
                UnaryOperator::Percent => Ok(val / 100.0),
            }
        }
        Expression::FunctionCall { func, arg } => {
            let val = eval_expr(arg)?;
            eval_function(*func, val)
        }
    }
}

fn eval_binary_op(left: f64, op: BinaryOperator, right: f64) -> Result<f64, EvalError> {
    match op {
        BinaryOperator::Add => Ok(left + right),
        BinaryOperator::Subtract => Ok(left - right),
        BinaryOperator::Multiply => Ok(left * right),
        BinaryOperator::Divide => {
            if right == 0.0 {
                Err(EvalError::DivisionByZero)
            } else {
                Ok(left / right)
            }
        }
        BinaryOperator::Power => {
            let result = left.powf(right);
            if result.is_nan() {
                Err(EvalError::Domain("invalid exponentiation".to_string()))
            } else {
                Ok(result)
            }
        }
    }
}

/// Applies a built-in function. Trig arguments are in degrees.
fn eval_function(func: MathFunction, arg: f64) -> Result<f64, EvalError> {
    match func {
        MathFunction::Sin => Ok(arg.to_radians().sin()),
        MathFunction::Cos => Ok(arg.to_radians().cos()),
        MathFunction::Tan => Ok(arg.to_radians().tan()),
        MathFunction::Ln => {
            if arg <= 0.0 {
                Err(EvalError::Domain(
                    "ln of a non-positive number".to_string(),
                ))
            } else {
                Ok(arg.ln())
            }
        }
        MathFunction::Log => {
            if arg <= 0.0 {
                Err(EvalError::Domain(
                    "log of a non-positive number".to_string(),
                ))
            } else {
                Ok(arg.log10())
            }
        }
        MathFunction::Sqrt => {
            if arg < 0.0 {
                Err(EvalError::Domain("sqrt of a negative number".to_string()))
            } else {
                Ok(arg.sqrt())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn implicit() -> EvalOptions {
        EvalOptions {
            implicit_multiplication: true,
        }
    }

    // ==================== Arithmetic ====================

    #[test]
    fn evaluates_with_precedence() {
        assert_eq!(evaluate("2+3*4").unwrap(), "14");
        assert_eq!(evaluate("10-4/2").unwrap(), "8");
    }

    #[test]
    fn power_is_right_associative() {
        assert_eq!(evaluate("2^3^2").unwrap(), "512");
    }

    #[test]
    fn negation_binds_looser_than_power() {
        assert_eq!(evaluate("-2^2").unwrap(), "-4");
        assert_eq!(evaluate("2^-1").unwrap(), "0.5");
    }

    #[test]
    fn percent_divides_by_hundred() {
        assert_eq!(evaluate("10%").unwrap(), "0.1");
        assert_eq!(evaluate("200*10%").unwrap(), "20");
    }

    #[test]
    fn leading_negation() {
        assert_eq!(evaluate("-5+3").unwrap(), "-2");
    }

    // ==================== Parenthesis balancing ====================

    #[test]
    fn auto_closes_unmatched_open_paren() {
        assert_eq!(evaluate("(1+2").unwrap(), "3");
        assert_eq!(evaluate("sqrt(2*(3+5").unwrap(), "4");
    }

    #[test]
    fn excess_close_paren_is_syntax_error() {
        assert!(matches!(evaluate("1+2)"), Err(EvalError::Syntax(_))));
    }

    // ==================== Functions and constants ====================

    #[test]
    fn trig_uses_degrees() {
        assert_eq!(evaluate("sin(90)").unwrap(), "1");
        assert_eq!(evaluate("cos(180)").unwrap(), "-1");
        assert_eq!(evaluate("tan(45)").unwrap(), "1");
        assert_eq!(evaluate("sin(180)").unwrap(), "0");
    }

    #[test]
    fn logarithms() {
        assert_eq!(evaluate("ln(e)").unwrap(), "1");
        assert_eq!(evaluate("log(1000)").unwrap(), "3");
    }

    #[test]
    fn square_root() {
        assert_eq!(evaluate("sqrt(16)").unwrap(), "4");
    }

    #[test]
    fn constants() {
        assert_eq!(evaluate("pi").unwrap(), "3.1415926536");
        assert_eq!(evaluate("2*pi").unwrap(), "6.2831853072");
    }

    // ==================== Failures ====================

    #[test]
    fn division_by_zero() {
        assert_eq!(evaluate("5/0"), Err(EvalError::DivisionByZero));
    }

    #[test]
    fn domain_errors() {
        assert!(matches!(evaluate("sqrt(-4)"), Err(EvalError::Domain(_))));
        assert!(matches!(evaluate("log(0)"), Err(EvalError::Domain(_))));
        assert!(matches!(evaluate("ln(-1)"), Err(EvalError::Domain(_))));
    }

    #[test]
    fn malformed_input_is_syntax_error() {
        assert!(matches!(evaluate(""), Err(EvalError::Syntax(_))));
        assert!(matches!(evaluate("5+"), Err(EvalError::Syntax(_))));
        assert!(matches!(evaluate("2#3"), Err(EvalError::Syntax(_))));
    }

    #[test]
    fn overflowing_power_is_domain_error() {
        assert!(matches!(evaluate("10^10000"), Err(EvalError::Domain(_))));
    }

    // ==================== Formatting ====================

    #[test]
    fn float_noise_is_rounded_away() {
        assert_eq!(evaluate("0.1+0.2").unwrap(), "0.3");
    }

    #[test]
    fn integer_results_have_no_decimal_point() {
        assert_eq!(evaluate("6/2").unwrap(), "3");
    }

    #[test]
    fn evaluation_is_idempotent_on_results() {
        let first = evaluate("1/3").unwrap();
        assert_eq!(evaluate(&first).unwrap(), first);

        let first = evaluate("2^0.5").unwrap();
        assert_eq!(evaluate(&first).unwrap(), first);
    }

    // ==================== Implicit multiplication policy ====================

    #[test]
    fn adjacency_rejected_by_default() {
        assert!(matches!(evaluate("2pi"), Err(EvalError::Syntax(_))));
        assert!(matches!(evaluate("(1+2)3"), Err(EvalError::Syntax(_))));
    }

    #[test]
    fn adjacency_multiplies_under_policy() {
        assert_eq!(evaluate_with("2pi", implicit()).unwrap(), "6.2831853072");
        assert_eq!(evaluate_with("(1+2)3", implicit()).unwrap(), "9");
    }
}
