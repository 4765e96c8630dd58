//! FILENAME: parser/src/ast.rs
//! PURPOSE: Defines the Abstract Syntax Tree (AST) for calculator expressions.
//! CONTEXT: After the Lexer tokenizes an expression string, the Parser
//! converts those tokens into this tree structure. The Evaluator then
//! traverses this tree to compute the final result.
//!
//! SUPPORTED EXPRESSIONS:
//! - Number literals: 42, 3.14, .5
//! - Constants: pi, e
//! - Binary operations: +, -, *, /, ^ (right-associative)
//! - Unary operations: - (negation), % (postfix, divide by 100)
//! - Function application: sin(x), cos(x), tan(x), ln(x), log(x), sqrt(x)
//! - Parentheses for grouping

use crate::token::{MathConstant, MathFunction};

/// Represents a parsed calculator expression.
/// This is the core data structure that the evaluator will traverse.
#[derive(Debug, PartialEq, Clone)]
pub enum Expression {
    /// A number literal.
    Literal(f64),

    /// A named constant (pi, e).
    Constant(MathConstant),

    /// A binary operation: left op right (e.g., 5 + 3, 2 ^ 10).
    BinaryOp {
        left: Box<Expression>,
        op: BinaryOperator,
        right: Box<Expression>,
    },

    /// A unary operation: negation (-5) or postfix percent (10%).
    UnaryOp {
        op: UnaryOperator,
        operand: Box<Expression>,
    },

    /// A function applied to a parenthesized argument, like sin(90).
    FunctionCall {
        func: MathFunction,
        arg: Box<Expression>,
    },
}

/// Binary operators for expressions.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum BinaryOperator {
    Add,      // +
    Subtract, // -
    Multiply, // *
    Divide,   // /
    Power,    // ^ (highest precedence among binary ops)
}

/// Unary operators.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum UnaryOperator {
    Negate,  // - (prefix)
    Percent, // % (postfix, divides the operand by 100)
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BinaryOperator::Add => write!(f, "+"),
            BinaryOperator::Subtract => write!(f, "-"),
            BinaryOperator::Multiply => write!(f, "*"),
            BinaryOperator::Divide => write!(f, "/"),
            BinaryOperator::Power => write!(f, "^"),
        }
    }
}

impl std::fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnaryOperator::Negate => write!(f, "-"),
            UnaryOperator::Percent => write!(f, "%"),
        }
    }
}
