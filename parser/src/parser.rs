//! FILENAME: parser/src/parser.rs
//! PURPOSE: Recursive descent parser that converts a stream of Tokens into an AST.
//! CONTEXT: This is the second stage of the parsing pipeline. It takes tokens
//! from the Lexer and builds an Expression tree that can be evaluated.
//!
//! GRAMMAR:
//!   expression     --> additive
//!   additive       --> multiplicative ( ("+" | "-") multiplicative )*
//!   multiplicative --> unary ( ("*" | "/") unary )*
//!   unary          --> "-" unary | power
//!   power          --> postfix ( "^" unary )?
//!   postfix        --> primary ( "%" )*
//!   primary        --> NUMBER | CONSTANT
//!                    | FUNCTION "(" expression ")"
//!                    | "(" expression ")"
//!
//! With ParseOptions::implicit_multiplication, the multiplicative rule also
//! accepts a bare operand wherever an explicit "*" could appear, so "2pi"
//! and "(1+2)3" parse as products. With the default options such adjacency
//! is a parse error.

use crate::ast::{BinaryOperator, Expression, UnaryOperator};
use crate::lexer::Lexer;
use crate::token::Token;

/// Parser errors with descriptive messages.
#[derive(Debug, PartialEq, Clone)]
pub struct ParseError {
    pub message: String,
}

impl ParseError {
    pub fn new(message: impl Into<String>) -> Self {
        ParseError {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Parse error: {}", self.message)
    }
}

impl std::error::Error for ParseError {}

pub type ParseResult<T> = Result<T, ParseError>;

/// Policy switches for the parser.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Treat adjacent operands ("2pi", "(1+2)3") as multiplication instead
    /// of rejecting them.
    pub implicit_multiplication: bool,
}

/// The Parser struct holds the lexer and current token state.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current_token: Token,
    options: ParseOptions,
}

impl<'a> Parser<'a> {
    /// Creates a new parser from an input string with default options.
    /// Automatically advances to the first token.
    pub fn new(input: &'a str) -> Self {
        Self::with_options(input, ParseOptions::default())
    }

    /// Creates a new parser with explicit policy options.
    pub fn with_options(input: &'a str, options: ParseOptions) -> Self {
        let mut lexer = Lexer::new(input);
        let current_token = lexer.next_token();
        Parser {
            lexer,
            current_token,
            options,
        }
    }

    /// Parses the entire input and returns the AST.
    pub fn parse(&mut self) -> ParseResult<Expression> {
        // Handle empty input
        if self.current_token == Token::EOF {
            return Err(ParseError::new("Empty expression"));
        }

        let expr = self.parse_expression()?;

        // Ensure we consumed all tokens
        if self.current_token != Token::EOF {
            return Err(ParseError::new(format!(
                "Unexpected token after expression: {}",
                self.current_token
            )));
        }

        Ok(expr)
    }

    /// Advances to the next token.
    fn advance(&mut self) {
        self.current_token = self.lexer.next_token();
    }

    /// Checks if the current token matches the expected token.
    /// If it matches, advances and returns Ok. Otherwise returns an error.
    fn expect(&mut self, expected: Token) -> ParseResult<()> {
        if self.current_token == expected {
            self.advance();
            Ok(())
        } else {
            Err(ParseError::new(format!(
                "Expected {}, found {}",
                expected, self.current_token
            )))
        }
    }

    /// Entry point for expression parsing.
    fn parse_expression(&mut self) -> ParseResult<Expression> {
        self.parse_additive()
    }

    /// Parses additive expressions (+ and -).
    fn parse_additive(&mut self) -> ParseResult<Expression> {
        let mut left = self.parse_multiplicative()?;

        loop {
            let op = match &self.current_token {
                Token::Plus => BinaryOperator::Add,
                Token::Minus => BinaryOperator::Subtract,
                _ => break,
            };

            self.advance();
            let right = self.parse_multiplicative()?;

            left = Expression::BinaryOp {
                left: Box::new(left),
                op,
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    /// Parses multiplicative expressions (* and /), plus implicit
    /// multiplication when the policy allows it.
    fn parse_multiplicative(&mut self) -> ParseResult<Expression> {
        let mut left = self.parse_unary()?;

        loop {
            let op = match &self.current_token {
                Token::Asterisk => {
                    self.advance();
                    BinaryOperator::Multiply
                }
                Token::Slash => {
                    self.advance();
                    BinaryOperator::Divide
                }
                // Implicit multiplication: the next token starts an operand
                // without an operator in between. The token is not consumed;
                // parse_unary picks it up as the right-hand side.
                Token::Number(_) | Token::Constant(_) | Token::Function(_) | Token::LParen
                    if self.options.implicit_multiplication =>
                {
                    BinaryOperator::Multiply
                }
                _ => break,
            };

            let right = self.parse_unary()?;

            left = Expression::BinaryOp {
                left: Box::new(left),
                op,
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    /// Parses unary expressions (negation).
    fn parse_unary(&mut self) -> ParseResult<Expression> {
        if self.current_token == Token::Minus {
            self.advance();
            let operand = self.parse_unary()?;
            return Ok(Expression::UnaryOp {
                op: UnaryOperator::Negate,
                operand: Box::new(operand),
            });
        }

        self.parse_power()
    }

    /// Parses power/exponentiation expressions (^).
    /// The right-hand side recurses through unary, which makes ^ right
    /// associative (2^3^2 = 2^(3^2)) and allows 2^-3.
    fn parse_power(&mut self) -> ParseResult<Expression> {
        let left = self.parse_postfix()?;

        if self.current_token == Token::Caret {
            self.advance();
            let right = self.parse_unary()?;

            return Ok(Expression::BinaryOp {
                left: Box::new(left),
                op: BinaryOperator::Power,
                right: Box::new(right),
            });
        }

        Ok(left)
    }

    /// Parses postfix percent: 10% divides the preceding operand by 100.
    fn parse_postfix(&mut self) -> ParseResult<Expression> {
        let mut expr = self.parse_primary()?;

        while self.current_token == Token::Percent {
            self.advance();
            expr = Expression::UnaryOp {
                op: UnaryOperator::Percent,
                operand: Box::new(expr),
            };
        }

        Ok(expr)
    }

    /// Parses primary expressions (literals, constants, function calls,
    /// parentheses).
    fn parse_primary(&mut self) -> ParseResult<Expression> {
        match self.current_token.clone() {
            Token::Number(n) => {
                self.advance();
                Ok(Expression::Literal(n))
            }

            Token::Constant(c) => {
                self.advance();
                Ok(Expression::Constant(c))
            }

            // A function binds to the immediately following parenthesized
            // group; a function name without '(' is malformed.
            Token::Function(func) => {
                self.advance();
                self.expect(Token::LParen)?;
                let arg = self.parse_expression()?;
                self.expect(Token::RParen)?;
                Ok(Expression::FunctionCall {
                    func,
                    arg: Box::new(arg),
                })
            }

            // Parenthesized expression
            Token::LParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect(Token::RParen)?;
                Ok(expr)
            }

            // Error cases
            Token::EOF => Err(ParseError::new("Unexpected end of expression")),

            Token::Illegal(ch) => Err(ParseError::new(format!("Illegal character: {}", ch))),

            Token::Unknown(word) => Err(ParseError::new(format!("Unknown name: {}", word))),

            token => Err(ParseError::new(format!("Unexpected token: {}", token))),
        }
    }
}

/// Convenience function to parse an expression string directly.
pub fn parse(input: &str) -> ParseResult<Expression> {
    let mut parser = Parser::new(input);
    parser.parse()
}

/// Convenience function to parse with explicit policy options.
pub fn parse_with(input: &str, options: ParseOptions) -> ParseResult<Expression> {
    let mut parser = Parser::with_options(input, options);
    parser.parse()
}
