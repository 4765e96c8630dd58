//! FILENAME: parser/src/lexer.rs
//! PURPOSE: Scans a raw expression string and produces a stream of Tokens.
//! CONTEXT: This is the first stage of the parsing pipeline. It handles
//! whitespace skipping, number parsing with a single decimal point, and
//! longest-match keyword recognition for function and constant names.
//!
//! SUPPORTED CHARACTERS:
//! - Digits and '.' for numbers
//! - Single char operators: + - * / ^ % ( )
//! - Keywords: sin cos tan ln log sqrt pi e (case-insensitive)
//!
//! Anything else lexes as Illegal/Unknown and is rejected by the parser.

use crate::token::{MathConstant, MathFunction, Token};
use std::collections::VecDeque;
use std::iter::Peekable;
use std::str::Chars;

/// Keyword table, longest names first so that longest-match wins when one
/// keyword is a prefix of the text remaining in an alphabetic run.
const KEYWORDS: [(&str, Token); 8] = [
    ("sqrt", Token::Function(MathFunction::Sqrt)),
    ("sin", Token::Function(MathFunction::Sin)),
    ("cos", Token::Function(MathFunction::Cos)),
    ("tan", Token::Function(MathFunction::Tan)),
    ("log", Token::Function(MathFunction::Log)),
    ("ln", Token::Function(MathFunction::Ln)),
    ("pi", Token::Constant(MathConstant::Pi)),
    ("e", Token::Constant(MathConstant::E)),
];

pub struct Lexer<'a> {
    input: Peekable<Chars<'a>>,
    /// Tokens queued when one alphabetic run resolves to several keywords.
    pending: VecDeque<Token>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input: input.chars().peekable(),
            pending: VecDeque::new(),
        }
    }

    /// Advances the lexer and returns the next token.
    pub fn next_token(&mut self) -> Token {
        if let Some(token) = self.pending.pop_front() {
            return token;
        }

        self.skip_whitespace();

        match self.input.next() {
            Some('+') => Token::Plus,
            Some('-') => Token::Minus,
            Some('*') => Token::Asterisk,
            Some('/') => Token::Slash,
            Some('^') => Token::Caret,
            Some('%') => Token::Percent,
            Some('(') => Token::LParen,
            Some(')') => Token::RParen,

            // Numbers (starts with digit or dot)
            Some(ch) if ch.is_ascii_digit() || ch == '.' => self.read_number(ch),

            // Keywords (starts with letter)
            Some(ch) if ch.is_ascii_alphabetic() => self.read_word(ch),

            // End of input
            None => Token::EOF,

            // Unknown character
            Some(ch) => Token::Illegal(ch),
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(&ch) = self.input.peek() {
            if !ch.is_whitespace() {
                break;
            }
            self.input.next();
        }
    }

    fn read_number(&mut self, first_char: char) -> Token {
        let mut number_str = String::from(first_char);
        let mut has_dot = first_char == '.';

        while let Some(&ch) = self.input.peek() {
            if ch.is_ascii_digit() {
                number_str.push(ch);
                self.input.next();
            } else if ch == '.' && !has_dot {
                has_dot = true;
                number_str.push(ch);
                self.input.next();
            } else {
                break;
            }
        }

        if let Ok(n) = number_str.parse::<f64>() {
            Token::Number(n)
        } else {
            // Fallback if parsing fails (e.g. just ".")
            Token::Illegal(first_char)
        }
    }

    /// Reads a maximal alphabetic run and splits it into keyword tokens by
    /// repeated longest-match. A run that is not wholly covered by keywords
    /// becomes a single Unknown token (e.g. "sinx").
    fn read_word(&mut self, first_char: char) -> Token {
        let mut word = String::from(first_char);

        while let Some(&ch) = self.input.peek() {
            if ch.is_ascii_alphabetic() {
                word.push(ch);
                self.input.next();
            } else {
                break;
            }
        }

        let lower = word.to_lowercase();
        let mut tokens = Vec::new();
        let mut rest = lower.as_str();

        while !rest.is_empty() {
            match keyword_prefix(rest) {
                Some((token, len)) => {
                    tokens.push(token);
                    rest = &rest[len..];
                }
                None => return Token::Unknown(word),
            }
        }

        // The run is non-empty, so at least one keyword matched.
        let mut tokens = tokens.into_iter();
        let first = match tokens.next() {
            Some(token) => token,
            None => return Token::Unknown(word),
        };
        self.pending.extend(tokens);
        first
    }
}

/// Returns the longest keyword that prefixes `rest`, with its length.
fn keyword_prefix(rest: &str) -> Option<(Token, usize)> {
    KEYWORDS
        .iter()
        .find(|(name, _)| rest.starts_with(name))
        .map(|(name, token)| (token.clone(), name.len()))
}
