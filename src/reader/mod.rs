//! Support for reading Lisp expressions from strings.

use std::io::ErrorKind;

use crate::data::Expression;
use parse::read;

mod parse;
mod token;

pub use parse::atom;
pub use token::{tokenize, Bracket, Token, TokenOffset};

/// Parse the first expression in `input`.
///
/// Only the first top-level expression is read.
/// Anything after it, well-formed or not, is ignored: `"99 100"` reads as `99`.
pub fn parse(input: &str) -> ReadResult<Expression> {
    let mut tokens = tokenize(input).into_iter().peekable();
    read(&mut tokens)
}

/// Parse every top-level expression in `input` (i.e. a body), in order.
pub fn parse_body(input: &str) -> ReadResult<Vec<Expression>> {
    let mut tokens = tokenize(input).into_iter().peekable();
    let mut body = Vec::new();
    while tokens.peek().is_some() {
        body.push(read(&mut tokens)?);
    }
    Ok(body)
}

/// Error type if a read does not complete.
///
/// A reader may hit a true parsing error, e.g. "())", that no additional input can fix.
/// This is distinct from a reader that gets an unexpected end-of-input, e.g. "(()":
/// it may be that more input will fix the issue.
///
/// If input is coming in interactively, this is a useful distinction;
/// in the first case, we'd want to indicate an error to the user,
/// while in the latter we'd like to prompt the user for more input.
/// See [`ReadErr::is_incomplete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadErr {
    /// Input ran out with `depth` lists still open (0 if the input was empty).
    UnexpectedEof { depth: usize },
    UnmatchedCloseBracket {
        bracket: Bracket,
        line: usize,
        column: usize,
    },
    /// A list opened with `open` was closed with a different bracket type.
    MismatchedBracketType {
        open: Bracket,
        close: Bracket,
        line: usize,
        column: usize,
    },
}

impl ReadErr {
    /// Whether more input could complete the read.
    pub fn is_incomplete(&self) -> bool {
        matches!(self, ReadErr::UnexpectedEof { .. })
    }
}

impl std::fmt::Display for ReadErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadErr::UnexpectedEof { depth: 0 } => write!(f, "unexpected end of input"),
            ReadErr::UnexpectedEof { depth } => write!(
                f,
                "unexpected end of input within an expression of depth {depth}"
            ),
            ReadErr::UnmatchedCloseBracket {
                bracket,
                line,
                column,
            } => write!(
                f,
                "unexpected '{}' at line {line} column {column} without matching '{}'",
                bracket.close(),
                bracket.open()
            ),
            ReadErr::MismatchedBracketType {
                open,
                close,
                line,
                column,
            } => write!(
                f,
                "'{}' closed by '{}' at line {line} column {column}",
                open.open(),
                close.close()
            ),
        }
    }
}

impl std::error::Error for ReadErr {}

/// The main result type for this module:
/// a T (token, expression, etc), or an error.
pub type ReadResult<T> = Result<T, ReadErr>;

impl From<ReadErr> for std::io::Error {
    fn from(value: ReadErr) -> Self {
        let kind = if value.is_incomplete() {
            ErrorKind::UnexpectedEof
        } else {
            ErrorKind::InvalidInput
        };
        std::io::Error::new(kind, value)
    }
}
