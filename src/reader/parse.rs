//! Recursive-descent parsing of a token stream into expressions.

use std::iter::Peekable;

use super::token::{regex, Token, TokenOffset};
use super::{ReadErr, ReadResult};
use crate::data::{Expression, Float, Integer};

/// Classify a single non-bracket token as an integer, float, or symbol.
///
/// An integer literal too large for an `Integer` is read as a float instead.
/// A numeric literal outside the finite `Float` range is a symbol.
pub fn atom(token: &str) -> Expression {
    if regex::integer().is_match(token) {
        if let Ok(i) = token.parse::<Integer>() {
            return Expression::Integer(i);
        }
    }
    if regex::float().is_match(token) {
        match token.parse::<Float>() {
            Ok(f) if f.is_finite() => return Expression::Float(f),
            _ => (),
        }
    }
    Expression::symbol(token)
}

/// Read exactly one expression from the front of the token stream.
///
/// Tokens after that expression are left in the stream.
pub fn read<I>(tokens: &mut Peekable<I>) -> ReadResult<Expression>
where
    I: Iterator<Item = TokenOffset>,
{
    read_at_depth(tokens, 0)
}

fn read_at_depth<I>(tokens: &mut Peekable<I>, depth: usize) -> ReadResult<Expression>
where
    I: Iterator<Item = TokenOffset>,
{
    let TokenOffset {
        token,
        line,
        column,
    } = tokens.next().ok_or(ReadErr::UnexpectedEof { depth })?;

    match token {
        Token::Atom(s) => Ok(atom(&s)),
        Token::Close(bracket) => Err(ReadErr::UnmatchedCloseBracket {
            bracket,
            line,
            column,
        }),
        Token::Open(open) => {
            let mut list = Vec::new();
            loop {
                match tokens.peek() {
                    None => return Err(ReadErr::UnexpectedEof { depth: depth + 1 }),
                    Some(TokenOffset {
                        token: Token::Close(close),
                        line,
                        column,
                    }) => {
                        if *close != open {
                            return Err(ReadErr::MismatchedBracketType {
                                open,
                                close: *close,
                                line: *line,
                                column: *column,
                            });
                        }
                        tokens.next();
                        return Ok(Expression::List(list));
                    }
                    Some(_) => list.push(read_at_depth(tokens, depth + 1)?),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Symbol;

    #[test]
    fn classify_integers() {
        for (token, want) in [("7", 7), ("-6", -6), ("+12", 12), ("007", 7)] {
            assert_eq!(atom(token), Expression::Integer(want), "token {token}");
        }
    }

    #[test]
    fn classify_floats() {
        for (token, want) in [
            ("1.5", 1.5),
            ("-3.33", -3.33),
            ("1.", 1.0),
            (".5", 0.5),
            ("1e3", 1000.0),
            ("-2.5E-1", -0.25),
        ] {
            assert_eq!(atom(token), Expression::Float(want), "token {token}");
        }
    }

    #[test]
    fn overflowing_integer_is_float() {
        assert_eq!(
            atom("99999999999999999999"),
            Expression::Float(99999999999999999999.0)
        );
    }

    #[test]
    fn out_of_range_literals_are_symbols() {
        let huge = format!("1{}", "0".repeat(400));
        assert_eq!(atom(&huge), Expression::symbol(&huge));
        assert_eq!(atom("1.5e308"), Expression::Float(1.5e308));
    }

    #[test]
    fn classify_symbols() {
        for token in [
            "x",
            "+",
            "-",
            "1+",
            "inf",
            "NaN",
            "e5",
            ".",
            "tree->list",
            "#t",
            "1e400",
            "-1e400",
        ] {
            assert_eq!(atom(token), Expression::Symbol(Symbol::new(token)), "token {token}");
        }
    }
}
