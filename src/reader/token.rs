//! Module for extracting Lisp tokens from an input string.

/// One of the three interchangeable bracket pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bracket {
    Round,
    Square,
    Curly,
}

impl Bracket {
    pub fn open(self) -> char {
        match self {
            Bracket::Round => '(',
            Bracket::Square => '[',
            Bracket::Curly => '{',
        }
    }

    pub fn close(self) -> char {
        match self {
            Bracket::Round => ')',
            Bracket::Square => ']',
            Bracket::Curly => '}',
        }
    }
}

/// A Lisp token.
///
/// Whitespace is dropped. Atoms are kept as text; the parser classifies them.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Open(Bracket),
    Close(Bracket),
    Atom(String),
}

/// A token along with its starting position in the input.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenOffset {
    pub token: Token,
    pub line: usize,
    pub column: usize,
}

impl TokenOffset {
    fn new(line: usize, column: usize, token: Token) -> Self {
        // In useful output, lines and columns are 1-indexed
        TokenOffset {
            token,
            line: line + 1,
            column: column + 1,
        }
    }
}

/// Split the input into its constituent tokens.
///
/// Every bracket is a token on its own; everything else is split on runs of whitespace.
pub fn tokenize(mut input: &str) -> Vec<TokenOffset> {
    let mut result = Vec::new();

    // Position info for error messages, 0-indexed until output.
    let mut line = 0;
    let mut column = 0;
    while let Some(next) = get_next_token(input) {
        if let Some(token) = next.token {
            result.push(TokenOffset::new(line, column, token));
        }
        line += next.lines;
        if next.lines > 0 {
            column = next.columns
        } else {
            column += next.columns;
        }

        input = next.remainder;
    }

    tracing::trace!(tokens = result.len(), "tokenized input");
    result
}

struct NextToken<'a> {
    // None if only whitespace was consumed.
    token: Option<Token>,
    // Lines traversed in finding the token.
    lines: usize,
    // Columns in the final line traversed in finding the token.
    columns: usize,

    remainder: &'a str,
}

pub(super) mod regex {
    use regex::Regex;
    use std::sync::OnceLock;

    pub(in crate::reader) fn space() -> &'static Regex {
        static SPACE: OnceLock<Regex> = OnceLock::new();
        SPACE.get_or_init(|| {
            Regex::new(r"\A\s+").expect("could not compile regex for empty space")
        })
    }

    pub(in crate::reader) fn word() -> &'static Regex {
        static MATCH: OnceLock<Regex> = OnceLock::new();
        MATCH.get_or_init(|| {
            Regex::new(r"\A[^\s()\[\]{}]+").expect("could not compile regex for word")
        })
    }

    pub(in crate::reader) fn integer() -> &'static Regex {
        static MATCH: OnceLock<Regex> = OnceLock::new();
        MATCH.get_or_init(|| {
            Regex::new(r"\A[+-]?[0-9]+\z").expect("could not compile regex for integer")
        })
    }

    pub(in crate::reader) fn float() -> &'static Regex {
        static MATCH: OnceLock<Regex> = OnceLock::new();
        MATCH.get_or_init(|| {
            // Decimal with an optional fraction, or a bare fraction; then an optional exponent.
            Regex::new(r"\A[+-]?([0-9]+\.?[0-9]*|\.[0-9]+)([eE][+-]?[0-9]+)?\z")
                .expect("could not compile regex for float")
        })
    }
}

/// Returns the (line, column) that the cursor ends at after passing over `s`,
/// assuming it started at (0, 0).
fn cursor_distance(s: &str) -> (usize, usize) {
    match s.rfind('\n') {
        Some(last_newline) => (
            s.matches('\n').count(),
            s[last_newline + 1..].chars().count(),
        ),
        None => (0, s.chars().count()),
    }
}

fn bracket(ch: char) -> Option<Token> {
    Some(match ch {
        '(' => Token::Open(Bracket::Round),
        ')' => Token::Close(Bracket::Round),
        '[' => Token::Open(Bracket::Square),
        ']' => Token::Close(Bracket::Square),
        '{' => Token::Open(Bracket::Curly),
        '}' => Token::Close(Bracket::Curly),
        _ => return None,
    })
}

/// Get the next token from the input, and the remainder of the input.
/// Returns None at the end of input.
fn get_next_token(input: &str) -> Option<NextToken<'_>> {
    let first = input.chars().next()?;

    if let Some(token) = bracket(first) {
        return Some(NextToken {
            token: Some(token),
            lines: 0,
            columns: 1,
            remainder: &input[first.len_utf8()..],
        });
    }

    if let Some(space) = regex::space().find(input) {
        let (lines, columns) = cursor_distance(space.as_str());
        return Some(NextToken {
            token: None,
            lines,
            columns,
            remainder: &input[space.end()..],
        });
    }

    // Anything that is neither bracket nor space starts a word.
    let word = regex::word().find(input).map_or(input, |m| m.as_str());
    Some(NextToken {
        token: Some(Token::Atom(word.to_owned())),
        lines: 0,
        columns: word.chars().count(),
        remainder: &input[word.len()..],
    })
}
