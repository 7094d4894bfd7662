//! A small Lisp interpreter.
//!
//! Text is read into an [`Expression`] tree ([`parse`]), evaluated against a chain of
//! lexically-scoped environments ([`evaluate`], [`standard_environment`]),
//! and rendered back to text ([`print`]).
//!
//! ```
//! let env = lis::standard_environment();
//! let program = lis::parse("((lambda (n) (* n 2)) 7)").unwrap();
//! let result = lis::evaluate(&program, &env).unwrap();
//! assert_eq!(lis::print(&result), "14");
//! ```

pub mod data;
pub mod eval;
pub mod reader;

pub use data::{print, Expression, Symbol};
pub use eval::{evaluate, standard_environment, Environment, EvalError};
pub use reader::{parse, parse_body, ReadErr};

/// Any error from reading or evaluating.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Read(ReadErr),
    Eval(EvalError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Read(e) => write!(f, "read error: {e}"),
            Error::Eval(e) => write!(f, "eval error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Read(e) => Some(e),
            Error::Eval(e) => Some(e),
        }
    }
}

impl From<ReadErr> for Error {
    fn from(value: ReadErr) -> Self {
        Error::Read(value)
    }
}

impl From<EvalError> for Error {
    fn from(value: EvalError) -> Self {
        Error::Eval(value)
    }
}

/// Read and evaluate every top-level expression in `input`, in order.
///
/// Returns the value of the last expression, or the void value if there were none.
/// Stops at the first error.
pub fn run(input: &str, env: &Environment) -> Result<Expression, Error> {
    let mut result = Expression::Void;
    for expression in parse_body(input)? {
        result = evaluate(&expression, env)?;
    }
    Ok(result)
}
