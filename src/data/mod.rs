//! Lisp data types.
//!
//! Every value the interpreter handles is an [`Expression`]:
//! the reader produces them, the evaluator consumes and produces them,
//! and the printer renders them back to text.
//!
//! Lists are plain vectors. The reader only ever appends freshly-parsed
//! children, so a list can't contain itself.

mod objects;
mod print;
#[cfg(feature = "render")]
pub mod render;
mod symbols;

pub use objects::*;
pub use print::print;
pub use symbols::Symbol;

pub type Integer = i64;
pub type Float = f64;

/// Enum for a Lisp value.
///
/// Equality is structural, all the way down.
/// An `Integer` is never equal to a `Float`, even when they have the same magnitude.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Integer(Integer),
    Float(Float),
    Boolean(bool),
    Symbol(Symbol),
    List(Vec<Expression>),
    Procedure(Procedure),
    /// The unspecified value, e.g. the result of `define`.
    /// It has no reader syntax.
    Void,
}

impl Expression {
    /// Construct a symbol value.
    pub fn symbol(name: &str) -> Self {
        Expression::Symbol(Symbol::new(name))
    }

    /// Construct a list value.
    pub fn list(items: impl IntoIterator<Item = Expression>) -> Self {
        Expression::List(items.into_iter().collect())
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Expression::Integer(_) | Expression::Float(_))
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Expression::Void)
    }

    /// Short name of the variant, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Expression::Integer(_) => "integer",
            Expression::Float(_) => "float",
            Expression::Boolean(_) => "boolean",
            Expression::Symbol(_) => "symbol",
            Expression::List(_) => "list",
            Expression::Procedure(_) => "procedure",
            Expression::Void => "void",
        }
    }
}

impl From<Integer> for Expression {
    fn from(value: Integer) -> Self {
        Expression::Integer(value)
    }
}

impl From<Float> for Expression {
    fn from(value: Float) -> Self {
        Expression::Float(value)
    }
}

impl From<bool> for Expression {
    fn from(value: bool) -> Self {
        Expression::Boolean(value)
    }
}

impl From<Symbol> for Expression {
    fn from(value: Symbol) -> Self {
        Expression::Symbol(value)
    }
}

impl From<Vec<Expression>> for Expression {
    fn from(value: Vec<Expression>) -> Self {
        Expression::List(value)
    }
}

impl From<Procedure> for Expression {
    fn from(value: Procedure) -> Self {
        Expression::Procedure(value)
    }
}
