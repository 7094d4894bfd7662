//! Callable objects: native primitives and user-defined closures.

use std::fmt;
use std::rc::Rc;

use crate::eval::{Environment, EvalError, EvalResult};

use super::{Expression, Symbol};

/// A native operation over already-evaluated arguments.
pub type NativeFn = fn(&[Expression]) -> EvalResult<Expression>;

/// Number of arguments a procedure accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(&self, count: usize) -> bool {
        match *self {
            Arity::Exactly(n) => count == n,
            Arity::AtLeast(n) => count >= n,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exactly(n) => write!(f, "exactly {n}"),
            Arity::AtLeast(n) => write!(f, "at least {n}"),
        }
    }
}

/// An entry in the builtin table.
pub struct Primitive {
    pub name: &'static str,
    pub arity: Arity,
    pub func: NativeFn,
}

impl Primitive {
    /// Check the argument count against the table entry, then run the native operation.
    pub fn call(&self, args: &[Expression]) -> EvalResult<Expression> {
        if !self.arity.accepts(args.len()) {
            return Err(EvalError::ArityMismatch {
                procedure: self.name.to_owned(),
                expected: self.arity,
                got: args.len(),
            });
        }
        (self.func)(args)
    }
}

impl fmt::Debug for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Primitive")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish()
    }
}

/// A user-defined procedure, created by `lambda`.
///
/// The closure keeps the frame it was created in alive for as long as the closure itself lives.
/// A closure bound into the frame it captured forms a reference cycle, and that frame
/// is not freed until the process exits.
pub struct Closure {
    pub params: Vec<Symbol>,
    pub body: Expression,
    pub env: Environment,
}

// The captured environment may (indirectly) contain this closure,
// so it is left out of the debug output.
impl fmt::Debug for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Closure")
            .field("params", &self.params)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub enum Procedure {
    Primitive(&'static Primitive),
    Closure(Rc<Closure>),
}

impl Procedure {
    /// Name used in error messages.
    pub fn name(&self) -> String {
        match self {
            Procedure::Primitive(p) => p.name.to_owned(),
            Procedure::Closure(_) => Expression::Procedure(self.clone()).to_string(),
        }
    }
}

/// Procedures have identity, not structure:
/// two procedures are equal only if they are the same builtin or the same closure.
impl PartialEq for Procedure {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Procedure::Primitive(a), Procedure::Primitive(b)) => std::ptr::eq(*a, *b),
            (Procedure::Closure(a), Procedure::Closure(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first(args: &[Expression]) -> EvalResult<Expression> {
        Ok(args[0].clone())
    }

    static FIRST: Primitive = Primitive {
        name: "first",
        arity: Arity::Exactly(1),
        func: first,
    };

    #[test]
    fn arity_accepts() {
        assert!(Arity::Exactly(2).accepts(2));
        assert!(!Arity::Exactly(2).accepts(3));
        assert!(Arity::AtLeast(1).accepts(5));
        assert!(!Arity::AtLeast(1).accepts(0));
    }

    #[test]
    fn primitive_checks_arity() {
        assert_eq!(FIRST.call(&[Expression::Integer(3)]), Ok(Expression::Integer(3)));
        assert_eq!(
            FIRST.call(&[]),
            Err(EvalError::ArityMismatch {
                procedure: "first".to_owned(),
                expected: Arity::Exactly(1),
                got: 0,
            })
        );
    }

    #[test]
    fn closures_compare_by_identity() {
        let make = || {
            Procedure::Closure(Rc::new(Closure {
                params: vec![Symbol::new("x")],
                body: Expression::symbol("x"),
                env: Environment::new(),
            }))
        };
        let a = make();
        assert_eq!(a, a.clone());
        assert_ne!(a, make());
        assert_eq!(Procedure::Primitive(&FIRST), Procedure::Primitive(&FIRST));
    }
}
