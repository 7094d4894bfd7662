//! Lisp evaluator.
//!
//! A tree-walking evaluator: each expression is evaluated by recursing on its
//! subexpressions, on the native stack, in the environment it appears in.
//!
//! -   Numbers and booleans evaluate to themselves.
//! -   Symbols are looked up through the environment chain.
//! -   Lists starting with `define` or `lambda` are special forms.
//! -   Any other nonempty list is a procedure application: the head, then each argument
//!     from left to right, is evaluated before the procedure is applied.

use std::fmt;
use std::rc::Rc;

use crate::data::{Arity, Closure, Expression, Procedure, Symbol};

mod builtins;
mod env;

pub use builtins::{standard_environment, BUILTINS};
pub use env::Environment;


/// Errors that abort an evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    UndefinedSymbol(String),
    /// `()` was evaluated.
    EmptyApplication,
    /// The head of an application evaluated to this (printed) non-procedure value.
    NotCallable(String),
    ArityMismatch {
        procedure: String,
        expected: Arity,
        got: usize,
    },
    WrongArgumentType {
        procedure: String,
        expected: &'static str,
        got: String,
    },
    InvalidSpecialFormSyntax {
        form: &'static str,
        reason: String,
    },
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::UndefinedSymbol(name) => write!(f, "undefined symbol: {name}"),
            EvalError::EmptyApplication => write!(f, "cannot evaluate an empty application ()"),
            EvalError::NotCallable(value) => write!(f, "{value} is not a procedure"),
            EvalError::ArityMismatch {
                procedure,
                expected,
                got,
            } => write!(
                f,
                "{procedure} takes {expected} argument(s), but was given {got}"
            ),
            EvalError::WrongArgumentType {
                procedure,
                expected,
                got,
            } => write!(f, "{procedure} expects a {expected} argument, got {got}"),
            EvalError::InvalidSpecialFormSyntax { form, reason } => {
                write!(f, "invalid {form} syntax: {reason}")
            }
        }
    }
}

impl std::error::Error for EvalError {}

pub type EvalResult<T> = Result<T, EvalError>;

/// Keywords whose lists are not procedure applications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpecialForm {
    Define,
    Lambda,
}

impl SpecialForm {
    fn of(symbol: Symbol) -> Option<Self> {
        symbol.with_name(|name| match name {
            "define" => Some(SpecialForm::Define),
            "lambda" => Some(SpecialForm::Lambda),
            _ => None,
        })
    }
}

/// Evaluate `expression` in `env`.
pub fn evaluate(expression: &Expression, env: &Environment) -> EvalResult<Expression> {
    match expression {
        Expression::Integer(_)
        | Expression::Float(_)
        | Expression::Boolean(_)
        | Expression::Procedure(_)
        | Expression::Void => Ok(expression.clone()),
        Expression::Symbol(symbol) => env.lookup(*symbol),
        Expression::List(items) => evaluate_list(items, env),
    }
}

fn evaluate_list(items: &[Expression], env: &Environment) -> EvalResult<Expression> {
    let Some((head, tail)) = items.split_first() else {
        return Err(EvalError::EmptyApplication);
    };

    if let Expression::Symbol(keyword) = head {
        match SpecialForm::of(*keyword) {
            Some(SpecialForm::Define) => return eval_define(tail, env),
            Some(SpecialForm::Lambda) => return eval_lambda(tail, env),
            None => (),
        }
    }

    let procedure = match evaluate(head, env)? {
        Expression::Procedure(procedure) => procedure,
        other => return Err(EvalError::NotCallable(other.to_string())),
    };
    let args = tail
        .iter()
        .map(|arg| evaluate(arg, env))
        .collect::<EvalResult<Vec<_>>>()?;
    apply(&procedure, args)
}

/// `(define name value)`
fn eval_define(tail: &[Expression], env: &Environment) -> EvalResult<Expression> {
    let [name, value] = tail else {
        return Err(EvalError::InvalidSpecialFormSyntax {
            form: "define",
            reason: format!("expected a name and a value, got {} argument(s)", tail.len()),
        });
    };
    let Expression::Symbol(name) = name else {
        return Err(EvalError::InvalidSpecialFormSyntax {
            form: "define",
            reason: format!("cannot bind to non-symbol {name}"),
        });
    };

    let value = evaluate(value, env)?;
    tracing::debug!(%name, %value, "define");
    env.define(*name, value);
    Ok(Expression::Void)
}

/// `(lambda (params...) body)`
fn eval_lambda(tail: &[Expression], env: &Environment) -> EvalResult<Expression> {
    let [params, body] = tail else {
        return Err(EvalError::InvalidSpecialFormSyntax {
            form: "lambda",
            reason: format!(
                "expected a parameter list and a single body, got {} argument(s)",
                tail.len()
            ),
        });
    };
    let Expression::List(params) = params else {
        return Err(EvalError::InvalidSpecialFormSyntax {
            form: "lambda",
            reason: format!("parameters must be a list, got {params}"),
        });
    };
    let params = params
        .iter()
        .map(|param| match param {
            Expression::Symbol(symbol) => Ok(*symbol),
            other => Err(EvalError::InvalidSpecialFormSyntax {
                form: "lambda",
                reason: format!("parameter list must only be symbols, got {other}"),
            }),
        })
        .collect::<EvalResult<Vec<_>>>()?;

    Ok(Expression::Procedure(Procedure::Closure(Rc::new(Closure {
        params,
        body: body.clone(),
        env: env.clone(),
    }))))
}

/// Apply a procedure to already-evaluated arguments.
pub fn apply(procedure: &Procedure, args: Vec<Expression>) -> EvalResult<Expression> {
    match procedure {
        Procedure::Primitive(primitive) => {
            tracing::trace!(procedure = primitive.name, args = args.len(), "apply primitive");
            primitive.call(&args)
        }
        Procedure::Closure(closure) => {
            tracing::trace!(args = args.len(), "apply closure");
            if closure.params.len() != args.len() {
                return Err(EvalError::ArityMismatch {
                    procedure: procedure.name(),
                    expected: Arity::Exactly(closure.params.len()),
                    got: args.len(),
                });
            }
            let frame = closure.env.child();
            for (param, arg) in closure.params.iter().zip(args) {
                frame.define(*param, arg);
            }
            evaluate(&closure.body, &frame)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::parse;

    fn eval_str(input: &str, env: &Environment) -> EvalResult<Expression> {
        evaluate(&parse(input).expect("test input should parse"), env)
    }

    #[test]
    fn self_evaluating() -> EvalResult<()> {
        let env = Environment::new();
        for value in [
            Expression::Integer(7),
            Expression::Float(0.5),
            Expression::Boolean(true),
        ] {
            assert_eq!(evaluate(&value, &env)?, value);
        }
        Ok(())
    }

    #[test]
    fn define_then_lookup() -> EvalResult<()> {
        let env = standard_environment();
        assert_eq!(eval_str("(define x 42)", &env)?, Expression::Void);
        assert_eq!(evaluate(&Expression::symbol("x"), &env)?, Expression::Integer(42));
        Ok(())
    }

    #[test]
    fn undefined_symbol() {
        let env = standard_environment();
        assert_eq!(
            eval_str("y", &env),
            Err(EvalError::UndefinedSymbol("y".to_owned()))
        );
    }

    #[test]
    fn empty_application() {
        let env = standard_environment();
        assert_eq!(eval_str("()", &env), Err(EvalError::EmptyApplication));
        assert_eq!(eval_str("(+ 1 [])", &env), Err(EvalError::EmptyApplication));
    }

    #[test]
    fn add() -> EvalResult<()> {
        let env = standard_environment();
        assert_eq!(eval_str("(+ 2 3)", &env)?, Expression::Integer(5));
        Ok(())
    }

    #[test]
    fn immediate_lambda() -> EvalResult<()> {
        let env = standard_environment();
        assert_eq!(eval_str("((lambda (n) (* n 2)) 7)", &env)?, Expression::Integer(14));
        Ok(())
    }

    #[test]
    fn not_callable() {
        let env = standard_environment();
        assert_eq!(
            eval_str("(1 2 3)", &env),
            Err(EvalError::NotCallable("1".to_owned()))
        );
    }

    #[test]
    fn head_checked_before_arguments() {
        // The head isn't callable, so the undefined argument is never evaluated.
        let env = standard_environment();
        assert!(matches!(
            eval_str("(1 undefined-thing)", &env),
            Err(EvalError::NotCallable(_))
        ));
    }

    #[test]
    fn arguments_left_to_right() {
        // The first failing argument is the one reported.
        let env = standard_environment();
        assert_eq!(
            eval_str("(+ first-missing second-missing)", &env),
            Err(EvalError::UndefinedSymbol("first-missing".to_owned()))
        );
    }

    #[test]
    fn closure_arity() {
        let env = standard_environment();
        assert!(matches!(
            eval_str("((lambda (a b) a) 1)", &env),
            Err(EvalError::ArityMismatch {
                expected: Arity::Exactly(2),
                got: 1,
                ..
            })
        ));
    }

    #[test]
    fn error_display() {
        let e = EvalError::ArityMismatch {
            procedure: "+".to_owned(),
            expected: Arity::Exactly(2),
            got: 3,
        };
        assert_eq!(e.to_string(), "+ takes exactly 2 argument(s), but was given 3");
        assert_eq!(
            EvalError::UndefinedSymbol("y".to_owned()).to_string(),
            "undefined symbol: y"
        );
    }
}
