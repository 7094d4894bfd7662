//! The builtin procedure table.
//!
//! Every builtin receives its arguments already evaluated.
//! Arity is checked against the table entry before the native function runs;
//! the native function checks operand types.
//!
//! Numeric operations on two integers stay in integers, unless the result
//! can't be represented as one (overflow, inexact division, division by zero);
//! then the operation is redone in floating point. Any float operand makes
//! the whole operation floating point.

use super::{Environment, EvalError, EvalResult};
use crate::data::{Arity, Expression, Float, Integer, NativeFn, Primitive, Procedure, Symbol};

pub static BUILTINS: &[Primitive] = &[
    builtin("+", Arity::Exactly(2), add),
    builtin("-", Arity::Exactly(2), subtract),
    builtin("*", Arity::Exactly(2), multiply),
    builtin("/", Arity::Exactly(2), divide),
    builtin("quotient", Arity::Exactly(2), quotient),
    builtin("modulo", Arity::Exactly(2), modulo),
    builtin(">", Arity::Exactly(2), greater),
    builtin("<", Arity::Exactly(2), less),
    builtin(">=", Arity::Exactly(2), greater_equal),
    builtin("<=", Arity::Exactly(2), less_equal),
    builtin("=", Arity::Exactly(2), numeric_equal),
    builtin("abs", Arity::Exactly(1), abs),
    builtin("max", Arity::Exactly(2), max),
    builtin("min", Arity::Exactly(2), min),
    builtin("round", Arity::Exactly(1), round),
    builtin("not", Arity::Exactly(1), not),
    // There is no separate notion of identity: atoms are values.
    builtin("eq?", Arity::Exactly(2), equal),
    builtin("equal?", Arity::Exactly(2), equal),
    builtin("number?", Arity::Exactly(1), is_number),
    builtin("symbol?", Arity::Exactly(1), is_symbol),
    builtin("procedure?", Arity::Exactly(1), is_procedure),
    builtin("begin", Arity::AtLeast(1), begin),
];

const fn builtin(name: &'static str, arity: Arity, func: NativeFn) -> Primitive {
    Primitive { name, arity, func }
}

/// Create a fresh root environment with every builtin bound.
pub fn standard_environment() -> Environment {
    let env = Environment::new();
    for primitive in BUILTINS {
        env.define(
            Symbol::new(primitive.name),
            Expression::Procedure(Procedure::Primitive(primitive)),
        );
    }
    tracing::trace!(builtins = BUILTINS.len(), "created standard environment");
    env
}

fn wrong_type(procedure: &str, expected: &'static str, got: &Expression) -> EvalError {
    EvalError::WrongArgumentType {
        procedure: procedure.to_owned(),
        expected,
        got: format!("{} {}", got.kind(), got),
    }
}

/// Get exactly N arguments.
///
/// The table entry has already checked the count;
/// this gives the native function a fixed-size view of them.
fn args<'a, const N: usize>(
    procedure: &str,
    args: &'a [Expression],
) -> EvalResult<&'a [Expression; N]> {
    args.try_into().map_err(|_| EvalError::ArityMismatch {
        procedure: procedure.to_owned(),
        expected: Arity::Exactly(N),
        got: args.len(),
    })
}

fn to_float(procedure: &str, value: &Expression) -> EvalResult<Float> {
    match value {
        Expression::Integer(i) => Ok(*i as Float),
        Expression::Float(f) => Ok(*f),
        other => Err(wrong_type(procedure, "number", other)),
    }
}

/// Two numeric operands, after promotion.
enum Operands {
    Integers(Integer, Integer),
    Floats(Float, Float),
}

fn operands(procedure: &str, args: &[Expression]) -> EvalResult<Operands> {
    match self::args::<2>(procedure, args)? {
        [Expression::Integer(a), Expression::Integer(b)] => Ok(Operands::Integers(*a, *b)),
        [a, b] => Ok(Operands::Floats(
            to_float(procedure, a)?,
            to_float(procedure, b)?,
        )),
    }
}

fn arithmetic(
    procedure: &str,
    args: &[Expression],
    integer_op: fn(Integer, Integer) -> Option<Integer>,
    float_op: fn(Float, Float) -> Float,
) -> EvalResult<Expression> {
    Ok(match operands(procedure, args)? {
        Operands::Integers(a, b) => match integer_op(a, b) {
            Some(result) => Expression::Integer(result),
            None => Expression::Float(float_op(a as Float, b as Float)),
        },
        Operands::Floats(a, b) => Expression::Float(float_op(a, b)),
    })
}

fn comparison(
    procedure: &str,
    args: &[Expression],
    integer_op: fn(Integer, Integer) -> bool,
    float_op: fn(Float, Float) -> bool,
) -> EvalResult<Expression> {
    Ok(Expression::Boolean(match operands(procedure, args)? {
        Operands::Integers(a, b) => integer_op(a, b),
        Operands::Floats(a, b) => float_op(a, b),
    }))
}

fn add(args: &[Expression]) -> EvalResult<Expression> {
    arithmetic("+", args, Integer::checked_add, |a, b| a + b)
}

fn subtract(args: &[Expression]) -> EvalResult<Expression> {
    arithmetic("-", args, Integer::checked_sub, |a, b| a - b)
}

fn multiply(args: &[Expression]) -> EvalResult<Expression> {
    arithmetic("*", args, Integer::checked_mul, |a, b| a * b)
}

fn divide(args: &[Expression]) -> EvalResult<Expression> {
    arithmetic(
        "/",
        args,
        |a, b| match a.checked_rem(b) {
            Some(0) => a.checked_div(b),
            _ => None,
        },
        |a, b| a / b,
    )
}

/// Floor division.
fn quotient(args: &[Expression]) -> EvalResult<Expression> {
    arithmetic(
        "quotient",
        args,
        |a, b| {
            let q = a.checked_div(b)?;
            let r = a.checked_rem(b)?;
            // Truncation rounded toward zero; step down when the signs differ.
            Some(if r != 0 && ((r < 0) != (b < 0)) { q - 1 } else { q })
        },
        |a, b| (a / b).floor(),
    )
}

/// Remainder with the sign of the dividend.
fn modulo(args: &[Expression]) -> EvalResult<Expression> {
    arithmetic("modulo", args, Integer::checked_rem, |a, b| a % b)
}

fn greater(args: &[Expression]) -> EvalResult<Expression> {
    comparison(">", args, |a, b| a > b, |a, b| a > b)
}

fn less(args: &[Expression]) -> EvalResult<Expression> {
    comparison("<", args, |a, b| a < b, |a, b| a < b)
}

fn greater_equal(args: &[Expression]) -> EvalResult<Expression> {
    comparison(">=", args, |a, b| a >= b, |a, b| a >= b)
}

fn less_equal(args: &[Expression]) -> EvalResult<Expression> {
    comparison("<=", args, |a, b| a <= b, |a, b| a <= b)
}

fn numeric_equal(args: &[Expression]) -> EvalResult<Expression> {
    comparison("=", args, |a, b| a == b, |a, b| a == b)
}

fn max(args: &[Expression]) -> EvalResult<Expression> {
    arithmetic("max", args, |a, b| Some(a.max(b)), Float::max)
}

fn min(args: &[Expression]) -> EvalResult<Expression> {
    arithmetic("min", args, |a, b| Some(a.min(b)), Float::min)
}

fn abs(args: &[Expression]) -> EvalResult<Expression> {
    let [value] = self::args::<1>("abs", args)?;
    match value {
        Expression::Integer(i) => Ok(i
            .checked_abs()
            .map_or(Expression::Float((*i as Float).abs()), Expression::Integer)),
        Expression::Float(f) => Ok(Expression::Float(f.abs())),
        other => Err(wrong_type("abs", "number", other)),
    }
}

/// Round half away from zero. Integers are already round.
fn round(args: &[Expression]) -> EvalResult<Expression> {
    let [value] = self::args::<1>("round", args)?;
    match value {
        Expression::Integer(_) => Ok(value.clone()),
        Expression::Float(f) => Ok(Expression::Float(f.round())),
        other => Err(wrong_type("round", "number", other)),
    }
}

fn not(args: &[Expression]) -> EvalResult<Expression> {
    match self::args::<1>("not", args)? {
        [Expression::Boolean(b)] => Ok(Expression::Boolean(!b)),
        [other] => Err(wrong_type("not", "boolean", other)),
    }
}

fn equal(args: &[Expression]) -> EvalResult<Expression> {
    let [a, b] = self::args::<2>("equal?", args)?;
    Ok(Expression::Boolean(a == b))
}

fn is_number(args: &[Expression]) -> EvalResult<Expression> {
    let [value] = self::args::<1>("number?", args)?;
    Ok(Expression::Boolean(value.is_number()))
}

fn is_symbol(args: &[Expression]) -> EvalResult<Expression> {
    let [value] = self::args::<1>("symbol?", args)?;
    Ok(Expression::Boolean(matches!(value, Expression::Symbol(_))))
}

fn is_procedure(args: &[Expression]) -> EvalResult<Expression> {
    let [value] = self::args::<1>("procedure?", args)?;
    Ok(Expression::Boolean(matches!(value, Expression::Procedure(_))))
}

/// The arguments were already evaluated, in order; the result is the last of them.
fn begin(args: &[Expression]) -> EvalResult<Expression> {
    args.last().cloned().ok_or_else(|| EvalError::ArityMismatch {
        procedure: "begin".to_owned(),
        expected: Arity::AtLeast(1),
        got: 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_unique() {
        for (i, a) in BUILTINS.iter().enumerate() {
            for b in &BUILTINS[i + 1..] {
                assert_ne!(a.name, b.name, "duplicate builtin");
            }
        }
    }

    #[test]
    fn every_builtin_is_bound() -> EvalResult<()> {
        let env = standard_environment();
        for primitive in BUILTINS {
            match env.lookup(Symbol::new(primitive.name))? {
                Expression::Procedure(Procedure::Primitive(p)) => {
                    assert!(std::ptr::eq(p, primitive))
                }
                v => panic!("unexpected binding for {}: {v:?}", primitive.name),
            }
        }
        Ok(())
    }

    #[test]
    fn floor_division() -> EvalResult<()> {
        for (a, b, want) in [(7, 2, 3), (-7, 2, -4), (7, -2, -4), (-7, -2, 3), (6, 3, 2)] {
            assert_eq!(
                quotient(&[Expression::Integer(a), Expression::Integer(b)])?,
                Expression::Integer(want),
                "(quotient {a} {b})"
            );
        }
        Ok(())
    }

    #[test]
    fn overflow_falls_back_to_float() -> EvalResult<()> {
        let got = add(&[Expression::Integer(Integer::MAX), Expression::Integer(1)])?;
        assert_eq!(got, Expression::Float(Integer::MAX as Float + 1.0));
        let got = abs(&[Expression::Integer(Integer::MIN)])?;
        assert_eq!(got, Expression::Float(-(Integer::MIN as Float)));
        Ok(())
    }

    #[test]
    fn division_by_zero_is_float() -> EvalResult<()> {
        assert_eq!(
            divide(&[Expression::Integer(1), Expression::Integer(0)])?,
            Expression::Float(Float::INFINITY)
        );
        match modulo(&[Expression::Integer(1), Expression::Integer(0)])? {
            Expression::Float(f) => assert!(f.is_nan()),
            v => panic!("unexpected result: {v:?}"),
        }
        Ok(())
    }
}
