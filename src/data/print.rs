//! Rendering expressions as text.
//!
//! The Display implementation is a right inverse of the reader:
//! reading the printed form of anything the reader produced gives back the same tree.
//! Booleans, procedures and the void value print, but have no reader syntax.

use std::fmt;

use super::{Expression, Procedure};

/// Render an expression in its canonical textual form.
pub fn print(expression: &Expression) -> String {
    expression.to_string()
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Integer(i) => write!(f, "{i}"),
            // Debug keeps a ".0" or an exponent, so the text reads back as a float.
            Expression::Float(v) => write!(f, "{v:?}"),
            Expression::Boolean(true) => write!(f, "#t"),
            Expression::Boolean(false) => write!(f, "#f"),
            Expression::Symbol(s) => write!(f, "{s}"),
            Expression::List(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, ")")
            }
            Expression::Procedure(Procedure::Primitive(p)) => write!(f, "#<primitive {}>", p.name),
            Expression::Procedure(Procedure::Closure(c)) => {
                write!(f, "#<lambda (")?;
                for (i, param) in c.params.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{param}")?;
                }
                write!(f, ")>")
            }
            Expression::Void => write!(f, "#<void>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atoms() {
        for (expression, want) in [
            (Expression::Integer(0), "0"),
            (Expression::Integer(-6), "-6"),
            (Expression::Boolean(false), "#f"),
            (Expression::Boolean(true), "#t"),
            (Expression::Float(1.5), "1.5"),
            (Expression::Float(2.0), "2.0"),
            (Expression::symbol("sin"), "sin"),
        ] {
            assert_eq!(print(&expression), want);
        }
    }

    #[test]
    fn lists() {
        let plus = Expression::list([
            Expression::symbol("+"),
            Expression::Integer(1),
            Expression::Integer(2),
        ]);
        assert_eq!(print(&plus), "(+ 1 2)");

        let cond = Expression::list([
            Expression::symbol("if"),
            Expression::list([
                Expression::symbol("<"),
                Expression::symbol("a"),
                Expression::symbol("b"),
            ]),
            Expression::Boolean(true),
            Expression::Boolean(false),
        ]);
        assert_eq!(print(&cond), "(if (< a b) #t #f)");

        assert_eq!(print(&Expression::List(Vec::new())), "()");
    }
}
