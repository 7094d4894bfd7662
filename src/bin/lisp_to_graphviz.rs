//! Render an unevaluated Lisp expression as Graphviz.
//!
//! Usage:
//!
//! ```ignore
//! <input.lisp lisp_to_graphviz | dot -T png >output.png
//! ```

use std::io::{stdout, Read, Write};

use lis::data::render::render_expression;

/// Reads a Lisp expression on input, renders it as Graphviz.
pub fn main() -> std::io::Result<()> {
    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;
    let expression = lis::parse(&input)?;
    stdout().write_all(&render_expression(&expression))
}
