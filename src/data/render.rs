use std::collections::VecDeque;

use dot_writer::{Attributes, DotWriter, Shape};

use super::Expression;

fn node_name(next: &mut usize) -> String {
    let name = format!("node{next}");
    *next += 1;
    name
}

/// Record labels treat these as structure; escape them.
fn escape(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    for ch in label.chars() {
        if matches!(ch, '{' | '}' | '|' | '<' | '>' | '"' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Render an expression tree as a Graphviz digraph.
///
/// Each list becomes a node with an edge to each of its elements;
/// each atom becomes a record of its kind and printed value.
pub fn render_expression(expression: &Expression) -> Vec<u8> {
    let mut outbuf = Vec::new();
    {
        let mut writer = DotWriter::from(&mut outbuf);
        let mut graph = writer.digraph();
        let mut next = 0;
        let mut queue = VecDeque::new();
        queue.push_back((expression, node_name(&mut next)));

        while let Some((it, id)) = queue.pop_front() {
            let mut node = graph.node_named(&id);
            node.set_shape(Shape::Record);
            match it {
                Expression::List(items) => {
                    node.set_label(&format!("{{list|{}}}", items.len()));
                    std::mem::drop(node);
                    for item in items {
                        let child = node_name(&mut next);
                        graph.edge(&id, &child);
                        queue.push_back((item, child));
                    }
                }
                atom => {
                    node.set_label(&format!(
                        "{{{}|{}}}",
                        atom.kind(),
                        escape(&atom.to_string())
                    ));
                }
            }
        }
    }
    outbuf
}
