//! Environments: chains of binding frames.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use super::{EvalError, EvalResult};
use crate::data::{Expression, Symbol};

/// A handle to one frame of a lexical scope chain.
///
/// Handles are cheap to clone and share their frame.
/// A frame stays alive as long as any handle to it does: the call that created it,
/// a child frame, or a closure that captured it.
#[derive(Clone, Default)]
pub struct Environment {
    frame: Rc<Frame>,
}

#[derive(Default)]
struct Frame {
    bindings: RefCell<HashMap<Symbol, Expression>>,
    // Only used for lookup.
    parent: Option<Environment>,
}

impl Environment {
    /// Create an empty root frame.
    pub fn new() -> Self {
        Default::default()
    }

    /// Create a new, empty frame whose parent is this one.
    pub fn child(&self) -> Self {
        Environment {
            frame: Rc::new(Frame {
                bindings: Default::default(),
                parent: Some(self.clone()),
            }),
        }
    }

    pub fn parent(&self) -> Option<&Environment> {
        self.frame.parent.as_ref()
    }

    /// Return the value bound to `symbol` in the nearest frame that binds it.
    pub fn lookup(&self, symbol: Symbol) -> EvalResult<Expression> {
        let mut env = Some(self);
        while let Some(current) = env {
            if let Some(value) = current.frame.bindings.borrow().get(&symbol) {
                return Ok(value.clone());
            }
            env = current.parent();
        }
        Err(EvalError::UndefinedSymbol(symbol.name()))
    }

    /// Bind `symbol` to `value` in this frame, replacing any binding in this frame.
    /// Bindings in ancestor frames are shadowed, never modified.
    pub fn define(&self, symbol: Symbol, value: Expression) {
        self.frame.bindings.borrow_mut().insert(symbol, value);
    }

    /// Whether this frame itself (not an ancestor) binds `symbol`.
    #[cfg(test)]
    pub(crate) fn binds(&self, symbol: Symbol) -> bool {
        self.frame.bindings.borrow().contains_key(&symbol)
    }

    /// Number of frames from here to the root, counting both.
    pub fn depth(&self) -> usize {
        std::iter::successors(Some(self), |env| (*env).parent()).count()
    }
}

// Bindings may hold closures that capture this frame; only print a summary.
impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("bindings", &self.frame.bindings.borrow().len())
            .field("depth", &self.depth())
            .finish()
    }
}
