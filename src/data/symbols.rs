//! Interned symbol names.
//!
//! Symbols are interned in a per-thread table, so comparing two symbols is a
//! comparison of their ids. The evaluator is single-threaded; a `Symbol` is
//! deliberately `!Send` so it can't be resolved against another thread's table.

use std::cell::RefCell;
use std::marker::PhantomData;
use std::rc::Rc;

use string_interner::{DefaultStringInterner, DefaultSymbol};

thread_local! {
    static SYMBOLS: RefCell<DefaultStringInterner> = RefCell::new(DefaultStringInterner::default());
}

/// An interned, case-sensitive name.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol {
    symbol: DefaultSymbol,
    local: PhantomData<Rc<()>>,
}

impl Symbol {
    /// Intern `name`, returning the existing symbol if it was seen before.
    pub fn new(name: &str) -> Self {
        let symbol = SYMBOLS.with(|table| table.borrow_mut().get_or_intern(name));
        Symbol {
            symbol,
            local: PhantomData,
        }
    }

    /// Run `f` against the symbol's name without copying it out of the table.
    pub fn with_name<R>(&self, f: impl FnOnce(&str) -> R) -> R {
        SYMBOLS.with(|table| {
            let table = table.borrow();
            // Symbols are only minted by `new`, on this thread.
            f(table.resolve(self.symbol).unwrap_or("#<unknown symbol>"))
        })
    }

    pub fn name(&self) -> String {
        self.with_name(str::to_owned)
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Symbol::new(value)
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.with_name(|name| f.write_str(name))
    }
}

impl std::fmt::Debug for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.with_name(|name| f.debug_tuple("Symbol").field(&name).finish())
    }
}

#[cfg(test)]
mod tests {
    use super::Symbol;

    #[test]
    fn interning_is_stable() {
        let a = Symbol::new("tree->list");
        let b = Symbol::new("tree->list");
        assert_eq!(a, b);
        assert_eq!(a.name(), "tree->list");
    }

    #[test]
    fn case_sensitive() {
        assert_ne!(Symbol::new("hello"), Symbol::new("HeLlO"));
    }

    #[test]
    fn display_is_verbatim() {
        assert_eq!(Symbol::new("Queryable?").to_string(), "Queryable?");
        assert_eq!(format!("{:?}", Symbol::new("x")), r#"Symbol("x")"#);
    }
}
