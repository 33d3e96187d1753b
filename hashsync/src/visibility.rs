use crate::Callback;
use std::{cell::Cell, rc::Rc};

/// A caller-owned visibility flag.
///
/// Hand [`VisibilityCell::observer`] to a [`HashSync`](crate::HashSync) and read the
/// flag back with [`VisibilityCell::get`] whenever you render. Clones share the
/// same flag.
#[derive(Debug, Clone, Default)]
pub struct VisibilityCell(Rc<Cell<bool>>);

impl VisibilityCell {
    /// Creates a cell holding `visible`.
    pub fn new(visible: bool) -> Self {
        Self(Rc::new(Cell::new(visible)))
    }

    /// Whether the section is currently shown.
    pub fn get(&self) -> bool {
        self.0.get()
    }

    /// Overwrites the flag.
    pub fn set(&self, visible: bool) {
        self.0.set(visible)
    }

    /// An observer that stores every signal it receives in this cell.
    pub fn observer(&self) -> Callback<bool> {
        let cell = self.0.clone();
        Callback::from(move |visible: bool| cell.set(visible))
    }

    /// Like [`VisibilityCell::observer`], but also calls `then` after storing.
    pub fn observer_then(&self, then: impl Into<Callback<bool>>) -> Callback<bool> {
        self.observer().then(then)
    }
}
