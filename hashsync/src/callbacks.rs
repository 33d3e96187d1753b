use std::{fmt, rc::Rc};

/// A shared, cloneable function handed to a [`HashSync`](crate::HashSync) or a
/// [`NavigationContext`](crate::NavigationContext).
///
/// Any `Fn(IN) -> OUT + 'static` converts into one. Clones call the same function.
pub struct Callback<IN, OUT = ()> {
    pub(crate) cb: Rc<dyn Fn(IN) -> OUT>,
}

impl<IN, OUT, F: Fn(IN) -> OUT + 'static> From<F> for Callback<IN, OUT> {
    fn from(func: F) -> Self {
        Callback { cb: Rc::new(func) }
    }
}

impl<IN, OUT> Clone for Callback<IN, OUT> {
    fn clone(&self) -> Self {
        Self {
            cb: Rc::clone(&self.cb),
        }
    }
}

impl<IN, OUT> PartialEq for Callback<IN, OUT> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.cb, &other.cb)
    }
}

impl<IN, OUT> fmt::Debug for Callback<IN, OUT> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callback<_>")
    }
}

impl<IN, OUT> Callback<IN, OUT> {
    /// Calls the function.
    pub fn emit(&self, value: IN) -> OUT {
        (*self.cb)(value)
    }
}

impl<IN: Copy + 'static> Callback<IN> {
    /// A callback calling `self`, then `next`, with the same value.
    pub fn then(self, next: impl Into<Callback<IN>>) -> Self {
        let next = next.into();
        Callback::from(move |value: IN| {
            self.emit(value);
            next.emit(value);
        })
    }
}

impl<IN> Callback<IN> {
    /// A callback ignoring its input, for when no observer is wanted.
    pub fn noop() -> Self {
        Self::from(|_| ())
    }
}

impl<IN> Default for Callback<IN> {
    fn default() -> Self {
        Self::noop()
    }
}
