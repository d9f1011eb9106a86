//! A shared, single-threaded mutable cell.
//!
//! [`Atom`] names a piece of shared mutable state. Clones share the same
//! cell. There is no synchronization: an `Atom` is neither `Send` nor
//! `Sync`, so it cannot leave the thread that created it.

use std::cell::RefCell;
use std::rc::Rc;

use crate::value::Value;

/// A shared reference cell holding a [`Value`].
///
/// # Examples
///
/// ```rust
/// use polycoll::{Atom, Value};
///
/// let counter = Atom::new(Value::from(0));
/// let shared = counter.clone();
/// shared.update(|n| Value::from(n.as_int().unwrap_or(0) + 1));
/// assert_eq!(counter.get(), Value::from(1));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Atom {
    cell: Rc<RefCell<Value>>,
}

impl Atom {
    /// Creates a cell holding `value`.
    pub fn new(value: Value) -> Self {
        Self {
            cell: Rc::new(RefCell::new(value)),
        }
    }

    /// Returns a copy of the current value.
    pub fn get(&self) -> Value {
        self.cell.borrow().clone()
    }

    /// Replaces the current value and returns the new one.
    pub fn set(&self, value: Value) -> Value {
        tracing::trace!(kind = value.type_name(), "atom reset");
        self.cell.replace(value.clone());
        value
    }

    /// Replaces the current value with `function(current)` and returns the
    /// new value.
    ///
    /// The cell is not borrowed while `function` runs, so `function` may
    /// read the atom itself.
    pub fn update<F>(&self, function: F) -> Value
    where
        F: FnOnce(Value) -> Value,
    {
        let next = function(self.get());
        self.set(next)
    }

    /// Returns `true` if both handles share the same cell.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.cell, &other.cell)
    }
}

/// Creates an [`Atom`] holding `value`.
pub fn atom(value: Value) -> Atom {
    Atom::new(value)
}

/// Returns the current value of `atom`.
pub fn deref(atom: &Atom) -> Value {
    atom.get()
}

/// Sets the value of `atom` and returns it.
pub fn mut_reset(atom: &Atom, value: Value) -> Value {
    atom.set(value)
}

/// Applies `function` to the value of `atom`, stores the result and
/// returns it.
pub fn mut_swap<F>(atom: &Atom, function: F) -> Value
where
    F: FnOnce(Value) -> Value,
{
    atom.update(function)
}
