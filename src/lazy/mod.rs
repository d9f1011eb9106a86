//! Restartable lazy sequences.
//!
//! A [`LazySeq`] does not store elements. It holds a [`Restartable`]
//! source whose [`new_iterator`](Restartable::new_iterator) builds a fresh
//! traversal every time the sequence is iterated, so:
//!
//! - two consumers of the same sequence never interfere with each other,
//! - nothing is cached between traversals (every traversal recomputes),
//! - a sequence may be infinite as long as its consumers bound it.
//!
//! A single traversal is an ordinary single-pass iterator. Elements are
//! produced only when the consumer pulls them, and dropping the iterator is
//! all it takes to stop early.
//!
//! # Examples
//!
//! ```rust
//! use polycoll::{LazySeq, Value, vector};
//!
//! let naturals = LazySeq::from_factory(|| (0..).map(Value::from));
//! let first_three: Vec<Value> = naturals.iter().take(3).collect();
//! assert_eq!(Value::from(first_three), vector![0, 1, 2]);
//!
//! // Restarting begins again from the first element.
//! assert_eq!(naturals.iter().next(), Some(Value::from(0)));
//! ```

mod generate;
mod transform;
mod window;

pub use generate::{
    cycle, iterate, range, range_between, range_by, range_to, repeat, repeat_n, repeatedly,
    repeatedly_n,
};
pub use transform::{
    concat, cons, distinct, drop, drop_last, drop_while, filter, keep, map, map_n, mapcat,
    mapcat_n, remove, rest, take, take_nth, take_while,
};
pub use window::{
    interleave, interpose, partition, partition_all, partition_all_step, partition_pad,
    partition_step,
};

use std::fmt;
use std::rc::Rc;

use crate::value::Value;

/// One traversal of a sequence.
pub type SeqIter = Box<dyn Iterator<Item = Value>>;

/// A source that can start a new, independent traversal on demand.
///
/// Any `Fn() -> SeqIter` closure is a `Restartable`.
pub trait Restartable {
    /// Starts a traversal from the first element.
    fn new_iterator(&self) -> SeqIter;
}

impl<F> Restartable for F
where
    F: Fn() -> SeqIter,
{
    fn new_iterator(&self) -> SeqIter {
        self()
    }
}

/// A restartable, possibly infinite, lazily evaluated sequence.
///
/// Cloning a `LazySeq` shares its source; the clone and the original are
/// the same sequence (see [`LazySeq::ptr_eq`]).
#[derive(Clone)]
pub struct LazySeq {
    source: Rc<dyn Restartable>,
}

impl LazySeq {
    /// Wraps a restartable source.
    pub fn new<R>(source: R) -> Self
    where
        R: Restartable + 'static,
    {
        Self {
            source: Rc::new(source),
        }
    }

    /// Wraps a factory that returns any iterator of values.
    ///
    /// The factory runs once per traversal.
    pub fn from_factory<F, I>(factory: F) -> Self
    where
        F: Fn() -> I + 'static,
        I: Iterator<Item = Value> + 'static,
    {
        Self::new(move || -> SeqIter { Box::new(factory()) })
    }

    /// The sequence with no elements.
    pub fn empty() -> Self {
        Self::from_factory(std::iter::empty)
    }

    /// Starts a new traversal.
    #[inline]
    pub fn iter(&self) -> SeqIter {
        self.source.new_iterator()
    }

    /// Traverses the whole sequence into a vector of elements.
    ///
    /// Does not return for an infinite sequence.
    pub fn realize(&self) -> Vec<Value> {
        self.iter().collect()
    }

    /// Returns `true` if both handles share the same source.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.source, &other.source)
    }

    /// Address of the shared source, consistent with [`LazySeq::ptr_eq`].
    pub(crate) fn identity(&self) -> usize {
        Rc::as_ptr(&self.source).cast::<()>() as usize
    }
}

impl<'a> IntoIterator for &'a LazySeq {
    type Item = Value;
    type IntoIter = SeqIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Debug for LazySeq {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_tuple("LazySeq").field(&"<lazy>").finish()
    }
}

/// Wraps a factory into a [`Value::Seq`].
pub(crate) fn lazy<F, I>(factory: F) -> Value
where
    F: Fn() -> I + 'static,
    I: Iterator<Item = Value> + 'static,
{
    Value::Seq(LazySeq::from_factory(factory))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::cell::Cell;

    #[rstest]
    fn test_each_traversal_invokes_the_factory() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let sequence = LazySeq::from_factory(move || {
            counter.set(counter.get() + 1);
            (0..3).map(Value::from)
        });

        assert_eq!(calls.get(), 0);
        assert_eq!(sequence.realize().len(), 3);
        assert_eq!(sequence.realize().len(), 3);
        assert_eq!(calls.get(), 2);
    }

    #[rstest]
    fn test_traversals_are_independent() {
        let sequence = LazySeq::from_factory(|| (0..).map(Value::from));
        let mut first = sequence.iter();
        let mut second = sequence.iter();

        assert_eq!(first.next(), Some(Value::from(0)));
        assert_eq!(first.next(), Some(Value::from(1)));
        assert_eq!(second.next(), Some(Value::from(0)));
    }

    #[rstest]
    fn test_clone_shares_source() {
        let sequence = LazySeq::empty();
        let clone = sequence.clone();
        assert!(sequence.ptr_eq(&clone));
        assert!(!sequence.ptr_eq(&LazySeq::empty()));
        assert_eq!(sequence.identity(), clone.identity());
    }

    #[rstest]
    fn test_custom_restartable_source() {
        struct Countdown(i64);

        impl Restartable for Countdown {
            fn new_iterator(&self) -> SeqIter {
                Box::new((1..=self.0).rev().map(Value::from))
            }
        }

        let sequence = LazySeq::new(Countdown(3));
        assert_eq!(
            sequence.realize(),
            vec![Value::from(3), Value::from(2), Value::from(1)]
        );
    }
}
