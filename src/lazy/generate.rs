//! Lazy sequences that generate their own elements.
//!
//! Most of these are infinite. Bound them with [`take`](super::take) or a
//! short-circuiting consumer before realizing them.

use std::rc::Rc;

use super::{SeqIter, lazy};
use crate::error::Result;
use crate::iterable::{self, ensure_seqable};
use crate::value::Value;

// =============================================================================
// Ranges
// =============================================================================

/// The natural numbers `0, 1, 2, ...`.
pub fn range() -> Value {
    progression(0, None, 1)
}

/// The integers in `[0, end)`.
///
/// # Examples
///
/// ```rust
/// use polycoll::{range_to, vec, vector};
///
/// assert_eq!(vec(&range_to(4)).unwrap(), vector![0, 1, 2, 3]);
/// assert_eq!(vec(&range_to(-1)).unwrap(), vector![]);
/// ```
pub fn range_to(end: i64) -> Value {
    progression(0, Some(end), 1)
}

/// The integers in `[start, end)`.
pub fn range_between(start: i64, end: i64) -> Value {
    progression(start, Some(end), 1)
}

/// The progression `start, start + step, ...` while it stays before `end`.
///
/// A positive step counts up while below `end`, a negative step counts down
/// while above `end`. A zero step is treated as `1`.
///
/// # Examples
///
/// ```rust
/// use polycoll::{range_by, vec, vector};
///
/// assert_eq!(vec(&range_by(0, 10, 3)).unwrap(), vector![0, 3, 6, 9]);
/// assert_eq!(vec(&range_by(5, 0, -2)).unwrap(), vector![5, 3, 1]);
/// ```
pub fn range_by(start: i64, end: i64, step: i64) -> Value {
    progression(start, Some(end), step)
}

fn progression(start: i64, end: Option<i64>, step: i64) -> Value {
    let step = if step == 0 { 1 } else { step };
    lazy(move || {
        std::iter::successors(Some(start), move |current| current.checked_add(step))
            .take_while(move |current| match end {
                None => true,
                Some(end) if step > 0 => *current < end,
                Some(end) => *current > end,
            })
            .map(Value::from)
    })
}

// =============================================================================
// Repetition
// =============================================================================

/// Repeats `element` forever.
pub fn repeat(element: Value) -> Value {
    lazy(move || std::iter::repeat(element.clone()))
}

/// Repeats `element` `count` times. A count of zero or less yields nothing.
pub fn repeat_n(count: i64, element: Value) -> Value {
    let count = usize::try_from(count.max(0)).unwrap_or(usize::MAX);
    lazy(move || std::iter::repeat_n(element.clone(), count))
}

/// Calls `function` for every element, forever.
pub fn repeatedly<F>(function: F) -> Value
where
    F: Fn() -> Value + 'static,
{
    let function = Rc::new(function);
    lazy(move || {
        let function = Rc::clone(&function);
        std::iter::repeat_with(move || function())
    })
}

/// Calls `function` for each of `count` elements. A count of zero or less
/// yields nothing.
pub fn repeatedly_n<F>(count: i64, function: F) -> Value
where
    F: Fn() -> Value + 'static,
{
    let count = usize::try_from(count.max(0)).unwrap_or(usize::MAX);
    let function = Rc::new(function);
    lazy(move || {
        let function = Rc::clone(&function);
        std::iter::repeat_with(move || function()).take(count)
    })
}

// =============================================================================
// Iteration and Cycling
// =============================================================================

/// The sequence `seed, f(seed), f(f(seed)), ...`.
///
/// `function` is applied only when the next element is pulled, so
/// taking `n` elements calls it `n - 1` times.
///
/// # Examples
///
/// ```rust
/// use polycoll::{Value, iterate, take, vec, vector};
///
/// let powers = iterate(|x| Value::from(x.as_int().unwrap_or(0) * 2), Value::from(1));
/// assert_eq!(vec(&take(4, &powers).unwrap()).unwrap(), vector![1, 2, 4, 8]);
/// ```
pub fn iterate<F>(function: F, seed: Value) -> Value
where
    F: Fn(Value) -> Value + 'static,
{
    let function = Rc::new(function);
    lazy(move || Iterate {
        function: Rc::clone(&function),
        seed: seed.clone(),
        previous: None,
    })
}

struct Iterate<F> {
    function: Rc<F>,
    seed: Value,
    previous: Option<Value>,
}

impl<F> Iterator for Iterate<F>
where
    F: Fn(Value) -> Value,
{
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        let current = match self.previous.take() {
            None => self.seed.clone(),
            Some(previous) => (self.function)(previous),
        };
        self.previous = Some(current.clone());
        Some(current)
    }
}

/// Repeats the elements of `collection` forever.
///
/// An empty collection produces an empty sequence.
///
/// # Errors
///
/// Returns [`CollectionError::NotSeqable`](crate::CollectionError::NotSeqable)
/// if `collection` cannot be traversed.
///
/// # Examples
///
/// ```rust
/// use polycoll::{cycle, take, vec, vector};
///
/// let repeated = take(5, &cycle(&vector![1, 2]).unwrap()).unwrap();
/// assert_eq!(vec(&repeated).unwrap(), vector![1, 2, 1, 2, 1]);
/// ```
pub fn cycle(collection: &Value) -> Result<Value> {
    ensure_seqable("cycle", collection)?;
    let collection = collection.clone();
    Ok(lazy(move || Cycle {
        current: iterable::iterate(&collection),
        collection: collection.clone(),
    }))
}

struct Cycle {
    collection: Value,
    current: SeqIter,
}

impl Iterator for Cycle {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        if let Some(element) = self.current.next() {
            return Some(element);
        }
        // A fresh traversal that is empty right away means the source is empty.
        self.current = iterable::iterate(&self.collection);
        self.current.next()
    }
}
