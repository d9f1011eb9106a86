//! Left folds with early termination.
//!
//! A folding function stops a reduction by returning [`reduced(x)`](reduced):
//! the fold unwraps `x`, returns it as the result and pulls no further
//! input. This makes folds over infinite lazy sequences usable.

use std::rc::Rc;

use crate::error::{CollectionError, Result};
use crate::iterable::{ensure_seqable, iterate, traverse};
use crate::lazy::{SeqIter, lazy};
use crate::value::Value;

// =============================================================================
// Reduced Sentinel
// =============================================================================

/// Wraps `value` so that a reduction stops and returns it.
pub fn reduced(value: Value) -> Value {
    Value::Reduced(Box::new(value))
}

/// Returns `true` if `value` was produced by [`reduced`].
pub const fn is_reduced(value: &Value) -> bool {
    matches!(value, Value::Reduced(_))
}

/// Unwraps a [`reduced`] value; any other value is returned unchanged.
pub fn unreduced(value: Value) -> Value {
    match value {
        Value::Reduced(inner) => *inner,
        other => other,
    }
}

// =============================================================================
// Reduce
// =============================================================================

fn fold<F>(mut function: F, seed: Value, elements: SeqIter) -> Value
where
    F: FnMut(Value, Value) -> Value,
{
    let mut accumulator = match seed {
        Value::Reduced(inner) => return *inner,
        seed => seed,
    };
    for element in elements {
        accumulator = match function(accumulator, element) {
            Value::Reduced(inner) => return *inner,
            next => next,
        };
    }
    accumulator
}

/// Folds `collection` from the left, seeding with its first element.
///
/// # Errors
///
/// Returns [`CollectionError::EmptyReduction`] for an empty collection and
/// [`CollectionError::NotSeqable`] if `collection` cannot be traversed.
///
/// # Examples
///
/// ```rust
/// use polycoll::{Value, range_to, reduce, reduced};
///
/// let sum = reduce(|acc, x| Value::from(acc.as_int().unwrap_or(0) + x.as_int().unwrap_or(0)), &range_to(5));
/// assert_eq!(sum.unwrap(), Value::from(10));
///
/// let capped = reduce(
///     |acc, x| {
///         let total = acc.as_int().unwrap_or(0) + x.as_int().unwrap_or(0);
///         if total > 20 { reduced(Value::from("done")) } else { Value::from(total) }
///     },
///     &range_to(10),
/// );
/// assert_eq!(capped.unwrap(), Value::from("done"));
/// ```
pub fn reduce<F>(function: F, collection: &Value) -> Result<Value>
where
    F: FnMut(Value, Value) -> Value,
{
    let mut elements = traverse("reduce", collection)?;
    let seed = elements.next().ok_or(CollectionError::EmptyReduction)?;
    Ok(fold(function, seed, elements))
}

/// Folds `collection` from the left, starting from `init`.
///
/// # Errors
///
/// Returns [`CollectionError::NotSeqable`] if `collection` cannot be
/// traversed.
pub fn reduce_init<F>(function: F, init: Value, collection: &Value) -> Result<Value>
where
    F: FnMut(Value, Value) -> Value,
{
    let elements = traverse("reduce_init", collection)?;
    Ok(fold(function, init, elements))
}

/// Like [`reduce`], but an empty collection returns `identity()` instead of
/// failing.
///
/// # Errors
///
/// Returns [`CollectionError::NotSeqable`] if `collection` cannot be
/// traversed.
pub fn reduce_with_identity<F, I>(function: F, identity: I, collection: &Value) -> Result<Value>
where
    F: FnMut(Value, Value) -> Value,
    I: FnOnce() -> Value,
{
    let mut elements = traverse("reduce_with_identity", collection)?;
    Ok(match elements.next() {
        Some(seed) => fold(function, seed, elements),
        None => identity(),
    })
}

// =============================================================================
// Reductions
// =============================================================================

/// Lazily yields every intermediate accumulator of [`reduce`], starting with
/// the first element.
///
/// An empty collection yields a single `0`.
///
/// # Errors
///
/// Returns [`CollectionError::NotSeqable`] if `collection` cannot be
/// traversed.
///
/// # Examples
///
/// ```rust
/// use polycoll::{Value, range_between, reductions, vec, vector};
///
/// let running = reductions(|acc, x| Value::from(acc.as_int().unwrap_or(0) + x.as_int().unwrap_or(0)), &range_between(1, 5)).unwrap();
/// assert_eq!(vec(&running).unwrap(), vector![1, 3, 6, 10]);
/// ```
pub fn reductions<F>(function: F, collection: &Value) -> Result<Value>
where
    F: Fn(Value, Value) -> Value + 'static,
{
    ensure_seqable("reductions", collection)?;
    let function = Rc::new(function);
    let collection = collection.clone();
    Ok(lazy(move || {
        let mut source = iterate(&collection);
        let initial = source.next().unwrap_or(Value::Int(0));
        Reductions::new(Rc::clone(&function), initial, source)
    }))
}

/// Lazily yields `init` and then every intermediate accumulator of
/// [`reduce_init`].
///
/// # Errors
///
/// Returns [`CollectionError::NotSeqable`] if `collection` cannot be
/// traversed.
pub fn reductions_init<F>(function: F, init: Value, collection: &Value) -> Result<Value>
where
    F: Fn(Value, Value) -> Value + 'static,
{
    ensure_seqable("reductions_init", collection)?;
    let function = Rc::new(function);
    let collection = collection.clone();
    Ok(lazy(move || {
        Reductions::new(Rc::clone(&function), init.clone(), iterate(&collection))
    }))
}

struct Reductions<F> {
    function: Rc<F>,
    initial: Option<Value>,
    accumulator: Value,
    source: SeqIter,
    finished: bool,
}

impl<F> Reductions<F> {
    fn new(function: Rc<F>, initial: Value, source: SeqIter) -> Self {
        Self {
            function,
            initial: Some(initial),
            accumulator: Value::Nil,
            source,
            finished: false,
        }
    }
}

impl<F> Iterator for Reductions<F>
where
    F: Fn(Value, Value) -> Value,
{
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        if let Some(initial) = self.initial.take() {
            self.finished = is_reduced(&initial);
            self.accumulator = unreduced(initial);
            return Some(self.accumulator.clone());
        }
        if self.finished {
            return None;
        }
        let element = self.source.next()?;
        let accumulator = std::mem::take(&mut self.accumulator);
        match (self.function)(accumulator, element) {
            Value::Reduced(inner) => {
                self.finished = true;
                Some(*inner)
            }
            next => {
                self.accumulator = next.clone();
                Some(next)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lazy::{range, range_to};
    use rstest::rstest;
    use std::cell::Cell;

    fn add(left: Value, right: Value) -> Value {
        Value::from(left.as_int().unwrap_or(0) + right.as_int().unwrap_or(0))
    }

    fn realize(value: &Value) -> Vec<Value> {
        iterate(value).collect()
    }

    #[rstest]
    fn test_reduce_empty_without_seed_fails() {
        assert_eq!(
            reduce(add, &Value::Nil).unwrap_err(),
            CollectionError::EmptyReduction
        );
        assert_eq!(
            reduce_with_identity(add, || Value::from(0), &Value::Nil).unwrap(),
            Value::from(0)
        );
    }

    #[rstest]
    fn test_reduce_stops_pulling_after_reduced() {
        let pulled = Rc::new(Cell::new(0));
        let counter = Rc::clone(&pulled);
        let source = crate::lazy::map(
            move |element| {
                counter.set(counter.get() + 1);
                element
            },
            &range(),
        )
        .unwrap();

        let result = reduce(
            |accumulator, element| {
                let total = add(accumulator, element);
                if total.as_int().unwrap_or(0) > 20 {
                    reduced(Value::from("done"))
                } else {
                    total
                }
            },
            &source,
        )
        .unwrap();

        assert_eq!(result, Value::from("done"));
        // 0 + 1 + ... + 6 = 21 crosses the threshold at the seventh element.
        assert_eq!(pulled.get(), 7);
    }

    #[rstest]
    fn test_reduced_seed_is_returned_unwrapped() {
        let result = reduce_init(add, reduced(Value::from(9)), &range_to(3)).unwrap();
        assert_eq!(result, Value::from(9));
    }

    #[rstest]
    fn test_reductions_of_empty_collection_yields_zero() {
        let running = reductions(add, &Value::Nil).unwrap();
        assert_eq!(realize(&running), vec![Value::from(0)]);
    }

    #[rstest]
    fn test_reductions_init_yields_seed_first() {
        let running = reductions_init(add, Value::from(100), &range_to(3)).unwrap();
        assert_eq!(
            realize(&running),
            vec![Value::from(100), Value::from(100), Value::from(101), Value::from(103)]
        );
    }

    #[rstest]
    fn test_reductions_stop_at_reduced() {
        let running = reductions(
            |accumulator, element| {
                let total = add(accumulator, element);
                if total.as_int().unwrap_or(0) >= 3 { reduced(total) } else { total }
            },
            &range(),
        )
        .unwrap();
        assert_eq!(
            realize(&running),
            vec![Value::from(0), Value::from(1), Value::from(3)]
        );
    }

    #[rstest]
    fn test_unreduced() {
        assert!(is_reduced(&reduced(Value::Nil)));
        assert_eq!(unreduced(reduced(Value::from(1))), Value::from(1));
        assert_eq!(unreduced(Value::from(1)), Value::from(1));
    }
}
