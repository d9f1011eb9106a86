//! Lazy operators that transform existing collections.
//!
//! Every operator checks its collection arguments when it is called and
//! returns a [`Value::Seq`] whose traversals re-run the whole pipeline from
//! the source collections.

use std::rc::Rc;

use smallvec::SmallVec;

use super::{SeqIter, lazy};
use crate::error::{CollectionError, Result};
use crate::iterable::{ensure_seqable, iterate};
use crate::value::{Value, ValueSet};

/// Argument buffer handed to N-ary mapping functions.
pub(super) type Arguments = SmallVec<[Value; 4]>;

// =============================================================================
// Zipping
// =============================================================================

/// Pulls one element from every source per step and stops as soon as any
/// source is exhausted.
pub(super) struct Zip {
    sources: Vec<SeqIter>,
}

impl Zip {
    pub(super) fn new(collections: &[Value]) -> Self {
        Self {
            sources: collections.iter().map(iterate).collect(),
        }
    }
}

impl Iterator for Zip {
    type Item = Arguments;

    fn next(&mut self) -> Option<Arguments> {
        if self.sources.is_empty() {
            return None;
        }
        self.sources.iter_mut().map(Iterator::next).collect()
    }
}

fn ensure_all_seqable(operation: &'static str, collections: &[Value]) -> Result<()> {
    if collections.is_empty() {
        return Err(CollectionError::invalid_argument(
            operation,
            "at least one collection is required",
        ));
    }
    collections
        .iter()
        .try_for_each(|collection| ensure_seqable(operation, collection))
}

/// Converts a signed count to a length, clamping negatives to zero.
fn clamp_count(count: i64) -> usize {
    usize::try_from(count.max(0)).unwrap_or(usize::MAX)
}

// =============================================================================
// Element-wise Transforms
// =============================================================================

/// Yields `element`, then every element of `collection`.
///
/// # Errors
///
/// Returns [`CollectionError::NotSeqable`] if `collection` cannot be traversed.
///
/// # Examples
///
/// ```rust
/// use polycoll::{Value, cons, vec, vector};
///
/// let sequence = cons(Value::from(0), &vector![1, 2]).unwrap();
/// assert_eq!(vec(&sequence).unwrap(), vector![0, 1, 2]);
/// ```
pub fn cons(element: Value, collection: &Value) -> Result<Value> {
    ensure_seqable("cons", collection)?;
    let collection = collection.clone();
    Ok(lazy(move || std::iter::once(element.clone()).chain(iterate(&collection))))
}

/// Yields `function(element)` for each element of `collection`.
///
/// The function runs once per element per traversal; results are never
/// cached.
///
/// # Errors
///
/// Returns [`CollectionError::NotSeqable`] if `collection` cannot be traversed.
///
/// # Examples
///
/// ```rust
/// use polycoll::{Value, map, range_to, vec, vector};
///
/// let doubled = map(|x| Value::from(x.as_int().unwrap_or(0) * 2), &range_to(3)).unwrap();
/// assert_eq!(vec(&doubled).unwrap(), vector![0, 2, 4]);
/// ```
pub fn map<F>(function: F, collection: &Value) -> Result<Value>
where
    F: Fn(Value) -> Value + 'static,
{
    ensure_seqable("map", collection)?;
    let function = Rc::new(function);
    let collection = collection.clone();
    Ok(lazy(move || {
        let function = Rc::clone(&function);
        iterate(&collection).map(move |element| function(element))
    }))
}

/// Applies `function` to the elements at the same position in every
/// collection, stopping at the shortest collection.
///
/// An infinite collection zipped with a finite one is safe: the traversal
/// ends with the finite one.
///
/// # Errors
///
/// Returns [`CollectionError::InvalidArgument`] when `collections` is empty
/// and [`CollectionError::NotSeqable`] if any collection cannot be traversed.
///
/// # Examples
///
/// ```rust
/// use polycoll::{Value, map_n, range, vec, vector};
///
/// let pairs = map_n(|args| Value::vector(args.iter().cloned()), &[vector![1, 2, 3], range()]).unwrap();
/// assert_eq!(vec(&pairs).unwrap(), vector![vector![1, 0], vector![2, 1], vector![3, 2]]);
/// ```
pub fn map_n<F>(function: F, collections: &[Value]) -> Result<Value>
where
    F: Fn(&[Value]) -> Value + 'static,
{
    ensure_all_seqable("map_n", collections)?;
    let function = Rc::new(function);
    let collections: Rc<[Value]> = collections.into();
    Ok(lazy(move || {
        let function = Rc::clone(&function);
        Zip::new(&collections).map(move |arguments| function(&arguments))
    }))
}

/// Yields the non-`Nil` results of `function(element)`.
///
/// `false` is kept; only `Nil` is dropped.
///
/// # Errors
///
/// Returns [`CollectionError::NotSeqable`] if `collection` cannot be traversed.
pub fn keep<F>(function: F, collection: &Value) -> Result<Value>
where
    F: Fn(Value) -> Value + 'static,
{
    ensure_seqable("keep", collection)?;
    let function = Rc::new(function);
    let collection = collection.clone();
    Ok(lazy(move || {
        let function = Rc::clone(&function);
        iterate(&collection).filter_map(move |element| {
            let result = function(element);
            (!result.is_nil()).then_some(result)
        })
    }))
}

/// Yields the elements for which `predicate` holds.
///
/// # Errors
///
/// Returns [`CollectionError::NotSeqable`] if `collection` cannot be traversed.
pub fn filter<P>(predicate: P, collection: &Value) -> Result<Value>
where
    P: Fn(&Value) -> bool + 'static,
{
    select("filter", predicate, collection)
}

/// Yields the elements for which `predicate` does not hold.
///
/// # Errors
///
/// Returns [`CollectionError::NotSeqable`] if `collection` cannot be traversed.
pub fn remove<P>(predicate: P, collection: &Value) -> Result<Value>
where
    P: Fn(&Value) -> bool + 'static,
{
    select("remove", move |element: &Value| !predicate(element), collection)
}

fn select<P>(operation: &'static str, predicate: P, collection: &Value) -> Result<Value>
where
    P: Fn(&Value) -> bool + 'static,
{
    ensure_seqable(operation, collection)?;
    let predicate = Rc::new(predicate);
    let collection = collection.clone();
    Ok(lazy(move || {
        let predicate = Rc::clone(&predicate);
        iterate(&collection).filter(move |element| predicate(element))
    }))
}

/// Yields each element the first time it is seen.
///
/// Uniqueness is host equality (`==`), not [`equals`](crate::equals): a
/// vector and a list with the same elements are both kept. Every traversal
/// starts with an empty record of seen values.
///
/// # Errors
///
/// Returns [`CollectionError::NotSeqable`] if `collection` cannot be traversed.
pub fn distinct(collection: &Value) -> Result<Value> {
    ensure_seqable("distinct", collection)?;
    let collection = collection.clone();
    Ok(lazy(move || {
        let mut seen = ValueSet::default();
        iterate(&collection).filter(move |element| seen.insert(element.clone()))
    }))
}

// =============================================================================
// Slicing
// =============================================================================

/// Yields the first `count` elements. A count of zero or less yields nothing.
///
/// # Errors
///
/// Returns [`CollectionError::NotSeqable`] if `collection` cannot be traversed.
pub fn take(count: i64, collection: &Value) -> Result<Value> {
    ensure_seqable("take", collection)?;
    let count = clamp_count(count);
    let collection = collection.clone();
    Ok(lazy(move || iterate(&collection).take(count)))
}

/// Skips the first `count` elements and yields the rest. A count of zero
/// or less skips nothing.
///
/// # Errors
///
/// Returns [`CollectionError::NotSeqable`] if `collection` cannot be traversed.
pub fn drop(count: i64, collection: &Value) -> Result<Value> {
    skip("drop", count, collection)
}

/// Yields everything but the first element.
///
/// # Errors
///
/// Returns [`CollectionError::NotSeqable`] if `collection` cannot be traversed.
pub fn rest(collection: &Value) -> Result<Value> {
    skip("rest", 1, collection)
}

fn skip(operation: &'static str, count: i64, collection: &Value) -> Result<Value> {
    ensure_seqable(operation, collection)?;
    let count = clamp_count(count);
    let collection = collection.clone();
    Ok(lazy(move || iterate(&collection).skip(count)))
}

/// Yields elements while `predicate` holds and stops at the first failure.
///
/// # Errors
///
/// Returns [`CollectionError::NotSeqable`] if `collection` cannot be traversed.
pub fn take_while<P>(predicate: P, collection: &Value) -> Result<Value>
where
    P: Fn(&Value) -> bool + 'static,
{
    ensure_seqable("take_while", collection)?;
    let predicate = Rc::new(predicate);
    let collection = collection.clone();
    Ok(lazy(move || {
        let predicate = Rc::clone(&predicate);
        iterate(&collection).take_while(move |element| predicate(element))
    }))
}

/// Skips elements while `predicate` holds, then yields the rest.
///
/// The predicate is not consulted again after its first failure.
///
/// # Errors
///
/// Returns [`CollectionError::NotSeqable`] if `collection` cannot be traversed.
pub fn drop_while<P>(predicate: P, collection: &Value) -> Result<Value>
where
    P: Fn(&Value) -> bool + 'static,
{
    ensure_seqable("drop_while", collection)?;
    let predicate = Rc::new(predicate);
    let collection = collection.clone();
    Ok(lazy(move || {
        let predicate = Rc::clone(&predicate);
        iterate(&collection).skip_while(move |element| predicate(element))
    }))
}

/// Yields every `step`-th element, starting with the first.
///
/// A step of zero or less repeats the first element forever.
///
/// # Errors
///
/// Returns [`CollectionError::NotSeqable`] if `collection` cannot be traversed.
///
/// # Examples
///
/// ```rust
/// use polycoll::{range_to, take_nth, vec, vector};
///
/// let evens = take_nth(2, &range_to(10)).unwrap();
/// assert_eq!(vec(&evens).unwrap(), vector![0, 2, 4, 6, 8]);
/// ```
pub fn take_nth(step: i64, collection: &Value) -> Result<Value> {
    ensure_seqable("take_nth", collection)?;
    if step <= 0 {
        let first = iterate(collection).next().unwrap_or_default();
        return Ok(super::repeat(first));
    }
    let step = clamp_count(step);
    let collection = collection.clone();
    Ok(lazy(move || iterate(&collection).step_by(step)))
}

/// Yields everything but the last `count` elements.
///
/// Works on infinite sequences: the traversal runs `count` elements ahead
/// of what it yields.
///
/// # Errors
///
/// Returns [`CollectionError::NotSeqable`] if `collection` cannot be traversed.
pub fn drop_last(count: i64, collection: &Value) -> Result<Value> {
    ensure_seqable("drop_last", collection)?;
    let ahead = drop(count, collection)?;
    map_n(|arguments| arguments[0].clone(), &[collection.clone(), ahead])
}

// =============================================================================
// Concatenation
// =============================================================================

/// Chains the collections one after another.
///
/// # Errors
///
/// Returns [`CollectionError::NotSeqable`] if any collection cannot be
/// traversed.
///
/// # Examples
///
/// ```rust
/// use polycoll::{Value, concat, list, vec, vector};
///
/// let chained = concat(&[vector![1, 2], list![3], Value::Nil, Value::from("ab")]).unwrap();
/// assert_eq!(vec(&chained).unwrap(), vector![1, 2, 3, "a", "b"]);
/// ```
pub fn concat(collections: &[Value]) -> Result<Value> {
    collections
        .iter()
        .try_for_each(|collection| ensure_seqable("concat", collection))?;
    let collections: Rc<[Value]> = collections.into();
    Ok(lazy(move || {
        let collections = Rc::clone(&collections);
        (0..collections.len()).flat_map(move |index| iterate(&collections[index]))
    }))
}

/// Maps `function` over `collection` and chains the resulting collections.
///
/// The mapping runs when `mapcat` is called, so `collection` must be
/// finite; the chaining is lazy.
///
/// # Errors
///
/// Returns [`CollectionError::NotSeqable`] if `collection` or any mapped
/// result cannot be traversed.
pub fn mapcat<F>(function: F, collection: &Value) -> Result<Value>
where
    F: Fn(Value) -> Value,
{
    ensure_seqable("mapcat", collection)?;
    let mapped: Vec<Value> = iterate(collection).map(function).collect();
    concat(&mapped)
}

/// N-collection form of [`mapcat`], zipping like [`map_n`].
///
/// # Errors
///
/// Returns [`CollectionError::InvalidArgument`] when `collections` is empty
/// and [`CollectionError::NotSeqable`] if any collection or mapped result
/// cannot be traversed.
pub fn mapcat_n<F>(function: F, collections: &[Value]) -> Result<Value>
where
    F: Fn(&[Value]) -> Value,
{
    ensure_all_seqable("mapcat_n", collections)?;
    let mapped: Vec<Value> = Zip::new(collections)
        .map(|arguments| function(&arguments))
        .collect();
    concat(&mapped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::cell::Cell;

    fn realize(value: &Value) -> Vec<Value> {
        iterate(value).collect()
    }

    fn ints(values: &[i64]) -> Vec<Value> {
        values.iter().copied().map(Value::from).collect()
    }

    fn numbers(values: &[i64]) -> Value {
        Value::vector(ints(values))
    }

    #[rstest]
    fn test_map_calls_function_once_per_element_per_traversal() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let sequence = map(
            move |element| {
                counter.set(counter.get() + 1);
                element
            },
            &numbers(&[1, 2, 3]),
        )
        .unwrap();

        assert_eq!(calls.get(), 0);
        assert_eq!(realize(&sequence), ints(&[1, 2, 3]));
        assert_eq!(realize(&sequence), ints(&[1, 2, 3]));
        assert_eq!(calls.get(), 6);
    }

    #[rstest]
    fn test_map_n_requires_a_collection() {
        let error = map_n(|_| Value::Nil, &[]).unwrap_err();
        assert_eq!(error.operation(), Some("map_n"));
    }

    #[rstest]
    fn test_keep_drops_only_nil() {
        let sequence = keep(
            |element| match element.as_int() {
                Some(1) => Value::Nil,
                Some(2) => Value::Bool(false),
                _ => element,
            },
            &numbers(&[1, 2, 3]),
        )
        .unwrap();
        assert_eq!(realize(&sequence), vec![Value::Bool(false), Value::from(3)]);
    }

    #[rstest]
    #[case(2, &[1, 2])]
    #[case(0, &[])]
    #[case(-3, &[])]
    #[case(10, &[1, 2, 3])]
    fn test_take(#[case] count: i64, #[case] expected: &[i64]) {
        let sequence = take(count, &numbers(&[1, 2, 3])).unwrap();
        assert_eq!(realize(&sequence), ints(expected));
    }

    #[rstest]
    #[case(1, &[2, 3])]
    #[case(0, &[1, 2, 3])]
    #[case(-1, &[1, 2, 3])]
    #[case(5, &[])]
    fn test_drop(#[case] count: i64, #[case] expected: &[i64]) {
        let sequence = drop(count, &numbers(&[1, 2, 3])).unwrap();
        assert_eq!(realize(&sequence), ints(expected));
    }

    #[rstest]
    fn test_drop_while_does_not_retest() {
        let sequence = drop_while(
            |element| element.as_int().is_some_and(|number| number < 3),
            &numbers(&[1, 2, 3, 1, 2]),
        )
        .unwrap();
        assert_eq!(realize(&sequence), ints(&[3, 1, 2]));
    }

    #[rstest]
    fn test_distinct_uses_host_equality() {
        let sequence = distinct(&Value::vector([
            Value::from(1),
            Value::Float(1.0),
            numbers(&[1]),
            Value::list([Value::from(1)]),
        ]))
        .unwrap();
        assert_eq!(realize(&sequence).len(), 3);
    }

    #[rstest]
    fn test_take_nth_non_positive_repeats_first() {
        let sequence = take_nth(0, &numbers(&[7, 8])).unwrap();
        let first_three: Vec<Value> = iterate(&sequence).take(3).collect();
        assert_eq!(first_three, ints(&[7, 7, 7]));
    }

    #[rstest]
    fn test_drop_last() {
        let sequence = drop_last(2, &numbers(&[1, 2, 3, 4])).unwrap();
        assert_eq!(realize(&sequence), ints(&[1, 2]));
    }

    #[rstest]
    fn test_mapcat_chains_results() {
        let sequence = mapcat(
            |element| Value::vector([element.clone(), element]),
            &numbers(&[1, 2]),
        )
        .unwrap();
        assert_eq!(realize(&sequence), ints(&[1, 1, 2, 2]));
    }

    #[rstest]
    fn test_operators_reject_scalars_eagerly() {
        let error = filter(|_| true, &Value::from(1)).unwrap_err();
        assert_eq!(error.operation(), Some("filter"));
        assert!(concat(&[numbers(&[1]), Value::Bool(true)]).is_err());
    }
}
