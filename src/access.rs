//! Eager consumers of traversable values.
//!
//! These operators walk their input immediately and return plain values.
//! Short-circuiting consumers ([`first`], [`nth`], [`some`], [`every`], ...)
//! stop pulling as soon as the answer is known, so they are safe on
//! infinite lazy sequences; the others realize the whole input.

use std::cmp::Ordering;

use crate::category::Category;
use crate::error::{CollectionError, Result};
use crate::iterable::traverse;
use crate::value::{Value, ValueSet};

// =============================================================================
// Constructors
// =============================================================================

/// Creates a vector holding `elements`.
pub fn vector(elements: &[Value]) -> Value {
    Value::Vector(elements.to_vec())
}

/// Creates a list holding `elements` in the given order.
pub fn list(elements: &[Value]) -> Value {
    Value::List(elements.iter().cloned().collect())
}

/// Realizes any traversable value into a vector.
///
/// # Errors
///
/// Returns [`CollectionError::NotSeqable`] if `collection` cannot be traversed.
pub fn vec(collection: &Value) -> Result<Value> {
    Ok(traverse("vec", collection)?.collect())
}

/// Collects the distinct elements of `collection` into a set.
///
/// # Errors
///
/// Returns [`CollectionError::NotSeqable`] if `collection` cannot be traversed.
pub fn set(collection: &Value) -> Result<Value> {
    Ok(Value::Set(traverse("set", collection)?.collect()))
}

// =============================================================================
// Positional Access
// =============================================================================

/// Returns the first element, or `Nil` if there is none.
///
/// # Errors
///
/// Returns [`CollectionError::NotSeqable`] if `collection` cannot be traversed.
///
/// # Examples
///
/// ```rust
/// use polycoll::{Value, first, range, vector};
///
/// assert_eq!(first(&vector![3, 4]).unwrap(), Value::from(3));
/// assert_eq!(first(&range()).unwrap(), Value::from(0));
/// assert!(first(&Value::Nil).unwrap().is_nil());
/// ```
pub fn first(collection: &Value) -> Result<Value> {
    Ok(traverse("first", collection)?.next().unwrap_or_default())
}

/// Returns the second element, or `Nil` if there is none.
///
/// # Errors
///
/// Returns [`CollectionError::NotSeqable`] if `collection` cannot be traversed.
pub fn second(collection: &Value) -> Result<Value> {
    Ok(traverse("second", collection)?.nth(1).unwrap_or_default())
}

/// Returns the first element of the first element.
///
/// # Errors
///
/// Returns [`CollectionError::NotSeqable`] if `collection` or its first
/// element cannot be traversed.
pub fn ffirst(collection: &Value) -> Result<Value> {
    first(&first(collection)?)
}

/// Returns the last element, or `Nil` if there is none.
///
/// # Errors
///
/// Returns [`CollectionError::NotSeqable`] if `collection` cannot be traversed.
pub fn last(collection: &Value) -> Result<Value> {
    match collection {
        Value::Vector(elements) => Ok(elements.last().cloned().unwrap_or_default()),
        Value::List(elements) => Ok(elements.back().cloned().unwrap_or_default()),
        other => Ok(traverse("last", other)?.last().unwrap_or_default()),
    }
}

/// Returns the element at `index`, or `not_found` when the index is
/// negative or past the end.
///
/// # Errors
///
/// Returns [`CollectionError::NotSeqable`] if `collection` cannot be traversed.
pub fn nth(collection: &Value, index: i64, not_found: Value) -> Result<Value> {
    let Ok(index) = usize::try_from(index) else {
        return Ok(not_found);
    };
    let found = match collection {
        Value::Vector(elements) => elements.get(index).cloned(),
        Value::List(elements) => elements.get(index).cloned(),
        other => traverse("nth", other)?.nth(index),
    };
    Ok(found.unwrap_or(not_found))
}

/// Counts the elements. `Nil` has zero elements and a string counts its
/// characters.
///
/// # Errors
///
/// Returns [`CollectionError::NotSeqable`] if `collection` cannot be traversed.
pub fn count(collection: &Value) -> Result<usize> {
    match collection {
        Value::Nil => Ok(0),
        Value::Str(text) => Ok(text.chars().count()),
        Value::Vector(elements) => Ok(elements.len()),
        Value::List(elements) => Ok(elements.len()),
        Value::Map(entries) => Ok(entries.len()),
        Value::Record(entries) => Ok(entries.len()),
        Value::Set(elements) => Ok(elements.len()),
        other => Ok(traverse("count", other)?.count()),
    }
}

/// Returns every element but the last as a vector, or `Nil` when that
/// leaves nothing.
///
/// # Errors
///
/// Returns [`CollectionError::NotSeqable`] if `collection` cannot be traversed.
pub fn butlast(collection: &Value) -> Result<Value> {
    let mut elements: Vec<Value> = traverse("butlast", collection)?.collect();
    elements.pop();
    Ok(if elements.is_empty() {
        Value::Nil
    } else {
        Value::Vector(elements)
    })
}

/// Copies `vector[start..end]`, clamping both bounds to the vector length.
/// `None` for `end` means the end of the vector.
///
/// # Errors
///
/// Returns [`CollectionError::UnsupportedCategory`] unless `vector` is a
/// vector.
pub fn subvec(vector: &Value, start: usize, end: Option<usize>) -> Result<Value> {
    let Value::Vector(elements) = vector else {
        return Err(CollectionError::unsupported(
            "subvec",
            &[Category::OrderedSequence],
            vector.category(),
        ));
    };
    let end = end.unwrap_or(elements.len()).min(elements.len());
    let start = start.min(end);
    Ok(Value::Vector(elements[start..end].to_vec()))
}

// =============================================================================
// Predicates
// =============================================================================

/// Returns the first truthy result of `predicate`, or `Nil`.
///
/// # Errors
///
/// Returns [`CollectionError::NotSeqable`] if `collection` cannot be traversed.
///
/// # Examples
///
/// ```rust
/// use polycoll::{Value, range, some};
///
/// let found = some(|x| x.as_int().is_some_and(|n| n * n > 50).then(|| x.clone()), &range()).unwrap();
/// assert_eq!(found, Value::from(8));
/// ```
pub fn some<F, R>(mut predicate: F, collection: &Value) -> Result<Value>
where
    F: FnMut(&Value) -> R,
    R: Into<Value>,
{
    Ok(traverse("some", collection)?
        .map(|element| predicate(&element).into())
        .find(Value::is_truthy)
        .unwrap_or_default())
}

/// Returns `true` if `predicate` holds for every element. Vacuously `true`
/// for an empty collection.
///
/// # Errors
///
/// Returns [`CollectionError::NotSeqable`] if `collection` cannot be traversed.
pub fn every<P>(mut predicate: P, collection: &Value) -> Result<bool>
where
    P: FnMut(&Value) -> bool,
{
    Ok(traverse("every", collection)?.all(|element| predicate(&element)))
}

/// Returns `true` if `predicate` fails for at least one element.
///
/// # Errors
///
/// Returns [`CollectionError::NotSeqable`] if `collection` cannot be traversed.
pub fn not_every<P>(predicate: P, collection: &Value) -> Result<bool>
where
    P: FnMut(&Value) -> bool,
{
    Ok(!every(predicate, collection)?)
}

/// Returns `true` if `predicate` holds for no element.
///
/// # Errors
///
/// Returns [`CollectionError::NotSeqable`] if `collection` cannot be traversed.
pub fn not_any<P>(mut predicate: P, collection: &Value) -> Result<bool>
where
    P: FnMut(&Value) -> bool,
{
    Ok(!traverse("not_any", collection)?.any(|element| predicate(&element)))
}

/// Returns `true` if no two values are equal under host equality.
pub fn is_distinct(values: &[Value]) -> bool {
    let mut seen = ValueSet::default();
    values.iter().all(|value| seen.insert(value.clone()))
}

// =============================================================================
// Eager Transforms
// =============================================================================

/// Eager [`map`](crate::map) into a vector.
///
/// # Errors
///
/// Returns [`CollectionError::NotSeqable`] if `collection` cannot be traversed.
pub fn mapv<F>(function: F, collection: &Value) -> Result<Value>
where
    F: FnMut(Value) -> Value,
{
    Ok(traverse("mapv", collection)?.map(function).collect())
}

/// Eager [`filter`](crate::filter) into a vector.
///
/// # Errors
///
/// Returns [`CollectionError::NotSeqable`] if `collection` cannot be traversed.
pub fn filterv<P>(mut predicate: P, collection: &Value) -> Result<Value>
where
    P: FnMut(&Value) -> bool,
{
    Ok(traverse("filterv", collection)?
        .filter(|element| predicate(element))
        .collect())
}

/// Maps `function(index, element)` over `collection` into a vector.
///
/// # Errors
///
/// Returns [`CollectionError::NotSeqable`] if `collection` cannot be traversed.
pub fn map_indexed<F>(mut function: F, collection: &Value) -> Result<Value>
where
    F: FnMut(usize, Value) -> Value,
{
    Ok(traverse("map_indexed", collection)?
        .enumerate()
        .map(|(index, element)| function(index, element))
        .collect())
}

/// Returns the elements in reverse order as a vector.
///
/// # Errors
///
/// Returns [`CollectionError::NotSeqable`] if `collection` cannot be traversed.
pub fn reverse(collection: &Value) -> Result<Value> {
    let mut elements: Vec<Value> = traverse("reverse", collection)?.collect();
    elements.reverse();
    Ok(Value::Vector(elements))
}

/// Returns `[take(n), drop(n)]` as a vector of two vectors.
///
/// # Errors
///
/// Returns [`CollectionError::NotSeqable`] if `collection` cannot be traversed.
pub fn split_at(count: i64, collection: &Value) -> Result<Value> {
    let count = usize::try_from(count.max(0)).unwrap_or(usize::MAX);
    let mut elements: Vec<Value> = traverse("split_at", collection)?.collect();
    let tail = elements.split_off(count.min(elements.len()));
    Ok(Value::Vector(vec![
        Value::Vector(elements),
        Value::Vector(tail),
    ]))
}

/// Returns `[take_while(predicate), drop_while(predicate)]` as a vector of
/// two vectors.
///
/// # Errors
///
/// Returns [`CollectionError::NotSeqable`] if `collection` cannot be traversed.
pub fn split_with<P>(mut predicate: P, collection: &Value) -> Result<Value>
where
    P: FnMut(&Value) -> bool,
{
    let mut elements: Vec<Value> = traverse("split_with", collection)?.collect();
    let split = elements
        .iter()
        .position(|element| !predicate(element))
        .unwrap_or(elements.len());
    let tail = elements.split_off(split);
    Ok(Value::Vector(vec![
        Value::Vector(elements),
        Value::Vector(tail),
    ]))
}

/// Returns the keys of a map or record as a vector, or `Nil` when it is
/// empty or `Nil`.
///
/// # Errors
///
/// Returns [`CollectionError::UnsupportedCategory`] for anything else.
pub fn keys(collection: &Value) -> Result<Value> {
    entries_of("keys", collection, |key, _| key)
}

/// Returns the values of a map or record as a vector, or `Nil` when it is
/// empty or `Nil`.
///
/// # Errors
///
/// Returns [`CollectionError::UnsupportedCategory`] for anything else.
pub fn vals(collection: &Value) -> Result<Value> {
    entries_of("vals", collection, |_, value| value)
}

fn entries_of<F>(operation: &'static str, collection: &Value, pick: F) -> Result<Value>
where
    F: Fn(Value, Value) -> Value,
{
    let picked: Vec<Value> = match collection {
        Value::Nil => return Ok(Value::Nil),
        Value::Map(entries) => entries
            .iter()
            .map(|(key, value)| pick(key.clone(), value.clone()))
            .collect(),
        Value::Record(entries) => entries
            .iter()
            .map(|(key, value)| pick(Value::Str(key.clone()), value.clone()))
            .collect(),
        other => {
            return Err(CollectionError::unsupported(
                operation,
                &[Category::OrderedMap, Category::Record],
                other.category(),
            ));
        }
    };
    Ok(if picked.is_empty() {
        Value::Nil
    } else {
        Value::Vector(picked)
    })
}

// =============================================================================
// Ordering
// =============================================================================

/// Total order over values used by [`sort`] and [`sort_by`].
///
/// Numbers compare by exact value across `Int` and `Float`, with NaN
/// placed by its sign bit. Strings and booleans compare naturally, and
/// vectors compare by length and then element by element. Values of different kinds order by kind:
/// `Nil` < booleans < numbers < strings < vectors < everything else.
pub fn compare(left: &Value, right: &Value) -> Ordering {
    match (left, right) {
        (Value::Int(left), Value::Int(right)) => left.cmp(right),
        (Value::Int(left), Value::Float(right)) => compare_mixed(*left, *right),
        (Value::Float(left), Value::Int(right)) => compare_mixed(*right, *left).reverse(),
        (Value::Float(left), Value::Float(right)) => left
            .partial_cmp(right)
            .unwrap_or_else(|| left.total_cmp(right)),
        (Value::Bool(left), Value::Bool(right)) => left.cmp(right),
        (Value::Str(left), Value::Str(right)) => left.cmp(right),
        (Value::Vector(left), Value::Vector(right)) => left.len().cmp(&right.len()).then_with(|| {
            left.iter()
                .zip(right)
                .map(|(left, right)| compare(left, right))
                .find(|ordering| ordering.is_ne())
                .unwrap_or(Ordering::Equal)
        }),
        _ => rank(left).cmp(&rank(right)),
    }
}

/// Orders an integer against a float without rounding the integer.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn compare_mixed(integer: i64, float: f64) -> Ordering {
    // 2^63, the first float above every i64.
    const BOUND: f64 = 9_223_372_036_854_775_808.0;
    if float.is_nan() {
        (integer as f64).total_cmp(&float)
    } else if float >= BOUND {
        Ordering::Less
    } else if float < -BOUND {
        Ordering::Greater
    } else {
        let fraction = float.fract();
        integer.cmp(&(float.trunc() as i64)).then(if fraction > 0.0 {
            Ordering::Less
        } else if fraction < 0.0 {
            Ordering::Greater
        } else {
            Ordering::Equal
        })
    }
}

const fn rank(value: &Value) -> u8 {
    match value {
        Value::Nil => 0,
        Value::Bool(_) => 1,
        Value::Int(_) | Value::Float(_) => 2,
        Value::Str(_) => 3,
        Value::Vector(_) => 4,
        Value::List(_) => 5,
        Value::Set(_) => 6,
        Value::Map(_) => 7,
        Value::Record(_) => 8,
        Value::Seq(_) => 9,
        Value::Reduced(_) => 10,
    }
}

/// Sorts the elements into a vector using [`compare`]. The sort is stable.
///
/// # Errors
///
/// Returns [`CollectionError::NotSeqable`] if `collection` cannot be traversed.
///
/// # Examples
///
/// ```rust
/// use polycoll::{Value, list, sort, vector};
///
/// assert_eq!(sort(&list![3, 1.5, 2]).unwrap(), vector![1.5, 2, 3]);
/// ```
pub fn sort(collection: &Value) -> Result<Value> {
    let mut elements: Vec<Value> = traverse("sort", collection)?.collect();
    elements.sort_by(compare);
    Ok(Value::Vector(elements))
}

/// Sorts the elements by `key(element)` using [`compare`]. The key
/// function runs once per element and the sort is stable.
///
/// # Errors
///
/// Returns [`CollectionError::NotSeqable`] if `collection` cannot be traversed.
pub fn sort_by<F>(mut key: F, collection: &Value) -> Result<Value>
where
    F: FnMut(&Value) -> Value,
{
    let mut keyed: Vec<(Value, Value)> = traverse("sort_by", collection)?
        .map(|element| (key(&element), element))
        .collect();
    keyed.sort_by(|(left, _), (right, _)| compare(left, right));
    Ok(keyed.into_iter().map(|(_, element)| element).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lazy::{range, range_to};
    use rstest::rstest;

    fn ints(values: &[i64]) -> Value {
        Value::vector(values.iter().copied().map(Value::from))
    }

    #[rstest]
    fn test_positional_access_on_lazy_input() {
        assert_eq!(second(&range()).unwrap(), Value::from(1));
        assert_eq!(nth(&range(), 10, Value::Nil).unwrap(), Value::from(10));
        assert_eq!(last(&range_to(4)).unwrap(), Value::from(3));
    }

    #[rstest]
    #[case(-1, "missing")]
    #[case(3, "missing")]
    fn test_nth_out_of_bounds_returns_not_found(#[case] index: i64, #[case] expected: &str) {
        assert_eq!(
            nth(&ints(&[1, 2, 3]), index, Value::from("missing")).unwrap(),
            Value::from(expected)
        );
    }

    #[rstest]
    #[case(Value::Nil, 0)]
    #[case(Value::from("héllo"), 5)]
    #[case(Value::record([("a", Value::from(1))]), 1)]
    #[case(range_to(7), 7)]
    fn test_count(#[case] collection: Value, #[case] expected: usize) {
        assert_eq!(count(&collection).unwrap(), expected);
    }

    #[rstest]
    fn test_butlast_of_singleton_is_nil() {
        assert!(butlast(&ints(&[1])).unwrap().is_nil());
        assert_eq!(butlast(&ints(&[1, 2, 3])).unwrap(), ints(&[1, 2]));
    }

    #[rstest]
    fn test_subvec_clamps_bounds() {
        assert_eq!(subvec(&ints(&[1, 2, 3, 4]), 1, Some(3)).unwrap(), ints(&[2, 3]));
        assert_eq!(subvec(&ints(&[1, 2]), 1, Some(10)).unwrap(), ints(&[2]));
        assert_eq!(subvec(&ints(&[1, 2]), 5, None).unwrap(), ints(&[]));
        assert!(subvec(&Value::from("ab"), 0, None).is_err());
    }

    #[rstest]
    fn test_some_returns_the_predicate_result() {
        let found = some(|element| element.as_int().map(|number| number > 1), &ints(&[1, 2])).unwrap();
        assert_eq!(found, Value::Bool(true));
        let missing = some(|_| Value::Bool(false), &ints(&[1, 2])).unwrap();
        assert!(missing.is_nil());
    }

    #[rstest]
    fn test_every_short_circuits_on_infinite_input() {
        let all_small = every(|element| element.as_int().is_some_and(|n| n < 5), &range()).unwrap();
        assert!(!all_small);
        assert!(not_every(|element| element.as_int().is_some_and(|n| n < 5), &range()).unwrap());
        assert!(not_any(|element| element.is_nil(), &ints(&[1, 2])).unwrap());
        assert!(every(|_| false, &Value::Nil).unwrap());
    }

    #[rstest]
    fn test_is_distinct() {
        assert!(is_distinct(&[Value::from(1), Value::from(2)]));
        assert!(!is_distinct(&[Value::from(1), Value::Float(1.0)]));
    }

    #[rstest]
    fn test_split_at_and_split_with() {
        assert_eq!(
            split_at(2, &ints(&[1, 2, 3])).unwrap(),
            Value::vector([ints(&[1, 2]), ints(&[3])])
        );
        assert_eq!(
            split_with(|element| element.as_int().is_some_and(|n| n < 3), &ints(&[1, 2, 3, 1])).unwrap(),
            Value::vector([ints(&[1, 2]), ints(&[3, 1])])
        );
    }

    #[rstest]
    fn test_keys_and_vals() {
        let record = Value::record([("a", Value::from(1)), ("b", Value::from(2))]);
        assert_eq!(keys(&record).unwrap(), Value::vector([Value::from("a"), Value::from("b")]));
        assert_eq!(vals(&record).unwrap(), ints(&[1, 2]));
        assert!(keys(&Value::map([])).unwrap().is_nil());
        assert!(vals(&ints(&[1])).is_err());
    }

    #[rstest]
    fn test_sort_mixed_kinds() {
        let sorted = sort(&Value::vector([
            Value::from("b"),
            Value::from(2),
            Value::Nil,
            Value::from("a"),
            Value::Float(0.5),
        ]))
        .unwrap();
        assert_eq!(
            sorted,
            Value::vector([
                Value::Nil,
                Value::Float(0.5),
                Value::from(2),
                Value::from("a"),
                Value::from("b"),
            ])
        );
    }

    #[rstest]
    #[case(Value::from((1_i64 << 53) + 1), Value::Float(9_007_199_254_740_992.0), Ordering::Greater)]
    #[case(Value::from(1_i64 << 53), Value::Float(9_007_199_254_740_992.0), Ordering::Equal)]
    #[case(Value::from(i64::MAX), Value::Float(9_223_372_036_854_775_808.0), Ordering::Less)]
    #[case(Value::from(i64::MIN), Value::Float(-9_223_372_036_854_775_808.0), Ordering::Equal)]
    #[case(Value::from(-2), Value::Float(-1.5), Ordering::Less)]
    #[case(Value::from(1), Value::Float(1.5), Ordering::Less)]
    #[case(Value::from(2), Value::Float(1.5), Ordering::Greater)]
    #[case(Value::from(0), Value::Float(f64::NAN), Ordering::Less)]
    fn test_compare_int_against_float_exactly(
        #[case] integer: Value,
        #[case] float: Value,
        #[case] expected: Ordering,
    ) {
        assert_eq!(compare(&integer, &float), expected);
        assert_eq!(compare(&float, &integer), expected.reverse());
    }

    #[rstest]
    fn test_sort_by_is_stable() {
        let words = Value::vector([Value::from("bb"), Value::from("a"), Value::from("cc")]);
        let sorted = sort_by(|word| Value::from(count(word).unwrap_or(0)), &words).unwrap();
        assert_eq!(
            sorted,
            Value::vector([Value::from("a"), Value::from("bb"), Value::from("cc")])
        );
    }

    #[rstest]
    fn test_map_indexed() {
        let indexed = map_indexed(|index, element| Value::vector([Value::from(index), element]), &Value::from("ab")).unwrap();
        assert_eq!(
            indexed,
            Value::vector([
                Value::vector([Value::from(0), Value::from("a")]),
                Value::vector([Value::from(1), Value::from("b")]),
            ])
        );
    }
}
