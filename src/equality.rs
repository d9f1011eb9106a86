//! Structural equality across container categories.
//!
//! [`equals`] is the one equality to use for nested data. Host equality
//! (`==` on [`Value`]) keeps vectors and lists apart and compares lazy
//! sequences by identity; `equals` instead compares every sequential kind
//! (vector, list, lazy sequence) element by element, and compares maps,
//! records and sets without regard to insertion order. A list or lazy
//! sequence compared with a set, map or record walks the other side in
//! its traversal order.
//!
//! `equals` never fails. Values of incompatible shapes are simply unequal.

use crate::iterable::{is_traversable, iterate};
use crate::lazy::SeqIter;
use crate::value::Value;

/// Returns `true` if `left` and `right` are structurally equal.
///
/// Comparing two distinct infinite lazy sequences does not return.
///
/// # Examples
///
/// ```rust
/// use polycoll::{Value, equals, list, record, set, vector};
///
/// let nested = vector![1, 2, vector![3, 4, vector![record! { "a" => "b" }]]];
/// assert!(equals(&nested, &nested.clone()));
/// assert!(equals(&list![1, 2, 3], &vector![1, 2, 3]));
/// assert!(!equals(&set![1, 2], &set![1, 2, 3]));
/// assert!(!equals(&vector![1], &Value::Nil));
/// ```
pub fn equals(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Set(left), Value::Set(right)) => {
            left.len() == right.len() && left.iter().all(|element| right.contains(element))
        }
        (Value::Map(left), Value::Map(right)) => {
            left.len() == right.len()
                && left.iter().all(|(key, value)| {
                    right.get(key).is_some_and(|other| equals(value, other))
                })
        }
        (Value::Record(left), Value::Record(right)) => {
            left.len() == right.len()
                && left.iter().all(|(key, value)| {
                    right.get(key).is_some_and(|other| equals(value, other))
                })
        }
        (Value::Seq(left), Value::Seq(right)) if left.ptr_eq(right) => true,
        (Value::List(_) | Value::Seq(_), _) | (_, Value::List(_) | Value::Seq(_)) => {
            sequential(left, right)
        }
        (Value::Vector(left), Value::Vector(right)) => {
            left.len() == right.len()
                && left.iter().zip(right).all(|(left, right)| equals(left, right))
        }
        (Value::Reduced(left), Value::Reduced(right)) => equals(left, right),
        _ => left == right,
    }
}

/// Starts a traversal for comparison against a list or lazy sequence.
///
/// Sets, maps and records take part through their traversal order. `Nil`
/// and strings do not.
fn sequence_of(value: &Value) -> Option<SeqIter> {
    let comparable = is_traversable(value) && !matches!(value, Value::Nil | Value::Str(_));
    comparable.then(|| iterate(value))
}

/// Compares two sequential values element by element, stopping at the
/// first difference.
fn sequential(left: &Value, right: &Value) -> bool {
    let (Some(mut left), Some(mut right)) = (sequence_of(left), sequence_of(right)) else {
        return false;
    };
    loop {
        match (left.next(), right.next()) {
            (None, None) => return true,
            (Some(left), Some(right)) if equals(&left, &right) => {}
            _ => return false,
        }
    }
}

/// Returns `true` if every value equals the first. Vacuously `true` for
/// zero or one value.
pub fn equals_all(values: &[Value]) -> bool {
    values
        .split_first()
        .is_none_or(|(first, rest)| rest.iter().all(|value| equals(first, value)))
}

/// Negation of [`equals`].
pub fn not_equals(left: &Value, right: &Value) -> bool {
    !equals(left, right)
}

/// Negation of [`equals_all`].
pub fn not_equals_all(values: &[Value]) -> bool {
    !equals_all(values)
}
