//! Uniform traversal of any value (nil-punning).
//!
//! [`to_iterable`] turns every traversable value into a [`SeqIter`]:
//!
//! | Value | Traversal |
//! |-------|-----------|
//! | `Nil` | nothing |
//! | string | its characters, as one-character strings |
//! | vector, list, set | their elements |
//! | map | `[key, value]` vectors |
//! | record | `[key, value]` vectors with string keys |
//! | lazy sequence | a fresh traversal |
//!
//! Scalars cannot be traversed and raise [`CollectionError::NotSeqable`].

use std::rc::Rc;

use crate::error::{CollectionError, Result};
use crate::lazy::SeqIter;
use crate::value::Value;

/// Returns `true` for values that natively support traversal.
///
/// Records are not seqable in this sense even though [`to_iterable`]
/// accepts them by converting their entries.
pub const fn is_seqable(value: &Value) -> bool {
    matches!(
        value,
        Value::Nil
            | Value::Str(_)
            | Value::Vector(_)
            | Value::List(_)
            | Value::Map(_)
            | Value::Set(_)
            | Value::Seq(_)
    )
}

/// Returns `true` for values [`to_iterable`] accepts.
pub(crate) const fn is_traversable(value: &Value) -> bool {
    is_seqable(value) || matches!(value, Value::Record(_))
}

/// Starts a traversal of any traversable value.
///
/// # Errors
///
/// Returns [`CollectionError::NotSeqable`] for booleans, numbers and
/// reduced values.
///
/// # Examples
///
/// ```rust
/// use polycoll::{Value, record, to_iterable, vector};
///
/// let entries: Vec<Value> = to_iterable(&record! { "a" => 1 }).unwrap().collect();
/// assert_eq!(entries, vec![vector!["a", 1]]);
///
/// assert_eq!(to_iterable(&Value::Nil).unwrap().count(), 0);
/// assert!(to_iterable(&Value::from(5)).is_err());
/// ```
pub fn to_iterable(value: &Value) -> Result<SeqIter> {
    traverse("to_iterable", value)
}

/// Like [`to_iterable`], naming `operation` in the error.
pub(crate) fn traverse(operation: &'static str, value: &Value) -> Result<SeqIter> {
    if is_traversable(value) {
        Ok(iterate(value))
    } else {
        Err(CollectionError::not_seqable(operation, value.type_name()))
    }
}

/// Checks that `value` can be traversed, naming `operation` in the error.
pub(crate) fn ensure_seqable(operation: &'static str, value: &Value) -> Result<()> {
    if is_traversable(value) {
        Ok(())
    } else {
        Err(CollectionError::not_seqable(operation, value.type_name()))
    }
}

/// Traverses a value already checked with [`ensure_seqable`].
///
/// Values that cannot be traversed produce an empty traversal.
pub(crate) fn iterate(value: &Value) -> SeqIter {
    match value {
        Value::Str(text) => Box::new(Characters {
            text: Rc::clone(text),
            offset: 0,
        }),
        Value::Vector(elements) => Box::new(elements.clone().into_iter()),
        Value::List(elements) => Box::new(elements.clone().into_iter()),
        Value::Set(elements) => Box::new(elements.clone().into_iter()),
        Value::Map(entries) => Box::new(
            entries
                .clone()
                .into_iter()
                .map(|(key, element)| Value::Vector(vec![key, element])),
        ),
        Value::Record(entries) => Box::new(
            entries
                .clone()
                .into_iter()
                .map(|(key, element)| Value::Vector(vec![Value::Str(key), element])),
        ),
        Value::Seq(sequence) => sequence.iter(),
        Value::Nil | Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::Reduced(_) => {
            Box::new(std::iter::empty())
        }
    }
}

/// Character traversal over a shared string.
struct Characters {
    text: Rc<str>,
    offset: usize,
}

impl Iterator for Characters {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        let character = self.text[self.offset..].chars().next()?;
        self.offset += character.len_utf8();
        Some(Value::from(character))
    }
}

/// Returns the value as a non-empty traversable, or `Nil` when it is empty.
///
/// This is the nil-punning boundary: an empty collection and `Nil` are
/// indistinguishable afterwards. Records come back as a vector of their
/// `[key, value]` entries.
///
/// # Errors
///
/// Returns [`CollectionError::NotSeqable`] for values that cannot be
/// traversed.
///
/// # Examples
///
/// ```rust
/// use polycoll::{Value, seq, vector};
///
/// assert_eq!(seq(&vector![1, 2]).unwrap(), vector![1, 2]);
/// assert!(seq(&vector![]).unwrap().is_nil());
/// assert!(seq(&Value::from("")).unwrap().is_nil());
/// ```
pub fn seq(value: &Value) -> Result<Value> {
    let is_empty = match value {
        Value::Nil => true,
        Value::Str(text) => text.is_empty(),
        Value::Vector(elements) => elements.is_empty(),
        Value::List(elements) => elements.is_empty(),
        Value::Map(entries) => entries.is_empty(),
        Value::Set(elements) => elements.is_empty(),
        Value::Seq(sequence) => sequence.iter().next().is_none(),
        Value::Record(entries) => {
            return Ok(if entries.is_empty() {
                Value::Nil
            } else {
                iterate(value).collect()
            });
        }
        Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::Reduced(_) => {
            return Err(CollectionError::not_seqable("seq", value.type_name()));
        }
    };
    Ok(if is_empty { Value::Nil } else { value.clone() })
}

/// Returns `true` if the value has no elements. `Nil` is empty.
///
/// # Errors
///
/// Returns [`CollectionError::NotSeqable`] for values that cannot be
/// traversed.
pub fn is_empty(value: &Value) -> Result<bool> {
    Ok(seq(value)?.is_nil())
}
