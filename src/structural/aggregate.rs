//! Projections and groupings built from the structural primitives.

use super::path::mut_update;
use super::{assoc_into, get, lookup};
use crate::access::mapv;
use crate::category::empty;
use crate::compose::fnil;
use crate::error::Result;
use crate::iterable::{ensure_seqable, traverse};
use crate::lazy::map;
use crate::value::{Value, ValueMap};

/// Builds a collection of the same category holding only the requested
/// keys that are present with a non-`Nil` value.
///
/// # Errors
///
/// Returns [`CollectionError::UnsupportedCategory`](crate::CollectionError::UnsupportedCategory)
/// when a key is found in a collection that cannot be associated into,
/// such as a set or a list.
///
/// # Examples
///
/// ```rust
/// use polycoll::{Value, record, select_keys};
///
/// let user = record! { "name" => "Ada", "email" => Value::Nil, "id" => 7 };
/// let keys = [Value::from("name"), Value::from("email"), Value::from("missing")];
/// assert_eq!(select_keys(&user, &keys).unwrap(), record! { "name" => "Ada" });
/// ```
pub fn select_keys(collection: &Value, keys: &[Value]) -> Result<Value> {
    let mut selected = empty(collection);
    for key in keys {
        let value = get(collection, key, Value::Nil);
        if !value.is_nil() {
            assoc_into("select_keys", &mut selected, key.clone(), value)?;
        }
    }
    Ok(selected)
}

/// Groups the elements of `collection` into a map from `key(element)` to
/// the vector of elements with that key, in encounter order.
///
/// # Errors
///
/// Returns [`CollectionError::NotSeqable`](crate::CollectionError::NotSeqable)
/// if `collection` cannot be traversed.
///
/// # Examples
///
/// ```rust
/// use polycoll::{Value, get, group_by, vector};
///
/// let groups = group_by(|word| Value::from(word.as_str().map_or(0, str::len)), &vector!["a", "bb", "c"]).unwrap();
/// assert_eq!(get(&groups, &Value::from(1), Value::Nil), vector!["a", "c"]);
/// ```
pub fn group_by<F>(mut key: F, collection: &Value) -> Result<Value>
where
    F: FnMut(&Value) -> Value,
{
    let mut groups = Value::Map(ValueMap::default());
    for element in traverse("group_by", collection)? {
        let bucket = key(&element);
        let append = fnil(
            move |mut members| {
                if let Value::Vector(items) = &mut members {
                    items.push(element.clone());
                }
                members
            },
            Value::Vector(Vec::new()),
        );
        mut_update(&mut groups, bucket, append)?;
    }
    Ok(groups)
}

/// Counts how many times each distinct element occurs, as a map from
/// element to count.
///
/// # Errors
///
/// Returns [`CollectionError::NotSeqable`](crate::CollectionError::NotSeqable)
/// if `collection` cannot be traversed.
pub fn frequencies(collection: &Value) -> Result<Value> {
    let increment = fnil(
        |count| Value::from(count.as_int().unwrap_or(0).saturating_add(1)),
        Value::from(0),
    );
    let mut counts = Value::Map(ValueMap::default());
    for element in traverse("frequencies", collection)? {
        mut_update(&mut counts, element, &increment)?;
    }
    Ok(counts)
}

/// Substitutes every element of `collection` that is a key of
/// `replacements` with the value stored under it.
///
/// Lookups dispatch like [`get`], so `replacements` may be a map, a record,
/// a vector indexed by position or a set. A key stored with a `Nil` value
/// still substitutes `Nil`. A vector yields a vector; any other collection
/// yields a lazy sequence.
///
/// # Errors
///
/// Returns [`CollectionError::NotSeqable`](crate::CollectionError::NotSeqable)
/// if `collection` cannot be traversed.
///
/// # Examples
///
/// ```rust
/// use polycoll::{Value, hash_map, list, replace, vec, vector};
///
/// let names = vector!["zeroth", "first", "second"];
/// assert_eq!(replace(&names, &vector![0, 2]).unwrap(), vector!["zeroth", "second"]);
///
/// let swapped = replace(&hash_map! { "a" => "b" }, &list!["a", "c"]).unwrap();
/// assert_eq!(vec(&swapped).unwrap(), vector!["b", "c"]);
/// ```
pub fn replace(replacements: &Value, collection: &Value) -> Result<Value> {
    ensure_seqable("replace", collection)?;
    let replacements = replacements.clone();
    let substitute = move |element: Value| lookup(&replacements, &element).unwrap_or(element);
    if matches!(collection, Value::Vector(_)) {
        mapv(substitute, collection)
    } else {
        map(substitute, collection)
    }
}
