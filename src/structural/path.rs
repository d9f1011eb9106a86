//! Nested access and update along a path of keys.

use super::{ASSOC_CATEGORIES, assoc, assoc_into, get, index_of};
use crate::category::{Category, empty_of_category};
use crate::error::{CollectionError, Result};
use crate::value::{Value, record_key};

/// Follows `path` through nested collections, returning `not_found` when
/// any step is missing or the final value is `Nil`.
///
/// # Examples
///
/// ```rust
/// use polycoll::{Value, get_in, record, vector};
///
/// let data = record! { "users" => vector![record! { "name" => "Ada" }] };
/// let path = [Value::from("users"), Value::from(0), Value::from("name")];
/// assert_eq!(get_in(&data, &path, Value::Nil), Value::from("Ada"));
/// assert_eq!(get_in(&data, &[Value::from("nope")], Value::from(0)), Value::from(0));
/// ```
pub fn get_in(collection: &Value, path: &[Value], not_found: Value) -> Value {
    let found = path
        .iter()
        .fold(collection.clone(), |entry, key| get(&entry, key, Value::Nil));
    if found.is_nil() { not_found } else { found }
}

/// Sets the value at the end of `path` in place, creating missing levels.
///
/// Missing or falsy intermediate values are replaced with an empty
/// container of the root's category, whatever the level. Mixed nesting
/// (a record holding vectors, say) only works where the intermediate
/// containers already exist.
///
/// # Errors
///
/// Returns [`CollectionError::InvalidArgument`] for an empty path,
/// [`CollectionError::UnsupportedCategory`] when the root or an existing
/// intermediate value cannot be associated into, and
/// [`CollectionError::InvalidKey`] for an invalid vector index.
pub fn mut_assoc_in<'a>(
    collection: &'a mut Value,
    path: &[Value],
    value: Value,
) -> Result<&'a mut Value> {
    assoc_path_checked("mut_assoc_in", collection, path, value)?;
    Ok(collection)
}

/// Returns a copy of `collection` with the value at the end of `path` set.
///
/// # Errors
///
/// Fails like [`mut_assoc_in`], naming `assoc_in`.
///
/// # Examples
///
/// ```rust
/// use polycoll::{Value, assoc_in, record};
///
/// let config = record! {};
/// let path = [Value::from("server"), Value::from("port")];
/// let updated = assoc_in(&config, &path, Value::from(8080)).unwrap();
/// assert_eq!(updated, record! { "server" => record! { "port" => 8080 } });
/// assert_eq!(config, record! {});
/// ```
pub fn assoc_in(collection: &Value, path: &[Value], value: Value) -> Result<Value> {
    let mut copy = collection.clone();
    assoc_path_checked("assoc_in", &mut copy, path, value)?;
    Ok(copy)
}

fn assoc_path_checked(
    operation: &'static str,
    collection: &mut Value,
    path: &[Value],
    value: Value,
) -> Result<()> {
    let root = collection.category();
    let filler = match root {
        Category::OrderedMap | Category::OrderedSequence | Category::Record => {
            empty_of_category(root).unwrap_or_default()
        }
        Category::ListVariant | Category::Set | Category::LazySequence | Category::None => {
            return Err(CollectionError::unsupported(
                operation,
                ASSOC_CATEGORIES,
                root,
            ));
        }
    };
    if path.is_empty() {
        return Err(CollectionError::invalid_argument(
            operation,
            "path must not be empty",
        ));
    }
    assoc_path(operation, collection, path, value, &filler)
}

fn assoc_path(
    operation: &'static str,
    target: &mut Value,
    path: &[Value],
    value: Value,
    filler: &Value,
) -> Result<()> {
    match path {
        [] => Ok(()),
        [key] => assoc_into(operation, target, key.clone(), value),
        [key, rest @ ..] => {
            let child = child_mut(operation, target, key, filler)?;
            assoc_path(operation, child, rest, value, filler)
        }
    }
}

fn child<'a>(target: &'a Value, key: &Value) -> Option<&'a Value> {
    match target {
        Value::Map(entries) => entries.get(key),
        Value::Record(entries) => entries.get(&*record_key(key)),
        Value::Vector(elements) => index_of(key).and_then(|index| elements.get(index)),
        _ => None,
    }
}

/// Returns the child under `key`, first replacing it with `filler` when it
/// is missing or falsy.
fn child_mut<'a>(
    operation: &'static str,
    target: &'a mut Value,
    key: &Value,
    filler: &Value,
) -> Result<&'a mut Value> {
    if child(target, key).is_none_or(|existing| !existing.is_truthy()) {
        assoc_into(operation, target, key.clone(), filler.clone())?;
    }
    let category = target.category();
    let found = match target {
        Value::Map(entries) => entries.get_mut(key),
        Value::Record(entries) => entries.get_mut(&*record_key(key)),
        Value::Vector(elements) => index_of(key).and_then(|index| elements.get_mut(index)),
        _ => None,
    };
    found.ok_or_else(|| CollectionError::unsupported(operation, ASSOC_CATEGORIES, category))
}

// =============================================================================
// Update
// =============================================================================

/// Replaces the value under `key` with `function(old)` in place. A missing
/// key passes `Nil` to `function`.
///
/// # Errors
///
/// Fails like [`mut_assoc`](super::mut_assoc), naming `mut_update`.
pub fn mut_update<F>(collection: &mut Value, key: Value, function: F) -> Result<&mut Value>
where
    F: FnOnce(Value) -> Value,
{
    let current = get(collection, &key, Value::Nil);
    assoc_into("mut_update", collection, key, function(current))?;
    Ok(collection)
}

/// Returns a copy of `collection` with the value under `key` replaced by
/// `function(old)`.
///
/// # Errors
///
/// Fails like [`assoc`].
///
/// # Examples
///
/// ```rust
/// use polycoll::{Value, record, update};
///
/// let counts = record! { "hits" => 1 };
/// let bumped = update(&counts, Value::from("hits"), |n| Value::from(n.as_int().unwrap_or(0) + 1)).unwrap();
/// assert_eq!(bumped, record! { "hits" => 2 });
/// ```
pub fn update<F>(collection: &Value, key: Value, function: F) -> Result<Value>
where
    F: FnOnce(Value) -> Value,
{
    let current = get(collection, &key, Value::Nil);
    assoc(collection, key, function(current))
}

/// Returns a copy of `collection` with the value at the end of `path`
/// replaced by `function(old)`.
///
/// # Errors
///
/// Fails like [`assoc_in`].
pub fn update_in<F>(collection: &Value, path: &[Value], function: F) -> Result<Value>
where
    F: FnOnce(Value) -> Value,
{
    let current = get_in(collection, path, Value::Nil);
    assoc_in(collection, path, function(current))
}
