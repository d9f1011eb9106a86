//! Category-dispatched structural update operators.
//!
//! Every operator comes in two forms:
//!
//! - `mut_*` operators change a `&mut Value` in place and hand the same
//!   reference back. They only accept concrete containers of a supported
//!   category; `Nil` and lazy sequences are rejected.
//! - Copying operators take `&Value`, clone it, run the `mut_*` operator on
//!   the clone and return the clone. The argument is never modified.
//!
//! | Operator | Map | Vector | Record | List | Set |
//! |----------|-----|--------|--------|------|-----|
//! | [`get`] | by key | by index | by key | by index | membership |
//! | [`assoc`] | insert | index assignment | insert | - | - |
//! | [`conj`] | merge pairs | append | merge entries | prepend | union |
//! | [`dissoc`] | - | - | remove keys | - | - |
//! | [`disj`] | - | - | - | - | remove elements |
//! | [`contains`] | key | index | key | index | element |
//!
//! # Examples
//!
//! ```rust
//! use polycoll::{Value, conj, list, mut_conj, vector};
//!
//! let numbers = vector![1, 2, 3];
//! assert_eq!(conj(&numbers, &[Value::from(4)]).unwrap(), vector![1, 2, 3, 4]);
//! assert_eq!(numbers, vector![1, 2, 3]);
//!
//! let mut numbers = numbers;
//! mut_conj(&mut numbers, &[Value::from(4)]).unwrap();
//! assert_eq!(numbers, vector![1, 2, 3, 4]);
//!
//! assert_eq!(conj(&list![1, 2, 3], &[Value::from(4)]).unwrap(), list![4, 1, 2, 3]);
//! ```

mod aggregate;
mod path;

pub use aggregate::{frequencies, group_by, replace, select_keys};
pub use path::{assoc_in, get_in, mut_assoc_in, mut_update, update, update_in};

use crate::category::Category;
use crate::error::{CollectionError, Result};
use crate::iterable::traverse;
use crate::lazy::lazy;
use crate::value::{RecordMap, Value, record_key};

/// Categories [`assoc`] and [`mut_assoc`] accept.
pub(crate) const ASSOC_CATEGORIES: &[Category] = &[
    Category::OrderedMap,
    Category::OrderedSequence,
    Category::Record,
];

const CONJ_CATEGORIES: &[Category] = &[
    Category::Set,
    Category::OrderedSequence,
    Category::ListVariant,
    Category::OrderedMap,
    Category::Record,
];

const CONTAINS_CATEGORIES: &[Category] = &[
    Category::OrderedMap,
    Category::OrderedSequence,
    Category::Record,
    Category::ListVariant,
    Category::Set,
];

/// Interprets a key as a sequence index.
fn index_of(key: &Value) -> Option<usize> {
    key.as_int().and_then(|index| usize::try_from(index).ok())
}

// =============================================================================
// Lookup
// =============================================================================

/// Looks `key` up in `collection`, returning `not_found` when it is absent.
///
/// A set returns the key itself when it is a member. Strings are indexed
/// by character. Every other value has no keys.
///
/// # Examples
///
/// ```rust
/// use polycoll::{Value, get, record, set, vector};
///
/// assert_eq!(get(&record! { "a" => 1 }, &Value::from("a"), Value::Nil), Value::from(1));
/// assert_eq!(get(&vector![10, 20], &Value::from(1), Value::Nil), Value::from(20));
/// assert_eq!(get(&set![1, 2], &Value::from(2), Value::Nil), Value::from(2));
/// assert_eq!(get(&Value::Nil, &Value::from("a"), Value::from("none")), Value::from("none"));
/// ```
pub fn get(collection: &Value, key: &Value, not_found: Value) -> Value {
    lookup(collection, key).unwrap_or(not_found)
}

/// Looks `key` up in `collection`, telling an absent key apart from one
/// stored with a `Nil` value.
pub(crate) fn lookup(collection: &Value, key: &Value) -> Option<Value> {
    match collection {
        Value::Map(entries) => entries.get(key).cloned(),
        Value::Record(entries) => entries.get(&*record_key(key)).cloned(),
        Value::Vector(elements) => index_of(key).and_then(|index| elements.get(index)).cloned(),
        Value::List(elements) => index_of(key).and_then(|index| elements.get(index)).cloned(),
        Value::Set(elements) => elements.contains(key).then(|| key.clone()),
        Value::Str(text) => index_of(key)
            .and_then(|index| text.chars().nth(index))
            .map(Value::from),
        Value::Nil
        | Value::Bool(_)
        | Value::Int(_)
        | Value::Float(_)
        | Value::Seq(_)
        | Value::Reduced(_) => None,
    }
}

/// Returns `true` if `key` addresses an entry of `collection`.
///
/// Maps and records test keys, vectors and lists test index bounds and
/// sets test membership. `Nil` contains nothing.
///
/// # Errors
///
/// Returns [`CollectionError::UnsupportedCategory`] for scalars, strings
/// and lazy sequences.
pub fn contains(collection: &Value, key: &Value) -> Result<bool> {
    match collection {
        Value::Nil => Ok(false),
        Value::Map(entries) => Ok(entries.contains_key(key)),
        Value::Record(entries) => Ok(entries.contains_key(&*record_key(key))),
        Value::Vector(elements) => Ok(index_of(key).is_some_and(|index| index < elements.len())),
        Value::List(elements) => Ok(index_of(key).is_some_and(|index| index < elements.len())),
        Value::Set(elements) => Ok(elements.contains(key)),
        Value::Bool(_)
        | Value::Int(_)
        | Value::Float(_)
        | Value::Str(_)
        | Value::Seq(_)
        | Value::Reduced(_) => Err(CollectionError::unsupported(
            "contains",
            CONTAINS_CATEGORIES,
            collection.category(),
        )),
    }
}

// =============================================================================
// Assoc
// =============================================================================

/// Sets one key in place, naming `operation` in errors.
pub(crate) fn assoc_into(
    operation: &'static str,
    collection: &mut Value,
    key: Value,
    value: Value,
) -> Result<()> {
    match collection {
        Value::Map(entries) => {
            entries.insert(key, value);
        }
        Value::Record(entries) => {
            entries.insert(record_key(&key), value);
        }
        Value::Vector(elements) => {
            let index =
                index_of(&key).ok_or_else(|| CollectionError::invalid_key(operation, &key))?;
            if let Some(slot) = elements.get_mut(index) {
                *slot = value;
            } else {
                // Unallocatable growth is reported as an invalid key.
                index
                    .checked_add(1)
                    .and_then(|wanted| elements.try_reserve(wanted - elements.len()).ok())
                    .ok_or_else(|| CollectionError::invalid_key(operation, &key))?;
                elements.resize(index, Value::Nil);
                elements.push(value);
            }
        }
        Value::List(_)
        | Value::Set(_)
        | Value::Seq(_)
        | Value::Nil
        | Value::Bool(_)
        | Value::Int(_)
        | Value::Float(_)
        | Value::Str(_)
        | Value::Reduced(_) => {
            return Err(CollectionError::unsupported(
                operation,
                ASSOC_CATEGORIES,
                collection.category(),
            ));
        }
    }
    Ok(())
}

fn ensure_assoc(operation: &'static str, collection: &Value) -> Result<()> {
    match collection.category() {
        Category::OrderedMap | Category::OrderedSequence | Category::Record => Ok(()),
        category @ (Category::ListVariant
        | Category::Set
        | Category::LazySequence
        | Category::None) => Err(CollectionError::unsupported(
            operation,
            ASSOC_CATEGORIES,
            category,
        )),
    }
}

fn assoc_pairs(operation: &'static str, collection: &mut Value, pairs: &[Value]) -> Result<()> {
    if pairs.len() % 2 != 0 {
        return Err(CollectionError::odd_key_value_count(operation));
    }
    ensure_assoc(operation, collection)?;
    for pair in pairs.chunks_exact(2) {
        assoc_into(operation, collection, pair[0].clone(), pair[1].clone())?;
    }
    Ok(())
}

/// Associates `key` with `value` in place.
///
/// Vectors take integer indices: the length appends and a larger index
/// pads the gap with `Nil`.
///
/// # Errors
///
/// Returns [`CollectionError::UnsupportedCategory`] unless `collection` is a
/// map, vector or record, and [`CollectionError::InvalidKey`] for a
/// negative or non-integer vector index.
///
/// # Examples
///
/// ```rust
/// use polycoll::{CollectionError, Value, mut_assoc, vector};
///
/// let mut numbers = vector![1, 2];
/// mut_assoc(&mut numbers, Value::from(3), Value::from(4)).unwrap();
/// assert_eq!(numbers, vector![1, 2, Value::Nil, 4]);
///
/// let error = mut_assoc(&mut Value::from(""), Value::from(0), Value::from("hi")).unwrap_err();
/// assert_eq!(error.operation(), Some("mut_assoc"));
/// ```
pub fn mut_assoc(collection: &mut Value, key: Value, value: Value) -> Result<&mut Value> {
    assoc_into("mut_assoc", collection, key, value)?;
    Ok(collection)
}

/// Associates every `[key, value]` pair of the flat `pairs` slice in place.
///
/// # Errors
///
/// Returns [`CollectionError::OddKeyValueCount`] when `pairs` has an odd
/// length, otherwise fails like [`mut_assoc`].
pub fn mut_assoc_many<'a>(collection: &'a mut Value, pairs: &[Value]) -> Result<&'a mut Value> {
    assoc_pairs("mut_assoc_many", collection, pairs)?;
    Ok(collection)
}

/// Returns a copy of `collection` with `key` associated to `value`.
///
/// `Nil` is treated as an empty record.
///
/// # Errors
///
/// Fails like [`mut_assoc`], naming `assoc`.
///
/// # Examples
///
/// ```rust
/// use polycoll::{Value, assoc, record};
///
/// let person = record! { "name" => "Ada" };
/// let updated = assoc(&person, Value::from("born"), Value::from(1815)).unwrap();
/// assert_eq!(updated, record! { "name" => "Ada", "born" => 1815 });
/// assert_eq!(person, record! { "name" => "Ada" });
///
/// assert_eq!(assoc(&Value::Nil, Value::from("a"), Value::from(1)).unwrap(), record! { "a" => 1 });
/// ```
pub fn assoc(collection: &Value, key: Value, value: Value) -> Result<Value> {
    let mut copy = copy_or_record(collection);
    assoc_into("assoc", &mut copy, key, value)?;
    Ok(copy)
}

/// Copying form of [`mut_assoc_many`].
///
/// # Errors
///
/// Fails like [`mut_assoc_many`], naming `assoc_many`.
pub fn assoc_many(collection: &Value, pairs: &[Value]) -> Result<Value> {
    let mut copy = copy_or_record(collection);
    assoc_pairs("assoc_many", &mut copy, pairs)?;
    Ok(copy)
}

fn copy_or_record(collection: &Value) -> Value {
    if collection.is_nil() {
        Value::Record(RecordMap::default())
    } else {
        collection.clone()
    }
}

// =============================================================================
// Conj
// =============================================================================

/// Splits an entry value into its key and value.
fn entry_of(entry: &Value) -> (Value, Value) {
    (
        get(entry, &Value::Int(0), Value::Nil),
        get(entry, &Value::Int(1), Value::Nil),
    )
}

fn conj_into(operation: &'static str, collection: &mut Value, items: &[Value]) -> Result<()> {
    match collection {
        Value::Set(elements) => elements.extend(items.iter().cloned()),
        Value::Vector(elements) => elements.extend_from_slice(items),
        Value::List(elements) => {
            for item in items {
                elements.push_front(item.clone());
            }
        }
        Value::Map(entries) => {
            for item in items {
                match item {
                    Value::Vector(_) => {
                        let (key, value) = entry_of(item);
                        entries.insert(key, value);
                    }
                    Value::Map(other) => entries.extend(other.clone()),
                    other => {
                        for entry in traverse(operation, other)? {
                            let (key, value) = entry_of(&entry);
                            entries.insert(key, value);
                        }
                    }
                }
            }
        }
        Value::Record(entries) => {
            for item in items {
                match item {
                    Value::Vector(_) => {
                        let (key, value) = entry_of(item);
                        entries.insert(record_key(&key), value);
                    }
                    Value::Record(other) => entries.extend(other.clone()),
                    other => {
                        for entry in traverse(operation, other)? {
                            let (key, value) = entry_of(&entry);
                            entries.insert(record_key(&key), value);
                        }
                    }
                }
            }
        }
        Value::Seq(_)
        | Value::Nil
        | Value::Bool(_)
        | Value::Int(_)
        | Value::Float(_)
        | Value::Str(_)
        | Value::Reduced(_) => {
            return Err(CollectionError::unsupported(
                operation,
                CONJ_CATEGORIES,
                collection.category(),
            ));
        }
    }
    Ok(())
}

/// Adds `items` to `collection` in place, the way its category grows.
///
/// Vectors append, lists prepend each item in turn (so the last item ends
/// up first), sets take the union, and maps and records merge either
/// `[key, value]` vectors or the entries of other maps and records.
///
/// # Errors
///
/// Returns [`CollectionError::UnsupportedCategory`] for `Nil`, lazy
/// sequences and scalars, and [`CollectionError::NotSeqable`] when an item
/// merged into a map or record cannot be traversed.
pub fn mut_conj<'a>(collection: &'a mut Value, items: &[Value]) -> Result<&'a mut Value> {
    conj_into("mut_conj", collection, items)?;
    Ok(collection)
}

/// Returns a copy of `collection` with `items` added.
///
/// `Nil` produces a vector of the items. A lazy sequence produces a new
/// lazy sequence yielding the items, then the original elements.
///
/// # Errors
///
/// Fails like [`mut_conj`] for scalars, naming `conj`.
pub fn conj(collection: &Value, items: &[Value]) -> Result<Value> {
    match collection {
        Value::Nil => Ok(Value::Vector(items.to_vec())),
        Value::Seq(sequence) => {
            let items = items.to_vec();
            let sequence = sequence.clone();
            Ok(lazy(move || items.clone().into_iter().chain(sequence.iter())))
        }
        other => {
            let mut copy = other.clone();
            conj_into("conj", &mut copy, items)?;
            Ok(copy)
        }
    }
}

/// Pours every element of `from` into `to` with [`conj`].
///
/// Pouring into a list reverses the element order, because each element
/// is prepended in turn.
///
/// # Errors
///
/// Returns [`CollectionError::NotSeqable`] if `from` cannot be traversed and
/// fails like [`conj`] otherwise.
///
/// # Examples
///
/// ```rust
/// use polycoll::{Value, into, list, record, vector};
///
/// let pairs = vector![vector!["a", 1], vector!["b", 2]];
/// assert_eq!(into(&record! {}, &pairs).unwrap(), record! { "a" => 1, "b" => 2 });
/// assert_eq!(into(&list![], &vector![1, 2, 3]).unwrap(), list![3, 2, 1]);
/// ```
pub fn into(to: &Value, from: &Value) -> Result<Value> {
    let items: Vec<Value> = traverse("into", from)?.collect();
    conj(to, &items)
}

/// Merges `values` into a copy of the first one with [`mut_conj`].
///
/// Records and maps overwrite keys, later values winning. On a vector each
/// further value is appended as one element: a vector argument is nested,
/// not spliced. With no values, or a `Nil` first value, the result starts
/// from an empty record.
///
/// # Errors
///
/// Fails like [`mut_conj`], naming `merge`.
///
/// # Examples
///
/// ```rust
/// use polycoll::{Value, merge, record, vector};
///
/// let merged = merge(&[record! { "a" => 1, "b" => 2 }, record! { "b" => 3 }]).unwrap();
/// assert_eq!(merged, record! { "a" => 1, "b" => 3 });
///
/// let nested = merge(&[vector!["a", "b"], vector!["c", "d"]]).unwrap();
/// assert_eq!(nested, vector!["a", "b", vector!["c", "d"]]);
/// ```
pub fn merge(values: &[Value]) -> Result<Value> {
    let Some((first, rest)) = values.split_first() else {
        return Ok(Value::Record(RecordMap::default()));
    };
    let mut merged = copy_or_record(first);
    conj_into("merge", &mut merged, rest)?;
    Ok(merged)
}

// =============================================================================
// Dissoc and Disj
// =============================================================================

fn dissoc_into(operation: &'static str, collection: &mut Value, keys: &[Value]) -> Result<()> {
    match collection {
        Value::Record(entries) => {
            for key in keys {
                entries.shift_remove(&*record_key(key));
            }
            Ok(())
        }
        Value::Map(_)
        | Value::Vector(_)
        | Value::List(_)
        | Value::Set(_)
        | Value::Seq(_)
        | Value::Nil
        | Value::Bool(_)
        | Value::Int(_)
        | Value::Float(_)
        | Value::Str(_)
        | Value::Reduced(_) => Err(CollectionError::unsupported(
            operation,
            &[Category::Record],
            collection.category(),
        )),
    }
}

/// Removes `keys` from a record in place.
///
/// # Errors
///
/// Returns [`CollectionError::UnsupportedCategory`] unless `collection` is
/// a record.
pub fn mut_dissoc<'a>(collection: &'a mut Value, keys: &[Value]) -> Result<&'a mut Value> {
    dissoc_into("mut_dissoc", collection, keys)?;
    Ok(collection)
}

/// Returns a copy of a record without `keys`. `Nil` is treated as an empty
/// record.
///
/// # Errors
///
/// Fails like [`mut_dissoc`], naming `dissoc`.
pub fn dissoc(collection: &Value, keys: &[Value]) -> Result<Value> {
    let mut copy = copy_or_record(collection);
    dissoc_into("dissoc", &mut copy, keys)?;
    Ok(copy)
}

fn disj_into(operation: &'static str, collection: &mut Value, elements: &[Value]) -> Result<()> {
    match collection {
        Value::Set(members) => {
            for element in elements {
                members.shift_remove(element);
            }
            Ok(())
        }
        Value::Map(_)
        | Value::Vector(_)
        | Value::List(_)
        | Value::Record(_)
        | Value::Seq(_)
        | Value::Nil
        | Value::Bool(_)
        | Value::Int(_)
        | Value::Float(_)
        | Value::Str(_)
        | Value::Reduced(_) => Err(CollectionError::unsupported(
            operation,
            &[Category::Set],
            collection.category(),
        )),
    }
}

/// Removes `elements` from a set in place.
///
/// # Errors
///
/// Returns [`CollectionError::UnsupportedCategory`] unless `collection` is
/// a set.
pub fn mut_disj<'a>(collection: &'a mut Value, elements: &[Value]) -> Result<&'a mut Value> {
    disj_into("mut_disj", collection, elements)?;
    Ok(collection)
}

/// Returns a copy of a set without `elements`.
///
/// # Errors
///
/// Fails like [`mut_disj`], naming `disj`.
pub fn disj(collection: &Value, elements: &[Value]) -> Result<Value> {
    let mut copy = collection.clone();
    disj_into("disj", &mut copy, elements)?;
    Ok(copy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn ints(values: &[i64]) -> Value {
        Value::vector(values.iter().copied().map(Value::from))
    }

    #[rstest]
    fn test_get_returns_stored_nil_rather_than_not_found() {
        let record = Value::record([("a", Value::Nil)]);
        assert!(get(&record, &Value::from("a"), Value::from("missing")).is_nil());
        assert_eq!(
            get(&record, &Value::from("b"), Value::from("missing")),
            Value::from("missing")
        );
    }

    #[rstest]
    fn test_get_on_string_indexes_characters() {
        assert_eq!(get(&Value::from("abc"), &Value::from(1), Value::Nil), Value::from("b"));
    }

    #[rstest]
    fn test_record_coerces_keys() {
        let record = assoc(&Value::Nil, Value::from(1), Value::from("one")).unwrap();
        assert_eq!(get(&record, &Value::from("1"), Value::Nil), Value::from("one"));
        assert!(contains(&record, &Value::from(1)).unwrap());
    }

    #[rstest]
    #[case(Value::from(-1))]
    #[case(Value::from(1.5))]
    #[case(Value::from("x"))]
    fn test_vector_rejects_invalid_indices(#[case] key: Value) {
        let error = assoc(&ints(&[1]), key, Value::Nil).unwrap_err();
        assert!(matches!(error, CollectionError::InvalidKey { operation: "assoc", .. }));
    }

    #[rstest]
    #[case(Value::from(i64::MAX))]
    #[case(Value::from(1_i64 << 60))]
    fn test_vector_rejects_unallocatable_indices(#[case] key: Value) {
        let error = assoc(&ints(&[]), key.clone(), Value::from(1)).unwrap_err();
        assert!(matches!(error, CollectionError::InvalidKey { operation: "assoc", .. }));

        let mut target = ints(&[1]);
        let error = mut_assoc(&mut target, key, Value::from(1)).unwrap_err();
        assert!(matches!(error, CollectionError::InvalidKey { operation: "mut_assoc", .. }));
        assert_eq!(target, ints(&[1]));
    }

    #[rstest]
    fn test_assoc_on_list_is_rejected() {
        let error = assoc(&Value::list([]), Value::from(0), Value::Nil).unwrap_err();
        assert_eq!(
            error,
            CollectionError::UnsupportedCategory {
                operation: "assoc",
                expected: ASSOC_CATEGORIES,
                found: Category::ListVariant,
            }
        );
    }

    #[rstest]
    fn test_assoc_many_rejects_odd_pairs() {
        let error = assoc_many(&Value::map([]), &[Value::from(1)]).unwrap_err();
        assert_eq!(error, CollectionError::OddKeyValueCount { operation: "assoc_many" });

        let mut map = Value::map([]);
        mut_assoc_many(&mut map, &[Value::from(1), Value::from(2), Value::from(3), Value::from(4)])
            .unwrap();
        assert_eq!(
            map,
            Value::map([(Value::from(1), Value::from(2)), (Value::from(3), Value::from(4))])
        );
    }

    #[rstest]
    fn test_assoc_many_checks_category_without_pairs() {
        assert!(assoc_many(&Value::set([]), &[]).is_err());
    }

    #[rstest]
    fn test_conj_list_prepends_each_item() {
        let list = Value::list([Value::from(1)]);
        let grown = conj(&list, &[Value::from(2), Value::from(3)]).unwrap();
        assert_eq!(grown, Value::list([Value::from(3), Value::from(2), Value::from(1)]));
    }

    #[rstest]
    fn test_conj_map_accepts_pairs_and_maps() {
        let map = Value::map([]);
        let grown = conj(
            &map,
            &[
                ints(&[1, 2]),
                Value::map([(Value::from(3), Value::from(4))]),
                Value::record([("five", Value::from(6))]),
            ],
        )
        .unwrap();
        assert_eq!(
            grown,
            Value::map([
                (Value::from(1), Value::from(2)),
                (Value::from(3), Value::from(4)),
                (Value::from("five"), Value::from(6)),
            ])
        );
    }

    #[rstest]
    fn test_conj_record_stringifies_map_keys() {
        let grown = conj(
            &Value::record::<&str>([]),
            &[Value::map([(Value::from(1), Value::from("one"))])],
        )
        .unwrap();
        assert_eq!(grown, Value::record([("1", Value::from("one"))]));
    }

    #[rstest]
    fn test_conj_on_nil_and_lazy_sequences() {
        assert_eq!(conj(&Value::Nil, &[Value::from(1)]).unwrap(), ints(&[1]));

        let sequence = conj(&crate::lazy::range_to(2), &[Value::from(8), Value::from(9)]).unwrap();
        assert_eq!(crate::access::vec(&sequence).unwrap(), ints(&[8, 9, 0, 1]));
    }

    #[rstest]
    fn test_mut_conj_rejects_nil_and_lazy_sequences() {
        let mut nil = Value::Nil;
        let error = mut_conj(&mut nil, &[Value::from(1)]).unwrap_err();
        assert_eq!(error.operation(), Some("mut_conj"));

        let mut sequence = crate::lazy::range();
        assert!(mut_conj(&mut sequence, &[Value::from(1)]).is_err());
    }

    #[rstest]
    fn test_contains() {
        assert!(contains(&ints(&[5, 6]), &Value::from(1)).unwrap());
        assert!(!contains(&ints(&[5, 6]), &Value::from(2)).unwrap());
        assert!(contains(&Value::set([Value::from("x")]), &Value::from("x")).unwrap());
        assert!(!contains(&Value::Nil, &Value::from("x")).unwrap());
        assert!(contains(&Value::from("abc"), &Value::from(0)).is_err());
    }

    #[rstest]
    fn test_dissoc_and_disj_preserve_order() {
        let record = Value::record([("a", Value::from(1)), ("b", Value::from(2)), ("c", Value::from(3))]);
        let trimmed = dissoc(&record, &[Value::from("b")]).unwrap();
        assert_eq!(
            crate::access::keys(&trimmed).unwrap(),
            Value::vector([Value::from("a"), Value::from("c")])
        );

        let set = Value::set([Value::from(1), Value::from(2), Value::from(3)]);
        let mut copy = set.clone();
        mut_disj(&mut copy, &[Value::from(1)]).unwrap();
        assert_eq!(copy, Value::set([Value::from(2), Value::from(3)]));
        assert!(disj(&Value::Nil, &[]).is_err());
        assert!(mut_dissoc(&mut set.clone(), &[]).is_err());
    }

    #[rstest]
    fn test_merge_quirks() {
        assert_eq!(merge(&[]).unwrap(), Value::record::<&str>([]));
        let flat = merge(&[
            Value::vector([Value::from("a"), Value::from("b")]),
            Value::from("c"),
            Value::from("d"),
        ])
        .unwrap();
        assert_eq!(
            flat,
            Value::vector([Value::from("a"), Value::from("b"), Value::from("c"), Value::from("d")])
        );
        let from_nil = merge(&[Value::Nil, Value::record([("a", Value::from(1))])]).unwrap();
        assert_eq!(from_nil, Value::record([("a", Value::from(1))]));
    }
}
