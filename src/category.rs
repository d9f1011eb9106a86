//! Container categories and the classification of runtime values.
//!
//! Every dispatched operator starts by classifying its first argument into
//! one [`Category`]. The enum is closed and every dispatcher matches it
//! exhaustively, so a new category cannot be added without revisiting each
//! operator.

use std::fmt;

use crate::lazy::LazySeq;
use crate::value::Value;

/// The container category of a runtime value.
///
/// # Examples
///
/// ```rust
/// use polycoll::{Category, Value, classify, list, vector};
///
/// assert_eq!(classify(&vector![1, 2]), Category::OrderedSequence);
/// assert_eq!(classify(&list![1, 2]), Category::ListVariant);
/// assert_eq!(classify(&Value::from("text")), Category::None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Insertion-ordered association with keys of any type.
    OrderedMap,
    /// Index-addressed sequence that grows at the back.
    OrderedSequence,
    /// String-keyed association.
    Record,
    /// Sequence that grows at the front.
    ListVariant,
    /// Collection of unique values.
    Set,
    /// Restartable lazy producer.
    LazySequence,
    /// Anything that is not a container: `Nil`, scalars and strings.
    None,
}

impl Category {
    /// Every container category, in classification priority order.
    pub const CONTAINERS: [Self; 6] = [
        Self::OrderedMap,
        Self::Set,
        Self::ListVariant,
        Self::OrderedSequence,
        Self::LazySequence,
        Self::Record,
    ];

    /// Short name used in diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            Self::OrderedMap => "Map",
            Self::OrderedSequence => "Vector",
            Self::Record => "Record",
            Self::ListVariant => "List",
            Self::Set => "Set",
            Self::LazySequence => "LazySeq",
            Self::None => "none",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

/// Classifies a value into its container category.
///
/// Classification looks only at the concrete variant, so it is total and
/// stable: the same value always yields the same category.
pub const fn classify(value: &Value) -> Category {
    match value {
        Value::Map(_) => Category::OrderedMap,
        Value::Set(_) => Category::Set,
        Value::List(_) => Category::ListVariant,
        Value::Vector(_) => Category::OrderedSequence,
        Value::Seq(_) => Category::LazySequence,
        Value::Record(_) => Category::Record,
        Value::Nil
        | Value::Bool(_)
        | Value::Int(_)
        | Value::Float(_)
        | Value::Str(_)
        | Value::Reduced(_) => Category::None,
    }
}

/// Builds an empty container of the given category.
///
/// Returns `None` for [`Category::None`], which has no empty instance.
///
/// # Examples
///
/// ```rust
/// use polycoll::{Category, classify, empty_of_category};
///
/// let empty = empty_of_category(Category::Set).unwrap();
/// assert_eq!(classify(&empty), Category::Set);
/// assert!(empty_of_category(Category::None).is_none());
/// ```
pub fn empty_of_category(category: Category) -> Option<Value> {
    match category {
        Category::OrderedMap => Some(Value::Map(Default::default())),
        Category::OrderedSequence => Some(Value::Vector(Vec::new())),
        Category::Record => Some(Value::Record(Default::default())),
        Category::ListVariant => Some(Value::List(Default::default())),
        Category::Set => Some(Value::Set(Default::default())),
        Category::LazySequence => Some(Value::Seq(LazySeq::empty())),
        Category::None => None,
    }
}

/// Returns an empty container of the same category as `value`, or `Nil`.
pub fn empty(value: &Value) -> Value {
    empty_of_category(classify(value)).unwrap_or_default()
}

/// Returns `true` if `value` is an ordered map.
pub const fn is_map(value: &Value) -> bool {
    matches!(classify(value), Category::OrderedMap)
}

/// Returns `true` if `value` is a vector.
pub const fn is_vector(value: &Value) -> bool {
    matches!(classify(value), Category::OrderedSequence)
}

/// Returns `true` if `value` is a record.
pub const fn is_record(value: &Value) -> bool {
    matches!(classify(value), Category::Record)
}

/// Returns `true` if `value` is a list.
pub const fn is_list(value: &Value) -> bool {
    matches!(classify(value), Category::ListVariant)
}

/// Returns `true` if `value` is a set.
pub const fn is_set(value: &Value) -> bool {
    matches!(classify(value), Category::Set)
}

/// Returns `true` if `value` is a lazy sequence.
pub const fn is_lazy_seq(value: &Value) -> bool {
    matches!(classify(value), Category::LazySequence)
}

/// Returns `true` if `value` is a string.
pub const fn is_string(value: &Value) -> bool {
    matches!(value, Value::Str(_))
}

/// Returns `true` if `value` is an integer or a float.
pub const fn is_number(value: &Value) -> bool {
    matches!(value, Value::Int(_) | Value::Float(_))
}

/// Returns `true` if `value` is `Nil`.
pub const fn is_nil(value: &Value) -> bool {
    value.is_nil()
}

/// Returns `true` if `value` is anything but `Nil`.
pub const fn is_some(value: &Value) -> bool {
    !value.is_nil()
}
