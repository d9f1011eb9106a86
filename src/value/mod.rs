//! The dynamic value type shared by every collection operation.
//!
//! [`Value`] is a closed sum type over the scalars and containers the
//! library works with. Containers own their elements: cloning a container
//! copies it, and the only way to change one in place is through a `mut_*`
//! operator holding a `&mut Value`.
//!
//! # Examples
//!
//! ```rust
//! use polycoll::{Value, vector};
//!
//! let numbers = vector![1, 2, 3];
//! assert_eq!(numbers, Value::from(vec![Value::from(1), Value::from(2), Value::from(3)]));
//! assert!(Value::Nil.is_nil());
//! assert!(!Value::from(0).is_truthy());
//! ```

mod print;

pub use print::pr_str;

use std::collections::VecDeque;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use indexmap::{IndexMap, IndexSet};

use crate::category::{Category, classify};
use crate::lazy::LazySeq;

// =============================================================================
// Storage Type Aliases
// =============================================================================

/// Hash builder used by every map, set and record.
///
/// When the `fxhash` feature is enabled this is `rustc_hash::FxBuildHasher`;
/// otherwise it is the standard library's `RandomState`.
#[cfg(feature = "fxhash")]
pub type ValueHasher = rustc_hash::FxBuildHasher;

/// Hash builder used by every map, set and record.
#[cfg(not(feature = "fxhash"))]
pub type ValueHasher = std::collections::hash_map::RandomState;

/// Insertion-ordered map storage behind [`Value::Map`].
pub type ValueMap = IndexMap<Value, Value, ValueHasher>;

/// Insertion-ordered string-keyed storage behind [`Value::Record`].
pub type RecordMap = IndexMap<Rc<str>, Value, ValueHasher>;

/// Unique-element storage behind [`Value::Set`].
pub type ValueSet = IndexSet<Value, ValueHasher>;

// =============================================================================
// Value
// =============================================================================

/// A runtime value: a scalar, a container, a lazy sequence or a reduced
/// sentinel.
///
/// Equality through `==` is host equality: same variant, same contents,
/// with `Int` and `Float` sharing one numeric domain and lazy sequences
/// compared by identity. Cross-category structural equality lives in
/// [`equals`](crate::equals).
#[derive(Clone, Debug, Default)]
pub enum Value {
    /// The absent value. Iterates as an empty sequence.
    #[default]
    Nil,
    /// A boolean.
    Bool(bool),
    /// An integer.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// An immutable string. Iterates over its characters.
    Str(Rc<str>),
    /// An ordered, index-addressed sequence that grows at the back.
    Vector(Vec<Value>),
    /// An ordered sequence that grows at the front.
    List(VecDeque<Value>),
    /// An insertion-ordered association from any value to any value.
    Map(ValueMap),
    /// An insertion-ordered association from strings to values.
    Record(RecordMap),
    /// A collection of unique values.
    Set(ValueSet),
    /// A restartable lazy sequence.
    Seq(LazySeq),
    /// A value wrapped by [`reduced`](crate::reduced) to stop a reduction.
    Reduced(Box<Value>),
}

impl Value {
    /// Creates a string value.
    pub fn string(text: impl AsRef<str>) -> Self {
        Self::Str(Rc::from(text.as_ref()))
    }

    /// Creates a vector from the given elements.
    pub fn vector(elements: impl IntoIterator<Item = Self>) -> Self {
        Self::Vector(elements.into_iter().collect())
    }

    /// Creates a list holding the given elements in the given order.
    pub fn list(elements: impl IntoIterator<Item = Self>) -> Self {
        Self::List(elements.into_iter().collect())
    }

    /// Creates a set from the given elements, dropping duplicates.
    pub fn set(elements: impl IntoIterator<Item = Self>) -> Self {
        Self::Set(elements.into_iter().collect())
    }

    /// Creates a map from key/value pairs. Later pairs overwrite earlier ones.
    pub fn map(entries: impl IntoIterator<Item = (Self, Self)>) -> Self {
        Self::Map(entries.into_iter().collect())
    }

    /// Creates a record from key/value pairs. Later pairs overwrite earlier ones.
    pub fn record<K: AsRef<str>>(entries: impl IntoIterator<Item = (K, Self)>) -> Self {
        Self::Record(
            entries
                .into_iter()
                .map(|(key, value)| (Rc::from(key.as_ref()), value))
                .collect(),
        )
    }

    /// Returns the container category of this value.
    #[inline]
    pub fn category(&self) -> Category {
        classify(self)
    }

    /// Returns `true` for [`Value::Nil`].
    #[inline]
    pub const fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    /// Returns whether this value counts as true in a test position.
    ///
    /// `Nil`, `false`, zero, `NaN` and the empty string are falsy.
    /// Every container is truthy, including empty ones.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Nil | Self::Bool(false) | Self::Int(0) => false,
            Self::Float(number) => *number != 0.0 && !number.is_nan(),
            Self::Str(text) => !text.is_empty(),
            _ => true,
        }
    }

    /// Returns the integer this value denotes, if any.
    ///
    /// Floats with no fractional part that fit in an `i64` count as integers.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(number) => Some(*number),
            Self::Float(number) => integral(*number),
            _ => None,
        }
    }

    /// Returns the numeric value as a float, if this is a number.
    #[allow(clippy::cast_precision_loss)]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Int(number) => Some(*number as f64),
            Self::Float(number) => Some(*number),
            _ => None,
        }
    }

    /// Returns the string slice if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(text) => Some(text),
            _ => None,
        }
    }

    /// Names the runtime type, for diagnostics.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Nil => "nil",
            Self::Bool(_) => "boolean",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::Vector(_) => "vector",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Record(_) => "record",
            Self::Set(_) => "set",
            Self::Seq(_) => "lazy-seq",
            Self::Reduced(_) => "reduced",
        }
    }
}

/// Converts a float to the integer it denotes exactly, if it has one.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn integral(number: f64) -> Option<i64> {
    // 2^63 is exactly representable; anything at or above it overflows i64.
    const UPPER: f64 = 9_223_372_036_854_775_808.0;
    (number.fract() == 0.0 && number >= -UPPER && number < UPPER).then(|| number as i64)
}

/// Converts a key to the string a record stores it under.
///
/// Non-finite floats use their numeric names and a lazy sequence is keyed
/// by the identity of its source, so building a key never realizes one.
pub(crate) fn record_key(key: &Value) -> Rc<str> {
    match key {
        Value::Str(text) => Rc::clone(text),
        Value::Float(number) if number.is_nan() => Rc::from("NaN"),
        Value::Float(number) if number.is_infinite() => {
            Rc::from(if number.is_sign_positive() { "Infinity" } else { "-Infinity" })
        }
        Value::Seq(sequence) => Rc::from(format!("#<lazy-seq@{:x}>", sequence.identity())),
        other => Rc::from(other.to_string()),
    }
}

// =============================================================================
// Host Equality and Hashing
// =============================================================================

impl PartialEq for Value {
    #[allow(clippy::cast_precision_loss)]
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Nil, Self::Nil) => true,
            (Self::Bool(left), Self::Bool(right)) => left == right,
            (Self::Int(left), Self::Int(right)) => left == right,
            // NaN equals NaN so that values stay usable as map keys.
            (Self::Float(left), Self::Float(right)) => {
                left == right || (left.is_nan() && right.is_nan())
            }
            (Self::Int(integer), Self::Float(float)) | (Self::Float(float), Self::Int(integer)) => {
                integral(*float) == Some(*integer)
            }
            (Self::Str(left), Self::Str(right)) => left == right,
            (Self::Vector(left), Self::Vector(right)) => left == right,
            (Self::List(left), Self::List(right)) => left == right,
            (Self::Map(left), Self::Map(right)) => left == right,
            (Self::Record(left), Self::Record(right)) => left == right,
            (Self::Set(left), Self::Set(right)) => left == right,
            (Self::Seq(left), Self::Seq(right)) => left.ptr_eq(right),
            (Self::Reduced(left), Self::Reduced(right)) => left == right,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Self::Nil => state.write_u8(0),
            Self::Bool(flag) => {
                state.write_u8(1);
                flag.hash(state);
            }
            Self::Int(number) => {
                state.write_u8(2);
                number.hash(state);
            }
            Self::Float(number) => match integral(*number) {
                Some(integer) => {
                    state.write_u8(2);
                    integer.hash(state);
                }
                None if number.is_nan() => {
                    state.write_u8(3);
                    f64::NAN.to_bits().hash(state);
                }
                None => {
                    state.write_u8(3);
                    number.to_bits().hash(state);
                }
            },
            Self::Str(text) => {
                state.write_u8(4);
                text.hash(state);
            }
            Self::Vector(elements) => {
                state.write_u8(5);
                elements.hash(state);
            }
            Self::List(elements) => {
                state.write_u8(6);
                elements.hash(state);
            }
            // Unordered equality: only the size is order independent.
            Self::Map(entries) => {
                state.write_u8(7);
                entries.len().hash(state);
            }
            Self::Record(entries) => {
                state.write_u8(8);
                entries.len().hash(state);
            }
            Self::Set(elements) => {
                state.write_u8(9);
                elements.len().hash(state);
            }
            Self::Seq(sequence) => {
                state.write_u8(10);
                sequence.identity().hash(state);
            }
            Self::Reduced(inner) => {
                state.write_u8(11);
                inner.hash(state);
            }
        }
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Self::Bool(flag)
    }
}

impl From<i32> for Value {
    fn from(number: i32) -> Self {
        Self::Int(i64::from(number))
    }
}

impl From<i64> for Value {
    fn from(number: i64) -> Self {
        Self::Int(number)
    }
}

impl From<u32> for Value {
    fn from(number: u32) -> Self {
        Self::Int(i64::from(number))
    }
}

impl From<usize> for Value {
    fn from(number: usize) -> Self {
        Self::Int(i64::try_from(number).unwrap_or(i64::MAX))
    }
}

impl From<f64> for Value {
    fn from(number: f64) -> Self {
        Self::Float(number)
    }
}

impl From<char> for Value {
    fn from(character: char) -> Self {
        let mut buffer = [0; 4];
        Self::string(character.encode_utf8(&mut buffer))
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::Str(Rc::from(text))
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::Str(Rc::from(text))
    }
}

impl From<Rc<str>> for Value {
    fn from(text: Rc<str>) -> Self {
        Self::Str(text)
    }
}

impl From<Vec<Self>> for Value {
    fn from(elements: Vec<Self>) -> Self {
        Self::Vector(elements)
    }
}

impl From<LazySeq> for Value {
    fn from(sequence: LazySeq) -> Self {
        Self::Seq(sequence)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Nil, Into::into)
    }
}

impl FromIterator<Self> for Value {
    /// Collects into a [`Value::Vector`].
    fn from_iter<I: IntoIterator<Item = Self>>(iter: I) -> Self {
        Self::Vector(iter.into_iter().collect())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        print::write_value(formatter, self)
    }
}
