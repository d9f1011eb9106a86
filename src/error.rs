//! Error types for collection operations.
//!
//! Every failure in this crate is an illegal-argument condition raised
//! synchronously by the operator that detected it. Absence of a key or an
//! index is not an error: lookups return a caller-suppliable not-found value
//! instead.

use std::fmt;

use crate::category::Category;

/// Result alias used by every fallible operation in the crate.
pub type Result<T> = std::result::Result<T, CollectionError>;

/// Represents an illegal argument passed to a collection operation.
///
/// The `operation` field always carries the public name of the operator,
/// including the `mut_` prefix for the in-place variants, so that callers
/// can tell `mut_assoc` failures apart from `assoc` failures.
///
/// # Examples
///
/// ```rust
/// use polycoll::{Category, CollectionError};
///
/// let error = CollectionError::UnsupportedCategory {
///     operation: "mut_assoc",
///     expected: &[Category::OrderedMap, Category::OrderedSequence, Category::Record],
///     found: Category::None,
/// };
/// assert_eq!(
///     error.to_string(),
///     "Illegal argument: mut_assoc expects a Map, Vector or Record as the first argument, found none."
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionError {
    /// The first argument belongs to a category the operator does not handle.
    UnsupportedCategory {
        /// Name of the operator that rejected the argument.
        operation: &'static str,
        /// Categories the operator accepts.
        expected: &'static [Category],
        /// Category of the rejected argument.
        found: Category,
    },
    /// A flat key/value argument list had an odd length.
    OddKeyValueCount {
        /// Name of the operator that rejected the argument list.
        operation: &'static str,
    },
    /// A key cannot address the target container (e.g. a negative index).
    InvalidKey {
        /// Name of the operator that rejected the key.
        operation: &'static str,
        /// Printed form of the rejected key.
        key: String,
    },
    /// A value that cannot be traversed was used as a collection.
    NotSeqable {
        /// Name of the operator that tried to traverse the value.
        operation: &'static str,
        /// Runtime type name of the value.
        found: &'static str,
    },
    /// Any other argument the operator cannot work with.
    InvalidArgument {
        /// Name of the operator that rejected the argument.
        operation: &'static str,
        /// Why the argument was rejected.
        reason: String,
    },
    /// `reduce` without a seed was applied to an empty collection.
    EmptyReduction,
}

impl CollectionError {
    /// Returns the name of the operator that raised this error, if any.
    pub const fn operation(&self) -> Option<&'static str> {
        match self {
            Self::UnsupportedCategory { operation, .. }
            | Self::OddKeyValueCount { operation }
            | Self::InvalidKey { operation, .. }
            | Self::NotSeqable { operation, .. }
            | Self::InvalidArgument { operation, .. } => Some(operation),
            Self::EmptyReduction => Some("reduce"),
        }
    }

    pub(crate) fn unsupported(
        operation: &'static str,
        expected: &'static [Category],
        found: Category,
    ) -> Self {
        tracing::debug!(operation, ?found, "rejected collection category");
        Self::UnsupportedCategory {
            operation,
            expected,
            found,
        }
    }

    pub(crate) fn not_seqable(operation: &'static str, found: &'static str) -> Self {
        tracing::debug!(operation, found, "value is not seqable");
        Self::NotSeqable { operation, found }
    }

    pub(crate) fn invalid_key(operation: &'static str, key: &impl fmt::Display) -> Self {
        let key = key.to_string();
        tracing::debug!(operation, %key, "invalid key");
        Self::InvalidKey { operation, key }
    }

    pub(crate) fn odd_key_value_count(operation: &'static str) -> Self {
        tracing::debug!(operation, "odd key/value argument count");
        Self::OddKeyValueCount { operation }
    }

    pub(crate) fn invalid_argument(operation: &'static str, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        tracing::debug!(operation, %reason, "invalid argument");
        Self::InvalidArgument { operation, reason }
    }
}

fn write_categories(formatter: &mut fmt::Formatter<'_>, expected: &[Category]) -> fmt::Result {
    formatter.write_str("a ")?;
    for (index, category) in expected.iter().enumerate() {
        if index > 0 {
            let separator = if index + 1 == expected.len() { " or " } else { ", " };
            formatter.write_str(separator)?;
        }
        write!(formatter, "{category}")?;
    }
    Ok(())
}

impl fmt::Display for CollectionError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("Illegal argument: ")?;
        match self {
            Self::UnsupportedCategory {
                operation,
                expected,
                found,
            } => {
                write!(formatter, "{operation} expects ")?;
                write_categories(formatter, expected)?;
                write!(formatter, " as the first argument, found {found}.")
            }
            Self::OddKeyValueCount { operation } => write!(
                formatter,
                "{operation} expects an even number of key/value arguments."
            ),
            Self::InvalidKey { operation, key } => {
                write!(formatter, "{operation} cannot use {key} as a key.")
            }
            Self::NotSeqable { operation, found } => {
                write!(formatter, "{operation} cannot iterate over a {found}.")
            }
            Self::InvalidArgument { operation, reason } => {
                write!(formatter, "{operation}: {reason}.")
            }
            Self::EmptyReduction => formatter
                .write_str("reduce of an empty collection with no initial value."),
        }
    }
}

impl std::error::Error for CollectionError {}
