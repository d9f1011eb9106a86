//! Literal macros for building values.
//!
//! Each element goes through `Value::from`, so plain Rust literals and
//! existing values can be mixed freely.

/// Builds a [`Value::Vector`](crate::Value::Vector).
///
/// # Examples
///
/// ```
/// use polycoll::{Value, vector};
///
/// let mixed = vector![1, "two", 3.5, Value::Nil, vector![4]];
/// assert_eq!(polycoll::count(&mixed).unwrap(), 5);
/// assert_eq!(vector![], Value::Vector(Vec::new()));
/// ```
#[macro_export]
macro_rules! vector {
    () => {
        $crate::Value::Vector(::std::vec::Vec::new())
    };

    ($($element:expr),+ $(,)?) => {
        $crate::Value::Vector(::std::vec![$($crate::Value::from($element)),+])
    };
}

/// Builds a [`Value::List`](crate::Value::List) holding the elements in the
/// given order.
///
/// # Examples
///
/// ```
/// use polycoll::{first, list};
///
/// assert_eq!(first(&list![1, 2, 3]).unwrap(), polycoll::Value::from(1));
/// ```
#[macro_export]
macro_rules! list {
    () => {
        $crate::Value::List(::std::collections::VecDeque::new())
    };

    ($($element:expr),+ $(,)?) => {
        $crate::Value::list([$($crate::Value::from($element)),+])
    };
}

/// Builds a [`Value::Set`](crate::Value::Set), dropping duplicates.
///
/// # Examples
///
/// ```
/// use polycoll::{count, set};
///
/// assert_eq!(count(&set![1, 2, 1]).unwrap(), 2);
/// ```
#[macro_export]
macro_rules! set {
    () => {
        $crate::Value::Set(::std::default::Default::default())
    };

    ($($element:expr),+ $(,)?) => {
        $crate::Value::set([$($crate::Value::from($element)),+])
    };
}

/// Builds a [`Value::Map`](crate::Value::Map) from `key => value` pairs.
///
/// # Examples
///
/// ```
/// use polycoll::{Value, get, hash_map};
///
/// let squares = hash_map! { 2 => 4, 3 => 9 };
/// assert_eq!(get(&squares, &Value::from(3), Value::Nil), Value::from(9));
/// ```
#[macro_export]
macro_rules! hash_map {
    () => {
        $crate::Value::Map(::std::default::Default::default())
    };

    ($($key:expr => $value:expr),+ $(,)?) => {
        $crate::Value::map([$(($crate::Value::from($key), $crate::Value::from($value))),+])
    };
}

/// Builds a [`Value::Record`](crate::Value::Record) from `"key" => value`
/// pairs.
///
/// # Examples
///
/// ```
/// use polycoll::{Value, get, record};
///
/// let point = record! { "x" => 1, "y" => 2 };
/// assert_eq!(get(&point, &Value::from("y"), Value::Nil), Value::from(2));
/// ```
#[macro_export]
macro_rules! record {
    () => {
        $crate::Value::Record(::std::default::Default::default())
    };

    ($($key:expr => $value:expr),+ $(,)?) => {
        $crate::Value::record([$(($key, $crate::Value::from($value))),+])
    };
}
