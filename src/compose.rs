//! Small function combinators used with the collection operators.

use crate::value::Value;

/// Returns its argument unchanged.
#[inline]
pub const fn identity(value: Value) -> Value {
    value
}

/// Returns a function that ignores its argument and always returns `value`.
///
/// # Examples
///
/// ```rust
/// use polycoll::{Value, constantly, mapv, vector};
///
/// assert_eq!(mapv(constantly(Value::from("x")), &vector![1, 2]).unwrap(), vector!["x", "x"]);
/// ```
pub fn constantly(value: Value) -> impl Fn(Value) -> Value + Clone {
    move |_: Value| value.clone()
}

/// Negates a predicate.
pub fn complement<P>(predicate: P) -> impl Fn(&Value) -> bool
where
    P: Fn(&Value) -> bool,
{
    move |value: &Value| !predicate(value)
}

/// Combines predicates into one that holds when every predicate holds.
///
/// Evaluation stops at the first predicate that fails. With no predicates
/// the result is always `true`. To test several values at once, pass the
/// combined predicate to [`every`](crate::every).
///
/// # Examples
///
/// ```rust
/// use polycoll::{Value, every, every_pred, vector};
///
/// let checks: Vec<Box<dyn Fn(&Value) -> bool>> = vec![
///     Box::new(|x| x.as_int().is_some()),
///     Box::new(|x| x.as_int().is_some_and(|n| n % 2 == 1)),
/// ];
/// let odd_int = every_pred(checks);
/// assert!(every(&odd_int, &vector![3, 9, 1]).unwrap());
/// assert!(!odd_int(&Value::from(4)));
/// ```
pub fn every_pred<P>(predicates: impl IntoIterator<Item = P>) -> impl Fn(&Value) -> bool
where
    P: Fn(&Value) -> bool,
{
    let predicates: Vec<P> = predicates.into_iter().collect();
    move |value: &Value| predicates.iter().all(|predicate| predicate(value))
}

/// Wraps `function` so that a `Nil` argument is replaced by `default`.
///
/// # Examples
///
/// ```rust
/// use polycoll::{Value, fnil};
///
/// let increment = fnil(|n| Value::from(n.as_int().unwrap_or(0) + 1), Value::from(10));
/// assert_eq!(increment(Value::Nil), Value::from(11));
/// assert_eq!(increment(Value::from(1)), Value::from(2));
/// ```
pub fn fnil<F>(function: F, default: Value) -> impl Fn(Value) -> Value
where
    F: Fn(Value) -> Value,
{
    move |argument: Value| {
        if argument.is_nil() {
            function(default.clone())
        } else {
            function(argument)
        }
    }
}
