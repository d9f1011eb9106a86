//! Windowing and round-robin operators.

use std::rc::Rc;

use super::transform::Zip;
use super::{SeqIter, lazy};
use crate::error::{CollectionError, Result};
use crate::iterable::{ensure_seqable, iterate};
use crate::value::Value;

// =============================================================================
// Partitioning
// =============================================================================

/// Windows of `size` elements; an incomplete trailing window is dropped.
///
/// # Errors
///
/// Returns [`CollectionError::InvalidArgument`] when `size` is zero and
/// [`CollectionError::NotSeqable`] if `collection` cannot be traversed.
///
/// # Examples
///
/// ```rust
/// use polycoll::{partition, range_to, vec, vector};
///
/// let windows = partition(3, &range_to(7)).unwrap();
/// assert_eq!(vec(&windows).unwrap(), vector![vector![0, 1, 2], vector![3, 4, 5]]);
/// ```
pub fn partition(size: usize, collection: &Value) -> Result<Value> {
    windows("partition", size, size, None, collection)
}

/// Windows of `size` elements starting every `step` elements.
///
/// A step smaller than the size makes windows overlap; a larger step skips
/// elements between windows.
///
/// # Errors
///
/// Returns [`CollectionError::InvalidArgument`] when `size` or `step` is
/// zero and [`CollectionError::NotSeqable`] if `collection` cannot be
/// traversed.
pub fn partition_step(size: usize, step: usize, collection: &Value) -> Result<Value> {
    windows("partition_step", size, step, None, collection)
}

/// Like [`partition_step`], but an incomplete trailing window is filled
/// from `pad`, taking only as many pad elements as it needs.
///
/// If `pad` runs out, the trailing window stays short.
///
/// # Errors
///
/// Returns [`CollectionError::InvalidArgument`] when `size` or `step` is
/// zero and [`CollectionError::NotSeqable`] if `pad` or `collection` cannot
/// be traversed.
///
/// # Examples
///
/// ```rust
/// use polycoll::{partition_pad, range_to, vec, vector};
///
/// let windows = vec(&partition_pad(4, 6, &vector!["a"], &range_to(20)).unwrap()).unwrap();
/// assert_eq!(
///     windows,
///     vector![
///         vector![0, 1, 2, 3],
///         vector![6, 7, 8, 9],
///         vector![12, 13, 14, 15],
///         vector![18, 19, "a"]
///     ]
/// );
/// ```
pub fn partition_pad(size: usize, step: usize, pad: &Value, collection: &Value) -> Result<Value> {
    ensure_seqable("partition_pad", pad)?;
    let pad: Vec<Value> = iterate(pad).take(size).collect();
    windows("partition_pad", size, step, Some(pad), collection)
}

/// Windows of `size` elements; an incomplete trailing window is kept.
///
/// # Errors
///
/// Returns [`CollectionError::InvalidArgument`] when `size` is zero and
/// [`CollectionError::NotSeqable`] if `collection` cannot be traversed.
pub fn partition_all(size: usize, collection: &Value) -> Result<Value> {
    all_windows("partition_all", size, size, collection)
}

/// Like [`partition_step`], keeping incomplete trailing windows.
///
/// # Errors
///
/// Returns [`CollectionError::InvalidArgument`] when `size` or `step` is
/// zero and [`CollectionError::NotSeqable`] if `collection` cannot be
/// traversed.
pub fn partition_all_step(size: usize, step: usize, collection: &Value) -> Result<Value> {
    all_windows("partition_all_step", size, step, collection)
}

fn check_window(operation: &'static str, size: usize, step: usize) -> Result<()> {
    if size == 0 {
        return Err(CollectionError::invalid_argument(
            operation,
            "window size must be positive",
        ));
    }
    if step == 0 {
        return Err(CollectionError::invalid_argument(
            operation,
            "window step must be positive",
        ));
    }
    Ok(())
}

fn windows(
    operation: &'static str,
    size: usize,
    step: usize,
    pad: Option<Vec<Value>>,
    collection: &Value,
) -> Result<Value> {
    check_window(operation, size, step)?;
    ensure_seqable(operation, collection)?;
    let collection = collection.clone();
    let trailing = pad.map_or(Trailing::Drop, |pad| Trailing::Pad(Rc::from(pad)));
    Ok(lazy(move || {
        Windows::new(iterate(&collection), size, step, trailing.clone())
    }))
}

fn all_windows(
    operation: &'static str,
    size: usize,
    step: usize,
    collection: &Value,
) -> Result<Value> {
    check_window(operation, size, step)?;
    ensure_seqable(operation, collection)?;
    let collection = collection.clone();
    Ok(lazy(move || {
        Windows::new(iterate(&collection), size, step, Trailing::Keep)
    }))
}

/// What happens to an incomplete window at the end of the source.
#[derive(Clone)]
enum Trailing {
    Drop,
    Keep,
    Pad(Rc<[Value]>),
}

struct Windows {
    source: SeqIter,
    size: usize,
    step: usize,
    trailing: Trailing,
    window: Vec<Value>,
    // Position of the next element relative to the current window start.
    offset: usize,
    finished: bool,
}

impl Windows {
    fn new(source: SeqIter, size: usize, step: usize, trailing: Trailing) -> Self {
        Self {
            source,
            size,
            step,
            trailing,
            window: Vec::with_capacity(size),
            offset: 0,
            finished: false,
        }
    }

    fn finish(&mut self) -> Option<Value> {
        self.finished = true;
        if self.window.is_empty() {
            return None;
        }
        let mut window = std::mem::take(&mut self.window);
        if window.len() == self.size {
            return Some(Value::Vector(window));
        }
        match &self.trailing {
            Trailing::Keep => Some(Value::Vector(window)),
            Trailing::Pad(pad) if !pad.is_empty() => {
                let missing = self.size - window.len();
                window.extend(pad.iter().take(missing).cloned());
                Some(Value::Vector(window))
            }
            Trailing::Pad(_) | Trailing::Drop => None,
        }
    }
}

impl Iterator for Windows {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        if self.finished {
            return None;
        }
        for element in self.source.by_ref() {
            let mut complete = None;
            if self.offset < self.size {
                self.window.push(element);
                if self.window.len() == self.size {
                    let overlap = if self.step < self.size {
                        self.window[self.step..].to_vec()
                    } else {
                        Vec::with_capacity(self.size)
                    };
                    complete = Some(std::mem::replace(&mut self.window, overlap));
                }
            }
            self.offset += 1;
            if self.offset == self.step {
                self.offset = 0;
            }
            if let Some(window) = complete {
                return Some(Value::Vector(window));
            }
        }
        self.finish()
    }
}

// =============================================================================
// Round Robin
// =============================================================================

/// Takes one element from each collection in turn.
///
/// Stops at the first round in which any collection is exhausted; a
/// partial round is not yielded.
///
/// # Errors
///
/// Returns [`CollectionError::NotSeqable`] if any collection cannot be
/// traversed.
///
/// # Examples
///
/// ```rust
/// use polycoll::{interleave, range, vec, vector};
///
/// let mixed = interleave(&[vector!["a", "b", "c"], range()]).unwrap();
/// assert_eq!(vec(&mixed).unwrap(), vector!["a", 0, "b", 1, "c", 2]);
/// ```
pub fn interleave(collections: &[Value]) -> Result<Value> {
    collections
        .iter()
        .try_for_each(|collection| ensure_seqable("interleave", collection))?;
    let collections: Rc<[Value]> = collections.into();
    Ok(lazy(move || Zip::new(&collections).flatten()))
}

/// Places `separator` between consecutive elements of `collection`.
///
/// # Errors
///
/// Returns [`CollectionError::NotSeqable`] if `collection` cannot be
/// traversed.
///
/// # Examples
///
/// ```rust
/// use polycoll::{Value, interpose, vec, vector};
///
/// let joined = interpose(Value::from(", "), &vector!["one", "two", "three"]).unwrap();
/// assert_eq!(vec(&joined).unwrap(), vector!["one", ", ", "two", ", ", "three"]);
/// ```
pub fn interpose(separator: Value, collection: &Value) -> Result<Value> {
    ensure_seqable("interpose", collection)?;
    let interleaved = interleave(&[super::repeat(separator), collection.clone()])?;
    super::drop(1, &interleaved)
}
