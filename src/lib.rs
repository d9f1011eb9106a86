//! # polycoll
//!
//! Clojure-flavoured collection functions over one dynamic [`Value`] type.
//!
//! ## Overview
//!
//! Every collection operator accepts any [`Value`] and dispatches on its
//! container [`Category`]:
//!
//! - **Category dispatch**: [`classify`] sorts values into maps, vectors,
//!   records, lists, sets, lazy sequences and everything else.
//! - **Nil-punning**: [`to_iterable`] and [`seq`] treat `Nil` as an empty
//!   collection and let records be traversed as `[key, value]` pairs.
//! - **Lazy sequences**: [`LazySeq`] is restartable. Every traversal starts
//!   from scratch, so a sequence can be consumed any number of times and
//!   may be infinite.
//! - **Structural updates**: [`assoc`], [`conj`], [`dissoc`] and friends
//!   return updated copies, while their `mut_*` forms update in place.
//! - **Deep equality**: [`equals`] compares nested data across categories.
//! - **Reduction**: [`reduce`] with early termination through [`reduced`].
//! - **Atom**: a shared single-threaded mutable cell.
//!
//! ## Feature Flags
//!
//! - `serde`: `serde::Serialize` for [`Value`]
//! - `fxhash`: use `rustc-hash` for map, set and record storage
//! - `full`: enable all features
//!
//! ## Example
//!
//! ```rust
//! use polycoll::prelude::*;
//! use polycoll::{filter, map, range, take, vec};
//!
//! let squares = map(|x| Value::from(x.as_int().unwrap_or(0).pow(2)), &range()).unwrap();
//! let odd_squares = filter(|x| x.as_int().is_some_and(|n| n % 2 == 1), &squares).unwrap();
//! let first_three = take(3, &odd_squares).unwrap();
//!
//! assert_eq!(vec(&first_three).unwrap(), vector![1, 9, 25]);
//! // Restartable: traversing again yields the same elements.
//! assert!(equals(&first_three, &vector![1, 9, 25]));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports the value types, the literal macros and [`equals`].
///
/// # Usage
///
/// ```rust
/// use polycoll::prelude::*;
///
/// assert!(equals(&list![1, 2], &vector![1, 2]));
/// ```
pub mod prelude {
    pub use crate::atom::Atom;
    pub use crate::category::Category;
    pub use crate::equality::equals;
    pub use crate::error::CollectionError;
    pub use crate::lazy::{LazySeq, Restartable, SeqIter};
    pub use crate::value::Value;
    pub use crate::{hash_map, list, record, set, vector};
}

mod macros;

pub mod access;
pub mod atom;
pub mod category;
pub mod compose;
pub mod equality;
pub mod error;
pub mod iterable;
pub mod lazy;
pub mod reduce;
pub mod structural;
pub mod value;

pub use access::{
    butlast, compare, count, every, ffirst, filterv, first, is_distinct, keys, last, list,
    map_indexed, mapv, not_any, not_every, nth, reverse, second, set, some, sort, sort_by,
    split_at, split_with, subvec, vals, vec, vector,
};
pub use atom::{Atom, atom, deref, mut_reset, mut_swap};
pub use category::{
    Category, classify, empty, empty_of_category, is_lazy_seq, is_list, is_map, is_nil,
    is_number, is_record, is_set, is_some, is_string, is_vector,
};
pub use compose::{complement, constantly, every_pred, fnil, identity};
pub use equality::{equals, equals_all, not_equals, not_equals_all};
pub use error::{CollectionError, Result};
pub use iterable::{is_empty, is_seqable, seq, to_iterable};
pub use lazy::{
    LazySeq, Restartable, SeqIter, concat, cons, cycle, distinct, drop, drop_last, drop_while,
    filter, interleave, interpose, iterate, keep, map, map_n, mapcat, mapcat_n, partition,
    partition_all, partition_all_step, partition_pad, partition_step, range, range_between,
    range_by, range_to, remove, repeat, repeat_n, repeatedly, repeatedly_n, rest, take, take_nth,
    take_while,
};
pub use reduce::{
    is_reduced, reduce, reduce_init, reduce_with_identity, reduced, reductions, reductions_init,
    unreduced,
};
pub use structural::{
    assoc, assoc_in, assoc_many, conj, contains, disj, dissoc, frequencies, get, get_in,
    group_by, into, merge, mut_assoc, mut_assoc_in, mut_assoc_many, mut_conj, mut_disj,
    mut_dissoc, mut_update, replace, select_keys, update, update_in,
};
pub use value::{RecordMap, Value, ValueHasher, ValueMap, ValueSet, pr_str};

// Every handle shares state through `Rc`, so none of them may cross threads.
static_assertions::assert_not_impl_any!(Value: Send, Sync);
static_assertions::assert_not_impl_any!(LazySeq: Send, Sync);
static_assertions::assert_not_impl_any!(Atom: Send, Sync);
