//! Integration tests for lazy sequence producers and transformers.
//!
//! Covers restartability, bounded consumption of infinite producers and
//! the windowing operators.

use std::cell::Cell;
use std::rc::Rc;

use polycoll::{
    CollectionError, Value, concat, cons, cycle, distinct, drop, drop_last, drop_while, filter,
    first, interleave, interpose, is_lazy_seq, iterate, keep, list, map, map_n, mapcat,
    partition, partition_all, partition_all_step, partition_pad, partition_step, range,
    range_between, range_by, range_to, record, remove, repeat, repeat_n, repeatedly,
    repeatedly_n, rest, set, take, take_nth, take_while, vec, vector,
};
use rstest::rstest;

fn int(value: &Value) -> i64 {
    value.as_int().unwrap_or(0)
}

fn realized(value: &Value) -> Value {
    vec(value).unwrap()
}

// =============================================================================
// Producers
// =============================================================================

#[rstest]
#[case(range_to(4), vector![0, 1, 2, 3])]
#[case(range_between(2, 5), vector![2, 3, 4])]
#[case(range_between(5, 5), vector![])]
#[case(range_by(10, 0, -3), vector![10, 7, 4, 1])]
#[case(range_by(0, 5, 0), vector![0, 1, 2, 3, 4])]
#[case(range_by(0, 10, 4), vector![0, 4, 8])]
fn test_finite_ranges(#[case] sequence: Value, #[case] expected: Value) {
    assert!(is_lazy_seq(&sequence));
    assert_eq!(realized(&sequence), expected);
}

#[rstest]
fn test_infinite_range_is_bounded_by_take() {
    let head = take(3, &range()).unwrap();
    assert_eq!(realized(&head), vector![0, 1, 2]);
}

#[rstest]
fn test_take_five_of_cycle() {
    let cycled = cycle(&vector![1, 2]).unwrap();
    assert_eq!(realized(&take(5, &cycled).unwrap()), vector![1, 2, 1, 2, 1]);
}

#[rstest]
fn test_cycle_of_empty_collection_is_empty() {
    assert_eq!(realized(&cycle(&vector![]).unwrap()), vector![]);
    assert_eq!(realized(&cycle(&Value::Nil).unwrap()), vector![]);
}

#[rstest]
fn test_repeat_forms() {
    assert_eq!(realized(&take(2, &repeat(Value::from("x"))).unwrap()), vector!["x", "x"]);
    assert_eq!(realized(&repeat_n(3, Value::from(0))), vector![0, 0, 0]);
    assert_eq!(realized(&repeat_n(-1, Value::from(0))), vector![]);
}

#[rstest]
fn test_repeatedly_calls_once_per_pulled_element() {
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let produced = repeatedly(move || {
        counter.set(counter.get() + 1);
        Value::from(counter.get())
    });

    assert_eq!(realized(&take(3, &produced).unwrap()), vector![1, 2, 3]);
    assert_eq!(calls.get(), 3);

    let bounded = repeatedly_n(2, || Value::from("tick"));
    assert_eq!(realized(&bounded), vector!["tick", "tick"]);
    assert_eq!(realized(&repeatedly_n(0, || Value::Nil)), vector![]);
}

#[rstest]
fn test_iterate_applies_function_repeatedly() {
    let powers = iterate(|x| Value::from(int(&x) * 2), Value::from(1));
    assert_eq!(realized(&take(5, &powers).unwrap()), vector![1, 2, 4, 8, 16]);
}

// =============================================================================
// Restartability
// =============================================================================

#[rstest]
fn test_sequence_restarts_on_every_traversal() {
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let squares = map(
        move |x| {
            counter.set(counter.get() + 1);
            Value::from(int(&x) * int(&x))
        },
        &range_to(4),
    )
    .unwrap();

    assert_eq!(calls.get(), 0);
    assert_eq!(realized(&squares), vector![0, 1, 4, 9]);
    assert_eq!(realized(&squares), vector![0, 1, 4, 9]);
    // Nothing is cached between traversals.
    assert_eq!(calls.get(), 8);
}

#[rstest]
fn test_first_pulls_a_single_element() {
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let traced = map(
        move |x| {
            counter.set(counter.get() + 1);
            x
        },
        &range(),
    )
    .unwrap();

    assert_eq!(first(&traced).unwrap(), Value::from(0));
    assert_eq!(calls.get(), 1);
}

// =============================================================================
// Transformers
// =============================================================================

#[rstest]
fn test_map_n_stops_at_shortest_input() {
    let sums = map_n(
        |arguments| Value::from(arguments.iter().map(int).sum::<i64>()),
        &[vector![1, 2, 3], range(), list![10, 20]],
    )
    .unwrap();
    assert_eq!(realized(&sums), vector![11, 23]);
}

#[rstest]
fn test_map_n_requires_a_collection() {
    assert!(matches!(
        map_n(|_| Value::Nil, &[]),
        Err(CollectionError::InvalidArgument { operation: "map_n", .. })
    ));
}

#[rstest]
fn test_filter_and_remove_are_complementary() {
    let even = |x: &Value| int(x) % 2 == 0;
    assert_eq!(realized(&filter(even, &range_to(6)).unwrap()), vector![0, 2, 4]);
    assert_eq!(realized(&remove(even, &range_to(6)).unwrap()), vector![1, 3, 5]);
}

#[rstest]
fn test_keep_drops_only_nil() {
    let kept = keep(
        |x| match int(&x) {
            0 => Value::from(false),
            1 => Value::Nil,
            n => Value::from(n),
        },
        &range_to(4),
    )
    .unwrap();
    assert_eq!(realized(&kept), vector![false, 2, 3]);
}

#[rstest]
fn test_take_and_drop_forms() {
    let numbers = range_to(6);
    assert_eq!(realized(&take(-1, &numbers).unwrap()), vector![]);
    assert_eq!(realized(&drop(4, &numbers).unwrap()), vector![4, 5]);
    assert_eq!(realized(&rest(&numbers).unwrap()), vector![1, 2, 3, 4, 5]);
    assert_eq!(realized(&drop_last(2, &numbers).unwrap()), vector![0, 1, 2, 3]);
    assert_eq!(
        realized(&take_while(|x| int(x) < 3, &range()).unwrap()),
        vector![0, 1, 2]
    );
    assert_eq!(
        realized(&drop_while(|x| int(x) < 3, &numbers).unwrap()),
        vector![3, 4, 5]
    );
    assert_eq!(realized(&take_nth(2, &numbers).unwrap()), vector![0, 2, 4]);
}

#[rstest]
fn test_distinct_keeps_first_occurrence() {
    let unique = distinct(&vector![1, 2, 1, 3, 2]).unwrap();
    assert_eq!(realized(&unique), vector![1, 2, 3]);
    // A fresh traversal starts with an empty seen-set.
    assert_eq!(realized(&unique), vector![1, 2, 3]);
}

#[rstest]
fn test_cons_concat_and_mapcat() {
    assert_eq!(realized(&cons(Value::from(0), &list![1, 2]).unwrap()), vector![0, 1, 2]);
    assert_eq!(
        realized(&concat(&[vector![1], set![2, 3], Value::Nil, Value::from("ab")]).unwrap()),
        vector![1, 2, 3, "a", "b"]
    );
    let doubled = mapcat(|x| vector![x.clone(), x], &vector![1, 2]).unwrap();
    assert_eq!(realized(&doubled), vector![1, 1, 2, 2]);
}

#[rstest]
fn test_transformer_rejects_scalar_input() {
    assert!(matches!(
        map(|x| x, &Value::from(5)),
        Err(CollectionError::NotSeqable { operation: "map", found: "int" })
    ));
    assert!(matches!(
        cycle(&Value::from(true)),
        Err(CollectionError::NotSeqable { operation: "cycle", .. })
    ));
}

#[rstest]
fn test_record_is_traversed_as_entries() {
    let entries = map(|x| x, &record! { "a" => 1, "b" => 2 }).unwrap();
    assert_eq!(realized(&entries), vector![vector!["a", 1], vector!["b", 2]]);
}

// =============================================================================
// Windows
// =============================================================================

#[rstest]
fn test_partition_pad_fills_trailing_window() {
    let windows = partition_pad(4, 6, &vector!["a"], &range_to(20)).unwrap();
    assert_eq!(
        realized(&windows),
        vector![
            vector![0, 1, 2, 3],
            vector![6, 7, 8, 9],
            vector![12, 13, 14, 15],
            vector![18, 19, "a"]
        ]
    );
}

#[rstest]
fn test_partition_drops_incomplete_window() {
    assert_eq!(
        realized(&partition(3, &range_to(8)).unwrap()),
        vector![vector![0, 1, 2], vector![3, 4, 5]]
    );
    assert_eq!(
        realized(&partition_step(2, 1, &range_to(4)).unwrap()),
        vector![vector![0, 1], vector![1, 2], vector![2, 3]]
    );
}

#[rstest]
fn test_partition_all_keeps_incomplete_window() {
    assert_eq!(
        realized(&partition_all(3, &range_to(8)).unwrap()),
        vector![vector![0, 1, 2], vector![3, 4, 5], vector![6, 7]]
    );
    assert_eq!(
        realized(&partition_all_step(2, 3, &range_to(7)).unwrap()),
        vector![vector![0, 1], vector![3, 4], vector![6]]
    );
}

#[rstest]
fn test_partition_of_infinite_source_is_lazy() {
    let windows = partition(2, &range()).unwrap();
    assert_eq!(
        realized(&take(2, &windows).unwrap()),
        vector![vector![0, 1], vector![2, 3]]
    );
}

#[rstest]
#[case(0, 1)]
#[case(2, 0)]
fn test_partition_rejects_zero_size_or_step(#[case] size: usize, #[case] step: usize) {
    assert!(matches!(
        partition_step(size, step, &range_to(4)),
        Err(CollectionError::InvalidArgument { operation: "partition_step", .. })
    ));
}

#[rstest]
fn test_interleave_and_interpose() {
    assert_eq!(
        realized(&interleave(&[vector![1, 2, 3], vector!["a", "b"]]).unwrap()),
        vector![1, "a", 2, "b"]
    );
    assert_eq!(
        realized(&interpose(Value::from(","), &vector![1, 2, 3]).unwrap()),
        vector![1, ",", 2, ",", 3]
    );
    assert_eq!(realized(&interpose(Value::from(","), &vector![]).unwrap()), vector![]);
}
