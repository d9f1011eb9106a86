//! Integration tests for category classification and the iterable
//! normalizer.

use polycoll::{
    Category, CollectionError, LazySeq, Value, classify, empty, empty_of_category, first,
    is_empty, is_lazy_seq, is_list, is_map, is_number, is_record, is_seqable, is_set, is_some,
    is_string, is_vector, list, range, record, seq, set, to_iterable, vector,
};
use rstest::rstest;

fn sample(category: Category) -> Value {
    match category {
        Category::OrderedMap => polycoll::hash_map! { "a" => 1 },
        Category::OrderedSequence => vector![1, 2],
        Category::Record => record! { "a" => 1 },
        Category::ListVariant => list![1, 2],
        Category::Set => set![1, 2],
        Category::LazySequence => range(),
        Category::None => Value::from("text"),
    }
}

// =============================================================================
// Classification
// =============================================================================

#[rstest]
#[case(Category::OrderedMap)]
#[case(Category::OrderedSequence)]
#[case(Category::Record)]
#[case(Category::ListVariant)]
#[case(Category::Set)]
#[case(Category::LazySequence)]
fn test_empty_of_own_category_reclassifies_identically(#[case] category: Category) {
    let value = sample(category);
    let empty_value = empty_of_category(classify(&value)).unwrap();
    assert_eq!(classify(&empty_value), classify(&value));
    assert!(is_empty(&empty_value).unwrap());
}

#[rstest]
#[case(Value::Nil)]
#[case(Value::from(true))]
#[case(Value::from(7))]
#[case(Value::from(7.5))]
#[case(Value::from("text"))]
fn test_non_containers_classify_as_none(#[case] value: Value) {
    assert_eq!(classify(&value), Category::None);
    assert!(empty_of_category(classify(&value)).is_none());
    assert!(empty(&value).is_nil());
}

#[rstest]
fn test_predicates_follow_classification() {
    assert!(is_map(&sample(Category::OrderedMap)));
    assert!(is_vector(&sample(Category::OrderedSequence)));
    assert!(is_record(&sample(Category::Record)));
    assert!(is_list(&sample(Category::ListVariant)));
    assert!(is_set(&sample(Category::Set)));
    assert!(is_lazy_seq(&sample(Category::LazySequence)));
    assert!(is_string(&Value::from("")));
    assert!(is_number(&Value::from(0.5)));
    assert!(is_some(&Value::from(false)));
    assert!(!is_vector(&list![1]));
}

#[rstest]
fn test_category_names_appear_in_errors() {
    let names: Vec<&str> = Category::CONTAINERS.iter().map(|category| category.name()).collect();
    assert_eq!(names, ["Map", "Set", "List", "Vector", "LazySeq", "Record"]);
}

// =============================================================================
// Iterable Normalizer
// =============================================================================

#[rstest]
fn test_nil_iterates_as_empty() {
    assert_eq!(to_iterable(&Value::Nil).unwrap().count(), 0);
    assert!(first(&Value::Nil).unwrap().is_nil());
}

#[rstest]
fn test_record_traverses_as_entries() {
    let entries: Vec<Value> = to_iterable(&record! { "a" => 1, "b" => 2 }).unwrap().collect();
    assert_eq!(entries, vec![vector!["a", 1], vector!["b", 2]]);
    assert!(!is_seqable(&record! {}));
}

#[rstest]
fn test_set_iterates_in_insertion_order() {
    let elements: Vec<Value> = to_iterable(&set![3, 1, 2]).unwrap().collect();
    assert_eq!(elements, vec![Value::from(3), Value::from(1), Value::from(2)]);
}

#[rstest]
#[case(Value::from(1))]
#[case(Value::from(false))]
fn test_scalars_are_not_seqable(#[case] value: Value) {
    assert!(!is_seqable(&value));
    assert!(matches!(
        to_iterable(&value),
        Err(CollectionError::NotSeqable { operation: "to_iterable", .. })
    ));
    assert!(seq(&value).is_err());
}

#[rstest]
#[case(vector![])]
#[case(list![])]
#[case(set![])]
#[case(record! {})]
#[case(Value::from(""))]
#[case(Value::Seq(LazySeq::empty()))]
#[case(Value::Nil)]
fn test_seq_puns_empty_to_nil(#[case] value: Value) {
    assert!(seq(&value).unwrap().is_nil());
}

#[rstest]
fn test_seq_of_non_empty_returns_the_collection() {
    assert_eq!(seq(&list![1]).unwrap(), list![1]);
    assert_eq!(seq(&record! { "a" => 1 }).unwrap(), vector![vector!["a", 1]]);
}
