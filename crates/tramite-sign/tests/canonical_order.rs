use proptest::prelude::*;
use serde_json::{Map, Value};
use tramite_sign::{canonicalize, signing_input, DEFAULT_SIGNATURE_PURPOSE};

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[a-zA-Z0-9 ñáé_-]{0,12}".prop_map(Value::String),
    ]
}

fn entries() -> impl Strategy<Value = Vec<(String, Value)>> {
    prop::collection::btree_map("[a-z_]{1,8}", scalar(), 0..12)
        .prop_map(|map| map.into_iter().collect())
}

fn object_from(entries: &[(String, Value)]) -> Value {
    let mut map = Map::new();
    for (key, value) in entries {
        map.insert(key.clone(), value.clone());
    }
    Value::Object(map)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn canonical_form_ignores_insertion_order(
        entries in entries(),
        seed in any::<u64>(),
    ) {
        let mut shuffled = entries.clone();
        // Deterministic rotation plus reversal gives a different insertion order.
        if !shuffled.is_empty() {
            let len = shuffled.len();
            shuffled.rotate_left((seed as usize) % len);
            if seed % 2 == 0 {
                shuffled.reverse();
            }
        }

        let original = object_from(&entries);
        let reordered = object_from(&shuffled);
        prop_assert_eq!(canonicalize(&original), canonicalize(&reordered));
    }

    #[test]
    fn canonical_form_is_stable_and_valid_json(entries in entries()) {
        let document = object_from(&entries);
        let input = signing_input(&document, "2024-03-15T10:00:00.000Z", DEFAULT_SIGNATURE_PURPOSE);

        let first = canonicalize(&input);
        let second = canonicalize(&input);
        prop_assert_eq!(&first, &second);

        let reparsed: Value = serde_json::from_str(&first).unwrap();
        prop_assert_eq!(canonicalize(&reparsed), first);
    }

    #[test]
    fn nested_objects_are_sorted(entries in entries()) {
        let inner = object_from(&entries);
        let mut reversed: Vec<(String, Value)> = entries.clone();
        reversed.reverse();

        let a = Value::Array(vec![object_from(&[("k".to_string(), inner)])]);
        let b = Value::Array(vec![object_from(&[("k".to_string(), object_from(&reversed))])]);
        prop_assert_eq!(canonicalize(&a), canonicalize(&b));
    }
}
