//! Property-based tests over generated maps and query strings.
//!
//! Each `proptest!` case owns its own RNG, so generated data never flows
//! through shared state.

use proptest::prelude::*;
use serde::Serialize;
use serde_kvjoin::{join, join_with_options, JoinOptions, Order};
use std::collections::{BTreeMap, BTreeSet};

fn key() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,7}"
}

fn text_value() -> impl Strategy<Value = String> {
    "[A-Za-z0-9]{0,6}"
}

/// A non-empty map plus a shuffled order list mixing its keys with absent ones.
fn map_and_order() -> impl Strategy<Value = (BTreeMap<String, String>, Vec<String>)> {
    (
        prop::collection::btree_map(key(), "[a-z]{1,4}", 1..10),
        prop::collection::btree_set(key(), 0..4),
    )
        .prop_flat_map(|(map, absent)| {
            let candidates: Vec<String> = map
                .keys()
                .cloned()
                .chain(absent)
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect();
            let len = candidates.len();
            (
                Just(map),
                prop::sample::subsequence(candidates, 1..=len).prop_shuffle(),
            )
        })
}

fn tokens(joined: &str) -> Vec<&str> {
    if joined.is_empty() {
        Vec::new()
    } else {
        joined.split('&').collect()
    }
}

proptest! {
    #[test]
    fn prop_descending_reverses_ascending(map in prop::collection::btree_map(key(), text_value(), 0..12)) {
        let ascending = join(&map).unwrap();
        let descending = join_with_options(
            &map,
            JoinOptions::new().with_order(Order::AsciiDesc, vec![]),
        )
        .unwrap();

        let mut reversed = tokens(&descending);
        reversed.reverse();
        prop_assert_eq!(tokens(&ascending), reversed);
    }

    #[test]
    fn prop_idempotent(map in prop::collection::btree_map(key(), any::<i64>(), 0..12), unwrap in any::<bool>()) {
        let options = JoinOptions::new().with_ignore_empty(false).with_unwrap(unwrap);
        let first = join_with_options(&map, options.clone()).unwrap();
        let second = join_with_options(&map, options).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_query_round_trip(map in prop::collection::btree_map(key(), "[A-Za-z0-9]{1,6}", 0..12)) {
        let query = map
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");
        let url = format!("https://example.com/api?{}", query);

        let joined = join(url.as_str()).unwrap();
        let recovered: BTreeMap<String, String> = tokens(&joined)
            .into_iter()
            .filter_map(|token| token.split_once('='))
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        prop_assert_eq!(recovered, map);
    }

    #[test]
    fn prop_ignore_empty_controls_zero_values(map in prop::collection::btree_map(key(), 0u32..3, 0..12)) {
        let dropped = join(&map).unwrap();
        let zeros = map.values().filter(|v| **v == 0).count();
        prop_assert_eq!(tokens(&dropped).len(), map.len() - zeros);
        prop_assert!(!tokens(&dropped).iter().any(|t| t.ends_with("=0")));

        let kept = join_with_options(&map, JoinOptions::new().with_ignore_empty(false)).unwrap();
        prop_assert_eq!(tokens(&kept).len(), map.len());
        prop_assert_eq!(tokens(&kept).iter().filter(|t| t.ends_with("=0")).count(), zeros);
    }

    #[test]
    fn prop_defined_order_is_a_filtered_list((map, order) in map_and_order()) {
        let options = JoinOptions::new().with_order(Order::Defined, order.clone());
        let joined = join_with_options(&map, options).unwrap();

        let expected: Vec<String> = order
            .iter()
            .filter_map(|k| map.get(k).map(|v| format!("{}={}", k, v)))
            .collect();
        prop_assert_eq!(tokens(&joined), expected);
    }

    #[test]
    fn prop_sequences_never_flattened(
        id in 1u32..1000,
        items in prop::collection::vec(any::<u8>(), 0..6),
        unwrap in any::<bool>(),
    ) {
        #[derive(Serialize)]
        struct Record {
            id: u32,
            items: Vec<u8>,
        }

        let record = Record { id, items };
        let joined = join_with_options(&record, JoinOptions::new().with_unwrap(unwrap)).unwrap();
        prop_assert_eq!(joined, format!("id={}", id));
    }
}
