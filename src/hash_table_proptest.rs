#![cfg(test)]

// Property tests for HashTable kept inside the crate so they can check the
// structural invariants, which are not part of the public API.

use crate::hash_table::HashTable;
use crate::MAX_LOAD_FACTOR;
use proptest::prelude::*;
use std::collections::HashMap;

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, i32),
    Delete(usize),
    Search(usize),
    Contains(String),
    Mutate(usize, i32),
    Hash(usize),
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=24).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            3 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Insert(i, v)),
            1 => idx.clone().prop_map(OpI::Delete),
            1 => idx.clone().prop_map(OpI::Search),
            1 => prop_oneof![contains_pool, "[a-z]{0,5}"].prop_map(OpI::Contains),
            1 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            1 => idx.clone().prop_map(OpI::Hash),
        ];
        proptest::collection::vec(op, 1..120).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Drives `sut` and a std HashMap model through the same operations.
// Invariants exercised after every op:
// - overwrite returns the previous value and leaves one entry;
// - delete returns the stored value, absent keys are a no-op;
// - search/contains parity with the model;
// - every entry sits in the chain its hash selects, reachable exactly once;
// - the bucket count never shrinks and is a power-of-two multiple of the start;
// - when `bounded`, len <= MAX_LOAD_FACTOR * size.
fn run_scenario(
    mut sut: HashTable<i32>,
    pool: &[String],
    ops: Vec<OpI>,
    bounded: bool,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<String, i32> = HashMap::new();
    let start = sut.size();

    for op in ops {
        let size_before = sut.size();
        match op {
            OpI::Insert(i, v) => {
                let k = &pool[i];
                let prev = sut.insert(k, v);
                prop_assert_eq!(prev, model.insert(k.clone(), v));
            }
            OpI::Delete(i) => {
                let k = &pool[i];
                let len_before = sut.len();
                let removed = sut.delete(k);
                let expected = model.remove(k);
                prop_assert_eq!(removed, expected);
                let drop_by = usize::from(expected.is_some());
                prop_assert_eq!(sut.len(), len_before - drop_by);
                prop_assert!(sut.search(k).is_none());
            }
            OpI::Search(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.search(k), model.get(k));
            }
            OpI::Contains(s) => {
                prop_assert_eq!(sut.contains_key(&s), model.contains_key(&s));
            }
            OpI::Mutate(i, d) => {
                let k = &pool[i];
                match (sut.search_mut(k), model.get_mut(k)) {
                    (Some(sv), Some(mv)) => {
                        *sv = sv.saturating_add(d);
                        *mv = mv.saturating_add(d);
                    }
                    (None, None) => {}
                    _ => prop_assert!(false, "search_mut disagrees with model for {:?}", k),
                }
            }
            OpI::Hash(i) => {
                let k = &pool[i];
                let h = sut.hash(k);
                prop_assert!(h < sut.size());
                prop_assert_eq!(h, sut.hash(k));
            }
        }

        prop_assert!(sut.invariants_hold());
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        prop_assert!(sut.size() >= size_before, "bucket count shrank");
        prop_assert_eq!(sut.size() % start, 0);
        prop_assert!((sut.size() / start).is_power_of_two());
        if bounded {
            prop_assert!(sut.len() <= MAX_LOAD_FACTOR * sut.size());
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario(), start in 1usize..=5) {
        run_scenario(HashTable::with_size(start), &pool, ops, true)?;
    }
}

// Same state machine with the table pinned to a single bucket: every key
// collides, so all lookups resolve through one long chain.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_single_chain((pool, ops) in arb_scenario()) {
        let sut = HashTable::builder().size(1).max_buckets(1).build().unwrap();
        run_scenario(sut, &pool, ops, false)?;
    }
}
