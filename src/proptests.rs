use super::*;

use proptest::prelude::*;
use std::collections::BTreeMap;

/// Reference behaviour: a sorted map for contents plus a Vec for arrival
/// order.
#[derive(Default)]
struct Model {
    map: BTreeMap<u16, u8>,
    order: Vec<u16>,
}

impl Model {
    fn add(&mut self, k: u16, v: u8) -> bool {
        if self.map.get(&k) == Some(&v) {
            return false;
        }
        self.order.retain(|o| *o != k);
        self.order.push(k);
        self.map.insert(k, v);
        true
    }

    fn remove(&mut self, k: u16) -> Option<u8> {
        let v = self.map.remove(&k)?;
        self.order.retain(|o| *o != k);
        Some(v)
    }

    fn pop_min(&mut self) -> Option<(u16, u8)> {
        let k = *self.map.keys().next()?;
        self.remove(k).map(|v| (k, v))
    }

    fn pop_max(&mut self) -> Option<(u16, u8)> {
        let k = *self.map.keys().next_back()?;
        self.remove(k).map(|v| (k, v))
    }
}

fn validate<S, D>(t: &LinkedHashTree<u16, u8, S, D>, m: &Model)
where
    S: std::hash::BuildHasher,
    D: DeletionStrategy,
{
    if let Err(e) = t.check_invariants() {
        panic!("invariant violated: {}", e);
    }

    assert_eq!(t.len(), m.map.len());

    let sorted: Vec<(u16, u8)> = t.sorted_order().map(|(k, v)| (*k, *v)).collect();
    let expected: Vec<(u16, u8)> = m.map.iter().map(|(k, v)| (*k, *v)).collect();
    assert_eq!(sorted, expected, "sorted order diverged");

    let arrival: Vec<u16> = t.keys().copied().collect();
    assert_eq!(arrival, m.order, "insertion order diverged");

    assert_eq!(t.min_key().ok(), m.map.keys().next());
    assert_eq!(t.max_key().ok(), m.map.keys().next_back());
}

#[derive(Clone, Debug)]
enum Op {
    Add(u16, u8),
    Remove(u16),
    Get(u16),
    PopMin,
    PopMax,
    Clear,
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    // a small key space so updates, re-adds and chain collisions are common,
    // and a small value space so same-value adds are too
    let key = 0u16..96;
    let op = prop_oneof![
        50 => (key.clone(), 0u8..4).prop_map(|(k, v)| Op::Add(k, v)),
        25 => key.clone().prop_map(Op::Remove),
        15 => key.clone().prop_map(Op::Get),
        4 => Just(Op::PopMin),
        4 => Just(Op::PopMax),
        1 => Just(Op::Clear),
    ];
    prop::collection::vec(op, 0..=600)
}

fn run<S, D>(t: &mut LinkedHashTree<u16, u8, S, D>, ops: Vec<Op>) -> Result<(), TestCaseError>
where
    S: std::hash::BuildHasher,
    D: DeletionStrategy,
{
    let mut m = Model::default();

    for op in ops {
        match op {
            Op::Add(k, v) => {
                prop_assert_eq!(t.add(k, v), Ok(m.add(k, v)));
            }
            Op::Remove(k) => {
                prop_assert_eq!(t.take(&k), Ok(m.remove(k)));
            }
            Op::Get(k) => {
                prop_assert_eq!(t.get(&k), m.map.get(&k));
                prop_assert_eq!(t.contains_key(&k), m.map.contains_key(&k));
            }
            Op::PopMin => {
                prop_assert_eq!(t.pop_min(), Ok(m.pop_min()));
            }
            Op::PopMax => {
                prop_assert_eq!(t.pop_max(), Ok(m.pop_max()));
            }
            Op::Clear => {
                prop_assert_eq!(t.clear(), Ok(()));
                m = Model::default();
            }
        }

        prop_assert_eq!(t.len(), m.map.len());
    }

    validate(t, &m);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 10_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence_null_hasher(ops in ops_strategy(), seed in any::<u64>()) {
        // two buckets to start, so chains are long and growth happens often
        let mut t = LinkedHashTree::with_hasher_and_strategy(
            Config::new().initial_capacity(2),
            BuildNullHasher,
            CoinFlip::seed_from_u64(seed),
        );
        run(&mut t, ops)?;
    }

    #[test]
    fn prop_equivalence_random_state(ops in ops_strategy(), seed in any::<u64>()) {
        let mut t = LinkedHashTree::try_with_seed(Config::new(), seed).unwrap();
        run(&mut t, ops)?;
    }

    #[test]
    fn prop_capacity_never_shrinks(keys in prop::collection::vec(any::<u16>(), 0..=400)) {
        let mut t: LinkedHashTree<u16, u8> = LinkedHashTree::with_capacity(4);
        let mut last = t.capacity();

        for k in keys {
            t.add(k, 0).unwrap();
            prop_assert!(t.capacity() >= last);
            last = t.capacity();
        }
        prop_assert!(t.check_invariants().is_ok());
    }
}

fn for_each_permutation<T: Clone>(items: &[T], mut f: impl FnMut(Vec<T>)) {
    fn rec<T: Clone>(items: &[T], used: &mut [bool], out: &mut Vec<T>, f: &mut impl FnMut(Vec<T>)) {
        if out.len() == items.len() {
            f(out.clone());
            return;
        }
        for i in 0..items.len() {
            if used[i] {
                continue;
            }
            used[i] = true;
            out.push(items[i].clone());
            rec(items, used, out, f);
            out.pop();
            used[i] = false;
        }
    }

    let mut used = vec![false; items.len()];
    let mut out = Vec::with_capacity(items.len());
    rec(items, &mut used, &mut out, &mut f);
}

#[test]
fn exhaustive_remove_order_small_set() {
    // every shape of deletion: leaves, one child, two children with the
    // replacement adjacent or deep
    let keys: Vec<u16> = vec![40, 20, 60, 10, 30, 50, 70];

    for_each_permutation(&keys, |perm| {
        for seed in 0..2 {
            let mut t = LinkedHashTree::with_hasher_and_strategy(
                Config::new().initial_capacity(4),
                BuildNullHasher,
                CoinFlip::seed_from_u64(seed),
            );
            let mut m = Model::default();
            for k in &keys {
                assert_eq!(t.add(*k, 1), Ok(m.add(*k, 1)));
            }

            for k in perm.clone() {
                assert_eq!(t.remove(&k), Ok(m.remove(k).is_some()));
                validate(&t, &m);
            }
            assert!(t.is_empty());
            assert_eq!(t.tree_depth(), 0);
        }
    });
}

#[test]
fn exhaustive_insert_order_small_set() {
    let keys: Vec<u16> = vec![3, 1, 4, 5, 9, 2];

    for_each_permutation(&keys, |perm| {
        let mut t = LinkedHashTree::with_hasher_and_strategy(
            Config::new().initial_capacity(2),
            BuildNullHasher,
            AlwaysSuccessor,
        );
        let mut m = Model::default();

        for (i, k) in perm.into_iter().enumerate() {
            let v = i as u8;
            assert_eq!(t.add(k, v), Ok(m.add(k, v)));
        }

        validate(&t, &m);
    });
}
