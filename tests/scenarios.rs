use linked_hash_tree::{BuildNullHasher, CoinFlip, Config, Error, LinkedHashTree};

fn pairs<'a>(it: impl Iterator<Item = (&'a i32, &'a &'static str)>) -> Vec<(i32, &'static str)> {
    it.map(|(k, v)| (*k, *v)).collect()
}

#[test]
fn single_entry_is_both_min_and_max() {
    let mut tree: LinkedHashTree<i32, &str> = LinkedHashTree::new();
    assert!(tree.is_empty());

    assert_eq!(Ok(true), tree.add(5, "a"));
    assert_eq!(1, tree.len());
    assert_eq!(Some(&"a"), tree.get(&5));
    assert_eq!(Ok(&5), tree.min_key());
    assert_eq!(Ok(&5), tree.max_key());
}

#[test]
fn sorted_and_insertion_orders_differ() {
    let mut tree: LinkedHashTree<i32, &str> = LinkedHashTree::new();
    tree.add(5, "a").unwrap();
    tree.add(3, "b").unwrap();
    tree.add(8, "c").unwrap();

    assert_eq!(vec![(3, "b"), (5, "a"), (8, "c")], pairs(tree.sorted_order()));
    assert_eq!(vec![(5, "a"), (3, "b"), (8, "c")], pairs(tree.insertion_order()));

    // both walks can be repeated while nothing changes
    assert_eq!(pairs(tree.sorted_order()), pairs(tree.sorted_order()));
}

#[test]
fn re_adding_the_same_pair_is_a_no_op() {
    let mut tree: LinkedHashTree<i32, &str> = LinkedHashTree::new();
    assert_eq!(Ok(true), tree.add(5, "a"));
    assert_eq!(Ok(false), tree.add(5, "a"));
    assert_eq!(1, tree.len());
}

#[test]
fn changing_a_value_moves_the_key_last() {
    let mut tree: LinkedHashTree<i32, &str> = LinkedHashTree::new();
    tree.add(5, "a").unwrap();
    tree.add(1, "x").unwrap();
    tree.add(9, "y").unwrap();

    assert_eq!(Ok(true), tree.add(5, "b"));
    assert_eq!(Some(&"b"), tree.get(&5));
    assert_eq!(vec![1, 9, 5], tree.keys().copied().collect::<Vec<_>>());
    assert_eq!(vec![1, 5, 9], tree.sorted_order().map(|(k, _)| *k).collect::<Vec<_>>());
}

#[test]
fn removing_an_absent_key_changes_nothing() {
    let mut tree: LinkedHashTree<i32, &str> = LinkedHashTree::new();
    tree.add(1, "a").unwrap();

    assert_eq!(Ok(false), tree.remove(&99));
    assert_eq!(1, tree.len());
    assert_eq!(vec![(1, "a")], pairs(tree.insertion_order()));
}

#[test]
fn thirteenth_insert_doubles_capacity() {
    let config = Config::new().initial_capacity(16).load_factor(0.75);
    let mut tree = LinkedHashTree::with_hasher_and_strategy(config, BuildNullHasher, CoinFlip::seed_from_u64(0));

    for k in 0..12i32 {
        tree.add(k * 3, k).unwrap();
        assert_eq!(16, tree.capacity());
    }

    tree.add(36, 12).unwrap();
    assert_eq!(32, tree.capacity());

    for k in 0..13i32 {
        assert_eq!(Some(&k), tree.get(&(k * 3)));
    }
    assert!(tree.check_invariants().is_ok());
}

#[test]
fn size_tracks_adds_and_removals() {
    let mut tree: LinkedHashTree<u32, u32> = LinkedHashTree::try_with_seed(Config::new(), 7).unwrap();

    for k in 0..100 {
        tree.add(k, k).unwrap();
    }
    for k in (0..100).filter(|k| k % 3 == 0) {
        assert_eq!(Ok(true), tree.remove(&k));
    }

    assert_eq!(100 - 34, tree.len());
    assert!(tree.check_invariants().is_ok());
}

#[test]
fn min_and_max_of_empty_container_fail() {
    let mut tree: LinkedHashTree<i32, i32> = LinkedHashTree::new();
    assert_eq!(Err(Error::Empty), tree.min_key());
    assert_eq!(Err(Error::Empty), tree.max_key());

    tree.add(1, 1).unwrap();
    tree.remove(&1).unwrap();
    assert_eq!(Err(Error::Empty), tree.min_key());
}

#[test]
fn frozen_container_rejects_mutation() {
    let mut tree: LinkedHashTree<i32, i32> = (0..5).map(|k| (k, k * k)).collect();
    tree.set_modifiable(false);

    assert_eq!(Err(Error::ReadOnly), tree.add(9, 81));
    assert_eq!(Err(Error::ReadOnly), tree.remove(&2));
    assert_eq!(Err(Error::ReadOnly), tree.clear());
    assert_eq!(5, tree.len());
    assert_eq!(Some(&16), tree.get(&4));
}
