mod common;

use common::*;
use sortbench::{Key, SearchTree, TreeError};
use test_case::test_case;

#[test_case(&[], 0, 0 ; "empty")]
#[test_case(&[1], 0, 1 ; "single node")]
#[test_case(&[2, 1, 3], 1, 2 ; "perfect three")]
#[test_case(&BUSHY_KEYS, 3, 4 ; "bushy eight")]
#[test_case(&[1, 2, 3, 4, 5], 4, 5 ; "ascending chain")]
#[test_case(&[5, 4, 3, 2, 1], 4, 5 ; "descending chain")]
fn depth_and_height(keys: &[Key], max_depth: usize, height: usize) {
    let tree = unbalanced_from(keys);
    assert_eq!(tree.max_depth(), max_depth);
    assert_eq!(tree.height(), height);
}

#[test_case(50, 1 ; "root")]
#[test_case(75, 2 ; "second level")]
#[test_case(30, 3 ; "third level")]
#[test_case(5, 4 ; "deepest")]
fn insertion_depth_is_one_based(last: Key, expected: usize) {
    let mut tree = SearchTree::new();
    for &key in BUSHY_KEYS.iter().take_while(|&&k| k != last) {
        tree.insert(key).unwrap();
    }
    let (_, depth) = tree.insert(last).unwrap();
    assert_eq!(depth, expected);
}

#[test_case(5 ; "leaf")]
#[test_case(10 ; "one child")]
#[test_case(25 ; "two children")]
#[test_case(50 ; "root with two children")]
fn delete_keeps_order(key: Key) {
    let mut tree = unbalanced_from(&BUSHY_KEYS);
    assert!(tree.delete(key));
    assert!(!tree.contains(key));
    assert_eq!(tree.size(), 7);

    let expected: Vec<Key> = {
        let mut keys: Vec<Key> = BUSHY_KEYS.iter().copied().filter(|&k| k != key).collect();
        keys.sort_unstable();
        keys
    };
    assert_eq!(tree.keys(), expected);
    tree.validate().expect("invariants hold");
}

#[test]
fn delete_absent_key_is_a_no_op() {
    let mut tree = unbalanced_from(&BUSHY_KEYS);
    assert!(!tree.delete(99));
    assert_eq!(tree.size(), 8);
    assert!(!SearchTree::new().delete(1));
}

#[test]
fn delete_until_empty() {
    let mut tree = unbalanced_from(&BUSHY_KEYS);
    for key in BUSHY_KEYS {
        assert!(tree.delete(key));
    }
    assert!(tree.is_empty());
    assert_eq!(tree.root(), None);
    assert_eq!(tree.dump(), "(empty)\n");
    assert_eq!(tree.max_depth(), 0);
}

#[test]
fn payload_round_trip() {
    let mut tree = SearchTree::new();
    tree.insert_with(7, Some(b"seven".to_vec())).unwrap();
    tree.insert(3).unwrap();

    assert_eq!(tree.payload(7).map(Vec::as_slice), Some(&b"seven"[..]));
    assert_eq!(tree.payload(3), None);

    let previous = tree.set_payload(3, Some(vec![3])).unwrap();
    assert_eq!(previous, None);
    assert_eq!(tree.set_payload(4, None), Err(TreeError::KeyNotFound(4)));
}

#[test]
fn clear_resets_everything() {
    let mut tree = unbalanced_from(&BUSHY_KEYS);
    tree.clear();
    assert!(tree.is_empty());
    assert!(tree.keys().is_empty());

    let (id, depth) = tree.insert(1).unwrap();
    assert_eq!(depth, 1);
    assert_eq!(tree.root(), Some(id));
}
