use std::cmp::Ordering;
use std::io::{self, Cursor, Read, Write};

use btree_persist::codec::{BigEndianCodec, BincodeCodec, BytesCodec, FnCodec};
use btree_persist::{BTree, Comparable, Node, PersistError, load, save};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rstest::rstest;
use serde::{Deserialize, Serialize};

fn build(degree: usize, values: &[u32]) -> BTree<u32> {
    let mut tree = BTree::new(degree, ());
    for v in values {
        tree.replace_or_insert(*v);
    }
    tree
}

fn to_bytes(tree: &BTree<u32>) -> Vec<u8> {
    let mut out = Vec::new();
    save(tree, &mut out, &BigEndianCodec).unwrap();
    out
}

fn assert_child_counts<T>(node: &Node<T>) {
    if !node.is_leaf() {
        assert_eq!(node.children().len(), node.items().len() + 1);
        for child in node.children() {
            assert_child_counts(child);
        }
    }
}

#[test]
fn small_scenario_loads_in_order() {
    let tree = build(2, &[5, 3, 8, 1]);
    let bytes = to_bytes(&tree);
    let loaded: BTree<u32> = load(&mut Cursor::new(bytes), &BigEndianCodec, ()).unwrap();
    assert_eq!(loaded.iter().copied().collect::<Vec<_>>(), vec![1, 3, 5, 8]);
    assert_eq!(loaded.len(), 4);
    assert_eq!(loaded.degree(), 2);
}

#[rstest]
#[case(2)]
#[case(3)]
#[case(7)]
#[case(32)]
fn shuffled_permutation_round_trips(#[case] degree: usize) {
    let mut values: Vec<u32> = (0..256).collect();
    values.shuffle(&mut StdRng::seed_from_u64(degree as u64));
    let tree = build(degree, &values);

    let loaded: BTree<u32> = load(&mut Cursor::new(to_bytes(&tree)), &BigEndianCodec, ()).unwrap();
    assert_eq!(loaded.root(), tree.root());
    assert_eq!(loaded.len(), 256);
    assert_child_counts(loaded.root().unwrap());
    assert_eq!(loaded.iter().copied().collect::<Vec<_>>(), values_sorted(&values));
}

fn values_sorted(values: &[u32]) -> Vec<u32> {
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    sorted
}

#[test]
fn loaded_tree_accepts_further_inserts() {
    let tree = build(3, &(0..50u32).collect::<Vec<_>>());
    let mut loaded: BTree<u32> = load(&mut Cursor::new(to_bytes(&tree)), &BigEndianCodec, ()).unwrap();
    loaded.replace_or_insert(1000);
    assert_eq!(loaded.get(&1000), Some(&1000));
    assert_eq!(loaded.get(&25), Some(&25));
    assert_eq!(loaded.len(), 51);
}

#[test]
fn full_u8_node_round_trips() {
    let root = Node::from_parts((0..255u32).collect(), Vec::new()).unwrap();
    let tree = BTree::from_parts(128, 255, Some(root), ()).unwrap();
    let bytes = to_bytes(&tree);
    assert_eq!(bytes[17], 255);
    let loaded: BTree<u32> = load(&mut Cursor::new(bytes), &BigEndianCodec, ()).unwrap();
    assert_eq!(loaded.root().unwrap().items().len(), 255);
    assert_eq!(loaded.root(), tree.root());
}

#[test]
fn node_past_u8_limit_fails_to_save() {
    let root = Node::from_parts((0..256u32).collect(), Vec::new()).unwrap();
    let tree = BTree::from_parts(128, 256, Some(root), ()).unwrap();
    let err = save(&tree, &mut Vec::new(), &BigEndianCodec).unwrap_err();
    assert!(matches!(err, PersistError::NodeTooLarge { items: 256 }));
}

#[test]
fn every_truncation_is_an_error() {
    let mut tree = BTree::new(2, ());
    for i in 0..40u32 {
        tree.replace_or_insert(format!("item-{i:03}"));
    }
    let mut bytes = Vec::new();
    tree.save(&mut bytes, &BytesCodec).unwrap();

    for n in 0..bytes.len() {
        let mut prefix = &bytes[..n];
        let res: Result<BTree<String>, _> = load(&mut prefix, &BytesCodec, ());
        assert!(res.is_err(), "prefix of {n} bytes loaded successfully");
    }
    let mut whole = &bytes[..];
    let loaded: BTree<String> = load(&mut whole, &BytesCodec, ()).unwrap();
    assert_eq!(loaded.len(), 40);
}

#[test]
fn write_failure_surfaces_as_io_write() {
    struct Full;
    impl Write for Full {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }
    let tree = build(2, &[1, 2, 3]);
    let err = save(&tree, &mut Full, &BigEndianCodec).unwrap_err();
    assert!(matches!(err, PersistError::IoWrite(_)));
}

#[test]
fn codec_error_surfaces_as_item_encode() {
    let codec = FnCodec::new(
        |_w: &mut dyn Write, _item: &u32| -> io::Result<()> { Err(io::Error::other("refused")) },
        |_r: &mut dyn Read, buf: Vec<u8>| -> io::Result<(u32, Vec<u8>)> { Ok((0, buf)) },
    );
    let tree = build(2, &[1]);
    let err = save(&tree, &mut Vec::new(), &codec).unwrap_err();
    assert!(matches!(err, PersistError::ItemEncode(_)));
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Word {
    text: String,
    weight: u16,
}

/// Orders words by weight, optionally descending.
struct Ranking {
    descending: bool,
}

impl Comparable<Ranking> for Word {
    fn compare(&self, other: &Self, ctx: &Ranking) -> Ordering {
        let ord = self.weight.cmp(&other.weight);
        if ctx.descending { ord.reverse() } else { ord }
    }
}

#[test]
fn context_ordered_serde_items_round_trip() {
    let mut tree = BTree::new(2, Ranking { descending: true });
    for (i, text) in ["low", "mid", "high", "top", "none"].iter().enumerate() {
        tree.replace_or_insert(Word {
            text: text.to_string(),
            weight: i as u16 * 10,
        });
    }
    let mut bytes = Vec::new();
    tree.save(&mut bytes, &BincodeCodec).unwrap();

    let loaded: BTree<Word, Ranking> = load(&mut Cursor::new(bytes), &BincodeCodec, Ranking { descending: true }).unwrap();
    let order: Vec<&str> = loaded.iter().map(|w| w.text.as_str()).collect();
    assert_eq!(order, vec!["none", "top", "high", "mid", "low"]);
    assert!(loaded.get(&Word { text: String::new(), weight: 20 }).is_some());
}

#[test]
fn variable_length_closure_codec_reuses_scratch() {
    let codec = FnCodec::new(
        |w: &mut dyn Write, item: &Vec<u8>| -> io::Result<()> {
            w.write_all(&[item.len() as u8])?;
            w.write_all(item)
        },
        |r: &mut dyn Read, mut buf: Vec<u8>| -> io::Result<(Vec<u8>, Vec<u8>)> {
            let mut len = [0u8; 1];
            r.read_exact(&mut len)?;
            buf.resize(usize::from(len[0]), 0);
            r.read_exact(&mut buf)?;
            Ok((buf.clone(), buf))
        },
    );
    let mut tree = BTree::new(2, ());
    for n in 1..30u8 {
        tree.replace_or_insert(vec![n; usize::from(n)]);
    }
    let mut bytes = Vec::new();
    tree.save(&mut bytes, &codec).unwrap();
    let loaded: BTree<Vec<u8>> = load(&mut Cursor::new(bytes), &codec, ()).unwrap();
    assert_eq!(loaded.root(), tree.root());
}

#[test]
fn file_helpers_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("btree_save");
    let tree = build(3, &(0..200u32).rev().collect::<Vec<_>>());

    btree_persist::save_to_path(&tree, &path, &BigEndianCodec).unwrap();
    let loaded: BTree<u32> = btree_persist::load_from_path(&path, &BigEndianCodec, ()).unwrap();
    assert_eq!(loaded.iter().copied().collect::<Vec<_>>(), (0..200u32).collect::<Vec<_>>());
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let res: Result<BTree<u32>, _> = btree_persist::load_from_path(dir.path().join("absent"), &BigEndianCodec, ());
    assert!(matches!(res, Err(PersistError::IoRead(_))));
}

proptest! {
    #[test]
    fn arbitrary_trees_round_trip(values in proptest::collection::vec(any::<u32>(), 0..300), degree in 2usize..10) {
        let tree = build(degree, &values);
        let bytes = to_bytes(&tree);
        if tree.root().is_none() {
            prop_assert_eq!(bytes.len(), 17);
        }
        let loaded: BTree<u32> = load(&mut Cursor::new(bytes), &BigEndianCodec, ()).unwrap();
        prop_assert_eq!(loaded.degree(), degree);
        prop_assert_eq!(loaded.len(), tree.len());
        prop_assert_eq!(loaded.iter().collect::<Vec<_>>(), tree.iter().collect::<Vec<_>>());
        if let Some(root) = loaded.root() {
            assert_child_counts(root);
        }
    }
}
