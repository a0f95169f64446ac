// Copyright (C) 2025, Ava Labs, Inc. All rights reserved.
// See the file LICENSE.md for licensing terms.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::num::NonZeroUsize;

use hex_literal::hex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sha2::Sha256;
use sha3::Sha3_256;
use shard_merkle::{
    DecodeError, MerklePath, MerkleTree, NodeHasher, PathNode, Position, TreeError, TreeHash,
    codec, leaf_hash, shard,
};
use test_case::test_case;

// Random bytes standing in for a file on disk.
fn random_source(seed: u64, len: usize) -> Vec<u8> {
    eprintln!("Seed {seed}: to rerun with this data, reuse the seed");
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.random()).collect()
}

fn shards_of(source: &[u8], shard_size: usize) -> Vec<Box<[u8]>> {
    shard(source, NonZeroUsize::new(shard_size).unwrap()).unwrap()
}

fn prove_and_verify<H: NodeHasher>(pre_leaves: &[Box<[u8]>]) {
    let tree = MerkleTree::<H>::build(pre_leaves).unwrap();
    let root = tree.root().unwrap().clone();

    for pre_leaf in pre_leaves {
        let leaf = leaf_hash::<H>(pre_leaf);
        let index = tree.find_index(&leaf).unwrap();
        let path = tree.path(index).unwrap();

        // ship the path across the wire and check it on the other side
        let wire = codec::encode_path(&path).unwrap();
        let received = codec::decode_path(&wire).unwrap();
        assert_eq!(received, path);
        assert!(received.verify::<H>(&leaf, &root));
    }
}

#[test]
fn known_leaf_vector() {
    assert_eq!(
        leaf_hash::<Sha256>(b"2B"),
        TreeHash::from(hex!(
            "195a199755daa6abf966b59c3dee2183e25d1aa52e66a3a5ce31e4184740d8da"
        ))
    );
}

#[test]
fn building_is_deterministic() {
    let source = random_source(1, 50_000);
    let first = MerkleTree::<Sha256>::build(shards_of(&source, 1024)).unwrap();
    let second = MerkleTree::<Sha256>::build(shards_of(&source, 1024)).unwrap();
    assert_eq!(first.root(), second.root());
    assert_eq!(first.leaf_count(), 49);
    assert_eq!(first.depth(), 6);
}

#[test_case(1, 64; "single shard")]
#[test_case(2_000, 1024; "two shards")]
#[test_case(50_000, 1024; "odd shard count")]
#[test_case(64 * 1024, 1024; "power of two")]
#[test_case(10_000, 7; "many small shards")]
fn every_shard_proves(len: usize, shard_size: usize) {
    let source = random_source(len as u64, len);
    let shards = shards_of(&source, shard_size);
    prove_and_verify::<Sha256>(&shards);
    prove_and_verify::<Sha3_256>(&shards);
}

#[test]
fn substituted_leaves_fail() {
    let shards = shards_of(&random_source(3, 9 * 100), 100);
    let tree = MerkleTree::<Sha256>::build(&shards).unwrap();
    let root = tree.root().unwrap();

    for (index, pre_leaf) in shards.iter().enumerate() {
        let path = tree.path(index).unwrap();
        for (other, other_pre_leaf) in shards.iter().enumerate() {
            let leaf = leaf_hash::<Sha256>(other_pre_leaf);
            assert_eq!(path.verify::<Sha256>(&leaf, root), index == other);
        }

        let mut flipped = leaf_hash::<Sha256>(pre_leaf).to_vec();
        flipped[index % 32] ^= 0x01;
        assert!(!path.verify::<Sha256>(&TreeHash::from(flipped), root));
    }
}

#[test]
fn proof_from_another_algorithm_fails() {
    let shards = shards_of(b"the quick brown fox jumps over the lazy dog", 4);
    let tree = MerkleTree::<Sha256>::build(&shards).unwrap();
    let leaf = leaf_hash::<Sha256>(&shards[0]);
    let path = tree.path(0).unwrap();
    assert!(path.verify::<Sha256>(&leaf, tree.root().unwrap()));
    assert!(!path.verify::<Sha3_256>(&leaf, tree.root().unwrap()));
}

#[test_case(3, 1)]
#[test_case(5, 2)]
#[test_case(7, 1)]
#[test_case(9, 3)]
#[test_case(11, 2)]
fn last_leaf_path_is_shorter(leaves: usize, promotions: usize) {
    let pre_leaves: Vec<Vec<u8>> = (0..leaves).map(|i| vec![i as u8; 3]).collect();
    let tree = MerkleTree::<Sha256>::build(&pre_leaves).unwrap();
    let root = tree.root().unwrap();

    // the first leaf is paired on every level
    let first = tree.path(0).unwrap();
    let last = tree.path(leaves - 1).unwrap();
    assert_eq!(first.len(), tree.depth());
    assert_eq!(last.len(), first.len() - promotions);
    assert!(first.verify::<Sha256>(&leaf_hash::<Sha256>(&pre_leaves[0]), root));
    assert!(last.verify::<Sha256>(&leaf_hash::<Sha256>(&pre_leaves[leaves - 1]), root));
}

#[test]
fn single_leaf_tree() {
    let tree = MerkleTree::<Sha256>::build([b"2B"]).unwrap();
    let leaf = leaf_hash::<Sha256>(b"2B");
    assert_eq!(tree.root(), Some(&leaf));

    let path = tree.path(0).unwrap();
    assert!(path.is_empty());
    assert!(path.verify::<Sha256>(&leaf, &leaf));
    assert!(MerklePath::default().verify::<Sha256>(&leaf, tree.root().unwrap()));
}

#[test]
fn empty_tree_guard() {
    let err = MerkleTree::<Sha256>::build(shards_of(b"", 16)).unwrap_err();
    assert_eq!(err, TreeError::EmptyInput);

    let unbuilt = MerkleTree::<Sha256>::default();
    assert_eq!(unbuilt.depth(), 0);
    assert!(unbuilt.root().is_none());
    assert!(unbuilt.path(0).is_none());
    assert!(unbuilt.path_for_leaf(&leaf_hash::<Sha256>(b"2B")).is_none());
}

#[test]
fn absent_leaf_has_no_path() {
    let tree = MerkleTree::<Sha256>::build([b"a", b"b", b"c"]).unwrap();
    let missing = leaf_hash::<Sha256>(b"d");
    assert_eq!(tree.find_index(&missing), None);
    assert!(tree.path_for_leaf(&missing).is_none());
    // a pre-leaf is not a leaf digest
    assert!(tree.path_for_leaf(&TreeHash::from_slice(b"a")).is_none());
}

#[test]
fn codec_rejects_bad_records() {
    let node = PathNode::new(leaf_hash::<Sha256>(b"2B"), Position::Right);
    let encoded = codec::encode(&node).unwrap();
    assert_eq!(codec::decode(&encoded).unwrap(), node);

    let bad_hash = encoded.replace("\"hash\":\"", "\"hash\":\"%");
    assert!(matches!(
        codec::decode(&bad_hash),
        Err(DecodeError::InvalidHash(_))
    ));

    let bad_position = encoded.replace("\"right\"", "\"center\"");
    assert!(matches!(
        codec::decode(&bad_position),
        Err(DecodeError::UnknownPosition(_))
    ));
}

#[test]
fn trees_are_shareable_across_threads() {
    let shards = shards_of(&random_source(5, 4096), 64);
    let tree = MerkleTree::<Sha256>::build(&shards).unwrap();
    let root = tree.root().unwrap().clone();

    std::thread::scope(|scope| {
        for chunk in shards.chunks(16) {
            let tree = &tree;
            let root = &root;
            scope.spawn(move || {
                for pre_leaf in chunk {
                    let leaf = leaf_hash::<Sha256>(pre_leaf);
                    let path = tree.path_for_leaf(&leaf).unwrap();
                    assert!(path.verify::<Sha256>(&leaf, root));
                }
            });
        }
    });
}
