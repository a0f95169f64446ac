// Copyright (C) 2025, Ava Labs, Inc. All rights reserved.
// See the file LICENSE.md for licensing terms.

#![warn(missing_debug_implementations, rust_2018_idioms, missing_docs)]
#![deny(unsafe_code)]

//! # shard-merkle builds a binary merkle tree over data shards
//!
//! A byte source is split into fixed-size shards by [`Shards`]. Each shard is a
//! pre-leaf: [`MerkleTree::build`] hashes every pre-leaf into a leaf digest and
//! folds the leaf level pairwise until a single root remains. When a level has
//! an odd length, its last digest is promoted to the next level unchanged.
//!
//! The owner of a tree hands out a [`MerklePath`] for any leaf. A verifier that
//! only holds the leaf digest and the root calls [`verify`] (or
//! [`MerklePath::verify`]) to check membership. Individual [`PathNode`]s travel
//! as `{"hash": <base64>, "position": "left" | "right"}` records, see [`codec`].
//!
//! Leaf and internal digests are domain separated with a one byte prefix, see
//! [`DomainHasher`]. The underlying primitive is any [`NodeHasher`].

pub mod codec;
mod config;
mod hasher;
mod path;
mod position;
mod shard;
mod tree;
mod tree_hash;

/// Log macros, live only with the `logger` feature
pub mod logger;

// re-export these so callers don't need to know where they are
pub use codec::DecodeError;
pub use config::{HashAlgorithm, HashAlgorithmError, TreeConfig, default_shard_size};
pub use hasher::{
    DomainHasher, INTERNAL_PREFIX, LEAF_PREFIX, NodeHasher, internal_hash, leaf_hash,
};
pub use path::{MerklePath, PathNode, verify};
pub use position::{Pairing, Position, UnknownPosition, pairing};
pub use shard::{ShardError, Shards, shard};
pub use tree::{MerkleTree, TreeError};
pub use tree_hash::{ParseTreeHashError, TreeHash};
