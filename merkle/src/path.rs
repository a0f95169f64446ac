// Copyright (C) 2025, Ava Labs, Inc. All rights reserved.
// See the file LICENSE.md for licensing terms.

use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::codec::WireNode;
use crate::logger::debug;
use crate::{DomainHasher, NodeHasher, Position, TreeHash};

/// One sibling digest on an authentication path.
///
/// Serializes to the `{hash, position}` wire record, see [`crate::codec`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "WireNode", into = "WireNode")]
pub struct PathNode {
    /// The sibling's digest.
    pub hash: TreeHash,
    /// Which side of the running hash `hash` goes on.
    pub position: Position,
}

impl PathNode {
    /// Creates a node.
    #[must_use]
    pub const fn new(hash: TreeHash, position: Position) -> Self {
        Self { hash, position }
    }

    /// Folds this node into `running`.
    fn apply<H: NodeHasher>(&self, hasher: &mut DomainHasher<H>, running: &TreeHash) -> TreeHash {
        match self.position {
            Position::Left => hasher.internal_hash(&self.hash, running),
            Position::Right => hasher.internal_hash(running, &self.hash),
        }
    }
}

/// An authentication path, ordered from the leaf's sibling up to the root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MerklePath(Box<[PathNode]>);

impl MerklePath {
    /// The nodes, leaf end first.
    #[must_use]
    pub fn as_slice(&self) -> &[PathNode] {
        &self.0
    }

    /// Checks that `leaf` hashes up to `root` along this path.
    ///
    /// Uses a fresh `H`; see [`verify`].
    #[must_use]
    pub fn verify<H: NodeHasher>(&self, leaf: &TreeHash, root: &TreeHash) -> bool {
        verify(&mut DomainHasher::<H>::default(), leaf, root, &self.0)
    }
}

impl Deref for MerklePath {
    type Target = [PathNode];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<PathNode>> for MerklePath {
    fn from(nodes: Vec<PathNode>) -> Self {
        Self(nodes.into_boxed_slice())
    }
}

impl FromIterator<PathNode> for MerklePath {
    fn from_iter<T: IntoIterator<Item = PathNode>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for MerklePath {
    type Item = PathNode;
    type IntoIter = std::vec::IntoIter<PathNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

impl<'a> IntoIterator for &'a MerklePath {
    type Item = &'a PathNode;
    type IntoIter = std::slice::Iter<'a, PathNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Replays `path` from `leaf` and compares the result with `root`.
///
/// Needs nothing but its arguments, so any number of untrusted proofs can be
/// checked independently. An empty path holds only when `leaf == root`.
pub fn verify<H: NodeHasher>(
    hasher: &mut DomainHasher<H>,
    leaf: &TreeHash,
    root: &TreeHash,
    path: &[PathNode],
) -> bool {
    let computed = path
        .iter()
        .fold(leaf.clone(), |running, node| node.apply(hasher, &running));

    let valid = computed == *root;
    if !valid {
        debug!("proof rejected: computed root {computed:?}, expected {root:?}");
    }
    valid
}
