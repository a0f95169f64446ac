// Copyright (C) 2025, Ava Labs, Inc. All rights reserved.
// See the file LICENSE.md for licensing terms.

use std::fmt;
use std::marker::PhantomData;

use sha2::Sha256;

use crate::logger::{debug, trace};
use crate::{DomainHasher, MerklePath, NodeHasher, Pairing, PathNode, TreeHash, pairing};

/// Errors returned while building a [`MerkleTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum TreeError {
    /// No pre-leaves were supplied.
    #[error("cannot build a merkle tree from 0 pre-leaves")]
    EmptyInput,
}

/// An immutable binary merkle tree.
///
/// `levels[0]` holds the root, the last level holds one leaf digest per
/// pre-leaf in input order. Every level in between has
/// `ceil(len(level below) / 2)` digests.
///
/// A tree built with [`MerkleTree::new`] holds no levels at all; it has no
/// root, depth 0 and no paths.
pub struct MerkleTree<H = Sha256> {
    levels: Box<[Box<[TreeHash]>]>,
    hasher: PhantomData<fn() -> H>,
}

impl<H> fmt::Debug for MerkleTree<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MerkleTree")
            .field("root", &self.root())
            .field("depth", &self.depth())
            .field("leaves", &self.leaf_count())
            .finish()
    }
}

impl<H> Clone for MerkleTree<H> {
    fn clone(&self) -> Self {
        Self {
            levels: self.levels.clone(),
            hasher: PhantomData,
        }
    }
}

impl<H> Default for MerkleTree<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> MerkleTree<H> {
    /// An unbuilt tree.
    #[must_use]
    pub fn new() -> Self {
        Self {
            levels: Box::default(),
            hasher: PhantomData,
        }
    }

    /// The root digest, `None` for an unbuilt tree.
    #[must_use]
    pub fn root(&self) -> Option<&TreeHash> {
        self.levels.first().and_then(|level| level.first())
    }

    /// Number of levels above the leaf level.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.levels.len().saturating_sub(1)
    }

    /// True if the tree was never built.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// The leaf level, in pre-leaf order.
    #[must_use]
    pub fn leaves(&self) -> &[TreeHash] {
        match self.levels.last() {
            Some(level) => level,
            None => &[],
        }
    }

    /// Number of leaves (and so of pre-leaves the tree was built from).
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.leaves().len()
    }

    /// Every level, root first.
    pub fn levels(&self) -> impl DoubleEndedIterator<Item = &[TreeHash]> + ExactSizeIterator {
        self.levels.iter().map(|level| &**level)
    }

    /// Position of `leaf` in the leaf level.
    ///
    /// When several pre-leaves hash to the same digest, the first one wins.
    #[must_use]
    pub fn find_index(&self, leaf: &TreeHash) -> Option<usize> {
        self.leaves().iter().position(|candidate| candidate == leaf)
    }

    /// Authentication path of the leaf at `index`, leaf to root.
    ///
    /// Levels where the ancestor of the leaf was promoted contribute no node.
    /// Returns `None` for an unbuilt tree or an index past the last leaf.
    #[must_use]
    pub fn path(&self, index: usize) -> Option<MerklePath> {
        if index >= self.leaf_count() {
            return None;
        }

        let mut index = index;
        let mut nodes = Vec::with_capacity(self.depth());

        // skip the root level, it never has a sibling
        for level in self.levels.iter().skip(1).rev() {
            match pairing(index, level.len()) {
                Pairing::Promoted => {}
                Pairing::Paired { sibling, position } => {
                    let hash = level.get(sibling)?.clone();
                    nodes.push(PathNode::new(hash, position));
                }
            }
            index /= 2;
        }

        trace!("path for leaf has {} nodes", nodes.len());
        Some(MerklePath::from(nodes))
    }

    /// Looks up `leaf` and returns its path, see [`MerkleTree::find_index`].
    #[must_use]
    pub fn path_for_leaf(&self, leaf: &TreeHash) -> Option<MerklePath> {
        self.find_index(leaf).and_then(|index| self.path(index))
    }
}

impl<H: NodeHasher> MerkleTree<H> {
    /// Builds a tree over `pre_leaves` with a fresh hasher.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::EmptyInput`] if `pre_leaves` yields nothing.
    pub fn build<I>(pre_leaves: I) -> Result<Self, TreeError>
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        Self::build_with(&mut DomainHasher::default(), pre_leaves)
    }

    /// Builds a tree over `pre_leaves`, reusing `hasher` for every digest.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::EmptyInput`] if `pre_leaves` yields nothing.
    pub fn build_with<I>(hasher: &mut DomainHasher<H>, pre_leaves: I) -> Result<Self, TreeError>
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        let leaves: Box<[TreeHash]> = pre_leaves
            .into_iter()
            .map(|pre_leaf| hasher.leaf_hash(pre_leaf.as_ref()))
            .collect();

        if leaves.is_empty() {
            return Err(TreeError::EmptyInput);
        }
        debug!("building merkle tree from {} pre-leaves", leaves.len());

        let mut levels = vec![leaves];
        while let Some(level) = levels.last().filter(|level| level.len() > 1) {
            trace!("hashing level of {} digests", level.len());
            let next = next_level(hasher, level);
            levels.push(next);
        }

        // built leaf first, stored root first
        levels.reverse();
        let tree = Self {
            levels: levels.into_boxed_slice(),
            hasher: PhantomData,
        };
        debug!(
            "built merkle tree of depth {} with root {:?}",
            tree.depth(),
            tree.root()
        );
        Ok(tree)
    }
}

fn next_level<H: NodeHasher>(hasher: &mut DomainHasher<H>, level: &[TreeHash]) -> Box<[TreeHash]> {
    let lefts = level.iter().step_by(2);
    let rights = level.iter().skip(1).step_by(2);
    let mut next: Vec<TreeHash> = lefts
        .zip(rights)
        .map(|(left, right)| hasher.internal_hash(left, right))
        .collect();

    let last = level.len().saturating_sub(1);
    let tail = level.chunks_exact(2).remainder();
    if let (Pairing::Promoted, [lone]) = (pairing(last, level.len()), tail) {
        next.push(lone.clone());
    }
    next.into_boxed_slice()
}
