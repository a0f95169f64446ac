// Copyright (C) 2025, Ava Labs, Inc. All rights reserved.
// See the file LICENSE.md for licensing terms.

use std::io::{self, Write};

use clap::Args;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use sha3::Sha3_256;
use shard_merkle::{HashAlgorithm, MerklePath, MerkleTree, NodeHasher, TreeHash};

use crate::{CliError, SourceFile};

#[derive(Debug, Args)]
pub struct Options {
    #[command(flatten)]
    pub source: SourceFile,

    /// Index of the shard to prove
    #[arg(
        long,
        short = 'i',
        value_name = "INDEX",
        required_unless_present = "leaf",
        conflicts_with = "leaf",
        help = "Index of the shard to prove"
    )]
    pub index: Option<usize>,

    /// Leaf hash (hex) of the shard to prove
    #[arg(long, value_name = "LEAF_HASH", help = "Hex leaf hash of the shard to prove")]
    pub leaf: Option<TreeHash>,
}

/// An inclusion proof as exchanged between `prove` and `verify`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProofDocument {
    /// Name of the hash algorithm, see [`HashAlgorithm::name`].
    pub algorithm: String,
    /// Hex leaf hash being proven.
    pub leaf: String,
    /// Hex root hash the leaf belongs to.
    pub root: String,
    /// Sibling hashes from the leaf up to the root.
    pub path: MerklePath,
}

pub(super) fn run(opts: &Options) -> Result<(), CliError> {
    log::debug!("prove {opts:?}");
    match opts.source.hash {
        HashAlgorithm::Sha256 => prove::<Sha256>(opts),
        HashAlgorithm::Sha3_256 => prove::<Sha3_256>(opts),
    }
}

fn prove<H: NodeHasher>(opts: &Options) -> Result<(), CliError> {
    let tree = opts.source.load::<H>()?;
    let index = select_leaf(&tree, opts)?;

    let (Some(leaf), Some(root), Some(path)) = (
        tree.leaves().get(index),
        tree.root(),
        tree.path(index),
    ) else {
        return Err(CliError::IndexOutOfRange {
            index,
            shards: tree.leaf_count(),
        });
    };
    log::info!("proof for shard {index} has {} nodes", path.len());

    let document = ProofDocument {
        algorithm: opts.source.hash.name().to_owned(),
        leaf: leaf.to_hex(),
        root: root.to_hex(),
        path,
    };

    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &document)
        .map_err(|e| CliError::Write(e.into()))?;
    writeln!(stdout).map_err(CliError::Write)
}

fn select_leaf<H>(tree: &MerkleTree<H>, opts: &Options) -> Result<usize, CliError> {
    match (&opts.leaf, opts.index) {
        (Some(leaf), _) => tree
            .find_index(leaf)
            .ok_or_else(|| CliError::LeafNotFound(leaf.to_hex())),
        (None, Some(index)) => Ok(index),
        (None, None) => Err(CliError::NoLeafSelected),
    }
}
