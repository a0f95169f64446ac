// Copyright (C) 2025, Ava Labs, Inc. All rights reserved.
// See the file LICENSE.md for licensing terms.

use clap::Args;
use sha2::Sha256;
use sha3::Sha3_256;
use shard_merkle::{HashAlgorithm, NodeHasher};

use crate::{CliError, SourceFile};

#[derive(Debug, Args)]
pub struct Options {
    #[command(flatten)]
    pub source: SourceFile,
}

pub(super) fn run(opts: &Options) -> Result<(), CliError> {
    log::debug!("root of {opts:?}");
    match opts.source.hash {
        HashAlgorithm::Sha256 => print_root::<Sha256>(opts),
        HashAlgorithm::Sha3_256 => print_root::<Sha3_256>(opts),
    }
}

fn print_root<H: NodeHasher>(opts: &Options) -> Result<(), CliError> {
    let tree = opts.source.load::<H>()?;
    // `load` never returns an empty tree
    let Some(root) = tree.root() else {
        return Err(CliError::Tree(shard_merkle::TreeError::EmptyInput));
    };

    println!("{root}");
    println!("leaves: {}", tree.leaf_count());
    println!("depth: {}", tree.depth());
    Ok(())
}
