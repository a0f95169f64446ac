// Copyright (C) 2025, Ava Labs, Inc. All rights reserved.
// See the file LICENSE.md for licensing terms.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::PathBuf;

use clap::Args;
use sha2::Sha256;
use sha3::Sha3_256;
use shard_merkle::{HashAlgorithm, TreeHash};

use crate::CliError;
use crate::prove::ProofDocument;

#[derive(Debug, Args)]
pub struct Options {
    /// Proof document written by `prove`, `-` for stdin
    #[arg(required = true, value_name = "PROOF", help = "Proof file, or - for stdin")]
    pub proof: PathBuf,
}

pub(super) fn run(opts: &Options) -> Result<(), CliError> {
    log::debug!("verify {opts:?}");
    let document = read_document(opts)?;

    let algorithm: HashAlgorithm = document.algorithm.parse()?;
    let leaf: TreeHash = document.leaf.parse()?;
    let root: TreeHash = document.root.parse()?;

    check_len(algorithm, "leaf", &leaf)?;
    check_len(algorithm, "root", &root)?;
    for (index, node) in document.path.iter().enumerate() {
        check_len(algorithm, &format!("path[{index}]"), &node.hash)?;
    }

    let valid = match algorithm {
        HashAlgorithm::Sha256 => document.path.verify::<Sha256>(&leaf, &root),
        HashAlgorithm::Sha3_256 => document.path.verify::<Sha3_256>(&leaf, &root),
    };

    if valid {
        println!("proof is valid");
        Ok(())
    } else {
        Err(CliError::InvalidProof)
    }
}

/// Every digest in a document must be as long as `algorithm` produces.
fn check_len(algorithm: HashAlgorithm, field: &str, hash: &TreeHash) -> Result<(), CliError> {
    if hash.len() == algorithm.digest_len() {
        Ok(())
    } else {
        Err(CliError::DigestLength {
            field: field.to_owned(),
            algorithm,
            len: hash.len(),
        })
    }
}

fn read_document(opts: &Options) -> Result<ProofDocument, CliError> {
    let reader: Box<dyn Read> = if opts.proof.as_os_str() == "-" {
        Box::new(io::stdin().lock())
    } else {
        let file = File::open(&opts.proof).map_err(|source| CliError::Open {
            path: opts.proof.clone(),
            source,
        })?;
        Box::new(BufReader::new(file))
    };
    serde_json::from_reader(reader).map_err(|e| {
        if e.is_io() {
            CliError::Read(e.into())
        } else {
            CliError::Document(e)
        }
    })
}
