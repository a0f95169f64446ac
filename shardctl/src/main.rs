// Copyright (C) 2025, Ava Labs, Inc. All rights reserved.
// See the file LICENSE.md for licensing terms.

use std::fs::File;
use std::io::{self, BufReader};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use shard_merkle::{
    HashAlgorithm, MerkleTree, NodeHasher, ParseTreeHashError, ShardError, Shards, TreeConfig,
    TreeError, default_shard_size,
};

pub mod prove;
pub mod root;
pub mod verify;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(
        long,
        short = 'l',
        required = false,
        help = "Log level. Respects RUST_LOG.",
        value_name = "LOG_LEVEL",
        num_args = 1,
        value_parser = ["trace", "debug", "info", "warn", "error"],
        default_value_t = String::from("info"),
    )]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the root hash of a file's shard tree
    Root(root::Options),
    /// Print an inclusion proof for one shard of a file
    Prove(prove::Options),
    /// Check an inclusion proof produced by `prove`
    Verify(verify::Options),
}

/// The input file and how to turn it into a tree.
#[derive(Debug, Args)]
pub struct SourceFile {
    /// The file to shard
    #[arg(required = true, value_name = "FILE", help = "File to shard")]
    pub file: PathBuf,

    /// Size of each shard in bytes
    #[arg(
        long,
        short = 's',
        value_name = "BYTES",
        default_value_t = default_shard_size(),
        help = "Shard size in bytes"
    )]
    pub shard_size: NonZeroUsize,

    /// Hash primitive for leaf and internal digests
    #[arg(
        long,
        value_name = "ALGORITHM",
        default_value_t = HashAlgorithm::Sha256,
        help = "Hash algorithm: sha256 or sha3-256"
    )]
    pub hash: HashAlgorithm,
}

impl SourceFile {
    fn config(&self) -> TreeConfig {
        TreeConfig::builder()
            .shard_size(self.shard_size)
            .hash_algorithm(self.hash)
            .build()
    }

    /// Shards the file and builds its tree with `H`.
    fn load<H: NodeHasher>(&self) -> Result<MerkleTree<H>, CliError> {
        let config = self.config();
        log::debug!(
            "sharding {} into {} byte shards, hashing with {}",
            self.file.display(),
            config.shard_size,
            config.hash_algorithm
        );
        let file = File::open(&self.file).map_err(|source| CliError::Open {
            path: self.file.clone(),
            source,
        })?;
        let shards = Shards::new(BufReader::new(file), config.shard_size)
            .collect::<Result<Vec<_>, _>>()?;
        log::info!("read {} shards from {}", shards.len(), self.file.display());
        Ok(MerkleTree::build(&shards)?)
    }
}

/// Everything that can make a subcommand fail.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("cannot open {}: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },
    #[error(transparent)]
    Shard(#[from] ShardError),
    #[error("{0}; is the file empty?")]
    Tree(#[from] TreeError),
    #[error("no shard at index {index}; the file has {shards} shards")]
    IndexOutOfRange { index: usize, shards: usize },
    #[error("leaf {0} is not in the tree")]
    LeafNotFound(String),
    #[error("nothing to prove; pass --index or --leaf")]
    NoLeafSelected,
    #[error("invalid hash in proof document: {0}")]
    Hash(#[from] ParseTreeHashError),
    #[error("invalid proof document: {0}")]
    Document(#[from] serde_json::Error),
    #[error(
        "{field} is {len} bytes; {algorithm} digests are {} bytes",
        algorithm.digest_len()
    )]
    DigestLength {
        field: String,
        algorithm: HashAlgorithm,
        len: usize,
    },
    #[error(transparent)]
    Algorithm(#[from] shard_merkle::HashAlgorithmError),
    #[error("cannot read proof: {0}")]
    Read(#[source] io::Error),
    #[error("cannot write output: {0}")]
    Write(#[source] io::Error),
    #[error("proof is invalid")]
    InvalidProof,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::init_from_env(
        env_logger::Env::default()
            .filter_or(env_logger::DEFAULT_FILTER_ENV, cli.log_level.to_string()),
    );

    let result = match &cli.command {
        Commands::Root(opts) => root::run(opts),
        Commands::Prove(opts) => prove::run(opts),
        Commands::Verify(opts) => verify::run(opts),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::debug!("{e:?}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
