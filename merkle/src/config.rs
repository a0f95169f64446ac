// Copyright (C) 2025, Ava Labs, Inc. All rights reserved.
// See the file LICENSE.md for licensing terms.

use std::fmt::{self, Display};
use std::num::NonZeroUsize;
use std::str::FromStr;

use nonzero_ext::nonzero;
use typed_builder::TypedBuilder;

/// Shard size used when none is configured.
#[must_use]
pub const fn default_shard_size() -> NonZeroUsize {
    nonzero!(1024usize)
}

/// An error indicating that a value could not be converted into a [`HashAlgorithm`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HashAlgorithmError {
    /// Unknown numeric identifier.
    #[error("invalid integer for HashAlgorithm: {0}; expected 0 for sha256 or 1 for sha3-256")]
    UnknownId(u64),
    /// Unknown name.
    #[error("invalid name for HashAlgorithm: {0:?}; expected \"sha256\" or \"sha3-256\"")]
    UnknownName(String),
}

/// The hash primitive a tree is built with.
///
/// Selecting the primitive at runtime means picking the matching
/// [`NodeHasher`](crate::NodeHasher) type parameter, e.g. `sha2::Sha256` for
/// [`HashAlgorithm::Sha256`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HashAlgorithm {
    /// SHA-256, the default.
    #[default]
    Sha256,
    /// SHA3-256.
    Sha3_256,
}

impl HashAlgorithm {
    /// Name used on the command line and in logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha3_256 => "sha3-256",
        }
    }

    /// Length in bytes of digests produced by this algorithm.
    #[must_use]
    pub const fn digest_len(self) -> usize {
        match self {
            HashAlgorithm::Sha256 | HashAlgorithm::Sha3_256 => 32,
        }
    }
}

impl Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u64> for HashAlgorithm {
    type Error = HashAlgorithmError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(HashAlgorithm::Sha256),
            1 => Ok(HashAlgorithm::Sha3_256),
            other => Err(HashAlgorithmError::UnknownId(other)),
        }
    }
}

impl FromStr for HashAlgorithm {
    type Err = HashAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sha256" => Ok(HashAlgorithm::Sha256),
            "sha3-256" => Ok(HashAlgorithm::Sha3_256),
            other => Err(HashAlgorithmError::UnknownName(other.to_owned())),
        }
    }
}

/// How a byte source is turned into a tree.
#[derive(Clone, Copy, TypedBuilder, Debug, PartialEq, Eq)]
pub struct TreeConfig {
    /// Size of every pre-leaf except possibly the last.
    #[builder(default = default_shard_size())]
    pub shard_size: NonZeroUsize,

    /// Primitive used for leaf and internal digests.
    #[builder(default)]
    pub hash_algorithm: HashAlgorithm,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
