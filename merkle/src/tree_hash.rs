// Copyright (C) 2025, Ava Labs, Inc. All rights reserved.
// See the file LICENSE.md for licensing terms.

use std::fmt::{self, Debug, Display, LowerHex};
use std::ops::Deref;
use std::str::FromStr;

use smallvec::SmallVec;

/// A digest stored in a [`MerkleTree`](crate::MerkleTree).
///
/// The length is whatever the configured [`NodeHasher`](crate::NodeHasher)
/// produces. 32 byte digests, the common case, are stored inline.
#[derive(PartialEq, Eq, Clone, Default, Hash, PartialOrd, Ord)]
pub struct TreeHash(SmallVec<[u8; 32]>);

/// Returned when a hex string cannot be turned into a [`TreeHash`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseTreeHashError {
    /// The string was empty.
    #[error("empty hash string")]
    Empty,
    /// The string was not valid hex.
    #[error("invalid hex hash: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

impl TreeHash {
    /// Copies `bytes` into a new hash.
    #[must_use]
    pub fn from_slice(bytes: &[u8]) -> Self {
        TreeHash(SmallVec::from_slice(bytes))
    }

    /// The digest bytes.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Number of bytes in the digest.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for the zero length hash, which no real hasher produces.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Lowercase hex rendering of the digest.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl Deref for TreeHash {
    type Target = [u8];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<[u8]> for TreeHash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for TreeHash {
    fn from(value: [u8; 32]) -> Self {
        TreeHash(SmallVec::from_buf(value))
    }
}

impl From<&[u8]> for TreeHash {
    fn from(value: &[u8]) -> Self {
        TreeHash::from_slice(value)
    }
}

impl From<Vec<u8>> for TreeHash {
    fn from(value: Vec<u8>) -> Self {
        TreeHash(SmallVec::from_vec(value))
    }
}

impl Debug for TreeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(&self.0))
    }
}

impl Display for TreeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt(self, f)
    }
}

impl LowerHex for TreeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str("0x")?;
        }
        Debug::fmt(self, f)
    }
}

impl FromStr for TreeHash {
    type Err = ParseTreeHashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        if s.is_empty() {
            return Err(ParseTreeHashError::Empty);
        }
        Ok(hex::decode(s)?.into())
    }
}
