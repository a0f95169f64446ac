// Copyright (C) 2025, Ava Labs, Inc. All rights reserved.
// See the file LICENSE.md for licensing terms.

use sha2::digest::Digest;

use crate::TreeHash;

/// Prefix fed to the hasher ahead of a pre-leaf.
pub const LEAF_PREFIX: u8 = 0x00;
/// Prefix fed to the hasher ahead of two concatenated child digests.
pub const INTERNAL_PREFIX: u8 = 0x01;

/// A resettable cryptographic hash primitive.
///
/// The tree only needs to feed bytes, take a fixed length output and start
/// over. Every tree (and every proof checked against it) must be hashed with a
/// single algorithm.
pub trait NodeHasher: Default {
    /// Absorbs `data`.
    fn update(&mut self, data: &[u8]);

    /// Returns the digest of everything absorbed since the last reset and
    /// resets the hasher.
    fn finalize_reset(&mut self) -> TreeHash;

    /// Drops anything absorbed so far.
    fn reset(&mut self);
}

macro_rules! impl_node_hasher {
    ($($hasher:ty),+ $(,)?) => {
        $(
            impl NodeHasher for $hasher {
                #[inline]
                fn update(&mut self, data: &[u8]) {
                    Digest::update(self, data);
                }

                #[inline]
                fn finalize_reset(&mut self) -> TreeHash {
                    TreeHash::from_slice(Digest::finalize_reset(self).as_slice())
                }

                #[inline]
                fn reset(&mut self) {
                    Digest::reset(self);
                }
            }
        )+
    };
}

impl_node_hasher!(sha2::Sha256, sha3::Sha3_256);

/// Domain separated hashing on top of a [`NodeHasher`].
///
/// Leaves are hashed as `H(0x00 || data)`, internal nodes as
/// `H(0x01 || left || right)`. The distinct prefixes keep a leaf digest from
/// ever being replayed as an internal node and the reverse.
#[derive(Debug, Default, Clone)]
pub struct DomainHasher<H> {
    inner: H,
}

impl<H: NodeHasher> DomainHasher<H> {
    /// Wraps an existing hasher instance.
    pub const fn new(inner: H) -> Self {
        Self { inner }
    }

    /// `H(0x00 || data)`
    pub fn leaf_hash(&mut self, data: &[u8]) -> TreeHash {
        self.inner.reset();
        self.inner.update(&[LEAF_PREFIX]);
        self.inner.update(data);
        self.inner.finalize_reset()
    }

    /// `H(0x01 || left || right)`. Swapping the arguments changes the result.
    pub fn internal_hash(&mut self, left: &[u8], right: &[u8]) -> TreeHash {
        self.inner.reset();
        self.inner.update(&[INTERNAL_PREFIX]);
        self.inner.update(left);
        self.inner.update(right);
        self.inner.finalize_reset()
    }
}

/// Leaf digest of `data` using a fresh `H`.
pub fn leaf_hash<H: NodeHasher>(data: &[u8]) -> TreeHash {
    DomainHasher::<H>::default().leaf_hash(data)
}

/// Internal digest of `left || right` using a fresh `H`.
pub fn internal_hash<H: NodeHasher>(left: &[u8], right: &[u8]) -> TreeHash {
    DomainHasher::<H>::default().internal_hash(left, right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;
    use sha2::Sha256;
    use sha3::Sha3_256;

    #[test]
    fn raw_sha256_vector() {
        let mut hasher = Sha256::default();
        NodeHasher::update(&mut hasher, b"2B");
        assert_eq!(
            NodeHasher::finalize_reset(&mut hasher),
            TreeHash::from(hex!(
                "5c19c5dfd9c3b4a25e2d34dc6eac5e5c2d6200aa5e3267e8423ccb679525be61"
            ))
        );
    }

    #[test]
    fn leaf_vector() {
        assert_eq!(
            leaf_hash::<Sha256>(b"2B"),
            TreeHash::from(hex!(
                "195a199755daa6abf966b59c3dee2183e25d1aa52e66a3a5ce31e4184740d8da"
            ))
        );
        assert_eq!(
            leaf_hash::<Sha3_256>(b"2B"),
            TreeHash::from(hex!(
                "a4e1a6177c7c7be7a68b712a82422ffb4ec44c6a1fdcf7f4b469dc489783d841"
            ))
        );
    }

    #[test]
    fn internal_vector() {
        let a = leaf_hash::<Sha256>(b"a");
        let b = leaf_hash::<Sha256>(b"b");
        assert_eq!(
            internal_hash::<Sha256>(&a, &b),
            TreeHash::from(hex!(
                "b137985ff484fb600db93107c77b0365c80d78f5b429ded0fd97361d077999eb"
            ))
        );
        assert_ne!(internal_hash::<Sha256>(&a, &b), internal_hash::<Sha256>(&b, &a));
    }

    #[test]
    fn prefixes_separate_domains() {
        // the same 64 bytes hashed as a leaf and as a pair of children
        let a = leaf_hash::<Sha256>(b"a");
        let b = leaf_hash::<Sha256>(b"b");
        let joined = [a.as_slice(), b.as_slice()].concat();
        assert_ne!(leaf_hash::<Sha256>(&joined), internal_hash::<Sha256>(&a, &b));
    }

    #[test]
    fn no_state_leaks_between_calls() {
        let mut hasher = DomainHasher::new(Sha256::default());
        // leave junk in the primitive before the first domain hash
        NodeHasher::update(&mut hasher.inner, b"garbage");
        let first = hasher.leaf_hash(b"2B");
        let second = hasher.leaf_hash(b"2B");
        assert_eq!(first, second);
        assert_eq!(first, leaf_hash::<Sha256>(b"2B"));
    }
}
