// Copyright (C) 2025, Ava Labs, Inc. All rights reserved.
// See the file LICENSE.md for licensing terms.

use std::io::{self, ErrorKind, Read};
use std::num::NonZeroUsize;

use crate::logger::{trace, warn};

/// Failure while reading shards from a byte source.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ShardError {
    /// The underlying reader failed.
    #[error("failed to read shard {index}: {source}")]
    Read {
        /// Index of the shard being read when the reader failed.
        index: usize,
        /// The reader's error.
        #[source]
        source: io::Error,
    },
}

/// Splits a reader into pre-leaves of `shard_size` bytes.
///
/// Every shard but the last is exactly `shard_size` bytes long; the last one
/// holds whatever remains. An empty reader yields nothing. After an error the
/// iterator is exhausted.
#[derive(Debug)]
pub struct Shards<R> {
    reader: R,
    shard_size: NonZeroUsize,
    index: usize,
    done: bool,
}

impl<R: Read> Shards<R> {
    /// Wraps `reader`.
    pub const fn new(reader: R, shard_size: NonZeroUsize) -> Self {
        Self {
            reader,
            shard_size,
            index: 0,
            done: false,
        }
    }

    /// Fills `buf` as far as the reader allows, returns the byte count.
    fn fill(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut filled = 0;
        while let Some(rest) = buf.get_mut(filled..).filter(|rest| !rest.is_empty()) {
            match self.reader.read(rest) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
        Ok(filled)
    }
}

impl<R: Read> Iterator for Shards<R> {
    type Item = Result<Box<[u8]>, ShardError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut buf = vec![0; self.shard_size.get()];
        match self.fill(&mut buf) {
            Ok(0) => {
                trace!("source exhausted after {} shards", self.index);
                self.done = true;
                None
            }
            Ok(n) => {
                if n < buf.len() {
                    // a short shard can only be the last one
                    self.done = true;
                }
                buf.truncate(n);
                self.index += 1;
                Some(Ok(buf.into_boxed_slice()))
            }
            Err(source) => {
                warn!("reading shard {} failed: {source}", self.index);
                self.done = true;
                Some(Err(ShardError::Read {
                    index: self.index,
                    source,
                }))
            }
        }
    }
}

impl<R: Read> std::iter::FusedIterator for Shards<R> {}

/// Reads `reader` to the end and returns its shards, see [`Shards`].
///
/// # Errors
///
/// Returns [`ShardError::Read`] if the reader fails before end of input.
pub fn shard<R: Read>(reader: R, shard_size: NonZeroUsize) -> Result<Vec<Box<[u8]>>, ShardError> {
    Shards::new(reader, shard_size).collect()
}
