// Copyright (C) 2025, Ava Labs, Inc. All rights reserved.
// See the file LICENSE.md for licensing terms.

use std::fmt::{self, Display};
use std::str::FromStr;

/// Which side of the running hash a sibling digest is concatenated on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    /// `H(sibling || running)`
    Left,
    /// `H(running || sibling)`
    Right,
}

impl Position {
    /// Wire token for the left side.
    pub const LEFT: &'static str = "left";
    /// Wire token for the right side.
    pub const RIGHT: &'static str = "right";

    /// The wire token for this side.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Position::Left => Self::LEFT,
            Position::Right => Self::RIGHT,
        }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An unknown position token was found.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown position {0:?}; expected \"left\" or \"right\"")]
pub struct UnknownPosition(pub String);

impl FromStr for Position {
    type Err = UnknownPosition;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::LEFT => Ok(Position::Left),
            Self::RIGHT => Ok(Position::Right),
            other => Err(UnknownPosition(other.to_owned())),
        }
    }
}

/// What happens to the digest at some index of a level when the next level
/// up is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pairing {
    /// Last digest of an odd length level. It moves up unchanged and has no
    /// sibling.
    Promoted,
    /// Hashed together with `sibling`, which sits on `position` relative to
    /// this index.
    Paired {
        /// Index of the sibling in the same level.
        sibling: usize,
        /// Side the sibling is on.
        position: Position,
    },
}

/// Decides how `index` in a level of `level_len` digests is carried upward.
///
/// Both the tree builder and the path generator go through this function so
/// they always agree on which digests were promoted.
#[must_use]
pub const fn pairing(index: usize, level_len: usize) -> Pairing {
    if level_len % 2 != 0 && index == level_len - 1 {
        Pairing::Promoted
    } else if index % 2 != 0 {
        Pairing::Paired {
            sibling: index - 1,
            position: Position::Left,
        }
    } else {
        Pairing::Paired {
            sibling: index + 1,
            position: Position::Right,
        }
    }
}
