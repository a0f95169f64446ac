// Copyright (C) 2025, Ava Labs, Inc. All rights reserved.
// See the file LICENSE.md for licensing terms.

//! Wire format for [`PathNode`]s.
//!
//! A node travels as a JSON object with two fields:
//!
//! ```json
//! { "hash": "<standard base64 of the digest>", "position": "left" }
//! ```
//!
//! `position` is either `"left"` or `"right"`. A record with a malformed or
//! empty `hash`, any other `position`, or any shape other than an object with
//! exactly those two fields is rejected as a whole.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::position::UnknownPosition;
use crate::{MerklePath, PathNode, Position, TreeHash};

/// Why a wire record could not be decoded.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The input is not a `{hash, position}` record.
    #[error("malformed path node record: {0}")]
    Malformed(#[from] serde_json::Error),
    /// The `hash` field is not valid base64.
    #[error("invalid base64 in hash field: {0}")]
    InvalidHash(#[from] base64::DecodeError),
    /// The `hash` field decodes to zero bytes.
    #[error("empty hash field")]
    EmptyHash,
    /// The `position` field is not `"left"` or `"right"`.
    #[error("invalid position field: {0}")]
    UnknownPosition(#[from] UnknownPosition),
}

/// The record as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct WireNode {
    hash: String,
    position: String,
}

const FIELDS: &[&str] = &["hash", "position"];

#[derive(Deserialize)]
#[serde(field_identifier, rename_all = "lowercase")]
enum Field {
    Hash,
    Position,
}

// Only maps are accepted; a JSON array of the two values is not a record.
impl<'de> Deserialize<'de> for WireNode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_struct("WireNode", FIELDS, WireNodeVisitor)
    }
}

struct WireNodeVisitor;

impl<'de> Visitor<'de> for WireNodeVisitor {
    type Value = WireNode;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("an object with \"hash\" and \"position\" fields")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut hash: Option<String> = None;
        let mut position: Option<String> = None;

        while let Some(key) = map.next_key()? {
            match key {
                Field::Hash if hash.is_some() => return Err(de::Error::duplicate_field("hash")),
                Field::Hash => hash = Some(map.next_value()?),
                Field::Position if position.is_some() => {
                    return Err(de::Error::duplicate_field("position"));
                }
                Field::Position => position = Some(map.next_value()?),
            }
        }

        Ok(WireNode {
            hash: hash.ok_or_else(|| de::Error::missing_field("hash"))?,
            position: position.ok_or_else(|| de::Error::missing_field("position"))?,
        })
    }
}

impl From<PathNode> for WireNode {
    fn from(node: PathNode) -> Self {
        Self {
            hash: STANDARD.encode(&node.hash),
            position: node.position.as_str().to_owned(),
        }
    }
}

impl TryFrom<WireNode> for PathNode {
    type Error = DecodeError;

    fn try_from(wire: WireNode) -> Result<Self, Self::Error> {
        let position = wire.position.parse::<Position>()?;
        let hash = STANDARD.decode(wire.hash.as_bytes())?;
        if hash.is_empty() {
            return Err(DecodeError::EmptyHash);
        }
        Ok(PathNode::new(TreeHash::from(hash), position))
    }
}

/// Encodes a single node as a JSON record.
///
/// # Errors
///
/// Only fails if the JSON serializer does, which it does not for this record.
pub fn encode(node: &PathNode) -> Result<String, serde_json::Error> {
    serde_json::to_string(&WireNode::from(node.clone()))
}

/// Decodes a single node from a JSON record.
///
/// # Errors
///
/// See [`DecodeError`].
pub fn decode(record: &str) -> Result<PathNode, DecodeError> {
    let wire: WireNode = serde_json::from_str(record)?;
    PathNode::try_from(wire)
}

/// Encodes a whole path as a JSON array of records.
///
/// # Errors
///
/// Only fails if the JSON serializer does.
pub fn encode_path(path: &MerklePath) -> Result<String, serde_json::Error> {
    serde_json::to_string(path)
}

/// Decodes a JSON array of records. Any bad record rejects the whole path.
///
/// # Errors
///
/// See [`DecodeError`].
pub fn decode_path(records: &str) -> Result<MerklePath, DecodeError> {
    let wire: Vec<WireNode> = serde_json::from_str(records)?;
    wire.into_iter().map(PathNode::try_from).collect()
}
