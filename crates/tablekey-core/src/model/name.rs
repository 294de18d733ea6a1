#![expect(clippy::cast_possible_truncation)]
//! Table identity invariants and construction.
//!
//! Invariants:
//! - Names are ASCII, non-empty, and bounded by `MAX_TABLE_NAME_LEN`.
//! - All construction paths validate invariants.

use crate::MAX_TABLE_NAME_LEN;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{
    cmp::Ordering,
    fmt::{self, Display},
};
use thiserror::Error as ThisError;

///
/// TableNameError
///

#[derive(Debug, Eq, PartialEq, ThisError)]
pub enum TableNameError {
    #[error("table name is empty")]
    Empty,

    #[error("table name length {len} exceeds max {max}")]
    TooLong { len: usize, max: usize },

    #[error("table name must be ASCII")]
    NonAscii,
}

///
/// TableName
///
/// Stable table identity carried by codecs and entries.
/// Fixed-size so it stays `Copy`.
///

#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub struct TableName {
    len: u8,
    bytes: [u8; MAX_TABLE_NAME_LEN],
}

impl TableName {
    pub fn try_from_str(name: &str) -> Result<Self, TableNameError> {
        let bytes = name.as_bytes();
        let len = bytes.len();

        if len == 0 {
            return Err(TableNameError::Empty);
        }
        if len > MAX_TABLE_NAME_LEN {
            return Err(TableNameError::TooLong {
                len,
                max: MAX_TABLE_NAME_LEN,
            });
        }
        if !bytes.is_ascii() {
            return Err(TableNameError::NonAscii);
        }

        let mut out = [0u8; MAX_TABLE_NAME_LEN];
        out[..len].copy_from_slice(bytes);

        Ok(Self {
            len: len as u8,
            bytes: out,
        })
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len()]
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        // `try_from_str` rejects non-ASCII input, so the stored bytes are
        // always valid UTF-8.
        std::str::from_utf8(self.as_bytes()).unwrap_or_default()
    }
}

impl Ord for TableName {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_bytes().cmp(other.as_bytes())
    }
}

impl PartialOrd for TableName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TableName({})", self.as_str())
    }
}

impl TryFrom<&str> for TableName {
    type Error = TableNameError;

    fn try_from(name: &str) -> Result<Self, Self::Error> {
        Self::try_from_str(name)
    }
}

impl Serialize for TableName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TableName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Self::try_from_str(&name).map_err(serde::de::Error::custom)
    }
}

///
/// TESTS
///
