//! Module: error
//! Responsibility: crate-level codec error surface and its stable classification.
//! Does not own: per-layer encode/decode failure detail (see `key::field`, `model`).
//! Boundary: every public codec operation returns `CodecError`.

use crate::{
    key::{FieldDecodeError, FieldEncodeError},
    model::{FieldKind, TableModelError, TableName},
    serialize::SerializeError,
};
use derive_more::Display;
use thiserror::Error as ThisError;

///
/// ErrorClass
///
/// Stable routing class for codec failures.
/// Callers branch on the class instead of matching every variant.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum ErrorClass {
    /// Stored bytes violate the layout contract.
    Corruption,
    /// The caller broke a codec contract (wrong arity, wrong table, bad range).
    InvariantViolation,
    /// The request is well-formed but not supported by this codec.
    Unsupported,
    /// Failure inside a collaborator (row payload serializer).
    Internal,
}

///
/// CodecError
///
/// Structured error for key/value codec operations.
/// The prefix-key condition is not an error; see `KeyDecode::Partial`.
///

#[derive(Debug, ThisError)]
pub enum CodecError {
    #[error("expected {expected} key values, found {found}")]
    FieldCountMismatch { expected: usize, found: usize },

    #[error("key does not start with prefix {expected:02x?}")]
    BadPrefix { expected: Vec<u8> },

    #[error("malformed key field '{field}': {source}")]
    MalformedField {
        field: String,
        #[source]
        source: FieldDecodeError,
    },

    #[error("{len} trailing bytes after the last key field")]
    TrailingBytes { len: usize },

    #[error("bad entry for table '{table}': {reason}")]
    BadDecodeEntry {
        table: TableName,
        reason: &'static str,
    },

    #[error("key field '{field}': {source}")]
    KindMismatch {
        field: String,
        #[source]
        source: FieldEncodeError,
    },

    #[error("incomplete key: decoded {decoded} of {expected} fields")]
    IncompleteKey { decoded: usize, expected: usize },

    #[error("row payload decode failed: {0}")]
    ValueDecode(#[source] SerializeError),

    #[error("row payload encode failed: {0}")]
    ValueEncode(#[source] SerializeError),

    #[error("field '{field}' is not defined on table '{table}'")]
    UnknownField { table: TableName, field: String },

    #[error("field '{field}' appears more than once in a key")]
    DuplicateField { field: String },

    #[error("field '{field}' of kind {kind} cannot be part of a key")]
    UnsupportedKeyKind { field: String, kind: FieldKind },

    #[error("index on table '{table}' has no fields")]
    EmptyIndex { table: TableName },

    #[error("key has {count} fields (max {max})")]
    TooManyKeyFields { count: usize, max: usize },

    #[error("encoded key is {len} bytes (max {max})")]
    KeyTooLarge { len: usize, max: usize },

    #[error("range start sorts after range end")]
    InvalidRange,

    #[error("table model invalid: {0}")]
    Model(#[from] TableModelError),
}

impl CodecError {
    pub(crate) const fn bad_entry(table: TableName, reason: &'static str) -> Self {
        Self::BadDecodeEntry { table, reason }
    }

    /// Stable class for this error.
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::MalformedField { .. }
            | Self::TrailingBytes { .. }
            | Self::IncompleteKey { .. }
            | Self::ValueDecode(_) => ErrorClass::Corruption,

            Self::FieldCountMismatch { .. }
            | Self::BadPrefix { .. }
            | Self::BadDecodeEntry { .. }
            | Self::KindMismatch { .. }
            | Self::DuplicateField { .. }
            | Self::EmptyIndex { .. }
            | Self::InvalidRange
            | Self::Model(_) => ErrorClass::InvariantViolation,

            Self::UnknownField { .. }
            | Self::UnsupportedKeyKind { .. }
            | Self::TooManyKeyFields { .. }
            | Self::KeyTooLarge { .. } => ErrorClass::Unsupported,

            Self::ValueEncode(_) => ErrorClass::Internal,
        }
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}: {self}", self.class())
    }
}

///
/// TESTS
///
