//! Module: key::field
//! Responsibility: order-preserving encode/decode of one field value.
//! Does not own: key prefixes, field sequencing, or arity checks.
//! Boundary: `KeyCodec` drives one `FieldCodec` per key field over a shared cursor.

mod ordered;


use crate::{
    key::reader::KeyReader,
    model::FieldKind,
    value::{Timestamp, Value, ValueTag},
};
use ordered::OrderedField;
use thiserror::Error as ThisError;
use ulid::Ulid;

///
/// FieldEncodeError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum FieldEncodeError {
    #[error("expected a {expected} value, found {}", .found.label())]
    KindMismatch { expected: FieldKind, found: ValueTag },
}

///
/// FieldDecodeError
///
/// Malformed field bytes. Running out of input exactly on a field boundary is
/// not an error; `FieldCodec::decode` reports it as `Ok(None)`.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum FieldDecodeError {
    #[error("field truncated: needed {needed} bytes, {remaining} remaining")]
    Truncated { needed: usize, remaining: usize },

    #[error("invalid bool byte {byte:#04x}")]
    InvalidBool { byte: u8 },

    #[error("invalid escape byte {byte:#04x}")]
    InvalidEscape { byte: u8 },

    #[error("byte segment is missing its terminator")]
    UnterminatedSegment,

    #[error("text field is not valid UTF-8")]
    InvalidUtf8,

    #[error("timestamp nanos {nanos} out of range")]
    InvalidNanos { nanos: u32 },
}

///
/// FieldCodec
///
/// Codec for one key-encodable field kind.
/// Stateless and `Copy`; every key field owns one.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum FieldCodec {
    Blob,
    Bool,
    Enum,
    Int32,
    Int64,
    Text,
    Timestamp,
    Uint32,
    Uint64,
    Ulid,
}

impl FieldCodec {
    /// Select the codec for a field kind; `None` for kinds with no key encoding.
    #[must_use]
    pub const fn for_kind(kind: &FieldKind) -> Option<Self> {
        let codec = match kind {
            FieldKind::Blob => Self::Blob,
            FieldKind::Bool => Self::Bool,
            FieldKind::Enum => Self::Enum,
            FieldKind::Int32 => Self::Int32,
            FieldKind::Int64 => Self::Int64,
            FieldKind::Text => Self::Text,
            FieldKind::Timestamp => Self::Timestamp,
            FieldKind::Uint32 => Self::Uint32,
            FieldKind::Uint64 => Self::Uint64,
            FieldKind::Ulid => Self::Ulid,
            FieldKind::List(_) => return None,
        };

        Some(codec)
    }

    #[must_use]
    pub const fn kind(self) -> FieldKind {
        match self {
            Self::Blob => FieldKind::Blob,
            Self::Bool => FieldKind::Bool,
            Self::Enum => FieldKind::Enum,
            Self::Int32 => FieldKind::Int32,
            Self::Int64 => FieldKind::Int64,
            Self::Text => FieldKind::Text,
            Self::Timestamp => FieldKind::Timestamp,
            Self::Uint32 => FieldKind::Uint32,
            Self::Uint64 => FieldKind::Uint64,
            Self::Ulid => FieldKind::Ulid,
        }
    }

    /// Encoded width for fixed-width kinds; `None` for escaped byte strings.
    #[must_use]
    pub const fn fixed_size(self) -> Option<usize> {
        match self {
            Self::Bool => Some(1),
            Self::Enum | Self::Int32 | Self::Uint32 => Some(4),
            Self::Int64 | Self::Uint64 => Some(8),
            Self::Timestamp => Some(12),
            Self::Ulid => Some(16),
            Self::Blob | Self::Text => None,
        }
    }

    /// Append the order-preserving fragment for `value`.
    pub fn encode(self, value: &Value, out: &mut Vec<u8>) -> Result<(), FieldEncodeError> {
        match (self, value) {
            (Self::Blob, Value::Blob(v)) => v.encode_ordered(out),
            (Self::Bool, Value::Bool(v)) => v.encode_ordered(out),
            (Self::Enum, Value::Enum(v)) | (Self::Int32, Value::Int32(v)) => v.encode_ordered(out),
            (Self::Int64, Value::Int64(v)) => v.encode_ordered(out),
            (Self::Text, Value::Text(v)) => v.encode_ordered(out),
            (Self::Timestamp, Value::Timestamp(v)) => v.encode_ordered(out),
            (Self::Uint32, Value::Uint32(v)) => v.encode_ordered(out),
            (Self::Uint64, Value::Uint64(v)) => v.encode_ordered(out),
            (Self::Ulid, Value::Ulid(v)) => v.encode_ordered(out),
            _ => {
                return Err(FieldEncodeError::KindMismatch {
                    expected: self.kind(),
                    found: value.tag(),
                });
            }
        }

        Ok(())
    }

    /// Consume one field from `reader`.
    ///
    /// Returns `Ok(None)` when the reader is already exhausted, which marks a
    /// prefix key that stops on this field boundary.
    pub fn decode(self, reader: &mut KeyReader<'_>) -> Result<Option<Value>, FieldDecodeError> {
        if reader.is_empty() {
            return Ok(None);
        }

        let value = match self {
            Self::Blob => Value::Blob(Vec::<u8>::decode_ordered(reader)?),
            Self::Bool => Value::Bool(bool::decode_ordered(reader)?),
            Self::Enum => Value::Enum(i32::decode_ordered(reader)?),
            Self::Int32 => Value::Int32(i32::decode_ordered(reader)?),
            Self::Int64 => Value::Int64(i64::decode_ordered(reader)?),
            Self::Text => Value::Text(String::decode_ordered(reader)?),
            Self::Timestamp => Value::Timestamp(Timestamp::decode_ordered(reader)?),
            Self::Uint32 => Value::Uint32(u32::decode_ordered(reader)?),
            Self::Uint64 => Value::Uint64(u64::decode_ordered(reader)?),
            Self::Ulid => Value::Ulid(Ulid::decode_ordered(reader)?),
        };

        Ok(Some(value))
    }
}
