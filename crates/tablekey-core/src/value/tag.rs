use crate::value::Value;

///
/// ValueTag
///
/// Stable value-variant tag used by diagnostics and kind checks.
///
/// IMPORTANT:
/// Tag values are part of stable behavior and must remain fixed.
///
#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ValueTag {
    Blob = 1,
    Bool = 2,
    Enum = 3,
    Int32 = 4,
    Int64 = 5,
    List = 6,
    Text = 7,
    Timestamp = 8,
    Uint32 = 9,
    Uint64 = 10,
    Ulid = 11,
}

impl ValueTag {
    #[must_use]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Stable human-readable value kind label for diagnostics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Blob => "Blob",
            Self::Bool => "Bool",
            Self::Enum => "Enum",
            Self::Int32 => "Int32",
            Self::Int64 => "Int64",
            Self::List => "List",
            Self::Text => "Text",
            Self::Timestamp => "Timestamp",
            Self::Uint32 => "Uint32",
            Self::Uint64 => "Uint64",
            Self::Ulid => "Ulid",
        }
    }
}

#[must_use]
pub(super) const fn tag_of(value: &Value) -> ValueTag {
    match value {
        Value::Blob(_) => ValueTag::Blob,
        Value::Bool(_) => ValueTag::Bool,
        Value::Enum(_) => ValueTag::Enum,
        Value::Int32(_) => ValueTag::Int32,
        Value::Int64(_) => ValueTag::Int64,
        Value::List(_) => ValueTag::List,
        Value::Text(_) => ValueTag::Text,
        Value::Timestamp(_) => ValueTag::Timestamp,
        Value::Uint32(_) => ValueTag::Uint32,
        Value::Uint64(_) => ValueTag::Uint64,
        Value::Ulid(_) => ValueTag::Ulid,
    }
}
