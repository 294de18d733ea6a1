use crate::value::{Timestamp, Value, ValueTag};
use std::fmt::{self, Display};
use ulid::Ulid;

///
/// FieldModel
/// Runtime field metadata consumed by key codecs.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldModel {
    /// Field name as used in records and key definitions.
    pub name: String,
    /// Runtime type shape; selects the field codec.
    pub kind: FieldKind,
}

impl FieldModel {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

///
/// FieldKind
///
/// Type surface of one table field.
/// Aligned with `Value` variants one-to-one.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum FieldKind {
    // Scalars
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

    // Collections
    List(Box<Self>),
}

impl FieldKind {
    /// Whether values of this kind have an order-preserving key encoding.
    #[must_use]
    pub const fn is_key_encodable(&self) -> bool {
        !matches!(self, Self::List(_))
    }

    /// Value tag every value of this kind carries.
    #[must_use]
    pub const fn value_tag(&self) -> ValueTag {
        match self {
            Self::Blob => ValueTag::Blob,
            Self::Bool => ValueTag::Bool,
            Self::Enum => ValueTag::Enum,
            Self::Int32 => ValueTag::Int32,
            Self::Int64 => ValueTag::Int64,
            Self::Text => ValueTag::Text,
            Self::Timestamp => ValueTag::Timestamp,
            Self::Uint32 => ValueTag::Uint32,
            Self::Uint64 => ValueTag::Uint64,
            Self::Ulid => ValueTag::Ulid,
            Self::List(_) => ValueTag::List,
        }
    }

    /// Whether `value` is a value of this kind.
    ///
    /// List elements are checked recursively.
    #[must_use]
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::List(inner), Value::List(items)) => items.iter().all(|item| inner.accepts(item)),
            _ => self.value_tag() == value.tag(),
        }
    }

    /// Value a record reads for this kind when the field is unset.
    #[must_use]
    pub fn default_value(&self) -> Value {
        match self {
            Self::Blob => Value::Blob(Vec::new()),
            Self::Bool => Value::Bool(false),
            Self::Enum => Value::Enum(0),
            Self::Int32 => Value::Int32(0),
            Self::Int64 => Value::Int64(0),
            Self::Text => Value::Text(String::new()),
            Self::Timestamp => Value::Timestamp(Timestamp::default()),
            Self::Uint32 => Value::Uint32(0),
            Self::Uint64 => Value::Uint64(0),
            Self::Ulid => Value::Ulid(Ulid::nil()),
            Self::List(_) => Value::List(Vec::new()),
        }
    }
}

impl Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List(inner) => write!(f, "List<{inner}>"),
            scalar => f.write_str(scalar.value_tag().label()),
        }
    }
}
