//! Module: value
//! Responsibility: the field-value tagged union and schema-described records.
//! Does not own: byte encodings (see `key::field`).
//! Boundary: the only structured values codecs accept and return.

mod record;
mod tag;


use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use ulid::Ulid;

// re-exports
pub use record::Record;
pub use tag::ValueTag;

///
/// Timestamp
///
/// Seconds since the Unix epoch plus sub-second nanos.
/// Ordered by (seconds, nanos); `nanos` is always below one billion.
///

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub struct Timestamp {
    seconds: i64,
    nanos: u32,
}

impl Timestamp {
    pub const NANOS_PER_SECOND: u32 = 1_000_000_000;

    /// Build a timestamp; returns `None` when `nanos` is not a sub-second value.
    #[must_use]
    pub const fn try_new(seconds: i64, nanos: u32) -> Option<Self> {
        if nanos >= Self::NANOS_PER_SECOND {
            return None;
        }

        Some(Self { seconds, nanos })
    }

    #[must_use]
    pub const fn from_seconds(seconds: i64) -> Self {
        Self { seconds, nanos: 0 }
    }

    #[must_use]
    pub const fn seconds(self) -> i64 {
        self.seconds
    }

    #[must_use]
    pub const fn nanos(self) -> u32 {
        self.nanos
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:09}", self.seconds, self.nanos)
    }
}

///
/// Value
///
/// One field value. Ordering is only meaningful between values of the same
/// variant; every variant except `List` may appear in a key.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Value {
    Blob(Vec<u8>),
    Bool(bool),
    /// Enumeration discriminant.
    Enum(i32),
    Int32(i32),
    Int64(i64),
    /// Ordered list of values; never key-encodable.
    List(Vec<Self>),
    Text(String),
    Timestamp(Timestamp),
    Uint32(u32),
    Uint64(u64),
    Ulid(Ulid),
}

impl Value {
    #[must_use]
    pub const fn tag(&self) -> ValueTag {
        tag::tag_of(self)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blob(bytes) => {
                f.write_str("0x")?;
                for byte in bytes {
                    write!(f, "{byte:02x}")?;
                }
                Ok(())
            }
            Self::Bool(v) => write!(f, "{v}"),
            Self::Enum(v) => write!(f, "#{v}"),
            Self::Int32(v) => write!(f, "{v}"),
            Self::Int64(v) => write!(f, "{v}"),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Text(v) => write!(f, "{v:?}"),
            Self::Timestamp(v) => write!(f, "{v}"),
            Self::Uint32(v) => write!(f, "{v}"),
            Self::Uint64(v) => write!(f, "{v}"),
            Self::Ulid(v) => write!(f, "{v}"),
        }
    }
}

macro_rules! impl_from_for_value {
    ( $( $type:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl From<$type> for Value {
                fn from(v: $type) -> Self {
                    Self::$variant(v.into())
                }
            }
        )*
    };
}

impl_from_for_value! {
    bool => Bool,
    i32 => Int32,
    i64 => Int64,
    u32 => Uint32,
    u64 => Uint64,
    &str => Text,
    String => Text,
    Vec<u8> => Blob,
    &[u8] => Blob,
    Timestamp => Timestamp,
    Ulid => Ulid,
}
