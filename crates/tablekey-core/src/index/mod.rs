//! Module: index
//! Responsibility: table-level codecs mapping records and entries to stored key/value pairs.
//! Does not own: byte layouts (see `key`) or storage and iteration.
//! Boundary: the table layer holds codecs as `&dyn IndexCodec`.

mod entry;
mod field_map;
mod primary;
mod secondary;
mod unique;

#[cfg(test)]
mod tests;

pub use entry::{Entry, IndexKeyEntry, PrimaryKeyEntry};
pub use field_map::{PrimaryKeyFieldMap, PrimaryKeySlot};
pub use primary::PrimaryKeyCodec;
pub use secondary::{IndexKeyCodec, SENTINEL_VALUE};
pub use unique::UniqueKeyCodec;

use crate::{
    error::CodecError,
    key::KeyCodec,
    model::TableName,
    value::{Record, Value},
};

///
/// IndexCodec
///
/// Shared surface of the primary, unique, and non-unique codecs.
/// Implementors are immutable after construction.
///

pub trait IndexCodec: Send + Sync {
    fn table_name(&self) -> TableName;

    /// Codec for the stored key bytes.
    fn key_codec(&self) -> &KeyCodec;

    /// Build the stored `(key, value)` pair for `record`.
    fn encode_kv_from_record(&self, record: &Record) -> Result<(Vec<u8>, Vec<u8>), CodecError>;

    /// Decode the indexed values and, if recoverable, the row's primary key.
    fn decode_index_key(
        &self,
        key: &[u8],
        value: &[u8],
    ) -> Result<(Vec<Value>, Option<Vec<Value>>), CodecError>;

    fn decode_entry(&self, key: &[u8], value: &[u8]) -> Result<Entry, CodecError>;

    fn encode_entry(&self, entry: &Entry) -> Result<(Vec<u8>, Vec<u8>), CodecError>;
}
