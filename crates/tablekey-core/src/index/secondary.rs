//! Module: index::secondary
//! Responsibility: non-unique secondary index keys (index fields + primary-key tail).
//! Does not own: per-field layouts or row payloads.
//! Boundary: stored value is a fixed sentinel; the row lives under the primary key.

use crate::{
    config::CodecConfig,
    error::CodecError,
    index::{
        IndexCodec,
        entry::{Entry, IndexKeyEntry},
        field_map::PrimaryKeyFieldMap,
    },
    key::{KeyCodec, KeyDecode},
    model::{TableModel, TableName},
    value::{Record, Value},
};

/// Stored value of every non-unique index entry.
pub const SENTINEL_VALUE: [u8; 1] = [0x00];

///
/// IndexKeyCodec
///
/// Key: prefix, index fields, then primary-key fields not already indexed.
/// Many rows may share index values; the primary-key tail keeps keys distinct.
///

#[derive(Clone, Debug)]
pub struct IndexKeyCodec {
    table: TableName,
    key_codec: KeyCodec,
    pk_map: PrimaryKeyFieldMap,
}

impl IndexKeyCodec {
    pub fn new<S: AsRef<str>>(
        prefix: impl Into<Vec<u8>>,
        table: &TableModel,
        index_fields: &[S],
    ) -> Result<Self, CodecError> {
        Self::with_config(prefix, table, index_fields, &CodecConfig::default())
    }

    pub fn with_config<S: AsRef<str>>(
        prefix: impl Into<Vec<u8>>,
        table: &TableModel,
        index_fields: &[S],
        config: &CodecConfig,
    ) -> Result<Self, CodecError> {
        if index_fields.is_empty() {
            return Err(CodecError::EmptyIndex {
                table: table.name(),
            });
        }

        let pk_map = PrimaryKeyFieldMap::build(index_fields, table.primary_key());
        let key_codec = KeyCodec::with_config(prefix, table, pk_map.merged_fields(), config)?;

        tracing::debug!(
            table = %table.name(),
            merged = ?pk_map.merged_fields(),
            slots = ?pk_map.slots(),
            "index key codec built"
        );

        Ok(Self {
            table: table.name(),
            key_codec,
            pk_map,
        })
    }

    #[must_use]
    pub const fn primary_key_map(&self) -> &PrimaryKeyFieldMap {
        &self.pk_map
    }

    /// Decode an index key into its merged values and, when every field is
    /// present, the primary key of the row it points at.
    pub fn decode_index_key(
        &self,
        key: &[u8],
    ) -> Result<(Vec<Value>, Option<Vec<Value>>), CodecError> {
        match self.key_codec.decode(key)? {
            KeyDecode::Full(values) => {
                let pk = self.pk_map.primary_key_from_merged(&values);
                Ok((values, Some(pk)))
            }
            KeyDecode::Partial(values) => Ok((values, None)),
        }
    }

    fn check_entry<'a>(&self, entry: &'a Entry) -> Result<&'a IndexKeyEntry, CodecError> {
        let Entry::Index(entry) = entry else {
            return Err(CodecError::bad_entry(self.table, "expected an index entry"));
        };
        if entry.table_name != self.table {
            return Err(CodecError::bad_entry(
                self.table,
                "index entry belongs to another table",
            ));
        }
        if entry.unique {
            return Err(CodecError::bad_entry(
                self.table,
                "unique index entry passed to a non-unique index codec",
            ));
        }

        Ok(entry)
    }
}

impl IndexCodec for IndexKeyCodec {
    fn table_name(&self) -> TableName {
        self.table
    }

    fn key_codec(&self) -> &KeyCodec {
        &self.key_codec
    }

    fn encode_kv_from_record(&self, record: &Record) -> Result<(Vec<u8>, Vec<u8>), CodecError> {
        let (_, key) = self.key_codec.encode_from_record(record)?;

        Ok((key, SENTINEL_VALUE.to_vec()))
    }

    fn decode_index_key(
        &self,
        key: &[u8],
        _value: &[u8],
    ) -> Result<(Vec<Value>, Option<Vec<Value>>), CodecError> {
        Self::decode_index_key(self, key)
    }

    fn decode_entry(&self, key: &[u8], _value: &[u8]) -> Result<Entry, CodecError> {
        let (index_values, primary_key) = Self::decode_index_key(self, key)?;

        Ok(Entry::Index(IndexKeyEntry {
            table_name: self.table,
            unique: false,
            fields: self.key_codec.field_names().to_vec(),
            index_values,
            primary_key,
        }))
    }

    fn encode_entry(&self, entry: &Entry) -> Result<(Vec<u8>, Vec<u8>), CodecError> {
        let entry = self.check_entry(entry)?;
        let key = self.key_codec.encode_prefix(&entry.index_values)?;

        Ok((key, SENTINEL_VALUE.to_vec()))
    }
}
