//! Module: index::unique
//! Responsibility: unique secondary index keys; the primary-key tail rides in the value.
//! Does not own: uniqueness enforcement (the store rejects a second write to a key).
//! Boundary: key = prefix + index fields, value = prefix-less primary-key tail.

use crate::{
    config::CodecConfig,
    error::CodecError,
    index::{
        IndexCodec,
        entry::{Entry, IndexKeyEntry},
        field_map::{PrimaryKeyFieldMap, PrimaryKeySlot},
    },
    key::{KeyCodec, KeyDecode},
    model::{TableModel, TableName},
    value::{Record, Value},
};

///
/// UniqueKeyCodec
///
/// At most one row per index value, so the key holds only the index fields.
/// Primary-key fields outside the index are stored as the value, encoded with
/// the same ordered field layout but no prefix.
///

#[derive(Clone, Debug)]
pub struct UniqueKeyCodec {
    table: TableName,
    key_codec: KeyCodec,
    value_codec: KeyCodec,
    pk_map: PrimaryKeyFieldMap,
}

impl UniqueKeyCodec {
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
        let key_codec = KeyCodec::with_config(prefix, table, pk_map.index_fields(), config)?;
        let value_codec = KeyCodec::with_config(Vec::new(), table, pk_map.tail_fields(), config)?;

        tracing::debug!(
            table = %table.name(),
            index = ?pk_map.index_fields(),
            tail = ?pk_map.tail_fields(),
            slots = ?pk_map.slots(),
            "unique key codec built"
        );

        Ok(Self {
            table: table.name(),
            key_codec,
            value_codec,
            pk_map,
        })
    }

    #[must_use]
    pub const fn primary_key_map(&self) -> &PrimaryKeyFieldMap {
        &self.pk_map
    }

    /// Codec for the primary-key tail stored as the value.
    #[must_use]
    pub const fn value_codec(&self) -> &KeyCodec {
        &self.value_codec
    }

    fn decode_tail(&self, value: &[u8]) -> Result<Vec<Value>, CodecError> {
        match self.value_codec.decode_fields(value)? {
            KeyDecode::Full(tail) => Ok(tail),
            KeyDecode::Partial(tail) => Err(CodecError::IncompleteKey {
                decoded: tail.len(),
                expected: self.value_codec.field_count(),
            }),
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
        if !entry.unique {
            return Err(CodecError::bad_entry(
                self.table,
                "non-unique index entry passed to a unique index codec",
            ));
        }

        Ok(entry)
    }
}

impl IndexCodec for UniqueKeyCodec {
    fn table_name(&self) -> TableName {
        self.table
    }

    fn key_codec(&self) -> &KeyCodec {
        &self.key_codec
    }

    fn encode_kv_from_record(&self, record: &Record) -> Result<(Vec<u8>, Vec<u8>), CodecError> {
        let (_, key) = self.key_codec.encode_from_record(record)?;
        let (_, value) = self.value_codec.encode_from_record(record)?;

        Ok((key, value))
    }

    /// A prefix-only key yields no primary key and leaves `value` unread.
    fn decode_index_key(
        &self,
        key: &[u8],
        value: &[u8],
    ) -> Result<(Vec<Value>, Option<Vec<Value>>), CodecError> {
        match self.key_codec.decode(key)? {
            KeyDecode::Full(index_values) => {
                let tail = self.decode_tail(value)?;
                let pk = self.pk_map.primary_key_from_parts(&index_values, &tail);
                Ok((index_values, Some(pk)))
            }
            KeyDecode::Partial(index_values) => Ok((index_values, None)),
        }
    }

    fn decode_entry(&self, key: &[u8], value: &[u8]) -> Result<Entry, CodecError> {
        let (index_values, primary_key) = self.decode_index_key(key, value)?;

        Ok(Entry::Index(IndexKeyEntry {
            table_name: self.table,
            unique: true,
            fields: self.key_codec.field_names().to_vec(),
            index_values,
            primary_key,
        }))
    }

    fn encode_entry(&self, entry: &Entry) -> Result<(Vec<u8>, Vec<u8>), CodecError> {
        let entry = self.check_entry(entry)?;
        let Some(pk) = &entry.primary_key else {
            return Err(CodecError::bad_entry(
                self.table,
                "unique index entry has no primary key",
            ));
        };
        if pk.len() != self.pk_map.slots().len() {
            return Err(CodecError::FieldCountMismatch {
                expected: self.pk_map.slots().len(),
                found: pk.len(),
            });
        }

        // shared fields are stored once, in the key
        for (slot, pk_value) in self.pk_map.slots().iter().zip(pk) {
            if let PrimaryKeySlot::Index(position) = *slot
                && entry.index_values.get(position) != Some(pk_value)
            {
                return Err(CodecError::bad_entry(
                    self.table,
                    "primary key disagrees with the index values it shares",
                ));
            }
        }

        let key = self.key_codec.encode(&entry.index_values)?;
        let value = self
            .value_codec
            .encode(&self.pk_map.tail_from_primary_key(pk))?;

        Ok((key, value))
    }
}
