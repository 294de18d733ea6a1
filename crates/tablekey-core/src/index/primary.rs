//! Module: index::primary
//! Responsibility: primary-key rows (ordered key + CBOR row payload).
//! Does not own: secondary index maintenance.
//! Boundary: primary-key fields live only in the key, never in the payload.

use crate::{
    config::CodecConfig,
    error::CodecError,
    index::{
        IndexCodec,
        entry::{Entry, PrimaryKeyEntry},
    },
    key::{KeyCodec, KeyDecode},
    model::{TableModel, TableName},
    serialize::{deserialize_bounded, serialize},
    value::{Record, Value},
};

///
/// PrimaryKeyCodec
///

#[derive(Clone, Debug)]
pub struct PrimaryKeyCodec {
    table: TableName,
    key_codec: KeyCodec,
    max_row_bytes: usize,
}

impl PrimaryKeyCodec {
    pub fn new(prefix: impl Into<Vec<u8>>, table: &TableModel) -> Result<Self, CodecError> {
        Self::with_config(prefix, table, &CodecConfig::default())
    }

    pub fn with_config(
        prefix: impl Into<Vec<u8>>,
        table: &TableModel,
        config: &CodecConfig,
    ) -> Result<Self, CodecError> {
        let key_codec = KeyCodec::with_config(prefix, table, table.primary_key(), config)?;

        tracing::debug!(
            table = %table.name(),
            primary_key = ?table.primary_key(),
            "primary key codec built"
        );

        Ok(Self {
            table: table.name(),
            key_codec,
            max_row_bytes: config.max_row_bytes,
        })
    }

    /// Decode a full primary key; prefix probes are rejected.
    pub fn decode_primary_key(&self, key: &[u8]) -> Result<Vec<Value>, CodecError> {
        match self.key_codec.decode(key)? {
            KeyDecode::Full(values) => Ok(values),
            KeyDecode::Partial(values) => Err(CodecError::IncompleteKey {
                decoded: values.len(),
                expected: self.key_codec.field_count(),
            }),
        }
    }

    fn encode_payload(&self, record: &Record) -> Result<Vec<u8>, CodecError> {
        let mut payload = record.clone();
        for field in self.key_codec.field_names() {
            payload.remove(field);
        }

        serialize(&payload).map_err(CodecError::ValueEncode)
    }

    fn decode_payload(&self, value: &[u8]) -> Result<Record, CodecError> {
        deserialize_bounded(value, self.max_row_bytes).map_err(CodecError::ValueDecode)
    }
}

impl IndexCodec for PrimaryKeyCodec {
    fn table_name(&self) -> TableName {
        self.table
    }

    fn key_codec(&self) -> &KeyCodec {
        &self.key_codec
    }

    fn encode_kv_from_record(&self, record: &Record) -> Result<(Vec<u8>, Vec<u8>), CodecError> {
        let (_, key) = self.key_codec.encode_from_record(record)?;
        let value = self.encode_payload(record)?;

        Ok((key, value))
    }

    /// The primary key is its own index: both halves carry the same values.
    fn decode_index_key(
        &self,
        key: &[u8],
        _value: &[u8],
    ) -> Result<(Vec<Value>, Option<Vec<Value>>), CodecError> {
        match self.key_codec.decode(key)? {
            KeyDecode::Full(values) => Ok((values.clone(), Some(values))),
            KeyDecode::Partial(values) => Ok((values, None)),
        }
    }

    fn decode_entry(&self, key: &[u8], value: &[u8]) -> Result<Entry, CodecError> {
        let pk = self.decode_primary_key(key)?;
        let mut record = self.decode_payload(value)?;
        self.key_codec.set_key_values(&mut record, &pk)?;

        Ok(Entry::Primary(PrimaryKeyEntry {
            table_name: self.table,
            key: pk,
            record,
        }))
    }

    fn encode_entry(&self, entry: &Entry) -> Result<(Vec<u8>, Vec<u8>), CodecError> {
        let Entry::Primary(entry) = entry else {
            return Err(CodecError::bad_entry(self.table, "expected a primary key entry"));
        };
        if entry.table_name != self.table {
            return Err(CodecError::bad_entry(
                self.table,
                "primary key entry belongs to another table",
            ));
        }

        let key = self.key_codec.encode(&entry.key)?;
        let value = self.encode_payload(&entry.record)?;

        Ok((key, value))
    }
}
