//! Module: key::codec
//! Responsibility: composite key framing (fixed prefix + ordered field fragments).
//! Does not own: per-field byte layouts or index-specific field merging.
//! Boundary: every table/index codec delegates raw key bytes to `KeyCodec`.


use crate::{
    config::CodecConfig,
    error::CodecError,
    key::{
        field::{FieldCodec, FieldEncodeError},
        reader::KeyReader,
    },
    model::{FieldModel, TableModel, TableName},
    value::{Record, Value},
};
use std::{cmp::Ordering, collections::BTreeSet};

///
/// KeyDecode
///
/// Successful key decode. `Partial` is a prefix key: input ended on a field
/// boundary before every declared field was read. Range-scan probes produce
/// these; they are not errors.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum KeyDecode {
    Full(Vec<Value>),
    Partial(Vec<Value>),
}

impl KeyDecode {
    #[must_use]
    pub const fn is_full(&self) -> bool {
        matches!(self, Self::Full(_))
    }

    #[must_use]
    pub const fn is_partial(&self) -> bool {
        matches!(self, Self::Partial(_))
    }

    #[must_use]
    pub fn values(&self) -> &[Value] {
        match self {
            Self::Full(values) | Self::Partial(values) => values,
        }
    }

    #[must_use]
    pub fn into_values(self) -> Vec<Value> {
        match self {
            Self::Full(values) | Self::Partial(values) => values,
        }
    }
}

///
/// KeyField
///

#[derive(Clone, Debug)]
struct KeyField {
    model: FieldModel,
    codec: FieldCodec,
}

///
/// KeyCodec
///
/// Encoder/decoder for one key shape: an immutable prefix followed by each
/// field's order-preserving fragment in declared order.
/// Built once per table/index; immutable and shareable across threads.
///

#[derive(Clone, Debug)]
pub struct KeyCodec {
    table: TableName,
    prefix: Vec<u8>,
    fields: Vec<KeyField>,
    field_names: Vec<String>,
    max_key_bytes: usize,
}

impl KeyCodec {
    /// Build a key codec over `field_names` of `table` with default limits.
    pub fn new<S: AsRef<str>>(
        prefix: impl Into<Vec<u8>>,
        table: &TableModel,
        field_names: &[S],
    ) -> Result<Self, CodecError> {
        Self::with_config(prefix, table, field_names, &CodecConfig::default())
    }

    pub fn with_config<S: AsRef<str>>(
        prefix: impl Into<Vec<u8>>,
        table: &TableModel,
        field_names: &[S],
        config: &CodecConfig,
    ) -> Result<Self, CodecError> {
        if field_names.len() > config.max_key_fields {
            return Err(CodecError::TooManyKeyFields {
                count: field_names.len(),
                max: config.max_key_fields,
            });
        }

        let mut seen = BTreeSet::new();
        let mut fields = Vec::with_capacity(field_names.len());
        for name in field_names {
            let name = name.as_ref();
            if !seen.insert(name) {
                return Err(CodecError::DuplicateField {
                    field: name.to_string(),
                });
            }

            let model = table.field(name).ok_or_else(|| CodecError::UnknownField {
                table: table.name(),
                field: name.to_string(),
            })?;
            let codec =
                FieldCodec::for_kind(&model.kind).ok_or_else(|| CodecError::UnsupportedKeyKind {
                    field: name.to_string(),
                    kind: model.kind.clone(),
                })?;

            fields.push(KeyField {
                model: model.clone(),
                codec,
            });
        }

        let prefix = prefix.into();
        let field_names: Vec<String> = fields.iter().map(|f| f.model.name.clone()).collect();

        tracing::debug!(
            table = %table.name(),
            prefix = ?prefix,
            fields = ?field_names,
            "key codec built"
        );

        Ok(Self {
            table: table.name(),
            prefix,
            fields,
            field_names,
            max_key_bytes: config.max_key_bytes,
        })
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    #[must_use]
    pub const fn table_name(&self) -> TableName {
        self.table
    }

    #[must_use]
    pub fn prefix(&self) -> &[u8] {
        &self.prefix
    }

    /// Field names in byte-layout order.
    #[must_use]
    pub fn field_names(&self) -> &[String] {
        &self.field_names
    }

    #[must_use]
    pub const fn field_count(&self) -> usize {
        self.fields.len()
    }

    // ------------------------------------------------------------------
    // Encoding
    // ------------------------------------------------------------------

    /// Encode a full key; `values` must match the declared field count.
    pub fn encode(&self, values: &[Value]) -> Result<Vec<u8>, CodecError> {
        if values.len() != self.fields.len() {
            return Err(CodecError::FieldCountMismatch {
                expected: self.fields.len(),
                found: values.len(),
            });
        }

        self.encode_prefix(values)
    }

    /// Encode the leading `values.len()` fields, for range and prefix probes.
    pub fn encode_prefix(&self, values: &[Value]) -> Result<Vec<u8>, CodecError> {
        let mut out = Vec::with_capacity(self.size_hint());
        out.extend_from_slice(&self.prefix);
        self.encode_fields_into(values, &mut out)?;

        if out.len() > self.max_key_bytes {
            return Err(CodecError::KeyTooLarge {
                len: out.len(),
                max: self.max_key_bytes,
            });
        }

        Ok(out)
    }

    /// Append field fragments without the prefix; used for composed payloads.
    pub fn encode_fields_into(
        &self,
        values: &[Value],
        out: &mut Vec<u8>,
    ) -> Result<(), CodecError> {
        if values.len() > self.fields.len() {
            return Err(CodecError::FieldCountMismatch {
                expected: self.fields.len(),
                found: values.len(),
            });
        }

        for (field, value) in self.fields.iter().zip(values) {
            field
                .codec
                .encode(value, out)
                .map_err(|source| CodecError::KindMismatch {
                    field: field.model.name.clone(),
                    source,
                })?;
        }

        Ok(())
    }

    /// Read this codec's fields from `record`, in declared order.
    #[must_use]
    pub fn values_from_record(&self, record: &Record) -> Vec<Value> {
        self.fields
            .iter()
            .map(|field| record.value_or_default(&field.model))
            .collect()
    }

    /// Encode the full key of `record`, returning the values it was built from.
    pub fn encode_from_record(&self, record: &Record) -> Result<(Vec<Value>, Vec<u8>), CodecError> {
        let values = self.values_from_record(record);
        let key = self.encode(&values)?;

        Ok((values, key))
    }

    /// Write decoded key values back into `record`.
    pub fn set_key_values(&self, record: &mut Record, values: &[Value]) -> Result<(), CodecError> {
        if values.len() != self.fields.len() {
            return Err(CodecError::FieldCountMismatch {
                expected: self.fields.len(),
                found: values.len(),
            });
        }

        for (field, value) in self.fields.iter().zip(values) {
            record.insert(field.model.name.clone(), value.clone());
        }

        Ok(())
    }

    // ------------------------------------------------------------------
    // Decoding
    // ------------------------------------------------------------------

    /// Decode a stored or probe key.
    pub fn decode(&self, bytes: &[u8]) -> Result<KeyDecode, CodecError> {
        let mut reader = KeyReader::new(bytes);
        if !reader.strip_prefix(&self.prefix) {
            return Err(CodecError::BadPrefix {
                expected: self.prefix.clone(),
            });
        }

        let decoded = self.decode_from(&mut reader)?;
        Self::ensure_consumed(&reader)?;

        Ok(decoded)
    }

    /// Decode prefix-less field fragments that must span all of `bytes`.
    pub fn decode_fields(&self, bytes: &[u8]) -> Result<KeyDecode, CodecError> {
        let mut reader = KeyReader::new(bytes);
        let decoded = self.decode_from(&mut reader)?;
        Self::ensure_consumed(&reader)?;

        Ok(decoded)
    }

    /// Decode fields from an existing cursor, leaving it after the last field.
    pub fn decode_from(&self, reader: &mut KeyReader<'_>) -> Result<KeyDecode, CodecError> {
        let mut values = Vec::with_capacity(self.fields.len());

        for field in &self.fields {
            match field.codec.decode(reader) {
                Ok(Some(value)) => values.push(value),
                Ok(None) => {
                    tracing::trace!(
                        table = %self.table,
                        decoded = values.len(),
                        expected = self.fields.len(),
                        "prefix key decoded"
                    );
                    return Ok(KeyDecode::Partial(values));
                }
                Err(source) => {
                    return Err(CodecError::MalformedField {
                        field: field.model.name.clone(),
                        source,
                    });
                }
            }
        }

        Ok(KeyDecode::Full(values))
    }

    fn ensure_consumed(reader: &KeyReader<'_>) -> Result<(), CodecError> {
        if reader.is_empty() {
            Ok(())
        } else {
            Err(CodecError::TrailingBytes {
                len: reader.remaining(),
            })
        }
    }

    // ------------------------------------------------------------------
    // Ordering
    // ------------------------------------------------------------------

    /// Compare two key value sequences field by field.
    ///
    /// A strict prefix sorts before its extensions, matching encoded order.
    /// Values are assumed to match the field kinds; range bounds are checked
    /// by `check_valid_range_iteration_keys`.
    #[must_use]
    pub fn compare_keys(&self, left: &[Value], right: &[Value]) -> Ordering {
        left.iter()
            .zip(right)
            .map(|(left, right)| left.cmp(right))
            .find(|ordering| ordering.is_ne())
            .unwrap_or_else(|| left.len().cmp(&right.len()))
    }

    /// Validate the bounds of a range iteration over this key shape.
    pub fn check_valid_range_iteration_keys(
        &self,
        start: &[Value],
        end: &[Value],
    ) -> Result<(), CodecError> {
        for bound in [start, end] {
            if bound.len() > self.fields.len() {
                return Err(CodecError::FieldCountMismatch {
                    expected: self.fields.len(),
                    found: bound.len(),
                });
            }
            self.check_kinds(bound)?;
        }

        if self.compare_keys(start, end).is_gt() {
            return Err(CodecError::InvalidRange);
        }

        Ok(())
    }

    fn check_kinds(&self, values: &[Value]) -> Result<(), CodecError> {
        for (field, value) in self.fields.iter().zip(values) {
            if !field.model.kind.accepts(value) {
                return Err(CodecError::KindMismatch {
                    field: field.model.name.clone(),
                    source: FieldEncodeError::KindMismatch {
                        expected: field.codec.kind(),
                        found: value.tag(),
                    },
                });
            }
        }

        Ok(())
    }

    fn size_hint(&self) -> usize {
        self.prefix.len()
            + self
                .fields
                .iter()
                .map(|field| field.codec.fixed_size().unwrap_or(16))
                .sum::<usize>()
    }
}
