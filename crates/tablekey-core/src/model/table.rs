use crate::model::{
    field::{FieldKind, FieldModel},
    name::{TableName, TableNameError},
};
use std::collections::BTreeSet;
use thiserror::Error as ThisError;

///
/// TableModelError
///

#[derive(Debug, Eq, PartialEq, ThisError)]
pub enum TableModelError {
    #[error("table name invalid: {0}")]
    Name(#[from] TableNameError),

    #[error("table '{table}' defines field '{field}' more than once")]
    DuplicateField { table: TableName, field: String },

    #[error("table '{table}' has an empty primary key")]
    EmptyPrimaryKey { table: TableName },

    #[error("table '{table}' primary key names undefined field '{field}'")]
    UnknownPrimaryKeyField { table: TableName, field: String },

    #[error("table '{table}' primary key repeats field '{field}'")]
    DuplicatePrimaryKeyField { table: TableName, field: String },

    #[error("table '{table}' primary key field '{field}' of kind {kind} is not key-encodable")]
    PrimaryKeyNotKeyable {
        table: TableName,
        field: String,
        kind: FieldKind,
    },
}

///
/// TableModel
///
/// Read-only schema descriptor for one table.
/// Field declaration order is independent of any key's field order.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TableModel {
    name: TableName,
    fields: Vec<FieldModel>,
    primary_key: Vec<String>,
}

impl TableModel {
    /// Build a validated table model.
    pub fn try_new(
        name: &str,
        fields: Vec<FieldModel>,
        primary_key: &[&str],
    ) -> Result<Self, TableModelError> {
        let name = TableName::try_from_str(name)?;

        let mut seen = BTreeSet::new();
        for field in &fields {
            if !seen.insert(field.name.as_str()) {
                return Err(TableModelError::DuplicateField {
                    table: name,
                    field: field.name.clone(),
                });
            }
        }

        if primary_key.is_empty() {
            return Err(TableModelError::EmptyPrimaryKey { table: name });
        }

        let mut seen_pk = BTreeSet::new();
        for &pk in primary_key {
            let Some(field) = fields.iter().find(|field| field.name == pk) else {
                return Err(TableModelError::UnknownPrimaryKeyField {
                    table: name,
                    field: pk.to_string(),
                });
            };
            if !seen_pk.insert(pk) {
                return Err(TableModelError::DuplicatePrimaryKeyField {
                    table: name,
                    field: pk.to_string(),
                });
            }
            if !field.kind.is_key_encodable() {
                return Err(TableModelError::PrimaryKeyNotKeyable {
                    table: name,
                    field: pk.to_string(),
                    kind: field.kind.clone(),
                });
            }
        }

        Ok(Self {
            name,
            fields,
            primary_key: primary_key.iter().map(ToString::to_string).collect(),
        })
    }

    #[must_use]
    pub const fn name(&self) -> TableName {
        self.name
    }

    #[must_use]
    pub fn fields(&self) -> &[FieldModel] {
        &self.fields
    }

    /// Primary-key field names in primary-key order.
    #[must_use]
    pub fn primary_key(&self) -> &[String] {
        &self.primary_key
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldModel> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Declaration ordinal of a field.
    #[must_use]
    pub fn field_position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name == name)
    }

    #[must_use]
    pub fn is_primary_key_field(&self, name: &str) -> bool {
        self.primary_key.iter().any(|pk| pk == name)
    }
}

///
/// TESTS
///
