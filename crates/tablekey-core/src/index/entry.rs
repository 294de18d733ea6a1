use crate::{
    model::TableName,
    value::{Record, Value},
};
use std::fmt::{self, Display};

///
/// Entry
///
/// Structured form of one stored key/value pair.
/// Every index codec decodes into and encodes from this type.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Entry {
    Primary(PrimaryKeyEntry),
    Index(IndexKeyEntry),
}

impl Entry {
    #[must_use]
    pub const fn table_name(&self) -> TableName {
        match self {
            Self::Primary(entry) => entry.table_name,
            Self::Index(entry) => entry.table_name,
        }
    }

    #[must_use]
    pub const fn as_index(&self) -> Option<&IndexKeyEntry> {
        match self {
            Self::Index(entry) => Some(entry),
            Self::Primary(_) => None,
        }
    }

    #[must_use]
    pub const fn as_primary(&self) -> Option<&PrimaryKeyEntry> {
        match self {
            Self::Primary(entry) => Some(entry),
            Self::Index(_) => None,
        }
    }
}

impl Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary(entry) => entry.fmt(f),
            Self::Index(entry) => entry.fmt(f),
        }
    }
}

impl From<PrimaryKeyEntry> for Entry {
    fn from(entry: PrimaryKeyEntry) -> Self {
        Self::Primary(entry)
    }
}

impl From<IndexKeyEntry> for Entry {
    fn from(entry: IndexKeyEntry) -> Self {
        Self::Index(entry)
    }
}

///
/// PrimaryKeyEntry
///
/// A full row: its primary-key values and the record they identify.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PrimaryKeyEntry {
    pub table_name: TableName,
    pub key: Vec<Value>,
    pub record: Record,
}

impl Display for PrimaryKeyEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PK {} {} -> {{", self.table_name, join_values(&self.key))?;
        for (i, (name, value)) in self.record.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}: {value}")?;
        }
        f.write_str("}")
    }
}

///
/// IndexKeyEntry
///
/// One secondary-index key.
///
/// `fields` names the columns `index_values` were decoded from, in key order.
/// `primary_key` is `None` when the key was a prefix probe that stopped
/// before every primary-key field was present.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IndexKeyEntry {
    pub table_name: TableName,
    pub unique: bool,
    pub fields: Vec<String>,
    pub index_values: Vec<Value>,
    pub primary_key: Option<Vec<Value>>,
}

impl IndexKeyEntry {
    /// Whether the key carried every field needed to locate the row.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.primary_key.is_some()
    }
}

impl Display for IndexKeyEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.unique { "UNIQ" } else { "IDX" };
        write!(
            f,
            "{kind} {} {} : {}",
            self.table_name,
            self.fields.join("/"),
            join_values(&self.index_values),
        )?;

        match &self.primary_key {
            Some(pk) => write!(f, " -> {}", join_values(pk)),
            None => Ok(()),
        }
    }
}

fn join_values(values: &[Value]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("/")
}
