//! Runtime schema descriptors.
//!
//! Types in `model` describe tables the way the external schema registry
//! hands them to the codec layer: a validated name, typed fields, and the
//! ordered primary key. Codecs only read them.

mod field;
mod name;
mod table;

pub use field::{FieldKind, FieldModel};
pub use name::{TableName, TableNameError};
pub use table::{TableModel, TableModelError};
