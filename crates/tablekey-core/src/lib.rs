//! Core runtime for tablekey: table models, field values, order-preserving key
//! codecs, and the index codecs the table layer drives.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod config;
pub mod error;
pub mod index;
pub mod key;
pub mod model;
pub mod serialize;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

///
/// CONSTANTS
///

/// Maximum byte length of a table name.
///
/// Table names travel inside entries and diagnostics; bounding them keeps
/// `TableName` a fixed-size `Copy` value.
pub const MAX_TABLE_NAME_LEN: usize = 64;

///
/// Prelude
///
/// Prelude contains only domain vocabulary and the codec surface.
/// No internal helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        config::CodecConfig,
        error::{CodecError, ErrorClass},
        index::{
            Entry, IndexCodec, IndexKeyCodec, IndexKeyEntry, PrimaryKeyCodec, PrimaryKeyEntry,
            UniqueKeyCodec,
        },
        key::{KeyCodec, KeyDecode, KeyPrefix},
        model::{FieldKind, FieldModel, TableModel, TableName},
        value::{Record, Timestamp, Value},
    };
}
