//! Module: key
//! Responsibility: order-preserving field encodings and composite key framing.
//! Does not own: index field merging, entries, or row payloads.
//! Boundary: used by `index` codecs as the byte-layout authority.

mod codec;
mod field;
mod prefix;
mod reader;

pub use codec::{KeyCodec, KeyDecode};
pub use field::{FieldCodec, FieldDecodeError, FieldEncodeError};
pub use prefix::KeyPrefix;
pub use reader::KeyReader;
