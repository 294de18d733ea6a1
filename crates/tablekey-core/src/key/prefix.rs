use std::num::NonZeroU16;

///
/// KeyPrefix
///
/// Table/index keyspace identifier written at the start of every key.
/// Layout: table id (u32 BE) then index id (u16 BE). Index id 0 is the
/// primary key, so secondary indexes use non-zero ids and never collide.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct KeyPrefix {
    table_id: u32,
    index_id: u16,
}

impl KeyPrefix {
    pub const STORED_SIZE: usize = 6;

    const PRIMARY_INDEX_ID: u16 = 0;

    #[must_use]
    pub const fn primary(table_id: u32) -> Self {
        Self {
            table_id,
            index_id: Self::PRIMARY_INDEX_ID,
        }
    }

    #[must_use]
    pub const fn index(table_id: u32, index_id: NonZeroU16) -> Self {
        Self {
            table_id,
            index_id: index_id.get(),
        }
    }

    #[must_use]
    pub const fn table_id(self) -> u32 {
        self.table_id
    }

    #[must_use]
    pub const fn is_primary(self) -> bool {
        self.index_id == Self::PRIMARY_INDEX_ID
    }

    #[must_use]
    pub fn to_bytes(self) -> [u8; Self::STORED_SIZE] {
        let mut out = [0u8; Self::STORED_SIZE];
        out[..4].copy_from_slice(&self.table_id.to_be_bytes());
        out[4..].copy_from_slice(&self.index_id.to_be_bytes());
        out
    }
}

impl From<KeyPrefix> for Vec<u8> {
    fn from(prefix: KeyPrefix) -> Self {
        prefix.to_bytes().to_vec()
    }
}

///
/// TESTS
///
