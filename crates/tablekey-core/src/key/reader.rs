use crate::key::field::FieldDecodeError;

///
/// KeyReader
///
/// Forward-only cursor over one key (or value) byte string.
/// Owned by a single decode call chain; field codecs consume from it in turn.
///

#[derive(Clone, Debug)]
pub struct KeyReader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> KeyReader<'a> {
    #[must_use]
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    /// Bytes consumed so far.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.bytes.len() - self.offset
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Unconsumed tail.
    #[must_use]
    pub fn rest(&self) -> &'a [u8] {
        &self.bytes[self.offset..]
    }

    /// Consume `prefix` if the unread bytes start with it.
    pub fn strip_prefix(&mut self, prefix: &[u8]) -> bool {
        if self.rest().starts_with(prefix) {
            self.offset += prefix.len();
            true
        } else {
            false
        }
    }

    pub fn read_u8(&mut self) -> Result<u8, FieldDecodeError> {
        let [byte] = self.take_array::<1>()?;

        Ok(byte)
    }

    pub fn take(&mut self, len: usize) -> Result<&'a [u8], FieldDecodeError> {
        let remaining = self.remaining();
        if len > remaining {
            return Err(FieldDecodeError::Truncated {
                needed: len,
                remaining,
            });
        }

        let out = &self.bytes[self.offset..self.offset + len];
        self.offset += len;

        Ok(out)
    }

    pub fn take_array<const N: usize>(&mut self) -> Result<[u8; N], FieldDecodeError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);

        Ok(out)
    }
}

///
/// TESTS
///
