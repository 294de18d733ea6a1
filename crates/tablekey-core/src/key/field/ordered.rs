use crate::{
    key::{field::FieldDecodeError, reader::KeyReader},
    value::Timestamp,
};
use ulid::Ulid;

const ESCAPE: u8 = 0x00;
const ESCAPED_ZERO: u8 = 0xFF;
const TERMINATOR: [u8; 2] = [ESCAPE, 0x00];

const FALSE_BYTE: u8 = 0x00;
const TRUE_BYTE: u8 = 0x01;

///
/// OrderedField
///
/// Order-preserving byte form of one primitive key component.
/// `encode_ordered(a) < encode_ordered(b)` iff `a < b`, and decoding consumes
/// exactly the bytes encoding wrote.
///

pub(crate) trait OrderedField: Sized {
    fn encode_ordered(&self, out: &mut Vec<u8>);

    fn decode_ordered(reader: &mut KeyReader<'_>) -> Result<Self, FieldDecodeError>;
}

impl OrderedField for bool {
    fn encode_ordered(&self, out: &mut Vec<u8>) {
        out.push(if *self { TRUE_BYTE } else { FALSE_BYTE });
    }

    fn decode_ordered(reader: &mut KeyReader<'_>) -> Result<Self, FieldDecodeError> {
        match reader.read_u8()? {
            FALSE_BYTE => Ok(false),
            TRUE_BYTE => Ok(true),
            byte => Err(FieldDecodeError::InvalidBool { byte }),
        }
    }
}

impl OrderedField for i32 {
    fn encode_ordered(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&ordered_i32_bytes(*self));
    }

    fn decode_ordered(reader: &mut KeyReader<'_>) -> Result<Self, FieldDecodeError> {
        let biased = u32::from_be_bytes(reader.take_array()?);

        Ok((biased ^ (1u32 << 31)).cast_signed())
    }
}

impl OrderedField for i64 {
    fn encode_ordered(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&ordered_i64_bytes(*self));
    }

    fn decode_ordered(reader: &mut KeyReader<'_>) -> Result<Self, FieldDecodeError> {
        let biased = u64::from_be_bytes(reader.take_array()?);

        Ok((biased ^ (1u64 << 63)).cast_signed())
    }
}

impl OrderedField for u32 {
    fn encode_ordered(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_be_bytes());
    }

    fn decode_ordered(reader: &mut KeyReader<'_>) -> Result<Self, FieldDecodeError> {
        Ok(Self::from_be_bytes(reader.take_array()?))
    }
}

impl OrderedField for u64 {
    fn encode_ordered(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_be_bytes());
    }

    fn decode_ordered(reader: &mut KeyReader<'_>) -> Result<Self, FieldDecodeError> {
        Ok(Self::from_be_bytes(reader.take_array()?))
    }
}

impl OrderedField for String {
    fn encode_ordered(&self, out: &mut Vec<u8>) {
        push_terminated_bytes(out, self.as_bytes());
    }

    fn decode_ordered(reader: &mut KeyReader<'_>) -> Result<Self, FieldDecodeError> {
        let bytes = read_terminated_bytes(reader)?;

        Self::from_utf8(bytes).map_err(|_| FieldDecodeError::InvalidUtf8)
    }
}

impl OrderedField for Vec<u8> {
    fn encode_ordered(&self, out: &mut Vec<u8>) {
        push_terminated_bytes(out, self);
    }

    fn decode_ordered(reader: &mut KeyReader<'_>) -> Result<Self, FieldDecodeError> {
        read_terminated_bytes(reader)
    }
}

impl OrderedField for Timestamp {
    fn encode_ordered(&self, out: &mut Vec<u8>) {
        self.seconds().encode_ordered(out);
        self.nanos().encode_ordered(out);
    }

    fn decode_ordered(reader: &mut KeyReader<'_>) -> Result<Self, FieldDecodeError> {
        let seconds = i64::decode_ordered(reader)?;
        let nanos = u32::decode_ordered(reader)?;

        Self::try_new(seconds, nanos).ok_or(FieldDecodeError::InvalidNanos { nanos })
    }
}

impl OrderedField for Ulid {
    fn encode_ordered(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_bytes());
    }

    fn decode_ordered(reader: &mut KeyReader<'_>) -> Result<Self, FieldDecodeError> {
        Ok(Self::from_bytes(reader.take_array()?))
    }
}

// Byte strings are escaped so field boundaries remain unambiguous and a
// logical prefix still sorts first: 0x00 -> 0x00 0xFF, then 0x00 0x00.
fn push_terminated_bytes(out: &mut Vec<u8>, bytes: &[u8]) {
    for &byte in bytes {
        if byte == ESCAPE {
            out.extend_from_slice(&[ESCAPE, ESCAPED_ZERO]);
        } else {
            out.push(byte);
        }
    }

    out.extend_from_slice(&TERMINATOR);
}

fn read_terminated_bytes(reader: &mut KeyReader<'_>) -> Result<Vec<u8>, FieldDecodeError> {
    let mut out = Vec::new();

    loop {
        let byte = reader
            .read_u8()
            .map_err(|_| FieldDecodeError::UnterminatedSegment)?;
        if byte != ESCAPE {
            out.push(byte);
            continue;
        }

        match reader
            .read_u8()
            .map_err(|_| FieldDecodeError::UnterminatedSegment)?
        {
            ESCAPED_ZERO => out.push(ESCAPE),
            end if end == TERMINATOR[1] => return Ok(out),
            byte => return Err(FieldDecodeError::InvalidEscape { byte }),
        }
    }
}

const fn ordered_i32_bytes(value: i32) -> [u8; 4] {
    let biased = value.cast_unsigned() ^ (1u32 << 31);
    biased.to_be_bytes()
}

const fn ordered_i64_bytes(value: i64) -> [u8; 8] {
    let biased = value.cast_unsigned() ^ (1u64 << 63);
    biased.to_be_bytes()
}
