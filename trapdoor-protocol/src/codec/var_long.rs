use std::num::NonZeroUsize;

use bytes::{Buf, BufMut};

use super::Codec;
use crate::ser::ReadingError;

pub type VarLongType = i64;

/**
 * A variable-length long type used by the Minecraft network protocol.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct VarLong(pub VarLongType);

impl Codec<Self> for VarLong {
    /// The maximum number of bytes a `VarLong` can occupy.
    const MAX_SIZE: NonZeroUsize = NonZeroUsize::new(10).unwrap();

    fn written_size(&self) -> usize {
        match self.0.cast_unsigned() {
            0 => 1,
            n => (63 - n.leading_zeros() as usize) / 7 + 1,
        }
    }

    fn encode(&self, write: &mut impl BufMut) {
        let mut val = self.0.cast_unsigned();
        loop {
            let byte = (val & 0x7F) as u8;
            val >>= 7;
            if val == 0 {
                write.put_u8(byte);
                break;
            }
            write.put_u8(byte | 0x80);
        }
    }

    fn decode(read: &mut impl Buf) -> Result<Self, ReadingError> {
        let mut val = 0u64;
        for i in 0..Self::MAX_SIZE.get() {
            if !read.has_remaining() {
                return Err(ReadingError::EndOfBuffer("VarLong"));
            }
            let byte = read.get_u8();
            val |= (u64::from(byte) & 0x7F) << (i * 7);
            if byte & 0x80 == 0 {
                return Ok(VarLong(val.cast_signed()));
            }
        }
        Err(ReadingError::MalformedVarLong)
    }
}

impl From<i64> for VarLong {
    fn from(value: i64) -> Self {
        VarLong(value)
    }
}

impl From<VarLong> for i64 {
    fn from(value: VarLong) -> Self {
        value.0
    }
}
