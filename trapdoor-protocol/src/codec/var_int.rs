use std::num::NonZeroUsize;

use bytes::{Buf, BufMut};

use super::Codec;
use crate::ser::ReadingError;

pub type VarIntType = i32;

/**
 * A variable-length integer type used by the Minecraft network protocol.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct VarInt(pub VarIntType);

impl Codec<Self> for VarInt {
    /// The maximum number of bytes a `VarInt` can occupy.
    const MAX_SIZE: NonZeroUsize = NonZeroUsize::new(5).unwrap();

    /// Returns the exact number of bytes this VarInt will write when
    /// [`Codec::encode`] is called, assuming no error occurs.
    fn written_size(&self) -> usize {
        match self.0.cast_unsigned() {
            0 => 1,
            n => (31 - n.leading_zeros() as usize) / 7 + 1,
        }
    }

    fn encode(&self, write: &mut impl BufMut) {
        // Negative values go out as their full 32-bit pattern
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
        let mut val = 0u32;
        for i in 0..Self::MAX_SIZE.get() {
            if !read.has_remaining() {
                return Err(ReadingError::EndOfBuffer("VarInt"));
            }
            let byte = read.get_u8();
            val |= (u32::from(byte) & 0x7F) << (i * 7);
            if byte & 0x80 == 0 {
                return Ok(VarInt(val.cast_signed()));
            }
        }
        Err(ReadingError::MalformedVarInt)
    }
}

impl From<i32> for VarInt {
    fn from(value: i32) -> Self {
        VarInt(value)
    }
}

impl From<VarInt> for i32 {
    fn from(value: VarInt) -> Self {
        value.0
    }
}
