use std::io::Read;

use trapdoor_util::text::TextComponent;

use crate::{
    codec::{var_int::VarInt, var_long::VarLong, Codec},
    ser::ReadingError,
};

/// Reference point for [`PacketReader::seek`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekOrigin {
    Start,
    Current,
    End,
}

impl TryFrom<i32> for SeekOrigin {
    type Error = ReadingError;

    /// Maps the classic `whence` values (0, 1, 2) onto an origin.
    fn try_from(whence: i32) -> Result<Self, Self::Error> {
        match whence {
            0 => Ok(Self::Start),
            1 => Ok(Self::Current),
            2 => Ok(Self::End),
            _ => Err(ReadingError::InvalidSeek(format!(
                "unsupported origin {whence}"
            ))),
        }
    }
}

/// Result of [`PacketReader::seek_with_eof`]. Both variants carry the new,
/// already clamped, cursor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekOutcome {
    Position(usize),
    EndOfBuffer(usize),
}

impl SeekOutcome {
    pub fn position(self) -> usize {
        match self {
            Self::Position(position) | Self::EndOfBuffer(position) => position,
        }
    }

    pub fn is_end_of_buffer(self) -> bool {
        matches!(self, Self::EndOfBuffer(_))
    }
}

/// Cursor based decoder over a single inbound packet payload.
///
/// Every read either consumes exactly the bytes of the value it returns or
/// fails and leaves the cursor where it was.
pub struct PacketReader<'a> {
    data: &'a [u8],
    cursor: usize,
}

impl<'a> PacketReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, cursor: 0 }
    }

    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.cursor
    }

    pub fn is_at_end(&self) -> bool {
        self.cursor >= self.data.len()
    }

    /// Moves the cursor relative to `origin`.
    ///
    /// A target below zero is rejected, a target past the end is clamped to
    /// the end of the buffer.
    pub fn seek(&mut self, offset: i64, origin: SeekOrigin) -> Result<usize, ReadingError> {
        let base = match origin {
            SeekOrigin::Start => 0,
            SeekOrigin::Current => self.cursor,
            SeekOrigin::End => self.data.len(),
        };

        let target = base as i128 + i128::from(offset);
        if target < 0 {
            return Err(ReadingError::InvalidSeek(format!(
                "seek of {offset} from {origin:?} is below zero"
            )));
        }

        let end = self.data.len();
        self.cursor = usize::try_from(target).map_or(end, |target| target.min(end));
        Ok(self.cursor)
    }

    /// Like [`Self::seek`], but flags when the cursor ended up at the end of
    /// the buffer. The position is updated either way.
    pub fn seek_with_eof(
        &mut self,
        offset: i64,
        origin: SeekOrigin,
    ) -> Result<SeekOutcome, ReadingError> {
        let position = self.seek(offset, origin)?;
        if position >= self.data.len() {
            Ok(SeekOutcome::EndOfBuffer(position))
        } else {
            Ok(SeekOutcome::Position(position))
        }
    }

    fn remaining_slice(&self) -> &'a [u8] {
        &self.data[self.cursor..]
    }

    fn check_eof(&self, what: &'static str) -> Result<(), ReadingError> {
        if self.is_at_end() {
            Err(ReadingError::EndOfBuffer(what))
        } else {
            Ok(())
        }
    }

    fn peek<const N: usize>(&self, what: &'static str) -> Result<[u8; N], ReadingError> {
        self.check_eof(what)?;
        self.remaining_slice()
            .get(..N)
            .and_then(|bytes| <[u8; N]>::try_from(bytes).ok())
            .ok_or(ReadingError::EndOfBuffer(what))
    }

    fn take<const N: usize>(&mut self, what: &'static str) -> Result<[u8; N], ReadingError> {
        let bytes = self.peek::<N>(what)?;
        self.cursor += N;
        Ok(bytes)
    }

    /// Only 0x00 and 0x01 are valid booleans.
    pub fn read_boolean(&mut self) -> Result<bool, ReadingError> {
        let [byte] = self.peek::<1>("bool")?;
        let value = match byte {
            0x00 => false,
            0x01 => true,
            other => {
                return Err(ReadingError::InvalidEncoding(format!(
                    "value {other:#04X} not a boolean value"
                )))
            }
        };
        self.cursor += 1;
        Ok(value)
    }

    pub fn read_byte(&mut self) -> Result<i8, ReadingError> {
        Ok(self.read_unsigned_byte()?.cast_signed())
    }

    pub fn read_unsigned_byte(&mut self) -> Result<u8, ReadingError> {
        let [byte] = self.take::<1>("u8")?;
        Ok(byte)
    }

    pub fn read_short(&mut self) -> Result<i16, ReadingError> {
        Ok(self.read_unsigned_short()?.cast_signed())
    }

    pub fn read_unsigned_short(&mut self) -> Result<u16, ReadingError> {
        self.take("u16").map(u16::from_be_bytes)
    }

    pub fn read_int(&mut self) -> Result<i32, ReadingError> {
        self.take("i32").map(i32::from_be_bytes)
    }

    pub fn read_long(&mut self) -> Result<i64, ReadingError> {
        self.take("i64").map(i64::from_be_bytes)
    }

    pub fn read_float(&mut self) -> Result<f32, ReadingError> {
        Ok(f32::from_bits(self.read_int()?.cast_unsigned()))
    }

    pub fn read_double(&mut self) -> Result<f64, ReadingError> {
        Ok(f64::from_bits(self.read_long()?.cast_unsigned()))
    }

    pub fn read_var_int(&mut self) -> Result<i32, ReadingError> {
        self.check_eof("VarInt")?;
        let mut remaining = self.remaining_slice();
        let value = VarInt::decode(&mut remaining)?;
        self.cursor = self.data.len() - remaining.len();
        Ok(value.0)
    }

    pub fn read_var_long(&mut self) -> Result<i64, ReadingError> {
        self.check_eof("VarLong")?;
        let mut remaining = self.remaining_slice();
        let value = VarLong::decode(&mut remaining)?;
        self.cursor = self.data.len() - remaining.len();
        Ok(value.0)
    }

    /// Reads a VarInt length prefixed UTF-8 string.
    pub fn read_string(&mut self) -> Result<String, ReadingError> {
        self.read_string_bounded(usize::MAX)
    }

    /// Reads a string whose byte length must not exceed `bound`.
    pub fn read_string_bounded(&mut self, bound: usize) -> Result<String, ReadingError> {
        self.check_eof("String")?;
        let mut remaining = self.remaining_slice();
        let size = VarInt::decode(&mut remaining)?.0;
        let size = usize::try_from(size).map_err(|_| {
            ReadingError::InvalidEncoding(format!("string size of {size} invalid"))
        })?;
        if size > bound {
            return Err(ReadingError::TooLarge(format!(
                "string of {size} bytes exceeds bound of {bound}"
            )));
        }

        let data = remaining
            .get(..size)
            .ok_or(ReadingError::EndOfBuffer("String"))?;
        let value = std::str::from_utf8(data)
            .map_err(|err| ReadingError::InvalidEncoding(err.to_string()))?
            .to_owned();

        self.cursor = self.data.len() - remaining.len() + size;
        Ok(value)
    }

    /// Reads a chat component sent as a JSON string.
    pub fn read_text_component(&mut self) -> Result<TextComponent, ReadingError> {
        let start = self.cursor;
        let json = self.read_string()?;
        match TextComponent::from_json(&json) {
            Ok(component) => Ok(component),
            Err(err) => {
                self.cursor = start;
                Err(ReadingError::Message(format!("invalid text component: {err}")))
            }
        }
    }

    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8], ReadingError> {
        let data = self
            .remaining_slice()
            .get(..count)
            .ok_or(ReadingError::EndOfBuffer("bytes"))?;
        self.cursor += count;
        Ok(data)
    }

    /// Everything after the cursor, leaving the reader at the end.
    pub fn read_remaining(&mut self) -> &'a [u8] {
        let data = self.remaining_slice();
        self.cursor = self.data.len();
        data
    }
}

impl Read for PacketReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let mut remaining = self.remaining_slice();
        let num = remaining.read(buf)?;
        self.cursor += num;
        Ok(num)
    }
}
