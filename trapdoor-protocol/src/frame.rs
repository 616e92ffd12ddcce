use bytes::{Buf, Bytes, BytesMut};
use trapdoor_config::CodecConfig;

use crate::{
    codec::{var_int::VarInt, var_long::VarLong, Codec},
    reader::PacketReader,
    ser::ReadingError,
};

/// A packet split off the wire, with its length prefix removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPacket {
    pub id: i32,
    pub payload: Bytes,
}

impl RawPacket {
    pub fn reader(&self) -> PacketReader<'_> {
        PacketReader::new(&self.payload)
    }
}

/// Splits length prefixed frames off an inbound byte buffer.
pub struct FrameDecoder {
    max_packet_size: usize,
    max_string_length: usize,
}

impl Default for FrameDecoder {
    fn default() -> Self {
        Self::from_config(&CodecConfig::default())
    }
}

impl FrameDecoder {
    pub fn new(max_packet_size: usize) -> Self {
        Self {
            max_packet_size,
            max_string_length: CodecConfig::default().max_string_length,
        }
    }

    pub fn from_config(config: &CodecConfig) -> Self {
        Self {
            max_packet_size: config.max_packet_size,
            max_string_length: config.max_string_length,
        }
    }

    pub fn max_packet_size(&self) -> usize {
        self.max_packet_size
    }

    /// The bound packet handlers should pass to
    /// [`PacketReader::read_string_bounded`].
    pub fn max_string_length(&self) -> usize {
        self.max_string_length
    }

    /// Takes the next complete frame from the front of `buf`.
    ///
    /// Returns `Ok(None)` and leaves `buf` untouched while the frame is still
    /// incomplete.
    pub fn decode(&self, buf: &mut BytesMut) -> Result<Option<RawPacket>, ReadingError> {
        let mut peek = &buf[..];
        let length = match VarLong::decode(&mut peek) {
            Ok(length) => length.0,
            Err(ReadingError::EndOfBuffer(_)) => return Ok(None),
            Err(err) => return Err(err),
        };

        let length = usize::try_from(length).map_err(|_| {
            ReadingError::InvalidEncoding(format!("packet length of {length} invalid"))
        })?;
        if length > self.max_packet_size {
            log::warn!(
                "Rejecting packet of {length} bytes, limit is {}",
                self.max_packet_size
            );
            return Err(ReadingError::TooLarge(format!(
                "packet of {length} bytes exceeds {}",
                self.max_packet_size
            )));
        }

        if peek.len() < length {
            return Ok(None);
        }

        // The frame is complete, so a bad ID is corrupt data and not a short read
        if length == 0 {
            return Err(ReadingError::InvalidEncoding(
                "packet of 0 bytes has no ID".to_string(),
            ));
        }
        let mut id_bytes = &peek[..length];
        let id = VarInt::decode(&mut id_bytes)
            .map_err(|err| ReadingError::InvalidEncoding(format!("invalid packet ID: {err}")))?
            .0;
        let id_len = length - id_bytes.len();

        let prefix_len = buf.len() - peek.len();
        buf.advance(prefix_len);
        let frame = buf.split_to(length).freeze();
        log::trace!("Split off packet {id:#04X} ({length} bytes)");

        Ok(Some(RawPacket {
            id,
            payload: frame.slice(id_len..),
        }))
    }
}
