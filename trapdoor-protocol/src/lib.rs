use bytes::Bytes;

pub mod codec;
pub mod frame;
pub mod reader;
pub mod ser;
pub mod writer;

pub use codec::{var_int::VarInt, var_long::VarLong};
pub use frame::{FrameDecoder, RawPacket};
pub use reader::{PacketReader, SeekOrigin, SeekOutcome};
pub use ser::{ReadingError, WritingError};
pub use writer::PacketWriter;

pub trait Packet {
    const PACKET_ID: i32;
}

/// A packet the server sends.
pub trait ClientPacket: Packet {
    fn write_packet_data(&self, write: &mut PacketWriter) -> Result<(), WritingError>;

    /// Encodes the packet into a complete frame.
    fn to_frame(&self) -> Result<Bytes, WritingError> {
        let mut writer = PacketWriter::new(Self::PACKET_ID);
        self.write_packet_data(&mut writer)?;
        Ok(writer.into_packet())
    }
}

/// A packet the server receives.
pub trait ServerPacket: Packet + Sized {
    fn read(read: &mut PacketReader) -> Result<Self, ReadingError>;
}
