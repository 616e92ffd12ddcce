use bytes::{BufMut, Bytes, BytesMut};
use trapdoor_util::text::TextComponent;

use crate::{
    codec::{var_int::VarInt, var_long::VarLong, Codec},
    ser::WritingError,
};

/// Accumulates one outbound packet.
///
/// The packet ID is written on construction, so `payload_len` always counts
/// it. [`Self::finished_packet`] frames the payload with its length.
pub struct PacketWriter {
    packet_id: i32,
    payload: BytesMut,
}

impl PacketWriter {
    pub fn new(packet_id: i32) -> Self {
        let mut writer = Self {
            packet_id,
            payload: BytesMut::new(),
        };
        writer.write_var_int(packet_id);
        writer
    }

    pub fn packet_id(&self) -> i32 {
        self.packet_id
    }

    /// Bytes written so far, packet ID included.
    pub fn payload_len(&self) -> usize {
        self.payload.len()
    }

    pub fn write_boolean(&mut self, value: bool) {
        self.write_unsigned_byte(u8::from(value));
    }

    pub fn write_byte(&mut self, value: i8) {
        self.write_unsigned_byte(value.cast_unsigned());
    }

    pub fn write_unsigned_byte(&mut self, value: u8) {
        self.payload.put_u8(value);
    }

    pub fn write_short(&mut self, value: i16) {
        self.write_unsigned_short(value.cast_unsigned());
    }

    pub fn write_unsigned_short(&mut self, value: u16) {
        self.payload.put_u16(value);
    }

    pub fn write_int(&mut self, value: i32) {
        self.write_unsigned_int(value.cast_unsigned());
    }

    pub fn write_unsigned_int(&mut self, value: u32) {
        self.payload.put_u32(value);
    }

    pub fn write_long(&mut self, value: i64) {
        self.write_unsigned_long(value.cast_unsigned());
    }

    pub fn write_unsigned_long(&mut self, value: u64) {
        self.payload.put_u64(value);
    }

    pub fn write_float(&mut self, value: f32) {
        self.write_unsigned_int(value.to_bits());
    }

    pub fn write_double(&mut self, value: f64) {
        self.write_unsigned_long(value.to_bits());
    }

    pub fn write_var_int(&mut self, value: i32) {
        VarInt(value).encode(&mut self.payload);
    }

    pub fn write_var_long(&mut self, value: i64) {
        VarLong(value).encode(&mut self.payload);
    }

    pub fn write_bytes(&mut self, data: &[u8]) {
        self.payload.put_slice(data);
    }

    /// Writes the UTF-8 byte length as a VarInt, then the bytes themselves.
    pub fn write_string(&mut self, value: &str) -> Result<(), WritingError> {
        self.write_string_bounded(value, usize::MAX)
    }

    pub fn write_string_bounded(&mut self, value: &str, bound: usize) -> Result<(), WritingError> {
        let size = value.len();
        if size > bound {
            return Err(WritingError::TooLarge(format!(
                "string of {size} bytes exceeds bound of {bound}"
            )));
        }
        let prefix = i32::try_from(size).map_err(|_| {
            WritingError::TooLarge(format!("string of {size} bytes does not fit a VarInt"))
        })?;

        self.write_var_int(prefix);
        self.write_bytes(value.as_bytes());
        Ok(())
    }

    pub fn write_text_component(&mut self, component: &TextComponent) -> Result<(), WritingError> {
        let json = component
            .to_json()
            .map_err(|err| WritingError::Serde(err.to_string()))?;
        self.write_string(&json)
    }

    /// The framed packet: a VarLong holding the payload length, followed by
    /// the payload. Does not touch the payload, so calling it twice yields
    /// the same bytes.
    pub fn finished_packet(&self) -> Bytes {
        // Buffer lengths are bounded by isize::MAX, which always fits an i64
        let length = VarLong(self.payload.len() as i64);
        let mut packet = BytesMut::with_capacity(length.written_size() + self.payload.len());
        length.encode(&mut packet);
        packet.put_slice(&self.payload);
        packet.freeze()
    }

    /// Consumes the writer and returns the framed packet.
    pub fn into_packet(self) -> Bytes {
        self.finished_packet()
    }
}

#[cfg(test)]
mod test {
    use crate::{
        reader::PacketReader,
        ser::WritingError,
        writer::PacketWriter,
    };

    #[test]
    fn test_packet_id_counts_towards_payload() {
        let writer = PacketWriter::new(0x00);
        assert_eq!(writer.payload_len(), 1);
        assert_eq!(writer.packet_id(), 0);

        let writer = PacketWriter::new(300);
        assert_eq!(writer.payload_len(), 2);
        assert_eq!(&writer.finished_packet()[..], [0x02, 0xAC, 0x02]);
    }

    #[test]
    fn test_boolean_packet_frame() {
        let mut writer = PacketWriter::new(0x00);
        writer.write_boolean(true);

        assert_eq!(&writer.into_packet()[..], [0x02, 0x00, 0x01]);
    }

    #[test]
    fn test_fixed_width_big_endian() {
        let mut writer = PacketWriter::new(0x01);
        writer.write_byte(-1);
        writer.write_short(-2);
        writer.write_unsigned_short(0xABCD);
        writer.write_int(1);
        writer.write_long(-1);

        let packet = writer.into_packet();
        assert_eq!(
            &packet[..],
            [
                0x12, // length
                0x01, // id
                0xFF, // i8
                0xFF, 0xFE, // i16
                0xAB, 0xCD, // u16
                0x00, 0x00, 0x00, 0x01, // i32
                0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, // i64
            ]
        );
    }

    #[test]
    fn test_byte_count_tracks_every_write() {
        let mut writer = PacketWriter::new(0x10);
        let mut expected = 1;

        writer.write_boolean(false);
        expected += 1;
        assert_eq!(writer.payload_len(), expected);

        writer.write_float(0.5);
        expected += 4;
        assert_eq!(writer.payload_len(), expected);

        writer.write_double(0.5);
        expected += 8;
        assert_eq!(writer.payload_len(), expected);

        writer.write_var_int(-1);
        expected += 5;
        assert_eq!(writer.payload_len(), expected);

        writer.write_var_long(-1);
        expected += 10;
        assert_eq!(writer.payload_len(), expected);

        writer.write_string("é").unwrap();
        expected += 1 + 2;
        assert_eq!(writer.payload_len(), expected);
    }

    #[test]
    fn test_string_length_is_byte_count() {
        let mut writer = PacketWriter::new(0x00);
        writer.write_string("✓").unwrap();

        assert_eq!(&writer.finished_packet()[..], [0x05, 0x00, 0x03, 0xE2, 0x9C, 0x93]);
    }

    #[test]
    fn test_string_bounded() {
        let mut writer = PacketWriter::new(0x00);
        assert!(matches!(
            writer.write_string_bounded("abcd", 3),
            Err(WritingError::TooLarge(_))
        ));
        // Nothing was written
        assert_eq!(writer.payload_len(), 1);
    }

    #[test]
    fn test_finished_packet_is_repeatable() {
        let mut writer = PacketWriter::new(0x05);
        writer.write_int(42);

        let first = writer.finished_packet();
        let second = writer.finished_packet();
        assert_eq!(first, second);

        writer.write_boolean(true);
        let third = writer.finished_packet();
        assert_eq!(third.len(), first.len() + 1);
        assert_eq!(third[0], 0x06);
    }

    #[test]
    fn test_long_payload_uses_multi_byte_length() {
        let mut writer = PacketWriter::new(0x00);
        writer.write_bytes(&[0xAA; 200]);

        let packet = writer.into_packet();
        // 201 bytes of payload
        assert_eq!(&packet[..2], [0xC9, 0x01]);
        assert_eq!(packet.len(), 2 + 201);
    }

    #[test]
    fn test_round_trip_primitives() {
        let strings = ["", "minecraft:overworld", "日本語テキスト"];
        let floats = [0.0f32, -0.0, f32::MIN, f32::MAX, f32::INFINITY, f32::NAN];
        let doubles = [0.0f64, -0.0, f64::MIN_POSITIVE, f64::NEG_INFINITY, f64::NAN];

        let mut writer = PacketWriter::new(0x2A);
        writer.write_boolean(true);
        writer.write_boolean(false);
        for value in [i8::MIN, -1, 0, i8::MAX] {
            writer.write_byte(value);
        }
        for value in [0, u8::MAX] {
            writer.write_unsigned_byte(value);
        }
        for value in [i16::MIN, -1, 0, i16::MAX] {
            writer.write_short(value);
        }
        for value in [0, u16::MAX] {
            writer.write_unsigned_short(value);
        }
        for value in [i32::MIN, -1, 0, i32::MAX] {
            writer.write_int(value);
            writer.write_var_int(value);
        }
        for value in [i64::MIN, -1, 0, i64::MAX] {
            writer.write_long(value);
            writer.write_var_long(value);
        }
        for value in floats {
            writer.write_float(value);
        }
        for value in doubles {
            writer.write_double(value);
        }
        for value in strings {
            writer.write_string(value).unwrap();
        }

        let packet = writer.into_packet();
        let mut reader = PacketReader::new(&packet);
        let length = reader.read_var_long().unwrap();
        assert_eq!(length as usize, reader.remaining());
        assert_eq!(reader.read_var_int().unwrap(), 0x2A);

        assert!(reader.read_boolean().unwrap());
        assert!(!reader.read_boolean().unwrap());
        for value in [i8::MIN, -1, 0, i8::MAX] {
            assert_eq!(reader.read_byte().unwrap(), value);
        }
        for value in [0, u8::MAX] {
            assert_eq!(reader.read_unsigned_byte().unwrap(), value);
        }
        for value in [i16::MIN, -1, 0, i16::MAX] {
            assert_eq!(reader.read_short().unwrap(), value);
        }
        for value in [0, u16::MAX] {
            assert_eq!(reader.read_unsigned_short().unwrap(), value);
        }
        for value in [i32::MIN, -1, 0, i32::MAX] {
            assert_eq!(reader.read_int().unwrap(), value);
            assert_eq!(reader.read_var_int().unwrap(), value);
        }
        for value in [i64::MIN, -1, 0, i64::MAX] {
            assert_eq!(reader.read_long().unwrap(), value);
            assert_eq!(reader.read_var_long().unwrap(), value);
        }
        for value in floats {
            assert_eq!(reader.read_float().unwrap().to_bits(), value.to_bits());
        }
        for value in doubles {
            assert_eq!(reader.read_double().unwrap().to_bits(), value.to_bits());
        }
        for value in strings {
            assert_eq!(reader.read_string().unwrap(), value);
        }
        assert!(reader.is_at_end());
    }
}
