use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, LoadConfiguration};

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
/// Limits applied while decoding inbound packets
pub struct CodecConfig {
    /// The largest frame length (packet ID + body) accepted from a peer
    pub max_packet_size: usize,
    /// The largest string byte length accepted by bounded string reads
    pub max_string_length: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_packet_size: 2097152,
            max_string_length: i16::MAX as usize,
        }
    }
}

impl LoadConfiguration for CodecConfig {
    fn get_path() -> &'static Path {
        Path::new("codec.toml")
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_packet_size == 0 {
            return Err(ConfigError::Invalid(
                "max_packet_size must be greater than 0".to_string(),
            ));
        }
        if self.max_packet_size > i32::MAX as usize {
            return Err(ConfigError::Invalid(format!(
                "max_packet_size must not exceed {}",
                i32::MAX
            )));
        }
        if self.max_string_length == 0 {
            return Err(ConfigError::Invalid(
                "max_string_length must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
