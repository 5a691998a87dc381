use byteorder::{ByteOrder, LittleEndian};
use serde::Serialize;

use super::FitError;

pub const FIT_SIGNATURE: &[u8; 4] = b".FIT";

/// The fixed-layout file header preceding the message stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FitHeader {
    pub header_size: u8,
    pub protocol_version: u8,
    pub profile_version: u16,
    /// Length of the message section in bytes
    pub data_size: u32,
    /// Only present in 14-byte headers; zero means "not computed"
    pub header_crc: Option<u16>,
}

impl FitHeader {
    pub fn parse(bytes: &[u8]) -> Result<Self, FitError> {
        let header_size = *bytes.first().ok_or(FitError::Header("empty input"))?;
        if header_size != 12 && header_size != 14 {
            return Err(FitError::Header("header size must be 12 or 14 bytes"));
        }
        let header = bytes
            .get(..header_size as usize)
            .ok_or(FitError::Header("truncated header"))?;
        if &header[8..12] != FIT_SIGNATURE {
            return Err(FitError::Header("missing .FIT signature"));
        }

        Ok(Self {
            header_size,
            protocol_version: header[1],
            profile_version: LittleEndian::read_u16(&header[2..4]),
            data_size: LittleEndian::read_u32(&header[4..8]),
            header_crc: (header_size == 14).then(|| LittleEndian::read_u16(&header[12..14])),
        })
    }

    pub fn protocol_major(&self) -> u8 {
        self.protocol_version >> 4
    }

    pub fn protocol_minor(&self) -> u8 {
        self.protocol_version & 0x0F
    }
}
