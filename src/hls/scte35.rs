//! SCTE-35 cue extraction and `splice_info_section` header decoding.
//!
//! Only the fixed-size section header is decoded. Splice command bodies and
//! descriptors are reported by type and length.

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::Serialize;

use super::attributes::{parse_attributes, tag_value};
use crate::{tags::Scte35Encoding, Error, Result};

/// Attribute names that carry a cue, in lookup order.
const PAYLOAD_ATTRIBUTES: &[&str] = &["SCTE35", "CUE", "SCTE35-CMD", "SCTE35-OUT", "SCTE35-IN"];

const TABLE_ID: u8 = 0xFC;
const HEADER_LEN: usize = 14;

/// Type of the splice command carried in a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpliceCommandType {
    SpliceNull,
    SpliceSchedule,
    SpliceInsert,
    TimeSignal,
    BandwidthReservation,
    PrivateCommand,
    Reserved(u8),
}

impl From<u8> for SpliceCommandType {
    fn from(value: u8) -> Self {
        match value {
            0x00 => Self::SpliceNull,
            0x04 => Self::SpliceSchedule,
            0x05 => Self::SpliceInsert,
            0x06 => Self::TimeSignal,
            0x07 => Self::BandwidthReservation,
            0xFF => Self::PrivateCommand,
            other => Self::Reserved(other),
        }
    }
}

/// Decoded `splice_info_section` header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpliceInfoSection {
    pub table_id: u8,
    pub section_syntax_indicator: bool,
    pub private_indicator: bool,
    pub sap_type: u8,
    pub section_length: u16,
    pub protocol_version: u8,
    pub encrypted_packet: bool,
    pub encryption_algorithm: u8,
    /// 33-bit PTS adjustment in 90 kHz ticks.
    pub pts_adjustment: u64,
    pub cw_index: u8,
    pub tier: u16,
    pub splice_command_length: u16,
    pub splice_command_type: SpliceCommandType,
}

impl SpliceInfoSection {
    /// Decode the section header from raw bytes.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_LEN {
            return Err(Error::InvalidScte35(format!(
                "section too short: {} bytes",
                data.len()
            )));
        }

        if data[0] != TABLE_ID {
            return Err(Error::InvalidScte35(format!(
                "unexpected table_id 0x{:02X}",
                data[0]
            )));
        }

        let pts_adjustment = ((data[4] & 0x01) as u64) << 32
            | (data[5] as u64) << 24
            | (data[6] as u64) << 16
            | (data[7] as u64) << 8
            | data[8] as u64;

        Ok(Self {
            table_id: data[0],
            section_syntax_indicator: data[1] & 0x80 != 0,
            private_indicator: data[1] & 0x40 != 0,
            sap_type: (data[1] >> 4) & 0x03,
            section_length: ((data[1] & 0x0F) as u16) << 8 | data[2] as u16,
            protocol_version: data[3],
            encrypted_packet: data[4] & 0x80 != 0,
            encryption_algorithm: (data[4] >> 1) & 0x3F,
            pts_adjustment,
            cw_index: data[9],
            tier: (data[10] as u16) << 4 | (data[11] >> 4) as u16,
            splice_command_length: ((data[11] & 0x0F) as u16) << 8 | data[12] as u16,
            splice_command_type: SpliceCommandType::from(data[13]),
        })
    }
}

/// A cue pulled from a playlist line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scte35Cue {
    pub encoding: Scte35Encoding,
    pub payload: String,
    pub section: SpliceInfoSection,
}

impl Scte35Cue {
    /// Decode a payload string that is already known to be a cue.
    pub fn decode(payload: &str, encoding: Scte35Encoding) -> Result<Self> {
        let bytes = decode_payload(payload, encoding)?;
        Ok(Self {
            encoding,
            payload: payload.trim().to_string(),
            section: SpliceInfoSection::parse(&bytes)?,
        })
    }

    /// Extract and decode the cue carried by a tag line.
    ///
    /// `Ok(None)` when the line carries no cue at all, as with
    /// `#EXT-X-CUE-OUT:30`.
    pub fn from_tag_line(line: &str, encoding: Scte35Encoding) -> Result<Option<Self>> {
        extract_payload(line, encoding)
            .map(|payload| Self::decode(payload, encoding))
            .transpose()
    }
}

/// Locate the cue payload in a tag line.
///
/// A known cue attribute is returned as written, even if it later fails to
/// decode. A bare tag value is only taken when it decodes to something that
/// starts like a `splice_info_section`.
pub fn extract_payload(line: &str, encoding: Scte35Encoding) -> Option<&str> {
    let value = tag_value(line)?.trim();
    if value.is_empty() {
        return None;
    }

    let attrs = parse_attributes(value);
    for name in PAYLOAD_ATTRIBUTES {
        if let Some((_, v)) = attrs.iter().find(|(k, _)| k.as_str() == *name) {
            return Some(*v);
        }
    }

    let bytes = decode_payload(value, encoding).ok()?;
    (bytes.len() >= HEADER_LEN && bytes[0] == TABLE_ID).then_some(value)
}

/// Decode a payload string into section bytes.
pub fn decode_payload(payload: &str, encoding: Scte35Encoding) -> Result<Vec<u8>> {
    let payload = payload.trim();
    match encoding {
        Scte35Encoding::Base64 => Ok(STANDARD.decode(payload)?),
        Scte35Encoding::Hex => {
            let digits = payload
                .strip_prefix("0x")
                .or_else(|| payload.strip_prefix("0X"))
                .unwrap_or(payload);
            Ok(hex::decode(digits)?)
        }
    }
}
