// src/nmea/checksum.rs
//! NMEA XOR checksum

use serde::{Deserialize, Serialize};

/// How the checksum byte is rendered after `*`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChecksumStyle {
    /// Uppercase hex without padding, so `0x0C` goes out as `C`
    #[default]
    Unpadded,
    /// Always two uppercase hex digits
    TwoDigit,
}

impl ChecksumStyle {
    pub fn render(&self, checksum: u8) -> String {
        match self {
            ChecksumStyle::Unpadded => format!("{:X}", checksum),
            ChecksumStyle::TwoDigit => format!("{:02X}", checksum),
        }
    }
}

/// XOR of every byte of `payload`, which must exclude the leading `$` and
/// the `*` delimiter.
pub fn checksum(payload: &str) -> u8 {
    payload.bytes().fold(0, |sum, b| sum ^ b)
}
