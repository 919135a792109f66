// src/nmea/sentence.rs
//! GGA / RMC / VTG sentence assembly

use super::checksum::{checksum, ChecksumStyle};
use super::coordinate;
use super::fix::FixState;
use super::{trim_fraction, truncate_fraction};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Talker prefix for every sentence we emit
pub const TALKER_ID: &str = "GP";

/// GGA quality indicator: single-receiver GPS fix
const GGA_QUALITY: &str = "1";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
pub enum SentenceType {
    /// GGA, position fix
    #[default]
    #[serde(rename = "GGA")]
    #[value(name = "gga", alias = "GGA")]
    PositionFix,
    /// RMC, recommended minimum navigation data
    #[serde(rename = "RMC")]
    #[value(name = "rmc", alias = "RMC")]
    MinimumNavData,
    /// VTG, track made good and ground speed
    #[serde(rename = "VTG")]
    #[value(name = "vtg", alias = "VTG")]
    GroundTrack,
}

impl SentenceType {
    pub const ALL: [SentenceType; 3] = [
        SentenceType::PositionFix,
        SentenceType::MinimumNavData,
        SentenceType::GroundTrack,
    ];

    pub fn sentence_id(&self) -> &'static str {
        match self {
            SentenceType::PositionFix => "GGA",
            SentenceType::MinimumNavData => "RMC",
            SentenceType::GroundTrack => "VTG",
        }
    }
}

impl fmt::Display for SentenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sentence_id())
    }
}

impl FromStr for SentenceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GGA" => Ok(SentenceType::PositionFix),
            "RMC" => Ok(SentenceType::MinimumNavData),
            "VTG" => Ok(SentenceType::GroundTrack),
            other => Err(format!("unsupported sentence type: {}", other)),
        }
    }
}

/// Turns a [`FixState`] into complete, checksummed sentences.
///
/// Building never fails: the fix only ever holds validated values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SentenceBuilder {
    checksum_style: ChecksumStyle,
}

impl SentenceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_checksum_style(checksum_style: ChecksumStyle) -> Self {
        Self { checksum_style }
    }

    /// Build `$<payload>*<checksum>` without a line terminator
    pub fn build(&self, fix: &FixState, sentence_type: SentenceType) -> String {
        let payload = match sentence_type {
            SentenceType::PositionFix => gga_payload(fix),
            SentenceType::MinimumNavData => rmc_payload(fix),
            SentenceType::GroundTrack => vtg_payload(fix),
        };
        self.finish(&payload)
    }

    fn finish(&self, payload: &str) -> String {
        let cs = self.checksum_style.render(checksum(payload));
        format!("${}*{}", payload, cs)
    }
}

/// Build with the default (unpadded) checksum
pub fn build_sentence(fix: &FixState, sentence_type: SentenceType) -> String {
    SentenceBuilder::default().build(fix, sentence_type)
}

fn utc_field(fix: &FixState) -> String {
    format!("{:0>9}", truncate_fraction(fix.utc_time(), 2))
}

fn gga_payload(fix: &FixState) -> String {
    format!(
        "{}GGA,{},{},{},{},{},{},{:02},{},M,,,,,",
        TALKER_ID,
        utc_field(fix),
        coordinate::latitude(fix.latitude()),
        fix.latitude_hemisphere().as_str(),
        coordinate::longitude(fix.longitude()),
        fix.longitude_hemisphere().as_str(),
        GGA_QUALITY,
        fix.satellite_count(),
        truncate_fraction(fix.orthometric_height(), 1),
    )
}

fn rmc_payload(fix: &FixState) -> String {
    // magnetic variation and its direction stay empty
    format!(
        "{}RMC,{},{},{},{},{},{},{},{},{:06},,",
        TALKER_ID,
        utc_field(fix),
        fix.fix_status().as_str(),
        coordinate::latitude(fix.latitude()),
        fix.latitude_hemisphere().as_str(),
        coordinate::longitude(fix.longitude()),
        fix.longitude_hemisphere().as_str(),
        truncate_fraction(fix.speed_knots(), 2),
        truncate_fraction(fix.track_angle(), 2),
        fix.fix_date(),
    )
}

fn vtg_payload(fix: &FixState) -> String {
    format!(
        "{}VTG,{},{},,M,{},N,{},K",
        TALKER_ID,
        trim_fraction(fix.track_angle()),
        FixState::TRUE_NORTH_REFERENCE,
        trim_fraction(fix.speed_knots()),
        trim_fraction(fix.speed_over_ground_kph()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nmea::fix::FixStatus;

    fn reference_fix() -> FixState {
        let mut fix = FixState::new();
        fix.set_utc_time(225446.0).unwrap();
        fix.set_latitude(48.117).unwrap();
        fix.set_longitude(11.516).unwrap();
        fix.set_satellite_count(8).unwrap();
        fix.set_orthometric_height(545.4).unwrap();
        fix
    }

    /// Check the trailing checksum against the payload it covers
    fn assert_checksum_matches(sentence: &str) {
        let (body, cs) = sentence.rsplit_once('*').unwrap();
        let payload = body.strip_prefix('$').unwrap();
        assert_eq!(cs, format!("{:X}", checksum(payload)));
    }

    #[test]
    fn test_gga_reference() {
        let sentence = build_sentence(&reference_fix(), SentenceType::PositionFix);
        assert!(sentence.starts_with("$GPGGA,225446.00,4807.0200,N,01130.9600,E,1,08,545.4,M,,,,,*"));
        assert_eq!(sentence, "$GPGGA,225446.00,4807.0200,N,01130.9600,E,1,08,545.4,M,,,,,*1F");
        assert_checksum_matches(&sentence);
    }

    #[test]
    fn test_rmc_reference() {
        let mut fix = reference_fix();
        fix.set_speed_knots(22.4).unwrap();
        fix.set_track_angle(84.4).unwrap();
        fix.set_fix_date(191194).unwrap();

        let sentence = build_sentence(&fix, SentenceType::MinimumNavData);
        assert_eq!(sentence, "$GPRMC,225446.00,A,4807.0200,N,01130.9600,E,22.40,84.40,191194,,*3C");
    }

    #[test]
    fn test_rmc_void_southern_western() {
        let mut fix = FixState::new();
        fix.set_fix_status(FixStatus::Void);
        fix.set_latitude(-33.8688).unwrap();
        fix.set_longitude(-151.2093).unwrap();
        fix.set_fix_date(10594).unwrap();

        let sentence = build_sentence(&fix, SentenceType::MinimumNavData);
        assert!(sentence.starts_with("$GPRMC,000000.00,V,3352.1280,S,15112.5580,W,0.00,0.00,010594,,*"));
        assert_checksum_matches(&sentence);
    }

    #[test]
    fn test_vtg_default_fix() {
        let sentence = build_sentence(&FixState::new(), SentenceType::GroundTrack);
        assert_eq!(sentence, "$GPVTG,0,T,,M,0,N,0,K*7E");
    }

    #[test]
    fn test_vtg_fields() {
        let mut fix = FixState::new();
        fix.set_track_angle(54.7).unwrap();
        fix.set_speed_knots(5.5).unwrap();
        fix.set_speed_over_ground_kph(10.2).unwrap();

        let sentence = build_sentence(&fix, SentenceType::GroundTrack);
        assert!(sentence.starts_with("$GPVTG,54.7,T,,M,5.5,N,10.2,K*"));
        assert_checksum_matches(&sentence);
    }

    #[test]
    fn test_vtg_derived_ground_speed_is_clean() {
        let mut fix = FixState::new();
        for knots in 0..100u32 {
            let knots = knots as f64;
            fix.set_speed_knots(knots).unwrap();
            fix.set_speed_over_ground_kph(knots * 1.852).unwrap();

            let sentence = build_sentence(&fix, SentenceType::GroundTrack);
            let kph = sentence.split(',').nth(7).unwrap();
            let decimals = kph.split('.').nth(1).map_or(0, str::len);
            assert!(decimals <= 3, "{}", sentence);
            assert_checksum_matches(&sentence);
        }

        fix.set_speed_knots(23.0).unwrap();
        fix.set_speed_over_ground_kph(23.0 * 1.852).unwrap();
        let sentence = build_sentence(&fix, SentenceType::GroundTrack);
        assert!(sentence.starts_with("$GPVTG,0,T,,M,23,N,42.596,K*"));
    }

    #[test]
    fn test_height_and_speed_truncate() {
        let mut fix = reference_fix();
        fix.set_orthometric_height(12.99).unwrap();
        fix.set_speed_knots(7.456).unwrap();

        let gga = build_sentence(&fix, SentenceType::PositionFix);
        assert!(gga.contains(",1,08,12.9,M,"));
        let rmc = build_sentence(&fix, SentenceType::MinimumNavData);
        assert!(rmc.contains(",E,7.45,"));
    }

    #[test]
    fn test_two_digit_satellite_count() {
        let mut fix = reference_fix();
        fix.set_satellite_count(12).unwrap();
        assert!(build_sentence(&fix, SentenceType::PositionFix).contains(",1,12,"));
        fix.set_satellite_count(0).unwrap();
        assert!(build_sentence(&fix, SentenceType::PositionFix).contains(",1,00,"));
    }

    #[test]
    fn test_build_is_deterministic() {
        let fix = reference_fix();
        for sentence_type in SentenceType::ALL {
            assert_eq!(
                build_sentence(&fix, sentence_type),
                build_sentence(&fix, sentence_type)
            );
        }
    }

    #[test]
    fn test_two_digit_checksum_style() {
        // 'A' ^ 'L' = 0x0D
        let padded = SentenceBuilder::with_checksum_style(ChecksumStyle::TwoDigit);
        assert_eq!(padded.finish("AL"), "$AL*0D");
        assert_eq!(SentenceBuilder::new().finish("AL"), "$AL*D");

        let sentence = padded.build(&reference_fix(), SentenceType::PositionFix);
        assert!(sentence.ends_with("*1F"));
    }

    #[test]
    fn test_sentence_type_names() {
        assert_eq!("gga".parse::<SentenceType>().unwrap(), SentenceType::PositionFix);
        assert_eq!("VTG".parse::<SentenceType>().unwrap(), SentenceType::GroundTrack);
        assert!("GSV".parse::<SentenceType>().is_err());
        assert_eq!(SentenceType::MinimumNavData.to_string(), "RMC");
    }
}
