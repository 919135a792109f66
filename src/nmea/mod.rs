// src/nmea/mod.rs
//! NMEA 0183 sentence encoding

pub mod checksum;
pub mod coordinate;
pub mod fix;
pub mod sentence;

pub use checksum::{checksum, ChecksumStyle};
pub use fix::{
    time_and_date, FixState, FixStatus, LatitudeHemisphere, LongitudeHemisphere, NavigationUpdate,
};
pub use sentence::{build_sentence, SentenceBuilder, SentenceType};

/// Fixed-point rendering width that every truncated field starts from
const RENDER_DECIMALS: usize = 6;

/// Render `value` with at most `digits` fractional digits, cutting (not
/// rounding) anything past them.
///
/// The value is first rendered to six decimals, so float noise such as
/// `4807.019999999` still lands on `4807.0200`.
pub(crate) fn truncate_fraction(value: f64, digits: usize) -> String {
    let digits = digits.min(RENDER_DECIMALS);
    let rendered = format!("{:.*}", RENDER_DECIMALS, value);
    match rendered.find('.') {
        Some(dot) if digits == 0 => rendered[..dot].to_string(),
        Some(dot) => rendered[..dot + 1 + digits].to_string(),
        None => rendered,
    }
}

/// Render `value` to six decimals, then drop trailing zeros and a bare
/// point, e.g. `0`, `54.7` or `10.186`.
pub(crate) fn trim_fraction(value: f64) -> String {
    let rendered = format!("{:.*}", RENDER_DECIMALS, value);
    let trimmed = rendered.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" => "0".to_string(),
        other => other.to_string(),
    }
}
