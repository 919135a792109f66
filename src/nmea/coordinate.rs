// src/nmea/coordinate.rs
//! Decimal degrees to NMEA degrees+minutes conversion

use super::truncate_fraction;
use std::fmt;

/// Significant digits kept after composing degrees and minutes
const SIGNIFICANT_DIGITS: usize = 8;

/// Minute decimals carried on the wire
const MINUTE_DECIMALS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    fn degree_digits(&self) -> usize {
        match self {
            Axis::Latitude => 2,
            Axis::Longitude => 3,
        }
    }
}

/// An angle in NMEA `ddmm.mmmm` / `dddmm.mmmm` form.
///
/// Only the magnitude is encoded; the sign travels as the hemisphere letter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DegreesMinutes {
    value: f64,
    axis: Axis,
}

impl DegreesMinutes {
    pub fn new(angle: f64, axis: Axis) -> Self {
        let angle = angle.abs();
        let whole = angle.trunc();
        let offset = angle - whole;
        let minutes_whole = (60.0 * offset).trunc();
        let fraction = offset * 60.0 - minutes_whole;

        // degrees shifted past a two-digit minutes field
        let numeral = whole * 100.0 + minutes_whole;

        Self {
            value: round_significant(numeral + fraction, SIGNIFICANT_DIGITS),
            axis,
        }
    }

    /// The composed numeral, e.g. `4807.02` for 48.117 degrees
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Back to unsigned decimal degrees
    pub fn to_degrees(&self) -> f64 {
        dm_to_degrees(self.value)
    }
}

impl fmt::Display for DegreesMinutes {
    /// Fixed width: two or three degree digits, two minute digits and four
    /// truncated minute decimals.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = truncate_fraction(self.value, MINUTE_DECIMALS);
        let width = self.axis.degree_digits() + 2 + 1 + MINUTE_DECIMALS;
        write!(f, "{:0>width$}", text, width = width)
    }
}

pub fn latitude(angle: f64) -> DegreesMinutes {
    DegreesMinutes::new(angle, Axis::Latitude)
}

pub fn longitude(angle: f64) -> DegreesMinutes {
    DegreesMinutes::new(angle, Axis::Longitude)
}

/// Convert a `dddmm.mmmm` numeral back to decimal degrees
pub fn dm_to_degrees(value: f64) -> f64 {
    let degrees = (value / 100.0).trunc();
    let minutes = value - degrees * 100.0;
    degrees + minutes / 60.0
}

fn round_significant(value: f64, digits: usize) -> f64 {
    let rendered = format!("{:.*e}", digits.saturating_sub(1), value);
    rendered.parse().unwrap_or(value)
}
