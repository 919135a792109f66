// src/nmea/fix.rs
//! Navigation fix state and its validated setters

use crate::error::ValidationError;
use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::{Deserialize, Serialize};

const MAX_SIX_DIGITS: f64 = 999_999.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LatitudeHemisphere {
    #[default]
    North,
    South,
}

impl LatitudeHemisphere {
    pub fn as_str(&self) -> &'static str {
        match self {
            LatitudeHemisphere::North => "N",
            LatitudeHemisphere::South => "S",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LongitudeHemisphere {
    #[default]
    East,
    West,
}

impl LongitudeHemisphere {
    pub fn as_str(&self) -> &'static str {
        match self {
            LongitudeHemisphere::East => "E",
            LongitudeHemisphere::West => "W",
        }
    }
}

/// RMC status field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FixStatus {
    #[default]
    Active,
    Void,
}

impl FixStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FixStatus::Active => "A",
            FixStatus::Void => "V",
        }
    }
}

/// Fields applied together by [`FixState::update_navigation`]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NavigationUpdate {
    pub utc_time: f64,
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub speed_knots: f64,
    pub speed_over_ground_kph: f64,
    pub track_angle_deg: f64,
    pub fix_date: i64,
}

/// The fix encoded into outgoing sentences.
///
/// Every setter checks a single precondition. A rejected value leaves the
/// field untouched, so the invariants below hold between any two calls:
///
/// * `0 <= utc_time <= 999999` (HHMMSS.ss)
/// * `-90 <= latitude_deg <= 90`, `-180 <= longitude_deg <= 180`
/// * satellite count, height and both speeds are non-negative
/// * `0 <= fix_date <= 999999` (DDMMYY)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FixState {
    utc_time: f64,
    latitude_deg: f64,
    latitude_hemisphere: LatitudeHemisphere,
    longitude_deg: f64,
    longitude_hemisphere: LongitudeHemisphere,
    satellite_count: u32,
    orthometric_height: f64,
    fix_status: FixStatus,
    speed_knots: f64,
    speed_over_ground_kph: f64,
    track_angle_deg: f64,
    fix_date: u32,
}

impl Default for FixState {
    fn default() -> Self {
        Self {
            utc_time: 0.0,
            latitude_deg: 0.0,
            latitude_hemisphere: LatitudeHemisphere::North,
            longitude_deg: 0.0,
            longitude_hemisphere: LongitudeHemisphere::East,
            satellite_count: 8,
            orthometric_height: 0.0,
            fix_status: FixStatus::Active,
            speed_knots: 0.0,
            speed_over_ground_kph: 0.0,
            track_angle_deg: 0.0,
            fix_date: 0,
        }
    }
}

fn finite(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::new(field, "value is not a finite number"))
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if finite(field, value)? < 0.0 {
        return Err(ValidationError::new(field, "negative value"));
    }
    Ok(value)
}

/// `HHMMSS.ss` and `DDMMYY` for a timestamp. Leap seconds fold into :59.
pub fn time_and_date(timestamp: &DateTime<Utc>) -> (f64, u32) {
    let centis = (timestamp.nanosecond() % 1_000_000_000) / 10_000_000;
    let hhmmss = timestamp.hour() * 10_000 + timestamp.minute() * 100 + timestamp.second().min(59);
    let yy = timestamp.year().rem_euclid(100) as u32;

    (
        hhmmss as f64 + centis as f64 / 100.0,
        timestamp.day() * 10_000 + timestamp.month() * 100 + yy,
    )
}

impl FixState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Relative-to-true-north indicator used by VTG
    pub const TRUE_NORTH_REFERENCE: &'static str = "T";

    /// Set the time of fix, e.g. `225446.0` for 22:54:46 UTC
    pub fn set_utc_time(&mut self, utc: f64) -> Result<(), ValidationError> {
        let utc = finite("utc_time", utc)?;
        if utc < 0.0 {
            return Err(ValidationError::new("utc_time", "received negative value"));
        }
        if utc > MAX_SIX_DIGITS {
            return Err(ValidationError::new("utc_time", "value too large"));
        }
        self.utc_time = utc;
        Ok(())
    }

    /// Set the latitude; the sign selects the hemisphere
    pub fn set_latitude(&mut self, lat: f64) -> Result<(), ValidationError> {
        let lat = finite("latitude", lat)?;
        if !(-90.0..=90.0).contains(&lat) {
            return Err(ValidationError::new(
                "latitude",
                "lat must be between -90 and 90 degrees",
            ));
        }
        self.latitude_deg = lat;
        self.latitude_hemisphere = if lat < 0.0 {
            LatitudeHemisphere::South
        } else {
            LatitudeHemisphere::North
        };
        Ok(())
    }

    /// Set the longitude; the sign selects the hemisphere
    pub fn set_longitude(&mut self, lon: f64) -> Result<(), ValidationError> {
        let lon = finite("longitude", lon)?;
        if !(-180.0..=180.0).contains(&lon) {
            return Err(ValidationError::new(
                "longitude",
                "lon must be between -180 and 180 degrees",
            ));
        }
        self.longitude_deg = lon;
        self.longitude_hemisphere = if lon < 0.0 {
            LongitudeHemisphere::West
        } else {
            LongitudeHemisphere::East
        };
        Ok(())
    }

    pub fn set_satellite_count(&mut self, count: i64) -> Result<(), ValidationError> {
        if count < 0 {
            return Err(ValidationError::new("satellite_count", "negative value"));
        }
        self.satellite_count = u32::try_from(count)
            .map_err(|_| ValidationError::new("satellite_count", "value too large"))?;
        Ok(())
    }

    /// Height above the geoid in meters
    pub fn set_orthometric_height(&mut self, height: f64) -> Result<(), ValidationError> {
        self.orthometric_height = non_negative("orthometric_height", height)?;
        Ok(())
    }

    pub fn set_fix_status(&mut self, status: FixStatus) {
        self.fix_status = status;
    }

    pub fn set_speed_knots(&mut self, knots: f64) -> Result<(), ValidationError> {
        self.speed_knots = non_negative("speed_knots", knots)?;
        Ok(())
    }

    pub fn set_speed_over_ground_kph(&mut self, kph: f64) -> Result<(), ValidationError> {
        self.speed_over_ground_kph = non_negative("speed_over_ground_kph", kph)?;
        Ok(())
    }

    /// Track angle in degrees. Any finite value is accepted; 0-360 is the convention.
    pub fn set_track_angle(&mut self, angle: f64) -> Result<(), ValidationError> {
        self.track_angle_deg = finite("track_angle", angle)?;
        Ok(())
    }

    /// Set the date of fix, e.g. `191194` for 19 November 1994
    pub fn set_fix_date(&mut self, date: i64) -> Result<(), ValidationError> {
        if date < 0 {
            return Err(ValidationError::new("fix_date", "negative value"));
        }
        if date > MAX_SIX_DIGITS as i64 {
            return Err(ValidationError::new("fix_date", "value too large"));
        }
        self.fix_date = date as u32;
        Ok(())
    }

    /// Apply every navigation field in order.
    ///
    /// Not transactional: a rejected field does not stop the ones after it,
    /// and fields applied before a failure stay applied. All rejections are
    /// returned together.
    pub fn update_navigation(&mut self, update: &NavigationUpdate) -> Result<(), Vec<ValidationError>> {
        let results = [
            self.set_utc_time(update.utc_time),
            self.set_latitude(update.latitude_deg),
            self.set_longitude(update.longitude_deg),
            self.set_speed_knots(update.speed_knots),
            self.set_speed_over_ground_kph(update.speed_over_ground_kph),
            self.set_track_angle(update.track_angle_deg),
            self.set_fix_date(update.fix_date),
        ];

        let errors: Vec<ValidationError> = results.into_iter().filter_map(|r| r.err()).collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Derive time and date of fix from a timestamp, truncated to centiseconds
    pub fn set_time_from(&mut self, timestamp: &DateTime<Utc>) {
        let (utc_time, fix_date) = time_and_date(timestamp);
        self.utc_time = utc_time;
        self.fix_date = fix_date;
    }

    pub fn utc_time(&self) -> f64 {
        self.utc_time
    }

    pub fn latitude(&self) -> f64 {
        self.latitude_deg
    }

    pub fn latitude_hemisphere(&self) -> LatitudeHemisphere {
        self.latitude_hemisphere
    }

    pub fn longitude(&self) -> f64 {
        self.longitude_deg
    }

    pub fn longitude_hemisphere(&self) -> LongitudeHemisphere {
        self.longitude_hemisphere
    }

    pub fn satellite_count(&self) -> u32 {
        self.satellite_count
    }

    pub fn orthometric_height(&self) -> f64 {
        self.orthometric_height
    }

    pub fn fix_status(&self) -> FixStatus {
        self.fix_status
    }

    pub fn speed_knots(&self) -> f64 {
        self.speed_knots
    }

    pub fn speed_over_ground_kph(&self) -> f64 {
        self.speed_over_ground_kph
    }

    pub fn track_angle(&self) -> f64 {
        self.track_angle_deg
    }

    pub fn fix_date(&self) -> u32 {
        self.fix_date
    }
}
