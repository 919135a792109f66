// src/samples.rs
//! Sample coordinate loading from CSV logs

use crate::error::{NmeaError, Result};
use log::warn;
use std::path::Path;

/// One latitude/longitude pair taken from a sample row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Read a CSV file into rows of trimmed cells
pub fn load_rows(path: &Path) -> Result<Vec<Vec<String>>> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| NmeaError::Parse(format!("Failed to read {}: {}", path.display(), e)))?;
    Ok(parse_rows(&contents))
}

pub fn parse_rows(contents: &str) -> Vec<Vec<String>> {
    contents
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.split(',').map(|cell| cell.trim().to_string()).collect())
        .collect()
}

/// Turn rows into points. The first row is a header.
///
/// Cells alternate latitude, longitude; when a row carries several pairs the
/// last one wins. Rows without a full numeric pair are skipped.
pub fn sample_points(rows: &[Vec<String>]) -> Vec<SamplePoint> {
    rows.iter()
        .enumerate()
        .skip(1)
        .filter_map(|(index, row)| match row_point(row) {
            Some(point) => Some(point),
            None => {
                warn!("skipping sample row {}: {:?}", index, row);
                None
            }
        })
        .collect()
}

fn row_point(row: &[String]) -> Option<SamplePoint> {
    let mut latitude = None;
    let mut longitude = None;

    for (i, cell) in row.iter().enumerate() {
        let value = cell.parse::<f64>().ok()?;
        if i % 2 == 0 {
            latitude = Some(value);
        } else {
            longitude = Some(value);
        }
    }

    Some(SamplePoint {
        latitude: latitude?,
        longitude: longitude?,
    })
}

/// Load a CSV file straight into points
pub fn load_points(path: &Path) -> Result<Vec<SamplePoint>> {
    Ok(sample_points(&load_rows(path)?))
}
