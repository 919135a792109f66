// src/error.rs
//! Error types for the NMEA encoder

use std::fmt;
use std::time::Duration;

pub type Result<T> = std::result::Result<T, NmeaError>;

/// A setter rejected its input; the field keeps its previous value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: &'static str,
}

impl ValidationError {
    pub fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug)]
pub enum NmeaError {
    Validation(ValidationError),
    DeviceNotFound(String),
    Connection(String),
    UnsupportedBaudRate(u32),
    Write(String),
    Timeout(Duration),
    Io(std::io::Error),
    Serial(tokio_serial::Error),
    Json(serde_json::Error),
    Parse(String),
    Other(String),
}

impl NmeaError {
    /// Numeric code reported alongside the message: -1 for rejected input,
    /// -2 for transport failures, -3 for configuration and sample data.
    pub fn code(&self) -> i32 {
        match self {
            NmeaError::Validation(_) => -1,
            NmeaError::DeviceNotFound(_)
            | NmeaError::Connection(_)
            | NmeaError::UnsupportedBaudRate(_)
            | NmeaError::Write(_)
            | NmeaError::Timeout(_)
            | NmeaError::Io(_)
            | NmeaError::Serial(_) => -2,
            NmeaError::Json(_) | NmeaError::Parse(_) | NmeaError::Other(_) => -3,
        }
    }

    pub fn is_transport(&self) -> bool {
        self.code() == -2
    }
}

impl fmt::Display for NmeaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NmeaError::Validation(e) => write!(f, "Invalid value for {}", e),
            NmeaError::DeviceNotFound(port) => write!(f, "Serial port {} does not exist", port),
            NmeaError::Connection(msg) => write!(f, "Connection error: {}", msg),
            NmeaError::UnsupportedBaudRate(rate) => write!(f, "Invalid baud rate: {}", rate),
            NmeaError::Write(msg) => write!(f, "Failed to write: {}", msg),
            NmeaError::Timeout(after) => write!(f, "Write timed out after {} ms", after.as_millis()),
            NmeaError::Io(e) => write!(f, "IO error: {}", e),
            NmeaError::Serial(e) => write!(f, "Serial error: {}", e),
            NmeaError::Json(e) => write!(f, "JSON error: {}", e),
            NmeaError::Parse(msg) => write!(f, "Parse error: {}", msg),
            NmeaError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for NmeaError {}

impl From<ValidationError> for NmeaError {
    fn from(error: ValidationError) -> Self {
        NmeaError::Validation(error)
    }
}

impl From<std::io::Error> for NmeaError {
    fn from(error: std::io::Error) -> Self {
        NmeaError::Io(error)
    }
}

impl From<tokio_serial::Error> for NmeaError {
    fn from(error: tokio_serial::Error) -> Self {
        NmeaError::Serial(error)
    }
}

impl From<serde_json::Error> for NmeaError {
    fn from(error: serde_json::Error) -> Self {
        NmeaError::Json(error)
    }
}

impl From<anyhow::Error> for NmeaError {
    fn from(error: anyhow::Error) -> Self {
        NmeaError::Other(error.to_string())
    }
}
