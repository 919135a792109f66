// src/lib.rs
//! NMEA Encoder Library
//!
//! Encodes a navigation fix into NMEA 0183 GGA, RMC and VTG sentences and
//! sends them to downstream equipment over a serial line.

pub mod config;
pub mod display;
pub mod driver;
pub mod encoder;
pub mod error;
pub mod nmea;
pub mod samples;
pub mod transport;

// Re-export main types for convenience
pub use encoder::{NmeaEncoder, SharedEncoder};
pub use error::{NmeaError, Result, ValidationError};
pub use nmea::{build_sentence, FixState, SentenceBuilder, SentenceType};
pub use transport::{SentenceTransport, SerialTransport};
