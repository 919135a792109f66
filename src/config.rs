// src/config.rs
//! Configuration management with a JSON file under the user's config directory

use crate::error::{NmeaError, Result};
use crate::nmea::{ChecksumStyle, SentenceType};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Serial timeouts: a fixed allowance plus a per-byte multiplier, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutPolicy {
    pub read_interval_ms: u64,
    pub constant_ms: u64,
    pub multiplier_ms: u64,
}

impl Default for TimeoutPolicy {
    fn default() -> Self {
        Self {
            read_interval_ms: 50,
            constant_ms: 50,
            multiplier_ms: 10,
        }
    }
}

impl TimeoutPolicy {
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_interval_ms.max(self.constant_ms))
    }

    /// Upper bound for writing `bytes` bytes
    pub fn write_timeout(&self, bytes: usize) -> Duration {
        let per_byte = self.multiplier_ms.saturating_mul(bytes as u64);
        Duration::from_millis(self.constant_ms.saturating_add(per_byte))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    pub port: String,
    pub baud_rate: u32,
    pub timeouts: TimeoutPolicy,
}

impl Default for TransportConfig {
    fn default() -> Self {
        #[cfg(windows)]
        let port = "COM1".to_string();
        #[cfg(not(windows))]
        let port = "/dev/ttyUSB0".to_string();

        Self {
            port,
            baud_rate: 19200,
            timeouts: TimeoutPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    pub transport: TransportConfig,
    pub samples_path: PathBuf,
    pub sentence_types: Vec<SentenceType>,
    pub satellite_count: i64,
    pub orthometric_height: f64,
    pub checksum_style: ChecksumStyle,
    /// Pause between sample points
    pub interval_ms: u64,
    /// Seed for the synthetic speed and track values; random when unset
    pub seed: Option<u64>,
    pub use_system_time: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            transport: TransportConfig::default(),
            samples_path: PathBuf::from("testLog.csv"),
            sentence_types: vec![SentenceType::PositionFix],
            satellite_count: 8,
            orthometric_height: 0.0,
            checksum_style: ChecksumStyle::Unpadded,
            interval_ms: 0,
            seed: None,
            use_system_time: false,
        }
    }
}

impl EncoderConfig {
    /// Load configuration from the default location, falling back to defaults
    /// when no file exists yet
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| NmeaError::Other(format!("Failed to read config file: {}", e)))?;

        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| NmeaError::Other(format!("Failed to create config directory: {}", e)))?;
        }

        let contents = serde_json::to_string_pretty(self)?;

        std::fs::write(path, contents)
            .map_err(|e| NmeaError::Other(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Get config file path
    pub fn get_config_path() -> Result<PathBuf> {
        #[cfg(windows)]
        let home = std::env::var("USERPROFILE");
        #[cfg(not(windows))]
        let home = std::env::var("HOME");

        let home = home.map_err(|_| NmeaError::Other("Home directory is not set".to_string()))?;

        Ok(PathBuf::from(home).join(".config").join("nmea-encoder").join("config.json"))
    }

    /// Update serial port settings
    pub fn update_transport(&mut self, port: String, baud_rate: u32) {
        self.transport.port = port;
        self.transport.baud_rate = baud_rate;
    }

    /// Sentence types to emit per fix; an empty list means GGA only
    pub fn update_sentence_types(&mut self, types: &[SentenceType]) {
        self.sentence_types = if types.is_empty() {
            vec![SentenceType::PositionFix]
        } else {
            types.to_vec()
        };
    }
}
