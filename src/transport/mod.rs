// src/transport/mod.rs
//! Delivery of finished sentences to downstream equipment

pub mod serial;

pub use serial::{list_serial_ports, BaudRate, SerialTransport};

use crate::config::TimeoutPolicy;
use crate::error::{NmeaError, Result};
use log::{debug, warn};
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Appended to every sentence on the wire
pub const LINE_TERMINATOR: &str = "\r\n";

/// A write-only line to a receiver.
///
/// The handle is released by [`close`](Self::close) or, on any other exit
/// path, when the transport is dropped.
pub struct SentenceTransport<W> {
    name: String,
    writer: Option<W>,
    timeouts: TimeoutPolicy,
    bytes_written: u64,
}

impl<W: AsyncWrite + Unpin> SentenceTransport<W> {
    /// Wrap an already opened writer
    pub fn from_writer(name: impl Into<String>, writer: W, timeouts: TimeoutPolicy) -> Self {
        Self {
            name: name.into(),
            writer: Some(writer),
            timeouts,
            bytes_written: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_open(&self) -> bool {
        self.writer.is_some()
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    pub fn get_ref(&self) -> Option<&W> {
        self.writer.as_ref()
    }

    /// Write all of `bytes` within `constant + multiplier * len` milliseconds
    pub async fn write(&mut self, bytes: &[u8]) -> Result<()> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| NmeaError::Connection(format!("{} is not open", self.name)))?;

        let limit = self.timeouts.write_timeout(bytes.len());
        let write = async {
            writer.write_all(bytes).await?;
            writer.flush().await
        };

        match tokio::time::timeout(limit, write).await {
            Ok(Ok(())) => {
                self.bytes_written += bytes.len() as u64;
                debug!("wrote {} bytes to {}", bytes.len(), self.name);
                Ok(())
            }
            Ok(Err(e)) => Err(NmeaError::Write(format!("{}: {}", self.name, e))),
            Err(_) => Err(NmeaError::Timeout(limit)),
        }
    }

    /// Send one sentence followed by the line terminator
    pub async fn send_sentence(&mut self, sentence: &str) -> Result<()> {
        let mut line = String::with_capacity(sentence.len() + LINE_TERMINATOR.len());
        line.push_str(sentence);
        line.push_str(LINE_TERMINATOR);
        self.write(line.as_bytes()).await
    }

    /// Release the handle. Never fails and does nothing once closed.
    pub async fn close(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            if let Err(e) = writer.shutdown().await {
                warn!("error while closing {}: {}", self.name, e);
            }
            debug!("closed {} after {} bytes", self.name, self.bytes_written);
        }
    }
}
