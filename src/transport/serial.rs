// src/transport/serial.rs
//! Serial port transport (8N1, fixed baud table)

use super::SentenceTransport;
use crate::config::TransportConfig;
use crate::error::{NmeaError, Result};
use log::info;
use tokio_serial::{
    DataBits, ErrorKind, FlowControl, Parity, SerialPortBuilderExt, SerialStream, StopBits,
};

pub type SerialTransport = SentenceTransport<SerialStream>;

/// Rates the receiving equipment accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaudRate {
    B4800,
    B9600,
    B19200,
    B38400,
    B115200,
}

impl BaudRate {
    pub const SUPPORTED: [BaudRate; 5] = [
        BaudRate::B4800,
        BaudRate::B9600,
        BaudRate::B19200,
        BaudRate::B38400,
        BaudRate::B115200,
    ];

    pub fn as_u32(&self) -> u32 {
        match self {
            BaudRate::B4800 => 4800,
            BaudRate::B9600 => 9600,
            BaudRate::B19200 => 19200,
            BaudRate::B38400 => 38400,
            BaudRate::B115200 => 115200,
        }
    }
}

impl TryFrom<u32> for BaudRate {
    type Error = NmeaError;

    fn try_from(rate: u32) -> Result<Self> {
        Self::SUPPORTED
            .iter()
            .copied()
            .find(|b| b.as_u32() == rate)
            .ok_or(NmeaError::UnsupportedBaudRate(rate))
    }
}

impl SentenceTransport<SerialStream> {
    /// Open the configured port for writing
    pub fn open(config: &TransportConfig) -> Result<Self> {
        let baud_rate = BaudRate::try_from(config.baud_rate)?;

        let stream = tokio_serial::new(&config.port, baud_rate.as_u32())
            .data_bits(DataBits::Eight)
            .stop_bits(StopBits::One)
            .parity(Parity::None)
            .flow_control(FlowControl::None)
            .timeout(config.timeouts.read_timeout())
            .open_native_async()
            .map_err(|e| open_error(&config.port, e))?;

        info!("opened {} at {} baud", config.port, baud_rate.as_u32());
        Ok(Self::from_writer(config.port.clone(), stream, config.timeouts))
    }
}

fn open_error(port: &str, error: tokio_serial::Error) -> NmeaError {
    match error.kind() {
        ErrorKind::NoDevice | ErrorKind::Io(std::io::ErrorKind::NotFound) => {
            NmeaError::DeviceNotFound(port.to_string())
        }
        _ => NmeaError::Connection(format!("Failed to open serial port {}: {}", port, error)),
    }
}

/// List available serial ports
pub fn list_serial_ports() -> Result<()> {
    let ports = tokio_serial::available_ports()
        .map_err(|e| NmeaError::Other(format!("Failed to list serial ports: {}", e)))?;

    if ports.is_empty() {
        println!("No serial ports found.");
    } else {
        println!("Available serial ports:");
        for port in ports {
            println!("  {} - {:?}", port.port_name, port.port_type);
        }
    }

    Ok(())
}
