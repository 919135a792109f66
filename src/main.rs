// src/main.rs
//! NMEA Encoder - send navigation fixes as NMEA 0183 sentences

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::warn;
use nmea_encoder::{
    config::EncoderConfig,
    display::SentenceEcho,
    driver::{rng_from, Demo},
    nmea::{ChecksumStyle, FixStatus},
    samples,
    transport::list_serial_ports,
    FixState, SentenceBuilder, SentenceType, SerialTransport,
};
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "nmea-encoder", version, about = "Encode navigation fixes as NMEA 0183 sentences")]
struct Cli {
    /// Configuration file [default: ~/.config/nmea-encoder/config.json]
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Send sample coordinates from a CSV log over a serial port
    Send(SendArgs),
    /// Build sentences for a single fix and print them
    Encode(EncodeArgs),
    /// List available serial ports
    Ports,
}

#[derive(Debug, Args)]
struct SendArgs {
    /// Serial port, e.g. /dev/ttyUSB0 or COM1
    #[arg(short, long)]
    port: Option<String>,

    /// Baud rate (4800, 9600, 19200, 38400 or 115200)
    #[arg(short, long)]
    baud: Option<u32>,

    /// CSV file with alternating latitude/longitude columns
    #[arg(short, long)]
    samples: Option<PathBuf>,

    /// Sentence types to send per point (repeatable)
    #[arg(short = 't', long = "type", value_enum)]
    types: Vec<SentenceType>,

    /// Seed for synthetic speed and track values
    #[arg(long)]
    seed: Option<u64>,

    /// Pause between points in milliseconds
    #[arg(short, long)]
    interval: Option<u64>,

    /// Stamp sentences with the system clock instead of 000000
    #[arg(long)]
    system_time: bool,

    /// Always render the checksum with two hex digits
    #[arg(long)]
    two_digit_checksum: bool,

    /// Store the resulting settings in the configuration file
    #[arg(long)]
    save: bool,
}

#[derive(Debug, Args)]
struct EncodeArgs {
    /// Time of fix as HHMMSS(.ss)
    #[arg(long, default_value_t = 0.0)]
    utc: f64,

    /// Latitude in decimal degrees, negative for south
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    lat: f64,

    /// Longitude in decimal degrees, negative for west
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    lon: f64,

    #[arg(long, default_value_t = 8, allow_negative_numbers = true)]
    sats: i64,

    /// Height above the geoid in meters
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    height: f64,

    /// Speed in knots
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    speed: f64,

    /// Speed over ground in km/h
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    sog: f64,

    /// Track angle in degrees
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    track: f64,

    /// Date of fix as DDMMYY
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    date: i64,

    /// Mark the fix as void in RMC
    #[arg(long)]
    void: bool,

    /// Take time and date from the system clock
    #[arg(long)]
    now: bool,

    /// Sentence types to build [default: all]
    #[arg(short = 't', long = "type", value_enum)]
    types: Vec<SentenceType>,

    #[arg(long)]
    two_digit_checksum: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Send(args) => send(cli.config.as_deref(), args).await,
        Command::Encode(args) => encode(args),
        Command::Ports => list_serial_ports().context("unable to list serial ports"),
    }
}

fn load_config(path: Option<&Path>) -> EncoderConfig {
    let loaded = match path {
        Some(path) => EncoderConfig::load_from(path),
        None => EncoderConfig::load(),
    };
    loaded.unwrap_or_else(|e| {
        warn!("{}, using defaults", e);
        EncoderConfig::default()
    })
}

async fn send(config_path: Option<&Path>, args: SendArgs) -> Result<()> {
    let mut config = load_config(config_path);

    if args.port.is_some() || args.baud.is_some() {
        let port = args.port.unwrap_or_else(|| config.transport.port.clone());
        let baud = args.baud.unwrap_or(config.transport.baud_rate);
        config.update_transport(port, baud);
    }
    if let Some(samples_path) = args.samples {
        config.samples_path = samples_path;
    }
    if !args.types.is_empty() {
        config.update_sentence_types(&args.types);
    }
    if let Some(interval) = args.interval {
        config.interval_ms = interval;
    }
    config.seed = args.seed.or(config.seed);
    config.use_system_time |= args.system_time;
    if args.two_digit_checksum {
        config.checksum_style = ChecksumStyle::TwoDigit;
    }

    if args.save {
        match config_path {
            Some(path) => config.save_to(path),
            None => config.save(),
        }
        .context("unable to save configuration")?;
    }

    let points = samples::load_points(&config.samples_path)
        .with_context(|| format!("unable to load samples from {}", config.samples_path.display()))?;
    println!("Loaded {} sample points", points.len());

    println!(
        "Connecting to receiver on {} at {} baud...",
        config.transport.port, config.transport.baud_rate
    );
    let mut transport = SerialTransport::open(&config.transport)
        .with_context(|| format!("could not open {}", config.transport.port))?;
    println!("Connected successfully!");

    let mut demo = Demo::new(&config, rng_from(config.seed), SentenceEcho::default())?;
    let mut stdout = std::io::stdout();
    let summary = demo
        .run(&points, &mut transport, &mut stdout)
        .await
        .map_err(|e| anyhow::anyhow!("send failed with code {}: {}", e.code(), e))?;

    SentenceEcho::default().print_summary(&mut stdout, &summary)?;
    Ok(())
}

fn encode(args: EncodeArgs) -> Result<()> {
    let mut fix = FixState::new();
    if args.now {
        fix.set_time_from(&chrono::Utc::now());
    } else {
        fix.set_utc_time(args.utc)?;
        fix.set_fix_date(args.date)?;
    }
    fix.set_latitude(args.lat)?;
    fix.set_longitude(args.lon)?;
    fix.set_satellite_count(args.sats)?;
    fix.set_orthometric_height(args.height)?;
    fix.set_speed_knots(args.speed)?;
    fix.set_speed_over_ground_kph(args.sog)?;
    fix.set_track_angle(args.track)?;
    if args.void {
        fix.set_fix_status(FixStatus::Void);
    }

    let builder = if args.two_digit_checksum {
        SentenceBuilder::with_checksum_style(ChecksumStyle::TwoDigit)
    } else {
        SentenceBuilder::new()
    };

    let types = if args.types.is_empty() {
        SentenceType::ALL.to_vec()
    } else {
        args.types
    };

    for sentence_type in types {
        println!("{}", builder.build(&fix, sentence_type));
    }
    Ok(())
}
