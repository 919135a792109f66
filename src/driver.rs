// src/driver.rs
//! Demonstration loop: sample coordinates in, sentences out

use crate::{
    config::EncoderConfig,
    display::SentenceEcho,
    encoder::{NmeaEncoder, SharedEncoder},
    error::{NmeaError, Result},
    nmea::{time_and_date, NavigationUpdate, SentenceBuilder, SentenceType},
    samples::SamplePoint,
    transport::SentenceTransport,
};
use chrono::Utc;
use log::{info, warn};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::{io::Write, time::Duration};
use tokio::io::AsyncWrite;

const KNOTS_TO_KPH: f64 = 1.852;

/// Outcome of a demonstration run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DemoSummary {
    pub points: usize,
    pub sentences_sent: usize,
    pub rejected_fields: usize,
}

/// Seeded generator when a seed is configured, entropy otherwise
pub fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

pub struct Demo<R> {
    encoder: SharedEncoder,
    sentence_types: Vec<SentenceType>,
    use_system_time: bool,
    interval: Duration,
    rng: R,
    echo: SentenceEcho,
}

impl<R: Rng> Demo<R> {
    /// Set up the session fix from the configuration
    pub fn new(config: &EncoderConfig, rng: R, echo: SentenceEcho) -> Result<Self> {
        let mut encoder = NmeaEncoder::with_builder(SentenceBuilder::with_checksum_style(config.checksum_style));
        encoder.fix_mut().set_satellite_count(config.satellite_count)?;
        encoder.fix_mut().set_orthometric_height(config.orthometric_height)?;

        let sentence_types = if config.sentence_types.is_empty() {
            vec![SentenceType::PositionFix]
        } else {
            config.sentence_types.clone()
        };

        Ok(Self {
            encoder: SharedEncoder::new(encoder),
            sentence_types,
            use_system_time: config.use_system_time,
            interval: Duration::from_millis(config.interval_ms),
            rng,
            echo,
        })
    }

    pub fn encoder(&self) -> &SharedEncoder {
        &self.encoder
    }

    /// Encode every point and send the sentences. The transport is closed
    /// when this returns, whether or not the run succeeded.
    pub async fn run<W: AsyncWrite + Unpin>(
        &mut self,
        points: &[SamplePoint],
        transport: &mut SentenceTransport<W>,
        out: &mut impl Write,
    ) -> Result<DemoSummary> {
        let result = self.send_points(points, transport, out).await;
        transport.close().await;

        if let Ok(summary) = &result {
            info!(
                "sent {} sentences for {} points to {}",
                summary.sentences_sent,
                summary.points,
                transport.name()
            );
        }
        result
    }

    async fn send_points<W: AsyncWrite + Unpin>(
        &mut self,
        points: &[SamplePoint],
        transport: &mut SentenceTransport<W>,
        out: &mut impl Write,
    ) -> Result<DemoSummary> {
        let mut summary = DemoSummary::default();

        for (index, point) in points.iter().enumerate() {
            if index > 0 && !self.interval.is_zero() {
                tokio::time::sleep(self.interval).await;
            }

            let (sentences, rejected) = self.encode_point(point);
            summary.points += 1;
            summary.rejected_fields += rejected;

            for (sentence_type, sentence) in sentences {
                self.echo.print_sentence(out, index + 1, sentence_type, &sentence)?;
                transport.send_sentence(&sentence).await?;
                summary.sentences_sent += 1;
            }
        }

        Ok(summary)
    }

    /// Apply one point plus synthetic motion and build every configured type
    /// under a single lock. Returns the sentences and the number of rejected
    /// fields; rejected fields keep their previous values.
    fn encode_point(&mut self, point: &SamplePoint) -> (Vec<(SentenceType, String)>, usize) {
        let speed_knots = self.rng.gen_range(0..100u32) as f64;
        let track_angle = self.rng.gen_range(0..100u32) as f64;
        let clock = self.use_system_time.then(|| time_and_date(&Utc::now()));
        let sentence_types = &self.sentence_types;

        self.encoder.with(|encoder| {
            let (utc_time, fix_date) = match clock {
                Some((utc, date)) => (utc, date as i64),
                None => (0.0, encoder.fix().fix_date() as i64),
            };

            let update = NavigationUpdate {
                utc_time,
                latitude_deg: point.latitude,
                longitude_deg: point.longitude,
                speed_knots,
                speed_over_ground_kph: speed_knots * KNOTS_TO_KPH,
                track_angle_deg: track_angle,
                fix_date,
            };

            let rejected = match encoder.fix_mut().update_navigation(&update) {
                Ok(()) => 0,
                Err(errors) => {
                    for error in &errors {
                        warn!("{}", NmeaError::from(error.clone()));
                    }
                    errors.len()
                }
            };

            let sentences = sentence_types
                .iter()
                .map(|&sentence_type| (sentence_type, encoder.build_as(sentence_type)))
                .collect();

            (sentences, rejected)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimeoutPolicy;
    use crate::nmea::checksum;
    use crate::transport::tests::BrokenWriter;

    fn points() -> Vec<SamplePoint> {
        vec![
            SamplePoint { latitude: 48.117, longitude: 11.516 },
            SamplePoint { latitude: -33.8688, longitude: 151.2093 },
        ]
    }

    fn config(types: &[SentenceType]) -> EncoderConfig {
        let mut config = EncoderConfig::default();
        config.update_sentence_types(types);
        config.seed = Some(42);
        config
    }

    fn memory_transport() -> SentenceTransport<Vec<u8>> {
        SentenceTransport::from_writer("memory", Vec::new(), TimeoutPolicy::default())
    }

    /// Run the demo into memory and return the wire bytes
    async fn run_to_memory(config: &EncoderConfig, points: &[SamplePoint]) -> (DemoSummary, String) {
        let mut demo = Demo::new(config, rng_from(config.seed), SentenceEcho::new(false)).unwrap();
        let mut transport = memory_transport();
        let mut out = Vec::new();

        let send = demo.send_points(points, &mut transport, &mut out).await.unwrap();
        let wire = String::from_utf8(transport.get_ref().unwrap().clone()).unwrap();
        (send, wire)
    }

    #[tokio::test]
    async fn test_every_configured_type_is_sent() {
        let config = config(&[SentenceType::PositionFix, SentenceType::GroundTrack]);
        let (summary, wire) = run_to_memory(&config, &points()).await;

        assert_eq!(summary, DemoSummary { points: 2, sentences_sent: 4, rejected_fields: 0 });

        let lines: Vec<&str> = wire.split_terminator("\r\n").collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("$GPGGA,000000.00,4807.0200,N,01130.9600,E,1,08,0.0,M,"));
        assert!(lines[1].starts_with("$GPVTG,"));
        assert!(lines[2].starts_with("$GPGGA,000000.00,3352.1280,S,15112.5580,E,"));

        for line in lines {
            let (body, cs) = line.rsplit_once('*').unwrap();
            assert_eq!(cs, format!("{:X}", checksum(&body[1..])));
        }
    }

    #[tokio::test]
    async fn test_seeded_runs_are_repeatable() {
        let config = config(&[SentenceType::MinimumNavData]);
        let (_, first) = run_to_memory(&config, &points()).await;
        let (_, second) = run_to_memory(&config, &points()).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_rejected_point_is_still_sent() {
        let config = config(&[SentenceType::PositionFix]);
        let bad = vec![
            SamplePoint { latitude: 48.117, longitude: 11.516 },
            SamplePoint { latitude: 95.0, longitude: 11.516 },
        ];
        let (summary, wire) = run_to_memory(&config, &bad).await;

        assert_eq!(summary.rejected_fields, 1);
        assert_eq!(summary.sentences_sent, 2);
        // The bad latitude leaves the previous one in place
        let lines: Vec<&str> = wire.split_terminator("\r\n").collect();
        assert!(lines[1].contains(",4807.0200,N,"));
    }

    #[test]
    fn test_synthetic_motion_in_range() {
        let config = config(&[SentenceType::GroundTrack]);
        let mut demo = Demo::new(&config, rng_from(Some(9)), SentenceEcho::new(false)).unwrap();

        for point in points() {
            demo.encode_point(&point);
            let fix = demo.encoder().snapshot();
            assert!((0.0..100.0).contains(&fix.speed_knots()));
            assert!((0.0..100.0).contains(&fix.track_angle()));
            assert_eq!(fix.speed_knots().fract(), 0.0);
            assert!((fix.speed_over_ground_kph() - fix.speed_knots() * KNOTS_TO_KPH).abs() < 1e-9);
        }
    }

    #[tokio::test]
    async fn test_transport_failure_stops_and_closes() {
        let config = config(&[SentenceType::PositionFix]);
        let mut demo = Demo::new(&config, rng_from(config.seed), SentenceEcho::new(false)).unwrap();
        let mut transport = SentenceTransport::from_writer("broken", BrokenWriter, TimeoutPolicy::default());
        let mut out = Vec::new();

        let err = demo.run(&points(), &mut transport, &mut out).await.unwrap_err();
        assert!(err.is_transport());
        assert!(!transport.is_open());
    }

    #[tokio::test]
    async fn test_run_closes_on_success() {
        let config = config(&[SentenceType::PositionFix]);
        let mut demo = Demo::new(&config, rng_from(config.seed), SentenceEcho::new(false)).unwrap();
        let mut transport = memory_transport();
        let mut out = Vec::new();

        let summary = demo.run(&points(), &mut transport, &mut out).await.unwrap();
        assert_eq!(summary.sentences_sent, 2);
        assert!(!transport.is_open());
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 2);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = EncoderConfig::default();
        config.satellite_count = -2;
        let err = Demo::new(&config, rng_from(Some(1)), SentenceEcho::new(false)).err().unwrap();
        assert_eq!(err.code(), -1);
    }

    #[test]
    fn test_system_time_is_applied() {
        let mut config = config(&[SentenceType::MinimumNavData]);
        config.use_system_time = true;
        let mut demo = Demo::new(&config, rng_from(Some(3)), SentenceEcho::new(false)).unwrap();

        demo.encode_point(&points()[0]);
        assert!(demo.encoder().snapshot().fix_date() > 0);
    }
}
