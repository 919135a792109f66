// src/display/terminal.rs
//! Terminal echo of sentences as they are sent

use crate::{
    driver::DemoSummary,
    error::{NmeaError, Result},
    nmea::SentenceType,
};
use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use std::io::Write;

pub struct SentenceEcho {
    color: bool,
}

impl SentenceEcho {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn color_for(sentence_type: SentenceType) -> Color {
        match sentence_type {
            SentenceType::PositionFix => Color::Yellow,
            SentenceType::MinimumNavData => Color::Cyan,
            SentenceType::GroundTrack => Color::Magenta,
        }
    }

    /// Print one sentence, tagged with its point index
    pub fn print_sentence(
        &self,
        out: &mut impl Write,
        index: usize,
        sentence_type: SentenceType,
        sentence: &str,
    ) -> Result<()> {
        if self.color {
            queue!(
                out,
                SetForegroundColor(Color::Green),
                Print(format!("[{:>4}] ", index)),
                SetForegroundColor(Self::color_for(sentence_type)),
                Print(sentence),
                ResetColor,
                Print("\n")
            )
            .map_err(NmeaError::Io)?;
        } else {
            writeln!(out, "[{:>4}] {}", index, sentence)?;
        }
        out.flush()?;
        Ok(())
    }

    pub fn print_summary(&self, out: &mut impl Write, summary: &DemoSummary) -> Result<()> {
        let line = format!(
            "{} points, {} sentences sent, {} fields rejected",
            summary.points, summary.sentences_sent, summary.rejected_fields
        );

        if self.color {
            queue!(
                out,
                SetForegroundColor(Color::Green),
                Print("=".repeat(60)),
                Print("\n"),
                ResetColor,
                Print(line),
                Print("\n")
            )
            .map_err(NmeaError::Io)?;
        } else {
            writeln!(out, "{}", "=".repeat(60))?;
            writeln!(out, "{}", line)?;
        }
        out.flush()?;
        Ok(())
    }
}

impl Default for SentenceEcho {
    fn default() -> Self {
        Self::new(super::should_use_color())
    }
}
