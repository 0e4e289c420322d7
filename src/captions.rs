use std::fmt;
use std::fmt::Write as _;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::app_config::TimingConfig;

// @module: Caption cue timing and SRT serialization

// Shortest display time for any cue, so one-word lines stay legible.
const MIN_CUE_SECS: f64 = 1.2;

// Lower clamp on the narration rate divisor, so a near-zero configured
// rate cannot stretch cues without bound.
const MIN_RATE_WPS: f64 = 0.8;

// @const: Word token regex (alphanumeric-plus-underscore runs)
static WORD_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").unwrap());

// @struct: Single timed caption cue
#[derive(Debug, Clone, PartialEq)]
pub struct Cue {
    // @field: Sequence number, 1-based and contiguous
    pub seq_num: usize,

    // @field: Start time in seconds
    pub start_secs: f64,

    // @field: End time in seconds
    pub end_secs: f64,

    // @field: Display text, already wrapped into rows
    pub text: String,
}

impl Cue {
    pub fn new(seq_num: usize, start_secs: f64, end_secs: f64, text: String) -> Self {
        Cue {
            seq_num,
            start_secs,
            end_secs,
            text,
        }
    }

    /// Convert start time to a formatted SRT timestamp
    pub fn format_start_time(&self) -> String {
        format_timestamp(self.start_secs)
    }

    /// Convert end time to a formatted SRT timestamp
    pub fn format_end_time(&self) -> String {
        format_timestamp(self.end_secs)
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.seq_num)?;
        writeln!(f, "{} --> {}", self.format_start_time(), self.format_end_time())?;
        writeln!(f, "{}", self.text)?;
        writeln!(f)
    }
}

/// Format a timestamp in seconds to SRT format (HH:MM:SS,mmm).
///
/// Total milliseconds are rounded, not truncated, so the millisecond field
/// can never overflow to 1000. Ties round to even, matching banker's
/// rounding on the half-millisecond boundary. Hours are not taken modulo.
pub fn format_timestamp(secs: f64) -> String {
    let total_ms = (secs * 1000.0).round_ties_even() as u64;
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms % 3_600_000) / 60_000;
    let seconds = (total_ms % 60_000) / 1_000;
    let millis = total_ms % 1_000;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
}

/// Count words in a line as maximal `\w+` runs.
///
/// Punctuation-only tokens do not count, unlike naive whitespace splitting.
pub fn word_count(line: &str) -> usize {
    WORD_REGEX.find_iter(line).count()
}

/// Display duration for a line with the given word count and narration rate
pub fn cue_duration_secs(words: usize, words_per_second: f64) -> f64 {
    (words as f64 / words_per_second.max(MIN_RATE_WPS)).max(MIN_CUE_SECS)
}

/// Greedy word-wrap bounded by `max_chars` characters per row.
///
/// Words are joined with single spaces; a row is closed when appending the
/// next word would push it past the limit and the row is non-empty. A single
/// word longer than `max_chars` is never split and becomes its own oversized
/// row. Rows are joined with `\n`.
pub fn wrap_text(text: &str, max_chars: usize) -> String {
    let mut rows: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !current.is_empty()
            && current.chars().count() + 1 + word.chars().count() > max_chars
        {
            rows.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        rows.push(current);
    }

    rows.join("\n")
}

/// Compute timed cues for an ordered line sequence.
///
/// A stateless fold over the lines: the accumulator is the running clock,
/// starting at the lead-in and advancing by each cue's duration plus the
/// inter-cue gap. Produces exactly one cue per input line, in input order.
pub fn time_lines(lines: &[String], timing: &TimingConfig) -> Vec<Cue> {
    lines
        .iter()
        .enumerate()
        .scan(timing.lead_in_secs, |clock, (i, line)| {
            let duration = cue_duration_secs(word_count(line), timing.words_per_second);
            let start = *clock;
            *clock = start + duration + timing.cue_gap_secs;

            Some(Cue::new(
                i + 1,
                start,
                start + duration,
                wrap_text(line, timing.max_line_chars),
            ))
        })
        .collect()
}

/// Collection of caption cues bound for one SRT file
#[derive(Debug)]
pub struct CaptionTrack {
    /// List of timed cues
    pub cues: Vec<Cue>,
}

impl CaptionTrack {
    /// Build a track from an ordered line sequence and timing parameters
    pub fn from_lines(lines: &[String], timing: &TimingConfig) -> Self {
        let cues = time_lines(lines, timing);
        debug!("Timed {} cues from {} lines", cues.len(), lines.len());
        CaptionTrack { cues }
    }

    /// Serialize the track as SRT text
    pub fn to_srt_string(&self) -> String {
        let mut out = String::new();
        for cue in &self.cues {
            // Display never fails when writing to a String
            let _ = write!(out, "{}", cue);
        }
        out
    }

    /// Write the track to an SRT file, creating parent directories as needed
    pub fn write_to_srt<P: AsRef<Path>>(&self, path: P) -> Result<PathBuf> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let mut file = File::create(path)
            .with_context(|| format!("Failed to create subtitle file: {}", path.display()))?;

        for cue in &self.cues {
            write!(file, "{}", cue)?;
        }

        Ok(path.to_path_buf())
    }
}
