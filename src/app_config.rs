use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Caption timing defaults
    #[serde(default)]
    pub timing: TimingConfig,

    /// Audio joining defaults
    #[serde(default)]
    pub audio: AudioConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Caption timing parameters
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TimingConfig {
    // @field: Narration rate in words per second
    #[serde(default = "default_words_per_second")]
    pub words_per_second: f64,

    // @field: Gap between consecutive cues, seconds
    #[serde(default = "default_cue_gap_secs")]
    pub cue_gap_secs: f64,

    // @field: Delay before the first cue, seconds
    #[serde(default = "default_lead_in_secs")]
    pub lead_in_secs: f64,

    // @field: Max characters per displayed row
    #[serde(default = "default_max_line_chars")]
    pub max_line_chars: usize,
}

/// Audio joining parameters
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AudioConfig {
    // @field: Silence inserted after each clip, milliseconds
    #[serde(default = "default_silence_gap_ms")]
    pub silence_gap_ms: u64,
}

/// Log level for the application
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_words_per_second() -> f64 {
    3.0
}

fn default_cue_gap_secs() -> f64 {
    0.15
}

fn default_lead_in_secs() -> f64 {
    0.3
}

fn default_max_line_chars() -> usize {
    80
}

fn default_silence_gap_ms() -> u64 {
    150
}

impl Default for TimingConfig {
    fn default() -> Self {
        TimingConfig {
            words_per_second: default_words_per_second(),
            cue_gap_secs: default_cue_gap_secs(),
            lead_in_secs: default_lead_in_secs(),
            max_line_chars: default_max_line_chars(),
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        AudioConfig {
            silence_gap_ms: default_silence_gap_ms(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            timing: TimingConfig::default(),
            audio: AudioConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Validate parameter ranges after loading and CLI overrides
    pub fn validate(&self) -> Result<()> {
        if !self.timing.words_per_second.is_finite() || self.timing.words_per_second <= 0.0 {
            return Err(anyhow!(
                "words_per_second must be positive, got {}",
                self.timing.words_per_second
            ));
        }

        if !self.timing.cue_gap_secs.is_finite() || self.timing.cue_gap_secs < 0.0 {
            return Err(anyhow!(
                "cue_gap_secs must be non-negative, got {}",
                self.timing.cue_gap_secs
            ));
        }

        if !self.timing.lead_in_secs.is_finite() || self.timing.lead_in_secs < 0.0 {
            return Err(anyhow!(
                "lead_in_secs must be non-negative, got {}",
                self.timing.lead_in_secs
            ));
        }

        if self.timing.max_line_chars == 0 {
            return Err(anyhow!("max_line_chars must be positive"));
        }

        Ok(())
    }
}
