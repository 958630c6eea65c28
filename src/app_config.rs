use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::time::Duration;

use crate::transforms::CommandTransform;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Whether adjacent caption fragments are merged into sentences
    #[serde(default = "default_merge_sentences")]
    pub merge_sentences: bool,

    /// Largest silence between captions, in milliseconds, that can still
    /// be mid-sentence
    #[serde(default = "default_max_merge_gap_ms")]
    pub max_merge_gap_ms: u64,

    /// Time included before each audio clip, in milliseconds
    #[serde(default = "default_clip_lead_ms")]
    pub clip_lead_ms: u64,

    /// Time included after each audio clip, in milliseconds
    #[serde(default = "default_clip_tail_ms")]
    pub clip_tail_ms: u64,

    /// Width still images are scaled to, in pixels
    #[serde(default = "default_image_width")]
    pub image_width: u32,

    /// Max concurrent ffmpeg invocations
    #[serde(default = "default_concurrent_extractions")]
    pub concurrent_extractions: usize,

    /// Optional text-transform collaborators
    #[serde(default)]
    pub transforms: TransformsConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// External commands producing the optional flashcard columns.
/// A column is enabled iff its command is configured.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct TransformsConfig {
    /// Romanization command (reads text on stdin, writes romanization)
    #[serde(default)]
    pub romanization_command: Option<String>,

    /// Ruby-annotation command; receives the markup-preserving text variant
    #[serde(default)]
    pub ruby_command: Option<String>,

    /// Character-colorization command
    #[serde(default)]
    pub colorization_command: Option<String>,
}

/// Log level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Error level
    Error,
    /// Warning level
    Warn,
    /// Info level (default)
    #[default]
    Info,
    /// Debug level
    Debug,
    /// Trace level
    Trace,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            merge_sentences: default_merge_sentences(),
            max_merge_gap_ms: default_max_merge_gap_ms(),
            clip_lead_ms: default_clip_lead_ms(),
            clip_tail_ms: default_clip_tail_ms(),
            image_width: default_image_width(),
            concurrent_extractions: default_concurrent_extractions(),
            transforms: TransformsConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.image_width == 0 {
            return Err(anyhow!("image_width must be greater than zero"));
        }
        if self.concurrent_extractions == 0 {
            return Err(anyhow!("concurrent_extractions must be greater than zero"));
        }
        for (name, command) in [
            ("romanization_command", &self.transforms.romanization_command),
            ("ruby_command", &self.transforms.ruby_command),
            ("colorization_command", &self.transforms.colorization_command),
        ] {
            if let Some(command) = command {
                if command.trim().is_empty() {
                    return Err(anyhow!("{} is configured but empty", name));
                }
            }
        }
        Ok(())
    }

    /// Max merge gap as a duration
    pub fn max_merge_gap(&self) -> Duration {
        Duration::from_millis(self.max_merge_gap_ms)
    }

    /// Clip lead as a duration
    pub fn clip_lead(&self) -> Duration {
        Duration::from_millis(self.clip_lead_ms)
    }

    /// Clip tail as a duration
    pub fn clip_tail(&self) -> Duration {
        Duration::from_millis(self.clip_tail_ms)
    }

    /// Build the enabled transform collaborators, in column order
    pub fn enabled_transforms(&self) -> Vec<CommandTransform> {
        let mut transforms = Vec::new();
        if let Some(command) = &self.transforms.romanization_command {
            transforms.push(CommandTransform::new("romanization", command.clone(), false));
        }
        if let Some(command) = &self.transforms.ruby_command {
            transforms.push(CommandTransform::new("ruby", command.clone(), true));
        }
        if let Some(command) = &self.transforms.colorization_command {
            transforms.push(CommandTransform::new("colorization", command.clone(), false));
        }
        transforms
    }
}

// Default value functions for serde
fn default_merge_sentences() -> bool {
    true
}

fn default_max_merge_gap_ms() -> u64 {
    3000
}

fn default_clip_lead_ms() -> u64 {
    500
}

fn default_clip_tail_ms() -> u64 {
    2000
}

fn default_image_width() -> u32 {
    1400
}

fn default_concurrent_extractions() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get() * 2)
        .unwrap_or(4)
}
