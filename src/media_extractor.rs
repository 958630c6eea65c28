use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error};
use tokio::process::Command;
use tokio::sync::Semaphore;

use crate::app_config::Config;
use crate::caption::{Caption, Track};
use crate::file_utils::{FileManager, MediaLayout};

// @module: ffmpeg clip and still-image extraction
//
// Each reference caption gets an mp3 clip of its spoken audio (padded by a
// configured lead and tail) and a jpg frame from the middle of its
// interval. ffmpeg is invoked as an opaque subprocess; an artifact that
// already exists non-empty is skipped, so re-runs only fill in what is
// missing. Any extraction failure aborts the run.

const FFMPEG_TIMEOUT: Duration = Duration::from_secs(120);

/// Extracts per-caption media artifacts with bounded concurrency
pub struct MediaExtractor {
    movie_path: PathBuf,
    layout: MediaLayout,
    clip_lead: Duration,
    clip_tail: Duration,
    image_width: u32,
    concurrency: usize,
}

impl MediaExtractor {
    /// Creates an extractor for one movie
    pub fn new<P: AsRef<Path>>(movie_path: P, layout: MediaLayout, config: &Config) -> Self {
        MediaExtractor {
            movie_path: movie_path.as_ref().to_path_buf(),
            layout,
            clip_lead: config.clip_lead(),
            clip_tail: config.clip_tail(),
            image_width: config.image_width,
            concurrency: config.concurrent_extractions,
        }
    }

    /// Extract a clip and a still for every caption in the reference
    /// track. Extraction failures are fatal: the first error aborts the
    /// whole run.
    pub async fn extract_all(&self, reference: &Track) -> Result<()> {
        FileManager::ensure_dir(&self.layout.media_dir)?;

        let progress = ProgressBar::new(reference.len() as u64);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} clips {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let results = join_all(reference.captions.iter().enumerate().map(|(position, caption)| {
            let semaphore = semaphore.clone();
            let progress = progress.clone();
            async move {
                let _permit = semaphore
                    .acquire()
                    .await
                    .expect("Semaphore should not be closed");
                let result = self.extract_caption(position, caption).await;
                progress.inc(1);
                result
            }
        }))
        .await;
        progress.finish_and_clear();

        for result in results {
            result?;
        }
        Ok(())
    }

    async fn extract_caption(&self, position: usize, caption: &Caption) -> Result<()> {
        self.extract_clip(position, caption).await?;
        self.extract_image(position, caption).await
    }

    /// Extract the audio clip for one caption, padded by the configured
    /// lead and tail
    async fn extract_clip(&self, position: usize, caption: &Caption) -> Result<()> {
        let target = self.layout.artifact_path(&self.layout.clip_name(position));
        if FileManager::is_non_empty_file(&target) {
            debug!("Clip already exists, skipping: {:?}", target);
            return Ok(());
        }

        let start = caption.start.saturating_sub(self.clip_lead);
        let length = (caption.end + self.clip_tail).saturating_sub(start);
        self.run_ffmpeg(&[
            "-y",
            "-i",
            &self.movie_path.to_string_lossy(),
            "-ss",
            &format_seconds(start),
            "-t",
            &format_seconds(length),
            &target.to_string_lossy(),
        ])
        .await
    }

    /// Extract one frame from the caption's temporal midpoint
    async fn extract_image(&self, position: usize, caption: &Caption) -> Result<()> {
        let target = self.layout.artifact_path(&self.layout.image_name(position));
        if FileManager::is_non_empty_file(&target) {
            debug!("Image already exists, skipping: {:?}", target);
            return Ok(());
        }

        let scale = format!("scale={}:-1", self.image_width);
        self.run_ffmpeg(&[
            "-ss",
            &format_seconds(caption.midpoint()),
            "-y",
            "-i",
            &self.movie_path.to_string_lossy(),
            "-vframes",
            "1",
            "-q:v",
            "2",
            "-vf",
            &scale,
            &target.to_string_lossy(),
        ])
        .await
    }

    async fn run_ffmpeg(&self, args: &[&str]) -> Result<()> {
        debug!("> ffmpeg {}", args.join(" "));

        let ffmpeg_future = Command::new("ffmpeg").args(args).output();
        let output = tokio::select! {
            result = ffmpeg_future => {
                result.map_err(|e| anyhow!("Failed to execute ffmpeg: {}", e))?
            },
            _ = tokio::time::sleep(FFMPEG_TIMEOUT) => {
                return Err(anyhow!("ffmpeg timed out after {} seconds", FFMPEG_TIMEOUT.as_secs()));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let filtered = filter_ffmpeg_stderr(&stderr);
            error!("ffmpeg failed: {}", filtered);
            return Err(anyhow!("ffmpeg failed: {}", filtered));
        }
        Ok(())
    }
}

/// Seconds with millisecond precision, the form ffmpeg's `-ss`/`-t` take
fn format_seconds(d: Duration) -> String {
    format!("{:.3}", d.as_secs_f64())
}

/// Filter ffmpeg stderr to only show meaningful error lines, stripping the
/// version banner, build configuration, and stream metadata noise.
fn filter_ffmpeg_stderr(stderr: &str) -> String {
    let dominated_prefixes = [
        "ffmpeg version",
        "  built with",
        "  configuration:",
        "  lib",
        "Input #",
        "  Metadata:",
        "  Duration:",
        "  Stream #",
        "Output #",
        "Stream mapping:",
        "Press [q]",
        "size=",
    ];

    let meaningful: Vec<&str> = stderr
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                return false;
            }
            !dominated_prefixes.iter().any(|p| line.starts_with(p) || trimmed.starts_with(p))
        })
        .collect();

    if meaningful.is_empty() {
        "unknown ffmpeg error (stderr was empty after filtering)".to_string()
    } else {
        meaningful.join("\n")
    }
}
