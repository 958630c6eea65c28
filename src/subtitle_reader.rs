use std::path::Path;

use anyhow::{Context, Result};

use crate::caption::Track;
use crate::errors::SubtitleError;
use crate::file_utils::FileManager;
use crate::srt_parser;
use crate::timedtext_parser;

// @module: Subtitle file reading and per-format dispatch

/// Parse subtitle text, choosing the grammar by the file's extension:
/// `.srt` is the line grammar, `.xml` the timed-text markup grammar.
/// Any other extension is an error naming it.
pub fn parse_subtitle<P: AsRef<Path>>(path: P, content: &str) -> Result<Track, SubtitleError> {
    let extension = path
        .as_ref()
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "srt" => srt_parser::parse_srt(content),
        "xml" => timedtext_parser::parse_timedtext(content),
        other => Err(SubtitleError::UnsupportedExtension(other.to_string())),
    }
}

/// Read a subtitle file fully into memory and parse it.
/// A parse failure aborts the read; no partial track is returned.
pub fn read_subtitle_file<P: AsRef<Path>>(path: P) -> Result<Track> {
    let path = path.as_ref();
    let content = FileManager::read_to_string(path)?;
    parse_subtitle(path, &content)
        .with_context(|| format!("failed to parse subtitle file: {}", path.display()))
}
