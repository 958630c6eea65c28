use std::fmt;
use std::time::Duration;

// @module: Caption data model shared by both parsers

/// A single timed text unit from a subtitle track
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caption {
    /// Original 1-based position in the source track (informational only;
    /// never used for ordering or matching)
    pub index: usize,

    /// Offset of the caption's first frame from the start of the media
    pub start: Duration,

    /// Offset of the caption's last frame from the start of the media
    pub end: Duration,

    /// Text lines as authored, before any merging or normalization
    pub lines: Vec<String>,
}

impl Caption {
    /// Creates a new caption
    pub fn new(index: usize, start: Duration, end: Duration, lines: Vec<String>) -> Self {
        Caption {
            index,
            start,
            end,
            lines,
        }
    }

    /// Midpoint of the caption's interval, used for still-image extraction
    pub fn midpoint(&self) -> Duration {
        (self.start + self.end) / 2
    }

    /// Format a duration as an SRT timestamp (HH:MM:SS,mmm)
    pub fn format_timestamp(d: Duration) -> String {
        let ms = d.as_millis();
        let hours = ms / 3_600_000;
        let minutes = (ms % 3_600_000) / 60_000;
        let seconds = (ms % 60_000) / 1_000;
        let millis = ms % 1_000;

        format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
    }
}

impl fmt::Display for Caption {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.index)?;
        writeln!(
            f,
            "{} --> {}",
            Self::format_timestamp(self.start),
            Self::format_timestamp(self.end)
        )?;
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        writeln!(f)
    }
}

/// An ordered subtitle track.
///
/// Captions are ordered by non-decreasing start time and assumed
/// non-overlapping within the track — an authoring invariant of subtitle
/// files that is not verified here. A track is immutable once parsed; the
/// sentence merger builds a new track rather than mutating in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Track {
    /// Captions in source order
    pub captions: Vec<Caption>,
}

impl Track {
    /// Creates an empty track
    pub fn new() -> Self {
        Track {
            captions: Vec::new(),
        }
    }

    /// Creates a track from already-ordered captions
    pub fn from_captions(captions: Vec<Caption>) -> Self {
        Track { captions }
    }

    /// Number of captions in the track
    pub fn len(&self) -> usize {
        self.captions.len()
    }

    /// Whether the track has no captions
    pub fn is_empty(&self) -> bool {
        self.captions.is_empty()
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for caption in &self.captions {
            write!(f, "{}", caption)?;
        }
        Ok(())
    }
}
