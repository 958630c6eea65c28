use std::time::Duration;

use crate::caption::{Caption, Track};
use crate::errors::SubtitleError;

// @module: Recursive-descent parser for the SRT line grammar
//
// Grammar:
//
//   File     := { Record }
//   Record   := Number "\n" Timespan "\n" { Line } <blank line or EOF>
//   Timespan := Time "-->" Time /.*$/
//   Time     := Digits ":" Digits ":" Digits ("," | ".") Digits
//   Line     := any non-empty line, trimmed
//   Number   := /[1-9][0-9]*/
//
// Anything after the second timestamp on the timing line is ignored up to
// end of line, which tolerates WebVTT-style cue settings
// (`position:50.00% align:middle` and friends). The millisecond separator
// accepts both the SRT comma and the WebVTT dot. Parsing is total over this
// grammar: input that does not match at the cursor is a hard error carrying
// the byte offset and an expectation string, with no skip or recovery.

/// Parse the full text of an SRT file into a track.
///
/// Whitespace (including blank records) between records is skipped. Input
/// remaining after the last well-formed record that does not itself start a
/// record is reported as trailing data.
pub fn parse_srt(content: &str) -> Result<Track, SubtitleError> {
    // Byte-order mark shows up in the wild; it is not whitespace, so strip
    // it before the cursor scan.
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    SrtParser::new(content).parse_track()
}

/// Cursor-based parser over the raw file text.
///
/// `pos` is always a byte offset at a character boundary of `input`.
struct SrtParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> SrtParser<'a> {
    fn new(input: &'a str) -> Self {
        SrtParser { input, pos: 0 }
    }

    fn parse_track(&mut self) -> Result<Track, SubtitleError> {
        let mut captions = Vec::new();
        loop {
            self.skip_space();
            if self.at_end() {
                break;
            }
            let record_start = self.pos;
            match self.parse_record() {
                Ok(caption) => captions.push(caption),
                // A failure on the very first token after at least one good
                // record means the leftover input is not another record.
                Err(SubtitleError::Parse { offset, .. })
                    if offset == record_start && !captions.is_empty() =>
                {
                    return Err(SubtitleError::parse(offset, "trailing data"));
                }
                Err(e) => return Err(e),
            }
        }
        Ok(Track::from_captions(captions))
    }

    fn parse_record(&mut self) -> Result<Caption, SubtitleError> {
        let index = self.parse_number()? as usize;
        self.skip_space();
        let (start, end) = self.parse_timespan()?;
        let lines = self.parse_lines();
        Ok(Caption::new(index, start, end, lines))
    }

    fn parse_timespan(&mut self) -> Result<(Duration, Duration), SubtitleError> {
        let start = self.parse_time()?;
        self.skip_space();
        self.expect_literal("-->")?;
        self.skip_space();
        let end = self.parse_time()?;
        // Cue settings and other trailing content on the timing line are
        // ignored verbatim up to and including the newline.
        while self.pos < self.input.len() && self.input.as_bytes()[self.pos - 1] != b'\n' {
            self.pos += 1;
        }
        Ok((start, end))
    }

    fn parse_time(&mut self) -> Result<Duration, SubtitleError> {
        let time_start = self.pos;
        let hours = self.parse_number()?;
        self.expect_literal(":")?;
        let minutes = self.parse_number()?;
        self.expect_literal(":")?;
        let seconds = self.parse_number()?;
        self.expect_one_of(&[",", "."])?;
        let millis = self.parse_number()?;
        // Digit groups are unbounded in the grammar, so the seconds sum can
        // overflow u64 on absurd-but-wellformed input.
        let total_seconds = hours
            .checked_mul(3600)
            .and_then(|h| minutes.checked_mul(60).and_then(|m| h.checked_add(m)))
            .and_then(|s| s.checked_add(seconds))
            .ok_or_else(|| SubtitleError::parse(time_start, "number out of range"))?;
        Duration::from_secs(total_seconds)
            .checked_add(Duration::from_millis(millis))
            .ok_or_else(|| SubtitleError::parse(time_start, "number out of range"))
    }

    fn parse_number(&mut self) -> Result<u64, SubtitleError> {
        let start = self.pos;
        let bytes = self.input.as_bytes();
        while self.pos < bytes.len() && bytes[self.pos].is_ascii_digit() {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(SubtitleError::parse(start, "expected a digit"));
        }
        self.input[start..self.pos]
            .parse::<u64>()
            .map_err(|_| SubtitleError::parse(start, "number out of range"))
    }

    /// Collect trimmed non-empty lines until a blank line or end of input.
    /// The terminating blank line, when present, is consumed.
    fn parse_lines(&mut self) -> Vec<String> {
        let mut lines = Vec::new();
        loop {
            let bytes = self.input.as_bytes();
            let mut j = self.pos;
            while j < bytes.len() && bytes[j] != b'\n' {
                j += 1;
            }
            if j < bytes.len() {
                j += 1;
            }
            let line = self.input[self.pos..j].trim();
            if line.is_empty() {
                self.pos = j;
                return lines;
            }
            lines.push(line.to_string());
            self.pos = j;
        }
    }

    fn skip_space(&mut self) {
        let rest = &self.input[self.pos..];
        match rest.char_indices().find(|(_, c)| !c.is_whitespace()) {
            Some((i, _)) => self.pos += i,
            None => self.pos = self.input.len(),
        }
    }

    fn expect_literal(&mut self, literal: &str) -> Result<(), SubtitleError> {
        if self.input[self.pos..].starts_with(literal) {
            self.pos += literal.len();
            Ok(())
        } else {
            Err(SubtitleError::parse(
                self.pos,
                format!("expected '{}'", literal),
            ))
        }
    }

    fn expect_one_of(&mut self, literals: &[&str]) -> Result<(), SubtitleError> {
        for literal in literals {
            if self.input[self.pos..].starts_with(literal) {
                self.pos += literal.len();
                return Ok(());
            }
        }
        let expectations: Vec<String> = literals.iter().map(|l| format!("'{}'", l)).collect();
        Err(SubtitleError::parse(
            self.pos,
            format!("expected one of {}", expectations.join(", ")),
        ))
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }
}
