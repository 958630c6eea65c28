use std::time::Duration;

use crate::caption::{Caption, Track};
use crate::errors::SubtitleError;

// @module: Streaming parser for timed-text markup subtitles
//
// Netflix-style timed-text documents carry one caption per `p` element:
//
//   <p id="subtitle1" begin="107607500t" end="137907500t">Hello</p>
//
// The element name is matched by local name, case-insensitively, ignoring
// any namespace prefix. `begin`/`end` are tick values: a decimal integer
// with a trailing 't' at 10,000,000 ticks per second (the document's
// `ttp:tickRate` header). All other elements are skipped; character data is
// only collected while inside a `p`. Like the SRT parser, any input that
// does not scan is a hard error with a byte offset, not a recovery point.

const TICKS_PER_SECOND: u64 = 10_000_000;

/// Parse a timed-text markup document into a track.
///
/// Caption indices are assigned as the 0-based emission order of the `p`
/// elements; the `id` attribute is only checked for presence.
pub fn parse_timedtext(content: &str) -> Result<Track, SubtitleError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    TimedTextParser::new(content).parse_track()
}

/// Open caption state while scanning between `<p>` and `</p>`
struct OpenCaption {
    start: Duration,
    end: Duration,
    lines: Vec<String>,
}

struct TimedTextParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> TimedTextParser<'a> {
    fn new(input: &'a str) -> Self {
        TimedTextParser { input, pos: 0 }
    }

    fn parse_track(&mut self) -> Result<Track, SubtitleError> {
        let mut captions: Vec<Caption> = Vec::new();
        let mut current: Option<OpenCaption> = None;

        while self.pos < self.input.len() {
            if self.rest().starts_with("<!--") {
                self.skip_past("-->")?;
            } else if self.rest().starts_with("<?") {
                self.skip_past("?>")?;
            } else if self.rest().starts_with("<!") {
                self.skip_past(">")?;
            } else if self.rest().starts_with("</") {
                let tag_offset = self.pos;
                let name = self.parse_close_tag()?;
                if is_p_element(&name) {
                    match current.take() {
                        Some(open) => captions.push(Caption::new(
                            captions.len(),
                            open.start,
                            open.end,
                            open.lines,
                        )),
                        None => {
                            return Err(SubtitleError::parse(
                                tag_offset,
                                "'</p>' without matching '<p>'",
                            ));
                        }
                    }
                }
            } else if self.rest().starts_with('<') {
                let tag_offset = self.pos;
                let (name, attrs, self_closing) = self.parse_open_tag()?;
                if is_p_element(&name) {
                    if current.is_some() {
                        return Err(SubtitleError::parse(
                            tag_offset,
                            "did not expect '<p>' inside '<p>'",
                        ));
                    }
                    let open = Self::caption_from_attrs(&attrs, tag_offset)?;
                    if self_closing {
                        captions.push(Caption::new(
                            captions.len(),
                            open.start,
                            open.end,
                            open.lines,
                        ));
                    } else {
                        current = Some(open);
                    }
                }
            } else {
                let text = self.parse_char_data();
                if let Some(open) = current.as_mut() {
                    // Appended unconditionally, even when empty after
                    // trimming; display formatting collapses blanks later.
                    open.lines.push(text.trim().to_string());
                }
            }
        }

        if current.is_some() {
            return Err(SubtitleError::parse(
                self.input.len(),
                "unexpected end of input inside '<p>'",
            ));
        }
        Ok(Track::from_captions(captions))
    }

    /// Build the open caption from a `p` element's attributes, enforcing
    /// the required `id`/`begin`/`end` set.
    fn caption_from_attrs(
        attrs: &[(String, String)],
        tag_offset: usize,
    ) -> Result<OpenCaption, SubtitleError> {
        let mut id: Option<&str> = None;
        let mut begin: Option<Duration> = None;
        let mut end: Option<Duration> = None;
        for (name, value) in attrs {
            match local_name(name) {
                n if n.eq_ignore_ascii_case("id") => id = Some(value),
                n if n.eq_ignore_ascii_case("begin") => {
                    begin = Some(parse_ticks(value, tag_offset)?)
                }
                n if n.eq_ignore_ascii_case("end") => end = Some(parse_ticks(value, tag_offset)?),
                _ => {}
            }
        }
        match (id, begin, end) {
            (Some(id), Some(start), Some(end)) if !id.is_empty() => Ok(OpenCaption {
                start,
                end,
                lines: Vec::new(),
            }),
            _ => Err(SubtitleError::parse(
                tag_offset,
                "'<p>' missing expected attribute",
            )),
        }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn skip_past(&mut self, terminator: &str) -> Result<(), SubtitleError> {
        match self.rest().find(terminator) {
            Some(i) => {
                self.pos += i + terminator.len();
                Ok(())
            }
            None => Err(SubtitleError::parse(
                self.pos,
                format!("expected '{}'", terminator),
            )),
        }
    }

    /// Consume `</name ... >` and return the name
    fn parse_close_tag(&mut self) -> Result<String, SubtitleError> {
        self.pos += 2; // past "</"
        let name = self.parse_name();
        self.skip_space();
        if !self.rest().starts_with('>') {
            return Err(SubtitleError::parse(self.pos, "expected '>'"));
        }
        self.pos += 1;
        Ok(name)
    }

    /// Consume `<name attr="v" ...>` or `<name ... />`; returns the name,
    /// the attribute list in document order, and whether it self-closed.
    fn parse_open_tag(&mut self) -> Result<(String, Vec<(String, String)>, bool), SubtitleError> {
        self.pos += 1; // past "<"
        let name = self.parse_name();
        if name.is_empty() {
            return Err(SubtitleError::parse(self.pos, "expected an element name"));
        }
        let mut attrs = Vec::new();
        loop {
            self.skip_space();
            if self.rest().starts_with("/>") {
                self.pos += 2;
                return Ok((name, attrs, true));
            }
            if self.rest().starts_with('>') {
                self.pos += 1;
                return Ok((name, attrs, false));
            }
            if self.pos >= self.input.len() {
                return Err(SubtitleError::parse(self.pos, "expected '>'"));
            }
            attrs.push(self.parse_attribute()?);
        }
    }

    fn parse_attribute(&mut self) -> Result<(String, String), SubtitleError> {
        let name = self.parse_name();
        if name.is_empty() {
            return Err(SubtitleError::parse(self.pos, "expected an attribute name"));
        }
        self.skip_space();
        if !self.rest().starts_with('=') {
            return Err(SubtitleError::parse(self.pos, "expected '='"));
        }
        self.pos += 1;
        self.skip_space();
        let quote = match self.rest().chars().next() {
            Some(c @ ('"' | '\'')) => c,
            _ => return Err(SubtitleError::parse(self.pos, "expected a quoted value")),
        };
        self.pos += 1;
        let value_start = self.pos;
        match self.rest().find(quote) {
            Some(i) => {
                let raw = &self.input[value_start..value_start + i];
                self.pos = value_start + i + 1;
                Ok((name, decode_entities(raw)))
            }
            None => Err(SubtitleError::parse(
                value_start,
                format!("expected closing {}", quote),
            )),
        }
    }

    /// Element or attribute name: everything up to whitespace, '=', '>',
    /// '/', or end of input
    fn parse_name(&mut self) -> String {
        let start = self.pos;
        for (i, c) in self.rest().char_indices() {
            if c.is_whitespace() || c == '=' || c == '>' || c == '/' {
                self.pos = start + i;
                return self.input[start..self.pos].to_string();
            }
        }
        self.pos = self.input.len();
        self.input[start..].to_string()
    }

    /// Text up to the next tag opener (or end of input), entity-decoded
    fn parse_char_data(&mut self) -> String {
        let start = self.pos;
        match self.rest().find('<') {
            Some(i) => self.pos = start + i,
            None => self.pos = self.input.len(),
        }
        decode_entities(&self.input[start..self.pos])
    }

    fn skip_space(&mut self) {
        let rest = self.rest();
        match rest.char_indices().find(|(_, c)| !c.is_whitespace()) {
            Some((i, _)) => self.pos += i,
            None => self.pos = self.input.len(),
        }
    }
}

/// Whether an element name is a `p`, matching the local name
/// case-insensitively and ignoring any namespace prefix
fn is_p_element(name: &str) -> bool {
    local_name(name).eq_ignore_ascii_case("p")
}

fn local_name(name: &str) -> &str {
    match name.rfind(':') {
        Some(i) => &name[i + 1..],
        None => name,
    }
}

/// Parse a tick timestamp: a decimal integer with a trailing 't' at
/// 10,000,000 ticks per second
fn parse_ticks(value: &str, offset: usize) -> Result<Duration, SubtitleError> {
    let digits = value.strip_suffix('t').ok_or_else(|| {
        SubtitleError::parse(offset, format!("expected tick value ending in 't': {value}"))
    })?;
    let ticks: u64 = digits.parse().map_err(|_| {
        SubtitleError::parse(offset, format!("malformed tick value: {value}"))
    })?;
    Ok(Duration::from_secs(ticks / TICKS_PER_SECOND)
        + Duration::from_nanos((ticks % TICKS_PER_SECOND) * 100))
}

/// Decode the five predefined character entities
fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
