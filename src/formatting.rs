/*!
 * Caption-to-display-text normalization.
 *
 * Turns the raw authored lines of a caption into the flat text that goes
 * into a flashcard column: line breaks become explicit `<br/>` markers,
 * renderer styling is stripped, and whitespace noise is collapsed.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::caption::Caption;

/// Marker standing in for a line break inside a flashcard field
pub const LINE_BREAK: &str = "<br/>";

/// Runs of two or more spaces
static SPACES_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new("  +").unwrap());

/// Style-span openers with arbitrary attributes.
/// The matching closers are intentionally left alone: the reference
/// behavior strips only the opening tag, and output text may therefore
/// still contain a literal `</span>`.
static SPAN_OPEN_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new("<span [^>]*>").unwrap());

/// A line break whose next character is not a hyphen. Only those breaks
/// are rejoined into a space; a break leading into a hyphen (dialogue
/// dashes, continuation lines) is kept.
static REJOIN_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new("\n([^-])").unwrap());

/// Flatten a caption into its display text.
///
/// With `rejoin_breaks` set (merge mode), a renderer's line wrap is undone
/// by turning the break into a single space; breaks leading into a hyphen
/// are kept. Residual breaks become [`LINE_BREAK`] markers either way.
pub fn display_text(caption: &Caption, rejoin_breaks: bool) -> String {
    let mut s = caption.lines.join("\n");
    if rejoin_breaks {
        s = REJOIN_REGEX.replace_all(&s, " $1").into_owned();
    }
    let s = s.replace('\n', LINE_BREAK);
    let s = s.replace('\t', " ");
    let s = s.replace("<i>", "").replace("</i>", "");
    let s = s.replace("{\\an8}", "");
    let s = SPACES_REGEX.replace_all(&s, " ");
    let s = SPAN_OPEN_REGEX.replace_all(&s, "");
    let s = s.replace('"', "&quot;");
    s.trim().to_string()
}

/// Flatten several captions, joined by [`LINE_BREAK`] markers.
/// Used for the translation column, where one reference caption may match
/// multiple translation captions.
pub fn display_text_multi(captions: &[Caption], rejoin_breaks: bool) -> String {
    captions
        .iter()
        .map(|c| display_text(c, rejoin_breaks))
        .collect::<Vec<_>>()
        .join(LINE_BREAK)
}

/// Gentler variant for the ruby-annotation transform: lines are joined but
/// markup and quotes are left untouched so the annotator can see them.
pub fn gentle_text(caption: &Caption) -> String {
    let s = caption.lines.join(LINE_BREAK);
    let s = s.replace('\t', " ");
    let s = SPACES_REGEX.replace_all(&s, " ");
    s.trim().to_string()
}

/// The final visual line of a display text: everything after the last
/// [`LINE_BREAK`] marker
pub fn last_display_line(text: &str) -> &str {
    match text.rfind(LINE_BREAK) {
        Some(i) => &text[i + LINE_BREAK.len()..],
        None => text,
    }
}
