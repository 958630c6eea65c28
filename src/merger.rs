use std::time::Duration;

use crate::caption::{Caption, Track};
use crate::formatting;

// @module: Sentence merger
//
// Subtitle renderers split sentences across captions to fit the screen;
// for flashcards we want whole sentences. The merger walks a track left to
// right and greedily folds a caption into its predecessor while the
// predecessor looks like an interrupted sentence: its last visual line
// ends in a letter or a comma, it is not an all-caps title line, and the
// silence before the next caption is short enough.

/// Sentence merger configured with explicit values (never read from
/// ambient state)
#[derive(Debug, Clone)]
pub struct SentenceMerger {
    /// Whether merging is enabled at all; when off the merger is the
    /// identity transform
    enabled: bool,
    /// Largest silence between captions that can still be mid-sentence
    max_gap: Duration,
}

impl SentenceMerger {
    /// Creates a merger
    pub fn new(enabled: bool, max_gap: Duration) -> Self {
        SentenceMerger { enabled, max_gap }
    }

    /// Produce a new track with adjacent sentence fragments combined.
    ///
    /// The input track is never mutated. Merging keeps the first
    /// fragment's index and start, the last fragment's end, and the
    /// concatenated line lists. Repeated application is a fixpoint: a
    /// merged track merges to itself.
    pub fn merge(&self, track: &Track) -> Track {
        if !self.enabled {
            return track.clone();
        }

        let mut merged = Vec::new();
        let mut iter = track.captions.iter();
        let mut current = match iter.next() {
            Some(first) => first.clone(),
            None => return Track::new(),
        };
        for next in iter {
            // Re-evaluated against the growing caption so that three or
            // more fragments can fold into one sentence.
            if self.should_merge(&current, next) {
                current = combine(current, next);
            } else {
                merged.push(current);
                current = next.clone();
            }
        }
        merged.push(current);
        Track::from_captions(merged)
    }

    /// Whether `next` continues the sentence `current` ends with
    fn should_merge(&self, current: &Caption, next: &Caption) -> bool {
        let text = formatting::display_text(current, true);
        let last_line = formatting::last_display_line(&text);

        // All-caps lines are titles or speaker labels, never fragments.
        // Spaces between the words do not make "CHAPTER ONE" any less of
        // a title.
        if !last_line.is_empty()
            && last_line
                .chars()
                .all(|c| c.is_uppercase() || c.is_whitespace())
        {
            return false;
        }

        let gap = next.start.saturating_sub(current.end);
        if gap > self.max_gap {
            return false;
        }

        // A sentence left hanging ends in a letter or a comma; terminal
        // punctuation, digits, closing brackets all count as finished.
        match last_line.chars().last() {
            Some(c) => c.is_alphabetic() || c == ',',
            None => false,
        }
    }
}

/// Combine two fragments into one caption spanning both intervals
fn combine(current: Caption, next: &Caption) -> Caption {
    let mut lines = current.lines;
    lines.extend(next.lines.iter().cloned());
    Caption::new(current.index, current.start, next.end, lines)
}
