use std::io::Write;

use anyhow::{Context, Result};

use crate::caption::{Caption, Track};
use crate::errors::TransformError;
use crate::file_utils;
use crate::formatting;
use crate::matcher;
use crate::transforms::TextTransform;

// @module: Flashcard row assembly and TSV output
//
// One reference caption becomes one tab-separated row:
//
//   image placeholder, audio placeholder, reference text,
//   translation text, [transform columns...]
//
// Rows carry Anki media placeholders keyed by the caption's position in
// the reference track; the clips and stills themselves are produced by
// the media extractor.

/// Anki audio field for a clip file name
pub fn anki_sound(clip_name: &str) -> String {
    format!("[sound:{}]", clip_name)
}

/// Anki image field for an image file name
pub fn anki_image(image_name: &str) -> String {
    format!("<img src=\"{}\">", image_name)
}

/// Pure row constructor. Performs no I/O; writing rows is the caller's
/// business.
pub struct FlashcardAssembler {
    movie_name: String,
    rejoin_breaks: bool,
    transforms: Vec<Box<dyn TextTransform>>,
}

impl FlashcardAssembler {
    /// Creates an assembler without transform columns
    pub fn new(movie_name: impl Into<String>, rejoin_breaks: bool) -> Self {
        FlashcardAssembler {
            movie_name: movie_name.into(),
            rejoin_breaks,
            transforms: Vec::new(),
        }
    }

    /// Adds transform columns, appended to each row in the given order
    pub fn with_transforms(mut self, transforms: Vec<Box<dyn TextTransform>>) -> Self {
        self.transforms = transforms;
        self
    }

    /// Build the row for the reference caption at `position` (its 0-based
    /// position in the reference track) and its matched translations.
    /// Returns the tab-joined field list, without the row terminator.
    pub fn assemble_row(
        &self,
        position: usize,
        reference: &Caption,
        matched: &[Caption],
    ) -> Result<String, TransformError> {
        let reference_text = formatting::display_text(reference, self.rejoin_breaks);
        let translation_text = formatting::display_text_multi(matched, self.rejoin_breaks);

        let mut fields = vec![
            anki_image(&file_utils::image_name(&self.movie_name, position)),
            anki_sound(&file_utils::clip_name(&self.movie_name, position)),
            reference_text.clone(),
            translation_text,
        ];
        for transform in &self.transforms {
            let input = if transform.wants_markup() {
                formatting::gentle_text(reference)
            } else {
                reference_text.clone()
            };
            fields.push(transform.apply(&input)?);
        }
        Ok(fields.join("\t"))
    }
}

/// Write one row per reference caption, in reference-track order, each
/// terminated by a newline. No header row; normalization already replaced
/// any literal tabs, so tabs never appear inside a field.
pub fn write_flashcards<W: Write>(
    writer: &mut W,
    assembler: &FlashcardAssembler,
    reference: &Track,
    translation: &Track,
) -> Result<()> {
    for (position, caption) in reference.captions.iter().enumerate() {
        let matched = matcher::overlapping_captions(caption, &translation.captions);
        let row = assembler
            .assemble_row(position, caption, matched)
            .with_context(|| format!("failed to assemble flashcard row {}", position + 1))?;
        writeln!(writer, "{}", row).context("failed to write flashcard row")?;
    }
    Ok(())
}
