/*!
 * Tests for flashcard row assembly and TSV output
 */

use std::time::Duration;

use subcards::caption::{Caption, Track};
use subcards::errors::TransformError;
use subcards::flashcard::{anki_image, anki_sound, write_flashcards, FlashcardAssembler};
use subcards::transforms::TextTransform;

fn caption(start_ms: u64, end_ms: u64, text: &str) -> Caption {
    Caption::new(
        1,
        Duration::from_millis(start_ms),
        Duration::from_millis(end_ms),
        vec![text.to_string()],
    )
}

/// Test transform that uppercases its input
struct UpperTransform;

impl TextTransform for UpperTransform {
    fn name(&self) -> &str {
        "upper"
    }

    fn apply(&self, text: &str) -> Result<String, TransformError> {
        Ok(text.to_uppercase())
    }
}

/// Test transform that asks for the markup-preserving variant
struct MarkupEcho;

impl TextTransform for MarkupEcho {
    fn name(&self) -> &str {
        "markup-echo"
    }

    fn apply(&self, text: &str) -> Result<String, TransformError> {
        Ok(text.to_string())
    }

    fn wants_markup(&self) -> bool {
        true
    }
}

#[test]
fn test_anki_placeholders_should_use_sound_and_img_syntax() {
    assert_eq!(anki_sound("movie.mkv.1.mp3"), "[sound:movie.mkv.1.mp3]");
    assert_eq!(anki_image("movie.mkv.1.jpg"), "<img src=\"movie.mkv.1.jpg\">");
}

#[test]
fn test_assemble_row_without_transforms_should_have_four_fields() {
    let assembler = FlashcardAssembler::new("movie.mkv", true);
    let reference = caption(1000, 2000, "Hello.");
    let matched = vec![caption(1100, 1900, "Hallo.")];

    let row = assembler.assemble_row(0, &reference, &matched).unwrap();
    let fields: Vec<&str> = row.split('\t').collect();

    assert_eq!(fields.len(), 4);
    assert_eq!(fields[0], "<img src=\"movie.mkv.1.jpg\">");
    assert_eq!(fields[1], "[sound:movie.mkv.1.mp3]");
    assert_eq!(fields[2], "Hello.");
    assert_eq!(fields[3], "Hallo.");
}

#[test]
fn test_assemble_row_with_transform_should_append_column() {
    let assembler = FlashcardAssembler::new("movie.mkv", true)
        .with_transforms(vec![Box::new(UpperTransform)]);
    let reference = caption(1000, 2000, "Hello.");

    let row = assembler.assemble_row(0, &reference, &[]).unwrap();
    let fields: Vec<&str> = row.split('\t').collect();

    assert_eq!(fields.len(), 5);
    assert_eq!(fields[4], "HELLO.");
}

/// A ruby-style transform receives the markup-preserving text variant
#[test]
fn test_assemble_row_with_markup_transform_should_feed_gentle_text() {
    let assembler =
        FlashcardAssembler::new("movie.mkv", true).with_transforms(vec![Box::new(MarkupEcho)]);
    let reference = caption(1000, 2000, "<i>Hello.</i>");

    let row = assembler.assemble_row(0, &reference, &[]).unwrap();
    let fields: Vec<&str> = row.split('\t').collect();

    // The normalized column has the italics stripped; the transform
    // column still sees them.
    assert_eq!(fields[2], "Hello.");
    assert_eq!(fields[4], "<i>Hello.</i>");
}

#[test]
fn test_assemble_row_with_several_matches_should_join_translation_text() {
    let assembler = FlashcardAssembler::new("movie.mkv", false);
    let reference = caption(1000, 4000, "Hello there.");
    let matched = vec![caption(1100, 1900, "Hallo"), caption(2000, 2900, "du.")];

    let row = assembler.assemble_row(0, &reference, &matched).unwrap();
    let fields: Vec<&str> = row.split('\t').collect();
    assert_eq!(fields[3], "Hallo<br/>du.");
}

#[test]
fn test_assemble_row_with_position_should_use_one_based_artifact_names() {
    let assembler = FlashcardAssembler::new("movie.mkv", false);
    let reference = caption(0, 1000, "x");

    let row = assembler.assemble_row(4, &reference, &[]).unwrap();
    assert!(row.contains("movie.mkv.5.jpg"));
    assert!(row.contains("movie.mkv.5.mp3"));
}

#[test]
fn test_write_flashcards_with_two_captions_should_write_one_row_each() {
    let reference = Track::from_captions(vec![
        caption(1_000, 2_000, "First."),
        caption(3_000, 4_000, "Second."),
    ]);
    let translation = Track::from_captions(vec![
        caption(1_100, 1_900, "Erste."),
        caption(3_100, 3_900, "Zweite."),
    ]);
    let assembler = FlashcardAssembler::new("movie.mkv", true);

    let mut output = Vec::new();
    write_flashcards(&mut output, &assembler, &reference, &translation).unwrap();
    let text = String::from_utf8(output).unwrap();
    let rows: Vec<&str> = text.lines().collect();

    assert_eq!(rows.len(), 2);
    assert!(text.ends_with('\n'));
    assert!(rows[0].contains("First.\tErste."));
    assert!(rows[1].contains("Second.\tZweite."));
}

/// A reference caption with no overlapping translation still gets a row,
/// with an empty translation field
#[test]
fn test_write_flashcards_with_unmatched_caption_should_leave_field_empty() {
    let reference = Track::from_captions(vec![caption(1_000, 2_000, "Alone.")]);
    let translation = Track::from_captions(vec![caption(10_000, 11_000, "Weit weg.")]);
    let assembler = FlashcardAssembler::new("movie.mkv", true);

    let mut output = Vec::new();
    write_flashcards(&mut output, &assembler, &reference, &translation).unwrap();
    let text = String::from_utf8(output).unwrap();
    // Only the row terminator comes off; the tab before the empty
    // translation field must survive.
    let fields: Vec<&str> = text.trim_end_matches('\n').split('\t').collect();

    assert_eq!(fields.len(), 4);
    assert_eq!(fields[3], "");
}
