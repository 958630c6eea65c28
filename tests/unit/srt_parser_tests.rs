/*!
 * Tests for the SRT line-grammar parser
 */

use std::time::Duration;

use subcards::errors::SubtitleError;
use subcards::srt_parser::parse_srt;

use crate::common;

/// Well-formed input round-trips: every caption's lines are the trimmed
/// non-empty lines between timing line and blank line, in order
#[test]
fn test_parse_srt_with_wellformed_input_should_keep_lines_in_order() {
    let track = parse_srt(common::reference_srt()).unwrap();

    assert_eq!(track.len(), 3);
    assert_eq!(track.captions[0].index, 1);
    assert_eq!(track.captions[0].lines, vec!["Hello there"]);
    assert_eq!(track.captions[1].lines, vec!["friend."]);
    assert_eq!(track.captions[2].lines, vec!["How have you been?"]);
}

#[test]
fn test_parse_srt_with_comma_separator_should_parse_exact_duration() {
    let track = parse_srt("1\n00:00:02,360 --> 00:00:05,360\nHello\n").unwrap();
    assert_eq!(track.captions[0].start, Duration::from_millis(2360));
    assert_eq!(track.captions[0].end, Duration::from_millis(5360));
}

#[test]
fn test_parse_srt_with_dot_separator_should_parse_exact_duration() {
    let track = parse_srt("1\n00:00:15.080 --> 00:00:16.120\nHello\n").unwrap();
    assert_eq!(track.captions[0].start, Duration::from_millis(15080));
    assert_eq!(track.captions[0].end, Duration::from_millis(16120));
}

/// Cue-positioning text after the second timestamp parses identically to
/// a plain timing line
#[test]
fn test_parse_srt_with_cue_settings_should_ignore_trailing_content() {
    let plain = parse_srt("1\n00:00:01,000 --> 00:00:02,000\nHi\n").unwrap();
    let with_cues = parse_srt(
        "1\n00:00:01,000 --> 00:00:02,000 position:50.00%,middle align:middle\nHi\n",
    )
    .unwrap();
    assert_eq!(plain, with_cues);
}

#[test]
fn test_parse_srt_with_multiline_caption_should_trim_each_line() {
    let track = parse_srt("1\n00:00:01,000 --> 00:00:02,000\n  first line  \nsecond line\n\n").unwrap();
    assert_eq!(track.captions[0].lines, vec!["first line", "second line"]);
}

#[test]
fn test_parse_srt_with_blank_lines_between_records_should_skip_them() {
    let track = parse_srt("1\n00:00:01,000 --> 00:00:02,000\nA\n\n\n\n2\n00:00:03,000 --> 00:00:04,000\nB\n").unwrap();
    assert_eq!(track.len(), 2);
}

#[test]
fn test_parse_srt_with_leading_bom_should_parse() {
    let track = parse_srt("\u{feff}1\n00:00:01,000 --> 00:00:02,000\nHi\n").unwrap();
    assert_eq!(track.len(), 1);
}

#[test]
fn test_parse_srt_with_empty_input_should_return_empty_track() {
    assert!(parse_srt("").unwrap().is_empty());
    assert!(parse_srt("\n  \n").unwrap().is_empty());
}

#[test]
fn test_parse_srt_with_garbage_after_last_record_should_report_trailing_data() {
    let err = parse_srt("1\n00:00:01,000 --> 00:00:02,000\nHi\n\nnot a record\n").unwrap_err();
    match err {
        SubtitleError::Parse { expected, .. } => assert_eq!(expected, "trailing data"),
        other => panic!("unexpected error: {other:?}"),
    }
}

/// A malformed record aborts the parse with the offset of the failure and
/// a human-readable expectation
#[test]
fn test_parse_srt_with_missing_arrow_should_fail_with_offset() {
    let input = "1\n00:00:01,000 ==> 00:00:02,000\nHi\n";
    let err = parse_srt(input).unwrap_err();
    match err {
        SubtitleError::Parse { offset, expected } => {
            assert_eq!(expected, "expected '-->'");
            assert_eq!(&input[offset..offset + 3], "==>");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

/// A grammar-valid timestamp whose hour field exceeds the representable
/// range is a parse error, never an arithmetic panic
#[test]
fn test_parse_srt_with_enormous_hour_field_should_fail_with_range_error() {
    let err = parse_srt("1\n99999999999999999:00:00,000 --> 00:00:02,000\nHi\n").unwrap_err();
    match err {
        SubtitleError::Parse { expected, .. } => assert_eq!(expected, "number out of range"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_parse_srt_with_missing_colon_should_fail() {
    let err = parse_srt("1\n00.00:01,000 --> 00:00:02,000\nHi\n").unwrap_err();
    match err {
        SubtitleError::Parse { expected, .. } => assert_eq!(expected, "expected ':'"),
        other => panic!("unexpected error: {other:?}"),
    }
}

/// No partial track comes back from a failed parse, even when earlier
/// records were fine
#[test]
fn test_parse_srt_with_midfile_error_should_not_return_partial_track() {
    let result = parse_srt("1\n00:00:01,000 --> 00:00:02,000\nHi\n\n2\n00:00:03,000 --> bogus\nB\n");
    assert!(result.is_err());
}
