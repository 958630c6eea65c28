/*!
 * Tests for the temporal overlap matcher
 */

use std::time::Duration;

use subcards::caption::Caption;
use subcards::matcher::overlapping_captions;

fn caption(start_ms: u64, end_ms: u64, text: &str) -> Caption {
    Caption::new(
        0,
        Duration::from_millis(start_ms),
        Duration::from_millis(end_ms),
        vec![text.to_string()],
    )
}

fn translations() -> Vec<Caption> {
    vec![
        caption(9_000, 9_500, "before"),
        caption(11_000, 11_500, "inside"),
        caption(12_000, 13_000, "touching"),
        caption(14_000, 15_000, "after"),
    ]
}

/// Reference [10.0, 12.0] matches exactly the second and third captions;
/// touching the boundary at 12.0 counts as overlap
#[test]
fn test_overlapping_captions_with_reference_interval_should_match_contiguous_run() {
    let reference = caption(10_000, 12_000, "ref");
    let translations = translations();
    let matched = overlapping_captions(&reference, &translations);

    assert_eq!(matched.len(), 2);
    assert_eq!(matched[0].lines, vec!["inside"]);
    assert_eq!(matched[1].lines, vec!["touching"]);
}

/// A reference falling entirely in a gap returns an empty match, not an
/// error
#[test]
fn test_overlapping_captions_with_reference_in_gap_should_return_empty() {
    let reference = caption(13_200, 13_800, "ref");
    assert!(overlapping_captions(&reference, &translations()).is_empty());
}

#[test]
fn test_overlapping_captions_with_enclosing_reference_should_match_all() {
    let reference = caption(0, 20_000, "ref");
    assert_eq!(overlapping_captions(&reference, &translations()).len(), 4);
}

#[test]
fn test_overlapping_captions_with_reference_inside_translation_should_match_it() {
    let reference = caption(12_200, 12_400, "ref");
    let translations = translations();
    let matched = overlapping_captions(&reference, &translations);
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].lines, vec!["touching"]);
}

#[test]
fn test_overlapping_captions_with_empty_translation_track_should_return_empty() {
    let reference = caption(0, 1_000, "ref");
    assert!(overlapping_captions(&reference, &[]).is_empty());
}

/// The matcher is stateless: matching the same reference repeatedly, or
/// references out of order, always gives the same answer
#[test]
fn test_overlapping_captions_with_out_of_order_queries_should_be_stateless() {
    let translations = translations();
    let late = caption(14_000, 14_500, "ref");
    let early = caption(9_000, 9_200, "ref");

    assert_eq!(overlapping_captions(&late, &translations).len(), 1);
    assert_eq!(overlapping_captions(&early, &translations).len(), 1);
    assert_eq!(overlapping_captions(&late, &translations).len(), 1);
}
