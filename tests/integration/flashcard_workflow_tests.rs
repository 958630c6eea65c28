/*!
 * End-to-end flashcard generation tests: parse, merge, match, assemble,
 * write. Media extraction is exercised separately since it shells out to
 * ffmpeg.
 */

use std::fs;

use subcards::app_config::Config;
use subcards::app_controller::Controller;
use subcards::file_utils::MediaLayout;

use crate::common;

fn write_fixture_pair(dir: &std::path::Path) -> (std::path::PathBuf, std::path::PathBuf) {
    let dir = dir.to_path_buf();
    let reference = common::create_test_file(&dir, "movie.srt", common::reference_srt()).unwrap();
    let translation =
        common::create_test_file(&dir, "movie.de.srt", common::translation_srt()).unwrap();
    (reference, translation)
}

#[test]
fn test_workflow_with_merge_mode_should_write_merged_rows() {
    let dir = common::create_temp_dir().unwrap();
    let (reference_path, translation_path) = write_fixture_pair(dir.path());
    let movie_path = dir.path().join("movie.mkv");

    let controller = Controller::with_config(Config::default()).unwrap();
    let reference = controller.load_track(&reference_path).unwrap();
    let translation = controller.load_track(&translation_path).unwrap();

    // Fragments 1+2 of each track are one interrupted sentence
    assert_eq!(reference.len(), 2);
    assert_eq!(translation.len(), 2);

    let layout = MediaLayout::for_movie(&movie_path).unwrap();
    controller.write_cards(&layout, &reference, &translation).unwrap();

    let cards = fs::read_to_string(&layout.cards_path).unwrap();
    let rows: Vec<&str> = cards.lines().collect();
    assert_eq!(rows.len(), 2);

    let first: Vec<&str> = rows[0].split('\t').collect();
    assert_eq!(first[0], "<img src=\"movie.mkv.1.jpg\">");
    assert_eq!(first[1], "[sound:movie.mkv.1.mp3]");
    assert_eq!(first[2], "Hello there friend.");
    assert_eq!(first[3], "Hallo du mein Freund.");

    let second: Vec<&str> = rows[1].split('\t').collect();
    assert_eq!(second[2], "How have you been?");
    assert_eq!(second[3], "Wie ist es dir ergangen?");
}

#[test]
fn test_workflow_without_merge_mode_should_keep_caption_granularity() {
    let dir = common::create_temp_dir().unwrap();
    let (reference_path, _) = write_fixture_pair(dir.path());

    let mut config = Config::default();
    config.merge_sentences = false;
    let controller = Controller::with_config(config).unwrap();

    let reference = controller.load_track(&reference_path).unwrap();
    assert_eq!(reference.len(), 3);
}

#[test]
fn test_workflow_with_timedtext_reference_should_dispatch_by_extension() {
    let dir = common::create_temp_dir().unwrap();
    let reference_path = common::create_test_file(
        &dir.path().to_path_buf(),
        "movie.xml",
        common::timedtext_xml(),
    )
    .unwrap();

    let controller = Controller::with_config(Config::default()).unwrap();
    let reference = controller.load_track(&reference_path).unwrap();
    assert_eq!(reference.len(), 1);
    assert_eq!(reference.captions[0].lines, vec!["Hi"]);
}

/// A configured transform command adds its column to every row. `cat` is
/// the identity transform, so the column equals the reference text.
#[test]
fn test_workflow_with_transform_command_should_append_column() {
    let dir = common::create_temp_dir().unwrap();
    let (reference_path, translation_path) = write_fixture_pair(dir.path());
    let movie_path = dir.path().join("movie.mkv");

    let mut config = Config::default();
    config.transforms.romanization_command = Some("cat".to_string());
    let controller = Controller::with_config(config).unwrap();

    let reference = controller.load_track(&reference_path).unwrap();
    let translation = controller.load_track(&translation_path).unwrap();
    let layout = MediaLayout::for_movie(&movie_path).unwrap();
    controller.write_cards(&layout, &reference, &translation).unwrap();

    let cards = fs::read_to_string(&layout.cards_path).unwrap();
    let first: Vec<&str> = cards.lines().next().unwrap().split('\t').collect();
    assert_eq!(first.len(), 5);
    assert_eq!(first[4], first[2]);
}

#[test]
fn test_workflow_with_malformed_reference_should_fail_whole_read() {
    let dir = common::create_temp_dir().unwrap();
    let reference_path = common::create_test_file(
        &dir.path().to_path_buf(),
        "movie.srt",
        "1\n00:00:01,000 -> 00:00:02,000\nbroken arrow\n",
    )
    .unwrap();

    let controller = Controller::with_config(Config::default()).unwrap();
    assert!(controller.load_track(&reference_path).is_err());
}
