/*!
 * # subcards - subtitle-pair flashcard generator
 *
 * A Rust library for turning a pair of subtitle files (original audio +
 * translation) into Anki-importable flashcards, one per spoken sentence,
 * with audio clips and still images extracted from the movie.
 *
 * ## Features
 *
 * - Hand-rolled parsers for SRT (including WebVTT-flavored variants) and
 *   timed-text XML subtitle files
 * - Sentence merging: caption fragments split by a renderer's line
 *   wrapping are rejoined into whole sentences
 * - Temporal overlap matching between independently-timed original and
 *   translation tracks
 * - Tab-separated flashcard output with Anki media placeholders
 * - ffmpeg-based audio clip and still-image extraction with caching
 * - Optional romanization / ruby / colorization columns via external
 *   transform commands
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `caption`: Caption and Track data model
 * - `srt_parser`: Recursive-descent parser for the SRT line grammar
 * - `timedtext_parser`: Streaming parser for timed-text markup subtitles
 * - `subtitle_reader`: File reading and per-extension dispatch
 * - `formatting`: Caption-to-display-text normalization
 * - `merger`: Sentence merging of adjacent caption fragments
 * - `matcher`: Temporal overlap matching between tracks
 * - `flashcard`: Flashcard row assembly and TSV output
 * - `transforms`: External text-transform collaborators
 * - `media_extractor`: ffmpeg clip and image extraction
 * - `app_config`: Configuration management
 * - `app_controller`: Main application controller
 * - `file_utils`: File system operations and artifact naming
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod caption;
pub mod errors;
pub mod file_utils;
pub mod flashcard;
pub mod formatting;
pub mod matcher;
pub mod media_extractor;
pub mod merger;
pub mod srt_parser;
pub mod subtitle_reader;
pub mod timedtext_parser;
pub mod transforms;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use caption::{Caption, Track};
pub use errors::{AppError, SubtitleError, TransformError};
pub use merger::SentenceMerger;
