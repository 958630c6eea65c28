use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::app_config::Config;
use crate::caption::Track;
use crate::file_utils::{FileManager, MediaLayout};
use crate::flashcard::{write_flashcards, FlashcardAssembler};
use crate::media_extractor::MediaExtractor;
use crate::merger::SentenceMerger;
use crate::subtitle_reader;
use crate::transforms::TextTransform;

// @module: Application controller for flashcard generation

/// Main application controller: parse both subtitle tracks, merge, write
/// the flashcard file, then extract media clips
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config })
    }

    /// Read and parse a subtitle file, then apply sentence merging per the
    /// configuration
    pub fn load_track<P: AsRef<Path>>(&self, path: P) -> Result<Track> {
        let track = subtitle_reader::read_subtitle_file(&path)?;
        debug!(
            "Parsed {} captions from {:?}",
            track.len(),
            path.as_ref()
        );
        let merger = SentenceMerger::new(self.config.merge_sentences, self.config.max_merge_gap());
        let merged = merger.merge(&track);
        if merged.len() != track.len() {
            debug!(
                "Merged {} caption fragments into {} sentences",
                track.len(),
                merged.len()
            );
        }
        Ok(merged)
    }

    /// Write the flashcard TSV for an already-merged track pair
    pub fn write_cards(
        &self,
        layout: &MediaLayout,
        reference: &Track,
        translation: &Track,
    ) -> Result<()> {
        let transforms: Vec<Box<dyn TextTransform>> = self
            .config
            .enabled_transforms()
            .into_iter()
            .map(|t| Box::new(t) as Box<dyn TextTransform>)
            .collect();
        let assembler = FlashcardAssembler::new(layout.movie_name.as_str(), self.config.merge_sentences)
            .with_transforms(transforms);

        let file = File::create(&layout.cards_path)
            .with_context(|| format!("Failed to create card file: {:?}", layout.cards_path))?;
        let mut writer = BufWriter::new(file);
        write_flashcards(&mut writer, &assembler, reference, translation)?;
        info!(
            "Wrote {} flashcards to {:?}",
            reference.len(),
            layout.cards_path
        );
        Ok(())
    }

    /// Run the main workflow: reference subtitles, translated subtitles,
    /// and the movie they belong to
    pub async fn run(
        &self,
        reference_path: &Path,
        translation_path: &Path,
        movie_path: &Path,
        force_overwrite: bool,
    ) -> Result<()> {
        let start_time = std::time::Instant::now();

        for path in [reference_path, translation_path, movie_path] {
            if !FileManager::file_exists(path) {
                return Err(anyhow!("Input file does not exist: {:?}", path));
            }
        }

        let layout = MediaLayout::for_movie(movie_path)?;
        let reference = self.load_track(reference_path)?;
        let translation = self.load_track(translation_path)?;

        if layout.cards_path.exists() && !force_overwrite {
            warn!(
                "Card file already exists, not rewriting (use -f to force overwrite): {:?}",
                layout.cards_path
            );
        } else {
            self.write_cards(&layout, &reference, &translation)?;
        }

        let extractor = MediaExtractor::new(movie_path, layout, &self.config);
        extractor.extract_all(&reference).await?;

        info!(
            "Done with {} captions in {:.1}s",
            reference.len(),
            start_time.elapsed().as_secs_f64()
        );
        Ok(())
    }
}
