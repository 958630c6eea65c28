use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

// @module: File and artifact-naming utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Existing non-empty file (extraction cache check)
    pub fn is_non_empty_file<P: AsRef<Path>>(path: P) -> bool {
        fs::metadata(path.as_ref())
            .map(|m| m.is_file() && m.len() > 0)
            .unwrap_or(false)
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {}", path.display()))?;
        }
        Ok(())
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }
        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))
    }
}

/// Media artifact layout around a movie file: clips and stills live in a
/// `media/` directory beside the movie, and the flashcard file sits next
/// to the movie itself.
#[derive(Debug, Clone)]
pub struct MediaLayout {
    /// Directory receiving extracted clips and stills
    pub media_dir: PathBuf,
    /// Movie file name used as the artifact name prefix
    pub movie_name: String,
    /// Output path of the flashcard TSV
    pub cards_path: PathBuf,
}

impl MediaLayout {
    /// Derive the layout from the movie path
    pub fn for_movie<P: AsRef<Path>>(movie_path: P) -> Result<Self> {
        let movie_path = movie_path.as_ref();
        let movie_name = movie_path
            .file_name()
            .context("movie path has no file name")?
            .to_string_lossy()
            .to_string();
        let parent = movie_path.parent().unwrap_or(Path::new("."));
        let mut cards_name = movie_name.clone();
        cards_name.push_str(".cards.tsv");
        Ok(MediaLayout {
            media_dir: parent.join("media"),
            movie_name,
            cards_path: parent.join(cards_name),
        })
    }

    /// Audio clip artifact name for the caption at `position`
    /// (0-based position in the reference track)
    pub fn clip_name(&self, position: usize) -> String {
        clip_name(&self.movie_name, position)
    }

    /// Still image artifact name for the caption at `position`
    pub fn image_name(&self, position: usize) -> String {
        image_name(&self.movie_name, position)
    }

    /// Full path of a named artifact
    pub fn artifact_path(&self, name: &str) -> PathBuf {
        self.media_dir.join(name)
    }
}

/// Audio clip artifact name: `<movie>.<n>.mp3`, 1-based
pub fn clip_name(movie_name: &str, position: usize) -> String {
    format!("{}.{}.mp3", movie_name, position + 1)
}

/// Still image artifact name: `<movie>.<n>.jpg`, 1-based
pub fn image_name(movie_name: &str, position: usize) -> String {
    format!("{}.{}.jpg", movie_name, position + 1)
}
