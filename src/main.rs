// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use subcards::app_config::{Config, LogLevel};
use subcards::app_controller::Controller;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

fn level_filter(level: &LogLevel) -> LevelFilter {
    match level {
        LogLevel::Error => LevelFilter::Error,
        LogLevel::Warn => LevelFilter::Warn,
        LogLevel::Info => LevelFilter::Info,
        LogLevel::Debug => LevelFilter::Debug,
        LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate flashcards from a subtitle pair and a movie (default command)
    #[command(alias = "generate")]
    Gen(GenerateArgs),

    /// Generate shell completions for subcards
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Subtitles of the movie's spoken audio
    #[arg(short, long, value_name = "SRT_OR_XML")]
    subtitles: PathBuf,

    /// Translated subtitles
    #[arg(short = 'x', long, value_name = "SRT_OR_XML")]
    translation: PathBuf,

    /// Movie file to extract audio clips and images from
    #[arg(short, long, value_name = "MOVIE")]
    movie: PathBuf,

    /// Force overwrite of an existing flashcard file
    #[arg(short, long)]
    force_overwrite: bool,

    /// Keep captions exactly as authored instead of merging sentence
    /// fragments
    #[arg(long)]
    no_merge: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// subcards - subtitle-pair flashcard generator
///
/// Makes Anki-importable flashcards from a movie and two subtitle tracks:
/// the original-language track and a translation.
#[derive(Parser, Debug)]
#[command(name = "subcards")]
#[command(version = "1.0.0")]
#[command(about = "Make Anki flashcards from subtitle pairs and a movie")]
#[command(long_about = "subcards pairs original and translated subtitles by temporal overlap and
writes one tab-separated flashcard row per caption, together with an audio
clip and a still image extracted from the movie via ffmpeg.

EXAMPLES:
    subcards -s movie.srt -x movie.de.srt -m movie.mkv
    subcards -s movie.xml -x movie.de.srt -m movie.mkv --no-merge
    subcards -s a.srt -x b.srt -m movie.mkv -f -l debug
    subcards completions bash > subcards.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a
    different config file with --config-path. If the config file doesn't
    exist, a default one will be created automatically. Merge gap, clip
    padding, image width, extraction concurrency, and the optional
    romanization/ruby/colorization transform commands all live there.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Subtitles of the movie's spoken audio
    #[arg(short, long, value_name = "SRT_OR_XML")]
    subtitles: Option<PathBuf>,

    /// Translated subtitles
    #[arg(short = 'x', long, value_name = "SRT_OR_XML")]
    translation: Option<PathBuf>,

    /// Movie file to extract audio clips and images from
    #[arg(short, long, value_name = "MOVIE")]
    movie: Option<PathBuf>,

    /// Force overwrite of an existing flashcard file
    #[arg(short, long)]
    force_overwrite: bool,

    /// Keep captions exactly as authored instead of merging sentence
    /// fragments
    #[arg(long)]
    no_merge: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default.
    // We'll update the level after loading the config if needed.
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "subcards", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Gen(args)) => run_generate(args).await,
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let (subtitles, translation, movie) = match (cli.subtitles, cli.translation, cli.movie)
            {
                (Some(s), Some(x), Some(m)) => (s, x, m),
                _ => {
                    return Err(anyhow!(
                        "must pass --subtitles, --translation, and --movie"
                    ));
                }
            };
            let args = GenerateArgs {
                subtitles,
                translation,
                movie,
                force_overwrite: cli.force_overwrite,
                no_merge: cli.no_merge,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_generate(args).await
        }
    }
}

async fn run_generate(options: GenerateArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_level: LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level_filter(&config_level));
    }

    // Load or create configuration
    let config_path = &options.config_path;
    let mut config = if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?
    } else {
        warn!(
            "Config file not found at '{}', creating default config.",
            config_path
        );
        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;
        config
    };

    // Override config with CLI options if provided
    if options.no_merge {
        config.merge_sentences = false;
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    } else {
        log::set_max_level(level_filter(&config.log_level));
    }

    let controller = Controller::with_config(config)?;
    controller
        .run(
            &options.subtitles,
            &options.translation,
            &options.movie,
            options.force_overwrite,
        )
        .await
}
