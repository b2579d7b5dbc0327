// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::fs::File;
use std::io::BufReader;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use app_controller::Controller;
use providers::mock::MockSynthesizer;

mod app_config;
mod app_controller;
mod audio_segmenter;
mod caption_processor;
mod errors;
mod file_utils;
mod providers;
mod summarizer;
mod text_utils;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Summarize the .txt documents in a directory into one brief
    Summarize(SummarizeArgs),

    /// Generate an .srt caption track for a narrated WAV recording
    Captions(CaptionsArgs),

    /// Full pipeline: summarize, narrate, and caption (narration uses the
    /// built-in mock synthesizer until a real TTS adapter is configured)
    Narrate(NarrateArgs),

    /// Generate shell completions for briefcast
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct SummarizeArgs {
    /// Directory containing the .txt documents to summarize
    #[arg(value_name = "INPUT_DIR")]
    input_dir: PathBuf,

    /// Directory the summary is written to (defaults to the input directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Target sentence count for the final summary
    #[arg(short = 'n', long)]
    sentences: Option<usize>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Parser, Debug)]
struct CaptionsArgs {
    /// Narrated WAV recording to caption
    #[arg(value_name = "AUDIO_FILE")]
    audio_file: PathBuf,

    /// Directory the caption file is written to (defaults to the audio file's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Re-split chunks into finer sub-segments before timestamping
    #[arg(long)]
    fine_split: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Parser, Debug)]
struct NarrateArgs {
    /// Directory containing the .txt documents to summarize
    #[arg(value_name = "INPUT_DIR")]
    input_dir: PathBuf,

    /// Directory the summary, narration and captions are written to
    #[arg(value_name = "OUTPUT_DIR")]
    output_dir: PathBuf,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// briefcast - narrated news briefs with captions
///
/// Summarizes long-form documents with a deterministic extractive method and
/// produces time-aligned .srt captions for narrated audio renditions.
#[derive(Parser, Debug)]
#[command(name = "briefcast")]
#[command(version = "0.3.0")]
#[command(about = "Extractive summaries and silence-synced captions")]
#[command(long_about = "briefcast extracts a short summary from a set of documents and builds a
time-aligned caption track for a narrated recording of that summary.

EXAMPLES:
    briefcast summarize ./articles                  # Summarize all .txt files
    briefcast summarize -n 6 ./articles             # Target six sentences
    briefcast captions speech.wav                   # Caption a narration
    briefcast captions --fine-split speech.wav      # With fine chunk splitting
    briefcast narrate ./articles ./out              # Full pipeline
    briefcast completions bash > briefcast.bash     # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a
    different config file with --config. If the config file doesn't exist, a
    default one will be created automatically.

TRANSCRIPTION PROVIDERS:
    assemblyai - AssemblyAI REST API (requires api_key in config)
    mock       - offline placeholder, cues carry timing but no text")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
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

    // @returns: ANSI color for log level
    fn get_color_for_level(level: Level) -> &'static str {
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
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::get_color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {} {}\x1B[0m",
                color,
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
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "briefcast", &mut std::io::stdout());
            Ok(())
        }
        Commands::Summarize(args) => run_summarize(args),
        Commands::Captions(args) => run_captions(args).await,
        Commands::Narrate(args) => run_narrate(args).await,
    }
}

/// Load the configuration file, creating a default one when missing, and
/// apply the CLI log level override
fn load_config(config_path: &str, log_level: &Option<CliLogLevel>) -> Result<Config> {
    if let Some(cmd_log_level) = log_level {
        log::set_max_level(level_filter(&cmd_log_level.clone().into()));
    }

    let config = if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        let mut config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?;

        if let Some(level) = log_level {
            config.log_level = level.clone().into();
        }

        config
    } else {
        // Create default configuration if not exists
        warn!("Config file not found at '{}', creating default config.", config_path);

        let mut config = Config::default();
        if let Some(level) = log_level {
            config.log_level = level.clone().into();
        }

        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    config.validate().context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if log_level.is_none() {
        log::set_max_level(level_filter(&config.log_level));
    }

    Ok(config)
}

fn run_summarize(args: SummarizeArgs) -> Result<()> {
    let mut config = load_config(&args.config_path, &args.log_level)?;
    if let Some(sentences) = args.sentences {
        config.summary.target_sentence_count = sentences;
        config.validate().context("Configuration validation failed")?;
    }

    let output_dir = args
        .output_dir
        .unwrap_or_else(|| args.input_dir.clone());

    let controller = Controller::with_config(config)?;
    let summary = controller.run_summarize(&args.input_dir, &output_dir)?;

    if summary.trim().is_empty() {
        warn!("No summary could be extracted from the input documents");
    } else {
        println!("{}", summary);
    }

    Ok(())
}

async fn run_captions(args: CaptionsArgs) -> Result<()> {
    let mut config = load_config(&args.config_path, &args.log_level)?;
    if args.fine_split {
        config.captions.enable_fine_split = true;
        config.validate().context("Configuration validation failed")?;
    }

    if !args.audio_file.is_file() {
        return Err(anyhow!("Audio file does not exist: {:?}", args.audio_file));
    }

    let output_dir = args.output_dir.unwrap_or_else(|| {
        args.audio_file
            .parent()
            .unwrap_or(Path::new("."))
            .to_path_buf()
    });

    let controller = Controller::with_config(config)?;
    let caption_path = controller
        .generate_captions(&args.audio_file, &output_dir)
        .await?;

    println!("{}", caption_path.display());
    Ok(())
}

async fn run_narrate(args: NarrateArgs) -> Result<()> {
    let config = load_config(&args.config_path, &args.log_level)?;

    if !args.input_dir.is_dir() {
        return Err(anyhow!("Input directory does not exist: {:?}", args.input_dir));
    }

    let controller = Controller::with_config(config)?;
    let synthesizer = MockSynthesizer::default();
    let caption_path = controller
        .run_pipeline(&args.input_dir, &args.output_dir, &synthesizer)
        .await?;

    println!("{}", caption_path.display());
    Ok(())
}
