// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};

use lecturecast::app_config::{self, Config};
use lecturecast::app_controller::{BuildOptions, Controller, InputFormat};
use lecturecast::file_utils::FileManager;
use lecturecast::layout::Theme;

/// CLI Wrapper for Theme to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTheme {
    Dark,
    Light,
}

impl From<CliTheme> for Theme {
    fn from(cli_theme: CliTheme) -> Self {
        match cli_theme {
            CliTheme::Dark => Theme::Dark,
            CliTheme::Light => Theme::Light,
        }
    }
}

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

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build captions and slide layouts from a script (default command)
    Build(BuildArgs),

    /// Print the sections a script segments into, as JSON
    Sections {
        /// Script file to segment
        #[arg(value_name = "INPUT_PATH")]
        input_path: PathBuf,

        /// Treat the input as a numbered scene breakdown
        #[arg(long)]
        scenes: bool,
    },

    /// Generate shell completions for lecturecast
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug, Clone)]
struct BuildArgs {
    /// Script file or directory of scripts to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Output directory (defaults to the script's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Slide color theme
    #[arg(long, value_enum)]
    theme: Option<CliTheme>,

    /// Canvas width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Canvas height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// JSON array of measured narration durations in seconds, one per section
    #[arg(short, long)]
    durations: Option<PathBuf>,

    /// Treat the input as a numbered scene breakdown
    #[arg(long)]
    scenes: bool,
}

/// lecturecast - turn lecture scripts into timed slides
///
/// Segments a script into titled sections, lays out one slide per section and
/// writes an SRT caption track timed against the narration.
#[derive(Parser, Debug)]
#[command(name = "lecturecast")]
#[command(version)]
#[command(about = "Turn lecture scripts into slide layouts and timed captions")]
#[command(long_about = "lecturecast segments a lecture script into titled sections, computes a slide layout
for each section and writes an SRT caption track timed against the narration.

EXAMPLES:
    lecturecast lecture.md                         # Build with default config
    lecturecast -f lecture.md                      # Force overwrite existing outputs
    lecturecast --theme light lecture.md           # Light slides
    lecturecast -d durations.json lecture.md       # Time captions against measured audio
    lecturecast --scenes breakdown.txt             # Input is a numbered scene breakdown
    lecturecast sections lecture.md                # Print the segmented sections
    lecturecast completions bash > lecturecast.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Script file or directory of scripts to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Output directory (defaults to the script's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Slide color theme
    #[arg(long, value_enum)]
    theme: Option<CliTheme>,

    /// Canvas width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Canvas height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// JSON array of measured narration durations in seconds, one per section
    #[arg(short, long)]
    durations: Option<PathBuf>,

    /// Treat the input as a numbered scene breakdown
    #[arg(long)]
    scenes: bool,
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

    // @returns: ANSI color and tag for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("1;31", "ERROR"),
            Level::Warn => ("1;33", "WARN "),
            Level::Info => ("1;32", "INFO "),
            Level::Debug => ("1;36", "DEBUG"),
            Level::Trace => ("1;35", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        // The max level set by log::set_max_level is the effective filter
        metadata.level() <= self.level.max(log::max_level())
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, tag) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "\x1B[{}m{} {} {}\x1B[0m", color, now, tag, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Info until the config or the command line says otherwise
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "lecturecast", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Sections { input_path, scenes }) => print_sections(&input_path, scenes),
        Some(Commands::Build(args)) => run_build(args).await,
        None => {
            let input_path = cli.input_path.ok_or_else(|| {
                anyhow!("INPUT_PATH is required when no subcommand is specified")
            })?;

            let build_args = BuildArgs {
                input_path,
                output_dir: cli.output_dir,
                force_overwrite: cli.force_overwrite,
                config_path: cli.config_path,
                log_level: cli.log_level,
                theme: cli.theme,
                width: cli.width,
                height: cli.height,
                durations: cli.durations,
                scenes: cli.scenes,
            };
            run_build(build_args).await
        }
    }
}

fn print_sections(input_path: &Path, scenes: bool) -> Result<()> {
    let text = FileManager::read_to_string(input_path)?;
    let json = if scenes {
        serde_json::to_string_pretty(&lecturecast::scene_parser::parse_scenes(&text))?
    } else {
        serde_json::to_string_pretty(&lecturecast::segmenter::segment(&text))?
    };
    println!("{}", json);
    Ok(())
}

// @loads: Config file, creating a default one when missing
fn load_or_create_config(config_path: &str) -> Result<Config> {
    if Path::new(config_path).exists() {
        Config::load(config_path)
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);
        let config = Config::default();
        config.save(config_path)?;
        Ok(config)
    }
}

async fn run_build(options: BuildArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = load_or_create_config(&options.config_path)?;

    // Override config with CLI options if provided
    if let Some(theme) = &options.theme {
        config.canvas.theme = theme.clone().into();
    }
    if let Some(width) = options.width {
        config.canvas.width = width;
    }
    if let Some(height) = options.height {
        config.canvas.height = height;
    }
    match &options.log_level {
        Some(log_level) => config.log_level = log_level.clone().into(),
        None => log::set_max_level(config.log_level.to_level_filter()),
    }

    let controller = Controller::with_config(config)?;
    let build_options = BuildOptions {
        format: if options.scenes { InputFormat::Scenes } else { InputFormat::Script },
        durations_path: options.durations.clone(),
        force_overwrite: options.force_overwrite,
    };

    if options.input_path.is_file() {
        let output_dir = options.output_dir.clone().unwrap_or_else(|| {
            options.input_path.parent().unwrap_or(Path::new(".")).to_path_buf()
        });
        controller.run(&options.input_path, &output_dir, &build_options).await?;
    } else if options.input_path.is_dir() {
        if options.durations.is_some() {
            return Err(anyhow!("--durations applies to a single script, not a directory"));
        }
        controller.run_folder(&options.input_path, &build_options).await?;
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", options.input_path));
    }

    Ok(())
}
