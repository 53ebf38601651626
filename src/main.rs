// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, Context};
use log::{error, warn, info, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::{Path, PathBuf};
use std::io::Write;
use std::fs::File;
use std::io::BufReader;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use translation_studio::app_config::{self, Config};
use translation_studio::app_controller::{Controller, TranslateOptions};

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
    /// Translate a document into the selected languages
    Translate(TranslateArgs),

    /// Check that the translation service is reachable
    Health,

    /// List the languages that can be selected
    Languages,

    /// Generate shell completions for translation-studio
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Document to translate (.txt, .pdf or .docx)
    #[arg(value_name = "INPUT_FILE")]
    input_file: PathBuf,

    /// Target language codes, comma separated (e.g. 'es,de'); defaults to the configured selection
    #[arg(short, long, value_delimiter = ',')]
    languages: Option<Vec<String>>,

    /// Download the generated artifacts
    #[arg(short, long)]
    download: bool,

    /// Directory downloaded artifacts are written to
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,
}

/// Translation Studio - multi-language document translation client
///
/// Submits a document to the translation service and lists the PDF, DOCX and
/// EPUB files generated for each target language.
#[derive(Parser, Debug)]
#[command(name = "translation-studio")]
#[command(version)]
#[command(about = "Multi-language document translation client")]
#[command(long_about = "Translation Studio submits a document to the translation service and presents the generated artifacts.

EXAMPLES:
    translation-studio translate book.txt                  # Translate into the configured languages
    translation-studio translate book.pdf -l es,de         # Translate into Spanish and German
    translation-studio translate book.docx -d -o out/      # Download the generated files into out/
    translation-studio health                              # Check the service
    translation-studio languages                           # List selectable languages
    translation-studio completions bash > ts.bash          # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "conf.json")]
    config_path: String,

    /// Translation service base URL (overrides the config file)
    #[arg(short, long, global = true, env = "TRANSLATION_STUDIO_ENDPOINT")]
    endpoint: Option<String>,

    /// Set logging level
    #[arg(long, global = true, value_enum)]
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

    // @returns: Emoji and ANSI color for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("❌", "1;31"),
            Level::Warn => ("🚧", "1;33"),
            Level::Info => (" ", "1;32"),
            Level::Debug => ("🔍", "1;36"),
            Level::Trace => ("📋", "1;35"),
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
            let (emoji, color) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                color, now, emoji, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
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

#[tokio::main]
async fn main() {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    if let Err(e) = CustomLogger::init(LevelFilter::Trace) {
        eprintln!("Failed to initialize logger: {}", e);
    }
    log::set_max_level(LevelFilter::Info);

    if let Err(e) = run(CommandLineOptions::parse()).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: CommandLineOptions) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &cli.log_level {
        log::set_max_level(level_filter(&cmd_log_level.clone().into()));
    }

    match &cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(*shell, &mut cmd, "translation-studio", &mut std::io::stdout());
        }
        Commands::Translate(args) => {
            let controller = build_controller(&cli)?;
            let options = TranslateOptions {
                languages: args.languages.clone(),
                download: args.download,
                output_dir: args.output_dir.clone(),
                force_overwrite: args.force_overwrite,
            };
            let report = controller.translate(&args.input_file, &options).await?;

            if let Some(downloads) = &report.downloads {
                info!(
                    "Downloads: {} saved, {} skipped, {} failed",
                    downloads.saved.len(),
                    downloads.skipped.len(),
                    downloads.failed.len()
                );
            }
        }
        Commands::Health => {
            let controller = build_controller(&cli)?;
            let message = controller.health().await
                .context("Translation service is not available")?;
            info!("Service is up: {}", message);
        }
        Commands::Languages => {
            let controller = build_controller(&cli)?;
            for language in controller.catalog().entries() {
                println!("{} {}  {}", language.flag, language.code, language.name);
            }
        }
    }

    Ok(())
}

/// Load the config and build the HTTP controller for commands that talk to the service
fn build_controller(cli: &CommandLineOptions) -> Result<Controller> {
    let config = load_config(cli)?;

    // If log level was not set via command line, update it from config now
    if cli.log_level.is_none() {
        log::set_max_level(level_filter(&config.log_level));
    }

    Controller::with_config(config)
}

/// Load the config file, creating a default one when missing, then apply CLI overrides
fn load_config(cli: &CommandLineOptions) -> Result<Config> {
    let config_path = &cli.config_path;
    let mut config = if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    if let Some(endpoint) = &cli.endpoint {
        config.service.endpoint = endpoint.clone();
    }

    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }

    config.validate()
        .context("Configuration validation failed")?;

    Ok(config)
}
