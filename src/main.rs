// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use log::{LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use rubricator::app_config::{self, Config};
use rubricator::Controller;

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
    /// Render a rubric export into an HTML report (default command)
    Render(RenderArgs),

    /// Generate shell completions for rubricator
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// The rubric export file (.rbc) to process
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// The output path of the rendered report
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Template used to render the report
    #[arg(short, long, value_name = "TEMPLATE")]
    template: Option<PathBuf>,

    /// Display timestamped progress of each processing stage
    #[arg(short, long)]
    verbose: bool,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// Rubricator - render rubric exports as HTML grading matrices
///
/// Reads a rubric export (JSON with Rubric, RubricScale, RubricCriterion and
/// RubricCriterionScale lists), validates it, and renders the criteria x
/// scales matrix through a template.
#[derive(Parser, Debug)]
#[command(name = "rubricator")]
#[command(version)]
#[command(about = "Render rubric exports as HTML grading matrices")]
#[command(long_about = "Rubricator validates a rubric export file and renders its criteria x scales matrix through a template.

EXAMPLES:
    rubricator essay.rbc out/essay.html                    # Render with the default template
    rubricator essay.rbc out/essay.html -t my.html        # Render with a custom template
    rubricator essay.rbc out/essay.html --verbose         # Print progress of each stage
    rubricator completions bash > rubricator.bash         # Generate bash completions

TEMPLATES:
    Templates receive a `rubric` object with title, header, rows, matrix,
    scales and criteria. Without --template the built-in report template is used.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// The rubric export file (.rbc) to process
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// The output path of the rendered report
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Template used to render the report
    #[arg(short, long, value_name = "TEMPLATE")]
    template: Option<PathBuf>,

    /// Display timestamped progress of each processing stage
    #[arg(short, long)]
    verbose: bool,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,
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
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌",
            Level::Warn => "🚧",
            Level::Info => " ",
            Level::Debug => "🔍",
            Level::Trace => "📋",
        }
    }

    // @returns: ANSI colour code for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
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
            let level = record.level();

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                Self::get_color_for_level(level),
                now,
                Self::get_emoji_for_level(level),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Quiet by default: a successful run prints nothing
    CustomLogger::init(LevelFilter::Warn)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "rubricator", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Render(args)) => run_render(args),
        None => {
            // Default behavior - top-level arguments render directly
            let input = cli.input.ok_or_else(|| {
                anyhow!("INPUT is required when no subcommand is specified")
            })?;
            let output = cli.output.ok_or_else(|| {
                anyhow!("OUTPUT is required when no subcommand is specified")
            })?;

            run_render(RenderArgs {
                input,
                output,
                template: cli.template,
                verbose: cli.verbose,
                log_level: cli.log_level,
                config: cli.config,
            })
        }
    }
}

fn run_render(options: RenderArgs) -> Result<()> {
    let mut config = match &options.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    // Override config with CLI options if provided
    if let Some(template) = options.template {
        config.template_path = Some(template);
    }
    if options.verbose {
        config.verbose = true;
    }
    if let Some(log_level) = options.log_level {
        config.log_level = log_level.into();
    }

    config.validate()
        .context("Configuration validation failed")?;
    log::set_max_level(config.log_level.to_level_filter());

    let controller = Controller::with_config(config);
    controller.run(&options.input, &options.output)?;

    Ok(())
}
