//! event-pipeline CLI - batch record processing over container files.

mod stages;

use clap::{Parser, Subcommand};
use event_pipeline::{Config, ContainerFormat, JsonlFormat, Orchestrator, PipelineError};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "event-pipeline")]
#[command(about = "Batch orchestrator for record-at-a-time event processing")]
#[command(version)]
struct Cli {
    /// Path to YAML configuration file
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Log format: text or json
    #[arg(long, default_value = "text")]
    log_format: String,

    /// Log verbosity: debug, info, warn, error
    #[arg(long, default_value = "info")]
    verbosity: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process all configured input files through the pipeline
    Run {
        /// Override the whole-run event limit (negative = unbounded)
        #[arg(long)]
        limit: Option<i64>,

        /// Keep only these record fields (comma-separated)
        #[arg(long, value_delimiter = ',')]
        select: Vec<String>,

        /// Output JSON result to stdout
        #[arg(long)]
        output_json: bool,
    },

    /// Validate the configuration and check that every input opens
    Validate,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}", e.format_detailed());
            ExitCode::from(exit_code(&e))
        }
    }
}

/// Map an error to a process exit code: 2 for configuration problems,
/// 1 for everything else.
fn exit_code(e: &PipelineError) -> u8 {
    match e {
        PipelineError::Config(_) | PipelineError::Yaml(_) => 2,
        _ => 1,
    }
}

fn run() -> Result<ExitCode, PipelineError> {
    let cli = Cli::parse();

    setup_logging(&cli.verbosity, &cli.log_format);

    let mut config = Config::load(&cli.config)?;
    info!("Loaded configuration from {:?}", cli.config);

    match cli.command {
        Commands::Run {
            limit,
            select,
            output_json,
        } => {
            if let Some(limit) = limit {
                config.event_limit = limit;
            }

            let mut orchestrator = Orchestrator::new(config);
            orchestrator.add_stage(Box::new(stages::CountStage::new()));
            if !select.is_empty() {
                orchestrator.add_stage(Box::new(stages::SelectStage::new(select)));
            }

            let result = orchestrator.run()?;

            if output_json {
                println!("{}", result.to_json()?);
            } else {
                let headline = if result.is_success() {
                    "Run completed!"
                } else {
                    "Run finished with failures"
                };
                println!("\n{}", headline);
                println!("  Run ID: {}", result.run_id);
                println!("  Duration: {:.2}s", result.duration_seconds);
                println!(
                    "  Files: {}/{}",
                    result.files_succeeded, result.files_total
                );
                println!("  Events: {}", result.events_processed);
                if !result.failed_files.is_empty() {
                    println!("  Failed files: {:?}", result.failed_files);
                }
            }

            if result.is_success() {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::from(1))
            }
        }

        Commands::Validate => {
            // Config::load already validated the pairing and limits; make
            // sure every input actually opens as a container.
            let format = JsonlFormat;
            for input in &config.input_files {
                let mut reader = format.open_reader(Path::new(input))?;
                reader.close()?;
            }
            println!("Validation completed successfully");
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn setup_logging(verbosity: &str, format: &str) {
    let level = match verbosity.to_lowercase().as_str() {
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr);

    if format == "json" {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}
