//! # model-boiler
//!
//! CLI tool for generating Swift `Codable` boilerplate from model
//! declarations.
//!
//! ## Usage
//!
//! ```bash
//! # Boil one declaration from stdin to stdout
//! pbpaste | model-boiler boil --snake-case
//!
//! # Generate companion files for every model in a directory
//! model-boiler generate --input ./Sources/Models --output ./Sources/Generated
//!
//! # Watch mode for development
//! model-boiler generate --input ./Sources/Models --watch
//!
//! # Dry run to preview changes
//! model-boiler generate --input ./Sources/Models --dry-run
//!
//! # Initialize configuration
//! model-boiler init
//!
//! # Validate a generated file is up-to-date
//! model-boiler validate --path ./generated/User+Codable.swift --input ./Sources/Models/User.swift
//! ```

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use model_boiler::CodableGenerator;
use model_boiler_cli::{
    config::{CliArgs, Config, ConfigManager, CONFIG_FILENAME},
    error::{CliError, GenerateError},
    generator::{strip_header, FileGenerator},
    logging::init_logging,
    scanner::SourceScanner,
    watcher::FileWatcher,
    writer::{FileWriter, WriteResult},
};

#[derive(Parser)]
#[command(name = "model-boiler")]
#[command(author, version, about = "Generate Swift Codable boilerplate from model declarations", long_about = None)]
struct Cli {
    /// Print debug diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate Codable code for a single declaration
    Boil {
        /// Swift source file (reads stdin when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// File to write the generated code to (prints to stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Convert camelCase property names to snake_case keys
        #[arg(long)]
        snake_case: bool,

        /// Only generate init(from:)
        #[arg(long)]
        init_only: bool,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Generate Codable companion files for Swift sources
    Generate {
        /// Swift source file or directory
        #[arg(short, long, default_value = ".")]
        input: PathBuf,

        /// Output directory for generated Swift files
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Watch for file changes and regenerate
        #[arg(short, long)]
        watch: bool,

        /// Preview changes without writing files
        #[arg(long)]
        dry_run: bool,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Filter source files by path pattern (glob)
        #[arg(long)]
        filter: Option<String>,
    },

    /// Initialize a new model-boiler configuration file
    Init {
        /// Output path for configuration file
        #[arg(short, long, default_value = CONFIG_FILENAME)]
        output: PathBuf,

        /// Overwrite existing configuration file
        #[arg(long)]
        force: bool,
    },

    /// Validate that a generated file is up-to-date
    Validate {
        /// Path to the generated Swift file
        #[arg(short, long)]
        path: PathBuf,

        /// Swift source file it was generated from
        #[arg(short, long)]
        input: PathBuf,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(&e);
            match e {
                CliError::Validation(_) => ExitCode::from(2),
                _ => ExitCode::FAILURE,
            }
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Boil {
            input,
            output,
            snake_case,
            init_only,
            config,
        } => cmd_boil(input, output, snake_case, init_only, config),

        Commands::Generate {
            input,
            output,
            watch,
            dry_run,
            config,
            filter,
        } => cmd_generate(input, output, watch, dry_run, config, filter),

        Commands::Init { output, force } => cmd_init(output, force),

        Commands::Validate {
            path,
            input,
            config,
        } => cmd_validate(path, input, config),
    }
}

/// Boil command implementation.
///
/// Progress goes to stderr; stdout carries only the generated code.
fn cmd_boil(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    snake_case: bool,
    init_only: bool,
    config_path: Option<PathBuf>,
) -> Result<(), CliError> {
    let config = ConfigManager::load(config_path.as_deref())?;
    let config = ConfigManager::merge_cli_args(
        config,
        &CliArgs {
            snake_case: snake_case.then_some(true),
            init_only: init_only.then_some(true),
            ..Default::default()
        },
    );

    let source = match &input {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let generator = CodableGenerator::new(config.generator_config());
    let code = generator.generate(&source).map_err(|e| match &input {
        Some(path) => GenerateError::file(path, e),
        None => GenerateError::Stdin(e),
    })?;

    match output {
        Some(path) => {
            let result = FileWriter::new(false).write(&path, &format!("{}\n", code))?;
            eprintln!("{} {}", "✓".green(), describe_write(&result));
        }
        None => println!("{}", code),
    }

    Ok(())
}

/// Generate command implementation.
fn cmd_generate(
    input: PathBuf,
    output: Option<PathBuf>,
    watch: bool,
    dry_run: bool,
    config_path: Option<PathBuf>,
    filter: Option<String>,
) -> Result<(), CliError> {
    let config = ConfigManager::load(config_path.as_deref())?;
    let config = ConfigManager::merge_cli_args(
        config,
        &CliArgs {
            output,
            ..Default::default()
        },
    );

    if watch {
        run_watch_mode(&input, &config, filter.as_deref(), dry_run)
    } else {
        run_generate(&input, &config, filter.as_deref(), dry_run)
    }
}

/// Run generation once over every discovered file.
fn run_generate(
    input: &Path,
    config: &Config,
    filter: Option<&str>,
    dry_run: bool,
) -> Result<(), CliError> {
    println!("{}", "Scanning for Swift source files...".cyan());

    let mut scanner = SourceScanner::new(input).skip_generated(&config.output.file_suffix);
    if let Some(pattern) = filter {
        scanner = scanner.with_filter(pattern)?;
    }

    let files = scanner.scan_allow_empty()?;
    if files.is_empty() {
        println!("{}", "No Swift files found.".yellow());
        return Ok(());
    }

    println!("  Found {} Swift file(s)", files.len().to_string().green());
    println!("{}", "Generating Codable code...".cyan());

    let generator = FileGenerator::new(config);
    let batch = generator.generate_files(&files);
    let writer = FileWriter::new(dry_run);

    for file in &batch.files {
        match writer.write(&file.output_path, &file.content)? {
            WriteResult::DryRun { content, path } => {
                println!(
                    "{} Would write to {}:",
                    "[dry-run]".yellow(),
                    path.display()
                );
                println!("{}", "─".repeat(60).dimmed());
                println!("{}", content);
                println!("{}", "─".repeat(60).dimmed());
            }
            result => println!(
                "{} {} ({})",
                "✓".green(),
                describe_write(&result),
                file.declarations.join(", ")
            ),
        }
    }

    println!(
        "  Generated {} of {} file(s)",
        batch.files.len().to_string().green(),
        files.len()
    );

    match batch.into_error() {
        Some(error) => Err(error.into()),
        None => Ok(()),
    }
}

/// Run in watch mode.
fn run_watch_mode(
    input: &Path,
    config: &Config,
    filter: Option<&str>,
    dry_run: bool,
) -> Result<(), CliError> {
    println!("{}", "Starting watch mode...".cyan());
    println!("  Watching: {}", input.display());
    println!("  Press Ctrl+C to stop\n");

    // Per-file failures are reported, not fatal, while watching.
    if let Err(e) = run_generate(input, config, filter, dry_run) {
        print_error(&e);
    }

    let watcher = FileWatcher::new(input).ignore_generated(&config.output.file_suffix);
    let (_debouncer, rx) = watcher.watch()?;

    println!("\n{}", "Watching for changes...".cyan());

    while let Ok(event) = rx.recv() {
        if event.is_error() {
            println!(
                "{} {}",
                "Watch error:".red(),
                event.error_message().unwrap_or("Unknown error")
            );
            continue;
        }

        if let Some(path) = event.path() {
            println!("\n{} {}", "File changed:".cyan(), path.display());
        }

        if let Err(e) = run_generate(input, config, filter, dry_run) {
            print_error(&e);
        }

        println!("\n{}", "Watching for changes...".cyan());
    }

    Ok(())
}

/// Init command implementation.
fn cmd_init(output: PathBuf, force: bool) -> Result<(), CliError> {
    if output.exists() && !force {
        println!("  Use --force to overwrite");
        return Err(CliError::Validation(format!(
            "Configuration file already exists: {}",
            output.display()
        )));
    }

    let content = ConfigManager::default_config_content();
    std::fs::write(&output, content)?;

    println!(
        "{} Created configuration file: {}",
        "✓".green(),
        output.display()
    );

    Ok(())
}

/// Validate command implementation.
fn cmd_validate(
    generated_path: PathBuf,
    input: PathBuf,
    config_path: Option<PathBuf>,
) -> Result<(), CliError> {
    println!("{}", "Validating generated code...".cyan());

    if !generated_path.exists() {
        return Err(CliError::Validation(format!(
            "Generated file not found: {}",
            generated_path.display()
        )));
    }

    let existing_content = std::fs::read_to_string(&generated_path)?;
    let config = ConfigManager::load(config_path.as_deref())?;

    let files = SourceScanner::new(&input).scan()?;
    let generator = FileGenerator::new(&config);

    let mut regenerated = Vec::new();
    for file in &files {
        let generated = generator.generate_file(file)?;
        regenerated.push(strip_header(&generated.content).to_string());
    }
    let expected = regenerated.join("\n\n");

    if strip_header(&existing_content) == expected {
        println!("{} Generated code is up-to-date", "✓".green());
        Ok(())
    } else {
        println!("{} Generated code is out of date", "✗".red());
        println!("  Run 'model-boiler generate' to update");
        Err(CliError::Validation(format!(
            "{} is out of date",
            generated_path.display()
        )))
    }
}

/// Describe a non-dry-run write result.
fn describe_write(result: &WriteResult) -> String {
    match result {
        WriteResult::Written { path, bytes } => {
            format!("Written {} bytes to {}", bytes, path.display())
        }
        WriteResult::Unchanged { path } => format!("Unchanged {}", path.display()),
        WriteResult::DryRun { path, .. } => format!("Would write {}", path.display()),
    }
}

/// Print an error with formatting.
fn print_error(error: &CliError) {
    eprintln!("{} {}", "Error:".red().bold(), error);
}
