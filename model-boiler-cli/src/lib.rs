//! # model-boiler-cli
//!
//! CLI library for generating Swift `Codable` boilerplate from model
//! declarations.
//!
//! This crate provides the functionality behind the `model-boiler` binary:
//! source discovery, per-file generation, file output and watch mode.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and TOML parsing
//! - [`scanner`] - Swift source discovery and filtering
//! - [`generator`] - Per-file generation with error collection
//! - [`writer`] - File output and dry-run support
//! - [`watcher`] - File system watching for development mode
//! - [`logging`] - Diagnostic output setup
//! - [`error`] - Error types and handling

pub mod config;
pub mod error;
pub mod generator;
pub mod logging;
pub mod scanner;
pub mod watcher;
pub mod writer;

// Re-export main types for convenience
pub use config::{Config, ConfigManager};
pub use error::{CliError, CliResult};
pub use generator::{BatchOutput, FileGenerator, GeneratedFile};
pub use scanner::{SourceFile, SourceScanner};
pub use watcher::FileWatcher;
pub use writer::FileWriter;
