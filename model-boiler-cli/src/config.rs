//! Configuration management for the CLI.
//!
//! This module handles loading configuration from `model-boiler.toml` files
//! and merging with command-line arguments.

use crate::error::{CliResult, ConfigError};
use model_boiler::GeneratorConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default configuration filename.
pub const CONFIG_FILENAME: &str = "model-boiler.toml";

/// Main configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Naming conventions.
    pub naming: NamingConfig,

    /// Output configuration.
    pub output: OutputConfig,
}

/// Naming convention configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    /// Serialize camelCase property names as snake_case keys.
    pub convert_camel_case_to_snake_case: bool,
}

/// Output configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Emit only the `init(from:)` section.
    pub only_generate_initializer: bool,

    /// Output directory for generated files.
    pub dir: PathBuf,

    /// Suffix appended to the source file stem (`User` → `User+Codable.swift`).
    pub file_suffix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            only_generate_initializer: false,
            dir: PathBuf::from("./generated"),
            file_suffix: "+Codable".to_string(),
        }
    }
}

impl Config {
    /// Generator settings derived from this configuration.
    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig::new()
            .with_snake_case(self.naming.convert_camel_case_to_snake_case)
            .with_only_initializer(self.output.only_generate_initializer)
    }
}

/// Configuration manager for loading and merging configs.
pub struct ConfigManager;

impl ConfigManager {
    /// Load configuration from a file path.
    ///
    /// With no path, the default file in the working directory is used when
    /// present, otherwise defaults apply. An explicit path must exist.
    pub fn load(path: Option<&Path>) -> CliResult<Config> {
        let config_path = match path {
            Some(path) if !path.exists() => {
                return Err(ConfigError::not_found(path.to_path_buf()).into());
            }
            Some(path) => path.to_path_buf(),
            None => PathBuf::from(CONFIG_FILENAME),
        };

        if !config_path.exists() {
            debug!("No configuration file found, using defaults");
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| ConfigError::invalid_toml(config_path.clone(), e.to_string()))?;

        Self::validate(&config)?;
        debug!(path = %config_path.display(), "Loaded configuration");

        Ok(config)
    }

    /// Check values that deserialize fine but cannot be used.
    pub fn validate(config: &Config) -> CliResult<()> {
        let suffix = &config.output.file_suffix;
        if suffix.contains(|c: char| c == '/' || c == '\\') {
            return Err(ConfigError::invalid_value(
                "output.file_suffix",
                format!("'{}' must not contain path separators", suffix),
            )
            .into());
        }
        if suffix.ends_with(".swift") {
            return Err(ConfigError::invalid_value(
                "output.file_suffix",
                "the .swift extension is added automatically",
            )
            .into());
        }
        Ok(())
    }

    /// Merge CLI arguments into configuration.
    ///
    /// CLI arguments take precedence over config file values.
    pub fn merge_cli_args(mut config: Config, args: &CliArgs) -> Config {
        if let Some(ref output) = args.output {
            config.output.dir = output.clone();
        }

        if let Some(snake_case) = args.snake_case {
            config.naming.convert_camel_case_to_snake_case = snake_case;
        }

        if let Some(init_only) = args.init_only {
            config.output.only_generate_initializer = init_only;
        }

        config
    }

    /// Generate default configuration file content with comments.
    pub fn default_config_content() -> &'static str {
        r#"# model-boiler configuration file

[naming]
# Serialize camelCase property names as snake_case keys (userName -> "user_name")
convert_camel_case_to_snake_case = false

[output]
# Emit only init(from:), leaving out CodingKeys and encode(to:)
only_generate_initializer = false

# Output directory for generated Swift files
dir = "./generated"

# Suffix for generated file names (User.swift -> User+Codable.swift)
file_suffix = "+Codable"
"#
    }
}

/// CLI arguments that can override configuration.
#[derive(Debug, Default)]
pub struct CliArgs {
    /// Output directory override.
    pub output: Option<PathBuf>,

    /// Snake case key conversion override.
    pub snake_case: Option<bool>,

    /// Initializer-only output override.
    pub init_only: Option<bool>,
}
