//! Command implementations for the clip CLI.
//!
//! This module contains the actual command handlers that are invoked by the CLI.

pub mod completions;
pub mod config;
pub mod eval;
pub mod filter;
pub mod inputs;
pub mod render;
pub mod vars;

use webclip_extract::ClipSettings;

use crate::cli::Cli;

/// Error type for command execution.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Page extraction failed.
    #[error("{0}")]
    Extract(#[from] webclip_extract::ExtractError),

    /// A filter chain could not be parsed.
    #[error("filter error: {0}")]
    Filter(#[from] webclip_template::FilterError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CommandError {
    /// Returns the error code string for JSON output.
    pub fn code(&self) -> &'static str {
        match self {
            CommandError::Extract(_) => "EXTRACT_ERROR",
            CommandError::Filter(_) => "FILTER_ERROR",
            CommandError::Config(_) => "CONFIG_ERROR",
            CommandError::Io(_) => "IO_ERROR",
            CommandError::Json(_) => "JSON_ERROR",
        }
    }

    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            CommandError::Filter(_) | CommandError::Json(_) => 1,
            CommandError::Extract(_) => 2,
            CommandError::Io(_) => 3,
            CommandError::Config(_) => 5,
        }
    }
}

/// Result type for command execution.
pub type Result<T> = std::result::Result<T, CommandError>;

/// Context for command execution, containing common dependencies.
pub struct CommandContext {
    /// Whether to output JSON.
    pub json_output: bool,
    /// Whether to use colors.
    pub use_colors: bool,
    /// Whether to be quiet (errors only).
    pub quiet: bool,
    /// Whether to be verbose.
    pub verbose: bool,
    /// Highlighter settings from the config file.
    pub settings: ClipSettings,
}

impl CommandContext {
    /// Creates a new command context from CLI arguments and loaded config.
    pub fn from_cli(cli: &Cli, config: &config::Config) -> Self {
        let color_enabled = config.output.color.unwrap_or(true);
        Self {
            json_output: cli.json,
            use_colors: !cli.no_color && color_enabled && std::env::var_os("NO_COLOR").is_none(),
            quiet: cli.quiet,
            verbose: cli.verbose,
            settings: config.clip_settings(),
        }
    }
}
