//! CLI argument parsing using clap derive macros.
//!
//! This module defines the command-line interface for the clip CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// clip - Render web clipper notes from saved pages
#[derive(Parser, Debug)]
#[command(name = "clip")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print every note variable of a saved page
    #[command(alias = "v")]
    Vars {
        #[command(flatten)]
        page: PageArgs,
    },

    /// Render a note template for a saved page
    #[command(alias = "r")]
    Render {
        #[command(flatten)]
        page: PageArgs,

        /// Note template file with {{name}} placeholders
        #[arg(short, long)]
        template: PathBuf,
    },

    /// Evaluate a ${path|filter} template against JSON data
    #[command(alias = "e")]
    Eval {
        /// Template text, or @FILE to read it from a file
        #[arg(short, long)]
        template: String,

        /// Data file, or - for stdin (default: empty object)
        #[arg(short, long)]
        data: Option<String>,
    },

    /// Apply a filter or filter chain to some text
    #[command(alias = "f")]
    Filter {
        /// Filter name or chain, e.g. split(","):wrap(a)
        chain: String,

        /// Argument for a single filter, e.g. "(world:there)"
        #[arg(short, long)]
        args: Option<String>,

        /// Input text, or @FILE to read it from a file (default: stdin)
        #[arg(short, long)]
        input: Option<String>,
    },

    /// View and edit configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Inputs describing one saved page.
#[derive(Args, Debug, Clone)]
pub struct PageArgs {
    /// Saved page HTML
    #[arg(long)]
    pub html: PathBuf,

    /// Address the page was loaded from
    #[arg(short, long)]
    pub url: String,

    /// JSON-LD graph (default: the page's ld+json scripts)
    #[arg(long)]
    pub schema: Option<PathBuf>,

    /// Highlights JSON array
    #[arg(long)]
    pub highlights: Option<PathBuf>,

    /// Selected HTML
    #[arg(long)]
    pub selection: Option<PathBuf>,

    /// Readability article JSON ({"content": ..., "title": ...})
    #[arg(long)]
    pub article: Option<PathBuf>,

    /// Extra variables as a flat JSON object
    #[arg(long)]
    pub extracted: Option<PathBuf>,
}

/// Shell types for completions
#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Write the default config file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,

        /// Configuration value
        value: String,
    },

    /// Print config file path
    Path,
}
