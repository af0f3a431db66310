//! Command dispatch module for routing CLI commands to their handlers.
//!
//! Commands that only touch the config file or stdout run synchronously.
//! Commands that read page inputs run on the tokio runtime so their files
//! can be read concurrently.

use std::path::Path;

use crate::cli::{Cli, Commands, ConfigCommands, PageArgs, Shell};
use crate::commands::{self, CommandContext, CommandError, Result};

/// Trait for commands that run without the async runtime.
pub trait LocalCommand {
    /// Execute the command.
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// Trait for commands that read their inputs asynchronously.
#[allow(async_fn_in_trait)]
pub trait InputCommand {
    /// Execute the command.
    async fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// Commands that don't read page inputs.
pub enum LocalDispatch<'a> {
    Config(&'a Option<ConfigCommands>),
    Completions(&'a Shell),
    Help,
}

impl<'a> LocalDispatch<'a> {
    /// Try to create a local dispatch from the CLI command.
    /// Returns None if the command reads inputs.
    pub fn try_from_cli(cli: &'a Cli) -> Option<Self> {
        match &cli.command {
            Some(Commands::Config { command }) => Some(Self::Config(command)),
            Some(Commands::Completions { shell }) => Some(Self::Completions(shell)),
            None => Some(Self::Help),
            _ => None,
        }
    }
}

impl LocalCommand for LocalDispatch<'_> {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Self::Config(command) => dispatch_config(ctx, command),
            Self::Completions(shell) => commands::completions::execute(shell).map_err(CommandError::Io),
            Self::Help => {
                if !ctx.quiet {
                    println!("clip - web clipper notes from saved pages");
                    println!("Use --help for usage information");
                }
                Ok(())
            }
        }
    }
}

/// Dispatch config subcommands.
fn dispatch_config(ctx: &CommandContext, command: &Option<ConfigCommands>) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::execute_show(ctx),
        Some(ConfigCommands::Init { force }) => commands::config::execute_init(ctx, *force),
        Some(ConfigCommands::Set { key, value }) => {
            let opts = commands::config::ConfigSetOptions {
                key: key.clone(),
                value: value.clone(),
            };
            commands::config::execute_set(ctx, &opts)
        }
        Some(ConfigCommands::Path) => commands::config::execute_path(ctx),
    }
}

/// Commands that read files or stdin.
pub enum InputDispatch<'a> {
    Vars {
        page: &'a PageArgs,
    },
    Render {
        page: &'a PageArgs,
        template: &'a Path,
    },
    Eval {
        template: &'a str,
        data: Option<&'a str>,
    },
    Filter {
        chain: &'a str,
        args: Option<&'a str>,
        input: Option<&'a str>,
    },
}

impl<'a> InputDispatch<'a> {
    /// Create an input dispatch from the CLI command.
    /// Returns None for local commands.
    pub fn from_cli(cli: &'a Cli) -> Option<Self> {
        match &cli.command {
            Some(Commands::Vars { page }) => Some(Self::Vars { page }),
            Some(Commands::Render { page, template }) => Some(Self::Render {
                page,
                template: template.as_path(),
            }),
            Some(Commands::Eval { template, data }) => Some(Self::Eval {
                template: template.as_str(),
                data: data.as_deref(),
            }),
            Some(Commands::Filter { chain, args, input }) => Some(Self::Filter {
                chain: chain.as_str(),
                args: args.as_deref(),
                input: input.as_deref(),
            }),
            _ => None,
        }
    }
}

impl InputCommand for InputDispatch<'_> {
    async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Self::Vars { page } => commands::vars::execute(ctx, page).await,
            Self::Render { page, template } => commands::render::execute(ctx, page, template).await,
            Self::Eval { template, data } => commands::eval::execute(ctx, template, *data).await,
            Self::Filter { chain, args, input } => {
                commands::filter::execute(ctx, chain, *args, *input).await
            }
        }
    }
}
