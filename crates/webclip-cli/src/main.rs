use clap::Parser;
use std::process::ExitCode;
use tracing::warn;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod dispatch;
mod output;

use cli::{Cli, Commands};
use commands::config::{load_config, Config};
use commands::{CommandContext, CommandError};
use dispatch::{InputCommand, InputDispatch, LocalCommand, LocalDispatch};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                let error_json = serde_json::json!({
                    "error": {
                        "code": e.code(),
                        "message": e.to_string(),
                    }
                });
                eprintln!("{error_json:#}");
            } else {
                eprintln!("Error: {e}");
            }
            ExitCode::from(e.exit_code())
        }
    }
}

/// Installs the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` logs at debug and
/// `--quiet` silences everything but errors.
fn init_logging(cli: &Cli) {
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!cli.no_color)
        .with_target(false)
        .try_init();
}

async fn run(cli: &Cli) -> commands::Result<()> {
    let config = load_config_for(cli)?;
    let ctx = CommandContext::from_cli(cli, &config);

    if let Some(dispatch) = LocalDispatch::try_from_cli(cli) {
        return dispatch.execute(&ctx);
    }

    match InputDispatch::from_cli(cli) {
        Some(dispatch) => dispatch.execute(&ctx).await,
        None => Err(CommandError::Config(format!("unhandled command: {:?}", cli.command))),
    }
}

/// Loads the config file. Config subcommands still run on a broken file so
/// it can be inspected and replaced.
fn load_config_for(cli: &Cli) -> commands::Result<Config> {
    match load_config() {
        Ok(config) => Ok(config),
        Err(e) if matches!(cli.command, Some(Commands::Config { .. })) => {
            warn!(error = %e, "ignoring unreadable config");
            Ok(Config::default())
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;
    use std::fs;
    use tempfile::TempDir;

    /// Runs `f` with `WEBCLIP_CONFIG` pointing at a config file containing `contents`.
    fn with_config<T>(contents: &str, f: impl FnOnce() -> T) -> T {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, contents).unwrap();

        let original = env::var(commands::config::CONFIG_ENV).ok();
        env::set_var(commands::config::CONFIG_ENV, &config_path);
        let result = f();
        match original {
            Some(val) => env::set_var(commands::config::CONFIG_ENV, val),
            None => env::remove_var(commands::config::CONFIG_ENV),
        }
        result
    }

    #[test]
    #[serial]
    fn test_broken_config_is_fatal_for_page_commands() {
        let cli = Cli::parse_from(["clip", "filter", "text", "--input", "x"]);
        let result = with_config("version = [", || load_config_for(&cli));
        assert!(matches!(result, Err(CommandError::Config(_))));
    }

    #[test]
    #[serial]
    fn test_broken_config_is_tolerated_for_config_commands() {
        let cli = Cli::parse_from(["clip", "config", "path"]);
        let result = with_config("version = [", || load_config_for(&cli));
        assert!(result.is_ok());
    }

    #[test]
    #[serial]
    fn test_config_settings_reach_context() {
        let cli = Cli::parse_from(["clip", "--no-color", "config"]);
        let config = with_config("[highlighter]\nenabled = false\n", || load_config_for(&cli)).unwrap();
        let ctx = CommandContext::from_cli(&cli, &config);
        assert!(!ctx.settings.highlighter_enabled);
        assert!(!ctx.use_colors);
    }
}
