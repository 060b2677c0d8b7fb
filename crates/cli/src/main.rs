//! Console CLI - project session settings

mod commands;
mod config;
mod logging;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use commands::Commands;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{Level, error, info};

#[derive(Parser)]
#[command(name = "console")]
#[command(about = "Manage project session settings")]
#[command(version)]
struct Cli {
    /// Set logging level
    #[arg(short = 'l', long, global = true, default_value = "info")]
    log_level: LogLevel,

    /// Configuration file (TOML, YAML or JSON)
    #[arg(short = 'c', long, global = true, env = "CONSOLE_CONFIG")]
    config: Option<PathBuf>,

    /// Also write logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Timeout for operations in seconds (0 = no timeout)
    #[arg(short = 't', long, global = true, default_value = "30")]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init_logging(cli.log_level.into(), cli.log_file.as_deref())?;

    info!("Starting console CLI");

    let result = if cli.timeout == 0 {
        cli.command.execute(cli.config).await
    } else {
        let timeout_duration = Duration::from_secs(cli.timeout);
        match tokio::time::timeout(timeout_duration, cli.command.execute(cli.config)).await {
            Ok(result) => result,
            Err(_) => Err(anyhow::anyhow!(
                "Command timed out after {} seconds",
                cli.timeout
            )),
        }
    };

    if let Err(e) = result {
        error!("Command failed: {e:#}");
        std::process::exit(1);
    }

    info!("Command completed successfully");
    Ok(())
}

#[derive(Clone, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(log_level: LogLevel) -> Self {
        match log_level {
            LogLevel::Error => Self::ERROR,
            LogLevel::Warn => Self::WARN,
            LogLevel::Info => Self::INFO,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Trace => Self::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use commands::{ConfigCommands, SessionCommands};

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_session_set() {
        let cli = Cli::try_parse_from([
            "console",
            "session",
            "set",
            "--project",
            "app-1",
            "--access-token-expires-in",
            "600",
            "-l",
            "debug",
        ])
        .unwrap();

        assert!(matches!(cli.log_level, LogLevel::Debug));
        let Commands::Session {
            command:
                SessionCommands::Set {
                    project,
                    access_token_expires_in,
                    refresh_token_expires_in,
                },
        } = cli.command
        else {
            panic!("expected session set");
        };
        assert_eq!(project.as_deref(), Some("app-1"));
        assert_eq!(access_token_expires_in.as_deref(), Some("600"));
        assert_eq!(refresh_token_expires_in, None);
    }

    #[test]
    fn test_parse_keeps_raw_values_for_validation() {
        let cli = Cli::try_parse_from([
            "console",
            "session",
            "set",
            "--refresh-token-expires-in",
            "-5",
        ])
        .unwrap();

        let Commands::Session {
            command: SessionCommands::Set {
                refresh_token_expires_in,
                ..
            },
        } = cli.command
        else {
            panic!("expected session set");
        };
        assert_eq!(refresh_token_expires_in.as_deref(), Some("-5"));
    }

    #[test]
    fn test_parse_config_init_with_output() {
        let cli = Cli::try_parse_from(["console", "config", "init", "out/console.toml"]).unwrap();

        let Commands::Config {
            command: ConfigCommands::Init { output },
        } = cli.command
        else {
            panic!("expected config init");
        };
        assert_eq!(output, Some(PathBuf::from("out/console.toml")));
    }

    #[test]
    fn test_log_level_mapping() {
        assert_eq!(Level::from(LogLevel::Warn), Level::WARN);
        assert_eq!(Level::from(LogLevel::Trace), Level::TRACE);
    }
}
