//! Command-line interface for parkslot.
//!
//! This module provides the CLI structure for the `parkslot` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::logging::Verbosity;

pub use commands::{ConfigCommand, ServeCommand, SlotsCommand, StatusCommand};

/// parkslot - Parking slot occupancy tracker
///
/// Tracks which parking slots are occupied and issues a scannable code when a
/// slot is taken. Scanning the code back toggles the slot.
#[derive(Debug, Parser)]
#[command(name = "parkslot")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve(ServeCommand),

    /// Inspect and change slots directly
    #[command(subcommand)]
    Slots(SlotsCommand),

    /// Show database location and occupancy counts
    Status(StatusCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.verbose, self.quiet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn status_cli(verbose: u8, quiet: bool) -> Cli {
        Cli {
            config: None,
            verbose,
            quiet,
            command: Command::Status(StatusCommand { json: false }),
        }
    }

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "parkslot");
    }

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(status_cli(0, true).verbosity(), Verbosity::Quiet);
        assert_eq!(status_cli(0, false).verbosity(), Verbosity::Normal);
        assert_eq!(status_cli(1, false).verbosity(), Verbosity::Verbose);
        assert_eq!(status_cli(2, false).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_quiet_wins_over_verbose() {
        assert_eq!(status_cli(2, true).verbosity(), Verbosity::Quiet);
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_serve_with_overrides() {
        let args = vec!["parkslot", "serve", "--host", "0.0.0.0", "-p", "8080"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Command::Serve(ServeCommand { host, port }) => {
                assert_eq!(host.as_deref(), Some("0.0.0.0"));
                assert_eq!(port, Some(8080));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_slots_toggle() {
        let args = vec!["parkslot", "slots", "toggle", "A1"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(matches!(
            cli.command,
            Command::Slots(SlotsCommand::Toggle { ref slot }) if slot == "A1"
        ));
    }

    #[test]
    fn test_parse_slots_init_accepts_negative() {
        // Rejected later by the service with a proper message
        let args = vec!["parkslot", "slots", "init", "-3"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(matches!(
            cli.command,
            Command::Slots(SlotsCommand::Init { count: -3 })
        ));
    }

    #[test]
    fn test_parse_slots_init_rejects_non_integer() {
        let args = vec!["parkslot", "slots", "init", "2.5"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_parse_status_json() {
        let args = vec!["parkslot", "status", "--json"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(matches!(
            cli.command,
            Command::Status(StatusCommand { json: true })
        ));
    }

    #[test]
    fn test_parse_config_validate() {
        let args = vec!["parkslot", "config", "validate", "-f", "/tmp/p.toml"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(matches!(
            cli.command,
            Command::Config(ConfigCommand::Validate { file: Some(_) })
        ));
    }

    #[test]
    fn test_parse_with_config() {
        let args = vec!["parkslot", "-c", "/custom/config.toml", "status"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_parse_with_verbose_after_subcommand() {
        let args = vec!["parkslot", "slots", "list", "-vv"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_missing_command_fails() {
        assert!(Cli::try_parse_from(vec!["parkslot"]).is_err());
    }
}
