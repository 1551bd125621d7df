//! CLI command definitions.

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Arguments for `serve`.
#[derive(Debug, Args)]
pub struct ServeCommand {
    /// Address to bind (overrides `server.host`)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides `server.port`)
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Slot administration commands.
#[derive(Debug, Subcommand)]
pub enum SlotsCommand {
    /// List all slots
    List {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Toggle a slot between vacant and occupied
    Toggle {
        /// Slot number, or the text scanned from an issued code
        slot: String,
    },

    /// Replace the slot set with A1..AN, all vacant
    Init {
        /// Number of slots to create
        #[arg(allow_negative_numbers = true)]
        count: i64,
    },
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}
