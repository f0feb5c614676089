//! CLI argument definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Wildlife species detection from camera images.
#[derive(Debug, Parser)]
#[command(name = "wildwatch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Common options for the interactive session.
    #[command(flatten)]
    pub session: SessionArgs,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Verify the configured model, labels and credential store.
    Check,
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Arguments for the interactive session.
#[derive(Debug, Args)]
pub struct SessionArgs {
    /// Path to the config file (default: platform config directory).
    #[arg(long, env = "WILDWATCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Path to the ONNX model file (overrides config).
    #[arg(long, env = "WILDWATCH_MODEL_PATH")]
    pub model_path: Option<PathBuf>,

    /// Path to the species labels file (overrides config).
    #[arg(long, env = "WILDWATCH_LABELS_PATH")]
    pub labels_path: Option<PathBuf>,

    /// Path to the users file (overrides config).
    #[arg(long, env = "WILDWATCH_USERS_FILE")]
    pub users_file: Option<PathBuf>,

    /// Suppress informational output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity (-v: debug, -vv: trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
