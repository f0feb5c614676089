//! CLI argument parsing and command handling.

mod args;

pub use args::{Cli, Command, ConfigAction, SessionArgs};
