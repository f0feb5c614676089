//! Wildwatch - wildlife species detection from camera images.
//!
//! This crate provides an interactive session for authenticating, classifying
//! uploaded images against a pretrained species model, and emailing detection
//! alerts.

#![warn(missing_docs)]
#![allow(clippy::print_stdout)]

pub mod auth;
pub mod classify;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod locking;
pub mod notify;
pub mod session;

use auth::{Authenticator, UserStore};
use clap::Parser;
use classify::SpeciesClassifier;
use cli::{Cli, Command, ConfigAction, SessionArgs};
use config::{Config, load_config_file, load_default_config};
use notify::SmtpNotifier;
use session::SessionController;
use tracing::{info, warn};

pub use error::{Error, Result};

/// Main entry point for the wildwatch CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.session.verbose, cli.session.quiet);

    // Install Ctrl+C handler to clean up credential store locks on interrupt
    if let Err(e) = ctrlc::set_handler(|| {
        locking::cleanup_all_locks();
        std::process::exit(130); // 128 + SIGINT(2)
    }) {
        warn!("Failed to install Ctrl+C handler: {e}");
    }

    // Load configuration
    let config = match cli.session.config {
        Some(ref path) => load_config_file(path)?,
        None => load_default_config()?,
    };

    // Handle subcommands
    if let Some(command) = cli.command {
        return handle_command(command, &config);
    }

    // Default: interactive session
    run_session(&cli.session, config)
}

/// Start the interactive session with the given options.
fn run_session(args: &SessionArgs, mut config: Config) -> Result<()> {
    // CLI/environment overrides take precedence over the config file
    if let Some(ref path) = args.model_path {
        config.model.path = Some(path.clone());
    }
    if let Some(ref path) = args.labels_path {
        config.model.labels = Some(path.clone());
    }
    if let Some(ref path) = args.users_file {
        config.storage.users_file = Some(path.clone());
    }

    config::validate_config(&config)?;

    // Initialize ONNX Runtime before the model is loaded
    ort::init()
        .commit()
        .map_err(|e| Error::RuntimeInitialization {
            reason: e.to_string(),
        })?;

    let users_file = match config.storage.users_file {
        Some(ref path) => path.clone(),
        None => config::default_users_file_path()?,
    };
    info!("Credential store: {}", users_file.display());
    let auth = Authenticator::new(UserStore::new(users_file));

    info!("Loading model");
    let classifier = SpeciesClassifier::from_config(&config.model)?;

    let notifier = SmtpNotifier::new(config.smtp.clone());

    let mut controller = SessionController::new(auth, classifier, notifier);
    session::repl::run(&mut controller)
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    // ORT logging is suppressed by default; use -v for warnings, -vv for full trace.
    let filter_str = if quiet {
        "warn,ort=off".to_string()
    } else {
        match verbose {
            0 => "info,ort=off".to_string(),
            1 => "debug,ort=warn".to_string(),
            _ => "trace".to_string(),
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    fmt().with_env_filter(filter).init();
}

fn handle_command(command: Command, config: &Config) -> Result<()> {
    match command {
        Command::Config { action } => handle_config_command(action, config),
        Command::Check => handle_check_command(config),
    }
}

fn handle_config_command(action: ConfigAction, config: &Config) -> Result<()> {
    match action {
        ConfigAction::Init => {
            let path = config::config_file_path()?;
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
            } else {
                let saved_path = config::save_default_config(&Config::default())?;
                println!("Created configuration file: {}", saved_path.display());
                println!("\nNext steps:");
                println!("  set model.path and model.labels, then run 'wildwatch' to start");
            }
            Ok(())
        }
        ConfigAction::Show => {
            println!("{config:#?}");
            Ok(())
        }
        ConfigAction::Path => {
            let path = config::config_file_path()?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

/// Handle the `check` command: validate config and artifact files.
fn handle_check_command(config: &Config) -> Result<()> {
    config::validate_config(config)?;

    match (&config.model.path, &config.model.labels) {
        (Some(model), Some(labels_path)) => {
            let labels = classify::read_labels(labels_path)?;
            println!("  model: {} OK", model.display());
            println!("  labels: {} species OK", labels.len());
        }
        _ => {
            return Err(Error::ConfigValidation {
                message: "model.path and model.labels must both be set".to_string(),
            });
        }
    }

    let users_file = match config.storage.users_file {
        Some(ref path) => path.clone(),
        None => config::default_users_file_path()?,
    };
    println!(
        "  users file: {} ({})",
        users_file.display(),
        if users_file.exists() {
            "exists"
        } else {
            "will be created on first signup"
        }
    );

    if config.smtp.host.is_empty() {
        println!("  smtp: not configured (alerts disabled)");
    } else {
        config::validate_smtp(&config.smtp)?;
        println!("  smtp: {}:{} OK", config.smtp.host, config.smtp.port);
    }

    Ok(())
}
