//! Configuration type definitions.

use crate::constants::{DEFAULT_INPUT_SIZE, DEFAULT_SMTP_PORT, SMTP_PASSWORD_ENV};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Model artifact settings.
    #[serde(default)]
    pub model: ModelConfig,

    /// SMTP relay settings for detection alerts.
    #[serde(default)]
    pub smtp: SmtpConfig,

    /// Credential storage settings.
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Pretrained model artifact configuration.
///
/// The labels file is index-aligned with the model's output vector; the two
/// form a single artifact pair and are validated together at load time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Path to the ONNX model file.
    pub path: Option<PathBuf>,

    /// Path to the species labels file (one species per line).
    pub labels: Option<PathBuf>,

    /// Square input resolution the model was trained with, in pixels.
    pub input_size: u32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: None,
            labels: None,
            input_size: DEFAULT_INPUT_SIZE,
        }
    }
}

/// SMTP submission relay configuration.
///
/// `Debug` is implemented manually to redact the relay password.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SmtpConfig {
    /// SMTP submission host.
    pub host: String,

    /// SMTP submission port.
    pub port: u16,

    /// Relay authentication username.
    pub username: String,

    /// Relay authentication password.
    ///
    /// The `WILDWATCH_SMTP_PASSWORD` environment variable takes precedence;
    /// storing the password here is supported but discouraged.
    pub password: Option<String>,

    /// Sender address used in the From header.
    pub from_address: String,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: DEFAULT_SMTP_PORT,
            username: String::new(),
            password: None,
            from_address: String::new(),
        }
    }
}

impl std::fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("from_address", &self.from_address)
            .finish()
    }
}

impl SmtpConfig {
    /// Resolve the relay password: environment variable first, config second.
    pub fn resolve_password(&self) -> Option<String> {
        std::env::var(SMTP_PASSWORD_ENV)
            .ok()
            .or_else(|| self.password.clone())
    }
}

/// Credential storage configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the users file. Defaults to the platform data directory.
    pub users_file: Option<PathBuf>,
}
