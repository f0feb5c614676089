//! Error types for wildwatch.

/// Result type alias for wildwatch operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for wildwatch.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Data directory could not be determined.
    #[error("could not determine data directory for this platform")]
    DataDirNotFound,

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Failed to write configuration file.
    #[error("failed to write config file '{path}'")]
    ConfigWrite {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize configuration.
    #[error("failed to serialize config")]
    ConfigSerialize {
        /// Underlying serialization error.
        #[source]
        source: toml::ser::Error,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// Model file does not exist.
    #[error("model file does not exist: {path}")]
    ModelFileNotFound {
        /// Path to the missing model file.
        path: std::path::PathBuf,
    },

    /// Labels file does not exist.
    #[error("labels file does not exist: {path}")]
    LabelsFileNotFound {
        /// Path to the missing labels file.
        path: std::path::PathBuf,
    },

    /// Failed to read the species labels file.
    #[error("failed to read labels file '{path}'")]
    LabelsRead {
        /// Path to the labels file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Labels file contained no species.
    #[error("labels file '{path}' contains no species")]
    LabelsEmpty {
        /// Path to the labels file.
        path: std::path::PathBuf,
    },

    /// Label list length does not match model output width.
    #[error("label count {labels} does not match model output width {outputs}")]
    LabelCountMismatch {
        /// Number of labels read from the labels file.
        labels: usize,
        /// Width of the model's score vector.
        outputs: usize,
    },

    /// Failed to read the credential store.
    #[error("failed to read user store '{path}'")]
    UserStoreRead {
        /// Path to the users file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the credential store.
    #[error("failed to parse user store '{path}'")]
    UserStoreParse {
        /// Path to the users file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// Failed to write the credential store.
    #[error("failed to write user store '{path}'")]
    UserStoreWrite {
        /// Path to the users file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Credential store is locked by another process.
    #[error("user store is locked by another process: {path}")]
    UserStoreLocked {
        /// Path to the lock file.
        path: std::path::PathBuf,
    },

    /// Failed to create lock file.
    #[error("failed to create lock file '{path}'")]
    LockCreate {
        /// Path to the lock file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Password hashing or hash parsing failed.
    #[error("password hashing failed: {reason}")]
    PasswordHash {
        /// Description of the hashing failure.
        reason: String,
    },

    /// Username or password failed basic validation.
    #[error("invalid credentials input: {message}")]
    CredentialInput {
        /// Description of the validation failure.
        message: String,
    },

    /// Failed to read an image file.
    #[error("failed to read image '{path}'")]
    ImageRead {
        /// Path to the image file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Image format is not supported.
    #[error("unsupported image format (expected JPEG or PNG): {detail}")]
    UnsupportedImageFormat {
        /// What was detected instead.
        detail: String,
    },

    /// Failed to decode image bytes.
    #[error("failed to decode image")]
    ImageDecode {
        /// Underlying decode error.
        #[source]
        source: image::ImageError,
    },

    /// Failed to initialize ONNX runtime.
    #[error("failed to initialize ONNX runtime: {reason}")]
    RuntimeInitialization {
        /// Description of the initialization failure.
        reason: String,
    },

    /// Failed to build classifier.
    #[error("failed to build classifier: {reason}")]
    ClassifierBuild {
        /// Description of the build failure.
        reason: String,
    },

    /// Inference failed.
    #[error("inference failed: {reason}")]
    Inference {
        /// Description of the inference failure.
        reason: String,
    },

    /// Email address failed structural validation.
    #[error("invalid email address: {address}")]
    InvalidEmailAddress {
        /// The rejected address.
        address: String,
    },

    /// Failed to build the alert message.
    #[error("failed to build alert message")]
    MessageBuild {
        /// Underlying lettre error.
        #[source]
        source: lettre::error::Error,
    },

    /// SMTP transport failure (connection, authentication, or protocol).
    #[error("failed to deliver alert via SMTP relay")]
    SmtpDelivery {
        /// Underlying transport error.
        #[source]
        source: lettre::transport::smtp::Error,
    },

    /// SMTP relay is not configured.
    #[error("SMTP relay is not configured: {message}")]
    SmtpNotConfigured {
        /// What is missing from the configuration.
        message: String,
    },

    /// Action is not valid in the current session state.
    #[error("{message}")]
    SessionState {
        /// Description of the rejected action.
        message: String,
    },
}
