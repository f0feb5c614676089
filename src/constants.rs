//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "wildwatch";

/// Default model input resolution (square, pixels).
///
/// Must match the resolution the model was trained with. The preprocessing
/// pipeline resizes every submitted image to this edge length before
/// inference; see `classify::preprocess`.
pub const DEFAULT_INPUT_SIZE: u32 = 128;

/// Number of color channels the model expects (RGB).
pub const RGB_CHANNELS: usize = 3;

/// Divisor for scaling 8-bit pixel values into the model's [0, 1] range.
pub const PIXEL_SCALE: f32 = 255.0;

/// Default SMTP submission port (STARTTLS).
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// Environment variable consulted for the SMTP relay password before the
/// configuration file.
pub const SMTP_PASSWORD_ENV: &str = "WILDWATCH_SMTP_PASSWORD";

/// Subject line used for detection alert emails.
pub const ALERT_SUBJECT: &str = "Wildlife detection alert";

/// File name of the credential store inside the platform data directory.
pub const USERS_FILE_NAME: &str = "users.json";

/// Lock file extension used while rewriting the credential store.
pub const LOCK_FILE_EXTENSION: &str = ".wildwatch.lock";

/// File extensions accepted by the interactive image submission action.
pub const ACCEPTED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];
