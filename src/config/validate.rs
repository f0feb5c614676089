//! Configuration validation.

use crate::config::{Config, SmtpConfig};
use crate::error::{Error, Result};

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_model(config)?;
    Ok(())
}

/// Validate model settings and check the artifact files exist.
fn validate_model(config: &Config) -> Result<()> {
    let model = &config.model;

    if model.input_size == 0 {
        return Err(Error::ConfigValidation {
            message: "model input_size must be at least 1".to_string(),
        });
    }

    if let Some(ref path) = model.path
        && !path.exists()
    {
        return Err(Error::ModelFileNotFound { path: path.clone() });
    }

    if let Some(ref labels) = model.labels
        && !labels.exists()
    {
        return Err(Error::LabelsFileNotFound {
            path: labels.clone(),
        });
    }

    Ok(())
}

/// Validate that the SMTP section is complete enough to send alerts.
///
/// Only called when an alert is actually requested; a config without an SMTP
/// section is valid for classification-only use.
pub fn validate_smtp(smtp: &SmtpConfig) -> Result<()> {
    if smtp.host.is_empty() {
        return Err(Error::SmtpNotConfigured {
            message: "smtp.host is not set".to_string(),
        });
    }

    if smtp.port == 0 {
        return Err(Error::SmtpNotConfigured {
            message: "smtp.port must be nonzero".to_string(),
        });
    }

    if smtp.from_address.is_empty() {
        return Err(Error::SmtpNotConfigured {
            message: "smtp.from_address is not set".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_valid_default_config() {
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_zero_input_size() {
        let mut config = Config::default();
        config.model.input_size = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_missing_model_file() {
        let mut config = Config::default();
        config.model.path = Some("/nonexistent/model.onnx".into());
        let result = validate_config(&config);
        assert!(matches!(result, Err(Error::ModelFileNotFound { .. })));
    }

    #[test]
    fn test_validate_missing_labels_file() {
        let mut config = Config::default();
        config.model.labels = Some("/nonexistent/labels.txt".into());
        let result = validate_config(&config);
        assert!(matches!(result, Err(Error::LabelsFileNotFound { .. })));
    }

    #[test]
    fn test_validate_smtp_empty_host() {
        let smtp = SmtpConfig::default();
        assert!(matches!(
            validate_smtp(&smtp),
            Err(Error::SmtpNotConfigured { .. })
        ));
    }

    #[test]
    fn test_validate_smtp_complete() {
        let smtp = SmtpConfig {
            host: "smtp.example.com".to_string(),
            username: "relay".to_string(),
            from_address: "alerts@example.com".to_string(),
            ..SmtpConfig::default()
        };
        assert!(validate_smtp(&smtp).is_ok());
    }
}
