//! SMTP alert delivery via lettre.

use crate::config::{SmtpConfig, validate_smtp};
use crate::error::{Error, Result};
use crate::notify::{SendAlert, validate_address};
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::info;

/// Alert sender that hands messages to an SMTP submission relay.
///
/// Each send opens one STARTTLS connection, authenticates, submits a single
/// plain-text message and closes. No retries, no queueing.
pub struct SmtpNotifier {
    config: SmtpConfig,
}

impl SmtpNotifier {
    /// Create a notifier over the given relay configuration.
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }
}

impl SendAlert for SmtpNotifier {
    fn send_alert(&self, to: &str, subject: &str, body: &str) -> Result<()> {
        // Validation must reject a bad address before any network activity.
        if !validate_address(to) {
            return Err(Error::InvalidEmailAddress {
                address: to.to_string(),
            });
        }
        validate_smtp(&self.config)?;

        let password = self
            .config
            .resolve_password()
            .ok_or_else(|| Error::SmtpNotConfigured {
                message: format!(
                    "no relay password (set {} or smtp.password)",
                    crate::constants::SMTP_PASSWORD_ENV
                ),
            })?;

        let email = Message::builder()
            .from(
                self.config
                    .from_address
                    .parse()
                    .map_err(|_| Error::InvalidEmailAddress {
                        address: self.config.from_address.clone(),
                    })?,
            )
            .to(to.parse().map_err(|_| Error::InvalidEmailAddress {
                address: to.to_string(),
            })?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| Error::MessageBuild { source: e })?;

        let mailer = SmtpTransport::starttls_relay(&self.config.host)
            .map_err(|e| Error::SmtpDelivery { source: e })?
            .port(self.config.port)
            .credentials(Credentials::new(self.config.username.clone(), password))
            .build();

        mailer
            .send(&email)
            .map_err(|e| Error::SmtpDelivery { source: e })?;

        info!(to = %to, subject = %subject, "alert email delivered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_address_fails_before_any_connection() {
        // Host is unset; if validation did not short-circuit, send would
        // fail with SmtpNotConfigured instead of InvalidEmailAddress.
        let notifier = SmtpNotifier::new(SmtpConfig::default());
        let result = notifier.send_alert("not-an-email", "subject", "body");
        assert!(matches!(result, Err(Error::InvalidEmailAddress { .. })));
    }

    #[test]
    fn test_unconfigured_relay_is_reported() {
        let notifier = SmtpNotifier::new(SmtpConfig::default());
        let result = notifier.send_alert("user@example.com", "subject", "body");
        assert!(matches!(result, Err(Error::SmtpNotConfigured { .. })));
    }
}
