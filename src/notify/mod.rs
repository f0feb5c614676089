//! Email alerting for detection results.

mod address;
mod mailer;

pub use address::validate_address;
pub use mailer::SmtpNotifier;

use crate::classify::Prediction;
use crate::error::Result;
use chrono::Utc;

/// Seam between the session controller and the delivery transport.
///
/// The production implementation is [`SmtpNotifier`]; tests substitute a
/// recording stub so the alert flow can run without a relay.
pub trait SendAlert {
    /// Deliver one plain-text alert. At most one delivery attempt.
    fn send_alert(&self, to: &str, subject: &str, body: &str) -> Result<()>;
}

/// Build the alert body for a classification result.
pub fn alert_body(prediction: &Prediction) -> String {
    format!(
        "Detected: {}\nReported at {} UTC\n",
        prediction.species,
        Utc::now().format("%Y-%m-%d %H:%M:%S")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_body_contains_species() {
        let prediction = Prediction {
            species: "Leopard".to_string(),
            confidence: 0.91,
            index: 2,
        };
        let body = alert_body(&prediction);
        assert!(body.contains("Detected: Leopard"));
        assert!(body.contains("UTC"));
    }
}
