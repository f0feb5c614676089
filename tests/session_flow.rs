//! End-to-end session flow with stubbed inference and delivery.
//!
//! The classifier and mail relay are replaced with test doubles so the full
//! signup -> login -> detect -> alert sequence runs without model artifacts
//! or network access.

use std::cell::RefCell;
use std::rc::Rc;

use tempfile::TempDir;
use wildwatch::auth::{Authenticator, UserStore};
use wildwatch::classify::{ClassifyImage, Prediction};
use wildwatch::error::Error;
use wildwatch::notify::{SendAlert, validate_address};
use wildwatch::session::{SessionController, UiState};

/// Classifier stub with a fixed label set; the winning index is derived from
/// the first input byte so different inputs map to different species.
struct StubClassifier {
    species: Vec<String>,
}

impl StubClassifier {
    fn new() -> Self {
        Self {
            species: ["Lion", "Cheetah", "Leopard", "Tiger", "Jaguar"]
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

impl ClassifyImage for StubClassifier {
    fn classify(&mut self, bytes: &[u8]) -> wildwatch::Result<Prediction> {
        if bytes.is_empty() {
            return Err(Error::Inference {
                reason: "empty input".to_string(),
            });
        }
        let index = usize::from(bytes[0]) % self.species.len();
        Ok(Prediction {
            species: self.species[index].clone(),
            confidence: 0.9,
            index,
        })
    }
}

/// Recording mail relay double; validates like the real notifier but stores
/// messages instead of delivering them.
#[derive(Clone, Default)]
struct RecordingNotifier {
    sent: Rc<RefCell<Vec<(String, String, String)>>>,
}

impl SendAlert for RecordingNotifier {
    fn send_alert(&self, to: &str, subject: &str, body: &str) -> wildwatch::Result<()> {
        if !validate_address(to) {
            return Err(Error::InvalidEmailAddress {
                address: to.to_string(),
            });
        }
        self.sent
            .borrow_mut()
            .push((to.to_string(), subject.to_string(), body.to_string()));
        Ok(())
    }
}

fn controller(
    dir: &TempDir,
) -> (
    SessionController<StubClassifier, RecordingNotifier>,
    Rc<RefCell<Vec<(String, String, String)>>>,
) {
    let auth = Authenticator::new(UserStore::new(dir.path().join("users.json")));
    let notifier = RecordingNotifier::default();
    let sent = notifier.sent.clone();
    (
        SessionController::new(auth, StubClassifier::new(), notifier),
        sent,
    )
}

#[test]
fn test_full_flow_signup_login_detect_alert() {
    let dir = TempDir::new().unwrap();
    let (mut ctl, sent) = controller(&dir);

    assert_eq!(ctl.ui_state(), UiState::AnonymousHome);

    // Signup creates the account and returns to home without authenticating.
    ctl.show_signup().unwrap();
    assert_eq!(ctl.ui_state(), UiState::SignupForm);
    ctl.signup("alice", "pw1").unwrap();
    assert_eq!(ctl.ui_state(), UiState::AnonymousHome);

    // Wrong password stays anonymous with the form open.
    ctl.show_login().unwrap();
    assert!(!ctl.login("alice", "wrong").unwrap());
    assert_eq!(ctl.ui_state(), UiState::LoginForm);

    // Correct password authenticates.
    assert!(ctl.login("alice", "pw1").unwrap());
    assert_eq!(ctl.ui_state(), UiState::AuthenticatedIdle);

    // Byte 2 maps to index 2 in the stub's label list.
    let prediction = ctl.classify_bytes(&[2, 0, 0]).unwrap();
    assert_eq!(prediction.species, "Leopard");
    assert_eq!(ctl.ui_state(), UiState::AuthenticatedWithPrediction);

    // Alert carries the predicted label in the body.
    ctl.send_alert("ranger@example.com").unwrap();
    let messages = sent.borrow();
    assert_eq!(messages.len(), 1);
    let (to, subject, body) = &messages[0];
    assert_eq!(to, "ranger@example.com");
    assert!(subject.contains("detection"));
    assert!(body.contains("Leopard"));
}

#[test]
fn test_repeated_detect_overwrites_prediction() {
    let dir = TempDir::new().unwrap();
    let (mut ctl, _) = controller(&dir);

    ctl.show_signup().unwrap();
    ctl.signup("alice", "pw1").unwrap();
    ctl.show_login().unwrap();
    assert!(ctl.login("alice", "pw1").unwrap());

    assert_eq!(ctl.classify_bytes(&[0]).unwrap().species, "Lion");
    assert_eq!(ctl.classify_bytes(&[3]).unwrap().species, "Tiger");
    assert_eq!(
        ctl.session().last_prediction().map(|p| p.species.as_str()),
        Some("Tiger")
    );
}

#[test]
fn test_logout_clears_prediction_and_blocks_detect() {
    let dir = TempDir::new().unwrap();
    let (mut ctl, _) = controller(&dir);

    ctl.show_signup().unwrap();
    ctl.signup("alice", "pw1").unwrap();
    ctl.show_login().unwrap();
    assert!(ctl.login("alice", "pw1").unwrap());
    ctl.classify_bytes(&[0]).unwrap();

    ctl.logout();
    assert_eq!(ctl.ui_state(), UiState::AnonymousHome);
    assert!(ctl.session().last_prediction().is_none());

    // Detect is not reachable from an anonymous session.
    let result = ctl.classify_bytes(&[0]);
    assert!(matches!(result, Err(Error::SessionState { .. })));
}

#[test]
fn test_alert_without_prediction_is_rejected() {
    let dir = TempDir::new().unwrap();
    let (mut ctl, sent) = controller(&dir);

    ctl.show_signup().unwrap();
    ctl.signup("alice", "pw1").unwrap();
    ctl.show_login().unwrap();
    assert!(ctl.login("alice", "pw1").unwrap());

    let result = ctl.send_alert("ranger@example.com");
    assert!(matches!(result, Err(Error::SessionState { .. })));
    assert!(sent.borrow().is_empty());
}

#[test]
fn test_alert_to_invalid_address_is_rejected_and_keeps_prediction() {
    let dir = TempDir::new().unwrap();
    let (mut ctl, sent) = controller(&dir);

    ctl.show_signup().unwrap();
    ctl.signup("alice", "pw1").unwrap();
    ctl.show_login().unwrap();
    assert!(ctl.login("alice", "pw1").unwrap());
    ctl.classify_bytes(&[0]).unwrap();

    let result = ctl.send_alert("not-an-email");
    assert!(matches!(result, Err(Error::InvalidEmailAddress { .. })));
    assert!(sent.borrow().is_empty());

    // The classification result is unaffected by a delivery failure.
    assert_eq!(ctl.ui_state(), UiState::AuthenticatedWithPrediction);
}

#[test]
fn test_classify_failure_keeps_session_usable() {
    let dir = TempDir::new().unwrap();
    let (mut ctl, _) = controller(&dir);

    ctl.show_signup().unwrap();
    ctl.signup("alice", "pw1").unwrap();
    ctl.show_login().unwrap();
    assert!(ctl.login("alice", "pw1").unwrap());

    // Empty input makes the stub fail the same way a bad image would.
    assert!(ctl.classify_bytes(&[]).is_err());
    assert_eq!(ctl.ui_state(), UiState::AuthenticatedIdle);

    // The next action still works.
    assert_eq!(ctl.classify_bytes(&[1]).unwrap().species, "Cheetah");
}

#[test]
fn test_detect_rejects_unsupported_file_extension() {
    let dir = TempDir::new().unwrap();
    let (mut ctl, _) = controller(&dir);

    ctl.show_signup().unwrap();
    ctl.signup("alice", "pw1").unwrap();
    ctl.show_login().unwrap();
    assert!(ctl.login("alice", "pw1").unwrap());

    // Only JPEG and PNG are offered by the upload surface.
    let result = ctl.classify_file(std::path::Path::new("photo.gif"));
    assert!(matches!(result, Err(Error::UnsupportedImageFormat { .. })));
}

#[test]
fn test_login_and_signup_require_open_form() {
    let dir = TempDir::new().unwrap();
    let (mut ctl, _) = controller(&dir);

    assert!(matches!(
        ctl.login("alice", "pw1"),
        Err(Error::SessionState { .. })
    ));
    assert!(matches!(
        ctl.signup("alice", "pw1"),
        Err(Error::SessionState { .. })
    ));
}

#[test]
fn test_navigation_rejected_while_logged_in() {
    let dir = TempDir::new().unwrap();
    let (mut ctl, _) = controller(&dir);

    ctl.show_signup().unwrap();
    ctl.signup("alice", "pw1").unwrap();
    ctl.show_login().unwrap();
    assert!(ctl.login("alice", "pw1").unwrap());

    assert!(matches!(ctl.show_login(), Err(Error::SessionState { .. })));
    assert!(matches!(ctl.show_signup(), Err(Error::SessionState { .. })));
}

#[test]
fn test_credentials_persist_across_controllers() {
    let dir = TempDir::new().unwrap();

    {
        let (mut ctl, _) = controller(&dir);
        ctl.show_signup().unwrap();
        ctl.signup("alice", "pw1").unwrap();
    }

    // A new session over the same store sees the account.
    let (mut ctl, _) = controller(&dir);
    ctl.show_login().unwrap();
    assert!(ctl.login("alice", "pw1").unwrap());
}
