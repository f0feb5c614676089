//! Session controller sequencing authentication, classification and alerts.

use crate::auth::Authenticator;
use crate::classify::{ClassifyImage, Prediction};
use crate::constants::{ACCEPTED_IMAGE_EXTENSIONS, ALERT_SUBJECT};
use crate::error::{Error, Result};
use crate::notify::{SendAlert, alert_body};
use crate::session::state::{ActiveForm, Session, UiState};
use std::path::Path;
use tracing::{info, warn};

/// Sequences component calls in response to user actions and owns the
/// session state.
///
/// Generic over the classification and delivery seams so the full flow can
/// be exercised without model artifacts or a mail relay.
pub struct SessionController<C: ClassifyImage, N: SendAlert> {
    session: Session,
    auth: Authenticator,
    classifier: C,
    notifier: N,
}

impl<C: ClassifyImage, N: SendAlert> SessionController<C, N> {
    /// Create a controller with a fresh anonymous session.
    pub fn new(auth: Authenticator, classifier: C, notifier: N) -> Self {
        Self {
            session: Session::default(),
            auth,
            classifier,
            notifier,
        }
    }

    /// Current session state (read-only).
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Derived user-visible state.
    pub fn ui_state(&self) -> UiState {
        self.session.ui_state()
    }

    /// Navigate to the signup form. Only reachable while anonymous.
    pub fn show_signup(&mut self) -> Result<()> {
        self.require_anonymous("signup")?;
        self.session.set_active_form(ActiveForm::Signup);
        Ok(())
    }

    /// Navigate to the login form. Only reachable while anonymous.
    pub fn show_login(&mut self) -> Result<()> {
        self.require_anonymous("login")?;
        self.session.set_active_form(ActiveForm::Login);
        Ok(())
    }

    /// Navigate back to the anonymous home screen, hiding any form.
    pub fn go_home(&mut self) -> Result<()> {
        self.require_anonymous("home")?;
        self.session.set_active_form(ActiveForm::None);
        Ok(())
    }

    /// Create an account from the signup form.
    ///
    /// On success the form closes and the user is back at the home screen;
    /// signup does not authenticate.
    pub fn signup(&mut self, username: &str, password: &str) -> Result<()> {
        if self.session.active_form() != ActiveForm::Signup {
            return Err(Error::SessionState {
                message: "signup form is not open".to_string(),
            });
        }

        self.auth.signup(username, password)?;
        self.session.set_active_form(ActiveForm::None);
        Ok(())
    }

    /// Attempt a login from the login form.
    ///
    /// Returns `false` for wrong credentials; the form stays open and the
    /// session is unchanged. Storage failures surface as errors.
    pub fn login(&mut self, username: &str, password: &str) -> Result<bool> {
        if self.session.active_form() != ActiveForm::Login {
            return Err(Error::SessionState {
                message: "login form is not open".to_string(),
            });
        }

        if self.auth.login(username, password)? {
            self.session.set_logged_in(username.trim().to_string());
            info!(user = %username.trim(), "login successful");
            Ok(true)
        } else {
            warn!("login failed");
            Ok(false)
        }
    }

    /// Classify an uploaded image file.
    ///
    /// Rejected while anonymous. The file extension gate mirrors the upload
    /// surface: only JPEG and PNG are offered.
    pub fn classify_file(&mut self, path: &Path) -> Result<Prediction> {
        self.require_logged_in("detect")?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        if !extension
            .as_deref()
            .is_some_and(|e| ACCEPTED_IMAGE_EXTENSIONS.contains(&e))
        {
            return Err(Error::UnsupportedImageFormat {
                detail: path.display().to_string(),
            });
        }

        let bytes = std::fs::read(path).map_err(|e| Error::ImageRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        self.classify_bytes(&bytes)
    }

    /// Classify raw image bytes and store the result in the session.
    pub fn classify_bytes(&mut self, bytes: &[u8]) -> Result<Prediction> {
        self.require_logged_in("detect")?;

        let prediction = self.classifier.classify(bytes)?;
        self.session.set_prediction(prediction.clone());
        Ok(prediction)
    }

    /// Send an email alert carrying the last classification result.
    ///
    /// A delivery failure is the caller's to report; the stored prediction
    /// is unaffected either way.
    pub fn send_alert(&mut self, recipient: &str) -> Result<()> {
        self.require_logged_in("alert")?;

        let prediction = self
            .session
            .last_prediction()
            .ok_or_else(|| Error::SessionState {
                message: "no detection result yet; run 'detect' first".to_string(),
            })?;

        let body = alert_body(prediction);
        self.notifier.send_alert(recipient, ALERT_SUBJECT, &body)
    }

    /// Log out, clearing the prediction and returning to the home screen.
    pub fn logout(&mut self) {
        self.session.logout();
        info!("logged out");
    }

    fn require_anonymous(&self, action: &str) -> Result<()> {
        if self.session.is_logged_in() {
            return Err(Error::SessionState {
                message: format!("'{action}' is only available before logging in"),
            });
        }
        Ok(())
    }

    fn require_logged_in(&self, action: &str) -> Result<()> {
        if !self.session.is_logged_in() {
            return Err(Error::SessionState {
                message: format!("'{action}' requires logging in first"),
            });
        }
        Ok(())
    }
}
