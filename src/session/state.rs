//! Per-session interactive state.
//!
//! One `Session` value exists per interactive session and is owned by the
//! controller; nothing here is process-global, so multiple sessions in one
//! process cannot interfere.

use crate::classify::Prediction;

/// Which credential form is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveForm {
    /// No form shown.
    #[default]
    None,
    /// Login form shown.
    Login,
    /// Signup form shown.
    Signup,
}

/// Derived user-visible session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiState {
    /// Not logged in, no form shown.
    AnonymousHome,
    /// Not logged in, signup form shown.
    SignupForm,
    /// Not logged in, login form shown.
    LoginForm,
    /// Logged in, no classification yet.
    AuthenticatedIdle,
    /// Logged in with a stored classification result.
    AuthenticatedWithPrediction,
}

/// Transient state for one interactive session.
#[derive(Debug, Default)]
pub struct Session {
    logged_in: bool,
    active_form: ActiveForm,
    username: Option<String>,
    last_prediction: Option<Prediction>,
}

impl Session {
    /// Whether the user has authenticated.
    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    /// The currently active credential form.
    pub fn active_form(&self) -> ActiveForm {
        self.active_form
    }

    /// The authenticated username, if any.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// The most recent classification result, if any.
    pub fn last_prediction(&self) -> Option<&Prediction> {
        self.last_prediction.as_ref()
    }

    /// Derive the user-visible state.
    pub fn ui_state(&self) -> UiState {
        if self.logged_in {
            if self.last_prediction.is_some() {
                UiState::AuthenticatedWithPrediction
            } else {
                UiState::AuthenticatedIdle
            }
        } else {
            match self.active_form {
                ActiveForm::None => UiState::AnonymousHome,
                ActiveForm::Login => UiState::LoginForm,
                ActiveForm::Signup => UiState::SignupForm,
            }
        }
    }

    /// Show one of the credential forms (or none).
    pub fn set_active_form(&mut self, form: ActiveForm) {
        self.active_form = form;
    }

    /// Mark the session authenticated for `username`.
    pub fn set_logged_in(&mut self, username: String) {
        self.logged_in = true;
        self.username = Some(username);
        self.active_form = ActiveForm::None;
    }

    /// Store a classification result, replacing any previous one.
    pub fn set_prediction(&mut self, prediction: Prediction) {
        self.last_prediction = Some(prediction);
    }

    /// Reset to anonymous-home: logged out, no form, prediction cleared.
    pub fn logout(&mut self) {
        self.logged_in = false;
        self.active_form = ActiveForm::None;
        self.username = None;
        self.last_prediction = None;
    }
}
