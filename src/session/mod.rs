//! Interactive session state and control flow.

mod controller;
pub mod repl;
mod state;

pub use controller::SessionController;
pub use state::{ActiveForm, Session, UiState};
