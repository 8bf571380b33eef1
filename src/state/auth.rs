//! Sign-in / sign-up page state.

use crate::forms::{Form, ValidationErrors};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    SignIn,
    SignUp,
}

/// State for the credentials view.
#[derive(Debug, Clone)]
pub struct AuthState {
    pub mode: AuthMode,
    pub form: Form,
    pub errors: ValidationErrors,
    /// A sign-in or sign-up request is in flight.
    pub busy: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self::new(AuthMode::SignIn)
    }
}

impl AuthState {
    pub fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            form: Form::credentials(),
            errors: ValidationErrors::default(),
            busy: false,
        }
    }

    /// Switches between sign-in and sign-up, keeping the typed email.
    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::SignIn => AuthMode::SignUp,
            AuthMode::SignUp => AuthMode::SignIn,
        };
        self.errors = ValidationErrors::default();
        if let Some(password) = self.form.fields.iter_mut().find(|f| f.key == "password") {
            password.value.clear();
        }
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            AuthMode::SignIn => "Sign in",
            AuthMode::SignUp => "Sign up",
        }
    }
}
