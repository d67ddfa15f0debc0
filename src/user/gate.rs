use super::CredentialStore;
use std::sync::Arc;
use thiserror::Error;

/// The only failure a login can surface. It never says which field was wrong.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,
}

/// Decides the ANONYMOUS -> AUTHENTICATED transition.
#[derive(Clone)]
pub struct SessionGate {
    credentials: Arc<dyn CredentialStore>,
}

impl SessionGate {
    pub fn new(credentials: Arc<dyn CredentialStore>) -> Self {
        Self { credentials }
    }

    /// Returns the username to attach to the session.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<String, AuthenticationError> {
        if self.credentials.verify(username, password) {
            Ok(username.to_owned())
        } else {
            Err(AuthenticationError::InvalidCredentials)
        }
    }
}
