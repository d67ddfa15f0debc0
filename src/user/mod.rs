pub mod auth;
mod credential_store;
mod gate;

pub use auth::{CredentialHasher, SessionToken};
pub use credential_store::{CredentialStore, PasswordEntry, StaticCredentialStore, BUILTIN_USERNAME};
pub use gate::{AuthenticationError, SessionGate};
