//! Compass4Vets resource catalog
//!
//! Loads the veteran resources catalog and serves it through a login-gated web
//! page and a command line lookup. Exposed as a library for the binaries and tests.

pub mod catalog;
pub mod cli;
pub mod cli_style;
pub mod config;
pub mod presenter;
pub mod server;
pub mod user;

// Re-export commonly used types for convenience
pub use catalog::{load_catalog, Catalog, CatalogLoadError};
pub use server::{run_server, RequestsLoggingLevel};
pub use user::{CredentialStore, StaticCredentialStore};
