//! Test fixture creation

use super::constants::*;
use compass4vets_server::user::{CredentialHasher, PasswordEntry, StaticCredentialStore};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Writes `content` as `resources.json` inside `dir`.
pub fn write_resources_file(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("resources.json");
    std::fs::write(&path, content).expect("Failed to write resources file");
    path
}

/// Temporary directory holding the test catalog
pub fn create_test_resources() -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_resources_file(dir.path(), TEST_RESOURCES_JSON);
    (dir, path)
}

/// One plain and one hashed user
pub fn create_test_credentials() -> StaticCredentialStore {
    let hash = CredentialHasher::Argon2
        .hash_with_new_salt(HASHED_PASS.as_bytes())
        .expect("Failed to hash test password");
    StaticCredentialStore::default()
        .with_entry(TEST_USER, PasswordEntry::Plain(TEST_PASS.to_string()))
        .with_entry(
            HASHED_USER,
            PasswordEntry::Hashed {
                hash,
                hasher: CredentialHasher::Argon2,
            },
        )
}
