use super::auth::CredentialHasher;
use std::collections::HashMap;
use tracing::warn;

/// Username used by the built-in credential store.
pub const BUILTIN_USERNAME: &str = "veteran";
const BUILTIN_PASSWORD: &str = "password";

/// Answers whether a username/password pair is valid.
///
/// The session gate only ever asks this question, so an implementation backed by
/// an external identity provider can replace the in-memory store.
pub trait CredentialStore: Send + Sync {
    fn verify(&self, username: &str, password: &str) -> bool;
}

#[derive(Clone)]
pub enum PasswordEntry {
    /// Compared with exact, case-sensitive string equality.
    Plain(String),
    Hashed {
        hash: String,
        hasher: CredentialHasher,
    },
}

impl PasswordEntry {
    fn matches(&self, username: &str, password: &str) -> bool {
        match self {
            PasswordEntry::Plain(stored) => stored == password,
            PasswordEntry::Hashed { hash, hasher } => match hasher.verify(password, hash) {
                Ok(matches) => matches,
                Err(err) => {
                    warn!("Could not verify password hash of user {}: {}", username, err);
                    false
                }
            },
        }
    }
}

/// Fixed username to password mapping, read-only after construction.
#[derive(Clone, Default)]
pub struct StaticCredentialStore {
    entries: HashMap<String, PasswordEntry>,
}

impl StaticCredentialStore {
    /// The single hardcoded account the catalog site has always shipped with.
    pub fn builtin() -> Self {
        Self::default().with_entry(BUILTIN_USERNAME, PasswordEntry::Plain(BUILTIN_PASSWORD.into()))
    }

    pub fn with_entry(mut self, username: &str, entry: PasswordEntry) -> Self {
        self.entries.insert(username.to_owned(), entry);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn usernames(&self) -> Vec<&str> {
        let mut usernames: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        usernames.sort_unstable();
        usernames
    }
}

impl CredentialStore for StaticCredentialStore {
    fn verify(&self, username: &str, password: &str) -> bool {
        self.entries
            .get(username)
            .map(|entry| entry.matches(username, password))
            .unwrap_or(false)
    }
}

// Never print passwords or hashes.
impl std::fmt::Debug for StaticCredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticCredentialStore")
            .field("usernames", &self.usernames())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_store_accepts_only_the_exact_pair() {
        let store = StaticCredentialStore::builtin();
        assert!(store.verify("veteran", "password"));

        assert!(!store.verify("veteran", "Password"));
        assert!(!store.verify("Veteran", "password"));
        assert!(!store.verify("veteran", "password "));
        assert!(!store.verify("veteran", ""));
        assert!(!store.verify("", ""));
        assert!(!store.verify("someone", "password"));
    }

    #[test]
    fn hashed_entries_verify_with_argon2() {
        let hash = CredentialHasher::Argon2
            .hash_with_new_salt(b"s3cret")
            .unwrap();
        let store = StaticCredentialStore::default().with_entry(
            "admin",
            PasswordEntry::Hashed {
                hash,
                hasher: CredentialHasher::Argon2,
            },
        );

        assert!(store.verify("admin", "s3cret"));
        assert!(!store.verify("admin", "S3cret"));
        assert!(!store.verify("veteran", "password"));
    }

    #[test]
    fn broken_hash_never_verifies() {
        let store = StaticCredentialStore::default().with_entry(
            "admin",
            PasswordEntry::Hashed {
                hash: "garbage".into(),
                hasher: CredentialHasher::Argon2,
            },
        );
        assert!(!store.verify("admin", "garbage"));
    }

    #[test]
    fn debug_output_hides_passwords() {
        let store = StaticCredentialStore::builtin();
        let printed = format!("{:?}", store);
        assert!(printed.contains("veteran"));
        assert!(!printed.contains("password\""));
        assert_eq!(store.usernames(), vec!["veteran"]);
        assert_eq!(store.len(), 1);
    }
}
