mod file_config;

pub use file_config::{FileConfig, UserConfig};

use crate::server::{RequestsLoggingLevel, ServerConfig};
use crate::user::{CredentialHasher, PasswordEntry, StaticCredentialStore};
use anyhow::{bail, Context, Result};
use axum_extra::extract::cookie::Key;
use clap::ValueEnum;
use sha2::{Digest, Sha512};
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;
use tracing::warn;

pub const DEFAULT_RESOURCES_PATH: &str = "resources.json";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_SESSION_TTL_SEC: u64 = 86_400;

const MIN_SESSION_SECRET_LEN: usize = 32;
const PLACEHOLDER_SESSION_SECRETS: [&str; 2] = ["change-me", "changeme"];

pub fn parse_path(s: &str) -> Result<PathBuf, String> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(format!("Error resolving path '{}': {}", s, msg));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir().map_err(|e| format!("Failed to get current dir: {}", e))?;
    Ok(cwd.join(original_path))
}

/// Key material for signing session cookies. Never printed.
#[derive(Clone)]
pub struct SessionSecret(String);

impl SessionSecret {
    pub fn parse(value: &str) -> Result<Self> {
        if PLACEHOLDER_SESSION_SECRETS.contains(&value.trim()) {
            bail!("The session secret is still the placeholder value, configure a real one");
        }
        if value.len() < MIN_SESSION_SECRET_LEN {
            bail!(
                "The session secret must be at least {} bytes long",
                MIN_SESSION_SECRET_LEN
            );
        }
        Ok(Self(value.to_owned()))
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Cookie signing key. SHA-512 stretches any accepted secret to the 64 bytes `Key` needs.
    pub fn cookie_key(&self) -> Key {
        let digest = Sha512::digest(self.0.as_bytes());
        Key::from(digest.as_slice())
    }
}

impl std::fmt::Debug for SessionSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SessionSecret(<redacted>)")
    }
}

/// CLI arguments that can be used for config resolution.
#[derive(Clone)]
pub struct CliConfig {
    pub resources_path: PathBuf,
    pub port: u16,
    pub bind_address: IpAddr,
    pub logging_level: RequestsLoggingLevel,
    pub session_secret: Option<String>,
    pub session_ttl_sec: u64,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            resources_path: PathBuf::from(DEFAULT_RESOURCES_PATH),
            port: DEFAULT_PORT,
            bind_address: IpAddr::V4(Ipv4Addr::LOCALHOST),
            logging_level: RequestsLoggingLevel::default(),
            session_secret: None,
            session_ttl_sec: DEFAULT_SESSION_TTL_SEC,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub resources_path: PathBuf,
    pub port: u16,
    pub bind_address: IpAddr,
    pub logging_level: RequestsLoggingLevel,
    pub session_secret: SessionSecret,
    pub session_ttl_sec: u64,
    pub credentials: StaticCredentialStore,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let resources_path = file
            .resources_path
            .map(PathBuf::from)
            .unwrap_or_else(|| cli.resources_path.clone());

        let port = file.port.unwrap_or(cli.port);

        let bind_address = match file.bind_address {
            Some(address) => address
                .parse::<IpAddr>()
                .with_context(|| format!("Invalid bind_address {:?}", address))?,
            None => cli.bind_address,
        };

        let logging_level = file
            .logging_level
            .and_then(|s| parse_logging_level(&s))
            .unwrap_or_else(|| cli.logging_level.clone());

        let session_secret = match file.session_secret.or_else(|| cli.session_secret.clone()) {
            Some(secret) => SessionSecret::parse(&secret)?,
            None => bail!(
                "A session secret is required, set session_secret in the config file or pass --session-secret"
            ),
        };

        let session_ttl_sec = file.session_ttl_sec.unwrap_or(cli.session_ttl_sec);
        if session_ttl_sec == 0 {
            bail!("session_ttl_sec must be greater than zero");
        }

        let credentials = resolve_credential_store(&file.users)?;

        Ok(Self {
            resources_path,
            port,
            bind_address,
            logging_level,
            session_secret,
            session_ttl_sec,
            credentials,
        })
    }

    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            requests_logging_level: self.logging_level.clone(),
            port: self.port,
            bind_address: self.bind_address,
            session_ttl_sec: self.session_ttl_sec,
        }
    }
}

/// Builds the credential store from `[[users]]` entries, falling back to the built-in account.
pub fn resolve_credential_store(users: &[UserConfig]) -> Result<StaticCredentialStore> {
    if users.is_empty() {
        warn!("No users configured, falling back to the built-in account");
        return Ok(StaticCredentialStore::builtin());
    }

    let mut store = StaticCredentialStore::default();
    for user in users.iter() {
        if user.username.is_empty() {
            bail!("Configured users must have a non-empty username");
        }
        if store.usernames().contains(&user.username.as_str()) {
            bail!("User {} is configured more than once", user.username);
        }
        let entry = match (&user.password, &user.password_hash) {
            (Some(password), None) => PasswordEntry::Plain(password.clone()),
            (None, Some(hash)) => {
                let hasher = match &user.hasher {
                    Some(name) => name.parse::<CredentialHasher>()?,
                    None => CredentialHasher::Argon2,
                };
                hasher
                    .validate_hash(hash)
                    .with_context(|| format!("Invalid password_hash for user {}", user.username))?;
                PasswordEntry::Hashed {
                    hash: hash.clone(),
                    hasher,
                }
            }
            _ => bail!(
                "User {} must set exactly one of password and password_hash",
                user.username
            ),
        };
        store = store.with_entry(&user.username, entry);
    }
    Ok(store)
}

/// Parses a logging level string into RequestsLoggingLevel.
/// Uses clap's ValueEnum trait for parsing.
fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}
