use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Settings read from the optional TOML file. Every field overrides its CLI counterpart.
#[derive(Deserialize, Default, Debug)]
#[serde(default)]
pub struct FileConfig {
    pub resources_path: Option<String>,
    pub port: Option<u16>,
    pub bind_address: Option<String>,
    pub logging_level: Option<String>,
    pub session_secret: Option<String>,
    pub session_ttl_sec: Option<u64>,

    /// When non-empty, replaces the built-in account.
    pub users: Vec<UserConfig>,
}

/// One `[[users]]` entry. Exactly one of `password` and `password_hash` must be set.
#[derive(Deserialize, Default, Clone, Debug)]
#[serde(deny_unknown_fields)]
pub struct UserConfig {
    pub username: String,
    pub password: Option<String>,
    pub password_hash: Option<String>,
    /// Hasher that produced `password_hash`, defaults to argon2.
    pub hasher: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        Self::parse(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}
