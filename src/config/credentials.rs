//! Access/refresh token storage
//!
//! The course service authenticates every request with two opaque tokens.
//! They are read from local storage and forwarded verbatim; nothing here
//! interprets or refreshes them.

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use keyring::Entry;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Storage key of the access token
pub const ACCESS_TOKEN_KEY: &str = "access_token";
/// Storage key of the refresh token
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// Service name for keyring storage
const SERVICE_NAME: &str = "course-access";

/// Errors from a credential backend
#[derive(Debug, Error)]
pub enum CredentialError {
    /// Failed to access system keyring
    #[error("Failed to access keyring: {0}")]
    KeyringError(String),

    /// Failed to read or write the credentials file
    #[error("Credentials file error: {0}")]
    IoError(#[from] std::io::Error),

    /// Credentials file is not valid JSON
    #[error("Failed to parse credentials: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// The token pair sent with every request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    #[serde(rename = "access_token", default)]
    pub access: String,
    #[serde(rename = "refresh_token", default)]
    pub refresh: String,
}

impl TokenPair {
    pub fn new(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        Self { access: access.into(), refresh: refresh.into() }
    }
}

/// A place the token pair lives
pub trait CredentialStore: Send + Sync {
    /// Read the stored tokens. Missing tokens read as empty strings.
    fn load(&self) -> Result<TokenPair, CredentialError>;

    /// Replace the stored tokens
    fn store(&self, tokens: &TokenPair) -> Result<(), CredentialError>;

    /// Read the tokens, falling back to empty ones if the backend fails
    fn tokens(&self) -> TokenPair {
        self.load().unwrap_or_else(|e| {
            tracing::warn!("Could not read credentials, sending empty tokens: {}", e);
            TokenPair::default()
        })
    }
}

/// Tokens kept in a JSON file keyed by `access_token` / `refresh_token`
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<TokenPair, CredentialError> {
        if !self.path.exists() {
            return Ok(TokenPair::default());
        }
        let contents = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    fn store(&self, tokens: &TokenPair) -> Result<(), CredentialError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(tokens)?;
        std::fs::write(&self.path, contents)?;
        Ok(())
    }
}

/// Tokens kept in the system keyring, one entry per key
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyringCredentialStore;

impl KeyringCredentialStore {
    fn entry(key: &str) -> Result<Entry, CredentialError> {
        Entry::new(SERVICE_NAME, key).map_err(|e| CredentialError::KeyringError(e.to_string()))
    }

    fn read(key: &str) -> Result<String, CredentialError> {
        match Self::entry(key)?.get_password() {
            Ok(value) => Ok(value),
            Err(keyring::Error::NoEntry) => Ok(String::new()),
            Err(e) => Err(CredentialError::KeyringError(e.to_string())),
        }
    }

    fn write(key: &str, value: &str) -> Result<(), CredentialError> {
        Self::entry(key)?
            .set_password(value)
            .map_err(|e| CredentialError::KeyringError(e.to_string()))
    }
}

impl CredentialStore for KeyringCredentialStore {
    fn load(&self) -> Result<TokenPair, CredentialError> {
        let access = Self::read(ACCESS_TOKEN_KEY)?;
        Ok(TokenPair { access, refresh: Self::read(REFRESH_TOKEN_KEY)? })
    }

    fn store(&self, tokens: &TokenPair) -> Result<(), CredentialError> {
        Self::write(ACCESS_TOKEN_KEY, &tokens.access)?;
        Self::write(REFRESH_TOKEN_KEY, &tokens.refresh)
    }
}

/// In-process tokens, for callers that already hold them
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    tokens: RwLock<TokenPair>,
}

impl MemoryCredentialStore {
    pub fn new(tokens: TokenPair) -> Self {
        Self { tokens: RwLock::new(tokens) }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Result<TokenPair, CredentialError> {
        Ok(self.tokens.read().map(|t| t.clone()).unwrap_or_default())
    }

    fn store(&self, tokens: &TokenPair) -> Result<(), CredentialError> {
        if let Ok(mut guard) = self.tokens.write() {
            *guard = tokens.clone();
        }
        Ok(())
    }
}

/// Mask a token for display (show first and last 4 chars)
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 12 {
        return "*".repeat(chars.len());
    }
    let prefix: String = chars[..4].iter().collect();
    let suffix: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", prefix, suffix)
}
