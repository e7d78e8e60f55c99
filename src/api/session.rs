//! Explicit session context for API credentials.
//!
//! Tokens live in one `Session` object shared via `Arc` - there is no
//! ambient global auth state. The session can be restored from a small JSON
//! store on disk at startup and is cleared (memory and store) on logout.

use crate::errors::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// The access/refresh token pair issued by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthTokens {
    /// Short-lived bearer token attached to every request.
    pub access: String,
    /// Long-lived token exchanged for a fresh pair on expiry.
    pub refresh: String,
}

/// Holds the current credentials, if any, plus the optional on-disk store
/// they are mirrored to.
#[derive(Debug, Default)]
pub struct Session {
    store_path: Option<PathBuf>,
    tokens: RwLock<Option<AuthTokens>>,
}

impl Session {
    /// An unauthenticated session with no persistence.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A session pre-loaded with tokens, not mirrored to disk. Mainly for
    /// tests and short-lived scripted use.
    #[must_use]
    pub fn with_tokens(tokens: AuthTokens) -> Self {
        Self {
            store_path: None,
            tokens: RwLock::new(Some(tokens)),
        }
    }

    /// Restores a session from the persisted token store. A missing file
    /// yields an unauthenticated session; an unreadable one is treated the
    /// same after a warning, since the user can simply log in again.
    #[must_use]
    pub fn load(store_path: &Path) -> Self {
        let tokens = match std::fs::read_to_string(store_path) {
            Ok(raw) => match serde_json::from_str::<AuthTokens>(&raw) {
                Ok(tokens) => {
                    info!(path = %store_path.display(), "Restored session from token store");
                    Some(tokens)
                }
                Err(e) => {
                    warn!(path = %store_path.display(), "Ignoring corrupt token store: {e}");
                    None
                }
            },
            Err(_) => {
                debug!(path = %store_path.display(), "No token store found, starting unauthenticated");
                None
            }
        };
        Self {
            store_path: Some(store_path.to_path_buf()),
            tokens: RwLock::new(tokens),
        }
    }

    /// Whether the session currently holds credentials.
    pub async fn is_authenticated(&self) -> bool {
        self.tokens.read().await.is_some()
    }

    /// The current access token, if authenticated.
    pub async fn access_token(&self) -> Option<String> {
        self.tokens.read().await.as_ref().map(|t| t.access.clone())
    }

    /// The current refresh token, if authenticated.
    pub async fn refresh_token(&self) -> Option<String> {
        self.tokens.read().await.as_ref().map(|t| t.refresh.clone())
    }

    /// Installs a fresh token pair, mirroring it to the store if one is
    /// configured.
    pub async fn install(&self, tokens: AuthTokens) -> Result<()> {
        if let Some(path) = &self.store_path {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            std::fs::write(path, serde_json::to_string(&tokens)?)?;
            debug!(path = %path.display(), "Persisted tokens to store");
        }
        *self.tokens.write().await = Some(tokens);
        Ok(())
    }

    /// Drops the credentials from memory and removes the store file.
    pub async fn clear(&self) -> Result<()> {
        *self.tokens.write().await = None;
        if let Some(path) = &self.store_path {
            if path.exists() {
                std::fs::remove_file(path)?;
                debug!(path = %path.display(), "Removed token store");
            }
        }
        Ok(())
    }
}
