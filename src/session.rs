use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::StoreError;

const SESSION_FILE_NAME: &str = "session.json";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated { token: String },
}

/// Where the token survives between runs.
pub trait TokenStore {
    fn load(&self) -> Result<Option<String>, StoreError>;
    fn save(&self, token: &str) -> Result<(), StoreError>;
    fn clear(&self) -> Result<(), StoreError>;
}

#[derive(Serialize, Deserialize)]
struct SessionFile {
    token: Option<String>,
}

pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            path: dir.join(SESSION_FILE_NAME),
        }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let file: SessionFile = serde_json::from_str(&content)?;
        Ok(file.token.filter(|t| !t.is_empty()))
    }

    fn save(&self, token: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = SessionFile {
            token: Some(token.to_string()),
        };
        fs::write(&self.path, serde_json::to_string_pretty(&file)?)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Holds the current session and writes every change through to its store.
pub struct SessionStore {
    state: SessionState,
    store: Box<dyn TokenStore>,
}

impl SessionStore {
    /// A persisted token is trusted as is; the first 401 ends the session.
    pub fn open(store: Box<dyn TokenStore>) -> Self {
        let state = match store.load() {
            Ok(Some(token)) => {
                info!("Restored saved session");
                SessionState::Authenticated { token }
            }
            Ok(None) => SessionState::Anonymous,
            Err(e) => {
                warn!("Could not read saved session: {e}");
                SessionState::Anonymous
            }
        };
        Self { state, store }
    }

    pub fn set_token(&mut self, token: Option<String>) {
        match token {
            Some(token) => {
                if let Err(e) = self.store.save(&token) {
                    warn!("Could not persist session token: {e}");
                }
                info!("Session started");
                self.state = SessionState::Authenticated { token };
            }
            None => {
                if let Err(e) = self.store.clear() {
                    warn!("Could not remove saved session token: {e}");
                }
                info!("Session ended");
                self.state = SessionState::Anonymous;
            }
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn token(&self) -> Option<&str> {
        match &self.state {
            SessionState::Authenticated { token } => Some(token),
            SessionState::Anonymous => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }
}

#[cfg(test)]
pub use test_support::MemoryTokenStore;
