//! Bearer token storage.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Failed to read token file '{}': {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to write token file '{}': {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// The signed-in user's token, optionally mirrored to a file so it
/// survives between runs.
#[derive(Debug, Default)]
pub struct Session {
    token: Mutex<Option<String>>,
    path: Option<PathBuf>,
}

impl Session {
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Back the session with `path`, loading a token stored there earlier.
    /// A missing file means signed out.
    pub fn with_file(path: impl Into<PathBuf>) -> Result<Self, SessionError> {
        let path = path.into();
        let token = match fs::read_to_string(&path) {
            Ok(contents) => Some(contents.trim().to_string()).filter(|t| !t.is_empty()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => None,
            Err(source) => return Err(SessionError::Read { path, source }),
        };
        debug!(path = %path.display(), signed_in = token.is_some(), "session loaded");
        Ok(Self {
            token: Mutex::new(token),
            path: Some(path),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn token(&self) -> Option<String> {
        self.slot().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.slot().is_some()
    }

    /// Remember `token`. The in-memory copy is updated even when writing
    /// the file fails.
    pub fn store(&self, token: &str) -> Result<(), SessionError> {
        *self.slot() = Some(token.to_string());
        let Some(path) = &self.path else {
            return Ok(());
        };
        let write_err = |source| SessionError::Write {
            path: path.clone(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(path, token).map_err(write_err)?;
        debug!(path = %path.display(), "token stored");
        Ok(())
    }

    /// Forget the token. Removing the file is best effort.
    pub fn clear(&self) {
        *self.slot() = None;
        if let Some(path) = &self.path {
            match fs::remove_file(path) {
                Ok(()) => debug!(path = %path.display(), "token file removed"),
                Err(err) if err.kind() == io::ErrorKind::NotFound => {}
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "could not remove token file")
                }
            }
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.token.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
