//! Durable session storage.
//!
//! A single key-value slot on disk holding one serialized [`UserSession`],
//! or nothing. Read once at startup, written on successful login, deleted
//! on logout or when found corrupt.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::session::UserSession;

/// Errors that can occur reading or writing the durable slot.
///
/// Never escapes [`crate::session::SessionManager`]: corruption is
/// recovered by clearing the slot, write failures are logged and the
/// in-memory state proceeds.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem I/O failed.
    #[error("session storage I/O error: {0}")]
    Io(#[from] io::Error),

    /// The stored entry is not a valid serialized session.
    #[error("corrupt session entry: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// The durable single-slot session store.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Create a store backed by the given file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the underlying slot file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the slot.
    ///
    /// Returns `Ok(None)` if the slot is absent.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Corrupt` if the slot exists but does not parse,
    /// and `StoreError::Io` for any other filesystem failure.
    pub fn load(&self) -> Result<Option<UserSession>, StoreError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::Io(e)),
        };

        let session = serde_json::from_str(&contents)?;
        Ok(Some(session))
    }

    /// Write the slot, replacing any previous entry (last write wins).
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the file cannot be written.
    pub fn save(&self, session: &UserSession) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string(session)?;
        std::fs::write(&self.path, contents)?;
        Ok(())
    }

    /// Delete the slot. Deleting an absent slot is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the file exists but cannot be removed.
    pub fn clear(&self) -> Result<(), StoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Io(e)),
        }
    }
}
