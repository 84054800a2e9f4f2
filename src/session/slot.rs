//! Persisted identity slot.
//!
//! A single key-value slot holding the serialized identity snapshot, the
//! storefront's equivalent of a browser-local storage entry.

use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError},
};

use mockall::automock;

use crate::session::SlotError;

/// Storage for the serialized identity snapshot.
#[automock]
pub trait IdentitySlot: Send + Sync {
    /// Read the snapshot, if one is stored.
    fn load(&self) -> Result<Option<String>, SlotError>;

    /// Replace the snapshot.
    fn store(&self, snapshot: &str) -> Result<(), SlotError>;

    /// Remove the snapshot. Clearing an empty slot succeeds.
    fn clear(&self) -> Result<(), SlotError>;
}

/// Process-local slot, for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryIdentitySlot {
    snapshot: Mutex<Option<String>>,
}

impl MemoryIdentitySlot {
    /// An empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A slot that already holds a snapshot.
    pub fn with_snapshot(snapshot: impl Into<String>) -> Self {
        Self {
            snapshot: Mutex::new(Some(snapshot.into())),
        }
    }

    /// Current raw contents.
    #[must_use]
    pub fn snapshot(&self) -> Option<String> {
        self.snapshot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl IdentitySlot for MemoryIdentitySlot {
    fn load(&self) -> Result<Option<String>, SlotError> {
        Ok(self.snapshot())
    }

    fn store(&self, snapshot: &str) -> Result<(), SlotError> {
        *self.snapshot.lock().unwrap_or_else(PoisonError::into_inner) = Some(snapshot.to_string());

        Ok(())
    }

    fn clear(&self) -> Result<(), SlotError> {
        self.snapshot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        Ok(())
    }
}

/// Slot backed by a JSON file, surviving process restarts.
#[derive(Debug, Clone)]
pub struct FileIdentitySlot {
    path: PathBuf,
}

impl FileIdentitySlot {
    /// A slot stored at `path`. Parent directories are created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the snapshot file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl IdentitySlot for FileIdentitySlot {
    fn load(&self) -> Result<Option<String>, SlotError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    fn store(&self, snapshot: &str) -> Result<(), SlotError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Readers only ever see a complete snapshot.
        let staging = self.path.with_extension("tmp");
        fs::write(&staging, snapshot)?;
        fs::rename(&staging, &self.path)?;

        Ok(())
    }

    fn clear(&self) -> Result<(), SlotError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }
}
