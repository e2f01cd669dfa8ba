/*!
 * Storage Backends
 * Where the persisted document lives between restarts
 */

use parking_lot::Mutex;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;

use crate::vfs::types::{VfsError, VfsResult};

/// Whole-document storage
///
/// Implementations replace the stored bytes entirely on every save.
#[cfg_attr(test, mockall::automock)]
pub trait Store: Send + Sync {
    /// Stored bytes, `None` when nothing has been stored yet
    fn load(&self) -> VfsResult<Option<Vec<u8>>>;

    /// Replace the stored bytes
    fn save(&self, data: &[u8]) -> VfsResult<()>;

    /// Human-readable location for logs
    fn describe(&self) -> String;
}

/// Document stored in a file on the host filesystem
#[derive(Debug, Clone)]
pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

impl Store for LocalStore {
    fn load(&self) -> VfsResult<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(VfsError::StorageUnavailable(format!(
                "{}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    fn save(&self, data: &[u8]) -> VfsResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    VfsError::StorageUnavailable(format!("{}: {}", parent.display(), e))
                })?;
            }
        }
        fs::write(&self.path, data)
            .map_err(|e| VfsError::StorageUnavailable(format!("{}: {}", self.path.display(), e)))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Document held in memory
///
/// Clones share the same buffer, so a clone handed to a rebooted engine
/// sees what the previous one flushed.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: Arc<Mutex<Option<Vec<u8>>>>,
}

impl MemoryStore {
    /// Empty store, behaves like a missing file
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with `data`
    pub fn with_contents(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: Arc::new(Mutex::new(Some(data.into()))),
        }
    }

    /// Snapshot of the stored bytes
    pub fn contents(&self) -> Option<Vec<u8>> {
        self.data.lock().clone()
    }

    /// Stored bytes as text, lossily decoded
    pub fn contents_string(&self) -> Option<String> {
        self.contents()
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl Store for MemoryStore {
    fn load(&self) -> VfsResult<Option<Vec<u8>>> {
        Ok(self.contents())
    }

    fn save(&self, data: &[u8]) -> VfsResult<()> {
        *self.data.lock() = Some(data.to_vec());
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
