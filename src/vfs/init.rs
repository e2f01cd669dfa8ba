/*!
 * VFS Initialization
 * Decides at boot between the stored document, a corrupt one and none at all
 */

use std::sync::Arc;
use tracing::{info, warn};

use super::engine::Vfs;
use super::types::*;
use crate::core::json;
use crate::persistence::{Document, Store};

/// How the engine's initial state was obtained
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootOutcome {
    /// Stored document parsed and loaded
    Loaded,
    /// Stored document was malformed or unreadable; the default installation
    /// is in use and storage is left untouched until the next flush
    Recovered(VfsError),
    /// Nothing was stored; the default installation was written immediately
    FirstRun,
}

impl BootOutcome {
    /// Notice shown to the user before the prompt, if any
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            BootOutcome::Loaded => None,
            BootOutcome::Recovered(_) => {
                Some("Unable to parse os info data, erasing to default installation...")
            }
            BootOutcome::FirstRun => {
                Some("No file found for current os info data, creating default installation...")
            }
        }
    }
}

/// Engine plus the path taken to build it
#[derive(Debug)]
pub struct Booted {
    pub vfs: Vfs,
    pub outcome: BootOutcome,
}

/// Load the engine from `store`, falling back to the default installation
pub fn boot(store: Arc<dyn Store>) -> VfsResult<Booted> {
    info!(store = %store.describe(), "Loading filesystem document");

    let (document, outcome) = match store.load() {
        Ok(Some(bytes)) => match json::from_slice::<Document>(&bytes) {
            Ok(document) => (document, BootOutcome::Loaded),
            Err(e) => {
                let err = VfsError::from(e);
                warn!(error = %err, "Stored document is malformed, using default installation");
                (Document::default_install(), BootOutcome::Recovered(err))
            }
        },
        Ok(None) => {
            info!("No stored document, creating default installation");
            (Document::default_install(), BootOutcome::FirstRun)
        }
        Err(e) => {
            warn!(error = %e, "Storage unreadable, using default installation");
            (Document::default_install(), BootOutcome::Recovered(e))
        }
    };

    let vfs = Vfs::from_document(document, store)?;

    if outcome == BootOutcome::FirstRun {
        if let Err(e) = vfs.flush() {
            warn!(error = %e, "Could not write default installation");
        }
    }

    info!(
        folders = vfs.tree().folder_count(),
        files = vfs.tree().file_count(),
        installed = vfs.is_installed(),
        "Filesystem ready"
    );
    Ok(Booted { vfs, outcome })
}
