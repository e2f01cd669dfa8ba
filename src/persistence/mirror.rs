/*!
 * Persistence Mirror
 * Incremental replay of tree mutations into the persisted document
 *
 * Folder entries are addressed by sibling positions taken from the tree
 * (`Tree::address_of`), so each update walks straight to its target instead
 * of re-scanning names at every level. Name-based `locate` remains for
 * lookups by full path string.
 */

use tracing::debug;

use super::document::{Document, FileEntry, FolderEntry};
use crate::core::json;
use crate::core::limits::{PATH_SEPARATOR, ROOT_FOLDER};
use crate::vfs::types::{VfsError, VfsResult};

/// The document kept isomorphic to the in-memory tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mirror {
    document: Document,
}

impl Mirror {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn is_installed(&self) -> bool {
        self.document.is_installed
    }

    pub fn username(&self) -> &str {
        &self.document.username
    }

    /// Record the username and mark installation complete
    pub fn set_installation(&mut self, username: &str) {
        self.document.username = username.to_string();
        self.document.is_installed = true;
    }

    /// Find a folder entry by full path (`root/Home/Desktop`)
    ///
    /// Linear name scan per segment. The root itself has no entry.
    pub fn locate(&self, full_path: &str) -> Option<&FolderEntry> {
        let mut segments = full_path
            .split(PATH_SEPARATOR)
            .filter(|segment| !segment.is_empty())
            .peekable();
        if segments.peek() == Some(&ROOT_FOLDER) {
            segments.next();
        }

        let first = segments.next()?;
        let mut entry = self.document.root.iter().find(|e| e.name == first)?;
        for segment in segments {
            entry = entry.folders.iter().find(|e| e.name == segment)?;
        }
        Some(entry)
    }

    /// Folder entry at a positional address
    pub fn locate_at(&self, address: &[usize]) -> VfsResult<&FolderEntry> {
        let (first, rest) = address.split_first().ok_or(VfsError::RootProtected)?;
        let mut entry = self
            .document
            .root
            .get(*first)
            .ok_or_else(|| diverged(address))?;
        for index in rest {
            entry = entry.folders.get(*index).ok_or_else(|| diverged(address))?;
        }
        Ok(entry)
    }

    fn locate_at_mut(&mut self, address: &[usize]) -> VfsResult<&mut FolderEntry> {
        let (first, rest) = address.split_first().ok_or(VfsError::RootProtected)?;
        let mut entry = self
            .document
            .root
            .get_mut(*first)
            .ok_or_else(|| diverged(address))?;
        for index in rest {
            entry = entry
                .folders
                .get_mut(*index)
                .ok_or_else(|| diverged(address))?;
        }
        Ok(entry)
    }

    /// Append an empty folder entry under the folder at `parent`
    pub fn apply_folder_create(&mut self, parent: &[usize], name: &str) -> VfsResult<()> {
        self.locate_at_mut(parent)?
            .folders
            .push(FolderEntry::new(name));
        debug!(?parent, name, "mirror: folder created");
        Ok(())
    }

    /// Append a file entry under the folder at `parent`
    pub fn apply_file_create(&mut self, parent: &[usize], file: FileEntry) -> VfsResult<()> {
        debug!(?parent, name = %file.full_name(), "mirror: file created");
        self.locate_at_mut(parent)?.files.push(file);
        Ok(())
    }

    /// Remove the child folder at `position`, which must be named `name`
    pub fn apply_folder_remove(
        &mut self,
        parent: &[usize],
        position: usize,
        name: &str,
    ) -> VfsResult<()> {
        let entry = self.locate_at_mut(parent)?;
        match entry.folders.get(position) {
            Some(child) if child.name == name => {
                entry.folders.remove(position);
                debug!(?parent, position, name, "mirror: folder removed");
                Ok(())
            }
            _ => Err(VfsError::MirrorDiverged(format!(
                "no folder {name} at position {position}"
            ))),
        }
    }

    /// Remove the file at `position`, which must have full name `full_name`
    pub fn apply_file_remove(
        &mut self,
        parent: &[usize],
        position: usize,
        full_name: &str,
    ) -> VfsResult<()> {
        let entry = self.locate_at_mut(parent)?;
        match entry.files.get(position) {
            Some(file) if file.full_name() == full_name => {
                entry.files.remove(position);
                debug!(?parent, position, name = full_name, "mirror: file removed");
                Ok(())
            }
            _ => Err(VfsError::MirrorDiverged(format!(
                "no file {full_name} at position {position}"
            ))),
        }
    }

    /// Overwrite the contents of the file at `position`
    pub fn apply_content_update(
        &mut self,
        parent: &[usize],
        position: usize,
        full_name: &str,
        contents: &str,
    ) -> VfsResult<()> {
        let entry = self.locate_at_mut(parent)?;
        match entry.files.get_mut(position) {
            Some(file) if file.full_name() == full_name => {
                file.contents = contents.to_string();
                debug!(?parent, position, name = full_name, "mirror: contents updated");
                Ok(())
            }
            _ => Err(VfsError::MirrorDiverged(format!(
                "no file {full_name} at position {position}"
            ))),
        }
    }

    /// Human-readable document bytes, as written on flush
    pub fn to_pretty_json(&self) -> VfsResult<Vec<u8>> {
        let mut bytes = json::to_vec_pretty(&self.document)?;
        bytes.push(b'\n');
        Ok(bytes)
    }
}

fn diverged(address: &[usize]) -> VfsError {
    VfsError::MirrorDiverged(format!("no folder entry at {address:?}"))
}
