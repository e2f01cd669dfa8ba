/*!
 * In-Memory Folder Tree
 * Arena of folders and files, the single mutable source of truth
 */

mod file_ops;
mod folder_ops;
mod node;

pub use node::{compose_full_name, split_full_name, File, FileId, Folder, FolderId};

use super::types::*;
use crate::core::limits::{PATH_SEPARATOR, ROOT_FOLDER};

/// Folder/file tree with a protected root
///
/// Nodes live in slot vectors addressed by `FolderId`/`FileId`. Removing a
/// folder empties the slots of its whole subtree.
#[derive(Debug, Clone)]
pub struct Tree {
    pub(super) folders: Vec<Option<Folder>>,
    pub(super) files: Vec<Option<File>>,
    pub(super) root: FolderId,
}

impl Tree {
    /// Create a tree holding only the root folder
    pub fn new() -> Self {
        Self {
            folders: vec![Some(Folder::new(ROOT_FOLDER.to_string(), None))],
            files: Vec::new(),
            root: FolderId(0),
        }
    }

    pub fn root(&self) -> FolderId {
        self.root
    }

    pub fn is_root(&self, id: FolderId) -> bool {
        id == self.root
    }

    pub fn folder(&self, id: FolderId) -> Option<&Folder> {
        self.folders.get(id.0).and_then(Option::as_ref)
    }

    pub fn file(&self, id: FileId) -> Option<&File> {
        self.files.get(id.0).and_then(Option::as_ref)
    }

    /// Live folder or `NotFound`
    pub fn folder_ref(&self, id: FolderId) -> VfsResult<&Folder> {
        self.folder(id).ok_or_else(|| detached_folder(id))
    }

    /// Live file or `NotFound`
    pub fn file_ref(&self, id: FileId) -> VfsResult<&File> {
        self.file(id).ok_or_else(|| detached_file(id))
    }

    pub(super) fn folder_mut(&mut self, id: FolderId) -> VfsResult<&mut Folder> {
        self.folders
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or_else(|| detached_folder(id))
    }

    pub(super) fn file_mut(&mut self, id: FileId) -> VfsResult<&mut File> {
        self.files
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or_else(|| detached_file(id))
    }

    pub fn parent(&self, id: FolderId) -> Option<FolderId> {
        self.folder(id).and_then(Folder::parent)
    }

    /// Names from the root down to `id`, joined with `/` (`root/Home/Desktop`)
    pub fn full_path(&self, id: FolderId) -> VfsResult<String> {
        let mut names = Vec::new();
        let mut current = Some(id);
        while let Some(folder_id) = current {
            let folder = self.folder_ref(folder_id)?;
            names.push(folder.name.as_str());
            current = folder.parent;
        }
        names.reverse();
        Ok(names.join(&PATH_SEPARATOR.to_string()))
    }

    /// Sibling positions from the root down to `id`
    ///
    /// The root's address is empty; a top-level folder's address is its index
    /// among the root's children. This is how the persistence mirror is
    /// addressed without repeating name lookups.
    pub fn address_of(&self, id: FolderId) -> VfsResult<Vec<usize>> {
        let mut address = Vec::new();
        let mut current = id;
        while let Some(parent) = self.folder_ref(current)?.parent {
            let position = self
                .folder_ref(parent)?
                .folders
                .iter()
                .position(|child| *child == current)
                .ok_or_else(|| detached_folder(current))?;
            address.push(position);
            current = parent;
        }
        address.reverse();
        Ok(address)
    }

    /// Number of live folders, root included
    pub fn folder_count(&self) -> usize {
        self.folders.iter().flatten().count()
    }

    /// Number of live files
    pub fn file_count(&self) -> usize {
        self.files.iter().flatten().count()
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

fn detached_folder(id: FolderId) -> VfsError {
    VfsError::not_found(EntityKind::Folder, format!("#{}", id.0))
}

fn detached_file(id: FileId) -> VfsError {
    VfsError::not_found(EntityKind::File, format!("#{}", id.0))
}
