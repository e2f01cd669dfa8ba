/*!
 * Persisted Document
 * Serde model of the on-disk JSON mirror and its conversion to/from the tree
 */

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::limits::{DESKTOP_FOLDER, HOME_FOLDER, PACKAGES_FOLDER};
use crate::core::serde::lines_or_string;
use crate::vfs::tree::{compose_full_name, split_full_name, FolderId, Tree};
use crate::vfs::types::{Entry, VfsResult};

/// Top-level storage document
///
/// Carries installation metadata next to the top-level folders. Keys are
/// written in declaration order: `isInstalled`, `username`, `root`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "isInstalled", default)]
    pub is_installed: bool,
    #[serde(default)]
    pub username: String,
    pub root: Vec<FolderEntry>,
}

/// One folder and everything below it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderEntry {
    pub name: String,
    #[serde(default)]
    pub folders: Vec<FolderEntry>,
    #[serde(default)]
    pub files: Vec<FileEntry>,
}

/// One file; `type` is the part after the last dot of the full name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub name: String,
    #[serde(rename = "type", default)]
    pub extension: String,
    #[serde(with = "lines_or_string", default)]
    pub contents: String,
}

impl Document {
    /// Built-in installation: `Home` holding an empty `Desktop`, plus `packages`
    pub fn default_install() -> Self {
        let mut home = FolderEntry::new(HOME_FOLDER);
        home.folders.push(FolderEntry::new(DESKTOP_FOLDER));

        Self {
            is_installed: false,
            username: String::new(),
            root: vec![home, FolderEntry::new(PACKAGES_FOLDER)],
        }
    }

    /// Snapshot a tree into document form
    pub fn capture(tree: &Tree, is_installed: bool, username: &str) -> VfsResult<Self> {
        let root = tree
            .folder_ref(tree.root())?
            .folders()
            .iter()
            .map(|id| FolderEntry::capture(tree, *id))
            .collect::<VfsResult<Vec<_>>>()?;

        Ok(Self {
            is_installed,
            username: username.to_string(),
            root,
        })
    }

    /// Build a tree in document order
    ///
    /// Entries with invalid names, and repeats of a sibling's name, are
    /// skipped with a warning so a hand-edited document still loads.
    pub fn build_tree(&self) -> Tree {
        let mut tree = Tree::new();
        let root = tree.root();
        for entry in &self.root {
            entry.attach(&mut tree, root);
        }
        tree
    }
}

impl FolderEntry {
    /// Empty folder entry
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            folders: Vec::new(),
            files: Vec::new(),
        }
    }

    fn capture(tree: &Tree, id: FolderId) -> VfsResult<Self> {
        let folder = tree.folder_ref(id)?;
        let folders = folder
            .folders()
            .iter()
            .map(|child| FolderEntry::capture(tree, *child))
            .collect::<VfsResult<Vec<_>>>()?;
        let files = folder
            .files()
            .iter()
            .map(|file| {
                let file = tree.file_ref(*file)?;
                Ok(FileEntry {
                    name: file.name().to_string(),
                    extension: file.extension().to_string(),
                    contents: file.contents().to_string(),
                })
            })
            .collect::<VfsResult<Vec<_>>>()?;

        Ok(Self {
            name: folder.name().to_string(),
            folders,
            files,
        })
    }

    fn attach(&self, tree: &mut Tree, parent: FolderId) {
        if let Err(e) = Entry::validate_name(&self.name) {
            warn!(name = %self.name, error = %e, "Skipping folder with invalid name");
            return;
        }
        let id = match tree.add_child_folder(parent, &self.name) {
            Ok(id) => id,
            Err(e) => {
                warn!(name = %self.name, error = %e, "Skipping duplicate folder");
                return;
            }
        };

        for folder in &self.folders {
            folder.attach(tree, id);
        }
        for file in &self.files {
            let full_name = file.full_name();
            if let Err(e) = Entry::validate_name(&full_name) {
                warn!(name = %full_name, error = %e, "Skipping file with invalid name");
                continue;
            }
            if let Err(e) =
                tree.add_child_file_parts(id, &file.name, &file.extension, file.contents.clone())
            {
                warn!(name = %full_name, error = %e, "Skipping duplicate file");
            }
        }
    }
}

impl FileEntry {
    /// Entry for a file given by its full name
    pub fn new(full_name: &str, contents: impl Into<String>) -> Self {
        let (name, extension) = split_full_name(full_name);
        Self {
            name: name.to_string(),
            extension: extension.to_string(),
            contents: contents.into(),
        }
    }

    pub fn full_name(&self) -> String {
        compose_full_name(&self.name, &self.extension)
    }
}
