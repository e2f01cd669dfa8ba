/*!
 * Tree Node Types
 * Folders and files held in the tree arena
 */

use ahash::RandomState;
use std::collections::HashMap;

use crate::core::limits::EXTENSION_SEPARATOR;

/// Handle to a folder slot in the tree arena
///
/// Handles are never reused, so a handle to a removed folder stays dead
/// rather than aliasing a newer node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FolderId(pub(super) usize);

/// Handle to a file slot in the tree arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(pub(super) usize);

/// Folder node
///
/// Children are kept in insertion order; the name maps index the same
/// handles for lookup. The parent link is a plain handle, ownership runs
/// from the arena only.
#[derive(Debug, Clone)]
pub struct Folder {
    pub(super) name: String,
    pub(super) parent: Option<FolderId>,
    pub(super) folders: Vec<FolderId>,
    pub(super) files: Vec<FileId>,
    pub(super) folder_names: HashMap<String, FolderId, RandomState>,
    pub(super) file_names: HashMap<String, FileId, RandomState>,
}

impl Folder {
    pub(super) fn new(name: String, parent: Option<FolderId>) -> Self {
        Self {
            name,
            parent,
            folders: Vec::new(),
            files: Vec::new(),
            folder_names: HashMap::default(),
            file_names: HashMap::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<FolderId> {
        self.parent
    }

    /// Only the tree root has no parent
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Child folders in insertion order
    pub fn folders(&self) -> &[FolderId] {
        &self.folders
    }

    /// Child files in insertion order
    pub fn files(&self) -> &[FileId] {
        &self.files
    }

    pub fn child_folder(&self, name: &str) -> Option<FolderId> {
        self.folder_names.get(name).copied()
    }

    pub fn child_file(&self, full_name: &str) -> Option<FileId> {
        self.file_names.get(full_name).copied()
    }
}

/// File node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    pub(super) name: String,
    pub(super) extension: String,
    pub(super) contents: String,
    pub(super) folder: FolderId,
}

impl File {
    /// Base name without the extension
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The file's type, empty when the name has no dot
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Contents as one string, each line ending in `\n`
    pub fn contents(&self) -> &str {
        &self.contents
    }

    /// Folder that owns this file
    pub fn folder(&self) -> FolderId {
        self.folder
    }

    /// Unique key among sibling files
    pub fn full_name(&self) -> String {
        compose_full_name(&self.name, &self.extension)
    }

    pub fn line_count(&self) -> usize {
        self.contents.lines().count()
    }
}

/// Split a user-supplied file name at its last dot
///
/// `a.b.c` has base `a.b` and type `c`; a name without a dot has an empty type.
pub fn split_full_name(full_name: &str) -> (&str, &str) {
    full_name
        .rsplit_once(EXTENSION_SEPARATOR)
        .unwrap_or((full_name, ""))
}

/// Append `\n` to non-empty contents whose last line is unterminated
pub fn terminate_lines(mut contents: String) -> String {
    if !contents.is_empty() && !contents.ends_with('\n') {
        contents.push('\n');
    }
    contents
}

/// Inverse of `split_full_name`
pub fn compose_full_name(name: &str, extension: &str) -> String {
    if extension.is_empty() {
        name.to_string()
    } else {
        format!("{name}{EXTENSION_SEPARATOR}{extension}")
    }
}
