/*!
 * VFS Directory Entry
 * Listing entries and the name rules shared by folders and files
 */

use super::errors::VfsError;
use super::file_type::FileType;
use crate::core::limits::{HOME_SEGMENT, PARENT_SEGMENT, PATH_SEPARATOR};
use serde::{Deserialize, Serialize};

/// Child of a folder as reported by `list_children`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub name: String,
    #[serde(default)]
    pub file_type: FileType,
}

impl Entry {
    /// Create a new entry without validation (names come from the tree)
    pub(crate) fn new_unchecked(name: String, file_type: FileType) -> Self {
        Self { name, file_type }
    }

    #[inline]
    #[must_use]
    pub const fn is_folder(&self) -> bool {
        matches!(self.file_type, FileType::Folder)
    }

    #[inline]
    #[must_use]
    pub const fn is_file(&self) -> bool {
        matches!(self.file_type, FileType::File)
    }

    /// Name as printed by `ls`, folders carry a trailing `/`
    pub fn display_name(&self) -> String {
        format!("{}{}", self.name, self.file_type.suffix())
    }

    /// Validate a folder or file name before it enters the tree
    ///
    /// Rejects empty names, separators, NUL bytes and the reserved
    /// `~`/`..`/`.` segments, none of which could be addressed by a path later.
    #[must_use = "validation result must be checked"]
    pub fn validate_name(name: &str) -> Result<(), VfsError> {
        if name.is_empty() {
            return Err(VfsError::InvalidName("name cannot be empty".into()));
        }
        if name.contains('\0') {
            return Err(VfsError::InvalidName(format!(
                "{}: name cannot contain null bytes",
                name.escape_debug()
            )));
        }
        if name.contains(PATH_SEPARATOR) || name.contains('\\') {
            return Err(VfsError::InvalidName(format!(
                "{name}: name cannot contain path separators"
            )));
        }
        if name == HOME_SEGMENT || name == PARENT_SEGMENT || name == "." {
            return Err(VfsError::InvalidName(format!("{name}: reserved path segment")));
        }
        Ok(())
    }
}
