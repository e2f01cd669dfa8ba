/*!
 * VFS File Types
 * Kind of node a directory listing entry refers to
 */

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileType {
    #[default]
    File,
    Folder,
}

impl FileType {
    /// Suffix appended to the name in listings
    #[inline]
    #[must_use]
    pub const fn suffix(&self) -> &'static str {
        match self {
            FileType::File => "",
            FileType::Folder => "/",
        }
    }
}
