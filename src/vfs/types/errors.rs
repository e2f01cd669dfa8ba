/*!
 * VFS Error Types
 * Structured, type-safe error handling for tree and storage operations
 */

use std::fmt;

use miette::Diagnostic;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::core::json::JsonError;

/// VFS operation result
pub type VfsResult<T> = Result<T, VfsError>;

/// What a `NotFound` or `AlreadyExists` error refers to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Folder,
    File,
    Package,
    Command,
}

impl EntityKind {
    /// Capitalized form for the start of a message
    pub const fn label(&self) -> &'static str {
        match self {
            EntityKind::Folder => "Folder",
            EntityKind::File => "File",
            EntityKind::Package => "Package",
            EntityKind::Command => "Command",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Folder => "folder",
            EntityKind::File => "file",
            EntityKind::Package => "package",
            EntityKind::Command => "command",
        };
        f.write_str(name)
    }
}

/// VFS errors with structured, type-safe error handling
///
/// None of these are fatal to the shell: the dispatcher reports them and
/// moves on to the next argument or command.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(rename_all = "snake_case", tag = "error", content = "details")]
pub enum VfsError {
    #[error("No such {kind}: {name}")]
    #[diagnostic(
        code(vfs::not_found),
        help("Check the spelling, or run `ls` to see what exists here.")
    )]
    NotFound {
        kind: EntityKind,
        #[serde(deserialize_with = "deserialize_nonempty_string")]
        name: String,
    },

    #[error("{} {} already exists", .kind.label(), .name)]
    #[diagnostic(code(vfs::already_exists))]
    AlreadyExists {
        kind: EntityKind,
        #[serde(deserialize_with = "deserialize_nonempty_string")]
        name: String,
    },

    #[error("Cannot modify root folder")]
    #[diagnostic(
        code(vfs::root_protected),
        help("Only the named top-level folders may be changed. Try `cd ~` first.")
    )]
    RootProtected,

    #[error("Already at topmost directory")]
    #[diagnostic(code(vfs::already_at_top))]
    AlreadyAtTop,

    #[error("Invalid name: {0}")]
    #[diagnostic(
        code(vfs::invalid_name),
        help("Names must be non-empty and cannot contain '/', '~' or '..'.")
    )]
    InvalidName(#[serde(deserialize_with = "deserialize_nonempty_string")] String),

    #[error("Invalid argument: {0}")]
    #[diagnostic(code(vfs::invalid_argument))]
    InvalidArgument(#[serde(deserialize_with = "deserialize_nonempty_string")] String),

    #[error("Storage corrupt: {0}")]
    #[diagnostic(
        code(vfs::storage_corrupt),
        help("The document will be replaced by the default installation on the next flush.")
    )]
    StorageCorrupt(#[serde(deserialize_with = "deserialize_nonempty_string")] String),

    #[error("Storage unavailable: {0}")]
    #[diagnostic(
        code(vfs::storage_unavailable),
        help("Changes are kept in memory but may not persist.")
    )]
    StorageUnavailable(#[serde(deserialize_with = "deserialize_nonempty_string")] String),

    #[error("Mirror diverged from tree: {0}")]
    #[diagnostic(code(vfs::mirror_diverged))]
    MirrorDiverged(#[serde(deserialize_with = "deserialize_nonempty_string")] String),
}

impl VfsError {
    pub fn not_found(kind: EntityKind, name: impl Into<String>) -> Self {
        VfsError::NotFound {
            kind,
            name: name.into(),
        }
    }

    pub fn already_exists(kind: EntityKind, name: impl Into<String>) -> Self {
        VfsError::AlreadyExists {
            kind,
            name: name.into(),
        }
    }
}

impl From<JsonError> for VfsError {
    fn from(err: JsonError) -> Self {
        match err {
            JsonError::Deserialization(msg) => VfsError::StorageCorrupt(msg),
            JsonError::Serialization(msg) => VfsError::StorageUnavailable(msg),
        }
    }
}

/// Deserialize and validate non-empty string for error messages
pub(super) fn deserialize_nonempty_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    if s.is_empty() {
        return Err(serde::de::Error::custom("error message must not be empty"));
    }
    Ok(s)
}
