/*!
 * Virtual File System Module
 * Folder tree, path resolution and the mutation engine that keeps the
 * persisted mirror in step
 */

pub mod engine;
pub mod init;
pub mod paths;
pub mod tree;
pub mod types;

// Re-exports
pub use engine::{EditTarget, Vfs};
pub use init::{boot, BootOutcome, Booted};
pub use paths::{FileTarget, Resolved};
pub use tree::{File, FileId, Folder, FolderId, Tree};
pub use types::{EntityKind, Entry, FileType, VfsError, VfsResult};
