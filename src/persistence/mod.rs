/*!
 * Persistence Module
 * JSON document mirror of the tree and the storage it is flushed to
 */

pub mod document;
pub mod mirror;
pub mod store;

// Re-exports
pub use document::{Document, FileEntry, FolderEntry};
pub use mirror::Mirror;
pub use store::{LocalStore, MemoryStore, Store};
