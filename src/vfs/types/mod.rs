/*!
 * VFS Types
 * Shared types for tree operations
 */

mod entry;
mod errors;
mod file_type;

pub use entry::Entry;
pub use errors::{EntityKind, VfsError, VfsResult};
pub use file_type::FileType;
