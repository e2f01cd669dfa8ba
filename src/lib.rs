/*!
 * Shell OS Kernel Library
 * Virtual filesystem, JSON persistence and the interactive shell
 */

pub mod core;
pub mod monitoring;
pub mod packages;
pub mod persistence;
pub mod shell;
pub mod vfs;

// Re-exports
pub use crate::core::{JsonError, ShellConfig};
pub use monitoring::init_tracing;
pub use packages::{MemorySource, PackageSource};
pub use persistence::{Document, LocalStore, MemoryStore, Mirror, Store};
pub use shell::{Flow, Shell, ShellError, ShellResult};
pub use vfs::{
    boot, BootOutcome, Booted, EntityKind, Entry, FileId, FileType, FolderId, Vfs, VfsError,
    VfsResult,
};
