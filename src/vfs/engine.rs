/*!
 * VFS Engine
 * Tree mutations paired with their mirror updates, plus flushing to storage
 *
 * The tree is the only source of truth. Every successful mutation replays
 * into the mirror in the same call; if the mirror ever rejects an update the
 * mirror is rebuilt from the tree rather than left diverged.
 */

use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

use super::paths::{self, FileTarget, Resolved};
use super::tree::{compose_full_name, split_full_name, FileId, FolderId, Tree};
use super::types::*;
use crate::persistence::{Document, FileEntry, Mirror, Store};

/// File opened for editing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditTarget {
    pub file: FileId,
    /// The file did not exist and was created empty
    pub created: bool,
    pub notices: Vec<VfsError>,
}

/// Virtual filesystem engine
pub struct Vfs {
    tree: Tree,
    mirror: Mirror,
    store: Arc<dyn Store>,
}

impl Vfs {
    /// Build the tree from a loaded document
    ///
    /// The mirror is captured from the resulting tree, so anything the
    /// loader skipped disappears from storage at the next flush.
    pub fn from_document(document: Document, store: Arc<dyn Store>) -> VfsResult<Self> {
        let tree = document.build_tree();
        let captured = Document::capture(&tree, document.is_installed, &document.username)?;
        Ok(Self {
            tree,
            mirror: Mirror::new(captured),
            store,
        })
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn mirror(&self) -> &Mirror {
        &self.mirror
    }

    pub fn document(&self) -> &Document {
        self.mirror.document()
    }

    pub fn root(&self) -> FolderId {
        self.tree.root()
    }

    pub fn home(&self) -> Option<FolderId> {
        paths::home_folder(&self.tree)
    }

    pub fn is_installed(&self) -> bool {
        self.mirror.is_installed()
    }

    pub fn username(&self) -> &str {
        self.mirror.username()
    }

    /// Store the username and mark the installation complete
    pub fn complete_installation(&mut self, username: &str) {
        info!(username, "Installation complete");
        self.mirror.set_installation(username);
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn resolve_path(&self, from: FolderId, path: &str) -> VfsResult<Resolved> {
        paths::resolve_folder(&self.tree, from, path)
    }

    pub fn resolve_file_target(&self, from: FolderId, path: &str) -> VfsResult<FileTarget> {
        paths::resolve_file_target(&self.tree, from, path)
    }

    pub fn list(&self, folder: FolderId) -> VfsResult<Vec<Entry>> {
        self.tree.list_children(folder)
    }

    pub fn full_path(&self, folder: FolderId) -> VfsResult<String> {
        self.tree.full_path(folder)
    }

    pub fn file_contents(&self, file: FileId) -> VfsResult<&str> {
        self.tree.contents(file)
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Create an empty folder under `parent`
    #[instrument(level = "debug", skip(self))]
    #[must_use = "a failed mutation leaves the tree unchanged and must be reported"]
    pub fn create_folder(&mut self, parent: FolderId, name: &str) -> VfsResult<FolderId> {
        self.ensure_mutable(parent)?;
        Entry::validate_name(name)?;

        let id = self.tree.add_child_folder(parent, name)?;
        let address = self.tree.address_of(parent)?;
        self.sync(|mirror| mirror.apply_folder_create(&address, name))?;
        Ok(id)
    }

    /// Remove a folder and its whole subtree
    #[instrument(level = "debug", skip(self))]
    #[must_use = "a failed mutation leaves the tree unchanged and must be reported"]
    pub fn remove_folder(&mut self, parent: FolderId, name: &str) -> VfsResult<()> {
        self.ensure_mutable(parent)?;

        let position = self.tree.remove_child_folder(parent, name)?;
        let address = self.tree.address_of(parent)?;
        self.sync(|mirror| mirror.apply_folder_remove(&address, position, name))
    }

    /// Create an empty file under `parent`
    pub fn create_file(&mut self, parent: FolderId, full_name: &str) -> VfsResult<FileId> {
        self.create_file_with_contents(parent, full_name, String::new())
    }

    /// Create a file holding `contents` under `parent`
    ///
    /// A missing final `\n` is added, as for every stored file.
    #[instrument(level = "debug", skip(self, contents))]
    #[must_use = "a failed mutation leaves the tree unchanged and must be reported"]
    pub fn create_file_with_contents(
        &mut self,
        parent: FolderId,
        full_name: &str,
        contents: impl Into<String>,
    ) -> VfsResult<FileId> {
        self.ensure_mutable(parent)?;
        Entry::validate_name(full_name)?;

        let id = self.tree.add_child_file(parent, full_name, contents.into())?;
        let address = self.tree.address_of(parent)?;
        let entry = FileEntry::new(full_name, self.tree.contents(id)?);
        self.sync(|mirror| mirror.apply_file_create(&address, entry))?;
        Ok(id)
    }

    /// Remove a file by full name
    #[instrument(level = "debug", skip(self))]
    #[must_use = "a failed mutation leaves the tree unchanged and must be reported"]
    pub fn remove_file(&mut self, parent: FolderId, full_name: &str) -> VfsResult<()> {
        self.ensure_mutable(parent)?;
        let (name, extension) = split_full_name(full_name);
        let key = compose_full_name(name, extension);

        let position = self.tree.remove_child_file(parent, &key)?;
        let address = self.tree.address_of(parent)?;
        self.sync(|mirror| mirror.apply_file_remove(&address, position, &key))
    }

    /// Replace a file's contents
    #[instrument(level = "debug", skip(self, contents))]
    #[must_use = "a failed mutation leaves the tree unchanged and must be reported"]
    pub fn update_file_contents(&mut self, file: FileId, contents: String) -> VfsResult<()> {
        let (folder, position) = self.tree.file_position(file)?;
        let full_name = self.tree.file_ref(file)?.full_name();
        self.tree.set_contents(file, contents)?;

        let address = self.tree.address_of(folder)?;
        let contents = self.tree.contents(file)?.to_string();
        self.sync(|mirror| mirror.apply_content_update(&address, position, &full_name, &contents))
    }

    /// Resolve a path naming a file, creating the file empty if absent
    pub fn open_for_edit(&mut self, from: FolderId, path: &str) -> VfsResult<EditTarget> {
        let target = self.resolve_file_target(from, path)?;
        let (name, extension) = split_full_name(&target.file_name);
        let key = compose_full_name(name, extension);

        if let Some(file) = self.tree.child_file(target.folder, &key) {
            return Ok(EditTarget {
                file,
                created: false,
                notices: target.notices,
            });
        }

        let file = self.create_file(target.folder, &target.file_name)?;
        Ok(EditTarget {
            file,
            created: true,
            notices: target.notices,
        })
    }

    /// Write the whole document to storage
    #[must_use = "an unreported flush failure means changes may not persist"]
    pub fn flush(&self) -> VfsResult<()> {
        let bytes = self.mirror.to_pretty_json()?;
        self.store.save(&bytes)?;
        debug!(store = %self.store.describe(), bytes = bytes.len(), "Flushed document");
        Ok(())
    }

    /// Rebuild the mirror from the tree
    pub fn resync(&mut self) -> VfsResult<()> {
        let document =
            Document::capture(&self.tree, self.mirror.is_installed(), self.mirror.username())?;
        self.mirror = Mirror::new(document);
        Ok(())
    }

    fn ensure_mutable(&self, parent: FolderId) -> VfsResult<()> {
        self.tree.folder_ref(parent)?;
        if self.tree.is_root(parent) {
            return Err(VfsError::RootProtected);
        }
        Ok(())
    }

    fn sync<F>(&mut self, apply: F) -> VfsResult<()>
    where
        F: FnOnce(&mut Mirror) -> VfsResult<()>,
    {
        if let Err(e) = apply(&mut self.mirror) {
            error!(error = %e, "Mirror update failed, rebuilding from tree");
            self.resync()?;
        }
        Ok(())
    }
}

impl fmt::Debug for Vfs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vfs")
            .field("tree", &self.tree)
            .field("mirror", &self.mirror)
            .field("store", &self.store.describe())
            .finish()
    }
}
