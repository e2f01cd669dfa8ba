/*!
 * File Operations
 * Insertion, lookup, removal and content access for files
 */

use super::super::types::*;
use super::node::{split_full_name, terminate_lines, File, FileId, FolderId};
use super::Tree;

impl Tree {
    /// Insert a file under `parent`, keyed by its full name
    ///
    /// Fails with `AlreadyExists` and leaves the tree untouched when a
    /// sibling file has the same full name.
    pub fn add_child_file(
        &mut self,
        parent: FolderId,
        full_name: &str,
        contents: String,
    ) -> VfsResult<FileId> {
        let (name, extension) = split_full_name(full_name);
        self.add_child_file_parts(parent, name, extension, contents)
    }

    /// Insert a file whose base name and type are already separated
    ///
    /// Used by the loader so a stored `{"name": "a.b", "type": ""}` keeps
    /// its fields. Contents gain a final `\n` when missing.
    pub fn add_child_file_parts(
        &mut self,
        parent: FolderId,
        name: &str,
        extension: &str,
        contents: String,
    ) -> VfsResult<FileId> {
        let file = File {
            name: name.to_string(),
            extension: extension.to_string(),
            contents: terminate_lines(contents),
            folder: parent,
        };
        let key = file.full_name();

        if self.folder_ref(parent)?.file_names.contains_key(&key) {
            return Err(VfsError::already_exists(EntityKind::File, key));
        }

        let id = FileId(self.files.len());
        self.files.push(Some(file));

        let parent_folder = self.folder_mut(parent)?;
        parent_folder.files.push(id);
        parent_folder.file_names.insert(key, id);
        Ok(id)
    }

    pub fn child_file(&self, parent: FolderId, full_name: &str) -> Option<FileId> {
        self.folder(parent)
            .and_then(|folder| folder.child_file(full_name))
    }

    /// Remove a child file, returning the position it held among its siblings
    pub fn remove_child_file(&mut self, parent: FolderId, full_name: &str) -> VfsResult<usize> {
        let parent_folder = self.folder_mut(parent)?;
        let id = parent_folder
            .file_names
            .remove(full_name)
            .ok_or_else(|| VfsError::not_found(EntityKind::File, full_name))?;
        let position = parent_folder
            .files
            .iter()
            .position(|child| *child == id)
            .ok_or_else(|| VfsError::not_found(EntityKind::File, full_name))?;
        parent_folder.files.remove(position);

        if let Some(slot) = self.files.get_mut(id.0) {
            *slot = None;
        }
        Ok(position)
    }

    pub fn contents(&self, file: FileId) -> VfsResult<&str> {
        Ok(self.file_ref(file)?.contents())
    }

    /// Replace a file's contents wholesale, terminating the last line
    pub fn set_contents(&mut self, file: FileId, contents: String) -> VfsResult<()> {
        self.file_mut(file)?.contents = terminate_lines(contents);
        Ok(())
    }

    /// Owning folder and position among its sibling files
    pub fn file_position(&self, file: FileId) -> VfsResult<(FolderId, usize)> {
        let folder = self.file_ref(file)?.folder;
        let position = self
            .folder_ref(folder)?
            .files
            .iter()
            .position(|child| *child == file)
            .ok_or_else(|| VfsError::not_found(EntityKind::File, format!("#{}", file.0)))?;
        Ok((folder, position))
    }
}
