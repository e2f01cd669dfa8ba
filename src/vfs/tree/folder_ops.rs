/*!
 * Folder Operations
 * Insertion, lookup, removal and listing of child folders
 */

use super::super::types::*;
use super::node::{Folder, FolderId};
use super::Tree;

impl Tree {
    /// Insert a new empty folder under `parent`
    ///
    /// Fails with `AlreadyExists` and leaves the tree untouched when a
    /// sibling folder has the same name.
    pub fn add_child_folder(&mut self, parent: FolderId, name: &str) -> VfsResult<FolderId> {
        if self.folder_ref(parent)?.folder_names.contains_key(name) {
            return Err(VfsError::already_exists(EntityKind::Folder, name));
        }

        let id = FolderId(self.folders.len());
        self.folders
            .push(Some(Folder::new(name.to_string(), Some(parent))));

        let parent_folder = self.folder_mut(parent)?;
        parent_folder.folders.push(id);
        parent_folder.folder_names.insert(name.to_string(), id);
        Ok(id)
    }

    pub fn child_folder(&self, parent: FolderId, name: &str) -> Option<FolderId> {
        self.folder(parent).and_then(|folder| folder.child_folder(name))
    }

    /// Remove a child folder and everything below it
    ///
    /// Returns the position the folder held among its siblings.
    pub fn remove_child_folder(&mut self, parent: FolderId, name: &str) -> VfsResult<usize> {
        let parent_folder = self.folder_mut(parent)?;
        let id = parent_folder
            .folder_names
            .remove(name)
            .ok_or_else(|| VfsError::not_found(EntityKind::Folder, name))?;
        let position = parent_folder
            .folders
            .iter()
            .position(|child| *child == id)
            .ok_or_else(|| VfsError::not_found(EntityKind::Folder, name))?;
        parent_folder.folders.remove(position);

        self.release_subtree(id);
        Ok(position)
    }

    /// Empty the arena slots of a detached subtree
    fn release_subtree(&mut self, id: FolderId) {
        let mut to_visit = vec![id];
        while let Some(current) = to_visit.pop() {
            let Some(folder) = self.folders.get_mut(current.0).and_then(Option::take) else {
                continue;
            };
            to_visit.extend(folder.folders);
            for file in folder.files {
                if let Some(slot) = self.files.get_mut(file.0) {
                    *slot = None;
                }
            }
        }
    }

    /// Folders first, then files, each in insertion order
    pub fn list_children(&self, id: FolderId) -> VfsResult<Vec<Entry>> {
        let folder = self.folder_ref(id)?;
        let mut entries = Vec::with_capacity(folder.folders.len() + folder.files.len());

        for child in &folder.folders {
            let child = self.folder_ref(*child)?;
            entries.push(Entry::new_unchecked(child.name.clone(), FileType::Folder));
        }
        for file in &folder.files {
            let file = self.file_ref(*file)?;
            entries.push(Entry::new_unchecked(file.full_name(), FileType::File));
        }
        Ok(entries)
    }

    /// Indented rendering of a folder and all of its descendants
    pub fn render_tree(&self, id: FolderId) -> VfsResult<String> {
        let mut out = String::new();
        self.render_into(id, 0, &mut out)?;
        Ok(out)
    }

    fn render_into(&self, id: FolderId, depth: usize, out: &mut String) -> VfsResult<()> {
        let folder = self.folder_ref(id)?;
        out.push_str(&"  ".repeat(depth));
        out.push_str(&folder.name);
        out.push_str("/\n");

        for child in &folder.folders {
            self.render_into(*child, depth + 1, out)?;
        }
        for file in &folder.files {
            out.push_str(&"  ".repeat(depth + 1));
            out.push_str(&self.file_ref(*file)?.full_name());
            out.push('\n');
        }
        Ok(())
    }
}
