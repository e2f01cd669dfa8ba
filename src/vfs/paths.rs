/*!
 * Path Resolution
 * Translates slash-separated relative paths into folders of the tree
 *
 * Rules, applied left to right per segment:
 * - `~` as the first segment jumps to the Home folder under the root
 * - `..` moves to the parent; at the root it is a reported no-op
 * - anything else is a child folder lookup, failing with the original path
 */

use super::tree::{FolderId, Tree};
use super::types::*;
use crate::core::limits::{HOME_FOLDER, HOME_SEGMENT, PARENT_SEGMENT, PATH_SEPARATOR};

/// Folder reached by a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub folder: FolderId,
    /// Non-fatal problems met on the way, e.g. `..` at the root
    pub notices: Vec<VfsError>,
}

/// Folder and file name reached by a path whose last segment names a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTarget {
    pub folder: FolderId,
    pub file_name: String,
    pub notices: Vec<VfsError>,
}

/// Non-empty segments of a path (`a//b/` is `a`, `b`)
pub fn segments(path: &str) -> Vec<&str> {
    path.split(PATH_SEPARATOR)
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// The well-known Home folder directly under the root
pub fn home_folder(tree: &Tree) -> Option<FolderId> {
    tree.child_folder(tree.root(), HOME_FOLDER)
}

/// Resolve `path` starting from `from`
///
/// An empty path resolves to `from` itself.
pub fn resolve_folder(tree: &Tree, from: FolderId, path: &str) -> VfsResult<Resolved> {
    walk(tree, from, &segments(path), path)
}

/// Resolve every segment but the last as a folder path; the last names a file
pub fn resolve_file_target(tree: &Tree, from: FolderId, path: &str) -> VfsResult<FileTarget> {
    let all = segments(path);
    let Some((file_name, folder_segments)) = all.split_last() else {
        return Err(VfsError::InvalidName("no file name provided".into()));
    };
    Entry::validate_name(file_name)?;

    let folder_path = folder_segments.join(&PATH_SEPARATOR.to_string());
    let resolved = walk(tree, from, folder_segments, &folder_path)?;
    Ok(FileTarget {
        folder: resolved.folder,
        file_name: file_name.to_string(),
        notices: resolved.notices,
    })
}

fn walk(tree: &Tree, from: FolderId, segments: &[&str], reported: &str) -> VfsResult<Resolved> {
    tree.folder_ref(from)?;

    let missing = || VfsError::not_found(EntityKind::Folder, reported);
    let mut current = from;
    let mut notices = Vec::new();

    for (index, segment) in segments.iter().enumerate() {
        if index == 0 && *segment == HOME_SEGMENT {
            current = home_folder(tree).ok_or_else(missing)?;
            continue;
        }
        if *segment == PARENT_SEGMENT {
            match tree.parent(current) {
                Some(parent) => current = parent,
                None => notices.push(VfsError::AlreadyAtTop),
            }
            continue;
        }
        current = tree.child_folder(current, segment).ok_or_else(missing)?;
    }

    Ok(Resolved {
        folder: current,
        notices,
    })
}
