/*!
 * Tree Tests
 * Child insertion, lookup and removal on the arena tree
 */

use pretty_assertions::assert_eq;
use shell_os_kernel::vfs::{EntityKind, FileType, Tree, VfsError};

#[test]
fn test_distinct_children_all_resolvable() {
    let mut tree = Tree::new();
    let root = tree.root();
    let home = tree.add_child_folder(root, "Home").unwrap();

    let names = ["a", "b", "c", "d"];
    for name in names {
        tree.add_child_folder(home, name).unwrap();
        assert!(tree.child_folder(home, name).is_some());
    }
    tree.add_child_file(home, "notes.txt", String::new()).unwrap();

    let folder = tree.folder(home).unwrap();
    assert_eq!(folder.folders().len(), names.len());
    assert_eq!(folder.files().len(), 1);
}

#[test]
fn test_duplicate_sibling_leaves_tree_unchanged() {
    let mut tree = Tree::new();
    let root = tree.root();
    let home = tree.add_child_folder(root, "Home").unwrap();
    tree.add_child_folder(home, "a").unwrap();
    tree.add_child_file(home, "a.txt", "x\n".into()).unwrap();

    let folders_before = tree.folder_count();
    assert_eq!(
        tree.add_child_folder(home, "a").unwrap_err(),
        VfsError::already_exists(EntityKind::Folder, "a")
    );
    assert_eq!(
        tree.add_child_file(home, "a.txt", String::new()).unwrap_err(),
        VfsError::already_exists(EntityKind::File, "a.txt")
    );
    assert_eq!(tree.folder_count(), folders_before);

    let file = tree.child_file(home, "a.txt").unwrap();
    assert_eq!(tree.contents(file).unwrap(), "x\n");
}

#[test]
fn test_folder_and_file_may_share_a_name() {
    let mut tree = Tree::new();
    let root = tree.root();
    let home = tree.add_child_folder(root, "Home").unwrap();

    tree.add_child_folder(home, "notes").unwrap();
    tree.add_child_file(home, "notes", String::new()).unwrap();

    let entries = tree.list_children(home).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].file_type, FileType::Folder);
    assert_eq!(entries[1].file_type, FileType::File);
}

#[test]
fn test_removal_releases_subtree() {
    let mut tree = Tree::new();
    let root = tree.root();
    let home = tree.add_child_folder(root, "Home").unwrap();
    let a = tree.add_child_folder(home, "a").unwrap();
    let b = tree.add_child_folder(a, "b").unwrap();
    let file = tree.add_child_file(b, "deep.txt", String::new()).unwrap();

    tree.remove_child_folder(home, "a").unwrap();
    assert!(tree.folder(a).is_none());
    assert!(tree.folder(b).is_none());
    assert!(tree.file(file).is_none());
    assert_eq!(tree.folder_count(), 2);

    assert_eq!(
        tree.remove_child_folder(home, "a").unwrap_err(),
        VfsError::not_found(EntityKind::Folder, "a")
    );
}

#[test]
fn test_full_path_and_parent() {
    let mut tree = Tree::new();
    let root = tree.root();
    let home = tree.add_child_folder(root, "Home").unwrap();
    let desktop = tree.add_child_folder(home, "Desktop").unwrap();

    assert_eq!(tree.full_path(desktop).unwrap(), "root/Home/Desktop");
    assert_eq!(tree.full_path(root).unwrap(), "root");
    assert_eq!(tree.parent(desktop), Some(home));
    assert_eq!(tree.parent(root), None);
}

#[test]
fn test_file_name_splits_at_last_dot() {
    let mut tree = Tree::new();
    let root = tree.root();
    let home = tree.add_child_folder(root, "Home").unwrap();

    let archive = tree.add_child_file(home, "backup.tar.gz", String::new()).unwrap();
    let file = tree.file(archive).unwrap();
    assert_eq!(file.name(), "backup.tar");
    assert_eq!(file.extension(), "gz");
    assert_eq!(file.full_name(), "backup.tar.gz");

    let plain = tree.add_child_file(home, "Makefile", String::new()).unwrap();
    assert_eq!(tree.file(plain).unwrap().extension(), "");
    assert_eq!(tree.file(plain).unwrap().full_name(), "Makefile");
}
