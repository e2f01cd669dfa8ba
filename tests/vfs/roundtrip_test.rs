/*!
 * Round-trip Property Tests
 * Random mutation sequences survive flush and reload unchanged
 */

use proptest::prelude::*;
use std::sync::Arc;

use shell_os_kernel::persistence::{Document, MemoryStore};
use shell_os_kernel::vfs::{boot, BootOutcome, FolderId, Vfs};

#[derive(Debug, Clone)]
enum Op {
    MakeFolder { at: usize, name: String },
    RemoveFolder { at: usize, pick: usize },
    MakeFile { at: usize, name: String, contents: String },
    RemoveFile { at: usize, pick: usize },
    Write { at: usize, pick: usize, contents: String },
}

fn name() -> impl Strategy<Value = String> {
    "[a-z]{1,4}(\\.[a-z]{1,3})?"
}

fn contents() -> impl Strategy<Value = String> {
    prop::collection::vec("[ -~]{0,12}", 0..4).prop_map(|lines| {
        lines.into_iter().map(|line| line + "\n").collect()
    })
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (any::<usize>(), name()).prop_map(|(at, name)| Op::MakeFolder { at, name }),
        1 => (any::<usize>(), any::<usize>()).prop_map(|(at, pick)| Op::RemoveFolder { at, pick }),
        3 => (any::<usize>(), name(), contents())
            .prop_map(|(at, name, contents)| Op::MakeFile { at, name, contents }),
        1 => (any::<usize>(), any::<usize>()).prop_map(|(at, pick)| Op::RemoveFile { at, pick }),
        2 => (any::<usize>(), any::<usize>(), contents())
            .prop_map(|(at, pick, contents)| Op::Write { at, pick, contents }),
    ]
}

/// Every live folder below the root, in depth-first order
fn mutable_folders(vfs: &Vfs) -> Vec<FolderId> {
    let mut out = Vec::new();
    let mut stack: Vec<FolderId> = vfs.tree().folder(vfs.root()).unwrap().folders().to_vec();
    while let Some(id) = stack.pop() {
        out.push(id);
        stack.extend(vfs.tree().folder(id).unwrap().folders().iter().copied());
    }
    out
}

fn apply(vfs: &mut Vfs, op: Op) {
    let folders = mutable_folders(vfs);
    if folders.is_empty() {
        return;
    }
    let folder_at = |at: usize| folders[at % folders.len()];

    // Failures such as duplicate names are expected and must leave both
    // representations untouched
    match op {
        Op::MakeFolder { at, name } => {
            let _ = vfs.create_folder(folder_at(at), &name);
        }
        Op::RemoveFolder { at, pick } => {
            let parent = folder_at(at);
            let children = vfs.tree().folder(parent).unwrap().folders().to_vec();
            if let Some(child) = children.get(pick % children.len().max(1)) {
                let name = vfs.tree().folder(*child).unwrap().name().to_string();
                vfs.remove_folder(parent, &name).unwrap();
            }
        }
        Op::MakeFile { at, name, contents } => {
            let _ = vfs.create_file_with_contents(folder_at(at), &name, contents);
        }
        Op::RemoveFile { at, pick } => {
            let parent = folder_at(at);
            let files = vfs.tree().folder(parent).unwrap().files().to_vec();
            if let Some(file) = files.get(pick % files.len().max(1)) {
                let full_name = vfs.tree().file(*file).unwrap().full_name();
                vfs.remove_file(parent, &full_name).unwrap();
            }
        }
        Op::Write { at, pick, contents } => {
            let files = vfs.tree().folder(folder_at(at)).unwrap().files().to_vec();
            if let Some(file) = files.get(pick % files.len().max(1)) {
                vfs.update_file_contents(*file, contents).unwrap();
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_flush_reload_is_isomorphic(ops in prop::collection::vec(op(), 0..40)) {
        let store = MemoryStore::new();
        let mut vfs = boot(Arc::new(store.clone())).unwrap().vfs;
        vfs.complete_installation("tester");

        for op in ops {
            apply(&mut vfs, op);
            let captured = Document::capture(vfs.tree(), vfs.is_installed(), vfs.username()).unwrap();
            prop_assert_eq!(vfs.document(), &captured);
        }
        vfs.flush().unwrap();

        let before = Document::capture(vfs.tree(), true, "tester").unwrap();
        let reloaded = boot(Arc::new(store)).unwrap();
        prop_assert_eq!(&reloaded.outcome, &BootOutcome::Loaded);
        let after = Document::capture(reloaded.vfs.tree(), true, "tester").unwrap();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn prop_distinct_creations_all_resolvable(count in 1usize..20) {
        let store = MemoryStore::new();
        let mut vfs = boot(Arc::new(store)).unwrap().vfs;
        let home = vfs.home().unwrap();
        let before = vfs.list(home).unwrap().len();

        for i in 0..count {
            let name = format!("dir{i}");
            vfs.create_folder(home, &name).unwrap();
            prop_assert!(vfs.resolve_path(home, &name).is_ok());
        }
        prop_assert_eq!(vfs.list(home).unwrap().len(), before + count);
    }
}
