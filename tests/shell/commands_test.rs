/*!
 * Command Dispatcher Tests
 * Drives the shell with scripted input against an in-memory store
 */

use mockall::mock;
use pretty_assertions::assert_eq;
use std::io::Cursor;
use std::sync::Arc;

use shell_os_kernel::persistence::{Document, MemoryStore, Store};
use shell_os_kernel::vfs::{VfsError, VfsResult};
use shell_os_kernel::{Flow, MemorySource, Shell, ShellConfig};

mock! {
    BrokenStore {}
    impl Store for BrokenStore {
        fn load(&self) -> VfsResult<Option<Vec<u8>>>;
        fn save(&self, data: &[u8]) -> VfsResult<()>;
        fn describe(&self) -> String;
    }
}

type TestShell = Shell<Cursor<Vec<u8>>, Vec<u8>>;

fn installed_document() -> Vec<u8> {
    let mut document = Document::default_install();
    document.is_installed = true;
    document.username = "ada".into();
    serde_json::to_vec(&document).unwrap()
}

fn installed_store() -> MemoryStore {
    MemoryStore::with_contents(installed_document())
}

fn shell_with(store: &MemoryStore, input: &str) -> TestShell {
    Shell::boot(
        ShellConfig::default(),
        Arc::new(store.clone()),
        Box::new(MemorySource::new()),
        Cursor::new(input.as_bytes().to_vec()),
        Vec::new(),
    )
    .unwrap()
}

fn output(shell: &TestShell) -> String {
    String::from_utf8_lossy(shell.output()).into_owned()
}

fn stored(store: &MemoryStore) -> Document {
    serde_json::from_slice(&store.contents().unwrap()).unwrap()
}

#[test]
fn test_first_boot_prompts_for_username() {
    let store = MemoryStore::new();
    let mut shell = shell_with(&store, "grace\nshutdown\n");
    shell.run().unwrap();

    let out = output(&shell);
    assert!(out.contains("No file found for current os info data, creating default installation..."));
    assert!(out.contains("Enter username: "));
    assert!(out.contains("Set username to grace"));
    assert!(out.contains("[grace@KtOS ~]$ "));
    assert!(out.contains("Shutting down..."));

    let document = stored(&store);
    assert!(document.is_installed);
    assert_eq!(document.username, "grace");
}

#[test]
fn test_installed_boot_skips_prompt() {
    let store = installed_store();
    let shell = shell_with(&store, "");
    assert!(!output(&shell).contains("Enter username"));
    assert_eq!(shell.vfs().username(), "ada");
    assert_eq!(Some(shell.cwd()), shell.vfs().home());
}

#[test]
fn test_cd_home_then_ls_lists_desktop() {
    let store = MemoryStore::new();
    let mut shell = shell_with(&store, "ada\n");

    shell.execute("cd ..").unwrap();
    assert_eq!(shell.cwd(), shell.vfs().root());
    shell.execute("cd ~").unwrap();
    shell.execute("ls").unwrap();

    assert!(output(&shell).ends_with("Desktop/\n"));
}

#[test]
fn test_mkdir_duplicate_arguments() {
    let store = installed_store();
    let mut shell = shell_with(&store, "");

    shell.execute("mkdir a a").unwrap();
    assert!(output(&shell).ends_with("Folder a already exists\n"));

    let home = &stored(&store).root[0];
    let count = home.folders.iter().filter(|f| f.name == "a").count();
    assert_eq!(count, 1);
}

#[test]
fn test_root_protected_message() {
    let store = installed_store();
    let mut shell = shell_with(&store, "");

    shell.execute("cd ..").unwrap();
    shell.execute("mkdir etc").unwrap();
    shell.execute("mk boot.cfg").unwrap();
    let out = output(&shell);
    assert_eq!(out.matches("Cannot modify root folder").count(), 2);
}

#[test]
fn test_cd_errors() {
    let store = installed_store();
    let mut shell = shell_with(&store, "");

    shell.execute("cd").unwrap();
    shell.execute("cd Music/Jazz").unwrap();
    shell.execute("cd ../..").unwrap();

    let out = output(&shell);
    assert!(out.contains("No folder name provided\n"));
    assert!(out.contains("No such folder: Music/Jazz\n"));
    assert!(out.contains("Already at topmost directory\n"));
    assert_eq!(shell.cwd(), shell.vfs().root());
}

#[test]
fn test_pwd_and_paths() {
    let store = installed_store();
    let mut shell = shell_with(&store, "");

    shell.execute("mkdir Desktop/projects").unwrap();
    shell.execute("cd ~/Desktop/projects").unwrap();
    shell.execute("pwd").unwrap();
    assert!(output(&shell).ends_with("root/Home/Desktop/projects\n"));
}

#[test]
fn test_ls_tree() {
    let store = installed_store();
    let mut shell = shell_with(&store, "");

    shell.execute("mk readme.txt").unwrap();
    shell.execute("mkdir Desktop/src").unwrap();
    shell.execute("ls -tree").unwrap();
    assert!(output(&shell).ends_with("Home/\n  Desktop/\n    src/\n  readme.txt\n"));
}

#[test]
fn test_rm_and_rmdir() {
    let store = installed_store();
    let mut shell = shell_with(&store, "");

    shell.execute("mk a.txt b.txt").unwrap();
    shell.execute("rm a.txt ghost.txt").unwrap();
    assert!(output(&shell).ends_with("No such file: ghost.txt\n"));

    shell.execute("rmdir Desktop").unwrap();
    shell.execute("ls").unwrap();
    assert!(output(&shell).ends_with("b.txt\n"));

    let home = &stored(&store).root[0];
    assert!(home.folders.is_empty());
    assert_eq!(home.files.len(), 1);
}

#[test]
fn test_rmdir_current_folder_moves_up() {
    let store = installed_store();
    let mut shell = shell_with(&store, "");
    let home = shell.vfs().home().unwrap();

    shell.execute("cd Desktop").unwrap();
    shell.execute("rmdir ../Desktop").unwrap();
    assert_eq!(shell.cwd(), home);
}

#[test]
fn test_unknown_and_ignored_lines() {
    let store = installed_store();
    let mut shell = shell_with(&store, "");
    let before = output(&shell).len();

    assert_eq!(shell.execute("\tls").unwrap(), Flow::Continue);
    assert_eq!(shell.execute("\u{1b}[A").unwrap(), Flow::Continue);
    assert_eq!(shell.execute("   ").unwrap(), Flow::Continue);
    assert_eq!(output(&shell).len(), before);

    shell.execute("frobnicate now").unwrap();
    assert!(output(&shell).ends_with("No such command: frobnicate\n"));
}

#[test]
fn test_help() {
    let store = installed_store();
    let mut shell = shell_with(&store, "");

    shell.execute("help").unwrap();
    assert!(output(&shell).contains("Available commands:"));
    shell.execute("help vim").unwrap();
    assert!(output(&shell).contains(":w# text"));
    shell.execute("help a b").unwrap();
    assert!(output(&shell).ends_with("Wrong usage of help command\n"));
}

#[test]
fn test_flow_commands() {
    let store = installed_store();
    let mut shell = shell_with(&store, "");

    assert_eq!(shell.execute("shutdown").unwrap(), Flow::Shutdown);
    assert_eq!(shell.execute("reboot").unwrap(), Flow::Reboot);
}

#[test]
fn test_reboot_reloads_from_storage() {
    let store = installed_store();
    let mut shell = shell_with(&store, "mkdir Music\ncd Desktop\nreboot\npwd\nshutdown\n");
    shell.run().unwrap();

    let out = output(&shell);
    assert!(out.contains("Rebooting..."));
    assert!(out.ends_with("root/Home\n[ada@KtOS ~]$ Shutting down...\nCleaning up resources...\n"));

    let home = shell.vfs().home().unwrap();
    assert!(shell.vfs().tree().child_folder(home, "Music").is_some());
}

#[test]
fn test_corrupt_storage_notice() {
    let store = MemoryStore::with_contents("[1, 2");
    let mut shell = shell_with(&store, "ada\nshutdown\n");
    shell.run().unwrap();

    assert!(output(&shell).contains("Unable to parse os info data, erasing to default installation..."));
    assert_eq!(stored(&store).username, "ada");
}

#[test]
fn test_failed_flush_keeps_changes_in_memory() {
    let document = installed_document();
    let mut store = MockBrokenStore::new();
    store
        .expect_load()
        .times(1)
        .returning(move || Ok(Some(document.clone())));
    store
        .expect_save()
        .times(2)
        .returning(|_| Err(VfsError::StorageUnavailable("disk full".into())));
    store.expect_describe().return_const("broken".to_string());

    let mut shell = Shell::boot(
        ShellConfig::default(),
        Arc::new(store),
        Box::new(MemorySource::new()),
        Cursor::new(b"mkdir x\nls\nshutdown\n".to_vec()),
        Vec::new(),
    )
    .unwrap();
    shell.run().unwrap();

    let out = output(&shell);
    assert!(out.contains("Desktop/ x/\n"));
    assert!(!out.contains("disk full"));
    assert!(out.ends_with("Shutting down...\nCleaning up resources...\n"));

    let home = shell.vfs().home().unwrap();
    assert!(shell.vfs().tree().child_folder(home, "x").is_some());
}
