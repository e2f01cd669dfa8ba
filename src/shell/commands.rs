/*!
 * Shell Commands
 * One method per command word
 */

use std::io::{BufRead, Write};
use tracing::debug;

use super::editor::{EditorCommand, LineEditor};
use super::{help, read_line, Shell, ShellResult, CLEAR_SCREEN};
use crate::core::limits::{OS_NAME, OS_VERSION, PACKAGE_MANAGER};
use crate::packages;
use crate::vfs::{EntityKind, FileId, FileTarget, VfsError};

impl<R: BufRead, W: Write> Shell<R, W> {
    pub(super) fn help(&mut self, args: &[&str]) -> ShellResult<()> {
        match args {
            [] => write!(self.out, "{}", help::overview())?,
            [command] => match help::detail(command) {
                Some(text) => writeln!(self.out, "{text}")?,
                None => self.report(&VfsError::not_found(EntityKind::Command, *command))?,
            },
            _ => writeln!(self.out, "Wrong usage of help command")?,
        }
        Ok(())
    }

    pub(super) fn info(&mut self, _args: &[&str]) -> ShellResult<()> {
        writeln!(self.out, "{OS_NAME} {OS_VERSION}")?;
        writeln!(self.out, "User: {}", self.vfs.username())?;
        writeln!(self.out, "Host: {}", self.config.hostname)?;
        writeln!(self.out, "Storage: {}", self.store.describe())?;
        writeln!(
            self.out,
            "Folders: {}, files: {}",
            self.vfs.tree().folder_count(),
            self.vfs.tree().file_count()
        )?;
        Ok(())
    }

    pub(super) fn pwd(&mut self, _args: &[&str]) -> ShellResult<()> {
        match self.vfs.full_path(self.cwd) {
            Ok(path) => writeln!(self.out, "{path}")?,
            Err(e) => self.report(&e)?,
        }
        Ok(())
    }

    pub(super) fn mkdir(&mut self, args: &[&str]) -> ShellResult<()> {
        if args.is_empty() {
            writeln!(self.out, "No folder name provided")?;
            return Ok(());
        }
        for arg in args {
            if let Some(target) = self.target(arg)? {
                if let Err(e) = self.vfs.create_folder(target.folder, &target.file_name) {
                    self.report(&e)?;
                }
            }
        }
        self.flush();
        Ok(())
    }

    pub(super) fn rmdir(&mut self, args: &[&str]) -> ShellResult<()> {
        if args.is_empty() {
            writeln!(self.out, "No folder name provided")?;
            return Ok(());
        }
        for arg in args {
            let Some(target) = self.target(arg)? else {
                continue;
            };
            match self.vfs.remove_folder(target.folder, &target.file_name) {
                Ok(()) => {
                    if self.vfs.tree().folder(self.cwd).is_none() {
                        self.cwd = target.folder;
                    }
                }
                Err(e) => self.report(&e)?,
            }
        }
        self.flush();
        Ok(())
    }

    pub(super) fn mk(&mut self, args: &[&str]) -> ShellResult<()> {
        if args.is_empty() {
            writeln!(self.out, "No file name provided")?;
            return Ok(());
        }
        for arg in args {
            if let Some(target) = self.target(arg)? {
                if let Err(e) = self.vfs.create_file(target.folder, &target.file_name) {
                    self.report(&e)?;
                }
            }
        }
        self.flush();
        Ok(())
    }

    pub(super) fn rm(&mut self, args: &[&str]) -> ShellResult<()> {
        if args.is_empty() {
            writeln!(self.out, "No file name provided")?;
            return Ok(());
        }
        for arg in args {
            if let Some(target) = self.target(arg)? {
                if let Err(e) = self.vfs.remove_file(target.folder, &target.file_name) {
                    self.report(&e)?;
                }
            }
        }
        self.flush();
        Ok(())
    }

    pub(super) fn cd(&mut self, args: &[&str]) -> ShellResult<()> {
        let Some(path) = args.first() else {
            writeln!(self.out, "No folder name provided")?;
            return Ok(());
        };
        match self.vfs.resolve_path(self.cwd, path) {
            Ok(resolved) => {
                for notice in &resolved.notices {
                    self.report(notice)?;
                }
                self.cwd = resolved.folder;
            }
            Err(e) => self.report(&e)?,
        }
        Ok(())
    }

    pub(super) fn ls(&mut self, args: &[&str]) -> ShellResult<()> {
        if args.first() == Some(&"-tree") {
            match self.vfs.tree().render_tree(self.cwd) {
                Ok(rendered) => write!(self.out, "{rendered}")?,
                Err(e) => self.report(&e)?,
            }
            return Ok(());
        }

        match self.vfs.list(self.cwd) {
            Ok(entries) => {
                let names: Vec<String> = entries.iter().map(|entry| entry.display_name()).collect();
                if !names.is_empty() {
                    writeln!(self.out, "{}", names.join(" "))?;
                }
            }
            Err(e) => self.report(&e)?,
        }
        Ok(())
    }

    pub(super) fn vim(&mut self, args: &[&str]) -> ShellResult<()> {
        let Some(path) = args.first() else {
            writeln!(self.out, "No file name provided")?;
            return Ok(());
        };
        let target = match self.vfs.open_for_edit(self.cwd, path) {
            Ok(target) => target,
            Err(e) => {
                self.report(&e)?;
                return Ok(());
            }
        };
        for notice in &target.notices {
            self.report(notice)?;
        }
        debug!(path, created = target.created, "Opening editor");

        self.edit(target.file)?;
        self.flush();
        write!(self.out, "{CLEAR_SCREEN}")?;
        Ok(())
    }

    pub(super) fn jpkg(&mut self, args: &[&str]) -> ShellResult<()> {
        match args {
            [] => writeln!(self.out, "No operation provided")?,
            ["list"] => match packages::list(&self.vfs) {
                Ok(names) => {
                    for name in names {
                        let version = packages::installed_version(&self.vfs, &name).unwrap_or_default();
                        writeln!(self.out, "{name} {version}")?;
                    }
                }
                Err(e) => self.report(&e)?,
            },
            ["install", specs @ ..] if !specs.is_empty() => {
                for spec in specs {
                    writeln!(self.out, "Getting package {spec}...")?;
                    match packages::install(&mut self.vfs, self.packages.as_ref(), spec) {
                        Ok(version) => writeln!(self.out, "Installed {spec} version {version}")?,
                        Err(e) => self.report(&e)?,
                    }
                }
                self.flush();
            }
            ["remove", names @ ..] if !names.is_empty() => {
                for name in names {
                    match packages::remove(&mut self.vfs, name) {
                        Ok(()) => writeln!(self.out, "Removed {name}")?,
                        Err(e) => self.report(&e)?,
                    }
                }
                self.flush();
            }
            ["install" | "remove"] => writeln!(self.out, "No package name provided")?,
            [other, ..] => self.report(&VfsError::not_found(
                EntityKind::Command,
                format!("{PACKAGE_MANAGER} {other}"),
            ))?,
        }
        Ok(())
    }

    /// Parent folder and final name of a path argument, printing any problems
    fn target(&mut self, path: &str) -> ShellResult<Option<FileTarget>> {
        match self.vfs.resolve_file_target(self.cwd, path) {
            Ok(target) => {
                for notice in &target.notices {
                    self.report(notice)?;
                }
                Ok(Some(target))
            }
            Err(e) => {
                self.report(&e)?;
                Ok(None)
            }
        }
    }

    /// Interactive loop of the line editor
    fn edit(&mut self, file: FileId) -> ShellResult<()> {
        let mut editor = LineEditor::from_contents(self.vfs.file_contents(file)?);
        let mut status: Option<String> = None;

        loop {
            write!(self.out, "{CLEAR_SCREEN}")?;
            for (index, line) in editor.lines().iter().enumerate() {
                writeln!(self.out, "{} - {line}", index + 1)?;
            }
            writeln!(self.out)?;
            if let Some(message) = status.take() {
                writeln!(self.out, "{message}")?;
            }
            write!(self.out, "> ")?;
            self.out.flush()?;

            let Some(input) = read_line(&mut self.input)? else {
                break;
            };
            match EditorCommand::parse(&input) {
                Some(EditorCommand::Quit) => break,
                Some(EditorCommand::Save) => {
                    status = Some(match self.vfs.update_file_contents(file, editor.contents()) {
                        Ok(()) => "File saved".to_string(),
                        Err(e) => e.to_string(),
                    });
                }
                Some(command) => {
                    if editor.apply(command).is_err() {
                        status = Some("Unknown command".to_string());
                    }
                }
                None => status = Some("Unknown command".to_string()),
            }
        }
        Ok(())
    }
}
