/*!
 * Shell
 * Reads command lines, maps them onto engine operations and prints results
 *
 * Each command applies its arguments one at a time, reporting failures and
 * carrying on, then flushes storage once. Nothing a command does ends the
 * loop except `shutdown`, `reboot` or end of input.
 */

mod commands;
pub mod editor;
pub mod help;

use miette::Diagnostic;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use crate::core::config::ShellConfig;
use crate::monitoring::CommandSpan;
use crate::packages::PackageSource;
use crate::persistence::Store;
use crate::vfs::{self, FolderId, Vfs, VfsError};

/// Clears the terminal and homes the cursor
pub const CLEAR_SCREEN: &str = "\u{1b}[H\u{1b}[2J\u{1b}[3J";

/// Shell-level errors
///
/// Only failures of the terminal itself or a boot that cannot build a tree
/// surface here; everything else is printed and the loop continues.
#[derive(Error, Debug, Diagnostic)]
pub enum ShellError {
    #[error("terminal I/O failed: {0}")]
    #[diagnostic(code(shell::io))]
    Io(#[from] io::Error),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Vfs(#[from] VfsError),
}

pub type ShellResult<T> = Result<T, ShellError>;

/// What the loop does after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Shutdown,
    Reboot,
}

/// Interactive shell over any line input and text output
pub struct Shell<R, W> {
    input: R,
    out: W,
    config: ShellConfig,
    store: Arc<dyn Store>,
    packages: Box<dyn PackageSource>,
    vfs: Vfs,
    cwd: FolderId,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    /// Boot the engine from `store`, running the installation prompt if needed
    pub fn boot(
        config: ShellConfig,
        store: Arc<dyn Store>,
        packages: Box<dyn PackageSource>,
        mut input: R,
        mut out: W,
    ) -> ShellResult<Self> {
        let vfs = start(&store, &mut input, &mut out)?;
        let cwd = vfs.home().unwrap_or_else(|| vfs.root());
        Ok(Self {
            input,
            out,
            config,
            store,
            packages,
            vfs,
            cwd,
        })
    }

    pub fn vfs(&self) -> &Vfs {
        &self.vfs
    }

    pub fn cwd(&self) -> FolderId {
        self.cwd
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    /// Run until `shutdown` or end of input
    pub fn run(&mut self) -> ShellResult<()> {
        loop {
            self.prompt()?;
            let Some(line) = read_line(&mut self.input)? else {
                break;
            };

            match self.execute(&line)? {
                Flow::Continue => {}
                Flow::Shutdown => {
                    writeln!(self.out, "Shutting down...")?;
                    writeln!(self.out, "Cleaning up resources...")?;
                    break;
                }
                Flow::Reboot => {
                    writeln!(self.out, "Rebooting...")?;
                    self.reboot()?;
                }
            }
        }
        self.flush();
        Ok(())
    }

    /// Execute one command line
    pub fn execute(&mut self, line: &str) -> ShellResult<Flow> {
        if line.starts_with('\t') || line.starts_with('\u{1b}') {
            return Ok(Flow::Continue);
        }
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return Ok(Flow::Continue);
        };
        let args: Vec<&str> = words.collect();
        let span = CommandSpan::new(command, args.len());
        let _entered = span.span().enter();

        match command {
            "help" => self.help(&args)?,
            "shutdown" => return Ok(Flow::Shutdown),
            "reboot" => return Ok(Flow::Reboot),
            "mkdir" => self.mkdir(&args)?,
            "rmdir" => self.rmdir(&args)?,
            "mk" => self.mk(&args)?,
            "rm" => self.rm(&args)?,
            "cd" => self.cd(&args)?,
            "ls" => self.ls(&args)?,
            "clear" => write!(self.out, "{CLEAR_SCREEN}")?,
            "vim" => self.vim(&args)?,
            "info" => self.info(&args)?,
            "jpkg" => self.jpkg(&args)?,
            "pwd" => self.pwd(&args)?,
            other => self.report(&VfsError::not_found(vfs::EntityKind::Command, other))?,
        }
        Ok(Flow::Continue)
    }

    /// Flush and reload everything from storage
    fn reboot(&mut self) -> ShellResult<()> {
        self.flush();
        self.vfs = start(&self.store, &mut self.input, &mut self.out)?;
        self.cwd = self.vfs.home().unwrap_or_else(|| self.vfs.root());
        Ok(())
    }

    fn prompt(&mut self) -> io::Result<()> {
        let location = if Some(self.cwd) == self.vfs.home() {
            "~".to_string()
        } else {
            self.vfs
                .tree()
                .folder(self.cwd)
                .map(|folder| folder.name().to_string())
                .unwrap_or_default()
        };
        write!(
            self.out,
            "[{}@{} {}]$ ",
            self.vfs.username(),
            self.config.hostname,
            location
        )?;
        self.out.flush()
    }

    /// Print a non-fatal error
    fn report(&mut self, err: &VfsError) -> io::Result<()> {
        writeln!(self.out, "{err}")
    }

    /// Write the document, logging rather than surfacing failures
    fn flush(&mut self) {
        if let Err(e) = self.vfs.flush() {
            warn!(error = %e, "Flush failed, changes kept in memory");
        }
    }
}

/// Boot sequence shared by startup and `reboot`
fn start<R: BufRead, W: Write>(
    store: &Arc<dyn Store>,
    input: &mut R,
    out: &mut W,
) -> ShellResult<Vfs> {
    write!(out, "{CLEAR_SCREEN}")?;

    let vfs::Booted { mut vfs, outcome } = vfs::boot(Arc::clone(store))?;
    if let Some(notice) = outcome.notice() {
        writeln!(out, "{notice}")?;
    }

    if !vfs.is_installed() {
        write!(out, "Enter username: ")?;
        out.flush()?;
        let username = read_line(input)?.unwrap_or_default();
        vfs.complete_installation(username.trim());
        writeln!(
            out,
            "Set username to {}, modify JSON file if you want a different one",
            vfs.username()
        )?;
        if let Err(e) = vfs.flush() {
            warn!(error = %e, "Could not persist installation");
        }
    }

    info!(username = %vfs.username(), "Shell booted");
    Ok(vfs)
}

/// Next line without its terminator, `None` at end of input
fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let trimmed = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed);
    Ok(Some(line))
}
