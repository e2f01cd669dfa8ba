/*!
 * Line Editor
 * Line-numbered buffer driven by `:`-prefixed commands
 *
 * `:w# text` writes line #, padding with empty lines; `:i# text` inserts
 * before index #; `:r#` removes and `:c#` clears line #. Line numbers shown
 * to the user start at 1; insert positions start at 0.
 */

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// A parsed editor command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorCommand {
    Write(usize, String),
    Insert(usize, String),
    Remove(usize),
    Clear(usize),
    Save,
    Quit,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("line {0} out of range")]
pub struct LineOutOfRange(pub usize);

fn command_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^:(?:(?P<op>[wi])(?P<at>\d+) (?P<text>.*)|(?P<line_op>[rc])(?P<line>\d+)|(?P<bare>[sq]))$")
            .expect("editor pattern is valid")
    })
}

impl EditorCommand {
    /// `None` for anything that is not a well-formed command
    pub fn parse(input: &str) -> Option<Self> {
        let caps = command_pattern().captures(input)?;

        if let Some(op) = caps.name("op") {
            let at = caps.name("at")?.as_str().parse().ok()?;
            let text = caps.name("text")?.as_str().to_string();
            return match op.as_str() {
                "w" => Some(Self::Write(at, text)),
                _ => Some(Self::Insert(at, text)),
            };
        }
        if let Some(op) = caps.name("line_op") {
            let line = caps.name("line")?.as_str().parse().ok()?;
            return match op.as_str() {
                "r" => Some(Self::Remove(line)),
                _ => Some(Self::Clear(line)),
            };
        }
        match caps.name("bare")?.as_str() {
            "s" => Some(Self::Save),
            _ => Some(Self::Quit),
        }
    }
}

/// Buffer being edited
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineEditor {
    lines: Vec<String>,
}

impl LineEditor {
    /// Split file contents into lines, dropping trailing empty ones
    pub fn from_contents(contents: &str) -> Self {
        let mut lines: Vec<String> = contents.split('\n').map(str::to_string).collect();
        while lines.last().is_some_and(String::is_empty) {
            lines.pop();
        }
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Apply a buffer command; `Save` and `Quit` leave the buffer alone
    ///
    /// On error the buffer is unchanged.
    pub fn apply(&mut self, command: EditorCommand) -> Result<(), LineOutOfRange> {
        match command {
            EditorCommand::Write(line, text) => {
                if line == 0 {
                    return Err(LineOutOfRange(line));
                }
                if self.lines.len() < line {
                    self.lines.resize(line, String::new());
                }
                self.lines[line - 1] = text;
            }
            EditorCommand::Insert(index, text) => {
                if index > self.lines.len() {
                    return Err(LineOutOfRange(index));
                }
                self.lines.insert(index, text);
            }
            EditorCommand::Remove(line) => {
                let index = self.index_of(line)?;
                self.lines.remove(index);
            }
            EditorCommand::Clear(line) => {
                let index = self.index_of(line)?;
                self.lines[index].clear();
            }
            EditorCommand::Save | EditorCommand::Quit => {}
        }
        Ok(())
    }

    /// Lines joined with `\n` terminators
    pub fn contents(&self) -> String {
        self.lines.iter().fold(String::new(), |mut out, line| {
            out.push_str(line);
            out.push('\n');
            out
        })
    }

    fn index_of(&self, line: usize) -> Result<usize, LineOutOfRange> {
        if line == 0 || line > self.lines.len() {
            return Err(LineOutOfRange(line));
        }
        Ok(line - 1)
    }
}
