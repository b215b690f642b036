//! Version conflict resolution between an installed component and the requested one

use crate::error::{Error, Result};
use std::collections::VecDeque;
use std::io::{BufRead, Write};
use std::str::FromStr;
use std::sync::Mutex;

/// Outcome of a version conflict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Keep the installed version and skip the install
    KeepLocal,
    /// Replace the installed version with the requested one
    Overwrite,
    /// Abort the whole command
    Cancel,
}

impl FromStr for Decision {
    type Err = String;

    /// Accepts the prompt answers (`1`, `2`, `q`) and the policy names
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "keep" => Ok(Decision::KeepLocal),
            "2" | "overwrite" => Ok(Decision::Overwrite),
            "q" | "cancel" => Ok(Decision::Cancel),
            other => Err(format!(
                "Invalid conflict policy '{}'. Use keep, overwrite or cancel",
                other
            )),
        }
    }
}

/// Decides what to do when the installed version differs from the catalog version
pub trait ConflictResolver: Send + Sync {
    fn resolve(&self, name: &str, local: &str, requested: &str) -> Result<Decision>;
}

/// Always returns the same decision (non-interactive runs)
#[derive(Debug, Clone, Copy)]
pub struct FixedResolver(pub Decision);

impl ConflictResolver for FixedResolver {
    fn resolve(&self, _name: &str, _local: &str, _requested: &str) -> Result<Decision> {
        Ok(self.0)
    }
}

/// Replays queued decisions; cancels once the queue is empty
#[derive(Debug, Default)]
pub struct ScriptedResolver {
    decisions: Mutex<VecDeque<Decision>>,
}

impl ScriptedResolver {
    pub fn new(decisions: impl IntoIterator<Item = Decision>) -> Self {
        Self {
            decisions: Mutex::new(decisions.into_iter().collect()),
        }
    }
}

impl ConflictResolver for ScriptedResolver {
    fn resolve(&self, _name: &str, _local: &str, _requested: &str) -> Result<Decision> {
        let mut queue = self
            .decisions
            .lock()
            .map_err(|e| Error::Prompt(e.to_string()))?;
        Ok(queue.pop_front().unwrap_or(Decision::Cancel))
    }
}

/// Line-based prompt over any reader/writer pair
pub struct PromptResolver<R, W> {
    io: Mutex<(R, W)>,
}

impl<R: BufRead + Send, W: Write + Send> PromptResolver<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            io: Mutex::new((reader, writer)),
        }
    }
}

impl<R: BufRead + Send, W: Write + Send> ConflictResolver for PromptResolver<R, W> {
    fn resolve(&self, name: &str, local: &str, requested: &str) -> Result<Decision> {
        let mut guard = self.io.lock().map_err(|e| Error::Prompt(e.to_string()))?;
        let (reader, writer) = &mut *guard;

        writeln!(
            writer,
            "Component '{}' version {} is already installed, but version {} was requested.",
            name, local, requested
        )?;
        writeln!(writer, "  1) Keep the installed version {}", local)?;
        writeln!(writer, "  2) Overwrite with version {}", requested)?;
        writeln!(writer, "  q) Cancel")?;

        loop {
            write!(writer, "Choose [1/2/q]: ")?;
            writer.flush()?;

            let mut line = String::new();
            if reader.read_line(&mut line)? == 0 {
                // EOF
                return Ok(Decision::Cancel);
            }

            match line.trim() {
                "1" => return Ok(Decision::KeepLocal),
                "2" => return Ok(Decision::Overwrite),
                "q" | "Q" => return Ok(Decision::Cancel),
                other => writeln!(writer, "Invalid choice '{}'", other)?,
            }
        }
    }
}
