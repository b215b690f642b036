//! Child process execution
//!
//! Commands are described by a [`CommandSpec`] and executed through the
//! [`ProcessRunner`] trait so callers can be tested without spawning anything.

use crate::error::{Error, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// A program invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    pub env: BTreeMap<String, String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Default::default()
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// `program arg1 arg2 ...`
    pub fn command_line(&self) -> String {
        let mut parts = vec![self.program.clone()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }

    fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(cwd) = &self.cwd {
            cmd.current_dir(cwd);
        }
        cmd.envs(&self.env);
        cmd
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.command_line())
    }
}

/// Captured output of a finished process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Runs child processes to completion
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run with inherited stdio; non-zero exit is an error
    async fn run(&self, spec: &CommandSpec) -> Result<()>;

    /// Run capturing stdout and stderr; non-zero exit is an error
    async fn output(&self, spec: &CommandSpec) -> Result<CommandOutput>;
}

/// [`ProcessRunner`] backed by `tokio::process`
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioProcessRunner;

impl TokioProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

fn spawn_error(spec: &CommandSpec, source: std::io::Error) -> Error {
    Error::Spawn {
        program: spec.program.clone(),
        source,
    }
}

#[async_trait]
impl ProcessRunner for TokioProcessRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<()> {
        debug!("Running: {}", spec);
        let status = spec
            .to_command()
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| spawn_error(spec, e))?;

        if !status.success() {
            return Err(Error::CommandFailed {
                command: spec.command_line(),
                code: status.code(),
                stderr: String::new(),
            });
        }
        Ok(())
    }

    async fn output(&self, spec: &CommandSpec) -> Result<CommandOutput> {
        debug!("Running (captured): {}", spec);
        let output = spec
            .to_command()
            .output()
            .await
            .map_err(|e| spawn_error(spec, e))?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            return Err(Error::CommandFailed {
                command: spec.command_line(),
                code: output.status.code(),
                stderr,
            });
        }
        Ok(CommandOutput { stdout, stderr })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line() {
        let spec = CommandSpec::new("cordova")
            .args(["platform", "add"])
            .arg("android")
            .current_dir("/tmp/app/hybrid")
            .env("CI", "true");
        assert_eq!(spec.to_string(), "cordova platform add android");
        assert_eq!(spec.env.get("CI").map(String::as_str), Some("true"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_output_captures_stdout() {
        let spec = CommandSpec::new("sh").args(["-c", "echo hello"]);
        let output = TokioProcessRunner::new().output(&spec).await.unwrap();
        assert_eq!(output.stdout.trim(), "hello");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_zero_exit_reports_code() {
        let spec = CommandSpec::new("sh").args(["-c", "echo boom >&2; exit 3"]);
        let err = TokioProcessRunner::new().output(&spec).await.unwrap_err();
        match err {
            Error::CommandFailed { code, stderr, .. } => {
                assert_eq!(code, Some(3));
                assert_eq!(stderr.trim(), "boom");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let spec = CommandSpec::new("ojet-definitely-not-a-real-program");
        let err = TokioProcessRunner::new().run(&spec).await.unwrap_err();
        assert!(matches!(err, Error::Spawn { .. }));
    }
}
