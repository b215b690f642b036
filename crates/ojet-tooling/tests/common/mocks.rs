//! Mock process runner
//!
//! Records every invocation and answers with pre-configured results keyed by
//! the full command line, falling back to the program name.

use async_trait::async_trait;
use ojet_tooling::{CommandOutput, CommandSpec, Error, ProcessRunner, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock command result
#[derive(Clone, Debug)]
pub struct MockCommandResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl MockCommandResult {
    pub fn success(stdout: &str) -> Self {
        Self {
            stdout: stdout.to_string(),
            stderr: String::new(),
            exit_code: 0,
        }
    }

    pub fn failure(stderr: &str, exit_code: i32) -> Self {
        Self {
            stdout: String::new(),
            stderr: stderr.to_string(),
            exit_code,
        }
    }
}

type OnRun = Box<dyn Fn(&CommandSpec) + Send + Sync>;

/// Recording [`ProcessRunner`]
#[derive(Default)]
pub struct RecordingRunner {
    responses: Mutex<HashMap<String, MockCommandResult>>,
    invocations: Mutex<Vec<CommandSpec>>,
    on_run: Option<OnRun>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Side effect executed for every command, e.g. to fake files a real tool writes
    pub fn with_hook(hook: impl Fn(&CommandSpec) + Send + Sync + 'static) -> Self {
        Self {
            on_run: Some(Box::new(hook)),
            ..Self::default()
        }
    }

    pub fn mock_success(&self, command: &str, stdout: &str) {
        self.responses
            .lock()
            .unwrap()
            .insert(command.to_string(), MockCommandResult::success(stdout));
    }

    pub fn mock_failure(&self, command: &str, stderr: &str, exit_code: i32) {
        self.responses.lock().unwrap().insert(
            command.to_string(),
            MockCommandResult::failure(stderr, exit_code),
        );
    }

    pub fn invocations(&self) -> Vec<CommandSpec> {
        self.invocations.lock().unwrap().clone()
    }

    /// Command lines in invocation order
    pub fn command_lines(&self) -> Vec<String> {
        self.invocations()
            .iter()
            .map(CommandSpec::command_line)
            .collect()
    }

    fn respond(&self, spec: &CommandSpec) -> Result<CommandOutput> {
        self.invocations.lock().unwrap().push(spec.clone());
        if let Some(hook) = &self.on_run {
            hook(spec);
        }

        let responses = self.responses.lock().unwrap();
        let result = responses
            .get(&spec.command_line())
            .or_else(|| responses.get(&spec.program))
            .cloned()
            .unwrap_or_else(|| MockCommandResult::success(""));

        if result.exit_code != 0 {
            return Err(Error::CommandFailed {
                command: spec.command_line(),
                code: Some(result.exit_code),
                stderr: result.stderr,
            });
        }
        Ok(CommandOutput {
            stdout: result.stdout,
            stderr: result.stderr,
        })
    }
}

#[async_trait]
impl ProcessRunner for RecordingRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<()> {
        self.respond(spec).map(|_| ())
    }

    async fn output(&self, spec: &CommandSpec) -> Result<CommandOutput> {
        self.respond(spec)
    }
}

/// Shareable handle for passing into wrappers while keeping access in the test
pub fn shared(runner: RecordingRunner) -> Arc<RecordingRunner> {
    Arc::new(runner)
}
