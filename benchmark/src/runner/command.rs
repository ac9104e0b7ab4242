//! @ai:module:intent Blocking subprocess invocation for runners and generators
//! @ai:module:layer infrastructure
//! @ai:module:public_api Interpreter, Invocation, CommandOutput
//! @ai:module:stateless true

use crate::config::InterpreterConfig;
use crate::error::{RegenError, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

/// @ai:intent How a script file is launched, inferred from its suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpreter {
    Python,
    Shell,
    Direct,
}

impl Interpreter {
    /// @ai:intent Pick the interpreter for a script path
    /// @ai:effects pure
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("py") => Interpreter::Python,
            Some("sh") => Interpreter::Shell,
            _ => Interpreter::Direct,
        }
    }

    /// @ai:intent Whether the file is run through an interpreter rather than executed
    /// @ai:effects pure
    pub fn is_script(&self) -> bool {
        !matches!(self, Interpreter::Direct)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Interpreter::Python => "python",
            Interpreter::Shell => "shell",
            Interpreter::Direct => "direct",
        }
    }
}

/// @ai:intent Captured output of a successful command
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    pub stdout: String,
}

/// @ai:intent A fully described subprocess call
#[derive(Debug, Clone)]
pub struct Invocation {
    program: OsString,
    args: Vec<OsString>,
    cwd: Option<PathBuf>,
    env: Vec<(String, OsString)>,
}

impl Invocation {
    /// @ai:intent Invoke a program with no arguments
    /// @ai:effects pure
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            env: Vec::new(),
        }
    }

    /// @ai:intent Invoke a script through the interpreter its suffix calls for
    /// @ai:effects pure
    pub fn for_script(script: &Path, interpreters: &InterpreterConfig) -> Self {
        match Interpreter::for_path(script) {
            Interpreter::Python => Self::new(&interpreters.python).arg(script),
            Interpreter::Shell => Self::new(&interpreters.shell).arg(script),
            Interpreter::Direct => Self::new(script),
        }
    }

    /// @ai:intent Invoke a runner; runners without a `.py` or `.sh` suffix go through the shell
    /// @ai:effects pure
    pub fn for_runner(runner: &Path, interpreters: &InterpreterConfig) -> Self {
        match Interpreter::for_path(runner) {
            Interpreter::Direct => Self::new(&interpreters.shell).arg(runner),
            _ => Self::for_script(runner, interpreters),
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn env(mut self, key: &str, value: impl Into<OsString>) -> Self {
        self.env.push((key.to_string(), value.into()));
        self
    }

    /// @ai:intent Render the command line for logs and errors
    /// @ai:effects pure
    pub fn describe(&self) -> String {
        std::iter::once(&self.program)
            .chain(self.args.iter())
            .map(|a| a.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// @ai:intent Run to completion, failing on any nonzero exit
    /// @ai:post on failure the error carries stderr, or stdout when stderr is empty
    /// @ai:effects io
    pub fn run(&self) -> Result<CommandOutput> {
        let command_line = self.describe();
        tracing::debug!("Running {}", command_line);

        let mut command = Command::new(&self.program);
        command.args(&self.args);
        if let Some(cwd) = &self.cwd {
            command.current_dir(cwd);
        }
        for (key, value) in &self.env {
            command.env(key, value);
        }

        let output = command.output().map_err(|source| RegenError::Spawn {
            command: command_line.clone(),
            source,
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            let diagnostics = if stderr.trim().is_empty() {
                stdout.trim().to_string()
            } else {
                stderr.trim().to_string()
            };
            return Err(RegenError::CommandFailed {
                command: command_line,
                code: output.status.code(),
                diagnostics,
            });
        }

        Ok(CommandOutput { stdout })
    }
}
