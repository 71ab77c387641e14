//! Process Runner
//!
//! Runs external commands to completion and maps a non-zero exit into
//! `GatewayError::NonZeroExit`, keeping the tool's stderr verbatim.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;

use crate::shared::errors::GatewayError;

/// Captured output of a successful command
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

/// A fully described external command
#[derive(Debug, Clone)]
pub struct CommandSpec {
    program: String,
    args: Vec<String>,
    cwd: Option<PathBuf>,
}

impl CommandSpec {
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn current_dir(mut self, dir: &Path) -> Self {
        self.cwd = Some(dir.to_path_buf());
        self
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    #[must_use]
    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    /// Command line as shown in logs and errors
    #[must_use]
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Absolute form of a host path, as required by bind mounts
///
/// # Errors
///
/// Returns `GatewayError::HostPath` if the current directory cannot be read.
pub fn host_path(path: &Path) -> Result<String, GatewayError> {
    std::path::absolute(path)
        .map(|p| p.display().to_string())
        .map_err(|source| GatewayError::HostPath {
            path: path.to_path_buf(),
            source,
        })
}

/// Runs commands, blocking the calling task until they exit
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandRunner;

impl CommandRunner {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Run `spec` and capture its output
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Spawn` if the program cannot be launched and
    /// `GatewayError::NonZeroExit` if it exits unsuccessfully.
    pub async fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, GatewayError> {
        let line = spec.display();
        tracing::debug!(command = %line, "Running command");

        let mut command = Command::new(&spec.program);
        command
            .args(&spec.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(cwd) = &spec.cwd {
            command.current_dir(cwd);
        }

        let output = command.output().await.map_err(|source| GatewayError::Spawn {
            program: spec.program.clone(),
            source,
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        if !output.status.success() {
            tracing::debug!(command = %line, code = ?output.status.code(), "Command failed");
            return Err(GatewayError::NonZeroExit {
                command: line,
                code: output.status.code(),
                stderr: if stderr.is_empty() { stdout } else { stderr },
            });
        }

        Ok(CommandOutput { stdout, stderr })
    }

    /// Whether `program` can be launched at all
    pub async fn is_available(&self, program: &str, probe_arg: &str) -> bool {
        self.run(&CommandSpec::new(program).arg(probe_arg)).await.is_ok()
    }
}
