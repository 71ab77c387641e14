//! Error Types
//!
//! Error taxonomy for the orchestrator: usage errors, delegated-tool failures,
//! missing prerequisites and readiness timeouts. Declined confirmations are not
//! errors and never show up here.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Domain-level errors representing identifier rule violations
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid channel name '{0}': must start with a lowercase letter and contain only [a-z0-9.-]")]
    InvalidChannelName(String),

    #[error("Invalid chaincode version '{0}': must be non-empty and contain no whitespace")]
    InvalidChaincodeVersion(String),
}

/// Gateway-level errors for failures of delegated external calls
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Failed to launch `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {}: {stderr}", exit_status(.code))]
    NonZeroExit {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Cannot resolve host path {}: {source}", .path.display())]
    HostPath {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Confirmation prompt failed: {0}")]
    Prompt(#[source] std::io::Error),
}

fn exit_status(code: &Option<i32>) -> String {
    code.map_or_else(|| "a signal".to_string(), |c| format!("status {c}"))
}

/// Use case-level errors for orchestration failures
#[derive(Debug, Error)]
pub enum UseCaseError {
    #[error("Missing or invalid arguments: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("Missing prerequisite {artifact} at {}", .path.display())]
    MissingPrerequisite { artifact: String, path: PathBuf },

    #[error("{stage}: {source}")]
    StageFailed {
        stage: &'static str,
        #[source]
        source: GatewayError,
    },

    #[error("Network runtime not ready after {attempts} attempts ({waited:?})")]
    RuntimeNotReady { attempts: u32, waited: Duration },

    #[error("Another operator holds the network lock at {}", .0.display())]
    Locked(PathBuf),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl UseCaseError {
    /// Build a missing-argument usage error for a single field
    #[must_use]
    pub fn missing(field: &str) -> Self {
        Self::Validation(vec![format!("{field}: is required")])
    }

    /// Wrap a gateway failure with the stage that produced it
    #[must_use]
    pub fn stage(stage: &'static str) -> impl FnOnce(GatewayError) -> Self {
        move |source| Self::StageFailed { stage, source }
    }

    /// Wrap an IO failure with a short context message
    #[must_use]
    pub fn io(context: impl Into<String>) -> impl FnOnce(std::io::Error) -> Self {
        let context = context.into();
        move |source| Self::Io { context, source }
    }

    /// Get the error code for this error
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "USAGE_ERROR",
            Self::MissingPrerequisite { .. } => "MISSING_PREREQUISITE",
            Self::StageFailed { .. } | Self::Gateway(_) => "TOOL_FAILED",
            Self::RuntimeNotReady { .. } => "RUNTIME_NOT_READY",
            Self::Locked(_) => "LOCKED",
            Self::Io { .. } => "IO_ERROR",
            Self::Domain(_) => "INVALID_IDENTIFIER",
        }
    }

    /// Process exit code reported for this error
    ///
    /// Every failure kind exits with 1; success is the only 0.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        1
    }
}

impl From<validator::ValidationErrors> for UseCaseError {
    fn from(err: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = err
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| {
                    format!(
                        "{}: {}",
                        field,
                        e.message.as_ref().map_or("invalid", |m| m.as_ref())
                    )
                })
            })
            .collect();
        messages.sort();
        UseCaseError::Validation(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_zero_exit_keeps_stderr_verbatim() {
        let err = GatewayError::NonZeroExit {
            command: "peer chaincode install".to_string(),
            code: Some(1),
            stderr: "chaincode mycc:1.0 already exists".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "`peer chaincode install` exited with status 1: chaincode mycc:1.0 already exists"
        );
    }

    #[test]
    fn test_stage_failed_names_the_stage() {
        let err = UseCaseError::stage("failed to generate crypto material")(GatewayError::NonZeroExit {
            command: "cryptogen generate".to_string(),
            code: None,
            stderr: String::new(),
        });
        assert!(err.to_string().starts_with("failed to generate crypto material: "));
        assert!(err.to_string().contains("a signal"));
        assert_eq!(err.error_code(), "TOOL_FAILED");
    }

    #[test]
    fn test_missing_names_the_field() {
        let err = UseCaseError::missing("channel_name");
        assert_eq!(err.to_string(), "Missing or invalid arguments: channel_name: is required");
        assert_eq!(err.exit_code(), 1);
    }
}
