//! Error types for winprov.
//!
//! This module defines two layers:
//! - [`ExecError`]: a single external invocation failed to launch or exited unsuccessfully
//! - [`ProvisionError`]: anything that aborts a provisioning run, including `ExecError`

use std::path::PathBuf;
use thiserror::Error;

/// Execution error raised by [`Executor::run`](crate::Executor::run).
///
/// Both variants carry the encoded command line so the operator can see
/// exactly what was handed to the operating system.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExecError {
    /// The operating system could not create the process
    #[error("failed to launch `{command_line}`: {reason}")]
    LaunchFailed {
        command_line: String,
        reason: String,
    },

    /// The process ran but did not exit with status 0.
    ///
    /// `code` is `None` when the process was terminated without an exit code.
    #[error("`{command_line}` exited with {}", describe_code(.code))]
    NonZeroExit {
        command_line: String,
        code: Option<i32>,
    },
}

impl ExecError {
    /// The encoded command line that failed.
    pub fn command_line(&self) -> &str {
        match self {
            ExecError::LaunchFailed { command_line, .. } => command_line,
            ExecError::NonZeroExit { command_line, .. } => command_line,
        }
    }

    /// The exit code, if the process ran and reported one.
    pub fn code(&self) -> Option<i32> {
        match self {
            ExecError::LaunchFailed { .. } => None,
            ExecError::NonZeroExit { code, .. } => *code,
        }
    }
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

/// Error that aborts a provisioning run.
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error(transparent)]
    Exec(#[from] ExecError),

    /// Filesystem operation failed
    #[error("{context} ({}): {source}", path.display())]
    Io {
        context: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Fetching a remote resource failed
    #[error("failed to download {url}: {reason}")]
    Download { url: String, reason: String },

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ProvisionError {
    pub(crate) fn io(
        context: &'static str,
        path: impl Into<PathBuf>,
    ) -> impl FnOnce(std::io::Error) -> ProvisionError {
        let path = path.into();
        move |source| ProvisionError::Io {
            context,
            path,
            source,
        }
    }
}
