//! Process launching.
//!
//! A [`Launcher`] turns an encoded command line into a running child process and
//! waits for it. [`SystemLauncher`] is the real implementation; the executor only
//! sees the trait, so tests can script exit codes without spawning anything.

use crate::output::ExecutionResult;
use async_trait::async_trait;
use std::io;
use std::process::Stdio;
use tokio::process::Command;

/// Launches an encoded command line and waits for it to terminate.
#[async_trait]
pub trait Launcher: Send + Sync {
    /// Launch `command_line` and wait for the child to exit.
    ///
    /// # Errors
    ///
    /// Returns an `io::Error` if the process could not be created.
    async fn launch(&self, command_line: &str) -> io::Result<ExecutionResult>;
}

/// Launches through the platform command interpreter with inherited stdio.
///
/// On Windows the line is handed verbatim to `cmd.exe /d /s /c "<line>"`, so the
/// child's C runtime sees exactly the encoded text. Elsewhere the line is run
/// with `sh -c`, which is only useful for development: the encoding targets the
/// Windows tokenizer.
#[derive(Debug, Clone, Default)]
pub struct SystemLauncher {
    _private: (),
}

impl SystemLauncher {
    /// Launcher for the current platform.
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(windows)]
    fn command(command_line: &str) -> Command {
        use std::os::windows::process::CommandExt;

        let mut cmd = std::process::Command::new("cmd.exe");
        cmd.args(["/d", "/s", "/c"])
            .raw_arg(format!("\"{}\"", command_line));
        Command::from(cmd)
    }

    #[cfg(not(windows))]
    fn command(command_line: &str) -> Command {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(command_line);
        cmd
    }
}

#[async_trait]
impl Launcher for SystemLauncher {
    async fn launch(&self, command_line: &str) -> io::Result<ExecutionResult> {
        if command_line.trim().is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "empty command line",
            ));
        }

        let mut cmd = Self::command(command_line);
        cmd.stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let status = cmd.status().await?;
        Ok(ExecutionResult::from(status))
    }
}
