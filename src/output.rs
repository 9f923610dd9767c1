//! Outcome of a finished child process.

use std::process::ExitStatus;

/// How a launched process ended.
///
/// Created by a [`Launcher`](crate::Launcher) once the child has terminated and
/// consumed immediately by the executor's exit-status policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Exit code of the process.
    ///
    /// `None` if the process was terminated without reporting one (e.g. by a signal).
    pub code: Option<i32>,
}

impl ExecutionResult {
    /// A process that exited with `code`.
    pub fn exited(code: i32) -> Self {
        Self { code: Some(code) }
    }

    /// A process that was terminated without an exit code.
    pub fn signaled() -> Self {
        Self { code: None }
    }

    /// Check if the process exited successfully (code 0).
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Get the exit code if available.
    pub fn code(&self) -> Option<i32> {
        self.code
    }
}

impl From<ExitStatus> for ExecutionResult {
    fn from(status: ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_zero_is_success() {
        assert!(ExecutionResult::exited(0).success());
        assert!(!ExecutionResult::exited(1).success());
        assert!(!ExecutionResult::exited(-1).success());
        assert!(!ExecutionResult::signaled().success());
    }

    #[cfg(unix)]
    #[test]
    fn test_from_exit_status() {
        use std::os::unix::process::ExitStatusExt;

        assert_eq!(
            ExecutionResult::from(ExitStatus::from_raw(3 << 8)),
            ExecutionResult::exited(3)
        );
        // Killed by SIGKILL: no exit code.
        assert_eq!(
            ExecutionResult::from(ExitStatus::from_raw(9)),
            ExecutionResult::signaled()
        );
    }
}
