//! Execution dispatch.
//!
//! The main entry point for running external tools. `Executor` encodes a list of
//! logical arguments, echoes the resulting command line, launches it with
//! inherited stdio, and applies the exit-status policy.

use crate::cmdline::encode_command_line;
use crate::error::ExecError;
use crate::launcher::{Launcher, SystemLauncher};
use crate::tolerance::{self, ExitPolicy};
use std::fmt;
use std::sync::Arc;

/// Sink for the audit line written before every launch.
pub type Echo = dyn Fn(&str) + Send + Sync;

/// Runs external tools one at a time.
///
/// Create using `Executor::new()` for the real system, or `Executor::builder()`
/// to substitute the launcher, exit policy, or echo sink.
#[derive(Clone)]
pub struct Executor {
    /// Launches encoded command lines.
    launcher: Arc<dyn Launcher>,

    /// Whether tolerated tools may fail.
    exit_policy: ExitPolicy,

    /// Receives each encoded command line before launch.
    echo: Arc<Echo>,
}

impl Executor {
    /// Executor using [`SystemLauncher`], the default exit policy, and stdout echo.
    pub fn new() -> Self {
        ExecutorBuilder::new().build()
    }

    /// Create a new executor builder.
    pub fn builder() -> ExecutorBuilder {
        ExecutorBuilder::new()
    }

    /// The exit policy in effect.
    pub fn exit_policy(&self) -> ExitPolicy {
        self.exit_policy
    }

    /// Encode `args`, launch the command line, and wait for it to finish.
    ///
    /// The first argument names the program. The encoded line is echoed before
    /// the launch and the child's output interleaves live with ours.
    ///
    /// # Errors
    ///
    /// - `ExecError::LaunchFailed` if the process couldn't be started
    /// - `ExecError::NonZeroExit` if it exited unsuccessfully
    ///
    /// Neither is returned when the first argument is a tolerated tool and the
    /// exit policy is [`ExitPolicy::TolerateKnown`].
    pub async fn run<S: AsRef<str>>(&self, args: &[S]) -> Result<(), ExecError> {
        let command_line = encode_command_line(args);

        (self.echo)(&command_line);
        tracing::info!(command_line = %command_line, "Executing");

        let result = self.launch(command_line).await;
        tolerance::apply(args, result, self.exit_policy)
    }

    /// Execute synchronously, blocking the calling thread.
    ///
    /// Builds a current-thread runtime for the duration of the call.
    ///
    /// # Panics
    ///
    /// Panics if called from within an async context.
    pub fn run_blocking<S: AsRef<str>>(&self, args: &[S]) -> Result<(), ExecError> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ExecError::LaunchFailed {
                command_line: encode_command_line(args),
                reason: format!("failed to create runtime: {}", e),
            });

        match rt {
            Ok(rt) => rt.block_on(self.run(args)),
            Err(error) => tolerance::apply(args, Err(error), self.exit_policy),
        }
    }

    async fn launch(&self, command_line: String) -> Result<(), ExecError> {
        let outcome = match self.launcher.launch(&command_line).await {
            Ok(outcome) => outcome,
            Err(e) => {
                return Err(ExecError::LaunchFailed {
                    command_line,
                    reason: e.to_string(),
                })
            }
        };

        if outcome.success() {
            Ok(())
        } else {
            Err(ExecError::NonZeroExit {
                command_line,
                code: outcome.code(),
            })
        }
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Executor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Executor")
            .field("exit_policy", &self.exit_policy)
            .finish_non_exhaustive()
    }
}

/// Print the audit line the operator sees before each launch.
pub fn echo_to_stdout(command_line: &str) {
    println!("\n> Executing: {}", command_line);
}

/// Builder for `Executor`.
pub struct ExecutorBuilder {
    launcher: Arc<dyn Launcher>,
    exit_policy: ExitPolicy,
    echo: Arc<Echo>,
}

impl ExecutorBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            launcher: Arc::new(SystemLauncher::new()),
            exit_policy: ExitPolicy::default(),
            echo: Arc::new(echo_to_stdout),
        }
    }

    /// Set the launcher.
    pub fn launcher(mut self, launcher: impl Launcher + 'static) -> Self {
        self.launcher = Arc::new(launcher);
        self
    }

    /// Set a shared launcher.
    pub fn shared_launcher(mut self, launcher: Arc<dyn Launcher>) -> Self {
        self.launcher = launcher;
        self
    }

    /// Set the exit policy.
    pub fn exit_policy(mut self, policy: ExitPolicy) -> Self {
        self.exit_policy = policy;
        self
    }

    /// Set the echo sink.
    pub fn echo(mut self, echo: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.echo = Arc::new(echo);
        self
    }

    /// Build the executor.
    pub fn build(self) -> Executor {
        Executor {
            launcher: self.launcher,
            exit_policy: self.exit_policy,
            echo: self.echo,
        }
    }
}

impl Default for ExecutorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::ExecutionResult;
    use async_trait::async_trait;
    use std::io;
    use std::sync::Mutex;

    /// Records launched lines and answers with a fixed outcome.
    struct FixedLauncher {
        outcome: Option<ExecutionResult>,
        launched: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl Launcher for FixedLauncher {
        async fn launch(&self, command_line: &str) -> io::Result<ExecutionResult> {
            self.launched.lock().unwrap().push(command_line.to_string());
            self.outcome
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "program not found"))
        }
    }

    struct Harness {
        executor: Executor,
        launched: Arc<Mutex<Vec<String>>>,
        echoed: Arc<Mutex<Vec<String>>>,
    }

    fn harness(outcome: Option<ExecutionResult>, policy: ExitPolicy) -> Harness {
        let launched = Arc::new(Mutex::new(Vec::new()));
        let echoed = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&echoed);

        let executor = Executor::builder()
            .launcher(FixedLauncher {
                outcome,
                launched: Arc::clone(&launched),
            })
            .exit_policy(policy)
            .echo(move |line| sink.lock().unwrap().push(line.to_string()))
            .build();

        Harness {
            executor,
            launched,
            echoed,
        }
    }

    #[tokio::test]
    async fn test_success() {
        let h = harness(Some(ExecutionResult::exited(0)), ExitPolicy::default());
        assert!(h.executor.run(&["git.exe", "status"]).await.is_ok());
    }

    #[tokio::test]
    async fn test_nonzero_exit_carries_code() {
        let h = harness(Some(ExecutionResult::exited(2)), ExitPolicy::default());

        let err = h.executor.run(&["git.exe", "a b"]).await.unwrap_err();
        assert_eq!(
            err,
            ExecError::NonZeroExit {
                command_line: "git.exe \"a b\"".to_string(),
                code: Some(2),
            }
        );
    }

    #[tokio::test]
    async fn test_signaled_exit_is_failure() {
        let h = harness(Some(ExecutionResult::signaled()), ExitPolicy::default());

        let err = h.executor.run(&["git.exe"]).await.unwrap_err();
        assert!(matches!(err, ExecError::NonZeroExit { code: None, .. }));
    }

    #[tokio::test]
    async fn test_launch_failure() {
        let h = harness(None, ExitPolicy::default());

        let err = h.executor.run(&["missing.exe"]).await.unwrap_err();
        assert!(matches!(err, ExecError::LaunchFailed { .. }));
        assert!(err.to_string().contains("program not found"));
    }

    #[tokio::test]
    async fn test_robocopy_failures_are_swallowed() {
        let h = harness(Some(ExecutionResult::exited(3)), ExitPolicy::TolerateKnown);
        assert!(h.executor.run(&["robocopy.exe", "a", "b"]).await.is_ok());

        let h = harness(None, ExitPolicy::TolerateKnown);
        assert!(h.executor.run(&["robocopy.exe"]).await.is_ok());
    }

    #[tokio::test]
    async fn test_strict_policy_reports_robocopy() {
        let h = harness(Some(ExecutionResult::exited(1)), ExitPolicy::Strict);

        let err = h.executor.run(&["robocopy.exe"]).await.unwrap_err();
        assert_eq!(err.code(), Some(1));
    }

    #[tokio::test]
    async fn test_echo_and_launch_see_encoded_line() {
        let h = harness(Some(ExecutionResult::exited(0)), ExitPolicy::default());
        let args = ["pwsh.exe", "-Command", "& 'C:\\scoop\\scoop.ps1' update", ""];

        h.executor.run(&args).await.unwrap();

        let expected = encode_command_line(&args);
        assert_eq!(*h.echoed.lock().unwrap(), vec![expected.clone()]);
        assert_eq!(*h.launched.lock().unwrap(), vec![expected]);
    }

    #[tokio::test]
    async fn test_echo_happens_even_when_launch_fails() {
        let h = harness(None, ExitPolicy::default());

        let _ = h.executor.run(&["missing.exe"]).await;
        assert_eq!(*h.echoed.lock().unwrap(), vec!["missing.exe".to_string()]);
    }

    #[test]
    fn test_run_blocking() {
        let h = harness(Some(ExecutionResult::exited(5)), ExitPolicy::default());

        let err = h.executor.run_blocking(&["git.exe"]).unwrap_err();
        assert_eq!(err.code(), Some(5));
        assert_eq!(h.launched.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_default_policy_tolerates_known() {
        assert_eq!(Executor::new().exit_policy(), ExitPolicy::TolerateKnown);
    }
}
