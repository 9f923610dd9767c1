//! Exit-status tolerance for tools with nonstandard exit codes.
//!
//! Some tools report partial success through nonzero exit codes. `robocopy.exe`
//! exits with 1-7 when files were copied, extra files were found, or files
//! mismatched. This module holds the allow-list of such tools and the policy
//! deciding whether it applies.

use crate::error::ExecError;

/// Policy for handling failures of tolerated tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExitPolicy {
    /// Swallow every failure of a tool in [`TOLERATED_TOOLS`] (default).
    ///
    /// All other tools still fail on launch errors and nonzero exits.
    #[default]
    TolerateKnown,

    /// Every launch failure and nonzero exit is an error.
    Strict,
}

/// Tools whose failures are swallowed under [`ExitPolicy::TolerateKnown`].
///
/// Matched exactly against the first logical argument. A full path or a
/// different spelling of the same tool does not match.
pub const TOLERATED_TOOLS: &[&str] = &["robocopy.exe"];

/// Check if the first logical argument names a tolerated tool.
pub fn is_tolerated(program: &str) -> bool {
    TOLERATED_TOOLS.iter().any(|&t| t == program)
}

/// Apply the policy to the outcome of an invocation.
///
/// # Returns
///
/// - `Ok(())` if the invocation succeeded, or failed but is tolerated
/// - `Err(error)` otherwise
pub fn apply<S: AsRef<str>>(
    args: &[S],
    result: Result<(), ExecError>,
    policy: ExitPolicy,
) -> Result<(), ExecError> {
    let error = match result {
        Ok(()) => return Ok(()),
        Err(error) => error,
    };

    match policy {
        ExitPolicy::Strict => Err(error),
        ExitPolicy::TolerateKnown => {
            let program: &str = args.first().map_or("", |s| s.as_ref());
            if is_tolerated(program) {
                tracing::warn!(
                    program,
                    code = ?error.code(),
                    error = %error,
                    "Ignoring failure of tolerated tool"
                );
                Ok(())
            } else {
                Err(error)
            }
        }
    }
}
