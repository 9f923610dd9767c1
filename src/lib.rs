//! # winprov
//!
//! Windows development machine provisioning, built on a command-line encoder
//! that follows the Microsoft C runtime argv rules.
//!
//! `winprov` takes ordered lists of logical arguments, serializes each into one
//! flat command line that the child's C runtime splits back into exactly those
//! arguments, and runs it with inherited stdio.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use winprov::{encode_command_line, Executor};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! assert_eq!(
//!     encode_command_line(&["pwsh.exe", "-Command", "& 'scoop.ps1' update"]),
//!     r#"pwsh.exe -Command "& 'scoop.ps1' update""#
//! );
//!
//! let executor = Executor::new();
//! executor.run(&["git.exe", "--version"]).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Design Principles
//!
//! - **Generation only**: arguments are encoded, never parsed from a shell string
//! - **Quote on whitespace**: an argument is wrapped only if it is empty or contains whitespace
//! - **Fail fast**: every invocation runs once; any failure aborts the run
//! - **One exception**: `robocopy.exe` reports partial success through nonzero
//!   exit codes, so its failures are tolerated
//!
//! ## Platform Support
//!
//! The encoding targets Windows process creation. On other platforms the
//! system launcher falls back to `sh -c`, which is only meant for development.

mod catalog;
mod cmdline;
mod config;
mod download;
mod error;
mod executor;
mod launcher;
mod layout;
mod output;
mod provision;
mod request;
mod tolerance;

// Public API
pub use catalog::{
    DEFAULT_USERNAME, NPM_PACKAGES, PYTHON_PACKAGES, PYTORCH_INDEX_URL, PYTORCH_PACKAGES,
    ROBOCOPY, SCOOP_INSTALLER_URL, SCOOP_PACKAGES,
};
pub use cmdline::{encode_command_line, needs_quoting, split_command_line};
pub use config::{ProvisionConfig, ProvisionConfigBuilder};
pub use download::{Downloader, HttpDownloader};
pub use error::{ExecError, ProvisionError};
pub use executor::{echo_to_stdout, Echo, Executor, ExecutorBuilder};
pub use launcher::{Launcher, SystemLauncher};
pub use layout::Layout;
pub use output::ExecutionResult;
pub use provision::{heading, profile_content, Provisioner};
pub use request::Invocation;
pub use tolerance::{is_tolerated, ExitPolicy, TOLERATED_TOOLS};
