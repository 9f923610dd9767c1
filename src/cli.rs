//! CLI argument parsing via clap.

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Provision a Windows development machine with Scoop and friends.
///
/// Flags override the corresponding environment variables.
#[derive(Debug, Parser)]
#[command(name = "winprov", version)]
pub struct Args {
    /// Local user to provision (default: LOCAL_USERNAME or DailyDriver).
    #[arg(short = 'u', long = "username")]
    pub username: Option<String>,

    /// Directory holding helper scripts, the generated profile, and the archive.
    #[arg(short = 'w', long = "work-dir", default_value = ".")]
    pub work_dir: PathBuf,

    /// Install Scoop packages (default: INSTALL_SCOOP_PACKAGES=on).
    #[arg(long = "scoop-packages")]
    pub scoop_packages: bool,

    /// Install NPM packages with bun (default: INSTALL_NPM_PACKAGES=on).
    #[arg(long = "npm-packages")]
    pub npm_packages: bool,

    /// Install Python packages with pip (default: INSTALL_PYTHON_PACKAGES=on).
    #[arg(long = "python-packages")]
    pub python_packages: bool,

    /// Thread count for the archive copy (default: available parallelism).
    #[arg(long = "copy-threads")]
    pub copy_threads: Option<usize>,
}

/// Log filter from a `RUST_LOG`-style spec, defaulting to `info`.
pub fn log_filter(spec: Option<&str>) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse_lossy(spec.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::{log_filter, Args};
    use clap::Parser;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn log_filter_defaults_to_info() {
        assert_eq!(log_filter(None).max_level_hint(), Some(LevelFilter::INFO));
        assert_eq!(log_filter(Some("")).max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn log_filter_honours_requested_level() {
        assert_eq!(
            log_filter(Some("debug")).max_level_hint(),
            Some(LevelFilter::DEBUG)
        );
        assert_eq!(
            log_filter(Some("trace")).max_level_hint(),
            Some(LevelFilter::TRACE)
        );
    }

    #[test]
    fn defaults_leave_environment_in_charge() {
        let args = Args::parse_from(["winprov"]);
        assert!(args.username.is_none());
        assert!(!args.scoop_packages);
        assert_eq!(args.work_dir, std::path::PathBuf::from("."));
    }

    #[test]
    fn flags_parse() {
        let args = Args::parse_from([
            "winprov",
            "--username",
            "alice",
            "--scoop-packages",
            "--python-packages",
            "--copy-threads",
            "4",
        ]);
        assert_eq!(args.username.as_deref(), Some("alice"));
        assert!(args.scoop_packages);
        assert!(!args.npm_packages);
        assert!(args.python_packages);
        assert_eq!(args.copy_threads, Some(4));
    }
}
