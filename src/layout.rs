//! Filesystem layout of the provisioned profile.

use crate::catalog::USERS_ROOT;
use std::path::{Path, PathBuf};

/// Locations inside a user's profile that provisioning touches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// `C:\Users\<user>`
    pub user_profile: PathBuf,
    /// `<profile>\scoop`
    pub scoop_dir: PathBuf,
    /// `<scoop>\shims\scoop.ps1`
    pub scoop_ps1: PathBuf,
    /// `<scoop>\apps\python\current\Scripts\pip.exe`
    pub pip_exe: PathBuf,
    /// `<scoop>\apps\bun\current\bun.exe`
    pub bun_exe: PathBuf,
}

impl Layout {
    /// Layout for `username` under `C:\Users`.
    ///
    /// Always joined with `\`, whatever the host.
    pub fn for_user(username: &str) -> Self {
        Self::with_profile(join(Path::new(USERS_ROOT), &[username]))
    }

    /// Layout rooted at an explicit profile directory.
    ///
    /// A root written with `\` keeps `\` for every child; any other root is
    /// joined with the host separator.
    pub fn with_profile(user_profile: impl Into<PathBuf>) -> Self {
        let user_profile = user_profile.into();
        let scoop_dir = join(&user_profile, &["scoop"]);

        Self {
            scoop_ps1: join(&scoop_dir, &["shims", "scoop.ps1"]),
            pip_exe: join(
                &scoop_dir,
                &["apps", "python", "current", "Scripts", "pip.exe"],
            ),
            bun_exe: join(&scoop_dir, &["apps", "bun", "current", "bun.exe"]),
            scoop_dir,
            user_profile,
        }
    }
}

/// Join `segments` onto `base` in the separator style of `base`.
fn join(base: &Path, segments: &[&str]) -> PathBuf {
    let root = base.to_string_lossy();
    if !root.contains('\\') {
        return segments.iter().fold(base.to_path_buf(), |path, s| path.join(s));
    }

    let mut joined = root.trim_end_matches('\\').to_string();
    for segment in segments {
        joined.push('\\');
        joined.push_str(segment);
    }
    PathBuf::from(joined)
}

/// Render a path as a logical argument.
pub fn path_arg(path: &Path) -> String {
    path.display().to_string()
}

/// Entries of a `;`-separated `Path` value that mention scoop (case-insensitive).
pub fn scoop_path_entries(path_env: &str) -> Vec<&str> {
    path_env
        .split(';')
        .filter(|entry| entry.to_lowercase().contains("scoop"))
        .collect()
}
