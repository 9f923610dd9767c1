//! Provisioning configuration.
//!
//! Settings come from the process environment (`LOCAL_USERNAME`,
//! `INSTALL_*_PACKAGES`, `Path`) and can be overridden through the builder,
//! which is what the command-line flags do.

use crate::catalog::{DEFAULT_USERNAME, SCOOP_INSTALLER_URL};
use crate::error::ProvisionError;
use crate::layout::Layout;
use std::path::PathBuf;

/// Environment variable naming the user to provision.
pub const ENV_USERNAME: &str = "LOCAL_USERNAME";
/// Set to `on` to install Scoop packages.
pub const ENV_SCOOP_PACKAGES: &str = "INSTALL_SCOOP_PACKAGES";
/// Set to `on` to install NPM packages with bun.
pub const ENV_NPM_PACKAGES: &str = "INSTALL_NPM_PACKAGES";
/// Set to `on` to install Python packages with pip.
pub const ENV_PYTHON_PACKAGES: &str = "INSTALL_PYTHON_PACKAGES";

/// Value that enables an `INSTALL_*` flag. Anything else disables it.
pub const FLAG_ON: &str = "on";

/// Settings for one provisioning run.
///
/// Create using `ProvisionConfig::builder()` or `ProvisionConfig::from_env()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionConfig {
    /// Local user whose profile receives Scoop.
    username: String,

    /// Explicit profile directory, instead of `C:\Users\<username>`.
    user_profile: Option<PathBuf>,

    /// Directory holding helper scripts, the generated profile, and the archive.
    work_dir: PathBuf,

    install_scoop_packages: bool,
    install_npm_packages: bool,
    install_python_packages: bool,

    /// Raw `Path` value scanned for Scoop entries.
    path_env: String,

    /// Thread count passed to robocopy.
    copy_threads: usize,

    /// Where the Scoop installer is fetched from.
    installer_url: String,
}

impl ProvisionConfig {
    /// Create a new config builder.
    pub fn builder() -> ProvisionConfigBuilder {
        ProvisionConfigBuilder::new()
    }

    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ProvisionError> {
        Self::builder().with_env(|key| std::env::var(key).ok()).build()
    }

    /// Local user to provision.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Directory holding helper scripts, the profile, and the archive.
    pub fn work_dir(&self) -> &PathBuf {
        &self.work_dir
    }

    /// Whether the Scoop package stage runs.
    pub fn install_scoop_packages(&self) -> bool {
        self.install_scoop_packages
    }

    /// Whether the bun package stage runs.
    pub fn install_npm_packages(&self) -> bool {
        self.install_npm_packages
    }

    /// Whether the pip package stage is requested.
    pub fn install_python_packages(&self) -> bool {
        self.install_python_packages
    }

    /// Raw `Path` value scanned for Scoop entries.
    pub fn path_env(&self) -> &str {
        &self.path_env
    }

    /// Thread count passed to robocopy as `/mt`.
    pub fn copy_threads(&self) -> usize {
        self.copy_threads
    }

    /// Where the Scoop installer is fetched from.
    pub fn installer_url(&self) -> &str {
        &self.installer_url
    }

    /// Profile layout for the configured user.
    pub fn layout(&self) -> Layout {
        match &self.user_profile {
            Some(profile) => Layout::with_profile(profile.clone()),
            None => Layout::for_user(&self.username),
        }
    }
}

/// Builder for `ProvisionConfig`.
#[derive(Debug, Clone)]
pub struct ProvisionConfigBuilder {
    username: Option<String>,
    user_profile: Option<PathBuf>,
    work_dir: PathBuf,
    install_scoop_packages: bool,
    install_npm_packages: bool,
    install_python_packages: bool,
    path_env: String,
    copy_threads: Option<usize>,
    installer_url: String,
}

impl ProvisionConfigBuilder {
    /// Create a new builder with default settings.
    ///
    /// Every optional stage is off and the work dir is the current directory.
    pub fn new() -> Self {
        Self {
            username: None,
            user_profile: None,
            work_dir: PathBuf::from("."),
            install_scoop_packages: false,
            install_npm_packages: false,
            install_python_packages: false,
            path_env: String::new(),
            copy_threads: None,
            installer_url: SCOOP_INSTALLER_URL.to_string(),
        }
    }

    /// Apply environment variables through `lookup`.
    ///
    /// `INSTALL_*` flags are enabled only by the exact value `on`. The Scoop
    /// path entries come from `Path`, falling back to `PATH`.
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(username) = lookup(ENV_USERNAME).filter(|u| !u.is_empty()) {
            self.username = Some(username);
        }

        let flag = |key: &str| lookup(key).as_deref() == Some(FLAG_ON);
        self.install_scoop_packages = flag(ENV_SCOOP_PACKAGES);
        self.install_npm_packages = flag(ENV_NPM_PACKAGES);
        self.install_python_packages = flag(ENV_PYTHON_PACKAGES);

        self.path_env = lookup("Path")
            .or_else(|| lookup("PATH"))
            .unwrap_or_default();
        self
    }

    /// Set the user to provision.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Root the layout at an explicit profile directory.
    pub fn user_profile(mut self, path: impl Into<PathBuf>) -> Self {
        self.user_profile = Some(path.into());
        self
    }

    /// Set the work dir.
    pub fn work_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.work_dir = path.into();
        self
    }

    /// Enable or disable the Scoop package stage.
    pub fn install_scoop_packages(mut self, on: bool) -> Self {
        self.install_scoop_packages = on;
        self
    }

    /// Enable or disable the bun package stage.
    pub fn install_npm_packages(mut self, on: bool) -> Self {
        self.install_npm_packages = on;
        self
    }

    /// Enable or disable the pip package stage.
    pub fn install_python_packages(mut self, on: bool) -> Self {
        self.install_python_packages = on;
        self
    }

    /// Set the `Path` value scanned for Scoop entries.
    pub fn path_env(mut self, path_env: impl Into<String>) -> Self {
        self.path_env = path_env.into();
        self
    }

    /// Set the robocopy thread count. Defaults to the available parallelism.
    pub fn copy_threads(mut self, threads: usize) -> Self {
        self.copy_threads = Some(threads);
        self
    }

    /// Set the installer URL.
    pub fn installer_url(mut self, url: impl Into<String>) -> Self {
        self.installer_url = url.into();
        self
    }

    /// Build the config.
    ///
    /// # Errors
    ///
    /// Returns `ProvisionError::Config` if:
    /// - The username is empty or contains a path separator
    /// - The copy thread count is zero
    pub fn build(self) -> Result<ProvisionConfig, ProvisionError> {
        let username = self
            .username
            .unwrap_or_else(|| DEFAULT_USERNAME.to_string());

        if username.trim().is_empty() {
            return Err(ProvisionError::Config("username is empty".to_string()));
        }
        if username.contains(['\\', '/']) {
            return Err(ProvisionError::Config(format!(
                "username contains a path separator: {}",
                username
            )));
        }

        let copy_threads = match self.copy_threads {
            Some(0) => {
                return Err(ProvisionError::Config(
                    "copy thread count must be at least 1".to_string(),
                ))
            }
            Some(n) => n,
            None => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
        };

        Ok(ProvisionConfig {
            username,
            user_profile: self.user_profile,
            work_dir: self.work_dir,
            install_scoop_packages: self.install_scoop_packages,
            install_npm_packages: self.install_npm_packages,
            install_python_packages: self.install_python_packages,
            path_env: self.path_env,
            copy_threads,
            installer_url: self.installer_url,
        })
    }
}

impl Default for ProvisionConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
