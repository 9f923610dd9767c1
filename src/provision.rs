//! Provisioning sequence.
//!
//! `Provisioner::run` installs Scoop, optional packages, and the PowerShell
//! profile, then archives the result. Steps run strictly in order and the first
//! error aborts the run.

use crate::catalog::{
    ARCHIVE_DIR, MANAGE_JUNCTIONS_SCRIPT, NPM_PACKAGES, OH_MY_POSH_THEME_URL,
    POWERSHELL_PROFILE_FILENAME, PWSH, PWSH_FLAGS, PYTHON_PACKAGES, PYTORCH_INDEX_URL,
    PYTORCH_PACKAGES, RECREATE_JUNCTIONS_SCRIPT, ROBOCOPY, ROBOCOPY_FLAGS, SCOOP_BUCKET,
    SCOOP_INSTALLER_SCRIPT, SCOOP_PACKAGES,
};
use crate::config::ProvisionConfig;
use crate::download::{to_ascii_bytes, Downloader, HttpDownloader};
use crate::error::ProvisionError;
use crate::executor::Executor;
use crate::layout::{path_arg, scoop_path_entries, Layout};
use crate::request::Invocation;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Format a heading: a dashed border as wide as `content`, the content, the border.
pub fn heading(content: &str) -> String {
    let border = "-".repeat(content.chars().count());
    format!("{border}\n{content}\n{border}")
}

fn write_heading(content: &str) {
    println!("{}", heading(content));
}

/// Render the PowerShell profile that puts Scoop on `Path` and starts oh-my-posh.
pub fn profile_content(path_env: &str) -> String {
    [
        format!("$env:Path += \";{}\"", scoop_path_entries(path_env).join(";")),
        format!(
            "oh-my-posh init pwsh --config \"{}\" | Invoke-Expression",
            OH_MY_POSH_THEME_URL
        ),
    ]
    .join("\n")
}

/// Drives one provisioning run.
pub struct Provisioner {
    config: ProvisionConfig,
    layout: Layout,
    executor: Executor,
    downloader: Arc<dyn Downloader>,
}

impl Provisioner {
    /// Provisioner using the real executor and HTTP downloader.
    pub fn new(config: ProvisionConfig) -> Self {
        Self::with_parts(config, Executor::new(), Arc::new(HttpDownloader::new()))
    }

    /// Provisioner with an explicit executor and downloader.
    pub fn with_parts(
        config: ProvisionConfig,
        executor: Executor,
        downloader: Arc<dyn Downloader>,
    ) -> Self {
        let layout = config.layout();
        Self {
            config,
            layout,
            executor,
            downloader,
        }
    }

    /// Profile layout this run provisions.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Run every step in order.
    ///
    /// # Errors
    ///
    /// Returns the first error; later steps are not attempted.
    pub async fn run(&self) -> Result<(), ProvisionError> {
        self.install_scoop().await?;

        if self.config.install_scoop_packages() {
            self.install_scoop_packages().await?;
        } else {
            tracing::debug!("Skipping Scoop packages");
        }

        if self.config.install_npm_packages() {
            self.install_npm_packages().await?;
        } else {
            tracing::debug!("Skipping NPM packages");
        }

        if self.python_ready() {
            self.install_python_packages().await?;
        } else {
            tracing::debug!("Skipping Python packages");
        }

        let profile = self.export_profile()?;
        self.manage_junctions().await?;
        self.archive(&profile).await?;

        tracing::info!(username = %self.config.username(), "Provisioning complete");
        Ok(())
    }

    fn work_path(&self, name: &str) -> PathBuf {
        self.config.work_dir().join(name)
    }

    async fn exec(&self, invocation: Invocation) -> Result<(), ProvisionError> {
        self.executor.run(&invocation.argv).await?;
        Ok(())
    }

    fn pwsh() -> Invocation {
        Invocation::new(PWSH).args(PWSH_FLAGS.iter().copied())
    }

    /// `pwsh.exe ... -Command "& '<scoop.ps1>' <subcommand>"`
    fn scoop(&self, subcommand: &str) -> Invocation {
        Self::pwsh().arg("-Command").arg(format!(
            "& '{}' {}",
            path_arg(&self.layout.scoop_ps1),
            subcommand
        ))
    }

    /// `pwsh.exe ... -File <script> -<param> <value>`
    fn pwsh_file(script: &Path, param: &str, value: &Path) -> Invocation {
        Self::pwsh()
            .arg("-File")
            .arg(path_arg(script))
            .arg(param)
            .arg(path_arg(value))
    }

    async fn install_scoop(&self) -> Result<(), ProvisionError> {
        write_heading("Installing Scoop...");

        let scoop_dir = &self.layout.scoop_dir;
        std::fs::create_dir_all(scoop_dir)
            .map_err(ProvisionError::io("failed to create scoop directory", scoop_dir))?;

        let url = self.config.installer_url();
        println!("Downloading Scoop installer from {}...", url);
        let script = self.downloader.fetch_text(url).await?;

        let installer = self.work_path(SCOOP_INSTALLER_SCRIPT);
        std::fs::write(&installer, to_ascii_bytes(&script))
            .map_err(ProvisionError::io("failed to write installer", &installer))?;

        self.exec(Self::pwsh_file(&installer, "-ScoopDir", scoop_dir))
            .await
    }

    async fn install_scoop_packages(&self) -> Result<(), ProvisionError> {
        write_heading("Adding additional bucket(s)...");
        self.exec(self.scoop(&format!("bucket add {}", SCOOP_BUCKET)))
            .await?;

        write_heading("Updating Scoop...");
        self.exec(self.scoop("update")).await?;

        write_heading("Installing Scoop packages...");
        self.exec(self.scoop(&format!("install {}", SCOOP_PACKAGES.join(" "))))
            .await?;

        write_heading("Purging package cache...");
        self.exec(self.scoop("cache rm *")).await
    }

    async fn install_npm_packages(&self) -> Result<(), ProvisionError> {
        write_heading("Installing Bun packages...");
        let bun = Invocation::new(path_arg(&self.layout.bun_exe))
            .args(["add", "-g"])
            .args(NPM_PACKAGES.iter().copied());
        self.exec(bun).await
    }

    /// Python packages need the flag plus an installed Scoop and pip.
    fn python_ready(&self) -> bool {
        self.config.install_python_packages()
            && self.layout.scoop_ps1.exists()
            && self.layout.pip_exe.exists()
    }

    async fn install_python_packages(&self) -> Result<(), ProvisionError> {
        let pip = path_arg(&self.layout.pip_exe);

        write_heading("Installing Python packages (stage 1 of 2)...");
        let pytorch = Invocation::new(pip.as_str())
            .arg("install")
            .args(PYTORCH_PACKAGES.iter().copied())
            .arg("--index-url")
            .arg(PYTORCH_INDEX_URL);
        self.exec(pytorch).await?;

        write_heading("Installing Python packages (stage 2 of 2)...");
        let packages = Invocation::new(pip)
            .arg("install")
            .args(PYTHON_PACKAGES.iter().copied());
        self.exec(packages).await
    }

    /// Write the profile and echo it back. Returns its path.
    fn export_profile(&self) -> Result<PathBuf, ProvisionError> {
        write_heading("Exporting configuration to PowerShell profile...");

        let profile = self.work_path(POWERSHELL_PROFILE_FILENAME);
        let content = profile_content(self.config.path_env());
        std::fs::write(&profile, to_ascii_bytes(&content))
            .map_err(ProvisionError::io("failed to write profile", &profile))?;

        let written = std::fs::read(&profile)
            .map_err(ProvisionError::io("failed to read profile", &profile))?;
        println!("{}", String::from_utf8_lossy(&written));

        Ok(profile)
    }

    async fn manage_junctions(&self) -> Result<(), ProvisionError> {
        write_heading("Managing junctions...");
        let script = self.work_path(MANAGE_JUNCTIONS_SCRIPT);
        self.exec(Self::pwsh_file(&script, "-Path", &self.layout.scoop_dir))
            .await
    }

    async fn archive(&self, profile: &Path) -> Result<(), ProvisionError> {
        write_heading("Copying contents for archiving...");

        let archive = self.work_path(ARCHIVE_DIR);
        std::fs::create_dir_all(&archive)
            .map_err(ProvisionError::io("failed to create archive directory", &archive))?;

        let profile_copy = archive.join(POWERSHELL_PROFILE_FILENAME);
        std::fs::copy(profile, &profile_copy)
            .map_err(ProvisionError::io("failed to archive profile", &profile_copy))?;

        let recreate = self.work_path(RECREATE_JUNCTIONS_SCRIPT);
        if recreate.exists() {
            let recreate_copy = archive.join(RECREATE_JUNCTIONS_SCRIPT);
            std::fs::copy(&recreate, &recreate_copy)
                .map_err(ProvisionError::io("failed to archive script", &recreate_copy))?;
        }

        let robocopy = Invocation::new(ROBOCOPY)
            .arg(path_arg(&self.layout.scoop_dir))
            .arg(path_arg(&archive.join("scoop")))
            .arg(ROBOCOPY_FLAGS[0])
            .arg(format!("/mt:{}", self.config.copy_threads()))
            .args(ROBOCOPY_FLAGS[1..].iter().copied());
        self.exec(robocopy).await
    }
}
