//! Static provisioning tables: packages, URLs, and helper script names.

/// User whose profile is provisioned when `LOCAL_USERNAME` is unset.
pub const DEFAULT_USERNAME: &str = "DailyDriver";

/// Root of local user profiles.
pub const USERS_ROOT: &str = "C:\\Users";

/// File name of the generated PowerShell profile.
pub const POWERSHELL_PROFILE_FILENAME: &str = "Microsoft.PowerShell_profile.ps1";

/// Archive directory, relative to the work dir.
pub const ARCHIVE_DIR: &str = "env";

/// Source of the Scoop installer script.
pub const SCOOP_INSTALLER_URL: &str = "https://get.scoop.sh";

/// Where the downloaded installer is written, relative to the work dir.
pub const SCOOP_INSTALLER_SCRIPT: &str = "InstallScoop.ps1";

/// Extra bucket added before installing packages.
pub const SCOOP_BUCKET: &str = "versions";

/// Packages installed with `scoop install`.
pub const SCOOP_PACKAGES: &[&str] = &[
    "7zip",
    "adb",
    "bun",
    "cloc",
    "dotnet-sdk",
    "dotnet-sdk-preview",
    "fastfetch",
    "ffmpeg",
    "gh",
    "git",
    "jq",
    "nodejs",
    "oh-my-posh",
    "python@3.13.9",
    "wget",
];

/// Package index serving the CUDA builds of PyTorch.
pub const PYTORCH_INDEX_URL: &str = "https://download.pytorch.org/whl/cu130";

/// Installed from [`PYTORCH_INDEX_URL`] in the first pip stage.
pub const PYTORCH_PACKAGES: &[&str] = &["torch", "torchvision"];

/// Installed from source in the second pip stage.
pub const PYTHON_PACKAGES: &[&str] = &[
    "git+https://github.com/giampaolo/psutil",
    "git+https://github.com/googleapis/python-genai",
    "git+https://github.com/spotDL/spotify-downloader",
    "git+https://github.com/yt-dlp/yt-dlp",
    "git+https://github.com/Yujia-Yan/Transkun",
];

/// Installed globally with bun.
pub const NPM_PACKAGES: &[&str] = &["@google/gemini-cli"];

/// Prompt theme loaded by the generated profile.
pub const OH_MY_POSH_THEME_URL: &str =
    "https://raw.githubusercontent.com/JanDeDobbeleer/oh-my-posh/main/themes/atomicBit.omp.json";

/// Junction helper run after the profile is written, expected in the work dir.
pub const MANAGE_JUNCTIONS_SCRIPT: &str = "ManageJunctions.ps1";
/// Copied into the archive when present.
pub const RECREATE_JUNCTIONS_SCRIPT: &str = "RecreateJunctions.ps1";

/// PowerShell host.
pub const PWSH: &str = "pwsh.exe";

/// Flags every PowerShell invocation starts with.
pub const PWSH_FLAGS: &[&str] = &["-ExecutionPolicy", "Bypass", "-NoProfile", "-NoLogo"];

/// Bulk copy tool used for the archive step.
pub const ROBOCOPY: &str = "robocopy.exe";

/// Flags passed to robocopy besides the thread count.
pub const ROBOCOPY_FLAGS: &[&str] = &["/e", "/nc", "/ndl", "/nfl", "/np", "/ns", "/xj"];
