//! Host platform detection.

/// Host platform families that differ in how tools are located and named.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Linux, macOS and other Unix-likes.
    Posix,
    /// Microsoft Windows.
    Windows,
}

impl Platform {
    /// The platform this binary was compiled for.
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else {
            Platform::Posix
        }
    }

    /// Program used to locate an executable on PATH.
    pub fn lookup_program(&self) -> &'static str {
        match self {
            Platform::Posix => "which",
            Platform::Windows => "where.exe",
        }
    }

    /// File name of a tool's executable on this platform.
    pub fn binary_name(&self, tool: &str) -> String {
        match self {
            Platform::Posix => tool.to_string(),
            Platform::Windows => format!("{}.exe", tool),
        }
    }
}

/// Check if running in a CI environment.
///
/// Checks common CI environment variables: `CI`, `GITHUB_ACTIONS`,
/// `GITLAB_CI`, `CIRCLECI`, `TRAVIS`, `JENKINS_URL`.
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("CIRCLECI").is_ok()
        || std::env::var("TRAVIS").is_ok()
        || std::env::var("JENKINS_URL").is_ok()
}
