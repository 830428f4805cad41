//! Verification result types.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static VERSION_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)+)").expect("version pattern is valid"));

/// Outcome of checking one external tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationResult {
    /// Tool name (e.g., "gmsh", "qgis").
    pub tool: String,
    /// Whether a functional installation was found.
    pub found: bool,
    /// Version string as reported by the tool.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Dotted version number embedded in `version`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_number: Option<String>,
    /// Validated location of the tool.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_path: Option<PathBuf>,
}

impl VerificationResult {
    /// A functional installation at `path` reporting `version`.
    pub fn found(tool: &str, version: impl Into<String>, path: &Path) -> Self {
        let version = version.into();
        Self {
            tool: tool.to_string(),
            found: true,
            version_number: version_number(&version),
            version: Some(version),
            resolved_path: Some(path.to_path_buf()),
        }
    }

    /// No functional installation.
    pub fn missing(tool: &str) -> Self {
        Self {
            tool: tool.to_string(),
            found: false,
            version: None,
            version_number: None,
            resolved_path: None,
        }
    }
}

/// Dotted version number embedded in a reported version string.
///
/// `"MeshGen 4.2.0"` yields `"4.2.0"`; a bare `"3.28.4-Firenze"` yields
/// `"3.28.4"`.
fn version_number(version: &str) -> Option<String> {
    VERSION_NUMBER
        .captures(version)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn found_carries_version_and_path() {
        let result = VerificationResult::found("gmsh", "4.11.1", Path::new("/usr/bin/gmsh"));
        assert!(result.found);
        assert_eq!(result.version.as_deref(), Some("4.11.1"));
        assert_eq!(result.resolved_path, Some(PathBuf::from("/usr/bin/gmsh")));
    }

    #[test]
    fn missing_has_no_details() {
        let result = VerificationResult::missing("qgis");
        assert!(!result.found);
        assert!(result.version.is_none());
        assert!(result.resolved_path.is_none());
        assert!(result.version_number.as_deref().is_none());
    }

    #[test]
    fn version_number_extracts_dotted_digits() {
        let result = VerificationResult::found("gmsh", "MeshGen 4.2.0", Path::new("/x"));
        assert_eq!(result.version_number.as_deref(), Some("4.2.0"));

        let result = VerificationResult::found("qgis", "3.28.4-Firenze", Path::new("/x"));
        assert_eq!(result.version_number.as_deref(), Some("3.28.4"));
    }

    #[test]
    fn version_number_absent_without_digits() {
        let result = VerificationResult::found("gmsh", "development build", Path::new("/x"));
        assert!(result.version_number.as_deref().is_none());
    }

    #[test]
    fn serializes_version_number() {
        let result = VerificationResult::found("qgis", "3.28.4-Firenze", Path::new("/usr"));
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["version"], "3.28.4-Firenze");
        assert_eq!(json["version_number"], "3.28.4");
    }

    #[test]
    fn serializes_without_empty_fields() {
        let json = serde_json::to_string(&VerificationResult::missing("gmsh")).unwrap();
        assert_eq!(json, r#"{"tool":"gmsh","found":false}"#);
    }
}
