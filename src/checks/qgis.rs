//! QGIS toolkit check.
//!
//! qmesh needs QGIS and its Python API. Neither is on the package index, so
//! the user installs them separately. The installation root can be given
//! explicitly; otherwise it is inferred from where the `qgis` Python package
//! lives and where the `qgis` executable is on PATH. The check then
//! initialises the toolkit headless and reads its version.

use std::path::{Path, PathBuf, MAIN_SEPARATOR_STR};
use std::sync::Once;

use crate::checks::path::validate_path;
use crate::checks::runtime::{ToolkitReport, ToolkitRuntime};
use crate::checks::status::VerificationResult;
use crate::context::DistributionContext;
use crate::error::{Result, SetupError};
use crate::shell::ExecutableLookup;

/// Canonical tool name.
pub const QGIS: &str = "qgis";

/// Attribute name reported when the QGIS location is not a path.
pub const QGIS_PATH_ATTR: &str = "qgis-path";

/// Version attributes, newest API first (QGIS 3, then QGIS 2).
pub const VERSION_ATTRIBUTES: &[&str] = &["Qgis.QGIS_VERSION", "QGis.QGIS_VERSION"];

/// Environment that lets the toolkit start without a display.
pub const HEADLESS_ENV: &[(&str, &str)] = &[
    ("QT_LOGGING_RULES", "qt5ct.debug=false"),
    ("QT_QPA_PLATFORM", "offscreen"),
];

static HEADLESS: Once = Once::new();

/// Set the headless toolkit environment for this process and its children.
///
/// Applied once; later calls are no-ops and nothing resets it.
pub fn enable_headless() {
    HEADLESS.call_once(|| {
        for (key, value) in HEADLESS_ENV {
            tracing::debug!("Setting {}={}", key, value);
            std::env::set_var(key, value);
        }
    });
}

/// Longest common leading run of path components.
///
/// Falls back to the filesystem root when the paths share nothing. This is
/// a heuristic: unusual layouts (virtual environments, relocated installs)
/// may yield a root that is not the real installation prefix.
pub fn common_root(a: &Path, b: &Path) -> PathBuf {
    let mut root = PathBuf::new();
    for (x, y) in a.components().zip(b.components()) {
        if x != y {
            break;
        }
        root.push(x);
    }

    if root.as_os_str().is_empty() {
        PathBuf::from(MAIN_SEPARATOR_STR)
    } else {
        root
    }
}

/// First candidate attribute the toolkit defines, in order.
pub fn select_version<'r>(report: &'r ToolkitReport, candidates: &[&str]) -> Option<&'r str> {
    candidates.iter().find_map(|name| report.get(name))
}

/// Locates and verifies a QGIS installation.
pub struct QgisCheck<'a> {
    lookup: &'a dyn ExecutableLookup,
    runtime: &'a dyn ToolkitRuntime,
}

impl<'a> QgisCheck<'a> {
    /// Create a check from a PATH lookup and a toolkit runtime.
    pub fn new(lookup: &'a dyn ExecutableLookup, runtime: &'a dyn ToolkitRuntime) -> Self {
        Self { lookup, runtime }
    }

    /// Resolve and verify in one go.
    pub fn run(
        &self,
        override_path: Option<&Path>,
        ctx: &mut DistributionContext,
    ) -> Result<VerificationResult> {
        let location = self.resolve(override_path, ctx)?;
        self.verify(ctx, &location)
    }

    /// Determine the QGIS installation root.
    ///
    /// Priority: `override_path`, then a location already held by `ctx`,
    /// then inference from the Python package and executable locations.
    pub fn resolve(
        &self,
        override_path: Option<&Path>,
        ctx: &DistributionContext,
    ) -> Result<PathBuf> {
        let candidate = match (override_path, &ctx.qgis_path) {
            (Some(path), _) => path.to_path_buf(),
            (None, Some(path)) => path.clone(),
            (None, None) => self.detect()?,
        };

        validate_path(QGIS_PATH_ATTR, &candidate)?;
        Ok(candidate)
    }

    fn detect(&self) -> Result<PathBuf> {
        tracing::warn!(
            "No specification of qgis path is present. Will try to detect a qgis installation"
        );

        let Some(module_path) = self.runtime.module_location()? else {
            let err = SetupError::ToolkitAbsent {
                tool: QGIS.to_string(),
                message: "Qmesh uses qgis for GIS operations, hence qgis must be installed. \
                          Host system does not appear to have a qgis installation."
                    .to_string(),
            };
            tracing::error!("{}", err);
            return Err(err);
        };

        let Some(bin_path) = self.lookup.locate(QGIS)? else {
            let err = SetupError::ToolNotFound {
                tool: QGIS.to_string(),
                message: format!(
                    "the qgis Python package is at {} but {} cannot find the qgis executable",
                    module_path.display(),
                    self.lookup.facility()
                ),
            };
            tracing::error!("{}", err);
            return Err(err);
        };

        let root = common_root(&module_path, &bin_path);
        tracing::debug!(
            "Derived qgis root {} from {} and {}",
            root.display(),
            module_path.display(),
            bin_path.display()
        );
        Ok(root)
    }

    /// Initialise the toolkit at `location` and read its version.
    ///
    /// On success `location` is recorded in `ctx`.
    pub fn verify(
        &self,
        ctx: &mut DistributionContext,
        location: &Path,
    ) -> Result<VerificationResult> {
        tracing::info!("Looking for qgis installation at {}", location.display());
        enable_headless();

        let Some(report) = self.runtime.load(location, VERSION_ATTRIBUTES)? else {
            let err = SetupError::ToolkitAbsent {
                tool: QGIS.to_string(),
                message: format!("Could not find qgis at {}", location.display()),
            };
            tracing::error!("{}", err);
            return Err(err);
        };

        let Some(version) = select_version(&report, VERSION_ATTRIBUTES) else {
            let err = SetupError::ToolNotFunctional {
                tool: QGIS.to_string(),
                path: location.to_path_buf(),
                message: format!("none of {} is defined", VERSION_ATTRIBUTES.join(", ")),
            };
            tracing::error!("{}", err);
            return Err(err);
        };

        tracing::info!("Found QGIS version {} at {}", version, location.display());
        ctx.qgis_path = Some(location.to_path_buf());
        Ok(VerificationResult::found(QGIS, version, location))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::MockRuntime;
    use crate::shell::MockLookup;
    use tempfile::TempDir;

    #[test]
    fn common_root_keeps_matching_prefix() {
        assert_eq!(
            common_root(
                Path::new("/usr/lib/gistoolkit"),
                Path::new("/usr/bin/gistoolkit-bin")
            ),
            PathBuf::from("/usr")
        );
    }

    #[test]
    fn common_root_stops_at_first_mismatch() {
        assert_eq!(
            common_root(
                Path::new("/opt/qgis/share/python/qgis"),
                Path::new("/opt/qgis/bin/share/qgis")
            ),
            PathBuf::from("/opt/qgis")
        );
    }

    #[test]
    fn common_root_of_disjoint_paths_is_filesystem_root() {
        assert_eq!(
            common_root(Path::new("/usr/lib/qgis"), Path::new("/opt/bin/qgis")),
            PathBuf::from("/")
        );
        assert_eq!(
            common_root(Path::new("lib/qgis"), Path::new("bin/qgis")),
            PathBuf::from(MAIN_SEPARATOR_STR)
        );
    }

    #[test]
    fn select_version_prefers_newer_attribute() {
        let report = ToolkitReport::parse("QGis.QGIS_VERSION=2.18.28\nQgis.QGIS_VERSION=3.28.4\n");
        assert_eq!(select_version(&report, VERSION_ATTRIBUTES), Some("3.28.4"));
    }

    #[test]
    fn select_version_falls_back_to_older_attribute() {
        let report = ToolkitReport::parse("QGis.QGIS_VERSION=2.18.28\n");
        assert_eq!(select_version(&report, VERSION_ATTRIBUTES), Some("2.18.28"));
    }

    #[test]
    fn select_version_none_when_no_candidate() {
        let report = ToolkitReport::default();
        assert_eq!(select_version(&report, VERSION_ATTRIBUTES), None);
    }

    #[test]
    fn override_is_returned_unchanged_without_probing() {
        let temp = TempDir::new().unwrap();
        let lookup = MockLookup::new().with_tool(QGIS, "/usr/bin/qgis");
        let runtime = MockRuntime::new().with_module("/usr/lib/python3/dist-packages/qgis");
        let check = QgisCheck::new(&lookup, &runtime);

        let resolved = check
            .resolve(Some(temp.path()), &DistributionContext::default())
            .unwrap();

        assert_eq!(resolved, temp.path());
        assert!(lookup.calls().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn detects_root_from_module_and_executable() {
        let lookup = MockLookup::new().with_tool(QGIS, "/usr/bin/gistoolkit-bin");
        let runtime = MockRuntime::new().with_module("/usr/lib/gistoolkit");
        let check = QgisCheck::new(&lookup, &runtime);

        let resolved = check.resolve(None, &DistributionContext::default()).unwrap();

        assert_eq!(resolved, PathBuf::from("/usr"));
        assert_eq!(lookup.calls(), vec!["qgis".to_string()]);
    }

    #[test]
    fn missing_module_is_toolkit_absent() {
        let lookup = MockLookup::new().with_tool(QGIS, "/usr/bin/qgis");
        let runtime = MockRuntime::new();
        let check = QgisCheck::new(&lookup, &runtime);

        let err = check
            .resolve(None, &DistributionContext::default())
            .unwrap_err();

        assert!(matches!(err, SetupError::ToolkitAbsent { .. }));
        assert!(err.to_string().contains("qgis"));
        assert!(lookup.calls().is_empty());
    }

    #[test]
    fn missing_executable_is_tool_not_found() {
        let lookup = MockLookup::new();
        let runtime = MockRuntime::new().with_module("/usr/lib/python3/dist-packages/qgis");
        let check = QgisCheck::new(&lookup, &runtime);

        let err = check
            .resolve(None, &DistributionContext::default())
            .unwrap_err();

        assert!(matches!(err, SetupError::ToolNotFound { .. }));
    }

    #[test]
    fn nonexistent_override_fails_validation() {
        let lookup = MockLookup::new();
        let runtime = MockRuntime::new();
        let check = QgisCheck::new(&lookup, &runtime);

        let err = check
            .resolve(
                Some(Path::new("/no/such/qgis/root")),
                &DistributionContext::default(),
            )
            .unwrap_err();

        assert!(
            matches!(err, SetupError::PathNotFound { ref attribute, .. } if attribute == "qgis-path")
        );
    }

    #[test]
    fn verify_records_location_and_version() {
        let temp = TempDir::new().unwrap();
        let lookup = MockLookup::new();
        let runtime = MockRuntime::new().with_attribute("Qgis.QGIS_VERSION", "3.34.1-Prizren");
        let check = QgisCheck::new(&lookup, &runtime);
        let mut ctx = DistributionContext::default();

        let result = check.verify(&mut ctx, temp.path()).unwrap();

        assert_eq!(result.version.as_deref(), Some("3.34.1-Prizren"));
        assert_eq!(ctx.qgis_path.as_deref(), Some(temp.path()));
        assert_eq!(runtime.loads(), vec![temp.path().to_path_buf()]);
    }

    #[test]
    fn verify_sets_headless_environment() {
        let temp = TempDir::new().unwrap();
        let lookup = MockLookup::new();
        let runtime = MockRuntime::new().with_attribute("QGis.QGIS_VERSION", "2.18.28");
        let check = QgisCheck::new(&lookup, &runtime);

        check
            .verify(&mut DistributionContext::default(), temp.path())
            .unwrap();

        assert_eq!(std::env::var("QT_QPA_PLATFORM").unwrap(), "offscreen");
        assert_eq!(
            std::env::var("QT_LOGGING_RULES").unwrap(),
            "qt5ct.debug=false"
        );
    }

    #[cfg(unix)]
    #[test]
    fn headless_environment_reaches_probe_children() {
        use crate::shell::{execute_captured, CommandOptions};

        enable_headless();
        let result = execute_captured(
            "/bin/sh",
            ["-c", "echo $QT_QPA_PLATFORM"],
            &CommandOptions::default(),
        )
        .unwrap();

        assert_eq!(result.first_line(), Some("offscreen"));
    }

    #[test]
    fn verify_without_core_is_toolkit_absent() {
        let temp = TempDir::new().unwrap();
        let lookup = MockLookup::new();
        let runtime = MockRuntime::new().without_core();
        let check = QgisCheck::new(&lookup, &runtime);
        let mut ctx = DistributionContext::default();

        let err = check.verify(&mut ctx, temp.path()).unwrap_err();

        assert!(matches!(err, SetupError::ToolkitAbsent { .. }));
        assert!(ctx.qgis_path.is_none());
    }

    #[test]
    fn verify_without_version_attribute_is_not_functional() {
        let temp = TempDir::new().unwrap();
        let lookup = MockLookup::new();
        let runtime = MockRuntime::new().with_attribute("Qgis.SOMETHING_ELSE", "x");
        let check = QgisCheck::new(&lookup, &runtime);
        let mut ctx = DistributionContext::default();

        let err = check.verify(&mut ctx, temp.path()).unwrap_err();

        assert!(matches!(err, SetupError::ToolNotFunctional { .. }));
    }
}
