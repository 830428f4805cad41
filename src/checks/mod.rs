//! External tool checks.
//!
//! Each check resolves where a tool lives (explicit override, location
//! already in the [`DistributionContext`](crate::context::DistributionContext),
//! or a host probe), validates that the path exists, then verifies the tool
//! actually works and records the location for the metadata writers.
//!
//! # Modules
//!
//! - [`path`] - Existence check for path-valued options
//! - [`gmsh`] - gmsh mesh generator
//! - [`qgis`] - QGIS toolkit and its Python API
//! - [`runtime`] - Python-backed access to the QGIS API
//! - [`status`] - Verification result type
//!
//! # Example
//!
//! ```
//! use qmesh_setup::checks::{GmshCheck, VerificationResult};
//! use qmesh_setup::context::DistributionContext;
//! use qmesh_setup::shell::MockLookup;
//! use qmesh_setup::SetupError;
//!
//! let lookup = MockLookup::new();
//! let check = GmshCheck::new(&lookup);
//! let err = check.resolve(None, &DistributionContext::default()).unwrap_err();
//! assert!(matches!(err, SetupError::ToolNotFound { .. }));
//! ```

pub mod gmsh;
pub mod mock;
pub mod path;
pub mod qgis;
pub mod runtime;
pub mod status;

pub use gmsh::{GmshCheck, GMSH};
pub use mock::MockRuntime;
pub use path::validate_path;
pub use qgis::{common_root, enable_headless, select_version, QgisCheck, QGIS, VERSION_ATTRIBUTES};
pub use runtime::{PythonRuntime, ToolkitReport, ToolkitRuntime};
pub use status::VerificationResult;
