//! Access to the QGIS Python API.
//!
//! QGIS is driven through its Python bindings, so probing it means running a
//! Python interpreter. [`ToolkitRuntime`] is the seam: [`PythonRuntime`]
//! shells out to a real interpreter, tests use
//! [`MockRuntime`](crate::checks::MockRuntime).

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Result, SetupError};
use crate::shell::{execute_captured, CommandOptions};

/// Exit status the probe scripts use for "module cannot be imported".
const IMPORT_FAILED: i32 = 3;

const MODULE_LOCATION_SCRIPT: &str = r#"
import importlib, sys
try:
    module = importlib.import_module(sys.argv[1])
except ImportError:
    sys.exit(3)
print(sys.argv[1] + ".__path__=" + module.__path__[0])
"#;

const LOAD_SCRIPT: &str = r#"
import importlib, sys
try:
    core = importlib.import_module("qgis.core")
except ImportError:
    sys.exit(3)
app = core.QgsApplication([], False)
app.setPrefixPath(sys.argv[1], True)
app.initQgis()
for name in sys.argv[2:]:
    owner, _, attr = name.partition(".")
    value = getattr(getattr(core, owner, None), attr, None)
    if value is not None:
        print(name + "=" + str(value))
app.exitQgis()
"#;

/// Attribute values reported by an initialised toolkit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolkitReport {
    /// Requested attributes that exist, keyed by dotted name.
    pub attributes: HashMap<String, String>,
}

impl ToolkitReport {
    /// Parse `name=value` lines; other lines are ignored.
    pub fn parse(output: &str) -> Self {
        let attributes = output
            .lines()
            .filter_map(|line| line.split_once('='))
            .map(|(name, value)| (name.trim().to_string(), value.trim().to_string()))
            .collect();
        Self { attributes }
    }

    /// Value of `name`, if the toolkit defines it.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// Capability to import and initialise the GIS toolkit.
pub trait ToolkitRuntime {
    /// Directory of the toolkit's top-level package.
    ///
    /// `Ok(None)` means the package cannot be imported.
    fn module_location(&self) -> Result<Option<PathBuf>>;

    /// Initialise the toolkit headless with `prefix` as installation root
    /// and report which of `attributes` it defines.
    ///
    /// `Ok(None)` means the toolkit's core module cannot be imported.
    fn load(&self, prefix: &Path, attributes: &[&str]) -> Result<Option<ToolkitReport>>;
}

/// Runtime backed by a Python interpreter with the QGIS bindings installed.
#[derive(Debug, Clone)]
pub struct PythonRuntime {
    interpreter: String,
    module: String,
    timeout: Option<Duration>,
}

impl PythonRuntime {
    /// Runtime for the `qgis` package under `interpreter`.
    pub fn new(interpreter: &str, timeout: Option<Duration>) -> Self {
        Self {
            interpreter: interpreter.to_string(),
            module: "qgis".to_string(),
            timeout,
        }
    }

    fn options(&self) -> CommandOptions {
        CommandOptions {
            timeout: self.timeout,
            ..Default::default()
        }
    }

    fn interpreter_error(&self, e: SetupError) -> SetupError {
        SetupError::ToolkitAbsent {
            tool: self.module.clone(),
            message: format!("Python interpreter '{}' could not be run: {}", self.interpreter, e),
        }
    }
}

impl ToolkitRuntime for PythonRuntime {
    fn module_location(&self) -> Result<Option<PathBuf>> {
        let result = execute_captured(
            &self.interpreter,
            ["-c", MODULE_LOCATION_SCRIPT, self.module.as_str()],
            &self.options(),
        )
        .map_err(|e| self.interpreter_error(e))?;

        if result.timed_out {
            return Err(SetupError::ToolNotFunctional {
                tool: self.module.clone(),
                path: PathBuf::from(&self.interpreter),
                message: format!("import did not finish within {:?}", result.duration),
            });
        }
        if !result.success {
            tracing::debug!(
                "Importing {} failed (exit {:?}): {}",
                self.module,
                result.exit_code,
                result.output.trim()
            );
            return Ok(None);
        }

        // Warnings the import prints share the captured stream, so only the
        // marked line counts.
        let key = format!("{}.__path__", self.module);
        let location = ToolkitReport::parse(&result.output)
            .get(&key)
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from);
        if location.is_none() {
            tracing::debug!("{} reported no package directory", self.interpreter);
        }
        Ok(location)
    }

    fn load(&self, prefix: &Path, attributes: &[&str]) -> Result<Option<ToolkitReport>> {
        let mut args = vec![
            "-c".to_string(),
            LOAD_SCRIPT.to_string(),
            prefix.to_string_lossy().into_owned(),
        ];
        args.extend(attributes.iter().map(|a| a.to_string()));

        let result = execute_captured(&self.interpreter, &args, &self.options())
            .map_err(|e| self.interpreter_error(e))?;

        if result.exit_code == Some(IMPORT_FAILED) {
            return Ok(None);
        }
        if !result.success {
            let message = if result.timed_out {
                format!("initialisation did not finish within {:?}", result.duration)
            } else {
                format!(
                    "initialisation exited with code {:?}: {}",
                    result.exit_code,
                    result.output.trim()
                )
            };
            return Err(SetupError::ToolNotFunctional {
                tool: self.module.clone(),
                path: prefix.to_path_buf(),
                message,
            });
        }

        Ok(Some(ToolkitReport::parse(&result.output)))
    }
}
