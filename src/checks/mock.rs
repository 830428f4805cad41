//! Mock toolkit runtime for testing.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::Result;

use super::runtime::{ToolkitReport, ToolkitRuntime};

/// Toolkit runtime with canned answers.
///
/// By default the package imports from nowhere (`module_location` is
/// `None`) and the core module is importable but defines no attributes.
#[derive(Debug)]
pub struct MockRuntime {
    module: Option<PathBuf>,
    core_importable: bool,
    attributes: HashMap<String, String>,
    loads: RefCell<Vec<PathBuf>>,
}

impl Default for MockRuntime {
    fn default() -> Self {
        Self {
            module: None,
            core_importable: true,
            attributes: HashMap::new(),
            loads: RefCell::new(Vec::new()),
        }
    }
}

impl MockRuntime {
    /// A runtime whose package cannot be located.
    pub fn new() -> Self {
        Self::default()
    }

    /// Report the package as importable from `path`.
    pub fn with_module(mut self, path: impl Into<PathBuf>) -> Self {
        self.module = Some(path.into());
        self
    }

    /// Define an attribute on the initialised toolkit.
    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    /// Make the core module fail to import.
    pub fn without_core(mut self) -> Self {
        self.core_importable = false;
        self
    }

    /// Prefixes passed to `load`, in order.
    pub fn loads(&self) -> Vec<PathBuf> {
        self.loads.borrow().clone()
    }
}

impl ToolkitRuntime for MockRuntime {
    fn module_location(&self) -> Result<Option<PathBuf>> {
        Ok(self.module.clone())
    }

    fn load(&self, prefix: &Path, attributes: &[&str]) -> Result<Option<ToolkitReport>> {
        self.loads.borrow_mut().push(prefix.to_path_buf());
        if !self.core_importable {
            return Ok(None);
        }

        let attributes = attributes
            .iter()
            .filter_map(|name| {
                self.attributes
                    .get(*name)
                    .map(|value| (name.to_string(), value.clone()))
            })
            .collect();
        Ok(Some(ToolkitReport { attributes }))
    }
}
