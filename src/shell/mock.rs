//! Mock executable lookup for testing.
//!
//! ```
//! use qmesh_setup::shell::{ExecutableLookup, MockLookup};
//! use std::path::PathBuf;
//!
//! let lookup = MockLookup::new().with_tool("gmsh", "/usr/bin/gmsh");
//! assert_eq!(lookup.locate("gmsh").unwrap(), Some(PathBuf::from("/usr/bin/gmsh")));
//! assert_eq!(lookup.locate("qgis").unwrap(), None);
//! assert_eq!(lookup.calls(), vec!["gmsh".to_string(), "qgis".to_string()]);
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::Result;

use super::lookup::ExecutableLookup;

/// Lookup answering from a fixed table and recording every query.
#[derive(Debug, Default)]
pub struct MockLookup {
    tools: HashMap<String, PathBuf>,
    calls: RefCell<Vec<String>>,
}

impl MockLookup {
    /// A lookup that finds nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool as found at `path`.
    pub fn with_tool(mut self, tool: &str, path: impl Into<PathBuf>) -> Self {
        self.tools.insert(tool.to_string(), path.into());
        self
    }

    /// Tools queried so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl ExecutableLookup for MockLookup {
    fn facility(&self) -> &str {
        "mock"
    }

    fn locate(&self, tool: &str) -> Result<Option<PathBuf>> {
        self.calls.borrow_mut().push(tool.to_string());
        Ok(self.tools.get(tool).cloned())
    }
}
