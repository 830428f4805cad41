//! Path-valued attribute validation.

use std::path::Path;

use crate::error::{Result, SetupError};

/// Confirm that `value` names an existing file or directory.
///
/// Relative paths are resolved against the process working directory.
/// `attribute` is the option or keyword the value came from and appears in
/// the error message.
pub fn validate_path(attribute: &str, value: &Path) -> Result<()> {
    if value.exists() {
        return Ok(());
    }

    let err = SetupError::PathNotFound {
        attribute: attribute.to_string(),
        path: value.to_path_buf(),
    };
    tracing::error!("{}", err);
    Err(err)
}
