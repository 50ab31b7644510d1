use crate::errors::{AppError, AppResult};
use std::path::Path;

/// An existing output file is only replaced with `force`.
pub(crate) fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if path.exists() && !force {
        return Err(AppError::Export(format!(
            "'{}' already exists (use --force to overwrite)",
            path.display()
        )));
    }
    Ok(())
}
