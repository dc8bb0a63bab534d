//! Scoped change of the process working directory.

use crate::error::Result;

use std::path::{Path, PathBuf};

/// Guard that restores the previous working directory when dropped.
///
/// The working directory is process-wide: callers must not hold two guards
/// from different threads at the same time.
#[derive(Debug)]
pub(crate) struct WorkingDir {
    previous: PathBuf,
}

impl WorkingDir {
    /// Change into `path` until the returned guard is dropped.
    pub fn enter(path: &Path) -> Result<Self> {
        let previous = std::env::current_dir()?;
        std::env::set_current_dir(path)?;
        log::debug!("cd {}", path.display());
        Ok(Self { previous })
    }
}

impl Drop for WorkingDir {
    fn drop(&mut self) {
        if let Err(e) = std::env::set_current_dir(&self.previous) {
            log::warn!(
                "Failed to restore working directory {}: {e}",
                self.previous.display()
            );
            return;
        }
        log::debug!("cd -");
    }
}
