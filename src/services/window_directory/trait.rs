use crate::config::Config;
use crate::error::Result;
use std::sync::Arc;

use super::snapshot::WindowSnapshot;

/// Trait for window directories that enumerate candidate target windows
pub trait WindowDirectoryTrait: Send + Sync {
    /// Take a snapshot of the currently visible application windows
    fn enumerate(&self) -> Result<WindowSnapshot>;
}

/// Factory function to create an appropriate window directory based on the dry_run flag
pub fn create_window_directory(
    config: Arc<Config>,
    dry_run: bool,
) -> Result<Box<dyn WindowDirectoryTrait>> {
    if dry_run {
        return Ok(Box::new(super::dry_run::DryRunDirectory::new(config)));
    }

    #[cfg(windows)]
    {
        Ok(Box::new(super::win32::Win32Directory::new(config)))
    }

    #[cfg(not(windows))]
    {
        Err(crate::switch_error!(
            service_unavailable,
            "перечисление окон доступно только на Windows, используйте --dry-run"
        ))
    }
}
