use crate::config::Config;
use crate::error::Result;
use crate::events::{WindowHandle, WindowIdentity};
use std::sync::Arc;
use tracing::info;

use super::r#trait::WindowDirectoryTrait;
use super::snapshot::WindowSnapshot;

/// Фейковые окна для режима сухого запуска (дескриптор, заголовок)
pub const FAKE_WINDOWS: &[(isize, &str)] = &[
    (0x1001, "Terminal - dry_run"),
    (0x1002, "Browser - dry_run"),
    (0x1003, "Editor - dry_run"),
    (0x1004, "Game - dry_run"),
];

pub struct DryRunDirectory {
    config: Arc<Config>,
}

impl DryRunDirectory {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

impl WindowDirectoryTrait for DryRunDirectory {
    fn enumerate(&self) -> Result<WindowSnapshot> {
        info!("Dry-run режим - WindowDirectory возвращает {} фейковых окон", FAKE_WINDOWS.len());

        let windows = FAKE_WINDOWS
            .iter()
            .map(|(handle, title)| {
                WindowIdentity::with_title_limit(
                    WindowHandle(*handle),
                    title,
                    self.config.directory.title_max_chars,
                )
            })
            .collect();

        Ok(WindowSnapshot::capped(windows, self.config.directory.max_entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dry_run_directory_respects_cap() {
        let mut config = Config::default();
        config.directory.max_entries = 2;
        let directory = DryRunDirectory::new(Arc::new(config));

        let snapshot = directory.enumerate().unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.get(1).unwrap().title(), "Terminal - dry_run");
    }
}
