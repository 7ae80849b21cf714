use crate::error::{PlatformResult, Result};
use crate::events::{WindowHandle, WindowState};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Команда отображения окна (подмножество SW_*)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowCommand {
    Restore,
    Show,
}

/// Клавиша-модификатор для обхода защиты от перехвата фокуса
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifierKey {
    Alt,
    Ctrl,
    Shift,
}

impl ModifierKey {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "alt" => Some(ModifierKey::Alt),
            "ctrl" => Some(ModifierKey::Ctrl),
            "shift" => Some(ModifierKey::Shift),
            _ => None,
        }
    }
}

impl fmt::Display for ModifierKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModifierKey::Alt => "alt",
            ModifierKey::Ctrl => "ctrl",
            ModifierKey::Shift => "shift",
        };
        f.write_str(name)
    }
}

/// OS primitives used by the focus engine.
///
/// Every mutating call reports failure through `PlatformResult`; the engine turns
/// those failures into strategy fallthrough. `is_window` is total and never fails.
pub trait WindowPlatform: Send + Sync {
    /// Does the handle still refer to an existing window
    fn is_window(&self, handle: WindowHandle) -> bool;

    /// Fresh state of the window, never cached
    fn window_state(&self, handle: WindowHandle) -> PlatformResult<WindowState>;

    fn show_window(&self, handle: WindowHandle, command: ShowCommand) -> PlatformResult<()>;

    fn set_foreground(&self, handle: WindowHandle) -> PlatformResult<()>;

    /// Press and release a modifier key through the system input stream
    fn send_modifier_keystroke(&self, key: ModifierKey) -> PlatformResult<()>;

    /// Thread owning the current foreground window
    fn foreground_thread_id(&self) -> PlatformResult<u32>;

    fn attach_thread_input(&self, from_thread: u32, to_thread: u32, attach: bool) -> PlatformResult<()>;

    fn sleep(&self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

/// Factory function to create the platform backend based on the dry_run flag
pub fn create_platform(dry_run: bool) -> Result<Arc<dyn WindowPlatform>> {
    if dry_run {
        return Ok(Arc::new(super::dry_run::DryRunPlatform::new()));
    }

    #[cfg(windows)]
    {
        Ok(Arc::new(super::win32::Win32Platform::new()))
    }

    #[cfg(not(windows))]
    {
        Err(crate::switch_error!(
            service_unavailable,
            "управление фокусом окон доступно только на Windows, используйте --dry-run"
        ))
    }
}
