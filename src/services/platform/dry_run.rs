use crate::error::{PlatformError, PlatformResult};
use crate::events::{WindowHandle, WindowState};
use crate::services::window_directory::FAKE_WINDOWS;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::info;

use super::r#trait::{ModifierKey, ShowCommand, WindowPlatform};

/// Первое фейковое окно изначально считается активным
const INITIAL_FOREGROUND: usize = 0;

pub struct DryRunPlatform {
    windows: RwLock<HashMap<WindowHandle, WindowState>>,
    foreground: RwLock<Option<WindowHandle>>,
}

impl DryRunPlatform {
    pub fn new() -> Self {
        info!("Dry-run режим - WindowPlatform работает в режиме эмуляции");

        let windows = FAKE_WINDOWS
            .iter()
            .enumerate()
            .map(|(index, (handle, _title))| {
                let state = WindowState {
                    exists: true,
                    // Последнее окно эмулируем свёрнутым, чтобы пройти ветку restore
                    is_minimized: index + 1 == FAKE_WINDOWS.len(),
                    is_visible: true,
                    owner_thread_id: 100 + index as u32,
                    owner_process_id: 1000 + index as u32,
                };
                (WindowHandle(*handle), state)
            })
            .collect();

        let foreground = FAKE_WINDOWS
            .get(INITIAL_FOREGROUND)
            .map(|(handle, _)| WindowHandle(*handle));

        Self {
            windows: RwLock::new(windows),
            foreground: RwLock::new(foreground),
        }
    }
}

impl WindowPlatform for DryRunPlatform {
    fn is_window(&self, handle: WindowHandle) -> bool {
        self.windows
            .read()
            .get(&handle)
            .is_some_and(|state| state.exists)
    }

    fn window_state(&self, handle: WindowHandle) -> PlatformResult<WindowState> {
        self.windows
            .read()
            .get(&handle)
            .copied()
            .ok_or(PlatformError::InvalidHandle(handle))
    }

    fn show_window(&self, handle: WindowHandle, command: ShowCommand) -> PlatformResult<()> {
        let mut windows = self.windows.write();
        let state = windows
            .get_mut(&handle)
            .ok_or(PlatformError::InvalidHandle(handle))?;

        info!("[DRY RUN] ShowWindow({:?}) для {}", command, handle);
        state.is_visible = true;
        if command == ShowCommand::Restore {
            state.is_minimized = false;
        }
        Ok(())
    }

    fn set_foreground(&self, handle: WindowHandle) -> PlatformResult<()> {
        if !self.is_window(handle) {
            return Err(PlatformError::InvalidHandle(handle));
        }
        info!("[DRY RUN] SetForegroundWindow({})", handle);
        *self.foreground.write() = Some(handle);
        Ok(())
    }

    fn send_modifier_keystroke(&self, key: ModifierKey) -> PlatformResult<()> {
        info!("[DRY RUN] Синтетическое нажатие {}", key);
        Ok(())
    }

    fn foreground_thread_id(&self) -> PlatformResult<u32> {
        let foreground = (*self.foreground.read()).ok_or(PlatformError::NoForegroundWindow)?;
        self.window_state(foreground).map(|state| state.owner_thread_id)
    }

    fn attach_thread_input(&self, from_thread: u32, to_thread: u32, attach: bool) -> PlatformResult<()> {
        let action = if attach { "attach" } else { "detach" };
        info!("[DRY RUN] AttachThreadInput {} {} -> {}", action, from_thread, to_thread);
        Ok(())
    }
}
