use crate::config::Config;
use crate::debug_if_enabled;
use crate::error::{PlatformError, Result};
use crate::events::{WindowHandle, WindowIdentity};
use std::sync::Arc;
use tracing::{debug, info};
use windows::Win32::Foundation::{BOOL, HWND, LPARAM, TRUE};
use windows::Win32::UI::WindowsAndMessaging::{
    EnumWindows, GetWindowLongW, GetWindowTextLengthW, GetWindowTextW, IsWindowVisible,
    GWL_EXSTYLE, GWL_STYLE, WS_EX_TOOLWINDOW, WS_VISIBLE,
};

use super::r#trait::WindowDirectoryTrait;
use super::snapshot::WindowSnapshot;

pub struct Win32Directory {
    config: Arc<Config>,
}

impl Win32Directory {
    pub fn new(config: Arc<Config>) -> Self {
        info!("Инициализация Win32Directory");
        Self { config }
    }
}

/// Окно приложения: видимое, с заголовком, не tool window
unsafe fn is_real_window(hwnd: HWND) -> bool {
    if !IsWindowVisible(hwnd).as_bool() {
        return false;
    }
    if GetWindowTextLengthW(hwnd) == 0 {
        return false;
    }

    let style = GetWindowLongW(hwnd, GWL_STYLE) as u32;
    let ex_style = GetWindowLongW(hwnd, GWL_EXSTYLE) as u32;

    if ex_style & WS_EX_TOOLWINDOW.0 != 0 {
        return false;
    }
    style & WS_VISIBLE.0 != 0
}

unsafe fn window_title(hwnd: HWND) -> Option<String> {
    let len = GetWindowTextLengthW(hwnd);
    if len <= 0 {
        return None;
    }

    let mut buf: Vec<u16> = vec![0; len as usize + 1];
    let copied = GetWindowTextW(hwnd, &mut buf);
    if copied <= 0 {
        return None;
    }
    Some(String::from_utf16_lossy(&buf[..copied as usize]))
}

unsafe extern "system" fn enum_windows_callback(hwnd: HWND, lparam: LPARAM) -> BOOL {
    let windows = &mut *(lparam.0 as *mut Vec<(WindowHandle, String)>);

    if is_real_window(hwnd) {
        if let Some(title) = window_title(hwnd) {
            windows.push((WindowHandle(hwnd.0 as isize), title));
        }
    }
    TRUE
}

impl WindowDirectoryTrait for Win32Directory {
    fn enumerate(&self) -> Result<WindowSnapshot> {
        let mut found: Vec<(WindowHandle, String)> = Vec::new();

        unsafe {
            EnumWindows(
                Some(enum_windows_callback),
                LPARAM(&mut found as *mut Vec<(WindowHandle, String)> as isize),
            )
        }
        .map_err(|e| PlatformError::CallFailed {
            call: "EnumWindows",
            code: e.code().0,
        })?;

        debug!("EnumWindows вернул {} окон приложений", found.len());

        let max_chars = self.config.directory.title_max_chars;
        let windows: Vec<WindowIdentity> = found
            .iter()
            .map(|(handle, title)| WindowIdentity::with_title_limit(*handle, title, max_chars))
            .collect();

        for window in &windows {
            debug_if_enabled!("Найдено окно {}", window);
        }

        Ok(WindowSnapshot::capped(windows, self.config.directory.max_entries))
    }
}
