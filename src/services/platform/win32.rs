use crate::debug_if_enabled;
use crate::error::{PlatformError, PlatformResult};
use crate::events::{WindowHandle, WindowState};
use std::ffi::c_void;
use std::mem;
use tracing::info;
use windows::Win32::Foundation::{GetLastError, HWND};
use windows::Win32::System::Threading::AttachThreadInput;
use windows::Win32::UI::Input::KeyboardAndMouse::{
    SendInput, INPUT, INPUT_0, INPUT_KEYBOARD, KEYBDINPUT, KEYBD_EVENT_FLAGS, KEYEVENTF_KEYUP,
    VIRTUAL_KEY, VK_CONTROL, VK_MENU, VK_SHIFT,
};
use windows::Win32::UI::WindowsAndMessaging::{
    GetForegroundWindow, GetWindowThreadProcessId, IsIconic, IsWindow, IsWindowVisible,
    SetForegroundWindow, ShowWindow, SW_RESTORE, SW_SHOW,
};

use super::r#trait::{ModifierKey, ShowCommand, WindowPlatform};

pub struct Win32Platform;

impl Win32Platform {
    pub fn new() -> Self {
        info!("Инициализация Win32Platform");
        Self
    }
}

fn to_hwnd(handle: WindowHandle) -> HWND {
    HWND(handle.value() as *mut c_void)
}

fn last_error(call: &'static str) -> PlatformError {
    let code = unsafe { GetLastError() }.0 as i32;
    PlatformError::CallFailed { call, code }
}

fn virtual_key(key: ModifierKey) -> VIRTUAL_KEY {
    match key {
        ModifierKey::Alt => VK_MENU,
        ModifierKey::Ctrl => VK_CONTROL,
        ModifierKey::Shift => VK_SHIFT,
    }
}

fn keyboard_input(vk: VIRTUAL_KEY, flags: KEYBD_EVENT_FLAGS) -> INPUT {
    INPUT {
        r#type: INPUT_KEYBOARD,
        Anonymous: INPUT_0 {
            ki: KEYBDINPUT {
                wVk: vk,
                wScan: 0,
                dwFlags: flags,
                time: 0,
                dwExtraInfo: 0,
            },
        },
    }
}

impl WindowPlatform for Win32Platform {
    fn is_window(&self, handle: WindowHandle) -> bool {
        if handle.value() == 0 {
            return false;
        }
        unsafe { IsWindow(to_hwnd(handle)) }.as_bool()
    }

    fn window_state(&self, handle: WindowHandle) -> PlatformResult<WindowState> {
        if !self.is_window(handle) {
            return Err(PlatformError::InvalidHandle(handle));
        }

        let hwnd = to_hwnd(handle);
        let mut process_id: u32 = 0;
        let (is_minimized, is_visible, thread_id) = unsafe {
            (
                IsIconic(hwnd).as_bool(),
                IsWindowVisible(hwnd).as_bool(),
                GetWindowThreadProcessId(hwnd, Some(&mut process_id)),
            )
        };

        if thread_id == 0 {
            return Err(last_error("GetWindowThreadProcessId"));
        }

        Ok(WindowState {
            exists: true,
            is_minimized,
            is_visible,
            owner_thread_id: thread_id,
            owner_process_id: process_id,
        })
    }

    fn show_window(&self, handle: WindowHandle, command: ShowCommand) -> PlatformResult<()> {
        let cmd = match command {
            ShowCommand::Restore => SW_RESTORE,
            ShowCommand::Show => SW_SHOW,
        };

        // Возвращаемое значение ShowWindow - прежняя видимость, а не признак ошибки
        let _ = unsafe { ShowWindow(to_hwnd(handle), cmd) };

        if !self.is_window(handle) {
            return Err(PlatformError::InvalidHandle(handle));
        }
        debug_if_enabled!("ShowWindow({:?}) для {}", command, handle);
        Ok(())
    }

    fn set_foreground(&self, handle: WindowHandle) -> PlatformResult<()> {
        if unsafe { SetForegroundWindow(to_hwnd(handle)) }.as_bool() {
            debug_if_enabled!("SetForegroundWindow({}) выполнен", handle);
            Ok(())
        } else {
            Err(last_error("SetForegroundWindow"))
        }
    }

    fn send_modifier_keystroke(&self, key: ModifierKey) -> PlatformResult<()> {
        let vk = virtual_key(key);
        let inputs = [
            keyboard_input(vk, KEYBD_EVENT_FLAGS(0)),
            keyboard_input(vk, KEYEVENTF_KEYUP),
        ];

        let sent = unsafe { SendInput(&inputs, mem::size_of::<INPUT>() as i32) };
        if sent as usize != inputs.len() {
            return Err(last_error("SendInput"));
        }
        debug_if_enabled!("Синтетическое нажатие {} отправлено", key);
        Ok(())
    }

    fn foreground_thread_id(&self) -> PlatformResult<u32> {
        let foreground = unsafe { GetForegroundWindow() };
        if foreground.is_invalid() {
            return Err(PlatformError::NoForegroundWindow);
        }

        let thread_id = unsafe { GetWindowThreadProcessId(foreground, None) };
        if thread_id == 0 {
            return Err(last_error("GetWindowThreadProcessId"));
        }
        Ok(thread_id)
    }

    fn attach_thread_input(&self, from_thread: u32, to_thread: u32, attach: bool) -> PlatformResult<()> {
        if unsafe { AttachThreadInput(from_thread, to_thread, attach) }.as_bool() {
            Ok(())
        } else {
            Err(last_error("AttachThreadInput"))
        }
    }
}
