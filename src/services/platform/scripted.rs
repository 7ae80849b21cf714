//! Scripted WindowPlatform for tests: records every call, failures are injected.

use crate::error::{PlatformError, PlatformResult};
use crate::events::{WindowHandle, WindowState};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::time::Duration;

use super::r#trait::{ModifierKey, ShowCommand, WindowPlatform};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformCall {
    IsWindow(WindowHandle),
    WindowState(WindowHandle),
    Show(WindowHandle, ShowCommand),
    SetForeground(WindowHandle),
    Keystroke(ModifierKey),
    ForegroundThread,
    Attach { from: u32, to: u32 },
    Detach { from: u32, to: u32 },
    Sleep(Duration),
}

impl PlatformCall {
    /// Вызовы, которые меняют состояние ОС
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            PlatformCall::Show(..)
                | PlatformCall::SetForeground(_)
                | PlatformCall::Keystroke(_)
                | PlatformCall::Attach { .. }
                | PlatformCall::Detach { .. }
        )
    }
}

pub struct ScriptedPlatform {
    exists: bool,
    minimized: bool,
    target_thread: u32,
    foreground_thread: u32,
    keystroke_fails: bool,
    attach_fails: bool,
    // Результаты SetForegroundWindow по порядку; когда очередь пуста - успех
    foreground_results: Mutex<VecDeque<bool>>,
    calls: Mutex<Vec<PlatformCall>>,
}

impl ScriptedPlatform {
    pub const TARGET_THREAD: u32 = 200;
    pub const FOREGROUND_THREAD: u32 = 100;

    pub fn new() -> Self {
        Self {
            exists: true,
            minimized: false,
            target_thread: Self::TARGET_THREAD,
            foreground_thread: Self::FOREGROUND_THREAD,
            keystroke_fails: false,
            attach_fails: false,
            foreground_results: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn stale(mut self) -> Self {
        self.exists = false;
        self
    }

    pub fn minimized(mut self) -> Self {
        self.minimized = true;
        self
    }

    pub fn same_thread(mut self) -> Self {
        self.foreground_thread = self.target_thread;
        self
    }

    pub fn failing_keystroke(mut self) -> Self {
        self.keystroke_fails = true;
        self
    }

    pub fn failing_attach(mut self) -> Self {
        self.attach_fails = true;
        self
    }

    pub fn foreground_results(self, results: &[bool]) -> Self {
        *self.foreground_results.lock() = results.iter().copied().collect();
        self
    }

    pub fn calls(&self) -> Vec<PlatformCall> {
        self.calls.lock().clone()
    }

    pub fn count(&self, predicate: impl Fn(&PlatformCall) -> bool) -> usize {
        self.calls.lock().iter().filter(|call| predicate(call)).count()
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                PlatformCall::Sleep(duration) => Some(*duration),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: PlatformCall) {
        self.calls.lock().push(call);
    }

    fn denied(call: &'static str) -> PlatformError {
        PlatformError::CallFailed { call, code: 5 }
    }
}

impl WindowPlatform for ScriptedPlatform {
    fn is_window(&self, handle: WindowHandle) -> bool {
        self.record(PlatformCall::IsWindow(handle));
        self.exists
    }

    fn window_state(&self, handle: WindowHandle) -> PlatformResult<WindowState> {
        self.record(PlatformCall::WindowState(handle));
        if !self.exists {
            return Err(PlatformError::InvalidHandle(handle));
        }
        Ok(WindowState {
            exists: true,
            is_minimized: self.minimized,
            is_visible: !self.minimized,
            owner_thread_id: self.target_thread,
            owner_process_id: 4242,
        })
    }

    fn show_window(&self, handle: WindowHandle, command: ShowCommand) -> PlatformResult<()> {
        self.record(PlatformCall::Show(handle, command));
        Ok(())
    }

    fn set_foreground(&self, handle: WindowHandle) -> PlatformResult<()> {
        self.record(PlatformCall::SetForeground(handle));
        match self.foreground_results.lock().pop_front() {
            Some(false) => Err(Self::denied("SetForegroundWindow")),
            _ => Ok(()),
        }
    }

    fn send_modifier_keystroke(&self, key: ModifierKey) -> PlatformResult<()> {
        self.record(PlatformCall::Keystroke(key));
        if self.keystroke_fails {
            return Err(Self::denied("SendInput"));
        }
        Ok(())
    }

    fn foreground_thread_id(&self) -> PlatformResult<u32> {
        self.record(PlatformCall::ForegroundThread);
        Ok(self.foreground_thread)
    }

    fn attach_thread_input(&self, from_thread: u32, to_thread: u32, attach: bool) -> PlatformResult<()> {
        if attach {
            self.record(PlatformCall::Attach { from: from_thread, to: to_thread });
            if self.attach_fails {
                return Err(Self::denied("AttachThreadInput"));
            }
        } else {
            self.record(PlatformCall::Detach { from: from_thread, to: to_thread });
        }
        Ok(())
    }

    fn sleep(&self, duration: Duration) {
        self.record(PlatformCall::Sleep(duration));
    }
}
