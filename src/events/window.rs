use serde::{Deserialize, Serialize};
use std::fmt;

/// Максимальная длина заголовка для отображения
pub const DEFAULT_TITLE_MAX_CHARS: usize = 70;

/// Непрозрачный дескриптор окна платформы (HWND на Windows)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowHandle(pub isize);

impl WindowHandle {
    pub fn value(&self) -> isize {
        self.0
    }
}

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Снимок идентичности окна на момент перечисления.
///
/// Дескриптор может устареть в любой момент (окно закрыто, процесс завершён),
/// поэтому перед каждой попыткой захвата фокуса он проверяется заново.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowIdentity {
    handle: WindowHandle,
    title: String,
}

impl WindowIdentity {
    pub fn new(handle: WindowHandle, title: &str) -> Self {
        Self::with_title_limit(handle, title, DEFAULT_TITLE_MAX_CHARS)
    }

    pub fn with_title_limit(handle: WindowHandle, title: &str, max_chars: usize) -> Self {
        Self {
            handle,
            title: truncate_title(title, max_chars),
        }
    }

    pub fn handle(&self) -> WindowHandle {
        self.handle
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Проверить, соответствует ли окно паттерну (регистронезависимо)
    pub fn matches_pattern(&self, pattern: &str) -> bool {
        if pattern.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(&pattern.to_lowercase())
    }
}

impl fmt::Display for WindowIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" ({})", self.title, self.handle)
    }
}

/// Обрезает заголовок до `max_chars` символов и добавляет многоточие
pub fn truncate_title(title: &str, max_chars: usize) -> String {
    if title.chars().count() <= max_chars {
        return title.to_string();
    }
    let mut truncated: String = title.chars().take(max_chars).collect();
    truncated.push_str("...");
    truncated
}

/// Состояние окна. Запрашивается заново при каждой попытке, не кэшируется.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowState {
    pub exists: bool,
    pub is_minimized: bool,
    pub is_visible: bool,
    pub owner_thread_id: u32,
    pub owner_process_id: u32,
}
