use crate::events::WindowHandle;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SwitchError {
    #[error("Ошибка конфигурации: {0}")]
    Config(#[from] anyhow::Error),

    #[error("Ошибка ввода-вывода: {0}")]
    Io(#[from] std::io::Error),

    #[error("Ошибка платформы: {0}")]
    Platform(#[from] PlatformError),

    #[error("Окно не найдено: {0}")]
    WindowNotFound(String),

    #[error("Сервис недоступен: {0}")]
    ServiceUnavailable(String),

    #[error("Внутренняя ошибка: {0}")]
    Internal(String),
}

impl SwitchError {
    pub fn window_not_found<T>(msg: impl Into<String>) -> Result<T> {
        Err(SwitchError::WindowNotFound(msg.into()))
    }
}

pub type Result<T> = std::result::Result<T, SwitchError>;

/// Отказ отдельного вызова ОС. Внутри стратегий превращается в переход к следующей.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    #[error("{call} завершился с ошибкой (код {code})")]
    CallFailed { call: &'static str, code: i32 },

    #[error("Недействительный дескриптор окна {0}")]
    InvalidHandle(WindowHandle),

    #[error("Нет активного окна переднего плана")]
    NoForegroundWindow,
}

pub type PlatformResult<T> = std::result::Result<T, PlatformError>;

// Удобные макросы для создания ошибок
#[macro_export]
macro_rules! switch_error {
    (window_not_found, $($arg:tt)*) => {
        $crate::error::SwitchError::WindowNotFound(format!($($arg)*))
    };
    (service_unavailable, $($arg:tt)*) => {
        $crate::error::SwitchError::ServiceUnavailable(format!($($arg)*))
    };
    (internal, $($arg:tt)*) => {
        $crate::error::SwitchError::Internal(format!($($arg)*))
    };
}
