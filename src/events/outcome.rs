use std::fmt;

/// Стратегия захвата фокуса. Порядок попыток фиксирован: [`Strategy::ORDER`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Restore + Show + SetForegroundWindow
    Standard,
    /// Синтетическое нажатие модификатора перед SetForegroundWindow
    KeystrokeWorkaround,
    /// AttachThreadInput между потоком активного окна и потоком цели
    ThreadAttach,
}

impl Strategy {
    pub const ORDER: [Strategy; 3] = [
        Strategy::Standard,
        Strategy::KeystrokeWorkaround,
        Strategy::ThreadAttach,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Standard => "standard",
            Strategy::KeystrokeWorkaround => "keystroke-workaround",
            Strategy::ThreadAttach => "thread-attach",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Итог попытки захвата фокуса. Движок всегда возвращает один из вариантов.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FocusAttemptOutcome {
    Success { title: String, strategy: Strategy },
    /// Окно больше не существует, список нужно перечитать
    StaleHandle { title: String },
    /// Все стратегии исчерпаны, вероятно нужны права администратора
    PermissionDenied { title: String, reason: String },
}

impl FocusAttemptOutcome {
    pub fn title(&self) -> &str {
        match self {
            FocusAttemptOutcome::Success { title, .. }
            | FocusAttemptOutcome::StaleHandle { title }
            | FocusAttemptOutcome::PermissionDenied { title, .. } => title,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, FocusAttemptOutcome::Success { .. })
    }
}

impl fmt::Display for FocusAttemptOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FocusAttemptOutcome::Success { title, strategy } => {
                write!(f, "✓ Переключено на: {} ({})", title, strategy)
            }
            FocusAttemptOutcome::StaleHandle { title } => {
                write!(f, "✗ Окно \"{}\" больше не существует. Обновите список окон.", title)
            }
            FocusAttemptOutcome::PermissionDenied { title, reason } => {
                write!(f, "✗ Не удалось переключиться на \"{}\": {}", title, reason)
            }
        }
    }
}
