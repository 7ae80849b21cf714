use crate::events::WindowIdentity;
use std::time::Instant;

/// Неизменяемый снимок списка окон на момент перечисления
#[derive(Debug, Clone)]
pub struct WindowSnapshot {
    windows: Vec<WindowIdentity>,
    taken_at: Instant,
}

impl WindowSnapshot {
    /// Сохраняет порядок перечисления и оставляет первые `max_entries` окон
    pub fn capped(windows: Vec<WindowIdentity>, max_entries: usize) -> Self {
        let windows = windows.into_iter().take(max_entries).collect();
        Self {
            windows,
            taken_at: Instant::now(),
        }
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Окно по номеру из списка (нумерация с 1, как при выводе)
    pub fn get(&self, position: usize) -> Option<&WindowIdentity> {
        position.checked_sub(1).and_then(|index| self.windows.get(index))
    }

    /// Первое окно, заголовок которого содержит паттерн
    pub fn find_by_title(&self, pattern: &str) -> Option<&WindowIdentity> {
        self.windows.iter().find(|window| window.matches_pattern(pattern))
    }

    pub fn age_ms(&self) -> u128 {
        self.taken_at.elapsed().as_millis()
    }

    pub fn display_lines(&self) -> Vec<String> {
        self.windows
            .iter()
            .enumerate()
            .map(|(i, window)| format!("{}. {}", i + 1, window.title()))
            .collect()
    }
}
