use std::fmt;
use std::time::Instant;

/// Результат обработки одного кадра детектором
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectionEvent {
    pub person_count: u32,
    pub timestamp: Instant,
}

impl DetectionEvent {
    pub fn new(person_count: u32) -> Self {
        Self {
            person_count,
            timestamp: Instant::now(),
        }
    }

    pub fn has_person(&self) -> bool {
        self.person_count > 0
    }
}

impl fmt::Display for DetectionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "людей в зоне: {} ({}ms ago)",
            self.person_count,
            self.timestamp.elapsed().as_millis()
        )
    }
}
