use crate::config::Config;
use crate::error::Result;
use crate::events::DetectionEvent;
use std::sync::Arc;
use tokio::time::{interval, Duration, Interval};
use tracing::info;

use super::r#trait::DetectionTriggerTrait;

/// Повторяющаяся последовательность: пустые кадры, появление человека, уход
const EMULATED_COUNTS: &[u32] = &[0, 0, 0, 1, 2, 1, 0];

pub struct EmulatedTrigger {
    interval: Interval,
    frame: usize,
}

impl EmulatedTrigger {
    pub fn new(config: Arc<Config>) -> Self {
        info!(
            "Dry-run режим - детекции эмулируются каждые {}мс",
            config.trigger.emulated_interval_ms
        );
        Self {
            interval: interval(Duration::from_millis(config.trigger.emulated_interval_ms)),
            frame: 0,
        }
    }
}

#[async_trait::async_trait]
impl DetectionTriggerTrait for EmulatedTrigger {
    async fn next_event(&mut self) -> Result<Option<DetectionEvent>> {
        self.interval.tick().await;

        let count = EMULATED_COUNTS[self.frame % EMULATED_COUNTS.len()];
        self.frame += 1;
        Ok(Some(DetectionEvent::new(count)))
    }
}
