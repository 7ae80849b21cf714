use crate::config::Config;
use crate::error::Result;
use crate::events::DetectionEvent;
use std::sync::Arc;

/// Trait for per-frame person-count sources
#[async_trait::async_trait]
pub trait DetectionTriggerTrait: Send {
    /// Next processed frame, `None` when the source is exhausted
    async fn next_event(&mut self) -> Result<Option<DetectionEvent>>;
}

/// Factory function to create an appropriate detection source based on the dry_run flag
pub fn create_detection_trigger(
    config: Arc<Config>,
    dry_run: bool,
) -> Result<Box<dyn DetectionTriggerTrait>> {
    if dry_run || config.trigger.source == "emulated" {
        Ok(Box::new(super::emulated::EmulatedTrigger::new(config)))
    } else {
        Ok(Box::new(super::line_reader::LineTrigger::stdin()))
    }
}
