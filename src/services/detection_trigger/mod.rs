//! DetectionTrigger: per-frame person counts produced by an external detector.
//!
//! Only the count is consumed; the orchestrator decides when to act on it.

mod emulated;
mod line_reader;
mod r#trait;

pub use self::line_reader::LineTrigger;
pub use self::r#trait::{create_detection_trigger, DetectionTriggerTrait};
