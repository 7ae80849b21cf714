pub mod detection_trigger;
pub mod focus_engine;
pub mod orchestrator;
pub mod platform;
pub mod window_directory;

pub use detection_trigger::create_detection_trigger;
pub use focus_engine::{FocusEngine, FocusSettings};
pub use orchestrator::{Orchestrator, RunSummary};
pub use platform::create_platform;
pub use window_directory::{create_window_directory, WindowSnapshot};
