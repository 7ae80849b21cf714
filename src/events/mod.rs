pub mod detection;
pub mod outcome;
pub mod window;

pub use detection::DetectionEvent;
pub use outcome::{FocusAttemptOutcome, Strategy};
pub use window::{WindowHandle, WindowIdentity, WindowState};
