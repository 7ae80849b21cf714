//! WindowDirectory: responsibility and boundaries
//!
//! Enumerates visible application windows ONCE and hands out an immutable
//! WindowSnapshot. Nothing here is consulted again during a focus attempt;
//! staleness is the focus engine's validity check to detect.

mod dry_run;
mod snapshot;
mod r#trait;
#[cfg(windows)]
mod win32;

pub use self::dry_run::FAKE_WINDOWS;
pub use self::r#trait::{create_window_directory, WindowDirectoryTrait};
pub use self::snapshot::WindowSnapshot;
