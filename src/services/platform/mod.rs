//! WindowPlatform: the only place that talks to the OS window manager.
//!
//! The focus engine sees nothing but this trait. Win32 is the real backend,
//! dry-run logs every action and always succeeds.

mod dry_run;
#[cfg(test)]
pub mod scripted;
mod r#trait;
#[cfg(windows)]
mod win32;

pub use self::r#trait::{create_platform, ModifierKey, ShowCommand, WindowPlatform};
