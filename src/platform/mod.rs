//! Platform abstraction layer
//!
//! Collaborators the frame loop talks to instead of the browser or OS
//! directly:
//! - Time (`Clock`, `FrameClock` for per-frame dt)
//! - Input events and held-key state (`InputSource`)

pub mod input;
pub mod time;

pub use input::{Autopilot, InputEvent, InputSource, InputState, Key, read_controls};
pub use time::{Clock, FrameClock, ManualClock};

#[cfg(not(target_arch = "wasm32"))]
pub use time::SystemClock;
