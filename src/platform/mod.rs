//! Platform abstraction layer
//!
//! The embedding shell (window, terminal, test harness) translates its own
//! events into these types:
//! - Input events over logical keys
//! - Frame timing

pub mod clock;
pub mod input;

pub use clock::FrameClock;
pub use input::{Controls, InputEvent, Key};
