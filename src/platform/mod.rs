//! Platform abstraction layer
//!
//! Contracts between the engine and whatever hosts it:
//! - Time/ticks
//! - Input events

pub mod input;
pub mod time;

pub use input::{InputEvent, Key, PointerButton, TickInput};
pub use time::{Clock, FixedStepClock, SystemClock};
