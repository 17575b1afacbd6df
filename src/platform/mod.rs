//! Platform abstraction layer
//!
//! Handles the boundary with whatever drives the game:
//! - Discrete input events and held-key state
//! - Frame pacing

pub mod clock;
pub mod input;

pub use clock::FrameClock;
pub use input::{HeldInput, InputEvent, Key, MouseButton};
