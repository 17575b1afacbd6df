//! Save slot persistence
//!
//! Features:
//! - One JSON record per slot (`save_slot{N}.json`)
//! - Missing or malformed files read as empty slots
//! - Most-recent-slot lookup for Continue

pub mod slots;

pub use slots::{SaveRecord, SaveStore, SlotInfo};
