//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input event shaping (pointer throttle, resize debounce)
//! - Device capability detection

pub mod device;
pub mod input;

pub use device::Capabilities;
pub use input::{PointerTracker, ResizeDebounce};
