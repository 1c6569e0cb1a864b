//! Input handling - gesture recognition and callback dispatch
//!
//! This module provides:
//! - Gesture recognition (swipes, double tap, long press, wheel swipes)
//! - Per-gesture callback registration for host surfaces

mod callbacks;
mod gestures;

pub use callbacks::*;
pub use gestures::*;
