//! KadiBoss gesture recognition
//!
//! Turns start/move/end pointer samples from one interaction surface into
//! swipe, double-tap and long-press gestures, and reports them through
//! per-gesture callbacks.

pub mod config;
pub mod error;
pub mod host;
pub mod input;
pub mod script;
pub mod stats;

pub use config::RecognizerConfig;
pub use error::{Error, Result};
pub use host::SurfaceHost;
pub use input::{
    classify, GestureCallbacks, GestureClassification, GestureEvent, GestureKind,
    GestureRecognizer, InputPoint, Point, SwipeDirection, SwipeMotion,
};
pub use script::{InteractionScript, ScriptEvent};
pub use stats::GestureStats;
