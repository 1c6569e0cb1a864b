//! Gesture recognition for a single-pointer interaction surface
//!
//! One interaction (start, zero or more moves, end) is tracked at a time.
//! Supports:
//! - Swipes (up, down, left, right) classified from start/end displacement
//! - Double tap (two ends inside the double-tap window)
//! - Long press (pointer held still past the long-press delay)
//! - Wheel deltas as a direct swipe source for desktop mice
//!
//! The recognizer never reads a clock. Every input point carries its own
//! timestamp and the long-press timer is an explicit deadline: hosts either
//! call [`GestureRecognizer::tick`] when their timer fires, or simply keep
//! feeding events and let the next event observe the expired deadline.

use std::fmt;

use tracing::{debug, warn};

use crate::config::RecognizerConfig;

/// Position on the interaction surface, in logical pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// A sampled pointer position at a moment in time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputPoint {
    pub position: Point,
    pub timestamp_ms: u64,
}

impl InputPoint {
    pub fn new(x: f64, y: f64, timestamp_ms: u64) -> Self {
        Self {
            position: Point { x, y },
            timestamp_ms,
        }
    }
}

/// Direction of a swipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwipeDirection {
    Up,
    Down,
    Left,
    Right,
}

/// Measured swipe motion between interaction start and end
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeMotion {
    pub direction: SwipeDirection,
    /// Straight-line distance in pixels
    pub distance: f64,
    /// Average speed in px/ms
    pub velocity: f64,
}

/// Result of comparing a start and end point
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureClassification {
    Swipe(SwipeMotion),
    None,
}

/// The six kinds of gesture the recognizer can emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureKind {
    SwipeUp,
    SwipeDown,
    SwipeLeft,
    SwipeRight,
    DoubleTap,
    LongPress,
}

impl GestureKind {
    pub const ALL: [GestureKind; 6] = [
        GestureKind::SwipeUp,
        GestureKind::SwipeDown,
        GestureKind::SwipeLeft,
        GestureKind::SwipeRight,
        GestureKind::DoubleTap,
        GestureKind::LongPress,
    ];

    pub fn name(self) -> &'static str {
        match self {
            GestureKind::SwipeUp => "swipe_up",
            GestureKind::SwipeDown => "swipe_down",
            GestureKind::SwipeLeft => "swipe_left",
            GestureKind::SwipeRight => "swipe_right",
            GestureKind::DoubleTap => "double_tap",
            GestureKind::LongPress => "long_press",
        }
    }
}

impl fmt::Display for GestureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<SwipeDirection> for GestureKind {
    fn from(direction: SwipeDirection) -> Self {
        match direction {
            SwipeDirection::Up => GestureKind::SwipeUp,
            SwipeDirection::Down => GestureKind::SwipeDown,
            SwipeDirection::Left => GestureKind::SwipeLeft,
            SwipeDirection::Right => GestureKind::SwipeRight,
        }
    }
}

/// Recognized gesture
#[derive(Debug, Clone, PartialEq)]
pub enum GestureEvent {
    /// Swipe from a completed interaction, or a synthetic one from the wheel
    Swipe(SwipeMotion),

    /// Second tap inside the double-tap window
    DoubleTap,

    /// Pointer held without moving past the long-press delay
    LongPress { position: Point },
}

impl GestureEvent {
    pub fn kind(&self) -> GestureKind {
        match self {
            GestureEvent::Swipe(motion) => motion.direction.into(),
            GestureEvent::DoubleTap => GestureKind::DoubleTap,
            GestureEvent::LongPress { .. } => GestureKind::LongPress,
        }
    }
}

/// Classify the straight-line motion from `start` to `end`.
///
/// A swipe needs both distance and velocity strictly above their thresholds.
/// The dominant axis picks the direction; equal magnitudes resolve to the
/// vertical axis.
pub fn classify(
    config: &RecognizerConfig,
    start: &InputPoint,
    end: &InputPoint,
) -> GestureClassification {
    let dx = end.position.x - start.position.x;
    let dy = end.position.y - start.position.y;
    let dt = end.timestamp_ms.saturating_sub(start.timestamp_ms).max(1) as f64;

    let distance = (dx * dx + dy * dy).sqrt();
    let velocity = distance / dt;

    if distance <= config.swipe_distance_threshold_px
        || velocity <= config.swipe_velocity_threshold
    {
        return GestureClassification::None;
    }

    let direction = if dx.abs() > dy.abs() {
        if dx > 0.0 {
            SwipeDirection::Right
        } else {
            SwipeDirection::Left
        }
    } else if dy > 0.0 {
        SwipeDirection::Down
    } else {
        SwipeDirection::Up
    };

    GestureClassification::Swipe(SwipeMotion {
        direction,
        distance,
        velocity,
    })
}

/// Gesture recognizer bound to one interaction surface
#[derive(Debug, Clone)]
pub struct GestureRecognizer {
    config: RecognizerConfig,
    /// Start of the interaction being tracked
    active_start: Option<InputPoint>,
    /// Most recent move or end sample
    last_point: Option<InputPoint>,
    /// Timestamp of the last tap still eligible to pair into a double tap
    last_tap_ms: Option<u64>,
    /// Armed long-press timer, as an absolute deadline
    long_press_deadline: Option<u64>,
    /// Long press already emitted for the current interaction
    long_press_fired: bool,
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new(RecognizerConfig::default())
    }
}

impl GestureRecognizer {
    pub fn new(config: RecognizerConfig) -> Self {
        Self {
            config,
            active_start: None,
            last_point: None,
            last_tap_ms: None,
            long_press_deadline: None,
            long_press_fired: false,
        }
    }

    pub fn config(&self) -> &RecognizerConfig {
        &self.config
    }

    /// Check if an interaction is currently tracked
    pub fn is_tracking(&self) -> bool {
        self.active_start.is_some()
    }

    /// Deadline of the pending long-press timer, if armed
    pub fn long_press_deadline(&self) -> Option<u64> {
        self.long_press_deadline
    }

    /// Most recent move or end sample seen
    pub fn last_point(&self) -> Option<InputPoint> {
        self.last_point
    }

    /// Long-press timer callback. Fires once if the deadline has passed.
    pub fn tick(&mut self, now_ms: u64) -> Option<GestureEvent> {
        let deadline = self.long_press_deadline?;
        if now_ms < deadline {
            return None;
        }
        self.long_press_deadline = None;

        let start = self.active_start?;
        self.long_press_fired = true;
        debug!(
            x = start.position.x,
            y = start.position.y,
            held_ms = now_ms.saturating_sub(start.timestamp_ms),
            "Long press"
        );
        Some(GestureEvent::LongPress {
            position: start.position,
        })
    }

    /// Handle interaction start (pointer down / touch start).
    ///
    /// A start while another interaction is tracked replaces it. If the
    /// previous interaction's long-press deadline had already passed at this
    /// timestamp, that long press is returned.
    pub fn interaction_start(&mut self, point: InputPoint) -> Option<GestureEvent> {
        let expired = self.tick(point.timestamp_ms);

        if self.active_start.is_some() {
            debug!("Interaction start while tracking, replacing previous start");
        }

        self.active_start = Some(point);
        self.long_press_fired = false;
        self.long_press_deadline =
            Some(point.timestamp_ms.saturating_add(self.config.long_press_delay_ms));

        expired
    }

    /// Handle interaction move. Any move disarms a pending long press.
    pub fn interaction_move(&mut self, point: InputPoint) -> Option<GestureEvent> {
        if self.active_start.is_none() {
            return None;
        }

        let expired = self.tick(point.timestamp_ms);
        if self.long_press_deadline.take().is_some() {
            debug!("Move cancelled long press");
        }
        self.last_point = Some(point);

        expired
    }

    /// Handle interaction end (pointer up / touch end)
    pub fn interaction_end(&mut self, point: InputPoint) -> Option<GestureEvent> {
        let Some(start) = self.active_start else {
            warn!("Interaction end without start, ignoring");
            return None;
        };

        let expired = self.tick(point.timestamp_ms);

        self.active_start = None;
        self.long_press_deadline = None;
        self.last_point = Some(point);

        if std::mem::take(&mut self.long_press_fired) {
            // Interaction consumed by the long press
            return expired;
        }

        let now = point.timestamp_ms;
        if let Some(last_tap) = self.last_tap_ms {
            let elapsed = now.saturating_sub(last_tap);
            if elapsed > 0 && elapsed < self.config.double_tap_window_ms {
                debug!(elapsed_ms = elapsed, "Double tap");
                self.last_tap_ms = None;
                return Some(GestureEvent::DoubleTap);
            }
        }
        self.last_tap_ms = Some(now);

        match classify(&self.config, &start, &point) {
            GestureClassification::Swipe(motion) => {
                debug!(
                    direction = ?motion.direction,
                    distance = motion.distance,
                    velocity = motion.velocity,
                    "Swipe"
                );
                Some(GestureEvent::Swipe(motion))
            }
            GestureClassification::None => None,
        }
    }

    /// Handle interaction cancel - drop the tracked interaction
    pub fn interaction_cancel(&mut self) {
        self.active_start = None;
        self.long_press_deadline = None;
        self.long_press_fired = false;
    }

    /// Handle a wheel delta as a direct swipe, bypassing interaction tracking
    pub fn wheel_delta(&mut self, delta_y: f64) -> Option<GestureEvent> {
        let direction = if delta_y < self.config.wheel_up_threshold {
            SwipeDirection::Up
        } else if delta_y > self.config.wheel_down_threshold {
            SwipeDirection::Down
        } else {
            return None;
        };

        debug!(delta_y, ?direction, "Wheel swipe");
        Some(GestureEvent::Swipe(SwipeMotion {
            direction,
            distance: delta_y.abs(),
            velocity: 0.0,
        }))
    }
}
