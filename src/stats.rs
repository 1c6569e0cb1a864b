//! Gesture tallies for the demo and statistics screens

use serde::{Deserialize, Serialize};

use crate::input::GestureKind;

/// One counter per gesture kind. Owned by the host, never shared globally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GestureStats {
    pub swipe_up: u32,
    pub swipe_down: u32,
    pub swipe_left: u32,
    pub swipe_right: u32,
    pub double_tap: u32,
    pub long_press: u32,
}

impl GestureStats {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&mut self, kind: GestureKind) -> &mut u32 {
        match kind {
            GestureKind::SwipeUp => &mut self.swipe_up,
            GestureKind::SwipeDown => &mut self.swipe_down,
            GestureKind::SwipeLeft => &mut self.swipe_left,
            GestureKind::SwipeRight => &mut self.swipe_right,
            GestureKind::DoubleTap => &mut self.double_tap,
            GestureKind::LongPress => &mut self.long_press,
        }
    }

    pub fn record(&mut self, kind: GestureKind) {
        let slot = self.slot(kind);
        *slot = slot.saturating_add(1);
    }

    pub fn count(&self, kind: GestureKind) -> u32 {
        match kind {
            GestureKind::SwipeUp => self.swipe_up,
            GestureKind::SwipeDown => self.swipe_down,
            GestureKind::SwipeLeft => self.swipe_left,
            GestureKind::SwipeRight => self.swipe_right,
            GestureKind::DoubleTap => self.double_tap,
            GestureKind::LongPress => self.long_press,
        }
    }

    pub fn total(&self) -> u32 {
        GestureKind::ALL.iter().map(|kind| self.count(*kind)).sum()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_total() {
        let mut stats = GestureStats::new();
        stats.record(GestureKind::SwipeUp);
        stats.record(GestureKind::SwipeUp);
        stats.record(GestureKind::LongPress);
        assert_eq!(stats.count(GestureKind::SwipeUp), 2);
        assert_eq!(stats.count(GestureKind::DoubleTap), 0);
        assert_eq!(stats.total(), 3);

        stats.reset();
        assert_eq!(stats.total(), 0);
    }

    #[test]
    fn test_json_field_names() {
        let mut stats = GestureStats::new();
        stats.record(GestureKind::DoubleTap);
        let json = serde_json::to_value(stats).unwrap();
        assert_eq!(json["double_tap"], 1);
        assert_eq!(json["swipe_left"], 0);
    }
}
