//! Per-gesture callback registration
//!
//! Hosts register interest in individual gesture kinds. Unregistered slots
//! are skipped on dispatch.

use super::gestures::{GestureEvent, GestureKind, SwipeDirection, SwipeMotion};

type Callback = Box<dyn FnMut()>;
type SwipeCallback = Box<dyn FnMut(SwipeMotion)>;

#[derive(Default)]
pub struct GestureCallbacks {
    swipe_up: Option<SwipeCallback>,
    swipe_down: Option<SwipeCallback>,
    swipe_left: Option<SwipeCallback>,
    swipe_right: Option<SwipeCallback>,
    double_tap: Option<Callback>,
    long_press: Option<Callback>,
}

impl GestureCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_swipe_up(mut self, f: impl FnMut(SwipeMotion) + 'static) -> Self {
        self.swipe_up = Some(Box::new(f));
        self
    }

    pub fn on_swipe_down(mut self, f: impl FnMut(SwipeMotion) + 'static) -> Self {
        self.swipe_down = Some(Box::new(f));
        self
    }

    pub fn on_swipe_left(mut self, f: impl FnMut(SwipeMotion) + 'static) -> Self {
        self.swipe_left = Some(Box::new(f));
        self
    }

    pub fn on_swipe_right(mut self, f: impl FnMut(SwipeMotion) + 'static) -> Self {
        self.swipe_right = Some(Box::new(f));
        self
    }

    pub fn on_double_tap(mut self, f: impl FnMut() + 'static) -> Self {
        self.double_tap = Some(Box::new(f));
        self
    }

    pub fn on_long_press(mut self, f: impl FnMut() + 'static) -> Self {
        self.long_press = Some(Box::new(f));
        self
    }

    /// Check whether a callback is registered for a gesture kind
    pub fn is_registered(&self, kind: GestureKind) -> bool {
        match kind {
            GestureKind::SwipeUp => self.swipe_up.is_some(),
            GestureKind::SwipeDown => self.swipe_down.is_some(),
            GestureKind::SwipeLeft => self.swipe_left.is_some(),
            GestureKind::SwipeRight => self.swipe_right.is_some(),
            GestureKind::DoubleTap => self.double_tap.is_some(),
            GestureKind::LongPress => self.long_press.is_some(),
        }
    }

    /// Invoke the callback for `event`. Returns false if none is registered.
    pub fn dispatch(&mut self, event: &GestureEvent) -> bool {
        match event {
            GestureEvent::Swipe(motion) => {
                let slot = match motion.direction {
                    SwipeDirection::Up => &mut self.swipe_up,
                    SwipeDirection::Down => &mut self.swipe_down,
                    SwipeDirection::Left => &mut self.swipe_left,
                    SwipeDirection::Right => &mut self.swipe_right,
                };
                match slot {
                    Some(f) => {
                        f(*motion);
                        true
                    }
                    None => false,
                }
            }
            GestureEvent::DoubleTap => call(&mut self.double_tap),
            GestureEvent::LongPress { .. } => call(&mut self.long_press),
        }
    }
}

fn call(slot: &mut Option<Callback>) -> bool {
    match slot {
        Some(f) => {
            f();
            true
        }
        None => false,
    }
}

impl std::fmt::Debug for GestureCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let registered: Vec<_> = GestureKind::ALL
            .into_iter()
            .filter(|kind| self.is_registered(*kind))
            .map(GestureKind::name)
            .collect();
        f.debug_struct("GestureCallbacks")
            .field("registered", &registered)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Point;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn swipe(direction: SwipeDirection) -> GestureEvent {
        GestureEvent::Swipe(SwipeMotion {
            direction,
            distance: 120.0,
            velocity: 1.2,
        })
    }

    #[test]
    fn test_dispatch_routes_by_kind() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let (up, left, tap) = (log.clone(), log.clone(), log.clone());
        let mut callbacks = GestureCallbacks::new()
            .on_swipe_up(move |m| up.borrow_mut().push(format!("up {}", m.distance)))
            .on_swipe_left(move |_| left.borrow_mut().push("left".to_string()))
            .on_double_tap(move || tap.borrow_mut().push("double".to_string()));

        assert!(callbacks.dispatch(&swipe(SwipeDirection::Up)));
        assert!(callbacks.dispatch(&swipe(SwipeDirection::Left)));
        assert!(callbacks.dispatch(&GestureEvent::DoubleTap));
        assert_eq!(*log.borrow(), vec!["up 120", "left", "double"]);
    }

    #[test]
    fn test_unregistered_slot_skipped() {
        let mut callbacks = GestureCallbacks::new().on_long_press(|| {});
        assert!(!callbacks.dispatch(&swipe(SwipeDirection::Right)));
        assert!(!callbacks.dispatch(&GestureEvent::DoubleTap));
        assert!(callbacks.dispatch(&GestureEvent::LongPress { position: Point::default() }));
        assert!(callbacks.is_registered(GestureKind::LongPress));
        assert!(!callbacks.is_registered(GestureKind::SwipeDown));
    }
}
