//! Host interaction surface
//!
//! The host owns one recognizer, the callbacks registered for it and the
//! statistics collected from it. Scripts are replayed either on a virtual
//! clock (instant, deterministic) or in real time on a calloop event loop
//! where the long-press timer is a cancellable timer source.

use std::time::{Duration, Instant};

use calloop::timer::{TimeoutAction, Timer};
use calloop::{EventLoop, LoopHandle, RegistrationToken};
use tracing::{debug, info, warn};

use crate::config::RecognizerConfig;
use crate::error::Result;
use crate::input::{GestureCallbacks, GestureEvent, GestureRecognizer};
use crate::script::{InteractionScript, ScriptEvent};
use crate::stats::GestureStats;

pub struct SurfaceHost {
    recognizer: GestureRecognizer,
    callbacks: GestureCallbacks,
    stats: GestureStats,
}

impl SurfaceHost {
    pub fn new(config: RecognizerConfig, callbacks: GestureCallbacks) -> Self {
        Self {
            recognizer: GestureRecognizer::new(config),
            callbacks,
            stats: GestureStats::new(),
        }
    }

    pub fn recognizer(&self) -> &GestureRecognizer {
        &self.recognizer
    }

    pub fn stats(&self) -> &GestureStats {
        &self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    /// Forward one input event to the recognizer
    pub fn deliver(&mut self, event: &ScriptEvent) -> Option<GestureEvent> {
        let gesture = match *event {
            ScriptEvent::Start { .. } => self.recognizer.interaction_start(event.point()?),
            ScriptEvent::Move { .. } => self.recognizer.interaction_move(event.point()?),
            ScriptEvent::End { .. } => self.recognizer.interaction_end(event.point()?),
            ScriptEvent::Cancel { .. } => {
                self.recognizer.interaction_cancel();
                None
            }
            ScriptEvent::Wheel { delta_y, .. } => self.recognizer.wheel_delta(delta_y),
        };
        self.emit(gesture)
    }

    /// Long-press timer expiry
    pub fn fire_timer(&mut self, now_ms: u64) -> Option<GestureEvent> {
        let gesture = self.recognizer.tick(now_ms);
        self.emit(gesture)
    }

    fn emit(&mut self, gesture: Option<GestureEvent>) -> Option<GestureEvent> {
        let gesture = gesture?;
        let kind = gesture.kind();
        self.stats.record(kind);
        if !self.callbacks.dispatch(&gesture) {
            debug!(%kind, "No callback registered");
        }
        info!(%kind, "Gesture");
        Some(gesture)
    }

    /// Replay a script on its own timestamps without waiting.
    ///
    /// A long-press deadline that falls before the next event fires first,
    /// and one still armed at the end of the script fires last.
    pub fn replay(&mut self, script: &InteractionScript) -> Vec<GestureEvent> {
        let mut emitted = Vec::new();
        for event in &script.events {
            if let Some(deadline) = self.recognizer.long_press_deadline() {
                if deadline <= event.timestamp() {
                    emitted.extend(self.fire_timer(deadline));
                }
            }
            emitted.extend(self.deliver(event));
        }
        if let Some(deadline) = self.recognizer.long_press_deadline() {
            emitted.extend(self.fire_timer(deadline));
        }
        emitted
    }

    /// Replay a script in real time on a calloop event loop
    pub fn replay_realtime(&mut self, script: &InteractionScript) -> Result<Vec<GestureEvent>> {
        let Some(base_ms) = script.start_time() else {
            return Ok(Vec::new());
        };

        let mut event_loop: EventLoop<Replay<'_>> = EventLoop::try_new()?;
        let handle = event_loop.handle();
        let origin = Instant::now();

        let mut state = Replay {
            host: self,
            events: script.events.clone(),
            next: 0,
            origin,
            base_ms,
            long_press: None,
            emitted: Vec::new(),
            done: false,
        };

        let timer_handle = handle.clone();
        handle
            .insert_source(Timer::from_deadline(origin), move |_, _, state| {
                state.deliver_next(&timer_handle);
                match state.next_instant() {
                    Some(at) => TimeoutAction::ToInstant(at),
                    None => {
                        state.done = true;
                        TimeoutAction::Drop
                    }
                }
            })
            .map_err(|e| e.error)?;

        info!(events = script.events.len(), "Replaying script in real time");
        while !(state.done && state.long_press.is_none()) {
            event_loop.dispatch(Some(Duration::from_millis(16)), &mut state)?;
        }

        // Timer registration failed somewhere; expire it on the script clock
        if let Some(deadline) = state.host.recognizer.long_press_deadline() {
            state.emitted.extend(state.host.fire_timer(deadline));
        }

        Ok(state.emitted)
    }
}

impl std::fmt::Debug for SurfaceHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SurfaceHost")
            .field("recognizer", &self.recognizer)
            .field("callbacks", &self.callbacks)
            .field("stats", &self.stats)
            .finish()
    }
}

/// Event loop state for a real-time replay
struct Replay<'h> {
    host: &'h mut SurfaceHost,
    events: Vec<ScriptEvent>,
    next: usize,
    origin: Instant,
    base_ms: u64,
    /// Registered long-press timer: script-clock deadline and its source
    long_press: Option<(u64, RegistrationToken)>,
    emitted: Vec<GestureEvent>,
    done: bool,
}

impl<'h> Replay<'h> {
    fn instant_for(&self, t: u64) -> Instant {
        self.origin + Duration::from_millis(t.saturating_sub(self.base_ms))
    }

    fn next_instant(&self) -> Option<Instant> {
        self.events.get(self.next).map(|e| self.instant_for(e.timestamp()))
    }

    fn deliver_next<'l>(&mut self, handle: &LoopHandle<'l, Replay<'h>>)
    where
        'h: 'l,
    {
        let Some(event) = self.events.get(self.next).copied() else {
            return;
        };
        self.next += 1;
        debug!(?event, "Replay event");
        self.emitted.extend(self.host.deliver(&event));
        self.sync_long_press(handle);
    }

    /// Match the registered timer source to the recognizer's deadline
    fn sync_long_press<'l>(&mut self, handle: &LoopHandle<'l, Replay<'h>>)
    where
        'h: 'l,
    {
        let wanted = self.host.recognizer.long_press_deadline();
        if self.long_press.as_ref().map(|(deadline, _)| *deadline) == wanted {
            return;
        }

        if let Some((_, token)) = self.long_press.take() {
            handle.remove(token);
        }

        let Some(deadline) = wanted else {
            return;
        };
        let timer = Timer::from_deadline(self.instant_for(deadline));
        match handle.insert_source(timer, move |_, _, state: &mut Replay<'h>| {
            state.long_press = None;
            state.emitted.extend(state.host.fire_timer(deadline));
            TimeoutAction::Drop
        }) {
            Ok(token) => self.long_press = Some((deadline, token)),
            Err(e) => warn!(error = %e.error, "Failed to register long-press timer"),
        }
    }
}
