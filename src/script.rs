//! Recorded interaction scripts
//!
//! A script is a JSON array of host input events, each tagged by `type`:
//!
//! ```json
//! [
//!   { "type": "start", "x": 0, "y": 0, "t": 0 },
//!   { "type": "end", "x": 0, "y": 100, "t": 100 },
//!   { "type": "wheel", "delta_y": -60, "t": 400 }
//! ]
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::input::InputPoint;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptEvent {
    Start { x: f64, y: f64, t: u64 },
    Move { x: f64, y: f64, t: u64 },
    End { x: f64, y: f64, t: u64 },
    Cancel { t: u64 },
    Wheel { delta_y: f64, t: u64 },
}

impl ScriptEvent {
    pub fn timestamp(&self) -> u64 {
        match *self {
            ScriptEvent::Start { t, .. }
            | ScriptEvent::Move { t, .. }
            | ScriptEvent::End { t, .. }
            | ScriptEvent::Cancel { t }
            | ScriptEvent::Wheel { t, .. } => t,
        }
    }

    /// Sampled pointer position, for pointer events
    pub fn point(&self) -> Option<InputPoint> {
        match *self {
            ScriptEvent::Start { x, y, t }
            | ScriptEvent::Move { x, y, t }
            | ScriptEvent::End { x, y, t } => Some(InputPoint::new(x, y, t)),
            ScriptEvent::Cancel { .. } | ScriptEvent::Wheel { .. } => None,
        }
    }
}

/// Ordered sequence of input events for one interaction surface
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InteractionScript {
    pub events: Vec<ScriptEvent>,
}

impl InteractionScript {
    pub fn new(events: Vec<ScriptEvent>) -> Result<Self> {
        let script = Self { events };
        script.validate()?;
        Ok(script)
    }

    pub fn from_json_str(contents: &str) -> Result<Self> {
        let events: Vec<ScriptEvent> = serde_json::from_str(contents)?;
        Self::new(events)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Timestamps must be non-decreasing
    pub fn validate(&self) -> Result<()> {
        for (i, pair) in self.events.windows(2).enumerate() {
            let (prev, next) = (pair[0].timestamp(), pair[1].timestamp());
            if next < prev {
                return Err(Error::InvalidScript(format!(
                    "event {} at t={} is earlier than previous event at t={}",
                    i + 1,
                    next,
                    prev
                )));
            }
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Timestamp of the first event
    pub fn start_time(&self) -> Option<u64> {
        self.events.first().map(ScriptEvent::timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_event_types() {
        let script = InteractionScript::from_json_str(
            r#"[
                {"type": "start", "x": 1.5, "y": 2, "t": 0},
                {"type": "move", "x": 3, "y": 4, "t": 10},
                {"type": "end", "x": 5, "y": 6, "t": 20},
                {"type": "cancel", "t": 20},
                {"type": "wheel", "delta_y": -60, "t": 30}
            ]"#,
        )
        .unwrap();
        assert_eq!(script.events.len(), 5);
        assert_eq!(script.events[0], ScriptEvent::Start { x: 1.5, y: 2.0, t: 0 });
        assert_eq!(script.events[3].point(), None);
        assert_eq!(script.events[4], ScriptEvent::Wheel { delta_y: -60.0, t: 30 });
        assert_eq!(script.start_time(), Some(0));
    }

    #[test]
    fn test_out_of_order_rejected() {
        let result = InteractionScript::from_json_str(
            r#"[{"type": "start", "x": 0, "y": 0, "t": 50}, {"type": "end", "x": 0, "y": 0, "t": 40}]"#,
        );
        assert!(matches!(result, Err(Error::InvalidScript(_))));
    }

    #[test]
    fn test_unknown_type_rejected() {
        let result = InteractionScript::from_json_str(r#"[{"type": "pinch", "t": 0}]"#);
        assert!(matches!(result, Err(Error::ScriptParse(_))));
    }

    #[test]
    fn test_json_output_is_loadable() {
        let script = InteractionScript::new(vec![
            ScriptEvent::Start { x: 0.0, y: 0.0, t: 0 },
            ScriptEvent::End { x: 0.0, y: 100.0, t: 100 },
        ])
        .unwrap();
        let json = script.to_json_string().unwrap();
        assert_eq!(InteractionScript::from_json_str(&json).unwrap(), script);
    }
}
