//! Configuration for timelines and the array-bar layout.

use serde::{Deserialize, Serialize};

use crate::easing::DEFAULT_EASING;
use crate::event::EventKind;

/// Timeline-wide settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Playback rate hint for downstream players. The compiler itself is frame-based.
    pub fps: u32,
    /// Easing used by events that do not name one.
    pub default_easing: String,
    /// Durations applied by the builder helpers when no explicit duration is given.
    pub durations: EventDurations,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            fps: 20,
            default_easing: DEFAULT_EASING.to_string(),
            durations: EventDurations::default(),
        }
    }
}

/// Default duration in frames, per event kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventDurations {
    pub highlight: u32,
    pub compare: u32,
    pub swap: u32,
    pub assign: u32,
    pub mark_sorted: u32,
}

impl Default for EventDurations {
    fn default() -> Self {
        Self {
            highlight: 1,
            compare: 1,
            swap: 10,
            assign: 8,
            mark_sorted: 1,
        }
    }
}

impl EventDurations {
    #[inline]
    pub fn for_kind(&self, kind: EventKind) -> u32 {
        match kind {
            EventKind::Highlight => self.highlight,
            EventKind::Compare => self.compare,
            EventKind::Swap => self.swap,
            EventKind::Assign => self.assign,
            EventKind::MarkSorted => self.mark_sorted,
        }
    }
}

/// Fixed geometry of an array-bar actor.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrayBarLayout {
    /// Left edge of slot 0.
    pub x: f32,
    /// Top of the tallest possible bar.
    pub y: f32,
    pub bar_width: f32,
    pub bar_gap: f32,
    /// Height of the bar for the maximum value.
    pub height: f32,
    /// Emit a value label above each bar.
    pub show_value: bool,
}

impl Default for ArrayBarLayout {
    fn default() -> Self {
        Self {
            x: 6.0,
            y: 10.0,
            bar_width: 10.0,
            bar_gap: 4.0,
            height: 60.0,
            show_value: true,
        }
    }
}

impl ArrayBarLayout {
    /// Left edge of `slot` at rest.
    #[inline]
    pub fn slot_x(&self, slot: usize) -> f32 {
        self.x + (self.bar_width + self.bar_gap) * slot as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_fills_defaults() {
        let cfg: TimelineConfig =
            serde_json::from_str(r#"{"fps": 30, "durations": {"swap": 4}}"#).unwrap();
        assert_eq!(cfg.fps, 30);
        assert_eq!(cfg.default_easing, DEFAULT_EASING);
        assert_eq!(cfg.durations.swap, 4);
        assert_eq!(cfg.durations.assign, 8);
        assert_eq!(cfg.durations.for_kind(EventKind::Highlight), 1);
    }

    #[test]
    fn slot_x_steps_by_width_plus_gap() {
        let layout = ArrayBarLayout::default();
        assert_eq!(layout.slot_x(0), 6.0);
        assert_eq!(layout.slot_x(2), 34.0);
    }
}
