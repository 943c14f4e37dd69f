//! Declarative animation events.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::error::TimelineError;

/// The closed set of event types actors understand.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Highlight,
    Compare,
    Swap,
    Assign,
    MarkSorted,
}

impl EventKind {
    pub const ALL: [EventKind; 5] = [
        EventKind::Highlight,
        EventKind::Compare,
        EventKind::Swap,
        EventKind::Assign,
        EventKind::MarkSorted,
    ];

    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Highlight => "highlight",
            EventKind::Compare => "compare",
            EventKind::Swap => "swap",
            EventKind::Assign => "assign",
            EventKind::MarkSorted => "mark_sorted",
        }
    }

    /// Transient events show their effect only inside their own frames; the
    /// committed state is carried forward as the next baseline but never
    /// written back into the last emitted frame.
    #[inline]
    pub fn is_transient(self) -> bool {
        match self {
            EventKind::Compare => true,
            EventKind::Highlight
            | EventKind::Swap
            | EventKind::Assign
            | EventKind::MarkSorted => false,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = TimelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| TimelineError::UnknownEventType {
                name: s.to_string(),
            })
    }
}

/// Type-specific named arguments of an event, e.g. `{"i": 0, "j": 1}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(Map<String, JsonValue>);

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: &str, value: impl Into<JsonValue>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.0.get(key)
    }

    #[inline]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }
}

impl From<Map<String, JsonValue>> for Payload {
    fn from(map: Map<String, JsonValue>) -> Self {
        Self(map)
    }
}

/// One declarative action against one named actor. Immutable once built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    actor: String,
    #[serde(rename = "type")]
    kind: EventKind,
    #[serde(default)]
    payload: Payload,
    duration: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    easing: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    note: Option<String>,
}

impl Event {
    /// Duration is validated at compile time, not here.
    pub fn new(actor: impl Into<String>, kind: EventKind, payload: Payload, duration: u32) -> Self {
        Self {
            actor: actor.into(),
            kind,
            payload,
            duration,
            easing: None,
            note: None,
        }
    }

    pub fn with_easing(mut self, easing: impl Into<String>) -> Self {
        self.easing = Some(easing.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Same event with another duration.
    pub(crate) fn with_duration(&self, duration: u32) -> Self {
        Self {
            duration,
            ..self.clone()
        }
    }

    #[inline]
    pub fn actor(&self) -> &str {
        &self.actor
    }

    #[inline]
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    #[inline]
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    #[inline]
    pub fn duration(&self) -> u32 {
        self.duration
    }

    #[inline]
    pub fn easing(&self) -> Option<&str> {
        self.easing.as_deref()
    }

    #[inline]
    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }
}

/// Optional per-event overrides accepted by the timeline builder helpers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventOptions {
    pub duration: Option<u32>,
    pub easing: Option<String>,
    pub note: Option<String>,
}

impl EventOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn duration(mut self, frames: u32) -> Self {
        self.duration = Some(frames);
        self
    }

    pub fn easing(mut self, name: impl Into<String>) -> Self {
        self.easing = Some(name.into());
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Slots a highlight event targets.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HighlightTarget {
    Slot(usize),
    /// Inclusive on both ends; either order is accepted.
    Range(usize, usize),
}
