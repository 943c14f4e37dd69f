//! Error types for scene assembly and timeline compilation.
//!
//! Every error here is fatal: the core performs no I/O, so a failure always
//! means the Scene or Timeline was assembled incorrectly.

use serde::{Deserialize, Serialize};

use crate::event::EventKind;

/// Errors raised while building a scene or compiling a timeline.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum TimelineError {
    /// Two actors registered under the same name.
    #[error("Actor name duplicated: {name}")]
    DuplicateActor { name: String },

    /// An event referenced an actor the scene does not contain.
    #[error("Actor not found in scene: {name}")]
    UnknownActor { name: String },

    /// An easing name that is not registered.
    #[error("Easing function not found: {name}")]
    UnknownEasing { name: String },

    /// An event type string outside the known set.
    #[error("Unknown event type: {name}")]
    UnknownEventType { name: String },

    /// A known event type the target actor does not handle.
    #[error("Actor {actor} does not support event type {kind}")]
    UnsupportedEvent { actor: String, kind: EventKind },

    /// A slot index outside `0..len`.
    #[error("Slot index {index} out of range for {kind} on actor {actor} (len {len})")]
    SlotOutOfRange {
        actor: String,
        kind: EventKind,
        index: i64,
        len: usize,
    },

    /// Payload is missing a required key or carries a malformed value.
    #[error("Invalid payload for {kind} on actor {actor}: {reason}")]
    InvalidPayload {
        actor: String,
        kind: EventKind,
        reason: String,
    },

    /// Event duration below one frame.
    #[error("Invalid duration {duration} for {kind} on actor {actor}")]
    InvalidDuration {
        actor: String,
        kind: EventKind,
        duration: u32,
    },

    /// An actor received a state belonging to another actor variant.
    #[error("State mismatch on actor {actor}: expected {expected} state")]
    StateMismatch { actor: String, expected: String },

    /// A timeline document that does not parse.
    #[error("Malformed timeline: {reason}")]
    MalformedTimeline { reason: String },
}

impl TimelineError {
    /// Get error category for logging.
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::DuplicateActor { .. }
            | Self::UnknownActor { .. }
            | Self::UnknownEasing { .. }
            | Self::UnknownEventType { .. }
            | Self::UnsupportedEvent { .. }
            | Self::StateMismatch { .. }
            | Self::MalformedTimeline { .. } => "configuration",
            Self::SlotOutOfRange { .. }
            | Self::InvalidPayload { .. }
            | Self::InvalidDuration { .. } => "validation",
        }
    }

    /// Nothing in the core can be retried.
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        false
    }
}

impl From<serde_json::Error> for TimelineError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedTimeline {
            reason: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TimelineError>;
