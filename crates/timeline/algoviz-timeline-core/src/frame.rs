//! Immutable per-moment snapshots produced by the timeline compiler.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::actor::{ActorState, ArrayBarState};

/// Actor name -> state at one moment. Untouched actors share their state with
/// neighbouring frames.
pub type FrameStates = BTreeMap<String, Arc<ActorState>>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    index: usize,
    states: FrameStates,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    note: Option<String>,
}

impl Frame {
    pub(crate) fn new(index: usize, states: FrameStates, note: Option<&str>) -> Self {
        Self {
            index,
            states,
            note: note.map(str::to_string),
        }
    }

    /// Overwrite one actor's state; only the compiler's finalize step does this.
    pub(crate) fn replace_state(&mut self, actor: &str, state: Arc<ActorState>) {
        self.states.insert(actor.to_string(), state);
    }

    /// Position in the compiled sequence.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn states(&self) -> &FrameStates {
        &self.states
    }

    #[inline]
    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    #[inline]
    pub fn state(&self, actor: &str) -> Option<&ActorState> {
        self.states.get(actor).map(Arc::as_ref)
    }

    /// Shortcut for array-bar actors.
    #[inline]
    pub fn array_bar(&self, actor: &str) -> Option<&ArrayBarState> {
        self.state(actor).and_then(ActorState::as_array_bar)
    }
}

/// Export frames as serde_json::Value (stable schema for golden files).
pub fn export_frames_json(frames: &[Frame]) -> serde_json::Value {
    serde_json::to_value(frames).unwrap_or(serde_json::Value::Null)
}
