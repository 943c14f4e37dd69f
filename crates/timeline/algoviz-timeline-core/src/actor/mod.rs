//! Actor contract.
//!
//! An actor owns a piece of visual state and the rules for mutating it. The
//! timeline compiler only talks to actors through [`Actor`], so new actor
//! variants plug in without touching the compiler: add a state variant to
//! [`ActorState`] and implement the trait.

pub mod array_bar;

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::draw::DrawOp;
use crate::error::{Result, TimelineError};
use crate::event::{EventKind, Payload};

pub use array_bar::{ArrayBar, ArrayBarState};

/// State of any actor variant at one moment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "variant", content = "state", rename_all = "snake_case")]
#[non_exhaustive]
pub enum ActorState {
    ArrayBar(ArrayBarState),
}

impl ActorState {
    #[inline]
    pub fn as_array_bar(&self) -> Option<&ArrayBarState> {
        match self {
            ActorState::ArrayBar(s) => Some(s),
        }
    }

    #[inline]
    pub fn variant_name(&self) -> &'static str {
        match self {
            ActorState::ArrayBar(_) => "array_bar",
        }
    }
}

impl From<ArrayBarState> for ActorState {
    fn from(s: ArrayBarState) -> Self {
        ActorState::ArrayBar(s)
    }
}

/// A named stateful visual entity.
///
/// All methods are pure: they read the passed state and the actor's fixed
/// layout, and return new values. Nothing here may mutate shared state.
pub trait Actor: fmt::Debug + Send + Sync {
    /// Unique name within a scene.
    fn name(&self) -> &str;

    /// State before any event touches the actor.
    fn initial_state(&self) -> ActorState;

    /// Whether this actor handles `kind`. The compiler rejects other kinds
    /// before emitting any frame for the event.
    fn supports(&self, kind: EventKind) -> bool {
        let _ = kind;
        true
    }

    /// Ordered primitive draw operations for `state`.
    fn draw(&self, state: &ActorState) -> Result<Vec<DrawOp>>;

    /// Interpolated, not yet committed state for eased progress `t` in `[0, 1]`.
    ///
    /// Motion must reach its resting position exactly at `t = 1`.
    fn apply_event_step(
        &self,
        state: &ActorState,
        kind: EventKind,
        payload: &Payload,
        t: f32,
    ) -> Result<ActorState>;

    /// Authoritative discrete mutation for the event, with transient
    /// interpolation artifacts cleared.
    fn finalize_event(
        &self,
        state: &ActorState,
        kind: EventKind,
        payload: &Payload,
    ) -> Result<ActorState>;
}

/// Typed view over a [`Payload`] that reports problems with actor and event context.
#[derive(Clone, Copy, Debug)]
pub struct PayloadArgs<'a> {
    actor: &'a str,
    kind: EventKind,
    payload: &'a Payload,
}

impl<'a> PayloadArgs<'a> {
    pub fn new(actor: &'a str, kind: EventKind, payload: &'a Payload) -> Self {
        Self {
            actor,
            kind,
            payload,
        }
    }

    pub fn invalid(&self, reason: impl Into<String>) -> TimelineError {
        TimelineError::InvalidPayload {
            actor: self.actor.to_string(),
            kind: self.kind,
            reason: reason.into(),
        }
    }

    #[inline]
    pub fn has(&self, key: &str) -> bool {
        self.payload.contains(key)
    }

    /// Integral argument. Accepts `2` and `2.0`, rejects `2.5` and non-numbers.
    pub fn index(&self, key: &str) -> Result<Option<i64>> {
        match self.payload.get(key) {
            None | Some(JsonValue::Null) => Ok(None),
            Some(JsonValue::Number(n)) => {
                if let Some(i) = n.as_i64() {
                    return Ok(Some(i));
                }
                match n.as_f64() {
                    Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok(Some(f as i64)),
                    _ => Err(self.invalid(format!("`{key}` must be an integer, got {n}"))),
                }
            }
            Some(other) => Err(self.invalid(format!("`{key}` must be an integer, got {other}"))),
        }
    }

    /// Slot argument checked against `0..len`.
    pub fn slot(&self, key: &str, len: usize) -> Result<Option<usize>> {
        match self.index(key)? {
            None => Ok(None),
            Some(i) if i >= 0 && (i as u64) < len as u64 => Ok(Some(i as usize)),
            Some(i) => Err(TimelineError::SlotOutOfRange {
                actor: self.actor.to_string(),
                kind: self.kind,
                index: i,
                len,
            }),
        }
    }

    pub fn required_slot(&self, key: &str, len: usize) -> Result<usize> {
        self.slot(key, len)?
            .ok_or_else(|| self.invalid(format!("missing required key `{key}`")))
    }

    pub fn number(&self, key: &str) -> Result<Option<f32>> {
        match self.payload.get(key) {
            None | Some(JsonValue::Null) => Ok(None),
            Some(JsonValue::Number(n)) => match n.as_f64().map(|f| f as f32) {
                Some(v) if v.is_finite() => Ok(Some(v)),
                _ => Err(self.invalid(format!("`{key}` = {n} does not fit a finite f32"))),
            },
            Some(other) => Err(self.invalid(format!("`{key}` must be a number, got {other}"))),
        }
    }

    pub fn flag(&self, key: &str) -> Result<Option<bool>> {
        match self.payload.get(key) {
            None | Some(JsonValue::Null) => Ok(None),
            Some(JsonValue::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(self.invalid(format!("`{key}` must be a boolean, got {other}"))),
        }
    }
}
