//! Timeline: ordered events and the compiler that expands them into frames.
//!
//! Compilation walks events in insertion order. Each event of duration `d`
//! emits `d` sub-step frames at eased progress `f(k/d)`, `k = 1..=d`, each
//! derived from the actor's baseline state. The last sub-step is then
//! finalized: persistent events overwrite the last emitted frame with the
//! committed state, transient events leave it as emitted. Either way the
//! committed state becomes the actor's baseline for the next event.

use std::sync::Arc;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::config::TimelineConfig;
use crate::easing::EasingRegistry;
use crate::error::{Result, TimelineError};
use crate::event::{Event, EventKind, EventOptions, HighlightTarget, Payload};
use crate::frame::Frame;
use crate::scene::Scene;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Timeline {
    config: TimelineConfig,
    events: Vec<Event>,
}

/// Event as written in a timeline document; type and duration resolved on load.
#[derive(Debug, Deserialize)]
struct EventDoc {
    actor: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    payload: Payload,
    #[serde(default)]
    duration: Option<u32>,
    #[serde(default)]
    easing: Option<String>,
    #[serde(default)]
    note: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TimelineDoc {
    #[serde(default)]
    config: TimelineConfig,
    #[serde(default)]
    events: Vec<EventDoc>,
}

impl Timeline {
    pub fn new(fps: u32) -> Self {
        Self::with_config(TimelineConfig {
            fps,
            ..TimelineConfig::default()
        })
    }

    pub fn with_config(config: TimelineConfig) -> Self {
        Self {
            config,
            events: Vec::new(),
        }
    }

    /// Parse a timeline document: `{"config": {...}, "events": [...]}`.
    /// Omitted durations take the per-kind defaults from the config.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let doc: TimelineDoc = serde_json::from_str(json)?;
        let mut timeline = Self::with_config(doc.config);
        for ev in doc.events {
            let opts = EventOptions {
                duration: ev.duration,
                easing: ev.easing,
                note: ev.note,
            };
            timeline.add(ev.actor, &ev.kind, ev.payload, opts)?;
        }
        Ok(timeline)
    }

    #[inline]
    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    #[inline]
    pub fn fps(&self) -> u32 {
        self.config.fps
    }

    #[inline]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of frames compilation will produce.
    pub fn total_frames(&self) -> u64 {
        self.events.iter().map(|e| u64::from(e.duration())).sum()
    }

    /// Append a fully built event.
    pub fn push(&mut self, event: Event) -> &mut Self {
        self.events.push(event);
        self
    }

    /// Append an event by type name. Unknown names are rejected.
    pub fn add(
        &mut self,
        actor: impl Into<String>,
        kind: &str,
        payload: Payload,
        opts: EventOptions,
    ) -> Result<&mut Self> {
        let kind: EventKind = kind.parse()?;
        Ok(self.push_kind(actor, kind, payload, opts))
    }

    fn push_kind(
        &mut self,
        actor: impl Into<String>,
        kind: EventKind,
        payload: Payload,
        opts: EventOptions,
    ) -> &mut Self {
        let duration = opts
            .duration
            .unwrap_or_else(|| self.config.durations.for_kind(kind));
        let mut event = Event::new(actor, kind, payload, duration);
        if let Some(easing) = opts.easing {
            event = event.with_easing(easing);
        }
        if let Some(note) = opts.note {
            event = event.with_note(note);
        }
        self.push(event)
    }

    fn highlight_payload(target: HighlightTarget) -> Payload {
        match target {
            HighlightTarget::Slot(idx) => Payload::new().with("idx", idx),
            HighlightTarget::Range(start, end) => {
                Payload::new().with("start", start).with("end", end)
            }
        }
    }

    /// Add slots to the highlight set.
    pub fn highlight(
        &mut self,
        actor: impl Into<String>,
        target: HighlightTarget,
        opts: EventOptions,
    ) -> &mut Self {
        let payload = Self::highlight_payload(target);
        self.push_kind(actor, EventKind::Highlight, payload, opts)
    }

    /// Replace the highlight set with `target`.
    pub fn highlight_only(
        &mut self,
        actor: impl Into<String>,
        target: HighlightTarget,
        opts: EventOptions,
    ) -> &mut Self {
        let payload = Self::highlight_payload(target).with("clear", true);
        self.push_kind(actor, EventKind::Highlight, payload, opts)
    }

    pub fn clear_highlight(&mut self, actor: impl Into<String>, opts: EventOptions) -> &mut Self {
        let payload = Payload::new().with("clear", true);
        self.push_kind(actor, EventKind::Highlight, payload, opts)
    }

    pub fn compare(
        &mut self,
        actor: impl Into<String>,
        i: usize,
        j: usize,
        opts: EventOptions,
    ) -> &mut Self {
        let payload = Payload::new().with("i", i).with("j", j);
        self.push_kind(actor, EventKind::Compare, payload, opts)
    }

    pub fn swap(
        &mut self,
        actor: impl Into<String>,
        i: usize,
        j: usize,
        opts: EventOptions,
    ) -> &mut Self {
        let payload = Payload::new().with("i", i).with("j", j);
        self.push_kind(actor, EventKind::Swap, payload, opts)
    }

    /// Write a literal value into the item at slot `i`.
    pub fn assign_value(
        &mut self,
        actor: impl Into<String>,
        i: usize,
        value: f32,
        opts: EventOptions,
    ) -> &mut Self {
        let payload = Payload::new().with("i", i).with("value", value);
        self.push_kind(actor, EventKind::Assign, payload, opts)
    }

    /// Copy the value shown at slot `j` into the item at slot `i`.
    pub fn assign_copy(
        &mut self,
        actor: impl Into<String>,
        i: usize,
        j: usize,
        opts: EventOptions,
    ) -> &mut Self {
        let payload = Payload::new().with("i", i).with("j", j);
        self.push_kind(actor, EventKind::Assign, payload, opts)
    }

    pub fn mark_sorted(
        &mut self,
        actor: impl Into<String>,
        upto: usize,
        opts: EventOptions,
    ) -> &mut Self {
        let payload = Payload::new().with("upto", upto);
        self.push_kind(actor, EventKind::MarkSorted, payload, opts)
    }

    /// Copy of this timeline with every duration scaled by `factor`
    /// (clamped to at least 0.01). Halves round to even; scaled durations
    /// never drop below one frame.
    pub fn scaled(&self, factor: f32) -> Timeline {
        let factor = factor.max(0.01);
        let events = self
            .events
            .iter()
            .map(|e| {
                let scaled = (e.duration() as f32 * factor).round_ties_even().max(1.0);
                e.with_duration(scaled as u32)
            })
            .collect();
        Timeline {
            config: self.config.clone(),
            events,
        }
    }

    /// Compile the timeline against `scene` into an ordered frame sequence.
    ///
    /// Pure and deterministic: the same scene and events always yield the
    /// same frames. Fails on the first event that does not resolve or validate.
    pub fn build_frames(&self, scene: &Scene) -> Result<Vec<Frame>> {
        let registry = EasingRegistry::global();
        let mut frames: Vec<Frame> = Vec::with_capacity(self.total_frames() as usize);
        let mut baseline = scene.initial_states();

        for (ev_index, ev) in self.events.iter().enumerate() {
            let name = ev.actor();
            let kind = ev.kind();
            let actor = scene.actor(name)?;
            if !actor.supports(kind) {
                return Err(TimelineError::UnsupportedEvent {
                    actor: name.to_string(),
                    kind,
                });
            }
            let easing =
                registry.resolve(ev.easing().unwrap_or(self.config.default_easing.as_str()))?;
            let steps = ev.duration();
            if steps == 0 {
                return Err(TimelineError::InvalidDuration {
                    actor: name.to_string(),
                    kind,
                    duration: steps,
                });
            }
            let start = baseline
                .get(name)
                .cloned()
                .ok_or_else(|| TimelineError::UnknownActor {
                    name: name.to_string(),
                })?;
            debug!(
                "event {ev_index}: {kind} on '{name}' for {steps} frame(s), easing {}",
                easing.name()
            );

            let mut last_step = Arc::clone(&start);
            for k in 1..=steps {
                let eased = easing.apply(k as f32 / steps as f32);
                let stepped = Arc::new(actor.apply_event_step(&start, kind, ev.payload(), eased)?);
                let mut states = baseline.clone();
                states.insert(name.to_string(), Arc::clone(&stepped));
                trace!("frame {}: {kind} step {k}/{steps} eased {eased}", frames.len());
                frames.push(Frame::new(frames.len(), states, ev.note()));
                last_step = stepped;
            }

            let committed = Arc::new(actor.finalize_event(&last_step, kind, ev.payload())?);
            if !kind.is_transient() {
                if let Some(last) = frames.last_mut() {
                    last.replace_state(name, Arc::clone(&committed));
                }
            }
            baseline.insert(name.to_string(), committed);
        }

        debug!(
            "compiled {} event(s) into {} frame(s)",
            self.events.len(),
            frames.len()
        );
        Ok(frames)
    }
}
