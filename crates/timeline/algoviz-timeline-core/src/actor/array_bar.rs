//! Indexed-bar actor: an array drawn as a row of bars.
//!
//! Values are indexed by item identity and never reordered; `order` maps each
//! slot (visual position) to the item shown there. Swaps exchange entries of
//! `order`, so an item keeps its identity across any number of swaps.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::actor::{Actor, ActorState, PayloadArgs};
use crate::config::ArrayBarLayout;
use crate::draw::{DrawOp, FontWeight};
use crate::error::{Result, TimelineError};
use crate::event::{EventKind, Payload};

pub const DEFAULT_FILL: &str = "#4C97FF";
pub const HIGHLIGHT_FILL: &str = "#FFB800";
pub const COMPARE_FILL: &str = "#FF5A5A";
pub const SORTED_FILL: &str = "#33C48E";
pub const LABEL_FILL: &str = "#222222";

const LABEL_SIZE: u32 = 10;
const LABEL_LIFT: f32 = 12.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArrayBarState {
    /// Magnitudes by item identity. Shared between snapshots until an assign commits.
    pub values: Arc<[f32]>,
    /// Slot -> item identity. Always a permutation of `0..len`.
    pub order: Vec<usize>,
    /// Highlighted slots; persists until a later highlight changes it.
    pub highlight: BTreeSet<usize>,
    /// Slots under comparison; only set inside a compare event's own frames.
    pub compare: Option<(usize, usize)>,
    /// Highest slot (inclusive) considered sorted. Never regresses.
    pub sorted_upto: Option<usize>,
    /// Remaining displacement per slot while motion is in progress. Empty at rest.
    #[serde(default)]
    pub offsets: BTreeMap<usize, f32>,
    /// Slot pair whose items are travelling to each other's slot during a swap.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swapping: Option<(usize, usize)>,
    /// `(dest, source)` slots while a copy-from assign carries the source value over.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copying: Option<(usize, usize)>,
}

impl ArrayBarState {
    pub fn new(values: impl Into<Vec<f32>>) -> Self {
        let values: Vec<f32> = values.into();
        let order = (0..values.len()).collect();
        Self {
            values: values.into(),
            order,
            highlight: BTreeSet::new(),
            compare: None,
            sorted_upto: None,
            offsets: BTreeMap::new(),
            swapping: None,
            copying: None,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Value of the item that sits in `slot`.
    #[inline]
    pub fn slot_value(&self, slot: usize) -> f32 {
        self.values[self.order[slot]]
    }

    /// Values in slot order.
    pub fn slot_values(&self) -> Vec<f32> {
        self.order.iter().map(|&item| self.values[item]).collect()
    }

    #[inline]
    pub fn offset(&self, slot: usize) -> f32 {
        self.offsets.get(&slot).copied().unwrap_or(0.0)
    }

    #[inline]
    pub fn is_sorted_slot(&self, slot: usize) -> bool {
        self.sorted_upto.is_some_and(|upto| slot <= upto)
    }

    #[inline]
    pub fn is_compared_slot(&self, slot: usize) -> bool {
        self.compare.is_some_and(|(i, j)| slot == i || slot == j)
    }

    /// Item drawn in `slot`: the committed one, or the incoming one mid-swap
    /// or mid-copy.
    pub fn display_item(&self, slot: usize) -> usize {
        if let Some((dest, source)) = self.copying {
            if slot == dest {
                return self.order[source];
            }
        }
        match self.swapping {
            Some((i, j)) if slot == i => self.order[j],
            Some((i, j)) if slot == j => self.order[i],
            _ => self.order[slot],
        }
    }

    /// Fill color by fixed precedence: sorted, compare, highlight, default.
    pub fn fill_for_slot(&self, slot: usize) -> &'static str {
        if self.is_sorted_slot(slot) {
            SORTED_FILL
        } else if self.is_compared_slot(slot) {
            COMPARE_FILL
        } else if self.highlight.contains(&slot) {
            HIGHLIGHT_FILL
        } else {
            DEFAULT_FILL
        }
    }

    fn clear_motion(&mut self) {
        self.offsets.clear();
        self.swapping = None;
        self.copying = None;
    }
}

/// Where an assign takes its value from.
#[derive(Copy, Clone, Debug, PartialEq)]
enum AssignSource {
    Literal(f32),
    Slot(usize),
}

#[derive(Clone, Debug)]
pub struct ArrayBar {
    name: String,
    layout: ArrayBarLayout,
    initial: ArrayBarState,
}

impl ArrayBar {
    pub fn new(name: impl Into<String>, values: impl Into<Vec<f32>>) -> Self {
        Self {
            name: name.into(),
            layout: ArrayBarLayout::default(),
            initial: ArrayBarState::new(values),
        }
    }

    pub fn with_layout(mut self, layout: ArrayBarLayout) -> Self {
        self.layout = layout;
        self
    }

    #[inline]
    pub fn layout(&self) -> &ArrayBarLayout {
        &self.layout
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.initial.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.initial.is_empty()
    }

    fn state<'s>(&self, state: &'s ActorState) -> Result<&'s ArrayBarState> {
        state
            .as_array_bar()
            .ok_or_else(|| TimelineError::StateMismatch {
                actor: self.name.clone(),
                expected: "array_bar".to_string(),
            })
    }

    fn pair(&self, args: &PayloadArgs<'_>, len: usize) -> Result<(usize, usize)> {
        Ok((args.required_slot("i", len)?, args.required_slot("j", len)?))
    }

    fn assign_source(&self, args: &PayloadArgs<'_>, len: usize) -> Result<AssignSource> {
        match (args.has("value"), args.has("j")) {
            (true, true) => Err(args.invalid("specify either `j` or `value`, not both")),
            (true, false) => args
                .number("value")?
                .map(AssignSource::Literal)
                .ok_or_else(|| args.invalid("`value` must not be null")),
            (false, true) => Ok(AssignSource::Slot(args.required_slot("j", len)?)),
            (false, false) => Err(args.invalid("missing `j` or `value`")),
        }
    }

    /// Apply a highlight payload to `st`. Idempotent.
    fn apply_highlight(&self, args: &PayloadArgs<'_>, st: &mut ArrayBarState) -> Result<()> {
        let len = st.len();
        let clear = args.flag("clear")?.unwrap_or(false);
        let slots: Vec<usize> = if let Some(idx) = args.slot("idx", len)? {
            vec![idx]
        } else if args.has("start") || args.has("end") {
            let a = args.required_slot("start", len)?;
            let b = args.required_slot("end", len)?;
            (a.min(b)..=a.max(b)).collect()
        } else if clear {
            Vec::new()
        } else {
            return Err(args.invalid("requires `idx`, `start`/`end`, or `clear`"));
        };
        if clear {
            st.highlight.clear();
        }
        st.highlight.extend(slots);
        Ok(())
    }

    fn apply_mark_sorted(&self, args: &PayloadArgs<'_>, st: &mut ArrayBarState) -> Result<()> {
        let upto = args.required_slot("upto", st.len())?;
        st.sorted_upto = Some(st.sorted_upto.map_or(upto, |cur| cur.max(upto)));
        Ok(())
    }
}

impl Actor for ArrayBar {
    fn name(&self) -> &str {
        &self.name
    }

    fn initial_state(&self) -> ActorState {
        ActorState::ArrayBar(self.initial.clone())
    }

    fn draw(&self, state: &ActorState) -> Result<Vec<DrawOp>> {
        let st = self.state(state)?;
        let layout = &self.layout;
        let vmax = st.values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        let vmax = if vmax > 0.0 { vmax } else { 1.0 };

        let per_bar = if layout.show_value { 2 } else { 1 };
        let mut ops = Vec::with_capacity(st.len() * per_bar);
        for slot in 0..st.len() {
            let value = st.values[st.display_item(slot)];
            let x = layout.slot_x(slot) + st.offset(slot);
            let h = (value / vmax * layout.height).round().max(1.0);
            let top = layout.y + (layout.height - h);

            ops.push(DrawOp::Rect {
                x,
                y: top,
                w: layout.bar_width,
                h,
                fill: st.fill_for_slot(slot).to_string(),
                stroke: None,
            });
            if layout.show_value {
                ops.push(DrawOp::Text {
                    x: x + layout.bar_width / 2.0,
                    y: top - LABEL_LIFT,
                    content: value.to_string(),
                    size: LABEL_SIZE,
                    weight: FontWeight::Normal,
                    fill: LABEL_FILL.to_string(),
                });
            }
        }
        Ok(ops)
    }

    fn apply_event_step(
        &self,
        state: &ActorState,
        kind: EventKind,
        payload: &Payload,
        t: f32,
    ) -> Result<ActorState> {
        let st = self.state(state)?;
        let args = PayloadArgs::new(&self.name, kind, payload);
        let len = st.len();
        let mut next = st.clone();
        // Remaining share of the distance; reaches exactly 0 at t = 1.
        let rem = 1.0 - t.clamp(0.0, 1.0);

        match kind {
            EventKind::Swap => {
                let (i, j) = self.pair(&args, len)?;
                let (xi, xj) = (self.layout.slot_x(i), self.layout.slot_x(j));
                next.offsets.insert(i, (xj - xi) * rem);
                next.offsets.insert(j, (xi - xj) * rem);
                next.swapping = Some((i, j));
            }
            EventKind::Assign => {
                let i = args.required_slot("i", len)?;
                // The copied value leaves the source slot and lands on `i`.
                if let AssignSource::Slot(j) = self.assign_source(&args, len)? {
                    let (xi, xj) = (self.layout.slot_x(i), self.layout.slot_x(j));
                    next.offsets.insert(i, (xj - xi) * rem);
                    next.copying = Some((i, j));
                }
            }
            EventKind::Compare => {
                next.compare = Some(self.pair(&args, len)?);
            }
            EventKind::Highlight => self.apply_highlight(&args, &mut next)?,
            EventKind::MarkSorted => self.apply_mark_sorted(&args, &mut next)?,
        }
        Ok(ActorState::ArrayBar(next))
    }

    fn finalize_event(
        &self,
        state: &ActorState,
        kind: EventKind,
        payload: &Payload,
    ) -> Result<ActorState> {
        let st = self.state(state)?;
        let args = PayloadArgs::new(&self.name, kind, payload);
        let len = st.len();
        let mut next = st.clone();
        next.clear_motion();

        match kind {
            EventKind::Swap => {
                let (i, j) = self.pair(&args, len)?;
                next.order.swap(i, j);
            }
            EventKind::Assign => {
                let i = args.required_slot("i", len)?;
                // Copy-from reads the source at commit time.
                let value = match self.assign_source(&args, len)? {
                    AssignSource::Literal(v) => v,
                    AssignSource::Slot(j) => st.slot_value(j),
                };
                let mut values = st.values.to_vec();
                values[st.order[i]] = value;
                next.values = values.into();
            }
            EventKind::Compare => {
                self.pair(&args, len)?;
                next.compare = None;
            }
            EventKind::Highlight => self.apply_highlight(&args, &mut next)?,
            EventKind::MarkSorted => self.apply_mark_sorted(&args, &mut next)?,
        }
        Ok(ActorState::ArrayBar(next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(values: &[f32]) -> ArrayBar {
        ArrayBar::new("A", values.to_vec())
    }

    fn ab(state: &ActorState) -> &ArrayBarState {
        state.as_array_bar().unwrap()
    }

    fn swap_payload(i: i64, j: i64) -> Payload {
        Payload::new().with("i", i).with("j", j)
    }

    #[test]
    fn initial_order_is_identity() {
        let a = bar(&[5.0, 3.0, 4.0]);
        let s = a.initial_state();
        assert_eq!(ab(&s).order, vec![0, 1, 2]);
        assert!(ab(&s).offsets.is_empty());
        assert_eq!(ab(&s).sorted_upto, None);
    }

    #[test]
    fn swap_step_offsets_shrink_to_zero() {
        let a = bar(&[5.0, 3.0, 4.0]);
        let s0 = a.initial_state();
        let p = swap_payload(0, 2);
        let mut last = f32::INFINITY;
        for t in [0.0, 0.25, 0.5, 0.75, 1.0] {
            let s = a.apply_event_step(&s0, EventKind::Swap, &p, t).unwrap();
            let off = ab(&s).offset(0).abs();
            assert!(off <= last);
            assert_eq!(ab(&s).offset(0), -ab(&s).offset(2));
            assert_eq!(ab(&s).order, vec![0, 1, 2], "order changes only at finalize");
            last = off;
        }
        assert_eq!(last, 0.0);
        // full distance at t = 0 is two slots of 14px
        let s = a.apply_event_step(&s0, EventKind::Swap, &p, 0.0).unwrap();
        assert_eq!(ab(&s).offset(0), 28.0);
    }

    #[test]
    fn swap_finalize_exchanges_order_not_values() {
        let a = bar(&[5.0, 3.0, 4.0]);
        let s0 = a.initial_state();
        let p = swap_payload(0, 2);
        let step = a.apply_event_step(&s0, EventKind::Swap, &p, 1.0).unwrap();
        let fin = a.finalize_event(&step, EventKind::Swap, &p).unwrap();
        assert_eq!(ab(&fin).order, vec![2, 1, 0]);
        assert_eq!(&*ab(&fin).values, &[5.0, 3.0, 4.0]);
        assert!(ab(&fin).offsets.is_empty());
        assert_eq!(ab(&fin).swapping, None);
        assert_eq!(ab(&fin).slot_values(), vec![4.0, 3.0, 5.0]);
    }

    #[test]
    fn last_swap_step_draws_like_finalized() {
        let a = bar(&[5.0, 3.0, 4.0]);
        let s0 = a.initial_state();
        let p = swap_payload(0, 1);
        let step = a.apply_event_step(&s0, EventKind::Swap, &p, 1.0).unwrap();
        let fin = a.finalize_event(&step, EventKind::Swap, &p).unwrap();
        assert_eq!(a.draw(&step).unwrap(), a.draw(&fin).unwrap());
    }

    #[test]
    fn swap_out_of_range_is_error() {
        let a = bar(&[1.0, 2.0]);
        let err = a
            .apply_event_step(&a.initial_state(), EventKind::Swap, &swap_payload(0, 5), 0.5)
            .unwrap_err();
        assert_eq!(
            err,
            TimelineError::SlotOutOfRange {
                actor: "A".into(),
                kind: EventKind::Swap,
                index: 5,
                len: 2,
            }
        );
    }

    #[test]
    fn compare_is_cleared_at_finalize() {
        let a = bar(&[1.0, 2.0, 3.0]);
        let p = swap_payload(0, 1);
        let step = a
            .apply_event_step(&a.initial_state(), EventKind::Compare, &p, 0.5)
            .unwrap();
        assert_eq!(ab(&step).compare, Some((0, 1)));
        let fin = a.finalize_event(&step, EventKind::Compare, &p).unwrap();
        assert_eq!(ab(&fin).compare, None);
    }

    #[test]
    fn highlight_extends_unless_cleared() {
        let a = bar(&[1.0, 2.0, 3.0, 4.0]);
        let s = a
            .apply_event_step(
                &a.initial_state(),
                EventKind::Highlight,
                &Payload::new().with("idx", 3),
                1.0,
            )
            .unwrap();
        let s = a
            .apply_event_step(
                &s,
                EventKind::Highlight,
                &Payload::new().with("start", 1).with("end", 0),
                1.0,
            )
            .unwrap();
        assert_eq!(ab(&s).highlight, BTreeSet::from([0, 1, 3]));

        let s = a
            .apply_event_step(
                &s,
                EventKind::Highlight,
                &Payload::new().with("idx", 2).with("clear", true),
                1.0,
            )
            .unwrap();
        assert_eq!(ab(&s).highlight, BTreeSet::from([2]));

        let s = a
            .apply_event_step(
                &s,
                EventKind::Highlight,
                &Payload::new().with("clear", true),
                1.0,
            )
            .unwrap();
        assert!(ab(&s).highlight.is_empty());
    }

    #[test]
    fn highlight_without_target_is_invalid() {
        let a = bar(&[1.0]);
        let err = a
            .apply_event_step(&a.initial_state(), EventKind::Highlight, &Payload::new(), 1.0)
            .unwrap_err();
        assert!(matches!(err, TimelineError::InvalidPayload { .. }));
    }

    #[test]
    fn mark_sorted_never_regresses() {
        let a = bar(&[1.0, 2.0, 3.0]);
        let s = a
            .finalize_event(
                &a.initial_state(),
                EventKind::MarkSorted,
                &Payload::new().with("upto", 2),
            )
            .unwrap();
        let s = a
            .finalize_event(&s, EventKind::MarkSorted, &Payload::new().with("upto", 0))
            .unwrap();
        assert_eq!(ab(&s).sorted_upto, Some(2));
    }

    #[test]
    fn assign_literal_touches_only_the_slot_item() {
        let a = bar(&[5.0, 3.0, 4.0]);
        let p = swap_payload(0, 1);
        let s = a.apply_event_step(&a.initial_state(), EventKind::Swap, &p, 1.0).unwrap();
        let s = a.finalize_event(&s, EventKind::Swap, &p).unwrap();
        // slot 1 now holds item 0
        let assign = Payload::new().with("i", 1).with("value", 9.0);
        let step = a.apply_event_step(&s, EventKind::Assign, &assign, 0.5).unwrap();
        assert!(ab(&step).offsets.is_empty());
        let fin = a.finalize_event(&step, EventKind::Assign, &assign).unwrap();
        assert_eq!(&*ab(&fin).values, &[9.0, 3.0, 4.0]);
        assert_eq!(ab(&fin).order, ab(&s).order);
    }

    #[test]
    fn assign_copy_animates_source_and_reads_at_commit() {
        let a = bar(&[5.0, 3.0, 4.0]);
        let p = Payload::new().with("i", 0).with("j", 2);
        let s0 = a.initial_state();

        // the source value starts over the source slot and closes in on slot 0
        let mut last = f32::INFINITY;
        for t in [0.0, 0.25, 0.5, 0.75, 1.0] {
            let step = a.apply_event_step(&s0, EventKind::Assign, &p, t).unwrap();
            assert_eq!(ab(&step).copying, Some((0, 2)));
            assert_eq!(ab(&step).display_item(0), 2);
            assert_eq!(ab(&step).offset(2), 0.0, "source slot stays put");
            let dist = ab(&step).offset(0);
            assert!(dist < last || dist == 0.0);
            last = dist;
        }
        assert_eq!(last, 0.0);
        let start = a.apply_event_step(&s0, EventKind::Assign, &p, 0.0).unwrap();
        assert_eq!(ab(&start).offset(0), 28.0);

        let step = a.apply_event_step(&s0, EventKind::Assign, &p, 0.5).unwrap();
        assert_eq!(ab(&step).offset(0), 14.0);

        // source mutated between steps and commit: the committed value wins
        let mut changed = ab(&step).clone();
        changed.values = vec![5.0f32, 3.0, 7.0].into();
        let fin = a
            .finalize_event(&ActorState::ArrayBar(changed), EventKind::Assign, &p)
            .unwrap();
        assert_eq!(&*ab(&fin).values, &[7.0, 3.0, 7.0]);
        assert!(ab(&fin).offsets.is_empty());
        assert_eq!(ab(&fin).copying, None);
    }

    #[test]
    fn last_copy_step_draws_like_finalized() {
        let a = bar(&[3.0, 5.0, 4.0]);
        let p = Payload::new().with("i", 0).with("j", 2);
        let step = a
            .apply_event_step(&a.initial_state(), EventKind::Assign, &p, 1.0)
            .unwrap();
        let fin = a.finalize_event(&step, EventKind::Assign, &p).unwrap();
        assert_eq!(a.draw(&step).unwrap(), a.draw(&fin).unwrap());
    }

    #[test]
    fn assign_literal_has_no_motion() {
        let a = bar(&[3.0, 5.0]);
        let p = Payload::new().with("i", 1).with("value", 1.0);
        let step = a
            .apply_event_step(&a.initial_state(), EventKind::Assign, &p, 0.3)
            .unwrap();
        assert!(ab(&step).offsets.is_empty());
        assert_eq!(ab(&step).copying, None);
    }

    #[test]
    fn assign_payload_validation() {
        let a = bar(&[1.0, 2.0]);
        let s = a.initial_state();
        let both = Payload::new().with("i", 0).with("j", 1).with("value", 3.0);
        assert!(matches!(
            a.apply_event_step(&s, EventKind::Assign, &both, 0.0),
            Err(TimelineError::InvalidPayload { .. })
        ));
        let neither = Payload::new().with("i", 0);
        assert!(matches!(
            a.finalize_event(&s, EventKind::Assign, &neither),
            Err(TimelineError::InvalidPayload { .. })
        ));
    }

    #[test]
    fn values_are_shared_between_steps() {
        let a = bar(&[5.0, 3.0, 4.0]);
        let s0 = a.initial_state();
        let s1 = a
            .apply_event_step(&s0, EventKind::Swap, &swap_payload(0, 1), 0.5)
            .unwrap();
        assert!(Arc::ptr_eq(&ab(&s0).values, &ab(&s1).values));
    }

    #[test]
    fn draw_emits_rect_and_label_per_bar_with_color_precedence() {
        let a = bar(&[1.0, 2.0, 4.0]);
        let mut st = ArrayBarState::new(vec![1.0, 2.0, 4.0]);
        st.highlight = BTreeSet::from([0, 1, 2]);
        st.compare = Some((1, 2));
        st.sorted_upto = Some(2);
        let ops = a.draw(&ActorState::ArrayBar(st.clone())).unwrap();
        assert_eq!(ops.iter().filter(|op| op.kind() == "rect").count(), 3);
        assert_eq!(ops.iter().filter(|op| op.kind() == "text").count(), 3);
        assert!(ops.iter().all(|op| match op {
            DrawOp::Rect { fill, .. } => fill == SORTED_FILL,
            _ => true,
        }));

        st.sorted_upto = Some(0);
        assert_eq!(st.fill_for_slot(0), SORTED_FILL);
        assert_eq!(st.fill_for_slot(1), COMPARE_FILL);
        st.compare = None;
        assert_eq!(st.fill_for_slot(1), HIGHLIGHT_FILL);
        st.highlight.clear();
        assert_eq!(st.fill_for_slot(1), DEFAULT_FILL);
    }

    #[test]
    fn draw_geometry_scales_to_max_value() {
        let a = bar(&[2.0, 4.0]);
        let ops = a.draw(&a.initial_state()).unwrap();
        match (&ops[0], &ops[1], &ops[2]) {
            (
                DrawOp::Rect { x, y, w, h, .. },
                DrawOp::Text { x: tx, y: ty, content, .. },
                DrawOp::Rect { x: x1, h: h1, .. },
            ) => {
                assert_eq!((*x, *w, *h), (6.0, 10.0, 30.0));
                assert_eq!(*y, 40.0);
                assert_eq!((*tx, *ty), (11.0, 28.0));
                assert_eq!(content, "2");
                assert_eq!((*x1, *h1), (20.0, 60.0));
            }
            other => panic!("unexpected ops {other:?}"),
        }
    }

    #[test]
    fn draw_without_labels_and_with_nonpositive_values() {
        let a = ArrayBar::new("A", vec![0.0, -1.0]).with_layout(ArrayBarLayout {
            show_value: false,
            ..ArrayBarLayout::default()
        });
        let ops = a.draw(&a.initial_state()).unwrap();
        assert_eq!(ops.len(), 2);
        for op in ops {
            match op {
                DrawOp::Rect { h, .. } => assert_eq!(h, 1.0),
                other => panic!("unexpected op {other:?}"),
            }
        }
    }
}
