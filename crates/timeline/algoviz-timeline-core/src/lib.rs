//! Algoviz Timeline Core (renderer-agnostic)
//!
//! Turns a declarative sequence of algorithm-animation events (compare, swap,
//! highlight, assign, mark sorted) into a deterministic sequence of immutable
//! frames. Renderers consume frames through [`Scene::render`], which yields a
//! closed set of primitive [`DrawOp`]s.
//!
//! ```
//! use algoviz_timeline::{ArrayBar, EventOptions, HighlightTarget, Scene, Timeline};
//!
//! let scene = Scene::default().with_actor(ArrayBar::new("A", vec![5.0, 3.0, 4.0]))?;
//! let mut tl = Timeline::new(20);
//! tl.highlight("A", HighlightTarget::Slot(1), EventOptions::new())
//!     .compare("A", 0, 1, EventOptions::new().duration(2))
//!     .swap("A", 0, 1, EventOptions::new().duration(1));
//!
//! let frames = tl.build_frames(&scene)?;
//! assert_eq!(frames.len(), 4);
//! assert_eq!(frames[3].array_bar("A").unwrap().order, vec![1, 0, 2]);
//! # Ok::<(), algoviz_timeline::TimelineError>(())
//! ```

pub mod actor;
pub mod config;
pub mod draw;
pub mod easing;
pub mod error;
pub mod event;
pub mod frame;
pub mod scene;
pub mod timeline;

// Re-exports for consumers (renderers, players, demos)
pub use actor::{Actor, ActorState, ArrayBar, ArrayBarState, PayloadArgs};
pub use config::{ArrayBarLayout, EventDurations, TimelineConfig};
pub use draw::{Color, DrawOp, FontWeight, Point};
pub use easing::{Easing, EasingRegistry, DEFAULT_EASING};
pub use error::{Result, TimelineError};
pub use event::{Event, EventKind, EventOptions, HighlightTarget, Payload};
pub use frame::{export_frames_json, Frame, FrameStates};
pub use scene::Scene;
pub use timeline::Timeline;
