//! Scene: actor registry plus canvas geometry, and the draw-op compositor.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::actor::Actor;
use crate::draw::DrawOp;
use crate::error::{Result, TimelineError};
use crate::frame::{Frame, FrameStates};

#[derive(Debug)]
pub struct Scene {
    width: u32,
    height: u32,
    /// Registration order is the draw order.
    actors: IndexMap<String, Box<dyn Actor>>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(80, 24)
    }
}

impl Scene {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            actors: IndexMap::new(),
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Register an actor. Duplicate names are rejected immediately.
    pub fn add(&mut self, actor: impl Actor + 'static) -> Result<&mut Self> {
        let name = actor.name().to_string();
        if self.actors.contains_key(&name) {
            return Err(TimelineError::DuplicateActor { name });
        }
        log::debug!("scene: registered actor '{name}'");
        self.actors.insert(name, Box::new(actor));
        Ok(self)
    }

    /// Builder-style [`Scene::add`].
    pub fn with_actor(mut self, actor: impl Actor + 'static) -> Result<Self> {
        self.add(actor)?;
        Ok(self)
    }

    pub fn actor(&self, name: &str) -> Result<&dyn Actor> {
        self.actors
            .get(name)
            .map(|a| a.as_ref())
            .ok_or_else(|| TimelineError::UnknownActor {
                name: name.to_string(),
            })
    }

    pub fn actor_names(&self) -> impl Iterator<Item = &str> {
        self.actors.keys().map(String::as_str)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.actors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// Every actor's initial state.
    pub fn initial_states(&self) -> FrameStates {
        self.actors
            .iter()
            .map(|(name, actor)| (name.clone(), Arc::new(actor.initial_state())))
            .collect()
    }

    /// Compose draw ops of all actors in registration order. Actors missing
    /// from `states` draw their initial state.
    pub fn render(&self, states: &FrameStates) -> Result<Vec<DrawOp>> {
        let mut ops = Vec::new();
        for (name, actor) in &self.actors {
            let drawn = match states.get(name) {
                Some(state) => actor.draw(state)?,
                None => actor.draw(&actor.initial_state())?,
            };
            ops.extend(drawn);
        }
        Ok(ops)
    }

    #[inline]
    pub fn render_frame(&self, frame: &Frame) -> Result<Vec<DrawOp>> {
        self.render(frame.states())
    }
}
