//! Easing registry.
//!
//! A closed, process-wide table from easing name to a normalized timing
//! function `f: [0,1] -> [0,1]` with `f(0) = 0` and `f(1) = 1`.

use hashbrown::HashMap;
use once_cell::sync::Lazy;

use crate::error::{Result, TimelineError};

pub const LINEAR: &str = "linear";
pub const EASE_IN_OUT_CUBIC: &str = "easeInOutCubic";
/// Applied when an event does not name an easing.
pub const DEFAULT_EASING: &str = EASE_IN_OUT_CUBIC;

pub type EasingFn = fn(f32) -> f32;

static REGISTRY: Lazy<EasingRegistry> = Lazy::new(EasingRegistry::builtin);

#[inline]
pub fn linear(t: f32) -> f32 {
    t
}

/// Cubic ease-in-out: accelerate through the first half, decelerate through the second.
#[inline]
pub fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// A resolved easing function. Copyable and stateless.
#[derive(Clone, Copy, Debug)]
pub struct Easing {
    name: &'static str,
    f: EasingFn,
}

impl Easing {
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Eased progress for raw progress `t`; `t` is clamped into `[0, 1]`.
    #[inline]
    pub fn apply(&self, t: f32) -> f32 {
        (self.f)(t.clamp(0.0, 1.0))
    }
}

/// Name -> easing lookup table. Read-only after construction.
#[derive(Debug)]
pub struct EasingRegistry {
    functions: HashMap<&'static str, Easing>,
}

impl EasingRegistry {
    /// The shared built-in registry.
    #[inline]
    pub fn global() -> &'static EasingRegistry {
        &REGISTRY
    }

    fn builtin() -> Self {
        let linear = Easing {
            name: LINEAR,
            f: linear,
        };
        let cubic = Easing {
            name: EASE_IN_OUT_CUBIC,
            f: ease_in_out_cubic,
        };
        let mut functions = HashMap::new();
        functions.insert(LINEAR, linear);
        functions.insert(EASE_IN_OUT_CUBIC, cubic);
        // snake_case alias
        functions.insert("ease_in_out_cubic", cubic);
        Self { functions }
    }

    /// Resolve an easing by name. Unknown names are an error, never a fallback.
    pub fn resolve(&self, name: &str) -> Result<Easing> {
        self.functions
            .get(name)
            .copied()
            .ok_or_else(|| TimelineError::UnknownEasing {
                name: name.to_string(),
            })
    }

    /// Canonical names of the registered functions, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.functions.values().map(|e| e.name).collect();
        names.sort_unstable();
        names.dedup();
        names
    }
}
