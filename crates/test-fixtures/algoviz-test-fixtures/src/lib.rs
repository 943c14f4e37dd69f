//! Timeline fixtures shared by the workspace's integration tests.
//!
//! `fixtures/manifest.json` maps a scenario name to a JSON file holding a scene
//! description, a timeline document and the expected compiled result.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../../../fixtures/manifest.json"))
        .expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    timelines: BTreeMap<String, String>,
}

/// Timeline scenarios listed in the manifest.
pub mod timelines {
    use super::*;

    /// Scenario names in sorted order.
    pub fn keys() -> Vec<String> {
        MANIFEST.timelines.keys().cloned().collect()
    }

    /// Absolute path of a scenario file.
    pub fn path(name: &str) -> Result<PathBuf> {
        let rel = MANIFEST
            .timelines
            .get(name)
            .with_context(|| format!("no timeline fixture named '{name}'"))?;
        Ok(PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../../../fixtures")
            .join(rel))
    }

    /// Parse a scenario into `T`.
    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let path = path(name)?;
        let text = fs::read_to_string(&path)
            .with_context(|| format!("reading timeline fixture {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing timeline fixture '{name}'"))
    }
}
