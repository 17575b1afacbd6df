//! Stage catalog: optional per-stage overrides
//!
//! The catalog file is a JSON array of objects. Each entry may override the
//! world size and the entity counts of one stage; anything it leaves out
//! falls back to the growth formulas in `sim::stage`.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// One catalog entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StageConfig {
    /// Stage number; defaults to the 1-based array position
    #[serde(default)]
    pub stage: Option<u32>,
    #[serde(default)]
    pub world_w: Option<i32>,
    #[serde(default)]
    pub world_h: Option<i32>,
    #[serde(default)]
    pub collectibles: Option<usize>,
    #[serde(default)]
    pub enemies: Option<usize>,
}

/// Stage number -> override
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageCatalog {
    entries: HashMap<u32, StageConfig>,
}

impl StageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index entries by stage number. Later duplicates replace earlier ones.
    pub fn from_entries(entries: Vec<StageConfig>) -> Self {
        let entries = entries
            .into_iter()
            .enumerate()
            .map(|(i, cfg)| (cfg.stage.unwrap_or(i as u32 + 1), cfg))
            .collect();
        Self { entries }
    }

    /// Parse catalog JSON; any parse failure yields an empty catalog
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Vec<StageConfig>>(json) {
            Ok(entries) => Self::from_entries(entries),
            Err(e) => {
                log::warn!("Ignoring malformed stage catalog: {}", e);
                Self::new()
            }
        }
    }

    pub fn get(&self, stage: u32) -> Option<&StageConfig> {
        self.entries.get(&stage)
    }

    /// World size override; only honored when both dimensions are given
    pub fn world_size(&self, stage: u32) -> Option<(i32, i32)> {
        let cfg = self.get(stage)?;
        Some((cfg.world_w?, cfg.world_h?))
    }

    pub fn collectibles(&self, stage: u32) -> Option<usize> {
        self.get(stage)?.collectibles
    }

    pub fn enemies(&self, stage: u32) -> Option<usize> {
        self.get(stage)?.enemies
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Where `reset_stage` gets a fresh catalog from
pub trait StageCatalogSource {
    fn load(&self) -> StageCatalog;
}

/// An in-memory catalog is its own source
impl StageCatalogSource for StageCatalog {
    fn load(&self) -> StageCatalog {
        self.clone()
    }
}

/// Catalog backed by a JSON file, re-read on every load
#[derive(Debug, Clone)]
pub struct CatalogFile {
    path: PathBuf,
}

impl CatalogFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StageCatalogSource for CatalogFile {
    fn load(&self) -> StageCatalog {
        match fs::read_to_string(&self.path) {
            Ok(json) => StageCatalog::from_json(&json),
            Err(e) => {
                log::debug!("No stage catalog at {}: {}", self.path.display(), e);
                StageCatalog::new()
            }
        }
    }
}
