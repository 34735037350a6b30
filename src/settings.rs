//! Loadout files
//!
//! A loadout describes the item database, one character with its worn and
//! alternate gear, and the scripted swap timeline to run. Without an explicit
//! path it is read from `~/.config/gearswap/loadout.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::info;

use gearswap_core::SimConfig;
use gearswap_sim::{CharacterConfig, DatabaseConfig, ItemSlot};

/// A scripted swap request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapEvent {
    /// Simulation time in seconds; negative is pre-pull
    pub at_secs: f64,
    pub slots: Vec<ItemSlot>,
}

/// Everything needed for a run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Loadout {
    pub sim: SimConfig,
    /// Number of independent trials
    pub iterations: u32,
    pub database: DatabaseConfig,
    pub character: CharacterConfig,
    pub timeline: Vec<SwapEvent>,
}

impl Default for Loadout {
    fn default() -> Self {
        Self {
            sim: SimConfig::default(),
            iterations: 1,
            database: DatabaseConfig::default(),
            character: CharacterConfig::default(),
            timeline: Vec::new(),
        }
    }
}

impl Loadout {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("gearswap"))
    }

    /// Use `arg` if given, otherwise the loadout in the config directory
    pub fn resolve_path(arg: Option<String>) -> anyhow::Result<PathBuf> {
        if let Some(arg) = arg {
            return Ok(PathBuf::from(arg));
        }
        let Some(dir) = Self::config_dir() else {
            anyhow::bail!("Could not determine config directory");
        };
        Ok(dir.join("loadout.toml"))
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read loadout {:?}", path))?;
        let loadout = Self::parse(&content).with_context(|| format!("Failed to parse loadout {:?}", path))?;
        info!("Loaded loadout from {:?}", path);
        Ok(loadout)
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Timeline events ordered by time
    pub fn sorted_timeline(&self) -> Vec<SwapEvent> {
        let mut events = self.timeline.clone();
        events.sort_by(|a, b| a.at_secs.total_cmp(&b.at_secs));
        events
    }
}
