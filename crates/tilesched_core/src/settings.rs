//! Scheduler settings

use crate::error::{GridError, SettingsError};
use crate::grid::{Grid, DEFAULT_REGION_SIZE};
use glam::IVec2;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default bound on task tree nesting.
pub const DEFAULT_MAX_TASK_DEPTH: usize = 64;

/// Scheduler settings. Every field falls back to its default when missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerSettings {
    /// Break region-count ties by distance to online players.
    pub distance_tiebreak: bool,
    /// Deepest task tree accepted for ordering.
    pub max_task_depth: usize,
    /// Grid for worlds that do not declare their own.
    pub region_grid: GridSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    pub cell_size_x: i32,
    pub cell_size_z: i32,
    pub offset_x: i32,
    pub offset_z: i32,
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self {
            distance_tiebreak: true,
            max_task_depth: DEFAULT_MAX_TASK_DEPTH,
            region_grid: GridSettings::default(),
        }
    }
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            cell_size_x: DEFAULT_REGION_SIZE,
            cell_size_z: DEFAULT_REGION_SIZE,
            offset_x: 0,
            offset_z: 0,
        }
    }
}

impl GridSettings {
    pub fn to_grid(&self) -> Result<Grid, GridError> {
        Grid::new(
            IVec2::new(self.cell_size_x, self.cell_size_z),
            IVec2::new(self.offset_x, self.offset_z),
        )
    }
}

impl SchedulerSettings {
    /// Load and validate settings from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let settings = Self::from_json(&text)?;
        tracing::debug!(path = %path.display(), ?settings, "settings loaded");
        Ok(settings)
    }

    /// Parse and validate settings from JSON text.
    pub fn from_json(text: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        self.region_grid.to_grid()?;
        Ok(())
    }
}
