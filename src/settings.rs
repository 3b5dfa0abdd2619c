//! Simulation configuration
//!
//! Loaded from JSON; every field falls back to its default when omitted.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{SimError, SimResult};
use crate::sim::{World, field};

/// Steering behavior an agent runs each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BehaviorMode {
    Wander,
    Arrive,
    #[default]
    Follow,
}

impl BehaviorMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            BehaviorMode::Wander => "wander",
            BehaviorMode::Arrive => "arrive",
            BehaviorMode::Follow => "follow",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "wander" => Some(BehaviorMode::Wander),
            "arrive" => Some(BehaviorMode::Arrive),
            "follow" => Some(BehaviorMode::Follow),
            _ => None,
        }
    }
}

/// Construction-time configuration for a simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub world_width: f32,
    pub world_height: f32,
    /// Flow field cell size in world units
    pub resolution: f32,
    pub agent_count: usize,
    /// Per-agent max speed is drawn uniformly from [min, max]
    pub speed_range: [f32; 2],
    /// Per-agent max steering force is drawn uniformly from [min, max]
    pub force_range: [f32; 2],
    /// Initial behavior for every agent
    pub mode: BehaviorMode,
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            resolution: FIELD_RESOLUTION,
            agent_count: AGENT_COUNT,
            speed_range: SPEED_RANGE,
            force_range: FORCE_RANGE,
            mode: BehaviorMode::default(),
            seed: 0,
        }
    }
}

impl SimConfig {
    /// Parse a config from a JSON string
    pub fn from_json(json: &str) -> SimResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> SimResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Grid size this config produces: (cols, rows)
    pub fn grid_dims(&self) -> (usize, usize) {
        field::grid_dims(self.world(), self.resolution)
    }

    pub fn world(&self) -> World {
        World::new(self.world_width, self.world_height)
    }

    /// Reject configurations the simulation cannot run with
    pub fn validate(&self) -> SimResult<()> {
        check_positive("world_width", self.world_width)?;
        check_positive("world_height", self.world_height)?;
        if !(self.resolution > 0.0 && self.resolution.is_finite()) {
            return Err(SimError::NonPositiveResolution(self.resolution));
        }
        let (cols, rows) = self.grid_dims();
        if cols == 0 || rows == 0 {
            return Err(SimError::EmptyGrid { cols, rows });
        }
        if self.agent_count == 0 {
            return Err(SimError::NoAgents);
        }
        check_range("speed", self.speed_range)?;
        check_range("force", self.force_range)?;
        Ok(())
    }
}

fn check_positive(name: &'static str, value: f32) -> SimResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(SimError::NonPositiveDimension { name, value })
    }
}

fn check_range(name: &'static str, [min, max]: [f32; 2]) -> SimResult<()> {
    if min > 0.0 && min <= max && max.is_finite() {
        Ok(())
    } else {
        Err(SimError::InvalidRange { name, min, max })
    }
}
