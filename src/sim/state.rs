//! Simulation state
//!
//! Everything one run owns: the world, the flow field, the agents and the
//! seeded RNG every random draw goes through.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::agent::Agent;
use super::field::FlowField;
use super::world::World;
use crate::error::SimResult;
use crate::settings::{BehaviorMode, SimConfig};

/// Complete simulation state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct SimState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub world: World,
    pub field: FlowField,
    /// Agents in stable index order
    pub agents: Vec<Agent>,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub(crate) rng: Pcg32,
}

impl SimState {
    /// Validate `config` and build a fresh run
    pub fn new(config: &SimConfig) -> SimResult<Self> {
        config.validate()?;

        let mut rng = Pcg32::seed_from_u64(config.seed);
        let world = config.world();
        let field = FlowField::new(world, config.resolution, &mut rng)?;
        let agents = (0..config.agent_count)
            .map(|_| {
                Agent::spawn(
                    world,
                    config.speed_range,
                    config.force_range,
                    config.mode,
                    &mut rng,
                )
            })
            .collect();

        log::info!(
            "New simulation: seed {}, {} agents ({}), field {}x{}",
            config.seed,
            config.agent_count,
            config.mode.as_str(),
            field.cols(),
            field.rows()
        );

        Ok(Self {
            seed: config.seed,
            world,
            field,
            agents,
            time_ticks: 0,
            rng,
        })
    }

    /// Switch every agent to `mode`
    pub fn set_mode(&mut self, mode: BehaviorMode) {
        for agent in &mut self.agents {
            agent.behavior = mode;
        }
    }

    /// Mean agent speed (world units per tick)
    pub fn mean_speed(&self) -> f32 {
        if self.agents.is_empty() {
            return 0.0;
        }
        let total: f32 = self.agents.iter().map(|a| a.velocity.length()).sum();
        total / self.agents.len() as f32
    }

    /// Mean agent heading (not normalized; short when agents disagree)
    pub fn mean_heading(&self) -> Vec2 {
        if self.agents.is_empty() {
            return Vec2::ZERO;
        }
        let total: Vec2 = self
            .agents
            .iter()
            .map(|a| a.velocity.normalize_or_zero())
            .sum();
        total / self.agents.len() as f32
    }
}
