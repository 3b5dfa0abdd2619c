//! Fixed timestep simulation tick
//!
//! The field advances first, then every agent steps against that same field
//! snapshot. Agents never touch the field, so the order within the agent
//! pass does not matter beyond RNG consumption.

use glam::Vec2;

use super::agent::StepContext;
use super::state::SimState;
use crate::settings::BehaviorMode;

/// Input for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer position the arrive behavior steers to
    pub target: Option<Vec2>,
    /// Switch every agent to this behavior before stepping
    pub mode: Option<BehaviorMode>,
}

/// Advance the simulation by one tick
pub fn tick(state: &mut SimState, input: &TickInput) {
    if let Some(mode) = input.mode {
        state.set_mode(mode);
    }

    state.time_ticks += 1;

    state.field.advance(&mut state.rng);

    let ctx = StepContext {
        field: &state.field,
        world: state.world,
        target: input.target,
    };
    for agent in &mut state.agents {
        agent.step(&ctx, &mut state.rng);
    }
}
