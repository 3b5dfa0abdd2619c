//! Read-only views for a renderer
//!
//! Nothing here feeds back into the simulation. A frontend draws layers in
//! `RenderLayer` order using the values produced below.

use glam::Vec2;
use serde::Serialize;

use super::agent::Agent;
use super::field::FlowField;
use crate::consts::{TRAIL_INTERVAL, WANDER_RADIUS};

/// Draw order, back to front
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum RenderLayer {
    Field,
    Trail,
    Agent,
    Overlay,
}

impl RenderLayer {
    pub const ALL: [RenderLayer; 4] = [
        RenderLayer::Field,
        RenderLayer::Trail,
        RenderLayer::Agent,
        RenderLayer::Overlay,
    ];
}

/// One flow field cell drawn as a line from its center
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldArrow {
    pub start: Vec2,
    pub end: Vec2,
}

/// Arrows for every cell, half a cell long
pub fn field_arrows(field: &FlowField) -> Vec<FieldArrow> {
    let res = field.resolution();
    field
        .cells()
        .map(|(row, col, dir)| {
            let start = Vec2::new((col as f32 + 0.5) * res, (row as f32 + 0.5) * res);
            FieldArrow {
                start,
                end: start + dir * (res / 2.0),
            }
        })
        .collect()
}

/// Placement for an agent sprite
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AgentSprite {
    pub position: Vec2,
    /// Signed angle (radians) from straight up `(0, -1)` to the velocity
    pub heading: f32,
}

impl AgentSprite {
    pub fn from_agent(agent: &Agent) -> Self {
        Self {
            position: agent.position,
            heading: heading_from_up(agent.velocity),
        }
    }
}

fn heading_from_up(velocity: Vec2) -> f32 {
    if velocity == Vec2::ZERO {
        return 0.0;
    }
    let up = Vec2::NEG_Y;
    up.perp_dot(velocity).atan2(up.dot(velocity))
}

/// Wander circle debug overlay
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WanderOverlay {
    pub position: Vec2,
    pub circle_center: Vec2,
    pub circle_radius: f32,
    pub target: Vec2,
}

impl WanderOverlay {
    pub fn from_agent(agent: &Agent) -> Self {
        Self {
            position: agent.position,
            circle_center: agent.position + agent.extent,
            circle_radius: WANDER_RADIUS,
            target: agent.projected_target,
        }
    }
}

/// Decides when each agent drops a trail particle
///
/// Particles themselves (fade, draw) belong to the frontend.
#[derive(Debug, Clone, Default)]
pub struct TrailEmitter {
    clocks: Vec<u32>,
}

impl TrailEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one tick; returns the positions that emit a particle now
    pub fn update(&mut self, agents: &[Agent]) -> Vec<Vec2> {
        self.clocks.resize(agents.len(), 0);
        let mut emitted = Vec::new();
        for (clock, agent) in self.clocks.iter_mut().zip(agents) {
            *clock += 1;
            if *clock >= TRAIL_INTERVAL {
                *clock = 0;
                emitted.push(agent.position);
            }
        }
        emitted
    }
}
