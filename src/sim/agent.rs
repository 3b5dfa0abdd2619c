//! Steering agents
//!
//! Each agent turns a desired velocity into a bounded steering force, then
//! integrates it: velocity is clamped to `max_speed`, position wraps around
//! the world.

use glam::Vec2;
use rand::Rng;
use serde::Serialize;

use super::field::FlowField;
use super::world::World;
use crate::consts::*;
use crate::settings::BehaviorMode;
use crate::{remap, unit_from_angle};

/// Read-only inputs an agent sees during one step
#[derive(Debug, Clone, Copy)]
pub struct StepContext<'a> {
    pub field: &'a FlowField,
    pub world: World,
    /// Point the arrive behavior steers to (pointer position)
    pub target: Option<Vec2>,
}

/// A steering body
#[derive(Debug, Clone, Serialize)]
pub struct Agent {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Cleared after every step
    pub acceleration: Vec2,
    pub max_speed: f32,
    pub max_force: f32,
    pub behavior: BehaviorMode,
    /// Desired velocity from the last seek/arrive
    pub desired: Vec2,
    /// Steering force from the last behavior run
    pub steer: Vec2,
    /// Wander circle angle (radians, accumulated)
    pub wander_angle: f32,
    /// Wander circle center offset from the agent
    pub extent: Vec2,
    /// Point on the wander circle the agent arrives toward
    pub projected_target: Vec2,
}

impl Agent {
    pub fn new(position: Vec2, max_speed: f32, max_force: f32, behavior: BehaviorMode) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            max_speed,
            max_force,
            behavior,
            desired: Vec2::ZERO,
            steer: Vec2::ZERO,
            wander_angle: 0.0,
            extent: Vec2::ZERO,
            projected_target: Vec2::ZERO,
        }
    }

    /// Agent at a random position with speed and force drawn from the given ranges
    pub fn spawn(
        world: World,
        speed_range: [f32; 2],
        force_range: [f32; 2],
        behavior: BehaviorMode,
        rng: &mut impl Rng,
    ) -> Self {
        let position = Vec2::new(
            rng.random_range(0.0..world.width),
            rng.random_range(0.0..world.height),
        );
        let max_speed = rng.random_range(speed_range[0]..=speed_range[1]);
        let max_force = rng.random_range(force_range[0]..=force_range[1]);
        Self::new(position, max_speed, max_force, behavior)
    }

    /// Run the active behavior and integrate one tick
    pub fn step(&mut self, ctx: &StepContext<'_>, rng: &mut impl Rng) {
        match self.behavior {
            BehaviorMode::Wander => self.wander(rng),
            BehaviorMode::Follow => {
                self.follow(ctx.field);
            }
            BehaviorMode::Arrive => {
                // no pointer means nothing to steer toward; coast
                if let Some(target) = ctx.target {
                    self.arrive(target);
                }
            }
        }

        self.velocity = (self.velocity + self.acceleration).clamp_length_max(self.max_speed);
        self.position += self.velocity;
        self.acceleration = Vec2::ZERO;
        self.position = ctx.world.wrap(self.position);
    }

    /// Steer toward `target` at full speed
    pub fn seek(&mut self, target: Vec2) -> Vec2 {
        self.desired = (target - self.position).normalize_or_zero() * self.max_speed;
        self.apply_steering(self.desired)
    }

    /// Steer toward `target`, slowing down inside the arrival radius
    pub fn arrive(&mut self, target: Vec2) -> Vec2 {
        let offset = target - self.position;
        let distance = offset.length();
        let speed = if distance < ARRIVAL_RADIUS {
            remap(distance, 0.0, ARRIVAL_RADIUS, 0.0, self.max_speed)
        } else {
            self.max_speed
        };
        self.desired = offset.normalize_or_zero() * speed;
        self.apply_steering(self.desired)
    }

    /// Arrive at a point circling ahead of the agent
    pub fn wander(&mut self, rng: &mut impl Rng) {
        self.arrive(self.projected_target);

        if self.velocity != Vec2::ZERO {
            self.extent = self.velocity.normalize_or_zero() * WANDER_DISTANCE;
            let jitter = rng.random_range(-WANDER_ANGLE_STEPS..=WANDER_ANGLE_STEPS);
            self.wander_angle += jitter as f32 * WANDER_ANGLE_STEP;
            self.projected_target =
                self.position + self.extent + unit_from_angle(self.wander_angle) * WANDER_RADIUS;
        }
    }

    /// Align with the flow field under the agent
    pub fn follow(&mut self, field: &FlowField) -> Vec2 {
        self.desired = field.lookup(self.position) * self.max_speed;
        self.apply_steering(self.desired)
    }

    fn apply_steering(&mut self, desired: Vec2) -> Vec2 {
        self.steer = (desired - self.velocity).clamp_length_max(self.max_force);
        self.acceleration += self.steer;
        self.steer
    }
}
