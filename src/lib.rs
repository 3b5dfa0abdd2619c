//! Flow Steer - steering agents on a toroidal world
//!
//! Core modules:
//! - `sim`: Deterministic simulation (flow field, agents, fixed-step tick)
//! - `settings`: Run configuration loaded from JSON
//! - `error`: Configuration errors raised at construction time

pub mod error;
pub mod settings;
pub mod sim;

pub use error::{SimError, SimResult};
pub use settings::{BehaviorMode, SimConfig};

use glam::Vec2;

/// Simulation constants
pub mod consts {
    /// Fixed simulation rate (ticks per second)
    pub const SIM_HZ: u32 = 60;

    /// Default world dimensions
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 800.0;

    /// Default flow field cell size
    pub const FIELD_RESOLUTION: f32 = 50.0;
    /// Per-component jitter added to each cell on mutation
    pub const FIELD_JITTER: f32 = 0.8;
    /// Per-component jitter added to the drift direction on mutation
    pub const DRIFT_JITTER: f32 = 0.5;
    /// Mutation threshold is drawn from [MIN, MAX)
    pub const MUTATION_THRESHOLD_MIN: u32 = 10;
    pub const MUTATION_THRESHOLD_MAX: u32 = 20;

    /// Default number of agents
    pub const AGENT_COUNT: usize = 100;
    /// Default max speed range (world units per tick)
    pub const SPEED_RANGE: [f32; 2] = [3.0, 6.0];
    /// Default max steering force range
    pub const FORCE_RANGE: [f32; 2] = [0.05, 0.15];

    /// Distance under which arrive decelerates
    pub const ARRIVAL_RADIUS: f32 = 100.0;
    /// Distance of the wander circle ahead of the agent
    pub const WANDER_DISTANCE: f32 = 80.0;
    /// Wander circle radius
    pub const WANDER_RADIUS: f32 = 30.0;
    /// Wander angle jitter is an integer in [-STEPS, STEPS] times this
    pub const WANDER_ANGLE_STEP: f32 = 1.0 / 16.0;
    pub const WANDER_ANGLE_STEPS: i32 = 2;

    /// Ticks between trail particle emissions
    pub const TRAIL_INTERVAL: u32 = 3;
}

/// Clamp `n` into `[low, high]`
#[inline]
pub fn constrain(n: f32, low: f32, high: f32) -> f32 {
    n.min(high).max(low)
}

/// Linearly map `n` from `[start1, stop1]` onto `[start2, stop2]`, clamped to the output range
///
/// The output range may run in either direction.
#[inline]
pub fn remap(n: f32, start1: f32, stop1: f32, start2: f32, stop2: f32) -> f32 {
    let value = (n - start1) / (stop1 - start1) * (stop2 - start2) + start2;
    if start2 < stop2 {
        constrain(value, start2, stop2)
    } else {
        constrain(value, stop2, start2)
    }
}

/// Unit vector pointing at angle `theta` (radians)
#[inline]
pub fn unit_from_angle(theta: f32) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remap_forward() {
        assert!((remap(50.0, 0.0, 100.0, 0.0, 5.0) - 2.5).abs() < 1e-6);
        assert_eq!(remap(150.0, 0.0, 100.0, 0.0, 5.0), 5.0);
        assert_eq!(remap(-10.0, 0.0, 100.0, 0.0, 5.0), 0.0);
    }

    #[test]
    fn test_remap_reversed_output() {
        assert!((remap(25.0, 0.0, 100.0, 10.0, 0.0) - 7.5).abs() < 1e-6);
        assert_eq!(remap(200.0, 0.0, 100.0, 10.0, 0.0), 0.0);
    }

    #[test]
    fn test_unit_from_angle() {
        let v = unit_from_angle(std::f32::consts::FRAC_PI_2);
        assert!(v.x.abs() < 1e-6);
        assert!((v.y - 1.0).abs() < 1e-6);
        assert!((unit_from_angle(1.234).length() - 1.0).abs() < 1e-6);
    }
}
