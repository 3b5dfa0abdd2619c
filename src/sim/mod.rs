//! Deterministic simulation module
//!
//! All steering and field logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (agents by index, grid row-major)
//! - No rendering or platform dependencies

pub mod agent;
pub mod field;
pub mod state;
pub mod tick;
pub mod view;
pub mod world;

pub use agent::{Agent, StepContext};
pub use field::{FlowField, random_unit_vector};
pub use state::SimState;
pub use tick::{TickInput, tick};
pub use view::{AgentSprite, FieldArrow, RenderLayer, TrailEmitter, WanderOverlay, field_arrows};
pub use world::World;
