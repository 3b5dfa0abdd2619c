//! Time-varying flow field
//!
//! A grid of unit vectors covering the world. Every so often each cell is
//! nudged by a small random vector plus a shared drift direction, and the
//! drift itself wanders, so the field evolves into slowly shifting currents
//! rather than per-cell noise.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::world::World;
use crate::consts::*;
use crate::error::{SimError, SimResult};
use crate::unit_from_angle;

/// Uniformly random direction on the unit circle
pub fn random_unit_vector(rng: &mut impl Rng) -> Vec2 {
    unit_from_angle(rng.random_range(0.0..TAU))
}

fn random_jitter(rng: &mut impl Rng, amount: f32) -> Vec2 {
    Vec2::new(
        rng.random_range(-amount..=amount),
        rng.random_range(-amount..=amount),
    )
}

fn draw_threshold(rng: &mut impl Rng) -> u32 {
    rng.random_range(MUTATION_THRESHOLD_MIN..MUTATION_THRESHOLD_MAX)
}

/// Grid size `(cols, rows)` covering `world` at `resolution`
///
/// Partial cells at the far edges are dropped. Non-finite ratios give 0.
pub fn grid_dims(world: World, resolution: f32) -> (usize, usize) {
    let cols = (world.width / resolution).floor().max(0.0) as usize;
    let rows = (world.height / resolution).floor().max(0.0) as usize;
    (cols, rows)
}

/// Grid of unit vectors, row-major
///
/// Deserializing re-checks the grid shape and unit lengths.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "FlowFieldRaw")]
pub struct FlowField {
    resolution: f32,
    cols: usize,
    rows: usize,
    grid: Vec<Vec2>,
    /// Global bias added to every cell on mutation
    drift: Vec2,
    /// Ticks since the last mutation
    tick_counter: u32,
    /// Mutation fires once `tick_counter` exceeds this
    threshold: u32,
    mutations: u64,
}

impl FlowField {
    /// Build a field of random unit vectors covering `world`
    pub fn new(world: World, resolution: f32, rng: &mut impl Rng) -> SimResult<Self> {
        if !(resolution > 0.0 && resolution.is_finite()) {
            return Err(SimError::NonPositiveResolution(resolution));
        }
        let (cols, rows) = grid_dims(world, resolution);
        if cols == 0 || rows == 0 {
            return Err(SimError::EmptyGrid { cols, rows });
        }

        let grid = (0..rows * cols).map(|_| random_unit_vector(rng)).collect();
        let threshold = draw_threshold(rng);

        log::debug!("Flow field {cols}x{rows} at resolution {resolution}");

        Ok(Self {
            resolution,
            cols,
            rows,
            grid,
            drift: Vec2::ONE.normalize(),
            tick_counter: 0,
            threshold,
            mutations: 0,
        })
    }

    #[inline]
    pub fn resolution(&self) -> f32 {
        self.resolution
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn drift(&self) -> Vec2 {
        self.drift
    }

    #[inline]
    pub fn tick_counter(&self) -> u32 {
        self.tick_counter
    }

    /// Number of mutations applied so far
    #[inline]
    pub fn mutations(&self) -> u64 {
        self.mutations
    }

    /// Vector stored at `(row, col)`
    ///
    /// # Panics
    ///
    /// Panics if `row >= rows()` or `col >= cols()`. Use [`FlowField::lookup`]
    /// for world positions, which clamps to the grid.
    #[inline]
    pub fn cell(&self, row: usize, col: usize) -> Vec2 {
        self.grid[row * self.cols + col]
    }

    /// Iterate cells as `(row, col, vector)` in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, Vec2)> + '_ {
        self.grid
            .iter()
            .enumerate()
            .map(|(i, v)| (i / self.cols, i % self.cols, *v))
    }

    /// Grid cell `(row, col)` holding `pos`, clamped to the grid
    pub fn cell_index(&self, pos: Vec2) -> (usize, usize) {
        let col = clamp_index(pos.x / self.resolution, self.cols);
        let row = clamp_index(pos.y / self.resolution, self.rows);
        (row, col)
    }

    /// Field vector at a world position (returned by value)
    pub fn lookup(&self, pos: Vec2) -> Vec2 {
        let (row, col) = self.cell_index(pos);
        self.cell(row, col)
    }

    /// Advance one tick, mutating the grid when the counter passes the threshold
    ///
    /// Returns true if a mutation happened this tick.
    pub fn advance(&mut self, rng: &mut impl Rng) -> bool {
        self.tick_counter += 1;
        if self.tick_counter <= self.threshold {
            return false;
        }

        let drift = self.drift;
        for cell in &mut self.grid {
            let nudged = *cell + random_jitter(rng, FIELD_JITTER) + drift;
            // a zero sum keeps the old direction
            *cell = nudged.try_normalize().unwrap_or(*cell);
        }

        let nudged = self.drift + random_jitter(rng, DRIFT_JITTER);
        self.drift = nudged.try_normalize().unwrap_or(self.drift);

        self.tick_counter = 0;
        self.threshold = draw_threshold(rng);
        self.mutations += 1;

        log::debug!(
            "Flow field mutation {} (drift {:.3}, {:.3}; next after {} ticks)",
            self.mutations,
            self.drift.x,
            self.drift.y,
            self.threshold
        );
        true
    }
}

/// Unvalidated field as it appears on the wire
#[derive(Deserialize)]
struct FlowFieldRaw {
    resolution: f32,
    cols: usize,
    rows: usize,
    grid: Vec<Vec2>,
    drift: Vec2,
    tick_counter: u32,
    threshold: u32,
    mutations: u64,
}

const UNIT_TOLERANCE: f32 = 1e-3;

fn is_unit(v: Vec2) -> bool {
    (v.length() - 1.0).abs() < UNIT_TOLERANCE
}

impl TryFrom<FlowFieldRaw> for FlowField {
    type Error = SimError;

    fn try_from(raw: FlowFieldRaw) -> SimResult<Self> {
        if !(raw.resolution > 0.0 && raw.resolution.is_finite()) {
            return Err(SimError::NonPositiveResolution(raw.resolution));
        }
        if raw.cols == 0 || raw.rows == 0 {
            return Err(SimError::EmptyGrid {
                cols: raw.cols,
                rows: raw.rows,
            });
        }
        let expected = raw.cols.checked_mul(raw.rows);
        if expected != Some(raw.grid.len()) {
            return Err(SimError::InvalidField(format!(
                "{} cells stored for a {}x{} grid",
                raw.grid.len(),
                raw.cols,
                raw.rows
            )));
        }
        if let Some(i) = raw.grid.iter().position(|v| !is_unit(*v)) {
            return Err(SimError::InvalidField(format!(
                "cell {i} is not unit length"
            )));
        }
        if !is_unit(raw.drift) {
            return Err(SimError::InvalidField("drift is not unit length".into()));
        }
        if !(MUTATION_THRESHOLD_MIN..MUTATION_THRESHOLD_MAX).contains(&raw.threshold) {
            return Err(SimError::InvalidField(format!(
                "mutation threshold {} out of range",
                raw.threshold
            )));
        }

        Ok(Self {
            resolution: raw.resolution,
            cols: raw.cols,
            rows: raw.rows,
            grid: raw.grid,
            drift: raw.drift,
            tick_counter: raw.tick_counter,
            threshold: raw.threshold,
            mutations: raw.mutations,
        })
    }
}

#[inline]
fn clamp_index(scaled: f32, len: usize) -> usize {
    let max = (len - 1) as f32;
    // NaN falls through both comparisons to 0
    let idx = scaled.floor();
    if idx >= max {
        len - 1
    } else if idx > 0.0 {
        idx as usize
    } else {
        0
    }
}
