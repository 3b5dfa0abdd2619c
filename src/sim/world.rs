//! Toroidal world bounds

use glam::Vec2;
use serde::Serialize;

/// Rectangular world that wraps on both axes
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct World {
    pub width: f32,
    pub height: f32,
}

impl World {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Re-enter a position that left the world at the opposite edge
    ///
    /// Result is always within `[0, width) x [0, height)`.
    #[inline]
    pub fn wrap(&self, pos: Vec2) -> Vec2 {
        Vec2::new(wrap_axis(pos.x, self.width), wrap_axis(pos.y, self.height))
    }

    #[inline]
    pub fn contains(&self, pos: Vec2) -> bool {
        (0.0..self.width).contains(&pos.x) && (0.0..self.height).contains(&pos.y)
    }
}

#[inline]
fn wrap_axis(value: f32, extent: f32) -> f32 {
    let wrapped = value.rem_euclid(extent);
    // rem_euclid of a tiny negative rounds up to `extent`
    if wrapped >= extent || !wrapped.is_finite() {
        0.0
    } else {
        wrapped
    }
}
