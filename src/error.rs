//! Configuration errors
//!
//! Only construction and config loading can fail. Per-tick code is total.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("{name} must be positive, got {value}")]
    NonPositiveDimension { name: &'static str, value: f32 },

    #[error("field resolution must be positive, got {0}")]
    NonPositiveResolution(f32),

    #[error("flow field would be empty ({cols} cols x {rows} rows); resolution exceeds the world")]
    EmptyGrid { cols: usize, rows: usize },

    #[error("invalid flow field: {0}")]
    InvalidField(String),

    #[error("agent count must be at least 1")]
    NoAgents,

    #[error("invalid {name} range [{min}, {max}]")]
    InvalidRange { name: &'static str, min: f32, max: f32 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type SimResult<T> = Result<T, SimError>;
