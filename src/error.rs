//! Error types for scenario loading and the relaxation driver.
//!
//! The kernel, pairwise accumulation and per-panel relaxation never fail;
//! degenerate geometry substitutes zero. Errors only arise from bad
//! configuration and from the driver's divergence / non-finite guards.

use thiserror::Error;

/// Errors raised while validating a scenario configuration
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// A 3-vector field did not have exactly three components
    #[error("panel {panel}: `{field}` must have 3 components, got {len}")]
    VectorLength {
        panel: usize,
        field: &'static str,
        len: usize,
    },

    /// A numeric value was NaN or infinite
    #[error("`{field}` must be finite, got {value}")]
    NonFinite { field: String, value: f64 },

    /// Panel width or height was negative
    #[error("panel {panel}: `{field}` must be >= 0, got {value}")]
    NegativeExtent {
        panel: usize,
        field: &'static str,
        value: f64,
    },

    #[error("mach must be >= 0, got {0}")]
    InvalidMach(f64),

    #[error("damping must be in (0, 1], got {0}")]
    InvalidDamping(f64),

    #[error("divergence limit must be > 0, got {0}")]
    InvalidDivergenceLimit(f64),

    #[error("iteration count must be > 0")]
    NoIterations,

    #[error("scenario has no panels")]
    NoPanels,
}

/// Fatal conditions detected by the relaxation driver
#[derive(Debug, Error, PartialEq)]
pub enum SolverError {
    /// Strength magnitude exceeded the configured sanity bound
    #[error("panel {panel} diverged at iteration {iteration}: strength {strength:e} exceeds {limit:e}")]
    Diverged {
        panel: usize,
        iteration: usize,
        strength: f64,
        limit: f64,
    },

    /// An accumulated velocity or strength was NaN or infinite
    #[error("panel {panel} produced a non-finite value at iteration {iteration}")]
    NonFinite { panel: usize, iteration: usize },
}

impl SolverError {
    /// Returns `true` if this is a divergence abort
    pub fn is_divergence(&self) -> bool {
        matches!(self, SolverError::Diverged { .. })
    }
}
