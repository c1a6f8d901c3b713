//! High-level runtime engine settings
//!
//! Selects sequential or rayon-parallel accumulation and relaxation
//! used when building and running a `Scenario`

#[derive(Debug, Clone, Default)]
pub struct Engine {
    pub parallel: bool, // false = one thread, true = partitioned by target panel
}
