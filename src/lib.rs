pub mod simulation;
pub mod configuration;
pub mod benchmark;
pub mod error;

pub use simulation::states::{NVec3, VortexPanel, Lattice};
pub use simulation::flow::{Compressibility, FlowCondition, MachRegime};
pub use simulation::influence::{
    accumulate, accumulate_pair, horseshoe_influence, horseshoe_terms, induced_velocity, HorseshoeInduction,
    HorseshoeTerms, InducedVelocity, OnsetFlow, ParallelHorseshoeInduction, VelocitySet,
};
pub use simulation::relaxation::{is_relaxable, relax, relaxation_step, relaxation_step_parallel, RelaxOutcome, StepReport};
pub use simulation::scenario::{RunSummary, Scenario};

pub use configuration::config::{EngineConfig, ParametersConfig, PanelConfig, ScenarioConfig};
pub use error::{ConfigError, SolverError};

pub use benchmark::benchmark::{bench_accumulation, bench_relaxation_curve};
