//! Build fully-initialized relaxation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a runtime bundle
//! (`Scenario`) containing:
//! - engine settings (`Engine`)
//! - numerical parameters (`Parameters`)
//! - flow condition (`FlowCondition`)
//! - lattice state (`Lattice`, already transformed into the flow frame)
//! - active velocity set (`VelocitySet`)
//!
//! `Scenario::run` is a reference driver: it performs the configured number
//! of reset -> accumulate -> relax cycles and aborts on divergence or on a
//! non-finite value. Deciding when a lattice has converged is left to the
//! caller.

use crate::configuration::config::{PanelConfig, ScenarioConfig};
use crate::error::{ConfigError, SolverError};
use crate::simulation::engine::Engine;
use crate::simulation::flow::FlowCondition;
use crate::simulation::influence::{HorseshoeInduction, OnsetFlow, ParallelHorseshoeInduction, VelocitySet};
use crate::simulation::params::Parameters;
use crate::simulation::relaxation::{relaxation_step, relaxation_step_parallel, is_relaxable, StepReport};
use crate::simulation::states::{Lattice, NVec3, VortexPanel};

/// Runtime bundle for one flow condition
pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub flow: FlowCondition,
    pub lattice: Lattice,
    pub velocities: VelocitySet,
}

/// What a completed run leaves behind
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub residuals: Vec<f64>, // max |normal velocity| per step
    pub strengths: Vec<f64>, // final strength per panel
}

impl RunSummary {
    pub fn final_residual(&self) -> Option<f64> {
        self.residuals.last().copied()
    }
}

impl Scenario {
    /// Assemble a scenario from runtime parts.
    ///
    /// Applies the flow transform to every panel and registers the horseshoe
    /// sum (direct or parallel per `engine`) plus the onset flow.
    pub fn new(engine: Engine, mut parameters: Parameters, flow: FlowCondition, mut lattice: Lattice) -> Self {
        parameters.compressibility = flow.compressibility();
        lattice.transform(&flow.design_to_flow());

        let comp = parameters.compressibility;
        let mut velocities = VelocitySet::new();
        velocities = if engine.parallel {
            velocities.with(ParallelHorseshoeInduction { flow: comp })
        } else {
            velocities.with(HorseshoeInduction { flow: comp })
        };
        velocities = velocities.with(OnsetFlow { speed: parameters.onset_speed });

        for (i, p) in lattice.panels.iter().enumerate() {
            if !is_relaxable(p, comp) {
                log::warn!("panel {i} has zero or non-finite self-influence; its strength will not be relaxed");
            }
        }

        Self {
            engine,
            parameters,
            flow,
            lattice,
            velocities,
        }
    }

    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;

        // Panels: map `PanelConfig` -> runtime `VortexPanel` using nalgebra vectors
        let panels = cfg
            .panels
            .iter()
            .enumerate()
            .map(|(i, pc): (usize, &PanelConfig)| -> Result<VortexPanel, ConfigError> {
                let (pos, normal) = pc.vectors(i)?;
                Ok(VortexPanel::new(pc.width, pc.height, NVec3::from(pos), NVec3::from(normal)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        // Parameters (runtime) from ParametersConfig
        let p_cfg = &cfg.parameters;
        let parameters = Parameters {
            damping: p_cfg.damping,
            iterations: p_cfg.iterations,
            divergence_limit: p_cfg.divergence_limit,
            onset_speed: p_cfg.onset_speed,
            print_interval: p_cfg.print_interval,
            ..Parameters::default()
        };

        let flow = FlowCondition::new(
            p_cfg.mach,
            p_cfg.alpha_deg.to_radians(),
            p_cfg.sideslip_deg.to_radians(),
        );

        // Engine (runtime) from EngineConfig
        let engine = Engine {
            parallel: cfg.engine.parallel,
        };

        log::debug!(
            "building scenario: {} panels, mach {}, beta {:.4}, parallel {}",
            panels.len(),
            flow.mach,
            flow.compressibility().beta,
            engine.parallel
        );

        Ok(Self::new(engine, parameters, flow, Lattice::new(panels)))
    }

    /// One reset -> accumulate -> relax cycle with the guards applied
    pub fn step(&mut self) -> Result<StepReport, SolverError> {
        let report = if self.engine.parallel {
            relaxation_step_parallel(&mut self.lattice, &self.velocities, &self.parameters)
        } else {
            relaxation_step(&mut self.lattice, &self.velocities, &self.parameters)
        };
        self.check(&report)?;
        Ok(report)
    }

    /// Run the configured number of steps
    pub fn run(&mut self) -> Result<RunSummary, SolverError> {
        let mut residuals = Vec::with_capacity(self.parameters.iterations);

        for _ in 0..self.parameters.iterations {
            let report = self.step()?;
            residuals.push(report.max_residual);

            let every = self.parameters.print_interval;
            if every > 0 && report.iteration % every == 0 {
                log::info!(
                    "relaxation step {}: max residual = {:.6e}, max change = {:.6e}",
                    report.iteration,
                    report.max_residual,
                    report.max_change
                );
            }
        }

        Ok(RunSummary {
            residuals,
            strengths: self.lattice.strengths(),
        })
    }

    /// Divergence guard and non-finite check over the lattice after a step
    fn check(&self, report: &StepReport) -> Result<(), SolverError> {
        let iteration = report.iteration;
        let limit = self.parameters.divergence_limit;

        for (panel, (p, v)) in self.lattice.panels.iter().zip(report.velocities.iter()).enumerate() {
            let strength = p.strength();
            if !strength.is_finite() || !v.iter().all(|c| c.is_finite()) {
                return Err(SolverError::NonFinite { panel, iteration });
            }
            if strength.abs() > limit {
                return Err(SolverError::Diverged {
                    panel,
                    iteration,
                    strength,
                    limit,
                });
            }
        }
        Ok(())
    }
}
