//! Damped strength relaxation for the vortex lattice
//!
//! Provides the per-panel update that nudges a panel's circulation toward
//! the value nulling the normal velocity at its control point, and
//! sequential / rayon-parallel steps that run one full
//! reset -> accumulate -> relax cycle over a [`Lattice`]

use rayon::prelude::*;

use super::flow::Compressibility;
use super::influence::{horseshoe_influence, VelocitySet, FOUR_PI};
use super::params::Parameters;
use super::states::{Lattice, NVec3, VortexPanel};

/// Result of relaxing one panel
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RelaxOutcome {
    /// Strength moved by `change` toward `target`
    Updated { change: f64, residual: f64, target: f64 },
    /// Self-influence normal component was zero; strength untouched
    Skipped { residual: f64 },
}

impl RelaxOutcome {
    /// Normal velocity at the control point before the update
    pub fn residual(&self) -> f64 {
        match *self {
            RelaxOutcome::Updated { residual, .. } | RelaxOutcome::Skipped { residual } => residual,
        }
    }

    pub fn change(&self) -> f64 {
        match *self {
            RelaxOutcome::Updated { change, .. } => change,
            RelaxOutcome::Skipped { .. } => 0.0,
        }
    }
}

/// Normal component of the panel's own unit influence at its control point
pub fn self_normal_influence(panel: &VortexPanel, flow: Compressibility) -> f64 {
    horseshoe_influence(panel, &panel.control_point(), flow).dot(panel.flow_normal())
}

/// Whether `relax` can update `panel`: its self normal influence must be
/// finite and nonzero
pub fn is_relaxable(panel: &VortexPanel, flow: Compressibility) -> bool {
    usable_influence(self_normal_influence(panel, flow))
}

fn usable_influence(a: f64) -> bool {
    a != 0.0 && a.is_finite()
}

/// Relax `panel`'s strength given the accumulated velocity at its control
/// point.
///
/// `velocity` must include the panel's own contribution. The target is the
/// strength for which the normal velocity vanishes,
/// `strength - normal_vel * 4π / normal_influence`, and the panel moves
/// `damping` of the way there.
pub fn relax(panel: &mut VortexPanel, velocity: &NVec3, flow: Compressibility, damping: f64) -> RelaxOutcome {
    let normal_vel = velocity.dot(panel.flow_normal());
    let normal_influence = self_normal_influence(panel, flow);

    if !usable_influence(normal_influence) {
        return RelaxOutcome::Skipped { residual: normal_vel };
    }

    let target = panel.strength() - normal_vel * FOUR_PI / normal_influence;
    let change = damping * (target - panel.strength());
    panel.apply_strength_change(change);

    RelaxOutcome::Updated { change, residual: normal_vel, target }
}

/// Summary of one relaxation step over the whole lattice
#[derive(Debug, Clone)]
pub struct StepReport {
    pub iteration: usize, // lattice iteration count after the step
    pub max_residual: f64, // largest |normal velocity| seen before relaxing
    pub max_change: f64, // largest |strength change|
    pub skipped: usize, // panels with degenerate self-influence
    pub velocities: Vec<NVec3>, // accumulator used by this step
}

impl StepReport {
    fn from_outcomes(iteration: usize, outcomes: &[RelaxOutcome], velocities: Vec<NVec3>) -> Self {
        let mut report = Self {
            iteration,
            max_residual: 0.0,
            max_change: 0.0,
            skipped: 0,
            velocities,
        };
        for o in outcomes {
            report.max_residual = report.max_residual.max(o.residual().abs());
            report.max_change = report.max_change.max(o.change().abs());
            if let RelaxOutcome::Skipped { .. } = o {
                report.skipped += 1;
            }
        }
        report
    }
}

/// Run one reset -> accumulate -> relax cycle, one panel at a time
pub fn relaxation_step(lattice: &mut Lattice, velocities: &VelocitySet, params: &Parameters) -> StepReport {
    let n = lattice.len();

    // fresh accumulator, one entry per panel, zeroed by the velocity set
    let mut acc = vec![NVec3::zeros(); n];
    velocities.accumulate_velocities(&*lattice, &mut acc);

    let flow = params.compressibility;
    let outcomes: Vec<RelaxOutcome> = lattice
        .panels
        .iter_mut()
        .zip(acc.iter())
        .map(|(p, v)| relax(p, v, flow, params.damping))
        .collect();

    lattice.iteration += 1;
    StepReport::from_outcomes(lattice.iteration, &outcomes, acc)
}

/// Same cycle as [`relaxation_step`] with the relax phase spread over rayon.
///
/// Each panel only reads its own accumulator entry, so the relax phase needs
/// no synchronisation beyond the barrier after accumulation.
pub fn relaxation_step_parallel(lattice: &mut Lattice, velocities: &VelocitySet, params: &Parameters) -> StepReport {
    let n = lattice.len();

    let mut acc = vec![NVec3::zeros(); n];
    velocities.accumulate_velocities(&*lattice, &mut acc);

    let flow = params.compressibility;
    let damping = params.damping;
    let outcomes: Vec<RelaxOutcome> = lattice
        .panels
        .par_iter_mut()
        .zip(acc.par_iter())
        .map(|(p, v)| relax(p, v, flow, damping))
        .collect();

    lattice.iteration += 1;
    StepReport::from_outcomes(lattice.iteration, &outcomes, acc)
}
