//! Induced velocity contributors for the vortex lattice
//!
//! Defines the closed-form horseshoe vortex kernel, the pairwise accumulation
//! of one panel's induced velocity into another panel's accumulator, and the
//! [`InducedVelocity`] terms that fill a whole accumulator buffer (direct,
//! rayon-partitioned, and the onset freestream)

use rayon::prelude::*;

use crate::simulation::flow::{Compressibility, MachRegime};
use crate::simulation::states::{flow_axis, Lattice, NVec3, VortexPanel};

pub const FOUR_PI: f64 = 4.0 * std::f64::consts::PI;

/// Biot-Savart normalisation applied to unit influences
pub const INV_FOUR_PI: f64 = 1.0 / FOUR_PI;

/// The three pieces of a unit-strength horseshoe influence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorseshoeTerms {
    pub bound: NVec3, // finite bound segment between the corners
    pub trailing_1: NVec3, // semi-infinite leg from the first corner
    pub trailing_2: NVec3, // semi-infinite leg from the second corner
}

impl HorseshoeTerms {
    pub fn zero() -> Self {
        Self {
            bound: NVec3::zeros(),
            trailing_1: NVec3::zeros(),
            trailing_2: NVec3::zeros(),
        }
    }

    pub fn total(&self) -> NVec3 {
        self.bound + self.trailing_1 + self.trailing_2
    }
}

/// Radius vector from one horseshoe corner to the evaluation point, in the
/// scaled frame, together with its cone magnitude when the point is inside
/// that corner's zone of influence
struct Corner {
    r: NVec3,
    mag: Option<f64>,
}

impl Corner {
    fn new(r: NVec3, regime: MachRegime) -> Self {
        Self {
            mag: cone_magnitude(&r, regime),
            r,
        }
    }
}

/// Stretch the cross-flow (y, z) axes by `beta`; x is the freestream axis
fn scale_cross_flow(v: NVec3, beta: f64) -> NVec3 {
    NVec3::new(v.x, v.y * beta, v.z * beta)
}

/// Magnitude used by the leg and bound factors, `None` outside the cone.
///
/// Subsonic uses the Euclidean norm, so only the corner itself is rejected.
/// Supersonic uses `x^2 - (y^2 + z^2)`, which must be positive.
fn cone_magnitude(r: &NVec3, regime: MachRegime) -> Option<f64> {
    let sq = match regime {
        MachRegime::Subsonic => r.norm_squared(),
        MachRegime::Supersonic => r.x * r.x - (r.y * r.y + r.z * r.z),
    };
    if sq > 0.0 {
        Some(sq.sqrt())
    } else {
        None
    }
}

/// Semi-infinite trailing leg; `sign` is +1 for the first corner, -1 for the second
fn trailing_leg(corner: &Corner, sign: f64) -> NVec3 {
    let Some(mag) = corner.mag else {
        return NVec3::zeros();
    };
    let r = &corner.r;
    let t = NVec3::new(0.0, r.z, -r.y) * sign;
    let t_sq = t.norm_squared();
    // point on the leg axis
    if t_sq <= 0.0 {
        return NVec3::zeros();
    }
    t / t_sq * (1.0 + r.x / mag)
}

/// Bound segment ("top of the horseshoe")
fn bound_segment(r0: &NVec3, c1: &Corner, c2: &Corner) -> NVec3 {
    let c = c1.r.cross(&c2.r);
    let c_sq = c.norm_squared();
    // point colinear with the bound vortex
    if c_sq <= 0.0 {
        return NVec3::zeros();
    }
    let along = c1.mag.map_or(0.0, |m| r0.dot(&c1.r) / m) + c2.mag.map_or(0.0, |m| r0.dot(&c2.r) / m);
    c / c_sq * along
}

/// Unit-strength horseshoe influence of `panel` at `point`, term by term.
///
/// The panel must already be in the flow frame. No normalisation by 4π is
/// applied here. Degenerate geometry (coincident corners, point on a leg or
/// on the bound vortex line) gives zero for the affected term, never a
/// non-finite value.
pub fn horseshoe_terms(panel: &VortexPanel, point: &NVec3, flow: Compressibility) -> HorseshoeTerms {
    // corners of the horseshoe, bound vortex offset forward by a quarter chord
    let centre = *panel.flow_position() + flow_axis() * panel.quarter_height();
    let span = *panel.flow_perp() * panel.half_width();
    let corner_1 = centre - span;
    let corner_2 = centre + span;

    let r0 = scale_cross_flow(corner_2 - corner_1, flow.beta);
    let c1 = Corner::new(scale_cross_flow(point - corner_1, flow.beta), flow.regime);
    let c2 = Corner::new(scale_cross_flow(point - corner_2, flow.beta), flow.regime);

    // outside both cones: no influence at all
    if c1.mag.is_none() && c2.mag.is_none() {
        return HorseshoeTerms::zero();
    }

    HorseshoeTerms {
        bound: bound_segment(&r0, &c1, &c2),
        trailing_1: trailing_leg(&c1, 1.0),
        trailing_2: trailing_leg(&c2, -1.0),
    }
}

/// Unit-strength horseshoe influence of `panel` at `point`
pub fn horseshoe_influence(panel: &VortexPanel, point: &NVec3, flow: Compressibility) -> NVec3 {
    horseshoe_terms(panel, point, flow).total()
}

/// Velocity induced at `point` by `source` at its current strength
pub fn induced_velocity(source: &VortexPanel, point: &NVec3, flow: Compressibility) -> NVec3 {
    horseshoe_influence(source, point, flow) * (source.strength() * INV_FOUR_PI)
}

/// Add the velocity induced by `source` at `point` into `out`
pub fn accumulate_pair(source: &VortexPanel, point: &NVec3, flow: Compressibility, out: &mut NVec3) {
    *out += induced_velocity(source, point, flow);
}

/// Add the velocity induced by `source` at `target`'s control point into
/// `out`, the target's accumulator entry
pub fn accumulate(source: &VortexPanel, target: &VortexPanel, flow: Compressibility, out: &mut NVec3) {
    accumulate_pair(source, &target.control_point(), flow, out);
}

/// Collection of induced velocity terms (horseshoe sum, onset flow, ...)
/// Each term implements [`InducedVelocity`] and their contributions are
/// summed into one accumulator entry per panel
pub struct VelocitySet {
    terms: Vec<Box<dyn InducedVelocity + Send + Sync>>,
}

impl VelocitySet {
    /// Create an empty velocity set
    pub fn new() -> Self {
        Self {
            terms: Vec::new(),
        }
    }

    /// Add a velocity term
    pub fn with(mut self, term: impl InducedVelocity + Send + Sync + 'static) -> Self {
        self.terms.push(Box::new(term));
        self
    }

    /// Compute the velocity at every control point of `lattice`
    /// - `out[i]` is zeroed, then set to the sum of contributions from all terms
    pub fn accumulate_velocities(&self, lattice: &Lattice, out: &mut [NVec3]) {
        // Zero buffer
        for v in out.iter_mut() {
            *v = NVec3::zeros();
        }
        for term in &self.terms {
            term.velocity(lattice, out);
        }
    }
}

impl Default for VelocitySet {
    fn default() -> Self {
        Self::new()
    }
}

/// Velocity source operating on a [`Lattice`]
/// Implementations add their contribution into `out[i]` for each panel `i`
pub trait InducedVelocity {
    fn velocity(&self, lattice: &Lattice, out: &mut [NVec3]);
}

/// Direct all-ordered-pairs horseshoe sum, self pairs included
pub struct HorseshoeInduction {
    pub flow: Compressibility,
}

impl InducedVelocity for HorseshoeInduction {
    fn velocity(&self, lattice: &Lattice, out: &mut [NVec3]) {
        for (target, v) in lattice.panels.iter().zip(out.iter_mut()) {
            let cp = target.control_point();
            for source in &lattice.panels {
                accumulate_pair(source, &cp, self.flow, v);
            }
        }
    }
}

/// Same sum as [`HorseshoeInduction`], partitioned by target panel.
///
/// Each accumulator entry is owned by exactly one rayon task; sources are
/// only read. Per-target summation order matches the direct term, so both
/// produce identical buffers.
pub struct ParallelHorseshoeInduction {
    pub flow: Compressibility,
}

impl InducedVelocity for ParallelHorseshoeInduction {
    fn velocity(&self, lattice: &Lattice, out: &mut [NVec3]) {
        let panels = &lattice.panels;
        out.par_iter_mut()
            .zip(panels.par_iter())
            .for_each(|(v, target)| {
                let cp = target.control_point();
                for source in panels {
                    accumulate_pair(source, &cp, self.flow, v);
                }
            });
    }
}

/// Freestream velocity in the flow frame, `speed` along +x
pub struct OnsetFlow {
    pub speed: f64,
}

impl InducedVelocity for OnsetFlow {
    fn velocity(&self, _lattice: &Lattice, out: &mut [NVec3]) {
        let onset = flow_axis() * self.speed;
        for v in out.iter_mut() {
            *v += onset;
        }
    }
}
