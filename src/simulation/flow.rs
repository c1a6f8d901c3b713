//! Flow condition: Mach number and flow angles
//!
//! Turns the freestream state into the two things the panel kernel needs:
//! - a [`Compressibility`] (`beta = sqrt(|1 - M^2|)` plus the Mach regime)
//! - a rotation that maps design-frame vectors into the flow-aligned frame,
//!   whose x axis points downstream along the freestream

use nalgebra::{Matrix3, Rotation3};

use crate::simulation::states::{flow_axis, NVec3};

/// Which squared-magnitude form the kernel uses for its Mach cone test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MachRegime {
    /// Euclidean radius; the cone test only rejects the corner itself
    Subsonic,
    /// Signed pseudo-norm `x^2 - (y^2 + z^2)`; nonpositive means outside the cone
    Supersonic,
}

/// Prandtl-Glauert axis scaling used by the influence kernel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Compressibility {
    pub beta: f64, // cross-flow axis scale factor
    pub regime: MachRegime,
}

impl Compressibility {
    pub fn subsonic(beta: f64) -> Self {
        Self { beta, regime: MachRegime::Subsonic }
    }

    pub fn supersonic(beta: f64) -> Self {
        Self { beta, regime: MachRegime::Supersonic }
    }

    /// Incompressible flow, `beta = 1`
    pub fn incompressible() -> Self {
        Self::subsonic(1.0)
    }

    /// `beta = sqrt(|1 - M^2|)`; M = 1 gives `beta = 0`, which collapses the
    /// cross-flow axes and makes every influence vanish.
    pub fn from_mach(mach: f64) -> Self {
        let beta = (1.0 - mach * mach).abs().sqrt();
        if mach > 1.0 {
            Self::supersonic(beta)
        } else {
            Self::subsonic(beta)
        }
    }
}

/// Freestream state seen by the lifting surface
#[derive(Debug, Clone, Copy)]
pub struct FlowCondition {
    pub mach: f64, // freestream Mach number
    pub alpha: f64, // angle of attack, radians
    pub sideslip: f64, // sideslip angle, radians
}

impl FlowCondition {
    pub fn new(mach: f64, alpha: f64, sideslip: f64) -> Self {
        Self { mach, alpha, sideslip }
    }

    pub fn compressibility(&self) -> Compressibility {
        Compressibility::from_mach(self.mach)
    }

    /// Unit freestream direction expressed in the design frame
    ///
    /// Design frame convention: x chordwise toward the trailing edge, y
    /// spanwise, z up. Positive alpha tilts the freestream toward +z,
    /// positive sideslip toward +y.
    pub fn freestream_direction(&self) -> NVec3 {
        let (sa, ca) = self.alpha.sin_cos();
        let (sb, cb) = self.sideslip.sin_cos();
        NVec3::new(ca * cb, sb, sa * cb)
    }

    /// Rotation taking design-frame vectors into the flow-aligned frame
    pub fn design_to_flow(&self) -> Matrix3<f64> {
        let d = self.freestream_direction();
        match Rotation3::rotation_between(&d, &flow_axis()) {
            Some(rot) => rot.into_inner(),
            // freestream antiparallel to the design x axis
            None => Rotation3::from_axis_angle(&NVec3::z_axis(), std::f64::consts::PI).into_inner(),
        }
    }
}
