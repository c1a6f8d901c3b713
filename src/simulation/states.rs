//! Core state types for the vortex lattice.
//!
//! Defines the horseshoe-vortex panel and the panel arena:
//! - `VortexPanel` holds design-frame pose, flow-frame geometry and strength
//! - `Lattice` holds the panels (addressed by index) and the iteration count
//!
//! The induced velocity accumulator is not part of the panel state. The driver
//! owns it as a `Vec<NVec3>` indexed like `Lattice::panels`.

use nalgebra::{Matrix3, Vector3};
pub type NVec3 = Vector3<f64>;

/// Freestream axis of the flow-aligned frame
pub fn flow_axis() -> NVec3 {
    NVec3::x()
}

#[derive(Debug, Clone)]
pub struct VortexPanel {
    half_width: f64, // half the spanwise extent of the bound vortex
    quarter_height: f64, // quarter chord, bound vortex to control point offset
    local_position: NVec3, // design frame position
    local_normal: NVec3, // design frame surface normal
    flow_position: NVec3, // flow frame position
    flow_normal: NVec3, // flow frame surface normal
    flow_perp: NVec3, // flow frame spanwise direction, x cross normal
    strength: f64, // circulation
}

impl VortexPanel {
    /// Build a panel from its full spanwise width and chordwise height.
    ///
    /// The flow-frame geometry starts as the identity transform of the
    /// design-frame pose, and the strength starts at zero.
    pub fn new(width: f64, height: f64, local_position: NVec3, local_normal: NVec3) -> Self {
        let mut panel = Self {
            half_width: width * 0.5,
            quarter_height: height * 0.25,
            local_position,
            local_normal,
            flow_position: NVec3::zeros(),
            flow_normal: NVec3::zeros(),
            flow_perp: NVec3::zeros(),
            strength: 0.0,
        };
        panel.transform(&Matrix3::identity());
        panel
    }

    /// Re-express the panel in the flow-aligned frame (x along the freestream).
    ///
    /// `m` maps design-frame vectors into the flow frame. The spanwise
    /// direction is derived as `x × normal`; a normal parallel to the
    /// freestream gives a zero spanwise vector, which the kernel treats as a
    /// panel with no influence.
    pub fn transform(&mut self, m: &Matrix3<f64>) {
        self.flow_position = m * self.local_position;
        self.flow_normal = m * self.local_normal;
        self.flow_perp = flow_axis().cross(&self.flow_normal);
    }

    /// Point at which this panel's flow tangency condition is enforced
    pub fn control_point(&self) -> NVec3 {
        self.flow_position - flow_axis() * self.quarter_height
    }

    pub fn half_width(&self) -> f64 {
        self.half_width
    }

    pub fn quarter_height(&self) -> f64 {
        self.quarter_height
    }

    pub fn local_position(&self) -> &NVec3 {
        &self.local_position
    }

    pub fn local_normal(&self) -> &NVec3 {
        &self.local_normal
    }

    pub fn flow_position(&self) -> &NVec3 {
        &self.flow_position
    }

    pub fn flow_normal(&self) -> &NVec3 {
        &self.flow_normal
    }

    pub fn flow_perp(&self) -> &NVec3 {
        &self.flow_perp
    }

    pub fn strength(&self) -> f64 {
        self.strength
    }

    /// Seed the circulation, e.g. from a previous solve
    pub fn set_strength(&mut self, strength: f64) {
        self.strength = strength;
    }

    pub(crate) fn apply_strength_change(&mut self, change: f64) {
        self.strength += change;
    }
}

#[derive(Debug, Clone, Default)]
pub struct Lattice {
    pub panels: Vec<VortexPanel>, // panel arena, addressed by index
    pub iteration: usize, // completed relaxation steps
}

impl Lattice {
    pub fn new(panels: Vec<VortexPanel>) -> Self {
        Self {
            panels,
            iteration: 0,
        }
    }

    /// Apply the design-to-flow transform to every panel
    pub fn transform(&mut self, m: &Matrix3<f64>) {
        for p in self.panels.iter_mut() {
            p.transform(m);
        }
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    pub fn strengths(&self) -> Vec<f64> {
        self.panels.iter().map(|p| p.strength()).collect()
    }
}
