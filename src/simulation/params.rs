//! Numerical and physical parameters for the relaxation
//!
//! `Parameters` holds runtime settings:
//! - damping fraction and fixed iteration count,
//! - divergence guard on panel strength,
//! - onset (freestream) speed and compressibility,
//! - logging interval

use super::flow::Compressibility;

#[derive(Debug, Clone)]
pub struct Parameters {
    pub damping: f64, // fraction of the gap to the target strength closed per step
    pub iterations: usize, // relaxation steps to run
    pub divergence_limit: f64, // |strength| above this aborts the run
    pub onset_speed: f64, // freestream speed along the flow x axis
    pub print_interval: usize, // log every n steps, 0 = silent
    pub compressibility: Compressibility, // beta and Mach regime
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            damping: 0.1,
            iterations: 200,
            divergence_limit: 1.0e6,
            onset_speed: 1.0,
            print_interval: 0,
            compressibility: Compressibility::incompressible(),
        }
    }
}
