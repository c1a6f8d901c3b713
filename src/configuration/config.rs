//! Configuration types for loading lattice scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! relaxation scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – global engine options (parallel accumulation)
//! - [`ParametersConfig`] – flow condition and relaxation parameters
//! - [`PanelConfig`]      – size and design-frame pose of each panel
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! An example scenario YAML matching these types:
//!
//! ```yaml
//! engine:
//!   parallel: true          # partition accumulation by target panel
//!
//! parameters:
//!   mach: 0.3               # freestream Mach number
//!   alpha_deg: 4.0          # angle of attack
//!   sideslip_deg: 0.0       # optional, default 0
//!   damping: 0.1            # optional, default 0.1
//!   iterations: 400         # fixed number of relaxation steps
//!   divergence_limit: 1.0e6 # optional, default 1e6
//!   onset_speed: 1.0        # optional, default 1
//!   print_interval: 50      # optional, default 0 (silent)
//!
//! panels:
//!   - width: 1.0            # spanwise extent
//!     height: 1.0           # chordwise extent
//!     position: [ 0.0, -0.5, 0.0 ]
//!     normal: [ 0.0, 0.0, 1.0 ]
//! ```
//!
//! [`ScenarioConfig::validate`] checks shapes and ranges before the scenario
//! is mapped into its runtime representation.

use serde::Deserialize;

use crate::error::ConfigError;

/// High-level engine configuration
#[derive(Deserialize, Debug, Clone, Default)]
pub struct EngineConfig {
    #[serde(default)]
    pub parallel: bool, // `true` - rayon accumulation/relaxation, `false` - single thread
}

/// Flow condition and relaxation parameters for a scenario
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub mach: f64, // freestream Mach number
    pub alpha_deg: f64, // angle of attack, degrees
    #[serde(default)]
    pub sideslip_deg: f64, // sideslip, degrees
    #[serde(default = "default_damping")]
    pub damping: f64, // fraction of the strength gap closed per step
    pub iterations: usize, // relaxation steps
    #[serde(default = "default_divergence_limit")]
    pub divergence_limit: f64, // abort when |strength| exceeds this
    #[serde(default = "default_onset_speed")]
    pub onset_speed: f64, // freestream speed
    #[serde(default)]
    pub print_interval: usize, // log every n steps
}

fn default_damping() -> f64 {
    0.1
}

fn default_divergence_limit() -> f64 {
    1.0e6
}

fn default_onset_speed() -> f64 {
    1.0
}

/// Configuration for a single panel
#[derive(Deserialize, Debug, Clone)]
pub struct PanelConfig {
    pub width: f64, // full spanwise width
    pub height: f64, // full chordwise height
    pub position: Vec<f64>, // design frame position
    pub normal: Vec<f64>, // design frame surface normal
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub engine: EngineConfig, // Engine-level configuration
    pub parameters: ParametersConfig, // Flow condition and numerical parameters
    pub panels: Vec<PanelConfig>, // Panels making up the lattice
}

fn check_finite(field: impl Into<String>, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { field: field.into(), value })
    }
}

fn check_vec3(panel: usize, field: &'static str, v: &[f64]) -> Result<[f64; 3], ConfigError> {
    match v {
        [x, y, z] => {
            for c in [x, y, z] {
                check_finite(format!("panels[{panel}].{field}"), *c)?;
            }
            Ok([*x, *y, *z])
        }
        _ => Err(ConfigError::VectorLength { panel, field, len: v.len() }),
    }
}

impl PanelConfig {
    /// Validated `(position, normal)` of panel number `index`
    pub fn vectors(&self, index: usize) -> Result<([f64; 3], [f64; 3]), ConfigError> {
        let position = check_vec3(index, "position", &self.position)?;
        let normal = check_vec3(index, "normal", &self.normal)?;
        Ok((position, normal))
    }

    fn validate(&self, index: usize) -> Result<(), ConfigError> {
        for (field, value) in [("width", self.width), ("height", self.height)] {
            check_finite(format!("panels[{index}].{field}"), value)?;
            if value < 0.0 {
                return Err(ConfigError::NegativeExtent { panel: index, field, value });
            }
        }
        self.vectors(index).map(|_| ())
    }
}

impl ParametersConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        check_finite("mach", self.mach)?;
        check_finite("alpha_deg", self.alpha_deg)?;
        check_finite("sideslip_deg", self.sideslip_deg)?;
        check_finite("onset_speed", self.onset_speed)?;
        if self.mach < 0.0 {
            return Err(ConfigError::InvalidMach(self.mach));
        }
        if !(self.damping > 0.0 && self.damping <= 1.0) {
            return Err(ConfigError::InvalidDamping(self.damping));
        }
        if !(self.divergence_limit > 0.0) {
            return Err(ConfigError::InvalidDivergenceLimit(self.divergence_limit));
        }
        if self.iterations == 0 {
            return Err(ConfigError::NoIterations);
        }
        Ok(())
    }
}

impl ScenarioConfig {
    /// Parse a scenario from YAML text
    pub fn from_yaml_str(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }

    /// Check every field before the scenario is built
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.parameters.validate()?;
        if self.panels.is_empty() {
            return Err(ConfigError::NoPanels);
        }
        for (i, p) in self.panels.iter().enumerate() {
            p.validate(i)?;
        }
        Ok(())
    }
}
