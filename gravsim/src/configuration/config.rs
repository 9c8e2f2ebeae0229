//! Configuration types for loading simulation scenarios from YAML.
//!
//! A scenario consists of:
//!
//! - [`UniverseConfig`] – physical constants (all optional, defaults from [`Universe`])
//! - [`ForceConfig`]    – named external forces, shared by every body that lists them
//! - [`BodyConfig`]     – initial state for each body
//! - [`ScenarioConfig`] – top-level wrapper, plus the number of steps to run
//!
//! # YAML format
//!
//! ```yaml
//! universe:
//!   gravity_constant: 0.667259  # omit for 6.67259e-11
//!   time_step: 0.01
//!   gravity_law: "mutual_force" # or "newtonian"
//!
//! steps: 100
//!
//! forces:
//!   - name: thrust
//!     direction: [1.0, 2.0, 3.0]  # normalized on load
//!     magnitude: 4.0
//!
//! bodies:
//!   - name: rocket
//!     m: 0.0
//!     x: [0.0, 0.0, 0.0]
//!     forces: [thrust]
//!   - name: planet
//!     m: 10000.0
//!     x: [1000.0, 0.0, 10.0]
//!     v: [0.0, 0.0, 0.0]          # optional, defaults to rest
//! ```
//!
//! [`Universe`]: crate::simulation::params::Universe

use std::io::Read;

use serde::Deserialize;

use crate::simulation::params::GravityLaw;

/// Physical constants; anything left out keeps its default
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct UniverseConfig {
    pub gravity_constant: Option<f32>,
    pub time_step: Option<f32>,
    pub gravity_law: Option<GravityLaw>,
}

/// A named constant force
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct ForceConfig {
    pub name: String,
    pub direction: [f32; 3], // need not be unit length
    pub magnitude: f32,
}

/// Initial state of a single body
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct BodyConfig {
    #[serde(default)]
    pub name: Option<String>,
    pub m: f32,              // mass
    pub x: [f32; 3],         // position
    #[serde(default)]
    pub v: Option<[f32; 3]>, // velocity, at rest if absent
    #[serde(default)]
    pub forces: Vec<String>, // names from `ScenarioConfig::forces`
}

fn default_steps() -> usize {
    1
}

/// Top-level scenario configuration loaded from YAML
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub universe: UniverseConfig,
    #[serde(default = "default_steps")]
    pub steps: usize,
    #[serde(default)]
    pub forces: Vec<ForceConfig>,
    pub bodies: Vec<BodyConfig>,
}

impl ScenarioConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(s)
    }

    pub fn from_yaml_reader<R: Read>(reader: R) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_reader(reader)
    }
}
