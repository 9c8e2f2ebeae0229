//! Physical constants for a simulation
//!
//! `Universe` holds the values every velocity/position update reads:
//! - gravitational constant `gravity_constant`,
//! - fixed step size `time_step`,
//! - which gravity law turns a pair of bodies into acceleration
//!
//! It is a plain value passed into each step, so two simulations in the same
//! process never share or overwrite each other's constants

use serde::Deserialize;

/// Universal gravitational constant (m^3 kg^-1 s^-2)
pub const GRAVITY_CONSTANT: f32 = 6.67259e-11;

/// Gravitational constant scaled by 10^10 for toy scenarios where SI masses
/// would barely move anything
pub const SCALED_GRAVITY_CONSTANT: f32 = 0.667259;

/// Default step size
pub const TIME_STEP: f32 = 0.01;

/// How a neighbouring body's mass becomes a contribution to acceleration
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GravityLaw {
    /// `G * m_other * m_self / d^2`. Scales with both masses, so a massless
    /// body feels no gravity at all
    #[default]
    #[serde(rename = "mutual_force")]
    MutualForce,

    /// `G * m_other / d^2`, the textbook acceleration
    #[serde(rename = "newtonian")]
    Newtonian,
}

impl GravityLaw {
    /// Scalar applied to the unit vector pointing from `self_mass` toward `other_mass`
    pub fn coefficient(self, g: f32, self_mass: f32, other_mass: f32, d2: f32) -> f32 {
        match self {
            GravityLaw::MutualForce => g * other_mass * self_mass / d2,
            GravityLaw::Newtonian => g * other_mass / d2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Universe {
    pub gravity_constant: f32, // G
    pub time_step: f32,        // dt used by `euler_step`
    pub gravity_law: GravityLaw,
}

impl Default for Universe {
    fn default() -> Self {
        Self {
            gravity_constant: GRAVITY_CONSTANT,
            time_step: TIME_STEP,
            gravity_law: GravityLaw::default(),
        }
    }
}

impl Universe {
    /// Defaults with the scaled gravitational constant
    pub fn scaled() -> Self {
        Self {
            gravity_constant: SCALED_GRAVITY_CONSTANT,
            ..Self::default()
        }
    }

    pub fn with_gravity_constant(mut self, g: f32) -> Self {
        self.gravity_constant = g;
        self
    }

    pub fn with_time_step(mut self, dt: f32) -> Self {
        self.time_step = dt;
        self
    }

    pub fn with_gravity_law(mut self, law: GravityLaw) -> Self {
        self.gravity_law = law;
        self
    }
}
