//! Acceleration contributors for a body
//!
//! Two sources feed a body's acceleration sum:
//! - pairwise gravity from every other body ([`gravity_pull`])
//! - constant external forces attached to the body ([`Force`])

use std::sync::Arc;

use tracing::trace;

use crate::error::{SimError, SimResult};
use crate::simulation::params::Universe;
use crate::simulation::states::{Body, NVec3};

/// A force handle that can be attached to any number of bodies
pub type SharedForce = Arc<Force>;

/// Constant, non-gravitational influence on a body
///
/// The direction is normalized once at construction and the force cannot be
/// changed afterwards. A negative magnitude pushes against `direction`
#[derive(Debug, Clone, PartialEq)]
pub struct Force {
    direction: NVec3,
    magnitude: f32,
}

impl Force {
    /// Build a force from any non-zero direction; the caller need not normalize it
    pub fn new(direction: NVec3, magnitude: f32) -> SimResult<Self> {
        let direction = normalize(direction, "force direction")?;
        Ok(Self {
            direction,
            magnitude,
        })
    }

    /// Same as [`Force::new`], wrapped for sharing between bodies
    pub fn shared(direction: NVec3, magnitude: f32) -> SimResult<SharedForce> {
        Self::new(direction, magnitude).map(Arc::new)
    }

    /// Unit-length direction
    pub fn direction(&self) -> NVec3 {
        self.direction
    }

    pub fn magnitude(&self) -> f32 {
        self.magnitude
    }

    /// Contribution to the acceleration sum: `direction * magnitude`
    pub fn vector(&self) -> NVec3 {
        self.direction * self.magnitude
    }
}

/// Normalize `v`, refusing zero-length and non-finite input
pub(crate) fn normalize(v: NVec3, what: &'static str) -> SimResult<NVec3> {
    if !is_finite(&v) {
        return Err(SimError::DegenerateVector { what });
    }
    v.try_normalize(0.0)
        .ok_or(SimError::DegenerateVector { what })
}

/// Why a single pair could not contribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PairFault {
    Coincident,
    NonFinite,
}

impl PairFault {
    pub(crate) fn into_error(self, a: String, b: String) -> SimError {
        match self {
            PairFault::Coincident => SimError::CoincidentBodies { a, b },
            PairFault::NonFinite => SimError::NonFiniteAcceleration { a, b },
        }
    }
}

pub(crate) fn is_finite(v: &NVec3) -> bool {
    v.iter().all(|c| c.is_finite())
}

/// Pair contribution without labels; callers decide how to name the bodies
pub(crate) fn pair_pull(body: &Body, other: &Body, universe: &Universe) -> Result<NVec3, PairFault> {
    // r points from body toward other
    let r = other.position() - body.position();
    let d2 = r.norm_squared();

    let unit = normalize(r, "separation").map_err(|_| PairFault::Coincident)?;

    let coef = universe
        .gravity_law
        .coefficient(universe.gravity_constant, body.mass(), other.mass(), d2);
    trace!(d2, coef, "gravity pair");

    // a subnormal d2 or an overflowing mass product makes coef infinite
    let pull = unit * coef;
    if !coef.is_finite() || !is_finite(&pull) {
        return Err(PairFault::NonFinite);
    }
    Ok(pull)
}

/// Gravitational contribution of `other` on `body`
///
/// Points from `body` toward `other` and is scaled according to
/// `universe.gravity_law`. Bodies sharing a position have no defined
/// direction and yield [`SimError::CoincidentBodies`]; a contribution too
/// large for `f32` yields [`SimError::NonFiniteAcceleration`]
pub fn gravity_pull(body: &Body, other: &Body, universe: &Universe) -> SimResult<NVec3> {
    pair_pull(body, other, universe).map_err(|fault| fault.into_error(body.label(), other.label()))
}
