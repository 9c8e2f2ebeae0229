//! Core state types for the simulation.
//!
//! - `Body`   a point mass with position, velocity and attached forces
//! - `System` the collection of bodies plus elapsed time `t`
//! - `BodyId` stable handle into `System::bodies`

use nalgebra::Vector3;

use crate::error::{SimError, SimResult};
use crate::simulation::forces::{is_finite, pair_pull, SharedForce};
use crate::simulation::params::Universe;

pub type NVec3 = Vector3<f32>;

/// A simulated point mass
///
/// Mass is not validated: zero mass is allowed (such a body pulls nothing and,
/// under [`GravityLaw::MutualForce`](crate::simulation::params::GravityLaw),
/// feels no gravity either), and negative mass inverts its pull on others.
#[derive(Debug, Clone, Default)]
pub struct Body {
    name: Option<String>,
    mass: f32,
    position: NVec3, // center of mass
    velocity: NVec3,
    forces: Vec<SharedForce>,
}

impl Body {
    /// Massless body resting at the origin
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at_rest(mass: f32, position: NVec3) -> Self {
        Self::with_velocity(mass, position, NVec3::zeros())
    }

    pub fn with_velocity(mass: f32, position: NVec3, velocity: NVec3) -> Self {
        Self {
            name: None,
            mass,
            position,
            velocity,
            forces: Vec::new(),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Name if set, otherwise the current position
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!(
                "({}, {}, {})",
                self.position.x, self.position.y, self.position.z
            ),
        }
    }

    /// Name if set, otherwise `#index` when the body sits in a slice
    pub fn label_at(&self, index: Option<usize>) -> String {
        match (&self.name, index) {
            (Some(name), _) => name.clone(),
            (None, Some(i)) => format!("#{i}"),
            (None, None) => self.label(),
        }
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn position(&self) -> NVec3 {
        self.position
    }

    pub fn velocity(&self) -> NVec3 {
        self.velocity
    }

    /// Read-only view of the attached forces
    pub fn forces(&self) -> &[SharedForce] {
        &self.forces
    }

    pub fn set_mass(&mut self, mass: f32) {
        self.mass = mass;
    }

    pub fn set_position(&mut self, position: NVec3) {
        self.position = position;
    }

    pub fn set_velocity(&mut self, velocity: NVec3) {
        self.velocity = velocity;
    }

    /// Replace every attached force
    pub fn set_forces(&mut self, forces: Vec<SharedForce>) {
        self.forces = forces;
    }

    pub fn add_force(&mut self, force: SharedForce) {
        self.forces.push(force);
    }

    /// Detach the force at `index`, if there is one
    pub fn remove_force(&mut self, index: usize) -> Option<SharedForce> {
        (index < self.forces.len()).then(|| self.forces.remove(index))
    }

    pub fn clear_forces(&mut self) {
        self.forces.clear();
    }

    pub fn squared_distance(&self, other: &Body) -> f32 {
        (other.position - self.position).norm_squared()
    }

    pub fn euclidean_distance(&self, other: &Body) -> f32 {
        self.squared_distance(other).sqrt()
    }

    pub fn manhattan_distance(&self, other: &Body) -> f32 {
        (self.position - other.position).abs().sum()
    }

    /// Net acceleration on this body: gravity from every other body in
    /// `bodies` plus all attached forces
    ///
    /// `bodies` may contain `self`; it is skipped by identity, so a distinct
    /// body with identical mass and position still counts.
    ///
    /// Errors name unnamed bodies by their index in `bodies`. A result that
    /// does not fit in `f32` is an error, never a NaN/inf vector.
    pub fn acceleration(&self, bodies: &[Body], universe: &Universe) -> SimResult<NVec3> {
        let self_index = bodies.iter().position(|b| std::ptr::eq(self, b));
        let mut acc = NVec3::zeros();

        for (j, other) in bodies.iter().enumerate() {
            if Some(j) == self_index {
                continue;
            }
            acc += pair_pull(self, other, universe)
                .map_err(|fault| fault.into_error(self.label_at(self_index), other.label_at(Some(j))))?;
        }

        for force in &self.forces {
            acc += force.vector();
        }

        if !is_finite(&acc) {
            return Err(SimError::NonFiniteTotal(self.label_at(self_index)));
        }
        Ok(acc)
    }

    /// `acceleration * time`, the amount `update_velocity` would add
    pub fn velocity_delta(&self, bodies: &[Body], time: f32, universe: &Universe) -> SimResult<NVec3> {
        let dv = self.acceleration(bodies, universe)? * time;
        if !is_finite(&dv) {
            let self_index = bodies.iter().position(|b| std::ptr::eq(self, b));
            return Err(SimError::NonFiniteTotal(self.label_at(self_index)));
        }
        Ok(dv)
    }

    /// Advance velocity by one Euler step
    ///
    /// Precondition: every body's velocity for this step is computed against
    /// positions from the same prior step, i.e. no `update_position` call may
    /// happen between the velocity updates of a step. Leaves velocity
    /// untouched on error.
    pub fn update_velocity(&mut self, bodies: &[Body], time: f32, universe: &Universe) -> SimResult<()> {
        let dv = self.velocity_delta(bodies, time, universe)?;
        self.apply_velocity_delta(dv);
        Ok(())
    }

    pub(crate) fn apply_velocity_delta(&mut self, dv: NVec3) {
        self.velocity += dv;
    }

    /// Advance position by `velocity * time`
    pub fn update_position(&mut self, time: f32) {
        self.position += self.velocity * time;
    }
}

/// Handle to a body inside a [`System`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyId(pub usize);

#[derive(Debug, Clone, Default)]
pub struct System {
    pub bodies: Vec<Body>, // collection of bodies
    pub t: f32,            // elapsed simulation time
}

impl System {
    pub fn new(bodies: Vec<Body>) -> Self {
        Self { bodies, t: 0.0 }
    }

    pub fn add_body(&mut self, body: Body) -> BodyId {
        self.bodies.push(body);
        BodyId(self.bodies.len() - 1)
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.0)
    }

    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.get_mut(id.0)
    }
}
