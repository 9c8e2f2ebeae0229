//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a runtime `Scenario`:
//! - physical constants (`Universe`)
//! - system state (`System` with bodies at t = 0)
//! - how many steps `run` should take

use std::collections::HashMap;

use tracing::{debug, info};

use crate::configuration::config::{BodyConfig, ScenarioConfig};
use crate::error::{SimError, SimResult};
use crate::simulation::forces::{Force, SharedForce};
use crate::simulation::integrator::euler_step;
use crate::simulation::params::Universe;
use crate::simulation::states::{Body, BodyId, NVec3, System};

/// Runtime bundle owning one independent simulation
#[derive(Debug, Clone, Default)]
pub struct Scenario {
    pub universe: Universe,
    pub system: System,
    pub steps: usize,
}

impl Scenario {
    pub fn new(universe: Universe, bodies: Vec<Body>) -> Self {
        Self {
            universe,
            system: System::new(bodies),
            steps: 0,
        }
    }

    pub fn build_scenario(cfg: ScenarioConfig) -> SimResult<Self> {
        // Universe: config overrides on top of defaults
        let mut universe = Universe::default();
        if let Some(g) = cfg.universe.gravity_constant {
            universe.gravity_constant = g;
        }
        if let Some(dt) = cfg.universe.time_step {
            if !dt.is_finite() {
                return Err(SimError::InvalidTimeStep(dt));
            }
            universe.time_step = dt;
        }
        if let Some(law) = cfg.universe.gravity_law {
            universe.gravity_law = law;
        }

        // Forces: built once, shared by every body naming them
        let mut forces: HashMap<String, SharedForce> = HashMap::new();
        for fc in cfg.forces {
            let force = Force::shared(NVec3::from(fc.direction), fc.magnitude)?;
            if forces.insert(fc.name.clone(), force).is_some() {
                return Err(SimError::DuplicateForce(fc.name));
            }
        }

        // Bodies: map `BodyConfig` -> runtime `Body`
        let bodies = cfg
            .bodies
            .iter()
            .map(|bc| build_body(bc, &forces))
            .collect::<SimResult<Vec<Body>>>()?;

        info!(
            bodies = bodies.len(),
            forces = forces.len(),
            steps = cfg.steps,
            "scenario built"
        );

        Ok(Self {
            universe,
            system: System::new(bodies),
            steps: cfg.steps,
        })
    }

    pub fn add_body(&mut self, body: Body) -> BodyId {
        self.system.add_body(body)
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.system.body(id)
    }

    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.system.body_mut(id)
    }

    /// Advance by one `universe.time_step`
    pub fn step(&mut self) -> SimResult<()> {
        euler_step(&mut self.system, &self.universe)
    }

    /// Run `self.steps` steps, stopping at the first error
    pub fn run(&mut self) -> SimResult<()> {
        for i in 0..self.steps {
            self.step()?;
            debug!(step = i + 1, t = self.system.t, "step done");
        }
        Ok(())
    }
}

fn build_body(bc: &BodyConfig, forces: &HashMap<String, SharedForce>) -> SimResult<Body> {
    let velocity = bc.v.map(NVec3::from).unwrap_or_else(NVec3::zeros);
    let mut body = Body::with_velocity(bc.m, NVec3::from(bc.x), velocity);
    if let Some(name) = &bc.name {
        body = body.named(name.clone());
    }
    for name in &bc.forces {
        let force = forces
            .get(name)
            .ok_or_else(|| SimError::UnknownForce(name.clone()))?;
        body.add_force(force.clone());
    }
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::params::{GravityLaw, GRAVITY_CONSTANT};
    use std::sync::Arc;

    fn cfg(yaml: &str) -> ScenarioConfig {
        ScenarioConfig::from_yaml_str(yaml).unwrap()
    }

    #[test]
    fn omitted_constants_keep_defaults() {
        let s = Scenario::build_scenario(cfg("bodies: []\n")).unwrap();
        assert_eq!(s.universe.gravity_constant, GRAVITY_CONSTANT);
        assert_eq!(s.universe.time_step, 0.01);
        assert_eq!(s.universe.gravity_law, GravityLaw::MutualForce);
        assert!(s.system.bodies.is_empty());
    }

    #[test]
    fn forces_are_shared_between_bodies() {
        let s = Scenario::build_scenario(cfg(r#"
forces:
  - name: push
    direction: [2.0, 0.0, 0.0]
    magnitude: 1.0
bodies:
  - { m: 1.0, x: [0.0, 0.0, 0.0], forces: [push] }
  - { m: 1.0, x: [5.0, 0.0, 0.0], forces: [push] }
"#))
        .unwrap();

        let a = &s.system.bodies[0].forces()[0];
        let b = &s.system.bodies[1].forces()[0];
        assert!(Arc::ptr_eq(a, b));
        assert_eq!(a.direction(), NVec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn unknown_force_is_reported() {
        let err = Scenario::build_scenario(cfg(
            "bodies:\n  - { m: 1.0, x: [0.0, 0.0, 0.0], forces: [ghost] }\n",
        ))
        .unwrap_err();
        assert_eq!(err, SimError::UnknownForce("ghost".into()));
    }

    #[test]
    fn duplicate_force_is_reported() {
        let err = Scenario::build_scenario(cfg(r#"
forces:
  - { name: f, direction: [1.0, 0.0, 0.0], magnitude: 1.0 }
  - { name: f, direction: [0.0, 1.0, 0.0], magnitude: 1.0 }
bodies: []
"#))
        .unwrap_err();
        assert_eq!(err, SimError::DuplicateForce("f".into()));
    }

    #[test]
    fn zero_force_direction_is_reported() {
        let err = Scenario::build_scenario(cfg(r#"
forces:
  - { name: f, direction: [0.0, 0.0, 0.0], magnitude: 1.0 }
bodies: []
"#))
        .unwrap_err();
        assert!(matches!(err, SimError::DegenerateVector { .. }));
    }

    #[test]
    fn run_takes_configured_steps() {
        let mut s = Scenario::build_scenario(cfg(r#"
universe: { time_step: 0.25 }
steps: 4
bodies:
  - { m: 0.0, x: [0.0, 0.0, 0.0], v: [1.0, 0.0, 0.0] }
"#))
        .unwrap();

        s.run().unwrap();
        assert_eq!(s.system.t, 1.0);
        assert_eq!(s.system.bodies[0].position(), NVec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn bodies_added_by_id_are_stepped() {
        let mut s = Scenario::new(Universe::scaled(), Vec::new());
        let sun = s.add_body(Body::at_rest(1000.0, NVec3::zeros()).named("sun"));
        let moon = s.add_body(Body::with_velocity(
            1.0,
            NVec3::new(10.0, 0.0, 0.0),
            NVec3::new(0.0, 1.0, 0.0),
        ));

        s.body_mut(moon).unwrap().set_mass(2.0);
        s.step().unwrap();

        let p = s.body(moon).unwrap();
        assert_eq!(p.mass(), 2.0);
        assert!(p.velocity().x < 0.0, "the moon falls toward the sun");
        assert!(p.position().y > 0.0);
        assert!(s.body(sun).unwrap().velocity().x > 0.0);
        assert!(s.body(BodyId(7)).is_none());
        assert!(s.body_mut(BodyId(7)).is_none());
        assert_eq!(s.system.t, 0.01);
    }
}
