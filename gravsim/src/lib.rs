pub mod error;
pub mod simulation;
pub mod configuration;
pub mod benchmark;

pub use error::{SimError, SimResult};

pub use simulation::states::{Body, BodyId, System, NVec3};
pub use simulation::forces::{Force, SharedForce, gravity_pull};
pub use simulation::params::{Universe, GravityLaw, GRAVITY_CONSTANT, SCALED_GRAVITY_CONSTANT, TIME_STEP};
pub use simulation::integrator::{euler_step, update_velocity, update_velocities, update_positions};
pub use simulation::scenario::Scenario;

pub use configuration::config::{UniverseConfig, ForceConfig, BodyConfig, ScenarioConfig};

pub use benchmark::benchmark::bench_euler;
