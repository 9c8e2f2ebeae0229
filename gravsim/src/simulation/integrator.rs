//! Fixed-step explicit Euler integration
//!
//! One step is two passes over the bodies:
//! 1. velocity pass: every body's velocity delta is computed from the same
//!    snapshot of positions/masses, then all deltas are applied
//! 2. position pass: `x_n+1 = x_n + dt * v_n+1`
//!
//! [`euler_step`] runs both passes in that order, so positions never move
//! while gravity for the same step is still being evaluated

use tracing::debug;

use super::params::Universe;
use super::states::{Body, NVec3, System};
use crate::error::{SimError, SimResult};

/// Update the velocity of `bodies[index]` against every other body in the slice
///
/// Only velocities change, and gravity reads positions and masses only, so
/// calling this for each index in turn is equivalent to [`update_velocities`].
pub fn update_velocity(bodies: &mut [Body], index: usize, time: f32, universe: &Universe) -> SimResult<()> {
    let body = bodies.get(index).ok_or(SimError::UnknownBody(index))?;
    let dv = body.velocity_delta(bodies, time, universe)?;
    bodies[index].apply_velocity_delta(dv);
    Ok(())
}

/// Velocity pass over all bodies
///
/// All-or-nothing: if any body fails (coincident positions, non-finite
/// gravity), no velocity is changed
pub fn update_velocities(bodies: &mut [Body], time: f32, universe: &Universe) -> SimResult<()> {
    let snapshot: &[Body] = bodies;
    let deltas = snapshot
        .iter()
        .map(|b| b.velocity_delta(snapshot, time, universe))
        .collect::<SimResult<Vec<NVec3>>>()?;

    for (b, dv) in bodies.iter_mut().zip(deltas) {
        b.apply_velocity_delta(dv);
    }
    Ok(())
}

/// Position pass over all bodies
pub fn update_positions(bodies: &mut [Body], time: f32) {
    for b in bodies.iter_mut() {
        b.update_position(time);
    }
}

/// Advance the system by one step of `universe.time_step`
/// Updates velocities, then positions, then `sys.t`
pub fn euler_step(sys: &mut System, universe: &Universe) -> SimResult<()> {
    let dt = universe.time_step;
    if !dt.is_finite() {
        return Err(SimError::InvalidTimeStep(dt));
    }
    if sys.bodies.is_empty() { // no bodies, only time advances
        sys.t += dt;
        return Ok(());
    }

    update_velocities(&mut sys.bodies, dt, universe)?;
    update_positions(&mut sys.bodies, dt);
    sys.t += dt;

    debug!(t = sys.t, n = sys.bodies.len(), "euler step");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn pair() -> Vec<Body> {
        vec![
            Body::at_rest(2.0, NVec3::new(-1.0, 0.0, 0.0)),
            Body::at_rest(3.0, NVec3::new(1.0, 0.0, 0.0)),
        ]
    }

    #[test]
    fn per_index_matches_pass() {
        let u = Universe::default().with_gravity_constant(1.0);

        let mut a = pair();
        for i in 0..a.len() {
            update_velocity(&mut a, i, 0.1, &u).unwrap();
        }

        let mut b = pair();
        update_velocities(&mut b, 0.1, &u).unwrap();

        for (x, y) in a.iter().zip(b.iter()) {
            assert_relative_eq!(x.velocity(), y.velocity());
        }
    }

    #[test]
    fn mutual_force_pull_is_symmetric() {
        let u = Universe::default().with_gravity_constant(1.0);
        let mut bodies = pair();
        update_velocities(&mut bodies, 1.0, &u).unwrap();

        // G * 2 * 3 / 2^2 = 1.5 on each, opposite directions
        assert_relative_eq!(bodies[0].velocity(), NVec3::new(1.5, 0.0, 0.0));
        assert_relative_eq!(bodies[1].velocity(), NVec3::new(-1.5, 0.0, 0.0));
    }

    #[test]
    fn failed_pass_changes_nothing() {
        let u = Universe::default();
        let mut bodies = vec![
            Body::with_velocity(1.0, NVec3::new(5.0, 0.0, 0.0), NVec3::new(1.0, 0.0, 0.0)),
            Body::at_rest(1.0, NVec3::zeros()),
            Body::at_rest(1.0, NVec3::zeros()),
        ];

        assert!(update_velocities(&mut bodies, 1.0, &u).is_err());
        assert_eq!(bodies[0].velocity(), NVec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn step_advances_time_and_positions() {
        let u = Universe::default().with_time_step(0.5);
        let mut sys = System::new(vec![Body::with_velocity(
            0.0,
            NVec3::zeros(),
            NVec3::new(2.0, 0.0, -4.0),
        )]);

        euler_step(&mut sys, &u).unwrap();

        assert_relative_eq!(sys.t, 0.5);
        assert_relative_eq!(sys.bodies[0].position(), NVec3::new(1.0, 0.0, -2.0));
    }

    #[test]
    fn nan_time_step_is_rejected() {
        let u = Universe::default().with_time_step(f32::NAN);
        let mut sys = System::default();
        assert!(matches!(euler_step(&mut sys, &u), Err(SimError::InvalidTimeStep(_))));
    }

    #[test]
    fn out_of_range_index_is_an_error() {
        let mut bodies = vec![Body::new()];
        let err = update_velocity(&mut bodies, 3, 1.0, &Universe::default()).unwrap_err();
        assert_eq!(err, SimError::UnknownBody(3));
    }

    #[test]
    fn non_finite_gravity_fails_the_pass() {
        // subnormal separation and an overflowing mass product
        for bodies in [
            vec![
                Body::at_rest(1e10, NVec3::zeros()),
                Body::at_rest(1e10, NVec3::new(1e-20, 1e-20, 0.0)),
            ],
            vec![
                Body::at_rest(1e30, NVec3::zeros()),
                Body::at_rest(1e30, NVec3::new(1.0, 0.0, 0.0)),
            ],
        ] {
            let mut bodies = bodies;
            let err = update_velocities(&mut bodies, 1.0, &Universe::default()).unwrap_err();
            assert!(matches!(err, SimError::NonFiniteAcceleration { .. }));
            for b in &bodies {
                assert_eq!(b.velocity(), NVec3::zeros());
            }
        }
    }
}
