use std::time::Instant;

use tracing::info;

use crate::error::SimResult;
use crate::simulation::integrator::euler_step;
use crate::simulation::params::Universe;
use crate::simulation::states::{Body, NVec3, System};

/// Helper to build a manual System of size `n`
fn make_system(n: usize) -> System {
    let mut bodies = Vec::with_capacity(n);

    for i in 0..n {
        let i_f = i as f32;
        // deterministic positions, no rand needed
        let x = NVec3::new(
            (i_f * 0.37).sin() * 5.0 + i_f * 1e-3,
            (i_f * 0.13).cos() * 5.0,
            (i_f * 0.07).sin() * 5.0,
        );
        bodies.push(Body::at_rest(1.0, x));
    }

    System::new(bodies)
}

/// Time `euler_step` (direct O(n^2) gravity) for growing `n`
/// Returns `(n, seconds per step)` pairs and logs each one
pub fn bench_euler() -> SimResult<Vec<(usize, f64)>> {
    let ns = [100, 200, 400, 800, 1600, 3200];
    let steps = 3; // steps averaged per n
    let universe = Universe::scaled().with_time_step(1e-3);

    let mut results = Vec::with_capacity(ns.len());
    for n in ns {
        let mut sys = make_system(n);

        // Warm-up
        euler_step(&mut sys, &universe)?;

        let t0 = Instant::now();
        for _ in 0..steps {
            euler_step(&mut sys, &universe)?;
        }
        let per_step = t0.elapsed().as_secs_f64() / steps as f64;

        info!(n, per_step_s = per_step, "euler step timing");
        results.push((n, per_step));
    }
    Ok(results)
}
