pub mod impact;

use glam::Vec3;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

pub use impact::Impact;

/// Phase 1 of a substep: gravity and queued impacts into velocity.
///
/// Gravity is integrated over `dt`; impacts are instantaneous velocity
/// injections and are not scaled by `dt`. Pinned particles are untouched.
pub fn apply_external_forces(
    positions: &[Vec3],
    velocities: &mut [Vec3],
    inv_mass: &[f32],
    gravity: Vec3,
    impacts: &[Impact],
    dt: f32,
) {
    let gravity_dv = gravity * dt;
    let apply = |(vel, (pos, w)): (&mut Vec3, (&Vec3, &f32))| {
        if *w == 0.0 {
            return;
        }
        *vel += gravity_dv;
        for impact in impacts {
            *vel += impact.velocity_delta(*pos);
        }
    };

    #[cfg(feature = "parallel")]
    {
        velocities
            .par_iter_mut()
            .zip(positions.par_iter().zip(inv_mass.par_iter()))
            .for_each(apply);
    }

    #[cfg(not(feature = "parallel"))]
    {
        velocities
            .iter_mut()
            .zip(positions.iter().zip(inv_mass.iter()))
            .for_each(apply);
    }
}
