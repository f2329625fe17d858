use crate::particle::ParticleSet;

/// Vertical velocity multiplier on floor contact (inelastic bounce).
pub const FLOOR_RESTITUTION: f32 = -0.5;
/// Horizontal velocity multiplier on floor contact.
pub const FLOOR_FRICTION: f32 = 0.8;

/// Clamp every particle below `floor_y` onto the plane, reflect and damp its
/// vertical velocity, and apply friction to the horizontal components.
///
/// Pinned particles are left alone. Returns the number of particles clamped.
pub fn enforce_floor(particles: &mut ParticleSet, floor_y: f32) -> usize {
    let mut clamped = 0;
    for i in 0..particles.count {
        if particles.inv_mass[i] == 0.0 {
            continue;
        }
        if particles.position[i].y < floor_y {
            particles.position[i].y = floor_y;
            let v = &mut particles.velocity[i];
            v.y *= FLOOR_RESTITUTION;
            v.x *= FLOOR_FRICTION;
            v.z *= FLOOR_FRICTION;
            clamped += 1;
        }
    }
    clamped
}
