use glam::Vec3;

use crate::math::{centroid, face_normal, signed_tetra_volume};
use crate::particle::ParticleSet;

/// Compliance used for the pressure constraint built from geometry.
pub const PRESSURE_COMPLIANCE: f32 = 1e-7;
/// `pressure` is scaled by this before it drives the correction.
const PRESSURE_SCALE: f32 = 1e-3;
/// Added to the rest volume in the error ratio.
const VOLUME_EPSILON: f32 = 1e-3;
/// Accumulated normals shorter than this are skipped.
const MIN_NORMAL_LENGTH: f32 = 1e-6;

/// Internal-pressure constraint over a closed triangle surface.
///
/// A heuristic balloon model, not an incompressible gas: each substep the
/// relative volume error is turned into a push along every vertex's
/// area-weighted normal. Surfaces must be wound counter-clockwise seen from
/// outside so the normals point outward.
#[derive(Clone, Debug, PartialEq)]
pub struct PressureConstraint {
    pub particle_ids: Vec<u32>,
    pub triangles: Vec<[u32; 3]>,
    /// Unsigned enclosed volume at creation.
    pub rest_volume: f32,
    /// Inflation coefficient; larger = more inflated.
    pub pressure: f32,
    pub compliance: f32,
    pub damping: f32,
}

impl PressureConstraint {
    pub fn new(
        particle_ids: Vec<u32>,
        triangles: Vec<[u32; 3]>,
        rest_volume: f32,
        pressure: f32,
        compliance: f32,
    ) -> Self {
        Self {
            particle_ids,
            triangles,
            rest_volume,
            pressure,
            compliance: compliance.max(0.0),
            damping: 0.0,
        }
    }

    /// Constraint whose rest volume is measured from the particles' rest
    /// positions.
    pub fn from_rest(
        particles: &ParticleSet,
        particle_ids: Vec<u32>,
        triangles: Vec<[u32; 3]>,
        pressure: f32,
        compliance: f32,
    ) -> Self {
        let mut c = Self::new(particle_ids, triangles, 0.0, pressure, compliance);
        c.rest_volume = c.volume_of(particles, &particles.rest_position).abs();
        c
    }

    /// Signed volume enclosed by the current positions.
    pub fn current_volume(&self, particles: &ParticleSet) -> f32 {
        self.volume_of(particles, &particles.position)
    }

    fn center_of(&self, particles: &ParticleSet, positions: &[Vec3]) -> Vec3 {
        centroid(
            self.particle_ids
                .iter()
                .filter(|&&id| particles.contains(id))
                .map(|&id| positions[id as usize]),
        )
    }

    fn volume_of(&self, particles: &ParticleSet, positions: &[Vec3]) -> f32 {
        let center = self.center_of(particles, positions);
        self.live_triangles(particles)
            .map(|[a, b, c]| {
                signed_tetra_volume(
                    positions[a] - center,
                    positions[b] - center,
                    positions[c] - center,
                )
            })
            .sum()
    }

    fn live_triangles<'a>(
        &'a self,
        particles: &'a ParticleSet,
    ) -> impl Iterator<Item = [usize; 3]> + 'a {
        self.triangles
            .iter()
            .filter(|tri| tri.iter().all(|&id| particles.contains(id)))
            .map(|&[a, b, c]| [a as usize, b as usize, c as usize])
    }

    /// Project this constraint once.
    ///
    /// `normals` is scratch space with at least `particles.count` entries;
    /// only the slots of this constraint's particles are touched.
    pub fn solve(&self, particles: &mut ParticleSet, normals: &mut [Vec3], dt: f32) {
        if normals.len() < particles.count {
            return;
        }

        for &id in &self.particle_ids {
            if particles.contains(id) {
                normals[id as usize] = Vec3::ZERO;
            }
        }

        let positions = &particles.position;
        let center = self.center_of(particles, positions);
        let mut current_volume = 0.0;
        for [a, b, c] in self.live_triangles(particles) {
            let (v0, v1, v2) = (positions[a], positions[b], positions[c]);
            current_volume += signed_tetra_volume(v0 - center, v1 - center, v2 - center);

            let n = face_normal(v0, v1, v2);
            normals[a] += n;
            normals[b] += n;
            normals[c] += n;
        }

        let volume_error = current_volume - self.rest_volume;
        let alpha = self.compliance / (dt * dt);
        let pressure_factor = self.pressure * PRESSURE_SCALE;
        let correction = (-volume_error / (self.rest_volume + VOLUME_EPSILON)) * pressure_factor;

        for &id in &self.particle_ids {
            if !particles.contains(id) {
                continue;
            }
            let i = id as usize;
            let w = particles.inv_mass[i];
            if w == 0.0 {
                continue;
            }
            let len = normals[i].length();
            if len < MIN_NORMAL_LENGTH {
                continue;
            }
            let n = normals[i] / len;
            let lambda = correction / (w + alpha);
            particles.position[i] += n * (lambda * w);
        }
    }
}
