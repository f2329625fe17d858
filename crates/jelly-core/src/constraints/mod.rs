pub mod distance;
pub mod pressure;

use glam::Vec3;

use crate::particle::ParticleSet;

pub use distance::DistanceConstraint;
pub use pressure::PressureConstraint;

/// Discriminant of a [`Constraint`], for logging and stats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConstraintKind {
    Distance,
    Pressure,
}

/// A relationship the solver projects once per substep.
#[derive(Clone, Debug, PartialEq)]
pub enum Constraint {
    Distance(DistanceConstraint),
    Pressure(PressureConstraint),
}

impl Constraint {
    pub fn kind(&self) -> ConstraintKind {
        match self {
            Constraint::Distance(_) => ConstraintKind::Distance,
            Constraint::Pressure(_) => ConstraintKind::Pressure,
        }
    }

    pub fn particle_ids(&self) -> Vec<u32> {
        match self {
            Constraint::Distance(c) => vec![c.i, c.j],
            Constraint::Pressure(c) => c.particle_ids.clone(),
        }
    }

    /// Rest length for distance constraints, rest volume for pressure.
    pub fn rest_value(&self) -> f32 {
        match self {
            Constraint::Distance(c) => c.rest_length,
            Constraint::Pressure(c) => c.rest_volume,
        }
    }

    pub fn compliance(&self) -> f32 {
        match self {
            Constraint::Distance(c) => c.compliance,
            Constraint::Pressure(c) => c.compliance,
        }
    }

    pub fn damping(&self) -> f32 {
        match self {
            Constraint::Distance(c) => c.damping,
            Constraint::Pressure(c) => c.damping,
        }
    }

    /// Project the constraint once onto the particle positions.
    pub fn solve(&self, particles: &mut ParticleSet, normals: &mut [Vec3], dt: f32) {
        match self {
            Constraint::Distance(c) => c.solve(particles, dt),
            Constraint::Pressure(c) => c.solve(particles, normals, dt),
        }
    }
}

impl From<DistanceConstraint> for Constraint {
    fn from(c: DistanceConstraint) -> Self {
        Constraint::Distance(c)
    }
}

impl From<PressureConstraint> for Constraint {
    fn from(c: PressureConstraint) -> Self {
        Constraint::Pressure(c)
    }
}
