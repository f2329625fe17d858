use crate::particle::ParticleSet;

/// Edges shorter than this are treated as degenerate and skipped.
const MIN_LENGTH: f32 = 1e-4;
/// Lower bound on `w_i + w_j + alpha` before the update is skipped.
const MIN_EFFECTIVE_INV_MASS: f32 = 1e-4;

/// XPBD distance constraint for mesh edges.
///
/// Keeps two particles at their rest separation, softened by compliance.
///
/// Reference: "XPBD: Position-Based Simulation of Compliant Constrained Dynamics",
/// Macklin et al., 2016
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceConstraint {
    /// Particle id A.
    pub i: u32,
    /// Particle id B.
    pub j: u32,
    /// Rest length, fixed at creation.
    pub rest_length: f32,
    /// Compliance (inverse stiffness). 0 = rigid.
    pub compliance: f32,
    pub damping: f32,
}

impl DistanceConstraint {
    /// Create a new distance constraint between particles `i` and `j`.
    pub fn new(i: u32, j: u32, rest_length: f32, compliance: f32) -> Self {
        Self {
            i,
            j,
            rest_length,
            compliance: compliance.max(0.0),
            damping: 0.0,
        }
    }

    /// Constraint whose rest length is the distance between the two
    /// particles' rest positions. `None` if either id is absent.
    pub fn from_rest(particles: &ParticleSet, i: u32, j: u32, compliance: f32) -> Option<Self> {
        if !particles.contains(i) || !particles.contains(j) {
            return None;
        }
        let rest = particles.rest_position[i as usize].distance(particles.rest_position[j as usize]);
        Some(Self::new(i, j, rest, compliance))
    }

    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping;
        self
    }

    /// Project this constraint once, Gauss-Seidel style (positions are
    /// updated in place).
    ///
    /// ```text
    /// C      = |p_j - p_i| - rest_length
    /// alpha  = compliance / dt^2
    /// lambda = -C / (w_i + w_j + alpha)
    /// p_i   -= n * lambda * w_i
    /// p_j   += n * lambda * w_j
    /// ```
    pub fn solve(&self, particles: &mut ParticleSet, dt: f32) {
        if !particles.contains(self.i) || !particles.contains(self.j) {
            return;
        }
        let i = self.i as usize;
        let j = self.j as usize;

        let diff = particles.position[j] - particles.position[i];
        let len = diff.length();
        if len < MIN_LENGTH {
            return;
        }

        let error = len - self.rest_length;
        let n = diff / len;
        let alpha = self.compliance / (dt * dt);

        let w_i = particles.inv_mass[i];
        let w_j = particles.inv_mass[j];
        let w_sum = w_i + w_j;
        if w_sum + alpha < MIN_EFFECTIVE_INV_MASS {
            return;
        }

        let lambda = -error / (w_sum + alpha);

        // Pinned ends are skipped outright so their bits never change.
        if w_i > 0.0 {
            particles.position[i] += n * (-lambda * w_i);
        }
        if w_j > 0.0 {
            particles.position[j] += n * (lambda * w_j);
        }
    }

    /// Current length minus rest length. `None` if either end is absent.
    pub fn error(&self, particles: &ParticleSet) -> Option<f32> {
        if !particles.contains(self.i) || !particles.contains(self.j) {
            return None;
        }
        let len = particles.position[self.i as usize].distance(particles.position[self.j as usize]);
        Some(len - self.rest_length)
    }
}
