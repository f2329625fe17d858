use glam::Vec3;

/// A queued impulse from the impact source (click, gesture, tracked hand).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Impact {
    pub position: Vec3,
    /// Direction, already scaled by the caller.
    pub force: Vec3,
    pub radius: f32,
    /// Clamped to [0, 1].
    pub intensity: f32,
}

impl Impact {
    pub fn new(position: Vec3, force: Vec3, radius: f32, intensity: f32) -> Self {
        Self {
            position,
            force,
            radius,
            intensity: intensity.clamp(0.0, 1.0),
        }
    }

    /// Velocity added to a particle at `pos`: `force * (1 - d/r)^2 * intensity`
    /// inside the radius, zero outside.
    #[inline]
    pub fn velocity_delta(&self, pos: Vec3) -> Vec3 {
        let dist = pos.distance(self.position);
        if dist >= self.radius {
            return Vec3::ZERO;
        }
        let t = 1.0 - dist / self.radius;
        self.force * (t * t * self.intensity)
    }
}
