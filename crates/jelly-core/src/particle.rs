use glam::Vec3;

/// One simulated point mass. Used to insert into and read from a
/// [`ParticleSet`]; the set itself stores particles as arrays.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    /// Index of the source vertex. Output arrays are ordered by id.
    pub id: u32,
    pub position: Vec3,
    pub prev_position: Vec3,
    pub velocity: Vec3,
    /// 0.0 = pinned (never moved).
    pub inv_mass: f32,
    pub rest_position: Vec3,
}

impl Particle {
    /// A particle at rest at `position`.
    pub fn new(id: u32, position: Vec3, inv_mass: f32) -> Self {
        Self {
            id,
            position,
            prev_position: position,
            velocity: Vec3::ZERO,
            inv_mass: inv_mass.max(0.0),
            rest_position: position,
        }
    }

    /// A pinned particle at `position`.
    pub fn pinned(id: u32, position: Vec3) -> Self {
        Self::new(id, position, 0.0)
    }

    #[inline]
    pub fn is_pinned(&self) -> bool {
        self.inv_mass == 0.0
    }
}

/// SoA particle arena indexed by particle id.
///
/// Slots that were never inserted (or were removed) are vacant: zeroed,
/// pinned, and reported as absent by [`ParticleSet::contains`].
#[derive(Clone, Debug, Default)]
pub struct ParticleSet {
    /// Number of slots (highest inserted id + 1).
    pub count: usize,
    pub position: Vec<Vec3>,
    pub prev_position: Vec<Vec3>,
    pub velocity: Vec<Vec3>,
    pub inv_mass: Vec<f32>,
    pub rest_position: Vec<Vec3>,
    occupied: Vec<bool>,
}

impl ParticleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            count: 0,
            position: Vec::with_capacity(capacity),
            prev_position: Vec::with_capacity(capacity),
            velocity: Vec::with_capacity(capacity),
            inv_mass: Vec::with_capacity(capacity),
            rest_position: Vec::with_capacity(capacity),
            occupied: Vec::with_capacity(capacity),
        }
    }

    /// Insert `p` at slot `p.id`, replacing any particle already there.
    pub fn insert(&mut self, p: Particle) {
        let i = p.id as usize;
        if i >= self.count {
            self.grow(i + 1);
        }
        self.position[i] = p.position;
        self.prev_position[i] = p.prev_position;
        self.velocity[i] = p.velocity;
        self.inv_mass[i] = p.inv_mass;
        self.rest_position[i] = p.rest_position;
        self.occupied[i] = true;
    }

    /// Vacate slot `id`. Constraints still referencing it are skipped.
    pub fn remove(&mut self, id: u32) -> Option<Particle> {
        let p = self.get(id)?;
        let i = id as usize;
        self.position[i] = Vec3::ZERO;
        self.prev_position[i] = Vec3::ZERO;
        self.velocity[i] = Vec3::ZERO;
        self.inv_mass[i] = 0.0;
        self.rest_position[i] = Vec3::ZERO;
        self.occupied[i] = false;
        Some(p)
    }

    pub fn get(&self, id: u32) -> Option<Particle> {
        let i = id as usize;
        if !self.contains(id) {
            return None;
        }
        Some(Particle {
            id,
            position: self.position[i],
            prev_position: self.prev_position[i],
            velocity: self.velocity[i],
            inv_mass: self.inv_mass[i],
            rest_position: self.rest_position[i],
        })
    }

    #[inline]
    pub fn contains(&self, id: u32) -> bool {
        self.occupied.get(id as usize).copied().unwrap_or(false)
    }

    /// Number of occupied slots.
    pub fn live_count(&self) -> usize {
        self.occupied.iter().filter(|&&o| o).count()
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.occupied
            .iter()
            .enumerate()
            .filter(|&(_, &o)| o)
            .map(|(i, _)| i as u32)
    }

    pub fn clear(&mut self) {
        self.count = 0;
        self.position.clear();
        self.prev_position.clear();
        self.velocity.clear();
        self.inv_mass.clear();
        self.rest_position.clear();
        self.occupied.clear();
    }

    fn grow(&mut self, count: usize) {
        self.count = count;
        self.position.resize(count, Vec3::ZERO);
        self.prev_position.resize(count, Vec3::ZERO);
        self.velocity.resize(count, Vec3::ZERO);
        self.inv_mass.resize(count, 0.0);
        self.rest_position.resize(count, Vec3::ZERO);
        self.occupied.resize(count, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_grows_and_leaves_gaps_vacant() {
        let mut set = ParticleSet::new();
        set.insert(Particle::new(3, Vec3::X, 1.0));

        assert_eq!(set.count, 4);
        assert_eq!(set.live_count(), 1);
        assert!(set.contains(3));
        assert!(!set.contains(0));
        assert_eq!(set.inv_mass[0], 0.0, "vacant slots are pinned");
        assert_eq!(set.ids().collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn test_remove_vacates_slot() {
        let mut set = ParticleSet::new();
        set.insert(Particle::new(0, Vec3::Y, 2.0));
        set.insert(Particle::new(1, Vec3::Z, 2.0));

        let removed = set.remove(0).unwrap();
        assert_eq!(removed.position, Vec3::Y);
        assert!(set.get(0).is_none());
        assert!(set.remove(0).is_none());
        assert_eq!(set.count, 2, "slot count is unchanged");
        assert_eq!(set.position[0], Vec3::ZERO);
    }

    #[test]
    fn test_negative_inv_mass_clamped() {
        assert!(Particle::new(0, Vec3::ZERO, -1.0).is_pinned());
    }
}
