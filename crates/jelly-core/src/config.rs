use glam::Vec3;

/// How queued impacts are consumed across the substeps of one `step()` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ImpactReplay {
    /// Every substep re-applies the whole queue, so the total impulse of one
    /// impact scales with `substeps`.
    #[default]
    EverySubstep,
    /// Impacts are applied on the first substep only.
    FirstSubstep,
}

/// Engine parameters, read fresh at the start of every step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicsConfig {
    pub substeps: u32,
    pub gravity: Vec3,
    /// Per-substep velocity multiplier. The effective per-frame damping is
    /// `global_damping.powi(substeps)`.
    pub global_damping: f32,
    pub floor_y: f32,
    pub impact_replay: ImpactReplay,
}

impl PhysicsConfig {
    pub const fn new() -> Self {
        Self {
            substeps: 8,
            gravity: Vec3::new(0.0, -9.81, 0.0),
            global_damping: 0.99,
            floor_y: -1.5,
            impact_replay: ImpactReplay::EverySubstep,
        }
    }

    /// Merge a partial update into this config. Fields left as `None` keep
    /// their current value.
    pub fn apply(&mut self, update: &ConfigUpdate) {
        if let Some(substeps) = update.substeps {
            self.substeps = substeps.max(1);
        }
        if let Some(gravity) = update.gravity {
            self.gravity = gravity;
        }
        if let Some(damping) = update.global_damping {
            self.global_damping = damping.clamp(0.0, 1.0);
        }
        if let Some(floor_y) = update.floor_y {
            self.floor_y = floor_y;
        }
        if let Some(replay) = update.impact_replay {
            self.impact_replay = replay;
        }
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Partial config update for [`Solver::set_config`](crate::solver::Solver::set_config).
///
/// ```
/// use jelly_core::config::ConfigUpdate;
/// use glam::Vec3;
///
/// let update = ConfigUpdate::new()
///     .with_substeps(10)
///     .with_gravity(Vec3::ZERO);
/// assert_eq!(update.substeps, Some(10));
/// assert_eq!(update.floor_y, None);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ConfigUpdate {
    pub substeps: Option<u32>,
    pub gravity: Option<Vec3>,
    pub global_damping: Option<f32>,
    pub floor_y: Option<f32>,
    pub impact_replay: Option<ImpactReplay>,
}

impl ConfigUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_substeps(mut self, substeps: u32) -> Self {
        self.substeps = Some(substeps);
        self
    }

    pub fn with_gravity(mut self, gravity: Vec3) -> Self {
        self.gravity = Some(gravity);
        self
    }

    pub fn with_damping(mut self, damping: f32) -> Self {
        self.global_damping = Some(damping);
        self
    }

    pub fn with_floor_y(mut self, floor_y: f32) -> Self {
        self.floor_y = Some(floor_y);
        self
    }

    pub fn with_impact_replay(mut self, replay: ImpactReplay) -> Self {
        self.impact_replay = Some(replay);
        self
    }
}

/// Parameters used once by `init_from_geometry` to build a body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyConfig {
    /// Total mass, spread uniformly over all vertices.
    pub total_mass: f32,
    /// Edge stiffness in [0, 1]. 1 gives zero compliance (rigid edges).
    pub edge_stiffness: f32,
    /// Stored on every edge constraint; not used by the solve.
    pub edge_damping: f32,
    /// Inflation coefficient of the pressure constraint.
    pub pressure: f32,
    /// When false, gravity is zeroed before it is pushed into the engine.
    pub gravity_enabled: bool,
    pub physics: PhysicsConfig,
}

impl BodyConfig {
    pub const fn new() -> Self {
        Self {
            total_mass: 1.0,
            edge_stiffness: 0.9,
            edge_damping: 0.0,
            pressure: 100.0,
            gravity_enabled: true,
            physics: PhysicsConfig::new(),
        }
    }

    /// The engine config this body pushes into the solver.
    pub fn engine_config(&self) -> PhysicsConfig {
        let mut physics = self.physics;
        physics.substeps = physics.substeps.max(1);
        if !self.gravity_enabled {
            physics.gravity = Vec3::ZERO;
        }
        physics
    }
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self::new()
    }
}
