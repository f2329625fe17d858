use crate::config::BodyConfig;

/// Body preset for quick configuration of the soft-body look.
#[derive(Clone, Copy, Debug)]
pub struct BodyPreset {
    pub total_mass: f32,
    pub edge_stiffness: f32,
    pub pressure: f32,
    pub global_damping: f32,
    pub substeps: u32,
}

impl BodyPreset {
    /// Jelly: soft edges, moderate pressure, wobbles for a while.
    pub const JELLY: Self = Self {
        total_mass: 1.0,
        edge_stiffness: 0.5,
        pressure: 80.0,
        global_damping: 0.995,
        substeps: 8,
    };

    /// Balloon: stiff skin, high pressure, settles quickly.
    pub const BALLOON: Self = Self {
        total_mass: 0.2,
        edge_stiffness: 0.95,
        pressure: 250.0,
        global_damping: 0.98,
        substeps: 10,
    };

    /// Pudding: heavy, very soft edges, little inflation.
    pub const PUDDING: Self = Self {
        total_mass: 3.0,
        edge_stiffness: 0.2,
        pressure: 30.0,
        global_damping: 0.97,
        substeps: 6,
    };

    /// Apply this preset to a body config.
    pub fn apply_to(&self, config: &mut BodyConfig) {
        config.total_mass = self.total_mass;
        config.edge_stiffness = self.edge_stiffness;
        config.pressure = self.pressure;
        config.physics.global_damping = self.global_damping;
        config.physics.substeps = self.substeps;
    }
}
