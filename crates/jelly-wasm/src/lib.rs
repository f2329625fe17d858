use glam::Vec3;
use jelly_core::{BodyConfig, ConfigUpdate, MeshGeometry, Solver, TriangleMesh};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct JellyWorld {
    solver: Solver,
    displacement_buffer: Vec<f32>,
}

#[wasm_bindgen]
impl JellyWorld {
    #[wasm_bindgen(constructor)]
    pub fn new() -> JellyWorld {
        JellyWorld {
            solver: Solver::default(),
            displacement_buffer: Vec::new(),
        }
    }

    /// Build the body from the render mesh's buffers. `indices` may be
    /// omitted for non-indexed geometry.
    #[wasm_bindgen]
    #[allow(clippy::too_many_arguments)]
    pub fn init_from_geometry(
        &mut self,
        positions: &[f32],
        indices: Option<Vec<u32>>,
        mass: f32,
        edge_stiffness: f32,
        pressure: f32,
        gravity_enabled: bool,
        substeps: u32,
        damping: f32,
    ) -> Result<(), JsValue> {
        let body = body_config(mass, edge_stiffness, pressure, gravity_enabled, substeps, damping);
        let geometry = MeshGeometry {
            positions: Some(positions),
            indices: indices.as_deref(),
        };
        self.init(&geometry, &body)
    }

    /// Build an icosphere body without a geometry provider.
    #[wasm_bindgen]
    pub fn init_sphere(
        &mut self,
        radius: f32,
        subdivisions: u32,
        mass: f32,
        edge_stiffness: f32,
        pressure: f32,
    ) -> Result<(), JsValue> {
        let mesh = TriangleMesh::icosphere(radius, subdivisions.min(5));
        let body = BodyConfig {
            total_mass: mass,
            edge_stiffness,
            pressure,
            ..BodyConfig::default()
        };
        self.init(&mesh.as_geometry(), &body)
    }

    #[wasm_bindgen]
    pub fn apply_impact(
        &mut self,
        x: f32, y: f32, z: f32,
        fx: f32, fy: f32, fz: f32,
        radius: f32,
        intensity: f32,
    ) {
        self.solver.apply_impact(
            Vec3::new(x, y, z),
            Vec3::new(fx, fy, fz),
            radius,
            intensity,
        );
    }

    /// Step the solver and return the elapsed time in milliseconds.
    #[wasm_bindgen]
    pub fn step(&mut self, dt: f32) -> f32 {
        let start = js_sys::Date::now();
        self.solver.step(dt);
        let elapsed = js_sys::Date::now() - start;
        elapsed as f32
    }

    #[wasm_bindgen]
    pub fn enforce_floor_collision(&mut self) -> u32 {
        self.solver.enforce_floor_collision() as u32
    }

    #[wasm_bindgen]
    pub fn set_config(
        &mut self,
        substeps: u32,
        gravity_x: f32, gravity_y: f32, gravity_z: f32,
        damping: f32,
        floor_y: f32,
    ) {
        self.solver.set_config(
            ConfigUpdate::new()
                .with_substeps(substeps)
                .with_gravity(Vec3::new(gravity_x, gravity_y, gravity_z))
                .with_damping(damping)
                .with_floor_y(floor_y),
        );
    }

    #[wasm_bindgen]
    pub fn set_floor(&mut self, floor_y: f32) {
        self.solver.set_config(ConfigUpdate::new().with_floor_y(floor_y));
    }

    #[wasm_bindgen]
    pub fn reset(&mut self) {
        self.solver.reset();
    }

    #[wasm_bindgen]
    pub fn clear(&mut self) {
        self.solver.dispose();
        self.displacement_buffer = Vec::new();
    }

    #[wasm_bindgen]
    pub fn particle_count(&self) -> usize {
        self.solver.particle_count()
    }

    #[wasm_bindgen]
    pub fn get_positions_ptr(&self) -> *const f32 {
        self.solver.positions().as_ptr()
    }

    #[wasm_bindgen]
    pub fn get_positions_len(&self) -> usize {
        self.solver.positions().len()
    }

    /// Refresh the displacement buffer and return a pointer to it.
    #[wasm_bindgen]
    pub fn get_displacements_ptr(&mut self) -> *const f32 {
        self.displacement_buffer
            .resize(self.solver.particle_count() * 3, 0.0);
        self.solver.write_displacements(&mut self.displacement_buffer);
        self.displacement_buffer.as_ptr()
    }

    #[wasm_bindgen]
    pub fn get_displacements_len(&self) -> usize {
        self.solver.particle_count() * 3
    }
}

impl Default for JellyWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl JellyWorld {
    fn init(&mut self, geometry: &MeshGeometry<'_>, body: &BodyConfig) -> Result<(), JsValue> {
        match self.solver.init_from_geometry(geometry, body) {
            Ok(()) => {
                web_sys::console::log_1(
                    &format!(
                        "WASM JellyWorld initialized: {} particles, {} constraints",
                        self.solver.particle_count(),
                        self.solver.constraint_count()
                    )
                    .into(),
                );
                Ok(())
            }
            Err(e) => {
                web_sys::console::error_1(&format!("WASM JellyWorld init failed: {}", e).into());
                Err(JsValue::from_str(&e.to_string()))
            }
        }
    }
}

fn body_config(
    mass: f32,
    edge_stiffness: f32,
    pressure: f32,
    gravity_enabled: bool,
    substeps: u32,
    damping: f32,
) -> BodyConfig {
    let mut body = BodyConfig {
        total_mass: mass,
        edge_stiffness,
        pressure,
        gravity_enabled,
        ..BodyConfig::default()
    };
    body.physics.substeps = substeps.max(1);
    body.physics.global_damping = damping.clamp(0.0, 1.0);
    body
}
