use crate::collision::enforce_floor;
use crate::config::{BodyConfig, ConfigUpdate, ImpactReplay, PhysicsConfig};
use crate::constraints::{Constraint, DistanceConstraint, PressureConstraint};
use crate::constraints::pressure::PRESSURE_COMPLIANCE;
use crate::error::SolverError;
use crate::forces::{apply_external_forces, Impact};
use crate::geometry::{MeshGeometry, Topology};
use crate::particle::{Particle, ParticleSet};
use glam::Vec3;

/// Edge compliance at `edge_stiffness = 0`.
const EDGE_COMPLIANCE_SCALE: f32 = 1e-4;
/// Rest volumes below this are reported as degenerate.
const MIN_REST_VOLUME: f32 = 1e-6;

/// Current and rest volume of a pressure constraint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VolumeSample {
    pub current: f32,
    pub rest: f32,
}

impl VolumeSample {
    /// `|current - rest| / rest`.
    pub fn relative_error(&self) -> f32 {
        if self.rest <= 0.0 {
            return 0.0;
        }
        (self.current - self.rest).abs() / self.rest
    }
}

/// XPBD soft-body solver: particles, constraints, queued impacts and the
/// engine config, stepped once per frame by the caller.
pub struct Solver {
    pub particles: ParticleSet,
    /// Solved in insertion order, once per substep.
    pub constraints: Vec<Constraint>,
    pub config: PhysicsConfig,
    impacts: Vec<Impact>,
    /// Per-particle normal accumulator for pressure constraints.
    normals: Vec<Vec3>,
}

impl Solver {
    pub fn new(config: PhysicsConfig) -> Self {
        Self {
            particles: ParticleSet::new(),
            constraints: Vec::new(),
            config,
            impacts: Vec::new(),
            normals: Vec::new(),
        }
    }

    // ---------- store ----------

    /// Insert a particle by id. Reusing an id overwrites the previous one.
    pub fn add_particle(&mut self, particle: Particle) {
        self.particles.insert(particle);
    }

    pub fn add_particles(&mut self, particles: impl IntoIterator<Item = Particle>) {
        for p in particles {
            self.particles.insert(p);
        }
    }

    /// Remove a particle. Constraints that reference it skip it from then on.
    pub fn remove_particle(&mut self, id: u32) -> Option<Particle> {
        self.particles.remove(id)
    }

    pub fn get_particle(&self, id: u32) -> Option<Particle> {
        self.particles.get(id)
    }

    /// Pin a particle in place. Returns false if the id is absent.
    pub fn pin(&mut self, id: u32) -> bool {
        if !self.particles.contains(id) {
            return false;
        }
        self.particles.inv_mass[id as usize] = 0.0;
        true
    }

    /// Append a constraint. Referenced ids are not validated.
    pub fn add_constraint(&mut self, constraint: impl Into<Constraint>) {
        self.constraints.push(constraint.into());
    }

    pub fn add_constraints(&mut self, constraints: impl IntoIterator<Item = Constraint>) {
        self.constraints.extend(constraints);
    }

    pub fn particle_count(&self) -> usize {
        self.particles.count
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// True once there is anything to simulate.
    pub fn is_ready(&self) -> bool {
        !self.particles.is_empty()
    }

    /// Empty particles, constraints and pending impacts.
    pub fn clear(&mut self) {
        self.particles.clear();
        self.constraints.clear();
        self.impacts.clear();
        self.normals.clear();
    }

    /// Release all simulation state. The solver must be re-initialized
    /// before it is stepped again.
    pub fn dispose(&mut self) {
        self.clear();
        self.constraints.shrink_to_fit();
        self.impacts.shrink_to_fit();
        self.normals.shrink_to_fit();
        self.particles = ParticleSet::new();
    }

    // ---------- config ----------

    pub fn set_config(&mut self, update: ConfigUpdate) {
        self.config.apply(&update);
    }

    // ---------- initialization ----------

    /// Build one body from a vertex/index buffer: a particle per vertex, a
    /// distance constraint per unique edge, and one pressure constraint
    /// over the whole surface.
    ///
    /// On error nothing is built and the solver is left empty.
    pub fn init_from_geometry(
        &mut self,
        geometry: &MeshGeometry<'_>,
        body: &BodyConfig,
    ) -> Result<(), SolverError> {
        self.clear();

        let topology = match Self::validate(geometry, body) {
            Ok(t) => t,
            Err(e) => {
                log::error!("soft body init failed: {}", e);
                return Err(e);
            }
        };

        let vertex_count = topology.vertices.len();
        let inv_mass = vertex_count as f32 / body.total_mass;
        self.particles = ParticleSet::with_capacity(vertex_count);
        for (id, &v) in topology.vertices.iter().enumerate() {
            self.particles.insert(Particle::new(id as u32, v, inv_mass));
        }

        let compliance = (1.0 - body.edge_stiffness) * EDGE_COMPLIANCE_SCALE;
        let edges: Vec<Constraint> = topology
            .edges
            .iter()
            .filter_map(|&(a, b)| DistanceConstraint::from_rest(&self.particles, a, b, compliance))
            .map(|c| c.with_damping(body.edge_damping).into())
            .collect();
        let edge_count = edges.len();
        self.constraints.reserve(edge_count + 1);
        self.constraints.extend(edges);

        let triangle_count = topology.triangles.len();
        let pressure = PressureConstraint::from_rest(
            &self.particles,
            self.particles.ids().collect(),
            topology.triangles,
            body.pressure,
            PRESSURE_COMPLIANCE,
        );
        let rest_volume = pressure.rest_volume;
        if rest_volume < MIN_REST_VOLUME {
            log::warn!(
                "soft body rest volume is {} (open or flat mesh?); pressure will have no effect",
                rest_volume
            );
        }
        self.constraints.push(pressure.into());

        self.config = body.engine_config();
        self.normals = vec![Vec3::ZERO; vertex_count];

        log::debug!(
            "soft body ready: {} particles, {} edges, {} triangles, rest volume {:.4}",
            vertex_count,
            edge_count,
            triangle_count,
            rest_volume
        );
        Ok(())
    }

    fn validate(geometry: &MeshGeometry<'_>, body: &BodyConfig) -> Result<Topology, SolverError> {
        if !(body.total_mass.is_finite() && body.total_mass > 0.0) {
            return Err(SolverError::InvalidMass);
        }
        if !(0.0..=1.0).contains(&body.edge_stiffness) {
            return Err(SolverError::InvalidStiffness);
        }
        Topology::from_geometry(geometry)
    }

    // ---------- per frame ----------

    /// Queue an impulse for the next [`step`](Self::step).
    pub fn apply_impact(&mut self, position: Vec3, force: Vec3, radius: f32, intensity: f32) {
        self.impacts.push(Impact::new(position, force, radius, intensity));
    }

    pub fn pending_impacts(&self) -> &[Impact] {
        &self.impacts
    }

    /// Advance the simulation by `dt` seconds.
    ///
    /// Each of the `substeps` slices runs: external forces, position
    /// prediction, one Gauss-Seidel sweep over all constraints, velocity
    /// reconstruction, and global damping. The impact queue is consumed by
    /// the substeps and cleared afterwards.
    ///
    /// `dt` is not clamped; large frame spikes must be capped by the caller.
    pub fn step(&mut self, dt: f32) {
        let config = self.config;
        let substeps = config.substeps.max(1);

        if dt == 0.0 || self.particles.is_empty() {
            self.impacts.clear();
            return;
        }

        let sub_dt = dt / substeps as f32;
        if self.normals.len() < self.particles.count {
            self.normals.resize(self.particles.count, Vec3::ZERO);
        }

        for substep in 0..substeps {
            let impacts: &[Impact] = match config.impact_replay {
                ImpactReplay::EverySubstep => &self.impacts,
                ImpactReplay::FirstSubstep if substep == 0 => &self.impacts,
                ImpactReplay::FirstSubstep => &[],
            };

            // STEP 1: Gravity and impacts -> velocities
            apply_external_forces(
                &self.particles.position,
                &mut self.particles.velocity,
                &self.particles.inv_mass,
                config.gravity,
                impacts,
                sub_dt,
            );

            // STEP 2: Predict positions
            let p = &mut self.particles;
            for i in 0..p.count {
                p.prev_position[i] = p.position[i];
                if p.inv_mass[i] > 0.0 {
                    p.position[i] += p.velocity[i] * sub_dt;
                }
            }

            // STEP 3: One sweep over all constraints
            for c in &self.constraints {
                c.solve(&mut self.particles, &mut self.normals, sub_dt);
            }

            // STEP 4 + 5: Reconstruct velocities, then damp
            let p = &mut self.particles;
            for i in 0..p.count {
                if p.inv_mass[i] > 0.0 {
                    p.velocity[i] =
                        (p.position[i] - p.prev_position[i]) / sub_dt * config.global_damping;
                }
            }
        }

        log::trace!(
            "stepped {} particles, {} substeps, {} impacts",
            self.particles.count,
            substeps,
            self.impacts.len()
        );
        self.impacts.clear();
    }

    /// Clamp particles that fell below `config.floor_y` back onto the floor.
    /// Not part of [`step`](Self::step); call it afterwards if wanted.
    pub fn enforce_floor_collision(&mut self) -> usize {
        enforce_floor(&mut self.particles, self.config.floor_y)
    }

    /// Put every particle back at its rest position with zero velocity.
    /// Constraints and config are kept.
    pub fn reset(&mut self) {
        let p = &mut self.particles;
        for i in 0..p.count {
            p.position[i] = p.rest_position[i];
            p.prev_position[i] = p.rest_position[i];
            p.velocity[i] = Vec3::ZERO;
        }
        self.impacts.clear();
    }

    // ---------- output ----------

    /// Flat `x, y, z` positions ordered by particle id, ready to be copied
    /// into the render mesh's vertex buffer.
    pub fn positions(&self) -> &[f32] {
        bytemuck::cast_slice(&self.particles.position)
    }

    /// Flat `position - rest_position` per particle, ordered by id.
    pub fn displacements(&self) -> Vec<f32> {
        let mut out = vec![0.0; self.particles.count * 3];
        self.write_displacements(&mut out);
        out
    }

    /// Write displacements into `out`, stopping at whichever of `out` and
    /// the particle set is shorter.
    pub fn write_displacements(&self, out: &mut [f32]) {
        let p = &self.particles;
        for ((chunk, pos), rest) in out
            .chunks_exact_mut(3)
            .zip(&p.position)
            .zip(&p.rest_position)
        {
            chunk.copy_from_slice(&(*pos - *rest).to_array());
        }
    }

    /// Volume of the first pressure constraint, if there is one.
    pub fn pressure_volume(&self) -> Option<VolumeSample> {
        self.constraints.iter().find_map(|c| match c {
            Constraint::Pressure(pc) => Some(VolumeSample {
                current: pc.current_volume(&self.particles),
                rest: pc.rest_volume,
            }),
            _ => None,
        })
    }
}

impl Default for Solver {
    fn default() -> Self {
        Self::new(PhysicsConfig::default())
    }
}
