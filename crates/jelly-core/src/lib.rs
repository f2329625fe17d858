//! XPBD soft-body solver for jelly and balloon-like meshes.
//!
//! A mesh's vertices become particles, its edges become distance
//! constraints, and its closed surface becomes one pressure constraint.
//! Each frame the caller queues impacts, calls [`Solver::step`], and copies
//! [`Solver::positions`] back into the render mesh.
//!
//! ```
//! use jelly_core::{BodyConfig, Solver, TriangleMesh};
//! use glam::Vec3;
//!
//! let mesh = TriangleMesh::icosphere(1.0, 1);
//! let mut solver = Solver::default();
//! solver.init_from_geometry(&mesh.as_geometry(), &BodyConfig::default()).unwrap();
//!
//! solver.apply_impact(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, -2.0, 0.0), 0.5, 1.0);
//! solver.step(1.0 / 60.0);
//! solver.enforce_floor_collision();
//!
//! assert_eq!(solver.positions().len(), mesh.positions.len());
//! ```

pub mod collision;
pub mod config;
pub mod constraints;
pub mod error;
pub mod forces;
pub mod geometry;
pub mod materials;
pub mod math;
pub mod particle;
pub mod shapes;
pub mod solver;

pub use config::{BodyConfig, ConfigUpdate, ImpactReplay, PhysicsConfig};
pub use constraints::{Constraint, ConstraintKind, DistanceConstraint, PressureConstraint};
pub use error::SolverError;
pub use forces::Impact;
pub use geometry::MeshGeometry;
pub use materials::BodyPreset;
pub use particle::{Particle, ParticleSet};
pub use shapes::TriangleMesh;
pub use solver::{Solver, VolumeSample};
