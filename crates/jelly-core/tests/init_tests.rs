use glam::Vec3;
use jelly_core::{
    BodyConfig, Constraint, MeshGeometry, Solver, SolverError, TriangleMesh,
};

fn cube_body(total_mass: f32, edge_stiffness: f32) -> (Solver, TriangleMesh) {
    let mesh = TriangleMesh::cube(0.5);
    let body = BodyConfig {
        total_mass,
        edge_stiffness,
        ..BodyConfig::default()
    };
    let mut solver = Solver::default();
    solver.init_from_geometry(&mesh.as_geometry(), &body).unwrap();
    (solver, mesh)
}

#[test]
fn test_cube_topology() {
    let (solver, _) = cube_body(1.0, 0.9);

    assert_eq!(solver.particle_count(), 8);
    // 12 cube edges + 6 face diagonals, then one pressure constraint.
    assert_eq!(solver.constraint_count(), 19);
    let distance_count = solver
        .constraints
        .iter()
        .filter(|c| matches!(c, Constraint::Distance(_)))
        .count();
    assert_eq!(distance_count, 18);
    assert!(matches!(solver.constraints.last(), Some(Constraint::Pressure(_))));
}

#[test]
fn test_uniform_mass_distribution() {
    let (solver, _) = cube_body(2.0, 0.9);
    for i in 0..8u32 {
        assert_eq!(solver.get_particle(i).unwrap().inv_mass, 4.0);
    }
}

#[test]
fn test_particles_start_at_rest() {
    let (solver, mesh) = cube_body(1.0, 0.9);

    assert_eq!(solver.positions(), &mesh.positions[..]);
    for i in 0..8u32 {
        let p = solver.get_particle(i).unwrap();
        assert_eq!(p.position, p.prev_position);
        assert_eq!(p.position, p.rest_position);
        assert_eq!(p.velocity, Vec3::ZERO);
    }
    assert!(solver.displacements().iter().all(|&d| d == 0.0));
}

#[test]
fn test_edge_rest_lengths_and_compliance() {
    let (solver, _) = cube_body(1.0, 0.75);
    let diagonal = 2.0_f32.sqrt();

    for c in &solver.constraints {
        if let Constraint::Distance(d) = c {
            let is_side = (d.rest_length - 1.0).abs() < 1e-6;
            let is_diagonal = (d.rest_length - diagonal).abs() < 1e-6;
            assert!(is_side || is_diagonal, "unexpected rest length {}", d.rest_length);
            assert!((d.compliance - 2.5e-5).abs() < 1e-10, "compliance {}", d.compliance);
            assert!(d.i < d.j, "edge keys are (min, max)");
        }
    }
}

#[test]
fn test_full_stiffness_gives_rigid_edges() {
    let (solver, _) = cube_body(1.0, 1.0);
    for c in &solver.constraints {
        if let Constraint::Distance(d) = c {
            assert_eq!(d.compliance, 0.0);
        }
    }
}

#[test]
fn test_pressure_constraint_covers_surface() {
    let (solver, _) = cube_body(1.0, 0.9);
    let Some(Constraint::Pressure(p)) = solver.constraints.last() else {
        panic!("last constraint should be the pressure constraint");
    };

    assert_eq!(p.particle_ids, (0..8).collect::<Vec<u32>>());
    assert_eq!(p.triangles.len(), 12);
    assert_eq!(p.triangles[0], [0, 2, 1]);
    assert!((p.rest_volume - 1.0).abs() < 1e-5);
    assert_eq!(p.pressure, BodyConfig::default().pressure);

    let volume = solver.pressure_volume().unwrap();
    assert!(volume.relative_error() < 1e-5);
}

#[test]
fn test_inward_wound_mesh_has_positive_rest_volume() {
    let mut mesh = TriangleMesh::cube(0.5);
    for tri in mesh.indices.chunks_exact_mut(3) {
        tri.swap(1, 2);
    }
    let mut solver = Solver::default();
    solver
        .init_from_geometry(&mesh.as_geometry(), &BodyConfig::default())
        .unwrap();

    let volume = solver.pressure_volume().unwrap();
    assert!((volume.rest - 1.0).abs() < 1e-5, "rest volume is unsigned");
    assert!(volume.current < 0.0, "current volume keeps its sign");
}

#[test]
fn test_engine_config_pushed() {
    let mesh = TriangleMesh::cube(0.5);
    let mut body = BodyConfig {
        gravity_enabled: false,
        ..BodyConfig::default()
    };
    body.physics.substeps = 12;
    body.physics.global_damping = 0.95;
    body.physics.floor_y = -4.0;

    let mut solver = Solver::default();
    solver.init_from_geometry(&mesh.as_geometry(), &body).unwrap();

    assert_eq!(solver.config.substeps, 12);
    assert_eq!(solver.config.global_damping, 0.95);
    assert_eq!(solver.config.floor_y, -4.0);
    assert_eq!(solver.config.gravity, Vec3::ZERO);
}

#[test]
fn test_non_indexed_geometry() {
    let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
    let mut solver = Solver::default();
    solver
        .init_from_geometry(&MeshGeometry::non_indexed(&positions), &BodyConfig::default())
        .unwrap();

    assert_eq!(solver.particle_count(), 3);
    // 3 edges + pressure over a flat (zero-volume) surface.
    assert_eq!(solver.constraint_count(), 4);
    assert_eq!(solver.pressure_volume().unwrap().rest, 0.0);

    solver.step(1.0 / 60.0);
    assert!(solver.positions().iter().all(|x| x.is_finite()));
}

#[test]
fn test_missing_positions_rejected() {
    let mut solver = Solver::default();
    let err = solver
        .init_from_geometry(&MeshGeometry::default(), &BodyConfig::default())
        .unwrap_err();

    assert_eq!(err, SolverError::MissingPositions);
    assert!(!solver.is_ready());

    let empty: [f32; 0] = [];
    let err = solver
        .init_from_geometry(&MeshGeometry::new(&empty, &[]), &BodyConfig::default())
        .unwrap_err();
    assert_eq!(err, SolverError::MissingPositions);
}

#[test]
fn test_failed_init_leaves_no_partial_state() {
    let (mut solver, mesh) = cube_body(1.0, 0.9);
    assert!(solver.is_ready());

    let bad_indices = [0, 1, 8];
    let geometry = MeshGeometry::new(&mesh.positions, &bad_indices);
    let err = solver
        .init_from_geometry(&geometry, &BodyConfig::default())
        .unwrap_err();

    assert_eq!(
        err,
        SolverError::IndexOutOfRange {
            index: 8,
            vertex_count: 8
        }
    );
    assert!(!solver.is_ready());
    assert_eq!(solver.constraint_count(), 0);
}

#[test]
fn test_malformed_buffers_rejected() {
    let mut solver = Solver::default();
    let positions = [0.0; 7];
    assert_eq!(
        solver.init_from_geometry(&MeshGeometry::non_indexed(&positions), &BodyConfig::default()),
        Err(SolverError::MalformedPositions { len: 7 })
    );

    let positions = [0.0; 9];
    let indices = [0, 1];
    assert_eq!(
        solver.init_from_geometry(&MeshGeometry::new(&positions, &indices), &BodyConfig::default()),
        Err(SolverError::MalformedIndices { len: 2 })
    );
}

#[test]
fn test_invalid_body_parameters_rejected() {
    let mesh = TriangleMesh::cube(0.5);
    let mut solver = Solver::default();

    let body = BodyConfig {
        total_mass: 0.0,
        ..BodyConfig::default()
    };
    assert_eq!(
        solver.init_from_geometry(&mesh.as_geometry(), &body),
        Err(SolverError::InvalidMass)
    );

    let body = BodyConfig {
        edge_stiffness: 1.5,
        ..BodyConfig::default()
    };
    assert_eq!(
        solver.init_from_geometry(&mesh.as_geometry(), &body),
        Err(SolverError::InvalidStiffness)
    );
}

#[test]
fn test_error_messages() {
    assert_eq!(
        SolverError::MissingPositions.to_string(),
        "geometry has no position attribute"
    );
    assert_eq!(
        SolverError::IndexOutOfRange { index: 9, vertex_count: 4 }.to_string(),
        "vertex index 9 out of range (count: 4)"
    );
}

#[test]
fn test_reinit_replaces_previous_body() {
    let (mut solver, _) = cube_body(1.0, 0.9);
    let sphere = TriangleMesh::icosphere(1.0, 1);

    solver
        .init_from_geometry(&sphere.as_geometry(), &BodyConfig::default())
        .unwrap();

    assert_eq!(solver.particle_count(), sphere.vertex_count());
    let pressure_count = solver
        .constraints
        .iter()
        .filter(|c| matches!(c, Constraint::Pressure(_)))
        .count();
    assert_eq!(pressure_count, 1);
}
