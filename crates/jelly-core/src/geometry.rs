//! Adapter between raw vertex/index buffers and solver topology.

use std::collections::HashSet;

use glam::Vec3;

use crate::error::SolverError;

/// Raw buffers handed over by the geometry provider.
#[derive(Clone, Copy, Debug, Default)]
pub struct MeshGeometry<'a> {
    /// Flat `x, y, z` vertex positions. `None` if the mesh has no position
    /// attribute.
    pub positions: Option<&'a [f32]>,
    /// Flat triangle indices. `None` for non-indexed geometry, where every
    /// three consecutive vertices form a triangle.
    pub indices: Option<&'a [u32]>,
}

impl<'a> MeshGeometry<'a> {
    pub fn new(positions: &'a [f32], indices: &'a [u32]) -> Self {
        Self {
            positions: Some(positions),
            indices: Some(indices),
        }
    }

    pub fn non_indexed(positions: &'a [f32]) -> Self {
        Self {
            positions: Some(positions),
            indices: None,
        }
    }
}

/// Validated topology ready to become particles and constraints.
#[derive(Clone, Debug, PartialEq)]
pub struct Topology {
    pub vertices: Vec<Vec3>,
    pub triangles: Vec<[u32; 3]>,
    /// Unique undirected edges as `(min, max)`, in first-seen order.
    pub edges: Vec<(u32, u32)>,
}

impl Topology {
    /// Validate the buffers and extract vertices, triangles and edges.
    pub fn from_geometry(geometry: &MeshGeometry<'_>) -> Result<Self, SolverError> {
        let positions = match geometry.positions {
            Some(p) if !p.is_empty() => p,
            _ => return Err(SolverError::MissingPositions),
        };
        if positions.len() % 3 != 0 {
            return Err(SolverError::MalformedPositions {
                len: positions.len(),
            });
        }
        let vertices: Vec<Vec3> = positions.chunks_exact(3).map(Vec3::from_slice).collect();
        let vertex_count = vertices.len();

        let triangles = match geometry.indices {
            Some(indices) => triangles_from_indices(indices, vertex_count)?,
            None => (0..(vertex_count / 3) as u32)
                .map(|t| [3 * t, 3 * t + 1, 3 * t + 2])
                .collect(),
        };
        let edges = unique_edges(&triangles);

        Ok(Self {
            vertices,
            triangles,
            edges,
        })
    }
}

fn triangles_from_indices(indices: &[u32], vertex_count: usize) -> Result<Vec<[u32; 3]>, SolverError> {
    if indices.len() % 3 != 0 {
        return Err(SolverError::MalformedIndices { len: indices.len() });
    }
    if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertex_count) {
        return Err(SolverError::IndexOutOfRange {
            index,
            vertex_count,
        });
    }
    Ok(indices
        .chunks_exact(3)
        .map(|t| [t[0], t[1], t[2]])
        .collect())
}

/// Deduplicate triangle edges. Each undirected edge appears once, keyed
/// `(min, max)`, ordered by first appearance.
pub fn unique_edges(triangles: &[[u32; 3]]) -> Vec<(u32, u32)> {
    let mut seen = HashSet::with_capacity(triangles.len() * 3 / 2);
    let mut edges = Vec::with_capacity(triangles.len() * 3 / 2);
    for &[a, b, c] in triangles {
        for (u, v) in [(a, b), (b, c), (c, a)] {
            let key = (u.min(v), u.max(v));
            if seen.insert(key) {
                edges.push(key);
            }
        }
    }
    edges
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_edge_counted_once() {
        let edges = unique_edges(&[[0, 1, 2], [2, 1, 3]]);
        assert_eq!(edges, vec![(0, 1), (1, 2), (0, 2), (1, 3), (2, 3)]);
    }

    #[test]
    fn test_non_indexed_triangles_are_sequential() {
        let positions = [0.0; 18];
        let topo = Topology::from_geometry(&MeshGeometry::non_indexed(&positions)).unwrap();
        assert_eq!(topo.triangles, vec![[0, 1, 2], [3, 4, 5]]);
    }
}
