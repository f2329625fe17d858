//! Closed primitive meshes with outward (counter-clockwise) winding.

use std::collections::HashMap;

use glam::Vec3;

use crate::geometry::MeshGeometry;

/// Owned vertex/index buffers in the layout the geometry provider uses.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TriangleMesh {
    pub positions: Vec<f32>,
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    /// Axis-aligned cube centered at the origin: 8 vertices, 12 triangles.
    ///
    /// Vertex `i` sits at `(±h, ±h, ±h)` with bit 0 selecting +x, bit 1 +y
    /// and bit 2 +z.
    pub fn cube(half_extent: f32) -> Self {
        let h = half_extent;
        let positions = (0..8u32)
            .flat_map(|i| {
                let sign = |bit: u32| if i & bit != 0 { h } else { -h };
                [sign(1), sign(2), sign(4)]
            })
            .collect();
        #[rustfmt::skip]
        let indices = vec![
            0, 2, 1,  1, 2, 3, // -z
            4, 5, 6,  5, 7, 6, // +z
            0, 1, 5,  0, 5, 4, // -y
            2, 6, 7,  2, 7, 3, // +y
            0, 4, 6,  0, 6, 2, // -x
            1, 3, 7,  1, 7, 5, // +x
        ];
        Self { positions, indices }
    }

    /// Geodesic sphere from a subdivided icosahedron.
    ///
    /// `subdivisions = 0` gives the 12-vertex icosahedron; each level
    /// splits every triangle into four.
    pub fn icosphere(radius: f32, subdivisions: u32) -> Self {
        let t = (1.0 + 5.0_f32.sqrt()) / 2.0;
        let mut vertices: Vec<Vec3> = [
            (-1.0, t, 0.0),
            (1.0, t, 0.0),
            (-1.0, -t, 0.0),
            (1.0, -t, 0.0),
            (0.0, -1.0, t),
            (0.0, 1.0, t),
            (0.0, -1.0, -t),
            (0.0, 1.0, -t),
            (t, 0.0, -1.0),
            (t, 0.0, 1.0),
            (-t, 0.0, -1.0),
            (-t, 0.0, 1.0),
        ]
        .iter()
        .map(|&(x, y, z)| Vec3::new(x, y, z).normalize())
        .collect();

        let mut faces: Vec<[u32; 3]> = vec![
            [0, 11, 5], [0, 5, 1], [0, 1, 7], [0, 7, 10], [0, 10, 11],
            [1, 5, 9], [5, 11, 4], [11, 10, 2], [10, 7, 6], [7, 1, 8],
            [3, 9, 4], [3, 4, 2], [3, 2, 6], [3, 6, 8], [3, 8, 9],
            [4, 9, 5], [2, 4, 11], [6, 2, 10], [8, 6, 7], [9, 8, 1],
        ];

        for _ in 0..subdivisions {
            let mut midpoints: HashMap<(u32, u32), u32> = HashMap::new();
            let mut midpoint = |a: u32, b: u32, vertices: &mut Vec<Vec3>| -> u32 {
                *midpoints.entry((a.min(b), a.max(b))).or_insert_with(|| {
                    let m = (vertices[a as usize] + vertices[b as usize]).normalize();
                    vertices.push(m);
                    (vertices.len() - 1) as u32
                })
            };

            let mut next = Vec::with_capacity(faces.len() * 4);
            for &[a, b, c] in &faces {
                let ab = midpoint(a, b, &mut vertices);
                let bc = midpoint(b, c, &mut vertices);
                let ca = midpoint(c, a, &mut vertices);
                next.extend_from_slice(&[[a, ab, ca], [b, bc, ab], [c, ca, bc], [ab, bc, ca]]);
            }
            faces = next;
        }

        Self {
            positions: vertices
                .iter()
                .flat_map(|v| (*v * radius).to_array())
                .collect(),
            indices: faces.into_iter().flatten().collect(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn as_geometry(&self) -> MeshGeometry<'_> {
        MeshGeometry::new(&self.positions, &self.indices)
    }
}
