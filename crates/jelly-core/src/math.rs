use glam::Vec3;

/// Signed volume of the tetrahedron spanned by the origin and a triangle:
/// `v0 · (v1 × v2) / 6`. Positive for triangles wound counter-clockwise
/// when seen from outside.
#[inline]
pub fn signed_tetra_volume(v0: Vec3, v1: Vec3, v2: Vec3) -> f32 {
    v0.dot(v1.cross(v2)) / 6.0
}

/// Non-normalized face normal `(v1 - v0) × (v2 - v0)`. Its length is twice
/// the triangle area.
#[inline]
pub fn face_normal(v0: Vec3, v1: Vec3, v2: Vec3) -> Vec3 {
    (v1 - v0).cross(v2 - v0)
}

/// Mean of a set of points. Returns `Vec3::ZERO` for an empty set.
pub fn centroid(points: impl IntoIterator<Item = Vec3>) -> Vec3 {
    let (sum, n) = points
        .into_iter()
        .fold((Vec3::ZERO, 0u32), |(sum, n), p| (sum + p, n + 1));
    if n == 0 {
        Vec3::ZERO
    } else {
        sum / n as f32
    }
}
