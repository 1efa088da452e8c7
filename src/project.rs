//! Projection of planar polygons embedded in 3D into the 2D form the
//! triangulator accepts.

use num_traits::Float;

/// Best-fit plane normal of a ring by Newell's method, normalized.
/// `None` for fewer than three vertices or a vanishing normal.
fn plane_normal<T: Float>(ring: &[[T; 3]]) -> Option<[T; 3]> {
    if ring.len() < 3 {
        return None;
    }

    let mut nx = T::zero();
    let mut ny = T::zero();
    let mut nz = T::zero();
    let mut prev = ring[ring.len() - 1];
    for &cur in ring {
        nx = nx + (prev[1] - cur[1]) * (prev[2] + cur[2]);
        ny = ny + (prev[2] - cur[2]) * (prev[0] + cur[0]);
        nz = nz + (prev[0] - cur[0]) * (prev[1] + cur[1]);
        prev = cur;
    }

    let len = (nx * nx + ny * ny + nz * nz).sqrt();
    if len < T::from(1e-30).unwrap() {
        return None;
    }
    Some([nx / len, ny / len, nz / len])
}

/// Map a polygon lying in some 3D plane onto 2D, preserving its winding.
///
/// The plane is estimated from the first `outer_len` vertices (the outer
/// ring); all vertices are then projected and appended to `out`. A
/// near-vertical normal turns into a plain axis drop (mirrored when the
/// normal points down); anything else goes through the rotation taking the
/// normal to +z. Returns `false`, leaving `out` untouched, when no plane
/// can be estimated.
pub fn project_to_plane<T: Float>(
    vertices: &[[T; 3]],
    outer_len: usize,
    out: &mut Vec<[T; 2]>,
) -> bool {
    let Some([nx, ny, nz]) = plane_normal(&vertices[..outer_len]) else {
        return false;
    };
    out.clear();

    let d = (nx * nx + ny * ny).sqrt();
    if d < T::from(1e-15).unwrap() {
        if nz > T::zero() {
            out.extend(vertices.iter().map(|v| [v[0], v[1]]));
        } else {
            // seen from below; swap axes to keep the winding
            out.extend(vertices.iter().map(|v| [v[1], v[0]]));
        }
        return true;
    }

    // rotate about the in-plane axis perpendicular to the normal's
    // horizontal part, by the angle between the normal and +z
    let ax = -ny / d;
    let ay = nx / d;
    let theta = nz.acos();
    let (sin_t, cos_t) = (theta.sin(), theta.cos());
    let omc = T::one() - cos_t;

    let m11 = ax * ax * omc + cos_t;
    let m12 = ax * ay * omc;
    let m13 = -(ay * sin_t);
    let m21 = m12;
    let m22 = ay * ay * omc + cos_t;
    let m23 = ax * sin_t;

    out.extend(vertices.iter().map(|&[x, y, z]| {
        [
            x * m11 + y * m12 + z * m13,
            x * m21 + y * m22 + z * m23,
        ]
    }));
    true
}
