//! Degenerate-triangle detection.

use nalgebra::Point3;
use tracing::debug;

use crate::buffers::MeshBuffers;
use crate::error::{DiagnosticsResult, PrimitiveKind};
use crate::params::IndexPolicy;
use crate::report::CheckOutcome;

/// Absolute area below which a triangle counts as degenerate.
///
/// Fixed rather than configurable, so a collapsed triangle such as `(i, i, i)`
/// is always reported.
pub const DEGENERATE_AREA_THRESHOLD: f64 = 1e-6;

/// Count triangles whose area is strictly below [`DEGENERATE_AREA_THRESHOLD`].
///
/// Triangle indices are resolved against the positions in their original
/// buffer order. The cutoff is absolute, not relative to mesh scale.
///
/// # Errors
///
/// Returns [`DiagnosticsError::IndexOutOfRange`](crate::DiagnosticsError::IndexOutOfRange)
/// under [`IndexPolicy::Reject`].
///
/// # Example
///
/// ```
/// use mesh_diagnostics::{IndexPolicy, MeshBuffers, count_degenerate_triangles};
///
/// let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 1.0, 0.0];
/// // (0, 1, 2) is collinear, (0, 1, 3) is not.
/// let triangles = [0, 1, 2, 0, 1, 3];
/// let buffers = MeshBuffers::new(&positions, &[], &triangles).unwrap();
///
/// let outcome = count_degenerate_triangles(&buffers, IndexPolicy::Skip).unwrap();
/// assert_eq!(outcome.count, 1);
/// ```
pub fn count_degenerate_triangles(
    buffers: &MeshBuffers<'_>,
    policy: IndexPolicy,
) -> DiagnosticsResult<CheckOutcome> {
    let mut degenerate = 0;
    let mut skipped = 0;

    for (position, tri) in buffers.triangles().enumerate() {
        if !buffers.admit(PrimitiveKind::Triangle, position, &tri, policy)? {
            skipped += 1;
            continue;
        }
        // Admitted, so every corner is in range.
        let [p0, p1, p2] = tri.map(|i| buffers.admitted_position(i));
        if triangle_area(&p0, &p1, &p2) < DEGENERATE_AREA_THRESHOLD {
            degenerate += 1;
        }
    }

    debug!(
        triangles = buffers.triangle_count(),
        degenerate, skipped, "Degenerate triangle scan complete"
    );
    Ok(CheckOutcome {
        count: degenerate,
        skipped,
    })
}

/// Area of the triangle `(p0, p1, p2)`: half the norm of the edge cross product.
#[inline]
#[must_use]
pub fn triangle_area(p0: &Point3<f64>, p1: &Point3<f64>, p2: &Point3<f64>) -> f64 {
    (p1 - p0).cross(&(p2 - p0)).norm() * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // Right triangle with legs 10, a collinear point, and a near-coincident one.
    const POSITIONS: [f64; 15] = [
        0.0, 0.0, 0.0, //
        10.0, 0.0, 0.0, //
        0.0, 10.0, 0.0, //
        5.0, 0.0, 0.0, //
        0.0, 0.0, 1e-9,
    ];

    fn degenerate(triangles: &[u32]) -> CheckOutcome {
        let buffers = MeshBuffers::new(&POSITIONS, &[], triangles).unwrap();
        count_degenerate_triangles(&buffers, IndexPolicy::Skip).unwrap()
    }

    #[test]
    fn area_of_right_triangle() {
        let area = triangle_area(
            &Point3::new(0.0, 0.0, 0.0),
            &Point3::new(10.0, 0.0, 0.0),
            &Point3::new(0.0, 10.0, 0.0),
        );
        assert_relative_eq!(area, 50.0);
    }

    #[test]
    fn well_formed_triangle() {
        assert_eq!(degenerate(&[0, 1, 2]).count, 0);
    }

    #[test]
    fn collinear_triangle() {
        assert_eq!(degenerate(&[0, 1, 3]).count, 1);
    }

    #[test]
    fn near_coincident_vertices() {
        assert_eq!(degenerate(&[0, 4, 1]).count, 1);
    }

    #[test]
    fn collapsed_triangle_always_degenerate() {
        for i in 0..5 {
            assert_eq!(degenerate(&[i, i, i]).count, 1);
        }
    }

    #[test]
    fn small_but_valid_triangle() {
        // Area 5e-5 is above the cutoff.
        let positions = [0.0, 0.0, 0.0, 0.01, 0.0, 0.0, 0.0, 0.01, 0.0];
        let buffers = MeshBuffers::new(&positions, &[], &[0, 1, 2]).unwrap();
        let outcome = count_degenerate_triangles(&buffers, IndexPolicy::Skip).unwrap();
        assert_eq!(outcome.count, 0);
    }

    #[test]
    fn uses_original_vertex_order() {
        // Sorted, these positions would read (0,0,0) (0,0,0) (0,1,0) for the
        // same indices, which is collapsed.
        let positions = [
            0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, //
            1.0, 0.0, 0.0, //
            0.0, 0.0, 0.0,
        ];
        let buffers = MeshBuffers::new(&positions, &[], &[0, 1, 2]).unwrap();
        let outcome = count_degenerate_triangles(&buffers, IndexPolicy::Skip).unwrap();
        assert_eq!(outcome.count, 0);
    }

    #[test]
    fn out_of_range_triangle_skipped() {
        let outcome = degenerate(&[0, 1, 2, 0, 1, 99]);
        assert_eq!(outcome.count, 0);
        assert_eq!(outcome.skipped, 1);
    }

    #[test]
    fn out_of_range_triangle_rejected() {
        let buffers = MeshBuffers::new(&POSITIONS, &[], &[0, 1, 99]).unwrap();
        assert!(count_degenerate_triangles(&buffers, IndexPolicy::Reject).is_err());
    }
}
