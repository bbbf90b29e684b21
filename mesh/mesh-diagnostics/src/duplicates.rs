//! Duplicate-vertex detection.
//!
//! Sorts a copy of the positions lexicographically and compares each vertex
//! with its immediate successor. This is a single-pass approximation: a
//! cluster of three or more mutually close vertices is only counted where the
//! members end up adjacent in sorted order.

use std::cmp::Ordering;

use nalgebra::Point3;
use tracing::debug;

use crate::buffers::MeshBuffers;

/// Count vertices closer than `threshold` to their sorted predecessor.
///
/// The comparison is strict, so `threshold = 0.0` never reports a duplicate.
/// Fewer than two vertices yields `0` without scanning.
///
/// # Example
///
/// ```
/// use mesh_diagnostics::{MeshBuffers, count_duplicate_vertices};
///
/// let positions = [0.0, 0.0, 0.0, 5.0, 5.0, 5.0, 0.0, 0.0, 0.0];
/// let buffers = MeshBuffers::new(&positions, &[], &[]).unwrap();
///
/// assert_eq!(count_duplicate_vertices(&buffers, 1e-4), 1);
/// assert_eq!(count_duplicate_vertices(&buffers, 0.0), 0);
/// ```
#[must_use]
pub fn count_duplicate_vertices(buffers: &MeshBuffers<'_>, threshold: f64) -> usize {
    if buffers.vertex_count() < 2 {
        return 0;
    }

    let mut sorted: Vec<Point3<f64>> = buffers.positions().collect();
    sorted.sort_unstable_by(lexicographic);

    let duplicates = sorted
        .windows(2)
        .filter(|pair| nalgebra::distance(&pair[0], &pair[1]) < threshold)
        .count();

    debug!(
        vertices = sorted.len(),
        duplicates, threshold, "Duplicate vertex scan complete"
    );
    duplicates
}

/// Total order on `(x, y, z)`, ties on `x` broken by `y`, then `z`.
fn lexicographic(a: &Point3<f64>, b: &Point3<f64>) -> Ordering {
    a.x.total_cmp(&b.x)
        .then_with(|| a.y.total_cmp(&b.y))
        .then_with(|| a.z.total_cmp(&b.z))
}
