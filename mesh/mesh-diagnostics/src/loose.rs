//! Loose-vertex detection.

use tracing::debug;

use crate::buffers::MeshBuffers;
use crate::error::{DiagnosticsResult, PrimitiveKind};
use crate::params::IndexPolicy;
use crate::report::CheckOutcome;

/// Count vertices that appear in no edge of the edge list.
///
/// Each edge adds one to the degree of both endpoints; a self-loop adds two to
/// the same vertex. Edges with an out-of-range endpoint are handled by
/// `policy` and never touch the degree table.
///
/// # Errors
///
/// Returns [`DiagnosticsError::IndexOutOfRange`](crate::DiagnosticsError::IndexOutOfRange)
/// under [`IndexPolicy::Reject`].
///
/// # Example
///
/// ```
/// use mesh_diagnostics::{IndexPolicy, MeshBuffers, count_loose_vertices};
///
/// let positions = [0.0; 12];
/// let edges = [0, 1, 1, 2];
/// let buffers = MeshBuffers::new(&positions, &edges, &[]).unwrap();
///
/// let outcome = count_loose_vertices(&buffers, IndexPolicy::Skip).unwrap();
/// assert_eq!(outcome.count, 1); // vertex 3
/// ```
pub fn count_loose_vertices(
    buffers: &MeshBuffers<'_>,
    policy: IndexPolicy,
) -> DiagnosticsResult<CheckOutcome> {
    let degrees = vertex_degrees(buffers, policy)?;
    let loose = degrees.counts.iter().filter(|&&d| d == 0).count();

    debug!(
        vertices = degrees.counts.len(),
        loose,
        skipped = degrees.skipped,
        "Loose vertex scan complete"
    );
    Ok(CheckOutcome {
        count: loose,
        skipped: degrees.skipped,
    })
}

struct Degrees {
    counts: Vec<u32>,
    skipped: usize,
}

fn vertex_degrees(buffers: &MeshBuffers<'_>, policy: IndexPolicy) -> DiagnosticsResult<Degrees> {
    let mut counts = vec![0u32; buffers.vertex_count()];
    let mut skipped = 0;

    for (position, (v1, v2)) in buffers.edges().enumerate() {
        if !buffers.admit(PrimitiveKind::Edge, position, &[v1, v2], policy)? {
            skipped += 1;
            continue;
        }
        counts[v1 as usize] = counts[v1 as usize].saturating_add(1);
        counts[v2 as usize] = counts[v2 as usize].saturating_add(1);
    }

    Ok(Degrees { counts, skipped })
}
