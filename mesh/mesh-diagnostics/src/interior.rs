//! Interior-edge detection.
//!
//! Uses raw edge reuse as a proxy for faces sharing an edge. The count is of
//! edges, reported against the vertex population.

use tracing::debug;

use crate::adjacency::EdgeUsage;
use crate::buffers::MeshBuffers;
use crate::error::{DiagnosticsResult, PrimitiveKind};
use crate::params::IndexPolicy;
use crate::report::CheckOutcome;

/// Count distinct undirected edges that occur more than once in the edge list.
///
/// # Errors
///
/// Returns [`DiagnosticsError::IndexOutOfRange`](crate::DiagnosticsError::IndexOutOfRange)
/// under [`IndexPolicy::Reject`].
///
/// # Example
///
/// ```
/// use mesh_diagnostics::{IndexPolicy, MeshBuffers, count_interior_edges};
///
/// let positions = [0.0; 12];
/// // Two triangles sharing edge (1, 2).
/// let edges = [0, 1, 1, 2, 2, 0, 1, 3, 3, 2, 2, 1];
/// let buffers = MeshBuffers::new(&positions, &edges, &[]).unwrap();
///
/// let outcome = count_interior_edges(&buffers, IndexPolicy::Skip).unwrap();
/// assert_eq!(outcome.count, 1);
/// ```
pub fn count_interior_edges(
    buffers: &MeshBuffers<'_>,
    policy: IndexPolicy,
) -> DiagnosticsResult<CheckOutcome> {
    let (usage, skipped) = edge_usage(buffers, policy)?;
    let interior = usage.shared_edge_count();

    debug!(
        distinct_edges = usage.edge_count(),
        interior, skipped, "Interior edge scan complete"
    );
    Ok(CheckOutcome {
        count: interior,
        skipped,
    })
}

/// Build the usage map over every admitted edge, returning it with the number
/// of skipped edges.
pub(crate) fn edge_usage(
    buffers: &MeshBuffers<'_>,
    policy: IndexPolicy,
) -> DiagnosticsResult<(EdgeUsage, usize)> {
    let mut usage = EdgeUsage::new();
    let mut skipped = 0;

    for (position, (v1, v2)) in buffers.edges().enumerate() {
        if buffers.admit(PrimitiveKind::Edge, position, &[v1, v2], policy)? {
            usage.record(v1, v2);
        } else {
            skipped += 1;
        }
    }

    Ok((usage, skipped))
}
