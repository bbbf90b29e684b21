//! Diagnostics entry points.
//!
//! The four checks read the same buffers and nothing else, so they may run in
//! any order or concurrently without changing the result.

use tracing::debug;

use crate::buffers::MeshBuffers;
use crate::degenerate::count_degenerate_triangles;
use crate::duplicates::count_duplicate_vertices;
use crate::error::{DiagnosticsResult, PrimitiveKind};
use crate::interior::count_interior_edges;
use crate::loose::count_loose_vertices;
use crate::params::DiagnosticsParams;
use crate::report::{CheckOutcome, DiagnosticsReport, Metric};
use crate::sink::{DiagnosticSink, ReportEvent};

/// Compute the diagnostics report for one mesh snapshot.
///
/// # Errors
///
/// Returns an error if the parameters are invalid, or if an index is out of
/// range under [`IndexPolicy::Reject`](crate::IndexPolicy::Reject).
///
/// # Example
///
/// ```
/// use mesh_diagnostics::{DiagnosticsParams, MeshBuffers, analyze_mesh};
///
/// let positions = [
///     0.0, 0.0, 0.0, //
///     0.0, 0.0, 0.0, //
///     1.0, 0.0, 0.0, //
///     0.0, 1.0, 0.0,
/// ];
/// let edges = [0, 2, 2, 3, 3, 0];
/// let triangles = [0, 2, 3];
/// let buffers = MeshBuffers::new(&positions, &edges, &triangles).unwrap();
///
/// let params = DiagnosticsParams::default().duplicate_threshold(1e-4);
/// let report = analyze_mesh(&buffers, &params).unwrap();
///
/// assert_eq!(report.duplicate_vertices.count, 1);
/// assert_eq!(report.loose_vertices.count, 1);
/// assert_eq!(report.interior_edges.count, 0);
/// assert_eq!(report.degenerate_triangles.count, 0);
/// ```
pub fn analyze_mesh(
    buffers: &MeshBuffers<'_>,
    params: &DiagnosticsParams,
) -> DiagnosticsResult<DiagnosticsReport> {
    params.validate()?;

    let (duplicates, loose, interior, degenerate) = if params.parallel {
        let ((duplicates, loose), (interior, degenerate)) = rayon::join(
            || {
                rayon::join(
                    || count_duplicate_vertices(buffers, params.duplicate_threshold),
                    || count_loose_vertices(buffers, params.index_policy),
                )
            },
            || {
                rayon::join(
                    || count_interior_edges(buffers, params.index_policy),
                    || count_degenerate_triangles(buffers, params.index_policy),
                )
            },
        );
        (duplicates, loose, interior, degenerate)
    } else {
        (
            count_duplicate_vertices(buffers, params.duplicate_threshold),
            count_loose_vertices(buffers, params.index_policy),
            count_interior_edges(buffers, params.index_policy),
            count_degenerate_triangles(buffers, params.index_policy),
        )
    };

    Ok(assemble(buffers, params, duplicates, loose?, interior?, degenerate?))
}

fn assemble(
    buffers: &MeshBuffers<'_>,
    params: &DiagnosticsParams,
    duplicates: usize,
    loose: CheckOutcome,
    interior: CheckOutcome,
    degenerate: CheckOutcome,
) -> DiagnosticsReport {
    let vertex_count = buffers.vertex_count();
    let triangle_count = buffers.triangle_count();

    // Loose and interior apply the same policy to the same edge list.
    debug_assert_eq!(loose.skipped, interior.skipped);

    DiagnosticsReport {
        vertex_count,
        edge_count: buffers.edge_count(),
        triangle_count,
        duplicate_threshold: params.duplicate_threshold,
        duplicate_vertices: Metric::new(duplicates, vertex_count),
        loose_vertices: Metric::new(loose.count, vertex_count),
        interior_edges: Metric::new(interior.count, vertex_count),
        degenerate_triangles: Metric::new(degenerate.count, triangle_count),
        skipped_edges: loose.skipped,
        skipped_triangles: degenerate.skipped,
    }
}

/// Run the diagnostics and publish the result to `sink`.
///
/// On success the sink receives `Started`, the four `Metric` events in report
/// order, a `Skipped` event per primitive list with ignored entries, and
/// `Completed`. On failure it receives a single `Failed` event and nothing is
/// reported.
///
/// # Example
///
/// ```
/// use mesh_diagnostics::{DiagnosticsParams, MeshBuffers, ReportEvent, report_mesh};
///
/// let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0];
/// let buffers = MeshBuffers::new(&positions, &[0, 1], &[]).unwrap();
///
/// let mut events: Vec<ReportEvent> = Vec::new();
/// report_mesh(&buffers, &DiagnosticsParams::default(), &mut events);
///
/// assert_eq!(events.len(), 6);
/// assert_eq!(events.last(), Some(&ReportEvent::Completed));
/// ```
pub fn report_mesh(
    buffers: &MeshBuffers<'_>,
    params: &DiagnosticsParams,
    mut sink: impl DiagnosticSink,
) {
    match analyze_mesh(buffers, params) {
        Ok(report) => publish(&report, &mut sink),
        Err(err) => sink.emit(ReportEvent::Failed {
            message: err.to_string(),
        }),
    }
}

/// Like [`report_mesh`], but accepts buffers that may be missing.
///
/// A missing buffer, or one whose length is not a whole number of elements,
/// aborts with a single `Failed` event before any computation.
///
/// # Example
///
/// ```
/// use mesh_diagnostics::{DiagnosticsParams, ReportEvent, report_from_raw};
///
/// let mut events: Vec<ReportEvent> = Vec::new();
/// report_from_raw(None, Some(&[]), Some(&[]), &DiagnosticsParams::default(), &mut events);
///
/// assert!(matches!(events.as_slice(), [ReportEvent::Failed { .. }]));
/// ```
pub fn report_from_raw(
    positions: Option<&[f64]>,
    edges: Option<&[u32]>,
    triangles: Option<&[u32]>,
    params: &DiagnosticsParams,
    mut sink: impl DiagnosticSink,
) {
    match MeshBuffers::from_raw(positions, edges, triangles) {
        Ok(buffers) => report_mesh(&buffers, params, sink),
        Err(err) => sink.emit(ReportEvent::Failed {
            message: err.to_string(),
        }),
    }
}

fn publish(report: &DiagnosticsReport, sink: &mut impl DiagnosticSink) {
    sink.emit(ReportEvent::Started {
        vertex_count: report.vertex_count,
        edge_count: report.edge_count,
        triangle_count: report.triangle_count,
        duplicate_threshold: report.duplicate_threshold,
    });

    for (kind, metric) in report.metrics() {
        sink.emit(ReportEvent::Metric { kind, metric });
    }

    for (primitive, count) in [
        (PrimitiveKind::Edge, report.skipped_edges),
        (PrimitiveKind::Triangle, report.skipped_triangles),
    ] {
        if count > 0 {
            sink.emit(ReportEvent::Skipped { primitive, count });
        }
    }

    sink.emit(ReportEvent::Completed);
    debug!(issues = report.issue_count(), "Report published");
}
