//! End-to-end diagnostics scenarios on small hand-built meshes.

use approx::assert_relative_eq;
use mesh_diagnostics::{
    DiagnosticsParams, DiagnosticsReport, IndexPolicy, MeshBuffers, MetricKind, ReportEvent,
    analyze_mesh, edges_from_triangles, report_from_raw, report_mesh, suggest_duplicate_threshold,
};

fn init_tracing() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

fn analyze(
    positions: &[f64],
    edges: &[u32],
    triangles: &[u32],
    threshold: f64,
) -> DiagnosticsReport {
    init_tracing();
    let buffers = MeshBuffers::new(positions, edges, triangles).unwrap();
    let params = DiagnosticsParams::default().duplicate_threshold(threshold);
    analyze_mesh(&buffers, &params).unwrap()
}

/// Closed tetrahedron, CCW winding viewed from outside.
fn tetrahedron() -> (Vec<f64>, Vec<u32>) {
    let positions = vec![
        0.0, 0.0, 0.0, //
        1.0, 0.0, 0.0, //
        0.5, 0.866, 0.0, //
        0.5, 0.289, 0.816,
    ];
    let triangles = vec![0, 2, 1, 0, 1, 3, 1, 2, 3, 2, 0, 3];
    (positions, triangles)
}

#[test]
fn coincident_pair_with_loose_vertex() {
    let positions = [
        0.0, 0.0, 0.0, //
        0.0, 0.0, 0.0, //
        1.0, 0.0, 0.0, //
        0.0, 1.0, 0.0,
    ];
    let edges = [0, 2, 2, 3, 3, 0];
    let triangles = [0, 2, 3];

    let report = analyze(&positions, &edges, &triangles, 1e-4);

    assert_eq!(report.duplicate_vertices.count, 1);
    assert_eq!(report.loose_vertices.count, 1);
    assert_eq!(report.interior_edges.count, 0);
    assert_eq!(report.degenerate_triangles.count, 0);

    assert_relative_eq!(report.duplicate_vertices.ratio_percent(), 25.0);
    assert_relative_eq!(report.loose_vertices.ratio_percent(), 25.0);
    assert_relative_eq!(report.interior_edges.ratio_percent(), 0.0);
    assert_relative_eq!(report.degenerate_triangles.ratio_percent(), 0.0);
}

#[test]
fn self_referencing_triangle_always_degenerate() {
    let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
    for threshold in [0.0, 1e-6, 1e-3, 10.0] {
        let report = analyze(&positions, &[], &[0, 0, 0], threshold);
        assert_eq!(report.degenerate_triangles.count, 1);
        assert_relative_eq!(report.degenerate_triangles.ratio_percent(), 100.0);
    }

    let buffers = MeshBuffers::new(&positions, &[], &[1, 1, 1]).unwrap();
    for params in [
        DiagnosticsParams::for_scans(),
        DiagnosticsParams::for_cad(),
        DiagnosticsParams::strict(),
    ] {
        let report = analyze_mesh(&buffers, &params).unwrap();
        assert_eq!(report.degenerate_triangles.count, 1);
    }
}

#[test]
fn presets_share_the_degenerate_cutoff() {
    // Legs 0.01, area 5e-5: small but well above the cutoff.
    let positions = [0.0, 0.0, 0.0, 0.01, 0.0, 0.0, 0.0, 0.01, 0.0];
    let buffers = MeshBuffers::new(&positions, &[], &[0, 1, 2]).unwrap();
    for params in [
        DiagnosticsParams::default(),
        DiagnosticsParams::for_scans(),
        DiagnosticsParams::for_cad(),
        DiagnosticsParams::strict(),
    ] {
        let report = analyze_mesh(&buffers, &params).unwrap();
        assert_eq!(report.degenerate_triangles.count, 0);
    }
}

#[test]
fn closed_tetrahedron_is_clean_except_interior_edges() {
    let (positions, triangles) = tetrahedron();
    let edges = edges_from_triangles(&triangles).unwrap();

    let report = analyze(&positions, &edges, &triangles, 1e-3);

    assert_eq!(report.duplicate_vertices.count, 0);
    assert_eq!(report.loose_vertices.count, 0);
    // Every one of the six edges is shared by two faces.
    assert_eq!(report.interior_edges.count, 6);
    assert_relative_eq!(report.interior_edges.ratio_percent(), 150.0);
    assert_eq!(report.degenerate_triangles.count, 0);
}

#[test]
fn unique_edge_list_has_no_interior_edges() {
    // One entry per undirected edge, as an editor's edge table would provide.
    let (positions, triangles) = tetrahedron();
    let edges = [0, 1, 0, 2, 0, 3, 1, 2, 1, 3, 2, 3];

    let report = analyze(&positions, &edges, &triangles, 1e-3);

    assert_eq!(report.interior_edges.count, 0);
    assert_eq!(report.loose_vertices.count, 0);
}

#[test]
fn degenerate_ratio_uses_triangle_count() {
    let (positions, mut triangles) = tetrahedron();
    triangles.extend_from_slice(&[1, 1, 1]);

    let report = analyze(&positions, &[], &triangles, 1e-3);

    assert_eq!(report.degenerate_triangles.count, 1);
    assert_eq!(report.degenerate_triangles.population, 5);
    assert_relative_eq!(report.degenerate_triangles.ratio_percent(), 20.0);
    // All vertex metrics still use the vertex count.
    assert_eq!(report.loose_vertices.population, 4);
}

#[test]
fn skip_and_reject_policies() {
    let (positions, triangles) = tetrahedron();
    let edges = [0, 1, 1, 12, 2, 3];
    let buffers = MeshBuffers::new(&positions, &edges, &triangles).unwrap();

    let report = analyze_mesh(&buffers, &DiagnosticsParams::default()).unwrap();
    assert_eq!(report.skipped_edges, 1);
    assert_eq!(report.loose_vertices.count, 0);

    let strict = DiagnosticsParams::default().index_policy(IndexPolicy::Reject);
    assert!(analyze_mesh(&buffers, &strict).is_err());
}

#[test]
fn report_events_carry_metrics() {
    init_tracing();
    let (positions, triangles) = tetrahedron();
    let edges = edges_from_triangles(&triangles).unwrap();
    let buffers = MeshBuffers::new(&positions, &edges, &triangles).unwrap();

    let mut events: Vec<ReportEvent> = Vec::new();
    report_mesh(&buffers, &DiagnosticsParams::default(), &mut events);

    let interior = events.iter().find_map(|e| match e {
        ReportEvent::Metric {
            kind: MetricKind::InteriorEdges,
            metric,
        } => Some(*metric),
        _ => None,
    });
    assert_eq!(interior.map(|m| m.count), Some(6));
    assert_eq!(events.last(), Some(&ReportEvent::Completed));
}

#[test]
fn null_vertex_buffer_reports_once() {
    let mut events: Vec<ReportEvent> = Vec::new();
    report_from_raw(
        None,
        Some(&[0, 1]),
        Some(&[]),
        &DiagnosticsParams::default(),
        &mut events,
    );

    assert_eq!(events.len(), 1);
    assert!(matches!(&events[0], ReportEvent::Failed { message } if message.contains("vertices")));
}

#[test]
fn suggested_threshold_feeds_analysis() {
    let (positions, triangles) = tetrahedron();
    let edges = edges_from_triangles(&triangles).unwrap();
    let buffers = MeshBuffers::new(&positions, &edges, &triangles).unwrap();

    let threshold = suggest_duplicate_threshold(&buffers, 10.0).unwrap();
    assert!(threshold > 0.9 && threshold < 1.1);

    // A threshold on the scale of an edge flags sorted neighbours as duplicates.
    let params = DiagnosticsParams::default().duplicate_threshold(threshold * 2.0);
    let report = analyze_mesh(&buffers, &params).unwrap();
    assert_eq!(report.duplicate_vertices.count, 3);
}
