//! Report types for mesh diagnostics.

/// The four metrics of a diagnostics report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MetricKind {
    /// Vertices within the duplicate threshold of their sorted neighbour.
    DuplicateVertices,
    /// Vertices referenced by no edge.
    LooseVertices,
    /// Canonical edges used by more than one primitive.
    InteriorEdges,
    /// Triangles with near-zero area.
    DegenerateTriangles,
}

impl MetricKind {
    /// All kinds, in report order.
    pub const ALL: [Self; 4] = [
        Self::DuplicateVertices,
        Self::LooseVertices,
        Self::InteriorEdges,
        Self::DegenerateTriangles,
    ];

    /// Human-readable label used in logs and [`Display`](std::fmt::Display) output.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::DuplicateVertices => "Duplicate vertices",
            Self::LooseVertices => "Loose vertices",
            Self::InteriorEdges => "Interior edges",
            Self::DegenerateTriangles => "Degenerate triangles",
        }
    }
}

/// A defect count over the population it is measured against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metric {
    /// Number of flagged elements.
    pub count: usize,
    /// Size of the population the ratio is taken over.
    pub population: usize,
}

impl Metric {
    /// Create a metric.
    #[must_use]
    pub const fn new(count: usize, population: usize) -> Self {
        Self { count, population }
    }

    /// `100 * count / population`, or `0.0` for an empty population.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_diagnostics::Metric;
    ///
    /// assert!((Metric::new(1, 4).ratio_percent() - 25.0).abs() < 1e-12);
    /// assert_eq!(Metric::new(0, 0).ratio_percent(), 0.0);
    /// ```
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn ratio_percent(&self) -> f64 {
        if self.population == 0 {
            0.0
        } else {
            100.0 * (self.count as f64) / (self.population as f64)
        }
    }
}

/// What a single check found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckOutcome {
    /// Number of flagged elements.
    pub count: usize,
    /// Primitives ignored because they referenced a missing vertex.
    pub skipped: usize,
}

/// Result of a diagnostics pass.
///
/// Duplicate, loose and interior metrics are measured against the vertex
/// count; the degenerate metric against the triangle count.
///
/// # Example
///
/// ```
/// use mesh_diagnostics::{DiagnosticsReport, Metric};
///
/// let report = DiagnosticsReport {
///     loose_vertices: Metric::new(2, 10),
///     ..Default::default()
/// };
/// assert!(report.has_issues());
/// assert_eq!(report.issue_count(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiagnosticsReport {
    /// Number of vertices.
    pub vertex_count: usize,
    /// Number of edges in the edge list.
    pub edge_count: usize,
    /// Number of triangles in the triangle list.
    pub triangle_count: usize,
    /// Duplicate distance threshold used.
    pub duplicate_threshold: f64,

    /// Near-duplicate vertices.
    pub duplicate_vertices: Metric,
    /// Vertices referenced by no edge.
    pub loose_vertices: Metric,
    /// Edges used more than once.
    pub interior_edges: Metric,
    /// Triangles below the area threshold.
    pub degenerate_triangles: Metric,

    /// Edges ignored for referencing a missing vertex.
    pub skipped_edges: usize,
    /// Triangles ignored for referencing a missing vertex.
    pub skipped_triangles: usize,
}

impl DiagnosticsReport {
    /// The metric for `kind`.
    #[must_use]
    pub const fn metric(&self, kind: MetricKind) -> Metric {
        match kind {
            MetricKind::DuplicateVertices => self.duplicate_vertices,
            MetricKind::LooseVertices => self.loose_vertices,
            MetricKind::InteriorEdges => self.interior_edges,
            MetricKind::DegenerateTriangles => self.degenerate_triangles,
        }
    }

    /// All four metrics in report order.
    pub fn metrics(&self) -> impl Iterator<Item = (MetricKind, Metric)> + '_ {
        MetricKind::ALL.into_iter().map(|kind| (kind, self.metric(kind)))
    }

    /// Whether any metric flagged at least one element.
    #[must_use]
    pub fn has_issues(&self) -> bool {
        self.metrics().any(|(_, m)| m.count > 0)
    }

    /// Sum of all four counts.
    #[must_use]
    pub fn issue_count(&self) -> usize {
        self.metrics().map(|(_, m)| m.count).sum()
    }

    /// Whether any primitive was skipped for a bad index.
    #[must_use]
    pub const fn has_skipped(&self) -> bool {
        self.skipped_edges > 0 || self.skipped_triangles > 0
    }
}

impl std::fmt::Display for DiagnosticsReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Mesh Diagnostics:")?;
        writeln!(f, "  Vertices: {}", self.vertex_count)?;
        writeln!(f, "  Edges: {}", self.edge_count)?;
        writeln!(f, "  Triangles: {}", self.triangle_count)?;
        writeln!(f, "  Duplicate threshold: {}", self.duplicate_threshold)?;
        writeln!(f)?;
        for (kind, metric) in self.metrics() {
            writeln!(
                f,
                "  {}: {} / {} ({:.2}%)",
                kind.label(),
                metric.count,
                metric.population,
                metric.ratio_percent()
            )?;
        }
        if self.has_skipped() {
            writeln!(f)?;
            writeln!(f, "  Skipped (bad indices):")?;
            if self.skipped_edges > 0 {
                writeln!(f, "    Edges: {}", self.skipped_edges)?;
            }
            if self.skipped_triangles > 0 {
                writeln!(f, "    Triangles: {}", self.skipped_triangles)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn ratio_guards_empty_population() {
        assert_relative_eq!(Metric::new(3, 0).ratio_percent(), 0.0);
        assert_relative_eq!(Metric::default().ratio_percent(), 0.0);
    }

    #[test]
    fn ratio_percent() {
        assert_relative_eq!(Metric::new(1, 3).ratio_percent(), 100.0 / 3.0);
        assert_relative_eq!(Metric::new(4, 4).ratio_percent(), 100.0);
    }

    #[test]
    fn empty_report_has_no_issues() {
        let report = DiagnosticsReport::default();
        assert!(!report.has_issues());
        assert_eq!(report.issue_count(), 0);
        assert!(!report.has_skipped());
    }

    #[test]
    fn issue_count_sums_metrics() {
        let report = DiagnosticsReport {
            duplicate_vertices: Metric::new(1, 10),
            interior_edges: Metric::new(3, 10),
            degenerate_triangles: Metric::new(2, 5),
            ..Default::default()
        };
        assert_eq!(report.issue_count(), 6);
    }

    #[test]
    fn metrics_in_report_order() {
        let report = DiagnosticsReport {
            loose_vertices: Metric::new(7, 9),
            ..Default::default()
        };
        let kinds: Vec<_> = report.metrics().map(|(k, _)| k).collect();
        assert_eq!(kinds, MetricKind::ALL.to_vec());
        assert_eq!(report.metric(MetricKind::LooseVertices).count, 7);
    }

    #[test]
    fn display() {
        let report = DiagnosticsReport {
            vertex_count: 4,
            edge_count: 3,
            triangle_count: 1,
            duplicate_threshold: 1e-4,
            duplicate_vertices: Metric::new(1, 4),
            loose_vertices: Metric::new(1, 4),
            interior_edges: Metric::new(0, 4),
            degenerate_triangles: Metric::new(0, 1),
            skipped_edges: 2,
            skipped_triangles: 0,
        };

        let output = format!("{report}");
        assert!(output.contains("Vertices: 4"));
        assert!(output.contains("Duplicate vertices: 1 / 4 (25.00%)"));
        assert!(output.contains("Degenerate triangles: 0 / 1 (0.00%)"));
        assert!(output.contains("Skipped (bad indices):"));
        assert!(output.contains("    Edges: 2"));
    }
}
