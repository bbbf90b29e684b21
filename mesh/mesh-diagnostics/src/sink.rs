//! Diagnostic sinks.
//!
//! A report is published as a sequence of [`ReportEvent`]s. [`TracingSink`]
//! forwards them to `tracing`; a `Vec<ReportEvent>` records them verbatim.

use tracing::{debug, error, info, warn};

use crate::error::PrimitiveKind;
use crate::report::{Metric, MetricKind};

/// One structured event of a diagnostics report.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportEvent {
    /// A report is starting.
    Started {
        /// Number of vertices.
        vertex_count: usize,
        /// Number of edges.
        edge_count: usize,
        /// Number of triangles.
        triangle_count: usize,
        /// Duplicate distance threshold.
        duplicate_threshold: f64,
    },
    /// One of the four metrics.
    Metric {
        /// Which metric.
        kind: MetricKind,
        /// Its value.
        metric: Metric,
    },
    /// Primitives were ignored for referencing a missing vertex.
    Skipped {
        /// Edge or triangle list.
        primitive: PrimitiveKind,
        /// How many were ignored.
        count: usize,
    },
    /// The report was aborted. No other event follows.
    Failed {
        /// Rendered error.
        message: String,
    },
    /// The report finished.
    Completed,
}

/// Receiver for report events.
pub trait DiagnosticSink {
    /// Handle one event.
    fn emit(&mut self, event: ReportEvent);
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn emit(&mut self, event: ReportEvent) {
        (**self).emit(event);
    }
}

impl DiagnosticSink for Vec<ReportEvent> {
    fn emit(&mut self, event: ReportEvent) {
        self.push(event);
    }
}

/// Sink that logs every event through `tracing`.
///
/// Metrics are logged at `info`, skipped primitives at `warn`, failures at
/// `error` and the start/end markers at `debug`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&mut self, event: ReportEvent) {
        match event {
            ReportEvent::Started {
                vertex_count,
                edge_count,
                triangle_count,
                duplicate_threshold,
            } => debug!(
                vertices = vertex_count,
                edges = edge_count,
                triangles = triangle_count,
                threshold = duplicate_threshold,
                "Starting mesh cleanup candidate report"
            ),
            ReportEvent::Metric { kind, metric } => info!(
                count = metric.count,
                population = metric.population,
                ratio = metric.ratio_percent(),
                "{}: {} / {} ({:.2}%)",
                kind.label(),
                metric.count,
                metric.population,
                metric.ratio_percent()
            ),
            ReportEvent::Skipped { primitive, count } => {
                warn!(count, "Skipped {} {}(s) with out-of-range vertex indices", count, primitive);
            }
            ReportEvent::Failed { message } => error!("Mesh diagnostics aborted: {}", message),
            ReportEvent::Completed => debug!("Mesh cleanup report completed"),
        }
    }
}
