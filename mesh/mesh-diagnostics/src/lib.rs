//! Mesh quality diagnostics.
//!
//! This crate computes a defect report for a triangle mesh supplied as flat
//! buffers:
//! - Duplicate vertices (near-coincident sorted neighbours)
//! - Loose vertices (referenced by no edge)
//! - Interior edges (edges used by more than one primitive)
//! - Degenerate triangles (near-zero area)
//!
//! It never modifies the mesh. Each metric is a count plus a ratio over the
//! population it is measured against.
//!
//! # Layer 0
//!
//! This is a Layer 0 crate with no engine or I/O dependencies. It also builds
//! as a `cdylib` exposing a small C ABI (see [`ffi`]).
//!
//! # Example
//!
//! ```
//! use mesh_diagnostics::{
//!     DiagnosticsParams, MeshBuffers, TracingSink, analyze_mesh, edges_from_triangles,
//!     report_mesh,
//! };
//!
//! let positions = [
//!     0.0, 0.0, 0.0, //
//!     1.0, 0.0, 0.0, //
//!     1.0, 1.0, 0.0, //
//!     0.0, 1.0, 0.0,
//! ];
//! let triangles = [0, 1, 2, 0, 2, 3];
//! let edges = edges_from_triangles(&triangles).unwrap();
//! let buffers = MeshBuffers::new(&positions, &edges, &triangles).unwrap();
//!
//! let report = analyze_mesh(&buffers, &DiagnosticsParams::default()).unwrap();
//! assert_eq!(report.interior_edges.count, 1); // the diagonal
//! println!("{report}");
//!
//! // Or publish it as log events.
//! report_mesh(&buffers, &DiagnosticsParams::default(), TracingSink);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod adjacency;
mod analyze;
mod buffers;
pub mod context;
mod degenerate;
mod duplicates;
mod error;
pub mod ffi;
mod interior;
mod loose;
mod params;
mod report;
mod sink;
mod threshold;

pub use adjacency::{EdgeUsage, normalize_edge};
pub use analyze::{analyze_mesh, report_from_raw, report_mesh};
pub use buffers::{MeshBuffers, edges_from_triangles};
pub use degenerate::{DEGENERATE_AREA_THRESHOLD, count_degenerate_triangles, triangle_area};
pub use duplicates::count_duplicate_vertices;
pub use error::{DiagnosticsError, DiagnosticsResult, PrimitiveKind};
pub use interior::count_interior_edges;
pub use loose::count_loose_vertices;
pub use params::{DEFAULT_DUPLICATE_THRESHOLD, DiagnosticsParams, IndexPolicy};
pub use report::{CheckOutcome, DiagnosticsReport, Metric, MetricKind};
pub use sink::{DiagnosticSink, ReportEvent, TracingSink};
pub use threshold::suggest_duplicate_threshold;
