//! C ABI for hosts that load the library dynamically.
//!
//! Mirrors a two-call protocol: initialize the graphics context once, then
//! hand over raw vertex and index buffers. The report goes to stderr through
//! `tracing`; nothing is returned.
//!
//! ```c
//! bool mesh_diagnostics_init_context(void);
//! void mesh_diagnostics_process_vertices(
//!     const float *vertices, int num_vertices,
//!     const int *edges, int num_edges,
//!     const int *triangles, int num_triangles,
//!     float threshold);
//! ```
//!
//! Every pointer must be non-null, even when its count is zero. A host with
//! no triangle list passes any valid pointer (for example to a one-element
//! dummy array) with `num_triangles = 0`; a null pointer aborts the report.

use std::sync::Once;

use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use crate::analyze::report_from_raw;
use crate::context::default_context;
use crate::params::DiagnosticsParams;
use crate::sink::{DiagnosticSink, ReportEvent, TracingSink};

/// Install a `tracing` subscriber that writes to stderr.
///
/// The filter comes from `RUST_LOG`, defaulting to `info`. Only the first call
/// has any effect, and an already-installed global subscriber is left alone.
pub fn init_stderr_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

/// Initialize the graphics context.
///
/// Returns `true` when the context is ready. Hosts must not continue with
/// graphics work on `false`; the diagnostics call does not depend on it.
#[unsafe(no_mangle)]
pub extern "C" fn mesh_diagnostics_init_context() -> bool {
    init_stderr_logging();
    debug!("Initializing graphics context");
    let ready = default_context().init();
    if !ready {
        error!("Failed to initialize graphics context");
    }
    ready
}

/// Report duplicate, loose, interior and degenerate counts to stderr.
///
/// `num_edges` counts pairs in `edges`; `num_triangles` counts triples in
/// `triangles`. A null pointer (even with a zero count) or a negative count
/// reports an error and stops.
/// Negative indices are treated as out of range.
///
/// # Safety
///
/// Each non-null pointer must be valid for reads of its count times its
/// stride (3 floats per vertex, 2 ints per edge, 3 ints per triangle) for the
/// duration of the call.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn mesh_diagnostics_process_vertices(
    vertices: *const f32,
    num_vertices: i32,
    edges: *const i32,
    num_edges: i32,
    triangles: *const i32,
    num_triangles: i32,
    threshold: f32,
) {
    init_stderr_logging();
    // SAFETY: same contract as this function.
    unsafe {
        process_vertices_into(
            vertices,
            num_vertices,
            edges,
            num_edges,
            triangles,
            num_triangles,
            threshold,
            TracingSink,
        );
    }
}

/// Body of [`mesh_diagnostics_process_vertices`] with the sink supplied by
/// the caller.
///
/// # Safety
///
/// Same contract as [`mesh_diagnostics_process_vertices`].
#[allow(clippy::too_many_arguments)]
pub unsafe fn process_vertices_into(
    vertices: *const f32,
    num_vertices: i32,
    edges: *const i32,
    num_edges: i32,
    triangles: *const i32,
    num_triangles: i32,
    threshold: f32,
    mut sink: impl DiagnosticSink,
) {
    let (Some(vertex_len), Some(edge_len), Some(triangle_len)) = (
        scalar_len(num_vertices, 3),
        scalar_len(num_edges, 2),
        scalar_len(num_triangles, 3),
    ) else {
        sink.emit(ReportEvent::Failed {
            message: format!(
                "invalid input: negative or oversized count \
                 (vertices {num_vertices}, edges {num_edges}, triangles {num_triangles})"
            ),
        });
        return;
    };

    // SAFETY: caller guarantees each non-null pointer covers its length.
    let vertices = unsafe { borrow(vertices, vertex_len) };
    let edges = unsafe { borrow(edges, edge_len) };
    let triangles = unsafe { borrow(triangles, triangle_len) };

    let positions: Option<Vec<f64>> = vertices.map(|v| v.iter().map(|&x| f64::from(x)).collect());
    let edges: Option<Vec<u32>> = edges.map(widen_indices);
    let triangles: Option<Vec<u32>> = triangles.map(widen_indices);

    let params = DiagnosticsParams::default().duplicate_threshold(f64::from(threshold));
    report_from_raw(
        positions.as_deref(),
        edges.as_deref(),
        triangles.as_deref(),
        &params,
        sink,
    );
}

/// Number of scalars for `count` elements of `stride`, if `count` is usable.
fn scalar_len(count: i32, stride: usize) -> Option<usize> {
    usize::try_from(count).ok()?.checked_mul(stride)
}

/// Borrow `len` elements at `ptr`, or `None` for a null pointer.
///
/// # Safety
///
/// A non-null `ptr` must be valid for reads of `len` elements.
unsafe fn borrow<'a, T>(ptr: *const T, len: usize) -> Option<&'a [T]> {
    if ptr.is_null() {
        None
    } else if len == 0 {
        Some(&[])
    } else {
        // SAFETY: non-null and valid for `len` reads per the caller contract.
        Some(unsafe { std::slice::from_raw_parts(ptr, len) })
    }
}

/// Negative indices map to `u32::MAX`, which no buffer can contain.
fn widen_indices(indices: &[i32]) -> Vec<u32> {
    indices
        .iter()
        .map(|&i| u32::try_from(i).unwrap_or(u32::MAX))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_lengths() {
        assert_eq!(scalar_len(4, 3), Some(12));
        assert_eq!(scalar_len(0, 2), Some(0));
        assert_eq!(scalar_len(-1, 3), None);
    }

    #[test]
    fn negative_indices_become_out_of_range() {
        assert_eq!(widen_indices(&[0, 5, -1]), vec![0, 5, u32::MAX]);
    }

    #[test]
    fn borrow_null_is_none() {
        let slice: Option<&[f32]> = unsafe { borrow(std::ptr::null(), 3) };
        assert!(slice.is_none());
    }

    #[test]
    fn borrow_valid_pointer() {
        let data = [1.0f32, 2.0, 3.0];
        let slice = unsafe { borrow(data.as_ptr(), data.len()) };
        assert_eq!(slice, Some(&data[..]));
    }
}
