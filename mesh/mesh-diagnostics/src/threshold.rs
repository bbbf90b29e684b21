//! Data-driven duplicate threshold.
//!
//! Picks the duplicate distance from the mesh's own edge lengths, so the
//! threshold scales with the model instead of being a fixed constant.

// Percentile index math works on lengths well below 2^52.
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

use tracing::{debug, info};

use crate::buffers::MeshBuffers;
use crate::error::{DiagnosticsError, DiagnosticsResult};
use crate::params::DEFAULT_DUPLICATE_THRESHOLD;

/// Suggest a duplicate distance threshold from the edge length distribution.
///
/// Collects the length of every edge whose endpoints exist, sorts them and
/// returns the length at `floor(n * percentile / 100)`, clamped to the last
/// entry. With no measurable edges, returns [`DEFAULT_DUPLICATE_THRESHOLD`].
///
/// # Errors
///
/// Returns [`DiagnosticsError::InvalidParams`] if `percentile` is not within
/// `[0, 100]`.
///
/// # Example
///
/// ```
/// use mesh_diagnostics::{MeshBuffers, suggest_duplicate_threshold};
///
/// let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 3.0, 0.0, 0.0];
/// let edges = [0, 1, 1, 2];
/// let buffers = MeshBuffers::new(&positions, &edges, &[]).unwrap();
///
/// // Lengths are [1, 2]; the 10th percentile lands on the shortest edge.
/// let threshold = suggest_duplicate_threshold(&buffers, 10.0).unwrap();
/// assert!((threshold - 1.0).abs() < 1e-12);
/// ```
pub fn suggest_duplicate_threshold(
    buffers: &MeshBuffers<'_>,
    percentile: f64,
) -> DiagnosticsResult<f64> {
    if !(0.0..=100.0).contains(&percentile) {
        return Err(DiagnosticsError::invalid_params(format!(
            "percentile {percentile} is outside [0, 100]"
        )));
    }

    let mut lengths: Vec<f64> = buffers
        .edges()
        .filter_map(|(v1, v2)| {
            let (a, b) = (buffers.position(v1)?, buffers.position(v2)?);
            Some(nalgebra::distance(&a, &b))
        })
        .filter(|d| d.is_finite())
        .collect();

    if lengths.is_empty() {
        debug!("No measurable edges, using default duplicate threshold");
        return Ok(DEFAULT_DUPLICATE_THRESHOLD);
    }

    lengths.sort_unstable_by(f64::total_cmp);
    let index = ((lengths.len() as f64) * percentile / 100.0) as usize;
    let threshold = lengths[index.min(lengths.len() - 1)];

    info!(
        edges = lengths.len(),
        percentile, threshold, "Dynamic duplicate threshold calculated"
    );
    Ok(threshold)
}
