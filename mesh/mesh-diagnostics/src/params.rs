//! Parameters for mesh diagnostics.

use crate::error::{DiagnosticsError, DiagnosticsResult};

/// Default distance below which two sorted-adjacent vertices count as duplicates.
pub const DEFAULT_DUPLICATE_THRESHOLD: f64 = 0.001;

/// What to do with an edge or triangle that references a missing vertex.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum IndexPolicy {
    /// Ignore the primitive in every check and count it as skipped.
    #[default]
    Skip,
    /// Fail the whole report.
    Reject,
}

/// Parameters for a diagnostics pass.
///
/// All distances are in mesh units. The degenerate-triangle cutoff is not a
/// parameter; see [`DEGENERATE_AREA_THRESHOLD`](crate::DEGENERATE_AREA_THRESHOLD).
///
/// # Example
///
/// ```
/// use mesh_diagnostics::{DiagnosticsParams, IndexPolicy};
///
/// let params = DiagnosticsParams::default();
/// assert!((params.duplicate_threshold - 0.001).abs() < 1e-12);
/// assert_eq!(params.index_policy, IndexPolicy::Skip);
///
/// let params = DiagnosticsParams::default()
///     .duplicate_threshold(1e-4)
///     .parallel(true);
/// assert!(params.parallel);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DiagnosticsParams {
    /// Sorted neighbours closer than this are duplicates (strict `<`).
    pub duplicate_threshold: f64,

    /// Handling of out-of-range vertex indices.
    pub index_policy: IndexPolicy,

    /// Run the four checks on the rayon pool instead of sequentially.
    pub parallel: bool,
}

impl Default for DiagnosticsParams {
    fn default() -> Self {
        Self {
            duplicate_threshold: DEFAULT_DUPLICATE_THRESHOLD,
            index_policy: IndexPolicy::Skip,
            parallel: false,
        }
    }
}

impl DiagnosticsParams {
    /// Params for noisy 3D scan data.
    #[must_use]
    pub const fn for_scans() -> Self {
        Self {
            duplicate_threshold: 0.01,
            index_policy: IndexPolicy::Skip,
            parallel: true,
        }
    }

    /// Params for CAD models, where near-coincident geometry is intentional.
    #[must_use]
    pub const fn for_cad() -> Self {
        Self {
            duplicate_threshold: 1e-9,
            index_policy: IndexPolicy::Skip,
            parallel: false,
        }
    }

    /// Default threshold, but any bad index fails the report.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            duplicate_threshold: DEFAULT_DUPLICATE_THRESHOLD,
            index_policy: IndexPolicy::Reject,
            parallel: false,
        }
    }

    /// Set the duplicate distance threshold.
    #[must_use]
    pub const fn duplicate_threshold(mut self, threshold: f64) -> Self {
        self.duplicate_threshold = threshold;
        self
    }

    /// Set the out-of-range index policy.
    #[must_use]
    pub const fn index_policy(mut self, policy: IndexPolicy) -> Self {
        self.index_policy = policy;
        self
    }

    /// Enable or disable running the checks in parallel.
    #[must_use]
    pub const fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Check that the duplicate threshold is finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`DiagnosticsError::InvalidThreshold`] for a bad value.
    pub fn validate(&self) -> DiagnosticsResult<()> {
        check_threshold("duplicate_threshold", self.duplicate_threshold)
    }
}

fn check_threshold(name: &'static str, value: f64) -> DiagnosticsResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(DiagnosticsError::InvalidThreshold { name, value })
    }
}
