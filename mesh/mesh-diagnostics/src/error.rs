//! Error types for mesh diagnostics.

use thiserror::Error;

/// Result type for diagnostics operations.
pub type DiagnosticsResult<T> = Result<T, DiagnosticsError>;

/// Which primitive list an index came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PrimitiveKind {
    /// An `(v1, v2)` pair of the edge list.
    Edge,
    /// A `(v0, v1, v2)` triple of the triangle list.
    Triangle,
}

impl std::fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Edge => f.write_str("edge"),
            Self::Triangle => f.write_str("triangle"),
        }
    }
}

/// Errors that can abort a diagnostics report.
///
/// Every error is local to a single report call. Nothing is retried: the
/// computation is deterministic, so a second attempt would fail the same way.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum DiagnosticsError {
    /// A required input buffer was not supplied.
    #[error("invalid input: {buffer} buffer is null")]
    NullBuffer {
        /// Name of the missing buffer.
        buffer: &'static str,
    },

    /// Buffer length is not a whole number of elements.
    #[error("{buffer} buffer has {len} scalars, not a multiple of {stride}")]
    MalformedBuffer {
        /// Name of the offending buffer.
        buffer: &'static str,
        /// Number of scalars supplied.
        len: usize,
        /// Scalars per element.
        stride: usize,
    },

    /// A distance or area threshold is negative, NaN or infinite.
    #[error("invalid {name}: {value} (must be finite and non-negative)")]
    InvalidThreshold {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },

    /// Any other invalid parameter.
    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    /// A primitive references a vertex outside `[0, vertex_count)`.
    ///
    /// Only raised under [`IndexPolicy::Reject`](crate::IndexPolicy::Reject).
    #[error("{primitive} {position} references vertex {index} (mesh has {vertex_count} vertices)")]
    IndexOutOfRange {
        /// List the primitive belongs to.
        primitive: PrimitiveKind,
        /// Position of the primitive within its list.
        position: usize,
        /// The out-of-range vertex index.
        index: u32,
        /// Number of vertices in the buffer.
        vertex_count: usize,
    },

    /// The graphics context collaborator reported that it is not ready.
    #[error("graphics context is not available")]
    ContextUnavailable,
}

impl DiagnosticsError {
    /// Create a null buffer error.
    #[must_use]
    pub const fn null_buffer(buffer: &'static str) -> Self {
        Self::NullBuffer { buffer }
    }

    /// Create an invalid params error.
    #[must_use]
    pub fn invalid_params(details: impl Into<String>) -> Self {
        Self::InvalidParams(details.into())
    }
}
