//! Borrowed views over flat mesh buffers.
//!
//! Positions, edges and triangles arrive as separate flat arrays. Edges and
//! triangles are two independently sized lists: triangle structure is never
//! inferred by re-striding the edge list.

use nalgebra::Point3;

use crate::error::{DiagnosticsError, DiagnosticsResult, PrimitiveKind};
use crate::params::IndexPolicy;

/// A validated, read-only view over the buffers of one mesh snapshot.
///
/// # Example
///
/// ```
/// use mesh_diagnostics::MeshBuffers;
///
/// let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
/// let edges = [0, 1, 1, 2, 2, 0];
/// let triangles = [0, 1, 2];
///
/// let buffers = MeshBuffers::new(&positions, &edges, &triangles).unwrap();
/// assert_eq!(buffers.vertex_count(), 3);
/// assert_eq!(buffers.edge_count(), 3);
/// assert_eq!(buffers.triangle_count(), 1);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MeshBuffers<'a> {
    positions: &'a [f64],
    edges: &'a [u32],
    triangles: &'a [u32],
}

impl<'a> MeshBuffers<'a> {
    /// Wrap flat buffers, checking that each length is a whole number of
    /// elements.
    ///
    /// * `positions` - `[x0, y0, z0, x1, y1, z1, ...]`
    /// * `edges` - `[a0, b0, a1, b1, ...]`
    /// * `triangles` - `[a0, b0, c0, a1, b1, c1, ...]`
    ///
    /// Indices are not range-checked here; each check applies the
    /// [`IndexPolicy`](crate::IndexPolicy) when it meets one.
    ///
    /// # Errors
    ///
    /// Returns [`DiagnosticsError::MalformedBuffer`] if a length is not a
    /// multiple of its stride.
    pub fn new(
        positions: &'a [f64],
        edges: &'a [u32],
        triangles: &'a [u32],
    ) -> DiagnosticsResult<Self> {
        check_stride("vertices", positions.len(), 3)?;
        check_stride("edges", edges.len(), 2)?;
        check_stride("triangles", triangles.len(), 3)?;
        Ok(Self {
            positions,
            edges,
            triangles,
        })
    }

    /// Wrap buffers that may be missing, rejecting a missing one before any
    /// other check.
    ///
    /// # Errors
    ///
    /// Returns [`DiagnosticsError::NullBuffer`] for the first `None` buffer,
    /// otherwise the errors of [`MeshBuffers::new`].
    pub fn from_raw(
        positions: Option<&'a [f64]>,
        edges: Option<&'a [u32]>,
        triangles: Option<&'a [u32]>,
    ) -> DiagnosticsResult<Self> {
        let positions = positions.ok_or(DiagnosticsError::null_buffer("vertices"))?;
        let edges = edges.ok_or(DiagnosticsError::null_buffer("edges"))?;
        let triangles = triangles.ok_or(DiagnosticsError::null_buffer("triangles"))?;
        Self::new(positions, edges, triangles)
    }

    /// Number of vertices.
    #[inline]
    #[must_use]
    pub const fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Number of edges in the edge list.
    #[inline]
    #[must_use]
    pub const fn edge_count(&self) -> usize {
        self.edges.len() / 2
    }

    /// Number of triangles in the triangle list.
    #[inline]
    #[must_use]
    pub const fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }

    /// The flat position buffer.
    #[inline]
    #[must_use]
    pub const fn raw_positions(&self) -> &'a [f64] {
        self.positions
    }

    /// Position of vertex `index` in original buffer order.
    ///
    /// Returns `None` if the index is out of range.
    #[inline]
    #[must_use]
    pub fn position(&self, index: u32) -> Option<Point3<f64>> {
        let start = usize::try_from(index).ok()?.checked_mul(3)?;
        let p = self.positions.get(start..start + 3)?;
        Some(Point3::new(p[0], p[1], p[2]))
    }

    /// Position of an index already checked by [`Self::admit`].
    #[inline]
    pub(crate) fn admitted_position(&self, index: u32) -> Point3<f64> {
        let start = index as usize * 3;
        Point3::new(
            self.positions[start],
            self.positions[start + 1],
            self.positions[start + 2],
        )
    }

    /// Iterate over all positions in original buffer order.
    pub fn positions(&self) -> impl Iterator<Item = Point3<f64>> + 'a {
        self.positions
            .chunks_exact(3)
            .map(|p| Point3::new(p[0], p[1], p[2]))
    }

    /// Iterate over edges as `(v1, v2)` pairs.
    pub fn edges(&self) -> impl Iterator<Item = (u32, u32)> + 'a {
        self.edges.chunks_exact(2).map(|e| (e[0], e[1]))
    }

    /// Iterate over triangles as `[v0, v1, v2]` triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + 'a {
        self.triangles.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Whether `index` names a vertex of this mesh.
    #[inline]
    #[must_use]
    pub fn contains_vertex(&self, index: u32) -> bool {
        usize::try_from(index).is_ok_and(|i| i < self.vertex_count())
    }

    /// Apply `policy` to one primitive's indices.
    ///
    /// `Ok(true)` means every index is in range, `Ok(false)` means the
    /// primitive should be skipped.
    pub(crate) fn admit(
        &self,
        primitive: PrimitiveKind,
        position: usize,
        indices: &[u32],
        policy: IndexPolicy,
    ) -> DiagnosticsResult<bool> {
        match indices.iter().find(|&&i| !self.contains_vertex(i)) {
            None => Ok(true),
            Some(_) if policy == IndexPolicy::Skip => Ok(false),
            Some(&index) => Err(DiagnosticsError::IndexOutOfRange {
                primitive,
                position,
                index,
                vertex_count: self.vertex_count(),
            }),
        }
    }
}

/// Build an edge list from a triangle list.
///
/// Emits `(a, b)`, `(b, c)`, `(c, a)` for every triangle `(a, b, c)`. Edges
/// shared by two faces appear twice, which is what the interior-edge check
/// counts.
///
/// # Errors
///
/// Returns [`DiagnosticsError::MalformedBuffer`] if `triangles.len()` is not a
/// multiple of 3.
///
/// # Example
///
/// ```
/// use mesh_diagnostics::edges_from_triangles;
///
/// let edges = edges_from_triangles(&[0, 1, 2, 1, 3, 2]).unwrap();
/// assert_eq!(edges.len(), 12);
/// assert_eq!(&edges[..6], &[0, 1, 1, 2, 2, 0]);
/// ```
pub fn edges_from_triangles(triangles: &[u32]) -> DiagnosticsResult<Vec<u32>> {
    check_stride("triangles", triangles.len(), 3)?;

    let mut edges = Vec::with_capacity(triangles.len() * 2);
    for t in triangles.chunks_exact(3) {
        edges.extend_from_slice(&[t[0], t[1], t[1], t[2], t[2], t[0]]);
    }
    Ok(edges)
}

fn check_stride(buffer: &'static str, len: usize, stride: usize) -> DiagnosticsResult<()> {
    if len % stride == 0 {
        Ok(())
    } else {
        Err(DiagnosticsError::MalformedBuffer {
            buffer,
            len,
            stride,
        })
    }
}
