//! Canonical edge usage counts.
//!
//! Folds both directions of an edge into one slot keyed by
//! `(min(v1, v2), max(v1, v2))`.

use hashbrown::HashMap;

/// Usage count per undirected edge.
///
/// # Example
///
/// ```
/// use mesh_diagnostics::EdgeUsage;
///
/// let usage = EdgeUsage::from_pairs([(0, 1), (1, 2), (1, 0)]);
///
/// assert_eq!(usage.edge_count(), 2);
/// assert_eq!(usage.usage(0, 1), 2);
/// assert_eq!(usage.shared_edge_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EdgeUsage {
    /// Maps edge (v0, v1) to its use count. v0 <= v1.
    counts: HashMap<(u32, u32), u32>,
}

impl EdgeUsage {
    /// Create an empty usage map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(v1, v2)` pairs in either direction.
    #[must_use]
    pub fn from_pairs(pairs: impl IntoIterator<Item = (u32, u32)>) -> Self {
        let mut usage = Self::new();
        for (v1, v2) in pairs {
            usage.record(v1, v2);
        }
        usage
    }

    /// Record one use of the edge `(v1, v2)`.
    pub fn record(&mut self, v1: u32, v2: u32) {
        let count = self.counts.entry(normalize_edge(v1, v2)).or_insert(0);
        *count = count.saturating_add(1);
    }

    /// How often the edge was recorded, in either direction.
    #[must_use]
    pub fn usage(&self, v1: u32, v2: u32) -> u32 {
        self.counts
            .get(&normalize_edge(v1, v2))
            .copied()
            .unwrap_or(0)
    }

    /// Number of distinct undirected edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.counts.len()
    }

    /// Number of distinct edges used more than once.
    #[must_use]
    pub fn shared_edge_count(&self) -> usize {
        self.counts.values().filter(|&&n| n > 1).count()
    }

    /// Number of distinct edges used exactly once.
    #[must_use]
    pub fn single_use_edge_count(&self) -> usize {
        self.counts.values().filter(|&&n| n == 1).count()
    }

    /// Iterate over distinct edges, smaller index first.
    pub fn edges(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.counts.keys().copied()
    }
}

/// Normalize edge direction so v0 <= v1.
#[inline]
#[must_use]
pub fn normalize_edge(v0: u32, v1: u32) -> (u32, u32) {
    if v0 <= v1 { (v0, v1) } else { (v1, v0) }
}
