//! Bellman-Ford relaxation engine.
//!
//! Three execution models share one contract: given a [`RelaxContext`], sweep
//! the edge list at most `max_sweeps` times (default `N-1`), lowering
//! `distance[dst]` whenever `distance[src] + w` beats it, and stop early after
//! a sweep that changes nothing.
//!  - [`relax_sequential`]: single thread, the reference answer.
//!  - [`relax_partitioned`]: edge index ranges on scoped worker threads.
//!  - [`relax_vectorized`]: fixed-width gather/compare/scatter batches.
//!
//! Edges whose source is still `UNREACHED` never relax, so negative edges
//! hanging off unreachable nodes cannot leak into the result.

use serde::Serialize;

use crate::error::Result;
use crate::graph::{Distance, DistanceVector, EdgeStore, NodeId, Weight, UNREACHED};

pub mod partitioned;
pub mod sequential;
pub mod vector;

pub use partitioned::{partition_ranges, relax_partitioned, SyncMode};
pub use sequential::relax_sequential;
pub use vector::{relax_vectorized, relax_vectorized_with, Kernel, SUPPORTED_LANES};

/// Everything one relaxer call needs: the edges, the distance vector it
/// mutates and the sweep budget. Built per run; nothing outlives it.
#[derive(Debug)]
pub struct RelaxContext<'e> {
    edges: &'e EdgeStore,
    distances: DistanceVector,
    max_sweeps: usize,
}

impl<'e> RelaxContext<'e> {
    pub fn new(edges: &'e EdgeStore, source: NodeId) -> Result<Self> {
        let distances = DistanceVector::new(edges.node_count(), source)?;
        Ok(Self { edges, distances, max_sweeps: edges.node_count().saturating_sub(1) })
    }

    /// Override the `N-1` sweep budget.
    pub fn with_max_sweeps(mut self, max_sweeps: usize) -> Self { self.max_sweeps = max_sweeps; self }

    #[inline] pub fn edges(&self) -> &'e EdgeStore { self.edges }
    #[inline] pub fn distances(&self) -> &DistanceVector { &self.distances }
    #[inline] pub fn max_sweeps(&self) -> usize { self.max_sweeps }
    pub fn into_distances(self) -> DistanceVector { self.distances }

    #[inline]
    pub(crate) fn parts_mut(&mut self) -> (&'e EdgeStore, &mut [Distance], usize) {
        (self.edges, self.distances.as_mut_slice(), self.max_sweeps)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RelaxStats {
    /// Sweeps executed (the longest-running worker for partitioned runs).
    pub sweeps: usize,
    /// Successful distance updates across all sweeps and workers.
    pub relaxations: u64,
    /// A quiet sweep was observed before the budget ran out.
    pub converged: bool,
    /// Per-worker sweep counts; empty for single-threaded relaxers.
    pub worker_sweeps: Vec<usize>,
}

impl RelaxStats {
    pub(crate) fn trivially_converged() -> Self { Self { converged: true, ..Self::default() } }
}

/// `distance[src] + w`, or `None` while the source is unreached.
#[inline(always)]
pub(crate) fn candidate(source_distance: Distance, weight: Weight) -> Option<Distance> {
    if source_distance >= UNREACHED { None } else { Some(source_distance + weight as Distance) }
}
