//! Post-relaxation negative-cycle check.
//!
//! One extra pass over the edges: any edge with a reached source that could
//! still lower its destination means the sweep budget ran out on a
//! negative-weight cycle reachable from the source. Read-only, so running it
//! twice gives the same answer.
//!
//! After an [`crate::SyncMode::Independent`] partitioned run a leftover
//! relaxable edge can also mean a worker quit early; the check cannot tell the
//! two apart.

use crate::graph::{DistanceVector, EdgeStore};
use crate::relax::candidate;

/// Index of the first edge that can still be relaxed, if any.
pub fn first_relaxable_edge(edges: &EdgeStore, distances: &DistanceVector) -> Option<usize> {
    debug_assert_eq!(edges.node_count(), distances.len());
    let dist = distances.as_slice();
    let (src, dst, wts) = (edges.sources(), edges.destinations(), edges.weights());
    (0..wts.len()).find(|&e| {
        let (Some(&du), Some(&dv)) = (dist.get(src[e] as usize), dist.get(dst[e] as usize)) else { return false };
        matches!(candidate(du, wts[e]), Some(nd) if nd < dv)
    })
}

pub fn has_negative_cycle(edges: &EdgeStore, distances: &DistanceVector) -> bool {
    match first_relaxable_edge(edges, distances) {
        Some(e) => {
            tracing::warn!(edge = e, "relaxable edge after final sweep: negative cycle reachable from source");
            true
        }
        None => false,
    }
}
