//! Seeded random graphs for benchmarks and parity checks.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::error::{Result, SsspError};
use crate::graph::{Edge, EdgeStore, NodeId, Weight};

/// `n * avg_degree` directed edges with uniform endpoints (self loops
/// skipped) and weights in `weights`. Cycles are likely, so keep weights
/// non-negative unless a negative cycle is wanted.
pub fn random_graph(n: usize, avg_degree: f32, weights: std::ops::Range<Weight>, seed: u64) -> Result<EdgeStore> {
    let bound = node_bound(n)?;
    let mut rng = SmallRng::seed_from_u64(seed);
    let m = (n as f32 * avg_degree) as usize;
    let mut edges = EdgeStore::with_capacity(n, m);
    if n < 2 || weights.is_empty() { return Ok(edges); }
    for _ in 0..m {
        let u = rng.gen_range(0..bound);
        let v = rng.gen_range(0..bound);
        if u == v { continue; }
        push_valid(&mut edges, Edge { source: u, destination: v, weight: rng.gen_range(weights.clone()) });
    }
    Ok(edges)
}

/// Like [`random_graph`] but every edge goes from a lower to a higher id, so
/// negative weights can never form a cycle.
pub fn random_dag(n: usize, avg_degree: f32, weights: std::ops::Range<Weight>, seed: u64) -> Result<EdgeStore> {
    let bound = node_bound(n)?;
    let mut rng = SmallRng::seed_from_u64(seed);
    let m = (n as f32 * avg_degree) as usize;
    let mut edges = EdgeStore::with_capacity(n, m);
    if n < 2 || weights.is_empty() { return Ok(edges); }
    for _ in 0..m {
        let u = rng.gen_range(0..bound);
        let v = rng.gen_range(0..bound);
        if u == v { continue; }
        let (lo, hi) = if u < v { (u, v) } else { (v, u) };
        push_valid(&mut edges, Edge { source: lo, destination: hi, weight: rng.gen_range(weights.clone()) });
    }
    Ok(edges)
}

/// `n` as an exclusive id bound; every id must fit a [`NodeId`].
fn node_bound(n: usize) -> Result<NodeId> {
    NodeId::try_from(n).map_err(|_| SsspError::InvalidParameter { name: "n", value: n, reason: "node ids must fit in 32 bits" })
}

fn push_valid(edges: &mut EdgeStore, edge: Edge) {
    // endpoints are drawn below node_count
    if let Err(e) = edges.push(edge) { debug_assert!(false, "generated edge rejected: {e}"); }
}
