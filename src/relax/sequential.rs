//! Single-threaded fixed-point iteration over the whole edge list.

use super::{candidate, RelaxContext, RelaxStats};

pub fn relax_sequential(ctx: &mut RelaxContext<'_>) -> RelaxStats {
    let (edges, dist, max_sweeps) = ctx.parts_mut();
    if edges.is_empty() { return RelaxStats::trivially_converged(); }
    let (src, dst, wts) = (edges.sources(), edges.destinations(), edges.weights());
    let mut stats = RelaxStats::default();
    for sweep in 0..max_sweeps {
        let mut relaxed: u64 = 0;
        for e in 0..wts.len() {
            let Some(nd) = candidate(dist[src[e] as usize], wts[e]) else { continue };
            let v = dst[e] as usize;
            if nd < dist[v] { dist[v] = nd; relaxed += 1; }
        }
        stats.sweeps = sweep + 1;
        stats.relaxations += relaxed;
        tracing::trace!(sweep, relaxed, "sequential sweep");
        if relaxed == 0 { stats.converged = true; break; }
    }
    tracing::debug!(sweeps = stats.sweeps, relaxations = stats.relaxations, converged = stats.converged, "sequential relax finished");
    stats
}
