//! Destination tiling: regroup edges so consecutive edges touch nearby
//! distance slots.
//!
//! Edges are bucketed by `destination / tile_size` and the store is rewritten
//! bucket by bucket in increasing tile order, keeping the original relative
//! order inside each bucket. The result is a permutation of the input; no
//! edge is added, dropped or changed. The pass costs one counting sort, so it
//! only pays off when several sweeps follow.

use serde::Serialize;

use crate::error::{Result, SsspError};
use crate::graph::EdgeStore;

/// Tile size used when a caller asks for tiling without choosing one.
pub const DEFAULT_TILE_SIZE: usize = 1024;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TileReport {
    pub tile_size: usize,
    /// `ceil(node_count / tile_size)`.
    pub tiles: usize,
    pub occupied_tiles: usize,
    /// Edges whose index changed.
    pub moved_edges: usize,
}

pub fn tile_by_destination(edges: &mut EdgeStore, tile_size: usize) -> Result<TileReport> {
    if tile_size == 0 {
        return Err(SsspError::InvalidParameter { name: "tile_size", value: 0, reason: "tiles must span at least one node" });
    }
    let tiles = edges.node_count().div_ceil(tile_size).max(1);

    // bucket offsets: counts, then exclusive prefix sums
    let mut offsets = vec![0usize; tiles + 1];
    for &d in edges.destinations() { offsets[d as usize / tile_size + 1] += 1; }
    let occupied_tiles = offsets[1..].iter().filter(|&&c| c > 0).count();
    for t in 0..tiles { offsets[t + 1] += offsets[t]; }

    let mut order = vec![0usize; edges.len()];
    for (idx, &d) in edges.destinations().iter().enumerate() {
        let cursor = &mut offsets[d as usize / tile_size];
        order[*cursor] = idx;
        *cursor += 1;
    }
    let moved_edges = order.iter().enumerate().filter(|&(pos, &idx)| pos != idx).count();
    edges.apply_order(&order);

    let report = TileReport { tile_size, tiles, occupied_tiles, moved_edges };
    tracing::debug!(tile_size, tiles, occupied_tiles, moved_edges, "edges tiled by destination");
    Ok(report)
}
