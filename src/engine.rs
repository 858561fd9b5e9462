//! One-call driver: optional tiling, the configured relaxer, then the cycle
//! check.

use serde::Serialize;

use crate::checker::has_negative_cycle;
use crate::config::{RunConfig, Strategy};
use crate::error::Result;
use crate::graph::{Distance, DistanceVector, EdgeStore, NodeId};
use crate::relax::{relax_partitioned, relax_sequential, relax_vectorized, RelaxContext, RelaxStats};
use crate::tiling::{tile_by_destination, TileReport};

#[derive(Clone, Debug, Serialize)]
pub struct SsspOutcome {
    pub strategy: Strategy,
    pub distances: DistanceVector,
    /// Set when an edge was still relaxable after the final sweep.
    pub negative_cycle: bool,
    pub stats: RelaxStats,
    pub tiling: Option<TileReport>,
}

impl SsspOutcome {
    /// Distance from the source to `node`; `Ok(None)` if unreachable.
    pub fn distance(&self, node: NodeId) -> Result<Option<Distance>> { self.distances.get(node) }
}

/// Runs single-source shortest paths from `source` with the strategy in
/// `config`. Vector runs with a tile size permute `edges` in place first.
pub fn solve(edges: &mut EdgeStore, source: NodeId, config: &RunConfig) -> Result<SsspOutcome> {
    config.validate()?;
    edges.check_node(source)?;

    let tiling = match (config.strategy, config.tile_size) {
        (Strategy::Vector, Some(tile)) => Some(tile_by_destination(edges, tile)?),
        (_, Some(_)) => {
            tracing::debug!(strategy = %config.strategy, "tile size ignored outside vector runs");
            None
        }
        _ => None,
    };

    let edges: &EdgeStore = edges;
    let mut ctx = RelaxContext::new(edges, source)?;
    let stats = match config.strategy {
        Strategy::Sequential => relax_sequential(&mut ctx),
        Strategy::Partitioned => relax_partitioned(&mut ctx, config.threads, config.sync)?,
        Strategy::Vector => relax_vectorized(&mut ctx, config.lanes)?,
    };
    let distances = ctx.into_distances();
    let negative_cycle = has_negative_cycle(edges, &distances);

    tracing::info!(
        strategy = %config.strategy,
        nodes = edges.node_count(),
        edges = edges.len(),
        sweeps = stats.sweeps,
        relaxations = stats.relaxations,
        negative_cycle,
        "sssp run complete"
    );
    Ok(SsspOutcome { strategy: config.strategy, distances, negative_cycle, stats, tiling })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SsspError;

    #[test]
    fn rejects_source_outside_graph() {
        let mut edges = EdgeStore::from_triples(2, &[(0, 1, 1)]).unwrap();
        let err = solve(&mut edges, 2, &RunConfig::sequential()).unwrap_err();
        assert!(matches!(err, SsspError::NodeOutOfRange { node: 2, node_count: 2 }));
    }

    #[test]
    fn tiling_only_applies_to_vector_runs() {
        let triples = [(0, 3, 1), (0, 1, 1), (1, 2, 1)];
        let mut edges = EdgeStore::from_triples(4, &triples).unwrap();
        let mut cfg = RunConfig::sequential();
        cfg.tile_size = Some(2);
        let out = solve(&mut edges, 0, &cfg).unwrap();
        assert!(out.tiling.is_none());
        assert_eq!(edges, EdgeStore::from_triples(4, &triples).unwrap());

        let out = solve(&mut edges, 0, &RunConfig::vector(4).with_tile_size(2)).unwrap();
        assert_eq!(out.tiling.as_ref().map(|t| t.tiles), Some(2));
        assert_eq!(edges.destinations(), &[1, 3, 2]);
        assert_eq!(out.distances.as_slice(), &[0, 1, 2, 1]);
    }
}
