//! Property-based tests for the relaxers, the checker and tiling.
//!
//! Cycle-free inputs come from forward-only edge lists (`u < v` after
//! ordering), which can carry negative weights safely.

use proptest::prelude::*;
use bf_sssp_core::{
    first_relaxable_edge, relax_sequential, solve, tile_by_destination, Distance, EdgeStore, NodeId, RelaxContext,
    RunConfig, SyncMode, Weight, SUPPORTED_LANES, UNREACHED,
};

/// Arbitrary graph: node count plus edges with in-range endpoints.
fn any_graph(max_nodes: u32, weights: std::ops::Range<Weight>) -> impl Strategy<Value = EdgeStore> {
    (1..=max_nodes).prop_flat_map(move |n| {
        prop::collection::vec((0..n, 0..n, weights.clone()), 0..(n as usize * 4))
            .prop_map(move |triples| EdgeStore::from_triples(n as usize, &triples).unwrap())
    })
}

/// Acyclic graph: every edge points from the smaller id to the larger one.
fn dag(max_nodes: u32) -> impl Strategy<Value = EdgeStore> {
    (2..=max_nodes).prop_flat_map(|n| {
        prop::collection::vec((0..n, 0..n, -10i32..20), 0..(n as usize * 4)).prop_map(move |raw| {
            let triples: Vec<(NodeId, NodeId, Weight)> =
                raw.into_iter().filter(|&(u, v, _)| u != v).map(|(u, v, w)| (u.min(v), u.max(v), w)).collect();
            EdgeStore::from_triples(n as usize, &triples).unwrap()
        })
    })
}

fn sequential(edges: &EdgeStore) -> Vec<Distance> {
    let mut ctx = RelaxContext::new(edges, 0).unwrap();
    relax_sequential(&mut ctx);
    ctx.into_distances().into_vec()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Tiling permutes the edge list without touching any triple.
    #[test]
    fn tiling_preserves_edge_multiset(edges in any_graph(64, -50..50), tile in 1usize..40) {
        let mut tiled = edges.clone();
        tile_by_destination(&mut tiled, tile).unwrap();
        let mut before: Vec<_> = edges.iter().map(|e| (e.source, e.destination, e.weight)).collect();
        let mut after: Vec<_> = tiled.iter().map(|e| (e.source, e.destination, e.weight)).collect();
        prop_assert!(tiled.destinations().windows(2).all(|w| w[0] as usize / tile <= w[1] as usize / tile));
        before.sort_unstable();
        after.sort_unstable();
        prop_assert_eq!(before, after);
    }

    /// On a cycle-free graph no reached edge stays relaxable and the source is 0.
    #[test]
    fn sequential_is_a_fixed_point(edges in dag(48)) {
        let dist = sequential(&edges);
        prop_assert_eq!(dist[0], 0);
        for e in edges.iter() {
            let du = dist[e.source as usize];
            if du < UNREACHED {
                prop_assert!(dist[e.destination as usize] <= du + e.weight as Distance);
            }
        }
    }

    /// Lockstep partitioned and every vector width agree with sequential.
    #[test]
    fn strategies_agree_on_dags(edges in dag(48), threads in 1usize..6, lane_idx in 0usize..5, tile in 0usize..20) {
        let truth = sequential(&edges);
        let mut work = edges.clone();
        let part = solve(&mut work, 0, &RunConfig::partitioned(threads).with_sync(SyncMode::Lockstep)).unwrap();
        prop_assert_eq!(part.distances.as_slice(), truth.as_slice());
        prop_assert!(!part.negative_cycle);

        let mut cfg = RunConfig::vector(SUPPORTED_LANES[lane_idx]);
        if tile > 0 { cfg = cfg.with_tile_size(tile); }
        let vec_out = solve(&mut work, 0, &cfg).unwrap();
        prop_assert_eq!(vec_out.distances.as_slice(), truth.as_slice());
        prop_assert!(!vec_out.negative_cycle);
    }

    /// The checker never mutates and gives the same answer twice, cycles or not.
    #[test]
    fn checker_is_idempotent(edges in any_graph(32, -5..10)) {
        let mut ctx = RelaxContext::new(&edges, 0).unwrap();
        relax_sequential(&mut ctx);
        let dist = ctx.into_distances();
        let snapshot = dist.clone();
        let first = first_relaxable_edge(&edges, &dist);
        prop_assert_eq!(first, first_relaxable_edge(&edges, &dist));
        prop_assert_eq!(dist, snapshot);
    }

    /// Independent workers only ever report real path lengths.
    #[test]
    fn independent_distances_are_upper_bounds(edges in dag(48), threads in 1usize..6) {
        let truth = sequential(&edges);
        let mut work = edges.clone();
        let out = solve(&mut work, 0, &RunConfig::partitioned(threads).with_sync(SyncMode::Independent)).unwrap();
        for (&got, &want) in out.distances.as_slice().iter().zip(&truth) {
            prop_assert!(got >= want);
        }
    }
}
