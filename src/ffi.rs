//! Stable C ABI over [`crate::solve`].
//!
//! Edges arrive as three parallel arrays of length `m`; the library copies
//! them, so caller buffers are never reordered by tiling. `out_dist` receives
//! `n` distances with unreachable nodes set to [`bf_unreached`].
//!
//! Return codes: `0` ok, `-1` empty graph, `-2` node id out of range,
//! `-3` null pointer, `-6` invalid run parameter.

use core::slice;

use crate::config::RunConfig;
use crate::engine::solve;
use crate::graph::{Distance, Edge, EdgeStore, NodeId, Weight, UNREACHED};
use crate::relax::SyncMode;

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BfResultInfo {
    pub relaxations: u64, // successful distance updates
    pub sweeps: u32,      // sweeps run (longest worker when partitioned)
    pub negative_cycle: i32, // 1 when a reachable negative cycle was detected
    pub error_code: i32,  // 0 == success
}

#[no_mangle]
pub extern "C" fn bf_version() -> u32 { 1 }

#[no_mangle]
pub extern "C" fn bf_unreached() -> i64 { UNREACHED }

/// # Safety
/// `sources`, `destinations` and `weights` must each point to `m` readable
/// elements (they may be null when `m == 0`); `out_dist` must point to `n`
/// writable slots; `info` is either null or writable.
#[no_mangle]
pub unsafe extern "C" fn bf_run_sequential(
    n: u32,
    sources: *const u32,
    destinations: *const u32,
    weights: *const i32,
    m: u32,
    source: u32,
    out_dist: *mut i64,
    info: *mut BfResultInfo,
) -> i32 {
    run_raw(RawGraph { n, sources, destinations, weights, m }, source, out_dist, info, RunConfig::sequential())
}

/// `sync`: 0 = lockstep, 1 = independent workers.
///
/// # Safety
/// Same contract as [`bf_run_sequential`].
#[no_mangle]
pub unsafe extern "C" fn bf_run_partitioned(
    n: u32,
    sources: *const u32,
    destinations: *const u32,
    weights: *const i32,
    m: u32,
    source: u32,
    threads: u32,
    sync: i32,
    out_dist: *mut i64,
    info: *mut BfResultInfo,
) -> i32 {
    let sync = match sync {
        0 => SyncMode::Lockstep,
        1 => SyncMode::Independent,
        _ => return fail(info, -6),
    };
    let config = RunConfig::partitioned(threads as usize).with_sync(sync);
    run_raw(RawGraph { n, sources, destinations, weights, m }, source, out_dist, info, config)
}

/// `tile_size == 0` skips tiling.
///
/// # Safety
/// Same contract as [`bf_run_sequential`].
#[no_mangle]
pub unsafe extern "C" fn bf_run_vector(
    n: u32,
    sources: *const u32,
    destinations: *const u32,
    weights: *const i32,
    m: u32,
    source: u32,
    lanes: u32,
    tile_size: u32,
    out_dist: *mut i64,
    info: *mut BfResultInfo,
) -> i32 {
    let mut config = RunConfig::vector(lanes as usize);
    if tile_size > 0 { config = config.with_tile_size(tile_size as usize); }
    run_raw(RawGraph { n, sources, destinations, weights, m }, source, out_dist, info, config)
}

struct RawGraph {
    n: u32,
    sources: *const NodeId,
    destinations: *const NodeId,
    weights: *const Weight,
    m: u32,
}

/// # Safety
/// `info` is either null or valid for writes.
#[inline]
unsafe fn fail(info: *mut BfResultInfo, code: i32) -> i32 {
    if !info.is_null() { *info = BfResultInfo { error_code: code, ..BfResultInfo::default() }; }
    code
}

unsafe fn run_raw(g: RawGraph, source: u32, out_dist: *mut Distance, info: *mut BfResultInfo, config: RunConfig) -> i32 {
    if g.n == 0 { return fail(info, -1); }
    if source >= g.n { return fail(info, -2); }
    let m = g.m as usize;
    if out_dist.is_null() || (m > 0 && (g.sources.is_null() || g.destinations.is_null() || g.weights.is_null())) {
        return fail(info, -3);
    }

    let mut edges = EdgeStore::with_capacity(g.n as usize, m);
    if m > 0 {
        let src = slice::from_raw_parts(g.sources, m);
        let dst = slice::from_raw_parts(g.destinations, m);
        let wts = slice::from_raw_parts(g.weights, m);
        for e in 0..m {
            if let Err(err) = edges.push(Edge::new(src[e], dst[e], wts[e])) { return fail(info, err.code()); }
        }
    }

    let outcome = match solve(&mut edges, source, &config) {
        Ok(o) => o,
        Err(err) => return fail(info, err.code()),
    };
    let dist = slice::from_raw_parts_mut(out_dist, g.n as usize);
    dist.copy_from_slice(outcome.distances.as_slice());
    if !info.is_null() {
        *info = BfResultInfo {
            relaxations: outcome.stats.relaxations,
            sweeps: u32::try_from(outcome.stats.sweeps).unwrap_or(u32::MAX),
            negative_cycle: outcome.negative_cycle as i32,
            error_code: 0,
        };
    }
    0
}
