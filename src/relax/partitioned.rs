//! Edge-range partitioned relaxation on scoped worker threads.
//!
//! Worker `tid` owns edges `[tid*bsize, min((tid+1)*bsize, E))`. Ranges group
//! edges by position, not by destination, so two workers can target the same
//! slot. Every write is an atomic `fetch_min`, so a slot only ever moves down
//! and a stale read can delay convergence but never undo a better distance.
//!
//! [`SyncMode::Lockstep`] separates sweeps with a barrier and stops all workers
//! on the first sweep that is quiet everywhere; it reaches the same fixed point
//! as the sequential relaxer within the same `N-1` bound.
//! [`SyncMode::Independent`] lets every worker stop as soon as its own slice
//! is quiet. A worker may then exit before another one lowers a source it
//! depends on, leaving relaxable edges behind; the cycle checker reports those
//! as a negative cycle. Distances remain valid upper bounds either way.

use std::ops::Range;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Barrier;
use std::thread;

use serde::{Deserialize, Serialize};

use super::{candidate, RelaxContext, RelaxStats};
use crate::error::{Result, SsspError};
use crate::graph::EdgeStore;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncMode {
    /// Barrier between sweeps, global quiet-sweep exit.
    #[default]
    Lockstep,
    /// Per-worker loops with no coordination until the final join.
    Independent,
}

impl FromStr for SyncMode {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lockstep" => Ok(SyncMode::Lockstep),
            "independent" => Ok(SyncMode::Independent),
            other => Err(format!("unknown sync mode '{other}'")),
        }
    }
}

/// Contiguous edge ranges, one per worker. `bsize = ceil(E / T)` and the last
/// range is clamped to `E`; the worker count shrinks so no range is empty
/// (a single empty range is returned when `E == 0`).
pub fn partition_ranges(edge_count: usize, threads: usize) -> Vec<Range<usize>> {
    let wanted = threads.min(edge_count).max(1);
    let bsize = edge_count.div_ceil(wanted).max(1);
    let workers = edge_count.div_ceil(bsize).max(1);
    (0..workers).map(|tid| (tid * bsize).min(edge_count)..((tid + 1) * bsize).min(edge_count)).collect()
}

#[derive(Copy, Clone, Debug, Default)]
struct WorkerOutcome { sweeps: usize, relaxations: u64, quiet: bool }

pub fn relax_partitioned(ctx: &mut RelaxContext<'_>, threads: usize, sync: SyncMode) -> Result<RelaxStats> {
    if threads == 0 {
        return Err(SsspError::InvalidParameter { name: "threads", value: 0, reason: "at least one worker is required" });
    }
    let (edges, dist, max_sweeps) = ctx.parts_mut();
    if edges.is_empty() { return Ok(RelaxStats::trivially_converged()); }

    let ranges = partition_ranges(edges.len(), threads);
    let shared: Vec<AtomicI64> = dist.iter().map(|&d| AtomicI64::new(d)).collect();
    tracing::debug!(workers = ranges.len(), edges = edges.len(), ?sync, "partitioned relax starting");

    let outcomes = match sync {
        SyncMode::Lockstep => run_lockstep(edges, &shared, &ranges, max_sweeps),
        SyncMode::Independent => run_independent(edges, &shared, &ranges, max_sweeps),
    };
    for (slot, cell) in dist.iter_mut().zip(shared) { *slot = cell.into_inner(); }

    let stats = RelaxStats {
        sweeps: outcomes.iter().map(|o| o.sweeps).max().unwrap_or(0),
        relaxations: outcomes.iter().map(|o| o.relaxations).sum(),
        converged: outcomes.iter().all(|o| o.quiet),
        worker_sweeps: outcomes.iter().map(|o| o.sweeps).collect(),
    };
    tracing::debug!(sweeps = stats.sweeps, relaxations = stats.relaxations, converged = stats.converged, "partitioned relax finished");
    Ok(stats)
}

/// One pass over `range`; returns how many slots it lowered.
fn sweep_range(edges: &EdgeStore, dist: &[AtomicI64], range: Range<usize>) -> u64 {
    let src = &edges.sources()[range.clone()];
    let dst = &edges.destinations()[range.clone()];
    let wts = &edges.weights()[range];
    let mut relaxed = 0;
    for ((&u, &v), &w) in src.iter().zip(dst).zip(wts) {
        let Some(nd) = candidate(dist[u as usize].load(Ordering::Relaxed), w) else { continue };
        let slot = &dist[v as usize];
        if nd < slot.load(Ordering::Relaxed) && nd < slot.fetch_min(nd, Ordering::Relaxed) { relaxed += 1; }
    }
    relaxed
}

fn run_lockstep(edges: &EdgeStore, dist: &[AtomicI64], ranges: &[Range<usize>], max_sweeps: usize) -> Vec<WorkerOutcome> {
    let barrier = Barrier::new(ranges.len());
    // Sweep s reports into flags[s % 3]. After the barrier closing sweep s the
    // leader clears flags[(s + 2) % 3]: every read of it (sweep s - 1) is done
    // and nobody writes it before passing the barrier closing sweep s + 1.
    let flags = [AtomicBool::new(false), AtomicBool::new(false), AtomicBool::new(false)];
    thread::scope(|scope| {
        let handles: Vec<_> = ranges.iter().cloned().enumerate().map(|(tid, range)| {
            let (barrier, flags) = (&barrier, &flags);
            scope.spawn(move || {
                let mut out = WorkerOutcome::default();
                for sweep in 0..max_sweeps {
                    let relaxed = sweep_range(edges, dist, range.clone());
                    out.sweeps = sweep + 1;
                    out.relaxations += relaxed;
                    let flag = &flags[sweep % 3];
                    if relaxed > 0 { flag.store(true, Ordering::Relaxed); }
                    let wait = barrier.wait();
                    let any = flag.load(Ordering::Relaxed);
                    if wait.is_leader() { flags[(sweep + 2) % 3].store(false, Ordering::Relaxed); }
                    if !any { out.quiet = true; break; }
                }
                tracing::trace!(tid, sweeps = out.sweeps, relaxations = out.relaxations, "lockstep worker done");
                out
            })
        }).collect();
        handles.into_iter().map(|h| h.join().unwrap_or_else(|e| std::panic::resume_unwind(e))).collect()
    })
}

fn run_independent(edges: &EdgeStore, dist: &[AtomicI64], ranges: &[Range<usize>], max_sweeps: usize) -> Vec<WorkerOutcome> {
    thread::scope(|scope| {
        let handles: Vec<_> = ranges.iter().cloned().enumerate().map(|(tid, range)| {
            scope.spawn(move || {
                let mut out = WorkerOutcome::default();
                for sweep in 0..max_sweeps {
                    let relaxed = sweep_range(edges, dist, range.clone());
                    out.sweeps = sweep + 1;
                    out.relaxations += relaxed;
                    if relaxed == 0 { out.quiet = true; break; }
                }
                tracing::trace!(tid, sweeps = out.sweeps, relaxations = out.relaxations, "independent worker done");
                out
            })
        }).collect();
        handles.into_iter().map(|h| h.join().unwrap_or_else(|e| std::panic::resume_unwind(e))).collect()
    })
}
