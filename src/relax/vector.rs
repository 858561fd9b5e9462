//! Batched gather/add/compare/scatter relaxation.
//!
//! Each batch of `W` consecutive edges gathers `distance[src]` and
//! `distance[dst]` for every lane, computes `candidate = src + w`, masks the
//! lanes where `candidate < dst` (and the source is reached), then scatters.
//! All lanes gather before any lane scatters, so a lane never sees another
//! lane's write from the same batch. The scatter re-checks the slot, so two
//! lanes hitting one destination leave the smaller candidate behind whatever
//! their order. The trailing partial batch runs the same code over its true
//! length.

use serde::Serialize;

use super::{RelaxContext, RelaxStats};
use crate::error::{Result, SsspError};
use crate::graph::{Distance, EdgeStore, NodeId, Weight, UNREACHED};

pub const SUPPORTED_LANES: [usize; 5] = [1, 2, 4, 8, 16];

/// Batch kernel implementation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Kernel {
    /// Fixed-size array lanes; the compiler vectorises what it can.
    Portable,
    /// 4-lane AVX2 gathers (`simd` feature, x86_64, detected at run time).
    Avx2,
}

impl Kernel {
    /// Best kernel for this machine. AVX2 needs a lane width that is a multiple
    /// of 4 and node ids that fit the signed 32-bit gather index.
    pub fn detect(lanes: usize, node_count: usize) -> Self {
        #[cfg(all(feature = "simd", target_arch = "x86_64"))]
        {
            if lanes % 4 == 0 && node_count <= i32::MAX as usize && is_x86_feature_detected!("avx2") {
                return Kernel::Avx2;
            }
        }
        let _ = (lanes, node_count);
        Kernel::Portable
    }

    /// `self` if it can run here, otherwise the portable kernel.
    fn usable(self, lanes: usize, node_count: usize) -> Self {
        match self {
            Kernel::Avx2 if Kernel::detect(lanes, node_count) == Kernel::Avx2 => Kernel::Avx2,
            _ => Kernel::Portable,
        }
    }
}

pub fn relax_vectorized(ctx: &mut RelaxContext<'_>, lanes: usize) -> Result<RelaxStats> {
    let kernel = Kernel::detect(lanes, ctx.edges().node_count());
    relax_vectorized_with(ctx, lanes, kernel)
}

/// Like [`relax_vectorized`] with an explicit kernel. An unavailable kernel
/// degrades to [`Kernel::Portable`].
pub fn relax_vectorized_with(ctx: &mut RelaxContext<'_>, lanes: usize, kernel: Kernel) -> Result<RelaxStats> {
    check_lanes(lanes)?;
    let kernel = kernel.usable(lanes, ctx.edges().node_count());
    tracing::debug!(lanes, ?kernel, edges = ctx.edges().len(), "vector relax starting");
    let stats = match lanes {
        1 => run::<1>(ctx, kernel),
        2 => run::<2>(ctx, kernel),
        4 => run::<4>(ctx, kernel),
        8 => run::<8>(ctx, kernel),
        _ => run::<16>(ctx, kernel),
    };
    tracing::debug!(sweeps = stats.sweeps, relaxations = stats.relaxations, converged = stats.converged, "vector relax finished");
    Ok(stats)
}

pub(crate) fn check_lanes(lanes: usize) -> Result<()> {
    if SUPPORTED_LANES.contains(&lanes) { Ok(()) } else {
        Err(SsspError::InvalidParameter { name: "lanes", value: lanes, reason: "must be 1, 2, 4, 8 or 16" })
    }
}

fn run<const W: usize>(ctx: &mut RelaxContext<'_>, kernel: Kernel) -> RelaxStats {
    let (edges, dist, max_sweeps) = ctx.parts_mut();
    if edges.is_empty() { return RelaxStats::trivially_converged(); }
    let mut stats = RelaxStats::default();
    for sweep in 0..max_sweeps {
        let relaxed = sweep_batches::<W>(edges, dist, kernel);
        stats.sweeps = sweep + 1;
        stats.relaxations += relaxed;
        tracing::trace!(sweep, relaxed, "vector sweep");
        if relaxed == 0 { stats.converged = true; break; }
    }
    stats
}

fn sweep_batches<const W: usize>(edges: &EdgeStore, dist: &mut [Distance], kernel: Kernel) -> u64 {
    let (src, dst, wts) = (edges.sources(), edges.destinations(), edges.weights());
    let mut relaxed = 0;
    let mut start = 0;
    while start < wts.len() {
        let end = (start + W).min(wts.len());
        let (s, d, w) = (&src[start..end], &dst[start..end], &wts[start..end]);
        relaxed += match kernel {
            // Safety: Avx2 is only selected after detection, the batch is full
            // and W is a multiple of 4; ids were validated against node_count
            // == dist.len() <= i32::MAX.
            #[cfg(all(feature = "simd", target_arch = "x86_64"))]
            Kernel::Avx2 if W % 4 == 0 && end - start == W => unsafe { avx2::relax_batch::<W>(s, d, w, dist) },
            _ => relax_batch::<W>(s, d, w, dist),
        };
        start = end;
    }
    relaxed
}

/// Portable batch of up to `W` lanes.
#[inline(always)]
fn relax_batch<const W: usize>(src: &[NodeId], dst: &[NodeId], wts: &[Weight], dist: &mut [Distance]) -> u64 {
    let len = wts.len();
    debug_assert!(len <= W);
    let mut cand = [0 as Distance; W];
    let mut mask = [false; W];
    for i in 0..len {
        let du = dist[src[i] as usize];
        let dv = dist[dst[i] as usize];
        cand[i] = du + wts[i] as Distance;
        mask[i] = du < UNREACHED && cand[i] < dv;
    }
    let mut relaxed = 0;
    for i in 0..len {
        if !mask[i] { continue; }
        let slot = &mut dist[dst[i] as usize];
        if cand[i] < *slot { *slot = cand[i]; relaxed += 1; }
    }
    relaxed
}

#[cfg(all(feature = "simd", target_arch = "x86_64"))]
mod avx2 {
    use std::arch::x86_64::*;

    use crate::graph::{Distance, NodeId, Weight, UNREACHED};

    /// Full batch of `W` lanes (W a multiple of 4) as W/4 AVX2 gathers.
    ///
    /// # Safety
    /// AVX2 must be available; `src`, `dst` and `wts` must hold exactly `W`
    /// elements; every id must index `dist`, and `dist.len() <= i32::MAX`.
    #[target_feature(enable = "avx2")]
    pub(super) unsafe fn relax_batch<const W: usize>(src: &[NodeId], dst: &[NodeId], wts: &[Weight], dist: &mut [Distance]) -> u64 {
        debug_assert!(W % 4 == 0 && wts.len() == W);
        let base = dist.as_ptr();
        let unreached = _mm256_set1_epi64x(UNREACHED);
        let mut cand = [0 as Distance; W];
        let mut mask: u32 = 0;
        let mut c = 0;
        while c < W {
            let vs = _mm_loadu_si128(src.as_ptr().add(c) as *const __m128i);
            let vd = _mm_loadu_si128(dst.as_ptr().add(c) as *const __m128i);
            let vw = _mm256_cvtepi32_epi64(_mm_loadu_si128(wts.as_ptr().add(c) as *const __m128i));
            let ds = _mm256_i32gather_epi64::<8>(base, vs);
            let dd = _mm256_i32gather_epi64::<8>(base, vd);
            let nd = _mm256_add_epi64(ds, vw);
            let lane = _mm256_and_si256(_mm256_cmpgt_epi64(dd, nd), _mm256_cmpgt_epi64(unreached, ds));
            _mm256_storeu_si256(cand.as_mut_ptr().add(c) as *mut __m256i, nd);
            mask |= (_mm256_movemask_pd(_mm256_castsi256_pd(lane)) as u32) << c;
            c += 4;
        }
        let mut relaxed = 0;
        while mask != 0 {
            let i = mask.trailing_zeros() as usize;
            mask &= mask - 1;
            let slot = &mut dist[dst[i] as usize];
            if cand[i] < *slot { *slot = cand[i]; relaxed += 1; }
        }
        relaxed
    }
}
