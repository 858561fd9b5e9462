//! Bellman-Ford single-source shortest paths over a flat edge list, with
//! three interchangeable relaxers exposed to Rust and through a C ABI:
//!  - sequential sweeps (the reference answer)
//!  - edge-partitioned scoped worker threads (`relax_partitioned`)
//!  - fixed-width gather/compare/scatter batches (`relax_vectorized`),
//!    optionally after tiling the edges by destination
//!
//! [`solve`] wires tiling, the chosen relaxer and the negative-cycle check
//! together; the pieces are also public for callers that want to time or
//! compose them individually.

pub mod checker;
pub mod config;
pub mod engine;
pub mod error;
pub mod ffi;
pub mod generate;
pub mod graph;
pub mod mtx;
pub mod relax;
pub mod tiling;

pub use checker::{first_relaxable_edge, has_negative_cycle};
pub use config::{RunConfig, Strategy};
pub use engine::{solve, SsspOutcome};
pub use error::{Result, SsspError};
pub use ffi::{bf_run_partitioned, bf_run_sequential, bf_run_vector, bf_unreached, bf_version, BfResultInfo};
pub use graph::{Distance, DistanceVector, Edge, EdgeStore, NodeId, Weight, UNREACHED};
pub use mtx::MtxOptions;
pub use relax::{
    partition_ranges, relax_partitioned, relax_sequential, relax_vectorized, relax_vectorized_with, Kernel,
    RelaxContext, RelaxStats, SyncMode, SUPPORTED_LANES,
};
pub use tiling::{tile_by_destination, TileReport, DEFAULT_TILE_SIZE};
