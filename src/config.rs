//! Run parameters for [`crate::solve`].
//!
//! Built in code, deserialised from JSON, or read from the environment:
//!   SSSP_BF_STRATEGY   sequential | partitioned | vector   (default sequential)
//!   SSSP_BF_THREADS    worker count for partitioned runs  (default: available cores)
//!   SSSP_BF_SYNC       lockstep | independent             (default lockstep)
//!   SSSP_BF_LANES      1 | 2 | 4 | 8 | 16                 (default 16)
//!   SSSP_BF_TILE_SIZE  destination tile size, 0 = off     (default off)
//! Unparseable values fall back to the default.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SsspError};
use crate::relax::{vector::check_lanes, SyncMode};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    #[default]
    Sequential,
    Partitioned,
    Vector,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Sequential, Strategy::Partitioned, Strategy::Vector];

    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Sequential => "sequential",
            Strategy::Partitioned => "partitioned",
            Strategy::Vector => "vector",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.pad(self.as_str()) }
}

impl FromStr for Strategy {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" | "serial" => Ok(Strategy::Sequential),
            "partitioned" | "pthread" | "threads" => Ok(Strategy::Partitioned),
            "vector" | "simd" => Ok(Strategy::Vector),
            other => Err(format!("unknown strategy '{other}'")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub strategy: Strategy,
    /// Partitioned only.
    pub threads: usize,
    /// Partitioned only.
    pub sync: SyncMode,
    /// Vector only.
    pub lanes: usize,
    /// Vector only; `None` skips tiling.
    pub tile_size: Option<usize>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Sequential,
            threads: default_threads(),
            sync: SyncMode::Lockstep,
            lanes: 16,
            tile_size: None,
        }
    }
}

fn default_threads() -> usize { std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1) }

fn env_parse<T: FromStr>(key: &str) -> Option<T> { std::env::var(key).ok().and_then(|v| v.trim().parse().ok()) }

impl RunConfig {
    pub fn sequential() -> Self { Self::default() }

    pub fn partitioned(threads: usize) -> Self { Self { strategy: Strategy::Partitioned, threads, ..Self::default() } }

    pub fn vector(lanes: usize) -> Self { Self { strategy: Strategy::Vector, lanes, ..Self::default() } }

    pub fn with_sync(mut self, sync: SyncMode) -> Self { self.sync = sync; self }

    pub fn with_tile_size(mut self, tile_size: usize) -> Self { self.tile_size = Some(tile_size); self }

    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Some(s) = env_parse("SSSP_BF_STRATEGY") { cfg.strategy = s; }
        if let Some(t) = env_parse("SSSP_BF_THREADS") { cfg.threads = t; }
        if let Some(s) = env_parse("SSSP_BF_SYNC") { cfg.sync = s; }
        if let Some(l) = env_parse("SSSP_BF_LANES") { cfg.lanes = l; }
        if let Some(t) = env_parse::<usize>("SSSP_BF_TILE_SIZE") { cfg.tile_size = (t > 0).then_some(t); }
        cfg
    }

    /// Checks the parameters the selected strategy will use.
    pub fn validate(&self) -> Result<()> {
        match self.strategy {
            Strategy::Sequential => Ok(()),
            Strategy::Partitioned if self.threads == 0 => {
                Err(SsspError::InvalidParameter { name: "threads", value: 0, reason: "at least one worker is required" })
            }
            Strategy::Partitioned => Ok(()),
            Strategy::Vector => {
                check_lanes(self.lanes)?;
                match self.tile_size {
                    Some(0) => Err(SsspError::InvalidParameter { name: "tile_size", value: 0, reason: "tiles must span at least one node" }),
                    _ => Ok(()),
                }
            }
        }
    }
}
