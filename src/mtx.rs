//! Loader for Matrix-Market-style coordinate edge lists.
//!
//! ```text
//! % comment lines start with '%'
//! <rows> <cols> <edge_count>
//! <source> <destination> <weight>
//! ...
//! ```
//! Tokens are whitespace separated; anything after the third token is
//! ignored. The node count is `max(rows, cols)`. Ids are taken as-is unless
//! [`MtxOptions::one_based`] is set, in which case 1 is subtracted. Every
//! endpoint is range checked, so a file that mixes up the convention fails
//! with [`SsspError::NodeOutOfRange`] instead of indexing past the end.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{Result, SsspError};
use crate::graph::{Edge, EdgeStore, NodeId, Weight};

/// Upper bound on edges reserved from the header before any are read.
const MAX_PREALLOCATED_EDGES: usize = 1 << 20;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MtxOptions {
    /// Ids in the file start at 1.
    pub one_based: bool,
}

pub fn read_graph(path: impl AsRef<Path>, options: MtxOptions) -> Result<EdgeStore> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| SsspError::read_file(path, e))?;
    let edges = parse_graph(BufReader::new(file), options).map_err(|e| match e {
        SsspError::ReadFile { source, .. } => SsspError::read_file(path, source),
        other => other,
    })?;
    tracing::info!(path = %path.display(), nodes = edges.node_count(), edges = edges.len(), "graph loaded");
    Ok(edges)
}

pub fn parse_graph<R: BufRead>(reader: R, options: MtxOptions) -> Result<EdgeStore> {
    let mut store: Option<EdgeStore> = None;
    let mut expected = 0usize;
    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|e| SsspError::read_file("<reader>", e))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('%') { continue; }
        let fields = three_fields(trimmed, line_no)?;
        match store.as_mut() {
            None => {
                let rows = parse_count(fields[0], line_no, "row count")?;
                let cols = parse_count(fields[1], line_no, "column count")?;
                expected = parse_count(fields[2], line_no, "edge count")?;
                let node_count = rows.max(cols);
                if node_count.saturating_sub(1) > NodeId::MAX as usize {
                    return Err(SsspError::parse(line_no, format!("{node_count} nodes exceed the 32-bit id range")));
                }
                // header counts are untrusted; a wrong one fails the edge-count check below
                store = Some(EdgeStore::with_capacity(node_count, expected.min(MAX_PREALLOCATED_EDGES)));
            }
            Some(edges) => {
                let source = parse_node(fields[0], line_no, edges.node_count(), options)?;
                let destination = parse_node(fields[1], line_no, edges.node_count(), options)?;
                let weight: Weight = fields[2]
                    .parse()
                    .map_err(|_| SsspError::parse(line_no, format!("weight '{}' is not a 32-bit integer", fields[2])))?;
                edges.push(Edge { source, destination, weight })?;
            }
        }
    }
    let store = store.ok_or(SsspError::MissingHeader)?;
    if store.len() != expected {
        return Err(SsspError::EdgeCountMismatch { expected, found: store.len() });
    }
    Ok(store)
}

fn three_fields(line: &str, line_no: usize) -> Result<[&str; 3]> {
    let mut it = line.split_whitespace();
    match (it.next(), it.next(), it.next()) {
        (Some(a), Some(b), Some(c)) => Ok([a, b, c]),
        _ => Err(SsspError::parse(line_no, "expected three fields")),
    }
}

fn parse_count(token: &str, line_no: usize, what: &str) -> Result<usize> {
    token.parse().map_err(|_| SsspError::parse(line_no, format!("{what} '{token}' is not a non-negative integer")))
}

fn parse_node(token: &str, line_no: usize, node_count: usize, options: MtxOptions) -> Result<NodeId> {
    let raw: i64 = token.parse().map_err(|_| SsspError::parse(line_no, format!("node id '{token}' is not an integer")))?;
    let id = if options.one_based { raw - 1 } else { raw };
    if id < 0 || id as u64 >= node_count as u64 || id > NodeId::MAX as i64 {
        return Err(SsspError::node_out_of_range(raw, node_count));
    }
    Ok(id as NodeId)
}
