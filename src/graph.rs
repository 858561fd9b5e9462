//! Edge store and distance vector: the only data the relaxers touch.

use serde::Serialize;

use crate::error::{Result, SsspError};

pub type NodeId = u32;
pub type Weight = i32;
pub type Distance = i64;

/// Sentinel for nodes not yet reached. Finite, and far enough from `i64::MAX`
/// that adding any `Weight` cannot overflow.
pub const UNREACHED: Distance = i64::MAX / 2;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Edge { pub source: NodeId, pub destination: NodeId, pub weight: Weight }

impl Edge {
    pub fn new(source: NodeId, destination: NodeId, weight: Weight) -> Self { Self { source, destination, weight } }
}

impl From<(NodeId, NodeId, Weight)> for Edge {
    fn from((source, destination, weight): (NodeId, NodeId, Weight)) -> Self { Self { source, destination, weight } }
}

/// Struct-of-arrays edge list. Endpoints are validated against `node_count`
/// on insertion, so relaxers can index the distance vector without checks
/// failing at run time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EdgeStore {
    node_count: usize,
    sources: Vec<NodeId>,
    destinations: Vec<NodeId>,
    weights: Vec<Weight>,
}

impl EdgeStore {
    pub fn new(node_count: usize) -> Self { Self::with_capacity(node_count, 0) }

    pub fn with_capacity(node_count: usize, edges: usize) -> Self {
        Self {
            node_count,
            sources: Vec::with_capacity(edges),
            destinations: Vec::with_capacity(edges),
            weights: Vec::with_capacity(edges),
        }
    }

    pub fn from_edges<I: IntoIterator<Item = Edge>>(node_count: usize, edges: I) -> Result<Self> {
        let iter = edges.into_iter();
        let mut store = Self::with_capacity(node_count, iter.size_hint().0);
        for e in iter { store.push(e)?; }
        Ok(store)
    }

    pub fn from_triples(node_count: usize, triples: &[(NodeId, NodeId, Weight)]) -> Result<Self> {
        Self::from_edges(node_count, triples.iter().copied().map(Edge::from))
    }

    pub fn push(&mut self, edge: Edge) -> Result<()> {
        self.check_node(edge.source)?;
        self.check_node(edge.destination)?;
        self.sources.push(edge.source);
        self.destinations.push(edge.destination);
        self.weights.push(edge.weight);
        Ok(())
    }

    #[inline]
    pub fn check_node(&self, node: NodeId) -> Result<()> {
        if (node as usize) < self.node_count { Ok(()) } else { Err(SsspError::node_out_of_range(node, self.node_count)) }
    }

    #[inline] pub fn node_count(&self) -> usize { self.node_count }
    #[inline] pub fn len(&self) -> usize { self.weights.len() }
    #[inline] pub fn is_empty(&self) -> bool { self.weights.is_empty() }
    #[inline] pub fn sources(&self) -> &[NodeId] { &self.sources }
    #[inline] pub fn destinations(&self) -> &[NodeId] { &self.destinations }
    #[inline] pub fn weights(&self) -> &[Weight] { &self.weights }

    pub fn edge(&self, idx: usize) -> Option<Edge> {
        Some(Edge { source: *self.sources.get(idx)?, destination: self.destinations[idx], weight: self.weights[idx] })
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = Edge> + '_ {
        (0..self.len()).map(move |i| Edge { source: self.sources[i], destination: self.destinations[i], weight: self.weights[i] })
    }

    /// Rewrites the store so that new position `i` holds the edge previously at
    /// `order[i]`. `order` must be a permutation of `0..len`.
    pub(crate) fn apply_order(&mut self, order: &[usize]) {
        debug_assert_eq!(order.len(), self.len());
        self.sources = order.iter().map(|&i| self.sources[i]).collect();
        self.destinations = order.iter().map(|&i| self.destinations[i]).collect();
        self.weights = order.iter().map(|&i| self.weights[i]).collect();
    }
}

/// Current best-known distance from the source, one slot per node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DistanceVector { source: NodeId, slots: Vec<Distance> }

impl DistanceVector {
    /// All slots `UNREACHED` except `source`, which starts at 0.
    pub fn new(node_count: usize, source: NodeId) -> Result<Self> {
        if source as usize >= node_count { return Err(SsspError::node_out_of_range(source, node_count)); }
        let mut slots = vec![UNREACHED; node_count];
        slots[source as usize] = 0;
        Ok(Self { source, slots })
    }

    #[inline] pub fn source(&self) -> NodeId { self.source }
    #[inline] pub fn len(&self) -> usize { self.slots.len() }
    #[inline] pub fn is_empty(&self) -> bool { self.slots.is_empty() }
    #[inline] pub fn as_slice(&self) -> &[Distance] { &self.slots }
    #[inline] pub(crate) fn as_mut_slice(&mut self) -> &mut [Distance] { &mut self.slots }

    /// `Ok(None)` when `node` has not been reached.
    pub fn get(&self, node: NodeId) -> Result<Option<Distance>> {
        match self.slots.get(node as usize) {
            Some(&d) if d >= UNREACHED => Ok(None),
            Some(&d) => Ok(Some(d)),
            None => Err(SsspError::node_out_of_range(node, self.slots.len())),
        }
    }

    pub fn reached_count(&self) -> usize { self.slots.iter().filter(|&&d| d < UNREACHED).count() }

    pub fn into_vec(self) -> Vec<Distance> { self.slots }
}
