use std::collections::HashMap;

use fixedbitset::FixedBitSet;
use itertools::Itertools;
use tracing::trace;

use super::{GraphError, VertexTrait, WeightedEdge, WeightedGraph, EMPTY_EDGE_WEIGHT};

/// Fixed-capacity undirected weighted graph over an adjacency matrix.
///
/// Vertices live in a positionally-indexed slot vector; removing one leaves
/// a tombstone (`None`) so the surviving slots keep their indices. A
/// tombstoned slot is never handed to another vertex, so every slot is
/// consumed at most once and capacity is spent for good. Edge weights live
/// in a flat row-major `capacity * capacity` matrix where zero means "no
/// edge"; adding an edge writes exactly one of the two mirrored cells, so
/// every lookup probes both.
pub struct DenseWeightedGraph<N> {
    capacity: usize,
    slots: Vec<Option<N>>,
    weights: Vec<i64>,
    vertices_count: usize,
    edges_count: usize,
    first_inserted: Option<N>,
}

impl<N: VertexTrait> DenseWeightedGraph<N> {
    pub const DEFAULT_CAPACITY: usize = 10;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            slots: Vec::with_capacity(capacity),
            weights: vec![EMPTY_EDGE_WEIGHT; capacity * capacity],
            vertices_count: 0,
            edges_count: 0,
            first_inserted: None,
        }
    }

    /// The slot/matrix capacity fixed at construction.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn index_of(&self, vertex: &N) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.as_ref() == Some(vertex))
    }

    fn require_index(&self, vertex: &N) -> Result<usize, GraphError> {
        self.index_of(vertex).ok_or(GraphError::VertexNotFound)
    }

    fn weight_at(&self, row: usize, column: usize) -> i64 {
        self.weights[row * self.capacity + column]
    }

    fn set_weight(&mut self, row: usize, column: usize, weight: i64) {
        self.weights[row * self.capacity + column] = weight;
    }

    /// The stored weight between two slots, whichever cell holds it.
    fn weight_between(&self, a: usize, b: usize) -> i64 {
        let direct = self.weight_at(a, b);
        if direct != EMPTY_EDGE_WEIGHT {
            direct
        } else {
            self.weight_at(b, a)
        }
    }

    fn edge_exists(&self, a: usize, b: usize) -> bool {
        self.weight_between(a, b) != EMPTY_EDGE_WEIGHT
    }

    /// Live `(slot, vertex)` pairs.
    fn live_slots(&self) -> impl Iterator<Item = (usize, N)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.map(|vertex| (idx, vertex)))
    }
}

impl<N: VertexTrait> Default for DenseWeightedGraph<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: VertexTrait> WeightedGraph for DenseWeightedGraph<N> {
    type Vertex = N;

    fn vertices_count(&self) -> usize {
        self.vertices_count
    }

    fn edges_count(&self) -> usize {
        self.edges_count
    }

    fn vertices(&self) -> Vec<N> {
        self.slots.iter().flatten().copied().collect()
    }

    fn add_vertex(&mut self, vertex: N) -> Result<bool, GraphError> {
        if self.has_vertex(vertex) {
            return Ok(false);
        }
        if self.slots.len() >= self.capacity {
            return Err(GraphError::CapacityExceeded(self.capacity));
        }
        if self.vertices_count == 0 {
            self.first_inserted = Some(vertex);
        }
        self.slots.push(Some(vertex));
        self.vertices_count += 1;
        Ok(true)
    }

    fn remove_vertex(&mut self, vertex: N) -> bool {
        if self.vertices_count == 0 {
            return false;
        }
        let Some(removed) = self.index_of(&vertex) else {
            return false;
        };

        // tombstone the slot; its index stays reserved
        self.slots[removed] = None;
        self.vertices_count -= 1;

        let mut cleared = 0;
        for other in 0..self.slots.len() {
            if self.edge_exists(removed, other) {
                self.set_weight(removed, other, EMPTY_EDGE_WEIGHT);
                self.set_weight(other, removed, EMPTY_EDGE_WEIGHT);
                self.edges_count -= 1;
                cleared += 1;
            }
        }
        trace!(incident_edges = cleared, "removed vertex from dense graph");

        true
    }

    fn has_vertex(&self, vertex: N) -> bool {
        self.index_of(&vertex).is_some()
    }

    fn add_edge(&mut self, source: N, destination: N, weight: i64) -> bool {
        if weight == EMPTY_EDGE_WEIGHT || source == destination {
            return false;
        }
        let (Some(src), Some(dst)) = (self.index_of(&source), self.index_of(&destination)) else {
            return false;
        };
        if self.edge_exists(src, dst) {
            return false;
        }

        self.set_weight(src, dst, weight);
        self.edges_count += 1;
        true
    }

    fn remove_edge(&mut self, source: N, destination: N) -> Result<bool, GraphError> {
        let src = self.require_index(&source)?;
        let dst = self.require_index(&destination)?;
        if !self.edge_exists(src, dst) {
            return Ok(false);
        }

        self.set_weight(src, dst, EMPTY_EDGE_WEIGHT);
        self.set_weight(dst, src, EMPTY_EDGE_WEIGHT);
        self.edges_count -= 1;
        Ok(true)
    }

    fn update_edge_weight(
        &mut self,
        source: N,
        destination: N,
        weight: i64,
    ) -> Result<bool, GraphError> {
        let src = self.require_index(&source)?;
        let dst = self.require_index(&destination)?;
        if weight == EMPTY_EDGE_WEIGHT {
            return Ok(false);
        }

        // overwrite whichever cell currently holds the weight
        if self.weight_at(src, dst) != EMPTY_EDGE_WEIGHT {
            self.set_weight(src, dst, weight);
            Ok(true)
        } else if self.weight_at(dst, src) != EMPTY_EDGE_WEIGHT {
            self.set_weight(dst, src, weight);
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn has_edge(&self, source: N, destination: N) -> bool {
        match (self.index_of(&source), self.index_of(&destination)) {
            (Some(src), Some(dst)) => self.edge_exists(src, dst),
            _ => false,
        }
    }

    fn get_edge(&self, source: N, destination: N) -> Result<Option<WeightedEdge<N>>, GraphError> {
        let src = self.require_index(&source)?;
        let dst = self.require_index(&destination)?;
        let weight = self.weight_between(src, dst);
        Ok((weight != EMPTY_EDGE_WEIGHT).then(|| WeightedEdge::new(source, destination, weight)))
    }

    fn get_edge_weight(&self, source: N, destination: N) -> Result<Option<i64>, GraphError> {
        let src = self.require_index(&source)?;
        let dst = self.require_index(&destination)?;
        let weight = self.weight_between(src, dst);
        Ok((weight != EMPTY_EDGE_WEIGHT).then_some(weight))
    }

    fn edges(&self) -> Vec<WeightedEdge<N>> {
        let width = self.slots.len();
        // the weight of a pair may sit in either cell, so the scan walks all
        // ordered pairs and a bitset keyed by the unordered pair deduplicates
        let mut seen = FixedBitSet::with_capacity(width * width);
        let mut all = Vec::with_capacity(self.edges_count);
        for (row, column) in (0..width).cartesian_product(0..width) {
            let (Some(source), Some(destination)) = (self.slots[row], self.slots[column]) else {
                continue;
            };
            if row == column {
                continue;
            }
            let key = if row < column {
                row * width + column
            } else {
                column * width + row
            };
            if seen.contains(key) {
                continue;
            }
            let weight = self.weight_between(row, column);
            if weight != EMPTY_EDGE_WEIGHT {
                seen.insert(key);
                all.push(WeightedEdge::new(source, destination, weight));
            }
        }

        all
    }

    fn outgoing_edges(&self, vertex: N) -> Result<Vec<WeightedEdge<N>>, GraphError> {
        let idx = self.require_index(&vertex)?;
        Ok(self
            .live_slots()
            .filter(|&(other, _)| self.edge_exists(idx, other))
            .map(|(other, n)| WeightedEdge::new(vertex, n, self.weight_between(idx, other)))
            .collect())
    }

    fn incoming_edges(&self, vertex: N) -> Result<Vec<WeightedEdge<N>>, GraphError> {
        let idx = self.require_index(&vertex)?;
        Ok(self
            .live_slots()
            .filter(|&(other, _)| self.edge_exists(idx, other))
            .map(|(other, n)| WeightedEdge::new(n, vertex, self.weight_between(idx, other)))
            .collect())
    }

    fn neighbours(&self, vertex: N) -> Vec<N> {
        let Some(idx) = self.index_of(&vertex) else {
            return Vec::new();
        };
        self.live_slots()
            .filter(|&(other, _)| self.edge_exists(idx, other))
            .map(|(_, n)| n)
            .collect()
    }

    fn neighbours_map(&self, vertex: N) -> Option<HashMap<N, i64>> {
        let idx = self.index_of(&vertex)?;
        Some(
            self.live_slots()
                .filter_map(|(other, n)| {
                    let weight = self.weight_between(idx, other);
                    (weight != EMPTY_EDGE_WEIGHT).then_some((n, weight))
                })
                .collect(),
        )
    }

    fn degree(&self, vertex: N) -> Result<usize, GraphError> {
        let idx = self.require_index(&vertex)?;
        Ok((0..self.slots.len())
            .filter(|&other| self.slots[other].is_some() && self.edge_exists(idx, other))
            .count())
    }

    fn traversal_root(&self) -> Option<N> {
        self.first_inserted
    }

    fn clear(&mut self) {
        self.slots.clear();
        self.weights.fill(EMPTY_EDGE_WEIGHT);
        self.vertices_count = 0;
        self.edges_count = 0;
        self.first_inserted = None;
        trace!("cleared dense graph");
    }
}
