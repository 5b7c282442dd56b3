use std::collections::{HashMap, HashSet};

use indexmap::{map::Entry, IndexMap};
use tracing::trace;

use super::{
    GraphError, IntoWeightedEdge, VertexTrait, WeightedEdge, WeightedGraph, EMPTY_EDGE_WEIGHT,
};

/// Unbounded undirected weighted graph over per-vertex adjacency lists.
///
/// Every undirected edge is materialized as two directed records, one in
/// each endpoint's list, and every mutation keeps the pair in lockstep:
/// removal drops both records, re-weighting updates both or neither. The
/// vertex map is insertion-ordered, which is what makes neighbour iteration
/// (and therefore walk order) deterministic.
pub struct SparseWeightedGraph<N> {
    adjacency: IndexMap<N, Vec<WeightedEdge<N>>>,
    edges_count: usize,
    first_inserted: Option<N>,
}

impl<N: VertexTrait> SparseWeightedGraph<N> {
    pub fn new() -> Self {
        Self {
            adjacency: IndexMap::new(),
            edges_count: 0,
            first_inserted: None,
        }
    }

    /// Build a graph from anything convertible to weighted edges, inserting
    /// missing endpoints on the fly.
    pub fn from_edges<I>(iterable: I) -> Self
    where
        I: IntoIterator,
        I::Item: IntoWeightedEdge<N>,
    {
        let mut graph = Self::new();
        graph.extend_with_edges(iterable);
        graph
    }

    pub fn extend_with_edges<I>(&mut self, iterable: I)
    where
        I: IntoIterator,
        I::Item: IntoWeightedEdge<N>,
    {
        for item in iterable {
            let (source, destination, weight) = item.into_weighted_edge();
            self.insert_vertex(source);
            self.insert_vertex(destination);
            self.add_edge(source, destination, weight);
        }
    }

    fn insert_vertex(&mut self, vertex: N) -> bool {
        match self.adjacency.entry(vertex) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(Vec::new());
                if self.adjacency.len() == 1 {
                    self.first_inserted = Some(vertex);
                }
                true
            }
        }
    }

    /// Position of the record `from -> to` in `from`'s list.
    fn find_record(&self, from: N, to: N) -> Option<usize> {
        self.adjacency
            .get(&from)?
            .iter()
            .position(|edge| edge.destination == to)
    }

    /// The stored weight between two vertices, probing both lists.
    fn stored_weight(&self, source: N, destination: N) -> Option<i64> {
        if let Some(pos) = self.find_record(source, destination) {
            return Some(self.adjacency[&source][pos].weight);
        }
        self.find_record(destination, source)
            .map(|pos| self.adjacency[&destination][pos].weight)
    }
}

impl<N: VertexTrait> Default for SparseWeightedGraph<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: VertexTrait> WeightedGraph for SparseWeightedGraph<N> {
    type Vertex = N;

    fn vertices_count(&self) -> usize {
        self.adjacency.len()
    }

    fn edges_count(&self) -> usize {
        self.edges_count
    }

    fn vertices(&self) -> Vec<N> {
        self.adjacency.keys().copied().collect()
    }

    fn add_vertex(&mut self, vertex: N) -> Result<bool, GraphError> {
        Ok(self.insert_vertex(vertex))
    }

    fn remove_vertex(&mut self, vertex: N) -> bool {
        match self.adjacency.entry(vertex) {
            Entry::Occupied(entry) => {
                let removed = entry.swap_remove();
                for edge in &removed {
                    let neighbour = self
                        .adjacency
                        .get_mut(&edge.destination)
                        .expect("edge lists must stay symmetric");
                    let pos = neighbour
                        .iter()
                        .position(|back| back.destination == vertex)
                        .expect("edge lists must stay symmetric");
                    neighbour.swap_remove(pos);
                    self.edges_count -= 1;
                }
                trace!(
                    incident_edges = removed.len(),
                    "removed vertex from sparse graph"
                );
                true
            }
            Entry::Vacant(_) => false,
        }
    }

    fn has_vertex(&self, vertex: N) -> bool {
        self.adjacency.contains_key(&vertex)
    }

    fn add_edge(&mut self, source: N, destination: N, weight: i64) -> bool {
        if weight == EMPTY_EDGE_WEIGHT || source == destination {
            return false;
        }
        if !self.has_vertex(source) || !self.has_vertex(destination) {
            return false;
        }
        if self.has_edge(source, destination) {
            return false;
        }

        self.adjacency[&source].push(WeightedEdge::new(source, destination, weight));
        self.adjacency[&destination].push(WeightedEdge::new(destination, source, weight));
        self.edges_count += 1;
        true
    }

    fn remove_edge(&mut self, source: N, destination: N) -> Result<bool, GraphError> {
        if !self.has_vertex(source) || !self.has_vertex(destination) {
            return Err(GraphError::VertexNotFound);
        }
        let outgoing = self.find_record(source, destination);
        let incoming = self.find_record(destination, source);
        let (Some(out_pos), Some(in_pos)) = (outgoing, incoming) else {
            debug_assert!(
                outgoing.is_none() && incoming.is_none(),
                "edge lists out of sync"
            );
            return Ok(false);
        };

        self.adjacency[&source].swap_remove(out_pos);
        self.adjacency[&destination].swap_remove(in_pos);
        self.edges_count -= 1;
        Ok(true)
    }

    fn update_edge_weight(
        &mut self,
        source: N,
        destination: N,
        weight: i64,
    ) -> Result<bool, GraphError> {
        if !self.has_vertex(source) || !self.has_vertex(destination) {
            return Err(GraphError::VertexNotFound);
        }
        if weight == EMPTY_EDGE_WEIGHT {
            return Ok(false);
        }
        // locate both records before touching either: the pair updates as a
        // unit or not at all
        let outgoing = self.find_record(source, destination);
        let incoming = self.find_record(destination, source);
        let (Some(out_pos), Some(in_pos)) = (outgoing, incoming) else {
            debug_assert!(
                outgoing.is_none() && incoming.is_none(),
                "edge lists out of sync"
            );
            return Ok(false);
        };

        self.adjacency[&source][out_pos].weight = weight;
        self.adjacency[&destination][in_pos].weight = weight;
        Ok(true)
    }

    fn has_edge(&self, source: N, destination: N) -> bool {
        self.find_record(source, destination).is_some()
            || self.find_record(destination, source).is_some()
    }

    fn get_edge(&self, source: N, destination: N) -> Result<Option<WeightedEdge<N>>, GraphError> {
        if !self.has_vertex(source) || !self.has_vertex(destination) {
            return Err(GraphError::VertexNotFound);
        }
        Ok(self
            .stored_weight(source, destination)
            .map(|weight| WeightedEdge::new(source, destination, weight)))
    }

    fn get_edge_weight(&self, source: N, destination: N) -> Result<Option<i64>, GraphError> {
        if !self.has_vertex(source) || !self.has_vertex(destination) {
            return Err(GraphError::VertexNotFound);
        }
        Ok(self.stored_weight(source, destination))
    }

    fn edges(&self) -> Vec<WeightedEdge<N>> {
        // each logical edge appears once per endpoint; dedup on the
        // unordered pair
        let mut seen: HashSet<(N, N)> = HashSet::with_capacity(self.edges_count);
        let mut all = Vec::with_capacity(self.edges_count);
        for list in self.adjacency.values() {
            for edge in list {
                let key = if edge.source <= edge.destination {
                    (edge.source, edge.destination)
                } else {
                    (edge.destination, edge.source)
                };
                if seen.insert(key) {
                    all.push(*edge);
                }
            }
        }

        all
    }

    fn outgoing_edges(&self, vertex: N) -> Result<Vec<WeightedEdge<N>>, GraphError> {
        self.adjacency
            .get(&vertex)
            .cloned()
            .ok_or(GraphError::VertexNotFound)
    }

    fn incoming_edges(&self, vertex: N) -> Result<Vec<WeightedEdge<N>>, GraphError> {
        self.adjacency
            .get(&vertex)
            .map(|list| {
                list.iter()
                    .map(|edge| WeightedEdge::new(edge.destination, edge.source, edge.weight))
                    .collect()
            })
            .ok_or(GraphError::VertexNotFound)
    }

    fn neighbours(&self, vertex: N) -> Vec<N> {
        self.adjacency
            .get(&vertex)
            .map(|list| list.iter().map(|edge| edge.destination).collect())
            .unwrap_or_default()
    }

    fn neighbours_map(&self, vertex: N) -> Option<HashMap<N, i64>> {
        let list = self.adjacency.get(&vertex)?;
        Some(
            list.iter()
                .map(|edge| (edge.destination, edge.weight))
                .collect(),
        )
    }

    fn degree(&self, vertex: N) -> Result<usize, GraphError> {
        self.adjacency
            .get(&vertex)
            .map(Vec::len)
            .ok_or(GraphError::VertexNotFound)
    }

    fn traversal_root(&self) -> Option<N> {
        self.first_inserted
    }

    fn clear(&mut self) {
        self.adjacency.clear();
        self.edges_count = 0;
        self.first_inserted = None;
        trace!("cleared sparse graph");
    }
}
