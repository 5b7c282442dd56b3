pub use common::*;
pub use dense::DenseWeightedGraph;
pub use sparse::SparseWeightedGraph;
pub use traverse::{
    breadth_first_order, depth_first_order, Bfs, Dfs, GraphRef, IntoNeighbors, VisitMap, Visitable,
};

mod common;
mod dense;
mod sparse;
mod traverse;

/// Conversion into a `(source, destination, weight)` triple, so edge-list
/// constructors accept tuples and `WeightedEdge` values alike.
pub trait IntoWeightedEdge<N> {
    fn into_weighted_edge(self) -> (N, N, i64);
}

impl<N> IntoWeightedEdge<N> for (N, N, i64) {
    fn into_weighted_edge(self) -> (N, N, i64) {
        self
    }
}

impl<N> IntoWeightedEdge<N> for WeightedEdge<N> {
    fn into_weighted_edge(self) -> (N, N, i64) {
        (self.source, self.destination, self.weight)
    }
}
