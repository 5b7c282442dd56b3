//! In-memory undirected weighted graphs in two storage flavours — a
//! fixed-capacity adjacency matrix ([`graph::DenseWeightedGraph`]) and an
//! adjacency-list map ([`graph::SparseWeightedGraph`]) — behind the single
//! [`graph::WeightedGraph`] contract, with stack/queue-driven DFS and BFS
//! built on top of it.

pub mod graph;
