use std::collections::HashSet;

use itertools::assert_equal;
use weighted_graphs::graph::{
    DenseWeightedGraph, GraphError, SparseWeightedGraph, WeightedGraph,
};

/// Drive one graph through the whole shared contract. Everything here must
/// hold for both representations, so the checks only go through the trait.
fn verify_contract<G: WeightedGraph<Vertex = char>>(graph: &mut G) {
    // empty-graph behaviour
    assert!(graph.is_weighted());
    assert_eq!(graph.vertices_count(), 0);
    assert_eq!(graph.traversal_root(), None);
    assert_eq!(graph.depth_first_walk(), Ok(vec![]));
    assert_eq!(graph.breadth_first_walk(), Ok(vec![]));
    assert!(!graph.remove_vertex('a'));

    graph.add_vertices(&['a', 'b', 'c', 'd']).unwrap();
    assert_eq!(graph.add_vertex('a'), Ok(false));
    assert_eq!(graph.vertices_count(), 4);
    assert_eq!(graph.traversal_root(), Some('a'));
    let mut vertices = graph.vertices();
    vertices.sort();
    assert_equal(vertices, vec!['a', 'b', 'c', 'd']);

    assert!(graph.add_edge('a', 'b', 4));
    assert!(graph.add_edge('a', 'c', 2));
    assert!(graph.add_edge('b', 'c', 7));
    assert!(!graph.add_edge('b', 'a', 9), "reversed duplicate");
    assert!(!graph.add_edge('a', 'd', 0), "zero weight");
    assert!(!graph.add_edge('a', 'z', 1), "absent endpoint");
    assert_eq!(graph.edges_count(), 3);

    // an edge is visible from both ends with the same weight
    assert!(graph.has_edge('a', 'b') && graph.has_edge('b', 'a'));
    assert_eq!(graph.get_edge_weight('a', 'b'), Ok(Some(4)));
    assert_eq!(graph.get_edge_weight('b', 'a'), Ok(Some(4)));
    let edge = graph.get_edge('c', 'a').unwrap().unwrap();
    assert_eq!(edge.weight, 2);
    assert_eq!(graph.get_edge('a', 'd'), Ok(None));
    assert_eq!(graph.get_edge('a', 'z'), Err(GraphError::VertexNotFound));

    // global enumeration yields each pair exactly once
    let all = graph.edges();
    assert_eq!(all.len(), graph.edges_count());
    let pairs: HashSet<(char, char)> = all
        .iter()
        .map(|edge| {
            if edge.source <= edge.destination {
                (edge.source, edge.destination)
            } else {
                (edge.destination, edge.source)
            }
        })
        .collect();
    assert_eq!(pairs.len(), all.len());

    // removing and re-adding reports the new weight, never the old one
    assert_eq!(graph.remove_edge('a', 'b'), Ok(true));
    assert!(graph.add_edge('a', 'b', 6));
    assert_eq!(graph.get_edge_weight('b', 'a'), Ok(Some(6)));

    assert_eq!(graph.update_edge_weight('c', 'b', 1), Ok(true));
    assert_eq!(graph.get_edge_weight('b', 'c'), Ok(Some(1)));
    assert_eq!(graph.update_edge_weight('a', 'd', 1), Ok(false));

    // a no-op removal leaves the count alone
    let edges_before = graph.edges_count();
    assert_eq!(graph.remove_edge('a', 'd'), Ok(false));
    assert_eq!(graph.edges_count(), edges_before);

    assert_eq!(graph.degree('a'), Ok(2));
    assert_eq!(graph.degree('z'), Err(GraphError::VertexNotFound));
    let map = graph.neighbours_map('a').unwrap();
    assert_eq!(map[&'b'], 6);
    assert_eq!(map[&'c'], 2);
    assert!(graph.neighbours_map('z').is_none());

    let outgoing = graph.outgoing_edges('a').unwrap();
    let incoming = graph.incoming_edges('a').unwrap();
    assert_eq!(outgoing.len(), 2);
    assert_eq!(incoming.len(), 2);

    // removing a vertex takes exactly its degree off the edge count
    let degree = graph.degree('c').unwrap();
    let edges_before = graph.edges_count();
    assert!(graph.remove_vertex('c'));
    assert_eq!(graph.edges_count(), edges_before - degree);
    assert!(graph
        .edges()
        .iter()
        .all(|edge| edge.source != 'c' && edge.destination != 'c'));
    assert!(!graph.has_vertex('c'));

    // both walks cover the same component, each vertex once
    let dfs = graph.depth_first_walk_from('a').unwrap();
    let bfs = graph.breadth_first_walk_from('a').unwrap();
    let dfs_set: HashSet<char> = dfs.iter().copied().collect();
    let bfs_set: HashSet<char> = bfs.iter().copied().collect();
    assert_eq!(dfs_set.len(), dfs.len());
    assert_eq!(bfs_set.len(), bfs.len());
    assert_eq!(dfs_set, bfs_set);
    assert_eq!(
        graph.depth_first_walk_from('z'),
        Err(GraphError::VertexNotFound)
    );
    assert_eq!(
        graph.breadth_first_walk_from('z'),
        Err(GraphError::VertexNotFound)
    );

    graph.clear();
    assert_eq!(graph.vertices_count(), 0);
    assert_eq!(graph.edges_count(), 0);
    assert_eq!(graph.traversal_root(), None);
    assert_eq!(graph.breadth_first_walk(), Ok(vec![]));
}

#[test]
fn dense_satisfies_the_contract() {
    let mut graph = DenseWeightedGraph::with_capacity(8);
    verify_contract(&mut graph);
}

#[test]
fn sparse_satisfies_the_contract() {
    let mut graph = SparseWeightedGraph::new();
    verify_contract(&mut graph);
}
