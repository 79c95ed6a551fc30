//! Weighted, undirected ward network.
//!
//! Adjacency lists keep insertion order, so BFS and DFS visitation orders
//! are reproducible for a given build sequence.

pub mod ward_graph;

pub use ward_graph::WardGraph;
