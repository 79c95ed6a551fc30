use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, VecDeque};

use tracing::{debug, warn};

use triage_common::{MstResult, TriageError, WardEdge};

/// Weighted, undirected graph over ward names.
///
/// Vertices are interned into dense slots; each slot owns an
/// insertion-ordered list of `(neighbor_slot, weight)` pairs. Every
/// `add_edge` writes both directions with the same weight.
#[derive(Debug, Clone, Default)]
pub struct WardGraph {
    names: Vec<String>,
    slots: HashMap<String, usize>,
    adjacency: Vec<Vec<(usize, u32)>>,
    edge_count: usize,
}

/// Candidate edge waiting in Prim's frontier. `seq` makes equal-weight
/// candidates pop in the order they were enqueued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Candidate {
    weight: u32,
    seq: u64,
    from: usize,
    to: usize,
}

impl WardGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a ward if it is not already present. Returns its slot.
    pub fn add_vertex(&mut self, name: &str) -> usize {
        if let Some(&slot) = self.slots.get(name) {
            return slot;
        }
        let slot = self.names.len();
        self.names.push(name.to_string());
        self.slots.insert(name.to_string(), slot);
        self.adjacency.push(Vec::new());
        slot
    }

    /// Link two wards in both directions, creating either endpoint if missing.
    pub fn add_edge(&mut self, a: &str, b: &str, weight: u32) {
        let a = self.add_vertex(a);
        let b = self.add_vertex(b);
        self.adjacency[a].push((b, weight));
        self.adjacency[b].push((a, weight));
        self.edge_count += 1;
    }

    pub fn contains(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    /// Ward names in the order they were first added.
    pub fn vertices(&self) -> impl Iterator<Item = &str> + '_ {
        self.names.iter().map(String::as_str)
    }

    pub fn vertex_count(&self) -> usize {
        self.names.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Neighbors of `name` with edge weights, in adjacency insertion order.
    pub fn neighbors(&self, name: &str) -> Result<Vec<(&str, u32)>, TriageError> {
        let slot = self.slot(name)?;
        Ok(self.adjacency[slot]
            .iter()
            .map(|&(to, weight)| (self.names[to].as_str(), weight))
            .collect())
    }

    /// Breadth-first visitation order from `start`.
    ///
    /// Vertices are marked on enqueue, so each appears once; neighbors are
    /// taken in adjacency insertion order.
    pub fn bfs(&self, start: &str) -> Result<Vec<String>, TriageError> {
        let start = self.slot(start)?;
        let mut visited = vec![false; self.names.len()];
        let mut queue = VecDeque::new();
        let mut order = Vec::new();

        visited[start] = true;
        queue.push_back(start);

        while let Some(u) = queue.pop_front() {
            order.push(self.names[u].clone());
            for &(v, _) in &self.adjacency[u] {
                if !visited[v] {
                    visited[v] = true;
                    queue.push_back(v);
                }
            }
        }

        debug!(start = %self.names[start], visited = order.len(), "BFS complete");
        Ok(order)
    }

    /// Depth-first visitation order from `start`, using an explicit stack.
    ///
    /// A vertex is marked only when popped, and neighbors are pushed in
    /// adjacency order, so they come off the stack in reverse adjacency order.
    pub fn dfs(&self, start: &str) -> Result<Vec<String>, TriageError> {
        let start = self.slot(start)?;
        let mut visited = vec![false; self.names.len()];
        let mut stack = vec![start];
        let mut order = Vec::new();

        while let Some(u) = stack.pop() {
            if visited[u] {
                continue;
            }
            visited[u] = true;
            order.push(self.names[u].clone());
            // Already-visited neighbors would be skipped on pop anyway.
            stack.extend(
                self.adjacency[u]
                    .iter()
                    .filter(|&&(v, _)| !visited[v])
                    .map(|&(v, _)| v),
            );
        }

        debug!(start = %self.names[start], visited = order.len(), "DFS complete");
        Ok(order)
    }

    /// Prim's minimum spanning tree grown from `start`.
    ///
    /// A disconnected graph is not an error: the tree covers only the
    /// component containing `start`, and `covered_vertices` says how much.
    pub fn prim_mst(&self, start: &str) -> Result<MstResult, TriageError> {
        let start = self.slot(start)?;
        let total_vertices = self.names.len();
        let mut visited = vec![false; total_vertices];
        let mut frontier = BinaryHeap::new();
        let mut seq = 0u64;
        let mut edges = Vec::new();
        let mut total_weight = 0u64;
        let mut covered_vertices = 1;

        visited[start] = true;
        self.enqueue_frontier(start, &visited, &mut frontier, &mut seq);

        while covered_vertices < total_vertices {
            let Some(Reverse(candidate)) = frontier.pop() else {
                break;
            };
            if visited[candidate.to] {
                continue;
            }
            visited[candidate.to] = true;
            covered_vertices += 1;
            total_weight += u64::from(candidate.weight);
            edges.push(WardEdge::new(
                self.names[candidate.from].clone(),
                self.names[candidate.to].clone(),
                candidate.weight,
            ));
            self.enqueue_frontier(candidate.to, &visited, &mut frontier, &mut seq);
        }

        if covered_vertices < total_vertices {
            warn!(
                start = %self.names[start],
                covered_vertices,
                total_vertices,
                "Ward network is disconnected, spanning tree is partial"
            );
        }

        Ok(MstResult {
            edges,
            total_weight,
            covered_vertices,
            total_vertices,
        })
    }

    fn enqueue_frontier(
        &self,
        from: usize,
        visited: &[bool],
        frontier: &mut BinaryHeap<Reverse<Candidate>>,
        seq: &mut u64,
    ) {
        for &(to, weight) in &self.adjacency[from] {
            if visited[to] {
                continue;
            }
            frontier.push(Reverse(Candidate {
                weight,
                seq: *seq,
                from,
                to,
            }));
            *seq += 1;
        }
    }

    fn slot(&self, name: &str) -> Result<usize, TriageError> {
        self.slots
            .get(name)
            .copied()
            .ok_or_else(|| TriageError::UnknownVertex(name.to_string()))
    }
}
