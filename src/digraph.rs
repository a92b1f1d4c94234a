//! Adjacency-list digraph utilities: reversal, reachability, topological order.
//!
//! These operate on a bare `AdjacencyList` — a de-duplicated, ordered
//! successor list per vertex — independently of the transducer data model in
//! [`crate::transducer`], which builds its underlying digraph on top of this.

use itertools::Itertools;

/// A digraph vertex, identified by its position in the adjacency list.
pub type Vertex = usize;

/// For each vertex, a de-duplicated ordered list of successor vertices.
pub type AdjacencyList = Vec<Vec<Vertex>>;

/// Return the adjacency list of the reverse digraph.
///
/// The reverse digraph has the same vertex set but has an edge `(u, v)`
/// exactly when the original graph has an edge `(v, u)`.
pub fn reverse(g: &AdjacencyList) -> AdjacencyList {
    let mut result: AdjacencyList = vec![Vec::new(); g.len()];
    for (u, succs) in g.iter().enumerate() {
        for &v in succs {
            result[v].push(u);
        }
    }
    result
}

/// Determine for every vertex whether it is reachable from some vertex in
/// `start`, via a breadth-first traversal.
pub fn is_reachable(g: &AdjacencyList, start: &[Vertex]) -> Vec<bool> {
    let mut seen = vec![false; g.len()];
    let mut queue = Vec::with_capacity(start.len());
    for &u in start {
        if !seen[u] {
            seen[u] = true;
            queue.push(u);
        }
    }
    let mut i = 0;
    while i < queue.len() {
        let u = queue[i];
        for &v in &g[u] {
            if !seen[v] {
                seen[v] = true;
                queue.push(v);
            }
        }
        i += 1;
    }
    seen
}

/// Return the digraph vertices in topological order, or `None` if the
/// digraph contains a directed cycle.
///
/// Uses Kahn's algorithm: seed the queue with indegree-0 vertices in
/// ascending order, then repeatedly pop the front, decrementing the
/// in-degree of each successor and enqueueing those that reach zero. Vertex
/// order is ascending both at seeding time and when scanning successors, so
/// the result is deterministic.
pub fn topological_order(g: &AdjacencyList) -> Option<Vec<Vertex>> {
    let mut indegree = vec![0usize; g.len()];
    for succs in g {
        for &v in succs {
            indegree[v] += 1;
        }
    }

    let mut order: Vec<Vertex> = (0..g.len()).filter(|&u| indegree[u] == 0).collect();
    let mut i = 0;
    while i < order.len() {
        let u = order[i];
        for &v in &g[u] {
            indegree[v] -= 1;
            if indegree[v] == 0 {
                order.push(v);
            }
        }
        i += 1;
    }

    (order.len() == g.len()).then_some(order)
}

/// De-duplicate a vertex's successor list while preserving first-seen order.
pub(crate) fn dedup_preserve_order(succs: Vec<Vertex>) -> Vec<Vertex> {
    succs.into_iter().unique().collect()
}
