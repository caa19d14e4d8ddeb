//! Brute-force reference for tree selection.
//!
//! Replays the priority order without a union-find: an edge is accepted when
//! a breadth-first search over the already accepted edges cannot reach its
//! target from its source. Quadratic, but obviously correct.

use std::collections::VecDeque;

use crate::DofCoupling;

/// Result of the reference selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) struct OracleResult {
    /// Accepted mesh edge indices in acceptance order.
    pub tree: Vec<usize>,
    /// Connected components of the graph formed by every non-unused edge.
    pub component_count: usize,
    /// Expected cotree bits.
    pub cotree: Vec<bool>,
}

/// Selects tree edges by explicit reachability checks.
///
/// `edge_dofs[i]` is the DOF carried by edge `i`; `couplings` is indexed by
/// DOF.
pub(super) fn reference_gauge(
    vertex_count: usize,
    edges: &[(usize, usize)],
    edge_dofs: &[usize],
    couplings: &[DofCoupling],
) -> OracleResult {
    let edge_couplings: Vec<DofCoupling> = edge_dofs.iter().map(|&dof| couplings[dof]).collect();
    let order: Vec<usize> = priority_order(&edge_couplings);
    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); vertex_count];
    let mut tree = Vec::new();

    for edge in order {
        let (u, v) = edges[edge];
        if !reachable(&adjacency, u, v) {
            adjacency[u].push(v);
            adjacency[v].push(u);
            tree.push(edge);
        }
    }

    let tree_dofs: Vec<usize> = tree.iter().map(|&edge| edge_dofs[edge]).collect();
    let cotree = couplings
        .iter()
        .enumerate()
        .map(|(dof, coupling)| *coupling == DofCoupling::Free && !tree_dofs.contains(&dof))
        .collect();

    OracleResult {
        tree,
        component_count: count_components(&adjacency),
        cotree,
    }
}

/// Constrained edges in mesh order followed by free edges in mesh order.
fn priority_order(couplings: &[DofCoupling]) -> Vec<usize> {
    let pick = |wanted: DofCoupling| {
        couplings
            .iter()
            .enumerate()
            .filter(move |(_, coupling)| **coupling == wanted)
            .map(|(edge, _)| edge)
    };
    pick(DofCoupling::Constrained)
        .chain(pick(DofCoupling::Free))
        .collect()
}

fn reachable(adjacency: &[Vec<usize>], from: usize, to: usize) -> bool {
    if from == to {
        return true;
    }
    let mut seen = vec![false; adjacency.len()];
    let mut queue = VecDeque::from([from]);
    seen[from] = true;
    while let Some(node) = queue.pop_front() {
        for &next in &adjacency[node] {
            if next == to {
                return true;
            }
            if !seen[next] {
                seen[next] = true;
                queue.push_back(next);
            }
        }
    }
    false
}

fn count_components(adjacency: &[Vec<usize>]) -> usize {
    let mut seen = vec![false; adjacency.len()];
    let mut components = 0;
    for start in 0..adjacency.len() {
        if seen[start] {
            continue;
        }
        components += 1;
        seen[start] = true;
        let mut stack = vec![start];
        while let Some(node) = stack.pop() {
            for &next in &adjacency[node] {
                if !seen[next] {
                    seen[next] = true;
                    stack.push(next);
                }
            }
        }
    }
    components
}
