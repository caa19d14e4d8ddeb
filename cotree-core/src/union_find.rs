//! Union-find (disjoint set union) over mesh vertices.
//!
//! The spanning forest builder consults this structure once per candidate
//! edge to decide whether the edge joins two components or closes a cycle.
//! `find` is iterative: a first walk locates the root and a second walk
//! repoints every visited node at it, so stack usage stays constant however
//! long the path grew before compression.

/// Partition of `[0, n)` into disjoint components.
///
/// # Examples
/// ```
/// use cotree_core::DisjointSet;
///
/// let mut sets = DisjointSet::new(4);
/// assert!(sets.union(0, 1));
/// assert!(sets.union(2, 3));
/// assert!(!sets.union(1, 0));
/// assert_eq!(sets.find(0), sets.find(1));
/// assert_ne!(sets.find(1), sets.find(2));
/// assert_eq!(sets.components(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
    components: usize,
}

impl DisjointSet {
    /// Creates `n` singleton components.
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
            components: n,
        }
    }

    /// Returns the number of elements tracked by the partition.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Returns `true` when the partition tracks no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Returns the current number of disjoint components.
    #[must_use]
    #[rustfmt::skip]
    pub fn components(&self) -> usize { self.components }

    /// Returns the representative of `node`'s component, compressing the path.
    ///
    /// # Panics
    /// Panics when `node >= self.len()`. Callers validate vertex indices
    /// before they reach the partition.
    pub fn find(&mut self, mut node: usize) -> usize {
        let mut root = node;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        while self.parent[node] != root {
            let parent = self.parent[node];
            self.parent[node] = root;
            node = parent;
        }

        root
    }

    /// Merges the components containing `left` and `right`.
    ///
    /// The lower-rank root is attached beneath the higher-rank root. On equal
    /// rank the smaller root id becomes the parent and its rank grows by one,
    /// so the resulting structure depends only on the call sequence.
    ///
    /// Returns `false` when both elements already share a component.
    ///
    /// # Panics
    /// Panics when either index is out of range.
    pub fn union(&mut self, left: usize, right: usize) -> bool {
        let left_root = self.find(left);
        let right_root = self.find(right);
        if left_root == right_root {
            return false;
        }

        let left_rank = self.rank[left_root];
        let right_rank = self.rank[right_root];
        let (parent, child) = choose_parent_child(left_root, right_root, left_rank, right_rank);
        self.parent[child] = parent;
        if left_rank == right_rank {
            self.rank[parent] = left_rank.saturating_add(1);
        }
        self.components = self.components.saturating_sub(1);
        true
    }

    /// Returns `true` when `left` and `right` share a component.
    pub fn connected(&mut self, left: usize, right: usize) -> bool {
        self.find(left) == self.find(right)
    }
}

fn choose_parent_child(
    left_root: usize,
    right_root: usize,
    left_rank: u8,
    right_rank: u8,
) -> (usize, usize) {
    if left_rank > right_rank {
        return (left_root, right_root);
    }
    if right_rank > left_rank {
        return (right_root, left_root);
    }
    if left_root <= right_root {
        (left_root, right_root)
    } else {
        (right_root, left_root)
    }
}
