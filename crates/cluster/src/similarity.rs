use std::collections::HashSet;

use tabclust_core::{Tab, TabKey};

/// Raw dot product. Not cosine-normalized: magnitude counts as well as direction,
/// and thresholds are tuned against that. Vectors of different length score 0.
#[must_use]
pub fn dot_product(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        tracing::debug!(left = a.len(), right = b.len(), "embedding dimension mismatch");
        return 0.0;
    }
    let dot: f64 = a.iter().zip(b).map(|(x, y)| f64::from(*x) * f64::from(*y)).sum();
    dot as f32
}

/// Score of a pair where either embedding may be absent. Absent means 0 (no edge).
#[must_use]
pub fn pair_score(a: Option<&[f32]>, b: Option<&[f32]>) -> f32 {
    match (a, b) {
        (Some(a), Some(b)) => dot_product(a, b),
        _ => 0.0,
    }
}

/// One adjacency entry: index of the neighbor node and the pair score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub node: usize,
    pub score: f32,
}

/// Complete weighted graph over a tab set.
///
/// Nodes are the input tabs in input order, deduplicated by `key` (first
/// occurrence wins). Each adjacency list holds every other node in
/// increasing node order, which is the order pairs were scored.
#[derive(Debug, Clone)]
pub struct SimilarityGraph {
    key: TabKey,
    tabs: Vec<Tab>,
    adjacency: Vec<Vec<Neighbor>>,
}

impl SimilarityGraph {
    /// Scores every unordered pair `(i, j)`, `i < j`, and records the edge on both ends.
    ///
    /// O(n²) in tab count, which is fine for a user's tabs.
    pub fn build<'e, F>(tabs: &[Tab], key: TabKey, embedding_of: F) -> Self
    where
        F: Fn(&Tab) -> Option<&'e [f32]>,
    {
        let mut seen: HashSet<&str> = HashSet::with_capacity(tabs.len());
        let nodes: Vec<Tab> = tabs.iter().filter(|t| seen.insert(key.of(t))).cloned().collect();
        if nodes.len() < tabs.len() {
            tracing::debug!(
                dropped = tabs.len() - nodes.len(),
                ?key,
                "collapsed tabs sharing the same key"
            );
        }

        let embeddings: Vec<Option<&'e [f32]>> = nodes.iter().map(&embedding_of).collect();
        let mut adjacency: Vec<Vec<Neighbor>> =
            (0..nodes.len()).map(|_| Vec::with_capacity(nodes.len().saturating_sub(1))).collect();

        for i in 0..nodes.len() {
            for j in (i + 1)..nodes.len() {
                let score = pair_score(embeddings[i], embeddings[j]);
                adjacency[i].push(Neighbor { node: j, score });
                adjacency[j].push(Neighbor { node: i, score });
            }
        }

        Self { key, tabs: nodes, adjacency }
    }

    #[must_use]
    pub fn key(&self) -> TabKey {
        self.key
    }

    #[must_use]
    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    #[must_use]
    pub fn neighbors(&self, node: usize) -> &[Neighbor] {
        self.adjacency.get(node).map_or(&[], Vec::as_slice)
    }

    /// Node index of a tab, looked up by the graph key.
    #[must_use]
    pub fn node_of(&self, tab: &Tab) -> Option<usize> {
        let wanted = self.key.of(tab);
        self.tabs.iter().position(|t| self.key.of(t) == wanted)
    }

    /// Neighbors of `tab` as `(neighbor tab, score)` in recorded order.
    #[must_use]
    pub fn neighbors_of(&self, tab: &Tab) -> Vec<(&Tab, f32)> {
        self.node_of(tab).map_or_else(Vec::new, |node| {
            self.neighbors(node).iter().map(|n| (&self.tabs[n.node], n.score)).collect()
        })
    }

    /// Score between two nodes, 0 for a node paired with itself.
    #[must_use]
    pub fn score(&self, a: usize, b: usize) -> f32 {
        self.neighbors(a).iter().find(|n| n.node == b).map_or(0.0, |n| n.score)
    }
}
