use std::collections::VecDeque;

use tabclust_core::Tab;

use crate::SimilarityGraph;

/// Breadth-first connected components over edges scoring strictly above a threshold.
///
/// Seeds are taken in node order and neighbors are followed in recorded
/// order, so output is deterministic for a given input order. Singletons are
/// kept; dropping them is the caller's policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clusterer {
    threshold: f32,
}

impl Clusterer {
    #[must_use]
    pub const fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    #[must_use]
    pub const fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Components as lists of node indices.
    #[must_use]
    pub fn cluster_nodes(&self, graph: &SimilarityGraph) -> Vec<Vec<usize>> {
        let mut visited = vec![false; graph.len()];
        let mut components = Vec::new();
        let mut queue = VecDeque::new();

        for seed in 0..graph.len() {
            if visited[seed] {
                continue;
            }
            visited[seed] = true;
            queue.push_back(seed);
            let mut component = vec![seed];

            while let Some(current) = queue.pop_front() {
                for neighbor in graph.neighbors(current) {
                    if !visited[neighbor.node] && neighbor.score > self.threshold {
                        visited[neighbor.node] = true;
                        component.push(neighbor.node);
                        queue.push_back(neighbor.node);
                    }
                }
            }
            components.push(component);
        }

        tracing::debug!(
            nodes = graph.len(),
            components = components.len(),
            threshold = self.threshold,
            "clustered similarity graph"
        );
        components
    }

    /// Components as lists of tabs, disjoint and covering every graph node.
    #[must_use]
    pub fn cluster(&self, graph: &SimilarityGraph) -> Vec<Vec<Tab>> {
        self.cluster_nodes(graph)
            .into_iter()
            .map(|nodes| nodes.into_iter().map(|n| graph.tabs()[n].clone()).collect())
            .collect()
    }
}
