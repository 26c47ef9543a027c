//! Stable build-order indexing.
//!
//! Provides bidirectional mappings between target IDs and their rank in a
//! topological build order (0..N, requirements before dependents).

use oc_core::{OcResult, TargetId};

use crate::error::GraphError;
use crate::graph::ToolkitGraph;

/// Rank of every target in build order.
///
/// Provides O(1) lookup in both directions.
#[derive(Debug, Clone)]
pub struct BuildOrder {
    /// Rank -> TargetId.
    ids: Vec<TargetId>,

    /// TargetId -> rank. Sized to the number of targets.
    ranks: Vec<usize>,
}

impl BuildOrder {
    /// Build the ranking from a validated graph.
    pub fn from_graph(graph: &ToolkitGraph) -> Self {
        let ids = graph.build_order().to_vec();
        let mut ranks = vec![0; ids.len()];
        for (rank, id) in ids.iter().enumerate() {
            ranks[id.slot()] = rank;
        }
        Self { ids, ranks }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Rank of a target in build order.
    pub fn rank(&self, id: TargetId) -> OcResult<usize> {
        self.ranks.get(id.slot()).copied().ok_or_else(|| {
            GraphError::UnknownTarget {
                name: id.to_string(),
            }
            .into()
        })
    }

    /// Target at a rank (panics if out of bounds).
    pub fn target_at(&self, rank: usize) -> TargetId {
        self.ids[rank]
    }

    /// All target IDs, in build order.
    pub fn ids(&self) -> &[TargetId] {
        &self.ids
    }

    /// Group targets into waves: each wave only requires earlier waves.
    pub fn waves(&self, graph: &ToolkitGraph) -> Vec<Vec<TargetId>> {
        let mut depth = vec![0usize; self.ids.len()];
        let mut waves: Vec<Vec<TargetId>> = Vec::new();
        for &id in &self.ids {
            let d = graph
                .target(id)
                .map(|t| {
                    t.requires
                        .iter()
                        .map(|dep| depth[dep.slot()] + 1)
                        .max()
                        .unwrap_or(0)
                })
                .unwrap_or(0);
            depth[id.slot()] = d;
            if waves.len() <= d {
                waves.resize_with(d + 1, Vec::new);
            }
            waves[d].push(id);
        }
        waves
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::GraphBuilder;

    fn chain() -> ToolkitGraph {
        let mut builder = GraphBuilder::new();
        let c = builder.add_component("Core");
        builder.add_target(c, "C", ["B"]);
        builder.add_target(c, "B", ["A"]);
        builder.add_target(c, "A", Vec::<String>::new());
        builder.build().unwrap()
    }

    #[test]
    fn ranks_follow_requirements() {
        let graph = chain();
        let order = BuildOrder::from_graph(&graph);
        let a = graph.find_target("A").unwrap().id;
        let b = graph.find_target("B").unwrap().id;
        let c = graph.find_target("C").unwrap().id;

        assert_eq!(order.rank(a).unwrap(), 0);
        assert_eq!(order.rank(b).unwrap(), 1);
        assert_eq!(order.rank(c).unwrap(), 2);
        assert_eq!(order.target_at(0), a);
    }

    #[test]
    fn unknown_id() {
        let order = BuildOrder::from_graph(&chain());
        assert!(order.rank(TargetId::from_index(999)).is_err());
    }

    #[test]
    fn waves_group_independent_targets() {
        let mut builder = GraphBuilder::new();
        let c = builder.add_component("Core");
        builder.add_target(c, "A", Vec::<String>::new());
        builder.add_target(c, "B", ["A"]);
        builder.add_target(c, "C", ["A"]);
        builder.add_target(c, "D", ["B", "C"]);
        let graph = builder.build().unwrap();
        let waves = BuildOrder::from_graph(&graph).waves(&graph);

        let names: Vec<Vec<&str>> = waves
            .iter()
            .map(|w| {
                let mut v: Vec<&str> = w
                    .iter()
                    .map(|&id| graph.target(id).unwrap().name.as_str())
                    .collect();
                v.sort_unstable();
                v
            })
            .collect();
        assert_eq!(names, vec![vec!["A"], vec!["B", "C"], vec!["D"]]);
    }
}
