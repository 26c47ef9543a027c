//! Graph validation logic.

use std::collections::{HashMap, HashSet};

use oc_core::{ComponentId, OcError, OcResult, TargetId};
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::builder::{PendingComponent, PendingTarget};
use crate::error::GraphError;

type NameIndex = HashMap<String, TargetId>;
type ComponentIndex = HashMap<String, ComponentId>;

/// Check name uniqueness and component references; return the name indices.
pub(crate) fn validate_names(
    components: &[PendingComponent],
    targets: &[PendingTarget],
) -> OcResult<(ComponentIndex, NameIndex)> {
    let mut component_index = HashMap::with_capacity(components.len());
    for (i, comp) in components.iter().enumerate() {
        let id = ComponentId::from_index(i as u32);
        if component_index.insert(comp.name.clone(), id).is_some() {
            return Err(GraphError::DuplicateComponent {
                name: comp.name.clone(),
            }
            .into());
        }
    }

    let mut target_index: NameIndex = HashMap::with_capacity(targets.len());
    for target in targets {
        let Some(comp) = components.get(target.component.slot()) else {
            return Err(GraphError::InvalidComponentRef {
                target: target.name.clone(),
                comp: target.component,
            }
            .into());
        };

        // Flat namespace: a name may appear once across all components
        if let Some(&prev) = target_index.get(&target.name) {
            let first = &components[targets[prev.slot()].component.slot()].name;
            return Err(GraphError::DuplicateTarget {
                name: target.name.clone(),
                first: first.clone(),
                second: comp.name.clone(),
            }
            .into());
        }
        target_index.insert(target.name.clone(), target.id);
    }

    Ok((component_index, target_index))
}

/// Resolve every requirement name against the closed set of declared targets.
pub(crate) fn resolve_requires(
    targets: &[PendingTarget],
    index: &NameIndex,
) -> OcResult<Vec<Vec<TargetId>>> {
    targets
        .iter()
        .map(|target| {
            let mut seen = HashSet::with_capacity(target.requires.len());
            target
                .requires
                .iter()
                .map(|dep| -> OcResult<TargetId> {
                    if *dep == target.name {
                        return Err(GraphError::SelfDependency {
                            target: target.name.clone(),
                        }
                        .into());
                    }
                    let Some(&id) = index.get(dep) else {
                        return Err(GraphError::UnknownDependency {
                            target: target.name.clone(),
                            dependency: dep.clone(),
                        }
                        .into());
                    };
                    if !seen.insert(id) {
                        return Err(GraphError::DuplicateDependency {
                            target: target.name.clone(),
                            dependency: dep.clone(),
                        }
                        .into());
                    }
                    Ok(id)
                })
                .collect()
        })
        .collect()
}

/// Topologically sort targets (requirements first); fails on any cycle.
pub(crate) fn topological_order(
    targets: &[PendingTarget],
    resolved: &[Vec<TargetId>],
) -> OcResult<Vec<TargetId>> {
    let mut dag: DiGraph<TargetId, ()> = DiGraph::with_capacity(targets.len(), 0);
    let nodes: Vec<NodeIndex> = targets.iter().map(|t| dag.add_node(t.id)).collect();

    for (target, requires) in targets.iter().zip(resolved) {
        for dep in requires {
            dag.add_edge(nodes[dep.slot()], nodes[target.id.slot()], ());
        }
    }

    toposort(&dag, None)
        .map(|sorted| sorted.into_iter().map(|n| dag[n]).collect())
        .map_err(|cycle| {
            let id = dag[cycle.node_id()];
            OcError::from(GraphError::Cycle {
                target: targets[id.slot()].name.clone(),
            })
        })
}
