//! Core graph data structures.

use std::collections::HashMap;

use oc_core::{ComponentId, OcResult, TargetId};
use sha2::{Digest, Sha256};

use crate::decl::{ComponentDecl, TargetDecl};
use crate::error::GraphError;

/// A buildable library artifact (e.g. `TKV3d`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub id: TargetId,
    pub name: String,
    /// Component this target is declared in.
    pub component: ComponentId,
    /// Direct requirements, in declared order.
    pub requires: Vec<TargetId>,
}

/// A named group of targets (e.g. `Visualization`).
///
/// Grouping is organizational only; it has no effect on requirements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub id: ComponentId,
    pub name: String,
    pub targets: Vec<TargetId>,
}

/// The graph: a validated, immutable collection of components and targets.
///
/// The graph stores:
/// - All components and targets in vectors (indexed by their IDs).
/// - Name indices for both.
/// - A topological order of targets, dependencies first.
#[derive(Debug, Clone)]
pub struct ToolkitGraph {
    pub(crate) components: Vec<Component>,
    pub(crate) targets: Vec<Target>,
    pub(crate) component_index: HashMap<String, ComponentId>,
    pub(crate) target_index: HashMap<String, TargetId>,
    pub(crate) order: Vec<TargetId>,
}

impl ToolkitGraph {
    /// Return all components, in declaration order.
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Return all targets, in declaration order.
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    /// Get a component by ID (returns None if ID out of bounds).
    pub fn component(&self, id: ComponentId) -> Option<&Component> {
        self.components.get(id.slot())
    }

    /// Get a target by ID (returns None if ID out of bounds).
    pub fn target(&self, id: TargetId) -> Option<&Target> {
        self.targets.get(id.slot())
    }

    pub fn find_target(&self, name: &str) -> Option<&Target> {
        self.target_index.get(name).map(|id| &self.targets[id.slot()])
    }

    pub fn contains_target(&self, name: &str) -> bool {
        self.target_index.contains_key(name)
    }

    /// Look up a target by name; unknown names are a `NotFound` error.
    pub fn target_named(&self, name: &str) -> OcResult<&Target> {
        self.find_target(name).ok_or_else(|| {
            GraphError::UnknownTarget {
                name: name.to_string(),
            }
            .into()
        })
    }

    pub fn component_named(&self, name: &str) -> OcResult<&Component> {
        self.component_index
            .get(name)
            .map(|id| &self.components[id.slot()])
            .ok_or_else(|| {
                GraphError::UnknownComponent {
                    name: name.to_string(),
                }
                .into()
            })
    }

    /// Name of the component a target belongs to.
    pub fn component_of(&self, target: &Target) -> &str {
        self.component(target.component)
            .map_or("", |c| c.name.as_str())
    }

    /// Member targets of a component, in declaration order.
    pub fn members<'a>(&'a self, component: &'a Component) -> impl Iterator<Item = &'a Target> + 'a {
        component.targets.iter().map(|id| &self.targets[id.slot()])
    }

    pub(crate) fn name_of(&self, id: TargetId) -> &str {
        &self.targets[id.slot()].name
    }

    pub fn target_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.targets.iter().map(|t| t.name.as_str())
    }

    /// The declared requirement list of a target, unmodified and unflattened.
    pub fn declared_requires(&self, name: &str) -> OcResult<Vec<&str>> {
        let target = self.target_named(name)?;
        Ok(target.requires.iter().map(|&id| self.name_of(id)).collect())
    }

    /// The declared structure: component -> target -> requirement names.
    pub fn decls(&self) -> Vec<ComponentDecl> {
        self.components
            .iter()
            .map(|comp| {
                let targets = comp
                    .targets
                    .iter()
                    .map(|&id| {
                        let target = &self.targets[id.slot()];
                        TargetDecl::new(
                            target.name.clone(),
                            target.requires.iter().map(|&dep| self.name_of(dep)),
                        )
                    })
                    .collect();
                ComponentDecl::new(comp.name.clone(), targets)
            })
            .collect()
    }

    /// Target IDs in build order: every target after all of its requirements.
    pub fn build_order(&self) -> &[TargetId] {
        &self.order
    }

    /// Every target reachable through requirement edges, in build order.
    ///
    /// Only for reporting; published metadata keeps the declared lists.
    pub fn transitive_requires(&self, name: &str) -> OcResult<Vec<&str>> {
        let root = self.target_named(name)?;
        let mut seen = vec![false; self.targets.len()];
        let mut stack: Vec<TargetId> = root.requires.clone();
        while let Some(id) = stack.pop() {
            if seen[id.slot()] {
                continue;
            }
            seen[id.slot()] = true;
            stack.extend(self.targets[id.slot()].requires.iter().copied());
        }
        Ok(self
            .order
            .iter()
            .filter(|id| seen[id.slot()])
            .map(|&id| self.name_of(id))
            .collect())
    }

    /// Targets that list `name` as a direct requirement, in declaration order.
    pub fn dependents(&self, name: &str) -> OcResult<Vec<&str>> {
        let id = self.target_named(name)?.id;
        Ok(self
            .targets
            .iter()
            .filter(|t| t.requires.contains(&id))
            .map(|t| t.name.as_str())
            .collect())
    }

    /// Hex sha256 of the declaration, stable across processes.
    pub fn content_hash(&self) -> String {
        let mut hasher = Sha256::new();
        for comp in &self.components {
            hasher.update(b"C");
            hasher.update(comp.name.as_bytes());
            for &id in &comp.targets {
                let target = &self.targets[id.slot()];
                hasher.update(b"\0T");
                hasher.update(target.name.as_bytes());
                for &dep in &target.requires {
                    hasher.update(b"\0R");
                    hasher.update(self.name_of(dep).as_bytes());
                }
            }
            hasher.update(b"\n");
        }
        format!("{:x}", hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::GraphBuilder;

    fn diamond() -> ToolkitGraph {
        let mut builder = GraphBuilder::new();
        let c = builder.add_component("Core");
        builder.add_target(c, "A", Vec::<String>::new());
        builder.add_target(c, "B", ["A"]);
        builder.add_target(c, "C", ["A"]);
        builder.add_target(c, "D", ["C", "B"]);
        builder.build().unwrap()
    }

    #[test]
    fn declared_requires_keep_order() {
        let graph = diamond();
        assert_eq!(graph.declared_requires("D").unwrap(), vec!["C", "B"]);
        assert!(graph.declared_requires("A").unwrap().is_empty());
    }

    #[test]
    fn transitive_closure_in_build_order() {
        let graph = diamond();
        let closure = graph.transitive_requires("D").unwrap();
        assert_eq!(closure.len(), 3);
        assert_eq!(closure[0], "A");
        assert!(closure.contains(&"B") && closure.contains(&"C"));
    }

    #[test]
    fn dependents_are_reverse_edges() {
        let graph = diamond();
        assert_eq!(graph.dependents("A").unwrap(), vec!["B", "C"]);
        assert!(graph.dependents("D").unwrap().is_empty());
    }

    #[test]
    fn unknown_names_are_not_found() {
        let graph = diamond();
        assert!(graph.target_named("E").unwrap_err().is_not_found());
        assert!(graph.component_named("Draw").unwrap_err().is_not_found());
    }

    #[test]
    fn members_follow_declaration() {
        let graph = diamond();
        let core = graph.component_named("Core").unwrap();
        let names: Vec<&str> = graph.members(core).map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn hash_tracks_declaration() {
        let h1 = diamond().content_hash();
        assert_eq!(h1, diamond().content_hash());

        let mut builder = GraphBuilder::new();
        let c = builder.add_component("Core");
        builder.add_target(c, "A", Vec::<String>::new());
        builder.add_target(c, "B", ["A"]);
        let h2 = builder.build().unwrap().content_hash();
        assert_ne!(h1, h2);
    }
}
