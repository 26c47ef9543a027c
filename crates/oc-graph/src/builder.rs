//! Incremental graph builder.

use oc_core::{ComponentId, OcResult, TargetId};

use crate::decl::ComponentDecl;
use crate::graph::{Component, Target, ToolkitGraph};
use crate::validate;

#[derive(Debug)]
pub(crate) struct PendingComponent {
    pub(crate) name: String,
    pub(crate) targets: Vec<TargetId>,
}

#[derive(Debug)]
pub(crate) struct PendingTarget {
    pub(crate) id: TargetId,
    pub(crate) name: String,
    pub(crate) component: ComponentId,
    pub(crate) requires: Vec<String>,
}

/// Builder for constructing a graph incrementally.
///
/// Requirements are recorded by name and only resolved in `build()`, so
/// targets may be declared in any order. `build()` validates and freezes the
/// result into an immutable `ToolkitGraph`.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    components: Vec<PendingComponent>,
    targets: Vec<PendingTarget>,
}

impl GraphBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a builder from declarations, keeping their order.
    pub fn from_decls(decls: &[ComponentDecl]) -> Self {
        let mut builder = Self::new();
        for decl in decls {
            let comp = builder.add_component(decl.name.clone());
            for target in &decl.targets {
                builder.add_target(comp, target.name.clone(), target.requires.iter().cloned());
            }
        }
        builder
    }

    /// Add a component and return its ID.
    pub fn add_component(&mut self, name: impl Into<String>) -> ComponentId {
        let id = ComponentId::from_index(self.components.len() as u32);
        self.components.push(PendingComponent {
            name: name.into(),
            targets: Vec::new(),
        });
        id
    }

    /// Add a target to a component, with its direct requirements by name.
    pub fn add_target<I, S>(
        &mut self,
        component: ComponentId,
        name: impl Into<String>,
        requires: I,
    ) -> TargetId
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let id = TargetId::from_index(self.targets.len() as u32);
        if let Some(comp) = self.components.get_mut(component.slot()) {
            comp.targets.push(id);
        }
        self.targets.push(PendingTarget {
            id,
            name: name.into(),
            component,
            requires: requires.into_iter().map(Into::into).collect(),
        });
        id
    }

    /// Build and validate the graph, returning an immutable `ToolkitGraph`.
    pub fn build(self) -> OcResult<ToolkitGraph> {
        // Names first: references can only be resolved against a unique index
        let (component_index, target_index) =
            validate::validate_names(&self.components, &self.targets)?;

        let resolved = validate::resolve_requires(&self.targets, &target_index)?;

        let order = validate::topological_order(&self.targets, &resolved)?;

        let components: Vec<Component> = self
            .components
            .into_iter()
            .enumerate()
            .map(|(i, c)| Component {
                id: ComponentId::from_index(i as u32),
                name: c.name,
                targets: c.targets,
            })
            .collect();

        let targets: Vec<Target> = self
            .targets
            .into_iter()
            .zip(resolved)
            .map(|(t, requires)| Target {
                id: t.id,
                name: t.name,
                component: t.component,
                requires,
            })
            .collect();

        tracing::debug!(
            components = components.len(),
            targets = targets.len(),
            "toolkit graph built"
        );

        Ok(ToolkitGraph {
            components,
            targets,
            component_index,
            target_index,
            order,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decl::TargetDecl;

    #[test]
    fn builder_basic() {
        let mut builder = GraphBuilder::new();
        let c1 = builder.add_component("Foundation");
        let t1 = builder.add_target(c1, "TKernel", Vec::<String>::new());
        let t2 = builder.add_target(c1, "TKMath", ["TKernel"]);

        assert_eq!(c1.index(), 0);
        assert_eq!(t1.index(), 0);
        assert_eq!(t2.index(), 1);
        assert_eq!(builder.components.len(), 1);
        assert_eq!(builder.components[0].targets, vec![t1, t2]);
        assert_eq!(builder.targets.len(), 2);
    }

    #[test]
    fn forward_references_resolve() {
        let mut builder = GraphBuilder::new();
        let c = builder.add_component("Core");
        builder.add_target(c, "Late", ["Early"]);
        builder.add_target(c, "Early", Vec::<String>::new());
        let graph = builder.build().unwrap();

        let order: Vec<&str> = graph
            .build_order()
            .iter()
            .map(|&id| graph.target(id).unwrap().name.as_str())
            .collect();
        assert_eq!(order, vec!["Early", "Late"]);
    }

    #[test]
    fn from_decls_round_trips() {
        let decls = vec![
            ComponentDecl::new(
                "FoundationClasses",
                vec![
                    TargetDecl::new("TKernel", Vec::<String>::new()),
                    TargetDecl::new("TKMath", ["TKernel"]),
                ],
            ),
            ComponentDecl::new("ModelingData", vec![TargetDecl::new("TKG2d", ["TKernel", "TKMath"])]),
        ];
        let graph = GraphBuilder::from_decls(&decls).build().unwrap();
        assert_eq!(graph.decls(), decls);
    }
}
