//! Graph-specific error types.

use oc_core::{ComponentId, OcError};

/// Graph construction, validation and lookup errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// Two components share a name.
    DuplicateComponent { name: String },

    /// Two targets share a name (target names are global, not per component).
    DuplicateTarget {
        name: String,
        first: String,
        second: String,
    },

    /// A target was added to a component id the builder never handed out.
    InvalidComponentRef { target: String, comp: ComponentId },

    /// A dependency name matches no declared target.
    UnknownDependency { target: String, dependency: String },

    /// A target lists itself as a dependency.
    SelfDependency { target: String },

    /// A dependency appears twice in one target's list.
    DuplicateDependency { target: String, dependency: String },

    /// The requirement edges form a cycle through this target.
    Cycle { target: String },

    /// Lookup of an undeclared target.
    UnknownTarget { name: String },

    /// Lookup of an undeclared component.
    UnknownComponent { name: String },
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphError::DuplicateComponent { name } => {
                write!(f, "Component '{}' is declared more than once", name)
            }
            GraphError::DuplicateTarget {
                name,
                first,
                second,
            } => {
                write!(
                    f,
                    "Target '{}' is declared in component '{}' and again in '{}'",
                    name, first, second
                )
            }
            GraphError::InvalidComponentRef { target, comp } => {
                write!(
                    f,
                    "Target '{}' refers to non-existent component {}",
                    target, comp
                )
            }
            GraphError::UnknownDependency { target, dependency } => {
                write!(
                    f,
                    "Target '{}' requires '{}', which is not a declared target",
                    target, dependency
                )
            }
            GraphError::SelfDependency { target } => {
                write!(f, "Target '{}' requires itself", target)
            }
            GraphError::DuplicateDependency { target, dependency } => {
                write!(f, "Target '{}' lists '{}' more than once", target, dependency)
            }
            GraphError::Cycle { target } => {
                write!(f, "Requirement cycle through target '{}'", target)
            }
            GraphError::UnknownTarget { name } => write!(f, "Unknown target '{}'", name),
            GraphError::UnknownComponent { name } => write!(f, "Unknown component '{}'", name),
        }
    }
}

impl std::error::Error for GraphError {}

impl From<GraphError> for OcError {
    fn from(err: GraphError) -> Self {
        match err {
            GraphError::UnknownTarget { name } => OcError::not_found("target", name),
            GraphError::UnknownComponent { name } => OcError::not_found("component", name),
            other => OcError::configuration(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_map_to_not_found() {
        let err: OcError = GraphError::UnknownTarget {
            name: "TKFoo".into(),
        }
        .into();
        assert!(err.is_not_found());
    }

    #[test]
    fn structural_errors_map_to_configuration() {
        let err: OcError = GraphError::UnknownDependency {
            target: "TKMath".into(),
            dependency: "TKernal".into(),
        }
        .into();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("TKernal"));
    }
}
