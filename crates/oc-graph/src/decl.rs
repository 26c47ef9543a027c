//! Plain declarations of components and targets.
//!
//! These are the declared form of the graph: names only, in declaration
//! order. `ToolkitGraph::decls` gives them back unchanged.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetDecl {
    pub name: String,
    #[serde(default)]
    pub requires: Vec<String>,
}

impl TargetDecl {
    pub fn new<I, S>(name: impl Into<String>, requires: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            requires: requires.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentDecl {
    pub name: String,
    #[serde(default)]
    pub targets: Vec<TargetDecl>,
}

impl ComponentDecl {
    pub fn new(name: impl Into<String>, targets: Vec<TargetDecl>) -> Self {
        Self {
            name: name.into(),
            targets,
        }
    }
}
