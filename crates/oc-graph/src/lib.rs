//! oc-graph: component/target dependency graph.
//!
//! Provides:
//! - Declarations (`ComponentDecl`, `TargetDecl`) in their declared order
//! - Incremental graph builder with validation (unique names, closed-world
//!   references, no self edges, acyclicity)
//! - An immutable `ToolkitGraph` with name lookup and closure queries
//! - `BuildOrder`, a topological ranking of targets
//!
//! # Example
//!
//! ```
//! use oc_graph::GraphBuilder;
//!
//! let mut builder = GraphBuilder::new();
//! let foundation = builder.add_component("FoundationClasses");
//! builder.add_target(foundation, "TKernel", Vec::<String>::new());
//! builder.add_target(foundation, "TKMath", ["TKernel"]);
//! let graph = builder.build().unwrap();
//!
//! assert_eq!(graph.targets().len(), 2);
//! assert_eq!(graph.declared_requires("TKMath").unwrap(), vec!["TKernel"]);
//! ```

pub mod builder;
pub mod decl;
pub mod error;
pub mod graph;
pub mod indexing;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use builder::GraphBuilder;
pub use decl::{ComponentDecl, TargetDecl};
pub use error::GraphError;
pub use graph::{Component, Target, ToolkitGraph};
pub use indexing::BuildOrder;
