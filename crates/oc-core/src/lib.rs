//! oc-core: stable foundation for the OCCT package recipe.
//!
//! Contains:
//! - error (configuration / not-found / patch error taxonomy)
//! - ids (compact IDs for graph objects)
//! - platform (OS family, build type, compiler settings)
//! - options (package options and optional-dependency feature flags)

pub mod error;
pub mod ids;
pub mod options;
pub mod platform;

// Re-exports: nice ergonomics for downstream crates
pub use error::{OcError, OcResult};
pub use ids::*;
pub use options::{BuildOptions, Feature, FeatureSet};
pub use platform::{BuildType, CompilerSettings, OsFamily, Settings};
