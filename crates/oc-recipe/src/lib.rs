//! oc-recipe: the OpenCASCADE package recipe.
//!
//! Declares the toolkit catalog, resolves per-target external requirements,
//! emits the published link metadata and patches the upstream build scripts.

pub mod catalog;
pub mod cmake;
pub mod deps;
pub mod metadata;
pub mod package_id;
pub mod patch;
pub mod profile;
pub mod recipe;
pub mod requirements;
pub mod rules;

use std::path::{Path, PathBuf};

pub use catalog::{get_graph, occt_graph};
pub use deps::{DependencyInfo, PackageInfo};
pub use metadata::{BuildMetadata, ComponentMetadata, PackageMetadata, emit_build_metadata};
pub use patch::{PatchSpec, apply_patches, patch_upstream_reference};
pub use profile::BuildProfile;
pub use recipe::Recipe;
pub use requirements::PackageRef;
pub use rules::{Requirement, RequirementKind, resolve_external_requirements};

pub type RecipeResult<T> = Result<T, RecipeError>;

#[derive(thiserror::Error, Debug)]
pub enum RecipeError {
    #[error(transparent)]
    Recipe(#[from] oc_core::OcError),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RecipeError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        RecipeError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub(crate) fn read_file(path: &Path) -> RecipeResult<String> {
    std::fs::read_to_string(path).map_err(|e| RecipeError::io(path, e))
}

pub(crate) fn write_file(path: &Path, content: &str) -> RecipeResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| RecipeError::io(parent, e))?;
        }
    }
    std::fs::write(path, content).map_err(|e| RecipeError::io(path, e))
}

/// `.json` files are read as JSON, anything else as YAML.
pub(crate) fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}
