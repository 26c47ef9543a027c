//! The recipe bound to one validated build profile.

use std::collections::{BTreeMap, BTreeSet};

use oc_core::{OcResult, OsFamily};
use oc_graph::{ComponentDecl, ToolkitGraph};

use crate::catalog;
use crate::cmake;
use crate::deps::DependencyInfo;
use crate::metadata::{self, BuildMetadata, PackageMetadata};
use crate::package_id;
use crate::patch::{self, PatchSpec};
use crate::profile::BuildProfile;
use crate::requirements::{self, PackageRef};
use crate::rules::{Requirement, RuleTable};

/// Entry point for every build-setup query.
///
/// Construction validates the catalog, the rule table and the profile, so
/// nothing downstream can observe an invalid configuration.
#[derive(Debug, Clone)]
pub struct Recipe {
    graph: &'static ToolkitGraph,
    rules: RuleTable,
    profile: BuildProfile,
}

impl Recipe {
    pub fn new(profile: BuildProfile) -> OcResult<Self> {
        let graph = catalog::occt_graph()?;
        let rules = RuleTable::occt();
        rules.validate_against(graph)?;
        profile.validate()?;
        let normalized = profile.normalized();
        if profile.options.fpic == Some(false) && normalized.options.fpic.is_none() {
            tracing::warn!(os = %profile.os(), shared = profile.options.shared, "fPIC=false ignored");
        }
        let profile = normalized;

        tracing::info!(
            os = %profile.os(),
            shared = profile.options.shared,
            features = profile.features().iter().count(),
            "recipe configured"
        );

        Ok(Self {
            graph,
            rules,
            profile,
        })
    }

    pub fn profile(&self) -> &BuildProfile {
        &self.profile
    }

    pub fn graph(&self) -> &'static ToolkitGraph {
        self.graph
    }

    pub fn get_graph(&self) -> Vec<ComponentDecl> {
        self.graph.decls()
    }

    /// External requirements of `target` under this profile.
    pub fn resolve_external_requirements(&self, target: &str) -> OcResult<BTreeSet<Requirement>> {
        self.resolve_for(target, self.profile.os())
    }

    /// External requirements of `target` as if building for `os`.
    pub fn resolve_for(&self, target: &str, os: OsFamily) -> OcResult<BTreeSet<Requirement>> {
        self.graph.target_named(target)?;
        Ok(self.rules.resolve(target, os, &self.profile.features()))
    }

    pub fn emit_build_metadata(&self, target: &str) -> OcResult<BuildMetadata> {
        metadata::build_metadata(self.graph, &self.rules, &self.profile, target)
    }

    pub fn emit_package_metadata(&self) -> OcResult<PackageMetadata> {
        metadata::package_metadata(self.graph, &self.rules, &self.profile)
    }

    pub fn requirements(&self) -> OcResult<Vec<PackageRef>> {
        requirements::package_requirements(&self.profile)
    }

    pub fn patches(&self, deps: &DependencyInfo) -> OcResult<Vec<PatchSpec>> {
        patch::occt_patches(&self.profile, deps)
    }

    pub fn cmake_definitions(&self, deps: &DependencyInfo) -> OcResult<BTreeMap<String, String>> {
        cmake::cmake_definitions(&self.profile, deps)
    }

    /// Suffixed install folders to move back to `lib` and `bin` after the build.
    pub fn install_dir_renames(&self) -> &'static [(&'static str, &'static str)] {
        cmake::install_dir_renames(self.profile.settings.build_type)
    }

    pub fn alias_module(&self) -> String {
        cmake::alias_module(self.graph)
    }

    pub fn package_id(&self) -> String {
        package_id::compute_package_id(&self.profile, self.graph)
    }
}
