//! Link metadata published for consumers of the package.

use oc_core::OcResult;
use oc_graph::ToolkitGraph;
use serde::{Deserialize, Serialize};

use crate::catalog::{self, FIND_PACKAGE_NAME};
use crate::profile::BuildProfile;
use crate::rules::{Requirement, RuleTable};

pub const STATIC_BUILD_DEFINE: &str = "OCCT_STATIC_BUILD";

/// Directory holding the generated CMake alias module.
pub const MODULE_SUBFOLDER: &str = "lib/cmake";

/// Package-relative path of the generated CMake alias module.
pub const BUILD_MODULE_PATH: &str = "lib/cmake/conan-official-opencascade-targets.cmake";

/// Per-target link metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildMetadata {
    /// Library file stem; always the target name.
    pub artifact_name: String,
    /// Declared direct requirements, unflattened.
    pub internal_requires: Vec<String>,
    pub external_requires: Vec<Requirement>,
    pub defines: Vec<String>,
}

impl BuildMetadata {
    /// Package-manager component names of the internal requirements.
    pub fn internal_components(&self) -> Vec<String> {
        self.internal_requires
            .iter()
            .map(|name| catalog::component_name(name))
            .collect()
    }
}

/// Aggregate component: requires every member target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentMetadata {
    /// `occt_<component>`.
    pub name: String,
    /// Name under which CMake finds the component.
    pub cmake_name: String,
    pub requires: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetMetadata {
    /// `occt_<target>`.
    pub name: String,
    pub cmake_name: String,
    #[serde(flatten)]
    pub build: BuildMetadata,
}

/// Everything a consumer's generator needs to find the package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageMetadata {
    pub cmake_name: String,
    pub components: Vec<ComponentMetadata>,
    pub targets: Vec<TargetMetadata>,
    pub build_module: String,
    pub append_bin_to_path: bool,
}

/// Metadata of one target under a profile.
pub fn build_metadata(
    graph: &ToolkitGraph,
    rules: &RuleTable,
    profile: &BuildProfile,
    target: &str,
) -> OcResult<BuildMetadata> {
    let internal_requires = graph
        .declared_requires(target)?
        .into_iter()
        .map(str::to_string)
        .collect();
    let external_requires = rules
        .resolve(target, profile.os(), &profile.features())
        .into_iter()
        .collect();
    let defines = if profile.needs_static_define() {
        vec![STATIC_BUILD_DEFINE.to_string()]
    } else {
        Vec::new()
    };

    Ok(BuildMetadata {
        artifact_name: target.to_string(),
        internal_requires,
        external_requires,
        defines,
    })
}

/// Metadata of a catalog target under a profile.
pub fn emit_build_metadata(target: &str, profile: &BuildProfile) -> OcResult<BuildMetadata> {
    let graph = catalog::occt_graph()?;
    profile.validate()?;
    build_metadata(graph, &RuleTable::occt(), profile, target)
}

/// Metadata for every component and target of the graph.
pub fn package_metadata(
    graph: &ToolkitGraph,
    rules: &RuleTable,
    profile: &BuildProfile,
) -> OcResult<PackageMetadata> {
    profile.validate()?;

    let mut components = Vec::with_capacity(graph.components().len());
    let mut targets = Vec::with_capacity(graph.targets().len());

    for component in graph.components() {
        let mut requires = Vec::with_capacity(component.targets.len());
        for target in graph.members(component) {
            let name = catalog::component_name(&target.name);
            requires.push(name.clone());
            targets.push(TargetMetadata {
                name,
                cmake_name: target.name.clone(),
                build: build_metadata(graph, rules, profile, &target.name)?,
            });
        }
        components.push(ComponentMetadata {
            name: catalog::component_name(&component.name),
            cmake_name: component.name.clone(),
            requires,
        });
    }

    tracing::debug!(
        components = components.len(),
        targets = targets.len(),
        "package metadata emitted"
    );

    Ok(PackageMetadata {
        cmake_name: FIND_PACKAGE_NAME.to_string(),
        components,
        targets,
        build_module: BUILD_MODULE_PATH.to_string(),
        append_bin_to_path: profile.options.shared,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use oc_core::{CompilerSettings, OsFamily};

    fn linux() -> BuildProfile {
        BuildProfile::for_os(OsFamily::Linux)
    }

    #[test]
    fn artifact_name_is_target_name() {
        let meta = emit_build_metadata("TKMath", &linux()).unwrap();
        assert_eq!(meta.artifact_name, "TKMath");
        assert_eq!(meta.internal_requires, vec!["TKernel"]);
        assert_eq!(meta.internal_components(), vec!["occt_tkernel"]);
        assert!(meta.defines.is_empty());
    }

    #[test]
    fn static_windows_define() {
        let meta = emit_build_metadata("TKernel", &BuildProfile::for_os(OsFamily::Windows)).unwrap();
        assert_eq!(meta.defines, vec![STATIC_BUILD_DEFINE]);
    }

    #[test]
    fn rejected_profile_emits_nothing() {
        let mut profile = linux();
        profile.settings.compiler = Some(CompilerSettings::new("clang", "6.0"));
        assert!(
            emit_build_metadata("TKernel", &profile)
                .unwrap_err()
                .is_configuration()
        );

        let mut profile = linux();
        profile.options.with_ffmpeg = true;
        assert!(
            emit_build_metadata("TKernel", &profile)
                .unwrap_err()
                .is_configuration()
        );
    }

    #[test]
    fn unknown_target_is_not_found() {
        assert!(
            emit_build_metadata("TKUnknown", &linux())
                .unwrap_err()
                .is_not_found()
        );
    }

    #[test]
    fn package_level_contract() {
        let graph = catalog::occt_graph().unwrap();
        let mut profile = linux();
        let meta = package_metadata(graph, &RuleTable::occt(), &profile).unwrap();

        assert_eq!(meta.cmake_name, "OpenCASCADE");
        assert_eq!(meta.build_module, BUILD_MODULE_PATH);
        assert!(meta.build_module.starts_with(MODULE_SUBFOLDER));
        assert!(!meta.append_bin_to_path);
        assert_eq!(meta.targets.len(), graph.targets().len());

        let foundation = &meta.components[0];
        assert_eq!(foundation.name, "occt_foundationclasses");
        assert_eq!(foundation.requires, vec!["occt_tkernel", "occt_tkmath"]);

        profile.options.shared = true;
        let meta = package_metadata(graph, &RuleTable::occt(), &profile).unwrap();
        assert!(meta.append_bin_to_path);
    }
}
