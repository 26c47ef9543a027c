//! CMake-facing outputs: configure definitions and the alias-target module.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;

use oc_core::{BuildType, Feature, OcResult};
use oc_graph::ToolkitGraph;

use crate::catalog::TARGET_NAMESPACE;
use crate::deps::DependencyInfo;
use crate::profile::BuildProfile;
use crate::{RecipeResult, write_file};

fn on_off(enabled: bool) -> String {
    let value = if enabled { "ON" } else { "OFF" };
    value.to_string()
}

const INSTALL_LAYOUT: &[(&str, &str)] = &[
    ("INSTALL_DIR_BIN", "bin"),
    ("INSTALL_DIR_INCLUDE", "include"),
    ("INSTALL_DIR_LIB", "lib"),
    ("INSTALL_DIR_RESOURCE", "res/resource"),
    ("INSTALL_DIR_DATA", "res/data"),
    ("INSTALL_DIR_SAMPLES", "res/samples"),
    ("INSTALL_DIR_DOC", "res/doc"),
    ("INSTALL_DIR_LAYOUT", "Unix"),
];

/// Cache variables passed to upstream's configure step.
pub fn cmake_definitions(
    profile: &BuildProfile,
    deps: &DependencyInfo,
) -> OcResult<BTreeMap<String, String>> {
    profile.validate()?;
    let mut defs = BTreeMap::new();

    for (package, prefix) in [("tcl", "3RDPARTY_TCL"), ("tk", "3RDPARTY_TK")] {
        defs.insert(
            format!("{}_LIBRARY_DIR", prefix),
            deps.lib_dir(package)?.display().to_string(),
        );
        defs.insert(
            format!("{}_INCLUDE_DIR", prefix),
            deps.include_dir(package)?.display().to_string(),
        );
    }

    if profile.is_static() {
        defs.insert("BUILD_LIBRARY_TYPE".into(), "Static".into());
    }

    for (key, value) in INSTALL_LAYOUT {
        defs.insert((*key).to_string(), (*value).to_string());
    }

    defs.insert("BUILD_DOC_Overview".into(), on_off(false));

    let options = &profile.options;
    defs.insert("USE_FREEIMAGE".into(), on_off(options.feature(Feature::Freeimage)));
    defs.insert("USE_OPENVR".into(), on_off(options.feature(Feature::Openvr)));
    defs.insert("USE_FFMPEG".into(), on_off(options.feature(Feature::Ffmpeg)));
    defs.insert("USE_TBB".into(), on_off(options.feature(Feature::Tbb)));
    defs.insert("USE_RAPIDJSON".into(), on_off(options.feature(Feature::Rapidjson)));

    Ok(defs)
}

/// Upstream installs non-release builds into suffixed folders
/// (`libd`, `bini`...); the package moves them back to `lib` and `bin`.
pub fn install_dir_renames(build_type: BuildType) -> &'static [(&'static str, &'static str)] {
    match build_type {
        BuildType::Debug => &[("libd", "lib"), ("bind", "bin")],
        BuildType::RelWithDebInfo => &[("libi", "lib"), ("bini", "bin")],
        BuildType::Release | BuildType::MinSizeRel => &[],
    }
}

/// CMake module aliasing every `OpenCASCADE::T` imported target as plain `T`.
pub fn alias_module(graph: &ToolkitGraph) -> String {
    let mut content = String::new();
    for component in graph.components() {
        for target in graph.members(component) {
            let alias = &target.name;
            let aliased = format!("{}::{}", TARGET_NAMESPACE, alias);
            // writing to a String cannot fail
            let _ = write!(
                content,
                "if(TARGET {aliased} AND NOT TARGET {alias})\n    \
                 add_library({alias} INTERFACE IMPORTED)\n    \
                 set_property(TARGET {alias} PROPERTY INTERFACE_LINK_LIBRARIES {aliased})\n\
                 endif()\n"
            );
        }
    }
    content
}

/// Write the alias module to `path`, creating parent directories.
pub fn save_alias_module(path: &Path, graph: &ToolkitGraph) -> RecipeResult<()> {
    write_file(path, &alias_module(graph))?;
    tracing::info!(path = %path.display(), "alias module written");
    Ok(())
}
