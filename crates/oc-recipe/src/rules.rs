//! Conditional external requirements of individual targets.
//!
//! Each rule attaches descriptors (package handles, system libraries,
//! frameworks) to one target when its condition holds for the build profile.
//! Third-party requirements follow upstream's list of required libraries.

use std::collections::BTreeSet;
use std::fmt;

use oc_core::{Feature, FeatureSet, OcError, OcResult, OsFamily};
use oc_graph::ToolkitGraph;
use serde::{Deserialize, Serialize};

use crate::catalog;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementKind {
    /// Handle of another package's target (`tbb::tbb`).
    Package,
    /// Raw system library (`pthread`).
    SystemLib,
    /// Apple framework (`AppKit`).
    Framework,
}

/// One external requirement of a target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Requirement {
    pub kind: RequirementKind,
    pub name: String,
}

impl Requirement {
    pub fn package(name: impl Into<String>) -> Self {
        Self {
            kind: RequirementKind::Package,
            name: name.into(),
        }
    }

    pub fn system_lib(name: impl Into<String>) -> Self {
        Self {
            kind: RequirementKind::SystemLib,
            name: name.into(),
        }
    }

    pub fn framework(name: impl Into<String>) -> Self {
        Self {
            kind: RequirementKind::Framework,
            name: name.into(),
        }
    }

    /// Package name of a `pkg::target` handle.
    pub fn package_name(&self) -> Option<&str> {
        match self.kind {
            RequirementKind::Package => self.name.split("::").next(),
            _ => None,
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            RequirementKind::Package => write!(f, "{}", self.name),
            RequirementKind::SystemLib => write!(f, "-l{}", self.name),
            RequirementKind::Framework => write!(f, "-framework {}", self.name),
        }
    }
}

/// When a rule applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Always,
    Feature(Feature),
    Os(OsFamily),
    Apple,
    Fontconfig,
}

impl Condition {
    pub fn holds(self, os: OsFamily, features: &FeatureSet) -> bool {
        match self {
            Condition::Always => true,
            Condition::Feature(f) => features.contains(f),
            Condition::Os(target_os) => os == target_os,
            Condition::Apple => os.is_apple(),
            Condition::Fontconfig => os.uses_fontconfig(),
        }
    }
}

/// `(target, condition) -> descriptors`.
#[derive(Debug, Clone, Copy)]
pub struct RequirementRule {
    pub target: &'static str,
    pub condition: Condition,
    pub kind: RequirementKind,
    pub names: &'static [&'static str],
}

impl RequirementRule {
    fn requirements(&self) -> impl Iterator<Item = Requirement> + '_ {
        self.names.iter().map(|name| Requirement {
            kind: self.kind,
            name: (*name).to_string(),
        })
    }
}

const fn rule(
    target: &'static str,
    condition: Condition,
    kind: RequirementKind,
    names: &'static [&'static str],
) -> RequirementRule {
    RequirementRule {
        target,
        condition,
        kind,
        names,
    }
}

use Condition::{Always, Apple, Fontconfig, Os};
use RequirementKind::{Framework, Package, SystemLib};

const TBB: Condition = Condition::Feature(Feature::Tbb);
const WINDOWS: Condition = Os(OsFamily::Windows);

const APPLE_UI: &[&str] = &["AppKit", "IOKit"];
const GL_FONTS: &[&str] = &["freetype::freetype", "opengl::opengl"];
const TBB_PKG: &[&str] = &["tbb::tbb"];

#[rustfmt::skip]
const OCCT_RULES: &[RequirementRule] = &[
    rule("TKBO", TBB, Package, TBB_PKG),

    rule("TKDraw", Always, Package, &["tcl::tcl", "tk::tk"]),
    rule("TKDraw", TBB, Package, TBB_PKG),
    rule("TKDraw", WINDOWS, SystemLib, &["gdi32", "advapi32", "user32", "shell32"]),
    rule("TKDraw", Apple, Framework, APPLE_UI),

    rule("TKernel", TBB, Package, TBB_PKG),
    rule("TKernel", Os(OsFamily::Linux), SystemLib, &["dl", "pthread", "rt"]),
    rule("TKernel", Os(OsFamily::Android), SystemLib, &["log"]),
    rule("TKernel", WINDOWS, SystemLib, &["advapi32", "gdi32", "psapi", "user32", "wsock32"]),

    rule("TKGeomBase", TBB, Package, TBB_PKG),

    rule("TKMath", TBB, Package, TBB_PKG),

    rule("TKOpenGl", Always, Package, GL_FONTS),
    rule("TKOpenGl", TBB, Package, TBB_PKG),
    rule("TKOpenGl", WINDOWS, SystemLib, &["gdi32", "user32"]),
    rule("TKOpenGl", Apple, Framework, APPLE_UI),

    rule("TKQADraw", TBB, Package, TBB_PKG),
    rule("TKQADraw", WINDOWS, SystemLib, &["advapi32", "gdi32", "user32"]),

    rule("TKRWMesh", Condition::Feature(Feature::Rapidjson), Package, &["rapidjson::rapidjson"]),

    rule("TKService", Always, Package, GL_FONTS),
    rule("TKService", Fontconfig, Package, &["fontconfig::fontconfig"]),
    rule("TKService", Condition::Feature(Feature::Ffmpeg), Package, &["ffmpeg::ffmpeg"]),
    rule("TKService", Condition::Feature(Feature::Freeimage), Package, &["freeimage::freeimage"]),
    rule("TKService", Condition::Feature(Feature::Openvr), Package, &["openvr::openvr"]),
    rule("TKService", WINDOWS, SystemLib, &["advapi32", "gdi32", "user32", "winmm"]),
    rule("TKService", Apple, Framework, APPLE_UI),

    rule("TKShHealing", WINDOWS, SystemLib, &["wsock32"]),

    rule("TKTopAlgo", TBB, Package, TBB_PKG),

    rule("TKV3d", Always, Package, GL_FONTS),
    rule("TKV3d", TBB, Package, TBB_PKG),
    rule("TKV3d", WINDOWS, SystemLib, &["gdi32", "user32"]),

    rule("TKViewerTest", Always, Package, &["freetype::freetype", "opengl::opengl", "tcl::tcl", "tk::tk"]),
    rule("TKViewerTest", TBB, Package, TBB_PKG),
    rule("TKViewerTest", WINDOWS, SystemLib, &["gdi32", "user32"]),
    rule("TKViewerTest", Apple, Framework, APPLE_UI),
];

/// The rule table, evaluated as a pure function of (target, OS, features).
#[derive(Debug, Clone, Copy)]
pub struct RuleTable {
    rules: &'static [RequirementRule],
}

impl RuleTable {
    pub fn occt() -> Self {
        Self { rules: OCCT_RULES }
    }

    pub fn rules(&self) -> &'static [RequirementRule] {
        self.rules
    }

    /// Descriptors attached to `target` under the given configuration.
    ///
    /// No name check: an unknown target simply matches no rule.
    pub fn resolve(&self, target: &str, os: OsFamily, features: &FeatureSet) -> BTreeSet<Requirement> {
        self.rules
            .iter()
            .filter(|r| r.target == target && r.condition.holds(os, features))
            .flat_map(|r| r.requirements())
            .collect()
    }

    /// Every rule must name a declared target.
    pub fn validate_against(&self, graph: &ToolkitGraph) -> OcResult<()> {
        match self.rules.iter().find(|r| !graph.contains_target(r.target)) {
            Some(r) => Err(OcError::configuration(format!(
                "requirement rule names undeclared target '{}'",
                r.target
            ))),
            None => Ok(()),
        }
    }
}

/// Resolve the external requirements of a catalog target.
///
/// Unknown targets fail with `NotFound`; unsupported features with
/// `Configuration`.
pub fn resolve_external_requirements(
    target: &str,
    os: OsFamily,
    features: &FeatureSet,
) -> OcResult<BTreeSet<Requirement>> {
    let graph = catalog::occt_graph()?;
    graph.target_named(target)?;
    features.ensure_supported()?;
    let resolved = RuleTable::occt().resolve(target, os, features);
    tracing::debug!(toolkit = target, os = %os, count = resolved.len(), "resolved external requirements");
    Ok(resolved)
}
