//! Third-party packages the recipe depends on.

use std::fmt;

use oc_core::{Feature, OcResult};
use serde::{Deserialize, Serialize};

use crate::profile::BuildProfile;

/// A `name/version` package reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PackageRef {
    pub name: String,
    pub version: String,
}

impl PackageRef {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for PackageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.version)
    }
}

const ALWAYS: &[(&str, &str)] = &[
    ("tcl", "8.6.10"),
    ("tk", "8.6.10"),
    ("freetype", "2.10.4"),
    ("opengl", "system"),
];

const FONTCONFIG: (&str, &str) = ("fontconfig", "2.13.93");

fn feature_version(feature: Feature) -> Option<&'static str> {
    match feature {
        Feature::Openvr => Some("1.14.15"),
        Feature::Rapidjson => Some("1.1.0"),
        Feature::Tbb => Some("2020.3"),
        Feature::Ffmpeg | Feature::Freeimage => None,
    }
}

/// Packages required by a profile, in a fixed order.
pub fn package_requirements(profile: &BuildProfile) -> OcResult<Vec<PackageRef>> {
    profile.features().ensure_supported()?;

    let mut packages: Vec<PackageRef> = ALWAYS
        .iter()
        .map(|(name, version)| PackageRef::new(*name, *version))
        .collect();
    if profile.os().uses_fontconfig() {
        packages.push(PackageRef::new(FONTCONFIG.0, FONTCONFIG.1));
    }
    for feature in profile.features().iter() {
        if let Some(version) = feature_version(feature) {
            packages.push(PackageRef::new(feature.package(), version));
        }
    }
    Ok(packages)
}
