//! Build profile: settings plus package options.

use std::path::Path;

use oc_core::{BuildOptions, BuildType, FeatureSet, OcError, OcResult, OsFamily, Settings};
use serde::{Deserialize, Serialize};

use crate::{RecipeResult, is_json, read_file, write_file};

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BuildProfile {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub options: BuildOptions,
}

impl BuildProfile {
    pub fn new(settings: Settings, options: BuildOptions) -> Self {
        Self { settings, options }
    }

    pub fn for_os(os: OsFamily) -> Self {
        Self::new(Settings::new(os), BuildOptions::default())
    }

    pub fn os(&self) -> OsFamily {
        self.settings.os
    }

    pub fn features(&self) -> FeatureSet {
        self.options.features()
    }

    pub fn is_static(&self) -> bool {
        self.options.is_static()
    }

    /// Static Windows builds need `OCCT_STATIC_BUILD` on every consumer.
    pub fn needs_static_define(&self) -> bool {
        self.os() == OsFamily::Windows && self.is_static()
    }

    /// Options with the inapplicable ones removed.
    pub fn normalized(&self) -> Self {
        Self {
            settings: self.settings.clone(),
            options: self.options.normalized(self.os()),
        }
    }

    /// Reject configurations that can never build.
    pub fn validate(&self) -> OcResult<()> {
        self.features().ensure_supported()?;

        if let Some(compiler) = &self.settings.compiler {
            if compiler.name == "clang"
                && compiler.version == "6.0"
                && self.settings.build_type == BuildType::Release
            {
                return Err(OcError::configuration(
                    "OpenCASCADE does not support Clang 6.0 in Release builds",
                ));
            }
        }

        tracing::debug!(os = %self.os(), build_type = %self.settings.build_type, "profile validated");
        Ok(())
    }
}

pub fn load_yaml(path: &Path) -> RecipeResult<BuildProfile> {
    let content = read_file(path)?;
    let profile: BuildProfile = serde_yaml::from_str(&content)?;
    profile.validate()?;
    Ok(profile)
}

pub fn load_json(path: &Path) -> RecipeResult<BuildProfile> {
    let content = read_file(path)?;
    let profile: BuildProfile = serde_json::from_str(&content)?;
    profile.validate()?;
    Ok(profile)
}

/// Load a profile, choosing the format from the file extension.
pub fn load(path: &Path) -> RecipeResult<BuildProfile> {
    if is_json(path) {
        load_json(path)
    } else {
        load_yaml(path)
    }
}

pub fn save_yaml(path: &Path, profile: &BuildProfile) -> RecipeResult<()> {
    profile.validate()?;
    let content = serde_yaml::to_string(profile)?;
    write_file(path, &content)
}
