//! Concrete information about resolved dependency packages.
//!
//! Filled in by the dependency provider once packages are installed; the
//! recipe only reads library names and directories from it.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use oc_core::{OcError, OcResult};
use serde::{Deserialize, Serialize};

use crate::{RecipeResult, is_json, read_file};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageInfo {
    /// Library names, in link order.
    #[serde(default)]
    pub libs: Vec<String>,
    #[serde(default)]
    pub include_dirs: Vec<PathBuf>,
    #[serde(default)]
    pub lib_dirs: Vec<PathBuf>,
    #[serde(default)]
    pub rootpath: Option<PathBuf>,
}

impl PackageInfo {
    pub fn with_libs<I, S>(libs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            libs: libs.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// First library whose name contains `needle` (`tcl8` in `tcl86t`...).
    pub fn lib_containing(&self, needle: &str) -> Option<&str> {
        self.libs
            .iter()
            .map(String::as_str)
            .find(|lib| lib.contains(needle))
    }

    /// Libraries joined by spaces, the way upstream CMake lists them.
    pub fn joined_libs(&self) -> String {
        self.libs.join(" ")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DependencyInfo {
    pub packages: BTreeMap<String, PackageInfo>,
}

impl DependencyInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, info: PackageInfo) -> Self {
        self.packages.insert(name.into(), info);
        self
    }

    pub fn package(&self, name: &str) -> OcResult<&PackageInfo> {
        self.packages
            .get(name)
            .ok_or_else(|| OcError::configuration(format!("dependency '{}' was not provided", name)))
    }

    /// Library of `package` containing `needle`, required to exist.
    pub fn lib_containing(&self, package: &str, needle: &str) -> OcResult<&str> {
        self.package(package)?.lib_containing(needle).ok_or_else(|| {
            OcError::configuration(format!(
                "dependency '{}' provides no library matching '{}'",
                package, needle
            ))
        })
    }

    pub fn joined_libs(&self, package: &str) -> OcResult<String> {
        let info = self.package(package)?;
        if info.libs.is_empty() {
            return Err(OcError::configuration(format!(
                "dependency '{}' provides no libraries",
                package
            )));
        }
        Ok(info.joined_libs())
    }

    /// First include directory of a package.
    pub fn include_dir(&self, package: &str) -> OcResult<&Path> {
        self.package(package)?
            .include_dirs
            .first()
            .map(PathBuf::as_path)
            .ok_or_else(|| {
                OcError::configuration(format!("dependency '{}' has no include directory", package))
            })
    }

    /// `<rootpath>/lib`, falling back to the first declared lib dir.
    pub fn lib_dir(&self, package: &str) -> OcResult<PathBuf> {
        let info = self.package(package)?;
        info.rootpath
            .as_ref()
            .map(|root| root.join("lib"))
            .or_else(|| info.lib_dirs.first().cloned())
            .ok_or_else(|| {
                OcError::configuration(format!("dependency '{}' has no library directory", package))
            })
    }
}

/// Load dependency info, choosing the format from the file extension.
pub fn load(path: &Path) -> RecipeResult<DependencyInfo> {
    let content = read_file(path)?;
    let info = if is_json(path) {
        serde_json::from_str(&content)?
    } else {
        serde_yaml::from_str(&content)?
    };
    Ok(info)
}
