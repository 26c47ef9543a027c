//! Host/target platform settings.

use core::fmt;
use core::str::FromStr;

use crate::error::OcError;

/// Operating-system family of the build target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OsFamily {
    Windows,
    Linux,
    Macos,
    #[cfg_attr(feature = "serde", serde(rename = "iOS"))]
    Ios,
    #[cfg_attr(feature = "serde", serde(rename = "tvOS"))]
    Tvos,
    #[cfg_attr(feature = "serde", serde(rename = "watchOS"))]
    Watchos,
    Android,
    #[cfg_attr(feature = "serde", serde(rename = "FreeBSD"))]
    FreeBsd,
    #[cfg_attr(feature = "serde", serde(rename = "SunOS"))]
    SunOs,
    Emscripten,
}

impl OsFamily {
    pub const ALL: [OsFamily; 10] = [
        OsFamily::Windows,
        OsFamily::Linux,
        OsFamily::Macos,
        OsFamily::Ios,
        OsFamily::Tvos,
        OsFamily::Watchos,
        OsFamily::Android,
        OsFamily::FreeBsd,
        OsFamily::SunOs,
        OsFamily::Emscripten,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OsFamily::Windows => "Windows",
            OsFamily::Linux => "Linux",
            OsFamily::Macos => "Macos",
            OsFamily::Ios => "iOS",
            OsFamily::Tvos => "tvOS",
            OsFamily::Watchos => "watchOS",
            OsFamily::Android => "Android",
            OsFamily::FreeBsd => "FreeBSD",
            OsFamily::SunOs => "SunOS",
            OsFamily::Emscripten => "Emscripten",
        }
    }

    /// Any of Apple's operating systems.
    pub fn is_apple(self) -> bool {
        matches!(
            self,
            OsFamily::Macos | OsFamily::Ios | OsFamily::Tvos | OsFamily::Watchos
        )
    }

    /// Font discovery goes through fontconfig everywhere except Windows,
    /// Android and Apple platforms.
    pub fn uses_fontconfig(self) -> bool {
        !(self == OsFamily::Windows || self == OsFamily::Android || self.is_apple())
    }
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OsFamily {
    type Err = OcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OsFamily::ALL
            .into_iter()
            .find(|os| os.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| OcError::configuration(format!("unknown operating system '{}'", s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BuildType {
    Debug,
    #[default]
    Release,
    RelWithDebInfo,
    MinSizeRel,
}

impl BuildType {
    pub const ALL: [BuildType; 4] = [
        BuildType::Debug,
        BuildType::Release,
        BuildType::RelWithDebInfo,
        BuildType::MinSizeRel,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BuildType::Debug => "Debug",
            BuildType::Release => "Release",
            BuildType::RelWithDebInfo => "RelWithDebInfo",
            BuildType::MinSizeRel => "MinSizeRel",
        }
    }
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildType {
    type Err = OcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BuildType::ALL
            .into_iter()
            .find(|bt| bt.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| OcError::configuration(format!("unknown build type '{}'", s)))
    }
}

/// Compiler identity, as far as the recipe cares about it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompilerSettings {
    pub name: String,
    pub version: String,
}

impl CompilerSettings {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// Settings of a build invocation (the part not chosen through options).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Settings {
    pub os: OsFamily,
    #[cfg_attr(feature = "serde", serde(default))]
    pub build_type: BuildType,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub compiler: Option<CompilerSettings>,
}

impl Settings {
    pub fn new(os: OsFamily) -> Self {
        Self {
            os,
            build_type: BuildType::default(),
            compiler: None,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(OsFamily::Linux)
    }
}
