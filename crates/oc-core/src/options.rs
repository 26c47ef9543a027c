//! Package options and optional-dependency feature flags.

use core::fmt;
use core::str::FromStr;
use std::collections::BTreeSet;

use crate::error::{OcError, OcResult};
use crate::platform::OsFamily;

/// An optional third-party dependency that can be switched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Feature {
    /// Video recording through ffmpeg.
    Ffmpeg,
    /// Alternate image I/O through FreeImage.
    Freeimage,
    /// VR runtime through OpenVR.
    Openvr,
    /// glTF export through RapidJSON.
    Rapidjson,
    /// Threading Building Blocks.
    Tbb,
}

impl Feature {
    pub const ALL: [Feature; 5] = [
        Feature::Ffmpeg,
        Feature::Freeimage,
        Feature::Openvr,
        Feature::Rapidjson,
        Feature::Tbb,
    ];

    /// Name of the dependency package providing this feature.
    pub fn package(self) -> &'static str {
        match self {
            Feature::Ffmpeg => "ffmpeg",
            Feature::Freeimage => "freeimage",
            Feature::Openvr => "openvr",
            Feature::Rapidjson => "rapidjson",
            Feature::Tbb => "tbb",
        }
    }

    /// Name of the package option toggling this feature.
    pub fn option_name(self) -> &'static str {
        match self {
            Feature::Ffmpeg => "with_ffmpeg",
            Feature::Freeimage => "with_freeimage",
            Feature::Openvr => "with_openvr",
            Feature::Rapidjson => "with_rapidjson",
            Feature::Tbb => "with_tbb",
        }
    }

    /// ffmpeg and FreeImage have no package available yet; requesting them
    /// can never succeed.
    pub fn is_supported(self) -> bool {
        !matches!(self, Feature::Ffmpeg | Feature::Freeimage)
    }

    pub fn ensure_supported(self) -> OcResult<()> {
        if self.is_supported() {
            Ok(())
        } else {
            Err(OcError::configuration(format!(
                "{}: {} package is not available",
                self.option_name(),
                self.package()
            )))
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.package())
    }
}

impl FromStr for Feature {
    type Err = OcError;

    /// Accepts both `tbb` and `with_tbb`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.strip_prefix("with_").unwrap_or(s);
        Feature::ALL
            .into_iter()
            .find(|f| f.package().eq_ignore_ascii_case(name))
            .ok_or_else(|| OcError::configuration(format!("unknown feature '{}'", s)))
    }
}

/// Set of enabled features, iterated in a fixed order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FeatureSet(BTreeSet<Feature>);

impl FeatureSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, feature: Feature) -> Self {
        self.0.insert(feature);
        self
    }

    pub fn insert(&mut self, feature: Feature) -> bool {
        self.0.insert(feature)
    }

    pub fn contains(&self, feature: Feature) -> bool {
        self.0.contains(&feature)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Feature> + '_ {
        self.0.iter().copied()
    }

    /// Fails on the first enabled feature that can never be satisfied.
    pub fn ensure_supported(&self) -> OcResult<()> {
        self.iter().try_for_each(Feature::ensure_supported)
    }
}

impl FromIterator<Feature> for FeatureSet {
    fn from_iter<I: IntoIterator<Item = Feature>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Package options, using the option names of the published package.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BuildOptions {
    pub shared: bool,
    /// `None` once the option has been removed (Windows, shared builds).
    #[cfg_attr(
        feature = "serde",
        serde(rename = "fPIC", skip_serializing_if = "Option::is_none")
    )]
    pub fpic: Option<bool>,
    pub with_ffmpeg: bool,
    pub with_freeimage: bool,
    pub with_openvr: bool,
    pub with_rapidjson: bool,
    pub with_tbb: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            shared: false,
            fpic: Some(true),
            with_ffmpeg: false,
            with_freeimage: false,
            with_openvr: false,
            with_rapidjson: false,
            with_tbb: false,
        }
    }
}

impl BuildOptions {
    pub fn is_static(&self) -> bool {
        !self.shared
    }

    pub fn feature(&self, feature: Feature) -> bool {
        match feature {
            Feature::Ffmpeg => self.with_ffmpeg,
            Feature::Freeimage => self.with_freeimage,
            Feature::Openvr => self.with_openvr,
            Feature::Rapidjson => self.with_rapidjson,
            Feature::Tbb => self.with_tbb,
        }
    }

    pub fn set_feature(&mut self, feature: Feature, enabled: bool) {
        let slot = match feature {
            Feature::Ffmpeg => &mut self.with_ffmpeg,
            Feature::Freeimage => &mut self.with_freeimage,
            Feature::Openvr => &mut self.with_openvr,
            Feature::Rapidjson => &mut self.with_rapidjson,
            Feature::Tbb => &mut self.with_tbb,
        };
        *slot = enabled;
    }

    pub fn features(&self) -> FeatureSet {
        Feature::ALL
            .into_iter()
            .filter(|&f| self.feature(f))
            .collect()
    }

    /// Drop options that do not apply: there is no fPIC on Windows, and a
    /// shared library is position independent anyway.
    pub fn normalized(&self, os: OsFamily) -> Self {
        let mut options = self.clone();
        if os == OsFamily::Windows || options.shared {
            options.fpic = None;
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn defaults() {
        let options = BuildOptions::default();
        assert!(options.is_static());
        assert_eq!(options.fpic, Some(true));
        assert!(options.features().is_empty());
    }

    #[test]
    fn fpic_removed_where_meaningless() {
        let options = BuildOptions::default();
        assert_eq!(options.normalized(OsFamily::Linux).fpic, Some(true));
        assert_eq!(options.normalized(OsFamily::Windows).fpic, None);

        let shared = BuildOptions {
            shared: true,
            ..BuildOptions::default()
        };
        assert_eq!(shared.normalized(OsFamily::Linux).fpic, None);
    }

    #[test]
    fn feature_parsing() {
        assert_eq!("tbb".parse::<Feature>().unwrap(), Feature::Tbb);
        assert_eq!("with_openvr".parse::<Feature>().unwrap(), Feature::Openvr);
        assert!("with_qt".parse::<Feature>().is_err());
    }

    #[test]
    fn unsupported_features() {
        assert!(Feature::Ffmpeg.ensure_supported().unwrap_err().is_configuration());
        assert!(Feature::Freeimage.ensure_supported().is_err());
        assert!(Feature::Tbb.ensure_supported().is_ok());
    }

    fn feature_set() -> impl Strategy<Value = FeatureSet> {
        prop::collection::vec(prop::sample::select(Feature::ALL.to_vec()), 0..6)
            .prop_map(|v| v.into_iter().collect::<FeatureSet>())
    }

    proptest! {
        #[test]
        fn unsupported_feature_always_rejected(
            others in feature_set(),
            bad in prop::sample::select(vec![Feature::Ffmpeg, Feature::Freeimage]),
        ) {
            let set = others.with(bad);
            prop_assert!(set.ensure_supported().unwrap_err().is_configuration());
        }

        #[test]
        fn features_mirror_flags(set in feature_set()) {
            let mut options = BuildOptions::default();
            for f in set.iter() {
                options.set_feature(f, true);
            }
            prop_assert_eq!(options.features(), set);
        }
    }
}
