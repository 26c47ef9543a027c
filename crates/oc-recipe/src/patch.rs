//! Substitutions applied to upstream's build scripts before configuring.
//!
//! Upstream hard-codes library names and search paths; every patch swaps a
//! known placeholder for what the dependency provider actually installed.
//! A placeholder that is no longer there means upstream changed, so it is an
//! error rather than a silent no-op.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use oc_core::{Feature, OcError, OcResult};
use serde::{Deserialize, Serialize};

use crate::deps::DependencyInfo;
use crate::profile::BuildProfile;
use crate::{RecipeError, RecipeResult, read_file};

/// Replace every occurrence of `placeholder` in `text`.
pub fn patch_upstream_reference(text: &str, placeholder: &str, replacement: &str) -> OcResult<String> {
    patch_text("<text>", text, placeholder, replacement)
}

/// Same as [`patch_upstream_reference`], naming `file` in the error.
pub fn patch_text(file: &str, text: &str, placeholder: &str, replacement: &str) -> OcResult<String> {
    if placeholder.is_empty() || !text.contains(placeholder) {
        return Err(OcError::PatchNotFound {
            file: file.to_string(),
            placeholder: placeholder.to_string(),
        });
    }
    Ok(text.replace(placeholder, replacement))
}

/// One substitution in one upstream file (path relative to the source root).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchSpec {
    pub file: String,
    pub placeholder: String,
    pub replacement: String,
}

impl PatchSpec {
    pub fn new(
        file: impl Into<String>,
        placeholder: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Self {
        Self {
            file: file.into(),
            placeholder: placeholder.into(),
            replacement: replacement.into(),
        }
    }

    pub fn apply(&self, text: &str) -> OcResult<String> {
        patch_text(&self.file, text, &self.placeholder, &self.replacement)
    }
}

const CMAKELISTS: &str = "CMakeLists.txt";
const OCCT_CSF: &str = "adm/cmake/occt_csf.cmake";
const OCCT_TOOLKIT: &str = "adm/cmake/occt_toolkit.cmake";
const TCL_CMAKE: &str = "adm/cmake/tcl.cmake";
const TK_CMAKE: &str = "adm/cmake/tk.cmake";
const FONT_MGR: &str = "src/Font/Font_FontMgr.cxx";
const DRAW: &str = "src/Draw/Draw.cxx";

const PROJECT_LINE: &str = "project (OCCT)";

const PACKAGE_SETUP: &str = "project (OCCT)
                include(${CMAKE_BINARY_DIR}/conanbuildinfo.cmake)
                conan_basic_setup(TARGETS)";

const PDB_INSTALL: &str = r#"    install (FILES  ${CMAKE_BINARY_DIR}/${OS_WITH_BIT}/${COMPILER}/bin\${OCCT_INSTALL_BIN_LETTER}/${PROJECT_NAME}.pdb
             CONFIGURATIONS Debug RelWithDebInfo
             DESTINATION "${INSTALL_DIR_BIN}\${OCCT_INSTALL_BIN_LETTER}")"#;

const FREETYPE_PRAGMA: &str = r#"#pragma comment (lib, "freetype.lib")"#;

const TCLTK_PRAGMA: &str = r#"#pragma comment (lib, "tcl" STRINGIZE2(TCL_MAJOR_VERSION) STRINGIZE2(TCL_MINOR_VERSION) ".lib")
#pragma comment (lib, "tk"  STRINGIZE2(TCL_MAJOR_VERSION) STRINGIZE2(TCL_MINOR_VERSION) ".lib")"#;

/// Link order of the optional package targets appended to every toolkit.
const LINKED_FEATURES: [Feature; 4] = [Feature::Tbb, Feature::Ffmpeg, Feature::Freeimage, Feature::Openvr];

/// Upstream CSF variable listing the libraries of an optional feature, its
/// default value and the package target linked instead.
fn csf_line(feature: Feature) -> Option<(&'static str, &'static str, &'static str)> {
    match feature {
        Feature::Tbb => Some(("CSF_TBB", "tbb tbbmalloc", "CONAN_PKG::tbb")),
        Feature::Ffmpeg => Some((
            "CSF_FFmpeg",
            "avcodec avformat swscale avutil",
            "CONAN_PKG::ffmpeg",
        )),
        Feature::Freeimage => Some(("CSF_FreeImagePlus", "freeimage", "CONAN_PKG::freeimage")),
        Feature::Openvr => Some(("CSF_OpenVR", "openvr_api", "CONAN_PKG::openvr")),
        // header-only, nothing to link
        Feature::Rapidjson => None,
    }
}

fn csf_patch(variable: &str, separator: &str, upstream: &str, libs: &str) -> PatchSpec {
    PatchSpec::new(
        OCCT_CSF,
        format!("set ({}{}\"{}\")", variable, separator, upstream),
        format!("set ({}{}\"{}\")", variable, separator, libs),
    )
}

/// The full patch list for a profile, given the installed dependencies.
pub fn occt_patches(profile: &BuildProfile, deps: &DependencyInfo) -> OcResult<Vec<PatchSpec>> {
    profile.validate()?;
    let features = profile.features();

    let mut patches = vec![
        PatchSpec::new(CMAKELISTS, PROJECT_LINE, PACKAGE_SETUP),
        PatchSpec::new(CMAKELISTS, "${3RDPARTY_INCLUDE_DIRS}", "${CONAN_INCLUDE_DIRS}"),
        PatchSpec::new(CMAKELISTS, "${3RDPARTY_LIBRARY_DIRS}", "${CONAN_LIB_DIRS}"),
        PatchSpec::new(CMAKELISTS, "if (3RDPARTY_NO_LIBS)", "if(0)"),
        PatchSpec::new(CMAKELISTS, "if (3RDPARTY_NO_DLLS)", "if(0)"),
    ];

    let mut package_targets = vec!["CONAN_PKG::tcl", "CONAN_PKG::tk", "CONAN_PKG::freetype"];

    patches.push(csf_patch("CSF_FREETYPE", " ", "freetype", &deps.joined_libs("freetype")?));
    patches.push(PatchSpec::new(
        TCL_CMAKE,
        "${CSF_TclLibs}",
        deps.lib_containing("tcl", "tcl8")?,
    ));
    patches.push(PatchSpec::new(
        TK_CMAKE,
        "${CSF_TclTkLibs}",
        deps.lib_containing("tk", "tk8")?,
    ));

    if profile.os().uses_fontconfig() {
        patches.push(csf_patch(
            "CSF_fontconfig",
            "  ",
            "fontconfig",
            &deps.joined_libs("fontconfig")?,
        ));
    }

    for feature in LINKED_FEATURES {
        if !features.contains(feature) {
            continue;
        }
        let Some((variable, upstream, package_target)) = csf_line(feature) else {
            continue;
        };
        package_targets.push(package_target);
        patches.push(csf_patch(
            variable,
            " ",
            upstream,
            &deps.joined_libs(feature.package())?,
        ));
    }

    patches.push(PatchSpec::new(
        OCCT_CSF,
        "set (CSF_ThreadLibs  \"pthread rt stdc++\")",
        "set (CSF_ThreadLibs  \"pthread rt\")",
    ));
    patches.push(PatchSpec::new(
        OCCT_TOOLKIT,
        "${USED_EXTERNAL_LIBS_BY_CURRENT_PROJECT}",
        format!(
            "${{USED_EXTERNAL_LIBS_BY_CURRENT_PROJECT}} {}",
            package_targets.join(" ")
        ),
    ));
    patches.push(PatchSpec::new(OCCT_TOOLKIT, PDB_INSTALL, ""));
    patches.push(PatchSpec::new(FONT_MGR, FREETYPE_PRAGMA, ""));
    patches.push(PatchSpec::new(DRAW, TCLTK_PRAGMA, ""));

    Ok(patches)
}

/// Outcome of applying a patch list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchReport {
    /// Files rewritten (or that would be, on a dry run), sorted.
    pub files: Vec<PathBuf>,
    pub patches: usize,
}

/// A patched file written next to its target, waiting to be renamed over it.
struct Staged {
    target: PathBuf,
    staged: PathBuf,
    original: String,
}

fn staging_path(target: &Path) -> PathBuf {
    let mut name = target.file_name().map(OsString::from).unwrap_or_default();
    name.push(".oc-patch");
    target.with_file_name(name)
}

fn discard(staged: &[Staged]) {
    for file in staged {
        let _ = fs::remove_file(&file.staged);
    }
}

/// Rename every staged file into place. On failure the files already
/// replaced get their original content back and the rest are discarded.
fn commit(staged: &[Staged]) -> RecipeResult<()> {
    for (i, file) in staged.iter().enumerate() {
        if let Err(source) = fs::rename(&file.staged, &file.target) {
            for done in &staged[..i] {
                if let Err(e) = fs::write(&done.target, &done.original) {
                    tracing::error!(path = %done.target.display(), error = %e, "could not restore original");
                }
            }
            discard(&staged[i..]);
            return Err(RecipeError::io(&file.target, source));
        }
    }
    Ok(())
}

/// Apply `patches` under `source_dir`, all or nothing.
///
/// Every file is read and patched in memory first; nothing is written unless
/// every placeholder was found. Patched files are then staged beside their
/// targets and renamed into place, so a failed write leaves the tree as it
/// was. With `dry_run` nothing is written at all.
pub fn apply_patches(
    source_dir: &Path,
    patches: &[PatchSpec],
    dry_run: bool,
) -> RecipeResult<PatchReport> {
    // file -> (original, patched)
    let mut patched: BTreeMap<&str, (String, String)> = BTreeMap::new();

    for patch in patches {
        let (original, current) = match patched.remove(patch.file.as_str()) {
            Some(texts) => texts,
            None => {
                let text = read_file(&source_dir.join(&patch.file))?;
                (text.clone(), text)
            }
        };
        let text = patch.apply(&current)?;
        patched.insert(patch.file.as_str(), (original, text));
    }

    let files: Vec<PathBuf> = patched.keys().map(|f| source_dir.join(f)).collect();

    if dry_run {
        tracing::info!(files = files.len(), patches = patches.len(), "dry run: all patches apply");
    } else {
        let mut staged = Vec::with_capacity(patched.len());
        for (file, (original, text)) in patched {
            let target = source_dir.join(file);
            let staging = staging_path(&target);
            if let Err(source) = fs::write(&staging, &text) {
                discard(&staged);
                return Err(RecipeError::io(&staging, source));
            }
            staged.push(Staged {
                target,
                staged: staging,
                original,
            });
        }
        commit(&staged)?;
        tracing::info!(files = files.len(), patches = patches.len(), "upstream sources patched");
    }

    Ok(PatchReport {
        files,
        patches: patches.len(),
    })
}
