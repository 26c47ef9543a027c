use std::fs;
use std::path::{Path, PathBuf};

use oc_core::OsFamily;
use oc_recipe::patch::occt_patches;
use oc_recipe::*;

const UPSTREAM: &[(&str, &str)] = &[
    (
        "CMakeLists.txt",
        "cmake_minimum_required (VERSION 3.1)\n\
         project (OCCT)\n\
         include_directories (${3RDPARTY_INCLUDE_DIRS})\n\
         link_directories (${3RDPARTY_LIBRARY_DIRS})\n\
         if (3RDPARTY_NO_LIBS)\n  message (FATAL_ERROR \"no libs\")\nendif()\n\
         if (3RDPARTY_NO_DLLS)\n  message (FATAL_ERROR \"no dlls\")\nendif()\n",
    ),
    (
        "adm/cmake/occt_csf.cmake",
        "set (CSF_FREETYPE \"freetype\")\n\
         set (CSF_fontconfig  \"fontconfig\")\n\
         set (CSF_TBB \"tbb tbbmalloc\")\n\
         set (CSF_OpenVR \"openvr_api\")\n\
         set (CSF_ThreadLibs  \"pthread rt stdc++\")\n",
    ),
    ("adm/cmake/tcl.cmake", "set (TCL_LIB ${CSF_TclLibs})\n"),
    ("adm/cmake/tk.cmake", "set (TK_LIB ${CSF_TclTkLibs})\n"),
    (
        "adm/cmake/occt_toolkit.cmake",
        "target_link_libraries (${PROJECT_NAME} ${USED_EXTERNAL_LIBS_BY_CURRENT_PROJECT})\n\
         if (MSVC)\n    install (FILES  ${CMAKE_BINARY_DIR}/${OS_WITH_BIT}/${COMPILER}/bin\\${OCCT_INSTALL_BIN_LETTER}/${PROJECT_NAME}.pdb\n             CONFIGURATIONS Debug RelWithDebInfo\n             DESTINATION \"${INSTALL_DIR_BIN}\\${OCCT_INSTALL_BIN_LETTER}\")\nendif()\n",
    ),
    (
        "src/Font/Font_FontMgr.cxx",
        "#ifdef _MSC_VER\n#pragma comment (lib, \"freetype.lib\")\n#endif\n",
    ),
    (
        "src/Draw/Draw.cxx",
        "#pragma comment (lib, \"tcl\" STRINGIZE2(TCL_MAJOR_VERSION) STRINGIZE2(TCL_MINOR_VERSION) \".lib\")\n\
         #pragma comment (lib, \"tk\"  STRINGIZE2(TCL_MAJOR_VERSION) STRINGIZE2(TCL_MINOR_VERSION) \".lib\")\n",
    ),
];

fn source_tree(name: &str) -> PathBuf {
    let root = std::env::temp_dir().join(format!("oc_recipe_{}_{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&root);
    for (file, content) in UPSTREAM {
        let path = root.join(file);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
    root
}

fn deps() -> DependencyInfo {
    DependencyInfo::new()
        .with("freetype", PackageInfo::with_libs(["freetype"]))
        .with("fontconfig", PackageInfo::with_libs(["fontconfig"]))
        .with("tcl", PackageInfo::with_libs(["tclstub8.6", "tcl8.6"]))
        .with("tk", PackageInfo::with_libs(["tkstub8.6", "tk8.6"]))
        .with("tbb", PackageInfo::with_libs(["tbb", "tbbmalloc"]))
}

fn read(root: &Path, file: &str) -> String {
    fs::read_to_string(root.join(file)).unwrap()
}

#[test]
fn patches_apply_to_upstream_layout() {
    let root = source_tree("apply");
    let mut profile = BuildProfile::for_os(OsFamily::Linux);
    profile.options.with_tbb = true;
    let patches = occt_patches(&profile, &deps()).unwrap();

    let report = apply_patches(&root, &patches, false).unwrap();
    assert_eq!(report.files.len(), UPSTREAM.len());
    assert_eq!(report.patches, patches.len());

    let cmakelists = read(&root, "CMakeLists.txt");
    assert!(cmakelists.contains("conan_basic_setup(TARGETS)"));
    assert!(cmakelists.contains("${CONAN_INCLUDE_DIRS}"));
    assert!(!cmakelists.contains("3RDPARTY_NO_LIBS"));

    let csf = read(&root, "adm/cmake/occt_csf.cmake");
    assert!(csf.contains("set (CSF_ThreadLibs  \"pthread rt\")"));

    assert_eq!(read(&root, "adm/cmake/tcl.cmake"), "set (TCL_LIB tcl8.6)\n");
    assert_eq!(read(&root, "adm/cmake/tk.cmake"), "set (TK_LIB tk8.6)\n");

    let toolkit = read(&root, "adm/cmake/occt_toolkit.cmake");
    assert!(toolkit.contains("CONAN_PKG::tbb"));
    assert!(!toolkit.contains(".pdb"));

    assert!(!read(&root, "src/Draw/Draw.cxx").contains("pragma"));

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn missing_placeholder_writes_nothing() {
    let root = source_tree("atomic");
    let mut patches = occt_patches(&BuildProfile::default(), &deps()).unwrap();
    patches.push(PatchSpec::new("src/Draw/Draw.cxx", "#pragma once", ""));

    let before = read(&root, "CMakeLists.txt");
    let err = apply_patches(&root, &patches, false).unwrap_err();
    assert!(matches!(
        err,
        RecipeError::Recipe(oc_core::OcError::PatchNotFound { .. })
    ));
    assert_eq!(read(&root, "CMakeLists.txt"), before);

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn failed_write_leaves_tree_untouched() {
    let root = source_tree("staging");
    let patches = occt_patches(&BuildProfile::default(), &deps()).unwrap();
    // a directory where tk.cmake would be staged makes that write fail
    // after the earlier files were already staged
    fs::create_dir(root.join("adm/cmake/tk.cmake.oc-patch")).unwrap();

    let before: Vec<String> = UPSTREAM.iter().map(|(file, _)| read(&root, file)).collect();
    let err = apply_patches(&root, &patches, false).unwrap_err();
    assert!(matches!(err, RecipeError::Io { .. }));
    assert!(err.to_string().contains("tk.cmake.oc-patch"));

    let after: Vec<String> = UPSTREAM.iter().map(|(file, _)| read(&root, file)).collect();
    assert_eq!(after, before);
    assert!(!root.join("CMakeLists.txt.oc-patch").exists());
    assert!(!root.join("adm/cmake/tcl.cmake.oc-patch").exists());

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn no_staging_files_left_behind() {
    let root = source_tree("clean");
    let patches = occt_patches(&BuildProfile::default(), &deps()).unwrap();
    apply_patches(&root, &patches, false).unwrap();

    for (file, _) in UPSTREAM {
        let staged = root.join(format!("{}.oc-patch", file));
        assert!(!staged.exists(), "{} left behind", staged.display());
    }

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn dry_run_leaves_tree_untouched() {
    let root = source_tree("dry");
    let patches = occt_patches(&BuildProfile::default(), &deps()).unwrap();
    let before = read(&root, "adm/cmake/occt_csf.cmake");

    apply_patches(&root, &patches, true).unwrap();
    assert_eq!(read(&root, "adm/cmake/occt_csf.cmake"), before);

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn missing_file_reports_path() {
    let root = source_tree("missing");
    fs::remove_file(root.join("src/Font/Font_FontMgr.cxx")).unwrap();
    let patches = occt_patches(&BuildProfile::default(), &deps()).unwrap();

    let err = apply_patches(&root, &patches, false).unwrap_err();
    assert!(err.to_string().contains("Font_FontMgr.cxx"));

    let _ = fs::remove_dir_all(&root);
}
