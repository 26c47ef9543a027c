use oc_core::{Feature, FeatureSet, OsFamily};
use oc_recipe::*;

fn package_names(set: &std::collections::BTreeSet<Requirement>) -> Vec<&str> {
    set.iter()
        .filter(|r| r.kind == RequirementKind::Package)
        .map(|r| r.name.as_str())
        .collect()
}

#[test]
fn opengl_with_threading_adds_tbb() {
    let base = resolve_external_requirements("TKOpenGl", OsFamily::Linux, &FeatureSet::new()).unwrap();
    assert_eq!(package_names(&base), vec!["freetype::freetype", "opengl::opengl"]);

    let tbb = FeatureSet::new().with(Feature::Tbb);
    let with_tbb = resolve_external_requirements("TKOpenGl", OsFamily::Linux, &tbb).unwrap();
    assert!(with_tbb.is_superset(&base));
    assert!(with_tbb.contains(&Requirement::package("tbb::tbb")));
}

#[test]
fn kernel_system_libraries() {
    let mut profile = BuildProfile::for_os(OsFamily::Linux);
    let linux = emit_build_metadata("TKernel", &profile).unwrap();
    let names: Vec<&str> = linux.external_requires.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["dl", "pthread", "rt"]);

    profile.settings.os = OsFamily::Windows;
    let windows = emit_build_metadata("TKernel", &profile).unwrap();
    let names: Vec<&str> = windows.external_requires.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["advapi32", "gdi32", "psapi", "user32", "wsock32"]);
}

#[test]
fn every_target_publishes_its_declared_list() {
    let recipe = Recipe::new(BuildProfile::default()).unwrap();
    for component in recipe.get_graph() {
        for decl in &component.targets {
            let meta = recipe.emit_build_metadata(&decl.name).unwrap();
            assert_eq!(meta.artifact_name, decl.name);
            assert_eq!(meta.internal_requires, decl.requires);
        }
    }
}

#[test]
fn package_metadata_serializes_with_stable_fields() {
    let recipe = Recipe::new(BuildProfile::for_os(OsFamily::Macos)).unwrap();
    let meta = recipe.emit_package_metadata().unwrap();
    let json = serde_json::to_value(&meta).unwrap();

    assert_eq!(json["cmake_name"], "OpenCASCADE");
    let service = json["targets"]
        .as_array()
        .unwrap()
        .iter()
        .find(|t| t["artifact_name"] == "TKService")
        .unwrap();
    assert_eq!(service["name"], "occt_tkservice");
    assert!(service["internal_requires"].is_array());
    assert!(service["defines"].as_array().unwrap().is_empty());
    assert!(
        service["external_requires"]
            .as_array()
            .unwrap()
            .iter()
            .any(|r| r["kind"] == "framework" && r["name"] == "AppKit")
    );
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    fn os() -> impl Strategy<Value = OsFamily> {
        prop::sample::select(OsFamily::ALL.to_vec())
    }

    fn features() -> impl Strategy<Value = FeatureSet> {
        prop::collection::vec(prop::sample::select(Feature::ALL.to_vec()), 0..5)
            .prop_map(|fs| fs.into_iter().collect::<FeatureSet>())
    }

    fn target() -> impl Strategy<Value = String> {
        let names: Vec<String> = occt_graph()
            .unwrap()
            .target_names()
            .map(str::to_string)
            .collect();
        prop::sample::select(names)
    }

    proptest! {
        #[test]
        fn resolution_is_deterministic(target in target(), os in os(), features in features()) {
            prop_assume!(features.iter().all(Feature::is_supported));
            let a = resolve_external_requirements(&target, os, &features).unwrap();
            let b = resolve_external_requirements(&target, os, &features).unwrap();
            prop_assert_eq!(a, b);
        }

        #[test]
        fn unsupported_flag_always_fails(
            target in target(),
            os in os(),
            features in features(),
            unsupported in prop::sample::select(vec![Feature::Ffmpeg, Feature::Freeimage]),
        ) {
            let features = features.with(unsupported);
            let err = resolve_external_requirements(&target, os, &features).unwrap_err();
            prop_assert!(err.is_configuration());

            let mut profile = BuildProfile::for_os(os);
            for f in features.iter() {
                profile.options.set_feature(f, true);
            }
            prop_assert!(Recipe::new(profile).unwrap_err().is_configuration());
        }

        #[test]
        fn metadata_mirrors_declaration(target in target(), os in os()) {
            let meta = emit_build_metadata(&target, &BuildProfile::for_os(os)).unwrap();
            let declared = occt_graph().unwrap().declared_requires(&target).unwrap();
            prop_assert_eq!(&meta.artifact_name, &target);
            prop_assert_eq!(meta.internal_requires, declared);
        }

        #[test]
        fn missing_placeholder_always_fails(text in "[a-z ]{0,64}", replacement in ".*") {
            let err = patch_upstream_reference(&text, "project (OCCT)", &replacement).unwrap_err();
            prop_assert!(err.is_patch_not_found());
        }
    }
}
