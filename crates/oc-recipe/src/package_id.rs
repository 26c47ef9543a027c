//! Content-based package identity.

use oc_graph::ToolkitGraph;
use sha2::{Digest, Sha256};

use crate::profile::BuildProfile;

/// Identity of a binary package: the normalized profile plus the declared
/// toolkit graph. Any change to either yields a different id.
pub fn compute_package_id(profile: &BuildProfile, graph: &ToolkitGraph) -> String {
    let mut hasher = Sha256::new();

    let profile_json = serde_json::to_string(&profile.normalized()).unwrap_or_default();
    hasher.update(profile_json.as_bytes());

    hasher.update(graph.content_hash().as_bytes());

    let result = hasher.finalize();
    format!("{:x}", result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use oc_core::OsFamily;
    use oc_graph::GraphBuilder;

    #[test]
    fn id_is_stable() {
        let graph = catalog::occt_graph().unwrap();
        let profile = BuildProfile::default();
        let a = compute_package_id(&profile, graph);
        let b = compute_package_id(&profile, graph);
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn id_tracks_profile_and_graph() {
        let graph = catalog::occt_graph().unwrap();
        let linux = compute_package_id(&BuildProfile::for_os(OsFamily::Linux), graph);
        let windows = compute_package_id(&BuildProfile::for_os(OsFamily::Windows), graph);
        assert_ne!(linux, windows);

        let mut builder = GraphBuilder::new();
        let c = builder.add_component("FoundationClasses");
        builder.add_target(c, "TKernel", Vec::<String>::new());
        let small = builder.build().unwrap();
        assert_ne!(linux, compute_package_id(&BuildProfile::default(), &small));
    }

    #[test]
    fn removed_options_do_not_matter() {
        // fPIC is meaningless for shared builds
        let graph = catalog::occt_graph().unwrap();
        let mut a = BuildProfile::default();
        a.options.shared = true;
        let mut b = a.clone();
        b.options.fpic = Some(false);
        assert_eq!(compute_package_id(&a, graph), compute_package_id(&b, graph));
    }
}
