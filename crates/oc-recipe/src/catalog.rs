//! The OCCT toolkit catalog: every library target, grouped by component,
//! with its direct link requirements.

use std::sync::OnceLock;

use oc_core::OcResult;
use oc_graph::{ComponentDecl, GraphBuilder, TargetDecl, ToolkitGraph};

type ToolkitTable = &'static [(&'static str, &'static [(&'static str, &'static [&'static str])])];

/// Upstream name of the CMake package consumers look for.
pub const FIND_PACKAGE_NAME: &str = "OpenCASCADE";

/// Namespace of the imported targets generated by upstream's CMake config.
pub const TARGET_NAMESPACE: &str = "OpenCASCADE";

#[rustfmt::skip]
const TOOLKITS: ToolkitTable = &[
    (
        "FoundationClasses",
        &[
            ("TKernel", &[]),
            ("TKMath", &["TKernel"]),
        ],
    ),
    (
        "ModelingData",
        &[
            ("TKG2d", &["TKernel", "TKMath"]),
            ("TKG3d", &["TKMath", "TKernel", "TKG2d"]),
            ("TKGeomBase", &["TKernel", "TKMath", "TKG2d", "TKG3d"]),
            ("TKBRep", &["TKMath", "TKernel", "TKG2d", "TKG3d", "TKGeomBase"]),
        ],
    ),
    (
        "ModelingAlgorithms",
        &[
            ("TKGeomAlgo", &["TKernel", "TKMath", "TKG3d", "TKG2d", "TKGeomBase", "TKBRep"]),
            (
                "TKTopAlgo",
                &[
                    "TKMath", "TKernel", "TKG2d", "TKG3d", "TKGeomBase", "TKBRep", "TKGeomAlgo",
                ],
            ),
            (
                "TKPrim",
                &[
                    "TKBRep", "TKernel", "TKMath", "TKG2d", "TKGeomBase", "TKG3d", "TKTopAlgo",
                ],
            ),
            (
                "TKBO",
                &[
                    "TKBRep", "TKTopAlgo", "TKMath", "TKernel", "TKG2d", "TKG3d", "TKGeomAlgo",
                    "TKGeomBase", "TKPrim", "TKShHealing",
                ],
            ),
            (
                "TKBool",
                &[
                    "TKBRep", "TKTopAlgo", "TKMath", "TKernel", "TKPrim", "TKG2d", "TKG3d",
                    "TKShHealing", "TKGeomBase", "TKGeomAlgo", "TKBO",
                ],
            ),
            (
                "TKHLR",
                &[
                    "TKBRep", "TKernel", "TKMath", "TKGeomBase", "TKG2d", "TKG3d", "TKGeomAlgo",
                    "TKTopAlgo",
                ],
            ),
            (
                "TKFillet",
                &[
                    "TKBRep", "TKernel", "TKMath", "TKGeomBase", "TKGeomAlgo", "TKG2d",
                    "TKTopAlgo", "TKG3d", "TKBool", "TKShHealing", "TKBO",
                ],
            ),
            (
                "TKOffset",
                &[
                    "TKFillet", "TKBRep", "TKTopAlgo", "TKMath", "TKernel", "TKGeomBase", "TKG2d",
                    "TKG3d", "TKGeomAlgo", "TKShHealing", "TKBO", "TKPrim", "TKBool",
                ],
            ),
            (
                "TKFeat",
                &[
                    "TKBRep", "TKTopAlgo", "TKGeomAlgo", "TKMath", "TKernel", "TKGeomBase",
                    "TKPrim", "TKG2d", "TKBO", "TKG3d", "TKBool", "TKShHealing",
                ],
            ),
            (
                "TKMesh",
                &[
                    "TKernel", "TKMath", "TKBRep", "TKTopAlgo", "TKShHealing", "TKGeomBase",
                    "TKG3d", "TKG2d",
                ],
            ),
            ("TKXMesh", &["TKBRep", "TKMath", "TKernel", "TKG2d", "TKG3d", "TKMesh"]),
            (
                "TKShHealing",
                &[
                    "TKBRep", "TKernel", "TKMath", "TKG2d", "TKTopAlgo", "TKG3d", "TKGeomBase",
                    "TKGeomAlgo",
                ],
            ),
        ],
    ),
    (
        "Visualization",
        &[
            ("TKService", &["TKernel", "TKMath"]),
            (
                "TKV3d",
                &[
                    "TKBRep", "TKMath", "TKernel", "TKService", "TKShHealing", "TKTopAlgo",
                    "TKG2d", "TKG3d", "TKGeomBase", "TKMesh", "TKGeomAlgo", "TKHLR",
                ],
            ),
            ("TKOpenGl", &["TKernel", "TKService", "TKMath"]),
            ("TKMeshVS", &["TKV3d", "TKMath", "TKService", "TKernel", "TKG3d", "TKG2d"]),
        ],
    ),
    (
        "ApplicationFramework",
        &[
            ("TKCDF", &["TKernel"]),
            ("TKLCAF", &["TKCDF", "TKernel"]),
            (
                "TKCAF",
                &[
                    "TKernel", "TKGeomBase", "TKBRep", "TKTopAlgo", "TKMath", "TKG2d", "TKG3d",
                    "TKCDF", "TKLCAF", "TKBO",
                ],
            ),
            ("TKBinL", &["TKCDF", "TKernel", "TKLCAF"]),
            ("TKXmlL", &["TKCDF", "TKernel", "TKMath", "TKLCAF"]),
            (
                "TKBin",
                &[
                    "TKBRep", "TKMath", "TKernel", "TKG2d", "TKG3d", "TKCAF", "TKCDF", "TKLCAF",
                    "TKBinL",
                ],
            ),
            (
                "TKXml",
                &[
                    "TKCDF", "TKernel", "TKMath", "TKBRep", "TKG2d", "TKGeomBase", "TKG3d",
                    "TKLCAF", "TKCAF", "TKXmlL",
                ],
            ),
            ("TKStdL", &["TKernel", "TKCDF", "TKLCAF"]),
            (
                "TKStd",
                &[
                    "TKernel", "TKCDF", "TKCAF", "TKLCAF", "TKBRep", "TKMath", "TKG2d", "TKG3d",
                    "TKStdL",
                ],
            ),
            ("TKTObj", &["TKCDF", "TKernel", "TKMath", "TKLCAF"]),
            ("TKBinTObj", &["TKCDF", "TKernel", "TKTObj", "TKMath", "TKLCAF", "TKBinL"]),
            ("TKXmlTObj", &["TKCDF", "TKernel", "TKTObj", "TKMath", "TKLCAF", "TKXmlL"]),
            (
                "TKVCAF",
                &[
                    "TKernel", "TKGeomBase", "TKBRep", "TKTopAlgo", "TKMath", "TKService", "TKG2d",
                    "TKG3d", "TKCDF", "TKLCAF", "TKBO", "TKCAF", "TKV3d",
                ],
            ),
        ],
    ),
    (
        "DataExchange",
        &[
            (
                "TKXSBase",
                &[
                    "TKBRep", "TKernel", "TKMath", "TKG2d", "TKG3d", "TKTopAlgo", "TKGeomBase",
                    "TKShHealing",
                ],
            ),
            ("TKSTEPBase", &["TKernel", "TKXSBase", "TKMath"]),
            ("TKSTEPAttr", &["TKernel", "TKXSBase", "TKSTEPBase"]),
            ("TKSTEP209", &["TKernel", "TKXSBase", "TKSTEPBase"]),
            (
                "TKSTEP",
                &[
                    "TKernel", "TKSTEPAttr", "TKSTEP209", "TKSTEPBase", "TKBRep", "TKMath",
                    "TKG2d", "TKShHealing", "TKTopAlgo", "TKG3d", "TKGeomBase", "TKGeomAlgo",
                    "TKXSBase",
                ],
            ),
            (
                "TKIGES",
                &[
                    "TKBRep", "TKernel", "TKMath", "TKTopAlgo", "TKShHealing", "TKG2d", "TKG3d",
                    "TKGeomBase", "TKGeomAlgo", "TKPrim", "TKBool", "TKXSBase",
                ],
            ),
            (
                "TKXCAF",
                &[
                    "TKBRep", "TKernel", "TKMath", "TKService", "TKG2d", "TKTopAlgo", "TKV3d",
                    "TKCDF", "TKLCAF", "TKG3d", "TKCAF", "TKVCAF",
                ],
            ),
            (
                "TKXDEIGES",
                &[
                    "TKBRep", "TKernel", "TKMath", "TKXSBase", "TKCDF", "TKLCAF", "TKG2d", "TKG3d",
                    "TKXCAF", "TKIGES",
                ],
            ),
            (
                "TKXDESTEP",
                &[
                    "TKBRep", "TKSTEPAttr", "TKernel", "TKMath", "TKXSBase", "TKTopAlgo", "TKG2d",
                    "TKCAF", "TKSTEPBase", "TKCDF", "TKLCAF", "TKG3d", "TKXCAF", "TKSTEP",
                    "TKShHealing",
                ],
            ),
            ("TKSTL", &["TKernel", "TKMath", "TKBRep", "TKG2d", "TKG3d", "TKTopAlgo"]),
            (
                "TKVRML",
                &[
                    "TKBRep", "TKTopAlgo", "TKMath", "TKGeomBase", "TKernel", "TKPrim", "TKG2d",
                    "TKG3d", "TKMesh", "TKHLR", "TKService", "TKGeomAlgo", "TKV3d", "TKLCAF",
                    "TKXCAF",
                ],
            ),
            (
                "TKXmlXCAF",
                &[
                    "TKXmlL", "TKBRep", "TKCDF", "TKMath", "TKernel", "TKService", "TKG2d",
                    "TKGeomBase", "TKCAF", "TKG3d", "TKLCAF", "TKXCAF", "TKXml",
                ],
            ),
            (
                "TKBinXCAF",
                &[
                    "TKBRep", "TKXCAF", "TKMath", "TKService", "TKernel", "TKBinL", "TKG2d",
                    "TKCAF", "TKCDF", "TKG3d", "TKLCAF", "TKBin",
                ],
            ),
            (
                "TKRWMesh",
                &[
                    "TKernel", "TKMath", "TKMesh", "TKXCAF", "TKLCAF", "TKV3d", "TKBRep", "TKG3d",
                    "TKService",
                ],
            ),
        ],
    ),
    (
        "Draw",
        &[
            (
                "TKDraw",
                &[
                    "TKernel", "TKG2d", "TKGeomBase", "TKG3d", "TKMath", "TKBRep", "TKGeomAlgo",
                    "TKTopAlgo", "TKShHealing", "TKMesh", "TKService", "TKHLR",
                ],
            ),
            (
                "TKTopTest",
                &[
                    "TKBRep", "TKGeomAlgo", "TKTopAlgo", "TKernel", "TKMath", "TKBO", "TKG2d",
                    "TKG3d", "TKDraw", "TKHLR", "TKGeomBase", "TKMesh", "TKService", "TKV3d",
                    "TKFillet", "TKPrim", "TKBool", "TKOffset", "TKFeat", "TKShHealing",
                ],
            ),
            (
                "TKViewerTest",
                &[
                    "TKGeomBase", "TKFillet", "TKBRep", "TKTopAlgo", "TKHLR", "TKernel", "TKMath",
                    "TKService", "TKShHealing", "TKBool", "TKPrim", "TKGeomAlgo", "TKG2d",
                    "TKTopTest", "TKG3d", "TKOffset", "TKMesh", "TKV3d", "TKDraw", "TKOpenGl",
                ],
            ),
            (
                "TKXSDRAW",
                &[
                    "TKBRep", "TKV3d", "TKMath", "TKernel", "TKService", "TKXSBase", "TKMeshVS",
                    "TKG3d", "TKViewerTest", "TKG2d", "TKSTEPBase", "TKTopAlgo", "TKGeomBase",
                    "TKGeomAlgo", "TKMesh", "TKDraw", "TKSTEP", "TKIGES", "TKSTL", "TKVRML",
                    "TKLCAF", "TKDCAF", "TKXCAF", "TKRWMesh",
                ],
            ),
            (
                "TKDCAF",
                &[
                    "TKGeomBase", "TKBRep", "TKGeomAlgo", "TKernel", "TKMath", "TKG2d", "TKG3d",
                    "TKDraw", "TKCDF", "TKV3d", "TKService", "TKLCAF", "TKFillet", "TKTopAlgo",
                    "TKPrim", "TKBool", "TKBO", "TKCAF", "TKVCAF", "TKViewerTest", "TKStd",
                    "TKStdL", "TKBin", "TKBinL", "TKXml", "TKXmlL",
                ],
            ),
            (
                "TKXDEDRAW",
                &[
                    "TKCDF", "TKBRep", "TKXCAF", "TKernel", "TKIGES", "TKV3d", "TKMath",
                    "TKService", "TKXSBase", "TKG2d", "TKCAF", "TKVCAF", "TKDraw", "TKTopAlgo",
                    "TKLCAF", "TKG3d", "TKSTEPBase", "TKSTEP", "TKMesh", "TKXSDRAW", "TKXDEIGES",
                    "TKXDESTEP", "TKDCAF", "TKViewerTest", "TKBinXCAF", "TKXmlXCAF", "TKVRML",
                ],
            ),
            (
                "TKTObjDRAW",
                &[
                    "TKernel", "TKCDF", "TKLCAF", "TKTObj", "TKMath", "TKDraw", "TKDCAF",
                    "TKBinTObj", "TKXmlTObj",
                ],
            ),
            (
                "TKQADraw",
                &[
                    "TKBRep", "TKMath", "TKernel", "TKService", "TKG2d", "TKDraw", "TKV3d",
                    "TKGeomBase", "TKG3d", "TKViewerTest", "TKCDF", "TKDCAF", "TKLCAF", "TKFillet",
                    "TKTopAlgo", "TKHLR", "TKBool", "TKGeomAlgo", "TKPrim", "TKBO", "TKShHealing",
                    "TKOffset", "TKFeat", "TKCAF", "TKVCAF", "TKIGES", "TKXSBase", "TKMesh",
                    "TKXCAF", "TKBinXCAF", "TKSTEP", "TKSTEPBase", "TKXDESTEP", "TKXSDRAW",
                    "TKSTL", "TKXml", "TKTObj", "TKXmlL", "TKBin", "TKBinL", "TKStd", "TKStdL",
                ],
            ),
        ],
    ),
];

/// The toolkit table as declarations, in upstream order.
pub fn toolkit_decls() -> Vec<ComponentDecl> {
    TOOLKITS
        .iter()
        .map(|(component, targets)| {
            ComponentDecl::new(
                *component,
                targets
                    .iter()
                    .map(|(name, requires)| TargetDecl::new(*name, requires.iter().copied()))
                    .collect(),
            )
        })
        .collect()
}

/// The validated catalog graph, built on first use and shared afterwards.
pub fn occt_graph() -> OcResult<&'static ToolkitGraph> {
    static GRAPH: OnceLock<OcResult<ToolkitGraph>> = OnceLock::new();
    GRAPH
        .get_or_init(|| {
            let graph = GraphBuilder::from_decls(&toolkit_decls()).build();
            if let Ok(graph) = &graph {
                tracing::info!(
                    components = graph.components().len(),
                    targets = graph.targets().len(),
                    "toolkit catalog validated"
                );
            }
            graph
        })
        .as_ref()
        .map_err(Clone::clone)
}

/// The declared structure: components in order, each with its targets and
/// their direct requirements exactly as declared.
pub fn get_graph() -> OcResult<Vec<ComponentDecl>> {
    occt_graph().map(ToolkitGraph::decls)
}

/// Package-manager component name of a target or component (`occt_tkernel`).
pub fn component_name(name: &str) -> String {
    format!("occt_{}", name.to_lowercase())
}
