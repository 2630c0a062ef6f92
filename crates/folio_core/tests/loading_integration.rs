//! Integration tests for the model loading pipeline
//!
//! These tests verify that models written to disk:
//! 1. Load concurrently and come back in request order
//! 2. Fail the whole batch when any one file is bad
//! 3. Attach to the scene graph with one toon surface per mesh node
//! 4. Pick up color changes through the shared broadcast

use std::path::PathBuf;

use folio_core::{
    Color, ColorBroadcast, GradientId, ModelFragment, ModelLoader, ModelRequest, SceneGraph,
    SurfaceKind, AssetError,
};

/// A single triangle with a mesh-less sibling node
const TRIANGLE_GLTF: &str = r#"{
    "asset": { "version": "2.0" },
    "scene": 0,
    "scenes": [ { "nodes": [0] } ],
    "nodes": [
        { "name": "root", "children": [1, 2] },
        { "name": "body", "mesh": 0 },
        { "name": "pivot" }
    ],
    "meshes": [ { "primitives": [ { "attributes": { "POSITION": 0 } } ] } ],
    "buffers": [ {
        "byteLength": 36,
        "uri": "data:application/octet-stream;base64,AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAgD8AAAAA"
    } ],
    "bufferViews": [ { "buffer": 0, "byteLength": 36 } ],
    "accessors": [ {
        "bufferView": 0,
        "componentType": 5126,
        "count": 3,
        "type": "VEC3",
        "min": [0.0, 0.0, 0.0],
        "max": [1.0, 1.0, 0.0]
    } ]
}"#;

fn test_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("folio_loading_tests").join(name);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_models(dir: &PathBuf, count: usize) -> Vec<ModelRequest> {
    (0..count)
        .map(|i| {
            let path = dir.join(format!("{}.gltf", i + 1));
            std::fs::write(&path, TRIANGLE_GLTF).unwrap();
            let offset = if i % 2 == 0 { 2.0 } else { -2.0 };
            ModelRequest::new(path, i, offset)
        })
        .collect()
}

#[test]
fn test_three_models_load_in_request_order() {
    let dir = test_dir("ordered");
    let requests = write_models(&dir, 3);

    let loaded = ModelLoader::load_all::<ModelFragment>(&requests).unwrap();
    assert_eq!(loaded.len(), 3);
    for (i, item) in loaded.iter().enumerate() {
        assert_eq!(item.request.slot, i);
        assert_eq!(item.asset.mesh_node_count(), 1);
        assert!(item.asset.label.ends_with(&format!("{}.gltf", i + 1)));
    }
}

#[test]
fn test_one_missing_file_fails_the_batch() {
    let dir = test_dir("missing");
    let mut requests = write_models(&dir, 3);
    requests[1].path = dir.join("does-not-exist.glb");

    let err = ModelLoader::load_all::<ModelFragment>(&requests).unwrap_err();
    assert_eq!(err.index, 1);
    assert!(matches!(err.source, AssetError::Io(_)));
}

#[test]
fn test_corrupt_file_fails_the_batch() {
    let dir = test_dir("corrupt");
    let mut requests = write_models(&dir, 2);
    let bad = dir.join("bad.glb");
    std::fs::write(&bad, b"glTF but not really").unwrap();
    requests[0].path = bad;

    let err = ModelLoader::load_all::<ModelFragment>(&requests).unwrap_err();
    assert_eq!(err.index, 0);
    assert!(matches!(err.source, AssetError::Parse(_)));
}

#[test]
fn test_loaded_models_share_one_color() {
    let dir = test_dir("shared_color");
    let requests = write_models(&dir, 3);
    let loaded = ModelLoader::load_all::<ModelFragment>(&requests).unwrap();

    let mut graph = SceneGraph::new();
    let mut colors = ColorBroadcast::new(Color::from_hex("#ffeded").unwrap());
    let toon = SurfaceKind::Toon { gradient: GradientId(0) };

    for item in loaded {
        graph
            .insert_fragment(graph.root(), item.asset.root, &mut |_| colors.subscribe(toon))
            .unwrap();
    }
    assert_eq!(colors.len(), 3);
    assert_eq!(graph.render_items().len(), 3);

    let green = Color::from_hex("#22aa44").unwrap();
    assert_eq!(colors.set_color(green), 3);
    for item in graph.render_items() {
        assert_eq!(colors.get(item.surface).unwrap().color, green);
    }
}
