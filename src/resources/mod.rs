//! This module contains all logic for loading models from external files.

use std::path::Path;

use crate::{
    data_structures::{
        instance::Instance,
        prefab::{Prefab, PrefabNode},
    },
    error::AssetError,
    host::LoadedObject,
};

pub async fn load_binary(dir: &Path, file_name: &str) -> Result<Vec<u8>, AssetError> {
    let path = dir.join(file_name);
    tokio::fs::read(&path)
        .await
        .map_err(|source| AssetError::Io { path, source })
}

/// Converts a glTF node and its children into a template node.
fn to_prefab_node(node: gltf::scene::Node) -> PrefabNode {
    let (position, rotation, scale) = node.transform().decomposed();
    let local = Instance {
        position: position.into(),
        rotation: rotation.into(),
        scale: scale.into(),
    };
    PrefabNode {
        name: node
            .name()
            .map(str::to_string)
            .unwrap_or_else(|| format!("node{}", node.index())),
        local,
        mesh: node.mesh().map(|mesh| {
            mesh.name()
                .map_or_else(|| format!("mesh{}", mesh.index()), str::to_string)
        }),
        children: node.children().map(to_prefab_node).collect(),
    }
}

/**
 * Loads a `.gltf` or `.glb` file and lists its materials, meshes and one prefab per scene.
 *
 * Only the document structure is read: external buffers and images stay untouched since
 * the host streams them to clients on its own.
 */
pub async fn load_model_gltf(
    assets_dir: &Path,
    resource: &str,
) -> Result<Vec<LoadedObject>, AssetError> {
    let bytes = load_binary(assets_dir, resource).await?;
    let gltf = gltf::Gltf::from_slice(&bytes).map_err(|e| AssetError::Model {
        resource: resource.to_string(),
        message: e.to_string(),
    })?;

    let mut objects = Vec::new();
    for material in gltf.materials() {
        let name = material
            .name()
            .map(str::to_string)
            .unwrap_or_else(|| format!("{}#material{}", resource, material.index().unwrap_or(0)));
        objects.push(LoadedObject::Material(name));
    }
    for mesh in gltf.meshes() {
        let name = mesh
            .name()
            .map(str::to_string)
            .unwrap_or_else(|| format!("mesh{}", mesh.index()));
        objects.push(LoadedObject::Mesh(name));
    }
    for scene in gltf.scenes() {
        let roots: Vec<PrefabNode> = scene.nodes().map(to_prefab_node).collect();
        if roots.is_empty() {
            log::warn!("Scene {} in {} has no nodes", scene.index(), resource);
            continue;
        }
        let name = scene
            .name()
            .map(str::to_string)
            .unwrap_or_else(|| format!("{}#scene{}", resource, scene.index()));
        objects.push(LoadedObject::Prefab(Prefab { name, roots }));
    }
    log::debug!("Loaded {} objects from {}", objects.len(), resource);
    Ok(objects)
}
