//! In-process scene graph.
//!
//! [`SceneGraph`] is an arena of nodes with parent/child links and local and
//! world transforms. It implements [`MixedRealityHost`] so the vocabulary scene
//! can run without a connected platform: the binary drives it from stdin and
//! the tests inspect it directly.

use std::{
    cell::RefCell,
    collections::HashMap,
    path::PathBuf,
};

use log::warn;

use crate::{
    data_structures::{
        instance::Instance,
        prefab::{Prefab, PrefabNode},
    },
    error::{AssetError, HostError},
    host::{
        Collider, LoadedObject, MixedRealityHost, NodeId, NodeSpec, SoundHandle, SoundOptions,
        TextSpec,
    },
    resources::load_model_gltf,
};

#[derive(Clone, Debug, PartialEq)]
pub struct SceneNode {
    pub name: String,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub local: Instance,
    pub world: Instance,
    pub mesh: Option<String>,
    pub collider: Option<Collider>,
    pub text: Option<TextSpec>,
    /// Name of the template this node was instantiated from (roots of a copy only).
    pub prefab: Option<String>,
    pub button: bool,
}

impl SceneNode {
    fn new(name: String, parent: Option<NodeId>, local: Instance) -> Self {
        Self {
            name,
            parent,
            children: Vec::new(),
            local,
            world: local,
            mesh: None,
            collider: None,
            text: None,
            prefab: None,
            button: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxMesh {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

/// A sound that was started on a node.
#[derive(Clone, Debug, PartialEq)]
pub struct Playback {
    pub node: NodeId,
    pub sound: String,
    pub options: SoundOptions,
}

#[derive(Clone, Debug)]
struct RegisteredSound {
    uri: String,
    playable: bool,
}

pub struct SceneGraph {
    nodes: Vec<SceneNode>,
    meshes: HashMap<String, BoxMesh>,
    sounds: RefCell<HashMap<String, RegisteredSound>>,
    playbacks: Vec<Playback>,
    assets_dir: PathBuf,
}

impl SceneGraph {
    /// Creates an empty graph that resolves model resources below `assets_dir`.
    pub fn new(assets_dir: impl Into<PathBuf>) -> Self {
        Self {
            nodes: Vec::new(),
            meshes: HashMap::new(),
            sounds: RefCell::new(HashMap::new()),
            playbacks: Vec::new(),
            assets_dir: assets_dir.into(),
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id.0 as usize)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &SceneNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| (NodeId(idx as u32), node))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn mesh(&self, name: &str) -> Option<&BoxMesh> {
        self.meshes.get(name)
    }

    /// All nodes below `id`, depth first, excluding `id` itself.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self
            .node(id)
            .map(|n| n.children.iter().rev().copied().collect())
            .unwrap_or_default();
        while let Some(next) = stack.pop() {
            out.push(next);
            if let Some(node) = self.node(next) {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }

    pub fn text_of(&self, id: NodeId) -> Option<&str> {
        self.node(id)
            .and_then(|n| n.text.as_ref())
            .map(|t| t.contents.as_str())
    }

    pub fn is_button(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(|n| n.button)
    }

    pub fn playbacks(&self) -> &[Playback] {
        &self.playbacks
    }

    pub fn sound_uri(&self, name: &str) -> Option<String> {
        self.sounds.borrow().get(name).map(|s| s.uri.clone())
    }

    pub fn sound_count(&self) -> usize {
        self.sounds.borrow().len()
    }

    fn insert(&mut self, mut node: SceneNode) -> Result<NodeId, HostError> {
        let id = NodeId(self.nodes.len() as u32);
        if let Some(parent) = node.parent {
            let parent = self
                .nodes
                .get_mut(parent.0 as usize)
                .ok_or(HostError::UnknownNode(parent))?;
            parent.children.push(id);
            node.world = &parent.world * &node.local;
        }
        self.nodes.push(node);
        Ok(id)
    }

    fn insert_prefab_node(
        &mut self,
        template: &PrefabNode,
        parent: NodeId,
    ) -> Result<NodeId, HostError> {
        let mut node = SceneNode::new(template.name.clone(), Some(parent), template.local);
        node.mesh = template.mesh.clone();
        let id = self.insert(node)?;
        for child in &template.children {
            self.insert_prefab_node(child, id)?;
        }
        Ok(id)
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut SceneNode, HostError> {
        self.nodes
            .get_mut(id.0 as usize)
            .ok_or(HostError::UnknownNode(id))
    }
}

impl MixedRealityHost for SceneGraph {
    fn create_box_mesh(&mut self, name: &str, width: f32, height: f32, depth: f32) -> String {
        self.meshes.insert(
            name.to_string(),
            BoxMesh {
                width,
                height,
                depth,
            },
        );
        name.to_string()
    }

    fn create_node(&mut self, spec: NodeSpec) -> Result<NodeId, HostError> {
        if let Some(mesh) = &spec.mesh {
            if !self.meshes.contains_key(mesh) {
                return Err(HostError::UnknownMesh(mesh.clone()));
            }
        }
        let mut node = SceneNode::new(spec.name, spec.parent, spec.transform);
        node.mesh = spec.mesh;
        node.collider = spec.collider;
        node.text = spec.text;
        self.insert(node)
    }

    fn instantiate_prefab(
        &mut self,
        prefab: &Prefab,
        parent: NodeId,
        transform: Instance,
    ) -> Result<NodeId, HostError> {
        let mut root = SceneNode::new(prefab.name.clone(), Some(parent), transform);
        root.prefab = Some(prefab.name.clone());
        let root = self.insert(root)?;
        for template in &prefab.roots {
            self.insert_prefab_node(template, root)?;
        }
        Ok(root)
    }

    async fn load_model(&self, resource: &str) -> Result<Vec<LoadedObject>, AssetError> {
        load_model_gltf(&self.assets_dir, resource).await
    }

    async fn register_sound(&self, name: &str, uri: &str) -> Result<SoundHandle, AssetError> {
        if name.is_empty() {
            return Err(AssetError::Sound {
                name: name.to_string(),
                reason: "sound name must not be empty".to_string(),
            });
        }
        let playable = if uri.starts_with("http://") || uri.starts_with("https://") {
            true
        } else {
            tokio::fs::metadata(uri)
                .await
                .map(|meta| meta.is_file())
                .unwrap_or(false)
        };
        if !playable {
            warn!("Sound '{}' points to {}, which cannot be resolved", name, uri);
        }
        self.sounds.borrow_mut().insert(
            name.to_string(),
            RegisteredSound {
                uri: uri.to_string(),
                playable,
            },
        );
        Ok(SoundHandle {
            name: name.to_string(),
            uri: uri.to_string(),
        })
    }

    fn set_button_behavior(&mut self, node: NodeId) -> Result<(), HostError> {
        self.node_mut(node)?.button = true;
        Ok(())
    }

    fn set_text(&mut self, node: NodeId, contents: &str) -> Result<(), HostError> {
        let text = self
            .node_mut(node)?
            .text
            .as_mut()
            .ok_or(HostError::NotText(node))?;
        text.contents = contents.to_string();
        Ok(())
    }

    fn play_sound(
        &mut self,
        node: NodeId,
        sound: &SoundHandle,
        options: SoundOptions,
    ) -> Result<(), HostError> {
        self.node_mut(node)?;
        match self.sounds.borrow().get(&sound.name) {
            None => return Err(HostError::UnknownSound(sound.name.clone())),
            Some(registered) if !registered.playable => {
                return Err(HostError::Unplayable {
                    name: sound.name.clone(),
                    uri: registered.uri.clone(),
                });
            }
            Some(_) => (),
        }
        self.playbacks.push(Playback {
            node,
            sound: sound.name.clone(),
            options,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{Color3, TextAnchor};

    fn label(contents: &str) -> TextSpec {
        TextSpec {
            contents: contents.to_string(),
            height: 0.2,
            anchor: TextAnchor::BottomLeft,
            color: Color3::YELLOW,
        }
    }

    #[test]
    fn children_inherit_parent_transform() {
        let mut graph = SceneGraph::new(".");
        let root = graph
            .create_node(NodeSpec::new("root").transform(Instance::at(1.0, 0.0, 0.0)))
            .unwrap();
        let child = graph
            .create_node(
                NodeSpec::new("child")
                    .parent(root)
                    .transform(Instance::at(0.0, 0.4, 0.0)),
            )
            .unwrap();

        let world = graph.node(child).unwrap().world;
        assert_eq!(world.position, cgmath::Vector3::new(1.0, 0.4, 0.0));
        assert_eq!(graph.node(root).unwrap().children, vec![child]);
    }

    #[test]
    fn unknown_parent_is_rejected() {
        let mut graph = SceneGraph::new(".");
        let err = graph
            .create_node(NodeSpec::new("orphan").parent(NodeId(7)))
            .unwrap_err();
        assert_eq!(err, HostError::UnknownNode(NodeId(7)));
        assert!(graph.is_empty());
    }

    #[test]
    fn mesh_must_exist() {
        let mut graph = SceneGraph::new(".");
        let err = graph
            .create_node(NodeSpec::new("button").mesh("button", Collider::Auto))
            .unwrap_err();
        assert_eq!(err, HostError::UnknownMesh("button".to_string()));
    }

    #[test]
    fn prefab_copies_whole_hierarchy() {
        let mut graph = SceneGraph::new(".");
        let root = graph.create_node(NodeSpec::new("root")).unwrap();
        let prefab = Prefab {
            name: "Apple".to_string(),
            roots: vec![PrefabNode {
                name: "stem".to_string(),
                local: Instance::default(),
                mesh: Some("stem".to_string()),
                children: vec![PrefabNode {
                    name: "leaf".to_string(),
                    local: Instance::default(),
                    mesh: None,
                    children: Vec::new(),
                }],
            }],
        };

        let copy = graph
            .instantiate_prefab(&prefab, root, Instance::at(0.6, -0.1, 0.0))
            .unwrap();
        assert_eq!(graph.node(copy).unwrap().prefab.as_deref(), Some("Apple"));
        assert_eq!(graph.descendants(copy).len(), 2);
        assert_eq!(graph.descendants(root).len(), 3);
    }

    #[test]
    fn set_text_requires_text_node() {
        let mut graph = SceneGraph::new(".");
        let plain = graph.create_node(NodeSpec::new("plain")).unwrap();
        let text = graph
            .create_node(NodeSpec::new("label").text(label("Apple")))
            .unwrap();

        assert_eq!(graph.set_text(plain, "x"), Err(HostError::NotText(plain)));
        graph.set_text(text, "Manzana").unwrap();
        assert_eq!(graph.text_of(text), Some("Manzana"));
    }

    #[tokio::test]
    async fn unresolvable_sound_registers_but_does_not_play() {
        let mut graph = SceneGraph::new(".");
        let anchor = graph.create_node(NodeSpec::new("soundActor")).unwrap();
        let handle = graph
            .register_sound("apple", "missing/apple.wav")
            .await
            .unwrap();
        assert_eq!(graph.sound_count(), 1);

        let options = SoundOptions {
            volume: 1.0,
            looping: false,
        };
        let err = graph.play_sound(anchor, &handle, options).unwrap_err();
        assert!(matches!(err, HostError::Unplayable { .. }));
        assert!(graph.playbacks().is_empty());
    }

    #[tokio::test]
    async fn resolvable_sound_is_recorded() {
        let dir = tempfile::tempdir().unwrap();
        let wav = dir.path().join("apple.wav");
        std::fs::write(&wav, b"RIFF").unwrap();

        let mut graph = SceneGraph::new(dir.path());
        let anchor = graph.create_node(NodeSpec::new("soundActor")).unwrap();
        let handle = graph
            .register_sound("apple", wav.to_str().unwrap())
            .await
            .unwrap();
        let options = SoundOptions {
            volume: 1.0,
            looping: false,
        };
        graph.play_sound(anchor, &handle, options).unwrap();
        assert_eq!(
            graph.playbacks(),
            &[Playback {
                node: anchor,
                sound: "apple".to_string(),
                options,
            }]
        );
    }
}
