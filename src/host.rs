//! The seam to the mixed-reality host.
//!
//! Everything the vocabulary scene needs from the platform (nodes, templates,
//! sounds, button behavior) goes through [`MixedRealityHost`]. The platform's
//! own transport, session and rendering model stays behind this trait.
//! [`SceneGraph`](crate::data_structures::scene_graph::SceneGraph) is the
//! in-process implementation.

use std::{fmt, future::Future};

use crate::{
    data_structures::{instance::Instance, prefab::Prefab},
    error::{AssetError, HostError},
};

/// Handle of a node created by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("#{}", self.0))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Collider {
    /// Collider shape derived from the node's mesh.
    Auto,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAnchor {
    BottomLeft,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color3 {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color3 {
    pub const YELLOW: Color3 = Color3 {
        r: 1.0,
        g: 1.0,
        b: 0.0,
    };
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextSpec {
    pub contents: String,
    pub height: f32,
    pub anchor: TextAnchor,
    pub color: Color3,
}

/// Everything needed to create a plain node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeSpec {
    pub parent: Option<NodeId>,
    pub name: String,
    pub transform: Instance,
    pub mesh: Option<String>,
    pub collider: Option<Collider>,
    pub text: Option<TextSpec>,
}

impl NodeSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn parent(mut self, parent: NodeId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn transform(mut self, transform: Instance) -> Self {
        self.transform = transform;
        self
    }

    pub fn mesh(mut self, mesh: &str, collider: Collider) -> Self {
        self.mesh = Some(mesh.to_string());
        self.collider = Some(collider);
        self
    }

    pub fn text(mut self, text: TextSpec) -> Self {
        self.text = Some(text);
        self
    }
}

/// A playable sound registered with the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SoundHandle {
    pub name: String,
    pub uri: String,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SoundOptions {
    pub volume: f32,
    pub looping: bool,
}

/// One object produced by loading a model resource.
#[derive(Clone, Debug, PartialEq)]
pub enum LoadedObject {
    Material(String),
    Mesh(String),
    Prefab(Prefab),
}

impl LoadedObject {
    /// `Some` if this object can be instantiated as a template.
    pub fn into_prefab(self) -> Option<Prefab> {
        match self {
            Self::Prefab(prefab) => Some(prefab),
            _ => None,
        }
    }
}

/// Operations the vocabulary scene consumes from the host platform.
///
/// Asynchronous loads take `&self` so that many of them can be in flight at
/// once; scene mutation takes `&mut self` and happens only after all loads
/// have settled.
pub trait MixedRealityHost {
    /// Creates a box mesh that nodes can reference by the returned name.
    fn create_box_mesh(&mut self, name: &str, width: f32, height: f32, depth: f32) -> String;

    fn create_node(&mut self, spec: NodeSpec) -> Result<NodeId, HostError>;

    /// Instantiates the template below `parent` and returns the root of the copy.
    fn instantiate_prefab(
        &mut self,
        prefab: &Prefab,
        parent: NodeId,
        transform: Instance,
    ) -> Result<NodeId, HostError>;

    /// Loads a 3D asset, yielding every object it contains.
    fn load_model(
        &self,
        resource: &str,
    ) -> impl Future<Output = Result<Vec<LoadedObject>, AssetError>>;

    /// Registers a sound under `name`. A URI that cannot be resolved still
    /// registers; playback of it fails instead.
    fn register_sound(
        &self,
        name: &str,
        uri: &str,
    ) -> impl Future<Output = Result<SoundHandle, AssetError>>;

    /// Makes the node clickable. Clicks are reported back with the node id.
    fn set_button_behavior(&mut self, node: NodeId) -> Result<(), HostError>;

    fn set_text(&mut self, node: NodeId, contents: &str) -> Result<(), HostError>;

    fn play_sound(
        &mut self,
        node: NodeId,
        sound: &SoundHandle,
        options: SoundOptions,
    ) -> Result<(), HostError>;
}
