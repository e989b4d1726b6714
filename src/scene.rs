//! Scene construction.
//!
//! Turns the provisioned vocabulary into menu items. Each item is a group
//! anchored at the entry's position holding the model, two square trigger
//! panels and a text label. A separate sound anchor sits at the same spot.
//!
//! ```text
//!   y=0.4  [cycle]  label (x=0.3, y=0.3)
//!   y=0.0  [play ]           model (x=0.6, y=-0.1)
//! ```

use std::collections::HashMap;

use crate::{
    data_structures::instance::{Instance, euler_degrees},
    error::HostError,
    host::{Collider, Color3, MixedRealityHost, NodeId, NodeSpec, TextAnchor, TextSpec},
    provision::{Assets, ModelSlot},
    vocabulary::Vocabulary,
};

/// Side length of the square trigger panels.
pub const BUTTON_WIDTH: f32 = 0.3;
pub const BUTTON_DEPTH: f32 = 0.01;
pub const BUTTON_MESH: &str = "button";
pub const LABEL_HEIGHT: f32 = 0.2;

const CYCLE_TRIGGER_Y: f32 = 0.4;
const PLAY_TRIGGER_Y: f32 = 0.0;
const LABEL_Y: f32 = 0.3;
const MODEL_Y: f32 = -0.1;

/// What a click on a trigger does.
#[derive(Clone, Debug, PartialEq)]
pub enum ClickAction {
    CycleLabel { id: String, label: NodeId },
    PlayPronunciation { id: String, sound_anchor: NodeId },
}

/// Nodes created for one vocabulary entry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MenuItem {
    pub anchor: NodeId,
    pub model: NodeId,
    pub cycle_trigger: NodeId,
    pub play_trigger: NodeId,
    pub label: NodeId,
    pub sound_anchor: NodeId,
}

/// Why an entry did not get a menu item.
#[derive(Clone, Debug, PartialEq)]
pub enum SkipReason {
    NoResource,
    ModelUnavailable(String),
}

#[derive(Debug)]
pub struct BuiltScene {
    pub root: NodeId,
    pub items: HashMap<String, MenuItem>,
    pub triggers: HashMap<NodeId, ClickAction>,
    pub skipped: HashMap<String, SkipReason>,
}

impl BuiltScene {
    pub fn action(&self, node: NodeId) -> Option<&ClickAction> {
        self.triggers.get(&node)
    }

    pub fn item(&self, id: &str) -> Option<&MenuItem> {
        self.items.get(id)
    }
}

/// Builds one menu item per entry that has a loaded model.
///
/// Entries without a resource are skipped silently. Entries whose model failed
/// to load are skipped too and reported in [`BuiltScene::skipped`]; their sound
/// stays registered but has no trigger.
pub fn build_scene<H: MixedRealityHost>(
    host: &mut H,
    vocabulary: &Vocabulary,
    assets: &Assets,
) -> Result<BuiltScene, HostError> {
    let root = host.create_node(NodeSpec::new("menu"))?;
    let button_mesh = host.create_box_mesh(BUTTON_MESH, BUTTON_WIDTH, BUTTON_WIDTH, BUTTON_DEPTH);

    let mut scene = BuiltScene {
        root,
        items: HashMap::new(),
        triggers: HashMap::new(),
        skipped: HashMap::new(),
    };

    for (id, entry) in vocabulary.iter() {
        if entry.model_resource().is_none() {
            log::debug!("'{}' has no model resource, leaving it out of the scene", id);
            scene.skipped.insert(id.to_string(), SkipReason::NoResource);
            continue;
        }
        let prefab = match assets.model(id) {
            Some(ModelSlot::Loaded(prefab)) => prefab,
            Some(ModelSlot::Failed(reason)) => {
                log::warn!("'{}' is left out of the scene: {}", id, reason);
                scene
                    .skipped
                    .insert(id.to_string(), SkipReason::ModelUnavailable(reason.clone()));
                continue;
            }
            Some(ModelSlot::Skipped) | None => {
                log::warn!("'{}' has a model resource but was never provisioned", id);
                scene.skipped.insert(
                    id.to_string(),
                    SkipReason::ModelUnavailable("not provisioned".to_string()),
                );
                continue;
            }
        };
        log::info!("Building menu item '{}'", id);

        let rotation = euler_degrees(entry.rotation);
        let anchor = host.create_node(
            NodeSpec::new(format!("{id}Menu"))
                .parent(root)
                .transform(
                    Instance::at(entry.position.x, entry.position.y, entry.position.z)
                        .with_rotation(rotation),
                ),
        )?;

        let model = host.instantiate_prefab(
            prefab,
            anchor,
            Instance::at(2.0 * BUTTON_WIDTH, MODEL_Y, 0.0)
                .with_rotation(rotation)
                .with_scale(entry.scale.into()),
        )?;

        let cycle_trigger = host.create_node(
            NodeSpec::new(id)
                .parent(anchor)
                .mesh(&button_mesh, Collider::Auto)
                .transform(Instance::at(0.0, CYCLE_TRIGGER_Y, 0.0)),
        )?;
        let play_trigger = host.create_node(
            NodeSpec::new(id)
                .parent(anchor)
                .mesh(&button_mesh, Collider::Auto)
                .transform(Instance::at(0.0, PLAY_TRIGGER_Y, 0.0)),
        )?;

        let label = host.create_node(
            NodeSpec::new("label")
                .parent(anchor)
                .text(TextSpec {
                    contents: entry.display_name.clone(),
                    height: LABEL_HEIGHT,
                    anchor: TextAnchor::BottomLeft,
                    color: Color3::YELLOW,
                })
                .transform(Instance::at(BUTTON_WIDTH, LABEL_Y, 0.0)),
        )?;

        let sound_anchor = host.create_node(
            NodeSpec::new("soundActor")
                .parent(root)
                .transform(Instance::at(entry.position.x, entry.position.y, entry.position.z)),
        )?;

        host.set_button_behavior(cycle_trigger)?;
        host.set_button_behavior(play_trigger)?;
        scene.triggers.insert(
            cycle_trigger,
            ClickAction::CycleLabel {
                id: id.to_string(),
                label,
            },
        );
        scene.triggers.insert(
            play_trigger,
            ClickAction::PlayPronunciation {
                id: id.to_string(),
                sound_anchor,
            },
        );
        scene.items.insert(
            id.to_string(),
            MenuItem {
                anchor,
                model,
                cycle_trigger,
                play_trigger,
                label,
                sound_anchor,
            },
        );
    }

    log::info!(
        "Scene ready: {} menu items, {} entries left out",
        scene.items.len(),
        scene.skipped.len()
    );
    Ok(scene)
}
