//! Startup sequencing and click dispatch.
//!
//! The scene comes up in a fixed order:
//! 1. the vocabulary table is loaded (any error is fatal)
//! 2. an optional startup delay elapses
//! 3. models and sounds are provisioned; every task settles before going on
//! 4. the scene is built once
//!
//! Afterwards the host reports clicks by node id and
//! [`VocabularyScene::on_click`] routes them to the
//! [`InteractionController`].

use std::sync::Arc;

use crate::{
    config::Config,
    data_structures::scene_graph::SceneGraph,
    error::InteractionError,
    host::{MixedRealityHost, NodeId},
    interaction::InteractionController,
    provision::{Assets, provision},
    scene::{BuiltScene, ClickAction, build_scene},
    vocabulary::{LabelState, Vocabulary},
};

/// What a click ended up doing.
#[derive(Debug, PartialEq)]
pub enum ClickOutcome {
    /// The node is not a trigger of this scene.
    Ignored,
    Cycled { id: String, state: LabelState },
    Played { id: String },
    /// The click was understood but failed. Already logged.
    Failed(InteractionError),
}

/// A running vocabulary scene on top of a host.
pub struct VocabularyScene<H: MixedRealityHost> {
    host: H,
    vocabulary: Arc<Vocabulary>,
    assets: Assets,
    scene: BuiltScene,
    controller: InteractionController,
}

impl<H: MixedRealityHost> VocabularyScene<H> {
    /// Provisions all assets, then builds the scene.
    pub async fn start(
        mut host: H,
        vocabulary: Arc<Vocabulary>,
        config: &Config,
    ) -> anyhow::Result<Self> {
        if let Some(delay) = config.startup_delay() {
            log::info!("Waiting {:?} before loading assets", delay);
            tokio::time::sleep(delay).await;
        }

        let assets = provision(&host, &vocabulary, &config.base_dir).await;
        let scene = build_scene(&mut host, &vocabulary, &assets)?;
        let controller = InteractionController::new(Arc::clone(&vocabulary));

        Ok(Self {
            host,
            vocabulary,
            assets,
            scene,
            controller,
        })
    }

    /// Handles a click on `node` by `user`.
    pub fn on_click(&mut self, node: NodeId, user: &str) -> ClickOutcome {
        let Some(action) = self.scene.action(node).cloned() else {
            log::debug!("Click by {} on {} is not for a menu item", user, node);
            return ClickOutcome::Ignored;
        };
        log::debug!("Click by {} on {}: {:?}", user, node, action);

        let result = match action {
            ClickAction::CycleLabel { id, label } => self
                .controller
                .cycle_label(&mut self.host, &id, label)
                .map(|state| ClickOutcome::Cycled { id, state }),
            ClickAction::PlayPronunciation { id, sound_anchor } => self
                .controller
                .play_pronunciation(&mut self.host, &self.assets, &id, sound_anchor)
                .map(|()| ClickOutcome::Played { id }),
        };
        result.unwrap_or_else(|e| {
            log::error!("{}", e);
            ClickOutcome::Failed(e)
        })
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn assets(&self) -> &Assets {
        &self.assets
    }

    pub fn scene(&self) -> &BuiltScene {
        &self.scene
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }
}

/// Loads the vocabulary and starts the scene on the in-process [`SceneGraph`].
pub fn run(config: &Config) -> anyhow::Result<VocabularyScene<SceneGraph>> {
    if let Err(e) = env_logger::try_init() {
        println!("Warning: Could not initialize logger: {}", e);
    };

    let vocabulary = Arc::new(Vocabulary::load(&config.vocabulary)?);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let host = SceneGraph::new(&config.assets_dir);
    runtime.block_on(VocabularyScene::start(host, vocabulary, config))
}
