//! Asset provisioning.
//!
//! Models and pronunciation sounds are loaded before the scene is built. Every
//! entry gets its own load task and all of them are joined; a failing entry is
//! recorded as such and never aborts the batch.

use std::collections::HashMap;

use futures::future::join_all;

use crate::{
    data_structures::prefab::Prefab,
    host::{LoadedObject, MixedRealityHost, SoundHandle},
    vocabulary::Vocabulary,
};

/// Outcome of loading the model of one entry.
#[derive(Clone, Debug, PartialEq)]
pub enum ModelSlot {
    Loaded(Prefab),
    Failed(String),
    /// The entry has no model resource.
    Skipped,
}

/// Outcome of registering the pronunciation of one entry.
#[derive(Clone, Debug, PartialEq)]
pub enum SoundSlot {
    Registered(SoundHandle),
    Failed(String),
}

/// Prefabs and sounds keyed by vocabulary id. Lives as long as the scene.
#[derive(Debug, Default)]
pub struct Assets {
    pub models: HashMap<String, ModelSlot>,
    pub sounds: HashMap<String, SoundSlot>,
}

impl Assets {
    pub fn model(&self, id: &str) -> Option<&ModelSlot> {
        self.models.get(id)
    }

    pub fn sound(&self, id: &str) -> Option<&SoundSlot> {
        self.sounds.get(id)
    }

    pub fn loaded_models(&self) -> usize {
        self.models
            .values()
            .filter(|slot| matches!(slot, ModelSlot::Loaded(_)))
            .count()
    }
}

/// Builds the URI of a pronunciation clip below `base_dir`.
pub fn pronunciation_uri(base_dir: &str, pronunciation: &str) -> String {
    format!(
        "{}/{}",
        base_dir.trim_end_matches('/'),
        pronunciation.trim_start_matches('/')
    )
}

/// Loads the model of every entry that has one.
pub async fn load_models<H: MixedRealityHost>(
    host: &H,
    vocabulary: &Vocabulary,
) -> HashMap<String, ModelSlot> {
    let tasks = vocabulary.iter().map(|(id, entry)| async move {
        let Some(resource) = entry.model_resource() else {
            return (id.to_string(), ModelSlot::Skipped);
        };
        let slot = match host.load_model(resource).await {
            Ok(objects) => match objects.into_iter().find_map(LoadedObject::into_prefab) {
                Some(prefab) => ModelSlot::Loaded(prefab),
                None => {
                    log::error!("Model {} of '{}' has no template to instantiate", resource, id);
                    ModelSlot::Failed(format!("{} contains no template", resource))
                }
            },
            Err(e) => {
                log::error!("Failed to load model of '{}': {}", id, e);
                ModelSlot::Failed(e.to_string())
            }
        };
        (id.to_string(), slot)
    });
    join_all(tasks).await.into_iter().collect()
}

/// Registers the pronunciation of every entry, with or without a model.
pub async fn load_sounds<H: MixedRealityHost>(
    host: &H,
    vocabulary: &Vocabulary,
    base_dir: &str,
) -> HashMap<String, SoundSlot> {
    let tasks = vocabulary.iter().map(|(id, entry)| async move {
        let uri = pronunciation_uri(base_dir, &entry.pronunciation);
        log::debug!("Registering sound '{}' from {}", id, uri);
        let slot = match host.register_sound(id, &uri).await {
            Ok(handle) => SoundSlot::Registered(handle),
            Err(e) => {
                log::error!("Failed to register sound of '{}': {}", id, e);
                SoundSlot::Failed(e.to_string())
            }
        };
        (id.to_string(), slot)
    });
    join_all(tasks).await.into_iter().collect()
}

/// Loads models and sounds concurrently and waits for every task to settle.
pub async fn provision<H: MixedRealityHost>(
    host: &H,
    vocabulary: &Vocabulary,
    base_dir: &str,
) -> Assets {
    let (models, sounds) = futures::join!(
        load_models(host, vocabulary),
        load_sounds(host, vocabulary, base_dir)
    );
    let assets = Assets { models, sounds };
    log::info!(
        "Provisioned {} of {} models and {} sounds",
        assets.loaded_models(),
        vocabulary.len(),
        assets.sounds.len()
    );
    assets
}
