//! Click handling for menu items.
//!
//! [`InteractionController`] owns the label state of every vocabulary entry
//! and is the only place it changes.

use std::{collections::HashMap, sync::Arc};

use crate::{
    error::InteractionError,
    host::{MixedRealityHost, NodeId, SoundOptions},
    provision::{Assets, SoundSlot},
    vocabulary::{LabelState, Vocabulary},
};

/// Pronunciations always play once at full volume.
pub const PRONUNCIATION: SoundOptions = SoundOptions {
    volume: 1.0,
    looping: false,
};

pub struct InteractionController {
    vocabulary: Arc<Vocabulary>,
    states: HashMap<String, LabelState>,
}

impl InteractionController {
    /// Seeds every entry with the state authored in the vocabulary file.
    pub fn new(vocabulary: Arc<Vocabulary>) -> Self {
        let states = vocabulary
            .iter()
            .map(|(id, entry)| (id.to_string(), entry.state))
            .collect();
        Self { vocabulary, states }
    }

    pub fn state(&self, id: &str) -> Option<LabelState> {
        self.states.get(id).copied()
    }

    /// Advances the label of `id` to the next state and shows that state's text.
    ///
    /// The state only advances once the host accepted the new text.
    pub fn cycle_label<H: MixedRealityHost>(
        &mut self,
        host: &mut H,
        id: &str,
        label: NodeId,
    ) -> Result<LabelState, InteractionError> {
        let entry = self
            .vocabulary
            .get(id)
            .ok_or_else(|| InteractionError::UnknownEntry(id.to_string()))?;
        let state = self
            .states
            .get_mut(id)
            .ok_or_else(|| InteractionError::UnknownEntry(id.to_string()))?;

        let next = state.next();
        host.set_text(label, entry.label_for(next))
            .map_err(|source| InteractionError::Label {
                id: id.to_string(),
                state: *state,
                source,
            })?;
        *state = next;
        log::debug!("'{}' now shows its {:?} label", id, next);
        Ok(next)
    }

    /// Plays the pronunciation of `id` on `sound_anchor`.
    pub fn play_pronunciation<H: MixedRealityHost>(
        &self,
        host: &mut H,
        assets: &Assets,
        id: &str,
        sound_anchor: NodeId,
    ) -> Result<(), InteractionError> {
        if self.vocabulary.get(id).is_none() {
            return Err(InteractionError::UnknownEntry(id.to_string()));
        }
        let handle = match assets.sound(id) {
            Some(SoundSlot::Registered(handle)) => handle,
            Some(SoundSlot::Failed(reason)) => {
                return Err(InteractionError::NoSound {
                    id: id.to_string(),
                    reason: reason.clone(),
                });
            }
            None => {
                return Err(InteractionError::NoSound {
                    id: id.to_string(),
                    reason: "never registered".to_string(),
                });
            }
        };
        host.play_sound(sound_anchor, handle, PRONUNCIATION)
            .map_err(|source| InteractionError::Playback {
                id: id.to_string(),
                source,
            })
    }
}
