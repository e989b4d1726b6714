//! Vocabulary table: the only persisted domain data.
//!
//! The table is a JSON object mapping a vocabulary id to its descriptor. It is
//! read once at startup, validated, and then shared read-only. The current
//! label state of each entry is owned by the
//! [`InteractionController`](crate::interaction::InteractionController), the
//! `state` field here only seeds it.

use std::{collections::BTreeMap, fmt, path::Path};

use serde::{
    Deserialize, Deserializer,
    de::{MapAccess, Visitor},
};

use crate::error::VocabularyError;

/// Display state of a vocabulary label.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum LabelState {
    #[default]
    Initial,
    Translated,
    Phonetics,
}

impl LabelState {
    /// The state that follows `self` in the fixed cycle
    /// `initial -> translated -> phonetics -> initial`.
    pub fn next(self) -> Self {
        match self {
            Self::Initial => Self::Translated,
            Self::Translated => Self::Phonetics,
            Self::Phonetics => Self::Initial,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ONE: Vec3 = Vec3 {
        x: 1.0,
        y: 1.0,
        z: 1.0,
    };

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<Vec3> for cgmath::Vector3<f32> {
    fn from(v: Vec3) -> Self {
        cgmath::Vector3::new(v.x, v.y, v.z)
    }
}

fn default_scale() -> Vec3 {
    Vec3::ONE
}

/// One row of the vocabulary table.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyEntry {
    pub display_name: String,
    #[serde(default)]
    pub resource_name: Option<String>,
    pub translation: String,
    pub phonetics: String,
    #[serde(default)]
    pub state: LabelState,
    #[serde(default)]
    pub pronunciation: String,
    /// Reserved, not read by the scene.
    #[serde(default)]
    pub texture: String,
    #[serde(default = "default_scale")]
    pub scale: Vec3,
    /// Euler angles in degrees.
    #[serde(default)]
    pub rotation: Vec3,
    #[serde(default)]
    pub position: Vec3,
}

impl VocabularyEntry {
    /// The model resource, or `None` if the entry has no visual representation.
    pub fn model_resource(&self) -> Option<&str> {
        self.resource_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// Text shown on the label while the entry is in `state`.
    pub fn label_for(&self, state: LabelState) -> &str {
        match state {
            LabelState::Initial => &self.display_name,
            LabelState::Translated => &self.translation,
            LabelState::Phonetics => &self.phonetics,
        }
    }

    fn validate(&self, id: &str) -> Result<(), VocabularyError> {
        let invalid = |field, reason: &str| VocabularyError::Invalid {
            id: id.to_string(),
            field,
            reason: reason.to_string(),
        };
        if self.display_name.trim().is_empty() {
            return Err(invalid("displayName", "must not be empty"));
        }
        for (field, v) in [
            ("scale", &self.scale),
            ("rotation", &self.rotation),
            ("position", &self.position),
        ] {
            if !v.is_finite() {
                return Err(invalid(field, "must only contain finite numbers"));
            }
        }
        if self.scale.x == 0.0 || self.scale.y == 0.0 || self.scale.z == 0.0 {
            return Err(invalid("scale", "must not contain zero components"));
        }
        Ok(())
    }
}

/// The table's key/value pairs in file order, repeated keys included.
struct RawEntries(Vec<(String, VocabularyEntry)>);

impl<'de> Deserialize<'de> for RawEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = RawEntries;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object mapping vocabulary ids to entries")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(pair) = map.next_entry()? {
                    entries.push(pair);
                }
                Ok(RawEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

/// The validated vocabulary table, iterated in id order.
#[derive(Clone, Debug, Default)]
pub struct Vocabulary {
    entries: BTreeMap<String, VocabularyEntry>,
}

impl Vocabulary {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, VocabularyError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| VocabularyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let vocabulary = Self::from_json(&text)?;
        log::info!(
            "Loaded {} vocabulary entries from {}",
            vocabulary.len(),
            path.display()
        );
        Ok(vocabulary)
    }

    pub fn from_json(text: &str) -> Result<Self, VocabularyError> {
        let RawEntries(raw) = serde_json::from_str(text)?;
        let mut entries = BTreeMap::new();
        for (id, entry) in raw {
            let invalid_id = |reason: &str| VocabularyError::Invalid {
                id: id.clone(),
                field: "id",
                reason: reason.to_string(),
            };
            if id.trim().is_empty() {
                return Err(invalid_id("must not be empty"));
            }
            if entries.contains_key(&id) {
                return Err(invalid_id("appears more than once"));
            }
            entry.validate(&id)?;
            entries.insert(id, entry);
        }
        Ok(Self { entries })
    }

    pub fn get(&self, id: &str) -> Option<&VocabularyEntry> {
        self.entries.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &VocabularyEntry)> {
        self.entries.iter().map(|(id, entry)| (id.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
