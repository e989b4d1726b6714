use std::{path::PathBuf, sync::Arc};

use tempfile::TempDir;
use vocab_market::{
    Config, NodeId, Vocabulary, VocabularyScene, data_structures::scene_graph::SceneGraph,
};

/// A single-node glTF scene, enough to serve as a template.
pub const MODEL_GLTF: &str = r#"{
    "asset": {"version": "2.0"},
    "scene": 0,
    "scenes": [{"nodes": [0]}],
    "nodes": [{"name": "body"}]
}"#;

/// The `apple` round-trip table plus an entry without a model.
pub const APPLE_AND_BREAD: &str = r#"{
    "apple": {
        "displayName": "Apple",
        "resourceName": "apple.gltf",
        "translation": "Manzana",
        "phonetics": "AP-ul",
        "state": "initial",
        "pronunciation": "apple.wav",
        "texture": "",
        "scale": {"x": 1, "y": 1, "z": 1},
        "rotation": {"x": 0, "y": 0, "z": 0},
        "position": {"x": 0, "y": 0, "z": 0}
    },
    "bread": {
        "displayName": "Bread",
        "translation": "Pan",
        "phonetics": "bred",
        "state": "initial",
        "pronunciation": "bread.wav",
        "texture": "",
        "scale": {"x": 1, "y": 1, "z": 1},
        "rotation": {"x": 0, "y": 0, "z": 0},
        "position": {"x": 2, "y": 0, "z": 0}
    }
}"#;

/// Two entries that both have a model, placed apart.
pub const APPLE_AND_PEAR: &str = r#"{
    "apple": {
        "displayName": "Apple",
        "resourceName": "apple.gltf",
        "translation": "Manzana",
        "phonetics": "AP-ul",
        "pronunciation": "apple.wav",
        "position": {"x": -1, "y": 0, "z": 0}
    },
    "pear": {
        "displayName": "Pear",
        "resourceName": "pear.gltf",
        "translation": "Pera",
        "phonetics": "pair",
        "state": "translated",
        "pronunciation": "pear.wav",
        "position": {"x": 1, "y": 0, "z": 0}
    }
}"#;

/// A temporary `public/` folder holding the vocabulary, models and sounds.
pub struct Fixture {
    pub dir: TempDir,
}

impl Fixture {
    pub fn new(vocabulary: &str) -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        std::fs::write(dir.path().join("vocab.json"), vocabulary).expect("write vocabulary");
        Self { dir }
    }

    pub fn with_model(self, name: &str, contents: &str) -> Self {
        std::fs::write(self.dir.path().join(name), contents).expect("write model");
        self
    }

    pub fn with_sound(self, name: &str) -> Self {
        std::fs::write(self.dir.path().join(name), b"RIFF\0\0\0\0WAVE").expect("write sound");
        self
    }

    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    pub fn config(&self) -> Config {
        Config {
            vocabulary: self.dir.path().join("vocab.json"),
            assets_dir: self.path(),
            base_dir: self.dir.path().to_string_lossy().into_owned(),
            ..Config::default()
        }
    }

    pub fn vocabulary(&self) -> Arc<Vocabulary> {
        Arc::new(Vocabulary::load(self.dir.path().join("vocab.json")).expect("valid vocabulary"))
    }

    pub async fn start(&self) -> VocabularyScene<SceneGraph> {
        let host = SceneGraph::new(self.path());
        VocabularyScene::start(host, self.vocabulary(), &self.config())
            .await
            .expect("scene should start")
    }
}

/// The apple fixture with every file in place.
pub fn apple_fixture() -> Fixture {
    Fixture::new(APPLE_AND_BREAD)
        .with_model("apple.gltf", MODEL_GLTF)
        .with_sound("apple.wav")
        .with_sound("bread.wav")
}

/// Apple and pear, both with a model and a sound.
pub fn apple_and_pear_fixture() -> Fixture {
    Fixture::new(APPLE_AND_PEAR)
        .with_model("apple.gltf", MODEL_GLTF)
        .with_model("pear.gltf", MODEL_GLTF)
        .with_sound("apple.wav")
        .with_sound("pear.wav")
}

pub fn label_text(app: &VocabularyScene<SceneGraph>, label: NodeId) -> String {
    app.host()
        .text_of(label)
        .expect("label node has text")
        .to_string()
}
