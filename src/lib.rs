//! vocab-market
//!
//! An interactive vocabulary scene for mixed-reality hosts. A data-driven
//! vocabulary table decides which 3D models and pronunciation clips are
//! preloaded; each entry with a model becomes a menu item with two triggers:
//! one cycles the label through original, translation and phonetics, the other
//! plays the pronunciation.
//!
//! High-level modules
//! - `vocabulary`: the validated vocabulary table
//! - `provision`: concurrent model and sound loading with per-entry outcomes
//! - `scene`: menu item construction and trigger wiring
//! - `interaction`: label cycling and pronunciation playback
//! - `flow`: startup sequencing and click dispatch
//! - `host`: the trait the host platform implements
//! - `data_structures`: transforms, prefabs and the in-process scene graph
//! - `resources`: model file loading
//!

pub mod config;
pub mod data_structures;
pub mod error;
pub mod flow;
pub mod host;
pub mod interaction;
pub mod provision;
pub mod resources;
pub mod scene;
pub mod vocabulary;

pub use config::Config;
pub use flow::{ClickOutcome, VocabularyScene, run};
pub use host::{MixedRealityHost, NodeId};
pub use vocabulary::{LabelState, Vocabulary, VocabularyEntry};
