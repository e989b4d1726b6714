//! Scene data structures.
//!
//! - `instance` holds local transforms and their composition
//! - `prefab` contains reusable node templates loaded from model files
//! - `scene_graph` is the in-process host: a hierarchical node arena

pub mod instance;
pub mod prefab;
pub mod scene_graph;
