//! Reusable node templates loaded from model files.

use crate::data_structures::instance::Instance;

/// A node of a template hierarchy.
#[derive(Clone, Debug, PartialEq)]
pub struct PrefabNode {
    pub name: String,
    pub local: Instance,
    pub mesh: Option<String>,
    pub children: Vec<PrefabNode>,
}

impl PrefabNode {
    /// Number of nodes in this subtree, including `self`.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(PrefabNode::count).sum::<usize>()
    }
}

/// A template that can be instantiated any number of times.
#[derive(Clone, Debug, PartialEq)]
pub struct Prefab {
    pub name: String,
    pub roots: Vec<PrefabNode>,
}

impl Prefab {
    pub fn node_count(&self) -> usize {
        self.roots.iter().map(PrefabNode::count).sum()
    }
}
