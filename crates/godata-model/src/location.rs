//! Hierarchical administrative locations as served by the registry.
//!
//! The tree root is the country; its children are states, whose children are
//! municipalities (with an extra region layer for some states). Nodes carry
//! registry fields beyond id and name; only those two matter here.

use serde::{Deserialize, Serialize};

/// Identity of one location node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationRef {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// One node of the hierarchical location tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationNode {
    pub location: LocationRef,
    #[serde(default)]
    pub children: Vec<LocationNode>,
}

impl LocationNode {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            location: LocationRef {
                id: id.into(),
                name: name.into(),
            },
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<LocationNode>) -> Self {
        self.children = children;
        self
    }

    /// Finds a direct child by exact display name.
    pub fn child_named(&self, name: &str) -> Option<&LocationNode> {
        self.children.iter().find(|node| node.location.name == name)
    }
}
