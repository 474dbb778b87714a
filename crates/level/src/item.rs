//! Item stacks carried by players and dropped into the world

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Largest amount a single stack can hold
pub const MAX_STACK_SIZE: u8 = 64;

/// Vanilla item materials used by plugins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Material {
    Apple,
    GoldenApple,
    WheatSeeds,
    CocoaBeans,
    YellowDye,
    Dandelion,
    Stick,
}

/// Plugin-scoped identifier, e.g. `mangoplugin:mango`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NamespacedKey {
    pub namespace: String,
    pub key: String,
}

impl NamespacedKey {
    pub fn new(namespace: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            key: key.into(),
        }
    }
}

impl fmt::Display for NamespacedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.key)
    }
}

/// A stack of items with optional custom metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemStack {
    pub material: Material,
    pub amount: u8,
    pub display_name: Option<String>,
    pub lore: Vec<String>,
    pub custom_model_data: Option<i32>,
    /// Marker tags identifying plugin-defined items
    pub tags: BTreeSet<NamespacedKey>,
}

impl ItemStack {
    pub fn new(material: Material, amount: u8) -> Self {
        Self {
            material,
            amount: amount.clamp(1, MAX_STACK_SIZE),
            display_name: None,
            lore: Vec::new(),
            custom_model_data: None,
            tags: BTreeSet::new(),
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn with_lore(mut self, lore: Vec<String>) -> Self {
        self.lore = lore;
        self
    }

    pub fn with_custom_model_data(mut self, data: i32) -> Self {
        self.custom_model_data = Some(data);
        self
    }

    pub fn with_tag(mut self, tag: NamespacedKey) -> Self {
        self.tags.insert(tag);
        self
    }

    /// Same item with a different amount, clamped to a valid stack size
    pub fn with_amount(mut self, amount: u8) -> Self {
        self.amount = amount.clamp(1, MAX_STACK_SIZE);
        self
    }

    pub fn has_tag(&self, tag: &NamespacedKey) -> bool {
        self.tags.contains(tag)
    }

    /// Remove one item from the stack, returning what is left in hand
    pub fn take_one(mut self) -> Option<Self> {
        if self.amount > 1 {
            self.amount -= 1;
            Some(self)
        } else {
            None
        }
    }
}
